use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::MemStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub email: String,
    pub expense_type: String,
    pub name: String,
    pub date: String, // ISO 8601 date as submitted, e.g. 2004-04-04
    pub amount: f64,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    pub status: BillStatus,
    pub receipt_url: String,
    pub file_name: String,
}

/// The receipt image attached to a bill
#[derive(Clone, Debug)]
pub struct Receipt {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// Payload of a create call, everything the employee submitted
#[derive(Clone, Debug)]
pub struct NewBill {
    pub email: String,
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: f64,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    pub receipt: Receipt,
}

pub fn receipt_url(id: &Uuid) -> String {
    format!("/receipts/{id}")
}

#[async_trait]
pub trait BillStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Bill>, anyhow::Error>;
    async fn create(&self, new_bill: NewBill) -> Result<Bill, anyhow::Error>;
    async fn receipt(&self, id: &Uuid) -> Result<Option<Receipt>, anyhow::Error>;
}

#[async_trait]
impl BillStore for MemStore {
    async fn list(&self) -> Result<Vec<Bill>, anyhow::Error> {
        Ok(self.tables.lock().await.bills.clone())
    }

    async fn create(&self, new_bill: NewBill) -> Result<Bill, anyhow::Error> {
        let id = Uuid::new_v4();
        let bill = Bill {
            id,
            email: new_bill.email,
            expense_type: new_bill.expense_type,
            name: new_bill.name,
            date: new_bill.date,
            amount: new_bill.amount,
            vat: new_bill.vat,
            pct: new_bill.pct,
            commentary: new_bill.commentary,
            status: BillStatus::Pending,
            receipt_url: receipt_url(&id),
            file_name: new_bill.receipt.name.clone(),
        };

        let mut tables = self.tables.lock().await;
        tables.receipts.insert(id, new_bill.receipt);
        tables.bills.push(bill.clone());
        Ok(bill)
    }

    async fn receipt(&self, id: &Uuid) -> Result<Option<Receipt>, anyhow::Error> {
        Ok(self.tables.lock().await.receipts.get(id).cloned())
    }
}
