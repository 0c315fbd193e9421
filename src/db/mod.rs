use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::db::bill::{Bill, Receipt};

pub mod bill;
pub mod fixtures;

#[derive(Default, Debug)]
struct Tables {
    bills: Vec<Bill>,
    receipts: HashMap<Uuid, Receipt>,
}

/// Bills and their receipts, kept in memory for the lifetime of the process
#[derive(Default, Clone, Debug)]
pub struct MemStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-built bills and their receipts as they are, e.g. demo data
    /// at startup
    pub async fn init(&self, seed: Vec<(Bill, Receipt)>) -> Result<(), anyhow::Error> {
        let mut tables = self.tables.lock().await;
        tracing::debug!("seeding store with {} bills", seed.len());
        for (bill, receipt) in seed {
            tables.receipts.insert(bill.id, receipt);
            tables.bills.push(bill);
        }
        Ok(())
    }
}
