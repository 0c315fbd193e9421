use uuid::Uuid;

use crate::db::bill::{Bill, BillStatus, Receipt, receipt_url};

/// 1x1 white GIF standing in for the scanned receipts of the demo bills
const PLACEHOLDER_RECEIPT: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xff, 0xff,
    0xff, 0x00, 0x00, 0x00, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

/// Demo bills for the given employee, each with a receipt to preview
pub fn seed(email: &str) -> Vec<(Bill, Receipt)> {
    bills(email)
        .into_iter()
        .map(|bill| {
            let receipt = Receipt {
                name: bill.file_name.clone(),
                mime_type: "image/gif".to_string(),
                content: PLACEHOLDER_RECEIPT.to_vec(),
            };
            (bill, receipt)
        })
        .collect()
}

/// Demo bills for the given employee, in no particular order
pub fn bills(email: &str) -> Vec<Bill> {
    let bill = |date: &str,
                expense_type: &str,
                name: &str,
                amount: f64,
                status: BillStatus,
                file_name: &str| {
        let id = Uuid::new_v4();
        Bill {
            id,
            email: email.to_string(),
            expense_type: expense_type.to_string(),
            name: name.to_string(),
            date: date.to_string(),
            amount,
            vat: "70".to_string(),
            pct: 20,
            commentary: String::new(),
            status,
            receipt_url: receipt_url(&id),
            file_name: file_name.to_string(),
        }
    };

    vec![
        bill(
            "2004-04-04",
            "Hôtel et logement",
            "encore",
            400.0,
            BillStatus::Pending,
            "preview-facture-free-201801-pdf-1.jpg",
        ),
        bill(
            "2001-01-01",
            "Transports",
            "test1",
            100.0,
            BillStatus::Refused,
            "1592770761.jpeg",
        ),
        bill(
            "2003-03-03",
            "Services en ligne",
            "test3",
            300.0,
            BillStatus::Accepted,
            "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
        ),
        bill(
            "2002-02-02",
            "Restaurants et bars",
            "test2",
            200.0,
            BillStatus::Accepted,
            "facture.png",
        ),
    ]
}
