use axum::extract::{Multipart, multipart::MultipartError};
use chrono::{Datelike, NaiveDate};

use crate::db::bill::{Bill, BillStatus, NewBill, Receipt};

pub const MAX_RECEIPT_FILE_SIZE_BYTES: usize = 1_000_000; // ~1 MB
/// Upper bound for a whole new bill submission. Receipts between the two
/// limits reach the form checks and are rejected there.
pub const MAX_NEW_BILL_BODY_BYTES: usize = 10 * MAX_RECEIPT_FILE_SIZE_BYTES;
pub const ACCEPTED_RECEIPT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
pub const DEFAULT_PCT: u32 = 20;
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

#[derive(Debug, Clone)]
pub struct BillForList {
    pub id: String,
    pub date: String,
    pub formatted_date: String,
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub status: String,
    pub receipt_url: String,
}

impl From<&Bill> for BillForList {
    fn from(bill: &Bill) -> Self {
        Self {
            id: bill.id.to_string(),
            date: bill.date.clone(),
            formatted_date: format_date(&bill.date),
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            amount: bill.amount,
            status: format_status(bill.status).to_owned(),
            receipt_url: bill.receipt_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReceiptModal {
    pub url: String,
    pub file_name: String,
}

/// Most recent first, comparing the date strings as they are.
/// This is a plain string comparison, it only matches calendar order for
/// well-formed ISO dates.
pub fn sort_by_date_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

/// `2004-04-04` becomes `4 Avr. 04`, anything unparseable is returned as is
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => format!(
            "{} {}. {:02}",
            d.day(),
            MONTHS[d.month0() as usize],
            d.year().rem_euclid(100)
        ),
        Err(e) => {
            tracing::debug!("could not format date {date}: {e}");
            date.to_owned()
        }
    }
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refused",
    }
}

pub fn is_accepted_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ACCEPTED_RECEIPT_EXTENSIONS
            .iter()
            .any(|accepted| ext.eq_ignore_ascii_case(accepted)),
        None => false,
    }
}

/// A file picked in the new bill form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn validate(&self) -> Result<(), String> {
        if !is_accepted_extension(&self.name) {
            return Err(format!(
                "Le fichier {} n'est pas accepté, formats autorisés : jpg, jpeg, png, gif",
                self.name
            ));
        }
        if self.content.is_empty() {
            return Err(format!("Le fichier {} est vide", self.name));
        }
        if self.content.len() > MAX_RECEIPT_FILE_SIZE_BYTES {
            return Err(format!("Le fichier {} est trop volumineux", self.name));
        }
        Ok(())
    }

    pub fn into_receipt(self) -> Receipt {
        Receipt {
            name: self.name,
            mime_type: self.mime_type,
            content: self.content,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub expense_type: Option<String>,
    pub date: Option<String>,
    pub amount: Option<String>,
    pub pct: Option<String>,
    pub file: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.expense_type.is_none()
            && self.date.is_none()
            && self.amount.is_none()
            && self.pct.is_none()
            && self.file.is_none()
    }
}

/// Fields of the new bill form, as submitted
#[derive(Debug, Clone, Default)]
pub struct NewBillData {
    pub csrf_token: String,
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
    pub file: Option<UploadedFile>,
}

#[derive(Debug)]
pub struct InvalidNewBill {
    pub data: NewBillData,
    pub errors: FormErrors,
}

struct Checked {
    date: NaiveDate,
    amount: f64,
    pct: u32,
}

impl NewBillData {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut data = NewBillData::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(field_name) = field.name().map(str::to_owned) else {
                continue;
            };
            if field_name == "file" {
                let name = field.file_name().unwrap_or_default().to_owned();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let mut field = field;
                let mut content = Vec::new();
                // past the limit only the overflow matters, the rest is dropped
                while let Some(chunk) = field.chunk().await? {
                    if content.len() <= MAX_RECEIPT_FILE_SIZE_BYTES {
                        content.extend_from_slice(&chunk);
                    }
                }
                content.truncate(MAX_RECEIPT_FILE_SIZE_BYTES + 1);
                // browsers send an unnamed empty part when nothing was picked
                if !name.is_empty() {
                    data.file = Some(UploadedFile {
                        name,
                        mime_type,
                        content,
                    });
                }
                continue;
            }

            let value = field.text().await?;
            match field_name.as_str() {
                "csrf_token" => data.csrf_token = value,
                "expense_type" => data.expense_type = value,
                "name" => data.name = value,
                "date" => data.date = value,
                "amount" => data.amount = value,
                "vat" => data.vat = value,
                "pct" => data.pct = value,
                "commentary" => data.commentary = value,
                other => tracing::debug!("ignoring unknown field {other}"),
            }
        }
        Ok(data)
    }

    fn check(&self) -> Result<Checked, FormErrors> {
        let mut errors = FormErrors::default();

        if !EXPENSE_TYPES.contains(&self.expense_type.as_str()) {
            errors.expense_type = Some("Type de dépense inconnu".to_owned());
        }
        let date = match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.date = Some("Date invalide".to_owned());
                None
            }
        };
        let amount = match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => Some(amount),
            _ => {
                errors.amount = Some("Montant invalide".to_owned());
                None
            }
        };
        let pct = if self.pct.trim().is_empty() {
            Some(DEFAULT_PCT)
        } else {
            match self.pct.trim().parse::<u32>() {
                Ok(pct) if pct <= 100 => Some(pct),
                _ => {
                    errors.pct = Some("Pourcentage invalide".to_owned());
                    None
                }
            }
        };
        errors.file = match &self.file {
            Some(file) => file.validate().err(),
            None => Some("Veuillez joindre un justificatif".to_owned()),
        };

        match (date, amount, pct) {
            (Some(date), Some(amount), Some(pct)) if errors.is_empty() => {
                Ok(Checked { date, amount, pct })
            }
            _ => Err(errors),
        }
    }

    /// Builds the create payload for the given employee, or hands the data
    /// back with what is wrong with it
    pub fn into_new_bill(mut self, email: &str) -> Result<NewBill, Box<InvalidNewBill>> {
        let checked = self.check();
        match (checked, self.file.take()) {
            (Ok(Checked { date, amount, pct }), Some(file)) => Ok(NewBill {
                email: email.to_owned(),
                expense_type: self.expense_type,
                name: self.name.trim().to_owned(),
                date: date.format("%Y-%m-%d").to_string(),
                amount,
                vat: self.vat.trim().to_owned(),
                pct,
                commentary: self.commentary.trim().to_owned(),
                receipt: file.into_receipt(),
            }),
            (checked, file) => {
                self.file = file;
                let errors = checked.err().unwrap_or_default();
                Err(Box::new(InvalidNewBill { data: self, errors }))
            }
        }
    }
}
