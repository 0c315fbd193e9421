use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::web::{
    bill::data::{BillForList, EXPENSE_TYPES, FormErrors, NewBillData, ReceiptModal},
    routes,
};

use super::error::Error;

pub struct HtmlTemplate<T>(pub T);

/// Which icon of the vertical layout is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveIcon {
    Hidden,
    Window,
    Mail,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub active: ActiveIcon,
    pub error: String,
}

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!("Error rendering template: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error rendering template",
                )
                    .into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub active: ActiveIcon,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "bills.html")]
pub struct BillsTemplate {
    pub active: ActiveIcon,
    pub email: String,
    pub bills: Vec<BillForList>,
    pub modal: Option<ReceiptModal>,
}

#[derive(Template)]
#[template(path = "new_bill.html")]
pub struct NewBillTemplate {
    pub active: ActiveIcon,
    pub csrf_token: String,
    pub expense_types: Vec<ExpenseTypeOption>,
    pub form: NewBillForm,
    pub errors: FormErrors,
}

pub struct ExpenseTypeOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Values shown back in the new bill form
#[derive(Debug, Clone, Default)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
    pub file_name: Option<String>,
}

impl NewBillForm {
    pub fn empty() -> Self {
        Self {
            expense_type: EXPENSE_TYPES[0].to_owned(),
            ..Default::default()
        }
    }
}

impl From<&NewBillData> for NewBillForm {
    fn from(data: &NewBillData) -> Self {
        Self {
            expense_type: data.expense_type.clone(),
            name: data.name.clone(),
            date: data.date.clone(),
            amount: data.amount.clone(),
            vat: data.vat.clone(),
            pct: data.pct.clone(),
            commentary: data.commentary.clone(),
            file_name: data.file.as_ref().map(|f| f.name.clone()),
        }
    }
}

impl NewBillTemplate {
    pub fn new(csrf_token: String, form: NewBillForm, errors: FormErrors) -> Self {
        Self {
            active: ActiveIcon::Mail,
            csrf_token,
            expense_types: EXPENSE_TYPES
                .iter()
                .map(|&label| ExpenseTypeOption {
                    label,
                    selected: form.expense_type == label,
                })
                .collect(),
            form,
            errors,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let response = match self {
            Error::Unauthorized => return Redirect::to(routes::LOGIN).into_response(),
            Error::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal Server Error"),
            ),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Store(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        (
            response.0,
            HtmlTemplate(ErrorTemplate {
                active: ActiveIcon::Hidden,
                error: response.1,
            }),
        )
            .into_response()
    }
}
