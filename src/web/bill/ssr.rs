use std::str::FromStr;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    Ctx,
    db::bill::Bill,
    web::{
        Result,
        bill::data::{BillForList, FormErrors, NewBillData, ReceiptModal, sort_by_date_desc},
        csrf::{gen_csrf, verify_csrf},
        error::Error,
        routes,
        session::Employee,
        templates::{ActiveIcon, BillsTemplate, HtmlTemplate, NewBillForm, NewBillTemplate},
    },
};

#[derive(Debug, Deserialize)]
pub struct BillsQuery {
    /// Id of the bill whose receipt is shown in the modal
    pub receipt: Option<String>,
}

/// Bills of the connected employee, most recent first
#[tracing::instrument(level = tracing::Level::DEBUG, skip(ctx))]
pub async fn list(
    Employee(user): Employee,
    State(ctx): State<Ctx>,
    Query(query): Query<BillsQuery>,
) -> Result<impl IntoResponse> {
    let mut bills: Vec<Bill> = ctx
        .bill_store
        .list()
        .await
        .map_err(|e| {
            error!("Error fetching bills for {}: {e}", user.email);
            Error::store(e)
        })?
        .into_iter()
        .filter(|b| b.email == user.email)
        .collect();
    sort_by_date_desc(&mut bills);

    let modal = match query.receipt {
        Some(id) => {
            let parsed_id =
                Uuid::from_str(&id).map_err(|_| Error::BadRequest("invalid id".to_string()))?;
            let bill = bills
                .iter()
                .find(|b| b.id == parsed_id)
                .ok_or_else(|| Error::NotFound("bill not found".to_string()))?;
            Some(ReceiptModal {
                url: bill.receipt_url.clone(),
                file_name: bill.file_name.clone(),
            })
        }
        None => None,
    };

    Ok(HtmlTemplate(BillsTemplate {
        active: ActiveIcon::Window,
        email: user.email,
        bills: bills.iter().map(BillForList::from).collect(),
        modal,
    }))
}

#[tracing::instrument(level = tracing::Level::DEBUG, skip(session))]
pub async fn new_bill(Employee(user): Employee, session: Session) -> Result<impl IntoResponse> {
    tracing::debug!("new bill form for {}", user.email);
    let csrf_token = gen_csrf(&session).await.map_err(|_| Error::Internal)?;
    Ok(HtmlTemplate(NewBillTemplate::new(
        csrf_token,
        NewBillForm::empty(),
        FormErrors::default(),
    )))
}

/// Validates the submitted form and receipt, creates the bill and goes back
/// to the bill list. An invalid form is rendered again with its errors.
#[tracing::instrument(level = tracing::Level::DEBUG, skip(ctx, session, multipart))]
pub async fn create(
    Employee(user): Employee,
    session: Session,
    State(ctx): State<Ctx>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let data = NewBillData::from_multipart(multipart).await.map_err(|e| {
        warn!("Error reading new bill form from {}: {e}", user.email);
        Error::BadRequest("invalid form".to_string())
    })?;

    verify_csrf(&data.csrf_token, &session)
        .await
        .map_err(|_| Error::Unauthorized)?;

    let new_bill = match data.into_new_bill(&user.email) {
        Ok(new_bill) => new_bill,
        Err(invalid) => {
            if let Some(msg) = &invalid.errors.file {
                warn!("Rejected receipt from {}: {msg}", user.email);
            }
            let csrf_token = gen_csrf(&session).await.map_err(|_| Error::Internal)?;
            let template = NewBillTemplate::new(
                csrf_token,
                NewBillForm::from(&invalid.data),
                invalid.errors,
            );
            return Ok((StatusCode::BAD_REQUEST, HtmlTemplate(template)).into_response());
        }
    };

    let bill = ctx.bill_store.create(new_bill).await.map_err(|e| {
        error!("Error creating bill for {}: {e}", user.email);
        Error::store(e)
    })?;
    info!("Created bill {} for {}", bill.id, user.email);

    Ok(Redirect::to(routes::BILLS).into_response())
}
