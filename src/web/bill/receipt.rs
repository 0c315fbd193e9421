use std::{str::FromStr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    db::bill::BillStore,
    web::{Result, error::Error, session::Employee},
};

/// Serves the receipt of one of the connected employee's bills
#[tracing::instrument(level = tracing::Level::DEBUG, skip(store))]
pub async fn download(
    Employee(user): Employee,
    State(store): State<Arc<dyn BillStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let parsed_id = Uuid::from_str(&id).map_err(|_| Error::BadRequest("invalid id".to_string()))?;

    let owned = store
        .list()
        .await
        .map_err(|e| {
            error!("Error fetching bills for {}: {e}", user.email);
            Error::store(e)
        })?
        .iter()
        .any(|b| b.id == parsed_id && b.email == user.email);
    if !owned {
        return Err(Error::NotFound("bill not found".to_string()));
    }

    match store.receipt(&parsed_id).await {
        Ok(Some(receipt)) => Ok((
            [(header::CONTENT_TYPE, receipt.mime_type)],
            receipt.content,
        )),
        Ok(None) => Err(Error::NotFound("receipt not found".to_string())),
        Err(e) => {
            error!("Error fetching receipt {id}: {e}");
            Err(Error::store(e))
        }
    }
}
