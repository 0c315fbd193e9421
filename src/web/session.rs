use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::error;

use crate::web::{USER, error::Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// The connected user, as stored in the session on login
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
}

/// Extracts the connected employee, rejecting anyone else with `Unauthorized`
#[derive(Debug, Clone)]
pub struct Employee(pub SessionUser);

impl<S> FromRequestParts<S> for Employee
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| {
                error!("Error getting session: {msg}");
                Error::Internal
            })?;

        match session.get::<SessionUser>(USER).await {
            Ok(Some(user)) if user.user_type == UserType::Employee => Ok(Employee(user)),
            Ok(_) => Err(Error::Unauthorized),
            Err(e) => {
                error!("Error reading user from session: {e}");
                Err(Error::Internal)
            }
        }
    }
}
