use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;
use tracing::error;

mod data;

use crate::web::{
    Result, USER,
    csrf::{gen_csrf, verify_csrf},
    error::Error,
    routes,
    session::{SessionUser, UserType},
    templates::{ActiveIcon, HtmlTemplate, LoginTemplate},
    user::data::LoginData,
};

#[tracing::instrument(level = tracing::Level::DEBUG, skip(session))]
pub async fn login(session: Session) -> Result<impl IntoResponse> {
    tracing::debug!("login called");
    let template = LoginTemplate {
        active: ActiveIcon::Hidden,
        csrf_token: gen_csrf(&session).await.map_err(|_| Error::Internal)?,
    };
    Ok(HtmlTemplate(template))
}

#[tracing::instrument(level = tracing::Level::DEBUG, skip(session, payload))]
pub async fn do_login(session: Session, Form(payload): Form<LoginData>) -> Result<impl IntoResponse> {
    tracing::debug!("do login called");
    verify_csrf(&payload.csrf_token, &session)
        .await
        .map_err(|_| Error::Unauthorized)?;
    if !payload.validate() {
        return Err(Error::BadRequest("invalid payload".to_string()));
    }
    if payload.user_type != UserType::Employee {
        return Err(Error::BadRequest("only employees can sign in here".to_string()));
    }

    // new session id on sign in, the pre-login cookie is worthless afterwards
    session.cycle_id().await.map_err(|e| {
        error!("error cycling session id: {e}");
        Error::Internal
    })?;

    // add user to the session
    session
        .insert(
            USER,
            SessionUser {
                user_type: payload.user_type,
                email: payload.email.trim().to_string(),
            },
        )
        .await
        .map_err(|e| {
            error!("error putting user in session: {e}");
            Error::Internal
        })?;

    Ok(Redirect::to(routes::BILLS).into_response())
}

#[tracing::instrument(level = tracing::Level::DEBUG, skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    tracing::debug!("logout called");
    session.delete().await.map_err(|e| {
        error!("Error logging out: {e}");
        Error::Internal
    })?;
    Ok(Redirect::to(routes::LOGIN))
}
