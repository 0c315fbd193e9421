use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{
    Expiry, SessionManagerLayer,
    cookie::{SameSite, time::Duration},
};

use crate::{Config, Ctx, web::bill::data::MAX_NEW_BILL_BODY_BYTES};

mod bill;
mod csrf;
mod error;
pub mod session;
mod templates;
mod user;


pub type Result<T> = std::result::Result<T, error::Error>;

pub const SESSION_EXPIRATION_SEC: i64 = 60 * 30; // 30 min
pub const CSRF_TOKEN: &str = "csrf_token";
pub const USER: &str = "user";

/// Paths of the pages, navigating means redirecting to one of these
pub mod routes {
    pub const LOGIN: &str = "/";
    pub const DO_LOGIN: &str = "/login";
    pub const LOGOUT: &str = "/logout";
    pub const BILLS: &str = "/employee/bills";
    pub const NEW_BILL: &str = "/employee/bill/new";
    pub const RECEIPT: &str = "/receipts/{id}";
}

pub fn router(ctx: Ctx, cfg: &Config) -> Router {
    let sessions = SessionManagerLayer::new(ctx.session_store.clone())
        .with_secure(cfg.cookie_secure)
        .with_domain(cfg.domain.clone())
        .with_same_site(SameSite::Strict)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRATION_SEC,
        )))
        .with_http_only(true);

    let web = Router::new()
        .nest_service(
            "/static",
            ServeDir::new(format!("{}/static", env!("CARGO_MANIFEST_DIR"))),
        )
        .route("/health", get(health))
        .route(routes::LOGIN, get(user::login))
        .route(routes::DO_LOGIN, post(user::do_login))
        .route(routes::LOGOUT, get(user::logout))
        .route(routes::BILLS, get(bill::ssr::list))
        .route(
            routes::NEW_BILL,
            get(bill::ssr::new_bill)
                .post(bill::ssr::create)
                .layer(DefaultBodyLimit::max(MAX_NEW_BILL_BODY_BYTES)),
        )
        .route(routes::RECEIPT, get(bill::receipt::download))
        .layer(sessions)
        .layer(TraceLayer::new_for_http());
    Router::new().merge(web).with_state(ctx)
}

async fn health() -> Result<&'static str> {
    Ok("OK")
}
