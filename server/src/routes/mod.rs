//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the auth gateway, the job proxy endpoints and the binary
//! pass-throughs under a single Axum router. Each `/api/auth` and
//! `/api/jobs` route accepts one method; any other method gets the JSON
//! 405 body instead of Axum's empty default.

pub mod auth;
pub mod download;
pub mod jobs;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{MethodRouter, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// POST-only route with the JSON 405 fallback.
fn post_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: axum::handler::Handler<T, AppState>,
    T: 'static,
{
    post(handler).fallback(post_not_allowed)
}

/// GET-only route with the JSON 405 fallback.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: axum::handler::Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(get_not_allowed)
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post_only(auth::login))
        .route("/api/auth/logout", post_only(auth::logout))
        .route("/api/auth/check-session", get_only(auth::check_session))
        .route("/api/auth/user_profile", post_only(auth::user_profile))
        .route("/api/jobs/create", post_only(jobs::create))
        .route("/api/jobs/run_job", post_only(jobs::run_job))
        .route("/api/jobs/stop_job", post_only(jobs::stop_job))
        .route("/api/jobs/delete", post_only(jobs::delete))
        .route("/api/jobs/clone_job", post_only(jobs::clone_job))
        .route("/api/jobs/backup", post_only(jobs::backup))
        .route("/api/jobs/pending", post_only(jobs::pending))
        .route("/api/jobs/running", post_only(jobs::running))
        .route("/api/jobs/terminated", post_only(jobs::terminated))
        .route("/api/jobs/get_crawl_def", post_only(jobs::get_crawl_def))
        .route("/api/jobs/edit_job", post_only(jobs::edit_job))
        .route("/api/jobs/audit", post_only(jobs::audit))
        .route("/api/jobs/export_job", post_only(download::export_job))
        .route("/api/download/download", get(download::download))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn post_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("POST")
}

async fn get_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("GET")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
