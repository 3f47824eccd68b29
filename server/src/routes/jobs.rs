//! Job proxy routes.
//!
//! Each handler is the same pipeline: the `Session` extractor, body parsing,
//! operation-specific payload validation, `jobs::forward`, response shaping.
//! Validation always finishes before the upstream call.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use serde_json::Value;
use tracing::info;

use super::auth::Session;
use crate::error::ApiError;
use crate::services::jobs::{self, parse_body};
use crate::state::AppState;

type JsonResult = Result<Json<Value>, ApiError>;

/// `POST /api/jobs/create`
pub async fn create(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let payload = jobs::create_payload(parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::CREATE, &token, &payload).await?;
    info!(operation = jobs::CREATE.name, "job created");
    Ok(Json(value))
}

/// `POST /api/jobs/run_job`
pub async fn run_job(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let payload = jobs::run_payload(&parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::RUN, &token, &payload).await?;
    info!(operation = jobs::RUN.name, "job started");
    Ok(Json(value))
}

/// `POST /api/jobs/stop_job`
pub async fn stop_job(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let (payload, uuids) = jobs::stop_payload(&parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::STOP, &token, &payload).await?;
    info!(operation = jobs::STOP.name, count = uuids.len(), "jobs stopped");
    Ok(Json(jobs::stop_response(&uuids, value)))
}

/// `POST /api/jobs/delete`
pub async fn delete(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let (payload, count) = jobs::delete_payload(parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::DELETE, &token, &payload).await?;
    info!(operation = jobs::DELETE.name, count, "jobs deleted");
    Ok(Json(value))
}

/// `POST /api/jobs/clone_job`
pub async fn clone_job(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let (payload, uuid) = jobs::clone_payload(&parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::CLONE, &token, &payload).await?;
    info!(operation = jobs::CLONE.name, %uuid, "job cloned");
    Ok(Json(value))
}

/// `POST /api/jobs/backup`
pub async fn backup(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let (payload, uuid) = jobs::backup_payload(&parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::BACKUP, &token, &payload).await?;
    info!(operation = jobs::BACKUP.name, %uuid, "job backed up");
    Ok(Json(jobs::backup_response(&uuid, value)))
}

/// `POST /api/jobs/get_crawl_def`
pub async fn get_crawl_def(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let payload = jobs::crawl_def_payload(&parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::CRAWL_DEF, &token, &payload).await?;
    info!(operation = jobs::CRAWL_DEF.name, "crawl definition fetched");
    Ok(Json(value))
}

/// `POST /api/jobs/edit_job`
pub async fn edit_job(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let payload = jobs::edit_payload(parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::EDIT, &token, &payload).await?;
    info!(operation = jobs::EDIT.name, "job edited");
    Ok(Json(value))
}

/// `POST /api/jobs/audit`
pub async fn audit(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let payload = jobs::audit_payload(parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::AUDIT, &token, &payload).await?;
    info!(operation = jobs::AUDIT.name, "audit log read");
    Ok(Json(value))
}

// =============================================================================
// LISTINGS
// =============================================================================

/// `POST /api/jobs/pending`
pub async fn pending(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let payload = jobs::pending_payload(parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::PENDING, &token, &payload).await?;
    info!(operation = jobs::PENDING.name, "listing fetched");
    Ok(Json(jobs::normalize_listing(value, &jobs::PENDING, "pending")))
}

/// `POST /api/jobs/running`
pub async fn running(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let payload = jobs::running_payload(parse_body(&body)?)?;
    let value = jobs::forward(&state.upstream, &jobs::RUNNING, &token, &payload).await?;
    info!(operation = jobs::RUNNING.name, "listing fetched");
    Ok(Json(jobs::normalize_listing(value, &jobs::RUNNING, "pending")))
}

/// `POST /api/jobs/terminated`
///
/// Served from the per-session cache when it is enabled and fresh.
pub async fn terminated(State(state): State<AppState>, Session { token }: Session, body: Bytes) -> JsonResult {
    let payload = jobs::terminated_payload(parse_body(&body)?)?;
    if let Some(cached) = state.terminated_cache.get(&token, &payload) {
        info!(operation = jobs::TERMINATED.name, "served from cache");
        return Ok(Json(cached));
    }

    let value = jobs::forward(&state.upstream, &jobs::TERMINATED, &token, &payload).await?;
    info!(operation = jobs::TERMINATED.name, "listing fetched");
    let value = jobs::normalize_listing(value, &jobs::TERMINATED, "data");
    state.terminated_cache.insert(&token, &payload, value.clone());
    Ok(Json(value))
}

#[cfg(test)]
#[path = "jobs_test.rs"]
mod tests;
