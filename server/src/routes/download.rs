//! Binary pass-through routes: job result downloads and job exports.
//!
//! Bytes are proxied unchanged; only the content headers are set locally.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::ApiError;
use crate::services::session;
use crate::services::upstream::UpstreamError;
use crate::state::AppState;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_EXPORT_DISPOSITION: &str = "attachment; filename=\"job-export.ken\"";
const OCTET_STREAM: &str = "application/octet-stream";

/// Downloadable result formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Xlsx,
    Csv,
    Spc,
    Sql,
}

impl FileType {
    const VALID: &'static str = "xlsx, csv, spc, sql";

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            "spc" => Some(Self::Spc),
            "sql" => Some(Self::Sql),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Spc => "spc",
            Self::Sql => "sql",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
            Self::Spc => OCTET_STREAM,
            Self::Sql => "application/x-sqlite3",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Sql => "sqlite3",
            other => other.as_str(),
        }
    }
}

/// `job-<first 8 chars of uuid>.<ext>`
#[must_use]
pub fn download_filename(uuid: &str, file_type: FileType) -> String {
    let prefix: String = uuid.chars().take(8).collect();
    format!("job-{prefix}.{}", file_type.extension())
}

fn failure_reason(err: &UpstreamError) -> String {
    match err {
        UpstreamError::Status { status_text, .. } => status_text.clone(),
        other => other.to_string(),
    }
}

/// Cookie check shared by both pass-throughs. Runs after query validation.
fn require_token(state: &AppState, jar: &CookieJar) -> Result<String, ApiError> {
    let token = session::session_token(jar).ok_or_else(|| ApiError::AuthenticationRequired("Unauthorized".into()))?;
    if !state.upstream.is_configured() {
        tracing::error!("upstream API URL not configured");
        return Err(ApiError::Configuration);
    }
    Ok(token)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// =============================================================================
// DOWNLOAD
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    uuid: Option<String>,
    #[serde(rename = "type")]
    file_type: Option<String>,
}

/// `GET /api/download/download?uuid=&type=`
pub async fn download(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let uuid = non_empty(query.uuid).ok_or_else(|| ApiError::InvalidRequest("UUID is required".into()))?;
    let raw_type = non_empty(query.file_type).ok_or_else(|| ApiError::InvalidRequest("Type is required".into()))?;
    let file_type = FileType::parse(&raw_type)
        .ok_or_else(|| ApiError::InvalidRequest(format!("Invalid type. Must be one of: {}", FileType::VALID)))?;
    let token = require_token(&state, &jar)?;

    let payload = state
        .upstream
        .get_bytes("/download", &[("uuid", uuid.as_str()), ("type", file_type.as_str())], &token, DOWNLOAD_TIMEOUT)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "file download failed");
            ApiError::Internal(format!("Failed to download file: {}", failure_reason(&e)))
        })?;

    tracing::info!(file_type = file_type.as_str(), bytes = payload.body.len(), "file downloaded");
    let disposition = format!("attachment; filename=\"{}\"", download_filename(&uuid, file_type));
    Ok((
        [
            (CONTENT_TYPE, file_type.content_type().to_owned()),
            (CONTENT_DISPOSITION, disposition),
            (CONTENT_LENGTH, payload.body.len().to_string()),
        ],
        payload.body,
    )
        .into_response())
}

// =============================================================================
// EXPORT
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "jobId")]
    job_id: Option<String>,
}

/// `POST /api/jobs/export_job?jobId=`
pub async fn export_job(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let job_id = non_empty(query.job_id).ok_or_else(|| ApiError::InvalidRequest("Job ID is required".into()))?;
    let token = require_token(&state, &jar)?;

    let path = format!("/jobs/{}/export", urlencoding::encode(&job_id));
    let payload = state
        .upstream
        .get_bytes(&path, &[], &token, DOWNLOAD_TIMEOUT)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "job export failed");
            ApiError::Internal(format!("Failed to export job: {}", failure_reason(&e)))
        })?;

    let disposition = payload
        .content_disposition
        .unwrap_or_else(|| DEFAULT_EXPORT_DISPOSITION.to_owned());
    Ok((
        [
            (CONTENT_TYPE, OCTET_STREAM.to_owned()),
            (CONTENT_DISPOSITION, disposition),
            (CONTENT_LENGTH, payload.body.len().to_string()),
        ],
        payload.body,
    )
        .into_response())
}

#[cfg(test)]
#[path = "download_test.rs"]
mod tests;
