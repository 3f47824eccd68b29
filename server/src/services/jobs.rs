//! Job proxy service: operation table, request validation, payload shaping,
//! upstream failure mapping and response normalization.
//!
//! DESIGN
//! ======
//! Every job endpoint is the same pipeline parameterized by a `JobOperation`:
//! validate the caller's body, forward a shaped payload upstream under the
//! operation's timeout, then map failures to the local taxonomy with the
//! operation's own wording. The route layer only picks the operation and the
//! shaping functions.

use std::time::Duration;

use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::upstream::{UpstreamClient, UpstreamError};
use crate::error::{ApiError, SESSION_EXPIRED_MESSAGE};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const EXTENDED_TIMEOUT: Duration = Duration::from_secs(30);
pub const BACKUP_TIMEOUT: Duration = Duration::from_secs(60);

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body. Please check your data format.";

// =============================================================================
// OPERATION TABLE
// =============================================================================

/// User-facing wording for each mapped upstream failure of one operation.
#[derive(Debug, Clone, Copy)]
pub struct FailureMessages {
    pub bad_request: &'static str,
    pub forbidden: &'static str,
    pub not_found: &'static str,
    pub conflict: &'static str,
    pub validation: &'static str,
    pub rate_limited: &'static str,
    pub server_error: &'static str,
    pub unavailable: &'static str,
    pub timeout: &'static str,
    pub unreachable: &'static str,
    pub unexpected: &'static str,
    /// Upstream answered 2xx with no body.
    pub empty: &'static str,
    /// Prefix for statuses outside the fixed vocabulary; the reason phrase is appended.
    pub other_prefix: &'static str,
}

impl FailureMessages {
    const DEFAULT: Self = Self {
        bad_request: "Invalid request parameters. Please check your input and try again.",
        forbidden: "You don't have permission to perform this action.",
        not_found: "Requested resource not found.",
        conflict: "The request conflicts with the current state of the job.",
        validation: "Request validation failed. Please check your parameters.",
        rate_limited: "Too many requests. Please wait before trying again.",
        server_error: "Server error occurred. Please try again later.",
        unavailable: "Service temporarily unavailable. Please try again later.",
        timeout: "Request timed out. Please try again.",
        unreachable: "Unable to connect to the service. Please check your connection and try again.",
        unexpected: "An unexpected error occurred. Please try again later.",
        empty: "No response received from the server.",
        other_prefix: "Request failed",
    };
}

/// One proxied job operation.
#[derive(Debug, Clone, Copy)]
pub struct JobOperation {
    /// Short name used in logs.
    pub name: &'static str,
    pub upstream_path: &'static str,
    pub timeout: Duration,
    pub messages: FailureMessages,
}

pub const CREATE: JobOperation = JobOperation {
    name: "create",
    upstream_path: "/save_run_job",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid job data. Please check your input and try again.",
        forbidden: "You don't have permission to create jobs.",
        not_found: "Job creation endpoint not found. Please contact support.",
        conflict: "A job with similar parameters already exists.",
        validation: "Job data validation failed. Please check your input.",
        rate_limited: "Too many requests. Please wait before creating another job.",
        server_error: "Server error occurred while creating the job. Please try again later.",
        unavailable: "Job creation service is temporarily unavailable. Please try again later.",
        timeout: "Job creation request timed out. The job may still be processing.",
        unreachable: "Unable to connect to job creation service. Please try again later.",
        unexpected: "An unexpected error occurred while creating the job.",
        empty: "Job creation completed but no data was returned.",
        other_prefix: "Job creation failed",
    },
};

pub const RUN: JobOperation = JobOperation {
    name: "run_job",
    upstream_path: "/run_job",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid job UUID or job cannot be run.",
        forbidden: "You don't have permission to run this job.",
        not_found: "Job not found. It may have been deleted.",
        conflict: "A job with similar configuration already exists.",
        validation: "Job validation failed. Cannot run this job.",
        server_error: "Server error occurred while running the job. Please try again later.",
        unavailable: "Job service is temporarily unavailable. Please try again later.",
        unreachable: "Unable to connect to the job service. Please check your connection and try again.",
        unexpected: "An unexpected error occurred while running the job.",
        empty: "No response received from the job service.",
        other_prefix: "Failed to run job",
        ..FailureMessages::DEFAULT
    },
};

pub const STOP: JobOperation = JobOperation {
    name: "stop_job",
    upstream_path: "/stop_job",
    timeout: EXTENDED_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid request parameters. Please check the job UUIDs and try again.",
        forbidden: "You don't have permission to stop these jobs.",
        not_found: "One or more jobs not found. They may have already completed or been stopped.",
        conflict: "One or more jobs cannot be stopped in their current state.",
        validation: "Request validation failed. Please check the job UUIDs.",
        server_error: "Server error occurred while stopping jobs. Please try again later.",
        unexpected: "An unexpected error occurred while stopping jobs.",
        other_prefix: "Failed to stop jobs",
        ..FailureMessages::DEFAULT
    },
};

pub const DELETE: JobOperation = JobOperation {
    name: "delete",
    upstream_path: "/remove_job",
    timeout: EXTENDED_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid delete request. Please check the job UUIDs and state.",
        forbidden: "You don't have permission to delete jobs.",
        not_found: "One or more jobs not found or delete endpoint unavailable.",
        conflict: "Some jobs cannot be deleted in their current state.",
        validation: "Job deletion validation failed. Please check your selection.",
        server_error: "Server error occurred during deletion. Please try again later.",
        unavailable: "Delete service is temporarily unavailable. Please try again later.",
        timeout: "Delete request timed out. Some jobs may have been deleted.",
        unreachable: "Unable to connect to delete service. Please try again later.",
        unexpected: "An unexpected error occurred during deletion.",
        empty: "Deletion completed but no confirmation was returned.",
        other_prefix: "Job deletion failed",
        ..FailureMessages::DEFAULT
    },
};

pub const CLONE: JobOperation = JobOperation {
    name: "clone_job",
    upstream_path: "/clone_job",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid job UUID or job cannot be cloned.",
        forbidden: "You don't have permission to clone this job.",
        not_found: "Job not found. It may have been deleted.",
        conflict: "A job with similar configuration already exists.",
        validation: "Job validation failed. Cannot clone this job.",
        server_error: "Server error occurred while cloning the job. Please try again later.",
        unavailable: "Job service is temporarily unavailable. Please try again later.",
        unreachable: "Unable to connect to the job service. Please check your connection and try again.",
        unexpected: "An unexpected error occurred while cloning the job.",
        empty: "No response received from the job service.",
        other_prefix: "Failed to clone job",
        ..FailureMessages::DEFAULT
    },
};

pub const BACKUP: JobOperation = JobOperation {
    name: "backup",
    upstream_path: "/backup_job",
    timeout: BACKUP_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid backup request. Please check the job UUID and try again.",
        forbidden: "You don't have permission to backup jobs.",
        not_found: "Job not found or backup service unavailable.",
        conflict: "Job backup is already in progress or completed.",
        validation: "Job cannot be backed up in its current state. Ensure all exports are completed first.",
        rate_limited: "Too many backup requests. Please wait before trying again.",
        server_error: "Server error occurred during backup. Please try again later.",
        unavailable: "Backup service is temporarily unavailable. Please try again later.",
        timeout: "Backup request timed out. The backup process may still be running in the background.",
        unreachable: "Unable to connect to backup service. Please check your connection and try again later.",
        unexpected: "An unexpected error occurred during backup operation.",
        empty: "Backup operation completed but no confirmation was returned.",
        other_prefix: "Job backup failed",
    },
};

pub const PENDING: JobOperation = JobOperation {
    name: "pending",
    upstream_path: "/pending",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid request parameters. Please check your filters and try again.",
        forbidden: "You don't have permission to view pending jobs.",
        not_found: "Pending jobs endpoint not found. Please contact support.",
        server_error: "Server error occurred while fetching jobs. Please try again later.",
        unexpected: "An unexpected error occurred while fetching pending jobs.",
        empty: "No data received from the server.",
        other_prefix: "Failed to fetch pending jobs",
        ..FailureMessages::DEFAULT
    },
};

pub const RUNNING: JobOperation = JobOperation {
    name: "running",
    upstream_path: "/running",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid request parameters. Please check your filters and try again.",
        forbidden: "You don't have permission to view running jobs.",
        not_found: "Running jobs endpoint not found. Please contact support.",
        server_error: "Server error occurred while fetching jobs. Please try again later.",
        unexpected: "An unexpected error occurred while fetching running jobs.",
        empty: "No data received from the server.",
        other_prefix: "Failed to fetch running jobs",
        ..FailureMessages::DEFAULT
    },
};

pub const TERMINATED: JobOperation = JobOperation {
    name: "terminated",
    upstream_path: "/terminated",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid request parameters. Please check your filters and try again.",
        forbidden: "You don't have permission to view terminated jobs.",
        not_found: "Terminated jobs endpoint not found. Please contact support.",
        server_error: "Server error occurred while fetching jobs. Please try again later.",
        unexpected: "An unexpected error occurred while fetching terminated jobs.",
        empty: "No data received from the server.",
        other_prefix: "Failed to fetch terminated jobs",
        ..FailureMessages::DEFAULT
    },
};

pub const CRAWL_DEF: JobOperation = JobOperation {
    name: "get_crawl_def",
    upstream_path: "/get_crawlDef",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        not_found: "Job not found. It may have been deleted.",
        unexpected: "Failed to fetch crawl definition",
        other_prefix: "Failed to fetch crawl definition",
        ..FailureMessages::DEFAULT
    },
};

pub const EDIT: JobOperation = JobOperation {
    name: "edit_job",
    upstream_path: "/edit_job",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        bad_request: "Invalid job data. Please check your input and try again.",
        forbidden: "You don't have permission to edit this job.",
        not_found: "Job not found. It may have been deleted.",
        unexpected: "Failed to edit job",
        other_prefix: "Failed to edit job",
        ..FailureMessages::DEFAULT
    },
};

pub const AUDIT: JobOperation = JobOperation {
    name: "audit",
    upstream_path: "/audit/read",
    timeout: DEFAULT_TIMEOUT,
    messages: FailureMessages {
        forbidden: "You don't have permission to view the audit log.",
        not_found: "Audit endpoint not found. Please contact support.",
        unexpected: "An unexpected error occurred while fetching audit entries.",
        other_prefix: "Failed to fetch audit entries",
        ..FailureMessages::DEFAULT
    },
};

impl JobOperation {
    /// Map an upstream failure to the local taxonomy.
    #[must_use]
    pub fn map_failure(&self, err: &UpstreamError) -> ApiError {
        let m = &self.messages;
        match err {
            UpstreamError::Status { status, status_text } => match *status {
                400 => ApiError::InvalidRequest(m.bad_request.into()),
                401 => ApiError::SessionExpired(SESSION_EXPIRED_MESSAGE.into()),
                403 => ApiError::Forbidden(m.forbidden.into()),
                404 => ApiError::NotFound(m.not_found.into()),
                409 => ApiError::Conflict(m.conflict.into()),
                422 => ApiError::ValidationFailed(m.validation.into()),
                429 => ApiError::RateLimited(m.rate_limited.into()),
                500 => ApiError::ServiceUnavailable { status: 500, message: m.server_error.into() },
                503 => ApiError::ServiceUnavailable { status: 503, message: m.unavailable.into() },
                other => ApiError::Upstream { status: other, message: format!("{}: {status_text}", m.other_prefix) },
            },
            UpstreamError::Timeout => ApiError::RequestTimeout(m.timeout.into()),
            UpstreamError::Connect(_) => ApiError::ServiceUnavailable { status: 503, message: m.unreachable.into() },
            UpstreamError::NotConfigured => ApiError::Configuration,
            UpstreamError::ClientBuild(_) | UpstreamError::Decode(_) | UpstreamError::Request(_) => {
                ApiError::Internal(m.unexpected.into())
            }
        }
    }
}

/// Forward a validated payload upstream and map any failure.
///
/// # Errors
///
/// Returns the operation-specific [`ApiError`] for upstream failures, or an
/// internal error when upstream replies with an empty body.
pub async fn forward(
    upstream: &UpstreamClient,
    op: &JobOperation,
    token: &str,
    payload: &Value,
) -> Result<Value, ApiError> {
    let result = upstream
        .post_json(op.upstream_path, Some(token), payload, op.timeout)
        .await;

    match result {
        Ok(Value::Null) => {
            error!(operation = op.name, "upstream returned empty response");
            Err(ApiError::Internal(op.messages.empty.into()))
        }
        Ok(value) => Ok(value),
        Err(e) => {
            let mapped = op.map_failure(&e);
            if mapped.is_unauthorized() {
                warn!(operation = op.name, "upstream rejected session token");
            } else {
                error!(operation = op.name, error = %e, status = mapped.status().as_u16(), "upstream job request failed");
            }
            Err(mapped)
        }
    }
}

// =============================================================================
// REQUEST VALIDATION
// =============================================================================

/// Canonical hyphenated UUID, any case.
#[must_use]
pub fn is_job_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

/// Parse a raw request body. An empty body is `Value::Null`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] if the body is not valid JSON.
pub fn parse_body(raw: &[u8]) -> Result<Value, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(raw).map_err(|_| ApiError::InvalidRequest(INVALID_BODY_MESSAGE.into()))
}

fn invalid(message: &str) -> ApiError {
    ApiError::InvalidRequest(message.to_owned())
}

fn invalid_uuid(value: &Value) -> ApiError {
    let shown = value.as_str().map_or_else(|| value.to_string(), str::to_owned);
    ApiError::InvalidRequest(format!("Invalid UUID format: {shown}"))
}

fn checked_uuid(value: &Value) -> Result<String, ApiError> {
    match value.as_str() {
        Some(s) if is_job_uuid(s) => Ok(s.to_owned()),
        _ => Err(invalid_uuid(value)),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// `uuids` must be a non-empty array of canonical UUID strings.
fn uuid_array(body: &Value, missing: &str, empty: &str) -> Result<Vec<String>, ApiError> {
    let items = body.get("uuids").and_then(Value::as_array).ok_or_else(|| invalid(missing))?;
    if items.is_empty() {
        return Err(invalid(empty));
    }
    items.iter().map(checked_uuid).collect()
}

/// `uuid` must be present and canonical.
fn single_uuid(body: &Value, missing: &str) -> Result<String, ApiError> {
    let value = body.get("uuid").filter(|v| is_truthy(Some(*v))).ok_or_else(|| invalid(missing))?;
    checked_uuid(value)
}

fn object_or_empty(body: Value) -> Result<Map<String, Value>, ApiError> {
    match body {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        _ => Err(invalid(INVALID_BODY_MESSAGE)),
    }
}

/// Overlay caller keys on top of defaults.
fn with_defaults(defaults: Value, overrides: Map<String, Value>) -> Map<String, Value> {
    let mut merged = match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(overrides);
    merged
}

/// Coerce numeric filter fields; numeric strings become integers, blanks are dropped.
fn coerce_numeric(payload: &mut Map<String, Value>, fields: &[&str]) -> Result<(), ApiError> {
    for field in fields {
        let Some(value) = payload.get(*field) else { continue };
        let coerced = match value {
            Value::Null => None,
            Value::Number(_) => continue,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => match s.trim().parse::<i64>() {
                Ok(n) => Some(Value::from(n)),
                Err(_) => return Err(ApiError::InvalidRequest(format!("Invalid numeric value for {field}: {s}"))),
            },
            other => return Err(ApiError::InvalidRequest(format!("Invalid numeric value for {field}: {other}"))),
        };
        match coerced {
            Some(v) => payload.insert((*field).to_owned(), v),
            None => payload.remove(*field),
        };
    }
    Ok(())
}

// =============================================================================
// PAYLOAD SHAPING
// =============================================================================

/// `create`: any JSON object, forwarded unchanged.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when the body is not an object.
pub fn create_payload(body: Value) -> Result<Value, ApiError> {
    if !body.is_object() {
        return Err(invalid("Request body is required and must be a valid object."));
    }
    Ok(body)
}

/// `edit_job`: any JSON object, forwarded unchanged.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when the body is not an object.
pub fn edit_payload(body: Value) -> Result<Value, ApiError> {
    if !body.is_object() {
        return Err(invalid("Request body is required and must be a valid object."));
    }
    Ok(body)
}

/// `run_job`: `uuids` as an array or a single UUID string; forwards `{uuids}`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when `uuids` is missing, empty, or malformed.
pub fn run_payload(body: &Value) -> Result<Value, ApiError> {
    const MISSING: &str = "UUID is required to run a job.";
    let uuids = match body.get("uuids") {
        Some(Value::String(_)) => vec![checked_uuid(&body["uuids"])?],
        Some(Value::Array(_)) => uuid_array(body, MISSING, MISSING)?,
        _ => return Err(invalid(MISSING)),
    };
    Ok(json!({ "uuids": uuids }))
}

/// `stop_job`: forwards `{uuids}` and returns the validated list.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] naming the first malformed UUID.
pub fn stop_payload(body: &Value) -> Result<(Value, Vec<String>), ApiError> {
    let uuids = uuid_array(
        body,
        "Invalid request body. Expected { uuids: string[] }",
        "At least one UUID is required to stop jobs.",
    )?;
    Ok((json!({ "uuids": uuids }), uuids))
}

/// `delete`: requires `state` and a non-empty `uuids` array; forwards the whole body.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when a required field is missing or malformed.
pub fn delete_payload(body: Value) -> Result<(Value, usize), ApiError> {
    const MISSING: &str = "State and UUIDs array are required for job deletion.";
    if !is_truthy(body.get("state")) {
        return Err(invalid(MISSING));
    }
    let uuids = uuid_array(&body, MISSING, "At least one job UUID must be provided for deletion.")?;
    Ok((body, uuids.len()))
}

/// `clone_job`: forwards `{uuid}`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when `uuid` is missing or malformed.
pub fn clone_payload(body: &Value) -> Result<(Value, String), ApiError> {
    let uuid = single_uuid(body, "UUID is required to clone a job.")?;
    Ok((json!({ "uuid": uuid }), uuid))
}

/// `backup`: forwards `{uuid}`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when `uuid` is missing or malformed.
pub fn backup_payload(body: &Value) -> Result<(Value, String), ApiError> {
    let uuid = single_uuid(body, "UUID is required for job backup.")?;
    Ok((json!({ "uuid": uuid }), uuid))
}

/// `get_crawl_def`: forwards `{uuid}`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when `uuid` is missing or malformed.
pub fn crawl_def_payload(body: &Value) -> Result<Value, ApiError> {
    let uuid = single_uuid(body, "UUID is required")?;
    Ok(json!({ "uuid": uuid }))
}

/// `pending`: default page sizes for both pending and scheduled lists.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when the body is not an object.
pub fn pending_payload(body: Value) -> Result<Value, ApiError> {
    let defaults = json!({
        "pending_limit": { "from": 0, "size": 5 },
        "scheduled_limit": { "from": 0, "size": 5 },
    });
    Ok(Value::Object(with_defaults(defaults, object_or_empty(body)?)))
}

/// `running`: forwarded as given.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when the body is not an object.
pub fn running_payload(body: Value) -> Result<Value, ApiError> {
    Ok(Value::Object(object_or_empty(body)?))
}

/// `terminated`: first page of ten unless the caller paginates.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] for a non-object body or non-numeric pagination.
pub fn terminated_payload(body: Value) -> Result<Value, ApiError> {
    let mut payload = with_defaults(json!({ "from": 0, "size": 10 }), object_or_empty(body)?);
    coerce_numeric(&mut payload, &["from", "size"])?;
    Ok(Value::Object(payload))
}

/// `audit`: first page of five; `sort_dir=desc` only when a filter is set.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] for a non-object body or non-numeric filters.
pub fn audit_payload(body: Value) -> Result<Value, ApiError> {
    let mut payload = with_defaults(json!({ "from": 0, "size": 5 }), object_or_empty(body)?);
    coerce_numeric(&mut payload, &["from", "size", "action", "sdate", "edate"])?;
    let has_filters = ["action", "sdate", "edate"]
        .iter()
        .any(|key| is_truthy(payload.get(*key)));
    if has_filters {
        payload.insert("sort_dir".into(), Value::from("desc"));
    }
    Ok(Value::Object(payload))
}

// =============================================================================
// RESPONSE SHAPING
// =============================================================================

/// Ensure a listing carries an array under `list_key` and a `count` object.
#[must_use]
pub fn normalize_listing(mut value: Value, op: &JobOperation, list_key: &str) -> Value {
    if let Some(map) = value.as_object_mut() {
        if !map.contains_key("success") {
            warn!(operation = op.name, "response missing success field");
        }
        if !map.get(list_key).is_some_and(Value::is_array) {
            warn!(operation = op.name, list_key, "response missing or invalid list; defaulting to empty");
            map.insert(list_key.to_owned(), Value::Array(Vec::new()));
        }
        if !is_truthy(map.get("count")) {
            warn!(operation = op.name, "response missing count information");
            map.insert("count".into(), json!({ "terminated": 0, "running": 0, "pending": 0 }));
        }
        let listed = map.get(list_key).and_then(Value::as_array).map_or(0, Vec::len);
        info!(operation = op.name, listed, "fetched job listing");
    } else {
        warn!(operation = op.name, "listing response is not an object; passing through");
    }
    value
}

/// Stop result: local summary with upstream keys merged over it.
#[must_use]
pub fn stop_response(uuids: &[String], upstream: Value) -> Value {
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    let mut response = Map::new();
    response.insert("success".into(), Value::Bool(true));
    response.insert("message".into(), Value::from(format!("Successfully stopped {} job(s)", uuids.len())));
    response.insert("stopped_jobs".into(), json!(uuids));
    response.insert("timestamp".into(), Value::from(timestamp));
    if let Value::Object(upstream) = upstream {
        response.extend(upstream);
    }
    Value::Object(response)
}

#[must_use]
pub fn backup_response(uuid: &str, upstream: Value) -> Value {
    json!({
        "success": true,
        "message": "Job backup completed successfully",
        "uuid": uuid,
        "result": upstream,
    })
}

#[cfg(test)]
#[path = "jobs_test.rs"]
mod tests;
