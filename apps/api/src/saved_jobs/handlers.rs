use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::models::saved_job::{SavedJob, SavedJobData};
use crate::routes::{ApiResponse, Envelope};
use crate::state::AppState;

const FORBIDDEN_READ: &str = "Not authorized to access these saved jobs";
const FORBIDDEN_WRITE: &str = "Not authorized to modify these saved jobs";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub email: Option<String>,
    pub job_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsaveRequest {
    pub email: Option<String>,
    pub job_id: Option<Value>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn job_id(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => non_blank(Some(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::Validation(e.body_text()))
}

/// POST /api/savedjobs/save
pub async fn handle_save(
    State(state): State<AppState>,
    authed: AuthedUser,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<SavedJob>>), AppError> {
    let req = body(payload)?;
    let (Some(email), Some(job_data)) = (non_blank(req.email), req.job_data) else {
        return Err(AppError::Validation(
            "Email and job data are required".to_string(),
        ));
    };
    let job = SavedJobData::from_payload(&job_data)
        .ok_or_else(|| AppError::Validation("Job ID is required".to_string()))?;

    authed.ensure_owner(&email, FORBIDDEN_WRITE)?;
    info!(user_id = %authed.account.id, job_id = %job.id, "save job request");

    let saved = state.saved_jobs.save(&email, job).await.map_err(|e| {
        warn!(user_id = %authed.account.id, error = %e, "job not saved");
        e
    })?;

    info!(user_id = %authed.account.id, job_id = %saved.job_data.id, "job saved");
    Ok((
        StatusCode::CREATED,
        Envelope::ok(saved, "Job saved successfully"),
    ))
}

/// GET /api/savedjobs/saved/:email
pub async fn handle_list(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(email): Path<String>,
) -> ApiResponse<Vec<SavedJob>> {
    authed.ensure_owner(&email, FORBIDDEN_READ)?;

    let saved = state.saved_jobs.list(&email).await?;
    info!(user_id = %authed.account.id, count = saved.len(), "saved jobs retrieved");

    let message = if saved.is_empty() {
        "No saved jobs found"
    } else {
        "Saved jobs retrieved successfully"
    };
    Ok(Envelope::ok(saved, message))
}

/// DELETE /api/savedjobs/unsave
pub async fn handle_unsave(
    State(state): State<AppState>,
    authed: AuthedUser,
    payload: Result<Json<UnsaveRequest>, JsonRejection>,
) -> ApiResponse<()> {
    let req = body(payload)?;
    let (Some(email), Some(job_id)) = (non_blank(req.email), job_id(req.job_id)) else {
        return Err(AppError::Validation(
            "Email and job ID are required".to_string(),
        ));
    };

    authed.ensure_owner(&email, FORBIDDEN_WRITE)?;

    state.saved_jobs.remove(&email, &job_id).await.map_err(|e| {
        warn!(user_id = %authed.account.id, %job_id, error = %e, "job not unsaved");
        e
    })?;

    info!(user_id = %authed.account.id, %job_id, "job unsaved");
    Ok(Envelope::ok((), "Job removed successfully"))
}
