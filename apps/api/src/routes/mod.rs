pub mod health;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use crate::accounts;
use crate::errors::AppError;
use crate::jobs;
use crate::saved_jobs;
use crate::state::AppState;

/// Success body shared by every job, saved-job and account endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Envelope {
            success: true,
            data,
            message: message.into(),
        })
    }
}

pub type ApiResponse<T> = Result<Json<Envelope<T>>, AppError>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job listings (public)
        .route("/api/jobs/search", get(jobs::handlers::handle_search))
        .route("/api/jobs/trending", get(jobs::handlers::handle_trending))
        .route("/api/jobs/random", get(jobs::handlers::handle_random))
        .route(
            "/api/jobs/top-companies",
            get(jobs::handlers::handle_top_companies),
        )
        // Saved jobs (authenticated)
        .route(
            "/api/savedjobs/save",
            post(saved_jobs::handlers::handle_save),
        )
        .route(
            "/api/savedjobs/saved/:email",
            get(saved_jobs::handlers::handle_list),
        )
        .route(
            "/api/savedjobs/unsave",
            delete(saved_jobs::handlers::handle_unsave),
        )
        // Accounts (authenticated)
        .route(
            "/api/users/profile/:email",
            get(accounts::handlers::handle_profile),
        )
        .with_state(state)
}
