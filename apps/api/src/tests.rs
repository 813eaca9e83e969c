//! Router-level tests: real handlers and extractors over in-memory stores
//! and canned listings.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::accounts::store::MemoryAccountStore;
use crate::auth::{self, issue_token};
use crate::config::test_config;
use crate::jobs::client::{JobSource, JobsApiError, SearchParams};
use crate::jobs::JobCache;
use crate::models::job::{RawJob, RawSearchResponse, RawTopCompanies};
use crate::models::user::Account;
use crate::routes::build_router;
use crate::saved_jobs::store::MemorySavedJobStore;
use crate::state::AppState;

const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

struct CannedJobs {
    jobs: Vec<RawJob>,
    fail: bool,
}

#[async_trait]
impl JobSource for CannedJobs {
    async fn search(&self, params: &SearchParams) -> Result<RawSearchResponse, JobsApiError> {
        if self.fail {
            return Err(JobsApiError::Api {
                status: 503,
                message: "maintenance".into(),
            });
        }
        let results: Vec<RawJob> = self
            .jobs
            .iter()
            .take(params.results_per_page as usize)
            .cloned()
            .collect();
        Ok(RawSearchResponse {
            count: self.jobs.len() as u64,
            results,
        })
    }

    async fn top_companies(&self) -> Result<RawTopCompanies, JobsApiError> {
        Ok(RawTopCompanies::default())
    }
}

fn raw_job(id: usize, vacancies: u32) -> RawJob {
    RawJob {
        id: id.to_string(),
        title: Some(format!("Role {id}")),
        vacancy_count: Some(vacancies),
        ..Default::default()
    }
}

struct TestApp {
    router: Router,
    alice: Uuid,
    bob: Uuid,
    carol: Uuid,
}

fn test_app(jobs: CannedJobs) -> TestApp {
    let accounts = MemoryAccountStore::new();
    let account = |name: &str, email: &str, is_verified: bool| Account {
        id: Uuid::new_v4(),
        name: name.into(),
        email: email.into(),
        is_verified,
        created_at: Utc::now(),
    };
    let alice = account("Alice", ALICE, true);
    let bob = account("Bob", BOB, true);
    let carol = account("Carol", "carol@example.com", false);
    let ids = (alice.id, bob.id, carol.id);
    accounts.insert(alice);
    accounts.insert(bob);
    accounts.insert(carol);

    let state = AppState {
        config: test_config(),
        jobs: Arc::new(jobs),
        cache: JobCache::disabled(),
        accounts: Arc::new(accounts),
        saved_jobs: Arc::new(MemorySavedJobStore::new()),
    };
    TestApp {
        router: build_router(state),
        alice: ids.0,
        bob: ids.1,
        carol: ids.2,
    }
}

fn default_app() -> TestApp {
    test_app(CannedJobs {
        jobs: (0..50).map(|i| raw_job(i, (i % 5) as u32)).collect(),
        fail: false,
    })
}

fn token(id: Uuid) -> String {
    issue_token(&test_config().jwt_secret, id, 3600)
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &TestApp, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

async fn post(app: &TestApp, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, token, Some(body)).await
}

async fn delete(app: &TestApp, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, token, Some(body)).await
}

const SAVE: &str = "/api/savedjobs/save";
const UNSAVE: &str = "/api/savedjobs/unsave";
const ALICE_SAVED: &str = "/api/savedjobs/saved/alice@example.com";
const ALICE_PROFILE: &str = "/api/users/profile/alice@example.com";

fn save_body(email: &str, id: &str) -> Value {
    json!({ "email": email, "jobData": { "id": id, "title": "Rust Engineer" } })
}

// ────────────────────────────────────────────────────────────────────────────
// Saved jobs
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_duplicate_save_is_conflict_and_stored_once() {
    let app = default_app();
    let t = token(app.alice);

    let (status, body) = post(&app, SAVE, Some(&t), save_body(ALICE, "42")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["jobData"]["jobTitle"], "Rust Engineer");

    let (status, body) = post(&app, SAVE, Some(&t), save_body(ALICE, "42")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Job already saved");

    let (status, body) = get(&app, ALICE_SAVED, Some(&t)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_saved_list_newest_first() {
    let app = default_app();
    let t = token(app.alice);
    for id in ["a", "b", "c"] {
        post(&app, SAVE, Some(&t), save_body(ALICE, id)).await;
    }

    let (_, body) = get(&app, ALICE_SAVED, Some(&t)).await;
    let ids: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["jobData"]["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["c", "b", "a"]);
    assert_eq!(body["message"], "Saved jobs retrieved successfully");
}

#[tokio::test]
async fn test_empty_saved_list_message() {
    let app = default_app();
    let uri = "/api/savedjobs/saved/bob@example.com";
    let (status, body) = get(&app, uri, Some(&token(app.bob))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], "No saved jobs found");
}

#[tokio::test]
async fn test_unsave_missing_job_is_not_found() {
    let app = default_app();
    let t = token(app.alice);
    let (status, body) = delete(
        &app,
        UNSAVE,
        Some(&t),
        json!({ "email": ALICE, "jobId": "nope" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Job not found in saved list");
}

#[tokio::test]
async fn test_unsave_removes_saved_job() {
    let app = default_app();
    let t = token(app.alice);
    post(&app, SAVE, Some(&t), save_body(ALICE, "7")).await;

    let numeric_id = json!({ "email": ALICE, "jobId": 7 });
    let (status, body) = delete(&app, UNSAVE, Some(&t), numeric_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Job removed successfully");

    let (_, body) = get(&app, ALICE_SAVED, Some(&t)).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_mismatched_account_is_forbidden_even_when_job_absent() {
    let app = default_app();
    let bob = token(app.bob);

    let (status, body) = delete(
        &app,
        UNSAVE,
        Some(&bob),
        json!({ "email": ALICE, "jobId": "does-not-exist" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"]["message"],
        "Not authorized to modify these saved jobs"
    );

    let (status, _) = get(&app, ALICE_SAVED, Some(&bob)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post(&app, SAVE, Some(&bob), save_body(ALICE, "1")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_save_validation_messages() {
    let app = default_app();
    let t = token(app.alice);

    let (status, body) = post(&app, SAVE, Some(&t), json!({ "email": ALICE })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Email and job data are required");

    let no_id = json!({ "email": ALICE, "jobData": { "title": "No id" } });
    let (status, body) = post(&app, SAVE, Some(&t), no_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Job ID is required");

    let (status, body) = delete(&app, UNSAVE, Some(&t), json!({ "email": ALICE })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Email and job ID are required");
}

// ────────────────────────────────────────────────────────────────────────────
// Auth
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_auth_rejections() {
    let app = default_app();

    let (status, body) = get(&app, ALICE_SAVED, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], auth::NO_TOKEN);

    let expired = issue_token(&test_config().jwt_secret, app.alice, -3600);
    let (_, body) = get(&app, ALICE_SAVED, Some(&expired)).await;
    assert_eq!(body["error"]["message"], auth::EXPIRED);

    let (_, body) = get(&app, ALICE_SAVED, Some("not-a-jwt")).await;
    assert_eq!(body["error"]["message"], auth::INVALID);

    let (_, body) = get(&app, ALICE_SAVED, Some(&token(Uuid::new_v4()))).await;
    assert_eq!(body["error"]["message"], auth::UNKNOWN_ACCOUNT);

    let (status, body) = get(&app, ALICE_SAVED, Some(&token(app.carol))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], auth::UNVERIFIED);
}

#[tokio::test]
async fn test_profile_requires_matching_account() {
    let app = default_app();
    let (status, body) = get(&app, ALICE_PROFILE, Some(&token(app.alice))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["isVerified"], true);

    let (status, _) = get(&app, ALICE_PROFILE, Some(&token(app.bob))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ────────────────────────────────────────────────────────────────────────────
// Job feeds
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let app = default_app();
    let (status, body) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_search_normalises_and_caps_page_size() {
    let app = default_app();
    let uri = "/api/jobs/search?pageSize=500&fullTimeOnly=0";
    let (status, body) = get(&app, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Jobs fetched successfully");
    let results = body["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 50);
    assert_eq!(results[0]["company"], "Company Not Available");
    assert_eq!(results[0]["applyUrl"], "#");
}

#[tokio::test]
async fn test_search_rejects_bad_flag() {
    let app = default_app();
    let (status, body) = get(&app, "/api/jobs/search?fullTimeOnly=maybe", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_trending_returns_all_max_vacancy_ties() {
    let app = default_app();
    let (status, body) = get(&app, "/api/jobs/trending", None).await;
    assert_eq!(status, StatusCode::OK);
    let jobs = body["data"].as_array().unwrap();
    assert_eq!(jobs.len(), 10);
    assert!(jobs.iter().all(|j| j["vacancyCount"] == 4));
}

#[tokio::test]
async fn test_random_count_default_and_cap() {
    let app = default_app();
    let (_, body) = get(&app, "/api/jobs/random", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 6);

    let (_, body) = get(&app, "/api/jobs/random?count=100", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 20);

    let (_, body) = get(&app, "/api/jobs/random?count=abc", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_empty_pool_messages() {
    let app = test_app(CannedJobs {
        jobs: Vec::new(),
        fail: false,
    });
    let (_, body) = get(&app, "/api/jobs/trending", None).await;
    assert_eq!(body["message"], "No jobs found in the data");
    let (_, body) = get(&app, "/api/jobs/random", None).await;
    assert_eq!(body["message"], "No jobs available at the moment");
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway_without_details() {
    let app = test_app(CannedJobs {
        jobs: Vec::new(),
        fail: true,
    });
    let (status, body) = get(&app, "/api/jobs/search", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["message"], "Please try again later");
    assert!(body["error"].get("details").is_none());
}
