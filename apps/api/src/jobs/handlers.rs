use axum::extract::{rejection::QueryRejection, Query, State};
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::client::{JobsApiError, SearchParams};
use crate::jobs::feeds;
use crate::models::job::{Company, JobRecord, JobSearchResult};
use crate::routes::{ApiResponse, Envelope};
use crate::state::AppState;

const DEFAULT_KEYWORD: &str = "javascript developer";
const DEFAULT_LOCATION: &str = "london";
const DEFAULT_SORT: &str = "salary";

/// Accepts `1`/`0` as well as `true`/`false`.
fn flag<'de, D: Deserializer<'de>>(de: D) -> Result<Option<bool>, D::Error> {
    let raw = Option::<String>::deserialize(de)?;
    match raw.as_deref().map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(None),
        Some("1") | Some("true") => Ok(Some(true)),
        Some("0") | Some("false") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected true/false or 1/0, got '{other}'"
        ))),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<u64>,
    #[serde(default, deserialize_with = "flag")]
    pub full_time_only: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub permanent_only: Option<bool>,
    pub sort_key: Option<String>,
    pub page_size: Option<u32>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl SearchQuery {
    pub fn into_params(self) -> SearchParams {
        SearchParams {
            what: Some(or_default(self.keyword, DEFAULT_KEYWORD)),
            location: Some(or_default(self.location, DEFAULT_LOCATION)),
            salary_min: Some(self.min_salary.unwrap_or(0)),
            full_time: Some(self.full_time_only.unwrap_or(true)),
            permanent: Some(self.permanent_only.unwrap_or(true)),
            sort_by: Some(or_default(self.sort_key, DEFAULT_SORT)),
            results_per_page: match self.page_size {
                None | Some(0) => feeds::DEFAULT_PAGE_SIZE,
                Some(n) => n.min(feeds::MAX_PAGE_SIZE),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    pub count: Option<String>,
}

fn upstream(state: &AppState, e: JobsApiError) -> AppError {
    AppError::from(e).redacted(state.config.is_development())
}

/// Normalised search results, served from the cache when fresh.
async fn search_cached(
    state: &AppState,
    params: &SearchParams,
) -> Result<JobSearchResult, AppError> {
    let key = params.cache_key();
    if let Some(hit) = state.cache.get::<JobSearchResult>(&key).await {
        return Ok(hit);
    }
    let raw = state
        .jobs
        .search(params)
        .await
        .map_err(|e| upstream(state, e))?;
    let result = feeds::normalize(raw);
    state.cache.put(&key, &result).await;
    Ok(result)
}

/// GET /api/jobs/search
pub async fn handle_search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResponse<JobSearchResult> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let params = query.into_params();
    info!(
        keyword = params.what.as_deref().unwrap_or_default(),
        location = params.location.as_deref().unwrap_or_default(),
        page_size = params.results_per_page,
        "job search request"
    );

    let result = search_cached(&state, &params).await?;
    info!(
        result_count = result.results.len(),
        total_count = result.total_count,
        "job search successful"
    );
    Ok(Envelope::ok(result, "Jobs fetched successfully"))
}

/// GET /api/jobs/trending
pub async fn handle_trending(State(state): State<AppState>) -> ApiResponse<Vec<JobRecord>> {
    let pool = search_cached(&state, &SearchParams::trending_pool()).await?;
    if pool.results.is_empty() {
        warn!("no jobs found for trending feed");
        return Ok(Envelope::ok(Vec::new(), "No jobs found in the data"));
    }

    let jobs = feeds::trending(pool.results);
    info!(
        max_vacancy_count = jobs.first().map(|j| j.vacancy_count).unwrap_or(0),
        trending_count = jobs.len(),
        "trending jobs fetched"
    );
    Ok(Envelope::ok(jobs, "Trending jobs fetched successfully"))
}

/// GET /api/jobs/random?count=
pub async fn handle_random(
    State(state): State<AppState>,
    Query(query): Query<RandomQuery>,
) -> ApiResponse<Vec<JobRecord>> {
    let requested = query.count.and_then(|c| c.trim().parse::<usize>().ok());
    let pool = search_cached(&state, &SearchParams::random_pool()).await?;
    if pool.results.is_empty() {
        warn!("no jobs available for random selection");
        return Ok(Envelope::ok(Vec::new(), "No jobs available at the moment"));
    }

    let jobs = feeds::pick_random(pool.results, requested, &mut rand::rng());
    info!(
        requested_count = feeds::random_count(requested),
        returned_count = jobs.len(),
        "random jobs fetched"
    );
    Ok(Envelope::ok(jobs, "Random jobs fetched successfully"))
}

/// GET /api/jobs/top-companies
pub async fn handle_top_companies(State(state): State<AppState>) -> ApiResponse<Vec<Company>> {
    const KEY: &str = "jobs:top-companies";

    let companies = match state.cache.get::<Vec<Company>>(KEY).await {
        Some(hit) => hit,
        None => {
            let raw = state
                .jobs
                .top_companies()
                .await
                .map_err(|e| upstream(&state, e))?;
            let companies = feeds::top_companies(raw);
            state.cache.put(KEY, &companies).await;
            companies
        }
    };

    if companies.is_empty() {
        warn!("listings API returned no top companies");
        return Ok(Envelope::ok(companies, "No company data available"));
    }
    info!(count = companies.len(), "top companies fetched");
    Ok(Envelope::ok(companies, "Top companies fetched successfully"))
}
