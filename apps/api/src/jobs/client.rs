//! Job listings client: the only module that talks to the upstream
//! listings API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::job::{RawSearchResponse, RawTopCompanies};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum JobsApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Listings API unavailable after {retries} attempts")]
    Unavailable { retries: u32 },
}

impl From<JobsApiError> for AppError {
    fn from(e: JobsApiError) -> Self {
        AppError::Upstream {
            message: "Failed to fetch jobs from external API".to_string(),
            detail: Some(e.to_string()),
        }
    }
}

/// Query parameters for one search page. `None` fields are left to the
/// upstream defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub what: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<u64>,
    pub full_time: Option<bool>,
    pub permanent: Option<bool>,
    pub sort_by: Option<String>,
    pub results_per_page: u32,
}

impl SearchParams {
    /// The pool trending jobs are picked from.
    pub fn trending_pool() -> Self {
        SearchParams {
            what: None,
            location: None,
            salary_min: None,
            full_time: Some(true),
            permanent: None,
            sort_by: Some("salary".into()),
            results_per_page: 50,
        }
    }

    /// The pool random jobs are drawn from.
    pub fn random_pool() -> Self {
        SearchParams {
            what: None,
            location: None,
            salary_min: None,
            full_time: None,
            permanent: None,
            sort_by: Some("date".into()),
            results_per_page: 50,
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let flag = |b: bool| (if b { "1" } else { "0" }).to_string();
        let mut q = Vec::with_capacity(7);
        if let Some(what) = &self.what {
            q.push(("what", what.clone()));
        }
        if let Some(location) = &self.location {
            q.push(("where", location.clone()));
        }
        if let Some(min) = self.salary_min {
            q.push(("salary_min", min.to_string()));
        }
        if let Some(full_time) = self.full_time {
            q.push(("full_time", flag(full_time)));
        }
        if let Some(permanent) = self.permanent {
            q.push(("permanent", flag(permanent)));
        }
        if let Some(sort_by) = &self.sort_by {
            q.push(("sort_by", sort_by.clone()));
        }
        q.push(("results_per_page", self.results_per_page.to_string()));
        q
    }

    /// Stable key for caching this exact query.
    pub fn cache_key(&self) -> String {
        let parts: Vec<String> = self
            .query()
            .into_iter()
            .map(|(k, v)| format!("{k}={}", v.to_lowercase()))
            .collect();
        format!("jobs:search:{}", parts.join("&"))
    }
}

/// Anything that can answer listing queries. Lets tests swap the network
/// client for canned data.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<RawSearchResponse, JobsApiError>;

    async fn top_companies(&self) -> Result<RawTopCompanies, JobsApiError>;
}

#[derive(Clone)]
pub struct JobsClient {
    client: Client,
    base_url: String,
    country: String,
    app_id: String,
    app_key: String,
}

impl JobsClient {
    pub fn new(config: &Config) -> Result<Self, JobsApiError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: config.jobs_api_base.clone(),
            country: config.jobs_country.clone(),
            app_id: config.jobs_app_id.clone(),
            app_key: config.jobs_app_key.clone(),
        })
    }

    /// GETs `url` and decodes the JSON body. Retries on 429, 5xx and
    /// transport errors with exponential backoff.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, JobsApiError> {
        let mut last_error: Option<JobsApiError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Listings call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .get(url)
                .query(&[("app_id", &self.app_id), ("app_key", &self.app_key)])
                .query(query)
                .header("accept", "application/json")
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(JobsApiError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Listings API returned {}: {}", status, body);
                last_error = Some(JobsApiError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(JobsApiError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let decoded: T = response.json().await?;
            debug!(url, attempt, "listings call succeeded");
            return Ok(decoded);
        }

        Err(last_error.unwrap_or(JobsApiError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl JobSource for JobsClient {
    async fn search(&self, params: &SearchParams) -> Result<RawSearchResponse, JobsApiError> {
        let url = format!("{}/{}/search/1", self.base_url, self.country);
        let response: RawSearchResponse = self.get_json(&url, &params.query()).await?;
        debug!(
            results = response.results.len(),
            total = response.count,
            "job search returned"
        );
        Ok(response)
    }

    async fn top_companies(&self) -> Result<RawTopCompanies, JobsApiError> {
        let url = format!("{}/{}/top_companies", self.base_url, self.country);
        self.get_json(&url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_queries() {
        let trending = SearchParams::trending_pool().query();
        assert!(trending.contains(&("results_per_page", "50".to_string())));
        assert!(trending.contains(&("sort_by", "salary".to_string())));
        assert!(trending.contains(&("full_time", "1".to_string())));
        assert!(!trending.iter().any(|(k, _)| *k == "what"));

        let random = SearchParams::random_pool().query();
        assert!(random.contains(&("sort_by", "date".to_string())));
        assert!(!random.iter().any(|(k, _)| *k == "full_time"));
    }

    #[test]
    fn test_cache_key_is_case_insensitive() {
        let mut a = SearchParams::random_pool();
        a.what = Some("Rust Developer".into());
        let mut b = a.clone();
        b.what = Some("rust developer".into());
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), SearchParams::trending_pool().cache_key());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_maps_to_upstream_error() {
        let mut config = crate::config::test_config();
        config.jobs_api_base = "http://127.0.0.1:9".into();
        let client = JobsClient::new(&config).unwrap();
        let err = client
            .search(&SearchParams::random_pool())
            .await
            .unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Upstream { .. }));
    }
}
