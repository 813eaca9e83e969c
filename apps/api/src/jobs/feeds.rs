//! Job feed selection: pure functions over normalised listings.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::job::{Company, JobRecord, JobSearchResult, RawSearchResponse, RawTopCompanies};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 50;
pub const DEFAULT_RANDOM_COUNT: usize = 6;
pub const MAX_RANDOM_COUNT: usize = 20;
pub const TOP_COMPANIES_LIMIT: usize = 9;

pub fn normalize(raw: RawSearchResponse) -> JobSearchResult {
    JobSearchResult {
        total_count: raw.count,
        results: raw.results.into_iter().map(JobRecord::from).collect(),
    }
}

/// Every job sharing the highest vacancy count, in listing order.
pub fn trending(jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    let Some(max) = jobs.iter().map(|j| j.vacancy_count).max() else {
        return Vec::new();
    };
    jobs.into_iter().filter(|j| j.vacancy_count == max).collect()
}

/// Requested random-pick size: a missing or zero count means the default,
/// anything above the cap is clamped.
pub fn random_count(requested: Option<usize>) -> usize {
    match requested {
        None | Some(0) => DEFAULT_RANDOM_COUNT,
        Some(n) => n.min(MAX_RANDOM_COUNT),
    }
}

pub fn pick_random<R: Rng + ?Sized>(
    mut jobs: Vec<JobRecord>,
    requested: Option<usize>,
    rng: &mut R,
) -> Vec<JobRecord> {
    jobs.shuffle(rng);
    jobs.truncate(random_count(requested));
    jobs
}

pub fn top_companies(raw: RawTopCompanies) -> Vec<Company> {
    raw.leaderboard
        .into_iter()
        .take(TOP_COMPANIES_LIMIT)
        .map(Company::from)
        .collect()
}
