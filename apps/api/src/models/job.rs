//! Job listings as the upstream API returns them, and the normalised
//! `JobRecord` this service hands out.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const TITLE_FALLBACK: &str = "Job Title Not Available";
pub const COMPANY_FALLBACK: &str = "Company Not Available";
pub const LOCATION_FALLBACK: &str = "Location Not Available";
pub const SALARY_FALLBACK: &str = "Salary Not Disclosed";
pub const DESCRIPTION_FALLBACK: &str = "No description available";
pub const APPLY_URL_FALLBACK: &str = "#";

// ────────────────────────────────────────────────────────────────────────────
// Upstream shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<RawJob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJob {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    pub title: Option<String>,
    pub company: Option<DisplayName>,
    pub location: Option<DisplayName>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub description: Option<String>,
    pub redirect_url: Option<String>,
    pub vacancy_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayName {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTopCompanies {
    #[serde(default)]
    pub leaderboard: Vec<RawCompany>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompany {
    pub canonical_name: Option<String>,
    #[serde(default)]
    pub count: u64,
    pub average_salary: Option<f64>,
    pub description: Option<String>,
}

/// Upstream ids arrive as strings or numbers depending on the endpoint.
fn id_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Normalised records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_range: String,
    pub description: String,
    pub vacancy_count: u32,
    pub apply_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchResult {
    pub total_count: u64,
    pub results: Vec<JobRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub job_count: u64,
    pub average_salary: Option<u64>,
    pub description: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<RawJob> for JobRecord {
    fn from(raw: RawJob) -> Self {
        JobRecord {
            id: raw.id,
            title: non_blank(raw.title).unwrap_or_else(|| TITLE_FALLBACK.to_string()),
            company: non_blank(raw.company.and_then(|c| c.display_name))
                .unwrap_or_else(|| COMPANY_FALLBACK.to_string()),
            location: non_blank(raw.location.and_then(|l| l.display_name))
                .unwrap_or_else(|| LOCATION_FALLBACK.to_string()),
            salary_range: salary_range(raw.salary_min, raw.salary_max),
            description: non_blank(raw.description)
                .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string()),
            vacancy_count: raw.vacancy_count.unwrap_or(0),
            apply_url: non_blank(raw.redirect_url)
                .unwrap_or_else(|| APPLY_URL_FALLBACK.to_string()),
        }
    }
}

impl From<RawCompany> for Company {
    fn from(raw: RawCompany) -> Self {
        let name = non_blank(raw.canonical_name).unwrap_or_else(|| "Unknown Company".to_string());
        let description = non_blank(raw.description).unwrap_or_else(|| {
            format!(
                "Leading company in the {} sector with innovative solutions and growth opportunities.",
                name.to_lowercase()
            )
        });
        Company {
            job_count: raw.count,
            average_salary: raw.average_salary.filter(|s| *s > 0.0).map(|s| s.floor() as u64),
            description,
            name,
        }
    }
}

/// `45000.0, 60000.0` → `"45,000 - 60,000"`. Either bound alone is shown
/// on its own.
pub fn salary_range(min: Option<f64>, max: Option<f64>) -> String {
    let min = min.filter(|v| *v > 0.0);
    let max = max.filter(|v| *v > 0.0);
    match (min, max) {
        (Some(lo), Some(hi)) if lo.floor() == hi.floor() => group_thousands(lo),
        (Some(lo), Some(hi)) => format!("{} - {}", group_thousands(lo), group_thousands(hi)),
        (Some(v), None) | (None, Some(v)) => group_thousands(v),
        (None, None) => SALARY_FALLBACK.to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    let digits = (value.floor() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
