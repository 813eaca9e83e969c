use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::job::{
    APPLY_URL_FALLBACK, COMPANY_FALLBACK, DESCRIPTION_FALLBACK, LOCATION_FALLBACK,
    SALARY_FALLBACK, TITLE_FALLBACK,
};

/// The job snapshot stored with a bookmark. Field names match what the web
/// client already reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJobData {
    pub id: String,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJob {
    pub id: Uuid,
    pub email: String,
    pub job_data: SavedJobData,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct SavedJobRow {
    pub id: Uuid,
    pub email: String,
    pub job_data: Json<SavedJobData>,
    pub created_at: DateTime<Utc>,
}

impl From<SavedJobRow> for SavedJob {
    fn from(row: SavedJobRow) -> Self {
        SavedJob {
            id: row.id,
            email: row.email,
            job_data: row.job_data.0,
            created_at: row.created_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sanitising client payloads
// ────────────────────────────────────────────────────────────────────────────

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A string field, or the `display_name` of a nested upstream object.
fn named(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Object(map) => text(map.get("display_name")),
        other => text(Some(other)),
    }
}

impl SavedJobData {
    /// Builds the stored snapshot from whatever job shape the client sent:
    /// a `JobRecord`, a raw upstream result, or a previously saved snapshot.
    /// Returns `None` when the payload carries no job id.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let id = text(payload.get("id"))?;
        let field = |keys: &[&str]| keys.iter().find_map(|k| named(payload.get(*k)));

        Some(SavedJobData {
            id,
            job_title: field(&["jobTitle", "title"])
                .unwrap_or_else(|| TITLE_FALLBACK.to_string()),
            company_name: field(&["companyName", "company"])
                .unwrap_or_else(|| COMPANY_FALLBACK.to_string()),
            location: field(&["location"]).unwrap_or_else(|| LOCATION_FALLBACK.to_string()),
            salary: field(&["salary", "salaryRange"])
                .unwrap_or_else(|| SALARY_FALLBACK.to_string()),
            description: field(&["description"])
                .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string()),
            redirect_url: field(&["redirect_url", "applyUrl"])
                .unwrap_or_else(|| APPLY_URL_FALLBACK.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_from_job_record() {
        let data = SavedJobData::from_payload(&json!({
            "id": "j-1",
            "title": "Backend Developer",
            "company": "Initech",
            "location": "Leeds",
            "salaryRange": "40,000 - 50,000",
            "applyUrl": "https://jobs.example/j-1"
        }))
        .unwrap();
        assert_eq!(data.job_title, "Backend Developer");
        assert_eq!(data.company_name, "Initech");
        assert_eq!(data.salary, "40,000 - 50,000");
        assert_eq!(data.redirect_url, "https://jobs.example/j-1");
        assert_eq!(data.description, DESCRIPTION_FALLBACK);
    }

    #[test]
    fn test_payload_from_upstream_result() {
        let data = SavedJobData::from_payload(&json!({
            "id": 99,
            "title": "Data Analyst",
            "company": {"display_name": "Globex"},
            "location": {"display_name": "Bristol"}
        }))
        .unwrap();
        assert_eq!(data.id, "99");
        assert_eq!(data.company_name, "Globex");
        assert_eq!(data.location, "Bristol");
        assert_eq!(data.salary, SALARY_FALLBACK);
    }

    #[test]
    fn test_payload_without_id_is_rejected() {
        assert!(SavedJobData::from_payload(&json!({"title": "No id"})).is_none());
        assert!(SavedJobData::from_payload(&json!({"id": ""})).is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let data = SavedJobData::from_payload(&json!({"id": "x"})).unwrap();
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("jobTitle").is_some());
        assert!(value.get("companyName").is_some());
        assert!(value.get("redirect_url").is_some());
    }
}
