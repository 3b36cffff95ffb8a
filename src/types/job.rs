use serde::{Deserialize, Serialize};

/// One job posting as served by the Jobs API. Backend-owned; the client only
/// ever reads snapshots and never mutates or deletes a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub job_title: String,
    /// JSON-encoded array of skill strings, as stored by the backend.
    #[serde(default)]
    pub skills_extracted: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Pre-formatted by the backend, not a number.
    #[serde(default)]
    pub salary_estimate: Option<String>,
}

impl JobRecord {
    /// Decode the extracted skill list. Anything that fails to parse counts
    /// as an empty skill set so one bad record never aborts the listing.
    pub fn skills(&self) -> Vec<String> {
        serde_json::from_str(&self.skills_extracted).unwrap_or_default()
    }

    /// Two-letter company monogram shown on the job card.
    pub fn company_initials(&self) -> String {
        match self.company_name.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                name.trim().chars().take(2).collect::<String>().to_uppercase()
            }
            _ => "CO".to_string(),
        }
    }
}
