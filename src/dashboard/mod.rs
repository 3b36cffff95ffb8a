// src/dashboard/mod.rs
//! Dashboard state: three independent request/response flows (job listing,
//! salary prediction, dataset upload) sharing nothing but the search term.
//!
//! Listing responses are sequenced by a generation counter so a stale
//! response can never overwrite a newer request's result: issuing a fetch
//! and applying its outcome are separate steps, and the apply step discards
//! any outcome older than the last one applied.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::core::api_client::JobsApi;
use crate::core::skills;
use crate::types::job::JobRecord;
use crate::types::response::SalaryPredictionRequest;

pub mod render;

/// Notification shown when a prediction request fails. The previously shown
/// estimate is left untouched.
pub const PREDICT_FAILED_MESSAGE: &str = "Salary prediction failed. Please try again.";

/// Notification shown when an upload does not resolve to a backend message.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please re-select the file and try again.";

pub const DEFAULT_RATING: f64 = 3.5;
pub const DEFAULT_SKILLS_INPUT: &str = "python, sql, machine learning";

/// Per-flow lifecycle: Idle until first triggered, Pending while a request
/// is outstanding, then Success or Failed until the next trigger re-arms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Pending,
    Success,
    Failed,
}

impl FlowState {
    pub fn is_pending(&self) -> bool {
        matches!(self, FlowState::Pending)
    }
}

/// Sequencing token for one listing fetch.
#[derive(Debug, Clone)]
pub struct ListingTicket {
    generation: u64,
    skill_filter: String,
}

impl ListingTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn skill_filter(&self) -> &str {
        &self.skill_filter
    }
}

/// What one listing fetch resolved to. Failures are swallowed into an empty
/// collection; the flow only records that the fetch failed.
#[derive(Debug, Default)]
pub struct ListingOutcome {
    pub jobs: Vec<JobRecord>,
    pub failed: bool,
}

pub struct Dashboard<A: JobsApi> {
    api: Arc<A>,
    search: String,
    jobs: Vec<JobRecord>,
    listing: FlowState,
    listing_issued: u64,
    listing_applied: u64,
    last_refreshed: Option<DateTime<Local>>,
    rating: f64,
    skills_input: String,
    predicted_salary_k: Option<f64>,
    predict: FlowState,
    upload: FlowState,
}

impl<A: JobsApi> Dashboard<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            search: String::new(),
            jobs: Vec::new(),
            listing: FlowState::Idle,
            listing_issued: 0,
            listing_applied: 0,
            last_refreshed: None,
            rating: DEFAULT_RATING,
            skills_input: DEFAULT_SKILLS_INPUT.to_string(),
            predicted_salary_k: None,
            predict: FlowState::Idle,
            upload: FlowState::Idle,
        }
    }

    // ===== Job Listing Flow =====

    /// Record a new search term and issue a sequenced fetch ticket.
    pub fn begin_listing(&mut self, skill_filter: impl Into<String>) -> ListingTicket {
        let skill_filter = skill_filter.into();
        self.search = skill_filter.clone();
        self.listing = FlowState::Pending;
        self.listing_issued += 1;
        ListingTicket {
            generation: self.listing_issued,
            skill_filter,
        }
    }

    /// Resolve one ticket against the backend. Any failure is swallowed into
    /// an empty collection and written to the diagnostic log only.
    pub async fn fetch_listing(&self, ticket: &ListingTicket) -> ListingOutcome {
        match self.api.list_jobs(ticket.skill_filter()).await {
            Ok(jobs) => ListingOutcome { jobs, failed: false },
            Err(err) => {
                warn!(
                    generation = ticket.generation,
                    "Job listing fetch failed: {err:#}"
                );
                ListingOutcome {
                    jobs: Vec::new(),
                    failed: true,
                }
            }
        }
    }

    /// Apply a resolved outcome. Returns false when the outcome was stale
    /// (an outcome for a newer ticket has already been applied) and was
    /// discarded, so the newest request's result always wins.
    pub fn apply_listing(&mut self, ticket: &ListingTicket, outcome: ListingOutcome) -> bool {
        if ticket.generation <= self.listing_applied {
            debug!(
                generation = ticket.generation,
                applied = self.listing_applied,
                "Discarding stale listing response"
            );
            return false;
        }

        let failed = outcome.failed;
        self.listing_applied = ticket.generation;
        self.jobs = outcome.jobs;
        self.last_refreshed = Some(Local::now());
        if ticket.generation == self.listing_issued {
            self.listing = if failed {
                FlowState::Failed
            } else {
                FlowState::Success
            };
        }
        true
    }

    /// Issue, resolve and apply one listing fetch.
    pub async fn refresh_jobs(&mut self, skill_filter: impl Into<String>) {
        let ticket = self.begin_listing(skill_filter);
        let outcome = self.fetch_listing(&ticket).await;
        self.apply_listing(&ticket, outcome);
    }

    // ===== Prediction Flow =====

    pub fn set_rating(&mut self, rating: f64) -> Result<()> {
        if !(1.0..=5.0).contains(&rating) {
            anyhow::bail!("rating must be between 1.0 and 5.0, got {rating}");
        }
        self.rating = rating;
        Ok(())
    }

    pub fn set_skills_input(&mut self, skills_input: impl Into<String>) {
        self.skills_input = skills_input.into();
    }

    /// Submit the current rating and skill tokens. On success the estimate
    /// replaces the previous one; on failure the previous estimate stays and
    /// the caller raises a notification from the returned error.
    pub async fn submit_prediction(&mut self) -> Result<f64> {
        if self.predict.is_pending() {
            anyhow::bail!("a prediction request is already in flight");
        }
        if self.skills_input.trim().is_empty() {
            anyhow::bail!("skills input must not be empty");
        }

        let request = SalaryPredictionRequest {
            rating: self.rating,
            skills: skills::tokenize(&self.skills_input),
        };

        self.predict = FlowState::Pending;
        match self.api.predict_salary(&request).await {
            Ok(response) => {
                self.predicted_salary_k = Some(response.predicted_salary_k);
                self.predict = FlowState::Success;
                Ok(response.predicted_salary_k)
            }
            Err(err) => {
                self.predict = FlowState::Failed;
                warn!("Salary prediction failed: {err:#}");
                Err(err.context(PREDICT_FAILED_MESSAGE))
            }
        }
    }

    // ===== Upload Flow =====

    /// Send one file and return the notification to show: the backend's
    /// message when the request resolves with a decodable body, the fixed
    /// fallback otherwise. A failed upload is retried by re-invoking.
    pub async fn upload_dataset(&mut self, path: &Path) -> String {
        if self.upload.is_pending() {
            return UPLOAD_FAILED_MESSAGE.to_string();
        }

        self.upload = FlowState::Pending;
        match self.api.upload_dataset(path).await {
            Ok(response) => {
                self.upload = FlowState::Success;
                response.message
            }
            Err(err) => {
                self.upload = FlowState::Failed;
                warn!("Dataset upload failed: {err:#}");
                UPLOAD_FAILED_MESSAGE.to_string()
            }
        }
    }

    // ===== Accessors =====

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn skills_input(&self) -> &str {
        &self.skills_input
    }

    pub fn predicted_salary_k(&self) -> Option<f64> {
        self.predicted_salary_k
    }

    pub fn listing_state(&self) -> FlowState {
        self.listing
    }

    pub fn predict_state(&self) -> FlowState {
        self.predict
    }

    pub fn upload_state(&self) -> FlowState {
        self.upload
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Local>> {
        self.last_refreshed
    }
}
