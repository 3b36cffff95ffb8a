// src/dashboard/render.rs
//! Text rendering of the dashboard: job cards, count label, salary banner.
//! Pure string builders so the terminal layer stays trivial.

use chrono::{DateTime, Local};

use crate::types::job::JobRecord;

pub fn count_label(count: usize) -> String {
    format!("{count} results")
}

pub fn empty_state() -> &'static str {
    "No jobs found. Try another skill or upload a new dataset."
}

pub fn salary_banner(predicted_salary_k: f64) -> String {
    format!("Estimate: ${predicted_salary_k}k /yr")
}

pub fn status_line(last_refreshed: Option<DateTime<Local>>) -> String {
    match last_refreshed {
        Some(at) => format!("updated {}", at.format("%H:%M:%S")),
        None => "not refreshed yet".to_string(),
    }
}

/// One job posting as a card. Missing fields fall back to the same labels
/// the backend-less states use everywhere else.
pub fn job_card(job: &JobRecord) -> String {
    let salary = job
        .salary_estimate
        .as_deref()
        .unwrap_or("Salary not specified");
    let location = job.location.as_deref().unwrap_or("Location unknown");
    let company = job.company_name.as_deref().unwrap_or("Company confidential");

    let skills = job.skills();
    let skills_line = if skills.is_empty() {
        "no skills isolated".to_string()
    } else {
        skills.join(", ")
    };

    format!(
        "[{}] {}  ({})\n     {} - {}\n     skills: {}",
        job.company_initials(),
        job.job_title,
        salary,
        location,
        company,
        skills_line
    )
}

pub fn render_grid(jobs: &[JobRecord]) -> String {
    jobs.iter().map(job_card).collect::<Vec<_>>().join("\n\n")
}
