// src/cli.rs
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::config::ConfigManager;
use crate::core::api_client::{JobsApi, JobsApiClient};
use crate::core::dataset;
use crate::dashboard::{render, Dashboard, PREDICT_FAILED_MESSAGE};

#[derive(Parser)]
#[command(name = "hrpulse")]
#[command(about = "Terminal dashboard for the HR-Pulse job market API")]
pub struct PulseCli {
    #[command(subcommand)]
    pub command: PulseCommand,

    /// Override the Jobs API base URL from config/environment
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum PulseCommand {
    /// List job postings, optionally filtered by skill
    Jobs {
        #[arg(long, default_value = "")]
        skill: String,
    },
    /// Estimate a salary for a company rating and comma-separated skills
    Predict {
        #[arg(long, value_parser = parse_rating)]
        rating: f64,
        #[arg(long)]
        skills: String,
    },
    /// Upload a CSV dataset to the backend
    Upload { file: PathBuf },
    /// Interactive dashboard session
    Dashboard,
}

fn parse_rating(raw: &str) -> Result<f64, String> {
    let rating: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if !(1.0..=5.0).contains(&rating) {
        return Err(format!("rating must be between 1.0 and 5.0, got {rating}"));
    }
    Ok(rating)
}

pub async fn handle_command(cli: PulseCli) -> Result<()> {
    let config = ConfigManager::load(cli.api_url)?;
    let api = Arc::new(JobsApiClient::new(&config.api)?);
    let mut dashboard = Dashboard::new(api);

    match cli.command {
        PulseCommand::Jobs { skill } => {
            dashboard.refresh_jobs(skill).await;
            print_grid(&dashboard);
        }

        PulseCommand::Predict { rating, skills } => {
            dashboard.set_rating(rating)?;
            dashboard.set_skills_input(skills);
            match dashboard.submit_prediction().await {
                Ok(value) => println!("{}", render::salary_banner(value)),
                Err(_) => eprintln!("{PREDICT_FAILED_MESSAGE}"),
            }
        }

        PulseCommand::Upload { file } => {
            let rows = dataset::record_count(&file)?;
            info!("Uploading {} ({} data rows)", file.display(), rows);
            let message = dashboard.upload_dataset(&file).await;
            println!("{message}");
        }

        PulseCommand::Dashboard => run_dashboard(dashboard).await?,
    }

    Ok(())
}

/// Interactive session: any plain line is the search box (each change issues
/// a new listing fetch), slash commands drive the other two flows.
async fn run_dashboard<A: JobsApi>(mut dashboard: Dashboard<A>) -> Result<()> {
    println!("HR-Pulse dashboard.");
    println!("Type a skill to search, /predict <rating> <skills>, /upload <file>, /quit.");

    dashboard.refresh_jobs("").await;
    print_grid(&dashboard);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim().to_string();

        if line == "/quit" {
            break;
        }

        if let Some(rest) = line.strip_prefix("/predict") {
            let rest = rest.trim();
            let (rating_raw, skills_raw) = rest.split_once(' ').unwrap_or((rest, ""));
            match parse_rating(rating_raw) {
                Ok(rating) => {
                    dashboard.set_rating(rating)?;
                    dashboard.set_skills_input(skills_raw.trim());
                    match dashboard.submit_prediction().await {
                        Ok(value) => println!("{}", render::salary_banner(value)),
                        Err(_) => eprintln!("{PREDICT_FAILED_MESSAGE}"),
                    }
                }
                Err(err) => eprintln!("{err}"),
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("/upload") {
            let path = PathBuf::from(rest.trim());
            match dataset::record_count(&path) {
                Ok(rows) => info!("Uploading {} ({} data rows)", path.display(), rows),
                Err(err) => {
                    eprintln!("{err:#}");
                    continue;
                }
            }
            let message = dashboard.upload_dataset(&path).await;
            println!("{message}");
            continue;
        }

        dashboard.refresh_jobs(line).await;
        print_grid(&dashboard);
    }

    Ok(())
}

fn print_grid<A: JobsApi>(dashboard: &Dashboard<A>) {
    println!(
        "{} ({})",
        render::count_label(dashboard.jobs().len()),
        render::status_line(dashboard.last_refreshed())
    );
    if dashboard.jobs().is_empty() {
        println!("{}", render::empty_state());
    } else {
        println!("{}", render::render_grid(dashboard.jobs()));
    }
}
