use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Accepted range for `JOB_TTL_DAYS`.
const JOB_TTL_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Create a demo employer and two jobs when the store has no employers.
    pub seed_demo_data: bool,
    pub job_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_file: std::env::var("DATA_FILE")
                .unwrap_or_else(|_| "data.json".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<bool>()
                .context("SEED_DEMO_DATA must be true or false")?,
            job_ttl_days: parse_job_ttl_days(
                &std::env::var("JOB_TTL_DAYS").unwrap_or_else(|_| "30".to_string()),
            )?,
        })
    }
}

fn parse_job_ttl_days(raw: &str) -> Result<i64> {
    let days = raw
        .trim()
        .parse::<i64>()
        .context("JOB_TTL_DAYS must be a whole number of days")?;
    if !JOB_TTL_DAYS_RANGE.contains(&days) {
        bail!(
            "JOB_TTL_DAYS must be between {} and {}, got {days}",
            JOB_TTL_DAYS_RANGE.start(),
            JOB_TTL_DAYS_RANGE.end()
        );
    }
    Ok(days)
}
