use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;

use crate::config::{self, TrackerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Records today's price for each product in a list")]
pub struct CliOptions {
    /// Product list (JSON array of {name, url, selector})
    #[arg(long, default_value = config::DEFAULT_PRODUCTS_PATH)]
    pub products: PathBuf,

    /// Price history file, created if missing
    #[arg(long, default_value = config::DEFAULT_HISTORY_PATH)]
    pub history: PathBuf,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Offset from UTC used to decide today's date
    #[arg(long, default_value_t = config::DEFAULT_UTC_OFFSET_HOURS, allow_hyphen_values = true)]
    pub utc_offset_hours: i32,

    /// User-Agent header sent with each request
    #[arg(long, default_value = config::DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Record prices under this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl CliOptions {
    pub fn to_config(&self) -> TrackerConfig {
        TrackerConfig {
            products_path: self.products.clone(),
            history_path: self.history.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            utc_offset_hours: self.utc_offset_hours,
            ..TrackerConfig::default()
        }
    }
}

pub fn parse() -> CliOptions {
    CliOptions::parse()
}
