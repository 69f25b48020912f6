use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::error::TrackerError;

pub const DEFAULT_PRODUCTS_PATH: &str = "products.json";
pub const DEFAULT_HISTORY_PATH: &str = "data.json";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ja,en-US;q=0.9,en;q=0.8";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// JST, no daylight saving.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Everything a run needs that is not read from the products file.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub products_path: PathBuf,
    pub history_path: PathBuf,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout: Duration,
    pub utc_offset_hours: i32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            products_path: PathBuf::from(DEFAULT_PRODUCTS_PATH),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl TrackerConfig {
    pub fn offset(&self) -> Result<FixedOffset, TrackerError> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(TrackerError::InvalidOffset(self.utc_offset_hours))
    }

    /// Today's calendar date in the configured offset.
    pub fn today(&self) -> Result<NaiveDate, TrackerError> {
        Ok(Utc::now().with_timezone(&self.offset()?).date_naive())
    }
}

/// `YYYY-MM-DD`, the key format of the history file.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
