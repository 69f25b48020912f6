use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a run.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{} not found.", .0.display())]
    ProductsNotFound(PathBuf),

    #[error("could not read product list {}: {source:#}", .path.display())]
    ProductsUnreadable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not read history {}: {source:#}", .path.display())]
    HistoryUnreadable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not write history {}: {source}", .path.display())]
    HistoryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("utc offset of {0} hours is out of range")]
    InvalidOffset(i32),
}

/// The single "no price this run" outcome for a product.
///
/// The variants only exist so the log line can say what happened; callers
/// treat every one of them the same way.
#[derive(Debug, Error)]
pub enum PriceUnavailable {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("no element matches `{0}`")]
    NoMatch(String),

    #[error("no digits in `{0}`")]
    NoDigits(String),

    #[error("price `{0}` does not fit in an integer")]
    OutOfRange(String),
}
