use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to retrieve seed {url}: {reason}")]
    SeedUnreachable { url: String, reason: String },

    #[error("No links found on {0}")]
    NoLinksFound(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
