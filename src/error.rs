use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur during a scrape run
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Page evaluation failed: {0}")]
    Page(String),

    #[error("No product elements found on the page")]
    NoProducts,

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
