use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Catalog source answered with {0}")]
    Status(StatusCode),

    #[error("Catalog file unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV file is empty or invalid")]
    TooFewLines,
}
