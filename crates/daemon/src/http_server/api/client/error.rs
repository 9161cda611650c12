use reqwest::StatusCode;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("remote URL cannot be used as a base: {0}")]
    InvalidBase(Url),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
}
