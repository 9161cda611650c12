use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

#[allow(clippy::module_inception)]
mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

const API_BASE_PATH: &str = "/api/v0";

/// An API operation the client knows how to send.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError>;
}

/// Build `<base>/api/v0/<segments…>`, percent-encoding each segment.
pub fn api_url(base_url: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base_url.join(API_BASE_PATH)?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidBase(base_url.clone()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_encodes_segments() {
        let base = Url::parse("http://localhost:5080").unwrap();
        let url = api_url(&base, &["files", "a b/c", "users"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5080/api/v0/files/a%20b%2Fc/users");
    }

    #[test]
    fn test_api_url_ignores_base_path() {
        let base = Url::parse("http://localhost:5080/somewhere/").unwrap();
        let url = api_url(&base, &["users"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5080/api/v0/users");
    }
}
