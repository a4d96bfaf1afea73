// crates/globeway-core/src/sources/http.rs
//! Shared transport helpers for the HTTP adapters.

use crate::error::{GlobeError, Result};
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;
use tracing::{info, warn};

/// Shared HTTP client with connection pooling.
///
/// Only the connect phase is bounded here; the overall deadline of each
/// call is applied by the loader or enricher around the whole request.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("globeway/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "falling back to a default HTTP client");
            reqwest::Client::new()
        })
});

pub fn shared_client() -> reqwest::Client {
    HTTP_CLIENT.clone()
}

/// Send `request` and return the body of a successful response.
///
/// A non-success status becomes [`GlobeError::Status`] carrying the
/// status code, so callers can give 404 its own meaning.
pub async fn send_for_text(provider: &'static str, request: reqwest::RequestBuilder) -> Result<String> {
    let resp = request.send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    info!(
        provider,
        status = status.as_u16(),
        bytes = body.len(),
        "fetched"
    );
    if !status.is_success() {
        let preview: String = body.chars().take(300).collect();
        warn!(
            provider,
            status = status.as_u16(),
            preview = preview,
            "non-success status"
        );
        return Err(GlobeError::Status {
            provider,
            status: status.as_u16(),
        });
    }
    Ok(body)
}

/// Parse `base` and append path segments, percent-encoding each one.
pub fn join_url(base: &str, segments: &[&str]) -> Result<reqwest::Url> {
    let mut url = reqwest::Url::parse(base)
        .map_err(|e| GlobeError::InvalidData(format!("bad base URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| GlobeError::InvalidData(format!("base URL {base} cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_encodes_segments() {
        let url = join_url("https://restcountries.com/v3.1/", &["name", "côte d'ivoire"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://restcountries.com/v3.1/name/c%C3%B4te%20d'ivoire"
        );
        let url = join_url("https://restcountries.com/v3.1", &["all"]).unwrap();
        assert_eq!(url.as_str(), "https://restcountries.com/v3.1/all");
    }

    #[test]
    fn join_url_rejects_garbage() {
        assert!(join_url("not a url", &["x"]).is_err());
    }
}
