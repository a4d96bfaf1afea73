// crates/globeway-core/src/error.rs
use std::time::Duration;
use thiserror::Error;

/// Errors produced while fetching, parsing or reconciling country data.
#[derive(Debug, Error)]
pub enum GlobeError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{provider} answered with HTTP {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} did not answer within {after:?}")]
    Timeout {
        provider: &'static str,
        after: Duration,
    },

    #[error("{provider} reported an error: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Both country directories failed on every attempt.
    #[error(
        "all country sources failed after {attempts} attempt(s): primary: {primary}; secondary: {secondary}"
    )]
    AllSourcesFailed {
        attempts: u32,
        primary: Box<GlobeError>,
        secondary: Box<GlobeError>,
    },
}

pub type Result<T> = std::result::Result<T, GlobeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregated_error_names_both_causes() {
        let err = GlobeError::AllSourcesFailed {
            attempts: 2,
            primary: Box::new(GlobeError::Status {
                provider: "restcountries",
                status: 503,
            }),
            secondary: Box::new(GlobeError::Timeout {
                provider: "countries-graphql",
                after: Duration::from_secs(15),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("2 attempt(s)"));
        assert!(msg.contains("restcountries answered with HTTP 503"));
        assert!(msg.contains("countries-graphql did not answer within 15s"));
    }
}
