// crates/globeway-core/src/config.rs
//! Runtime configuration.
//!
//! Every knob has a default, so an empty TOML document (or
//! `Settings::default()`) yields a working setup. Durations are stored as
//! plain integers to keep the file format obvious; use the accessor
//! methods to get [`Duration`]s.

use crate::format::DisplayOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const PRIMARY_BASE_URL: &str = "https://restcountries.com/v3.1";
pub const SECONDARY_URL: &str = "https://countries.trevorblades.com/";
pub const STATS_BASE_URL: &str = "https://api.worldbank.org/v2/country";

/// Which records make it into the catalog when both directories answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    /// The primary directory decides which countries exist; secondary
    /// records without a primary counterpart are dropped.
    #[default]
    PrimaryOnly,
    /// Secondary-only records are appended after the primary ones.
    Union,
}

/// Settings for the dual-source country loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub primary_url: String,
    pub secondary_url: String,
    /// Upper bound for each directory call of a full load.
    pub request_timeout_secs: u64,
    /// Upper bound for the remote name search behind suggestions.
    pub suggestion_timeout_secs: u64,
    /// Total attempts of a full load when both directories fail.
    pub max_attempts: u32,
    pub backoff_initial_ms: u64,
    pub backoff_max_ms: u64,
    /// How long a loaded catalog is served from memory.
    pub cache_ttl_secs: u64,
    pub suggestion_limit: usize,
    pub membership: Membership,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            primary_url: PRIMARY_BASE_URL.to_owned(),
            secondary_url: SECONDARY_URL.to_owned(),
            request_timeout_secs: 15,
            suggestion_timeout_secs: 5,
            max_attempts: 2,
            backoff_initial_ms: 1_000,
            backoff_max_ms: 30_000,
            cache_ttl_secs: 600,
            suggestion_limit: 10,
            membership: Membership::PrimaryOnly,
        }
    }
}

impl LoaderConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn suggestion_timeout(&self) -> Duration {
        Duration::from_secs(self.suggestion_timeout_secs)
    }

    pub fn backoff_initial(&self) -> Duration {
        Duration::from_millis(self.backoff_initial_ms)
    }

    pub fn backoff_max(&self) -> Duration {
        Duration::from_millis(self.backoff_max_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Settings for the per-country economic enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub stats_url: String,
    pub timeout_secs: u64,
    /// How many years back from the current one are requested.
    pub window_years: i32,
    pub cache_ttl_secs: u64,
    /// Bulk variant: at most this many countries...
    pub bulk_limit: usize,
    /// ...with a population above this threshold...
    pub bulk_min_population: u64,
    /// ...fetched this many at a time...
    pub batch_size: usize,
    /// ...with this pause between batches.
    pub batch_pause_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            stats_url: STATS_BASE_URL.to_owned(),
            timeout_secs: 10,
            window_years: 3,
            cache_ttl_secs: 1_800,
            bulk_limit: 20,
            bulk_min_population: 1_000_000,
            batch_size: 5,
            batch_pause_ms: 500,
        }
    }
}

impl EnrichmentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }
}

/// Everything a consumer needs, in one object passed down explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub loader: LoaderConfig,
    pub enrichment: EnrichmentConfig,
    pub display: DisplayOptions,
}
