// crates/globeway-core/src/lib.rs

//! # globeway-core
//!
//! Country data assembled from two public directories, with optional
//! economic indicators on top.
//!
//! - [`CountryLoader`] queries both directories concurrently, merges the
//!   overlap by alpha-2 code, retries when both are down and caches the
//!   result.
//! - [`Enricher`] attaches the latest non-null value of each economic
//!   indicator; failures degrade to "no data" instead of errors.
//! - [`CountrySearch`] answers lookups, suggestions and filtered lists on
//!   a loaded catalog without touching the network.

pub mod cache;
pub mod config;
pub mod convert;
pub mod economy;
pub mod error;
pub mod format;
pub mod loader;
pub mod merge;
pub mod model;
pub mod retry;
pub mod search;
pub mod sources;
pub mod text;
pub mod traits;
// Wire shapes of the upstream payloads
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::config::{EnrichmentConfig, LoaderConfig, Membership, Settings};
pub use crate::economy::{
    EconomicSupplement, EnrichedCountry, Enricher, Indicator, IndicatorReading, Observation,
    PeriodWindow,
};
pub use crate::error::{GlobeError, Result};
pub use crate::format::{DisplayOptions, Language};
pub use crate::loader::CountryLoader;
pub use crate::model::{CatalogStats, CountryRecord, Currency, Origin};
pub use crate::search::{CountryFilter, CountrySearch};
pub use crate::sources::{CountrySource, IndicatorSource, NameQuery, NameSearch};
pub use crate::traits::NameMatch;

#[cfg(feature = "http")]
pub use crate::loader::DefaultLoader;

/// Enricher wired to the World Bank indicators API.
#[cfg(feature = "http")]
pub type DefaultEnricher = Enricher<sources::worldbank::WorldBank>;

#[cfg(feature = "http")]
impl DefaultEnricher {
    pub fn from_config(config: EnrichmentConfig) -> Self {
        let source = sources::worldbank::WorldBank::new(config.stats_url.clone());
        Enricher::new(source, config)
    }
}
