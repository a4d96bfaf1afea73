// crates/globeway-core/src/sources/mod.rs

//! # Upstream Sources
//!
//! Seams between the orchestration logic (loader, enricher) and the
//! network. The loader only sees these traits, so every directory can be
//! swapped for an in-process double in tests.
//!
//! Timeouts are applied by the callers, not by the implementations.

use crate::economy::{Indicator, Observation, PeriodWindow};
use crate::error::Result;
use crate::model::CountryRecord;
use async_trait::async_trait;

#[cfg(feature = "http")]
pub mod graphql;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod rest;
#[cfg(feature = "http")]
pub mod worldbank;

/// A directory that can list every country it knows.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fetch the full catalog, already normalized.
    async fn fetch_all(&self) -> Result<Vec<CountryRecord>>;
}

/// How a remote name search compares names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameQuery {
    /// Any country whose name contains the term.
    Partial,
    /// Only countries whose full name equals the term.
    Exact,
}

/// A directory that can search countries by name.
#[async_trait]
pub trait NameSearch: Send + Sync {
    /// An empty vector means "no match"; errors are reserved for
    /// transport and payload failures.
    async fn search_by_name(&self, term: &str, query: NameQuery) -> Result<Vec<CountryRecord>>;
}

/// A statistics directory serving per-country indicator time series.
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// All observations of `indicators` for `code` inside `window`,
    /// nulls included.
    async fn observations(
        &self,
        code: &str,
        indicators: &[Indicator],
        window: PeriodWindow,
    ) -> Result<Vec<Observation>>;
}
