// crates/globeway-core/src/loader.rs

//! # Dual-Source Country Loader
//!
//! Fans out to the primary and secondary directories at once, waits for
//! both to settle, reconciles whatever came back and keeps the result in
//! memory for a while.
//!
//! ```no_run
//! use globeway_core::{DefaultLoader, LoaderConfig};
//!
//! # async fn demo() -> globeway_core::Result<()> {
//! let loader = DefaultLoader::from_config(LoaderConfig::default());
//! let countries = loader.load_all().await?;
//! println!("{} countries", countries.len());
//!
//! // Served from the cached list, no request.
//! let names = loader.suggest("braz").await;
//! assert!(names.iter().any(|n| n == "Brazil"));
//! # Ok(())
//! # }
//! ```

use crate::cache::TtlCache;
use crate::config::LoaderConfig;
use crate::error::{GlobeError, Result};
use crate::merge::reconcile;
use crate::model::CountryRecord;
use crate::retry::Backoff;
use crate::search::CountrySearch;
use crate::sources::{CountrySource, NameQuery, NameSearch};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[cfg(feature = "http")]
use crate::sources::{graphql::GraphQlCountries, rest::RestCountries};

/// Cache key of the full catalog. Searches are not cached.
pub const FULL_CATALOG: &str = "all-countries";

/// Run `fut` with a deadline; elapsing becomes [`GlobeError::Timeout`].
pub async fn bounded<T, F>(provider: &'static str, after: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(after, fut)
        .await
        .map_err(|_| GlobeError::Timeout { provider, after })?
}

pub struct CountryLoader<P, S> {
    primary: P,
    secondary: S,
    config: LoaderConfig,
    cache: TtlCache<&'static str, Vec<CountryRecord>>,
    // Full loads are single-flight.
    load_gate: tokio::sync::Mutex<()>,
}

/// Loader wired to the public REST and GraphQL directories.
#[cfg(feature = "http")]
pub type DefaultLoader = CountryLoader<RestCountries, GraphQlCountries>;

#[cfg(feature = "http")]
impl DefaultLoader {
    pub fn from_config(config: LoaderConfig) -> Self {
        let primary = RestCountries::new(config.primary_url.clone());
        let secondary = GraphQlCountries::new(config.secondary_url.clone());
        Self::with_sources(primary, secondary, config)
    }
}

impl<P, S> CountryLoader<P, S>
where
    P: CountrySource + NameSearch,
    S: CountrySource,
{
    pub fn with_sources(primary: P, secondary: S, config: LoaderConfig) -> Self {
        let cache = TtlCache::new(config.cache_ttl());
        Self {
            primary,
            secondary,
            config,
            cache,
            load_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// The catalog if one was loaded inside the freshness window.
    pub fn cached(&self) -> Option<Arc<Vec<CountryRecord>>> {
        self.cache.get_fresh(&FULL_CATALOG)
    }

    /// Forget the cached catalog; the next [`load_all`](Self::load_all)
    /// goes to the network.
    pub fn invalidate(&self) {
        self.cache.invalidate(&FULL_CATALOG);
    }

    /// The full, reconciled catalog.
    ///
    /// Inside the freshness window the cached `Arc` is returned without
    /// any request. Otherwise both directories are queried concurrently;
    /// one of them failing still yields a (degraded) catalog.
    ///
    /// # Errors
    /// [`GlobeError::AllSourcesFailed`] when both directories failed on
    /// every attempt.
    pub async fn load_all(&self) -> Result<Arc<Vec<CountryRecord>>> {
        if let Some(hit) = self.cached() {
            debug!(count = hit.len(), "catalog served from cache");
            return Ok(hit);
        }
        let _gate = self.load_gate.lock().await;
        // Another caller may have finished a load while we waited.
        if let Some(hit) = self.cached() {
            return Ok(hit);
        }
        self.load_and_store().await
    }

    /// Drop the cache and load again.
    ///
    /// Always fetches: a load already in flight when this is called is
    /// waited for, but its result is not reused.
    pub async fn reload(&self) -> Result<Arc<Vec<CountryRecord>>> {
        self.invalidate();
        let _gate = self.load_gate.lock().await;
        self.load_and_store().await
    }

    // Callers hold `load_gate`.
    async fn load_and_store(&self) -> Result<Arc<Vec<CountryRecord>>> {
        let records = self.load_with_retry().await?;
        info!(count = records.len(), "catalog loaded");
        Ok(self.cache.store(FULL_CATALOG, records))
    }

    async fn load_with_retry(&self) -> Result<Vec<CountryRecord>> {
        let max_attempts = self.config.max_attempts.max(1);
        let backoff = Backoff::new(self.config.backoff_initial(), self.config.backoff_max());
        let mut attempt = 1;
        loop {
            match self.fetch_once(attempt).await {
                Ok(records) => return Ok(records),
                Err(e) if attempt < max_attempts => {
                    let delay = backoff.delay_after(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "all country sources failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempts = attempt, error = %e, "giving up on country catalog");
                    return Err(e);
                }
            }
        }
    }

    /// One settle-all round: both calls are in flight before either is
    /// awaited to completion, and neither failure cancels the other.
    async fn fetch_once(&self, attempt: u32) -> Result<Vec<CountryRecord>> {
        let after = self.config.request_timeout();
        let (primary, secondary) = tokio::join!(
            bounded(self.primary.name(), after, self.primary.fetch_all()),
            bounded(self.secondary.name(), after, self.secondary.fetch_all()),
        );
        debug!(
            attempt,
            primary_ok = primary.is_ok(),
            secondary_ok = secondary.is_ok(),
            "country sources settled"
        );
        reconcile(primary, secondary, self.config.membership, attempt)
    }

    /// Autocomplete names for `term`. Best-effort: never fails.
    ///
    /// The cached catalog is searched first (no request); only when it is
    /// empty or has no match does the primary directory get asked.
    pub async fn suggest(&self, term: &str) -> Vec<String> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }
        let limit = self.config.suggestion_limit;

        if let Some(list) = self.cache.peek(&FULL_CATALOG) {
            let local = list.search_names(term, limit);
            if !local.is_empty() {
                debug!(term, hits = local.len(), "suggestions from cache");
                return local.into_iter().map(|c| c.name_common.clone()).collect();
            }
        }

        let after = self.config.suggestion_timeout();
        match bounded(
            self.primary.name(),
            after,
            self.primary.search_by_name(term, NameQuery::Partial),
        )
        .await
        {
            Ok(records) => {
                let mut names: Vec<String> = Vec::new();
                for rec in records {
                    if !names.contains(&rec.name_common) {
                        names.push(rec.name_common);
                    }
                }
                names.truncate(limit);
                names
            }
            Err(e) => {
                warn!(term, error = %e, "suggestion search failed");
                Vec::new()
            }
        }
    }

    /// One country by exact name (common, official or native) or code.
    ///
    /// Checks the cached catalog, then asks the primary directory for an
    /// exact full-name match.
    ///
    /// # Errors
    /// [`GlobeError::NotFound`] when nothing matches. A failing search is
    /// logged and reported the same way.
    pub async fn lookup(&self, query: &str) -> Result<CountryRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GlobeError::NotFound("empty country query".into()));
        }
        if let Some(list) = self.cache.peek(&FULL_CATALOG) {
            if let Some(hit) = list.find_by_name(query).or_else(|| list.find_by_code(query)) {
                return Ok(hit.clone());
            }
        }
        let found = match bounded(
            self.primary.name(),
            self.config.request_timeout(),
            self.primary.search_by_name(query, NameQuery::Exact),
        )
        .await
        {
            Ok(found) => found,
            Err(e) => {
                warn!(query, error = %e, "country search failed");
                Vec::new()
            }
        };
        found
            .into_iter()
            .next()
            .ok_or_else(|| GlobeError::NotFound(format!("no country named {query}")))
    }

    /// One country by alpha-2 or alpha-3 code from the full catalog.
    ///
    /// # Errors
    /// Whatever [`load_all`](Self::load_all) reports, or
    /// [`GlobeError::NotFound`] for an unknown code.
    pub async fn country(&self, code: &str) -> Result<CountryRecord> {
        let list = self.load_all().await?;
        list.find_by_code(code)
            .cloned()
            .ok_or_else(|| GlobeError::NotFound(format!("no country with code {code}")))
    }
}
