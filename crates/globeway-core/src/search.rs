// crates/globeway-core/src/search.rs

use crate::model::{CatalogStats, CountryRecord, Origin};
use crate::text::{equals_folded, fold_key};
use crate::traits::NameMatch;
use std::collections::HashSet;

/// Browse-list filters. Every criterion is optional; unset criteria
/// match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryFilter {
    /// Exact region name, case-insensitive (e.g. "Europe").
    pub region: Option<String>,
    /// Upper bound, inclusive. Countries with unknown population are
    /// excluded while this is set.
    pub max_population: Option<u64>,
    /// Top-level domain, with or without the leading dot.
    pub tld: Option<String>,
}

impl CountryFilter {
    pub fn matches(&self, c: &CountryRecord) -> bool {
        if let Some(region) = self.region.as_deref().filter(|r| !r.trim().is_empty()) {
            if !c
                .region
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case(region.trim()))
            {
                return false;
            }
        }
        if let Some(max) = self.max_population.filter(|m| *m > 0) {
            if !c.population.is_some_and(|p| p <= max) {
                return false;
            }
        }
        if let Some(tld) = self.tld.as_deref().map(normalize_tld).filter(|t| !t.is_empty()) {
            if !c.tld.iter().any(|t| normalize_tld(t) == tld) {
                return false;
            }
        }
        true
    }
}

fn normalize_tld(t: &str) -> String {
    t.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Read-only queries over a loaded catalog.
pub trait CountrySearch {
    /// Lookup by alpha-2 first, then alpha-3; case-insensitive.
    fn find_by_code(&self, code: &str) -> Option<&CountryRecord>;

    /// Exact (folded) match on common, official or native name.
    fn find_by_name(&self, name: &str) -> Option<&CountryRecord>;

    /// Folded substring match on the common name, prefix matches first,
    /// at most `limit` results. An empty term matches nothing.
    fn search_names(&self, term: &str, limit: usize) -> Vec<&CountryRecord>;

    /// Filtered browse list, sorted by common name.
    fn filtered(&self, filter: &CountryFilter) -> Vec<&CountryRecord>;

    /// Distinct region names, sorted.
    fn regions(&self) -> Vec<&str>;

    fn stats(&self) -> CatalogStats;
}

impl CountrySearch for [CountryRecord] {
    fn find_by_code(&self, code: &str) -> Option<&CountryRecord> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.iter()
            .find(|c| c.code2.eq_ignore_ascii_case(code))
            .or_else(|| self.iter().find(|c| c.code3.eq_ignore_ascii_case(code)))
    }

    fn find_by_name(&self, name: &str) -> Option<&CountryRecord> {
        if name.trim().is_empty() {
            return None;
        }
        self.iter()
            .find(|c| equals_folded(&c.name_common, name))
            .or_else(|| self.iter().find(|c| c.is_named(name)))
    }

    fn search_names(&self, term: &str, limit: usize) -> Vec<&CountryRecord> {
        let q = fold_key(term);
        if q.is_empty() || limit == 0 {
            return Vec::new();
        }
        let mut prefix = Vec::new();
        let mut inner = Vec::new();
        for c in self {
            let name = fold_key(&c.name_common);
            if name.starts_with(&q) {
                prefix.push(c);
            } else if name.contains(&q) {
                inner.push(c);
            }
        }
        prefix.extend(inner);
        prefix.truncate(limit);
        prefix
    }

    fn filtered(&self, filter: &CountryFilter) -> Vec<&CountryRecord> {
        let mut out: Vec<(String, &CountryRecord)> = self
            .iter()
            .filter(|c| filter.matches(c))
            .map(|c| (fold_key(&c.name_common), c))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out.into_iter().map(|(_, c)| c).collect()
    }

    fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self
            .iter()
            .filter_map(|c| c.region.as_deref())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        regions.sort_unstable();
        regions
    }

    fn stats(&self) -> CatalogStats {
        let count = |o: Origin| self.iter().filter(|c| c.origin == o).count();
        CatalogStats {
            countries: self.len(),
            merged: count(Origin::Merged),
            primary_only: count(Origin::Primary),
            secondary_only: count(Origin::Secondary),
            regions: self.regions().len(),
            with_population: self.iter().filter(|c| c.population.is_some()).count(),
        }
    }
}
