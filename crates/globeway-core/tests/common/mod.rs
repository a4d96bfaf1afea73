// crates/globeway-core/tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use globeway_core::{
    CountryRecord, CountrySource, GlobeError, Indicator, IndicatorSource, NameQuery, NameSearch,
    Observation, Origin, PeriodWindow, Result,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared call counter that survives moving the fake into a loader.
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn scripted<T: Clone>(name: &'static str, outcome: &std::result::Result<T, String>) -> Result<T> {
    outcome.clone().map_err(|message| GlobeError::Upstream {
        provider: name,
        message,
    })
}

/// In-process country directory with scripted answers.
pub struct FakeDirectory {
    name: &'static str,
    catalog: std::result::Result<Vec<CountryRecord>, String>,
    search: std::result::Result<Vec<CountryRecord>, String>,
    delay: Option<Duration>,
    pub fetches: Calls,
    pub searches: Calls,
}

impl FakeDirectory {
    pub fn ok(name: &'static str, catalog: Vec<CountryRecord>) -> Self {
        Self {
            name,
            catalog: Ok(catalog),
            search: Ok(Vec::new()),
            delay: None,
            fetches: Calls::default(),
            searches: Calls::default(),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            catalog: Err("connection refused".into()),
            ..Self::ok(name, Vec::new())
        }
    }

    pub fn with_search(mut self, hits: Vec<CountryRecord>) -> Self {
        self.search = Ok(hits);
        self
    }

    pub fn with_failing_search(mut self) -> Self {
        self.search = Err("search unavailable".into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
    }
}

#[async_trait]
impl CountrySource for FakeDirectory {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_all(&self) -> Result<Vec<CountryRecord>> {
        self.fetches.bump();
        self.pause().await;
        scripted(self.name, &self.catalog)
    }
}

#[async_trait]
impl NameSearch for FakeDirectory {
    async fn search_by_name(&self, term: &str, query: NameQuery) -> Result<Vec<CountryRecord>> {
        self.searches.bump();
        self.pause().await;
        let hits = scripted(self.name, &self.search)?;
        Ok(match query {
            NameQuery::Partial => hits,
            NameQuery::Exact => hits.into_iter().filter(|c| c.name_common == term).collect(),
        })
    }
}

/// In-process statistics directory keyed by country code.
#[derive(Default)]
pub struct FakeStats {
    answers: HashMap<String, std::result::Result<Vec<Observation>, String>>,
    pub calls: Calls,
}

impl FakeStats {
    pub fn answer(mut self, code: &str, observations: Vec<Observation>) -> Self {
        self.answers.insert(code.to_owned(), Ok(observations));
        self
    }

    pub fn fail(mut self, code: &str) -> Self {
        self.answers.insert(code.to_owned(), Err("HTTP 502".into()));
        self
    }
}

#[async_trait]
impl IndicatorSource for FakeStats {
    fn name(&self) -> &'static str {
        "fake-stats"
    }

    async fn observations(
        &self,
        code: &str,
        _indicators: &[Indicator],
        _window: PeriodWindow,
    ) -> Result<Vec<Observation>> {
        self.calls.bump();
        match self.answers.get(code) {
            Some(outcome) => scripted("fake-stats", outcome),
            None => Ok(Vec::new()),
        }
    }
}

pub fn primary_record(code2: &str, code3: &str, name: &str, population: u64) -> CountryRecord {
    let mut r = CountryRecord::new(code2, code3, name, Origin::Primary);
    r.population = Some(population);
    r.region = Some("Somewhere".into());
    r
}

pub fn secondary_record(code2: &str, name: &str) -> CountryRecord {
    let mut r = CountryRecord::new(code2, "", name, Origin::Secondary);
    r.emoji = Some(format!("[{code2}]"));
    r.calling_code = Some("+1".into());
    r
}

/// Brazil, France and Japan from the primary side.
pub fn primary_catalog() -> Vec<CountryRecord> {
    vec![
        primary_record("BR", "BRA", "Brazil", 212_559_409),
        primary_record("FR", "FRA", "France", 67_391_582),
        primary_record("JP", "JPN", "Japan", 125_836_021),
    ]
}

/// Brazil and Japan overlap; Kosovo is secondary-only.
pub fn secondary_catalog() -> Vec<CountryRecord> {
    vec![
        secondary_record("BR", "Brazil"),
        secondary_record("JP", "Japan"),
        secondary_record("XK", "Kosovo"),
    ]
}

pub fn observation(indicator: Indicator, period: i32, value: Option<f64>) -> Observation {
    Observation {
        indicator,
        period,
        value,
    }
}
