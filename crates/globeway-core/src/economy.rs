// crates/globeway-core/src/economy.rs
//! # Economic Enrichment
//!
//! Optional per-country indicators from a statistics directory, merged
//! onto a [`CountryRecord`] on demand. Nothing here can fail the base
//! record: every error degrades to "economic data unavailable".

use crate::cache::TtlCache;
use crate::config::EnrichmentConfig;
use crate::error::{GlobeError, Result};
use crate::format::{format_reading, DisplayOptions};
use crate::model::CountryRecord;
use crate::sources::IndicatorSource;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// How an indicator value is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Current US dollars.
    Usd,
    Percent,
    Years,
    /// Unitless index (0-100).
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    GdpTotal,
    GdpPerCapita,
    GdpGrowth,
    Inflation,
    Unemployment,
    Gini,
    LifeExpectancy,
    Literacy,
    Urbanization,
}

impl Indicator {
    pub const ALL: [Indicator; 9] = [
        Indicator::GdpTotal,
        Indicator::GdpPerCapita,
        Indicator::GdpGrowth,
        Indicator::Inflation,
        Indicator::Unemployment,
        Indicator::Gini,
        Indicator::LifeExpectancy,
        Indicator::Literacy,
        Indicator::Urbanization,
    ];

    /// World Bank indicator id.
    pub fn code(self) -> &'static str {
        match self {
            Indicator::GdpTotal => "NY.GDP.MKTP.CD",
            Indicator::GdpPerCapita => "NY.GDP.PCAP.CD",
            Indicator::GdpGrowth => "NY.GDP.MKTP.KD.ZG",
            Indicator::Inflation => "FP.CPI.TOTL.ZG",
            Indicator::Unemployment => "SL.UEM.TOTL.ZS",
            Indicator::Gini => "SI.POV.GINI",
            Indicator::LifeExpectancy => "SP.DYN.LE00.IN",
            Indicator::Literacy => "SE.ADT.LITR.ZS",
            Indicator::Urbanization => "SP.URB.TOTL.IN.ZS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|i| i.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn unit(self) -> Unit {
        match self {
            Indicator::GdpTotal | Indicator::GdpPerCapita => Unit::Usd,
            Indicator::LifeExpectancy => Unit::Years,
            Indicator::Gini => Unit::Index,
            _ => Unit::Percent,
        }
    }
}

/// Inclusive range of periods (years) to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: i32,
    pub end: i32,
}

impl PeriodWindow {
    /// The last `years` years up to and including `end`.
    pub fn ending_at(end: i32, years: i32) -> Self {
        Self {
            start: end - years.max(0),
            end,
        }
    }

    /// The last `years` years up to the current calendar year.
    pub fn recent(years: i32) -> Self {
        Self::ending_at(chrono::Utc::now().year(), years)
    }
}

/// One period of one indicator as reported upstream; `value` is often
/// `None` for the latest periods.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub indicator: Indicator,
    pub period: i32,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub value: f64,
    pub period: i32,
}

/// For each indicator, the most recent period that carries a value.
///
/// The latest period is frequently null; it must not shadow an older
/// period that has data. Indicators without any value are left out.
pub fn select_latest(observations: &[Observation]) -> BTreeMap<Indicator, IndicatorReading> {
    let mut out: BTreeMap<Indicator, IndicatorReading> = BTreeMap::new();
    for obs in observations {
        let Some(value) = obs.value.filter(|v| v.is_finite()) else {
            continue;
        };
        let candidate = IndicatorReading {
            value,
            period: obs.period,
        };
        out.entry(obs.indicator)
            .and_modify(|cur| {
                if candidate.period > cur.period {
                    *cur = candidate;
                }
            })
            .or_insert(candidate);
    }
    out
}

/// Economic indicators for one country. Each indicator is independently
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicSupplement {
    pub readings: BTreeMap<Indicator, IndicatorReading>,
}

impl EconomicSupplement {
    pub fn from_observations(observations: &[Observation]) -> Self {
        Self {
            readings: select_latest(observations),
        }
    }

    pub fn get(&self, indicator: Indicator) -> Option<&IndicatorReading> {
        self.readings.get(&indicator)
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Display string; a missing indicator renders as "not available".
    pub fn display(&self, indicator: Indicator, opts: &DisplayOptions) -> String {
        format_reading(indicator, self.get(indicator), opts)
    }
}

/// A base record plus whatever economic data could be fetched for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCountry {
    pub base: CountryRecord,
    /// `None` when the statistics directory could not be reached.
    pub economy: Option<EconomicSupplement>,
}

impl EnrichedCountry {
    pub fn display(&self, indicator: Indicator, opts: &DisplayOptions) -> String {
        format_reading(
            indicator,
            self.economy.as_ref().and_then(|e| e.get(indicator)),
            opts,
        )
    }
}

/// Fetches, caches and attaches [`EconomicSupplement`]s.
pub struct Enricher<C> {
    source: C,
    config: EnrichmentConfig,
    cache: TtlCache<String, EconomicSupplement>,
}

impl<C: IndicatorSource> Enricher<C> {
    pub fn new(source: C, config: EnrichmentConfig) -> Self {
        let cache = TtlCache::new(config.cache_ttl());
        Self {
            source,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Indicators for one country code (alpha-3 or alpha-2).
    ///
    /// # Errors
    /// Transport or payload failures of the statistics directory, or
    /// [`GlobeError::Timeout`] when it does not answer in time.
    pub async fn supplement(&self, code: &str) -> Result<EconomicSupplement> {
        let key = code.trim().to_ascii_uppercase();
        if key.is_empty() {
            return Err(GlobeError::InvalidData("empty country code".into()));
        }
        if let Some(hit) = self.cache.get_fresh(&key) {
            debug!(code = %key, "economic data served from cache");
            return Ok((*hit).clone());
        }

        let window = PeriodWindow::recent(self.config.window_years);
        let after = self.config.timeout();
        let observations = tokio::time::timeout(
            after,
            self.source.observations(&key, &Indicator::ALL, window),
        )
        .await
        .map_err(|_| GlobeError::Timeout {
            provider: self.source.name(),
            after,
        })??;

        let supplement = EconomicSupplement::from_observations(&observations);
        info!(
            code = %key,
            observations = observations.len(),
            indicators = supplement.readings.len(),
            "economic data loaded"
        );
        Ok((*self.cache.store(key, supplement)).clone())
    }

    /// Attach economic data to `record`. Never fails.
    pub async fn enrich(&self, record: &CountryRecord) -> EnrichedCountry {
        let economy = match self.supplement(&record.code3).await {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(code = %record.code3, error = %e, "economic data unavailable");
                None
            }
        };
        EnrichedCountry {
            base: record.clone(),
            economy,
        }
    }

    /// Bulk variant over the most populous countries of `records`.
    ///
    /// Countries are fetched in sequential batches with a pause between
    /// batches; a failing country is skipped, the rest of its batch is
    /// kept. Result is keyed by `code3`.
    pub async fn enrich_many(
        &self,
        records: &[CountryRecord],
    ) -> BTreeMap<String, EconomicSupplement> {
        let codes = bulk_candidates(records, &self.config);
        let mut out = BTreeMap::new();
        let batch_size = self.config.batch_size.max(1);
        let batches: Vec<&[String]> = codes.chunks(batch_size).collect();

        for (i, batch) in batches.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.batch_pause()).await;
            }
            let results =
                futures::future::join_all(batch.iter().map(|code| self.supplement(code))).await;
            for (code, result) in batch.iter().zip(results) {
                match result {
                    Ok(s) => {
                        out.insert(code.clone(), s);
                    }
                    Err(e) => warn!(code = %code, error = %e, "skipping country in bulk load"),
                }
            }
        }
        info!(
            requested = codes.len(),
            loaded = out.len(),
            "bulk economic data loaded"
        );
        out
    }
}

/// Codes of the countries a bulk load should cover, most populous first.
pub fn bulk_candidates(records: &[CountryRecord], config: &EnrichmentConfig) -> Vec<String> {
    let mut eligible: Vec<(&str, u64)> = records
        .iter()
        .filter_map(|r| r.population.map(|p| (r.code3.as_str(), p)))
        .filter(|(_, p)| *p > config.bulk_min_population)
        .collect();
    eligible.sort_by(|a, b| b.1.cmp(&a.1));
    eligible
        .into_iter()
        .take(config.bulk_limit)
        .map(|(code, _)| code.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Origin;

    fn obs(indicator: Indicator, period: i32, value: Option<f64>) -> Observation {
        Observation {
            indicator,
            period,
            value,
        }
    }

    #[test]
    fn latest_non_null_period_wins() {
        let data = vec![
            obs(Indicator::Inflation, 2021, None),
            obs(Indicator::Inflation, 2020, Some(5.2)),
        ];
        let picked = select_latest(&data);
        assert_eq!(
            picked.get(&Indicator::Inflation),
            Some(&IndicatorReading {
                value: 5.2,
                period: 2020
            })
        );
    }

    #[test]
    fn order_of_observations_does_not_matter() {
        let data = vec![
            obs(Indicator::GdpTotal, 2019, Some(1.0)),
            obs(Indicator::GdpTotal, 2022, Some(4.0)),
            obs(Indicator::GdpTotal, 2021, Some(3.0)),
        ];
        assert_eq!(select_latest(&data)[&Indicator::GdpTotal].period, 2022);
    }

    #[test]
    fn all_null_indicator_is_absent_not_zero() {
        let data = vec![
            obs(Indicator::Gini, 2022, None),
            obs(Indicator::Gini, 2021, None),
            obs(Indicator::GdpGrowth, 2022, Some(0.0)),
        ];
        let supplement = EconomicSupplement::from_observations(&data);
        assert!(supplement.get(Indicator::Gini).is_none());
        // A real zero is kept.
        assert_eq!(supplement.get(Indicator::GdpGrowth).map(|r| r.value), Some(0.0));
    }

    #[test]
    fn indicator_codes_round_trip() {
        for i in Indicator::ALL {
            assert_eq!(Indicator::from_code(i.code()), Some(i));
        }
        assert_eq!(Indicator::from_code("nope"), None);
    }

    #[test]
    fn window_covers_requested_years() {
        let w = PeriodWindow::ending_at(2024, 3);
        assert_eq!((w.start, w.end), (2021, 2024));
    }

    #[test]
    fn bulk_candidates_filter_sort_and_limit() {
        let mut records = Vec::new();
        for (code, pop) in [
            ("AAA", Some(5_000_000)),
            ("BBB", Some(900_000)),
            ("CCC", None),
            ("DDD", Some(80_000_000)),
            ("EEE", Some(2_000_000)),
        ] {
            let mut r = CountryRecord::new(&code[..2], code, code, Origin::Primary);
            r.population = pop;
            records.push(r);
        }
        let config = EnrichmentConfig {
            bulk_limit: 2,
            ..EnrichmentConfig::default()
        };
        assert_eq!(bulk_candidates(&records, &config), vec!["DDD", "AAA"]);
    }
}
