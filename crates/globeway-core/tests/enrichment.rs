// crates/globeway-core/tests/enrichment.rs
mod common;

use common::{observation, primary_record, FakeStats};
use globeway_core::{
    DisplayOptions, EnrichmentConfig, Enricher, Indicator, IndicatorReading, Language,
};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn enrich_attaches_latest_values() {
    let stats = FakeStats::default().answer(
        "BRA",
        vec![
            observation(Indicator::Inflation, 2023, None),
            observation(Indicator::Inflation, 2022, Some(9.28)),
            observation(Indicator::GdpTotal, 2023, Some(2.17e12)),
        ],
    );
    let enricher = Enricher::new(stats, EnrichmentConfig::default());
    let brazil = primary_record("BR", "BRA", "Brazil", 212_559_409);

    let enriched = enricher.enrich(&brazil).await;
    assert_eq!(enriched.base, brazil);
    let economy = enriched.economy.as_ref().unwrap();
    assert_eq!(
        economy.get(Indicator::Inflation),
        Some(&IndicatorReading {
            value: 9.28,
            period: 2022
        })
    );
    assert!(economy.get(Indicator::Gini).is_none());

    let en = DisplayOptions::new(Language::En);
    assert_eq!(enriched.display(Indicator::Gini, &en), "Not available");
    assert!(enriched.display(Indicator::GdpTotal, &en).contains("2023"));
}

#[tokio::test(start_paused = true)]
async fn failing_directory_leaves_base_record_intact() {
    let enricher = Enricher::new(FakeStats::default().fail("FRA"), EnrichmentConfig::default());
    let france = primary_record("FR", "FRA", "France", 67_391_582);

    let enriched = enricher.enrich(&france).await;
    assert_eq!(enriched.base, france);
    assert!(enriched.economy.is_none());
    assert!(enricher.supplement("FRA").await.is_err());
}

#[tokio::test(start_paused = true)]
async fn supplements_are_cached_per_code() {
    let stats = FakeStats::default().answer(
        "JPN",
        vec![observation(Indicator::LifeExpectancy, 2022, Some(84.0))],
    );
    let calls = stats.calls.clone();
    let enricher = Enricher::new(stats, EnrichmentConfig::default());

    let first = enricher.supplement("JPN").await.unwrap();
    let second = enricher.supplement(" jpn ").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);

    tokio::time::advance(Duration::from_secs(1_801)).await;
    enricher.supplement("JPN").await.unwrap();
    assert_eq!(calls.get(), 2);
}

#[tokio::test(start_paused = true)]
async fn bulk_runs_in_paced_batches_and_skips_failures() {
    let records = vec![
        primary_record("CN", "CHN", "China", 1_402_112_000),
        primary_record("IN", "IND", "India", 1_380_004_385),
        primary_record("US", "USA", "United States", 329_484_123),
        primary_record("ID", "IDN", "Indonesia", 273_523_621),
        primary_record("PK", "PAK", "Pakistan", 220_892_331),
        primary_record("TV", "TUV", "Tuvalu", 11_792),
    ];
    let mut stats = FakeStats::default().fail("USA");
    for code in ["CHN", "IND", "IDN", "PAK"] {
        stats = stats.answer(code, vec![observation(Indicator::Gini, 2020, Some(35.0))]);
    }
    let calls = stats.calls.clone();
    let config = EnrichmentConfig {
        batch_size: 2,
        ..EnrichmentConfig::default()
    };
    let enricher = Enricher::new(stats, config);

    let started = tokio::time::Instant::now();
    let out = enricher.enrich_many(&records).await;

    // Tuvalu is under the population threshold.
    assert_eq!(calls.get(), 5);
    assert_eq!(
        out.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["CHN", "IDN", "IND", "PAK"]
    );
    // Three batches, two pauses.
    assert!(started.elapsed() >= Duration::from_millis(1_000));
}
