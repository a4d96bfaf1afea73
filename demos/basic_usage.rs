// demos/basic_usage.rs
//
// Run with: cargo run --example basic_usage
use globeway_core::{
    CountryFilter, CountrySearch, DefaultEnricher, DefaultLoader, DisplayOptions, Indicator,
    Language, Settings,
};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .init();

    let settings = Settings::default();
    let loader = DefaultLoader::from_config(settings.loader.clone());

    println!("Loading countries from both directories...");
    let countries = loader.load_all().await?;
    let stats = countries.stats();
    println!(
        "Loaded {} countries ({} merged, {} regions)",
        stats.countries, stats.merged, stats.regions
    );

    // Second call is served from memory.
    let again = loader.load_all().await?;
    println!("Cached: {}", std::sync::Arc::ptr_eq(&countries, &again));

    println!("Suggestions for 'uni': {:?}", loader.suggest("uni").await);

    let small_europe = CountryFilter {
        region: Some("Europe".into()),
        max_population: Some(1_000_000),
        ..Default::default()
    };
    for c in countries.filtered(&small_europe) {
        println!("  {} ({})", c.name(), c.code2);
    }

    let brazil = loader.lookup("Brazil").await?;
    let enricher = DefaultEnricher::from_config(settings.enrichment.clone());
    let enriched = enricher.enrich(&brazil).await;
    let pt = DisplayOptions::new(Language::Pt);
    for indicator in [Indicator::GdpTotal, Indicator::Inflation, Indicator::LifeExpectancy] {
        println!(
            "{}: {}",
            globeway_core::format::indicator_label(indicator, &pt),
            enriched.display(indicator, &pt)
        );
    }

    Ok(())
}
