//! globeway: command-line interface for globeway-core
//!
//! Loads the merged country catalog from the two public directories and
//! prints summaries, filtered lists, single countries, name suggestions
//! and economic indicators.
//!
//! Usage examples
//! --------------
//!
//! - Show catalog stats
//!   $ globeway stats
//!
//! - List countries of a region with at most 5 million inhabitants
//!   $ globeway countries --region Europe --max-population 5000000
//!
//! - Show a country by name or code, with economic data, in Portuguese
//!   $ globeway --lang pt country brazil --economy
//!
//! - Autocomplete a partial name
//!   $ globeway suggest braz
//!
//! - Indicators for the most populous countries
//!   $ globeway bulk
//!
//! Configuration
//! -------------
//!
//! `--config <file.toml>` reads a settings file with optional `[loader]`,
//! `[enrichment]` and `[display]` tables. Logs go to stderr; `-v`/`-vv` or
//! `RUST_LOG` raise the level.
mod args;
mod settings;

use crate::args::{CliArgs, Commands};
use clap::Parser;
use globeway_core::format::{
    economic_data_unavailable, format_area, format_count, format_list, indicator_label,
    not_available,
};
use globeway_core::{
    CountryFilter, CountryRecord, CountrySearch, DefaultEnricher, DefaultLoader, DisplayOptions,
    EconomicSupplement, Indicator,
};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_country(c: &CountryRecord, opts: &DisplayOptions) {
    let or_na = |v: Option<&str>| v.unwrap_or(not_available(opts)).to_owned();
    println!("Country: {} {}", c.name(), c.emoji.as_deref().unwrap_or(""));
    println!("Official name: {}", c.name_official);
    println!("Native name: {}", c.native_name());
    println!("ISO2: {}", c.code2);
    println!("ISO3: {}", c.code3);
    println!("Capital: {}", format_list(&c.capital, opts));
    println!("Region: {}", or_na(c.region.as_deref()));
    println!("Subregion: {}", or_na(c.subregion.as_deref()));
    println!("Population: {}", format_count(c.population, opts));
    println!("Area: {}", format_area(c.area, opts));
    let languages: Vec<String> = c.languages.values().cloned().collect();
    println!("Languages: {}", format_list(&languages, opts));
    let currencies: Vec<String> = c
        .currencies
        .iter()
        .map(|(code, cur)| match (&cur.name, &cur.symbol) {
            (Some(name), Some(sym)) => format!("{name} ({code}, {sym})"),
            (Some(name), None) => format!("{name} ({code})"),
            _ => code.clone(),
        })
        .collect();
    println!("Currencies: {}", format_list(&currencies, opts));
    println!("Timezones: {}", format_list(&c.timezones, opts));
    println!("TLD: {}", format_list(&c.tld, opts));
    println!("Calling code: {}", or_na(c.calling_code.as_deref()));
    println!("Subdivisions: {}", c.subdivision_names.len());
    println!("Flag: {}", c.flag_image_url);
}

fn print_economy(economy: Option<&EconomicSupplement>, opts: &DisplayOptions) {
    match economy {
        Some(e) if !e.is_empty() => {
            for indicator in Indicator::ALL {
                println!(
                    "  {}: {}",
                    indicator_label(indicator, opts),
                    e.display(indicator, opts)
                );
            }
        }
        _ => println!("  {}", economic_data_unavailable(opts)),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let settings = settings::resolve(&args)?;
    let opts = settings.display;
    let loader = DefaultLoader::from_config(settings.loader.clone());
    let enricher = DefaultEnricher::from_config(settings.enrichment.clone());

    match args.command {
        Commands::Stats => {
            let list = loader.load_all().await?;
            let stats = list.stats();
            if args.json {
                return print_json(&stats);
            }
            println!("Catalog statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Merged from both directories: {}", stats.merged);
            println!("  Primary directory only: {}", stats.primary_only);
            println!("  Secondary directory only: {}", stats.secondary_only);
            println!("  Regions: {}", stats.regions);
            println!("  With population: {}", stats.with_population);
        }

        Commands::Countries {
            region,
            max_population,
            tld,
        } => {
            let list = loader.load_all().await?;
            let filter = CountryFilter {
                region,
                max_population,
                tld,
            };
            let hits = list.filtered(&filter);
            if args.json {
                return print_json(&hits);
            }
            for c in hits {
                println!(
                    "{} ({}) - {} - {}",
                    c.name(),
                    c.code2,
                    c.region.as_deref().unwrap_or(not_available(&opts)),
                    format_count(c.population, &opts)
                );
            }
        }

        Commands::Country { query, economy } => {
            // Warm the cache so names and codes resolve locally.
            if let Err(e) = loader.load_all().await {
                tracing::warn!(error = %e, "catalog unavailable, searching remotely");
            }
            let country = match loader.lookup(&query).await {
                Ok(c) => c,
                Err(globeway_core::GlobeError::NotFound(_)) => {
                    eprintln!("No country found for: {query}");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            if economy {
                let enriched = enricher.enrich(&country).await;
                if args.json {
                    return print_json(&enriched);
                }
                print_country(&enriched.base, &opts);
                println!("Economy:");
                print_economy(enriched.economy.as_ref(), &opts);
            } else {
                if args.json {
                    return print_json(&country);
                }
                print_country(&country, &opts);
            }
        }

        Commands::Suggest { term } => {
            if let Err(e) = loader.load_all().await {
                tracing::warn!(error = %e, "catalog unavailable, searching remotely");
            }
            let names = loader.suggest(&term).await;
            if args.json {
                return print_json(&names);
            }
            if names.is_empty() {
                println!("No suggestions for: {term}");
            }
            for name in names {
                println!("{name}");
            }
        }

        Commands::Economy { code } => {
            let supplement = match enricher.supplement(&code).await {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::warn!(code = %code, error = %e, "economic data unavailable");
                    None
                }
            };
            if args.json {
                return print_json(&supplement);
            }
            println!("Economy of {}:", code.trim().to_ascii_uppercase());
            print_economy(supplement.as_ref(), &opts);
        }

        Commands::Bulk => {
            let list = loader.load_all().await?;
            let all = enricher.enrich_many(&list).await;
            if args.json {
                return print_json(&all);
            }
            for (code, supplement) in &all {
                let name = list.find_by_code(code).map(|c| c.name()).unwrap_or(code);
                println!("{name} ({code}):");
                print_economy(Some(supplement), &opts);
            }
        }
    }

    Ok(())
}
