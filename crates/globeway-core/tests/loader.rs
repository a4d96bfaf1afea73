// crates/globeway-core/tests/loader.rs
mod common;

use common::{primary_catalog, primary_record, secondary_catalog, FakeDirectory};
use globeway_core::{
    CountryLoader, CountrySearch, GlobeError, LoaderConfig, Membership, Origin,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn loader(
    primary: FakeDirectory,
    secondary: FakeDirectory,
) -> CountryLoader<FakeDirectory, FakeDirectory> {
    CountryLoader::with_sources(primary, secondary, LoaderConfig::default())
}

#[tokio::test(start_paused = true)]
async fn merged_catalog_is_primary_based_and_unique() {
    let mut primary = primary_catalog();
    primary.push(primary_record("br", "BRA", "Brazil (again)", 1));
    let l = loader(
        FakeDirectory::ok("a", primary),
        FakeDirectory::ok("b", secondary_catalog()),
    );

    let list = l.load_all().await.unwrap();
    assert_eq!(list.len(), 3);
    let codes: HashSet<_> = list.iter().map(|c| c.code2.as_str()).collect();
    assert_eq!(codes.len(), list.len());
    // Kosovo exists only in the secondary directory.
    assert!(list.find_by_code("XK").is_none());

    let br = list.find_by_code("BR").unwrap();
    assert_eq!(br.name_common, "Brazil");
    assert_eq!(br.origin, Origin::Merged);
    assert_eq!(br.emoji.as_deref(), Some("[BR]"));
    assert_eq!(br.population, Some(212_559_409));

    let fr = list.find_by_code("FR").unwrap();
    assert_eq!(fr.origin, Origin::Primary);
    assert_eq!(fr.emoji, None);
}

#[tokio::test(start_paused = true)]
async fn union_membership_keeps_secondary_only_records() {
    let config = LoaderConfig {
        membership: Membership::Union,
        ..LoaderConfig::default()
    };
    let l = CountryLoader::with_sources(
        FakeDirectory::ok("a", primary_catalog()),
        FakeDirectory::ok("b", secondary_catalog()),
        config,
    );
    let list = l.load_all().await.unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list.find_by_code("XK").unwrap().origin, Origin::Secondary);
}

#[tokio::test(start_paused = true)]
async fn primary_failure_degrades_to_secondary_data() {
    let l = loader(
        FakeDirectory::failing("a"),
        FakeDirectory::ok("b", secondary_catalog()),
    );
    let list = l.load_all().await.unwrap();
    assert_eq!(list.len(), secondary_catalog().len());
    assert!(list.iter().all(|c| c.population.is_none()));
    assert!(list.iter().all(|c| c.origin == Origin::Secondary));
}

#[tokio::test(start_paused = true)]
async fn secondary_failure_degrades_to_primary_data() {
    let l = loader(
        FakeDirectory::ok("a", primary_catalog()),
        FakeDirectory::failing("b"),
    );
    let list = l.load_all().await.unwrap();
    assert_eq!(list.len(), primary_catalog().len());
    assert!(list.iter().all(|c| c.emoji.is_none()));
    assert!(list.iter().all(|c| c.origin == Origin::Primary));
}

#[tokio::test(start_paused = true)]
async fn total_failure_retries_once_then_reports_both_causes() {
    let primary = FakeDirectory::failing("a");
    let secondary = FakeDirectory::failing("b");
    let (pa, sa) = (primary.fetches.clone(), secondary.fetches.clone());
    let l = loader(primary, secondary);

    let started = tokio::time::Instant::now();
    let err = l.load_all().await.unwrap_err();
    match err {
        GlobeError::AllSourcesFailed {
            attempts,
            primary,
            secondary,
        } => {
            assert_eq!(attempts, 2);
            assert!(primary.to_string().contains("connection refused"));
            assert!(secondary.to_string().contains("connection refused"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(pa.get(), 2);
    assert_eq!(sa.get(), 2);
    // One backoff pause between the two attempts.
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert!(l.cached().is_none());
}

#[tokio::test(start_paused = true)]
async fn hanging_directory_times_out_and_the_other_is_served() {
    let l = loader(
        FakeDirectory::ok("a", primary_catalog()).with_delay(Duration::from_secs(120)),
        FakeDirectory::ok("b", secondary_catalog()),
    );
    let started = tokio::time::Instant::now();
    let list = l.load_all().await.unwrap();
    assert_eq!(list.len(), 3);
    assert!(list.iter().all(|c| c.origin == Origin::Secondary));
    assert!(started.elapsed() < Duration::from_secs(120));
}

#[tokio::test(start_paused = true)]
async fn cached_catalog_is_reused_until_it_expires() {
    let primary = FakeDirectory::ok("a", primary_catalog());
    let secondary = FakeDirectory::ok("b", secondary_catalog());
    let (pa, sa) = (primary.fetches.clone(), secondary.fetches.clone());
    let l = loader(primary, secondary);

    let first = l.load_all().await.unwrap();
    let second = l.load_all().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!((pa.get(), sa.get()), (1, 1));

    tokio::time::advance(Duration::from_secs(601)).await;
    assert!(l.cached().is_none());
    let third = l.load_all().await.unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!((pa.get(), sa.get()), (2, 2));

    l.invalidate();
    l.reload().await.unwrap();
    assert_eq!((pa.get(), sa.get()), (3, 3));
}

#[tokio::test(start_paused = true)]
async fn concurrent_loads_share_one_fetch() {
    let primary = FakeDirectory::ok("a", primary_catalog()).with_delay(Duration::from_secs(1));
    let secondary = FakeDirectory::ok("b", secondary_catalog()).with_delay(Duration::from_secs(1));
    let (pa, sa) = (primary.fetches.clone(), secondary.fetches.clone());
    let l = loader(primary, secondary);

    let (x, y) = tokio::join!(l.load_all(), l.load_all());
    assert!(Arc::ptr_eq(&x.unwrap(), &y.unwrap()));
    assert_eq!((pa.get(), sa.get()), (1, 1));
}

#[tokio::test(start_paused = true)]
async fn reload_during_a_load_fetches_again() {
    let primary = FakeDirectory::ok("a", primary_catalog()).with_delay(Duration::from_secs(1));
    let secondary = FakeDirectory::ok("b", secondary_catalog()).with_delay(Duration::from_secs(1));
    let (pa, sa) = (primary.fetches.clone(), secondary.fetches.clone());
    let l = loader(primary, secondary);

    // The plain load takes the gate first; the reload queues behind it.
    let (loaded, reloaded) = tokio::join!(l.load_all(), l.reload());
    let (loaded, reloaded) = (loaded.unwrap(), reloaded.unwrap());
    assert!(!Arc::ptr_eq(&loaded, &reloaded));
    assert_eq!((pa.get(), sa.get()), (2, 2));
    assert!(Arc::ptr_eq(&l.cached().unwrap(), &reloaded));
}

#[tokio::test(start_paused = true)]
async fn suggestions_come_from_cache_without_requests() {
    let primary = FakeDirectory::ok("a", primary_catalog());
    let searches = primary.searches.clone();
    let l = loader(primary, FakeDirectory::ok("b", secondary_catalog()));
    l.load_all().await.unwrap();

    assert_eq!(l.suggest("Braz").await, vec!["Brazil"]);
    assert_eq!(l.suggest("  japan ").await, vec!["Japan"]);
    assert_eq!(searches.get(), 0);
}

#[tokio::test(start_paused = true)]
async fn suggestions_fall_back_to_remote_search() {
    let primary = FakeDirectory::ok("a", Vec::new()).with_search(vec![
        primary_record("DE", "DEU", "Germany", 83_240_525),
        primary_record("DE", "DEU", "Germany", 83_240_525),
    ]);
    let searches = primary.searches.clone();
    let l = loader(primary, FakeDirectory::failing("b"));

    // Nothing loaded yet.
    assert_eq!(l.suggest("germ").await, vec!["Germany"]);
    assert_eq!(searches.get(), 1);
    assert!(l.suggest("   ").await.is_empty());
    assert_eq!(searches.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn failing_remote_search_yields_no_suggestions() {
    let l = loader(
        FakeDirectory::ok("a", Vec::new()).with_failing_search(),
        FakeDirectory::failing("b"),
    );
    assert!(l.suggest("atlantis").await.is_empty());

    let slow = loader(
        FakeDirectory::ok("a", Vec::new())
            .with_search(vec![primary_record("PT", "PRT", "Portugal", 1)])
            .with_delay(Duration::from_secs(30)),
        FakeDirectory::failing("b"),
    );
    assert!(slow.suggest("port").await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn lookup_prefers_cache_and_reports_not_found() {
    let primary = FakeDirectory::ok("a", primary_catalog())
        .with_search(vec![primary_record("PT", "PRT", "Portugal", 10_298_252)]);
    let searches = primary.searches.clone();
    let l = loader(primary, FakeDirectory::ok("b", secondary_catalog()));
    l.load_all().await.unwrap();

    assert_eq!(l.lookup("france").await.unwrap().code3, "FRA");
    assert_eq!(l.lookup("jpn").await.unwrap().name_common, "Japan");
    assert_eq!(searches.get(), 0);

    assert_eq!(l.lookup("Portugal").await.unwrap().code2, "PT");
    assert_eq!(searches.get(), 1);

    assert!(matches!(
        l.lookup("Atlantis").await,
        Err(GlobeError::NotFound(_))
    ));
    assert!(matches!(l.country("ZZ").await, Err(GlobeError::NotFound(_))));
    assert_eq!(l.country("br").await.unwrap().name_common, "Brazil");
}
