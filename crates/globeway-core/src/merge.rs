// crates/globeway-core/src/merge.rs
//! # Reconciliation
//!
//! Turns the settled outcomes of the two directory calls into one
//! catalog. The primary directory is always the base, whichever call
//! finished first.

use crate::config::Membership;
use crate::error::{GlobeError, Result};
use crate::model::{CountryRecord, Origin};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Drop records whose merge key was already seen; the first one wins.
pub fn dedupe_by_code(records: Vec<CountryRecord>, provider: &str) -> Vec<CountryRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let before = records.len();
    let out: Vec<CountryRecord> = records
        .into_iter()
        .filter(|r| seen.insert(r.merge_key().to_owned()))
        .collect();
    if out.len() < before {
        debug!(
            provider,
            duplicates = before - out.len(),
            "collapsed duplicate country codes"
        );
    }
    out
}

fn fill_opt<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
    if dst.is_none() {
        dst.clone_from(src);
    }
}

fn fill_vec<T: Clone>(dst: &mut Vec<T>, src: &[T]) {
    if dst.is_empty() {
        dst.extend_from_slice(src);
    }
}

/// Copy into `base` every field it lacks and `extra` has. Fields `base`
/// already carries are never overwritten.
pub fn fill_missing(base: &mut CountryRecord, extra: &CountryRecord) {
    fill_opt(&mut base.name_native, &extra.name_native);
    fill_opt(&mut base.region, &extra.region);
    fill_opt(&mut base.subregion, &extra.subregion);
    fill_opt(&mut base.area, &extra.area);
    fill_opt(&mut base.population, &extra.population);
    fill_opt(&mut base.emoji, &extra.emoji);
    fill_opt(&mut base.calling_code, &extra.calling_code);
    fill_vec(&mut base.continents, &extra.continents);
    fill_vec(&mut base.capital, &extra.capital);
    fill_vec(&mut base.timezones, &extra.timezones);
    fill_vec(&mut base.tld, &extra.tld);
    fill_vec(&mut base.subdivision_names, &extra.subdivision_names);
    if base.languages.is_empty() {
        base.languages.clone_from(&extra.languages);
    }
    if base.currencies.is_empty() {
        base.currencies.clone_from(&extra.currencies);
    }
    base.origin = Origin::Merged;
}

/// Merge two successful catalogs.
///
/// Each primary record is completed from the secondary record with the
/// same alpha-2 code. Secondary records with no primary counterpart are
/// dropped under [`Membership::PrimaryOnly`] and appended (in their
/// original order) under [`Membership::Union`].
pub fn merge_catalogs(
    primary: Vec<CountryRecord>,
    secondary: Vec<CountryRecord>,
    membership: Membership,
) -> Vec<CountryRecord> {
    let primary = dedupe_by_code(primary, "primary");
    let secondary = dedupe_by_code(secondary, "secondary");

    let index: HashMap<&str, usize> = secondary
        .iter()
        .enumerate()
        .map(|(i, r)| (r.merge_key(), i))
        .collect();
    let mut matched = vec![false; secondary.len()];

    let mut out: Vec<CountryRecord> = primary
        .into_iter()
        .map(|mut rec| {
            if let Some(&i) = index.get(rec.merge_key()) {
                fill_missing(&mut rec, &secondary[i]);
                matched[i] = true;
            }
            rec
        })
        .collect();

    let merged = out.iter().filter(|r| r.origin == Origin::Merged).count();
    let unmatched = matched.iter().filter(|m| !**m).count();
    match membership {
        Membership::PrimaryOnly => {
            if unmatched > 0 {
                debug!(unmatched, "dropping secondary-only records");
            }
        }
        Membership::Union => {
            out.extend(
                secondary
                    .iter()
                    .zip(&matched)
                    .filter(|(_, m)| !**m)
                    .map(|(r, _)| r.clone()),
            );
        }
    }
    info!(total = out.len(), merged, unmatched, "catalogs merged");
    out
}

/// Settle both outcomes into one catalog.
///
/// - both succeeded: [`merge_catalogs`]
/// - one succeeded: that catalog alone, other-directory fields unknown
/// - both failed: [`GlobeError::AllSourcesFailed`] with both causes
pub fn reconcile(
    primary: Result<Vec<CountryRecord>>,
    secondary: Result<Vec<CountryRecord>>,
    membership: Membership,
    attempt: u32,
) -> Result<Vec<CountryRecord>> {
    match (primary, secondary) {
        (Ok(p), Ok(s)) => Ok(merge_catalogs(p, s, membership)),
        (Ok(p), Err(e)) => {
            warn!(error = %e, "secondary directory failed, serving primary data only");
            Ok(dedupe_by_code(p, "primary"))
        }
        (Err(e), Ok(s)) => {
            warn!(error = %e, "primary directory failed, serving secondary data only");
            Ok(dedupe_by_code(s, "secondary"))
        }
        (Err(pe), Err(se)) => Err(GlobeError::AllSourcesFailed {
            attempts: attempt,
            primary: Box::new(pe),
            secondary: Box::new(se),
        }),
    }
}
