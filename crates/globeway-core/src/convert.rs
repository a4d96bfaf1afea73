// crates/globeway-core/src/convert.rs
//! One explicit mapping per upstream shape, each producing the single
//! normalized type. The merge step never sees provider payloads.

use crate::economy::{Indicator, Observation};
use crate::error::{GlobeError, Result};
use crate::model::{flagcdn_urls, CountryRecord, Currency, Origin};
use crate::raw::{
    GraphQlCountriesData, GraphQlCountryRaw, GraphQlEnvelope, RestCountryRaw, RestExtrasRaw,
    RestIddRaw, WbMessageRaw, WbObservationRaw,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub const PRIMARY_PROVIDER: &str = "restcountries";
pub const SECONDARY_PROVIDER: &str = "countries-graphql";
pub const STATS_PROVIDER: &str = "worldbank";

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn split_codes(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|c| !c.is_empty())
}

// -----------------------------------------------------------------------------
// Primary directory
// -----------------------------------------------------------------------------

/// Primary record -> normalized. `None` when the record has no alpha-2
/// code or no name, which makes it unusable as a catalog entry.
pub fn from_primary(raw: RestCountryRaw) -> Option<CountryRecord> {
    let code2 = non_empty(raw.cca2)?;
    let name = non_empty(Some(raw.name.common))?;
    let code3 = non_empty(raw.cca3).unwrap_or_default();

    let mut rec = CountryRecord::new(&code2, &code3, &name, Origin::Primary);
    if let Some(official) = non_empty(raw.name.official) {
        rec.name_official = official;
    }
    // BTreeMap order keeps the choice stable between loads.
    rec.name_native = raw
        .name
        .native_name
        .into_values()
        .find_map(|n| non_empty(n.common).or_else(|| non_empty(n.official)));

    if let Some(flags) = raw.flags {
        let (svg, png) = flagcdn_urls(&rec.code2);
        rec.flag_image_url = non_empty(flags.svg).unwrap_or(svg);
        rec.flag_image_url_fallback = non_empty(flags.png).unwrap_or(png);
    }
    rec.emoji = non_empty(raw.flag);
    rec.capital = raw.capital.into_iter().filter_map(|c| non_empty(Some(c))).collect();
    rec.region = non_empty(raw.region);
    rec.subregion = non_empty(raw.subregion);
    rec.continents = raw.continents;
    rec.population = raw.population;
    rec.area = raw.area.filter(|a| a.is_finite() && *a >= 0.0);
    rec.timezones = raw.timezones;
    rec.languages = raw.languages;
    rec.currencies = raw
        .currencies
        .into_iter()
        .map(|(code, c)| {
            (
                code,
                Currency {
                    name: non_empty(c.name),
                    symbol: non_empty(c.symbol),
                },
            )
        })
        .collect();
    rec.tld = raw.tld;
    rec.calling_code = raw.idd.and_then(calling_code);
    Some(rec)
}

/// `+5` and a single suffix `5` give `+55`; several suffixes keep the root.
fn calling_code(idd: RestIddRaw) -> Option<String> {
    let root = non_empty(idd.root)?;
    Some(match idd.suffixes.as_slice() {
        [single] => format!("{root}{}", single.trim()),
        _ => root,
    })
}

/// Parse a primary directory response body (a JSON array).
pub fn primary_from_json(body: &str) -> Result<Vec<CountryRecord>> {
    let raw: Vec<RestCountryRaw> = serde_json::from_str(body)?;
    let total = raw.len();
    let records: Vec<CountryRecord> = raw.into_iter().filter_map(from_primary).collect();
    if records.len() < total {
        debug!(
            provider = PRIMARY_PROVIDER,
            skipped = total - records.len(),
            "skipped records without code or name"
        );
    }
    Ok(records)
}

/// Fill `records` from a second catalog response carrying the extra
/// fields, matched by alpha-2 code. Values already present are kept.
/// Returns how many records were completed.
pub fn attach_primary_extras(records: &mut [CountryRecord], body: &str) -> Result<usize> {
    let raw: Vec<RestExtrasRaw> = serde_json::from_str(body)?;
    let mut extras: HashMap<String, RestExtrasRaw> = raw
        .into_iter()
        .filter_map(|e| {
            let code = non_empty(e.cca2.clone())?.to_ascii_uppercase();
            Some((code, e))
        })
        .collect();

    let mut completed = 0;
    for rec in records.iter_mut() {
        let Some(extra) = extras.remove(&rec.code2) else {
            continue;
        };
        if rec.emoji.is_none() {
            rec.emoji = non_empty(extra.flag);
        }
        if rec.continents.is_empty() {
            rec.continents = extra.continents;
        }
        if rec.area.is_none() {
            rec.area = extra.area.filter(|a| a.is_finite() && *a >= 0.0);
        }
        if rec.timezones.is_empty() {
            rec.timezones = extra.timezones;
        }
        if rec.tld.is_empty() {
            rec.tld = extra.tld;
        }
        if rec.calling_code.is_none() {
            rec.calling_code = extra.idd.and_then(calling_code);
        }
        completed += 1;
    }
    Ok(completed)
}

// -----------------------------------------------------------------------------
// Secondary directory
// -----------------------------------------------------------------------------

pub fn from_secondary(raw: GraphQlCountryRaw) -> Option<CountryRecord> {
    let code2 = non_empty(Some(raw.code))?;
    let name = non_empty(Some(raw.name))?;

    let mut rec = CountryRecord::new(&code2, "", &name, Origin::Secondary);
    rec.name_native = non_empty(raw.native);
    rec.capital = non_empty(raw.capital).into_iter().collect();
    rec.emoji = non_empty(raw.emoji);
    if let Some(continent) = raw.continent.and_then(|c| non_empty(c.name)) {
        rec.region = Some(continent.clone());
        rec.continents = vec![continent];
    }
    rec.languages = raw
        .languages
        .into_iter()
        .filter_map(|l| {
            let code = non_empty(l.code)?;
            let name = non_empty(l.name).unwrap_or_else(|| code.clone());
            Some((code, name))
        })
        .collect();
    if let Some(currency) = raw.currency {
        rec.currencies = split_codes(&currency)
            .map(|c| (c.to_owned(), Currency::default()))
            .collect();
    }
    if let Some(phone) = raw.phone {
        let codes: Vec<String> = split_codes(&phone).map(|p| format!("+{p}")).collect();
        if !codes.is_empty() {
            rec.calling_code = Some(codes.join(", "));
        }
    }
    rec.subdivision_names = raw
        .states
        .into_iter()
        .filter_map(|s| non_empty(s.name))
        .collect();
    Some(rec)
}

/// Parse a secondary directory GraphQL response.
///
/// # Errors
/// [`GlobeError::Upstream`] when the response carries `errors` and no
/// `data`; partial data with errors is accepted.
pub fn secondary_from_json(body: &str) -> Result<Vec<CountryRecord>> {
    let envelope: GraphQlEnvelope<GraphQlCountriesData> = serde_json::from_str(body)?;
    match envelope.data {
        Some(data) => {
            if !envelope.errors.is_empty() {
                debug!(
                    provider = SECONDARY_PROVIDER,
                    errors = envelope.errors.len(),
                    "partial GraphQL response"
                );
            }
            Ok(data.countries.into_iter().filter_map(from_secondary).collect())
        }
        None if !envelope.errors.is_empty() => Err(GlobeError::Upstream {
            provider: SECONDARY_PROVIDER,
            message: envelope
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
        }),
        None => Err(GlobeError::InvalidData(
            "GraphQL response without data".into(),
        )),
    }
}

// -----------------------------------------------------------------------------
// Statistics directory
// -----------------------------------------------------------------------------

/// Raw observation -> normalized. Unknown indicators and unparsable
/// periods are dropped.
pub fn from_worldbank(raw: WbObservationRaw) -> Option<Observation> {
    Some(Observation {
        indicator: Indicator::from_code(&raw.indicator.id)?,
        period: raw.date.trim().parse().ok()?,
        value: raw.value,
    })
}

/// Parse a World Bank response: `[meta, observations]`.
///
/// `[meta, null]` (no data for the window) is an empty result; a
/// `[{"message": [...]}]` payload is an upstream error.
pub fn observations_from_json(body: &str) -> Result<Vec<Observation>> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Array(mut parts) = value else {
        return Err(GlobeError::InvalidData(
            "statistics response is not an array".into(),
        ));
    };

    if let Some(messages) = parts.first().and_then(|meta| meta.get("message")) {
        let messages: Vec<WbMessageRaw> = serde_json::from_value(messages.clone())?;
        let message = messages
            .into_iter()
            .map(|m| {
                let id = m.id.unwrap_or_default();
                let text = m.value.or(m.key).unwrap_or_default();
                format!("{id} {text}").trim().to_owned()
            })
            .collect::<Vec<_>>()
            .join("; ");
        return Err(GlobeError::Upstream {
            provider: STATS_PROVIDER,
            message,
        });
    }

    match parts.len() {
        2 => match parts.swap_remove(1) {
            Value::Null => Ok(Vec::new()),
            list => {
                let raw: Vec<WbObservationRaw> = serde_json::from_value(list)?;
                Ok(raw.into_iter().filter_map(from_worldbank).collect())
            }
        },
        n => Err(GlobeError::InvalidData(format!(
            "statistics response has {n} elements, expected 2"
        ))),
    }
}
