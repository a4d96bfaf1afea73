// crates/globeway-core/src/raw.rs
//! Wire shapes of the three upstream directories.
//!
//! These mirror the external payloads and are converted into the
//! normalized model by [`crate::convert`]; nothing outside the crate
//! should depend on them.
use serde::Deserialize;
use std::collections::BTreeMap;

// -----------------------------------------------------------------------------
// Primary directory (REST, restcountries v3.1)
// -----------------------------------------------------------------------------

/// `{"common": "Brazil", "official": "Federative Republic of Brazil", "nativeName": {...}}`
#[derive(Debug, Deserialize)]
pub struct RestNameRaw {
    pub common: String,
    #[serde(default)]
    pub official: Option<String>,
    #[serde(rename = "nativeName", default)]
    pub native_name: BTreeMap<String, RestNativeNameRaw>,
}

#[derive(Debug, Deserialize)]
pub struct RestNativeNameRaw {
    #[serde(default)]
    pub official: Option<String>,
    #[serde(default)]
    pub common: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RestFlagsRaw {
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub svg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestCurrencyRaw {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// International direct dialing: `{"root": "+5", "suffixes": ["5"]}`
#[derive(Debug, Default, Deserialize)]
pub struct RestIddRaw {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

/// One element of the `/all` or `/name/{term}` array.
///
/// Every field except the name is optional because the directory only
/// returns what the `fields` query parameter asked for.
#[derive(Debug, Deserialize)]
pub struct RestCountryRaw {
    pub name: RestNameRaw,
    #[serde(default)]
    pub cca2: Option<String>,
    #[serde(default)]
    pub cca3: Option<String>,
    #[serde(default)]
    pub flags: Option<RestFlagsRaw>,
    /// Emoji flag.
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub continents: Vec<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, RestCurrencyRaw>,
    #[serde(default)]
    pub tld: Vec<String>,
    #[serde(default)]
    pub idd: Option<RestIddRaw>,
}

/// Second half of a catalog row: the fields that do not fit in the
/// directory's per-request field limit next to the core ones.
#[derive(Debug, Deserialize)]
pub struct RestExtrasRaw {
    #[serde(default)]
    pub cca2: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub continents: Vec<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub tld: Vec<String>,
    #[serde(default)]
    pub idd: Option<RestIddRaw>,
}

// -----------------------------------------------------------------------------
// Secondary directory (GraphQL, countries.trevorblades.com)
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GraphQlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorRaw>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorRaw {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlCountriesData {
    #[serde(default)]
    pub countries: Vec<GraphQlCountryRaw>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlNamedRaw {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlCountryRaw {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub native: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    /// Comma-separated codes, e.g. `"USD,USN,USS"`.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub continent: Option<GraphQlNamedRaw>,
    #[serde(default)]
    pub languages: Vec<GraphQlNamedRaw>,
    /// Comma-separated calling codes without `+`, e.g. `"1"` or `"7,8"`.
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub states: Vec<GraphQlNamedRaw>,
}

// -----------------------------------------------------------------------------
// Statistics directory (World Bank indicators v2)
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WbRefRaw {
    pub id: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// One observation from the second element of the response array.
#[derive(Debug, Deserialize)]
pub struct WbObservationRaw {
    pub indicator: WbRefRaw,
    pub date: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Error payload: `[{"message": [{"id": "120", "key": "Invalid value", "value": "..."}]}]`
#[derive(Debug, Deserialize)]
pub struct WbMessageRaw {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}
