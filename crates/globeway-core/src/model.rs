// crates/globeway-core/src/model.rs
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which directory a record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Only the primary (REST) directory knew this country.
    Primary,
    /// Only the secondary (GraphQL) directory knew this country.
    Secondary,
    /// Primary record completed with fields from the secondary one.
    Merged,
}

/// A currency entry. Both parts are optional because the secondary
/// directory only lists currency codes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// A country as seen by the rest of the application, whichever
/// directory (or both) supplied it.
///
/// Absent data is `None` or empty, never a zero placeholder: a
/// `population` of `Some(0)` is a value some directory actually reported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-2, upper case.
    pub code2: String,
    /// ISO 3166-1 alpha-3, upper case. Same as `code2` when only the
    /// secondary directory supplied this record.
    pub code3: String,

    pub name_common: String,
    pub name_official: String,
    pub name_native: Option<String>,

    pub region: Option<String>,
    pub subregion: Option<String>,
    pub continents: Vec<String>,
    pub capital: Vec<String>,
    /// km²
    pub area: Option<f64>,
    pub timezones: Vec<String>,
    pub population: Option<u64>,

    pub languages: BTreeMap<String, String>,
    pub currencies: BTreeMap<String, Currency>,
    pub tld: Vec<String>,

    pub flag_image_url: String,
    pub flag_image_url_fallback: String,

    pub emoji: Option<String>,
    pub calling_code: Option<String>,
    pub subdivision_names: Vec<String>,

    pub origin: Origin,
}

impl CountryRecord {
    /// A record with identity and names set and everything else unknown.
    pub fn new(code2: &str, code3: &str, name: &str, origin: Origin) -> Self {
        let code2 = code2.trim().to_ascii_uppercase();
        let code3 = match code3.trim() {
            "" => code2.clone(),
            c => c.to_ascii_uppercase(),
        };
        let (flag_image_url, flag_image_url_fallback) = flagcdn_urls(&code2);
        Self {
            code2,
            code3,
            name_common: name.trim().to_owned(),
            name_official: name.trim().to_owned(),
            name_native: None,
            region: None,
            subregion: None,
            continents: Vec::new(),
            capital: Vec::new(),
            area: None,
            timezones: Vec::new(),
            population: None,
            languages: BTreeMap::new(),
            currencies: BTreeMap::new(),
            tld: Vec::new(),
            flag_image_url,
            flag_image_url_fallback,
            emoji: None,
            calling_code: None,
            subdivision_names: Vec::new(),
            origin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name_common
    }

    /// Native name, or the common name when no directory supplied one.
    pub fn native_name(&self) -> &str {
        self.name_native.as_deref().unwrap_or(&self.name_common)
    }

    pub fn capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or("")
    }

    /// Merge key used to pair records across directories.
    pub fn merge_key(&self) -> &str {
        &self.code2
    }
}

impl NameMatch for CountryRecord {
    fn name_str(&self) -> &str {
        &self.name_common
    }

    fn alt_names(&self) -> Vec<&str> {
        let mut out = vec![self.name_official.as_str()];
        if let Some(native) = &self.name_native {
            out.push(native);
        }
        out
    }
}

/// Flag image URLs on flagcdn for a given alpha-2 code: `(svg, png)`.
pub fn flagcdn_urls(code2: &str) -> (String, String) {
    let lower = code2.to_ascii_lowercase();
    (
        format!("https://flagcdn.com/{lower}.svg"),
        format!("https://flagcdn.com/w320/{lower}.png"),
    )
}

/// Simple aggregate statistics over a loaded catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub countries: usize,
    pub merged: usize,
    pub primary_only: usize,
    pub secondary_only: usize,
    pub regions: usize,
    pub with_population: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_normalizes_codes() {
        let rec = CountryRecord::new(" br", "", "Brazil", Origin::Secondary);
        assert_eq!(rec.code2, "BR");
        assert_eq!(rec.code3, "BR");
        assert_eq!(rec.flag_image_url, "https://flagcdn.com/br.svg");
        assert_eq!(rec.flag_image_url_fallback, "https://flagcdn.com/w320/br.png");
        assert_eq!(rec.population, None);
    }

    #[test]
    fn native_name_falls_back_to_common() {
        let mut rec = CountryRecord::new("DE", "DEU", "Germany", Origin::Primary);
        assert_eq!(rec.native_name(), "Germany");
        rec.name_native = Some("Deutschland".into());
        assert_eq!(rec.native_name(), "Deutschland");
        assert!(rec.is_named("deutschland"));
    }
}
