// crates/globeway-core/src/format.rs
//! Display helpers shared by every consumer of the catalog.
//!
//! The language is never read from global state: callers pass a
//! [`DisplayOptions`] explicitly.

use crate::economy::{Indicator, IndicatorReading, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    fn decimal_sep(self) -> char {
        match self {
            Language::En => '.',
            Language::Pt => ',',
        }
    }

    fn group_sep(self) -> char {
        match self {
            Language::En => ',',
            Language::Pt => '.',
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Language::En),
            "pt" | "pt-br" | "portuguese" => Ok(Language::Pt),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::En => "en",
            Language::Pt => "pt",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub language: Language,
}

impl DisplayOptions {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

pub fn not_available(opts: &DisplayOptions) -> &'static str {
    match opts.language {
        Language::En => "Not available",
        Language::Pt => "Não disponível",
    }
}

pub fn economic_data_unavailable(opts: &DisplayOptions) -> &'static str {
    match opts.language {
        Language::En => "Economic data unavailable",
        Language::Pt => "Dados econômicos indisponíveis",
    }
}

/// Human label of an indicator.
pub fn indicator_label(indicator: Indicator, opts: &DisplayOptions) -> &'static str {
    use Indicator::*;
    match (opts.language, indicator) {
        (Language::En, GdpTotal) => "GDP",
        (Language::En, GdpPerCapita) => "GDP per capita",
        (Language::En, GdpGrowth) => "GDP growth",
        (Language::En, Inflation) => "Inflation",
        (Language::En, Unemployment) => "Unemployment",
        (Language::En, Gini) => "Gini index",
        (Language::En, LifeExpectancy) => "Life expectancy",
        (Language::En, Literacy) => "Literacy rate",
        (Language::En, Urbanization) => "Urban population",
        (Language::Pt, GdpTotal) => "PIB",
        (Language::Pt, GdpPerCapita) => "PIB per capita",
        (Language::Pt, GdpGrowth) => "Crescimento do PIB",
        (Language::Pt, Inflation) => "Inflação",
        (Language::Pt, Unemployment) => "Desemprego",
        (Language::Pt, Gini) => "Índice de Gini",
        (Language::Pt, LifeExpectancy) => "Expectativa de vida",
        (Language::Pt, Literacy) => "Taxa de alfabetização",
        (Language::Pt, Urbanization) => "População urbana",
    }
}

/// `1234567` -> `1,234,567` (en) or `1.234.567` (pt).
pub fn group_thousands(n: u64, opts: &DisplayOptions) -> String {
    let digits = n.to_string();
    let sep = opts.language.group_sep();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Fixed-point with grouping and the language's decimal separator.
pub fn format_decimal(value: f64, decimals: usize, opts: &DisplayOptions) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::new();
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part.parse().unwrap_or(0), opts));
    if let Some(frac) = frac_part {
        out.push(opts.language.decimal_sep());
        out.push_str(frac);
    }
    out
}

pub fn format_count(value: Option<u64>, opts: &DisplayOptions) -> String {
    match value {
        Some(n) => group_thousands(n, opts),
        None => not_available(opts).to_owned(),
    }
}

pub fn format_area(value: Option<f64>, opts: &DisplayOptions) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(km2) => format!("{} km²", format_decimal(km2, 0, opts)),
        None => not_available(opts).to_owned(),
    }
}

pub fn format_list(items: &[String], opts: &DisplayOptions) -> String {
    if items.is_empty() {
        not_available(opts).to_owned()
    } else {
        items.join(", ")
    }
}

/// `$1.23 T`, `$845.00 B`, `$12,345`.
fn format_usd(value: f64, opts: &DisplayOptions) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (value / 1e12, " T")
    } else if abs >= 1e9 {
        (value / 1e9, " B")
    } else if abs >= 1e6 {
        (value / 1e6, " M")
    } else {
        return format!("${}", format_decimal(value, 0, opts));
    };
    format!("${}{}", format_decimal(scaled, 2, opts), suffix)
}

/// Display string of an indicator reading; absent readings render as
/// "not available", a real zero renders as zero.
pub fn format_reading(
    indicator: Indicator,
    reading: Option<&IndicatorReading>,
    opts: &DisplayOptions,
) -> String {
    let Some(reading) = reading.filter(|r| r.value.is_finite()) else {
        return not_available(opts).to_owned();
    };
    let value = match indicator.unit() {
        Unit::Usd => format_usd(reading.value, opts),
        Unit::Percent => format!("{}%", format_decimal(reading.value, 2, opts)),
        Unit::Years => {
            let unit = match opts.language {
                Language::En => "years",
                Language::Pt => "anos",
            };
            format!("{} {unit}", format_decimal(reading.value, 1, opts))
        }
        Unit::Index => format_decimal(reading.value, 1, opts),
    };
    format!("{value} ({})", reading.period)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: DisplayOptions = DisplayOptions {
        language: Language::En,
    };
    const PT: DisplayOptions = DisplayOptions {
        language: Language::Pt,
    };

    #[test]
    fn grouping_follows_language() {
        assert_eq!(group_thousands(0, &EN), "0");
        assert_eq!(group_thousands(999, &EN), "999");
        assert_eq!(group_thousands(1_234_567, &EN), "1,234,567");
        assert_eq!(group_thousands(1_234_567, &PT), "1.234.567");
        assert_eq!(format_decimal(-1234.5, 2, &PT), "-1.234,50");
    }

    #[test]
    fn missing_values_say_not_available() {
        assert_eq!(format_count(None, &EN), "Not available");
        assert_eq!(format_area(None, &PT), "Não disponível");
        assert_eq!(format_list(&[], &EN), "Not available");
        assert_eq!(format_reading(Indicator::Gini, None, &EN), "Not available");
    }

    #[test]
    fn zero_is_a_value() {
        assert_eq!(format_count(Some(0), &EN), "0");
        let zero = IndicatorReading {
            value: 0.0,
            period: 2022,
        };
        assert_eq!(
            format_reading(Indicator::GdpGrowth, Some(&zero), &EN),
            "0.00% (2022)"
        );
    }

    #[test]
    fn readings_use_their_unit() {
        let gdp = IndicatorReading {
            value: 1.92e12,
            period: 2022,
        };
        assert_eq!(
            format_reading(Indicator::GdpTotal, Some(&gdp), &EN),
            "$1.92 T (2022)"
        );
        let life = IndicatorReading {
            value: 75.34,
            period: 2021,
        };
        assert_eq!(
            format_reading(Indicator::LifeExpectancy, Some(&life), &PT),
            "75,3 anos (2021)"
        );
    }

    #[test]
    fn language_parses_common_spellings() {
        assert_eq!("PT-BR".parse::<Language>(), Ok(Language::Pt));
        assert!("fr".parse::<Language>().is_err());
    }
}
