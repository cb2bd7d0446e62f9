//! Territory catalog — static reference data for the eleven DROM-COM
//! territories.
//!
//! The catalog is a constant table: no inputs, no failure modes, never
//! mutated at runtime. Figures are illustrative orders of magnitude, not
//! statutory statistics.

use crate::error::FiscalError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of territory codes. Unknown codes cannot exist past the
/// string boundary: parsing is the only way in, and it fails loudly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerritoryCode {
    Reunion,
    Guadeloupe,
    Martinique,
    Guyane,
    Mayotte,
    Stpierre,
    Stbarth,
    Stmartin,
    Wallis,
    Polynesie,
    Caledonie,
}

impl TerritoryCode {
    pub const ALL: [TerritoryCode; 11] = [
        Self::Reunion,
        Self::Guadeloupe,
        Self::Martinique,
        Self::Guyane,
        Self::Mayotte,
        Self::Stpierre,
        Self::Stbarth,
        Self::Stmartin,
        Self::Wallis,
        Self::Polynesie,
        Self::Caledonie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reunion => "REUNION",
            Self::Guadeloupe => "GUADELOUPE",
            Self::Martinique => "MARTINIQUE",
            Self::Guyane => "GUYANE",
            Self::Mayotte => "MAYOTTE",
            Self::Stpierre => "STPIERRE",
            Self::Stbarth => "STBARTH",
            Self::Stmartin => "STMARTIN",
            Self::Wallis => "WALLIS",
            Self::Polynesie => "POLYNESIE",
            Self::Caledonie => "CALEDONIE",
        }
    }

    /// Stable index used to key per-territory RNG streams.
    /// NEVER reorder — derived seeds depend on it.
    pub fn index(&self) -> u64 {
        *self as u64
    }
}

impl fmt::Display for TerritoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerritoryCode {
    type Err = FiscalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| FiscalError::UnknownTerritory { code: s.to_string() })
    }
}

/// The two administrative classes of overseas territory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminType {
    /// Département et région d'outre-mer.
    Drom,
    /// Collectivité d'outre-mer.
    Com,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Xpf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Territory {
    pub code:            TerritoryCode,
    pub name:            String,
    pub admin_type:      AdminType,
    pub population:      u64,
    /// Square kilometres.
    pub area_km2:        u64,
    /// Billions of euros (equivalent for XPF territories).
    pub gdp_billions:    f64,
    pub currency:        Currency,
    pub active:          bool,
    /// Millions of euros per year.
    pub total_revenue:   f64,
    /// Euros per inhabitant per year.
    pub revenue_per_capita: f64,
    /// Percent.
    pub avg_tax_rate:    f64,
}

/// The full territory catalog, keyed by code. Covers exactly the eleven
/// defined codes; pure and constant.
pub fn catalog() -> BTreeMap<TerritoryCode, Territory> {
    use TerritoryCode::*;

    let rows = [
        (Reunion, "La Réunion", AdminType::Drom, 860_000, 2_511, 19.8, Currency::Eur, true, 2_800.0, 3_256.0, 28.5),
        (Guadeloupe, "Guadeloupe", AdminType::Drom, 384_000, 1_628, 9.1, Currency::Eur, true, 1_250.0, 3_255.0, 27.8),
        (Martinique, "Martinique", AdminType::Drom, 376_000, 1_128, 8.9, Currency::Eur, true, 1_220.0, 3_245.0, 27.5),
        (Guyane, "Guyane", AdminType::Drom, 290_000, 83_534, 4.8, Currency::Eur, true, 680.0, 2_345.0, 24.2),
        (Mayotte, "Mayotte", AdminType::Drom, 270_000, 374, 2.4, Currency::Eur, true, 420.0, 1_556.0, 22.1),
        (Stpierre, "Saint-Pierre-et-Miquelon", AdminType::Com, 6_000, 242, 0.2, Currency::Eur, true, 45.0, 7_500.0, 32.5),
        (Stbarth, "Saint-Barthélemy", AdminType::Com, 10_000, 21, 0.6, Currency::Eur, true, 85.0, 8_500.0, 35.2),
        (Stmartin, "Saint-Martin", AdminType::Com, 32_000, 54, 0.9, Currency::Eur, true, 120.0, 3_750.0, 29.8),
        (Wallis, "Wallis-et-Futuna", AdminType::Com, 11_500, 142, 0.2, Currency::Xpf, true, 25.0, 2_174.0, 26.5),
        (Polynesie, "Polynésie française", AdminType::Com, 280_000, 4_167, 7.2, Currency::Xpf, true, 980.0, 3_500.0, 28.9),
        (Caledonie, "Nouvelle-Calédonie", AdminType::Com, 271_000, 18_575, 9.7, Currency::Xpf, true, 1_100.0, 4_059.0, 30.2),
    ];

    rows.into_iter()
        .map(|(code, name, admin_type, population, area_km2, gdp_billions, currency, active, total_revenue, revenue_per_capita, avg_tax_rate)| {
            (
                code,
                Territory {
                    code,
                    name: name.to_string(),
                    admin_type,
                    population,
                    area_km2,
                    gdp_billions,
                    currency,
                    active,
                    total_revenue,
                    revenue_per_capita,
                    avg_tax_rate,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_all_eleven_codes() {
        let map = catalog();
        assert_eq!(map.len(), 11);
        for code in TerritoryCode::ALL {
            assert!(map.contains_key(&code), "missing {code}");
        }
    }

    #[test]
    fn codes_round_trip_through_strings() {
        for code in TerritoryCode::ALL {
            let parsed: TerritoryCode = code.as_str().parse().unwrap();
            assert_eq!(parsed, code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "ATLANTIS".parse::<TerritoryCode>().unwrap_err();
        assert!(matches!(
            err,
            FiscalError::UnknownTerritory { ref code } if code == "ATLANTIS"
        ));
    }

    #[test]
    fn catalog_guarantees_positive_gdp_and_population() {
        for t in catalog().values() {
            assert!(t.gdp_billions > 0.0, "{}: gdp", t.code);
            assert!(t.population > 0, "{}: population", t.code);
        }
    }

    #[test]
    fn catalog_is_stable_across_calls() {
        let a = serde_json::to_string(&catalog()).unwrap();
        let b = serde_json::to_string(&catalog()).unwrap();
        assert_eq!(a, b);
    }
}
