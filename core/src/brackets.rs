//! Income-bracket revenue distribution per territory.
//!
//! Eight fixed brackets, lowest to highest income. The bracket factor
//! table is distinct from the category scaling table: small and
//! low-income territories skew much more sharply here.

use crate::territory::TerritoryCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueBracketRecord {
    pub territory:      TerritoryCode,
    /// Fixed label, lowest to highest income.
    pub bracket:        String,
    pub taxpayer_count: f64,
    /// Euros per taxpayer per year.
    pub avg_tax_amount: f64,
    /// Percent.
    pub effective_rate: f64,
}

/// Canonical bracket rows: (label, taxpayers, avg tax €, effective rate %).
const BASE_BRACKETS: [(&str, f64, f64, f64); 8] = [
    ("0-10k€", 80_000.0, 0.0, 0.0),
    ("10-20k€", 65_000.0, 450.0, 3.0),
    ("20-30k€", 45_000.0, 1_200.0, 6.0),
    ("30-50k€", 30_000.0, 2_800.0, 9.5),
    ("50-70k€", 15_000.0, 5_500.0, 12.0),
    ("70-100k€", 8_000.0, 9_500.0, 15.5),
    ("100-150k€", 4_000.0, 18_500.0, 18.5),
    ("150k€+", 1_500.0, 45_000.0, 25.0),
];

/// Per-territory bracket scaling factor. A separate table from the
/// category factors: the small COMs collapse toward the bottom here.
pub fn bracket_factor(code: TerritoryCode) -> f64 {
    match code {
        TerritoryCode::Reunion => 1.0,
        TerritoryCode::Guadeloupe => 0.9,
        TerritoryCode::Martinique => 0.88,
        TerritoryCode::Guyane => 0.7,
        TerritoryCode::Mayotte => 0.6,
        TerritoryCode::Stpierre => 0.15,
        TerritoryCode::Stbarth => 0.2,
        TerritoryCode::Stmartin => 0.3,
        TerritoryCode::Wallis => 0.12,
        TerritoryCode::Polynesie => 0.8,
        TerritoryCode::Caledonie => 0.85,
    }
}

/// Build the eight bracket records for one territory. Pure and
/// deterministic; no time dimension, no randomness.
pub fn revenue_brackets(territory: TerritoryCode) -> Vec<RevenueBracketRecord> {
    let factor = bracket_factor(territory);

    BASE_BRACKETS
        .iter()
        .map(|(bracket, taxpayers, avg_tax, rate)| RevenueBracketRecord {
            territory,
            bracket: bracket.to_string(),
            taxpayer_count: taxpayers * factor,
            avg_tax_amount: avg_tax * factor,
            effective_rate: rate * factor,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_eight_brackets_in_income_order() {
        for territory in TerritoryCode::ALL {
            let brackets = revenue_brackets(territory);
            assert_eq!(brackets.len(), 8, "{territory}");
            assert_eq!(brackets[0].bracket, "0-10k€");
            assert_eq!(brackets[7].bracket, "150k€+");
        }
    }

    #[test]
    fn every_field_scales_by_the_bracket_factor() {
        let reference = revenue_brackets(TerritoryCode::Reunion); // factor 1.0
        let scaled = revenue_brackets(TerritoryCode::Wallis); // factor 0.12

        for (base, other) in reference.iter().zip(&scaled) {
            assert_eq!(other.taxpayer_count, base.taxpayer_count * 0.12, "{}", base.bracket);
            assert_eq!(other.avg_tax_amount, base.avg_tax_amount * 0.12, "{}", base.bracket);
            assert_eq!(other.effective_rate, base.effective_rate * 0.12, "{}", base.bracket);
        }
    }

    #[test]
    fn bracket_factors_differ_from_category_factors() {
        use crate::category::scaling_factor;
        // The two tables deliberately diverge for the small COMs.
        assert_ne!(bracket_factor(TerritoryCode::Stpierre), scaling_factor(TerritoryCode::Stpierre));
        assert_ne!(bracket_factor(TerritoryCode::Stbarth), scaling_factor(TerritoryCode::Stbarth));
        assert_ne!(bracket_factor(TerritoryCode::Wallis), scaling_factor(TerritoryCode::Wallis));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = serde_json::to_string(&revenue_brackets(TerritoryCode::Mayotte)).unwrap();
        let b = serde_json::to_string(&revenue_brackets(TerritoryCode::Mayotte)).unwrap();
        assert_eq!(a, b);
    }
}
