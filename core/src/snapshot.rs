//! Current snapshot generator — the "as of now" record set, derived from
//! each category's last historical row.
//!
//! RULE: the monthly amount is clamped to REVENUE_FLOOR at generation
//! time. Downstream code may assume it is strictly positive; nothing
//! detects violations after the fact because none can be produced.

use crate::{
    category::{CategoryCode, TaxCategory, TaxClass},
    error::{FiscalError, FiscalResult},
    history::{last_record_for, HistoricalRecord},
    rng::StreamRng,
    territory::TerritoryCode,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Smallest monthly amount a snapshot row may carry, in millions of euros.
pub const REVENUE_FLOOR: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentRecord {
    pub territory:       TerritoryCode,
    pub category:        CategoryCode,
    pub full_name:       String,
    pub tax_class:       TaxClass,
    /// Millions of euros. Always >= REVENUE_FLOOR.
    pub monthly_amount:  f64,
    /// Percent change versus the last historical month.
    pub change_pct:      f64,
    /// Millions of euros change versus the last historical month.
    pub change_abs:      f64,
    /// Always >= 1.
    pub taxpayers:       f64,
    /// Millions of euros: the mensualised base with mild noise.
    pub avg_monthly_amount: f64,
    pub weight_pct:      f64,
    /// Millions of euros: trailing-year revenue estimate.
    pub trailing_year_amount: f64,
    pub avg_rate_pct:    f64,
    pub cap_amount:      f64,
}

/// Derive one CurrentRecord per category from the last historical row.
///
/// The historical generator guarantees a non-empty series per category;
/// a missing series here is a broken precondition and fails loudly
/// rather than producing a NaN or zero row.
pub fn current_snapshot(
    territory: TerritoryCode,
    categories: &BTreeMap<CategoryCode, TaxCategory>,
    history: &[HistoricalRecord],
    rng: &mut StreamRng,
) -> FiscalResult<Vec<CurrentRecord>> {
    let mut records = Vec::with_capacity(categories.len());

    for (code, info) in categories {
        let last = last_record_for(history, *code).ok_or(FiscalError::EmptyHistory {
            territory,
            category: *code,
        })?;

        let change_pct = rng.uniform(-0.05, 0.05);
        let change_abs = last.revenue * change_pct;
        let monthly_amount = (last.revenue + change_abs).max(REVENUE_FLOOR);
        let taxpayers = (last.taxpayers * rng.uniform(0.98, 1.02)).max(1.0);

        records.push(CurrentRecord {
            territory,
            category: *code,
            full_name: info.full_name.clone(),
            tax_class: info.tax_class,
            monthly_amount,
            change_pct: change_pct * 100.0,
            change_abs,
            taxpayers,
            avg_monthly_amount: info.annual_amount / 12.0 * rng.uniform(0.95, 1.05),
            weight_pct: info.weight_pct,
            trailing_year_amount: last.revenue * 12.0 * rng.uniform(0.92, 1.08),
            avg_rate_pct: info.avg_rate_pct,
            cap_amount: info.cap_amount,
        });
    }

    log::debug!(
        "territory={territory} snapshot: derived {} current records",
        records.len()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::categories_for;
    use crate::history::historical_series;
    use chrono::NaiveDate;

    fn fixture(territory: TerritoryCode) -> (BTreeMap<CategoryCode, TaxCategory>, Vec<HistoricalRecord>) {
        let categories = categories_for(territory);
        let now = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut rng = StreamRng::from_seed(100 + territory.index());
        let history = historical_series(territory, &categories, now, &mut rng);
        (categories, history)
    }

    #[test]
    fn one_record_per_category() {
        let (categories, history) = fixture(TerritoryCode::Polynesie);
        let mut rng = StreamRng::from_seed(5);
        let snapshot =
            current_snapshot(TerritoryCode::Polynesie, &categories, &history, &mut rng).unwrap();
        assert_eq!(snapshot.len(), categories.len());
    }

    #[test]
    fn monthly_amount_never_goes_below_the_floor() {
        for territory in TerritoryCode::ALL {
            let (categories, history) = fixture(territory);
            for seed in 0..20 {
                let mut rng = StreamRng::from_seed(seed);
                let snapshot = current_snapshot(territory, &categories, &history, &mut rng).unwrap();
                for row in snapshot {
                    assert!(row.monthly_amount >= REVENUE_FLOOR, "{territory}/{}", row.category);
                    assert!(row.taxpayers >= 1.0, "{territory}/{}", row.category);
                }
            }
        }
    }

    #[test]
    fn floor_holds_even_against_tiny_history() {
        // A last historical revenue near zero plus a maximally negative
        // change must still clamp to the floor.
        let (categories, mut history) = fixture(TerritoryCode::Reunion);
        for record in &mut history {
            record.revenue = 0.01;
        }
        let mut rng = StreamRng::from_seed(6);
        let snapshot =
            current_snapshot(TerritoryCode::Reunion, &categories, &history, &mut rng).unwrap();
        for row in snapshot {
            assert!(row.monthly_amount >= REVENUE_FLOOR);
        }
    }

    #[test]
    fn change_pct_stays_in_symmetric_range() {
        let (categories, history) = fixture(TerritoryCode::Guadeloupe);
        let mut rng = StreamRng::from_seed(8);
        let snapshot =
            current_snapshot(TerritoryCode::Guadeloupe, &categories, &history, &mut rng).unwrap();
        for row in snapshot {
            assert!((-5.0..5.0).contains(&row.change_pct), "{}", row.change_pct);
        }
    }

    #[test]
    fn empty_history_is_a_loud_error() {
        let (categories, _) = fixture(TerritoryCode::Reunion);
        let mut rng = StreamRng::from_seed(2);
        let err = current_snapshot(TerritoryCode::Reunion, &categories, &[], &mut rng).unwrap_err();
        assert!(matches!(err, FiscalError::EmptyHistory { .. }));
    }

    #[test]
    fn passthrough_fields_come_from_the_category() {
        let (categories, history) = fixture(TerritoryCode::Caledonie);
        let mut rng = StreamRng::from_seed(12);
        let snapshot =
            current_snapshot(TerritoryCode::Caledonie, &categories, &history, &mut rng).unwrap();
        for row in snapshot {
            let info = &categories[&row.category];
            assert_eq!(row.full_name, info.full_name);
            assert_eq!(row.weight_pct, info.weight_pct);
            assert_eq!(row.avg_rate_pct, info.avg_rate_pct);
            assert_eq!(row.cap_amount, info.cap_amount);
        }
    }
}
