//! Forward revenue projection — extends the series past the last
//! historical month using each category's annual growth rate.

use crate::category::{CategoryCode, TaxCategory};
use crate::rng::StreamRng;
use crate::territory::TerritoryCode;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub date:      NaiveDate,
    pub territory: TerritoryCode,
    pub category:  CategoryCode,
    /// Millions of euros for the month.
    pub amount:    f64,
}

fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always a valid date")
}

/// Project `years` of monthly amounts starting the month after `from`.
/// Each category compounds at its annual growth rate divided over twelve
/// months, with mild independent noise per record.
pub fn project_series(
    territory: TerritoryCode,
    categories: &BTreeMap<CategoryCode, TaxCategory>,
    from: NaiveDate,
    years: u32,
    rng: &mut StreamRng,
) -> Vec<ProjectionRecord> {
    let months = years * 12;
    let mut records = Vec::with_capacity(months as usize * categories.len());

    let mut date = next_month(from);
    let mut elapsed: u32 = 1;
    while elapsed <= months {
        for (code, info) in categories {
            let growth = 1.0 + (info.annual_growth_pct / 100.0) / 12.0;
            let base = info.annual_amount / 12.0;
            let amount = base * growth.powi(elapsed as i32) * rng.uniform(0.95, 1.05);

            records.push(ProjectionRecord { date, territory, category: *code, amount });
        }
        date = next_month(date);
        elapsed += 1;
    }

    records
}
