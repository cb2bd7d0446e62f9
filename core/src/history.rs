//! Historical series generator — monthly revenue per (month, category)
//! from January 2015 to the current month.
//!
//! Three multiplicative layers sit on top of each category's mensualised
//! base amount:
//!   1. Policy multiplier, chosen per calendar year (2018 reform year,
//!      2020 shock year, modest upward drift otherwise).
//!   2. Seasonal multiplier, drawn once per month and shared by every
//!      category that month — seasonal effects correlate within a month.
//!   3. Per-category noise, independent per record.
//!
//! Series are regenerated wholesale on every cache miss, never appended to.

use crate::{
    category::{CategoryCode, TaxCategory, TaxClass},
    rng::StreamRng,
    territory::TerritoryCode,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// First month of the modeled period.
pub const SERIES_START: (i32, u32) = (2015, 1);

/// Year of the major tax reform: revenue shifts up, 5–15 %.
const REFORM_YEAR: i32 = 2018;
/// Year of the pandemic shock: revenue can dip up to 10 %.
const SHOCK_YEAR: i32 = 2020;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// First day of the month the record covers.
    pub date:            NaiveDate,
    pub territory:       TerritoryCode,
    pub category:        CategoryCode,
    /// Millions of euros for the month. Always > 0.
    pub revenue:         f64,
    /// Always > 0.
    pub taxpayers:       f64,
    /// Millions of euros per taxpayer; 0 when taxpayers is 0.
    pub avg_per_taxpayer: f64,
    pub tax_class:       TaxClass,
    /// Cosmetic month-over-month variation percentage for display.
    /// Not an input to any derived figure.
    pub monthly_variation_pct: f64,
}

/// Policy multiplier for one month, driven by the calendar year.
fn policy_multiplier(year: i32, rng: &mut StreamRng) -> f64 {
    if year == REFORM_YEAR {
        rng.uniform(1.05, 1.15)
    } else if year == SHOCK_YEAR {
        rng.uniform(0.90, 1.05)
    } else {
        rng.uniform(1.00, 1.08)
    }
}

/// First day of the month containing `date`.
fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 always exists for a valid (year, month).
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("first of month is always a valid date")
}

fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always a valid date")
}

/// Generate the full monthly series for one territory, ordered by
/// (month, category). `now` bounds the series at its containing month.
pub fn historical_series(
    territory: TerritoryCode,
    categories: &BTreeMap<CategoryCode, TaxCategory>,
    now: NaiveDate,
    rng: &mut StreamRng,
) -> Vec<HistoricalRecord> {
    let start = NaiveDate::from_ymd_opt(SERIES_START.0, SERIES_START.1, 1)
        .expect("series start is a valid date");
    let last = month_start(now);

    let mut records = Vec::new();
    let mut date = start;
    while date <= last {
        let policy = policy_multiplier(date.year(), rng);
        // One seasonal draw per month, shared across categories.
        let seasonal = rng.uniform(0.95, 1.05);

        for (code, info) in categories {
            let base_revenue = info.annual_amount / 12.0;
            let revenue = base_revenue * policy * seasonal * rng.uniform(0.95, 1.05);
            let taxpayers = info.taxpayer_count * rng.uniform(0.98, 1.02);
            let avg_per_taxpayer = if taxpayers > 0.0 { revenue / taxpayers } else { 0.0 };

            records.push(HistoricalRecord {
                date,
                territory,
                category: *code,
                revenue,
                taxpayers,
                avg_per_taxpayer,
                tax_class: info.tax_class,
                monthly_variation_pct: rng.uniform(-1.0, 1.0),
            });
        }

        date = next_month(date);
    }

    log::debug!(
        "territory={territory} history: generated {} records over {} categories",
        records.len(),
        categories.len()
    );

    records
}

/// The most recent record for one category, if any.
pub fn last_record_for<'a>(
    series: &'a [HistoricalRecord],
    category: CategoryCode,
) -> Option<&'a HistoricalRecord> {
    series.iter().rev().find(|r| r.category == category)
}
