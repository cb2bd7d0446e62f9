//! Snapshot-level key metrics and reform-impact analysis.
//!
//! Both are read-only aggregations over already-generated datasets: the
//! key metrics condense a current snapshot into the headline figures, and
//! the reform analysis measures how the historical series actually moved
//! around each known policy event.

use crate::history::HistoricalRecord;
use crate::snapshot::CurrentRecord;
use crate::territory::Territory;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// Millions of euros.
    pub monthly_total:   f64,
    /// Millions of euros: monthly total projected over a year.
    pub annual_total:    f64,
    /// Mean of the per-category change percentages.
    pub avg_change_pct:  f64,
    pub taxpayers_total: f64,
    /// Categories whose change percentage is positive.
    pub rising_categories: usize,
    /// Euros per inhabitant per year.
    pub tax_per_capita:  f64,
    /// Euros per taxpayer per year; 0 when there are no taxpayers.
    pub tax_per_taxpayer: f64,
    /// Annual total as a percent of GDP.
    pub levy_rate_pct:   f64,
}

impl KeyMetrics {
    /// Condense a snapshot into headline figures for one territory.
    /// Amounts are M€ internally; the per-head figures convert to euros.
    pub fn from_snapshot(territory: &Territory, snapshot: &[CurrentRecord]) -> Self {
        let monthly_total: f64 = snapshot.iter().map(|r| r.monthly_amount).sum();
        let annual_total = monthly_total * 12.0;
        let taxpayers_total: f64 = snapshot.iter().map(|r| r.taxpayers).sum();
        let avg_change_pct = if snapshot.is_empty() {
            0.0
        } else {
            snapshot.iter().map(|r| r.change_pct).sum::<f64>() / snapshot.len() as f64
        };

        let tax_per_capita = if territory.population > 0 {
            annual_total * 1e6 / territory.population as f64
        } else {
            0.0
        };
        let tax_per_taxpayer = if taxpayers_total > 0.0 {
            annual_total * 1e6 / taxpayers_total
        } else {
            0.0
        };
        let levy_rate_pct =
            crate::comparison::fiscal_pressure_pct(annual_total, territory.gdp_billions);

        Self {
            monthly_total,
            annual_total,
            avg_change_pct,
            taxpayers_total,
            rising_categories: snapshot.iter().filter(|r| r.change_pct > 0.0).count(),
            tax_per_capita,
            tax_per_taxpayer,
            levy_rate_pct,
        }
    }
}

/// A known policy event and its planned revenue effect.
#[derive(Debug, Clone, Serialize)]
pub struct Reform {
    pub name:           &'static str,
    pub effective:      NaiveDate,
    /// Planned revenue multiplier (1.0 = no change).
    pub planned_impact: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReformImpact {
    pub reform:        Reform,
    /// Observed multiplier: mean revenue of the six months from the
    /// effective date over the mean of the six months before it.
    /// 1.0 when the before-window is empty or zero.
    pub actual_impact: f64,
}

fn ymd(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always a valid date")
}

/// The policy events the series is modeled around.
pub fn known_reforms() -> Vec<Reform> {
    vec![
        Reform { name: "Réforme fiscale 2018", effective: ymd(2018, 1), planned_impact: 1.10 },
        Reform { name: "Covid-19", effective: ymd(2020, 3), planned_impact: 0.90 },
        Reform { name: "Plan de relance", effective: ymd(2021, 6), planned_impact: 1.05 },
        Reform { name: "Transition écologique", effective: ymd(2022, 1), planned_impact: 1.03 },
    ]
}

fn mean_revenue(history: &[HistoricalRecord], from: NaiveDate, until: NaiveDate) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for record in history.iter().filter(|r| r.date >= from && r.date < until) {
        total += record.revenue;
        count += 1;
    }
    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Measure each known reform against the generated series.
pub fn reform_impacts(history: &[HistoricalRecord]) -> Vec<ReformImpact> {
    known_reforms()
        .into_iter()
        .map(|reform| {
            let window = Months::new(6);
            let before_start = reform.effective - window;
            let after_end = reform.effective + window;

            let before = mean_revenue(history, before_start, reform.effective);
            let after = mean_revenue(history, reform.effective, after_end);
            let actual_impact = if before > 0.0 { after / before } else { 1.0 };

            ReformImpact { reform, actual_impact }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::categories_for;
    use crate::history::historical_series;
    use crate::rng::StreamRng;
    use crate::snapshot::current_snapshot;
    use crate::territory::{catalog, TerritoryCode};

    fn fixture() -> (Territory, Vec<HistoricalRecord>, Vec<CurrentRecord>) {
        let territory = catalog()[&TerritoryCode::Reunion].clone();
        let categories = categories_for(TerritoryCode::Reunion);
        let now = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut rng = StreamRng::from_seed(31);
        let history = historical_series(TerritoryCode::Reunion, &categories, now, &mut rng);
        let snapshot =
            current_snapshot(TerritoryCode::Reunion, &categories, &history, &mut rng).unwrap();
        (territory, history, snapshot)
    }

    #[test]
    fn totals_match_hand_sums() {
        let (territory, _, snapshot) = fixture();
        let metrics = KeyMetrics::from_snapshot(&territory, &snapshot);

        let monthly: f64 = snapshot.iter().map(|r| r.monthly_amount).sum();
        assert_eq!(metrics.monthly_total, monthly);
        assert_eq!(metrics.annual_total, monthly * 12.0);

        let rising = snapshot.iter().filter(|r| r.change_pct > 0.0).count();
        assert_eq!(metrics.rising_categories, rising);
    }

    #[test]
    fn per_head_figures_convert_millions_to_euros() {
        let (territory, _, snapshot) = fixture();
        let metrics = KeyMetrics::from_snapshot(&territory, &snapshot);
        let expected = metrics.annual_total * 1e6 / territory.population as f64;
        assert_eq!(metrics.tax_per_capita, expected);
        // Réunion's modeled levy sits in a plausible band.
        assert!((5.0..40.0).contains(&metrics.levy_rate_pct), "{}", metrics.levy_rate_pct);
    }

    #[test]
    fn empty_snapshot_yields_zeroed_metrics() {
        let (territory, _, _) = fixture();
        let metrics = KeyMetrics::from_snapshot(&territory, &[]);
        assert_eq!(metrics.monthly_total, 0.0);
        assert_eq!(metrics.avg_change_pct, 0.0);
        assert_eq!(metrics.tax_per_taxpayer, 0.0);
        assert_eq!(metrics.rising_categories, 0);
    }

    #[test]
    fn one_impact_per_known_reform() {
        let (_, history, _) = fixture();
        let impacts = reform_impacts(&history);
        assert_eq!(impacts.len(), known_reforms().len());
        for impact in &impacts {
            // Policy multipliers are bounded, so the observed ratio is too.
            assert!((0.5..2.0).contains(&impact.actual_impact), "{}", impact.actual_impact);
        }
    }

    #[test]
    fn missing_before_window_defaults_to_unit_impact() {
        let impacts = reform_impacts(&[]);
        assert!(impacts.iter().all(|i| i.actual_impact == 1.0));
    }
}
