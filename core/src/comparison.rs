//! Cross-territory comparison — catalog attributes joined with the
//! modeled tax totals and the derived fiscal-pressure ratio.

use crate::category::categories_for;
use crate::territory::{AdminType, Territory, TerritoryCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub territory:       TerritoryCode,
    pub name:            String,
    pub admin_type:      AdminType,
    pub population:      u64,
    pub area_km2:        u64,
    pub gdp_billions:    f64,
    /// Sum of category annual amounts, millions of euros.
    pub total_tax_amount: f64,
    /// Catalog figure, millions of euros.
    pub total_revenue:   f64,
    pub revenue_per_capita: f64,
    pub avg_tax_rate:    f64,
    /// Percent of GDP. 0 when GDP is not positive.
    pub fiscal_pressure: f64,
}

/// Total modeled tax amount as a percentage of GDP.
///
/// Unit policy: tax totals are millions of euros, GDP is stored in
/// billions, so the denominator converts to millions first. A
/// non-positive GDP yields 0 rather than a NaN or infinity; the fixed
/// catalog guarantees GDP > 0 today, but the policy is explicit.
pub fn fiscal_pressure_pct(total_tax_millions: f64, gdp_billions: f64) -> f64 {
    if gdp_billions <= 0.0 {
        return 0.0;
    }
    total_tax_millions / (gdp_billions * 1_000.0) * 100.0
}

/// One record per active territory; inactive territories are excluded
/// entirely, not zeroed.
pub fn compare_territories(
    territories: &BTreeMap<TerritoryCode, Territory>,
) -> Vec<ComparisonRecord> {
    territories
        .values()
        .filter(|t| t.active)
        .map(|t| {
            let total_tax_amount: f64 = categories_for(t.code)
                .values()
                .map(|c| c.annual_amount)
                .sum();

            ComparisonRecord {
                territory: t.code,
                name: t.name.clone(),
                admin_type: t.admin_type,
                population: t.population,
                area_km2: t.area_km2,
                gdp_billions: t.gdp_billions,
                total_tax_amount,
                total_revenue: t.total_revenue,
                revenue_per_capita: t.revenue_per_capita,
                avg_tax_rate: t.avg_tax_rate,
                fiscal_pressure: fiscal_pressure_pct(total_tax_amount, t.gdp_billions),
            }
        })
        .collect()
}
