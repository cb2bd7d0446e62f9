//! Cross-module invariant sweep over every territory.
//!
//! The per-module unit tests pin each generator's contract in
//! isolation; this suite drives the whole engine the way a caller
//! would and checks the invariants that must survive composition.

use fiscal_core::{
    engine::FiscalEngine,
    snapshot::REVENUE_FLOOR,
    territory::TerritoryCode,
};

#[test]
fn every_territory_yields_a_complete_consistent_bundle() {
    let engine = FiscalEngine::new(2024);

    for code in TerritoryCode::ALL {
        let data = engine.territory_data(code).expect("territory data");

        let expected_categories = match code {
            TerritoryCode::Polynesie | TerritoryCode::Caledonie | TerritoryCode::Wallis => 11,
            _ => 10,
        };
        assert_eq!(data.categories.len(), expected_categories, "{code}");
        assert_eq!(data.snapshot.len(), expected_categories, "{code}");
        assert_eq!(data.brackets.len(), 8, "{code}");

        // History covers every category for every month.
        assert_eq!(data.history.len() % expected_categories, 0, "{code}");
        assert!(!data.history.is_empty(), "{code}");

        for record in &data.history {
            assert!(record.revenue > 0.0, "{code}/{}", record.category);
            assert!(record.taxpayers > 0.0, "{code}/{}", record.category);
            assert!(record.avg_per_taxpayer >= 0.0, "{code}/{}", record.category);
        }
        for row in &data.snapshot {
            assert!(row.monthly_amount >= REVENUE_FLOOR, "{code}/{}", row.category);
            assert!(row.taxpayers >= 1.0, "{code}/{}", row.category);
        }
    }
}

#[test]
fn comparison_rows_are_consistent_with_category_catalogs() {
    let engine = FiscalEngine::new(55);
    let records = engine.compare_territories();
    assert_eq!(records.len(), 11);

    for record in records {
        let expected: f64 = engine
            .categories_for(record.territory)
            .values()
            .map(|c| c.annual_amount)
            .sum();
        assert_eq!(record.total_tax_amount, expected, "{}", record.territory);
        assert!(record.fiscal_pressure > 0.0, "{}", record.territory);
    }
}

#[test]
fn category_scaling_is_exact_across_territories() {
    let engine = FiscalEngine::new(1);
    let reference = engine.categories_for(TerritoryCode::Reunion);
    let scaled = engine.categories_for(TerritoryCode::Mayotte);

    for (code, base) in &reference {
        assert_eq!(scaled[code].annual_amount, base.annual_amount * 0.45, "{code}");
    }
}
