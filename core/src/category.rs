//! Tax-category catalog builder.
//!
//! Every territory shares one canonical base table of tax categories;
//! per-territory magnitudes are the base figures multiplied by that
//! territory's scaling factor. Three COM territories additionally carry a
//! locale-specific category, merged in from a declarative extension list
//! so the generators never special-case territories.

use crate::territory::TerritoryCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Closed set of category codes. The acronyms are the French tax
/// instruments the figures are modeled on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryCode {
    /// Impôt sur le revenu.
    Ir,
    /// Impôt sur les sociétés.
    Is,
    /// Taxe sur la valeur ajoutée.
    Tva,
    /// Taxe foncière sur le bâti.
    Tfpb,
    /// Taxe foncière sur le non-bâti.
    Tfnb,
    /// Taxe d'habitation.
    Th,
    /// Droits d'enregistrement.
    DroitsEnregistrement,
    /// Taxe intérieure sur la consommation des produits énergétiques.
    Ticpe,
    /// Impôt sur la fortune immobilière.
    Isf,
    /// Autres impositions et taxes.
    AutresImpositions,
    /// Taxe locale spécifique COM — only for the LOCAL_EXTENSION territories.
    TaxeLocale,
}

impl CategoryCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ir => "IR",
            Self::Is => "IS",
            Self::Tva => "TVA",
            Self::Tfpb => "TFPB",
            Self::Tfnb => "TFNB",
            Self::Th => "TH",
            Self::DroitsEnregistrement => "DROITS_ENREGISTREMENT",
            Self::Ticpe => "TICPE",
            Self::Isf => "ISF",
            Self::AutresImpositions => "AUTRES_IMPOSITIONS",
            Self::TaxeLocale => "TAXE_LOCALE",
        }
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxClass {
    Direct,
    Indirect,
    Local,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxCategory {
    pub code:           CategoryCode,
    pub full_name:      String,
    pub tax_class:      TaxClass,
    /// Millions of euros per year, territory-scaled.
    pub annual_amount:  f64,
    /// Territory-scaled.
    pub taxpayer_count: f64,
    /// Share of total revenue, percent, territory-scaled.
    pub weight_pct:     f64,
    /// Percent per year. Not scaled — growth is a rate, not a magnitude.
    pub annual_growth_pct: f64,
    /// Percent.
    pub avg_rate_pct:   f64,
    /// Euros. 0 = uncapped.
    pub cap_amount:     f64,
}

/// Per-territory scaling factor applied to every canonical base figure.
/// Total over the closed enum — there is no default branch to fall into.
pub fn scaling_factor(code: TerritoryCode) -> f64 {
    match code {
        TerritoryCode::Reunion => 1.0,
        TerritoryCode::Guadeloupe => 0.85,
        TerritoryCode::Martinique => 0.82,
        TerritoryCode::Guyane => 0.65,
        TerritoryCode::Mayotte => 0.45,
        TerritoryCode::Stpierre => 1.2,
        TerritoryCode::Stbarth => 1.5,
        TerritoryCode::Stmartin => 1.1,
        TerritoryCode::Wallis => 0.7,
        TerritoryCode::Polynesie => 0.8,
        TerritoryCode::Caledonie => 0.9,
    }
}

/// Canonical base definition: (code, name, class, annual M€, taxpayers,
/// weight %, growth %, avg rate %, cap €).
type BaseRow = (CategoryCode, &'static str, TaxClass, f64, f64, f64, f64, f64, f64);

const BASE_CATEGORIES: [BaseRow; 10] = [
    (CategoryCode::Ir, "Impôt sur le Revenu", TaxClass::Direct, 850.0, 320_000.0, 30.2, 3.2, 14.5, 150_000.0),
    (CategoryCode::Is, "Impôt sur les Sociétés", TaxClass::Direct, 620.0, 25_000.0, 22.8, 4.8, 25.0, 1_000_000.0),
    (CategoryCode::Tva, "Taxe sur la Valeur Ajoutée", TaxClass::Indirect, 980.0, 45_000.0, 35.5, 2.9, 8.5, 0.0),
    (CategoryCode::Tfpb, "Taxe Foncière sur le Bâti", TaxClass::Local, 280.0, 280_000.0, 10.3, 1.5, 1.2, 50_000.0),
    (CategoryCode::Tfnb, "Taxe Foncière sur le Non-Bâti", TaxClass::Local, 45.0, 15_000.0, 1.7, 0.8, 0.8, 20_000.0),
    (CategoryCode::Th, "Taxe d'Habitation", TaxClass::Local, 320.0, 380_000.0, 11.8, -2.5, 1.5, 30_000.0),
    (CategoryCode::DroitsEnregistrement, "Droits d'enregistrement", TaxClass::Indirect, 180.0, 12_000.0, 6.8, 3.8, 5.5, 0.0),
    (CategoryCode::Ticpe, "Taxe Intérieure sur la Consommation des Produits Énergétiques", TaxClass::Indirect, 150.0, 5_000.0, 5.5, 1.2, 0.6, 0.0),
    (CategoryCode::Isf, "Impôt sur la Fortune Immobilière", TaxClass::Direct, 42.0, 2_500.0, 1.5, 2.2, 1.3, 1_300_000.0),
    (CategoryCode::AutresImpositions, "Autres impositions et taxes", TaxClass::Other, 95.0, 80_000.0, 3.5, 1.5, 0.0, 0.0),
];

/// Declarative locale-specific extension: (territories, extra rows).
/// Adding a locale category means adding a row here, not touching the
/// builder or the generators.
const LOCAL_EXTENSION: (&[TerritoryCode], [BaseRow; 1]) = (
    &[TerritoryCode::Polynesie, TerritoryCode::Caledonie, TerritoryCode::Wallis],
    [(CategoryCode::TaxeLocale, "Taxe locale spécifique COM", TaxClass::Local, 120.0, 180_000.0, 8.0, 2.5, 2.0, 25_000.0)],
);

fn build_category(row: &BaseRow, factor: f64) -> TaxCategory {
    let (code, full_name, tax_class, annual, taxpayers, weight, growth, rate, cap) = *row;
    TaxCategory {
        code,
        full_name: full_name.to_string(),
        tax_class,
        annual_amount: annual * factor,
        taxpayer_count: taxpayers * factor,
        weight_pct: weight * factor,
        annual_growth_pct: growth,
        avg_rate_pct: rate,
        cap_amount: cap,
    }
}

/// Build the per-territory category catalog. Deterministic: two calls for
/// the same territory produce structurally identical maps.
pub fn categories_for(territory: TerritoryCode) -> BTreeMap<CategoryCode, TaxCategory> {
    let factor = scaling_factor(territory);

    let mut categories: BTreeMap<CategoryCode, TaxCategory> = BASE_CATEGORIES
        .iter()
        .map(|row| (row.0, build_category(row, factor)))
        .collect();

    let (extension_territories, extension_rows) = LOCAL_EXTENSION;
    if extension_territories.contains(&territory) {
        for row in &extension_rows {
            categories.insert(row.0, build_category(row, factor));
        }
    }

    categories
}
