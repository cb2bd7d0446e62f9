//! fiscal-core — synthetic fiscal-data engine for the DROM-COM territories.
//!
//! Generates illustrative (not statutory) tax-revenue datasets for the
//! eleven French overseas territories: per-territory tax-category catalogs,
//! monthly historical series from 2015, derived "as of now" snapshots,
//! income-bracket distributions, and cross-territory comparisons.
//!
//! RULES:
//!   - All randomness flows through the RngBank. No platform RNG anywhere.
//!   - Generators are pure over (inputs, rng): same stream, same output.
//!   - All cached state lives in the CacheStore. No ambient globals.
//!   - Monetary amounts are millions of euros unless a field says otherwise.

pub mod analysis;
pub mod brackets;
pub mod cache;
pub mod category;
pub mod comparison;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod live;
pub mod projection;
pub mod rng;
pub mod snapshot;
pub mod territory;
pub mod types;

pub use engine::FiscalEngine;
pub use error::{FiscalError, FiscalResult};
