//! The session façade — the one object a caller holds.
//!
//! The engine owns the master seed, the RNG bank, the pinned territory
//! catalog and the cache store, and exposes the generation operations.
//! Every read goes through the cache: repeated calls inside a freshness
//! window return the previously computed structure unchanged; an expired
//! window regenerates the whole dataset with a fresh (but reproducible)
//! RNG stream.
//!
//! RULES:
//!   - Generators never see the cache; the engine mediates.
//!   - Each recomputation bumps the epoch counter, so refills draw
//!     distinct streams while staying reproducible from the seed.
//!   - The live update replaces the cached snapshot atomically; reads
//!     in the same window observe the replaced rows.

use crate::{
    analysis::{self, KeyMetrics, ReformImpact},
    brackets::{self, RevenueBracketRecord},
    cache::CacheStore,
    category::{self, CategoryCode, TaxCategory},
    comparison::{self, ComparisonRecord},
    config::EngineConfig,
    error::FiscalResult,
    history::{self, HistoricalRecord},
    live,
    projection::{self, ProjectionRecord},
    rng::{GeneratorSlot, RngBank},
    snapshot::{self, CurrentRecord},
    territory::{self, Territory, TerritoryCode},
    types::SessionId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Everything a presentation layer needs for one territory, in one call.
#[derive(Debug, Clone, Serialize)]
pub struct TerritoryData {
    pub territory:  Territory,
    pub categories: BTreeMap<CategoryCode, TaxCategory>,
    pub history:    Vec<HistoricalRecord>,
    pub snapshot:   Vec<CurrentRecord>,
    pub brackets:   Vec<RevenueBracketRecord>,
}

pub struct FiscalEngine {
    pub session_id: SessionId,
    config:      EngineConfig,
    rng_bank:    RngBank,
    territories: BTreeMap<TerritoryCode, Territory>,
    cache:       CacheStore,
    epoch:       AtomicU64,
    last_update: Mutex<Option<DateTime<Utc>>>,
}

impl FiscalEngine {
    /// Build an engine with default windows and the given master seed.
    pub fn new(master_seed: u64) -> Self {
        Self::with_config(EngineConfig {
            master_seed,
            ..EngineConfig::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let session_id = format!("session-{}", Uuid::new_v4());
        log::info!(
            "session={session_id} engine: starting with seed {}",
            config.master_seed
        );
        Self {
            session_id,
            rng_bank: RngBank::new(config.master_seed),
            territories: territory::catalog(),
            cache: CacheStore::new(config.freshness()),
            epoch: AtomicU64::new(0),
            last_update: Mutex::new(None),
            config,
        }
    }

    fn next_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::Relaxed)
    }

    /// The full territory catalog. Constant for the whole session:
    /// re-derivation is the identity, so the engine pins it at build time.
    pub fn list_territories(&self) -> &BTreeMap<TerritoryCode, Territory> {
        &self.territories
    }

    /// The per-territory tax-category catalog, cached per territory.
    pub fn categories_for(&self, code: TerritoryCode) -> BTreeMap<CategoryCode, TaxCategory> {
        self.cache
            .categories
            .get_or_insert_with(code, || category::categories_for(code))
    }

    /// The monthly series from January 2015 to the current month.
    pub fn historical_series(&self, code: TerritoryCode) -> Vec<HistoricalRecord> {
        self.cache.history.get_or_insert_with(code, || {
            let categories = self.categories_for(code);
            let mut rng =
                self.rng_bank
                    .for_territory(GeneratorSlot::History, code.index(), self.next_epoch());
            history::historical_series(code, &categories, Utc::now().date_naive(), &mut rng)
        })
    }

    /// The "as of now" snapshot, derived from the latest historical rows.
    pub fn current_snapshot(&self, code: TerritoryCode) -> FiscalResult<Vec<CurrentRecord>> {
        self.cache.snapshot.get_or_try_insert_with(code, || {
            let categories = self.categories_for(code);
            let series = self.historical_series(code);
            let mut rng =
                self.rng_bank
                    .for_territory(GeneratorSlot::Snapshot, code.index(), self.next_epoch());
            snapshot::current_snapshot(code, &categories, &series, &mut rng)
        })
    }

    /// The eight income-bracket records for one territory.
    pub fn revenue_brackets(&self, code: TerritoryCode) -> Vec<RevenueBracketRecord> {
        self.cache
            .brackets
            .get_or_insert_with(code, || brackets::revenue_brackets(code))
    }

    /// One comparison row per active territory.
    pub fn compare_territories(&self) -> Vec<ComparisonRecord> {
        self.cache
            .comparison
            .get_or_insert_with((), || comparison::compare_territories(&self.territories))
    }

    /// Perturb the cached snapshot and make the result the new cached
    /// value. Explicit and user-triggered; each call draws a fresh
    /// stream, so repeated calls keep moving.
    pub fn apply_live_update(&self, code: TerritoryCode) -> FiscalResult<Vec<CurrentRecord>> {
        let current = self.current_snapshot(code)?;
        let mut rng =
            self.rng_bank
                .for_territory(GeneratorSlot::LiveUpdate, code.index(), self.next_epoch());
        let updated = live::apply_live_update(&current, &mut rng);

        self.cache.snapshot.replace(code, updated.clone());
        let stamp = Utc::now();
        *self
            .last_update
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(stamp);

        log::info!("territory={code} engine: live update applied at {stamp}");
        Ok(updated)
    }

    /// When the last live update was applied, if any.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        *self.last_update.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Headline figures for one territory's snapshot.
    pub fn key_metrics(&self, code: TerritoryCode) -> FiscalResult<KeyMetrics> {
        let snapshot = self.current_snapshot(code)?;
        Ok(KeyMetrics::from_snapshot(&self.territories[&code], &snapshot))
    }

    /// Observed-vs-planned impact of each known policy event.
    pub fn reform_impacts(&self, code: TerritoryCode) -> Vec<ReformImpact> {
        analysis::reform_impacts(&self.historical_series(code))
    }

    /// Forward projection over the configured horizon, starting after
    /// the last historical month.
    pub fn projection(&self, code: TerritoryCode) -> Vec<ProjectionRecord> {
        let categories = self.categories_for(code);
        let series = self.historical_series(code);
        let from = series
            .last()
            .map(|r| r.date)
            .unwrap_or_else(|| Utc::now().date_naive());
        let mut rng =
            self.rng_bank
                .for_territory(GeneratorSlot::Projection, code.index(), self.next_epoch());
        projection::project_series(
            code,
            &categories,
            from,
            self.config.projection_years,
            &mut rng,
        )
    }

    /// The whole dataset bundle for one territory.
    pub fn territory_data(&self, code: TerritoryCode) -> FiscalResult<TerritoryData> {
        Ok(TerritoryData {
            territory: self.territories[&code].clone(),
            categories: self.categories_for(code),
            history: self.historical_series(code),
            snapshot: self.current_snapshot(code)?,
            brackets: self.revenue_brackets(code),
        })
    }
}
