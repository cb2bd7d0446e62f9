//! Live-update pass over an existing current snapshot.
//!
//! The update is a light perturbation of the cached snapshot, not a
//! rebuild from history: each row has a 40 % chance of a small amount
//! move, and every row's taxpayer count jitters slightly. The pass
//! returns a new vector; the engine swaps the cached reference
//! atomically so readers never observe a half-updated snapshot.

use crate::rng::StreamRng;
use crate::snapshot::{CurrentRecord, REVENUE_FLOOR};

/// Probability that a given row's amount moves in one pass.
pub const UPDATE_PROBABILITY: f64 = 0.4;
/// Half-width of the symmetric amount perturbation.
pub const UPDATE_SPAN: f64 = 0.02;

/// Perturb a snapshot. The amount floor survives any number of passes.
pub fn apply_live_update(rows: &[CurrentRecord], rng: &mut StreamRng) -> Vec<CurrentRecord> {
    let mut updated = Vec::with_capacity(rows.len());
    let mut moved = 0usize;

    for row in rows {
        let mut row = row.clone();

        if rng.chance(UPDATE_PROBABILITY) {
            let variation = rng.uniform(-UPDATE_SPAN, UPDATE_SPAN);
            row.monthly_amount = (row.monthly_amount * (1.0 + variation)).max(REVENUE_FLOOR);
            row.change_pct = variation * 100.0;
            moved += 1;
        }

        // Taxpayer count drifts on every pass, moved or not.
        row.taxpayers = (row.taxpayers * rng.uniform(0.98, 1.02)).max(1.0);

        updated.push(row);
    }

    log::debug!("live_update: perturbed {moved}/{} rows", rows.len());
    updated
}
