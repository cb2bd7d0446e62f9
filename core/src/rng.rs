//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed held by the FiscalEngine.
//!
//! Each generator gets its own RNG stream, seeded deterministically
//! from (master_seed, generator slot, territory index, epoch). This means:
//!   - Adding a new generator never changes existing generators' streams.
//!   - A given cache refill is fully reproducible in isolation.
//!   - Two refills of the same key (epoch bump) draw distinct streams.

use crate::types::Epoch;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single generation pass.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream from the master seed and mixing keys. The slot
    /// index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64, key: u64, epoch: Epoch) -> Self {
        let derived_seed = master_seed
            ^ slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ key.wrapping_mul(0xc2b2_ae3d_27d4_eb4f)
            ^ epoch.wrapping_mul(0x1656_67b1_9e37_79f9);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Build a stream directly from a raw seed. Test entry point.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            name: "seeded",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        debug_assert!(lo <= hi, "uniform range inverted");
        lo + self.next_f64() * (hi - lo)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// All generator streams for a single session, derived from the master seed.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Stream for a whole-session generator (no territory key).
    pub fn for_generator(&self, slot: GeneratorSlot, epoch: Epoch) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64, 0, epoch).with_name(slot.name())
    }

    /// Stream keyed by territory, so each territory's data is
    /// reproducible in isolation.
    pub fn for_territory(&self, slot: GeneratorSlot, territory_index: u64, epoch: Epoch) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64, territory_index + 1, epoch)
            .with_name(slot.name())
    }
}

/// Stable generator slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every generator's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum GeneratorSlot {
    History = 0,
    Snapshot = 1,
    LiveUpdate = 2,
    Projection = 3,
    // Add new generators here — append only.
}

impl GeneratorSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Snapshot => "snapshot",
            Self::LiveUpdate => "live_update",
            Self::Projection => "projection",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_keys_same_stream() {
        let bank = RngBank::new(42);
        let mut a = bank.for_territory(GeneratorSlot::History, 3, 0);
        let mut b = bank.for_territory(GeneratorSlot::History, 3, 0);
        for _ in 0..32 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn epoch_bump_changes_stream() {
        let bank = RngBank::new(42);
        let mut a = bank.for_territory(GeneratorSlot::History, 3, 0);
        let mut b = bank.for_territory(GeneratorSlot::History, 3, 1);
        let drawn_a: Vec<u64> = (0..8).map(|_| a.next_f64().to_bits()).collect();
        let drawn_b: Vec<u64> = (0..8).map(|_| b.next_f64().to_bits()).collect();
        assert_ne!(drawn_a, drawn_b);
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = StreamRng::from_seed(7);
        for _ in 0..1000 {
            let x = rng.uniform(0.95, 1.05);
            assert!((0.95..1.05).contains(&x), "out of range: {x}");
        }
    }

    #[test]
    fn chance_is_calibrated() {
        let mut rng = StreamRng::from_seed(11);
        let hits = (0..10_000).filter(|_| rng.chance(0.4)).count();
        // 40% ± 3 points over 10k trials.
        assert!((3700..=4300).contains(&hits), "hits: {hits}");
    }
}
