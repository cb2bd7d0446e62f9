//! Engine configuration.
//!
//! Defaults reproduce the documented freshness windows and generation
//! constants; a JSON file can override any subset of fields.

use crate::cache::FreshnessPolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Master seed every generator stream derives from.
    pub master_seed: u64,
    /// Freshness windows, seconds.
    pub categories_window_secs: u64,
    pub history_window_secs:    u64,
    pub snapshot_window_secs:   u64,
    pub brackets_window_secs:   u64,
    pub comparison_window_secs: u64,
    /// Forward projection horizon, years.
    pub projection_years: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            master_seed: 42,
            categories_window_secs: 3_600,
            history_window_secs:    1_800,
            snapshot_window_secs:   300,
            brackets_window_secs:   600,
            comparison_window_secs: 3_600,
            projection_years: 5,
        }
    }
}

impl EngineConfig {
    /// Load a configuration overlay from a JSON file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config: {path}"))?;
        let config: EngineConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse engine config: {path}"))?;
        Ok(config)
    }

    pub fn freshness(&self) -> FreshnessPolicy {
        FreshnessPolicy {
            categories: Duration::from_secs(self.categories_window_secs),
            history:    Duration::from_secs(self.history_window_secs),
            snapshot:   Duration::from_secs(self.snapshot_window_secs),
            brackets:   Duration::from_secs(self.brackets_window_secs),
            comparison: Duration::from_secs(self.comparison_window_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_windows() {
        let config = EngineConfig::default();
        let policy = config.freshness();
        assert_eq!(policy, FreshnessPolicy::default());
        assert_eq!(config.projection_years, 5);
    }

    #[test]
    fn partial_json_overlays_onto_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"master_seed": 7, "snapshot_window_secs": 10}"#).unwrap();
        assert_eq!(config.master_seed, 7);
        assert_eq!(config.snapshot_window_secs, 10);
        assert_eq!(config.history_window_secs, 1_800);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(serde_json::to_string(&back).unwrap(), json);
    }
}
