//! Configuration management for the Redoubt engine.
//!
//! Loaded from (in priority order):
//! 1. Environment variables (`REDOUBT_` prefix, `__` nested separator)
//! 2. A config file (`redoubt.toml`, if present)
//! 3. Defaults

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::Budgets;

fn default_budgets() -> Budgets {
    Budgets {
        adv_speed_ft_per_s: 11.0,
        max_time_s: 2222,
        max_consumables_lb: 333,
        max_weight_lb: 444,
        ascend_fatigue_s_per_ft: 0.5,
        descend_fatigue_s_per_ft: 0.05,
        cutoff_fastest: 6,
        cutoff_lightest: 7,
    }
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("Path_Files")
}

/// Immutable, process-wide configuration. Constructed once at startup and
/// shared behind `Arc` thereafter; nothing downstream mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(flatten)]
    pub budgets: Budgets,
    #[serde(default)]
    pub reserved_processors: usize,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            budgets: default_budgets(),
            reserved_processors: 0,
            cache_dir: default_cache_dir(),
        }
    }
}

impl EngineConfig {
    /// Load configuration layering defaults, an optional config file
    /// (`redoubt.toml` unless `config_path` is given), then
    /// `REDOUBT_`-prefixed environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();
        let builder = Config::builder()
            .set_default("adv_speed_ft_per_s", defaults.budgets.adv_speed_ft_per_s)?
            .set_default("max_time_s", defaults.budgets.max_time_s)?
            .set_default(
                "max_consumables_lb",
                defaults.budgets.max_consumables_lb as i64,
            )?
            .set_default("max_weight_lb", defaults.budgets.max_weight_lb as i64)?
            .set_default(
                "ascend_fatigue_s_per_ft",
                defaults.budgets.ascend_fatigue_s_per_ft,
            )?
            .set_default(
                "descend_fatigue_s_per_ft",
                defaults.budgets.descend_fatigue_s_per_ft,
            )?
            .set_default("cutoff_fastest", defaults.budgets.cutoff_fastest as i64)?
            .set_default("cutoff_lightest", defaults.budgets.cutoff_lightest as i64)?
            .set_default("reserved_processors", defaults.reserved_processors as i64)?
            .set_default(
                "cache_dir",
                defaults.cache_dir.to_string_lossy().into_owned(),
            )?
            .add_source(File::with_name(config_path.unwrap_or("redoubt")).required(false))
            .add_source(
                Environment::with_prefix("REDOUBT")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// The bounded worker pool size per the Scheduler contract:
    /// `max(1, cpu_count - reserved_processors)`.
    pub fn worker_pool_size(&self, cpu_count: usize) -> usize {
        cpu_count.saturating_sub(self.reserved_processors).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_setup() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.budgets.adv_speed_ft_per_s, 11.0);
        assert_eq!(cfg.budgets.max_time_s, 2222);
        assert_eq!(cfg.budgets.cutoff_fastest, 6);
        assert_eq!(cfg.budgets.cutoff_lightest, 7);
    }

    #[test]
    fn worker_pool_size_reserves_processors_and_floors_at_one() {
        let mut cfg = EngineConfig::default();
        cfg.reserved_processors = 2;
        assert_eq!(cfg.worker_pool_size(8), 6);
        cfg.reserved_processors = 16;
        assert_eq!(cfg.worker_pool_size(8), 1);
    }

    #[test]
    fn load_with_missing_file_falls_back_to_defaults() {
        let cfg = EngineConfig::load(Some("/nonexistent/redoubt-config-for-test")).unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }
}
