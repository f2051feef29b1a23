//! Run configuration: expected interval and tolerated misses.
//!
//! Settings are layered: built-in defaults, then an optional config file
//! (TOML or JSON), then explicit CLI overrides. The detection core never
//! validates the config - `main` rejects a zero interval before running.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};

/// Monitoring parameters for one detection run. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Expected seconds between consecutive beats of a healthy service.
    pub interval_secs: u64,
    /// Consecutive misses tolerated before a gap raises an alert.
    pub allowed_misses: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            allowed_misses: 3,
        }
    }
}

impl MonitorConfig {
    /// Minimum gap, in seconds, that implies `allowed_misses` skipped beats.
    ///
    /// One interval between received beats is expected; each additional
    /// interval represents one missed beat.
    pub fn threshold_secs(&self) -> u64 {
        self.interval_secs * (u64::from(self.allowed_misses) + 1)
    }

    /// Load configuration from defaults, an optional file, and CLI overrides.
    ///
    /// `interval` and `misses` are the command-line values; when present they
    /// win over both the file and the defaults.
    pub fn load(
        file: Option<&Path>,
        interval: Option<u64>,
        misses: Option<u32>,
    ) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("interval_secs", defaults.interval_secs)?
            .set_default("allowed_misses", u64::from(defaults.allowed_misses))?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder
            .set_override_option("interval_secs", interval)?
            .set_override_option("allowed_misses", misses.map(u64::from))?;

        let settings = builder
            .build()
            .context("failed to load monitoring configuration")?;
        settings
            .try_deserialize::<Self>()
            .context("failed to load monitoring configuration")
    }
}
