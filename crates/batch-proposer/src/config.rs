use crate::error::{Error, Result};
use scoria_utils::config::read_json;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

pub const DEFAULT_GAS_THRESHOLD: u64 = 3_000_000;
pub const DEFAULT_MAX_BLOCKS: usize = 100;
pub const DEFAULT_BATCH_TIME_SEC: u64 = 5 * 60;
pub const DEFAULT_PROPOSE_INTERVAL_MS: u64 = 3_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchProposerConfig {
    /// Upper bound on the total gas of one batch.
    pub gas_threshold: u64,
    /// Number of unbatched blocks fetched per attempt.
    pub max_blocks: usize,
    /// How long an under-filled batch may wait for more blocks, measured
    /// from the timestamp of its oldest block.
    pub batch_time_sec: u64,
    pub propose_interval_ms: u64,
}

impl Default for BatchProposerConfig {
    fn default() -> Self {
        Self {
            gas_threshold: DEFAULT_GAS_THRESHOLD,
            max_blocks: DEFAULT_MAX_BLOCKS,
            batch_time_sec: DEFAULT_BATCH_TIME_SEC,
            propose_interval_ms: DEFAULT_PROPOSE_INTERVAL_MS,
        }
    }
}

impl BatchProposerConfig {
    /// Reads the config from a JSON file. Missing file or fields fall back
    /// to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config = read_json::<Self>(path)?.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings under which no batch could ever be proposed.
    pub fn validate(&self) -> Result<()> {
        if self.max_blocks == 0 {
            return Err(Error::InvalidConfig("max_blocks must be at least 1"));
        }
        if self.gas_threshold == 0 {
            return Err(Error::InvalidConfig("gas_threshold must be at least 1"));
        }
        Ok(())
    }

    pub fn propose_interval(&self) -> Duration {
        Duration::from_millis(self.propose_interval_ms)
    }
}
