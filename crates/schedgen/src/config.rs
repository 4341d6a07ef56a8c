/// Configuration for the schedule search engine
use crate::error::ScheduleError;
use crate::search::MAX_CLOCK_CHECK_INTERVAL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables shared by the search strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Seed for the random strategy; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Steps between wall-clock checks (rounded up to a power of two, at
    /// most [`MAX_CLOCK_CHECK_INTERVAL`])
    pub clock_check_interval: u64,
    /// Largest cross product the random strategy tracks exhaustively
    pub exhaustive_tracking_limit: usize,
}

impl SearchConfig {
    /// Loads a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON config file
    ///
    /// # Returns
    /// * `Ok(SearchConfig)` - Parsed configuration
    /// * `Err` - If the file can't be read or parsed, or a value is out of range
    pub fn load_from_path(path: &Path) -> Result<Self, ScheduleError> {
        let content = fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.clock_check_interval > MAX_CLOCK_CHECK_INTERVAL {
            return Err(ScheduleError::InvalidConfig {
                message: format!(
                    "clock_check_interval {} exceeds {}",
                    self.clock_check_interval, MAX_CLOCK_CHECK_INTERVAL
                ),
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            clock_check_interval: 64,
            exhaustive_tracking_limit: 1 << 16,
        }
    }
}
