use serde::{Deserialize, Serialize};

/// Response cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Upper bound on stored responses (default: 10000)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Seconds between background sweeps of expired entries (default: 60)
    #[serde(default = "default_compaction_interval")]
    pub compaction_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            compaction_interval_secs: default_compaction_interval(),
        }
    }
}

fn default_max_entries() -> usize {
    10_000
}

fn default_compaction_interval() -> u64 {
    60
}
