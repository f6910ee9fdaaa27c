use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_EXPANSIONS: u64 = 1_000_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_CACHE_CAPACITY: usize = 1; // single-slot cache

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub max_expansions: u64,
    /// Wall-clock budget for one search; 0 disables the deadline.
    pub timeout_ms: u64,
    pub cache_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
