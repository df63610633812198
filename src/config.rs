//! Search configuration, read once per move decision.

use std::time::Duration;

use crate::constants::DEFAULT_TIME_BUDGET;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Wall-clock budget for one decision. Checked on node entry only, so a
    /// single node expansion may overshoot it.
    pub time_budget: Duration,
    /// Optional ply limit; nodes at this depth are scored statically.
    pub max_depth: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            max_depth: None,
        }
    }
}

impl SearchConfig {
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<u32>) -> Self {
        self.max_depth = depth;
        self
    }
}
