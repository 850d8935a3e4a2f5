//! Folder hierarchy limits.

use serde::{Deserialize, Serialize};

/// Bounds applied while walking the folder forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Maximum number of parent hops (or cascade levels) before a walk is
    /// treated as a cycle.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    1000
}
