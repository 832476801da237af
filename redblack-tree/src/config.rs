//! Tree options.

use serde::Deserialize;

/// Default arena pre-allocation (grow on demand).
pub const DEFAULT_INITIAL_CAPACITY: usize = 0;

/// Options applied when a tree is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Run `self_test` after every insert and delete.
    ///
    /// A failing self-test is treated as a broken invariant and panics.
    /// Default: false. Costs O(n) per mutation; meant for tests and audits.
    pub self_check: bool,

    /// Number of node slots to reserve up front.
    ///
    /// Default: 0.
    pub initial_capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            self_check: false,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl TreeConfig {
    /// Options for tests: re-validate after every mutation.
    pub fn checked() -> Self {
        Self {
            self_check: true,
            ..Default::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
