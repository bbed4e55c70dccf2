//! Execution limits for the pushdown automaton engine.

use crate::types::MAX_TRANSITIONS;
use serde::{Deserialize, Serialize};

/// Engine configuration. Limits only; enforcement happens in the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// A run fails once this many configurations have been counted.
    pub max_transitions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_transitions: MAX_TRANSITIONS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_transitions(mut self, max_transitions: usize) -> Self {
        self.max_transitions = max_transitions;
        self
    }

    /// Reads a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
