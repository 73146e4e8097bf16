//! Engine configuration types.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the refutation search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of resolvents one proof attempt may derive
    pub max_resolvents: usize,
    /// Wall-clock budget for one proof attempt in milliseconds
    pub timeout_ms: Option<u64>,
    pub contradiction_policy: ContradictionPolicy,
    /// Record the event log during search
    pub record_events: bool,
}

/// What `add_axiom` does with an axiom that contradicts itself or the
/// knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionPolicy {
    /// A self-contradictory axiom adds no clauses and logs a warning. A
    /// knowledge base made contradictory by several axioms is kept as is.
    #[default]
    Permit,
    /// Refuse it with `EngineError::ContradictoryAxiom`
    Reject,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_resolvents: 0, // 0 means no limit
            timeout_ms: None,
            contradiction_policy: ContradictionPolicy::Permit,
            record_events: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
