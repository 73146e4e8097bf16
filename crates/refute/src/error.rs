//! Error types for the engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A formula reached the clause-set builder without being in clause form.
    /// This is a contract violation by whoever built the tree.
    #[error("Malformed formula: unexpected {construct} in {context}")]
    MalformedFormula {
        construct: &'static str,
        context: &'static str,
    },

    #[error("Contradictory axiom rejected: {axiom}")]
    ContradictoryAxiom { axiom: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
