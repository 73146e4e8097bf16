//! Refute: CNF normalization and resolution refutation for first-order logic
//!
//! Formulas are normalized to conjunctive normal form by five structural
//! rewrite passes, then a goal is proved by refuting its negation against the
//! clauses of a knowledge base, using resolution with Robinson unification.

pub mod cnf_conversion;
pub mod config;
pub mod error;
pub mod generating;
pub mod json;
pub mod logic;
pub mod prover;
pub mod state;

// Re-export commonly used types
pub use logic::{
    mgu, unify, unify_list, Clause, ClauseSet, Cnf, Formula, Literal, Operator, Substitution,
    Term, UnificationError, UnificationResult,
};

pub use cnf_conversion::{normalize_stages, to_cnf, Normalization};
pub use config::{ContradictionPolicy, EngineConfig};
pub use error::{EngineError, Result};
pub use generating::{are_contrary, resolve_with_unification};
pub use json::{ClauseJson, CnfJson, ProofResultJson, StepJson, TermJson};
pub use prover::Engine;
pub use state::{
    Derivation, EventLog, ProofResult, ProofStep, Refutation, ResolutionState, SearchSummary,
    StateChange,
};
