//! First-order logic representation and manipulation
//!
//! This module provides the fundamental types for representing formulas:
//! terms, formula trees, literals, clauses, CNF sets and substitutions.

pub mod core;
pub mod unification;

// Re-export commonly used types
pub use self::core::clause::Clause;
pub use self::core::cnf::{ClauseSet, Cnf};
pub use self::core::formula::Formula;
pub use self::core::literal::Literal;
pub use self::core::term::{Operator, Term};
pub use unification::{mgu, unify, unify_list, Substitution, UnificationError, UnificationResult};
