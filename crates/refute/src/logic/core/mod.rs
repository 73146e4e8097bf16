//! Core types: terms, formulas, literals, clauses and CNF

pub mod clause;
pub mod cnf;
pub mod formula;
pub mod literal;
pub mod term;
