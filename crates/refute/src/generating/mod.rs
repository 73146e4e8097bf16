//! Generating inference rules

pub mod resolution;

pub use resolution::{are_contrary, find_contrary_pair, resolve_with_unification};
