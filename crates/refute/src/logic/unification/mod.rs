//! Unification and substitution for first-order terms

pub mod mgu;
pub mod substitution;


pub use mgu::{
    mgu, occurs_check, unify, unify_list, unify_variable, UnificationError, UnificationResult,
};
pub use substitution::Substitution;
