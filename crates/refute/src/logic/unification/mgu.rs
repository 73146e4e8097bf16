//! Most General Unifier (MGU) computation

use super::substitution::Substitution;
use crate::logic::core::term::Term;
use thiserror::Error;

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Reasons two terms fail to unify. These are ordinary negative outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    #[error("variable {variable} occurs in {term}")]
    OccursCheck { variable: String, term: Term },
    /// Head symbols don't match
    #[error("symbol clash: {left} vs {right}")]
    SymbolClash { left: String, right: String },
    /// Arities don't match
    #[error("arity mismatch: {left} vs {right}")]
    ArityMismatch { left: usize, right: usize },
    /// Terms of different kinds, e.g. an atom against a compound
    #[error("cannot unify {left} with {right}")]
    ShapeMismatch { left: Term, right: Term },
}

/// Unify two terms starting from an empty substitution
pub fn mgu(term1: &Term, term2: &Term) -> UnificationResult {
    unify(term1, term2, &Substitution::new())
}

/// Unify two terms under an existing substitution (Robinson's algorithm)
pub fn unify(term1: &Term, term2: &Term, subst: &Substitution) -> UnificationResult {
    let t1 = subst.apply(term1);
    let t2 = subst.apply(term2);

    if t1.equivalent(&t2) {
        return Ok(subst.clone());
    }

    if let Some(var) = t1.as_variable() {
        return unify_variable(var, &t2, subst);
    }
    if let Some(var) = t2.as_variable() {
        return unify_variable(var, &t1, subst);
    }

    match (&t1, &t2) {
        (Term::Compound { name: f1, args: args1 }, Term::Compound { name: f2, args: args2 }) => {
            if f1 != f2 {
                return Err(UnificationError::SymbolClash {
                    left: f1.clone(),
                    right: f2.clone(),
                });
            }
            if args1.len() != args2.len() {
                return Err(UnificationError::ArityMismatch {
                    left: args1.len(),
                    right: args2.len(),
                });
            }

            let mut subst = subst.clone();
            for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                subst = unify(arg1, arg2, &subst)?;
            }
            Ok(subst)
        }

        (
            Term::Expr { op: op1, lhs: l1, rhs: r1 },
            Term::Expr { op: op2, lhs: l2, rhs: r2 },
        ) => {
            if op1 != op2 {
                return Err(UnificationError::SymbolClash {
                    left: op1.symbol().to_string(),
                    right: op2.symbol().to_string(),
                });
            }
            let subst = unify(l1, l2, subst)?;
            unify(r1, r2, &subst)
        }

        (Term::Atom(a), Term::Atom(b)) => Err(UnificationError::SymbolClash {
            left: a.clone(),
            right: b.clone(),
        }),

        _ => Err(UnificationError::ShapeMismatch {
            left: t1.clone(),
            right: t2.clone(),
        }),
    }
}

/// Unify a variable with a term
pub fn unify_variable(var: &str, term: &Term, subst: &Substitution) -> UnificationResult {
    if occurs_check(var, term) {
        return Err(UnificationError::OccursCheck {
            variable: var.to_string(),
            term: term.clone(),
        });
    }

    match subst.lookup(var) {
        Some(value) => unify(value, term, subst),
        None => Ok(subst.bind(var, term.clone())),
    }
}

/// Check if variable occurs in term (occurs check)
pub fn occurs_check(var: &str, term: &Term) -> bool {
    match term {
        Term::Rigid(name) | Term::Logic(name) => name == var,
        Term::Atom(_) => false,
        Term::Compound { args, .. } => args.iter().any(|arg| occurs_check(var, arg)),
        Term::Expr { lhs, rhs, .. } => occurs_check(var, lhs) || occurs_check(var, rhs),
    }
}

/// Find one substitution making every term in the list equivalent.
///
/// The first two terms are unified directly; each later term is unified with
/// the first under the accumulated substitution and the result composed in.
pub fn unify_list(terms: &[Term]) -> UnificationResult {
    let (first, second) = match terms {
        [first, second, ..] => (first, second),
        _ => return Ok(Substitution::new()),
    };

    let mut subst = mgu(first, second)?;
    for term in &terms[2..] {
        let next = mgu(&subst.apply(first), &subst.apply(term))?;
        subst = subst.compose(&next);
    }
    Ok(subst)
}
