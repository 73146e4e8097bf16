//! Variable substitutions

use crate::logic::core::clause::Clause;
use crate::logic::core::literal::Literal;
use crate::logic::core::term::Term;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A substitution mapping variable names to terms.
///
/// Values are persistent: `bind` and `compose` return new substitutions and
/// leave the receiver untouched. Bindings keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub map: IndexMap<String, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// A copy of this substitution with one more binding
    pub fn bind(&self, var: impl Into<String>, term: Term) -> Substitution {
        let mut map = self.map.clone();
        map.insert(var.into(), term);
        Substitution { map }
    }

    /// Get the term for a variable, if bound
    pub fn lookup(&self, var: &str) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &str) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Apply the substitution to a term.
    ///
    /// A bound variable is replaced by its value and the substitution is
    /// applied again to that value, so chains `X -> Y -> a` resolve fully.
    pub fn apply(&self, term: &Term) -> Term {
        let mut expanding = Vec::new();
        self.apply_inner(term, &mut expanding)
    }

    // `expanding` holds the variables currently being unfolded; a cyclic
    // chain stops at the repeated variable.
    fn apply_inner<'a>(&'a self, term: &Term, expanding: &mut Vec<&'a str>) -> Term {
        match term {
            Term::Rigid(name) | Term::Logic(name) => {
                match self.map.get_key_value(name.as_str()) {
                    Some((var, value)) if !expanding.contains(&var.as_str()) => {
                        expanding.push(var);
                        let result = self.apply_inner(value, expanding);
                        expanding.pop();
                        result
                    }
                    _ => term.clone(),
                }
            }
            Term::Atom(_) => term.clone(),
            Term::Compound { name, args } => Term::Compound {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|arg| self.apply_inner(arg, expanding))
                    .collect(),
            },
            Term::Expr { op, lhs, rhs } => Term::Expr {
                op: *op,
                lhs: Box::new(self.apply_inner(lhs, expanding)),
                rhs: Box::new(self.apply_inner(rhs, expanding)),
            },
        }
    }

    /// Apply the substitution to a literal's atom
    pub fn apply_literal(&self, literal: &Literal) -> Literal {
        Literal {
            atom: self.apply(&literal.atom),
            polarity: literal.polarity,
        }
    }

    /// Apply the substitution to every literal of a clause
    pub fn apply_clause(&self, clause: &Clause) -> Clause {
        let mut result: Clause = clause
            .literals
            .iter()
            .map(|lit| self.apply_literal(lit))
            .collect();
        result.bare_literal = clause.bare_literal;
        result
    }

    /// Compose two substitutions.
    ///
    /// Every binding of `other` is kept with `self` applied to its value;
    /// bindings of `self` that `other` does not override follow.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut map: IndexMap<String, Term> = other
            .map
            .iter()
            .map(|(var, term)| (var.clone(), self.apply(term)))
            .collect();

        for (var, term) in &self.map {
            if !map.contains_key(var) {
                map.insert(var.clone(), term.clone());
            }
        }

        Substitution { map }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", var, term)?;
        }
        write!(f, "}}")
    }
}
