//! Formula trees: terms combined with logical connectives

use super::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A formula over terms.
///
/// Variables are implicitly universally quantified; there are no quantifier
/// nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    Term(Term),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Nullary predicate shorthand
    pub fn atom(name: impl Into<String>) -> Self {
        Formula::Term(Term::atom(name))
    }

    /// Predicate applied to arguments
    pub fn predicate(name: impl Into<String>, args: Vec<Term>) -> Self {
        Formula::Term(Term::compound(name, args))
    }

    pub fn not(f: Formula) -> Self {
        Formula::Not(Box::new(f))
    }

    pub fn and(f1: Formula, f2: Formula) -> Self {
        Formula::And(Box::new(f1), Box::new(f2))
    }

    pub fn or(f1: Formula, f2: Formula) -> Self {
        Formula::Or(Box::new(f1), Box::new(f2))
    }

    pub fn implies(f1: Formula, f2: Formula) -> Self {
        Formula::Implies(Box::new(f1), Box::new(f2))
    }

    pub fn iff(f1: Formula, f2: Formula) -> Self {
        Formula::Iff(Box::new(f1), Box::new(f2))
    }

    /// Display priority; lower binds tighter. Terms have none.
    pub fn priority(&self) -> Option<u8> {
        match self {
            Formula::Term(_) => None,
            Formula::Not(_) => Some(0),
            Formula::And(_, _) => Some(1),
            Formula::Or(_, _) => Some(2),
            Formula::Implies(_, _) | Formula::Iff(_, _) => Some(3),
        }
    }

    /// Name of the connective at the root, used in error messages
    pub fn connective_name(&self) -> &'static str {
        match self {
            Formula::Term(_) => "term",
            Formula::Not(_) => "negation",
            Formula::And(_, _) => "conjunction",
            Formula::Or(_, _) => "disjunction",
            Formula::Implies(_, _) => "implication",
            Formula::Iff(_, _) => "equivalence",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Formula::Term(_) => "",
            Formula::Not(_) => "!",
            Formula::And(_, _) => "&",
            Formula::Or(_, _) => "|",
            Formula::Implies(_, _) => "->",
            Formula::Iff(_, _) => "<->",
        }
    }

    fn write_child(&self, f: &mut fmt::Formatter<'_>, child: &Formula) -> fmt::Result {
        match (child.priority(), self.priority()) {
            (Some(c), Some(p)) if c >= p => write!(f, "({})", child),
            _ => write!(f, "{}", child),
        }
    }
}

impl From<Term> for Formula {
    fn from(term: Term) -> Self {
        Formula::Term(term)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Term(t) => write!(f, "{}", t),
            Formula::Not(inner) => match **inner {
                Formula::Term(_) => write!(f, "!{}", inner),
                _ => write!(f, "!({})", inner),
            },
            Formula::And(a, b)
            | Formula::Or(a, b)
            | Formula::Implies(a, b)
            | Formula::Iff(a, b) => {
                self.write_child(f, a)?;
                write!(f, " {} ", self.symbol())?;
                self.write_child(f, b)
            }
        }
    }
}
