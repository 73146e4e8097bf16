//! Literals: possibly negated terms inside a clause

use super::formula::Formula;
use super::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal (positive or negative term)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub atom: Term,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(atom: Term) -> Self {
        Literal {
            atom,
            polarity: true,
        }
    }

    /// Create a new negative literal
    pub fn negative(atom: Term) -> Self {
        Literal {
            atom,
            polarity: false,
        }
    }

    /// Read a literal off a formula. Returns `None` unless the formula is a
    /// term or a negated term.
    pub fn from_formula(formula: &Formula) -> Option<Self> {
        match formula {
            Formula::Term(t) => Some(Literal::positive(t.clone())),
            Formula::Not(inner) => match &**inner {
                Formula::Term(t) => Some(Literal::negative(t.clone())),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            polarity: !self.polarity,
        }
    }

    /// Same polarity and equivalent atoms
    pub fn equivalent(&self, other: &Literal) -> bool {
        self.polarity == other.polarity && self.atom.equivalent(&other.atom)
    }

    /// One literal is the negation of the other
    pub fn is_complementary(&self, other: &Literal) -> bool {
        self.polarity != other.polarity && self.atom.equivalent(&other.atom)
    }

    pub fn to_formula(&self) -> Formula {
        let term = Formula::Term(self.atom.clone());
        if self.polarity {
            term
        } else {
            Formula::not(term)
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "!")?;
        }
        write!(f, "{}", self.atom)
    }
}
