//! Clauses (disjuncts): flat, deduplicated disjunctions of literals

use super::formula::Formula;
use super::literal::Literal;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A clause (disjunction of literals)
///
/// Invariant: no two literals are equivalent. Construction keeps the first
/// occurrence of each literal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
    /// Built from a literal standing alone in a conjunction rather than
    /// from a disjunction
    #[serde(default)]
    pub bare_literal: bool,
}

impl Clause {
    /// Create a new clause from literals, dropping duplicates
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause {
            literals: remove_duplicate_literals(literals),
            bare_literal: false,
        }
    }

    /// Unit clause for a literal conjunct
    pub fn from_literal(literal: Literal) -> Self {
        Clause {
            literals: vec![literal],
            bare_literal: true,
        }
    }

    /// The empty clause (contradiction)
    pub fn empty() -> Self {
        Clause {
            literals: Vec::new(),
            bare_literal: false,
        }
    }

    /// Build a clause from a disjunction tree or a single literal.
    ///
    /// Nested disjunctions are taken out of their slot and their two children
    /// are appended at the end, so `(a | b) | c` yields `c | a | b`.
    pub fn from_disjunction(formula: &Formula) -> Result<Self> {
        let mut children: Vec<&Formula> = match formula {
            Formula::Or(a, b) => vec![&**a, &**b],
            other => vec![other],
        };

        let mut i = 0;
        while i < children.len() {
            let child: &Formula = children[i];
            if let Formula::Or(a, b) = child {
                children.remove(i);
                children.push(&**a);
                children.push(&**b);
            } else {
                i += 1;
            }
        }

        let literals = children
            .into_iter()
            .map(|child| {
                Literal::from_formula(child).ok_or(EngineError::MalformedFormula {
                    construct: non_literal_name(child),
                    context: "clause",
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Clause::new(literals))
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The literal of a unit clause
    pub fn unit_literal(&self) -> Option<&Literal> {
        match self.literals.as_slice() {
            [lit] => Some(lit),
            _ => None,
        }
    }

    /// Check if this clause contains a literal and its negation
    pub fn is_tautology(&self) -> bool {
        for i in 0..self.literals.len() {
            for j in (i + 1)..self.literals.len() {
                if self.literals[i].is_complementary(&self.literals[j]) {
                    return true;
                }
            }
        }
        false
    }

    /// Check if an equivalent literal occurs in this clause
    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.iter().any(|l| l.equivalent(literal))
    }

    /// Clause equivalence: every literal of the shorter clause occurs in the
    /// longer one. A bare literal only matches another single-literal clause.
    pub fn equivalent(&self, other: &Clause) -> bool {
        if self.bare_literal || other.bare_literal {
            return match (self.unit_literal(), other.unit_literal()) {
                (Some(l1), Some(l2)) => l1.equivalent(l2),
                _ => false,
            };
        }
        let (shorter, longer) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        shorter.literals.iter().all(|lit| longer.contains(lit))
    }

    /// The clause as a right-nested disjunction. The empty clause has none.
    pub fn to_formula(&self) -> Option<Formula> {
        let mut literals = self.literals.iter().rev().map(Literal::to_formula);
        let last = literals.next()?;
        Some(literals.fold(last, |acc, lit| Formula::or(lit, acc)))
    }
}

/// Remove equivalent literals, keeping the first occurrence
pub fn remove_duplicate_literals(literals: Vec<Literal>) -> Vec<Literal> {
    let mut result: Vec<Literal> = Vec::with_capacity(literals.len());
    for lit in literals {
        if !result.iter().any(|seen| seen.equivalent(&lit)) {
            result.push(lit);
        }
    }
    result
}

fn non_literal_name(formula: &Formula) -> &'static str {
    match formula {
        Formula::Not(_) => "negation of a compound formula",
        other => other.connective_name(),
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "□")
        } else {
            for (i, lit) in self.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " | ")?;
                }
                write!(f, "{}", lit)?;
            }
            Ok(())
        }
    }
}
