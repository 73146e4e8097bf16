//! Conjunctive normal form container

use super::clause::Clause;
use super::formula::Formula;
use super::literal::Literal;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clauses of a CNF, or the marker for a set known to be unsatisfiable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClauseSet {
    /// Conjunction of the clauses. No clauses at all is the valid formula.
    Satisfiable(Vec<Clause>),
    Unsatisfiable,
}

/// A formula in conjunctive normal form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cnf {
    pub clauses: ClauseSet,
}

impl Cnf {
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        Cnf {
            clauses: ClauseSet::Satisfiable(clauses),
        }
    }

    pub fn unsatisfiable() -> Self {
        Cnf {
            clauses: ClauseSet::Unsatisfiable,
        }
    }

    /// Build the clause set of a formula already in clause form.
    ///
    /// A disjunction becomes a single clause and a literal a bare unit clause. Conjunctions are
    /// flattened the same way clauses are: a nested conjunction leaves its
    /// slot and its children go to the end. Anything else is malformed.
    pub fn from_formula(formula: &Formula) -> Result<Self> {
        let mut children: Vec<&Formula> = match formula {
            Formula::And(a, b) => vec![&**a, &**b],
            other => vec![other],
        };

        let mut i = 0;
        while i < children.len() {
            let child: &Formula = children[i];
            if let Formula::And(a, b) = child {
                children.remove(i);
                children.push(&**a);
                children.push(&**b);
            } else {
                i += 1;
            }
        }

        let context = if matches!(formula, Formula::And(_, _)) {
            "conjunction"
        } else {
            "clause set"
        };

        let clauses = children
            .into_iter()
            .map(|child| match child {
                Formula::Or(_, _) => Clause::from_disjunction(child),
                f => Literal::from_formula(f)
                    .map(Clause::from_literal)
                    .ok_or(EngineError::MalformedFormula {
                        construct: f.connective_name(),
                        context,
                    }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Cnf::from_clauses(clauses))
    }

    /// Simplify the clause set.
    ///
    /// A pair of complementary unit clauses (or an empty clause) makes the
    /// whole set unsatisfiable. Otherwise clauses equivalent to an earlier
    /// one are dropped, then tautologies.
    pub fn simplify(self) -> Cnf {
        let clauses = match self.clauses {
            ClauseSet::Unsatisfiable => return Cnf::unsatisfiable(),
            ClauseSet::Satisfiable(clauses) => clauses,
        };

        if clauses.iter().any(Clause::is_empty) || has_complementary_units(&clauses) {
            return Cnf::unsatisfiable();
        }

        let mut kept: Vec<Clause> = Vec::with_capacity(clauses.len());
        for clause in clauses {
            if !kept.iter().any(|k| k.equivalent(&clause)) {
                kept.push(clause);
            }
        }
        kept.retain(|c| !c.is_tautology());

        Cnf::from_clauses(kept)
    }

    /// Clauses of the set; empty when unsatisfiable
    pub fn clauses(&self) -> &[Clause] {
        match &self.clauses {
            ClauseSet::Satisfiable(clauses) => clauses,
            ClauseSet::Unsatisfiable => &[],
        }
    }

    pub fn into_clauses(self) -> Option<Vec<Clause>> {
        match self.clauses {
            ClauseSet::Satisfiable(clauses) => Some(clauses),
            ClauseSet::Unsatisfiable => None,
        }
    }

    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self.clauses, ClauseSet::Unsatisfiable)
    }

    /// Satisfiable with no clauses left
    pub fn is_valid(&self) -> bool {
        matches!(&self.clauses, ClauseSet::Satisfiable(c) if c.is_empty())
    }

    /// Each clause of either side has an equivalent clause on the other side
    pub fn equivalent(&self, other: &Cnf) -> bool {
        match (&self.clauses, &other.clauses) {
            (ClauseSet::Unsatisfiable, ClauseSet::Unsatisfiable) => true,
            (ClauseSet::Satisfiable(a), ClauseSet::Satisfiable(b)) => {
                a.iter().all(|c| b.iter().any(|d| c.equivalent(d)))
                    && b.iter().all(|d| a.iter().any(|c| d.equivalent(c)))
            }
            _ => false,
        }
    }

    /// The set as a right-nested conjunction of clauses. Valid and
    /// unsatisfiable sets have no formula.
    pub fn to_formula(&self) -> Option<Formula> {
        let mut clauses = self.clauses().iter().rev().filter_map(Clause::to_formula);
        let last = clauses.next()?;
        Some(clauses.fold(last, |acc, clause| Formula::and(clause, acc)))
    }
}

fn has_complementary_units(clauses: &[Clause]) -> bool {
    let units: Vec<_> = clauses.iter().filter_map(Clause::unit_literal).collect();
    units
        .iter()
        .enumerate()
        .any(|(i, l1)| units[i + 1..].iter().any(|l2| l1.is_complementary(l2)))
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.clauses {
            ClauseSet::Unsatisfiable => write!(f, "Unsatisfiable"),
            ClauseSet::Satisfiable(clauses) if clauses.is_empty() => write!(f, "Valid"),
            ClauseSet::Satisfiable(clauses) => {
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    if clause.len() > 1 {
                        write!(f, "({})", clause)?;
                    } else {
                        write!(f, "{}", clause)?;
                    }
                }
                Ok(())
            }
        }
    }
}
