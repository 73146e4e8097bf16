//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic and comparison operators carried inside terms.
///
/// These are opaque to normalization: an `Expr` is a leaf of the formula
/// tree and only unification looks inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Greater,
    Less,
    GreaterEq,
    LessEq,
    Equal,
    NotEqual,
}

impl Operator {
    /// Source-level symbol of this operator
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::GreaterEq => ">=",
            Operator::LessEq => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
        }
    }
}

/// A term in first-order logic
///
/// The derived `PartialEq` is structural. Literal comparisons inside the
/// engine use [`Term::equivalent`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Nullary predicate, proposition or constant
    Atom(String),
    /// Predicate or function applied to arguments
    Compound { name: String, args: Vec<Term> },
    /// Universally-scoped placeholder, distinguished by name only
    Rigid(String),
    /// Unification variable
    Logic(String),
    /// Binary arithmetic or comparison expression
    Expr {
        op: Operator,
        lhs: Box<Term>,
        rhs: Box<Term>,
    },
}

impl Term {
    /// Create an atom
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// Create a compound term. An empty argument list still yields a compound.
    pub fn compound(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound {
            name: name.into(),
            args,
        }
    }

    /// Create a variable by capitalization: an uppercase
    /// first letter marks a unification variable, anything else is rigid.
    pub fn variable(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.chars().next().is_some_and(char::is_uppercase) {
            Term::Logic(name)
        } else {
            Term::Rigid(name)
        }
    }

    /// Create a unification variable regardless of capitalization
    pub fn logic(name: impl Into<String>) -> Self {
        Term::Logic(name.into())
    }

    /// Create a rigid variable regardless of capitalization
    pub fn rigid(name: impl Into<String>) -> Self {
        Term::Rigid(name.into())
    }

    /// Create a binary operator expression
    pub fn expr(op: Operator, lhs: Term, rhs: Term) -> Self {
        Term::Expr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Name of the symbol heading this term (the operator symbol for expressions)
    pub fn name(&self) -> &str {
        match self {
            Term::Atom(name) | Term::Rigid(name) | Term::Logic(name) => name,
            Term::Compound { name, .. } => name,
            Term::Expr { op, .. } => op.symbol(),
        }
    }

    /// Variable name if this term can be bound by a substitution
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Term::Rigid(name) | Term::Logic(name) => Some(name),
            _ => None,
        }
    }

    /// Check if this term has no arguments
    pub fn is_nullary(&self) -> bool {
        matches!(self, Term::Atom(_) | Term::Rigid(_) | Term::Logic(_))
    }

    /// Literal equivalence.
    ///
    /// Nullary terms match on name alone. Compounds match when the names agree
    /// and each argument list is contained in the other, ignoring order and
    /// multiplicity, so `p(a, a, b)` is equivalent to `p(b, a)`. Expressions
    /// compare positionally.
    pub fn equivalent(&self, other: &Term) -> bool {
        match (self, other) {
            (a, b) if a.is_nullary() && b.is_nullary() => a.name() == b.name(),
            (
                Term::Compound { name: n1, args: a1 },
                Term::Compound { name: n2, args: a2 },
            ) => n1 == n2 && args_contained(a1, a2) && args_contained(a2, a1),
            (
                Term::Expr {
                    op: o1,
                    lhs: l1,
                    rhs: r1,
                },
                Term::Expr {
                    op: o2,
                    lhs: l2,
                    rhs: r2,
                },
            ) => o1 == o2 && l1.equivalent(l2) && r1.equivalent(r2),
            _ => false,
        }
    }
}

fn args_contained(needles: &[Term], haystack: &[Term]) -> bool {
    needles
        .iter()
        .all(|arg| haystack.iter().any(|other| arg.equivalent(other)))
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) | Term::Rigid(name) | Term::Logic(name) => write!(f, "{}", name),
            Term::Compound { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Term::Expr { op, lhs, rhs } => {
                write_operand(f, lhs)?;
                write!(f, " {} ", op)?;
                write_operand(f, rhs)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, term: &Term) -> fmt::Result {
    if matches!(term, Term::Expr { .. }) {
        write!(f, "({})", term)
    } else {
        write!(f, "{}", term)
    }
}
