//! JSON serialization types for clauses and proof results

use crate::logic::{Clause, ClauseSet, Cnf, Literal, Term};
use crate::state::{Derivation, ProofResult, ProofStep, SearchSummary};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Atom { name: String },
    Compound { name: String, args: Vec<TermJson> },
    RigidVariable { name: String },
    LogicVariable { name: String },
    Expression {
        op: String,
        lhs: Box<TermJson>,
        rhs: Box<TermJson>,
    },
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        match term {
            Term::Atom(name) => TermJson::Atom { name: name.clone() },
            Term::Compound { name, args } => TermJson::Compound {
                name: name.clone(),
                args: args.iter().map(TermJson::from).collect(),
            },
            Term::Rigid(name) => TermJson::RigidVariable { name: name.clone() },
            Term::Logic(name) => TermJson::LogicVariable { name: name.clone() },
            Term::Expr { op, lhs, rhs } => TermJson::Expression {
                op: op.symbol().to_string(),
                lhs: Box::new(TermJson::from(&**lhs)),
                rhs: Box::new(TermJson::from(&**rhs)),
            },
        }
    }
}

/// JSON representation of a literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralJson {
    pub polarity: bool,
    pub atom: TermJson,
}

impl From<&Literal> for LiteralJson {
    fn from(lit: &Literal) -> Self {
        LiteralJson {
            polarity: lit.polarity,
            atom: TermJson::from(&lit.atom),
        }
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub literals: Vec<LiteralJson>,
    /// Display form, e.g. `!a | b`
    pub text: String,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause, id: Option<usize>) -> Self {
        ClauseJson {
            id,
            literals: clause.literals.iter().map(LiteralJson::from).collect(),
            text: clause.to_string(),
        }
    }
}

impl From<&Clause> for ClauseJson {
    fn from(clause: &Clause) -> Self {
        ClauseJson::from_clause(clause, None)
    }
}

/// JSON representation of a CNF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum CnfJson {
    Satisfiable { clauses: Vec<ClauseJson> },
    Unsatisfiable,
}

impl From<&Cnf> for CnfJson {
    fn from(cnf: &Cnf) -> Self {
        match &cnf.clauses {
            ClauseSet::Satisfiable(clauses) => CnfJson::Satisfiable {
                clauses: clauses.iter().map(ClauseJson::from).collect(),
            },
            ClauseSet::Unsatisfiable => CnfJson::Unsatisfiable,
        }
    }
}

/// JSON representation of a proof step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepJson {
    pub clause_idx: usize,
    pub rule: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub premises: Vec<usize>,
    pub clause: ClauseJson,
}

impl From<&ProofStep> for StepJson {
    fn from(step: &ProofStep) -> Self {
        let rule = match step.derivation {
            Derivation::Axiom => "Axiom",
            Derivation::NegatedGoal => "NegatedGoal",
            Derivation::Resolution { .. } => "Resolution",
        };
        StepJson {
            clause_idx: step.clause_idx,
            rule: rule.to_string(),
            premises: step.derivation.premises(),
            clause: ClauseJson::from_clause(&step.conclusion, Some(step.clause_idx)),
        }
    }
}

/// JSON representation of a proof attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum ProofResultJson {
    Proved {
        steps: Vec<StepJson>,
        empty_clause_idx: usize,
    },
    NotProved {
        final_clauses: Vec<ClauseJson>,
        resolvents: usize,
        pairs_visited: usize,
    },
    ResourceLimit {
        reason: String,
        final_clauses: Vec<ClauseJson>,
        resolvents: usize,
        pairs_visited: usize,
    },
    Timeout {
        final_clauses: Vec<ClauseJson>,
        resolvents: usize,
        pairs_visited: usize,
    },
}

fn final_clauses(summary: &SearchSummary) -> Vec<ClauseJson> {
    summary
        .clauses
        .iter()
        .enumerate()
        .map(|(idx, c)| ClauseJson::from_clause(c, Some(idx)))
        .collect()
}

impl From<&ProofResult> for ProofResultJson {
    fn from(result: &ProofResult) -> Self {
        match result {
            ProofResult::Proved(refutation) => ProofResultJson::Proved {
                steps: refutation.steps.iter().map(StepJson::from).collect(),
                empty_clause_idx: refutation.empty_clause_idx,
            },
            ProofResult::NotProved(summary) => ProofResultJson::NotProved {
                final_clauses: final_clauses(summary),
                resolvents: summary.resolvents,
                pairs_visited: summary.pairs_visited,
            },
            ProofResult::ResourceLimit(summary) => ProofResultJson::ResourceLimit {
                reason: "Resolvent limit exceeded".to_string(),
                final_clauses: final_clauses(summary),
                resolvents: summary.resolvents,
                pairs_visited: summary.pairs_visited,
            },
            ProofResult::Timeout(summary) => ProofResultJson::Timeout {
                final_clauses: final_clauses(summary),
                resolvents: summary.resolvents,
                pairs_visited: summary.pairs_visited,
            },
        }
    }
}

impl ProofResultJson {
    pub fn to_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
