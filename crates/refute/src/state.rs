//! Core state types for the refutation search.
//!
//! This module holds the clause arena, the visited-pair set, the event log
//! and the proof representation.

use crate::json::ProofResultJson;
use crate::logic::Clause;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Derivation
// =============================================================================

/// How a clause entered the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum Derivation {
    Axiom,
    NegatedGoal,
    /// Resolvent of two earlier clauses (arena indices)
    Resolution { left: usize, right: usize },
}

impl Derivation {
    /// Arena indices of the premises
    pub fn premises(&self) -> Vec<usize> {
        match self {
            Derivation::Axiom | Derivation::NegatedGoal => vec![],
            Derivation::Resolution { left, right } => vec![*left, *right],
        }
    }
}

// =============================================================================
// Proof
// =============================================================================

/// A single step in a refutation. Every step produces a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    pub clause_idx: usize,
    pub derivation: Derivation,
    pub conclusion: Clause,
}

/// The clauses that led to the empty clause, parents before children
#[derive(Debug, Clone)]
pub struct Refutation {
    pub steps: Vec<ProofStep>,
    pub empty_clause_idx: usize,
    /// Every clause in the arena when the search stopped
    pub all_clauses: Vec<Clause>,
    pub event_log: EventLog,
}

/// What a search that did not find the empty clause got through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    pub clauses: Vec<Clause>,
    pub axiom_count: usize,
    pub resolvents: usize,
    pub pairs_visited: usize,
    pub event_log: EventLog,
}

// =============================================================================
// StateChange & EventLog
// =============================================================================

/// Atomic additions to the clause arena
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StateChange {
    /// Knowledge-base clause placed in the arena
    Axiom { clause_idx: usize, clause: Clause },
    /// Clause of the negated goal added to the new pool
    NegatedGoal { clause_idx: usize, clause: Clause },
    /// Resolvent of `left` and `right` added to the new pool
    Resolve {
        left: usize,
        right: usize,
        resolvent_idx: usize,
        clause: Clause,
    },
}

pub type EventLog = Vec<StateChange>;

// =============================================================================
// ProofResult
// =============================================================================

/// Result of a proof attempt
#[derive(Debug, Clone)]
pub enum ProofResult {
    /// Empty clause derived - the goal follows from the axioms
    Proved(Refutation),
    /// Every pair visited without deriving the empty clause
    NotProved(SearchSummary),
    /// `max_resolvents` reached
    ResourceLimit(SearchSummary),
    /// `timeout_ms` reached
    Timeout(SearchSummary),
}

impl ProofResult {
    pub fn is_proved(&self) -> bool {
        matches!(self, ProofResult::Proved(_))
    }

    /// Short label for display and logging
    pub fn status(&self) -> &'static str {
        match self {
            ProofResult::Proved(_) => "proved",
            ProofResult::NotProved(_) => "not_proved",
            ProofResult::ResourceLimit(_) => "resource_limit",
            ProofResult::Timeout(_) => "timeout",
        }
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> ProofResultJson {
        self.into()
    }
}

// =============================================================================
// ResolutionState
// =============================================================================

/// Data container for one proof attempt.
///
/// The arena holds the axioms at `0..axiom_count` followed by the new pool:
/// negated-goal clauses, then resolvents in derivation order. Visited pairs
/// are `(arena index, new-pool index)`.
pub struct ResolutionState {
    pub clauses: Vec<Clause>,
    pub derivations: Vec<Derivation>,
    pub axiom_count: usize,
    pub visited: IndexSet<(usize, usize)>,
    pub event_log: EventLog,
    pub resolvent_count: usize,
    record_events: bool,
}

impl ResolutionState {
    pub fn new(axioms: &[Clause], record_events: bool) -> Self {
        let mut state = ResolutionState {
            clauses: Vec::with_capacity(axioms.len()),
            derivations: Vec::with_capacity(axioms.len()),
            axiom_count: axioms.len(),
            visited: IndexSet::new(),
            event_log: Vec::new(),
            resolvent_count: 0,
            record_events,
        };
        for clause in axioms {
            let clause_idx = state.push(clause.clone(), Derivation::Axiom);
            state.log(|| StateChange::Axiom {
                clause_idx,
                clause: clause.clone(),
            });
        }
        state
    }

    /// Add a clause of the negated goal to the new pool
    pub fn add_negated_goal(&mut self, clause: Clause) -> usize {
        let clause_idx = self.push(clause.clone(), Derivation::NegatedGoal);
        self.log(|| StateChange::NegatedGoal { clause_idx, clause });
        clause_idx
    }

    /// Add a resolvent of two arena clauses to the new pool
    pub fn add_resolvent(&mut self, left: usize, right: usize, clause: Clause) -> usize {
        let resolvent_idx = self.push(clause.clone(), Derivation::Resolution { left, right });
        self.resolvent_count += 1;
        self.log(|| StateChange::Resolve {
            left,
            right,
            resolvent_idx,
            clause,
        });
        resolvent_idx
    }

    /// Number of clauses in the new pool
    pub fn new_count(&self) -> usize {
        self.clauses.len() - self.axiom_count
    }

    /// Arena index of a new-pool position
    pub fn new_clause_idx(&self, j: usize) -> usize {
        self.axiom_count + j
    }

    /// Mark a pair visited; false if it already was
    pub fn mark_visited(&mut self, i: usize, j: usize) -> bool {
        self.visited.insert((i, j))
    }

    /// Collect the derivation of a clause by walking premises backwards
    pub fn extract_refutation(&self, empty_clause_idx: usize) -> Refutation {
        let mut proof_clauses = Vec::new();
        let mut seen = HashSet::new();
        let mut to_visit = vec![empty_clause_idx];

        while let Some(idx) = to_visit.pop() {
            if idx >= self.clauses.len() || !seen.insert(idx) {
                continue;
            }
            proof_clauses.push(idx);
            to_visit.extend(self.derivations[idx].premises());
        }

        // Premises always have lower indices than their resolvent
        proof_clauses.sort_unstable();

        Refutation {
            steps: proof_clauses
                .into_iter()
                .map(|idx| ProofStep {
                    clause_idx: idx,
                    derivation: self.derivations[idx],
                    conclusion: self.clauses[idx].clone(),
                })
                .collect(),
            empty_clause_idx,
            all_clauses: self.clauses.clone(),
            event_log: self.event_log.clone(),
        }
    }

    pub fn summary(&self) -> SearchSummary {
        SearchSummary {
            clauses: self.clauses.clone(),
            axiom_count: self.axiom_count,
            resolvents: self.resolvent_count,
            pairs_visited: self.visited.len(),
            event_log: self.event_log.clone(),
        }
    }

    fn push(&mut self, clause: Clause, derivation: Derivation) -> usize {
        self.clauses.push(clause);
        self.derivations.push(derivation);
        self.clauses.len() - 1
    }

    fn log(&mut self, change: impl FnOnce() -> StateChange) {
        if self.record_events {
            self.event_log.push(change());
        }
    }
}
