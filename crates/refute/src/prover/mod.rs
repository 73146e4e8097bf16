//! Engine: knowledge base plus resolution refutation.
//!
//! Axioms are normalized to clauses as they are added. `prove()` negates the
//! goal, adds its clauses to a fresh search state and resolves pairs until
//! the empty clause appears or every pair has been tried.

use crate::cnf_conversion::to_cnf;
use crate::config::{ContradictionPolicy, EngineConfig};
use crate::error::{EngineError, Result};
use crate::generating::resolve_with_unification;
use crate::logic::{Clause, Cnf, Formula};
use crate::state::{ProofResult, ResolutionState};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Knowledge base and refutation search
#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub config: EngineConfig,
    axioms: Vec<Clause>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            config,
            axioms: Vec::new(),
        }
    }

    /// Normalize an axiom and add its clauses to the knowledge base.
    ///
    /// Returns exactly the clauses that were added; an empty list means the
    /// axiom is valid. An axiom whose own CNF is unsatisfiable adds nothing
    /// and yields `None` under `ContradictionPolicy::Permit`. Under
    /// `ContradictionPolicy::Reject` it is an error, as is an axiom that
    /// makes the whole knowledge base unsatisfiable.
    pub fn add_axiom(&mut self, formula: &Formula) -> Result<Option<Vec<Clause>>> {
        let clauses = match to_cnf(formula)?.into_clauses() {
            Some(clauses) => clauses,
            None => return self.contradictory_axiom(formula),
        };

        let before = self.axioms.len();
        self.axioms.extend(clauses.iter().cloned());

        if self.config.contradiction_policy == ContradictionPolicy::Reject
            && self.axiom_cnf().is_unsatisfiable()
        {
            self.axioms.truncate(before);
            return Err(EngineError::ContradictoryAxiom {
                axiom: formula.to_string(),
            });
        }

        debug!(axiom = %formula, clauses = clauses.len(), "axiom_added");
        Ok(Some(clauses))
    }

    fn contradictory_axiom(&self, formula: &Formula) -> Result<Option<Vec<Clause>>> {
        match self.config.contradiction_policy {
            ContradictionPolicy::Permit => {
                warn!(axiom = %formula, "contradictory_axiom_ignored");
                Ok(None)
            }
            ContradictionPolicy::Reject => Err(EngineError::ContradictoryAxiom {
                axiom: formula.to_string(),
            }),
        }
    }

    /// Clauses of the knowledge base in insertion order
    pub fn axioms(&self) -> &[Clause] {
        &self.axioms
    }

    /// The whole knowledge base as one simplified CNF
    pub fn axiom_cnf(&self) -> Cnf {
        Cnf::from_clauses(self.axioms.clone()).simplify()
    }

    /// Drop every axiom
    pub fn clear(&mut self) {
        self.axioms.clear();
    }

    /// Alias of [`Engine::prove`]
    pub fn resolution_method_with_unification(&self, goal: &Formula) -> Result<ProofResult> {
        self.prove(goal)
    }

    /// Try to derive `goal` from the axioms by refuting its negation
    pub fn prove(&self, goal: &Formula) -> Result<ProofResult> {
        let negated = to_cnf(&Formula::not(goal.clone()))?;
        let mut state = ResolutionState::new(&self.axioms, self.config.record_events);

        let goal_clauses = match negated.into_clauses() {
            Some(clauses) => clauses,
            None => {
                // The negation is contradictory on its own, so the goal is valid
                debug!(goal = %goal, "goal_valid");
                let idx = state.add_negated_goal(Clause::empty());
                return Ok(ProofResult::Proved(state.extract_refutation(idx)));
            }
        };

        if goal_clauses.is_empty() {
            debug!(goal = %goal, "goal_negation_valid");
            return Ok(ProofResult::NotProved(state.summary()));
        }

        for clause in goal_clauses {
            state.add_negated_goal(clause);
        }

        debug!(
            goal = %goal,
            axioms = state.axiom_count,
            goal_clauses = state.new_count(),
            "search_started"
        );
        let result = self.search(&mut state);
        debug!(
            status = result.status(),
            resolvents = state.resolvent_count,
            pairs = state.visited.len(),
            "search_finished"
        );
        Ok(result)
    }

    fn search(&self, state: &mut ResolutionState) -> ProofResult {
        let deadline = self.config.timeout().map(|t| Instant::now() + t);

        let mut i = 0;
        while i < state.clauses.len() {
            let mut j = 0;
            while j < state.new_count() {
                if !state.mark_visited(i, j) {
                    j += 1;
                    continue;
                }

                if deadline.is_some_and(|d| Instant::now() >= d) {
                    return ProofResult::Timeout(state.summary());
                }

                let right = state.new_clause_idx(j);
                if let Some(resolvent) =
                    resolve_with_unification(&state.clauses[i], &state.clauses[right])
                {
                    trace!(left = i, right, resolvent = %resolvent, "resolved");
                    let is_empty = resolvent.is_empty();
                    let resolvent_idx = state.add_resolvent(i, right, resolvent);
                    let pool_idx = state.new_count() - 1;
                    state.mark_visited(i, pool_idx);

                    if is_empty {
                        return ProofResult::Proved(state.extract_refutation(resolvent_idx));
                    }
                    if self.config.max_resolvents > 0
                        && state.resolvent_count >= self.config.max_resolvents
                    {
                        return ProofResult::ResourceLimit(state.summary());
                    }
                }
                j += 1;
            }
            i += 1;
        }

        ProofResult::NotProved(state.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Literal, Term};
    use crate::state::Derivation;

    fn v(name: &str) -> Formula {
        Formula::atom(name)
    }

    #[test]
    fn test_add_axiom_returns_added_clauses() {
        let mut engine = Engine::default();
        let added = engine
            .add_axiom(&Formula::implies(v("a"), v("b")))
            .unwrap()
            .expect("axiom is satisfiable");
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].to_string(), "!a | b");
        assert_eq!(engine.axioms(), added.as_slice());
    }

    #[test]
    fn test_valid_axiom_adds_nothing() {
        let mut engine = Engine::default();
        let added = engine.add_axiom(&Formula::or(v("a"), Formula::not(v("a")))).unwrap();
        assert_eq!(added, Some(vec![]));
        assert!(engine.axioms().is_empty());
    }

    #[test]
    fn test_contradictory_axiom_permitted() {
        let mut engine = Engine::default();
        let added = engine.add_axiom(&Formula::and(v("a"), Formula::not(v("a")))).unwrap();
        assert_eq!(added, None);
        assert!(engine.axioms().is_empty());
    }

    #[test]
    fn test_contradictory_axiom_rejected() {
        let mut engine = Engine::new(EngineConfig {
            contradiction_policy: ContradictionPolicy::Reject,
            ..EngineConfig::default()
        });
        let err = engine
            .add_axiom(&Formula::and(v("a"), Formula::not(v("a"))))
            .unwrap_err();
        assert!(matches!(err, EngineError::ContradictoryAxiom { .. }));

        engine.add_axiom(&v("a")).unwrap();
        let err = engine.add_axiom(&Formula::not(v("a"))).unwrap_err();
        assert_eq!(
            err,
            EngineError::ContradictoryAxiom {
                axiom: "!a".to_string()
            }
        );
        assert_eq!(engine.axioms().len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut engine = Engine::default();
        engine.add_axiom(&v("a")).unwrap();
        engine.clear();
        assert!(engine.axioms().is_empty());
        assert!(engine.axiom_cnf().is_valid());
    }

    #[test]
    fn test_modus_ponens() {
        let mut engine = Engine::default();
        engine.add_axiom(&Formula::implies(v("a"), v("b"))).unwrap();
        engine.add_axiom(&v("a")).unwrap();

        let result = engine.prove(&v("b")).unwrap();
        let ProofResult::Proved(refutation) = result else {
            panic!("expected a proof");
        };
        let last = refutation.steps.last().unwrap();
        assert_eq!(last.clause_idx, refutation.empty_clause_idx);
        assert!(last.conclusion.is_empty());
        assert!(matches!(last.derivation, Derivation::Resolution { .. }));
    }

    #[test]
    fn test_valid_goal_is_proved_immediately() {
        let engine = Engine::default();
        let result = engine.prove(&Formula::or(v("a"), Formula::not(v("a")))).unwrap();
        let ProofResult::Proved(refutation) = result else {
            panic!("expected a proof");
        };
        assert_eq!(refutation.steps.len(), 1);
        assert_eq!(refutation.steps[0].derivation, Derivation::NegatedGoal);
    }

    #[test]
    fn test_unsatisfiable_goal_is_not_proved() {
        let mut engine = Engine::default();
        engine.add_axiom(&v("a")).unwrap();
        let result = engine.prove(&Formula::and(v("b"), Formula::not(v("b")))).unwrap();
        assert!(matches!(result, ProofResult::NotProved(_)));
    }

    #[test]
    fn test_search_order_and_event_log() {
        // a -> b, b -> c |- a -> c
        let mut engine = Engine::default();
        engine.add_axiom(&Formula::implies(v("a"), v("b"))).unwrap();
        engine.add_axiom(&Formula::implies(v("b"), v("c"))).unwrap();

        let result = engine.prove(&Formula::implies(v("a"), v("c"))).unwrap();
        let ProofResult::Proved(refutation) = result else {
            panic!("expected a proof");
        };
        let derived: Vec<String> = refutation.all_clauses[4..]
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(derived, vec!["b", "!b", "c", "□"]);
        assert_eq!(refutation.empty_clause_idx, 7);
    }

    #[test]
    fn test_resource_limit() {
        let mut engine = Engine::new(EngineConfig {
            max_resolvents: 1,
            ..EngineConfig::default()
        });
        engine.add_axiom(&Formula::implies(v("a"), v("b"))).unwrap();
        engine.add_axiom(&Formula::implies(v("b"), v("c"))).unwrap();

        let result = engine.prove(&Formula::implies(v("a"), v("c"))).unwrap();
        let ProofResult::ResourceLimit(summary) = result else {
            panic!("expected the resolvent budget to stop the search");
        };
        assert_eq!(summary.resolvents, 1);
    }

    #[test]
    fn test_zero_timeout() {
        let mut engine = Engine::new(EngineConfig {
            timeout_ms: Some(0),
            ..EngineConfig::default()
        });
        engine.add_axiom(&v("a")).unwrap();
        let result = engine.prove(&v("a")).unwrap();
        assert!(matches!(result, ProofResult::Timeout(_)));
    }

    #[test]
    fn test_first_order_resolution() {
        let man = |t: Term| Formula::predicate("man", vec![t]);
        let mortal = |t: Term| Formula::predicate("mortal", vec![t]);

        let mut engine = Engine::default();
        engine
            .add_axiom(&Formula::implies(man(Term::logic("X")), mortal(Term::logic("X"))))
            .unwrap();
        engine.add_axiom(&man(Term::atom("socrates"))).unwrap();

        assert!(engine.prove(&mortal(Term::atom("socrates"))).unwrap().is_proved());
        assert!(!engine.prove(&man(Term::atom("plato"))).unwrap().is_proved());
    }

    #[test]
    fn test_axiom_cnf_detects_contradiction() {
        let mut engine = Engine::default();
        engine.add_axiom(&v("a")).unwrap();
        engine.add_axiom(&Formula::not(v("a"))).unwrap();
        assert!(engine.axiom_cnf().is_unsatisfiable());
        assert_eq!(
            engine.axioms()[1].unit_literal(),
            Some(&Literal::negative(Term::atom("a")))
        );
    }
}
