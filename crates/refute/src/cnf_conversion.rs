//! Conversion of formulas to Conjunctive Normal Form (CNF)
//!
//! Five structural rewrite passes run in order: equivalence elimination,
//! implication elimination, double-negation removal, De Morgan pushing and
//! distribution of disjunction over conjunction. The result is read into a
//! [`Cnf`] container and simplified.

use crate::error::Result;
use crate::logic::{Cnf, Formula};
use tracing::trace;

/// Every stage of one normalization run
#[derive(Debug, Clone)]
pub struct Normalization {
    pub original: Formula,
    /// After equivalence, implication and double-negation removal
    pub without_implications: Formula,
    pub de_morgan: Formula,
    pub grouped: Formula,
    /// Clause set before simplification
    pub cnf: Cnf,
    pub simplified: Cnf,
}

/// Convert a formula to simplified CNF
pub fn to_cnf(formula: &Formula) -> Result<Cnf> {
    normalize_stages(formula).map(|stages| stages.simplified)
}

/// Run the normalization pipeline, keeping every intermediate form
pub fn normalize_stages(formula: &Formula) -> Result<Normalization> {
    trace!(formula = %formula, "cnf_original");

    let without_implications =
        remove_double_negations(&remove_implications(&remove_equivalences(formula)));
    trace!(formula = %without_implications, "cnf_without_implications");

    let de_morgan = apply_de_morgan(&without_implications);
    trace!(formula = %de_morgan, "cnf_de_morgan");

    let grouped = group_conjunctions(&de_morgan);
    trace!(formula = %grouped, "cnf_grouped");

    let cnf = Cnf::from_formula(&grouped)?;
    trace!(cnf = %cnf, "cnf_built");

    let simplified = cnf.clone().simplify();
    trace!(cnf = %simplified, "cnf_simplified");

    Ok(Normalization {
        original: formula.clone(),
        without_implications,
        de_morgan,
        grouped,
        cnf,
        simplified,
    })
}

/// `A <-> B` becomes `(!A | B) & (A | !B)`
pub fn remove_equivalences(formula: &Formula) -> Formula {
    match formula {
        Formula::Iff(a, b) => {
            let a = remove_equivalences(a);
            let b = remove_equivalences(b);
            Formula::and(
                Formula::or(Formula::not(a.clone()), b.clone()),
                Formula::or(a, Formula::not(b)),
            )
        }
        Formula::Term(_) => formula.clone(),
        Formula::Not(f) => Formula::not(remove_equivalences(f)),
        Formula::And(a, b) => Formula::and(remove_equivalences(a), remove_equivalences(b)),
        Formula::Or(a, b) => Formula::or(remove_equivalences(a), remove_equivalences(b)),
        Formula::Implies(a, b) => {
            Formula::implies(remove_equivalences(a), remove_equivalences(b))
        }
    }
}

/// `A -> B` becomes `!A | B`
pub fn remove_implications(formula: &Formula) -> Formula {
    match formula {
        Formula::Implies(a, b) => {
            Formula::or(Formula::not(remove_implications(a)), remove_implications(b))
        }
        Formula::Term(_) => formula.clone(),
        Formula::Not(f) => Formula::not(remove_implications(f)),
        Formula::And(a, b) => Formula::and(remove_implications(a), remove_implications(b)),
        Formula::Or(a, b) => Formula::or(remove_implications(a), remove_implications(b)),
        Formula::Iff(a, b) => Formula::iff(remove_implications(a), remove_implications(b)),
    }
}

/// `!!A` becomes `A`
pub fn remove_double_negations(formula: &Formula) -> Formula {
    match formula {
        Formula::Not(inner) => match &**inner {
            Formula::Not(f) => remove_double_negations(f),
            _ => Formula::not(remove_double_negations(inner)),
        },
        Formula::Term(_) => formula.clone(),
        Formula::And(a, b) => Formula::and(remove_double_negations(a), remove_double_negations(b)),
        Formula::Or(a, b) => Formula::or(remove_double_negations(a), remove_double_negations(b)),
        Formula::Implies(a, b) => {
            Formula::implies(remove_double_negations(a), remove_double_negations(b))
        }
        Formula::Iff(a, b) => Formula::iff(remove_double_negations(a), remove_double_negations(b)),
    }
}

/// Push negations through conjunctions and disjunctions
pub fn apply_de_morgan(formula: &Formula) -> Formula {
    match formula {
        Formula::Not(inner) => match &**inner {
            Formula::And(a, b) => Formula::or(
                apply_de_morgan(&Formula::not((**a).clone())),
                apply_de_morgan(&Formula::not((**b).clone())),
            ),
            Formula::Or(a, b) => Formula::and(
                apply_de_morgan(&Formula::not((**a).clone())),
                apply_de_morgan(&Formula::not((**b).clone())),
            ),
            Formula::Not(f) => apply_de_morgan(f),
            Formula::Term(_) => formula.clone(),
            _ => Formula::not(apply_de_morgan(inner)),
        },
        Formula::Term(_) => formula.clone(),
        Formula::And(a, b) => Formula::and(apply_de_morgan(a), apply_de_morgan(b)),
        Formula::Or(a, b) => Formula::or(apply_de_morgan(a), apply_de_morgan(b)),
        Formula::Implies(a, b) => Formula::implies(apply_de_morgan(a), apply_de_morgan(b)),
        Formula::Iff(a, b) => Formula::iff(apply_de_morgan(a), apply_de_morgan(b)),
    }
}

/// Distribute disjunction over conjunction.
///
/// `(X & Y) | Z` and `Z | (X & Y)` both become `(Z | X) & (Z | Y)`, with
/// every part grouped recursively.
pub fn group_conjunctions(formula: &Formula) -> Formula {
    match formula {
        Formula::Or(first, second) => match (&**first, &**second) {
            (Formula::And(x, y), z) | (z, Formula::And(x, y)) => {
                let z = group_conjunctions(z);
                Formula::and(
                    group_conjunctions(&Formula::or(z.clone(), group_conjunctions(x))),
                    group_conjunctions(&Formula::or(z, group_conjunctions(y))),
                )
            }
            _ => {
                let first = group_conjunctions(first);
                let second = group_conjunctions(second);
                let regroup = matches!(first, Formula::And(_, _))
                    || matches!(second, Formula::And(_, _));
                let disjunction = Formula::or(first, second);
                if regroup {
                    group_conjunctions(&disjunction)
                } else {
                    disjunction
                }
            }
        },
        Formula::Term(_) => formula.clone(),
        Formula::Not(f) => Formula::not(group_conjunctions(f)),
        Formula::And(a, b) => Formula::and(group_conjunctions(a), group_conjunctions(b)),
        Formula::Implies(a, b) => Formula::implies(group_conjunctions(a), group_conjunctions(b)),
        Formula::Iff(a, b) => Formula::iff(group_conjunctions(a), group_conjunctions(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Clause, Literal, Term};
    use proptest::prelude::*;

    fn v(name: &str) -> Formula {
        Formula::atom(name)
    }

    fn not(f: Formula) -> Formula {
        Formula::not(f)
    }

    fn and(a: Formula, b: Formula) -> Formula {
        Formula::and(a, b)
    }

    fn or(a: Formula, b: Formula) -> Formula {
        Formula::or(a, b)
    }

    fn implies(a: Formula, b: Formula) -> Formula {
        Formula::implies(a, b)
    }

    fn iff(a: Formula, b: Formula) -> Formula {
        Formula::iff(a, b)
    }

    #[test]
    fn test_remove_implications() {
        let cases = vec![
            (implies(v("a"), v("b")), or(not(v("a")), v("b"))),
            (
                and(implies(v("a"), v("b")), v("a")),
                and(or(not(v("a")), v("b")), v("a")),
            ),
            (
                or(implies(v("a"), v("b")), v("a")),
                or(or(not(v("a")), v("b")), v("a")),
            ),
            (
                iff(implies(v("a"), v("b")), or(not(v("a")), v("b"))),
                iff(or(not(v("a")), v("b")), or(not(v("a")), v("b"))),
            ),
            (
                implies(implies(v("a"), v("b")), v("c")),
                or(not(or(not(v("a")), v("b"))), v("c")),
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(remove_implications(&input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_remove_equivalences() {
        let a_iff_b = and(or(not(v("a")), v("b")), or(v("a"), not(v("b"))));
        assert_eq!(remove_equivalences(&iff(v("a"), v("b"))), a_iff_b);
        assert_eq!(
            remove_equivalences(&and(iff(v("a"), v("b")), v("a"))),
            and(a_iff_b.clone(), v("a"))
        );

        let rhs = or(not(v("a")), v("b"));
        assert_eq!(
            remove_equivalences(&iff(iff(v("a"), v("b")), rhs.clone())),
            and(
                or(not(a_iff_b.clone()), rhs.clone()),
                or(a_iff_b, not(rhs)),
            )
        );
    }

    #[test]
    fn test_remove_double_negations() {
        assert_eq!(remove_double_negations(&not(not(v("a")))), v("a"));
        assert_eq!(
            remove_double_negations(&or(not(not(v("a"))), v("b"))),
            or(v("a"), v("b"))
        );
        assert_eq!(
            remove_double_negations(&not(not(or(v("a"), v("b"))))),
            or(v("a"), v("b"))
        );
        assert_eq!(remove_double_negations(&not(not(not(v("a"))))), not(v("a")));
    }

    #[test]
    fn test_apply_de_morgan() {
        assert_eq!(
            apply_de_morgan(&not(and(v("a"), v("b")))),
            or(not(v("a")), not(v("b")))
        );
        assert_eq!(
            apply_de_morgan(&not(or(v("a"), v("b")))),
            and(not(v("a")), not(v("b")))
        );
        assert_eq!(
            apply_de_morgan(&not(or(not(and(v("a"), v("b"))), v("c")))),
            and(and(v("a"), v("b")), not(v("c")))
        );
    }

    #[test]
    fn test_group_conjunctions() {
        assert_eq!(
            group_conjunctions(&or(v("a"), and(v("b"), v("c")))),
            and(or(v("a"), v("b")), or(v("a"), v("c")))
        );
        assert_eq!(
            group_conjunctions(&or(v("a"), and(and(v("b"), v("c")), v("d")))),
            and(
                and(or(v("a"), v("b")), or(v("a"), v("c"))),
                or(v("a"), v("d"))
            )
        );
        assert_eq!(
            group_conjunctions(&or(and(v("a"), v("b")), v("c"))),
            and(or(v("c"), v("a")), or(v("c"), v("b")))
        );
    }

    #[test]
    fn test_modus_ponens_is_valid() {
        // (p & (p -> q)) -> q
        let f = implies(and(v("p"), implies(v("p"), v("q"))), v("q"));
        let stages = normalize_stages(&f).unwrap();

        let lit = |name: &str, polarity: bool| Literal {
            atom: Term::atom(name),
            polarity,
        };
        let expected = Cnf::from_clauses(vec![
            Clause::new(vec![lit("p", true), lit("p", false), lit("q", true)]),
            Clause::new(vec![lit("p", false), lit("q", true), lit("q", false)]),
        ]);
        assert!(stages.cnf.equivalent(&expected), "got {}", stages.cnf);
        assert!(stages.simplified.is_valid());
        assert!(to_cnf(&f).unwrap().is_valid());
    }

    #[test]
    fn test_contradiction_is_unsatisfiable() {
        let cnf = to_cnf(&and(v("a"), not(v("a")))).unwrap();
        assert!(cnf.is_unsatisfiable());
    }

    #[test]
    fn test_equivalence_shape() {
        let cnf = to_cnf(&iff(v("a"), v("b"))).unwrap();
        assert_eq!(cnf.to_string(), "(!a | b) & (a | !b)");
    }

    #[test]
    fn test_predicates_pass_through() {
        let man = Formula::predicate("man", vec![Term::logic("X")]);
        let mortal = Formula::predicate("mortal", vec![Term::logic("X")]);
        let cnf = to_cnf(&implies(man, mortal)).unwrap();
        assert_eq!(cnf.to_string(), "(!man(X) | mortal(X))");
    }

    fn arb_formula(max_depth: u32) -> BoxedStrategy<Formula> {
        let leaf = prop_oneof![Just("a"), Just("b"), Just("c")].prop_map(Formula::atom);
        if max_depth == 0 {
            leaf.boxed()
        } else {
            let sub = || arb_formula(max_depth - 1);
            prop_oneof![
                2 => leaf,
                1 => sub().prop_map(Formula::not),
                1 => (sub(), sub()).prop_map(|(a, b)| Formula::and(a, b)),
                1 => (sub(), sub()).prop_map(|(a, b)| Formula::or(a, b)),
                1 => (sub(), sub()).prop_map(|(a, b)| Formula::implies(a, b)),
                1 => (sub(), sub()).prop_map(|(a, b)| Formula::iff(a, b)),
            ]
            .boxed()
        }
    }

    proptest! {
        /// Normalization never meets a malformed tree
        #[test]
        fn to_cnf_is_total(f in arb_formula(3)) {
            prop_assert!(to_cnf(&f).is_ok());
        }

        /// A CNF is a fixed point of normalization
        #[test]
        fn cnf_is_fixed_point(f in arb_formula(3)) {
            let cnf = to_cnf(&f).unwrap();
            if let Some(g) = cnf.to_formula() {
                let again = to_cnf(&g).unwrap();
                prop_assert!(again.equivalent(&cnf), "{} vs {}", again, cnf);
            }
        }

        /// Removing double negations twice changes nothing
        #[test]
        fn double_negation_removal_is_idempotent(f in arb_formula(4)) {
            let once = remove_double_negations(&f);
            prop_assert_eq!(remove_double_negations(&once), once);
        }
    }
}
