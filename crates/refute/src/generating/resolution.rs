//! Binary resolution with unification

use crate::logic::{mgu, Clause, Literal};

/// Opposite polarity, with atoms that are equivalent or unify.
///
/// The unifier itself is discarded; only its existence matters.
pub fn are_contrary(lit1: &Literal, lit2: &Literal) -> bool {
    lit1.polarity != lit2.polarity
        && (lit1.atom.equivalent(&lit2.atom) || mgu(&lit1.atom, &lit2.atom).is_ok())
}

/// Positions of the first contrary pair, scanning `clause1` in the outer loop
pub fn find_contrary_pair(clause1: &Clause, clause2: &Clause) -> Option<(usize, usize)> {
    clause1.literals.iter().enumerate().find_map(|(i, lit1)| {
        clause2
            .literals
            .iter()
            .position(|lit2| are_contrary(lit1, lit2))
            .map(|j| (i, j))
    })
}

/// Resolve two clauses on their first contrary pair.
///
/// Literals of `clause1` equivalent to its side of the pair are dropped, and
/// likewise for `clause2`. The survivors of `clause1` come first. Returns
/// `None` when the clauses have no contrary pair.
pub fn resolve_with_unification(clause1: &Clause, clause2: &Clause) -> Option<Clause> {
    let (i, j) = find_contrary_pair(clause1, clause2)?;

    let mut new_literals = collect_literals_except(clause1, &clause1.literals[i]);
    new_literals.extend(collect_literals_except(clause2, &clause2.literals[j]));

    Some(Clause::new(new_literals))
}

/// Literals of a clause not equivalent to `excluded`
fn collect_literals_except(clause: &Clause, excluded: &Literal) -> Vec<Literal> {
    clause
        .literals
        .iter()
        .filter(|lit| !lit.equivalent(excluded))
        .cloned()
        .collect()
}
