//! Learns a new clause by tracing a contradiction through the implication
//! graph.
use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::clause::Clause;
use crate::lit::{Lit, PermId};
use crate::permutation::Permutation;

/// Walk the implication graph backwards from the contradictory rows at the
/// given decision level and collect the learned clause.
///
/// The queue starts from the conflict seeds of both permutations. A popped
/// literal assigned at the conflict level is replaced by its antecedents;
/// one without antecedents is a decision (or an otherwise unexplained
/// assignment) and joins the clause, as does every literal decided at an
/// earlier level. Each node is expanded at most once.
///
/// The resulting clause excludes the discovered conflict from future
/// exploration; it may be empty when the conflict came from a learned
/// clause alone, in which case there is nothing new to record.
pub fn analyze_conflict(rho: &Permutation, sigma: &Permutation, level: usize) -> Clause {
    let mut queue: VecDeque<Lit> = rho
        .contradiction_antecedents(level, PermId::Rho)
        .into_iter()
        .chain(sigma.contradiction_antecedents(level, PermId::Sigma))
        .collect();

    let mut seen: FxHashSet<Lit> = FxHashSet::default();
    let mut clause = Clause::new();

    while let Some(lit) = queue.pop_front() {
        if !seen.insert(lit) {
            continue;
        }

        let perm = lit.perm().of(rho, sigma);
        if perm.node_level(lit.pos()) == level {
            let antecedents = perm.antecedents(lit.pos());
            if antecedents.is_empty() {
                clause.add(lit);
            } else {
                queue.extend(antecedents.iter().copied());
            }
        } else {
            clause.add(lit);
        }
    }

    clause
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_levels_enter_the_clause_directly() {
        let rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);
        sigma.assign_propagate(0, 0, PermId::Sigma, 0);
        sigma.assign(1, 1, false, 1, Vec::new());

        // Row 1 of sigma is now fully false: (1, 0) through the column
        // propagation of the level-0 decision, (1, 1) unexplained at the
        // conflict level.
        assert!(sigma.has_contradiction());

        let clause = analyze_conflict(&rho, &sigma, 1);
        let lits: Vec<Lit> = clause.lits().collect();
        assert_eq!(
            lits,
            vec![
                Lit::positive((1, 0), PermId::Sigma),
                Lit::positive((1, 1), PermId::Sigma),
            ]
        );
    }

    #[test]
    fn current_level_assignments_resolve_to_their_sources() {
        let rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);
        // A single level closes row 1 entirely: the decision sigma(0) = 0
        // excludes (1, 0), and domain propagation excludes (1, 1).
        sigma.assign_propagate(0, 0, PermId::Sigma, 3);
        sigma.assign(1, 1, false, 3, Vec::new());
        assert!(sigma.has_contradiction());

        let clause = analyze_conflict(&rho, &sigma, 3);
        let lits: Vec<Lit> = clause.lits().collect();
        // (1, 0) resolves to the negation of the decision; (1, 1) has no
        // antecedents and stands for itself.
        assert_eq!(
            lits,
            vec![
                Lit::negative((0, 0), PermId::Sigma),
                Lit::positive((1, 1), PermId::Sigma),
            ]
        );
    }

    #[test]
    fn no_contradiction_learns_nothing() {
        let rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);
        sigma.assign_propagate(0, 1, PermId::Sigma, 0);

        assert!(analyze_conflict(&rho, &sigma, 0).is_empty());
    }
}
