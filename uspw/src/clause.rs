//! Learned clauses and their store.
use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use crate::lit::Lit;
use crate::permutation::Permutation;

/// Cached evaluation state of a clause.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ClauseState {
    Unresolved,
    Satisfied,
    Conflicting,
    Unit,
}

impl Default for ClauseState {
    fn default() -> ClauseState {
        ClauseState::Unresolved
    }
}

/// A disjunction of cell literals.
///
/// The literal set is deduplicated and ordered; clause equality compares
/// the literal sets only, never the cached state.
#[derive(Clone, Default, Debug)]
pub struct Clause {
    lits: BTreeSet<Lit>,
    state: ClauseState,
}

impl Clause {
    /// Create an empty clause.
    pub fn new() -> Clause {
        Clause::default()
    }

    /// Insert a literal into the clause.
    pub fn add(&mut self, lit: Lit) {
        let _ = self.lits.insert(lit);
    }

    /// Number of distinct literals.
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    /// Whether the clause has no literals.
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// The literals in ascending cell order.
    pub fn lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.lits.iter().copied()
    }

    /// The cached state from the most recent evaluation.
    pub fn state(&self) -> ClauseState {
        self.state
    }

    /// Drop the cached state, e.g. after backtracking invalidated it.
    pub fn reset(&mut self) {
        self.state = ClauseState::Unresolved;
    }

    /// Evaluate the clause under the current assignment, forcing the last
    /// open literal when the clause has become unit.
    ///
    /// A satisfied literal settles the clause. Otherwise, when every literal
    /// is assigned against its polarity the clause is conflicting, and when
    /// exactly one literal is left unassigned it is forced: a positive
    /// literal through `assign_propagate`, a negative one through a plain
    /// false assignment, both at `level` and on the permutation the literal
    /// selects. A forced clause caches `Satisfied` but reports `Unit` so the
    /// caller knows to run another propagation pass.
    pub fn evaluate(
        &mut self,
        rho: &mut Permutation,
        sigma: &mut Permutation,
        level: usize,
    ) -> ClauseState {
        let mut contradicted = 0;
        let mut last_open = None;
        let mut satisfied = false;

        for &lit in self.lits.iter() {
            match lit.perm().of(rho, sigma).value(lit.pos()) {
                Some(value) if value == lit.is_positive() => {
                    satisfied = true;
                    break;
                }
                Some(_) => contradicted += 1,
                None => last_open = Some(lit),
            }
        }

        if satisfied {
            self.state = ClauseState::Satisfied;
            return ClauseState::Satisfied;
        }
        if contradicted == self.lits.len() {
            self.state = ClauseState::Conflicting;
            return ClauseState::Conflicting;
        }
        if contradicted + 1 == self.lits.len() {
            if let Some(lit) = last_open {
                let (row, col) = lit.pos();
                let perm = lit.perm().of_mut(rho, sigma);
                if lit.is_positive() {
                    perm.assign_propagate(row, col, lit.perm(), level);
                } else {
                    perm.assign(row, col, false, level, Vec::new());
                }
            }
            self.state = ClauseState::Satisfied;
            return ClauseState::Unit;
        }

        self.state = ClauseState::Unresolved;
        ClauseState::Unresolved
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Clause) -> bool {
        self.lits == other.lits
    }
}

impl Eq for Clause {}

/// The learned-clause store of a single solver run.
///
/// Clauses are kept in insertion order for propagation; a hash set over the
/// sorted literal sequences drops duplicates.
#[derive(Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
    keys: FxHashSet<Vec<Lit>>,
}

impl ClauseDb {
    /// Insert a clause unless an equal one is already present.
    ///
    /// Returns whether the clause was new.
    pub fn insert(&mut self, clause: Clause) -> bool {
        let key: Vec<Lit> = clause.lits().collect();
        if self.keys.insert(key) {
            self.clauses.push(clause);
            true
        } else {
            false
        }
    }

    /// Number of stored clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterate over the clauses in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Clause> {
        self.clauses.iter_mut()
    }

    /// Invalidate every cached clause state.
    pub fn reset_states(&mut self) {
        for clause in self.clauses.iter_mut() {
            clause.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lit::PermId;

    fn clause(lits: &[Lit]) -> Clause {
        let mut clause = Clause::new();
        for &lit in lits {
            clause.add(lit);
        }
        clause
    }

    #[test]
    fn literals_are_deduplicated() {
        let lit = Lit::positive((0, 1), PermId::Rho);
        let clause = clause(&[lit, lit, !lit]);
        assert_eq!(clause.len(), 2);
    }

    #[test]
    fn satisfied_by_a_matching_assignment() {
        let mut rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);
        rho.assign(0, 1, true, 0, Vec::new());

        let mut clause = clause(&[
            Lit::positive((0, 1), PermId::Rho),
            Lit::positive((1, 1), PermId::Sigma),
        ]);
        assert_eq!(clause.evaluate(&mut rho, &mut sigma, 0), ClauseState::Satisfied);
        assert_eq!(clause.state(), ClauseState::Satisfied);
    }

    #[test]
    fn conflicting_when_every_literal_is_refuted() {
        let mut rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);
        rho.assign(0, 0, false, 0, Vec::new());
        sigma.assign(1, 1, true, 0, Vec::new());

        let mut clause = clause(&[
            Lit::positive((0, 0), PermId::Rho),
            Lit::negative((1, 1), PermId::Sigma),
        ]);
        assert_eq!(clause.evaluate(&mut rho, &mut sigma, 0), ClauseState::Conflicting);
    }

    #[test]
    fn unit_forces_the_negative_remainder() {
        let mut rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);
        rho.assign(0, 0, true, 0, Vec::new());

        // rho(0) = 0 refutes the first literal, the second gets forced.
        let mut clause = clause(&[
            Lit::negative((0, 0), PermId::Rho),
            Lit::negative((1, 0), PermId::Sigma),
        ]);
        assert_eq!(clause.evaluate(&mut rho, &mut sigma, 3), ClauseState::Unit);
        assert_eq!(clause.state(), ClauseState::Satisfied);
        assert_eq!(sigma.value((1, 0)), Some(false));
        assert_eq!(sigma.node_level((1, 0)), 3);
        assert!(sigma.antecedents((1, 0)).is_empty());
    }

    #[test]
    fn unit_forces_the_positive_remainder_with_propagation() {
        let mut rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);
        sigma.assign(0, 0, false, 0, Vec::new());

        let mut clause = clause(&[
            Lit::positive((0, 0), PermId::Sigma),
            Lit::positive((1, 0), PermId::Sigma),
        ]);
        assert_eq!(clause.evaluate(&mut rho, &mut sigma, 2), ClauseState::Unit);
        assert_eq!(sigma.value((1, 0)), Some(true));
        // Uniqueness propagation ran on the forced cell.
        assert_eq!(sigma.value((1, 1)), Some(false));
        assert_eq!(
            sigma.antecedents((1, 1)),
            &[Lit::negative((1, 0), PermId::Sigma)]
        );
        assert_eq!(rho.value((1, 0)), None);
    }

    #[test]
    fn unresolved_with_multiple_open_literals() {
        let mut rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);

        let mut clause = clause(&[
            Lit::positive((0, 0), PermId::Rho),
            Lit::positive((1, 1), PermId::Sigma),
        ]);
        assert_eq!(clause.evaluate(&mut rho, &mut sigma, 0), ClauseState::Unresolved);
    }

    #[test]
    fn db_drops_duplicate_clauses() {
        let mut db = ClauseDb::default();
        let first = clause(&[
            Lit::positive((0, 0), PermId::Rho),
            Lit::negative((1, 1), PermId::Sigma),
        ]);
        // Same literal set, different insertion order.
        let second = clause(&[
            Lit::negative((1, 1), PermId::Sigma),
            Lit::positive((0, 0), PermId::Rho),
        ]);

        assert!(db.insert(first));
        assert!(!db.insert(second));
        assert_eq!(db.len(), 1);
    }
}
