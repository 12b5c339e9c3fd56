//! Conflict driven clause learning on top of the DPLL search.
use log::debug;

use uspw_puzzle::Usp;

use crate::analyze_conflict::analyze_conflict;
use crate::clause::{ClauseDb, ClauseState};
use crate::permutation::Permutation;
use crate::prop::{decided_violation, usp_propagate, Conflict, Propagator};
use crate::search::search;

/// Domain propagation plus clause unit propagation with learning.
///
/// After every decision the two are interleaved until a joint fixed point:
/// USP unit propagation first, then one pass over the learned clauses; a
/// unit clause forces an assignment and triggers another round. A
/// contradiction, a decided row hitting the forbidden predicate, or a
/// conflicting clause ends propagation with a conflict, after running
/// conflict analysis and storing the learned clause.
#[derive(Default)]
pub struct LearningPropagator {
    clauses: ClauseDb,
}

impl LearningPropagator {
    fn learn(&mut self, rho: &Permutation, sigma: &Permutation, level: usize) {
        let clause = analyze_conflict(rho, sigma, level);
        if !clause.is_empty() && self.clauses.insert(clause) {
            debug!(
                "learned clause at level {}, {} clauses total",
                level,
                self.clauses.len()
            );
        }
    }
}

impl Propagator for LearningPropagator {
    fn propagate(
        &mut self,
        puzzle: &Usp,
        rho: &mut Permutation,
        sigma: &mut Permutation,
        level: usize,
    ) -> Result<(), Conflict> {
        loop {
            usp_propagate(puzzle, rho, sigma, level);

            if rho.has_contradiction()
                || sigma.has_contradiction()
                || decided_violation(puzzle, rho, sigma)
            {
                self.learn(rho, sigma, level);
                return Err(Conflict);
            }

            let mut unit = false;
            let mut conflicting = false;
            for clause in self.clauses.iter_mut() {
                if clause.state() == ClauseState::Satisfied {
                    continue;
                }
                match clause.evaluate(rho, sigma, level) {
                    ClauseState::Conflicting => {
                        conflicting = true;
                        break;
                    }
                    ClauseState::Unit => unit = true,
                    ClauseState::Satisfied | ClauseState::Unresolved => (),
                }
            }

            if conflicting {
                self.learn(rho, sigma, level);
                return Err(Conflict);
            }
            if !unit {
                return Ok(());
            }
        }
    }

    fn backtracked(&mut self) {
        self.clauses.reset_states();
    }
}

/// Decide weakness by backtracking with clause learning: the DPLL search
/// extended with learned-clause propagation and conflict analysis.
pub fn solve(puzzle: &Usp) -> Option<(Permutation, Permutation)> {
    let mut rho = Permutation::new(puzzle.rows());
    let mut sigma = Permutation::new(puzzle.rows());
    let mut propagator = LearningPropagator::default();
    let witness = search(puzzle, &mut rho, &mut sigma, &mut propagator, 0);

    if let Some((rho, sigma)) = &witness {
        debug!(
            "weak puzzle after {} learned clauses, witness:\n{}{}",
            propagator.clauses.len(),
            rho,
            sigma
        );
    }
    witness
}
