//! DPLL-style backtracking with USP unit propagation.
use log::debug;

use uspw_puzzle::Usp;

use crate::permutation::Permutation;
use crate::prop::{usp_propagate, Conflict, Propagator};
use crate::search::search;

/// Domain-only propagation.
///
/// USP unit propagation runs after every decision; contradictions are left
/// for the driver's pruning check, so this propagator never reports a
/// conflict itself.
pub struct DomainPropagator;

impl Propagator for DomainPropagator {
    fn propagate(
        &mut self,
        puzzle: &Usp,
        rho: &mut Permutation,
        sigma: &mut Permutation,
        level: usize,
    ) -> Result<(), Conflict> {
        usp_propagate(puzzle, rho, sigma, level);
        Ok(())
    }
}

/// Decide weakness by recursive backtracking over the permutation grids
/// with USP unit propagation after every decision.
pub fn solve(puzzle: &Usp) -> Option<(Permutation, Permutation)> {
    let mut rho = Permutation::new(puzzle.rows());
    let mut sigma = Permutation::new(puzzle.rows());
    let witness = search(puzzle, &mut rho, &mut sigma, &mut DomainPropagator, 0);

    if let Some((rho, sigma)) = &witness {
        debug!("weak puzzle, witness:\n{}{}", rho, sigma);
    }
    witness
}
