//! The recursive descent shared by the backtracking solvers.
use log::trace;

use uspw_puzzle::Usp;

use crate::lit::PermId;
use crate::permutation::Permutation;
use crate::prop::Propagator;

/// Explore all extensions of the current partial assignment.
///
/// Dead branches (a contradictory permutation, or the pair of identities)
/// are pruned first. Otherwise the smallest open row of ρ is branched on,
/// falling back to σ once ρ is complete; the candidate columns are tried in
/// ascending order, running the propagator after each decision and undoing
/// both permutations at the failed level before the next candidate. When no
/// open row is left the assignment is a witness.
pub fn search<P: Propagator>(
    puzzle: &Usp,
    rho: &mut Permutation,
    sigma: &mut Permutation,
    propagator: &mut P,
    level: usize,
) -> Option<(Permutation, Permutation)> {
    if rho.has_contradiction() || sigma.has_contradiction() {
        trace!("contradiction at level {}", level);
        return None;
    }

    if rho.is_identity() && sigma.is_identity() {
        trace!("identity pair pruned at level {}", level);
        return None;
    }

    let (which, row) = match (rho.next_open_row(), sigma.next_open_row()) {
        (None, None) => {
            trace!("complete assignment at level {}", level);
            return Some((rho.clone(), sigma.clone()));
        }
        (Some(row), _) => (PermId::Rho, row),
        (None, Some(row)) => (PermId::Sigma, row),
    };

    for col in which.of(rho, sigma).open_columns(row) {
        trace!("level {}: trying {:?}({}) = {}", level, which, row, col);
        which.of_mut(rho, sigma).assign_propagate(row, col, which, level);

        if propagator.propagate(puzzle, rho, sigma, level).is_ok() {
            if let Some(witness) = search(puzzle, rho, sigma, propagator, level + 1) {
                return Some(witness);
            }
        }

        rho.undo(level);
        sigma.undo(level);
        propagator.backtracked();
    }

    None
}
