//! Domain propagation and the propagation capability of the solvers.
use uspw_puzzle::Usp;

use crate::permutation::Permutation;

/// Marker for a propagation pass that ran into a conflict.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Conflict;

/// The propagation capability the search driver is generic over.
///
/// The DPLL solver plugs in plain domain propagation; the CDCL solver adds
/// clause unit propagation and records a learned clause before reporting a
/// conflict.
pub trait Propagator {
    /// Run propagation to a fixed point after the decision at `level`.
    ///
    /// `Err(Conflict)` tells the driver to abandon the candidate without
    /// descending.
    fn propagate(
        &mut self,
        puzzle: &Usp,
        rho: &mut Permutation,
        sigma: &mut Permutation,
        level: usize,
    ) -> Result<(), Conflict>;

    /// Called after the driver has undone a failed decision.
    fn backtracked(&mut self) {}
}

/// USP unit propagation.
///
/// For every row `i` where exactly one of ρ(i), σ(i) is decided, the
/// forbidden triple predicate pins down cells of the other permutation:
/// with ρ(i) = r decided, any column `j` with `Q(i, r, j)` cannot be σ's
/// image of `i`, and symmetrically. The excluded cells are assigned false
/// at `level` without antecedents.
pub fn usp_propagate(puzzle: &Usp, rho: &mut Permutation, sigma: &mut Permutation, level: usize) {
    for i in 0..puzzle.rows() {
        match (rho.image(i), sigma.image(i)) {
            (Some(r), None) => {
                for j in 0..puzzle.rows() {
                    if puzzle.query(i, r, j) {
                        sigma.assign(i, j, false, level, Vec::new());
                    }
                }
            }
            (None, Some(s)) => {
                for j in 0..puzzle.rows() {
                    if puzzle.query(i, j, s) {
                        rho.assign(i, j, false, level, Vec::new());
                    }
                }
            }
            _ => (),
        }
    }
}

/// Whether some row with both images decided hits the forbidden predicate.
///
/// Clause forcing can decide σ(i) before ρ(i); once both are in place the
/// one-sided rule of [`usp_propagate`] never re-examines the pair, so the
/// learning propagator checks decided rows directly.
pub fn decided_violation(puzzle: &Usp, rho: &Permutation, sigma: &Permutation) -> bool {
    (0..puzzle.rows()).any(|i| match (rho.image(i), sigma.image(i)) {
        (Some(r), Some(s)) => puzzle.query(i, r, s),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lit::PermId;

    fn weak_puzzle() -> Usp {
        Usp::new(vec![2, 2, 2, 3], 2, 2).unwrap()
    }

    #[test]
    fn propagation_excludes_forbidden_images() {
        let puzzle = weak_puzzle();
        let mut rho = Permutation::new(2);
        let mut sigma = Permutation::new(2);

        // rho(0) = 0 and Q(0, 0, 1) forbid sigma(0) = 1.
        rho.assign_propagate(0, 0, PermId::Rho, 0);
        usp_propagate(&puzzle, &mut rho, &mut sigma, 0);

        assert_eq!(sigma.value((0, 1)), Some(false));
        assert_eq!(sigma.value((0, 0)), None);
        assert!(sigma.antecedents((0, 1)).is_empty());
    }

    #[test]
    fn propagation_skips_fully_decided_rows() {
        let puzzle = weak_puzzle();
        let mut rho = Permutation::from_image(&[0, 1]);
        let mut sigma = Permutation::from_image(&[1, 0]);
        let snapshot = sigma.clone();

        usp_propagate(&puzzle, &mut rho, &mut sigma, 1);
        assert_eq!(sigma, snapshot);
    }

    #[test]
    fn decided_violation_spots_a_forbidden_pair() {
        let puzzle = weak_puzzle();
        // Q(0, 0, 1) holds, so (rho, sigma) = (identity, swap) violates.
        let rho = Permutation::from_image(&[0, 1]);
        let sigma = Permutation::from_image(&[1, 0]);
        assert!(decided_violation(&puzzle, &rho, &sigma));

        // The double swap is a genuine witness.
        let rho = Permutation::from_image(&[1, 0]);
        let sigma = Permutation::from_image(&[1, 0]);
        assert!(!decided_violation(&puzzle, &rho, &sigma));
    }
}
