//! Checks a weakness witness.
use uspw_puzzle::Usp;

use crate::permutation::Permutation;

/// Whether the fully assigned pair (ρ, σ) witnesses the puzzle as weak:
/// no row `i` may satisfy the forbidden predicate `Q(i, ρ(i), σ(i))`.
///
/// Panics when either permutation has a row without an image; handing an
/// incomplete permutation to the verifier is a programmer error.
pub fn verify_weakness(puzzle: &Usp, rho: &Permutation, sigma: &Permutation) -> bool {
    debug_assert_eq!(rho.size(), puzzle.rows());
    debug_assert_eq!(sigma.size(), puzzle.rows());

    for i in 0..puzzle.rows() {
        let r = rho.image(i).expect("rho is not a complete permutation");
        let s = sigma.image(i).expect("sigma is not a complete permutation");
        if puzzle.query(i, r, s) {
            return false;
        }
    }
    true
}
