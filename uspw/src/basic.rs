//! Brute force weakness decision by enumerating permutation pairs.
use uspw_puzzle::Usp;

use crate::permutation::Permutation;
use crate::verify::verify_weakness;

/// Advance `perm` to its lexicographic successor.
///
/// Returns false when `perm` was the last permutation, leaving it reversed
/// back to the ascending order.
fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }

    let mut i = perm.len() - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        perm.reverse();
        return false;
    }

    let mut j = perm.len() - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}

fn is_identity(perm: &[usize]) -> bool {
    perm.iter().enumerate().all(|(index, &value)| index == value)
}

/// Decide weakness by checking every pair of permutations of {0, …, n−1},
/// in lexicographic order, against the verifier. The pair of identities is
/// skipped; the first verifying pair is returned. O((n!)² · n).
pub fn solve(puzzle: &Usp) -> Option<(Permutation, Permutation)> {
    let n = puzzle.rows();

    let mut first: Vec<usize> = (0..n).collect();
    loop {
        let mut second: Vec<usize> = (0..n).collect();
        loop {
            if !(is_identity(&first) && is_identity(&second)) {
                let rho = Permutation::from_image(&first);
                let sigma = Permutation::from_image(&second);
                if verify_weakness(puzzle, &rho, &sigma) {
                    return Some((rho, sigma));
                }
            }
            if !next_permutation(&mut second) {
                break;
            }
        }
        if !next_permutation(&mut first) {
            break;
        }
    }

    None
}
