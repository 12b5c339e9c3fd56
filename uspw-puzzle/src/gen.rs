//! Random puzzle generation.
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::usp::Usp;

/// Generate a puzzle with symbols drawn uniformly i.i.d. from {1, 2, 3}.
pub fn random_usp(rows: usize, cols: usize) -> Usp {
    random_usp_from(&mut rand::thread_rng(), rows, cols)
}

/// Like [`random_usp`], but with a caller-supplied source of randomness.
pub fn random_usp_from(rng: &mut impl Rng, rows: usize, cols: usize) -> Usp {
    let symbols = Uniform::new_inclusive(1u8, 3);
    let data = (0..rows * cols).map(|_| symbols.sample(rng)).collect();
    Usp::new(data, rows, cols).expect("symbols are drawn from the alphabet")
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_puzzles_have_the_requested_shape() {
        let puzzle = random_usp(5, 7);
        assert_eq!(puzzle.rows(), 5);
        assert_eq!(puzzle.cols(), 7);
    }

    #[test]
    fn generated_symbols_stay_in_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let puzzle = random_usp_from(&mut rng, 9, 4);
        for row in 0..puzzle.rows() {
            for col in 0..puzzle.cols() {
                let symbol = puzzle.symbol(row, col);
                assert!((1..=3).contains(&symbol));
            }
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = random_usp_from(&mut StdRng::seed_from_u64(7), 6, 6);
        let second = random_usp_from(&mut StdRng::seed_from_u64(7), 6, 6);
        for row in 0..6 {
            for col in 0..6 {
                assert_eq!(first.symbol(row, col), second.symbol(row, col));
            }
        }
    }
}
