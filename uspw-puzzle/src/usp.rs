//! Unique-solvable puzzles and their row-triple predicate.
use std::fmt;

use fixedbitset::FixedBitSet;
use thiserror::Error;

use crate::matrix::Matrix;

/// Possible errors while constructing a [`Usp`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UspError {
    #[error("puzzle dimensions must be positive, got {} x {}", rows, cols)]
    EmptyPuzzle { rows: usize, cols: usize },
    #[error(
        "puzzle data holds {} symbols while the dimensions require {} x {} = {}",
        len,
        rows,
        cols,
        expected
    )]
    DimensionMismatch {
        len: usize,
        rows: usize,
        cols: usize,
        expected: usize,
    },
    #[error("symbol {} at index {} is outside the alphabet 1..=3", symbol, index)]
    InvalidSymbol { symbol: u8, index: usize },
}

/// An (n, k) unique-solvable puzzle over the alphabet {1, 2, 3}.
///
/// Construction precomputes the row-triple predicate: `query(a, b, c)` holds
/// iff some column `e` satisfies exactly two of `symbol(a, e) = 1`,
/// `symbol(b, e) = 2` and `symbol(c, e) = 3`. The predicate is packed into a
/// bit set of n³ bits, making `query` a single bit lookup. A puzzle is
/// immutable after construction.
#[derive(Clone, Debug)]
pub struct Usp {
    data: Matrix<u8>,
    func: FixedBitSet,
    rows: usize,
    cols: usize,
}

impl Usp {
    /// Build a puzzle from a row-major symbol buffer.
    pub fn new(data: Vec<u8>, rows: usize, cols: usize) -> Result<Usp, UspError> {
        if rows == 0 || cols == 0 {
            return Err(UspError::EmptyPuzzle { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(UspError::DimensionMismatch {
                len: data.len(),
                rows,
                cols,
                expected: rows * cols,
            });
        }
        if let Some(index) = data.iter().position(|symbol| !(1..=3).contains(symbol)) {
            return Err(UspError::InvalidSymbol {
                symbol: data[index],
                index,
            });
        }

        let data = Matrix::from_vec(rows, cols, data);
        let mut func = FixedBitSet::with_capacity(rows * rows * rows);

        for a in 0..rows {
            for b in 0..rows {
                for c in 0..rows {
                    let forbidden = (0..cols).any(|e| {
                        (data[(a, e)] == 1) as u8
                            + (data[(b, e)] == 2) as u8
                            + (data[(c, e)] == 3) as u8
                            == 2
                    });
                    if forbidden {
                        func.insert((a * rows + b) * rows + c);
                    }
                }
            }
        }

        Ok(Usp {
            data,
            func,
            rows,
            cols,
        })
    }

    /// Number of puzzle rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of puzzle columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the row triple (a, b, c) is forbidden for a weakness witness.
    #[inline]
    pub fn query(&self, a: usize, b: usize, c: usize) -> bool {
        self.func.contains((a * self.rows + b) * self.rows + c)
    }

    /// Symbol at the given position.
    pub fn symbol(&self, row: usize, col: usize) -> u8 {
        self.data[(row, col)]
    }
}

/// Renders the symbol grid, one puzzle row per line.
impl fmt::Display for Usp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.data[(row, col)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;

    use proptest::{collection::vec, prelude::*};

    pub fn usp(
        rows: impl Strategy<Value = usize>,
        cols: impl Strategy<Value = usize>,
    ) -> impl Strategy<Value = Usp> {
        (rows, cols).prop_flat_map(|(rows, cols)| {
            vec(1u8..=3, rows * cols).prop_map(move |data| {
                Usp::new(data, rows, cols).expect("symbols are drawn from the alphabet")
            })
        })
    }
}
