//! Permutation state with decision levels and antecedents.
use std::fmt;

use uspw_puzzle::Matrix;

use crate::lit::{Lit, PermId, Pos};

/// Per-cell assignment state.
///
/// `level` and `antecedents` carry meaningful data only while the cell is
/// assigned; [`Permutation::undo`] resets both, so unassigned cells are
/// always bit-equal to freshly constructed ones.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
struct Node {
    value: Option<bool>,
    level: usize,
    antecedents: Vec<Lit>,
}

/// An n×n grid of three-state cells modeling a candidate permutation π of
/// {0, …, n−1}: π(row) = col iff the cell (row, col) is assigned true.
///
/// The assignment operations maintain at most one true cell per row and per
/// column. Each assigned cell remembers the decision level it was assigned
/// at and the literals that forced it, which together form the implication
/// graph conflict analysis walks backwards.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Permutation {
    nodes: Matrix<Node>,
    size: usize,
}

impl Permutation {
    /// Create a permutation grid with every cell unassigned.
    pub fn new(size: usize) -> Permutation {
        Permutation {
            nodes: Matrix::new(size, size),
            size,
        }
    }

    /// Build a fully assigned permutation from its image vector.
    pub fn from_image(image: &[usize]) -> Permutation {
        let mut perm = Permutation::new(image.len());
        for (row, &col) in image.iter().enumerate() {
            perm.assign(row, col, true, 0, Vec::new());
        }
        perm
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether every diagonal cell is assigned true.
    pub fn is_identity(&self) -> bool {
        (0..self.size).all(|i| self.nodes[(i, i)].value == Some(true))
    }

    /// Whether some row or column has every cell assigned false, leaving no
    /// place for its image.
    pub fn has_contradiction(&self) -> bool {
        (0..self.size).any(|i| {
            (0..self.size).all(|j| self.nodes[(i, j)].value == Some(false))
                || (0..self.size).all(|j| self.nodes[(j, i)].value == Some(false))
        })
    }

    /// The smallest row without a true cell, if any.
    pub fn next_open_row(&self) -> Option<usize> {
        (0..self.size)
            .find(|&row| (0..self.size).all(|col| self.nodes[(row, col)].value != Some(true)))
    }

    /// The column this permutation maps `row` to, if decided.
    pub fn image(&self, row: usize) -> Option<usize> {
        (0..self.size).find(|&col| self.nodes[(row, col)].value == Some(true))
    }

    /// The unassigned columns of `row`, in ascending order.
    pub fn open_columns(&self, row: usize) -> Vec<usize> {
        (0..self.size)
            .filter(|&col| self.nodes[(row, col)].value.is_none())
            .collect()
    }

    /// Assign a single cell.
    ///
    /// An unassigned cell receives the value, the decision level and the
    /// antecedents; an already assigned cell is left untouched. Assigning
    /// true additionally closes the remaining open cells of the row with
    /// unexplained false assignments at the same level.
    pub fn assign(&mut self, row: usize, col: usize, value: bool, level: usize, antecedents: Vec<Lit>) {
        if value {
            for other in 0..self.size {
                if other != col {
                    let node = &mut self.nodes[(row, other)];
                    if node.value.is_none() {
                        node.value = Some(false);
                        node.level = level;
                    }
                }
            }
        }

        let node = &mut self.nodes[(row, col)];
        if node.value.is_none() {
            node.value = Some(value);
            node.level = level;
            node.antecedents = antecedents;
        }
    }

    /// Decide π(row) = col and propagate the uniqueness constraint: every
    /// open cell in the same row and column goes false at the same level,
    /// each recording the negation of the decided cell as its antecedent.
    pub fn assign_propagate(&mut self, row: usize, col: usize, which: PermId, level: usize) {
        let reason = Lit::negative((row, col), which);

        for other in 0..self.size {
            if other != col {
                let node = &mut self.nodes[(row, other)];
                if node.value.is_none() {
                    node.value = Some(false);
                    node.level = level;
                    node.antecedents.push(reason);
                }
            }
            if other != row {
                let node = &mut self.nodes[(other, col)];
                if node.value.is_none() {
                    node.value = Some(false);
                    node.level = level;
                    node.antecedents.push(reason);
                }
            }
        }

        let node = &mut self.nodes[(row, col)];
        node.value = Some(true);
        node.level = level;
    }

    /// Reset every cell assigned at `level` or deeper back to unassigned.
    ///
    /// Cells decided strictly below `level` are preserved. Afterwards the
    /// grid is bit-equal to its state just before the decision at `level`.
    pub fn undo(&mut self, level: usize) {
        for row in 0..self.size {
            for col in 0..self.size {
                let node = &mut self.nodes[(row, col)];
                if node.value.is_some() && node.level >= level {
                    node.value = None;
                    node.level = 0;
                    node.antecedents.clear();
                }
            }
        }
    }

    /// Antecedent literals of the assignment at `pos`. Empty for decisions.
    pub fn antecedents(&self, pos: Pos) -> &[Lit] {
        &self.nodes[pos].antecedents
    }

    /// Decision level of the assignment at `pos`.
    ///
    /// Returns stale data if the cell isn't assigned.
    pub fn node_level(&self, pos: Pos) -> usize {
        self.nodes[pos].level
    }

    /// Conflict seeds for analysis: for every row with all cells false, the
    /// antecedents of the cells assigned at `level`, plus the own positive
    /// literal of every cell with nothing to offer — cells closed at an
    /// earlier level, or forced without a recorded reason. Keeping those
    /// cells represented keeps the learned clause implied by the conflict.
    pub fn contradiction_antecedents(&self, level: usize, which: PermId) -> Vec<Lit> {
        let mut seeds = Vec::new();
        for row in 0..self.size {
            if (0..self.size).any(|col| self.nodes[(row, col)].value != Some(false)) {
                continue;
            }
            for col in 0..self.size {
                let node = &self.nodes[(row, col)];
                if node.level == level && !node.antecedents.is_empty() {
                    seeds.extend_from_slice(&node.antecedents);
                } else {
                    seeds.push(Lit::positive((row, col), which));
                }
            }
        }
        seeds
    }

    /// Value of the cell at `pos`; `None` when unassigned.
    pub fn value(&self, pos: Pos) -> Option<bool> {
        self.nodes[pos].value
    }
}

/// Renders the grid one row per line, `x` for unassigned cells.
impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.nodes[(row, col)].value {
                    Some(value) => write!(f, "{}", value as u8)?,
                    None => write!(f, "x")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
