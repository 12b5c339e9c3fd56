//! Literals over permutation cells.
use std::fmt;
use std::ops;

use crate::permutation::Permutation;

/// Position of a cell inside a permutation grid.
pub type Pos = (usize, usize);

/// Selects one permutation out of a (ρ, σ) pair.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PermId {
    Rho,
    Sigma,
}

impl PermId {
    /// Resolve the selector against a permutation pair.
    pub fn of<'a>(self, rho: &'a Permutation, sigma: &'a Permutation) -> &'a Permutation {
        match self {
            PermId::Rho => rho,
            PermId::Sigma => sigma,
        }
    }

    /// Mutable variant of [`of`](PermId::of).
    pub fn of_mut<'a>(
        self,
        rho: &'a mut Permutation,
        sigma: &'a mut Permutation,
    ) -> &'a mut Permutation {
        match self {
            PermId::Rho => rho,
            PermId::Sigma => sigma,
        }
    }
}

/// A literal over a single permutation cell.
///
/// Conceptually a cell position, a polarity and a ρ/σ selector: the literal
/// `((y, x), positive, Rho)` asserts ρ(y) = x and its negation asserts
/// ρ(y) ≠ x. Identity uses all three fields; the derived total order is
/// position-major, which keeps clause literal sets sorted by cell.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit {
    pos: Pos,
    positive: bool,
    perm: PermId,
}

impl Lit {
    /// Create a literal from its parts.
    #[inline]
    pub fn new(pos: Pos, positive: bool, perm: PermId) -> Lit {
        Lit {
            pos,
            positive,
            perm,
        }
    }

    /// Create a positive literal for a cell.
    #[inline]
    pub fn positive(pos: Pos, perm: PermId) -> Lit {
        Lit::new(pos, true, perm)
    }

    /// Create a negative literal for a cell.
    #[inline]
    pub fn negative(pos: Pos, perm: PermId) -> Lit {
        Lit::new(pos, false, perm)
    }

    /// The cell this literal refers to.
    #[inline]
    pub fn pos(self) -> Pos {
        self.pos
    }

    /// Whether the literal asserts the cell.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.positive
    }

    /// Whether the literal refutes the cell.
    #[inline]
    pub fn is_negative(self) -> bool {
        !self.positive
    }

    /// The permutation this literal lives in.
    #[inline]
    pub fn perm(self) -> PermId {
        self.perm
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            positive: !self.positive,
            ..self
        }
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self.perm {
            PermId::Rho => "rho",
            PermId::Sigma => "sigma",
        };
        let sign = if self.positive { "" } else { "-" };
        write!(f, "{}{}({}, {})", sign, name, self.pos.0, self.pos.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_uses_all_fields() {
        let lit = Lit::positive((1, 2), PermId::Rho);
        assert_ne!(lit, !lit);
        assert_ne!(lit, Lit::positive((1, 2), PermId::Sigma));
        assert_ne!(lit, Lit::positive((2, 1), PermId::Rho));
        assert_eq!(lit, !!lit);
    }

    #[test]
    fn order_is_position_major() {
        let early = Lit::positive((0, 3), PermId::Sigma);
        let late = Lit::negative((1, 0), PermId::Rho);
        assert!(early < late);
    }

    #[test]
    fn negation_flips_polarity_only() {
        let lit = Lit::negative((4, 0), PermId::Sigma);
        assert!((!lit).is_positive());
        assert_eq!((!lit).pos(), (4, 0));
        assert_eq!((!lit).perm(), PermId::Sigma);
    }
}
