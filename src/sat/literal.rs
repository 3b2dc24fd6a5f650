#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literals and the dense literal index space.
//!
//! A literal is a signed, non-zero integer: `v` stands for "variable `v` is true" and `-v`
//! for its negation. Graph structures need literals as array indices, so a [`LiteralSpace`]
//! over `n` variables maps them into `1..=2n`:
//!
//! - literal `v > 0` maps to index `v`
//! - literal `v < 0` maps to index `n + |v|`
//!
//! Index `0` is never used, which keeps the arithmetic free of off-by-one adjustments.

use crate::sat::error::ValidationError;
use core::ops::{Neg, Not, RangeInclusive};
use std::fmt;

/// A boolean variable, numbered from 1.
pub type Variable = u32;

/// A signed, non-zero literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit(i32);

impl Lit {
    /// Creates the literal of `var` with the given polarity (`true` for the positive literal).
    ///
    /// # Panics
    ///
    /// If `var` is 0 or does not fit a signed 32-bit literal.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert!(
            var != 0 && i32::try_from(var).is_ok(),
            "variable {var} cannot form a literal"
        );
        #[allow(clippy::cast_possible_wrap)]
        let value = var as i32;
        if polarity { Self(value) } else { Self(-value) }
    }

    /// Converts a DIMACS-style integer into a literal. Returns `None` for `0`.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    /// The variable this literal refers to.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for the positive literal `v`, `false` for `-v`.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Lit {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_i32(value).ok_or(ValidationError::ZeroLiteral)
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.0
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Lit {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Neg for &Lit {
    type Output = Lit;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

/// The literal index space of an instance with `num_vars` variables.
///
/// Every component that stores per-literal data (adjacency lists, visited sets, component
/// membership) sizes its arrays with [`LiteralSpace::len`] and addresses them through
/// [`LiteralSpace::index`], so the mapping is defined in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LiteralSpace {
    num_vars: usize,
}

impl LiteralSpace {
    #[must_use]
    pub const fn new(num_vars: usize) -> Self {
        Self { num_vars }
    }

    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of literals, `2n`.
    #[must_use]
    pub const fn num_literals(&self) -> usize {
        2 * self.num_vars
    }

    /// Size of an array addressed by literal index, `2n + 1`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.num_literals() + 1
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.num_vars == 0
    }

    /// All valid literal indices, `1..=2n`.
    #[must_use]
    pub const fn indices(&self) -> RangeInclusive<usize> {
        1..=self.num_literals()
    }

    /// All variables, `1..=n`.
    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        (1..=self.num_vars).filter_map(|v| Variable::try_from(v).ok())
    }

    #[must_use]
    pub const fn contains(&self, lit: Lit) -> bool {
        lit.variable() as usize <= self.num_vars
    }

    /// Checks that `lit` refers to a variable of this space.
    ///
    /// # Errors
    ///
    /// [`ValidationError::VariableOutOfRange`] when `|lit| > n`.
    pub const fn check(&self, lit: Lit) -> Result<Lit, ValidationError> {
        if self.contains(lit) {
            Ok(lit)
        } else {
            Err(ValidationError::VariableOutOfRange {
                literal: lit.to_i32(),
                num_vars: self.num_vars,
            })
        }
    }

    /// Maps a literal to its dense index. The literal must belong to this space.
    #[must_use]
    pub const fn index(&self, lit: Lit) -> usize {
        let var = lit.variable() as usize;
        debug_assert!(var >= 1 && var <= self.num_vars);
        if lit.polarity() { var } else { self.num_vars + var }
    }

    /// Inverse of [`LiteralSpace::index`].
    ///
    /// # Panics
    ///
    /// If `index` is outside `1..=2n`.
    #[must_use]
    pub fn literal(&self, index: usize) -> Lit {
        assert!(
            self.indices().contains(&index),
            "literal index {index} outside 1..={}",
            self.num_literals()
        );
        if index <= self.num_vars {
            Lit::new(index as Variable, true)
        } else {
            Lit::new((index - self.num_vars) as Variable, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Lit::new(1, false).negated(), Lit::new(1, true));
        assert_eq!(-Lit::new(3, true), Lit::new(3, false));
        assert_eq!(!Lit::new(3, false), Lit::new(3, true));
    }

    #[test]
    fn test_literal_from_i32() {
        let lit = Lit::from_i32(-4).unwrap();
        assert_eq!(lit.variable(), 4);
        assert!(!lit.polarity());
        assert_eq!(lit.to_i32(), -4);
        assert_eq!(Lit::from_i32(0), None);
        assert_eq!(Lit::try_from(0), Err(ValidationError::ZeroLiteral));
    }

    #[test]
    fn test_index_mapping() {
        let space = LiteralSpace::new(3);
        assert_eq!(space.len(), 7);
        assert_eq!(space.index(Lit::new(2, true)), 2);
        assert_eq!(space.index(Lit::new(2, false)), 5);
        assert_eq!(space.literal(6), Lit::new(3, false));
        assert_eq!(space.index(Lit::new(1, false)), 4);
    }

    #[test]
    fn test_index_is_a_bijection() {
        let space = LiteralSpace::new(5);
        for index in space.indices() {
            let lit = space.literal(index);
            assert_eq!(space.index(lit), index);
            assert_ne!(space.index(-lit), index);
        }
    }

    #[test]
    fn test_check_rejects_out_of_range() {
        let space = LiteralSpace::new(2);
        assert!(space.check(Lit::new(2, false)).is_ok());
        assert_eq!(
            space.check(Lit::new(3, true)),
            Err(ValidationError::VariableOutOfRange {
                literal: 3,
                num_vars: 2
            })
        );
    }

    #[test]
    fn test_empty_space() {
        let space = LiteralSpace::new(0);
        assert!(space.is_empty());
        assert_eq!(space.indices().count(), 0);
        assert_eq!(space.variables().count(), 0);
    }
}
