#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::error::ValidationError;
use crate::sat::literal::Lit;
use std::fmt;

/// A two-literal clause `(a OR b)`.
///
/// Unit clauses are stored as `(a, a)`, which yields the single implication `-a -> a`
/// (twice) in the implication graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clause {
    a: Lit,
    b: Lit,
}

impl Clause {
    /// Number of literal slots in a clause.
    pub const WIDTH: usize = 2;

    #[must_use]
    pub const fn new(a: Lit, b: Lit) -> Self {
        Self { a, b }
    }

    #[must_use]
    pub const fn unit(a: Lit) -> Self {
        Self { a, b: a }
    }

    #[must_use]
    pub const fn first(&self) -> Lit {
        self.a
    }

    #[must_use]
    pub const fn second(&self) -> Lit {
        self.b
    }

    #[must_use]
    pub const fn literals(&self) -> [Lit; 2] {
        [self.a, self.b]
    }

    pub fn iter(&self) -> impl Iterator<Item = Lit> {
        self.literals().into_iter()
    }

    /// Largest variable mentioned by the clause.
    #[must_use]
    pub fn max_variable(&self) -> u32 {
        self.a.variable().max(self.b.variable())
    }
}

impl TryFrom<(i32, i32)> for Clause {
    type Error = ValidationError;

    fn try_from((a, b): (i32, i32)) -> Result<Self, Self::Error> {
        Ok(Self::new(Lit::try_from(a)?, Lit::try_from(b)?))
    }
}

impl From<Clause> for (i32, i32) {
    fn from(clause: Clause) -> Self {
        (clause.a.to_i32(), clause.b.to_i32())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.a, self.b)
    }
}
