#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variable assignments and extraction of a model from the SCC order.
//!
//! Extraction walks the components in emission order and gives each still-unassigned
//! variable the polarity of the first of its literals it meets. Since every implication
//! leaving a component points at an earlier component, a literal made true this way only
//! implies literals that are already true, so the result satisfies every clause.

use crate::sat::clause::Clause;
use crate::sat::literal::{Lit, Variable};
use crate::sat::scc::Components;
use core::ops::Index;
use itertools::Itertools;
use std::fmt;

/// State of a single variable while an assignment is being built.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    True,
    False,
}

impl VarState {
    #[must_use]
    pub const fn from_polarity(polarity: bool) -> Self {
        if polarity { Self::True } else { Self::False }
    }

    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }

    #[must_use]
    pub const fn value(&self) -> Option<bool> {
        match self {
            Self::Unassigned => None,
            Self::True => Some(true),
            Self::False => Some(false),
        }
    }
}

/// A partial assignment, indexed by variable (slot 0 unused).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<VarState>);

impl Index<Variable> for Assignment {
    type Output = VarState;

    fn index(&self, var: Variable) -> &Self::Output {
        &self.0[var as usize]
    }
}

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars + 1])
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Makes `lit` true unless its variable already has a value. Returns whether it did.
    pub fn assign_if_unassigned(&mut self, lit: Lit) -> bool {
        let slot = &mut self.0[lit.variable() as usize];
        if slot.is_unassigned() {
            *slot = VarState::from_polarity(lit.polarity());
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        self.0.get(var as usize).and_then(VarState::value)
    }

    #[must_use]
    pub fn literal_value(&self, lit: Lit) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|value| value == lit.polarity())
    }

    /// Freezes a complete assignment into a [`Model`].
    ///
    /// # Panics
    ///
    /// If a variable is still unassigned. Extraction from a full SCC partition assigns every
    /// variable, so this only fires on a broken decomposition.
    #[must_use]
    pub fn freeze(self) -> Model {
        let values = self
            .0
            .iter()
            .enumerate()
            .skip(1)
            .map(|(var, state)| match state {
                VarState::True => true,
                VarState::False => false,
                VarState::Unassigned => {
                    unreachable!("variable {var} left unassigned after extraction")
                }
            })
            .collect();
        Model(values)
    }
}

/// Builds the satisfying assignment for a conflict-free decomposition.
///
/// Callers must have checked the decomposition with
/// [`find_conflict`](crate::sat::checker::find_conflict) first.
#[must_use]
pub fn extract(components: &Components) -> Model {
    let mut assignment = Assignment::new(components.space().num_vars());

    for lit in components.iter().flatten() {
        assignment.assign_if_unassigned(*lit);
    }

    assignment.freeze()
}

/// A total assignment: one boolean per variable `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Model(Vec<bool>);

impl Model {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of `var`, or `None` when it is outside the model.
    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        (var as usize)
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
    }

    #[must_use]
    pub fn literal_value(&self, lit: Lit) -> Option<bool> {
        self.value(lit.variable())
            .map(|value| value == lit.polarity())
    }

    #[must_use]
    pub fn satisfies(&self, clause: &Clause) -> bool {
        clause
            .iter()
            .any(|lit| self.literal_value(lit) == Some(true))
    }

    /// Values of variables `1..=n`, in order.
    #[must_use]
    pub fn values(&self) -> &[bool] {
        &self.0
    }

    /// The model as signed literals, e.g. `[1, -2, 3]`.
    pub fn literals(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().zip(1_i32..).map(
            |(&value, var)| {
                if value { var } else { -var }
            },
        )
    }
}

impl From<Vec<bool>> for Model {
    fn from(values: Vec<bool>) -> Self {
        Self(values)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literals().join(" "))
    }
}
