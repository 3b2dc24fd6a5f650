#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Conflict detection on the SCC decomposition.
//!
//! All literals of a component are forced to the same value, so a component holding both
//! `v` and `-v` makes the formula unsatisfiable.

use crate::sat::literal::{Lit, Variable};
use crate::sat::scc::Components;
use rustc_hash::FxHashSet;

/// Returns the first variable (in emission order) whose two literals share a component, or
/// `None` after every component has been scanned without finding one.
#[must_use]
pub fn find_conflict(components: &Components) -> Option<Variable> {
    let mut members: FxHashSet<Lit> = FxHashSet::default();

    for component in components.iter() {
        members.clear();
        members.extend(component.iter().copied());

        if let Some(lit) = component.iter().find(|&&lit| members.contains(&-lit)) {
            return Some(lit.variable());
        }
    }

    None
}

#[must_use]
pub fn is_satisfiable(components: &Components) -> bool {
    find_conflict(components).is_none()
}
