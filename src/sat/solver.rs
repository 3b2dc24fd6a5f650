#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 2-SAT decision procedure.
//!
//! [`TwoSat`] owns the implication graph of one instance. Building it is the only mutable
//! phase; [`TwoSat::solve`] takes `&self` and runs the pipeline
//!
//! ```text
//! clauses -> ImplicationGraph -> kosaraju -> find_conflict -> extract -> Solution
//! ```
//!
//! so solving the same instance twice yields the same answer.

use crate::sat::assignment::{Model, extract};
use crate::sat::checker::find_conflict;
use crate::sat::clause::Clause;
use crate::sat::error::ValidationError;
use crate::sat::graph::ImplicationGraph;
use crate::sat::instance::Instance;
use crate::sat::literal::Variable;
use crate::sat::scc::kosaraju;
use log::debug;
use std::fmt;

/// Outcome of the decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Satisfiable,
    Unsatisfiable,
}

impl Status {
    /// One-letter code used in reports: `S` or `U`.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Satisfiable => 'S',
            Self::Unsatisfiable => 'U',
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
        }
    }
}

/// Status plus the evidence for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Solution {
    /// A total assignment satisfying every clause.
    Satisfiable(Model),
    /// `conflict` and its negation fall in the same strongly connected component.
    Unsatisfiable { conflict: Variable },
}

impl Solution {
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Satisfiable(_) => Status::Satisfiable,
            Self::Unsatisfiable { .. } => Status::Unsatisfiable,
        }
    }

    #[must_use]
    pub const fn is_satisfiable(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    #[must_use]
    pub const fn model(&self) -> Option<&Model> {
        match self {
            Self::Satisfiable(model) => Some(model),
            Self::Unsatisfiable { .. } => None,
        }
    }

    #[must_use]
    pub fn into_model(self) -> Option<Model> {
        match self {
            Self::Satisfiable(model) => Some(model),
            Self::Unsatisfiable { .. } => None,
        }
    }
}

/// Size figures gathered while solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    pub variables: usize,
    pub clauses: usize,
    pub implications: usize,
    pub components: usize,
    pub largest_component: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TwoSat {
    graph: ImplicationGraph,
    clauses: Vec<Clause>,
}

impl TwoSat {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            graph: ImplicationGraph::new(num_vars),
            clauses: Vec::new(),
        }
    }

    /// Builds a solver from a clause list, rejecting the whole instance at the first bad
    /// clause.
    ///
    /// # Errors
    ///
    /// The [`ValidationError`] of the first invalid clause.
    pub fn from_clauses<I>(num_vars: usize, clauses: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut solver = Self::new(num_vars);
        for (a, b) in clauses {
            solver.add_clause(a, b)?;
        }
        Ok(solver)
    }

    /// Builds a solver for a parsed instance.
    ///
    /// # Errors
    ///
    /// The [`ValidationError`] of the first clause referring to a variable above
    /// `instance.num_vars`.
    pub fn from_instance(instance: &Instance) -> Result<Self, ValidationError> {
        let mut solver = Self::new(instance.num_vars);
        for clause in &instance.clauses {
            solver.insert(*clause)?;
        }
        Ok(solver)
    }

    /// Adds the clause `(a OR b)`.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] if a literal is zero or out of range; the solver is unchanged.
    pub fn add_clause(&mut self, a: i32, b: i32) -> Result<(), ValidationError> {
        self.insert(Clause::try_from((a, b))?)
    }

    /// Adds a clause built elsewhere.
    ///
    /// # Errors
    ///
    /// [`ValidationError::VariableOutOfRange`] if the clause does not fit this instance.
    pub fn insert(&mut self, clause: Clause) -> Result<(), ValidationError> {
        self.graph.insert(clause)?;
        self.clauses.push(clause);
        Ok(())
    }

    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.graph.num_vars()
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub const fn graph(&self) -> &ImplicationGraph {
        &self.graph
    }

    #[must_use]
    pub fn solve(&self) -> Solution {
        self.solve_with_stats().0
    }

    #[must_use]
    pub fn solve_with_stats(&self) -> (Solution, SolveStats) {
        let components = kosaraju(&self.graph);
        let stats = SolveStats {
            variables: self.num_vars(),
            clauses: self.clauses.len(),
            implications: self.graph.num_edges(),
            components: components.len(),
            largest_component: components.largest(),
        };

        let solution = match find_conflict(&components) {
            Some(conflict) => {
                debug!("unsatisfiable: x{conflict} and -x{conflict} share a component");
                Solution::Unsatisfiable { conflict }
            }
            None => Solution::Satisfiable(extract(&components)),
        };

        (solution, stats)
    }

    /// Checks `model` against every clause added so far.
    #[must_use]
    pub fn verify(&self, model: &Model) -> bool {
        model.len() == self.num_vars() && self.clauses.iter().all(|c| model.satisfies(c))
    }
}
