#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The implication graph of a 2-CNF formula.
//!
//! A clause `(a OR b)` is equivalent to the two implications `-a -> b` and `-b -> a`. The
//! graph keeps both the forward adjacency (what a literal implies) and its exact transpose
//! (what implies a literal), since the SCC computation walks each of them once.
//!
//! Adjacency lists preserve insertion order, so the graph, and therefore the solver's
//! answer, is a deterministic function of the clause order.

use crate::sat::clause::Clause;
use crate::sat::error::ValidationError;
use crate::sat::literal::{Lit, LiteralSpace};
use smallvec::SmallVec;

/// Outgoing edges of one literal, as literal indices.
pub type Adjacency = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImplicationGraph {
    space: LiteralSpace,
    forward: Vec<Adjacency>,
    reverse: Vec<Adjacency>,
    num_edges: usize,
}

impl ImplicationGraph {
    /// Creates an edgeless graph over the `2 * num_vars` literals.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        let space = LiteralSpace::new(num_vars);
        Self {
            space,
            forward: vec![Adjacency::new(); space.len()],
            reverse: vec![Adjacency::new(); space.len()],
            num_edges: 0,
        }
    }

    /// Adds the two implications of `(a OR b)`.
    ///
    /// Both literals are validated before anything is inserted, so a rejected clause leaves
    /// the graph untouched.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] if a literal is zero or names a variable outside `1..=n`.
    pub fn add_clause(&mut self, a: i32, b: i32) -> Result<(), ValidationError> {
        let clause = Clause::try_from((a, b))?;
        self.insert(clause)
    }

    /// Adds the two implications of an already constructed clause.
    ///
    /// # Errors
    ///
    /// [`ValidationError::VariableOutOfRange`] if the clause mentions a variable above `n`.
    pub fn insert(&mut self, clause: Clause) -> Result<(), ValidationError> {
        let a = self.space.check(clause.first())?;
        let b = self.space.check(clause.second())?;

        self.add_implication(-a, b);
        self.add_implication(-b, a);
        Ok(())
    }

    fn add_implication(&mut self, from: Lit, to: Lit) {
        let u = self.space.index(from);
        let v = self.space.index(to);

        self.forward[u].push(v);
        self.reverse[v].push(u);
        self.num_edges += 1;
    }

    #[must_use]
    pub const fn space(&self) -> &LiteralSpace {
        &self.space
    }

    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.space.num_vars()
    }

    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Literal indices implied by the literal at `index`.
    #[must_use]
    pub fn forward(&self, index: usize) -> &[usize] {
        &self.forward[index]
    }

    /// Literal indices implying the literal at `index`.
    #[must_use]
    pub fn reverse(&self, index: usize) -> &[usize] {
        &self.reverse[index]
    }

    /// All forward edges `(from, to)` as literal indices, in insertion order per source.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.space
            .indices()
            .flat_map(move |u| self.forward[u].iter().map(move |&v| (u, v)))
    }

    /// All forward edges as literals.
    pub fn implications(&self) -> impl Iterator<Item = (Lit, Lit)> + '_ {
        self.edges()
            .map(|(u, v)| (self.space.literal(u), self.space.literal(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn lit(value: i32) -> Lit {
        Lit::from_i32(value).unwrap()
    }

    #[test]
    fn test_clause_adds_contrapositive_pair() {
        let mut graph = ImplicationGraph::new(2);
        graph.add_clause(1, -2).unwrap();

        let implications = graph.implications().collect_vec();
        assert_eq!(graph.num_edges(), 2);
        assert!(implications.contains(&(lit(-1), lit(-2))));
        assert!(implications.contains(&(lit(2), lit(1))));
    }

    #[test]
    fn test_reverse_is_transpose() {
        let mut graph = ImplicationGraph::new(3);
        for (a, b) in [(1, 2), (-1, 3), (2, -3), (-2, -2)] {
            graph.add_clause(a, b).unwrap();
        }

        let forward = graph.edges().sorted().collect_vec();
        let transposed = graph
            .space()
            .indices()
            .flat_map(|v| graph.reverse(v).iter().map(move |&u| (u, v)))
            .sorted()
            .collect_vec();
        assert_eq!(forward, transposed);
    }

    #[test]
    fn test_every_edge_has_its_contrapositive() {
        let mut graph = ImplicationGraph::new(4);
        for (a, b) in [(1, 2), (-3, 4), (2, 2), (-4, -1)] {
            graph.add_clause(a, b).unwrap();
        }

        let implications = graph.implications().collect_vec();
        for &(u, v) in &implications {
            assert!(implications.contains(&(-v, -u)), "missing {} -> {}", -v, -u);
        }
    }

    #[test]
    fn test_edges_keep_insertion_order() {
        let mut graph = ImplicationGraph::new(3);
        graph.add_clause(1, 2).unwrap();
        graph.add_clause(1, 3).unwrap();

        let space = *graph.space();
        let from = space.index(lit(-1));
        assert_eq!(
            graph.forward(from),
            &[space.index(lit(2)), space.index(lit(3))]
        );
    }

    #[test]
    fn test_invalid_clause_leaves_graph_untouched() {
        let mut graph = ImplicationGraph::new(2);
        assert_eq!(graph.add_clause(0, 1), Err(ValidationError::ZeroLiteral));
        assert_eq!(
            graph.add_clause(1, -3),
            Err(ValidationError::VariableOutOfRange {
                literal: -3,
                num_vars: 2
            })
        );
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.edges().count(), 0);
    }

    #[test]
    fn test_unit_clause() {
        let mut graph = ImplicationGraph::new(1);
        graph.add_clause(1, 1).unwrap();
        assert_eq!(graph.forward(2), &[1, 1]);
        assert_eq!(graph.reverse(1), &[2, 2]);
    }
}
