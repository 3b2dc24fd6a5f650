#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strongly connected components of the implication graph (Kosaraju).
//!
//! Pass one runs a depth-first search over the *reverse* graph and records nodes in
//! finishing order. Pass two walks that order backwards and collects, for every root not yet
//! claimed, everything it reaches in the *forward* graph. This emits components in reverse
//! topological order of the forward graph: every implication leaving a component points at
//! a component that was emitted earlier (or at itself). The assignment extractor relies on
//! exactly this order.
//!
//! Both passes use an explicit frame stack, so the depth of the search is bounded by heap
//! memory rather than the native call stack.

use crate::sat::graph::ImplicationGraph;
use crate::sat::literal::{Lit, LiteralSpace};
use bit_vec::BitVec;
use log::debug;

const UNCLAIMED: usize = usize::MAX;

/// One pending node of an iterative depth-first search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    next_edge: usize,
}

/// Iterative post-order DFS from `root`. `finished` is called once per newly reached node,
/// after all of its successors have been explored.
fn explore<'g>(
    root: usize,
    successors: impl Fn(usize) -> &'g [usize],
    visited: &mut BitVec,
    stack: &mut Vec<Frame>,
    mut finished: impl FnMut(usize),
) {
    visited.set(root, true);
    stack.push(Frame {
        node: root,
        next_edge: 0,
    });

    while let Some(frame) = stack.pop() {
        match successors(frame.node).get(frame.next_edge) {
            Some(&next) => {
                stack.push(Frame {
                    next_edge: frame.next_edge + 1,
                    ..frame
                });
                if !visited[next] {
                    visited.set(next, true);
                    stack.push(Frame {
                        node: next,
                        next_edge: 0,
                    });
                }
            }
            None => finished(frame.node),
        }
    }
}

/// The components of an implication graph, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Components {
    space: LiteralSpace,
    components: Vec<Vec<Lit>>,
    component_of: Vec<usize>,
}

impl Components {
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    #[must_use]
    pub const fn space(&self) -> &LiteralSpace {
        &self.space
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&[Lit]> {
        self.components.get(position).map(Vec::as_slice)
    }

    /// Components in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &[Lit]> {
        self.components.iter().map(Vec::as_slice)
    }

    /// Position (in emission order) of the component containing `lit`.
    #[must_use]
    pub fn component_of(&self, lit: Lit) -> Option<usize> {
        if !self.space.contains(lit) {
            return None;
        }
        self.component_of
            .get(self.space.index(lit))
            .copied()
            .filter(|&position| position != UNCLAIMED)
    }

    /// Size of the largest component, 0 for an empty graph.
    #[must_use]
    pub fn largest(&self) -> usize {
        self.components.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Computes the strongly connected components of `graph`.
///
/// Runs in `O(literals + edges)`. The result partitions all `2n` literals.
#[must_use]
pub fn kosaraju(graph: &ImplicationGraph) -> Components {
    let space = *graph.space();
    let mut stack = Vec::new();

    // Pass one: finishing order over the reverse graph.
    let mut visited = BitVec::from_elem(space.len(), false);
    let mut order = Vec::with_capacity(space.num_literals());
    for root in space.indices() {
        if !visited[root] {
            explore(
                root,
                move |node| graph.reverse(node),
                &mut visited,
                &mut stack,
                |node| order.push(node),
            );
        }
    }

    // Pass two: claim components over the forward graph, latest finisher first.
    let mut visited = BitVec::from_elem(space.len(), false);
    let mut components: Vec<Vec<Lit>> = Vec::new();
    let mut component_of = vec![UNCLAIMED; space.len()];
    for &root in order.iter().rev() {
        if visited[root] {
            continue;
        }

        let position = components.len();
        let mut members = Vec::new();
        explore(
            root,
            move |node| graph.forward(node),
            &mut visited,
            &mut stack,
            |node| {
                component_of[node] = position;
                members.push(space.literal(node));
            },
        );
        components.push(members);
    }

    debug!(
        "kosaraju: {} literals, {} edges, {} components",
        space.num_literals(),
        graph.num_edges(),
        components.len()
    );

    Components {
        space,
        components,
        component_of,
    }
}
