//! A 2-SAT solver based on strongly connected components of the implication graph.
//!
//! The [`sat`] module holds the decision procedure and the input formats, [`report`] the
//! result rows and their writers, and [`batch`] the driver that solves many instances in
//! one run.

/// The 2-SAT core: literals, the implication graph, SCC computation, conflict detection,
/// model extraction, plus the DIMACS and batch input formats.
pub mod sat;

/// Per-instance reports, batch summaries and their CSV and table writers.
pub mod report;

/// Solving a sequence of instances with per-instance timing and rejection handling.
pub mod batch;
