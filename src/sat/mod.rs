#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod batch_format;
pub mod checker;
pub mod clause;
pub mod dimacs;
pub mod error;
pub mod generator;
pub mod graph;
pub mod instance;
pub mod literal;
pub mod scc;
pub mod solver;
