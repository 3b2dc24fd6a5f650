#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-instance result rows and the writers that render them.
//!
//! A batch run produces one [`InstanceReport`] per solved instance, a rejection line for
//! every instance that could not be built, and a closing [`BatchSummary`]. How these are
//! rendered is up to a [`ReportWriter`]; [`ReportFormat`] picks one from the command line.

pub mod csv;
pub mod summary;
pub mod table;

use crate::report::csv::CsvWriter;
use crate::report::table::TableWriter;
use crate::sat::assignment::Model;
use crate::sat::instance::{AnswerCheck, Instance};
use crate::sat::solver::{Solution, Status};
use clap::ValueEnum;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::Duration;

pub use summary::BatchSummary;

/// The outcome of one solved instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceReport {
    pub id: usize,
    pub num_vars: usize,
    pub num_clauses: usize,
    pub max_clause_len: usize,
    pub total_literals: usize,
    pub status: Status,
    pub answer: AnswerCheck,
    /// Wall-clock time spent solving, excluding parsing.
    pub elapsed: Duration,
    /// The satisfying assignment, `None` when unsatisfiable.
    pub model: Option<Model>,
}

impl InstanceReport {
    #[must_use]
    pub fn new(instance: &Instance, solution: Solution, elapsed: Duration) -> Self {
        let status = solution.status();
        Self {
            id: instance.id,
            num_vars: instance.num_vars,
            num_clauses: instance.num_clauses(),
            max_clause_len: instance.max_clause_len(),
            total_literals: instance.total_literals(),
            status,
            answer: instance.check_answer(status),
            elapsed,
            model: solution.into_model(),
        }
    }

    #[must_use]
    pub fn elapsed_micros(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e6
    }

    /// Assignment as `1`/`0` per variable, empty when unsatisfiable.
    pub fn assignment_bits(&self) -> impl Iterator<Item = u8> + '_ {
        self.model
            .iter()
            .flat_map(|model| model.values().iter().map(|&value| u8::from(value)))
    }
}

/// Renders the rows of a batch run.
pub trait ReportWriter {
    fn header(&mut self) -> io::Result<()>;

    fn row(&mut self, report: &InstanceReport) -> io::Result<()>;

    /// An instance that was parsed but could not be solved.
    fn rejection(&mut self, id: usize, reason: &str) -> io::Result<()>;

    fn summary(&mut self, summary: &BatchSummary) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Possible report writer implementations.
#[derive(Debug)]
pub enum ReportWriterImpls<W: Write> {
    Csv(CsvWriter<W>),
    Table(TableWriter<W>),
}

impl<W: Write> ReportWriter for ReportWriterImpls<W> {
    fn header(&mut self) -> io::Result<()> {
        match self {
            Self::Csv(w) => w.header(),
            Self::Table(w) => w.header(),
        }
    }

    fn row(&mut self, report: &InstanceReport) -> io::Result<()> {
        match self {
            Self::Csv(w) => w.row(report),
            Self::Table(w) => w.row(report),
        }
    }

    fn rejection(&mut self, id: usize, reason: &str) -> io::Result<()> {
        match self {
            Self::Csv(w) => w.rejection(id, reason),
            Self::Table(w) => w.rejection(id, reason),
        }
    }

    fn summary(&mut self, summary: &BatchSummary) -> io::Result<()> {
        match self {
            Self::Csv(w) => w.summary(summary),
            Self::Table(w) => w.summary(summary),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Csv(w) => w.flush(),
            Self::Table(w) => w.flush(),
        }
    }
}

/// Output format of a batch report.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum ReportFormat {
    /// Comma-separated values, one row per instance
    #[default]
    Csv,
    /// Aligned columns for reading in a terminal
    Table,
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl ReportFormat {
    /// Wraps `out` in the writer for this format.
    pub fn to_impl<W: Write>(self, out: W) -> ReportWriterImpls<W> {
        match self {
            Self::Csv => ReportWriterImpls::Csv(CsvWriter::new(out)),
            Self::Table => ReportWriterImpls::Table(TableWriter::new(out)),
        }
    }
}
