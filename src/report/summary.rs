#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::report::InstanceReport;
use crate::sat::instance::AnswerCheck;
use crate::sat::solver::Status;

/// Running totals of one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Name of the batch, usually the input file stem.
    pub label: String,
    pub total: usize,
    pub satisfiable: usize,
    pub unsatisfiable: usize,
    pub answers_provided: usize,
    pub correct: usize,
    pub rejected: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, report: &InstanceReport) {
        self.total += 1;
        match report.status {
            Status::Satisfiable => self.satisfiable += 1,
            Status::Unsatisfiable => self.unsatisfiable += 1,
        }
        match report.answer {
            AnswerCheck::Match => {
                self.answers_provided += 1;
                self.correct += 1;
            }
            AnswerCheck::Mismatch => self.answers_provided += 1,
            AnswerCheck::NotProvided => {}
        }
    }

    pub fn record_rejection(&mut self) {
        self.total += 1;
        self.rejected += 1;
    }

    /// Instances that were solved rather than rejected.
    #[must_use]
    pub const fn solved(&self) -> usize {
        self.satisfiable + self.unsatisfiable
    }

    /// Provided answers the solver disagreed with.
    #[must_use]
    pub const fn incorrect(&self) -> usize {
        self.answers_provided - self.correct
    }
}
