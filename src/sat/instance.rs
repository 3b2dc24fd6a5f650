#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parsed 2-SAT problem, independent of the text format it came from.

use crate::sat::assignment::Model;
use crate::sat::clause::Clause;
use crate::sat::solver::Status;
use std::fmt;
use std::str::FromStr;

/// The answer an input file claims for an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpectedAnswer {
    Satisfiable,
    Unsatisfiable,
    #[default]
    Unknown,
}

impl ExpectedAnswer {
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Satisfiable => 'S',
            Self::Unsatisfiable => 'U',
            Self::Unknown => '?',
        }
    }

    #[must_use]
    pub const fn is_provided(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl FromStr for ExpectedAnswer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" | "s" => Ok(Self::Satisfiable),
            "U" | "u" => Ok(Self::Unsatisfiable),
            "?" | "" => Ok(Self::Unknown),
            other => Err(format!("unknown answer code '{other}', expected S, U or ?")),
        }
    }
}

impl From<Status> for ExpectedAnswer {
    fn from(status: Status) -> Self {
        match status {
            Status::Satisfiable => Self::Satisfiable,
            Status::Unsatisfiable => Self::Unsatisfiable,
        }
    }
}

impl fmt::Display for ExpectedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of comparing a computed status with the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerCheck {
    Match,
    Mismatch,
    NotProvided,
}

impl AnswerCheck {
    /// `1`, `-1` or `0`, as written in reports.
    #[must_use]
    pub const fn code(self) -> i8 {
        match self {
            Self::Match => 1,
            Self::Mismatch => -1,
            Self::NotProvided => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Instance {
    /// Identifier from the input, or a running number.
    pub id: usize,
    pub num_vars: usize,
    /// Clause count announced by the header, if there was one.
    pub declared_clauses: Option<usize>,
    pub expected: ExpectedAnswer,
    pub clauses: Vec<Clause>,
}

impl Instance {
    #[must_use]
    pub const fn new(id: usize, num_vars: usize) -> Self {
        Self {
            id,
            num_vars,
            declared_clauses: None,
            expected: ExpectedAnswer::Unknown,
            clauses: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clauses(mut self, clauses: Vec<Clause>) -> Self {
        self.clauses = clauses;
        self
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Largest number of literals in any clause: 2, or 0 for an empty instance.
    #[must_use]
    pub fn max_clause_len(&self) -> usize {
        if self.clauses.is_empty() {
            0
        } else {
            Clause::WIDTH
        }
    }

    #[must_use]
    pub fn total_literals(&self) -> usize {
        self.clauses.len() * Clause::WIDTH
    }

    /// Largest variable any clause mentions.
    #[must_use]
    pub fn max_variable(&self) -> usize {
        self.clauses
            .iter()
            .map(|c| c.max_variable() as usize)
            .max()
            .unwrap_or(0)
    }

    /// Whether the declared clause count, if any, matches the clauses read.
    #[must_use]
    pub fn count_matches_header(&self) -> bool {
        self.declared_clauses
            .is_none_or(|declared| declared == self.clauses.len())
    }

    #[must_use]
    pub fn check_answer(&self, status: Status) -> AnswerCheck {
        if !self.expected.is_provided() {
            AnswerCheck::NotProvided
        } else if self.expected == ExpectedAnswer::from(status) {
            AnswerCheck::Match
        } else {
            AnswerCheck::Mismatch
        }
    }

    /// Returns the first clause `model` falsifies, or `None` if it satisfies all of them.
    #[must_use]
    pub fn first_violated(&self, model: &Model) -> Option<&Clause> {
        self.clauses.iter().find(|c| !model.satisfies(c))
    }

    #[must_use]
    pub fn verify(&self, model: &Model) -> bool {
        model.len() == self.num_vars && self.first_violated(model).is_none()
    }
}
