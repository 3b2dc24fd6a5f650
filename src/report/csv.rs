#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! CSV rendering of batch results.
//!
//! Each solved instance becomes one row: id, variables, clauses, max literals in any
//! clause, total literals, `S`/`U`, answer check (`1`/`-1`/`0`), solve time in
//! microseconds, followed by one `1`/`0` column per variable when satisfiable. A rejected
//! instance is a row with status `E` and the error message in the last column. The batch
//! ends with a summary row.

use crate::report::{BatchSummary, InstanceReport, ReportWriter};
use itertools::Itertools;
use std::borrow::Cow;
use std::io::{self, Write};

const HEADER: [&str; 9] = [
    "Problem Number",
    "Number of Variables",
    "Number of Clauses",
    "Max Literals in Any Clause",
    "Total Number of Literals",
    "S/U",
    "1/-1/0",
    "Execution Time (microseconds)",
    "Variable Assignments",
];

/// Quotes a field if it contains a separator, a quote or a line break.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[derive(Debug)]
pub struct CsvWriter<W: Write> {
    out: W,
}

impl<W: Write> CsvWriter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for CsvWriter<W> {
    fn header(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", HEADER.iter().map(|h| escape(h)).join(","))
    }

    fn row(&mut self, report: &InstanceReport) -> io::Result<()> {
        write!(
            self.out,
            "{},{},{},{},{},{},{},{:.3}",
            report.id,
            report.num_vars,
            report.num_clauses,
            report.max_clause_len,
            report.total_literals,
            report.status.code(),
            report.answer.code(),
            report.elapsed_micros(),
        )?;
        for bit in report.assignment_bits() {
            write!(self.out, ",{bit}")?;
        }
        writeln!(self.out)
    }

    fn rejection(&mut self, id: usize, reason: &str) -> io::Result<()> {
        writeln!(self.out, "{id},,,,,E,,,{}", escape(reason))
    }

    fn summary(&mut self, summary: &BatchSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{},{},{}",
            escape(&summary.label),
            summary.total,
            summary.satisfiable,
            summary.unsatisfiable,
            summary.answers_provided,
            summary.correct,
            summary.rejected,
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::Model;
    use crate::sat::instance::AnswerCheck;
    use crate::sat::solver::Status;
    use std::time::Duration;

    fn render(f: impl FnOnce(&mut CsvWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut writer = CsvWriter::new(Vec::new());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_header() {
        let text = render(|w| w.header());
        assert!(text.starts_with("Problem Number,Number of Variables,"));
        assert!(text.ends_with("Variable Assignments\n"));
    }

    #[test]
    fn test_satisfiable_row() {
        let report = InstanceReport {
            id: 3,
            num_vars: 3,
            num_clauses: 2,
            max_clause_len: 2,
            total_literals: 4,
            status: Status::Satisfiable,
            answer: AnswerCheck::Match,
            elapsed: Duration::from_micros(42),
            model: Some(Model::from(vec![true, false, true])),
        };
        assert_eq!(render(|w| w.row(&report)), "3,3,2,2,4,S,1,42.000,1,0,1\n");
    }

    #[test]
    fn test_unsatisfiable_row() {
        let report = InstanceReport {
            id: 4,
            num_vars: 1,
            num_clauses: 2,
            max_clause_len: 2,
            total_literals: 4,
            status: Status::Unsatisfiable,
            answer: AnswerCheck::NotProvided,
            elapsed: Duration::from_nanos(1500),
            model: None,
        };
        assert_eq!(render(|w| w.row(&report)), "4,1,2,2,4,U,0,1.500\n");
    }

    #[test]
    fn test_rejection_is_quoted() {
        let text = render(|w| w.rejection(7, "literal 5 refers to variable 5, outside 1..=2"));
        assert_eq!(
            text,
            "7,,,,,E,,,\"literal 5 refers to variable 5, outside 1..=2\"\n"
        );
    }

    #[test]
    fn test_summary_row() {
        let summary = BatchSummary {
            label: "2SAT".into(),
            total: 5,
            satisfiable: 3,
            unsatisfiable: 1,
            answers_provided: 4,
            correct: 4,
            rejected: 1,
        };
        assert_eq!(render(|w| w.summary(&summary)), "2SAT,5,3,1,4,4,1\n");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
