#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::report::{BatchSummary, InstanceReport, ReportWriter};
use std::fmt::Display;
use std::io::{self, Write};

/// One `|  label   value  |` line of a statistics box.
pub fn format_stat_line(label: &str, value: impl Display) -> String {
    format!("|  {label:<28} {value:>18}  |")
}

/// Human-readable batch output with aligned columns.
#[derive(Debug)]
pub struct TableWriter<W: Write> {
    out: W,
}

impl<W: Write> TableWriter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for TableWriter<W> {
    fn header(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "{:>8} {:>8} {:>8} {:>4} {:>6} {:>14}  assignment",
            "id", "vars", "clauses", "S/U", "check", "time (us)"
        )
    }

    fn row(&mut self, report: &InstanceReport) -> io::Result<()> {
        let assignment = report
            .model
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        writeln!(
            self.out,
            "{:>8} {:>8} {:>8} {:>4} {:>6} {:>14.3}  {assignment}",
            report.id,
            report.num_vars,
            report.num_clauses,
            report.status.code(),
            report.answer.code(),
            report.elapsed_micros(),
        )
    }

    fn rejection(&mut self, id: usize, reason: &str) -> io::Result<()> {
        writeln!(self.out, "{id:>8} rejected: {reason}")
    }

    fn summary(&mut self, summary: &BatchSummary) -> io::Result<()> {
        let lines = [
            format_stat_line("Instances", summary.total),
            format_stat_line("Satisfiable", summary.satisfiable),
            format_stat_line("Unsatisfiable", summary.unsatisfiable),
            format_stat_line("Rejected", summary.rejected),
            format_stat_line("Answers provided", summary.answers_provided),
            format_stat_line("Answers confirmed", summary.correct),
            format_stat_line("Answers contradicted", summary.incorrect()),
        ];

        writeln!(
            self.out,
            "\n=======================[ Batch Summary: {} ]=======================",
            summary.label
        )?;
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        writeln!(
            self.out,
            "====================================================================="
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

    fn writer() -> TableWriter<Vec<u8>> {
        TableWriter::new(Vec::new())
    }

    #[test]
    fn test_stat_line_width() {
        let line = format_stat_line("Variables", 12);
        assert_eq!(line.len(), 3 + 28 + 1 + 18 + 3);
        assert!(line.starts_with("|  Variables"));
        assert!(line.ends_with("12  |"));
    }

    #[test]
    fn test_rows() {
        let mut w = writer();
        w.row(&InstanceReport {
            id: 1,
            num_vars: 2,
            num_clauses: 2,
            max_clause_len: 2,
            total_literals: 4,
            status: Status::Satisfiable,
            answer: AnswerCheck::Match,
            elapsed: Duration::from_micros(5),
            model: Some(Model::from(vec![true, false])),
        })
        .unwrap();
        w.rejection(2, "literal 0 is not a valid literal").unwrap();

        let text = String::from_utf8(w.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0].split_whitespace().collect::<Vec<_>>(),
            vec!["1", "2", "2", "S", "1", "5.000", "1", "-2"]
        );
        assert_eq!(lines[1], "       2 rejected: literal 0 is not a valid literal");
    }

    #[test]
    fn test_summary() {
        let mut w = writer();
        let mut summary = BatchSummary::new("demo");
        summary.record_rejection();
        w.summary(&summary).unwrap();

        let text = String::from_utf8(w.into_inner()).unwrap();
        assert!(text.contains("Batch Summary: demo"));
        assert!(text.contains(&format_stat_line("Rejected", 1)));
        assert!(text.contains(&format_stat_line("Instances", 1)));
    }
}
