#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Solving many instances in one run.
//!
//! Every instance is built, solved and timed on its own. An instance that cannot be built,
//! or whose model fails verification, is logged and counted as rejected; the run carries on
//! with the next one.

use crate::report::{BatchSummary, InstanceReport, ReportWriter};
use crate::sat::error::ValidationError;
use crate::sat::instance::Instance;
use crate::sat::solver::TwoSat;
use log::{error, info};
use std::io;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The solver returned a model that falsifies one of the instance's clauses.
    #[error("instance {id}: model falsifies clause {clause}")]
    Verification { id: usize, clause: String },
}

/// Builds and solves one instance, timing only the solve itself.
///
/// # Errors
///
/// The [`ValidationError`] of the first clause that does not fit the instance.
pub fn solve_instance(instance: &Instance) -> Result<InstanceReport, ValidationError> {
    let solver = TwoSat::from_instance(instance)?;

    let time = Instant::now();
    let solution = solver.solve();
    let elapsed = time.elapsed();

    Ok(InstanceReport::new(instance, solution, elapsed))
}

/// Checks a report's model against the instance it came from.
///
/// # Errors
///
/// [`BatchError::Verification`] naming the first falsified clause.
pub fn verify_report(instance: &Instance, report: &InstanceReport) -> Result<(), BatchError> {
    let Some(model) = &report.model else {
        return Ok(());
    };
    match instance.first_violated(model) {
        Some(clause) => Err(BatchError::Verification {
            id: instance.id,
            clause: clause.to_string(),
        }),
        None => Ok(()),
    }
}

/// Writes the outcome of one instance and adds it to the totals.
///
/// An instance that could not be built, or whose model fails verification, becomes a
/// rejection line.
fn record<R: ReportWriter>(
    instance: &Instance,
    outcome: Result<InstanceReport, BatchError>,
    writer: &mut R,
    summary: &mut BatchSummary,
) -> io::Result<()> {
    match outcome {
        Ok(report) => {
            info!(
                "instance {}: {} in {:.3} us",
                instance.id,
                report.status,
                report.elapsed_micros()
            );
            summary.record(&report);
            writer.row(&report)
        }
        Err(err) => {
            error!("instance {} rejected: {err}", instance.id);
            summary.record_rejection();
            writer.rejection(instance.id, &err.to_string())
        }
    }
}

/// Solves every instance, writing one report line each, and returns the totals.
///
/// With `verify` set, every model is checked against its clauses. An instance that cannot be
/// built or whose model falsifies a clause is reported as rejected, and the run continues.
///
/// # Errors
///
/// [`BatchError::Io`] if writing the report fails.
pub fn run_batch<R: ReportWriter>(
    label: &str,
    instances: &[Instance],
    writer: &mut R,
    verify: bool,
) -> Result<BatchSummary, BatchError> {
    let mut summary = BatchSummary::new(label);

    writer.header()?;
    for instance in instances {
        let outcome = solve_instance(instance)
            .map_err(BatchError::from)
            .and_then(|report| {
                if verify {
                    verify_report(instance, &report)?;
                }
                Ok(report)
            });
        record(instance, outcome, writer, &mut summary)?;
    }
    writer.summary(&summary)?;
    writer.flush()?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::csv::CsvWriter;
    use crate::sat::assignment::Model;
    use crate::sat::batch_format::parse_batch_str;
    use crate::sat::clause::Clause;
    use crate::sat::solver::Status;

    const BATCH: &str = "c,1,1,S\n\
                         p,cnf,1,1\n\
                         1,1,0\n\
                         c,2,1,U\n\
                         p,cnf,1,2\n\
                         1,1,0\n\
                         -1,-1,0\n\
                         c,3,2,S\n\
                         p,cnf,2,1\n\
                         1,3,0\n\
                         c,4,2,U\n\
                         p,cnf,2,2\n\
                         1,2,0\n\
                         -1,-2,0\n\
                         c,5,3,?\n\
                         p,cnf,3,0\n";

    #[test]
    fn test_solve_instance() {
        let instances = parse_batch_str(BATCH).unwrap();

        let report = solve_instance(&instances[0]).unwrap();
        assert_eq!(report.status, Status::Satisfiable);
        assert_eq!(report.model, Some(Model::from(vec![true])));

        assert_eq!(
            solve_instance(&instances[2]),
            Err(ValidationError::VariableOutOfRange {
                literal: 3,
                num_vars: 2
            })
        );
    }

    #[test]
    fn test_rejected_instance_does_not_stop_the_batch() {
        let instances = parse_batch_str(BATCH).unwrap();
        let mut writer = CsvWriter::new(Vec::new());

        let summary = run_batch("2SAT", &instances, &mut writer, true).unwrap();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.satisfiable, 3);
        assert_eq!(summary.unsatisfiable, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.answers_provided, 3);
        assert_eq!(summary.correct, 2);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("1,1,1,2,2,S,1,"));
        assert!(lines[2].starts_with("2,1,2,2,4,U,1,"));
        assert!(lines[3].starts_with("3,,,,,E,,,"));
        assert!(lines[4].starts_with("4,2,2,2,4,S,-1,"));
        assert!(lines[5].starts_with("5,3,0,0,0,S,0,"));
        assert_eq!(lines[6], "2SAT,5,3,1,3,2,1");
    }

    #[test]
    fn test_falsified_model_is_rejected_and_batch_continues() {
        let instance = Instance::new(6, 1).with_clauses(vec![Clause::try_from((1, 1)).unwrap()]);
        let mut report = solve_instance(&instance).unwrap();
        report.model = Some(Model::from(vec![false]));
        let outcome = verify_report(&instance, &report).map(|()| report);

        let mut writer = CsvWriter::new(Vec::new());
        let mut summary = BatchSummary::new("bad");
        record(&instance, outcome, &mut writer, &mut summary).unwrap();
        let next = solve_instance(&instance).map_err(BatchError::from);
        record(&instance, next, &mut writer, &mut summary).unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.satisfiable, 1);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "6,,,,,E,,,instance 6: model falsifies clause (1 1)");
        assert!(lines[1].starts_with("6,1,1,2,2,S,0,"));
    }

    #[test]
    fn test_verify_report_catches_bad_model() {
        let instance = Instance::new(8, 1).with_clauses(vec![Clause::try_from((1, 1)).unwrap()]);
        let mut report = solve_instance(&instance).unwrap();
        assert!(verify_report(&instance, &report).is_ok());

        report.model = Some(Model::from(vec![false]));
        let err = verify_report(&instance, &report).unwrap_err();
        assert_eq!(err.to_string(), "instance 8: model falsifies clause (1 1)");
    }
}
