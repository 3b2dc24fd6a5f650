#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reader and writer for multi-instance clause files.
//!
//! A batch file holds any number of 2-SAT instances, one line per record:
//!
//! ```text
//! c,1,3,S          start of instance 1: at least 3 variables, expected satisfiable
//! p,cnf,3,2        3 variables, 2 clauses
//! 1,-2,0           clause (1 OR -2)
//! 2,3,0
//! ```
//!
//! The answer field of a `c` line is `S`, `U` or `?` and may be omitted. A `p` line with no
//! `c` line in front of it opens an instance of its own, numbered after the last one seen.
//! Fields are separated by commas; a line without a comma is split on whitespace instead.
//!
//! Literal ranges are not checked here. An instance whose clauses mention variables beyond
//! its header is returned as-is and rejected later, when a solver is built from it.

use crate::sat::clause::Clause;
use crate::sat::error::ParseError;
use crate::sat::instance::{ExpectedAnswer, Instance};
use log::warn;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

/// An instance being read, plus whether its `p` line has been seen.
struct Pending {
    instance: Instance,
    has_header: bool,
}

#[derive(Default)]
struct BatchReader {
    instances: Vec<Instance>,
    current: Option<Pending>,
    next_id: usize,
}

impl BatchReader {
    fn start(&mut self, instance: Instance, has_header: bool) {
        self.finish();
        self.next_id = self.next_id.max(instance.id.saturating_add(1));
        self.current = Some(Pending {
            instance,
            has_header,
        });
    }

    fn finish(&mut self) {
        if let Some(Pending { instance, .. }) = self.current.take() {
            if !instance.count_matches_header() {
                warn!(
                    "instance {}: header declares {} clauses, found {}",
                    instance.id,
                    instance.declared_clauses.unwrap_or_default(),
                    instance.num_clauses()
                );
            }
            self.instances.push(instance);
        }
    }

    fn comment(&mut self, fields: &[&str], line: usize) -> Result<(), ParseError> {
        if !(3..=4).contains(&fields.len()) {
            return Err(ParseError::malformed(
                line,
                "expected 'c,<id>,<variables>[,<answer>]'",
            ));
        }

        let id = number(fields[1], "instance id", line)?;
        let mut instance = Instance::new(id, number(fields[2], "variable count", line)?);
        instance.expected = fields
            .get(3)
            .map_or(Ok(ExpectedAnswer::Unknown), |code| code.parse())
            .map_err(|reason| ParseError::malformed(line, reason))?;

        self.start(instance, false);
        Ok(())
    }

    fn header(&mut self, fields: &[&str], line: usize) -> Result<(), ParseError> {
        if fields.len() != 4 || fields[1] != "cnf" {
            return Err(ParseError::malformed(
                line,
                "expected 'p,cnf,<variables>,<clauses>'",
            ));
        }

        let num_vars = number(fields[2], "variable count", line)?;
        let declared = number(fields[3], "clause count", line)?;

        match &mut self.current {
            Some(pending) if !pending.has_header => {
                pending.instance.num_vars = num_vars;
                pending.instance.declared_clauses = Some(declared);
                pending.has_header = true;
            }
            _ => {
                let mut instance = Instance::new(self.next_id, num_vars);
                instance.declared_clauses = Some(declared);
                self.start(instance, true);
            }
        }
        Ok(())
    }

    fn clause(&mut self, fields: &[&str], line: usize) -> Result<(), ParseError> {
        let Some(pending) = self.current.as_mut().filter(|p| p.has_header) else {
            return Err(ParseError::malformed(line, "clause before any 'p' header"));
        };

        let literals = fields
            .iter()
            .map(|field| number::<i32>(field, "literal", line))
            .collect::<Result<Vec<_>, _>>()?;

        match literals.as_slice() {
            [a, b, 0] => {
                let clause = Clause::try_from((*a, *b))
                    .map_err(|err| ParseError::malformed(line, err.to_string()))?;
                pending.instance.clauses.push(clause);
                Ok(())
            }
            [_, _, _] => Err(ParseError::malformed(line, "clause must end with 0")),
            _ => Err(ParseError::malformed(
                line,
                format!("expected '<a>,<b>,0', found {} fields", literals.len()),
            )),
        }
    }

    fn line(&mut self, text: &str, line: usize) -> Result<(), ParseError> {
        let fields = split_fields(text);
        match fields.first().copied() {
            None => Ok(()),
            Some("c") => self.comment(&fields, line),
            Some("p") => self.header(&fields, line),
            Some(_) => self.clause(&fields, line),
        }
    }

    fn into_instances(mut self) -> Vec<Instance> {
        self.finish();
        self.instances
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn number<T: FromStr>(field: &str, what: &str, line: usize) -> Result<T, ParseError> {
    field
        .parse()
        .map_err(|_| ParseError::malformed(line, format!("invalid {what} '{field}'")))
}

/// Reads every instance of a batch file.
///
/// # Errors
///
/// [`ParseError`] naming the first malformed line, or wrapping the I/O error that stopped
/// the read.
pub fn parse_batch<R: BufRead>(reader: R) -> Result<Vec<Instance>, ParseError> {
    let mut batch = BatchReader::default();
    for (index, line) in reader.lines().enumerate() {
        batch.line(&line?, index + 1)?;
    }
    Ok(batch.into_instances())
}

/// Reads every instance from an in-memory batch text.
///
/// # Errors
///
/// See [`parse_batch`].
pub fn parse_batch_str(text: &str) -> Result<Vec<Instance>, ParseError> {
    parse_batch(text.as_bytes())
}

/// Opens and reads a batch file.
///
/// # Errors
///
/// See [`parse_batch`]; failing to open the file is reported as [`ParseError::Io`].
pub fn parse_batch_file(path: impl AsRef<Path>) -> Result<Vec<Instance>, ParseError> {
    let file = File::open(path)?;
    parse_batch(BufReader::new(file))
}

/// Whether `text` looks like a batch file rather than DIMACS: its first line that is not
/// blank and not a DIMACS comment contains a comma.
#[must_use]
pub fn looks_like_batch(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !is_dimacs_comment(line))
        .is_some_and(|line| line.contains(','))
}

fn is_dimacs_comment(line: &str) -> bool {
    line == "c" || line.starts_with("c ") || line.starts_with("c\t")
}

/// Writes instances in the batch format, so that [`parse_batch`] reads them back unchanged.
///
/// # Errors
///
/// Any error from the underlying writer.
pub fn write_batch<W: Write>(mut writer: W, instances: &[Instance]) -> io::Result<()> {
    for instance in instances {
        writeln!(
            writer,
            "c,{},{},{}",
            instance.id, instance.num_vars, instance.expected
        )?;
        writeln!(
            writer,
            "p,cnf,{},{}",
            instance.num_vars,
            instance.num_clauses()
        )?;
        for clause in &instance.clauses {
            writeln!(writer, "{},{},0", clause.first(), clause.second())?;
        }
    }
    writer.flush()
}
