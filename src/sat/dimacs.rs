#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for DIMACS CNF restricted to 2-SAT.
//!
//! The format typically includes:
//! - Comment lines starting with `c`.
//! - A problem line `p cnf <num_variables> <num_clauses>`.
//! - Clauses as whitespace-separated literals, each clause terminated by `0`. A clause may
//!   span several lines, and a line may hold several clauses.
//! - An optional `%` line marking the end of data.
//!
//! Clauses of one literal become unit clauses `(a, a)`. Empty clauses and clauses of three
//! or more literals are rejected, since they are not 2-SAT.

use crate::sat::clause::Clause;
use crate::sat::error::ParseError;
use crate::sat::instance::Instance;
use crate::sat::literal::Lit;
use log::{debug, warn};
use smallvec::SmallVec;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn close_clause(literals: &[Lit], line: usize) -> Result<Clause, ParseError> {
    match *literals {
        [a] => Ok(Clause::unit(a)),
        [a, b] => Ok(Clause::new(a, b)),
        [] => Err(ParseError::malformed(line, "empty clause")),
        _ => Err(ParseError::malformed(
            line,
            format!(
                "clause has {} literals, only clauses of 1 or 2 literals are supported",
                literals.len()
            ),
        )),
    }
}

fn parse_header<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<(usize, usize), ParseError> {
    let malformed = || ParseError::malformed(line, "expected 'p cnf <variables> <clauses>'");

    if parts.next() != Some("cnf") {
        return Err(malformed());
    }
    let num_vars = parts.next().and_then(|s| s.parse().ok()).ok_or_else(malformed)?;
    let num_clauses = parts.next().and_then(|s| s.parse().ok()).ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok((num_vars, num_clauses))
}

/// Parses DIMACS formatted data from a `BufRead` source into an [`Instance`].
///
/// The variable count is the one declared by the `p` line, or the largest variable used when
/// there is no `p` line. Literals beyond a declared count are kept as read, so building a
/// solver from the instance fails with
/// [`ValidationError::VariableOutOfRange`](crate::sat::error::ValidationError). A clause count
/// differing from the declared one is logged, not rejected.
///
/// # Errors
///
/// [`ParseError`] for a malformed `p` line, a repeated `p` line, a token that is not an
/// integer, a clause that is not 2-SAT, a clause missing its `0` terminator at the end of
/// input, or a read failure.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Instance, ParseError> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses = Vec::new();
    let mut pending: SmallVec<[Lit; 2]> = SmallVec::new();
    let mut last_line = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_str = line?;
        let line_no = index + 1;
        let mut parts = line_str.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None => {}
            Some(token) if token.starts_with('c') => {}
            Some(&"p") => {
                if header.is_some() {
                    return Err(ParseError::malformed(line_no, "duplicate 'p' line"));
                }
                parts.next();
                header = Some(parse_header(parts, line_no)?);
            }
            Some(_) => {
                for token in parts {
                    let value: i32 = token.parse().map_err(|_| {
                        ParseError::malformed(line_no, format!("invalid literal '{token}'"))
                    })?;
                    match Lit::from_i32(value) {
                        Some(lit) => pending.push(lit),
                        None => {
                            clauses.push(close_clause(&pending, line_no)?);
                            pending.clear();
                        }
                    }
                }
                last_line = line_no;
            }
        }
    }

    if !pending.is_empty() {
        return Err(ParseError::malformed(last_line, "clause is missing its 0 terminator"));
    }

    let (declared_vars, declared_clauses) = header.unzip();
    let mut instance = Instance::new(1, 0).with_clauses(clauses);
    instance.num_vars = declared_vars.unwrap_or_else(|| instance.max_variable());
    instance.declared_clauses = declared_clauses;

    if !instance.count_matches_header() {
        warn!(
            "header declares {} clauses, found {}",
            declared_clauses.unwrap_or_default(),
            instance.num_clauses()
        );
    }
    debug!(
        "parsed DIMACS instance: {} variables, {} clauses",
        instance.num_vars,
        instance.num_clauses()
    );

    Ok(instance)
}

/// Parses DIMACS text held in memory.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_dimacs_str(text: &str) -> Result<Instance, ParseError> {
    parse_dimacs(text.as_bytes())
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// [`ParseError::Io`] if the file cannot be opened or read, otherwise see [`parse_dimacs`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Instance, ParseError> {
    let file = File::open(path)?;
    parse_dimacs(BufReader::new(file))
}
