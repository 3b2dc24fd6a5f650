//! Error types for building and reading 2-SAT instances.
//!
//! The decision procedure itself never fails once an instance is built; an unsatisfiable
//! formula is an ordinary [`Solution`](crate::sat::solver::Solution), not an error.

use std::io;
use thiserror::Error;

/// A clause that does not fit the instance it is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("literal 0 is not a valid literal")]
    ZeroLiteral,
    #[error("literal {literal} refers to variable {var}, outside 1..={num_vars}", var = .literal.unsigned_abs())]
    VariableOutOfRange { literal: i32, num_vars: usize },
}

/// Malformed textual input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }

    /// The 1-based line the error was found on, if it came from the text itself.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Malformed { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_name_the_literal() {
        let err = ValidationError::VariableOutOfRange {
            literal: -7,
            num_vars: 3,
        };
        assert_eq!(
            err.to_string(),
            "literal -7 refers to variable 7, outside 1..=3"
        );
        assert_eq!(
            ValidationError::ZeroLiteral.to_string(),
            "literal 0 is not a valid literal"
        );
    }

    #[test]
    fn test_parse_error_line() {
        let err = ParseError::malformed(12, "missing terminator");
        assert_eq!(err.line(), Some(12));
        assert_eq!(err.to_string(), "line 12: missing terminator");
    }
}
