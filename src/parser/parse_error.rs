use std::fmt::{self, Display};

use serde::Serialize;

use crate::parser::{ConditionError, QueryParser};

/// Which clause-level rule a rejected query broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseErrorKind {
    /// Missing `SELECT`/`FROM` or an unreadable table reference.
    MalformedQuery,
    InvalidJoinCondition,
    InvalidWhereCondition,
    /// Text left after the last `INNER JOIN`/`WHERE` clause.
    UnexpectedTrailingInput,
    /// Two table references share one alias.
    DuplicateAlias,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::MalformedQuery => "MalformedQuery",
            ParseErrorKind::InvalidJoinCondition => "InvalidJoinCondition",
            ParseErrorKind::InvalidWhereCondition => "InvalidWhereCondition",
            ParseErrorKind::UnexpectedTrailingInput => "UnexpectedTrailingInput",
            ParseErrorKind::DuplicateAlias => "DuplicateAlias",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub cause: Option<ConditionError>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: &str, pivot: usize, parser: &QueryParser) -> Self {
        Self {
            kind,
            message: message.to_string(),
            text: parser.text_from_range(pivot, parser.position.max(pivot + 1)),
            start: pivot,
            end: parser.position.max(pivot),
            cause: None,
        }
    }

    /// Error for a rejected `ON`/`WHERE` condition spanning `pivot..parser.position`.
    pub fn condition(kind: ParseErrorKind, cause: ConditionError, pivot: usize, parser: &QueryParser) -> Self {
        let clause = match kind {
            ParseErrorKind::InvalidJoinCondition => "ON",
            _ => "WHERE",
        };
        Self {
            kind,
            message: format!("Invalid {} condition: {}", clause, cause),
            text: parser.text_from_pivot(pivot).trim().to_string(),
            start: pivot,
            end: parser.position,
            cause: Some(cause),
        }
    }

    pub fn err<T>(self) -> Result<T, ParseError> {
        Err(self)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParseError({}): {}\n  at [{}:{}] -> '{}'",
            self.kind,
            self.message,
            self.start,
            self.end,
            self.text
        )
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
