use std::fmt::{self, Display};

use serde::Serialize;

/// Why a `WHERE`/`ON` condition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConditionError {
    Empty,
    /// `OR`, `NOT`, `LIKE`, `IS` or `NULL` used as a bare word.
    ForbiddenKeyword(String),
    /// Operator outside `=, <, >, <=, >=, <>`.
    UnsupportedOperator(String),
    UnexpectedCharacter(char),
    UnterminatedString,
    UnbalancedParentheses,
    /// `AND` at either end of a group or next to another `AND`.
    EmptyConjunct,
}

impl Display for ConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionError::Empty => write!(f, "empty condition"),
            ConditionError::ForbiddenKeyword(word) => write!(f, "keyword '{}' is not supported", word),
            ConditionError::UnsupportedOperator(op) => write!(f, "operator '{}' is not supported", op),
            ConditionError::UnexpectedCharacter(ch) => write!(f, "unexpected character '{}'", ch),
            ConditionError::UnterminatedString => write!(f, "unterminated string literal"),
            ConditionError::UnbalancedParentheses => write!(f, "unbalanced parentheses"),
            ConditionError::EmptyConjunct => write!(f, "AND without an operand"),
        }
    }
}

impl std::error::Error for ConditionError {}
