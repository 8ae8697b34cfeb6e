use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparatorOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl fmt::Display for ComparatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparatorOp::Eq => write!(f, "="),
            ComparatorOp::NotEq => write!(f, "<>"),
            ComparatorOp::Lt => write!(f, "<"),
            ComparatorOp::LtEq => write!(f, "<="),
            ComparatorOp::Gt => write!(f, ">"),
            ComparatorOp::GtEq => write!(f, ">="),
        }
    }
}

impl fmt::Debug for ComparatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComparatorOp({})", self)
    }
}

impl TryFrom<&str> for ComparatorOp {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "=" => Ok(ComparatorOp::Eq),
            "<>" => Ok(ComparatorOp::NotEq),
            "<" => Ok(ComparatorOp::Lt),
            "<=" => Ok(ComparatorOp::LtEq),
            ">" => Ok(ComparatorOp::Gt),
            ">=" => Ok(ComparatorOp::GtEq),
            _ => Err(format!("Invalid comparer operator: '{}'", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Identifier { qualifier: Option<String>, name: String },
    String,
    Number,
    Comparator(ComparatorOp),
    OpenParen,
    CloseParen,
    And,
}

/// One lexeme of a condition; `start..end` are byte offsets into the
/// condition text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionToken {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ConditionToken {
    pub fn is_and(&self) -> bool {
        self.kind == TokenKind::And
    }

    pub fn shifted(&self, by: usize) -> Self {
        Self {
            kind: self.kind.clone(),
            text: self.text.clone(),
            start: self.start - by,
            end: self.end - by,
        }
    }
}

/// Column reference found in a condition or select item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeRef {
    pub qualifier: Option<String>,
    pub column: String,
}

impl AttributeRef {
    pub fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{}.{}", qualifier, self.column),
            None => write!(f, "{}", self.column),
        }
    }
}
