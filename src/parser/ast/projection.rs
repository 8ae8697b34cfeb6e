use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{ParseError, ParseErrorKind, QueryParser};

/// Select list: `*` or output expressions in the order they were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    Wildcard,
    Attributes(Vec<String>),
}

impl Projection {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Projection::Wildcard)
    }

    /// Output expressions; empty for the wildcard.
    pub fn attributes(&self) -> &[String] {
        match self {
            Projection::Wildcard => &[],
            Projection::Attributes(items) => items,
        }
    }

    pub fn from_text(text: &str) -> Result<Projection, &'static str> {
        let items = split_items(text);

        if items.len() == 1 && items[0] == "*" {
            return Ok(Projection::Wildcard);
        }
        if items.iter().any(|item| item.is_empty()) {
            return Err("Empty select item");
        }
        if items.iter().any(|item| item == "*") {
            return Err("Wildcard must be the only select item");
        }

        Ok(Projection::Attributes(items))
    }
}

/// Splits on commas outside parentheses and string literals; whitespace
/// runs inside an item collapse to one space.
fn split_items(text: &str) -> Vec<String> {
    let mut items = vec![];
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;

    for ch in text.chars() {
        match ch {
            '\'' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth = depth.saturating_sub(1),
            ',' if !in_string && depth == 0 => {
                items.push(normalize(&current));
                current.clear();
                continue;
            },
            _ => {},
        }
        current.push(ch);
    }
    items.push(normalize(&current));

    items
}

fn normalize(item: &str) -> String {
    item.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Wildcard => write!(f, "*"),
            Projection::Attributes(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

pub struct ProjectionParser;

impl ProjectionParser {
    /// Reads the select list up to `FROM`, leaving the cursor on it.
    pub fn parse(parser: &mut QueryParser) -> Result<Projection, ParseError> {
        parser.next_non_whitespace();
        let pivot = parser.position;
        let text = parser.collect_until(|p, at| p.comparers.from.matches_at(p, at).is_some());

        if parser.eof() {
            return ParseError::new(ParseErrorKind::MalformedQuery, "Expected FROM", pivot, parser).err();
        }
        if text.trim().is_empty() {
            return ParseError::new(ParseErrorKind::MalformedQuery, "Empty select list", pivot, parser).err();
        }

        Projection::from_text(&text)
            .or_else(|message| ParseError::new(ParseErrorKind::MalformedQuery, message, pivot, parser).err())
    }
}
