use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::{ast::TableRef, condition::Condition, ParseError, ParseErrorKind, Phase, QueryParser};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub table: TableRef,
    pub on: Condition,
}

impl Join {
    /// Parses consecutive `INNER JOIN <table> ON <condition>` clauses.
    /// The cursor must sit right after the first `INNER JOIN`.
    pub fn parse(parser: &mut QueryParser, from: &TableRef) -> Result<Vec<Join>, ParseError> {
        let mut joins: Vec<Join> = vec![];

        while parser.phase == Phase::Joins {
            parser.next_non_whitespace();
            let pivot = parser.position;
            let table = TableRef::parse(parser)?;

            let mut taken = std::iter::once(from).chain(joins.iter().map(|join| &join.table));
            if let Some(previous) = taken.find(|t| t.alias.eq_ignore_ascii_case(&table.alias)) {
                let message = format!("Alias '{}' already names table '{}'", table.alias, previous.name);
                return ParseError::new(ParseErrorKind::DuplicateAlias, &message, pivot, parser).err();
            }

            parser.next_non_whitespace();
            match parser.comparers.on.matches(parser) {
                Some(length) => parser.jump(length),
                None => {
                    return ParseError::new(ParseErrorKind::MalformedQuery, "Expected ON after joined table", parser.position, parser).err();
                },
            }

            let pivot = parser.position;
            let text = parser.collect_until(|p, at| p.comparers.is_clause_start(p, at));
            let on = Condition::parse(&text)
                .map_err(|cause| ParseError::condition(ParseErrorKind::InvalidJoinCondition, cause, pivot, parser))?;

            debug!(table = %table, on = %on, "parsed INNER JOIN");
            joins.push(Join { table, on });

            if !parser.check_next_phase() {
                return ParseError::new(ParseErrorKind::UnexpectedTrailingInput, "Unexpected text after join", parser.position, parser).err();
            }
        }

        Ok(joins)
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INNER JOIN {} ON {}", self.table, self.on)
    }
}
