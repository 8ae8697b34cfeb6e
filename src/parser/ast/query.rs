use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::{
    ast::{Join, Projection, ProjectionParser, TableRef, WhereParser},
    condition::Condition,
    ParseError, ParseErrorKind, Phase, QueryParser,
};

/// Structured form of one accepted `SELECT` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub select: Projection,
    pub from: TableRef,
    pub joins: Vec<Join>,
    pub criteria: Option<Condition>,
}

impl Query {
    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        parser.next_non_whitespace();

        match parser.comparers.select.matches(parser) {
            Some(length) => parser.jump(length),
            None => return ParseError::new(ParseErrorKind::MalformedQuery, "Expected SELECT", parser.position, parser).err(),
        }

        let select = ProjectionParser::parse(parser)?;
        if !parser.check_next_phase() || parser.phase != Phase::Collections {
            return ParseError::new(ParseErrorKind::MalformedQuery, "Expected FROM", parser.position, parser).err();
        }

        let from = TableRef::parse(parser)?;
        if !parser.check_next_phase() {
            return ParseError::new(ParseErrorKind::UnexpectedTrailingInput, "Unexpected text after FROM", parser.position, parser).err();
        }

        let mut joins = vec![];
        let mut criteria = None;

        while parser.phase != Phase::EOF {
            match parser.phase {
                Phase::Joins => joins = Join::parse(parser, &from)?,
                Phase::Criteria => {
                    criteria = Some(WhereParser::parse(parser)?);
                    if !parser.check_next_phase() || parser.phase != Phase::EOF {
                        return ParseError::new(ParseErrorKind::UnexpectedTrailingInput, "Unexpected text after WHERE", parser.position, parser).err();
                    }
                },
                Phase::Projection | Phase::Collections | Phase::EOF => {
                    return ParseError::new(ParseErrorKind::MalformedQuery, "Clause out of order", parser.position, parser).err();
                },
            }
        }

        debug!(from = %from, joins = joins.len(), has_where = criteria.is_some(), "parsed query");

        Ok(Query { select, from, joins, criteria })
    }

    /// `from` followed by every joined table, in join order.
    pub fn tables(&self) -> Vec<&TableRef> {
        std::iter::once(&self.from)
            .chain(self.joins.iter().map(|join| &join.table))
            .collect()
    }
}

impl TryFrom<&str> for Query {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parser = QueryParser::new(value);
        Query::parse(&mut parser)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SELECT: {}", self.select)?;
        write!(f, "FROM: {}", self.from)?;
        for (index, join) in self.joins.iter().enumerate() {
            write!(f, "\nJOIN {}: {}\n  ON: {}", index + 1, join.table, join.on)?;
        }
        if let Some(criteria) = &self.criteria {
            write!(f, "\nWHERE: {}", criteria)?;
        }
        Ok(())
    }
}
