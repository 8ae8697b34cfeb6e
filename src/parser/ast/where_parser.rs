use tracing::debug;

use crate::parser::{condition::Condition, ParseError, ParseErrorKind, QueryParser};

pub struct WhereParser;

impl WhereParser {
    /// Reads the condition after a consumed `WHERE`, stopping before any
    /// further clause keyword.
    pub fn parse(parser: &mut QueryParser) -> Result<Condition, ParseError> {
        let pivot = parser.position;
        let text = parser.collect_until(|p, at| p.comparers.is_clause_start(p, at));

        let condition = Condition::parse(&text)
            .map_err(|cause| ParseError::condition(ParseErrorKind::InvalidWhereCondition, cause, pivot, parser))?;

        debug!(conjuncts = condition.conjuncts().len(), "parsed WHERE");
        Ok(condition)
    }
}
