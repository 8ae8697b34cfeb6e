use crate::parser::{QueryParser, WordComparer};

#[derive(Debug)]
pub struct QueryComparers {
    pub select: WordComparer,
    pub alias: WordComparer,
    pub from: WordComparer,
    pub inner_join: WordComparer,
    pub on: WordComparer,
    pub r#where: WordComparer,
}

impl Default for QueryComparers {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryComparers {
    /// Words that can never be read as a table name or alias.
    pub const RESERVED: [&'static str; 8] = ["SELECT", "FROM", "INNER", "JOIN", "ON", "WHERE", "AND", "AS"];

    pub fn new() -> Self {
        Self {
            select: WordComparer::new("SELECT").with_whitespace_postfix().with_eof(),
            alias: WordComparer::new("AS").with_whitespace_postfix(),
            from: WordComparer::new("FROM").with_whitespace_postfix().with_eof(),
            inner_join: WordComparer::new("INNER JOIN").with_whitespace_postfix().with_eof(),
            on: WordComparer::new("ON").with_whitespace_postfix().with_any_delimiter_postfix().with_eof(),
            r#where: WordComparer::new("WHERE").with_whitespace_postfix().with_any_delimiter_postfix().with_eof(),
        }
    }

    pub fn is_reserved(word: &str) -> bool {
        Self::RESERVED.iter().any(|reserved| reserved.eq_ignore_ascii_case(word))
    }

    /// True when a clause that ends a condition starts at `position`.
    pub fn is_clause_start(&self, parser: &QueryParser, position: usize) -> bool {
        self.inner_join.matches_at(parser, position).is_some()
            || self.r#where.matches_at(parser, position).is_some()
    }
}
