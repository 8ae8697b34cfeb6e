use tracing::trace;

use crate::parser::{Phase, QueryComparers};

/// Char cursor over one SQL statement.
///
/// Clause parsers under `ast` move the cursor forward; `phase` records the
/// last clause keyword that was consumed.
#[derive(Debug, Default)]
pub struct QueryParser {
    pub position: usize,
    pub length: usize,
    pub text_v: Vec<char>,
    pub phase: Phase,
    pub text: String,
    pub comparers: QueryComparers,
}

impl QueryParser {
    pub fn new(query: &str) -> Self {
        let text_v: Vec<char> = query.chars().collect();
        Self {
            position: 0,
            length: text_v.len(),
            text_v,
            text: query.to_string(),
            comparers: QueryComparers::new(),
            ..Default::default()
        }
    }

    pub fn eof(&self) -> bool {
        self.position >= self.length
    }

    pub fn char_at(&self, position: usize) -> char {
        self.text_v.get(position).copied().unwrap_or('\0')
    }

    pub fn current(&self) -> char {
        self.char_at(self.position)
    }

    pub fn peek(&self, ahead: usize) -> char {
        self.char_at(self.position + ahead)
    }

    pub fn next(&mut self) {
        if self.position < self.length {
            self.position += 1;
        }
    }

    pub fn next_non_whitespace(&mut self) {
        while !self.eof() && self.current().is_whitespace() {
            self.next();
        }
    }

    pub fn jump(&mut self, ahead: usize) {
        self.position = (self.position + ahead).min(self.length);
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.length);
        let start = start.min(end);
        self.text_v[start..end].iter().collect()
    }

    pub fn text_from_pivot(&self, pivot: usize) -> String {
        self.text_from_range(pivot, self.position)
    }

    /// Consumes the next clause keyword, if the cursor is on one that may
    /// follow the current phase.
    pub fn check_next_phase(&mut self) -> bool {
        self.next_non_whitespace();

        if self.eof() {
            self.phase = Phase::EOF;
            return true;
        }

        if self.phase < Phase::Criteria {
            if let Some(length) = self.comparers.r#where.matches(self) {
                self.jump(length);
                self.phase = Phase::Criteria;
                trace!(position = self.position, "entering WHERE clause");
                return true;
            }
        }

        if self.phase >= Phase::Collections && self.phase <= Phase::Joins {
            if let Some(length) = self.comparers.inner_join.matches(self) {
                self.jump(length);
                self.phase = Phase::Joins;
                trace!(position = self.position, "entering INNER JOIN clause");
                return true;
            }
        }

        if self.phase < Phase::Collections {
            if let Some(length) = self.comparers.from.matches(self) {
                self.jump(length);
                self.phase = Phase::Collections;
                trace!(position = self.position, "entering FROM clause");
                return true;
            }
        }

        false
    }

    /// Moves the cursor up to `stop` (exclusive) and returns the skipped text.
    ///
    /// Single-quoted literals are skipped as a whole so keywords inside them
    /// never stop the scan.
    pub fn collect_until<F>(&mut self, stop: F) -> String
    where
        F: Fn(&QueryParser, usize) -> bool,
    {
        let pivot = self.position;
        let mut in_string = false;
        while !self.eof() {
            let current = self.current();
            if current == '\'' {
                in_string = !in_string;
            } else if !in_string && stop(self, self.position) {
                break;
            }
            self.next();
        }
        self.text_from_pivot(pivot)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{Phase, QueryParser};

    #[test]
    pub fn test_cursor_moves_over_unicode() {
        let mut parser = QueryParser::new("ação x");

        assert_eq!(parser.length, 6);
        parser.jump(4);
        assert_eq!(parser.text_from_range(0, parser.position), "ação");
        parser.next_non_whitespace();
        assert_eq!(parser.current(), 'x');
        parser.jump(10);
        assert!(parser.eof());
        assert_eq!(parser.current(), '\0');
    }

    #[test]
    pub fn test_check_next_phase_follows_clause_order() {
        let mut parser = QueryParser::new("  from t");
        assert!(parser.check_next_phase());
        assert_eq!(parser.phase, Phase::Collections);
        assert_eq!(parser.current(), ' ');

        let mut parser = QueryParser::new("FROM t");
        parser.phase = Phase::Criteria;
        assert!(!parser.check_next_phase());
        assert_eq!(parser.position, 0);
    }

    #[test]
    pub fn test_collect_until_skips_string_literals() {
        let mut parser = QueryParser::new("a = 'x WHERE y' WHERE b = 1");
        let text = parser.collect_until(|p, at| p.comparers.is_clause_start(p, at));

        assert_eq!(text, "a = 'x WHERE y' ");
        assert!(parser.comparers.r#where.compare(&parser));
    }
}
