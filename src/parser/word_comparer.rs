use crate::parser::QueryParser;

/// Case-insensitive keyword matcher working directly on the parser cursor.
///
/// A space inside the keyword (`INNER JOIN`) matches any non-empty run of
/// whitespace in the input.
#[derive(Debug, Default)]
pub struct WordComparer {
    pub word: Vec<char>,
    whitespace_postfix: bool,
    delimiter_postfix: bool,
    eof: bool,
}

impl WordComparer {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_uppercase().chars().collect(),
            whitespace_postfix: false,
            delimiter_postfix: false,
            eof: false,
        }
    }

    pub fn is_block_delimiter(ch: char) -> bool {
        ch.is_whitespace()
    }

    pub fn is_identifier_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_'
    }

    pub fn is_any_delimiter(ch: char) -> bool {
        ch == ',' || ch == '(' || ch == ')' || ch == '\'' || Self::is_block_delimiter(ch)
    }

    /// Length in chars of the match starting at `position`, if any.
    pub fn matches_at(&self, parser: &QueryParser, position: usize) -> Option<usize> {
        if position > 0 && Self::is_identifier_char(parser.char_at(position - 1)) {
            return None;
        }

        let mut offset = 0;
        for expected in self.word.iter() {
            if *expected == ' ' {
                let start = offset;
                while Self::is_block_delimiter(parser.char_at(position + offset)) {
                    offset += 1;
                }
                if start == offset {
                    return None;
                }
                continue;
            }

            if position + offset >= parser.length
                || parser.char_at(position + offset).to_ascii_uppercase() != *expected {
                return None;
            }
            offset += 1;
        }

        if position + offset >= parser.length {
            return self.eof.then_some(offset);
        }

        let next = parser.char_at(position + offset);
        if !self.whitespace_postfix && !self.delimiter_postfix {
            return (!Self::is_identifier_char(next)).then_some(offset);
        }

        if self.whitespace_postfix && Self::is_block_delimiter(next) {
            return Some(offset);
        }

        if self.delimiter_postfix && Self::is_any_delimiter(next) {
            return Some(offset);
        }

        None
    }

    pub fn matches(&self, parser: &QueryParser) -> Option<usize> {
        self.matches_at(parser, parser.position)
    }

    pub fn compare(&self, parser: &QueryParser) -> bool {
        self.matches(parser).is_some()
    }

    pub fn with_eof(mut self) -> Self { self.eof = true; self }
    pub fn with_whitespace_postfix(mut self) -> Self { self.whitespace_postfix = true; self }
    pub fn with_any_delimiter_postfix(mut self) -> Self { self.delimiter_postfix = true; self }
}
