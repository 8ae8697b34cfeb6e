use crate::parser::{QueryParser, WordComparer};

pub struct TextCollector;

impl TextCollector {
    /// Consumes identifier characters (`[[:alnum:]_]`) from the cursor.
    pub fn collect(parser: &mut QueryParser) -> String {
        let pivot = parser.position;
        while !parser.eof() && WordComparer::is_identifier_char(parser.current()) {
            parser.next();
        }
        parser.text_from_pivot(pivot)
    }

    /// Identifier at the cursor, without moving it.
    pub fn peek(parser: &QueryParser) -> String {
        let mut end = parser.position;
        while end < parser.length && WordComparer::is_identifier_char(parser.char_at(end)) {
            end += 1;
        }
        parser.text_from_range(parser.position, end)
    }
}
