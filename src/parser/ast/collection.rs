use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{ast::TextCollector, ParseError, ParseErrorKind, QueryComparers, QueryParser};

/// Table named in `FROM` or `INNER JOIN`. The alias defaults to the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    pub alias: String,
}

impl TableRef {
    pub fn new(name: &str, alias: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            alias: alias.unwrap_or(name).to_string(),
        }
    }

    pub fn is_aliased(&self) -> bool {
        self.alias != self.name
    }

    /// Reads `<name> [[AS] alias]`. Both stop at the identifier boundary and
    /// leave whatever follows for the caller.
    pub fn parse(parser: &mut QueryParser) -> Result<TableRef, ParseError> {
        parser.next_non_whitespace();
        let pivot = parser.position;

        let name = TextCollector::collect(parser);
        if name.is_empty() || QueryComparers::is_reserved(&name) {
            return ParseError::new(ParseErrorKind::MalformedQuery, "Invalid table reference", pivot, parser).err();
        }

        parser.next_non_whitespace();

        let explicit = match parser.comparers.alias.matches(parser) {
            Some(length) => {
                parser.jump(length);
                parser.next_non_whitespace();
                true
            },
            None => false,
        };

        let candidate = TextCollector::peek(parser);
        if !explicit && (candidate.is_empty() || QueryComparers::is_reserved(&candidate)) {
            return Ok(TableRef::new(&name, None));
        }

        let alias_pivot = parser.position;
        let alias = TextCollector::collect(parser);
        if alias.is_empty() || QueryComparers::is_reserved(&alias) {
            return ParseError::new(ParseErrorKind::MalformedQuery, "Invalid table alias", alias_pivot, parser).err();
        }

        Ok(TableRef::new(&name, Some(&alias)))
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_aliased() {
            write!(f, "{} {}", self.name, self.alias)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::TableRef, ParseErrorKind, QueryParser};

    #[test]
    pub fn test_table() {
        let mut parser = QueryParser::new("clientes");

        let result = TableRef::parse(&mut parser).expect("Failed to parse table");

        assert_eq!(result, TableRef::new("clientes", None));
        assert_eq!(result.alias, "clientes");
        assert!(!result.is_aliased());
    }

    #[test]
    pub fn test_table_with_alias() {
        let mut parser = QueryParser::new("tabela_a a INNER JOIN");

        let result = TableRef::parse(&mut parser).expect("Failed to parse table");

        assert_eq!(result, TableRef::new("tabela_a", Some("a")));
        assert!(result.is_aliased());
        parser.next_non_whitespace();
        assert!(parser.comparers.inner_join.compare(&parser));
    }

    #[test]
    pub fn test_table_with_as_alias() {
        let mut parser = QueryParser::new("Pedido AS p ON p.id = 1");

        let result = TableRef::parse(&mut parser).expect("Failed to parse table");

        assert_eq!(result, TableRef::new("Pedido", Some("p")));
    }

    #[test]
    pub fn test_table_followed_by_keyword() {
        for text in ["t WHERE a = 1", "t ON a = 1", "t inner join u"] {
            let mut parser = QueryParser::new(text);
            let result = TableRef::parse(&mut parser).expect("Failed to parse table");
            assert_eq!(result, TableRef::new("t", None), "{}", text);
        }
    }

    #[test]
    pub fn test_table_same_alias_is_not_aliased() {
        let result = TableRef::new("clientes", Some("clientes"));

        assert!(!result.is_aliased());
        assert_eq!(result.to_string(), "clientes");
    }

    #[test]
    pub fn test_table_invalid() {
        for text in ["(select x)", "", "WHERE", "t AS WHERE", "t AS ;"] {
            let mut parser = QueryParser::new(text);
            let err = TableRef::parse(&mut parser).expect_err(text);
            assert_eq!(err.kind, ParseErrorKind::MalformedQuery, "{}", text);
        }
    }

    #[test]
    pub fn test_table_stops_at_identifier_boundary() {
        for (text, expected, rest) in [
            ("t;", TableRef::new("t", None), ';'),
            ("t.x", TableRef::new("t", None), '.'),
            ("t,u", TableRef::new("t", None), ','),
            ("t a.b", TableRef::new("t", Some("a")), '.'),
            ("t AS a;", TableRef::new("t", Some("a")), ';'),
        ] {
            let mut parser = QueryParser::new(text);
            let result = TableRef::parse(&mut parser).expect("Failed to parse table");
            assert_eq!(result, expected, "{}", text);
            assert_eq!(parser.current(), rest, "{}", text);
        }
    }
}
