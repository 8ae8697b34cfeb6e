use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::condition::{ComparatorOp, ConditionError, ConditionToken, TokenKind};

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<string>'[^']*')|(?P<number>\d+(?:\.\d+)?)|(?P<ident>[^\W\d]\w*(?:\.[^\W\d]\w*)?)|(?P<op><=|>=|<>|=|<|>)|(?P<paren>[()]))",
    )
    .expect("condition token pattern is valid")
});

const FORBIDDEN: [&str; 5] = ["OR", "NOT", "LIKE", "IS", "NULL"];
const OPERATOR_CHARS: &str = "!~=<>%^&|+-*/";

pub struct ConditionLexer;

impl ConditionLexer {
    /// Splits `expr` into tokens, rejecting anything outside the condition
    /// grammar. Parenthesis balance is not checked here.
    pub fn tokenize(expr: &str) -> Result<Vec<ConditionToken>, ConditionError> {
        let mut tokens = vec![];
        let mut position = 0;

        while position < expr.len() {
            let rest = &expr[position..];
            let Some(current) = rest.chars().next() else { break };

            if current.is_whitespace() {
                position += current.len_utf8();
                continue;
            }

            let Some(captures) = TOKEN.captures(rest) else {
                return Err(Self::unexpected(rest));
            };

            let Some(whole) = captures.get(0) else {
                return Err(Self::unexpected(rest));
            };
            let text = whole.as_str();
            let start = position;
            let end = position + whole.end();

            let kind = if captures.name("string").is_some() {
                TokenKind::String
            } else if captures.name("number").is_some() {
                TokenKind::Number
            } else if captures.name("op").is_some() {
                TokenKind::Comparator(ComparatorOp::try_from(text).map_err(ConditionError::UnsupportedOperator)?)
            } else if captures.name("paren").is_some() {
                if text == "(" { TokenKind::OpenParen } else { TokenKind::CloseParen }
            } else {
                Self::word(text)?
            };

            // `<` followed by an operator char is something like `<=>` or `<!`
            if matches!(kind, TokenKind::Comparator(_)) {
                if let Some(next) = expr[end..].chars().next() {
                    if OPERATOR_CHARS.contains(next) {
                        return Err(Self::unexpected(rest));
                    }
                }
            }

            tokens.push(ConditionToken { kind, text: text.to_string(), start, end });
            position = end;
        }

        Ok(tokens)
    }

    /// Keywords are only recognized on bare words: `t.null` or `t.or` is a column.
    fn word(text: &str) -> Result<TokenKind, ConditionError> {
        if let Some((qualifier, name)) = text.split_once('.') {
            return Ok(TokenKind::Identifier {
                qualifier: Some(qualifier.to_string()),
                name: name.to_string(),
            });
        }

        if text.eq_ignore_ascii_case("AND") {
            return Ok(TokenKind::And);
        }

        if let Some(keyword) = FORBIDDEN.iter().find(|keyword| keyword.eq_ignore_ascii_case(text)) {
            return Err(ConditionError::ForbiddenKeyword(keyword.to_string()));
        }

        Ok(TokenKind::Identifier { qualifier: None, name: text.to_string() })
    }

    fn unexpected(rest: &str) -> ConditionError {
        let Some(first) = rest.chars().next() else {
            return ConditionError::Empty;
        };

        if first == '\'' {
            return ConditionError::UnterminatedString;
        }

        if OPERATOR_CHARS.contains(first) {
            let op: String = rest.chars().take_while(|ch| OPERATOR_CHARS.contains(*ch)).collect();
            return ConditionError::UnsupportedOperator(op);
        }

        ConditionError::UnexpectedCharacter(first)
    }
}
