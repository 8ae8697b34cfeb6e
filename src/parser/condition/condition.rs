use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::parser::condition::{AttributeRef, ConditionError, ConditionToken, ConditionValidator, TokenKind};

/// A validated `ON`/`WHERE` condition together with its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    text: String,
    tokens: Vec<ConditionToken>,
}

impl Condition {
    pub fn parse(text: &str) -> Result<Self, ConditionError> {
        let text = text.trim();
        let tokens = ConditionValidator::check(text)?;
        Ok(Self { text: text.to_string(), tokens })
    }

    /// Source text, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[ConditionToken] {
        &self.tokens
    }

    /// Atomic predicates: the pieces between `AND`s at parenthesis depth 0,
    /// in source order.
    pub fn conjuncts(&self) -> Vec<Condition> {
        let mut conjuncts = vec![];
        let mut depth = 0usize;
        let mut first = 0usize;

        for (index, token) in self.tokens.iter().enumerate() {
            match token.kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => depth = depth.saturating_sub(1),
                TokenKind::And if depth == 0 => {
                    self.push_slice(first, index, &mut conjuncts);
                    first = index + 1;
                }
                _ => {}
            }
        }
        self.push_slice(first, self.tokens.len(), &mut conjuncts);

        conjuncts
    }

    fn push_slice(&self, from: usize, to: usize, out: &mut Vec<Condition>) {
        let slice = &self.tokens[from..to];
        let (Some(head), Some(tail)) = (slice.first(), slice.last()) else {
            return;
        };

        out.push(Condition {
            text: self.text[head.start..tail.end].to_string(),
            tokens: slice.iter().map(|token| token.shifted(head.start)).collect(),
        });
    }

    /// Column references in source order. Literals and keywords are skipped.
    pub fn references(&self) -> Vec<AttributeRef> {
        self.tokens
            .iter()
            .filter_map(|token| match &token.kind {
                TokenKind::Identifier { qualifier, name } => Some(AttributeRef {
                    qualifier: qualifier.clone(),
                    column: name.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Tokens joined by single spaces, `AND` replaced by `conjunction`.
    pub fn render_with(&self, conjunction: &str) -> String {
        let mut out = String::new();
        let mut previous: Option<&TokenKind> = None;

        for token in self.tokens.iter() {
            let glue = !matches!(previous, None | Some(TokenKind::OpenParen))
                && token.kind != TokenKind::CloseParen;
            if glue {
                out.push(' ');
            }

            match token.kind {
                TokenKind::And => out.push_str(conjunction),
                _ => out.push_str(&token.text),
            }
            previous = Some(&token.kind);
        }

        out
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with("AND"))
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Condition::parse(&text).map_err(serde::de::Error::custom)
    }
}
