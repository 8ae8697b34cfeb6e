use crate::parser::condition::{ConditionError, ConditionLexer, ConditionToken, TokenKind};

/// Grammar check for `ON`/`WHERE` conditions: comparisons over identifiers
/// and literals, parentheses and `AND`, nothing else.
pub struct ConditionValidator;

impl ConditionValidator {
    pub fn check(expr: &str) -> Result<Vec<ConditionToken>, ConditionError> {
        if expr.trim().is_empty() {
            return Err(ConditionError::Empty);
        }

        let tokens = ConditionLexer::tokenize(expr)?;

        if !Self::balanced(&tokens) {
            return Err(ConditionError::UnbalancedParentheses);
        }

        if !Self::and_has_operands(&tokens) {
            return Err(ConditionError::EmptyConjunct);
        }

        Ok(tokens)
    }

    pub fn validate(expr: &str) -> bool {
        Self::check(expr).is_ok()
    }

    fn balanced(tokens: &[ConditionToken]) -> bool {
        let mut depth: usize = 0;
        for token in tokens {
            match token.kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => {
                    let Some(next) = depth.checked_sub(1) else {
                        return false;
                    };
                    depth = next;
                }
                _ => {}
            }
        }
        depth == 0
    }

    fn and_has_operands(tokens: &[ConditionToken]) -> bool {
        tokens.iter().enumerate().all(|(i, token)| {
            if token.kind != TokenKind::And {
                return true;
            }
            let before = i.checked_sub(1).and_then(|prev| tokens.get(prev));
            let after = tokens.get(i + 1);
            matches!(before, Some(t) if !matches!(t.kind, TokenKind::OpenParen | TokenKind::And))
                && matches!(after, Some(t) if !matches!(t.kind, TokenKind::CloseParen | TokenKind::And))
        })
    }
}
