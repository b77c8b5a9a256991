//! Validated infix expressions.
//!
//! An [`Expression`] can only be built by parsing, and parsing checks every
//! structural rule up front:
//!
//! - at least one token
//! - parentheses balance, and no prefix closes more than it opened
//! - an operator or `(` is never followed by an operator or `)`
//! - a number, variable or `)` is only followed by an operator or `)`
//! - the first token is a number, variable or `(`; the last is a number,
//!   variable or `)`
//!
//! Nothing is re-checked later, so evaluation can rely on these guarantees.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::error::FormatError;
use super::token::{Token, is_variable, tokenize};

/// An immutable, well-formed token sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// Parse `source` keeping variable names as written.
    pub fn parse(source: &str) -> Result<Expression, FormatError> {
        Self::parse_with(source, str::to_string, |_| true)
    }

    /// Parse `source`, replacing every variable by `normalize(variable)` and
    /// requiring `validate` to accept each normalized name.
    ///
    /// A normalized name must still look like a variable.
    pub fn parse_with<N, V>(source: &str, normalize: N, validate: V) -> Result<Expression, FormatError>
    where
        N: Fn(&str) -> String,
        V: Fn(&str) -> bool,
    {
        let mut tokens = tokenize(source)?;
        check_structure(&tokens)?;

        for token in &mut tokens {
            if let Token::Variable(name) = token {
                let normalized = normalize(name);
                if !is_variable(&normalized) {
                    return Err(FormatError::BadNormalization {
                        original: name.clone(),
                        normalized,
                    });
                }
                if !validate(&normalized) {
                    return Err(FormatError::InvalidVariable(normalized));
                }
                *name = normalized;
            }
        }

        Ok(Expression { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Distinct variable names, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Variable(name) => Some(name.as_str()),
                _ => None,
            })
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Canonical text: the tokens concatenated without whitespace.
    pub fn render(&self) -> String {
        self.tokens.iter().map(ToString::to_string).collect()
    }
}

/// The expression `0`.
impl Default for Expression {
    fn default() -> Self {
        Expression {
            tokens: vec![Token::Number {
                value: 0.0,
                literal: "0".to_string(),
            }],
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for Expression {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

impl TryFrom<String> for Expression {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Expression::parse(&value)
    }
}

impl From<Expression> for String {
    fn from(expr: Expression) -> Self {
        expr.render()
    }
}

fn opens_group(token: &Token) -> bool {
    token.is_operator() || *token == Token::LeftParen
}

fn check_structure(tokens: &[Token]) -> Result<(), FormatError> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(FormatError::Empty);
    };

    if first.is_operator() || *first == Token::RightParen {
        return Err(FormatError::BadFirstToken(first.to_string()));
    }

    let mut depth = 0usize;
    let mut prev: Option<&Token> = None;
    for token in tokens {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth.checked_sub(1).ok_or(FormatError::UnbalancedClose)?;
            }
            _ => {}
        }

        if let Some(prev) = prev {
            let follows_ok = if opens_group(prev) {
                !(token.is_operator() || *token == Token::RightParen)
            } else {
                token.is_operator() || *token == Token::RightParen
            };
            if !follows_ok {
                return Err(FormatError::Adjacency {
                    prev: prev.to_string(),
                    next: token.to_string(),
                });
            }
        }
        prev = Some(token);
    }

    if depth > 0 {
        return Err(FormatError::UnbalancedOpen(depth));
    }
    if last.is_operator() || *last == Token::LeftParen {
        return Err(FormatError::BadLastToken(last.to_string()));
    }

    Ok(())
}
