//! Lexical analysis of formula text.
//!
//! A formula is scanned left to right into [`Token`]s. Recognized shapes are
//! parentheses, the four binary operators, variables (`[A-Za-z][A-Za-z0-9]*`)
//! and non-negative numeric literals, optionally in exponential notation
//! (`2.5e9`). Whitespace separates tokens but is never a token itself. Any
//! other run of characters is reported as an invalid token.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::error::FormatError;

/// A classified lexeme.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    LeftParen,
    RightParen,
    Plus,
    Minus,
    Star,
    Slash,
    /// A numeric literal. `literal` keeps the spelling used in the source.
    Number { value: f64, literal: String },
    Variable(String),
}

impl Token {
    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Plus | Token::Minus | Token::Star | Token::Slash)
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Number { .. } | Token::Variable(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Number { literal, .. } => f.write_str(literal),
            Token::Variable(name) => f.write_str(name),
        }
    }
}

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?<space>\s+)|(?<paren>[()])|(?<op>[+\-*/])|(?<var>[A-Za-z][A-Za-z0-9]*)|(?<num>(?:[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)(?:[eE][+-]?[0-9]+)?))",
        )
        .expect("token regex must compile")
    })
}

/// Returns true if `name` has the shape of a variable token.
pub fn is_variable(name: &str) -> bool {
    static VAR_RE: OnceLock<Regex> = OnceLock::new();
    VAR_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("variable regex must compile"))
        .is_match(name)
}

/// Split `source` into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, FormatError> {
    let re = token_re();
    let mut tokens = Vec::new();
    let mut rest = source;

    while !rest.is_empty() {
        let Some(caps) = re.captures(rest) else {
            // Collect the unrecognized run up to the next whitespace or recognizable token.
            let mut end = rest.len();
            for (idx, ch) in rest.char_indices().skip(1) {
                if ch.is_whitespace() || re.is_match(&rest[idx..]) {
                    end = idx;
                    break;
                }
            }
            return Err(FormatError::InvalidToken(rest[..end].to_string()));
        };

        let matched = caps.get(0).map_or("", |m| m.as_str());
        if caps.name("space").is_some() {
            // skip
        } else if caps.name("paren").is_some() {
            tokens.push(if matched == "(" {
                Token::LeftParen
            } else {
                Token::RightParen
            });
        } else if caps.name("op").is_some() {
            tokens.push(match matched {
                "+" => Token::Plus,
                "-" => Token::Minus,
                "*" => Token::Star,
                _ => Token::Slash,
            });
        } else if caps.name("var").is_some() {
            tokens.push(Token::Variable(matched.to_string()));
        } else {
            let value = matched
                .parse::<f64>()
                .map_err(|_| FormatError::InvalidNumber(matched.to_string()))?;
            tokens.push(Token::Number {
                value,
                literal: matched.to_string(),
            });
        }
        rest = &rest[matched.len()..];
    }

    Ok(tokens)
}
