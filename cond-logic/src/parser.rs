// cond-logic/src/parser.rs
// ============================================================================
// Module: Condition Expression Parser
// Description: Parser for bracketed-key condition expressions.
// Purpose: Parse strings like "[2] U ([3] O [4])[901]" into condition trees.
// Dependencies: tracing, crate::{error, key, tree}
// ============================================================================

//! ## Overview
//! Recursive-descent parser for condition expressions. Precedence, highest
//! to lowest: parentheses, adjacency (`then_also`), `U`, `O`, `X`; the three
//! named operators are left-associative and whitespace is ignored
//! everywhere. The Unicode operator aliases `∧`, `∨`, and `⊻` are accepted
//! alongside the letters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::error::ParseError;
use crate::key::ConditionKey;
use crate::tree::CompositionOp;
use crate::tree::ConditionTree;

// ============================================================================
// SECTION: Sanitizing
// ============================================================================

/// Fixes common issues with expressions taken from the handbooks.
///
/// No-break spaces become plain spaces and stray `V`/`v` characters (an OCR
/// artifact of the `∨` operator) become `∨`; the result is trimmed.
#[must_use]
pub fn sanitize_expression(expression: &str) -> String {
    expression
        .chars()
        .map(|ch| match ch {
            '\u{00a0}' => ' ',
            'V' | 'v' => '∨',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_owned()
}

// ============================================================================
// SECTION: Tokens
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A bracketed condition key
    Condition(ConditionKey),
    /// Opening parenthesis
    Open,
    /// Closing parenthesis
    Close,
    /// A named composition operator
    Operator(CompositionOp),
}

#[derive(Debug, Clone)]
struct SpannedToken {
    token: Token,
    offset: usize,
    text: String,
}

const EXPECTED_PRIMARY: [&'static str; 2] = ["'['", "'('"];
const EXPECTED_AFTER_OPERAND: [&'static str; 6] = ["'U'", "'O'", "'X'", "'['", "'('", "end of input"];

fn tokenize(input: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices();
    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '(' => Token::Open,
            ')' => Token::Close,
            'U' | '∧' => Token::Operator(CompositionOp::And),
            'O' | '∨' => Token::Operator(CompositionOp::Or),
            'X' | '⊻' => Token::Operator(CompositionOp::Xor),
            '[' => {
                let rest = &input[offset + 1..];
                let Some(close) = rest.find(']') else {
                    return Err(ParseError::UnexpectedEnd {
                        offset: input.len(),
                        expected: vec!["']'"],
                    });
                };
                let raw = &rest[..close];
                let key = ConditionKey::new(raw).map_err(|source| ParseError::InvalidKey {
                    offset: offset + 1,
                    source,
                })?;
                // Skip the key characters and the closing bracket.
                for _ in 0..=close {
                    chars.next();
                }
                tokens.push(SpannedToken {
                    token: Token::Condition(key),
                    offset,
                    text: format!("[{raw}]"),
                });
                continue;
            }
            other => {
                return Err(ParseError::UnexpectedToken {
                    offset,
                    expected: EXPECTED_AFTER_OPERAND.to_vec(),
                    found: other.to_string(),
                });
            }
        };
        tokens.push(SpannedToken {
            token,
            offset,
            text: ch.to_string(),
        });
    }
    Ok(tokens)
}

// ============================================================================
// SECTION: Parser
// ============================================================================

struct Parser {
    tokens: Vec<SpannedToken>,
    position: usize,
    input_len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consumes the next token when it is the given operator.
    fn eat_operator(&mut self, op: CompositionOp) -> bool {
        if matches!(self.peek(), Some(spanned) if spanned.token == Token::Operator(op)) {
            self.position += 1;
            return true;
        }
        false
    }

    fn unexpected_end(&self, expected: &[&'static str]) -> ParseError {
        ParseError::UnexpectedEnd {
            offset: self.input_len,
            expected: expected.to_vec(),
        }
    }

    /// Lowest precedence level: xor.
    fn xor_level(&mut self) -> Result<ConditionTree, ParseError> {
        let mut node = self.or_level()?;
        while self.eat_operator(CompositionOp::Xor) {
            node = ConditionTree::xor(node, self.or_level()?);
        }
        Ok(node)
    }

    fn or_level(&mut self) -> Result<ConditionTree, ParseError> {
        let mut node = self.and_level()?;
        while self.eat_operator(CompositionOp::Or) {
            node = ConditionTree::or(node, self.and_level()?);
        }
        Ok(node)
    }

    fn and_level(&mut self) -> Result<ConditionTree, ParseError> {
        let mut node = self.adjacency_level()?;
        while self.eat_operator(CompositionOp::And) {
            node = ConditionTree::and(node, self.adjacency_level()?);
        }
        Ok(node)
    }

    /// Adjacency binds tighter than every named operator.
    fn adjacency_level(&mut self) -> Result<ConditionTree, ParseError> {
        let mut node = self.primary()?;
        while matches!(self.peek(), Some(spanned) if starts_primary(&spanned.token)) {
            node = ConditionTree::then_also(node, self.primary()?);
        }
        Ok(node)
    }

    fn primary(&mut self) -> Result<ConditionTree, ParseError> {
        let Some(spanned) = self.advance() else {
            return Err(self.unexpected_end(&EXPECTED_PRIMARY));
        };
        match spanned.token {
            Token::Condition(key) => Ok(ConditionTree::leaf(key)),
            Token::Open => {
                let inner = self.xor_level()?;
                match self.advance() {
                    Some(close) if close.token == Token::Close => Ok(inner),
                    Some(other) => Err(ParseError::UnexpectedToken {
                        offset: other.offset,
                        expected: vec!["')'"],
                        found: other.text,
                    }),
                    None => Err(self.unexpected_end(&["')'"])),
                }
            }
            Token::Close | Token::Operator(_) => Err(ParseError::UnexpectedToken {
                offset: spanned.offset,
                expected: EXPECTED_PRIMARY.to_vec(),
                found: spanned.text,
            }),
        }
    }
}

const fn starts_primary(token: &Token) -> bool {
    matches!(token, Token::Condition(_) | Token::Open)
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Parses a condition expression into a tree
///
/// The input is sanitized first; reported offsets refer to the sanitized
/// string.
///
/// # Errors
///
/// Returns [`ParseError`] with the failing offset and the expected token set
/// when the expression is not well-formed.
pub fn parse_condition_expression(expression: &str) -> Result<ConditionTree, ParseError> {
    let sanitized = sanitize_expression(expression);
    let tree = parse_raw(&sanitized)?;
    debug!(expression = %sanitized, "parsed condition expression");
    Ok(tree)
}

/// Parses an already-sanitized slice; offsets refer to the slice itself.
pub(crate) fn parse_raw(expression: &str) -> Result<ConditionTree, ParseError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens,
        position: 0,
        input_len: expression.len(),
    };
    let tree = parser.xor_level()?;
    if let Some(trailing) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            offset: trailing.offset,
            expected: EXPECTED_AFTER_OPERAND.to_vec(),
            found: trailing.text.clone(),
        });
    }
    Ok(tree)
}
