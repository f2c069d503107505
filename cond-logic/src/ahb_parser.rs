// cond-logic/src/ahb_parser.rs
// ============================================================================
// Module: AHB Expression Parser
// Description: Splits AHB expressions into indicator/condition pairs.
// Purpose: Parse strings like "Muss [59]U[53] Soll [1]" into pair lists.
// Dependencies: smallvec, tracing, crate::{error, indicators, parser, tree}
// ============================================================================

//! ## Overview
//! The outer grammar of an AHB expression. It tokenizes the overall shape —
//! a sequence of requirement indicators, each optionally followed by a
//! condition expression — and hands the inner substrings to the condition
//! parser. This two-phase split is what disambiguates `U` as indicator from
//! `U` as conjunction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::error::ParseError;
use crate::indicators::ModalMark;
use crate::indicators::PrefixOperator;
use crate::indicators::RequirementIndicator;
use crate::parser;
use crate::parser::sanitize_expression;
use crate::tree::ConditionTree;

// ============================================================================
// SECTION: Pair Model
// ============================================================================

/// A requirement indicator with its (optional) condition tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorExpression {
    /// The leading requirement indicator of this pair
    pub indicator: RequirementIndicator,
    /// The parsed condition expression; `None` for a bare indicator
    pub tree: Option<ConditionTree>,
}

/// A parsed AHB expression: an ordered list of indicator/condition pairs
///
/// # Invariants
/// - Contains at least one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AhbExpression {
    /// The pairs in source order
    pub pairs: SmallVec<[IndicatorExpression; 2]>,
}

impl AhbExpression {
    /// Returns the pairs in source order
    #[must_use]
    pub fn pairs(&self) -> &[IndicatorExpression] {
        &self.pairs
    }
}

impl fmt::Display for AhbExpression {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for pair in &self.pairs {
            if !first {
                write!(formatter, " ")?;
            }
            write!(formatter, "{}", pair.indicator.token())?;
            if let Some(tree) = &pair.tree {
                write!(formatter, " {tree}")?;
            }
            first = false;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Scanner Helpers
// ============================================================================

/// Characters that may appear inside a condition expression substring.
fn is_condition_char(ch: char) -> bool {
    ch.is_ascii_digit()
        || ch.is_whitespace()
        || matches!(ch, '[' | ']' | '(' | ')' | 'U' | 'O' | 'X' | '∧' | '∨' | '⊻' | 'P' | 'Q')
}

fn skip_whitespace(input: &str, mut pos: usize) -> usize {
    while let Some(ch) = input[pos..].chars().next() {
        if !ch.is_whitespace() {
            break;
        }
        pos += ch.len_utf8();
    }
    pos
}

/// Tries to read a requirement indicator at `pos`; returns it with the
/// offset of the first byte after the token.
fn scan_indicator(input: &str, pos: usize) -> Result<(RequirementIndicator, usize), ParseError> {
    const EXPECTED: [&'static str; 6] = ["'Muss'", "'Soll'", "'Kann'", "'X'", "'O'", "'U'"];
    let rest = &input[pos..];
    let word: String = rest.chars().take_while(|ch| ch.is_ascii_alphabetic()).collect();
    if word.is_empty() {
        let found: String = rest.chars().take(1).collect();
        return Err(ParseError::UnexpectedToken {
            offset: pos,
            expected: EXPECTED.to_vec(),
            found,
        });
    }
    let lowered = word.to_ascii_lowercase();
    let indicator = match lowered.as_str() {
        "muss" | "m" => RequirementIndicator::ModalMark(ModalMark::Muss),
        "soll" | "s" => RequirementIndicator::ModalMark(ModalMark::Soll),
        "kann" | "k" => RequirementIndicator::ModalMark(ModalMark::Kann),
        "x" => RequirementIndicator::PrefixOperator(PrefixOperator::X),
        "o" => RequirementIndicator::PrefixOperator(PrefixOperator::O),
        "u" => RequirementIndicator::PrefixOperator(PrefixOperator::U),
        _ => {
            return Err(ParseError::UnexpectedToken {
                offset: pos,
                expected: EXPECTED.to_vec(),
                found: word,
            });
        }
    };
    Ok((indicator, pos + word.len()))
}

/// Maps an inner parse failure at the very first token of a condition
/// substring onto the indicator-position diagnostic when the offending token
/// is an operator letter.
fn promote_indicator_error(error: ParseError, first_token_offset: usize) -> ParseError {
    if let ParseError::UnexpectedToken {
        offset,
        found,
        ..
    } = &error
    {
        let is_operator_letter = matches!(found.as_str(), "U" | "O" | "X" | "∧" | "∨" | "⊻");
        if *offset == first_token_offset && is_operator_letter {
            return ParseError::InvalidIndicatorPosition {
                offset: *offset,
                indicator: found.clone(),
            };
        }
    }
    error
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Parses an AHB expression into its indicator/condition pairs
///
/// The input is sanitized first; reported offsets refer to the sanitized
/// string. A bare indicator (e.g. `Kann`) yields a pair without a tree.
///
/// # Errors
///
/// Returns [`ParseError`] when the string does not start with a requirement
/// indicator or one of the condition substrings is not well-formed.
pub fn parse_ahb_expression(expression: &str) -> Result<AhbExpression, ParseError> {
    let sanitized = sanitize_expression(expression);
    let mut pairs: SmallVec<[IndicatorExpression; 2]> = SmallVec::new();
    let mut pos = skip_whitespace(&sanitized, 0);
    if pos >= sanitized.len() {
        return Err(ParseError::UnexpectedEnd {
            offset: sanitized.len(),
            expected: vec!["requirement indicator"],
        });
    }
    while pos < sanitized.len() {
        let (indicator, after_indicator) = scan_indicator(&sanitized, pos)?;
        let start = skip_whitespace(&sanitized, after_indicator);
        let mut end = start;
        while let Some(ch) = sanitized[end..].chars().next() {
            if !is_condition_char(ch) {
                break;
            }
            end += ch.len_utf8();
        }
        let substring = &sanitized[start..end];
        let tree = if substring.trim().is_empty() {
            None
        } else {
            let first_token_offset = skip_whitespace(substring, 0);
            let parsed = parser::parse_raw(substring)
                .map_err(|error| promote_indicator_error(error, first_token_offset).shifted(start))?;
            Some(parsed)
        };
        pairs.push(IndicatorExpression {
            indicator,
            tree,
        });
        pos = skip_whitespace(&sanitized, end);
    }
    debug!(expression = %sanitized, pairs = pairs.len(), "parsed AHB expression");
    Ok(AhbExpression {
        pairs,
    })
}
