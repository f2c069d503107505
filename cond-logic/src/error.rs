// cond-logic/src/error.rs
// ============================================================================
// Module: Condition Logic Error Definitions
// Description: Structured diagnostics for parsing and composition.
// Purpose: Provide rich diagnostics for expression parsing and the algebra.
// Dependencies: std::fmt
// ============================================================================

//! ## Overview
//! Centralizes the condition-logic errors, their user-facing messaging and
//! conversions so parsing, composition, and downstream evaluation layers
//! remain decoupled while still exposing actionable diagnostics.

use std::fmt;

use crate::tree::CompositionOp;

// ============================================================================
// SECTION: Key Errors
// ============================================================================

/// Errors that can occur while classifying a condition key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The key contains characters that do not form a valid condition key
    Malformed {
        /// The offending raw key
        key: String,
    },

    /// The key is numeric but falls outside every known category band
    OutOfRange {
        /// The offending raw key
        key: String,
    },
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed {
                key,
            } => {
                write!(f, "condition key '{key}' is malformed")
            }
            Self::OutOfRange {
                key,
            } => {
                write!(f, "condition key '{key}' is not in a known number range")
            }
        }
    }
}

impl std::error::Error for KeyError {}

// ============================================================================
// SECTION: Parse Errors
// ============================================================================

/// Errors that can occur while parsing condition or AHB expressions
///
/// Every variant carries the byte offset into the (sanitized) input at which
/// parsing failed together with the set of token descriptions that would have
/// been accepted at that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An unexpected token was encountered
    UnexpectedToken {
        /// Byte offset of the offending token
        offset: usize,
        /// Token descriptions that would have been accepted here
        expected: Vec<&'static str>,
        /// The token that was actually found
        found: String,
    },

    /// The input ended although more tokens were expected
    UnexpectedEnd {
        /// Byte offset of the end of input
        offset: usize,
        /// Token descriptions that would have been accepted here
        expected: Vec<&'static str>,
    },

    /// A bracketed key was syntactically fine but not a classifiable key
    InvalidKey {
        /// Byte offset of the offending key
        offset: usize,
        /// The underlying classification failure
        source: KeyError,
    },

    /// A requirement indicator token was found inside a condition expression
    InvalidIndicatorPosition {
        /// Byte offset of the offending indicator token
        offset: usize,
        /// The indicator token that was found
        indicator: String,
    },
}

impl ParseError {
    /// Returns the byte offset at which parsing failed
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken {
                offset, ..
            }
            | Self::UnexpectedEnd {
                offset, ..
            }
            | Self::InvalidKey {
                offset, ..
            }
            | Self::InvalidIndicatorPosition {
                offset, ..
            } => *offset,
        }
    }

    /// Shifts the error offset by `base` bytes
    ///
    /// Used when an inner expression is parsed out of a larger string and the
    /// reported position should refer to the outer input.
    #[must_use]
    pub fn shifted(self, base: usize) -> Self {
        match self {
            Self::UnexpectedToken {
                offset,
                expected,
                found,
            } => Self::UnexpectedToken {
                offset: offset + base,
                expected,
                found,
            },
            Self::UnexpectedEnd {
                offset,
                expected,
            } => Self::UnexpectedEnd {
                offset: offset + base,
                expected,
            },
            Self::InvalidKey {
                offset,
                source,
            } => Self::InvalidKey {
                offset: offset + base,
                source,
            },
            Self::InvalidIndicatorPosition {
                offset,
                indicator,
            } => Self::InvalidIndicatorPosition {
                offset: offset + base,
                indicator,
            },
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                offset,
                expected,
                found,
            } => {
                write!(f, "syntax error at offset {offset}: found '{found}', expected one of ")?;
                write_expected(f, expected)
            }
            Self::UnexpectedEnd {
                offset,
                expected,
            } => {
                write!(f, "syntax error at offset {offset}: unexpected end of input, expected one of ")?;
                write_expected(f, expected)
            }
            Self::InvalidKey {
                offset,
                source,
            } => {
                write!(f, "syntax error at offset {offset}: {source}")
            }
            Self::InvalidIndicatorPosition {
                offset,
                indicator,
            } => {
                write!(
                    f,
                    "requirement indicator '{indicator}' at offset {offset} is not allowed inside a condition \
                     expression"
                )
            }
        }
    }
}

fn write_expected(f: &mut fmt::Formatter<'_>, expected: &[&'static str]) -> fmt::Result {
    let mut first = true;
    for token in expected {
        if !first {
            write!(f, ", ")?;
        }
        write!(f, "{token}")?;
        first = false;
    }
    Ok(())
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidKey {
                source, ..
            } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Composition Errors
// ============================================================================

/// Errors that can occur while composing two condition nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// The operand kinds cannot be meaningfully combined with the operator
    ///
    /// Examples: a hint on either side of an `or`, a neutral value in an
    /// `xor`, or a hint used as the gate of a `then_also`.
    NonsensicalComposition {
        /// Operator of the offending composition
        op: CompositionOp,
        /// Kind of the left operand
        left_kind: &'static str,
        /// Kind of the right operand
        right_kind: &'static str,
    },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonsensicalComposition {
                op,
                left_kind,
                right_kind,
            } => {
                write!(f, "combining {left_kind} and {right_kind} in a {op} composition has no useful result")
            }
        }
    }
}

impl std::error::Error for ComposeError {}

// ============================================================================
// SECTION: Result Alias
// ============================================================================

/// Convenient Result type for composition operations
pub type ComposeResult<T> = Result<T, ComposeError>;
