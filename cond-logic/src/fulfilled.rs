// cond-logic/src/fulfilled.rs
// ============================================================================
// Module: Four-Valued Condition Logic
// Description: Fulfilled values and the logic tables combining them.
// Purpose: Provide deterministic four-valued evaluation for condition trees.
// Dependencies: serde::{Deserialize, Serialize}
// ============================================================================

//! ## Overview
//! Defines the four truth values of condition evaluation
//! (`fulfilled/unfulfilled/unknown/neutral`) and the logic tables that
//! combine them. NEUTRAL is the value of hints and unevaluated format
//! constraints: it acts as the identity of conjunction but must never reach
//! an `or`/`xor` composition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ComposeError;
use crate::error::ComposeResult;
use crate::tree::CompositionOp;

// ============================================================================
// SECTION: Fulfilled Value
// ============================================================================

/// Four-valued truth value describing the state of a condition
///
/// # Invariants
/// - Represents a closed set of truth values; every operator matches
///   exhaustively so the algebra is checked by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fulfilled {
    /// The condition is fulfilled
    Fulfilled,
    /// The condition is not fulfilled
    Unfulfilled,
    /// It cannot be decided whether the condition is fulfilled
    Unknown,
    /// A hint or unevaluated format constraint which has no fulfilment state
    Neutral,
}

impl Fulfilled {
    /// Returns true if the value is `Fulfilled`
    #[must_use]
    pub const fn is_fulfilled(self) -> bool {
        matches!(self, Self::Fulfilled)
    }

    /// Returns true if the value is `Unfulfilled`
    #[must_use]
    pub const fn is_unfulfilled(self) -> bool {
        matches!(self, Self::Unfulfilled)
    }

    /// Returns true if the value is `Unknown`
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns true if the value is `Neutral`
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// Returns the canonical upper-case name of the value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fulfilled => "FULFILLED",
            Self::Unfulfilled => "UNFULFILLED",
            Self::Unknown => "UNKNOWN",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl From<bool> for Fulfilled {
    fn from(value: bool) -> Self {
        if value { Self::Fulfilled } else { Self::Unfulfilled }
    }
}

impl fmt::Display for Fulfilled {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Logic Tables
// ============================================================================

impl Fulfilled {
    /// Conjunction (`U` operator)
    ///
    /// NEUTRAL is the identity against any non-neutral operand and absorbs
    /// only against itself. UNFULFILLED dominates, UNKNOWN survives anything
    /// except UNFULFILLED.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Neutral, rhs) => rhs,
            (lhs, Self::Neutral) => lhs,
            (Self::Unfulfilled, _) | (_, Self::Unfulfilled) => Self::Unfulfilled,
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (Self::Fulfilled, Self::Fulfilled) => Self::Fulfilled,
        }
    }

    /// Inclusive disjunction (`O` operator)
    ///
    /// Only defined over `{FULFILLED, UNFULFILLED, UNKNOWN}`; a NEUTRAL
    /// operand has no useful disjunction semantics.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::NonsensicalComposition`] when either operand
    /// is NEUTRAL.
    pub fn or(self, other: Self) -> ComposeResult<Self> {
        match (self, other) {
            (Self::Neutral, _) | (_, Self::Neutral) => Err(ComposeError::NonsensicalComposition {
                op: CompositionOp::Or,
                left_kind: self.as_str(),
                right_kind: other.as_str(),
            }),
            (Self::Fulfilled, _) | (_, Self::Fulfilled) => Ok(Self::Fulfilled),
            (Self::Unknown, _) | (_, Self::Unknown) => Ok(Self::Unknown),
            (Self::Unfulfilled, Self::Unfulfilled) => Ok(Self::Unfulfilled),
        }
    }

    /// Exclusive disjunction (`X` operator)
    ///
    /// Only defined over `{FULFILLED, UNFULFILLED, UNKNOWN}`; UNKNOWN is
    /// infectious.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::NonsensicalComposition`] when either operand
    /// is NEUTRAL.
    pub fn xor(self, other: Self) -> ComposeResult<Self> {
        match (self, other) {
            (Self::Neutral, _) | (_, Self::Neutral) => Err(ComposeError::NonsensicalComposition {
                op: CompositionOp::Xor,
                left_kind: self.as_str(),
                right_kind: other.as_str(),
            }),
            (Self::Unknown, _) | (_, Self::Unknown) => Ok(Self::Unknown),
            (lhs, rhs) => Ok(Self::from(lhs.is_fulfilled() ^ rhs.is_fulfilled())),
        }
    }
}
