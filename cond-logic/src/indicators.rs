// cond-logic/src/indicators.rs
// ============================================================================
// Module: Requirement Indicators
// Description: Modal marks and prefix operators leading an AHB expression.
// Purpose: Define `ModalMark`, `PrefixOperator`, and `RequirementIndicator`.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A requirement indicator states whether a field is obligatory: either a
//! German modal mark (`Muss`/`Soll`/`Kann`, also abbreviated to their first
//! letter) or one of the prefix operators `X`/`O`/`U`. Inside a condition
//! expression the same letters are composition operators; the two-phase
//! grammar keeps the readings apart.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

// ============================================================================
// SECTION: Modal Marks
// ============================================================================

/// A modal mark describing whether information is obligatory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModalMark {
    /// "Must": required for the correct structure of the message
    Muss,
    /// "Should": required for technical reasons, always conditional
    Soll,
    /// "Can": optional
    Kann,
}

impl ModalMark {
    /// Returns the canonical upper-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Muss => "MUSS",
            Self::Soll => "SOLL",
            Self::Kann => "KANN",
        }
    }

    /// Returns the token as written in an AHB expression
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Muss => "Muss",
            Self::Soll => "Soll",
            Self::Kann => "Kann",
        }
    }
}

impl fmt::Display for ModalMark {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Prefix Operators
// ============================================================================

/// An operator used as requirement indicator rather than as a composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOperator {
    /// Exclusive choice from a finite set of qualifiers
    X,
    /// At least one of multiple possible qualifiers
    O,
    /// All provided qualifiers have to be used
    U,
}

impl PrefixOperator {
    /// Returns the operator letter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
            Self::U => "U",
        }
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Requirement Indicator
// ============================================================================

/// Either a modal mark or a prefix operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementIndicator {
    /// A modal mark such as `Muss`
    ModalMark(ModalMark),
    /// A prefix operator such as `X`
    PrefixOperator(PrefixOperator),
}

impl RequirementIndicator {
    /// Returns the canonical upper-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModalMark(mark) => mark.as_str(),
            Self::PrefixOperator(op) => op.as_str(),
        }
    }

    /// Returns the token as written in an AHB expression
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::ModalMark(mark) => mark.token(),
            Self::PrefixOperator(op) => op.as_str(),
        }
    }

    /// Parses a canonical indicator name, e.g. `MUSS` or `X`
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "MUSS" => Some(Self::ModalMark(ModalMark::Muss)),
            "SOLL" => Some(Self::ModalMark(ModalMark::Soll)),
            "KANN" => Some(Self::ModalMark(ModalMark::Kann)),
            "X" => Some(Self::PrefixOperator(PrefixOperator::X)),
            "O" => Some(Self::PrefixOperator(PrefixOperator::O)),
            "U" => Some(Self::PrefixOperator(PrefixOperator::U)),
            _ => None,
        }
    }
}

impl From<ModalMark> for RequirementIndicator {
    fn from(mark: ModalMark) -> Self {
        Self::ModalMark(mark)
    }
}

impl From<PrefixOperator> for RequirementIndicator {
    fn from(op: PrefixOperator) -> Self {
        Self::PrefixOperator(op)
    }
}

impl fmt::Display for RequirementIndicator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for RequirementIndicator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequirementIndicator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("'{raw}' is not a known requirement indicator")))
    }
}
