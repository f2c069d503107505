// cond-logic/src/key.rs
// ============================================================================
// Module: Condition Keys
// Description: Condition keys and their classification by form.
// Purpose: Classify keys into requirement/hint/format/package/time buckets.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Condition keys are classified purely by their form, not by lookup: the
//! `P` suffix marks packages, the `Q` suffix and a reserved number band mark
//! time conditions, and three disjoint number bands separate requirement
//! constraints, hints, and format constraints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::error::KeyError;

// ============================================================================
// SECTION: Number Bands
// ============================================================================

/// Inclusive number band of requirement-constraint keys.
const REQUIREMENT_CONSTRAINT_BAND: (u32, u32) = (1, 499);
/// Inclusive number band of hint keys.
const HINT_BAND: (u32, u32) = (500, 899);
/// Inclusive number band of format-constraint keys.
const FORMAT_CONSTRAINT_BAND: (u32, u32) = (900, 999);
/// Inclusive number band reserved for time conditions.
const TIME_CONDITION_BAND: (u32, u32) = (2000, 2499);

// ============================================================================
// SECTION: Key Kind
// ============================================================================

/// The category a condition key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionKeyKind {
    /// A condition whose truth decides the presence of a field
    RequirementConstraint,
    /// A plain-text annotation that does not affect the logic
    Hint,
    /// A condition constraining the shape of a field value
    FormatConstraint,
    /// An abbreviation key that expands to a condition expression
    Package,
    /// A time condition; currently evaluated as neutral
    TimeCondition,
}

impl ConditionKeyKind {
    /// Returns the canonical upper-case name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequirementConstraint => "REQUIREMENT_CONSTRAINT",
            Self::Hint => "HINT",
            Self::FormatConstraint => "FORMAT_CONSTRAINT",
            Self::Package => "PACKAGE",
            Self::TimeCondition => "TIME_CONDITION",
        }
    }
}

impl fmt::Display for ConditionKeyKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Condition Key
// ============================================================================

/// A single condition key as it appears between brackets, e.g. `2` or `123P`
///
/// # Invariants
/// - The raw key has been validated on construction; `kind()` is total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConditionKey {
    /// The raw key string, e.g. "2", "123P" or "17Q"
    key: String,
    /// The category derived from the key's form
    kind: ConditionKeyKind,
}

impl ConditionKey {
    /// Creates a condition key after classifying it by form
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the key is malformed or falls outside every
    /// known number band.
    pub fn new(raw: impl Into<String>) -> Result<Self, KeyError> {
        let key = raw.into();
        let kind = classify(&key)?;
        Ok(Self {
            key,
            kind,
        })
    }

    /// Returns the raw key string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Returns the category of this key
    #[must_use]
    pub const fn kind(&self) -> ConditionKeyKind {
        self.kind
    }

    /// Returns the numeric part of the key, e.g. `123` for `123P`
    #[must_use]
    pub fn numeric(&self) -> u32 {
        digits_prefix(&self.key)
    }

    /// Returns the key wrapped in brackets, e.g. `[2]`
    #[must_use]
    pub fn bracketed(&self) -> String {
        format!("[{}]", self.key)
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.key)
    }
}

impl Serialize for ConditionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

impl<'de> Deserialize<'de> for ConditionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(de::Error::custom)
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies a raw key string by its form.
fn classify(raw: &str) -> Result<ConditionKeyKind, KeyError> {
    let malformed = || KeyError::Malformed {
        key: raw.to_owned(),
    };
    if raw.is_empty() {
        return Err(malformed());
    }
    if let Some(digits) = raw.strip_suffix('P') {
        return if is_all_digits(digits) { Ok(ConditionKeyKind::Package) } else { Err(malformed()) };
    }
    if let Some(digits) = raw.strip_suffix('Q') {
        return if is_all_digits(digits) { Ok(ConditionKeyKind::TimeCondition) } else { Err(malformed()) };
    }
    if !is_all_digits(raw) {
        return Err(malformed());
    }
    let number: u32 = raw.parse().map_err(|_| malformed())?;
    let in_band = |band: (u32, u32)| band.0 <= number && number <= band.1;
    if in_band(REQUIREMENT_CONSTRAINT_BAND) {
        Ok(ConditionKeyKind::RequirementConstraint)
    } else if in_band(HINT_BAND) {
        Ok(ConditionKeyKind::Hint)
    } else if in_band(FORMAT_CONSTRAINT_BAND) {
        Ok(ConditionKeyKind::FormatConstraint)
    } else if in_band(TIME_CONDITION_BAND) {
        Ok(ConditionKeyKind::TimeCondition)
    } else {
        Err(KeyError::OutOfRange {
            key: raw.to_owned(),
        })
    }
}

/// Returns true when the (non-empty) string consists of ASCII digits only.
fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parses the leading digit run of a key, saturating at `u32::MAX`.
fn digits_prefix(value: &str) -> u32 {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(u32::MAX)
}
