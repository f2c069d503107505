// cond-logic/tests/fulfilled.rs
// ============================================================================
// Module: Fulfilled Value Tests
// Description: Tests for the four-valued logic tables.
// ============================================================================
//! ## Overview
//! Validates the conjunction/disjunction tables, the neutral element, and
//! the algebraic laws of the four-valued logic.

mod support;

use cond_logic::ComposeError;
use cond_logic::Fulfilled;
use support::TestResult;
use support::ensure;

const ALL: [Fulfilled; 4] =
    [Fulfilled::Fulfilled, Fulfilled::Unfulfilled, Fulfilled::Unknown, Fulfilled::Neutral];

// ============================================================================
// SECTION: Conjunction
// ============================================================================

#[test]
fn test_and_table() -> TestResult {
    let cases = [
        (Fulfilled::Fulfilled, Fulfilled::Fulfilled, Fulfilled::Fulfilled),
        (Fulfilled::Fulfilled, Fulfilled::Unfulfilled, Fulfilled::Unfulfilled),
        (Fulfilled::Fulfilled, Fulfilled::Unknown, Fulfilled::Unknown),
        (Fulfilled::Unfulfilled, Fulfilled::Unknown, Fulfilled::Unfulfilled),
        (Fulfilled::Unknown, Fulfilled::Unknown, Fulfilled::Unknown),
        (Fulfilled::Unfulfilled, Fulfilled::Unfulfilled, Fulfilled::Unfulfilled),
    ];
    for (lhs, rhs, expected) in cases {
        ensure(lhs.and(rhs) == expected, format!("{lhs} and {rhs} should be {expected}"))?;
    }
    Ok(())
}

#[test]
fn test_and_neutral_is_identity() -> TestResult {
    for value in ALL {
        ensure(
            Fulfilled::Neutral.and(value) == value,
            format!("NEUTRAL and {value} should be {value}"),
        )?;
        ensure(
            value.and(Fulfilled::Neutral) == value,
            format!("{value} and NEUTRAL should be {value}"),
        )?;
    }
    Ok(())
}

#[test]
fn test_and_is_commutative_and_associative() -> TestResult {
    for lhs in ALL {
        for rhs in ALL {
            ensure(lhs.and(rhs) == rhs.and(lhs), format!("{lhs} and {rhs} should commute"))?;
            for mid in ALL {
                ensure(
                    lhs.and(mid).and(rhs) == lhs.and(mid.and(rhs)),
                    format!("{lhs}/{mid}/{rhs} should associate"),
                )?;
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Disjunction
// ============================================================================

#[test]
fn test_or_table() -> TestResult {
    let cases = [
        (Fulfilled::Fulfilled, Fulfilled::Fulfilled, Fulfilled::Fulfilled),
        (Fulfilled::Fulfilled, Fulfilled::Unfulfilled, Fulfilled::Fulfilled),
        (Fulfilled::Unknown, Fulfilled::Fulfilled, Fulfilled::Fulfilled),
        (Fulfilled::Unknown, Fulfilled::Unfulfilled, Fulfilled::Unknown),
        (Fulfilled::Unfulfilled, Fulfilled::Unfulfilled, Fulfilled::Unfulfilled),
    ];
    for (lhs, rhs, expected) in cases {
        ensure(lhs.or(rhs)? == expected, format!("{lhs} or {rhs} should be {expected}"))?;
    }
    Ok(())
}

#[test]
fn test_xor_table() -> TestResult {
    let cases = [
        (Fulfilled::Fulfilled, Fulfilled::Fulfilled, Fulfilled::Unfulfilled),
        (Fulfilled::Fulfilled, Fulfilled::Unfulfilled, Fulfilled::Fulfilled),
        (Fulfilled::Unfulfilled, Fulfilled::Fulfilled, Fulfilled::Fulfilled),
        (Fulfilled::Unfulfilled, Fulfilled::Unfulfilled, Fulfilled::Unfulfilled),
        (Fulfilled::Unknown, Fulfilled::Fulfilled, Fulfilled::Unknown),
        (Fulfilled::Unfulfilled, Fulfilled::Unknown, Fulfilled::Unknown),
    ];
    for (lhs, rhs, expected) in cases {
        ensure(lhs.xor(rhs)? == expected, format!("{lhs} xor {rhs} should be {expected}"))?;
    }
    Ok(())
}

#[test]
fn test_or_xor_reject_neutral() -> TestResult {
    for value in ALL {
        ensure(
            matches!(Fulfilled::Neutral.or(value), Err(ComposeError::NonsensicalComposition { .. })),
            format!("NEUTRAL or {value} should be rejected"),
        )?;
        ensure(
            matches!(value.xor(Fulfilled::Neutral), Err(ComposeError::NonsensicalComposition { .. })),
            format!("{value} xor NEUTRAL should be rejected"),
        )?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

#[test]
fn test_bool_conversion_and_serde_names() -> TestResult {
    ensure(Fulfilled::from(true) == Fulfilled::Fulfilled, "true should map to FULFILLED")?;
    ensure(Fulfilled::from(false) == Fulfilled::Unfulfilled, "false should map to UNFULFILLED")?;
    let serialized = serde_json::to_string(&Fulfilled::Neutral)?;
    ensure(serialized == "\"NEUTRAL\"", "NEUTRAL should serialize upper case")?;
    let parsed: Fulfilled = serde_json::from_str("\"UNKNOWN\"")?;
    ensure(parsed == Fulfilled::Unknown, "UNKNOWN should deserialize")?;
    Ok(())
}
