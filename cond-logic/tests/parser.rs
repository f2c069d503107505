// cond-logic/tests/parser.rs
// ============================================================================
// Module: Condition Parser Tests
// Description: Tests for the condition-expression grammar.
// ============================================================================
//! ## Overview
//! Validates precedence, whitespace handling, error reporting, and the
//! parse → pretty-print → parse round trip.

mod support;

use cond_logic::CompositionOp;
use cond_logic::ConditionKey;
use cond_logic::ConditionTree;
use cond_logic::ParseError;
use cond_logic::parse_condition_expression;
use proptest::prelude::Just;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::proptest;
use support::TestResult;
use support::ensure;

fn leaf(raw: &str) -> TestResult<ConditionTree> {
    Ok(ConditionTree::leaf(ConditionKey::new(raw)?))
}

// ============================================================================
// SECTION: Shapes
// ============================================================================

#[test]
fn test_precedence_adjacency_before_and() -> TestResult {
    let tree = parse_condition_expression("[2] U ([3] O [4])[901] U [555]")?;
    let expected = ConditionTree::and(
        ConditionTree::and(
            leaf("2")?,
            ConditionTree::then_also(ConditionTree::or(leaf("3")?, leaf("4")?), leaf("901")?),
        ),
        leaf("555")?,
    );
    ensure(tree == expected, format!("unexpected tree shape: {tree}"))?;
    Ok(())
}

#[test]
fn test_precedence_and_before_or_before_xor() -> TestResult {
    let tree = parse_condition_expression("[1] U [2] O [3] X [4]")?;
    let expected = ConditionTree::xor(
        ConditionTree::or(ConditionTree::and(leaf("1")?, leaf("2")?), leaf("3")?),
        leaf("4")?,
    );
    ensure(tree == expected, format!("unexpected tree shape: {tree}"))?;
    Ok(())
}

#[test]
fn test_left_associativity() -> TestResult {
    let tree = parse_condition_expression("[1] O [2] O [3]")?;
    let expected = ConditionTree::or(ConditionTree::or(leaf("1")?, leaf("2")?), leaf("3")?);
    ensure(tree == expected, "O should associate to the left")?;
    Ok(())
}

#[test]
fn test_whitespace_is_ignored() -> TestResult {
    let dense = parse_condition_expression("[45]U[502]O[1][906]")?;
    let spaced = parse_condition_expression(" [45] \tU [502]\nO [1] [906] ")?;
    ensure(dense == spaced, "whitespace should not change the parse")?;
    Ok(())
}

#[test]
fn test_unicode_operator_aliases() -> TestResult {
    let ascii = parse_condition_expression("[1] U [2] O [3] X [4]")?;
    let unicode = parse_condition_expression("[1] ∧ [2] ∨ [3] ⊻ [4]")?;
    ensure(ascii == unicode, "unicode operators should parse like the letters")?;
    Ok(())
}

#[test]
fn test_package_and_time_keys() -> TestResult {
    let tree = parse_condition_expression("[123P] U [17Q]")?;
    let expected = ConditionTree::and(leaf("123P")?, leaf("17Q")?);
    ensure(tree == expected, "suffixed keys should parse")?;
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

#[test]
fn test_unclosed_bracket() -> TestResult {
    let error = parse_condition_expression("[59");
    ensure(
        matches!(error, Err(ParseError::UnexpectedEnd { .. })),
        "unclosed bracket should fail at end of input",
    )?;
    Ok(())
}

#[test]
fn test_empty_expression() -> TestResult {
    let error = parse_condition_expression("   ");
    ensure(matches!(error, Err(ParseError::UnexpectedEnd { offset: 0, .. })), "empty input should fail")?;
    Ok(())
}

#[test]
fn test_trailing_operator_reports_offset() -> TestResult {
    match parse_condition_expression("[1] U") {
        Err(ParseError::UnexpectedEnd {
            offset,
            ..
        }) => ensure(offset == 5, format!("expected offset 5, got {offset}")),
        other => ensure(false, format!("expected unexpected-end error, got {other:?}")),
    }
}

#[test]
fn test_key_outside_known_bands() -> TestResult {
    let error = parse_condition_expression("[1500]");
    ensure(
        matches!(error, Err(ParseError::InvalidKey { offset: 1, .. })),
        "keys outside every band should be rejected with their offset",
    )?;
    Ok(())
}

#[test]
fn test_unbalanced_parenthesis() -> TestResult {
    ensure(parse_condition_expression("([1] U [2]").is_err(), "missing ')' should fail")?;
    ensure(parse_condition_expression("[1] U [2])").is_err(), "stray ')' should fail")?;
    Ok(())
}

// ============================================================================
// SECTION: Round Trip
// ============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..=499).prop_map(|n| n.to_string()),
        (500u32..=899).prop_map(|n| n.to_string()),
        (900u32..=999).prop_map(|n| n.to_string()),
        (1u32..=999).prop_map(|n| format!("{n}P")),
    ]
}

fn tree_strategy() -> impl Strategy<Value = ConditionTree> {
    let leaf = key_strategy().prop_filter_map("valid key", |raw| {
        ConditionKey::new(raw).ok().map(ConditionTree::leaf)
    });
    leaf.prop_recursive(4, 24, 2, |inner| {
        (
            prop_oneof![
                Just(CompositionOp::And),
                Just(CompositionOp::Or),
                Just(CompositionOp::Xor),
                Just(CompositionOp::ThenAlso),
            ],
            inner.clone(),
            inner,
        )
            .prop_map(|(op, left, right)| ConditionTree::composition(op, left, right))
    })
}

proptest! {
    /// Pretty-printing a tree and parsing the output reproduces the tree.
    #[test]
    fn test_display_parse_round_trip(tree in tree_strategy()) {
        let printed = tree.to_string();
        let reparsed = parse_condition_expression(&printed)
            .unwrap_or_else(|error| panic!("printed tree '{printed}' failed to parse: {error}"));
        assert_eq!(tree, reparsed, "round trip changed the tree for '{printed}'");
    }
}
