// cond-logic/tests/serde_support.rs
// ============================================================================
// Module: Tree Serde Tests
// Description: Tests for the verbose and concise tree JSON representations.
// ============================================================================
//! ## Overview
//! Validates the verbose round trip and the concise one-way shapes.

mod support;

use cond_logic::ahb_expression_from_verbose;
use cond_logic::ahb_expression_to_concise;
use cond_logic::ahb_expression_to_verbose;
use cond_logic::condition_tree_from_verbose;
use cond_logic::condition_tree_to_concise;
use cond_logic::condition_tree_to_verbose;
use cond_logic::parse_ahb_expression;
use cond_logic::parse_condition_expression;
use serde_json::json;
use support::TestResult;
use support::ensure;

// ============================================================================
// SECTION: Verbose Round Trip
// ============================================================================

#[test]
fn test_condition_tree_verbose_round_trip() -> TestResult {
    let tree = parse_condition_expression("[2] U ([3] O [4])[901] U [123P]")?;
    let verbose = condition_tree_to_verbose(&tree);
    let reparsed = condition_tree_from_verbose(&verbose)?;
    ensure(tree == reparsed, "the verbose representation should round-trip")?;
    Ok(())
}

#[test]
fn test_ahb_expression_verbose_round_trip() -> TestResult {
    let expression = parse_ahb_expression("Muss [2] U [3] Soll [4] Kann")?;
    let verbose = ahb_expression_to_verbose(&expression);
    let reparsed = ahb_expression_from_verbose(&verbose)?;
    ensure(expression == reparsed, "the verbose representation should round-trip")?;
    Ok(())
}

#[test]
fn test_verbose_leaf_shape() -> TestResult {
    let tree = parse_condition_expression("[53]")?;
    let verbose = condition_tree_to_verbose(&tree);
    let expected = json!({
        "type": "condition",
        "children": [
            { "token": { "value": "53", "type": "CONDITION_KEY" }, "tree": null },
        ],
    });
    ensure(verbose == expected, format!("unexpected leaf shape: {verbose}"))?;
    Ok(())
}

#[test]
fn test_verbose_package_shape() -> TestResult {
    let tree = parse_condition_expression("[123P]")?;
    let verbose = condition_tree_to_verbose(&tree);
    let expected = json!({
        "type": "package",
        "children": [
            { "token": { "value": "123P", "type": "PACKAGE_KEY" }, "tree": null },
        ],
    });
    ensure(verbose == expected, format!("unexpected package shape: {verbose}"))?;
    Ok(())
}

// ============================================================================
// SECTION: Concise Shapes
// ============================================================================

#[test]
fn test_concise_condition_tree() -> TestResult {
    let tree = parse_condition_expression("[53] U [1][902]")?;
    let concise = condition_tree_to_concise(&tree);
    let expected = json!({
        "and_composition": [
            "53",
            { "then_also_composition": ["1", "902"] },
        ],
    });
    ensure(concise == expected, format!("unexpected concise shape: {concise}"))?;
    Ok(())
}

#[test]
fn test_concise_ahb_expression() -> TestResult {
    let expression = parse_ahb_expression("Muss [2] U [3] Kann")?;
    let concise = ahb_expression_to_concise(&expression);
    let expected = json!({
        "ahb_expression": [
            { "single_requirement_indicator_expression": ["Muss", { "and_composition": ["2", "3"] }] },
            "Kann",
        ],
    });
    ensure(concise == expected, format!("unexpected concise shape: {concise}"))?;
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

#[test]
fn test_verbose_rejects_unknown_rule() -> TestResult {
    let value = json!({ "type": "nand_composition", "children": [] });
    ensure(condition_tree_from_verbose(&value).is_err(), "unknown rules should be rejected")?;
    Ok(())
}

#[test]
fn test_verbose_rejects_wrong_child_count() -> TestResult {
    let value = json!({ "type": "and_composition", "children": [] });
    ensure(condition_tree_from_verbose(&value).is_err(), "an and needs two children")?;
    Ok(())
}
