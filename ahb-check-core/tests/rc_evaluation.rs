// ahb-check-core/tests/rc_evaluation.rs
// ============================================================================
// Module: Requirement Constraint Evaluation Tests
// Description: Tests for the first evaluation stage.
// ============================================================================
//! ## Overview
//! Validates verdict derivation, by-product collection, and the failure
//! modes of the requirement-constraint stage.

mod support;

use std::collections::BTreeMap;
use std::sync::Arc;

use ahb_check_core::DictBasedFcEvaluator;
use ahb_check_core::DictBasedHintsProvider;
use ahb_check_core::DictBasedPackageResolver;
use ahb_check_core::DictBasedRcEvaluator;
use ahb_check_core::EdifactFormat;
use ahb_check_core::EdifactFormatVersion;
use ahb_check_core::EvaluatableData;
use ahb_check_core::EvaluationError;
use ahb_check_core::EvaluationRun;
use ahb_check_core::EvaluatorError;
use ahb_check_core::LogicBundle;
use ahb_check_core::evaluate_requirement_constraints;
use cond_logic::Fulfilled;
use cond_logic::parse_condition_expression;
use support::TestResult;
use support::ensure;

const FORMAT: EdifactFormat = EdifactFormat::UTILMD;
const VERSION: EdifactFormatVersion = EdifactFormatVersion::FV2210;

fn run(
    requirement_constraints: &[(&str, Fulfilled)],
    hints: &[(&str, &str)],
) -> EvaluationRun {
    let rc_map: BTreeMap<String, Fulfilled> =
        requirement_constraints.iter().map(|(key, value)| ((*key).to_owned(), *value)).collect();
    let hint_map: BTreeMap<String, String> =
        hints.iter().map(|(key, text)| ((*key).to_owned(), (*text).to_owned())).collect();
    let bundle = LogicBundle {
        rc_evaluator: Arc::new(DictBasedRcEvaluator::new(rc_map, FORMAT, VERSION)),
        fc_evaluator: Arc::new(DictBasedFcEvaluator::new(BTreeMap::new(), FORMAT, VERSION)),
        hints_provider: Arc::new(DictBasedHintsProvider::new(hint_map)),
        package_resolver: Arc::new(DictBasedPackageResolver::new(BTreeMap::new())),
    };
    let data = EvaluatableData {
        body: serde_json::json!({}),
        edifact_format: FORMAT,
        format_version: VERSION,
    };
    EvaluationRun::new(bundle, data, None)
}

// ============================================================================
// SECTION: Verdicts
// ============================================================================

#[tokio::test]
async fn test_pure_requirement_tree_has_empty_byproducts() -> TestResult {
    let tree = parse_condition_expression("[1] U ([2] O [3])")?;
    let run = run(
        &[("1", Fulfilled::Fulfilled), ("2", Fulfilled::Unfulfilled), ("3", Fulfilled::Fulfilled)],
        &[],
    );
    let result = evaluate_requirement_constraints(&tree, &run).await?;
    ensure(result.requirement_constraints_fulfilled, "T U (F O T) should be fulfilled")?;
    ensure(result.requirement_is_conditional, "requirement constraints make the field conditional")?;
    ensure(result.format_constraints_expression.is_none(), "no format constraints were present")?;
    ensure(result.hints.is_none(), "no hints were present")?;
    Ok(())
}

#[tokio::test]
async fn test_unknown_root_fails_closed() -> TestResult {
    let tree = parse_condition_expression("[1]")?;
    let run = run(&[("1", Fulfilled::Unknown)], &[]);
    let result = evaluate_requirement_constraints(&tree, &run).await?;
    ensure(
        !result.requirement_constraints_fulfilled,
        "an unknown verdict must not mark the field required",
    )?;
    Ok(())
}

#[tokio::test]
async fn test_bare_format_constraint_leaf() -> TestResult {
    let tree = parse_condition_expression("[901]")?;
    let run = run(&[], &[]);
    let result = evaluate_requirement_constraints(&tree, &run).await?;
    ensure(result.requirement_constraints_fulfilled, "a neutral tree without RCs is unconditional")?;
    ensure(!result.requirement_is_conditional, "no requirement constraint was visited")?;
    ensure(
        result.format_constraints_expression.as_deref() == Some("[901]"),
        "the leaf itself becomes the residual",
    )?;
    Ok(())
}

#[tokio::test]
async fn test_time_condition_is_neutral() -> TestResult {
    let tree = parse_condition_expression("[1] U [17Q]")?;
    let run = run(&[("1", Fulfilled::Fulfilled)], &[]);
    let result = evaluate_requirement_constraints(&tree, &run).await?;
    ensure(result.requirement_constraints_fulfilled, "a time condition must not change the verdict")?;
    Ok(())
}

#[tokio::test]
async fn test_hints_merge_canonically() -> TestResult {
    let tree = parse_condition_expression("[555] U [1] U [502]")?;
    let run = run(&[("1", Fulfilled::Fulfilled)], &[("555", "zwei"), ("502", "eins")]);
    let result = evaluate_requirement_constraints(&tree, &run).await?;
    ensure(
        result.hints.as_deref() == Some("eins\nzwei"),
        format!("unexpected hints: {:?}", result.hints),
    )?;
    Ok(())
}

#[tokio::test]
async fn test_chained_adjacency_collects_all_constraints() -> TestResult {
    let tree = parse_condition_expression("[1][901][902]")?;
    let run = run(&[("1", Fulfilled::Fulfilled)], &[]);
    let result = evaluate_requirement_constraints(&tree, &run).await?;
    ensure(result.requirement_constraints_fulfilled, "the fulfilled gate decides the verdict")?;
    ensure(
        result.format_constraints_expression.as_deref() == Some("[901][902]"),
        format!("unexpected residual: {:?}", result.format_constraints_expression),
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Failure Modes
// ============================================================================

#[tokio::test]
async fn test_unexpanded_package_is_rejected() -> TestResult {
    let tree = parse_condition_expression("[1] U [123P]")?;
    let run = run(&[("1", Fulfilled::Fulfilled)], &[]);
    let error = evaluate_requirement_constraints(&tree, &run).await;
    ensure(
        matches!(error, Err(EvaluationError::UnexpandedPackage { .. })),
        format!("expected unexpanded-package error, got {error:?}"),
    )?;
    Ok(())
}

#[tokio::test]
async fn test_missing_evaluator_key_is_reported() -> TestResult {
    let tree = parse_condition_expression("[1] U [2]")?;
    let run = run(&[("1", Fulfilled::Fulfilled)], &[]);
    let error = evaluate_requirement_constraints(&tree, &run).await;
    match error {
        Err(EvaluationError::Evaluator(EvaluatorError::UnknownKey {
            key,
            format,
            version,
        })) => ensure(
            key == "2" && format == FORMAT && version == VERSION,
            "the missing key and its format should be named",
        ),
        other => ensure(false, format!("expected unknown-key error, got {other:?}")),
    }
}

#[tokio::test]
async fn test_cancelled_run() -> TestResult {
    let tree = parse_condition_expression("[1]")?;
    let run = run(&[("1", Fulfilled::Fulfilled)], &[]);
    run.cancellation.cancel();
    let error = evaluate_requirement_constraints(&tree, &run).await;
    ensure(
        matches!(error, Err(EvaluationError::Cancelled)),
        format!("expected cancellation, got {error:?}"),
    )?;
    Ok(())
}
