// ahb-check-core/src/runtime/fc_eval.rs
// ============================================================================
// Module: Format Constraint Evaluation
// Description: Second evaluation stage over the residual expression.
// Purpose: Decide whether the entered text obeys the collected constraints.
// Dependencies: futures, tracing, cond-logic, crate::{interfaces, runtime}
// ============================================================================

//! ## Overview
//! The format-constraint stage parses the residual expression collected by
//! the first stage and evaluates it under two-valued logic against the
//! entered text. Adjacency inside a residual means conjunction. When the
//! expression is violated, the error messages of all violated constraints
//! are joined into one message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use cond_logic::CompositionOp;
use cond_logic::ConditionKey;
use cond_logic::ConditionKeyKind;
use cond_logic::ConditionTree;
use cond_logic::parse_condition_expression;
use futures::future::join_all;
use tracing::debug;

use crate::core::results::EvaluatedFormatConstraint;
use crate::core::results::FormatConstraintEvaluationResult;
use crate::runtime::EvaluationError;
use crate::runtime::EvaluationRun;

// ============================================================================
// SECTION: Leaf Verdicts
// ============================================================================

/// Collects the distinct format-constraint keys of the residual in pre-order.
fn distinct_keys(tree: &ConditionTree) -> Result<Vec<ConditionKey>, EvaluationError> {
    let mut keys: Vec<ConditionKey> = Vec::new();
    for key in tree.keys() {
        if key.kind() != ConditionKeyKind::FormatConstraint {
            return Err(EvaluationError::ForeignKeyInFormatConstraintExpression {
                key: key.as_str().to_owned(),
            });
        }
        if !keys.iter().any(|seen| seen == key) {
            keys.push(key.clone());
        }
    }
    Ok(keys)
}

/// Evaluates every distinct constraint against the entered text.
async fn evaluate_leaves(
    keys: &[ConditionKey],
    run: &EvaluationRun,
) -> Result<HashMap<String, EvaluatedFormatConstraint>, EvaluationError> {
    run.ensure_active()?;
    let lookups = keys.iter().map(|key| {
        run.bundle.fc_evaluator.evaluate(key, run.entered_input.as_deref(), &run.context)
    });
    let verdicts = join_all(lookups).await;
    run.ensure_active()?;

    let mut evaluated = HashMap::with_capacity(keys.len());
    for (key, verdict) in keys.iter().zip(verdicts) {
        let mut verdict = verdict?;
        if !verdict.format_constraint_fulfilled && verdict.error_message.is_none() {
            verdict.error_message = Some(format!("Condition [{key}] has to be fulfilled."));
        }
        debug!(key = %key, fulfilled = verdict.format_constraint_fulfilled, "evaluated format constraint");
        evaluated.insert(key.as_str().to_owned(), verdict);
    }
    Ok(evaluated)
}

// ============================================================================
// SECTION: Two-Valued Reduction
// ============================================================================

/// Reduces the residual tree under two-valued logic; adjacency is `and`.
fn reduce(tree: &ConditionTree, verdicts: &HashMap<String, EvaluatedFormatConstraint>) -> bool {
    match tree {
        ConditionTree::Leaf(key) => {
            verdicts.get(key.as_str()).is_some_and(|verdict| verdict.format_constraint_fulfilled)
        }
        ConditionTree::Composition {
            op,
            left,
            right,
        } => {
            let lhs = reduce(left, verdicts);
            let rhs = reduce(right, verdicts);
            match op {
                CompositionOp::And | CompositionOp::ThenAlso => lhs && rhs,
                CompositionOp::Or => lhs || rhs,
                CompositionOp::Xor => lhs ^ rhs,
            }
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Evaluates a residual format-constraint expression
///
/// An empty residual is vacuously fulfilled. When the overall verdict is
/// violated, the error messages of all violated constraints are joined with
/// "; " in the order the constraints appear in the residual.
///
/// # Errors
///
/// Returns [`EvaluationError`] when the residual does not parse, contains
/// non-format-constraint keys, an evaluator fails, or the run is cancelled.
pub async fn evaluate_format_constraints(
    expression: Option<&str>,
    run: &EvaluationRun,
) -> Result<FormatConstraintEvaluationResult, EvaluationError> {
    let Some(expression) = expression.filter(|expression| !expression.trim().is_empty()) else {
        return Ok(FormatConstraintEvaluationResult::vacuously_fulfilled());
    };
    let tree = parse_condition_expression(expression)?;
    let keys = distinct_keys(&tree)?;
    let verdicts = evaluate_leaves(&keys, run).await?;

    let format_constraints_fulfilled = reduce(&tree, &verdicts);
    let error_message = if format_constraints_fulfilled {
        None
    } else {
        let messages: Vec<&str> = keys
            .iter()
            .filter_map(|key| verdicts.get(key.as_str()))
            .filter(|verdict| !verdict.format_constraint_fulfilled)
            .filter_map(|verdict| verdict.error_message.as_deref())
            .collect();
        Some(messages.join("; "))
    };
    debug!(expression = %expression, fulfilled = format_constraints_fulfilled, "evaluated residual expression");
    Ok(FormatConstraintEvaluationResult {
        format_constraints_fulfilled,
        error_message,
    })
}
