// ahb-check-core/src/runtime/rc_eval.rs
// ============================================================================
// Module: Requirement Constraint Evaluation
// Description: First evaluation stage of a condition tree.
// Purpose: Reduce a tree to a requirement verdict plus collected by-products.
// Dependencies: futures, tracing, cond-logic, crate::{interfaces, runtime}
// ============================================================================

//! ## Overview
//! The requirement-constraint stage answers whether a field is required. It
//! builds all leaf nodes up front — fanning out the requirement-constraint
//! and hint lookups concurrently — and then reduces the tree synchronously
//! under the four-valued algebra. Format constraints are only collected into
//! a residual expression here; the second stage evaluates them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use cond_logic::CategorizedKeyExtract;
use cond_logic::ConditionNode;
use cond_logic::ConditionTree;
use cond_logic::compose;
use futures::future::join_all;
use tracing::debug;

use crate::core::results::RequirementConstraintEvaluationResult;
use crate::runtime::EvaluationError;
use crate::runtime::EvaluationRun;

// ============================================================================
// SECTION: Leaf Node Building
// ============================================================================

/// Builds the evaluated leaf nodes for every key of the extract.
///
/// Requirement-constraint and hint lookups may suspend and are fanned out;
/// their results merge deterministically because the reduction order is
/// fixed by the tree and all ancillary merges are canonical.
async fn build_leaf_nodes(
    extract: &CategorizedKeyExtract,
    run: &EvaluationRun,
) -> Result<HashMap<String, ConditionNode>, EvaluationError> {
    run.ensure_active()?;
    let rc_lookups = extract
        .requirement_constraint_keys
        .iter()
        .map(|key| run.bundle.rc_evaluator.evaluate(key, &run.data, &run.context));
    let hint_lookups = extract.hint_keys.iter().map(|key| run.bundle.hints_provider.hint_text(key));
    let (rc_values, hint_texts) = futures::join!(join_all(rc_lookups), join_all(hint_lookups));
    run.ensure_active()?;

    let mut nodes = HashMap::with_capacity(extract.len());
    for (key, value) in extract.requirement_constraint_keys.iter().zip(rc_values) {
        let fulfilled = value?;
        debug!(key = %key, value = %fulfilled, "evaluated requirement constraint");
        nodes.insert(key.as_str().to_owned(), ConditionNode::requirement_constraint(key.clone(), fulfilled));
    }
    for (key, text) in extract.hint_keys.iter().zip(hint_texts) {
        let text = text?.unwrap_or_default();
        nodes.insert(key.as_str().to_owned(), ConditionNode::hint(key.clone(), text));
    }
    for key in &extract.format_constraint_keys {
        nodes.insert(key.as_str().to_owned(), ConditionNode::format_constraint(key.clone()));
    }
    for key in &extract.time_condition_keys {
        nodes.insert(key.as_str().to_owned(), ConditionNode::time_condition(key.clone()));
    }
    Ok(nodes)
}

// ============================================================================
// SECTION: Tree Reduction
// ============================================================================

/// Reduces the tree post-order over the prepared leaf nodes.
fn reduce(tree: &ConditionTree, nodes: &HashMap<String, ConditionNode>) -> Result<ConditionNode, EvaluationError> {
    match tree {
        ConditionTree::Leaf(key) => {
            nodes.get(key.as_str()).cloned().ok_or_else(|| EvaluationError::UnexpandedPackage {
                key: key.as_str().to_owned(),
            })
        }
        ConditionTree::Composition {
            op,
            left,
            right,
        } => {
            let left = reduce(left, nodes)?;
            let right = reduce(right, nodes)?;
            Ok(compose(*op, left, right)?)
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Evaluates the requirement constraints of an expanded condition tree
///
/// The verdict is fulfilled when the root reduces to FULFILLED, or when it
/// reduces to NEUTRAL without any requirement-constraint leaf (an
/// unconditional field). An UNKNOWN root fails closed.
///
/// # Errors
///
/// Returns [`EvaluationError`] on nonsensical compositions, evaluator
/// failures, unexpanded packages, or cancellation.
pub async fn evaluate_requirement_constraints(
    tree: &ConditionTree,
    run: &EvaluationRun,
) -> Result<RequirementConstraintEvaluationResult, EvaluationError> {
    let extract = CategorizedKeyExtract::from_tree(tree);
    if let Some(package) = extract.package_keys.first() {
        return Err(EvaluationError::UnexpandedPackage {
            key: package.as_str().to_owned(),
        });
    }
    let nodes = build_leaf_nodes(&extract, run).await?;
    let root = reduce(tree, &nodes)?;

    let value = root.fulfilled();
    let requirement_is_conditional = !extract.requirement_constraint_keys.is_empty();
    let requirement_constraints_fulfilled =
        value.is_fulfilled() || (value.is_neutral() && !requirement_is_conditional);
    let result = RequirementConstraintEvaluationResult {
        requirement_constraints_fulfilled,
        requirement_is_conditional,
        format_constraints_expression: root.format_constraints_expression().map(ToOwned::to_owned),
        hints: root.hints().map(ToOwned::to_owned),
    };
    debug!(
        fulfilled = result.requirement_constraints_fulfilled,
        conditional = result.requirement_is_conditional,
        "reduced requirement constraint tree"
    );
    Ok(result)
}
