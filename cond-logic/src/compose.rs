// cond-logic/src/compose.rs
// ============================================================================
// Module: Node Composition
// Description: Composition of condition nodes under the four-valued algebra.
// Purpose: Reduce two condition nodes into an evaluated composition.
// Dependencies: crate::{error, fulfilled, node, tree}
// ============================================================================

//! ## Overview
//! Implements the composition rules for the four operators over
//! heterogeneous condition nodes. Truth values combine per the tables in
//! `fulfilled`; hints and residual format-constraint expressions are merged
//! canonically so that results are deterministic regardless of the order in
//! which sibling sub-trees were evaluated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::ComposeError;
use crate::error::ComposeResult;
use crate::fulfilled::Fulfilled;
use crate::node::ConditionNode;
use crate::tree::CompositionOp;

// ============================================================================
// SECTION: Composition Entry Point
// ============================================================================

/// Composes two condition nodes under the given operator
///
/// The result is always an [`ConditionNode::EvaluatedComposition`] carrying
/// the combined truth value, the merged hints, and the combined residual
/// format-constraint expression.
///
/// # Errors
///
/// Returns [`ComposeError::NonsensicalComposition`] when the operand kinds
/// cannot be meaningfully combined, e.g. a hint inside an `or`/`xor` or a
/// hint used as the gate of a `then_also`.
pub fn compose(op: CompositionOp, left: ConditionNode, right: ConditionNode) -> ComposeResult<ConditionNode> {
    match op {
        CompositionOp::And => Ok(and_composition(&left, &right)),
        CompositionOp::Or | CompositionOp::Xor => or_xor_composition(op, &left, &right),
        CompositionOp::ThenAlso => then_also_composition(left, right),
    }
}

// ============================================================================
// SECTION: And Composition
// ============================================================================

/// Conjunction of two nodes.
///
/// An unfulfilled conjunction drops its by-products: hints and format
/// constraints only apply to fields that may still be required.
fn and_composition(left: &ConditionNode, right: &ConditionNode) -> ConditionNode {
    let value = left.fulfilled().and(right.fulfilled());
    if value.is_unfulfilled() {
        return ConditionNode::evaluated(value, None, None);
    }
    let hints = merge_hints(left.hints(), right.hints());
    let residual = combine_residuals(
        CompositionOp::And,
        left.format_constraints_expression(),
        right.format_constraints_expression(),
    );
    ConditionNode::evaluated(value, residual, hints)
}

// ============================================================================
// SECTION: Or / Xor Composition
// ============================================================================

/// Inclusive or exclusive disjunction of two nodes.
///
/// Neutral operands are rejected outright: a hint, an unevaluated format
/// constraint, or a neutral-valued composition on either side of an
/// `or`/`xor` has no useful result.
fn or_xor_composition(op: CompositionOp, left: &ConditionNode, right: &ConditionNode) -> ComposeResult<ConditionNode> {
    if left.is_inherently_neutral() || right.is_inherently_neutral() {
        return Err(ComposeError::NonsensicalComposition {
            op,
            left_kind: left.kind_name(),
            right_kind: right.kind_name(),
        });
    }
    let value = if matches!(op, CompositionOp::Xor) {
        left.fulfilled().xor(right.fulfilled())?
    } else {
        left.fulfilled().or(right.fulfilled())?
    };
    let hints = merge_hints(left.hints(), right.hints());
    let residual =
        combine_residuals(op, left.format_constraints_expression(), right.format_constraints_expression());
    Ok(ConditionNode::evaluated(value, residual, hints))
}

// ============================================================================
// SECTION: Then-Also Composition
// ============================================================================

/// Adjacency of a requirement gate and a format-constraint payload.
///
/// The payload is kept only while the gate may still be fulfilled: a TRUE
/// gate propagates the payload, an UNFULFILLED gate yields NEUTRAL with
/// empty by-products, an UNKNOWN gate keeps the payload's by-products while
/// the truth value stays UNKNOWN.
fn then_also_composition(left: ConditionNode, right: ConditionNode) -> ComposeResult<ConditionNode> {
    // The format-constraint leaf may appear on either side of the adjacency.
    let left_is_format = matches!(
        left,
        ConditionNode::FormatConstraint {
            ..
        }
    );
    let right_is_format = matches!(
        right,
        ConditionNode::FormatConstraint {
            ..
        }
    );
    let (gate, payload) = if left_is_format && !right_is_format { (right, left) } else { (left, right) };

    let gate_is_hint = matches!(
        gate,
        ConditionNode::Hint {
            ..
        }
    );
    let gate_value = gate.fulfilled();
    if gate_is_hint || gate_value.is_neutral() {
        return Err(ComposeError::NonsensicalComposition {
            op: CompositionOp::ThenAlso,
            left_kind: gate.kind_name(),
            right_kind: payload.kind_name(),
        });
    }
    if gate_value.is_unfulfilled() {
        return Ok(ConditionNode::evaluated(Fulfilled::Neutral, None, None));
    }

    // A fulfilled gate propagates the payload's value; a valueless payload
    // (the usual format-constraint leaf) leaves the gate's value in place so
    // chained adjacencies keep composing.
    let value = if gate_value.is_unknown() {
        Fulfilled::Unknown
    } else if payload.fulfilled().is_neutral() {
        gate_value
    } else {
        payload.fulfilled()
    };
    let residual = combine_residuals(
        CompositionOp::ThenAlso,
        gate.format_constraints_expression(),
        payload.format_constraints_expression(),
    );
    let hints = merge_hints(payload.hints(), None);
    Ok(ConditionNode::evaluated(value, residual, hints))
}

// ============================================================================
// SECTION: Hint Merging
// ============================================================================

/// Merges hint texts into a canonical newline-joined form.
///
/// Individual hint lines are sorted lexicographically and deduplicated on
/// full text, so the merge is insensitive to evaluation order.
#[must_use]
pub fn merge_hints(left: Option<&str>, right: Option<&str>) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();
    for side in [left, right] {
        let Some(text) = side else { continue };
        for line in text.split('\n') {
            if !line.is_empty() {
                lines.push(line);
            }
        }
    }
    if lines.is_empty() {
        return None;
    }
    lines.sort_unstable();
    lines.dedup();
    Some(lines.join("\n"))
}

// ============================================================================
// SECTION: Residual Combination
// ============================================================================

/// Combines two residual format-constraint expressions under an operator.
///
/// Empty residuals are the identity. For commutative operators the operands
/// are ordered lexicographically so the residual is deterministic; adjacency
/// keeps the gate-payload order. Single bracketed keys stay unparenthesised.
#[must_use]
pub fn combine_residuals(op: CompositionOp, left: Option<&str>, right: Option<&str>) -> Option<String> {
    match (left, right) {
        (None, None) => None,
        (Some(expr), None) | (None, Some(expr)) => Some(expr.to_owned()),
        (Some(lhs), Some(rhs)) => {
            let (first, second) = if op.is_commutative() && lhs > rhs { (rhs, lhs) } else { (lhs, rhs) };
            let combined = match op.operator() {
                Some(letter) => {
                    format!("{} {letter} {}", wrap_operand(first), wrap_operand(second))
                }
                None => format!("{}{}", wrap_operand(first), wrap_operand(second)),
            };
            Some(combined)
        }
    }
}

/// Parenthesises an operand unless it is a single bracketed key.
fn wrap_operand(expression: &str) -> String {
    if is_single_key(expression) {
        expression.to_owned()
    } else {
        format!("({expression})")
    }
}

/// Returns true for expressions of the form `[<key>]`.
fn is_single_key(expression: &str) -> bool {
    if !(expression.starts_with('[') && expression.ends_with(']') && expression.len() >= 3) {
        return false;
    }
    let inner = &expression[1..expression.len() - 1];
    !inner.contains('[') && !inner.contains(']')
}
