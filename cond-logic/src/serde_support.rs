// cond-logic/src/serde_support.rs
// ============================================================================
// Module: Tree Serde Support
// Description: JSON representations of condition and AHB expression trees.
// Purpose: Provide the verbose (round-trip) and concise (one-way) tree JSON.
// Dependencies: serde_json, crate::{ahb_parser, error, indicators, key, tree}
// ============================================================================

//! ## Overview
//! Two stable JSON representations of parsed trees. The verbose form mirrors
//! the rule/token structure (`{"type": ..., "children": [...]}`) and
//! round-trips; the concise form collapses compositions into one-key objects
//! and leaves into bare strings and is serialization-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Value;
use serde_json::json;

use crate::ahb_parser::AhbExpression;
use crate::ahb_parser::IndicatorExpression;
use crate::error::KeyError;
use crate::indicators::RequirementIndicator;
use crate::key::ConditionKey;
use crate::key::ConditionKeyKind;
use crate::tree::CompositionOp;
use crate::tree::ConditionTree;

// ============================================================================
// SECTION: Rule And Token Names
// ============================================================================

const RULE_AHB_EXPRESSION: &str = "ahb_expression";
const RULE_SINGLE_PAIR: &str = "single_requirement_indicator_expression";
const RULE_REQUIREMENT_INDICATOR: &str = "requirement_indicator";
const RULE_CONDITION: &str = "condition";
const RULE_PACKAGE: &str = "package";

const TOKEN_MODAL_MARK: &str = "MODAL_MARK";
const TOKEN_PREFIX_OPERATOR: &str = "PREFIX_OPERATOR";
const TOKEN_CONDITION_KEY: &str = "CONDITION_KEY";
const TOKEN_PACKAGE_KEY: &str = "PACKAGE_KEY";

// ============================================================================
// SECTION: Serde Errors
// ============================================================================

/// Errors that can occur while reading the verbose tree representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSerdeError {
    /// A node was not a JSON object with the expected shape
    InvalidNode(String),

    /// A required field was missing
    MissingField(&'static str),

    /// An unknown rule name was encountered
    UnknownRule(String),

    /// A rule had the wrong number of children
    InvalidChildCount {
        /// The rule name
        rule: String,
        /// Expected child count
        expected: usize,
        /// Actual child count
        actual: usize,
    },

    /// A token value was not a classifiable condition key
    InvalidKey(KeyError),

    /// A token value was not a known requirement indicator
    UnknownIndicator(String),
}

impl fmt::Display for TreeSerdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNode(detail) => write!(f, "invalid tree node: {detail}"),
            Self::MissingField(field) => write!(f, "missing field: {field}"),
            Self::UnknownRule(rule) => write!(f, "unknown rule: {rule}"),
            Self::InvalidChildCount {
                rule,
                expected,
                actual,
            } => {
                write!(f, "rule '{rule}' expects {expected} children, got {actual}")
            }
            Self::InvalidKey(source) => write!(f, "invalid condition key: {source}"),
            Self::UnknownIndicator(value) => {
                write!(f, "'{value}' is not a known requirement indicator")
            }
        }
    }
}

impl std::error::Error for TreeSerdeError {}

impl From<KeyError> for TreeSerdeError {
    fn from(source: KeyError) -> Self {
        Self::InvalidKey(source)
    }
}

// ============================================================================
// SECTION: Verbose Serialization
// ============================================================================

fn token_slot(value: &str, token_type: &str) -> Value {
    json!({
        "token": { "value": value, "type": token_type },
        "tree": null,
    })
}

fn tree_slot(tree: Value) -> Value {
    json!({
        "token": null,
        "tree": tree,
    })
}

fn key_node(key: &ConditionKey) -> Value {
    let (rule, token_type) = if key.kind() == ConditionKeyKind::Package {
        (RULE_PACKAGE, TOKEN_PACKAGE_KEY)
    } else {
        (RULE_CONDITION, TOKEN_CONDITION_KEY)
    };
    json!({
        "type": rule,
        "children": [token_slot(key.as_str(), token_type)],
    })
}

fn indicator_token(indicator: RequirementIndicator) -> Value {
    let token_type = match indicator {
        RequirementIndicator::ModalMark(_) => TOKEN_MODAL_MARK,
        RequirementIndicator::PrefixOperator(_) => TOKEN_PREFIX_OPERATOR,
    };
    token_slot(indicator.token(), token_type)
}

/// Serializes a condition tree into the verbose representation
#[must_use]
pub fn condition_tree_to_verbose(tree: &ConditionTree) -> Value {
    match tree {
        ConditionTree::Leaf(key) => key_node(key),
        ConditionTree::Composition {
            op,
            left,
            right,
        } => json!({
            "type": op.rule_name(),
            "children": [
                tree_slot(condition_tree_to_verbose(left)),
                tree_slot(condition_tree_to_verbose(right)),
            ],
        }),
    }
}

/// Serializes an AHB expression into the verbose representation
#[must_use]
pub fn ahb_expression_to_verbose(expression: &AhbExpression) -> Value {
    let children: Vec<Value> = expression
        .pairs()
        .iter()
        .map(|pair| match &pair.tree {
            Some(tree) => tree_slot(json!({
                "type": RULE_SINGLE_PAIR,
                "children": [
                    indicator_token(pair.indicator),
                    tree_slot(condition_tree_to_verbose(tree)),
                ],
            })),
            None => tree_slot(json!({
                "type": RULE_REQUIREMENT_INDICATOR,
                "children": [indicator_token(pair.indicator)],
            })),
        })
        .collect();
    json!({
        "type": RULE_AHB_EXPRESSION,
        "children": children,
    })
}

// ============================================================================
// SECTION: Verbose Deserialization
// ============================================================================

struct VerboseNode<'a> {
    rule: &'a str,
    children: &'a [Value],
}

fn read_node(value: &Value) -> Result<VerboseNode<'_>, TreeSerdeError> {
    let object = value
        .as_object()
        .ok_or_else(|| TreeSerdeError::InvalidNode(format!("expected object, got {value}")))?;
    let rule = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(TreeSerdeError::MissingField("type"))?;
    let children = object
        .get("children")
        .and_then(Value::as_array)
        .ok_or(TreeSerdeError::MissingField("children"))?;
    Ok(VerboseNode {
        rule,
        children: children.as_slice(),
    })
}

/// Reads a `{"token": ..., "tree": ...}` slot.
fn read_slot(value: &Value) -> Result<(Option<&Value>, Option<&Value>), TreeSerdeError> {
    let object = value
        .as_object()
        .ok_or_else(|| TreeSerdeError::InvalidNode(format!("expected token/tree slot, got {value}")))?;
    let token = object.get("token").filter(|token| !token.is_null());
    let tree = object.get("tree").filter(|tree| !tree.is_null());
    Ok((token, tree))
}

fn read_token_value(value: &Value) -> Result<&str, TreeSerdeError> {
    let (token, _) = read_slot(value)?;
    token
        .and_then(|token| token.get("value"))
        .and_then(Value::as_str)
        .ok_or(TreeSerdeError::MissingField("token.value"))
}

fn read_child_tree(value: &Value) -> Result<&Value, TreeSerdeError> {
    let (_, tree) = read_slot(value)?;
    tree.ok_or(TreeSerdeError::MissingField("tree"))
}

fn composition_op(rule: &str) -> Option<CompositionOp> {
    match rule {
        "and_composition" => Some(CompositionOp::And),
        "or_composition" => Some(CompositionOp::Or),
        "xor_composition" => Some(CompositionOp::Xor),
        "then_also_composition" => Some(CompositionOp::ThenAlso),
        _ => None,
    }
}

/// Deserializes a condition tree from the verbose representation
///
/// # Errors
///
/// Returns [`TreeSerdeError`] when the value does not follow the verbose
/// shape or contains unknown rules or keys.
pub fn condition_tree_from_verbose(value: &Value) -> Result<ConditionTree, TreeSerdeError> {
    let node = read_node(value)?;
    if let Some(op) = composition_op(node.rule) {
        if node.children.len() != 2 {
            return Err(TreeSerdeError::InvalidChildCount {
                rule: node.rule.to_owned(),
                expected: 2,
                actual: node.children.len(),
            });
        }
        let left = condition_tree_from_verbose(read_child_tree(&node.children[0])?)?;
        let right = condition_tree_from_verbose(read_child_tree(&node.children[1])?)?;
        return Ok(ConditionTree::composition(op, left, right));
    }
    match node.rule {
        RULE_CONDITION | RULE_PACKAGE => {
            if node.children.len() != 1 {
                return Err(TreeSerdeError::InvalidChildCount {
                    rule: node.rule.to_owned(),
                    expected: 1,
                    actual: node.children.len(),
                });
            }
            let raw = read_token_value(&node.children[0])?;
            Ok(ConditionTree::leaf(ConditionKey::new(raw)?))
        }
        other => Err(TreeSerdeError::UnknownRule(other.to_owned())),
    }
}

/// Deserializes an AHB expression from the verbose representation
///
/// # Errors
///
/// Returns [`TreeSerdeError`] when the value does not follow the verbose
/// shape.
pub fn ahb_expression_from_verbose(value: &Value) -> Result<AhbExpression, TreeSerdeError> {
    let node = read_node(value)?;
    if node.rule != RULE_AHB_EXPRESSION {
        return Err(TreeSerdeError::UnknownRule(node.rule.to_owned()));
    }
    let mut pairs = smallvec::SmallVec::new();
    for child in node.children {
        let pair_node = read_node(read_child_tree(child)?)?;
        let pair = match pair_node.rule {
            RULE_SINGLE_PAIR => {
                if pair_node.children.len() != 2 {
                    return Err(TreeSerdeError::InvalidChildCount {
                        rule: pair_node.rule.to_owned(),
                        expected: 2,
                        actual: pair_node.children.len(),
                    });
                }
                let raw = read_token_value(&pair_node.children[0])?;
                let indicator = RequirementIndicator::parse(raw)
                    .ok_or_else(|| TreeSerdeError::UnknownIndicator(raw.to_owned()))?;
                let tree = condition_tree_from_verbose(read_child_tree(&pair_node.children[1])?)?;
                IndicatorExpression {
                    indicator,
                    tree: Some(tree),
                }
            }
            RULE_REQUIREMENT_INDICATOR => {
                if pair_node.children.len() != 1 {
                    return Err(TreeSerdeError::InvalidChildCount {
                        rule: pair_node.rule.to_owned(),
                        expected: 1,
                        actual: pair_node.children.len(),
                    });
                }
                let raw = read_token_value(&pair_node.children[0])?;
                let indicator = RequirementIndicator::parse(raw)
                    .ok_or_else(|| TreeSerdeError::UnknownIndicator(raw.to_owned()))?;
                IndicatorExpression {
                    indicator,
                    tree: None,
                }
            }
            other => return Err(TreeSerdeError::UnknownRule(other.to_owned())),
        };
        pairs.push(pair);
    }
    Ok(AhbExpression {
        pairs,
    })
}

// ============================================================================
// SECTION: Concise Serialization
// ============================================================================

/// Serializes a condition tree into the concise representation
///
/// Compositions become one-key objects, leaves become bare key strings. The
/// concise form cannot be deserialized.
#[must_use]
pub fn condition_tree_to_concise(tree: &ConditionTree) -> Value {
    match tree {
        ConditionTree::Leaf(key) => Value::String(key.as_str().to_owned()),
        ConditionTree::Composition {
            op,
            left,
            right,
        } => json!({
            (op.rule_name()): [condition_tree_to_concise(left), condition_tree_to_concise(right)],
        }),
    }
}

/// Serializes an AHB expression into the concise representation
#[must_use]
pub fn ahb_expression_to_concise(expression: &AhbExpression) -> Value {
    let children: Vec<Value> = expression
        .pairs()
        .iter()
        .map(|pair| match &pair.tree {
            Some(tree) => json!({
                (RULE_SINGLE_PAIR): [
                    Value::String(pair.indicator.token().to_owned()),
                    condition_tree_to_concise(tree),
                ],
            }),
            None => Value::String(pair.indicator.token().to_owned()),
        })
        .collect();
    json!({ (RULE_AHB_EXPRESSION): children })
}
