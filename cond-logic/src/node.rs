// cond-logic/src/node.rs
// ============================================================================
// Module: Condition Nodes
// Description: Evaluation-time values for condition-tree leaves and results.
// Purpose: Define `ConditionNode` and the by-products it carries.
// Dependencies: serde, crate::{fulfilled, key}
// ============================================================================

//! ## Overview
//! During requirement-constraint evaluation every leaf of a condition tree
//! is replaced by a `ConditionNode`; compositions reduce two nodes into an
//! `EvaluatedComposition` that carries the accumulated hints and the
//! residual format-constraint expression alongside its truth value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::fulfilled::Fulfilled;
use crate::key::ConditionKey;

// ============================================================================
// SECTION: Condition Node
// ============================================================================

/// Evaluation-time value of a condition-tree node
///
/// The variant decides how the node behaves inside compositions: requirement
/// constraints carry a truth value, hints and unevaluated format constraints
/// are neutral, and evaluated compositions carry the merged by-products of
/// their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionNode {
    /// A condition whose truth has been decided by a content evaluator
    RequirementConstraint {
        /// Key of the condition
        key: ConditionKey,
        /// Truth value reported by the content evaluator
        fulfilled: Fulfilled,
    },

    /// A plain-text hint; always neutral
    Hint {
        /// Key of the hint
        key: ConditionKey,
        /// The hint text provided by the hints provider
        text: String,
    },

    /// A format constraint that has been collected but not evaluated yet
    FormatConstraint {
        /// Key of the format constraint
        key: ConditionKey,
        /// The literal expression snippet preserved for the second stage
        expression: String,
    },

    /// A time condition; evaluated as neutral until its semantics are fixed
    TimeCondition {
        /// Key of the time condition
        key: ConditionKey,
    },

    /// The result of reducing a composition of two nodes
    EvaluatedComposition {
        /// Truth value of the composition
        fulfilled: Fulfilled,
        /// Residual expression of collected format constraints, if any
        format_constraints_expression: Option<String>,
        /// Merged hint texts, if any
        hints: Option<String>,
    },
}

// ============================================================================
// SECTION: Constructor Helpers
// ============================================================================

impl ConditionNode {
    /// Creates a requirement-constraint node
    #[must_use]
    pub const fn requirement_constraint(key: ConditionKey, fulfilled: Fulfilled) -> Self {
        Self::RequirementConstraint {
            key,
            fulfilled,
        }
    }

    /// Creates a hint node
    #[must_use]
    pub const fn hint(key: ConditionKey, text: String) -> Self {
        Self::Hint {
            key,
            text,
        }
    }

    /// Creates an unevaluated format-constraint node for the given key
    #[must_use]
    pub fn format_constraint(key: ConditionKey) -> Self {
        let expression = key.bracketed();
        Self::FormatConstraint {
            key,
            expression,
        }
    }

    /// Creates a time-condition node
    #[must_use]
    pub const fn time_condition(key: ConditionKey) -> Self {
        Self::TimeCondition {
            key,
        }
    }

    /// Creates an evaluated composition
    #[must_use]
    pub const fn evaluated(
        fulfilled: Fulfilled,
        format_constraints_expression: Option<String>,
        hints: Option<String>,
    ) -> Self {
        Self::EvaluatedComposition {
            fulfilled,
            format_constraints_expression,
            hints,
        }
    }
}

// ============================================================================
// SECTION: Accessors
// ============================================================================

impl ConditionNode {
    /// Returns the truth value of this node
    #[must_use]
    pub const fn fulfilled(&self) -> Fulfilled {
        match self {
            Self::RequirementConstraint {
                fulfilled, ..
            }
            | Self::EvaluatedComposition {
                fulfilled, ..
            } => *fulfilled,
            Self::Hint {
                ..
            }
            | Self::FormatConstraint {
                ..
            }
            | Self::TimeCondition {
                ..
            } => Fulfilled::Neutral,
        }
    }

    /// Returns the hint text carried by this node, if any
    #[must_use]
    pub fn hints(&self) -> Option<&str> {
        match self {
            Self::Hint {
                text, ..
            } => Some(text.as_str()),
            Self::EvaluatedComposition {
                hints, ..
            } => hints.as_deref(),
            _ => None,
        }
    }

    /// Returns the residual format-constraint expression of this node, if any
    #[must_use]
    pub fn format_constraints_expression(&self) -> Option<&str> {
        match self {
            Self::FormatConstraint {
                expression, ..
            } => Some(expression.as_str()),
            Self::EvaluatedComposition {
                format_constraints_expression,
                ..
            } => format_constraints_expression.as_deref(),
            _ => None,
        }
    }

    /// Returns the kind name used in diagnostics
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::RequirementConstraint {
                ..
            } => "REQUIREMENT_CONSTRAINT",
            Self::Hint {
                ..
            } => "HINT",
            Self::FormatConstraint {
                ..
            } => "FORMAT_CONSTRAINT",
            Self::TimeCondition {
                ..
            } => "TIME_CONDITION",
            Self::EvaluatedComposition {
                ..
            } => "EVALUATED_COMPOSITION",
        }
    }

    /// Returns true for node kinds that are inherently neutral
    ///
    /// Evaluated compositions may also carry a NEUTRAL value, but that is a
    /// property of their reduction, not of the kind itself.
    #[must_use]
    pub const fn is_inherently_neutral(&self) -> bool {
        matches!(
            self,
            Self::Hint {
                ..
            } | Self::FormatConstraint {
                ..
            } | Self::TimeCondition {
                ..
            }
        )
    }
}
