// ahb-check-core/src/core/results.rs
// ============================================================================
// Module: Evaluation Results
// Description: Result types of the requirement and format constraint checks.
// Purpose: Define the stable result surface of an AHB expression evaluation.
// Dependencies: serde, cond-logic
// ============================================================================

//! ## Overview
//! A "result" is the outcome of an evaluation against actual data. The field
//! names are part of the external JSON contract. `ContentEvaluationResult`
//! is the inverse view: the full set of per-key answers from which an
//! evaluation can be replayed without touching real evaluators.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use cond_logic::CategorizedKeyExtract;
use cond_logic::Fulfilled;
use cond_logic::RequirementIndicator;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Requirement Constraint Result
// ============================================================================

/// Result of the requirement-constraint evaluation of one condition tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementConstraintEvaluationResult {
    /// True if the condition expression evaluates to fulfilled
    pub requirement_constraints_fulfilled: bool,
    /// True if the result depends on requirement constraints
    pub requirement_is_conditional: bool,
    /// Residual expression of collected, still unevaluated format constraints
    #[serde(default)]
    pub format_constraints_expression: Option<String>,
    /// Hint text that should surface for the field, e.g. "Hinweis 555"
    #[serde(default)]
    pub hints: Option<String>,
}

impl RequirementConstraintEvaluationResult {
    /// Result of an empty condition tree: unconditionally fulfilled.
    #[must_use]
    pub const fn unconditional() -> Self {
        Self {
            requirement_constraints_fulfilled: true,
            requirement_is_conditional: false,
            format_constraints_expression: None,
            hints: None,
        }
    }
}

// ============================================================================
// SECTION: Format Constraint Result
// ============================================================================

/// Result of evaluating a residual format-constraint expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConstraintEvaluationResult {
    /// True if the entered data obey the format-constraint expression
    pub format_constraints_fulfilled: bool,
    /// All error messages that led to not fulfilling the expression
    #[serde(default)]
    pub error_message: Option<String>,
}

impl FormatConstraintEvaluationResult {
    /// Result of an empty residual: vacuously fulfilled.
    #[must_use]
    pub const fn vacuously_fulfilled() -> Self {
        Self {
            format_constraints_fulfilled: true,
            error_message: None,
        }
    }
}

// ============================================================================
// SECTION: AHB Expression Result
// ============================================================================

/// Result of evaluating a whole AHB expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AhbExpressionEvaluationResult {
    /// The effective requirement indicator of the winning pair
    pub requirement_indicator: RequirementIndicator,
    /// Requirement-constraint outcome of the winning pair
    pub requirement_constraint_evaluation_result: RequirementConstraintEvaluationResult,
    /// Format-constraint outcome of the winning pair
    pub format_constraint_evaluation_result: FormatConstraintEvaluationResult,
}

// ============================================================================
// SECTION: Evaluated Format Constraint
// ============================================================================

/// Verdict of a single format constraint for a concrete entered value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedFormatConstraint {
    /// True if the entered value obeys the format constraint
    pub format_constraint_fulfilled: bool,
    /// Explanation when the constraint is violated
    #[serde(default)]
    pub error_message: Option<String>,
}

// ============================================================================
// SECTION: Content Evaluation Result
// ============================================================================

/// The results of a full content evaluation
///
/// Holds every per-key answer (hints, requirement constraints, format
/// constraints, package expressions) an expression evaluation could ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEvaluationResult {
    /// Maps hint keys to their texts
    pub hints: BTreeMap<String, Option<String>>,
    /// Maps format-constraint keys to their verdicts
    pub format_constraints: BTreeMap<String, EvaluatedFormatConstraint>,
    /// Maps requirement-constraint keys to their truth values
    pub requirement_constraints: BTreeMap<String, Fulfilled>,
    /// Maps package keys (e.g. "123P") to their condition expressions
    #[serde(default)]
    pub packages: BTreeMap<String, String>,
    /// Optional identifier of this result
    #[serde(default)]
    pub id: Option<String>,
}

// ============================================================================
// SECTION: Outcome Generation
// ============================================================================

/// Generates all possible content-evaluation results for an extract
///
/// Every combination of requirement-constraint values and format-constraint
/// verdicts is produced; hint texts are synthesized as "Hinweis {key}" and
/// packages stay empty. Returns an empty list when the extract contains
/// neither requirement nor format constraints.
#[must_use]
pub fn generate_possible_content_evaluation_results(
    extract: &CategorizedKeyExtract,
) -> Vec<ContentEvaluationResult> {
    if extract.requirement_constraint_keys.is_empty() && extract.format_constraint_keys.is_empty() {
        return Vec::new();
    }
    let hints: BTreeMap<String, Option<String>> = extract
        .hint_keys
        .iter()
        .map(|key| (key.as_str().to_owned(), Some(format!("Hinweis {key}"))))
        .collect();

    const RC_VALUES: [Fulfilled; 4] =
        [Fulfilled::Fulfilled, Fulfilled::Unfulfilled, Fulfilled::Unknown, Fulfilled::Neutral];

    let mut rc_combinations: Vec<BTreeMap<String, Fulfilled>> = vec![BTreeMap::new()];
    for key in &extract.requirement_constraint_keys {
        let mut extended = Vec::with_capacity(rc_combinations.len() * RC_VALUES.len());
        for combination in &rc_combinations {
            for value in RC_VALUES {
                let mut next = combination.clone();
                next.insert(key.as_str().to_owned(), value);
                extended.push(next);
            }
        }
        rc_combinations = extended;
    }

    let mut fc_combinations: Vec<BTreeMap<String, EvaluatedFormatConstraint>> = vec![BTreeMap::new()];
    for key in &extract.format_constraint_keys {
        let mut extended = Vec::with_capacity(fc_combinations.len() * 2);
        for combination in &fc_combinations {
            for fulfilled in [true, false] {
                let mut next = combination.clone();
                next.insert(
                    key.as_str().to_owned(),
                    EvaluatedFormatConstraint {
                        format_constraint_fulfilled: fulfilled,
                        error_message: None,
                    },
                );
                extended.push(next);
            }
        }
        fc_combinations = extended;
    }

    let mut results = Vec::with_capacity(rc_combinations.len() * fc_combinations.len());
    for fc_combination in &fc_combinations {
        for rc_combination in &rc_combinations {
            results.push(ContentEvaluationResult {
                hints: hints.clone(),
                format_constraints: fc_combination.clone(),
                requirement_constraints: rc_combination.clone(),
                packages: BTreeMap::new(),
                id: None,
            });
        }
    }
    results
}
