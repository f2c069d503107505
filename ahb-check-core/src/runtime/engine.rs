// ahb-check-core/src/runtime/engine.rs
// ============================================================================
// Module: AHB Expression Engine
// Description: Orchestration of full AHB expression evaluations.
// Purpose: Drive pair-wise evaluation and pick the effective indicator.
// Dependencies: tracing, cond-logic, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The engine parses a whole AHB expression, evaluates its pairs left to
//! right — expanding packages, running the requirement-constraint stage,
//! then the format-constraint stage — and short-circuits on the first pair
//! whose requirement constraints are fulfilled. If no pair fulfils, the last
//! pair's result is returned. A failure in any pair aborts the whole run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use cond_logic::parse_ahb_expression;
use tracing::debug;

use crate::core::packages::expand_packages;
use crate::core::results::AhbExpressionEvaluationResult;
use crate::core::results::FormatConstraintEvaluationResult;
use crate::core::results::RequirementConstraintEvaluationResult;
use crate::interfaces::CancellationToken;
use crate::interfaces::EvaluatableData;
use crate::interfaces::EvaluationContext;
use crate::interfaces::LogicRegistry;
use crate::runtime::EvaluationError;
use crate::runtime::EvaluationRun;
use crate::runtime::fc_eval::evaluate_format_constraints;
use crate::runtime::rc_eval::evaluate_requirement_constraints;

// ============================================================================
// SECTION: AHB Evaluator
// ============================================================================

/// Evaluates AHB expressions against the logic registered for their format
pub struct AhbEvaluator {
    /// Registry the evaluator picks logic bundles from
    registry: Arc<LogicRegistry>,
}

impl AhbEvaluator {
    /// Creates an evaluator over the given registry
    #[must_use]
    pub const fn new(registry: Arc<LogicRegistry>) -> Self {
        Self {
            registry,
        }
    }

    /// Evaluates an AHB expression with a default context
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] when parsing, package expansion, or one
    /// of the evaluation stages fails.
    pub async fn evaluate(
        &self,
        ahb_expression: &str,
        data: EvaluatableData,
        entered_input: Option<String>,
    ) -> Result<AhbExpressionEvaluationResult, EvaluationError> {
        self.evaluate_with(ahb_expression, data, entered_input, EvaluationContext::default(), CancellationToken::new())
            .await
    }

    /// Evaluates an AHB expression with an explicit context and cancellation
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] when parsing, package expansion, or one
    /// of the evaluation stages fails, or when the run is cancelled.
    pub async fn evaluate_with(
        &self,
        ahb_expression: &str,
        data: EvaluatableData,
        entered_input: Option<String>,
        context: EvaluationContext,
        cancellation: CancellationToken,
    ) -> Result<AhbExpressionEvaluationResult, EvaluationError> {
        let bundle = self.registry.bundle_for(data.edifact_format, data.format_version)?;
        let run = EvaluationRun {
            bundle,
            data,
            entered_input,
            context,
            cancellation,
        };
        let expression = parse_ahb_expression(ahb_expression)?;
        let pair_count = expression.pairs().len();

        let mut last: Option<AhbExpressionEvaluationResult> = None;
        for pair in expression.pairs() {
            run.ensure_active()?;
            let (rc_result, fc_result) = match &pair.tree {
                None => (
                    RequirementConstraintEvaluationResult::unconditional(),
                    FormatConstraintEvaluationResult::vacuously_fulfilled(),
                ),
                Some(tree) => {
                    let expanded =
                        expand_packages(tree, run.bundle.package_resolver.as_ref(), &run.cancellation).await?;
                    let rc_result = evaluate_requirement_constraints(&expanded, &run).await?;
                    let fc_result = evaluate_format_constraints(
                        rc_result.format_constraints_expression.as_deref(),
                        &run,
                    )
                    .await?;
                    (rc_result, fc_result)
                }
            };
            let mut result = AhbExpressionEvaluationResult {
                requirement_indicator: pair.indicator,
                requirement_constraint_evaluation_result: rc_result,
                format_constraint_evaluation_result: fc_result,
            };
            if result.requirement_constraint_evaluation_result.requirement_constraints_fulfilled {
                // With several indicators the overall requirement is
                // conditional even when the winning pair alone is not.
                if pair_count > 1 {
                    result.requirement_constraint_evaluation_result.requirement_is_conditional = true;
                }
                debug!(indicator = %result.requirement_indicator, "pair fulfilled, short-circuiting");
                return Ok(result);
            }
            last = Some(result);
        }
        // The parser guarantees at least one pair, so `last` is set here.
        last.ok_or(EvaluationError::Syntax(cond_logic::ParseError::UnexpectedEnd {
            offset: 0,
            expected: vec!["requirement indicator"],
        }))
    }
}
