// ahb-check-core/src/runtime/mod.rs
// ============================================================================
// Module: Evaluation Runtime
// Description: Run state and error surface of the expression evaluators.
// Purpose: Drive requirement and format constraint evaluation per run.
// Dependencies: thiserror, cond-logic, crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime evaluates parsed AHB expressions against content evaluators.
//! An `EvaluationRun` is the explicit per-run channel: it carries the logic
//! bundle, the evaluatable data, the entered text for format constraints,
//! and the cancellation token. Nothing flows through global mutable state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod engine;
pub mod fc_eval;
pub mod rc_eval;

// ============================================================================
// SECTION: Imports
// ============================================================================

use cond_logic::ComposeError;
use cond_logic::ParseError;
use thiserror::Error;

use crate::core::packages::ExpansionError;
use crate::interfaces::CancellationToken;
use crate::interfaces::EvaluatableData;
use crate::interfaces::EvaluationContext;
use crate::interfaces::EvaluatorError;
use crate::interfaces::LogicBundle;
use crate::interfaces::RegistryError;

// ============================================================================
// SECTION: Evaluation Errors
// ============================================================================

/// Errors that can occur while evaluating an AHB expression
///
/// The evaluators fail fast: an error in any pair aborts the whole run and
/// no partial results are returned.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// An expression failed to parse
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// Two nodes could not be meaningfully composed
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// Package expansion failed
    #[error(transparent)]
    Expansion(ExpansionError),

    /// No logic bundle is registered for the requested format
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A content evaluator failed or lacked a key
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    /// The run was cancelled
    #[error("the evaluation run was cancelled")]
    Cancelled,

    /// A tree that should have been expanded still contains a package
    #[error("the tree still contains the unexpanded package '{key}'")]
    UnexpandedPackage {
        /// The package key that is still present
        key: String,
    },

    /// A non-format-constraint key appeared in a format-constraint expression
    #[error("'{key}' is not a format constraint key but appears in a format constraint expression")]
    ForeignKeyInFormatConstraintExpression {
        /// The offending key
        key: String,
    },
}

impl From<ExpansionError> for EvaluationError {
    fn from(error: ExpansionError) -> Self {
        match error {
            ExpansionError::Cancelled => Self::Cancelled,
            other => Self::Expansion(other),
        }
    }
}

// ============================================================================
// SECTION: Evaluation Run
// ============================================================================

/// Per-run state of one AHB expression evaluation
///
/// # Invariants
/// - The evaluatable data do not change for the duration of the run.
/// - The run context is never mutated by the core.
pub struct EvaluationRun {
    /// The logic bundle chosen for the data's format and version
    pub bundle: LogicBundle,
    /// The data the content evaluators work on
    pub data: EvaluatableData,
    /// The text the format-constraint evaluators check, if any
    pub entered_input: Option<String>,
    /// The per-leaf evaluation context
    pub context: EvaluationContext,
    /// Cooperative cancellation signal
    pub cancellation: CancellationToken,
}

impl EvaluationRun {
    /// Creates a run with a default context and a fresh cancellation token
    #[must_use]
    pub fn new(bundle: LogicBundle, data: EvaluatableData, entered_input: Option<String>) -> Self {
        Self {
            bundle,
            data,
            entered_input,
            context: EvaluationContext::default(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Fails with [`EvaluationError::Cancelled`] once cancellation is signalled
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::Cancelled`] when the token has fired.
    pub fn ensure_active(&self) -> Result<(), EvaluationError> {
        if self.cancellation.is_cancelled() {
            return Err(EvaluationError::Cancelled);
        }
        Ok(())
    }
}
