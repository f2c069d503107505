// ahb-check-core/src/interfaces/mod.rs
// ============================================================================
// Module: Content Evaluation Interfaces
// Description: Backend-agnostic interfaces for per-key content evaluation.
// Purpose: Define the contract surfaces the evaluators integrate through.
// Dependencies: async-trait, once_cell, serde_json, thiserror, cond-logic
// ============================================================================

//! ## Overview
//! Interfaces define how the expression evaluators obtain per-key answers —
//! requirement-constraint truth values, format-constraint verdicts, hint
//! texts, and package expressions — without embedding backend-specific
//! details. Every lookup may suspend; implementations must be deterministic
//! for fixed evaluatable data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use cond_logic::ConditionKey;
use cond_logic::Fulfilled;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::core::edifact::EdifactFormat;
use crate::core::edifact::EdifactFormatVersion;
use crate::core::results::EvaluatedFormatConstraint;

// ============================================================================
// SECTION: Evaluation Data
// ============================================================================

/// Data that can be processed by the evaluators of one run
///
/// # Invariants
/// - Immutable for the duration of a content-evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatableData {
    /// The body of the message being validated, e.g. an edifact seed
    pub body: serde_json::Value,
    /// The format of the evaluatable message, e.g. UTILMD
    pub edifact_format: EdifactFormat,
    /// The format version of the evaluatable data, e.g. FV2210
    pub format_version: EdifactFormatVersion,
}

/// The setting in which a single condition is evaluated
///
/// The context may differ per leaf within one run, e.g. when a condition
/// refers to one of several repeated segments. It is passed by value and
/// never mutated by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationContext {
    /// JSON path into the edifact seed; `None` means the whole message
    pub scope: Option<String>,
}

// ============================================================================
// SECTION: Cancellation
// ============================================================================

/// Cooperative cancellation signal for an evaluation run
///
/// Cloning shares the underlying flag. The evaluators check the token at
/// every suspension point and unwind with a cancellation error; no partial
/// results are returned.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to every clone of this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true when cancellation has been signalled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ============================================================================
// SECTION: Evaluator Errors
// ============================================================================

/// Errors reported by content evaluators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluatorError {
    /// No evaluation is implemented for the requested key
    #[error("there is no content evaluation for key '{key}' ({format} {version})")]
    UnknownKey {
        /// The condition key that could not be answered
        key: String,
        /// Format the evaluator is registered for
        format: EdifactFormat,
        /// Format version the evaluator is registered for
        version: EdifactFormatVersion,
    },

    /// A user-supplied evaluator failed
    #[error("content evaluator failure: {0}")]
    Failure(String),
}

// ============================================================================
// SECTION: Content Evaluator Traits
// ============================================================================

/// Requirement-constraint evaluator
///
/// Decides whether the data constellation described by a condition key is
/// present in the evaluatable data.
#[async_trait]
pub trait RcEvaluator: Send + Sync {
    /// Evaluates a single requirement constraint
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] when the key is unknown or the evaluation
    /// fails.
    async fn evaluate(
        &self,
        key: &ConditionKey,
        data: &EvaluatableData,
        context: &EvaluationContext,
    ) -> Result<Fulfilled, EvaluatorError>;
}

/// Format-constraint evaluator
///
/// Checks a concrete entered value against the format described by a key.
#[async_trait]
pub trait FcEvaluator: Send + Sync {
    /// Evaluates a single format constraint against the entered text
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] when the key is unknown or the evaluation
    /// fails.
    async fn evaluate(
        &self,
        key: &ConditionKey,
        entered_input: Option<&str>,
        context: &EvaluationContext,
    ) -> Result<EvaluatedFormatConstraint, EvaluatorError>;
}

/// Provider of plain-text hints for hint keys
#[async_trait]
pub trait HintsProvider: Send + Sync {
    /// Returns the hint text for the given key, if there is one
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] when the lookup fails.
    async fn hint_text(&self, key: &ConditionKey) -> Result<Option<String>, EvaluatorError>;
}

/// Resolver of package keys to condition expressions
#[async_trait]
pub trait PackageResolver: Send + Sync {
    /// Returns the condition expression abbreviated by the package key
    ///
    /// `None` means the package is unresolvable.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] when the lookup fails.
    async fn resolve(&self, key: &ConditionKey) -> Result<Option<String>, EvaluatorError>;
}

// ============================================================================
// SECTION: Logic Bundle
// ============================================================================

/// The four collaborators needed to evaluate expressions of one format
#[derive(Clone)]
pub struct LogicBundle {
    /// Requirement-constraint evaluator
    pub rc_evaluator: Arc<dyn RcEvaluator>,
    /// Format-constraint evaluator
    pub fc_evaluator: Arc<dyn FcEvaluator>,
    /// Hints provider
    pub hints_provider: Arc<dyn HintsProvider>,
    /// Package resolver
    pub package_resolver: Arc<dyn PackageResolver>,
}

// ============================================================================
// SECTION: Logic Registry
// ============================================================================

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A bundle is already registered for the format and version
    #[error("a logic bundle for {format} {version} is already registered")]
    AlreadyRegistered {
        /// The conflicting format
        format: EdifactFormat,
        /// The conflicting format version
        version: EdifactFormatVersion,
    },

    /// No bundle is registered for the format and version
    #[error("no logic bundle has been registered for {format} {version}")]
    NoSuchBundle {
        /// The requested format
        format: EdifactFormat,
        /// The requested format version
        version: EdifactFormatVersion,
    },
}

/// Maps format/version pairs to their logic bundles
///
/// The registry is the explicit, load-bearing dependency-injection surface:
/// evaluators receive it by reference. A process-wide instance exists for
/// convenience and can be replaced atomically between runs.
#[derive(Clone, Default)]
pub struct LogicRegistry {
    bundles: HashMap<(EdifactFormat, EdifactFormatVersion), LogicBundle>,
}

impl LogicRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bundle for a format and version
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] when a bundle for the
    /// pair exists.
    pub fn register(
        &mut self,
        format: EdifactFormat,
        version: EdifactFormatVersion,
        bundle: LogicBundle,
    ) -> Result<(), RegistryError> {
        if self.bundles.contains_key(&(format, version)) {
            return Err(RegistryError::AlreadyRegistered {
                format,
                version,
            });
        }
        self.bundles.insert((format, version), bundle);
        Ok(())
    }

    /// Returns the bundle for a format and version
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoSuchBundle`] when nothing is registered
    /// for the pair.
    pub fn bundle_for(
        &self,
        format: EdifactFormat,
        version: EdifactFormatVersion,
    ) -> Result<LogicBundle, RegistryError> {
        self.bundles.get(&(format, version)).cloned().ok_or(RegistryError::NoSuchBundle {
            format,
            version,
        })
    }
}

// ============================================================================
// SECTION: Process-Wide Registry
// ============================================================================

static GLOBAL_REGISTRY: Lazy<RwLock<Arc<LogicRegistry>>> =
    Lazy::new(|| RwLock::new(Arc::new(LogicRegistry::new())));

/// Returns the current process-wide registry
#[must_use]
pub fn global_registry() -> Arc<LogicRegistry> {
    match GLOBAL_REGISTRY.read() {
        Ok(guard) => Arc::clone(&guard),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}

/// Replaces the process-wide registry atomically
///
/// Runs that already hold an `Arc` to the previous registry finish against
/// it; new runs observe the replacement.
pub fn replace_global_registry(registry: LogicRegistry) {
    let replacement = Arc::new(registry);
    match GLOBAL_REGISTRY.write() {
        Ok(mut guard) => *guard = replacement,
        Err(poisoned) => *poisoned.into_inner() = replacement,
    }
}
