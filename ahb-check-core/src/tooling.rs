// ahb-check-core/src/tooling.rs
// ============================================================================
// Module: Dictionary-Based Tooling
// Description: Prefilled trait implementations for tests and replay.
// Purpose: Provide content evaluators backed by plain maps.
// Dependencies: async-trait, cond-logic, crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Dictionary-based implementations of the content-evaluation interfaces.
//! They answer every lookup from maps fixed at construction time, which
//! makes evaluation outcomes reproducible: ideal for tests and for
//! replaying a recorded `ContentEvaluationResult`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use cond_logic::ConditionKey;
use cond_logic::Fulfilled;

use crate::core::edifact::EdifactFormat;
use crate::core::edifact::EdifactFormatVersion;
use crate::core::results::ContentEvaluationResult;
use crate::core::results::EvaluatedFormatConstraint;
use crate::interfaces::EvaluatableData;
use crate::interfaces::EvaluationContext;
use crate::interfaces::EvaluatorError;
use crate::interfaces::FcEvaluator;
use crate::interfaces::HintsProvider;
use crate::interfaces::LogicBundle;
use crate::interfaces::PackageResolver;
use crate::interfaces::RcEvaluator;

// ============================================================================
// SECTION: Dict-Based RC Evaluator
// ============================================================================

/// A requirement-constraint evaluator backed by a prefilled map
pub struct DictBasedRcEvaluator {
    results: BTreeMap<String, Fulfilled>,
    format: EdifactFormat,
    version: EdifactFormatVersion,
}

impl DictBasedRcEvaluator {
    /// Creates an evaluator answering from the given map
    #[must_use]
    pub const fn new(
        results: BTreeMap<String, Fulfilled>,
        format: EdifactFormat,
        version: EdifactFormatVersion,
    ) -> Self {
        Self {
            results,
            format,
            version,
        }
    }
}

#[async_trait]
impl RcEvaluator for DictBasedRcEvaluator {
    async fn evaluate(
        &self,
        key: &ConditionKey,
        _data: &EvaluatableData,
        _context: &EvaluationContext,
    ) -> Result<Fulfilled, EvaluatorError> {
        self.results.get(key.as_str()).copied().ok_or_else(|| EvaluatorError::UnknownKey {
            key: key.as_str().to_owned(),
            format: self.format,
            version: self.version,
        })
    }
}

// ============================================================================
// SECTION: Dict-Based FC Evaluator
// ============================================================================

/// A format-constraint evaluator backed by a prefilled map
pub struct DictBasedFcEvaluator {
    results: BTreeMap<String, EvaluatedFormatConstraint>,
    format: EdifactFormat,
    version: EdifactFormatVersion,
}

impl DictBasedFcEvaluator {
    /// Creates an evaluator answering from the given map
    #[must_use]
    pub const fn new(
        results: BTreeMap<String, EvaluatedFormatConstraint>,
        format: EdifactFormat,
        version: EdifactFormatVersion,
    ) -> Self {
        Self {
            results,
            format,
            version,
        }
    }
}

#[async_trait]
impl FcEvaluator for DictBasedFcEvaluator {
    async fn evaluate(
        &self,
        key: &ConditionKey,
        _entered_input: Option<&str>,
        _context: &EvaluationContext,
    ) -> Result<EvaluatedFormatConstraint, EvaluatorError> {
        self.results.get(key.as_str()).cloned().ok_or_else(|| EvaluatorError::UnknownKey {
            key: key.as_str().to_owned(),
            format: self.format,
            version: self.version,
        })
    }
}

// ============================================================================
// SECTION: Dict-Based Hints Provider
// ============================================================================

/// A hints provider backed by a prefilled map
#[derive(Default)]
pub struct DictBasedHintsProvider {
    hints: BTreeMap<String, String>,
}

impl DictBasedHintsProvider {
    /// Creates a provider answering from the given map
    #[must_use]
    pub const fn new(hints: BTreeMap<String, String>) -> Self {
        Self {
            hints,
        }
    }
}

#[async_trait]
impl HintsProvider for DictBasedHintsProvider {
    async fn hint_text(&self, key: &ConditionKey) -> Result<Option<String>, EvaluatorError> {
        Ok(self.hints.get(key.as_str()).cloned())
    }
}

// ============================================================================
// SECTION: Dict-Based Package Resolver
// ============================================================================

/// A package resolver backed by a prefilled map
#[derive(Default)]
pub struct DictBasedPackageResolver {
    packages: BTreeMap<String, String>,
}

impl DictBasedPackageResolver {
    /// Creates a resolver answering from the given map
    #[must_use]
    pub const fn new(packages: BTreeMap<String, String>) -> Self {
        Self {
            packages,
        }
    }
}

#[async_trait]
impl PackageResolver for DictBasedPackageResolver {
    async fn resolve(&self, key: &ConditionKey) -> Result<Option<String>, EvaluatorError> {
        Ok(self.packages.get(key.as_str()).cloned())
    }
}

// ============================================================================
// SECTION: Content Evaluation Result Bundle
// ============================================================================

/// Builds a logic bundle that replays a recorded content evaluation
///
/// Every lookup is answered from the recorded result, so evaluating an
/// expression against the bundle reproduces the recorded outcome.
#[must_use]
pub fn content_evaluation_result_bundle(
    result: &ContentEvaluationResult,
    format: EdifactFormat,
    version: EdifactFormatVersion,
) -> LogicBundle {
    let hints = result
        .hints
        .iter()
        .filter_map(|(key, text)| text.clone().map(|text| (key.clone(), text)))
        .collect();
    LogicBundle {
        rc_evaluator: Arc::new(DictBasedRcEvaluator::new(
            result.requirement_constraints.clone(),
            format,
            version,
        )),
        fc_evaluator: Arc::new(DictBasedFcEvaluator::new(result.format_constraints.clone(), format, version)),
        hints_provider: Arc::new(DictBasedHintsProvider::new(hints)),
        package_resolver: Arc::new(DictBasedPackageResolver::new(result.packages.clone())),
    }
}
