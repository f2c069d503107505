// ahb-check-core/src/lib.rs
// ============================================================================
// Module: AHB Check Core Library
// Description: Public API surface for the AHB condition check core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime, tooling}
// ============================================================================

//! ## Overview
//! The AHB check core evaluates parsed condition expressions against
//! pluggable content evaluators: packages are expanded, requirement
//! constraints decide whether a field is required, and collected format
//! constraints are checked against the entered text. Everything integrates
//! through explicit interfaces keyed by EDIFACT format and version.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;
pub mod tooling;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::CancellationToken;
pub use interfaces::EvaluatableData;
pub use interfaces::EvaluationContext;
pub use interfaces::EvaluatorError;
pub use interfaces::FcEvaluator;
pub use interfaces::HintsProvider;
pub use interfaces::LogicBundle;
pub use interfaces::LogicRegistry;
pub use interfaces::PackageResolver;
pub use interfaces::RcEvaluator;
pub use interfaces::RegistryError;
pub use interfaces::global_registry;
pub use interfaces::replace_global_registry;
pub use runtime::EvaluationError;
pub use runtime::EvaluationRun;
pub use runtime::engine::AhbEvaluator;
pub use runtime::fc_eval::evaluate_format_constraints;
pub use runtime::rc_eval::evaluate_requirement_constraints;
pub use tooling::DictBasedFcEvaluator;
pub use tooling::DictBasedHintsProvider;
pub use tooling::DictBasedPackageResolver;
pub use tooling::DictBasedRcEvaluator;
pub use tooling::content_evaluation_result_bundle;
