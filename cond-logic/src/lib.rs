// cond-logic/src/lib.rs
// ============================================================================
// Module: Condition Logic Root
// Description: Public API surface for the condition-logic subsystem.
// Purpose: Wire together grammars, tree model, algebra, and serde support.
// Dependencies: crate::{ahb_parser, categories, compose, error, fulfilled,
//              indicators, key, node, parser, serde_support, tree}
// ============================================================================

//! ## Overview
//! This crate models AHB condition expressions: a four-valued logic over
//! condition keys, the two grammars that parse handbook strings into binary
//! trees, the composition algebra that reduces evaluated nodes, and the
//! stable JSON tree representations. Content evaluation itself lives behind
//! interfaces in the core crate; this crate is purely about expressions.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod ahb_parser;
pub mod categories;
pub mod compose;
pub mod error;
pub mod fulfilled;
pub mod indicators;
pub mod key;
pub mod node;
pub mod parser;
pub mod serde_support;
pub mod tree;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use ahb_parser::AhbExpression;
pub use ahb_parser::IndicatorExpression;
pub use ahb_parser::parse_ahb_expression;
pub use categories::CategorizedKeyExtract;
pub use compose::combine_residuals;
pub use compose::compose;
pub use compose::merge_hints;
pub use error::ComposeError;
pub use error::ComposeResult;
pub use error::KeyError;
pub use error::ParseError;
pub use fulfilled::Fulfilled;
pub use indicators::ModalMark;
pub use indicators::PrefixOperator;
pub use indicators::RequirementIndicator;
pub use key::ConditionKey;
pub use key::ConditionKeyKind;
pub use node::ConditionNode;
pub use parser::parse_condition_expression;
pub use parser::sanitize_expression;
pub use serde_support::TreeSerdeError;
pub use serde_support::ahb_expression_from_verbose;
pub use serde_support::ahb_expression_to_concise;
pub use serde_support::ahb_expression_to_verbose;
pub use serde_support::condition_tree_from_verbose;
pub use serde_support::condition_tree_to_concise;
pub use serde_support::condition_tree_to_verbose;
pub use tree::CompositionOp;
pub use tree::ConditionTree;
