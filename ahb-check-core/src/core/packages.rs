// ahb-check-core/src/core/packages.rs
// ============================================================================
// Module: Package Expansion
// Description: Replacement of package keys by their condition expressions.
// Purpose: Rewrite `[123P]` leaves using an injected resolver to a fix point.
// Dependencies: futures, thiserror, tracing, cond-logic
// ============================================================================

//! ## Overview
//! Package expansion replaces every package-key leaf of a condition tree by
//! the parsed expression the resolver returns for it, recursively, until no
//! package leaf remains. A key that reappears on its own expansion chain is
//! a cycle; an unresolvable key is an error. Expansion is idempotent on
//! trees without package leaves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use cond_logic::ConditionKeyKind;
use cond_logic::ConditionTree;
use cond_logic::ParseError;
use cond_logic::parse_condition_expression;
use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;
use tracing::debug;

use crate::interfaces::CancellationToken;
use crate::interfaces::EvaluatorError;
use crate::interfaces::PackageResolver;

// ============================================================================
// SECTION: Expansion Errors
// ============================================================================

/// Errors that can occur during package expansion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    /// The resolver does not know the package
    #[error("the package '{key}' cannot be resolved")]
    UnknownPackage {
        /// The unresolvable package key
        key: String,
    },

    /// A package directly or indirectly expands to itself
    #[error("package expansion cycle: {key_path:?}")]
    PackageCycle {
        /// The chain of package keys that closed the cycle
        key_path: Vec<String>,
    },

    /// A resolved expression failed to parse
    #[error("the package '{key}' resolved to an invalid expression")]
    Syntax {
        /// The package whose expression is invalid
        key: String,
        /// The underlying parse failure
        #[source]
        source: ParseError,
    },

    /// The resolver itself failed
    #[error(transparent)]
    Resolver(#[from] EvaluatorError),

    /// The run was cancelled while resolving packages
    #[error("package expansion was cancelled")]
    Cancelled,
}

// ============================================================================
// SECTION: Expansion
// ============================================================================

/// Expands every package leaf of the tree using the resolver
///
/// Returns a fresh tree; the input is never mutated. The depth of the
/// expansion is bounded by the number of distinct package keys because a
/// repeated key on one chain is reported as a cycle.
///
/// # Errors
///
/// Returns [`ExpansionError`] on unknown packages, cycles, unparsable
/// package expressions, resolver failures, or cancellation.
pub async fn expand_packages(
    tree: &ConditionTree,
    resolver: &dyn PackageResolver,
    cancellation: &CancellationToken,
) -> Result<ConditionTree, ExpansionError> {
    let expanded = expand_inner(tree, resolver, cancellation, &mut Vec::new()).await?;
    debug!(size = expanded.size(), "expanded packages");
    Ok(expanded)
}

fn expand_inner<'a>(
    tree: &'a ConditionTree,
    resolver: &'a dyn PackageResolver,
    cancellation: &'a CancellationToken,
    chain: &'a mut Vec<String>,
) -> BoxFuture<'a, Result<ConditionTree, ExpansionError>> {
    async move {
        match tree {
            ConditionTree::Leaf(key) if key.kind() == ConditionKeyKind::Package => {
                if cancellation.is_cancelled() {
                    return Err(ExpansionError::Cancelled);
                }
                if chain.iter().any(|seen| seen == key.as_str()) {
                    let mut key_path = chain.clone();
                    key_path.push(key.as_str().to_owned());
                    return Err(ExpansionError::PackageCycle {
                        key_path,
                    });
                }
                let Some(expression) = resolver.resolve(key).await? else {
                    return Err(ExpansionError::UnknownPackage {
                        key: key.as_str().to_owned(),
                    });
                };
                let parsed =
                    parse_condition_expression(&expression).map_err(|source| ExpansionError::Syntax {
                        key: key.as_str().to_owned(),
                        source,
                    })?;
                debug!(package = %key, expression = %expression, "resolved package");
                chain.push(key.as_str().to_owned());
                let expanded = expand_inner(&parsed, resolver, cancellation, chain).await;
                chain.pop();
                expanded
            }
            ConditionTree::Leaf(_) => Ok(tree.clone()),
            ConditionTree::Composition {
                op,
                left,
                right,
            } => {
                let left = expand_inner(left, resolver, cancellation, chain).await?;
                let right = expand_inner(right, resolver, cancellation, chain).await?;
                Ok(ConditionTree::composition(*op, left, right))
            }
        }
    }
    .boxed()
}
