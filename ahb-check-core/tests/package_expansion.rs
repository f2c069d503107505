// ahb-check-core/tests/package_expansion.rs
// ============================================================================
// Module: Package Expansion Tests
// Description: Tests for rewriting package keys into their expressions.
// ============================================================================
//! ## Overview
//! Validates substitution, nesting, idempotence, and the failure modes of
//! package expansion.

mod support;

use std::collections::BTreeMap;

use ahb_check_core::CancellationToken;
use ahb_check_core::DictBasedPackageResolver;
use ahb_check_core::ExpansionError;
use ahb_check_core::expand_packages;
use cond_logic::parse_condition_expression;
use support::TestResult;
use support::ensure;

fn resolver(entries: &[(&str, &str)]) -> DictBasedPackageResolver {
    let packages: BTreeMap<String, String> =
        entries.iter().map(|(key, value)| ((*key).to_owned(), (*value).to_owned())).collect();
    DictBasedPackageResolver::new(packages)
}

// ============================================================================
// SECTION: Substitution
// ============================================================================

#[tokio::test]
async fn test_simple_substitution() -> TestResult {
    let tree = parse_condition_expression("[1] U [123P]")?;
    let resolver = resolver(&[("123P", "[2] O [3]")]);
    let expanded = expand_packages(&tree, &resolver, &CancellationToken::new()).await?;
    let expected = parse_condition_expression("[1] U ([2] O [3])")?;
    ensure(expanded == expected, format!("unexpected expansion: {expanded}"))?;
    Ok(())
}

#[tokio::test]
async fn test_nested_packages() -> TestResult {
    let tree = parse_condition_expression("[10P]")?;
    let resolver = resolver(&[("10P", "[1] U [20P]"), ("20P", "[2]")]);
    let expanded = expand_packages(&tree, &resolver, &CancellationToken::new()).await?;
    let expected = parse_condition_expression("[1] U [2]")?;
    ensure(expanded == expected, format!("unexpected expansion: {expanded}"))?;
    ensure(!expanded.contains_package(), "no package leaf may survive expansion")?;
    Ok(())
}

#[tokio::test]
async fn test_expansion_is_idempotent() -> TestResult {
    let tree = parse_condition_expression("[1] U [123P]")?;
    let resolver = resolver(&[("123P", "[2] O [3]")]);
    let token = CancellationToken::new();
    let once = expand_packages(&tree, &resolver, &token).await?;
    let twice = expand_packages(&once, &resolver, &token).await?;
    ensure(once == twice, "expanding an expanded tree should change nothing")?;
    Ok(())
}

// ============================================================================
// SECTION: Failure Modes
// ============================================================================

#[tokio::test]
async fn test_unknown_package() -> TestResult {
    let tree = parse_condition_expression("[99P]")?;
    let resolver = resolver(&[]);
    let error = expand_packages(&tree, &resolver, &CancellationToken::new()).await;
    match error {
        Err(ExpansionError::UnknownPackage {
            key,
        }) => ensure(key == "99P", "the unknown key should be named"),
        other => ensure(false, format!("expected unknown-package error, got {other:?}")),
    }
}

#[tokio::test]
async fn test_direct_cycle() -> TestResult {
    let tree = parse_condition_expression("[7P]")?;
    let resolver = resolver(&[("7P", "[1] U [7P]")]);
    let error = expand_packages(&tree, &resolver, &CancellationToken::new()).await;
    match error {
        Err(ExpansionError::PackageCycle {
            key_path,
        }) => ensure(key_path == vec!["7P".to_owned(), "7P".to_owned()], format!("unexpected path: {key_path:?}")),
        other => ensure(false, format!("expected cycle error, got {other:?}")),
    }
}

#[tokio::test]
async fn test_indirect_cycle() -> TestResult {
    let tree = parse_condition_expression("[7P]")?;
    let resolver = resolver(&[("7P", "[8P]"), ("8P", "[7P]")]);
    let error = expand_packages(&tree, &resolver, &CancellationToken::new()).await;
    ensure(
        matches!(error, Err(ExpansionError::PackageCycle { .. })),
        format!("expected cycle error, got {error:?}"),
    )?;
    Ok(())
}

#[tokio::test]
async fn test_invalid_package_expression() -> TestResult {
    let tree = parse_condition_expression("[7P]")?;
    let resolver = resolver(&[("7P", "[1] U")]);
    let error = expand_packages(&tree, &resolver, &CancellationToken::new()).await;
    ensure(
        matches!(error, Err(ExpansionError::Syntax { .. })),
        format!("expected syntax error, got {error:?}"),
    )?;
    Ok(())
}

#[tokio::test]
async fn test_cancelled_expansion() -> TestResult {
    let tree = parse_condition_expression("[7P]")?;
    let resolver = resolver(&[("7P", "[1]")]);
    let token = CancellationToken::new();
    token.cancel();
    let error = expand_packages(&tree, &resolver, &token).await;
    ensure(
        matches!(error, Err(ExpansionError::Cancelled)),
        format!("expected cancellation, got {error:?}"),
    )?;
    Ok(())
}
