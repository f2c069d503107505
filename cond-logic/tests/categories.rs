// cond-logic/tests/categories.rs
// ============================================================================
// Module: Categorized Key Extraction Tests
// Description: Tests for bucketing the keys of a condition tree.
// ============================================================================
//! ## Overview
//! Validates that extraction partitions the keys of a tree into five
//! disjoint, sorted, deduplicated buckets.

mod support;

use std::collections::BTreeSet;

use cond_logic::CategorizedKeyExtract;
use cond_logic::ConditionKey;
use cond_logic::parse_condition_expression;
use support::TestResult;
use support::ensure;

// ============================================================================
// SECTION: Bucketing
// ============================================================================

#[test]
fn test_all_five_buckets() -> TestResult {
    let tree = parse_condition_expression("[2] U [555] U ([901] O [902]) U [123P] U [17Q] U [2000]")?;
    let extract = CategorizedKeyExtract::from_tree(&tree);
    ensure(extract.requirement_constraint_keys == vec![ConditionKey::new("2")?], "RC bucket")?;
    ensure(extract.hint_keys == vec![ConditionKey::new("555")?], "hint bucket")?;
    ensure(
        extract.format_constraint_keys == vec![ConditionKey::new("901")?, ConditionKey::new("902")?],
        "FC bucket",
    )?;
    ensure(extract.package_keys == vec![ConditionKey::new("123P")?], "package bucket")?;
    ensure(
        extract.time_condition_keys == vec![ConditionKey::new("17Q")?, ConditionKey::new("2000")?],
        "time bucket",
    )?;
    Ok(())
}

#[test]
fn test_deduplication_and_numeric_sort() -> TestResult {
    let tree = parse_condition_expression("[12] U [2] U [12] U [102]")?;
    let extract = CategorizedKeyExtract::from_tree(&tree);
    ensure(
        extract.requirement_constraint_keys
            == vec![ConditionKey::new("2")?, ConditionKey::new("12")?, ConditionKey::new("102")?],
        "keys should be deduplicated and sorted numerically",
    )?;
    Ok(())
}

#[test]
fn test_partition_property() -> TestResult {
    let tree = parse_condition_expression("[2] U ([3] O [4])[901] U [555] U [123P]")?;
    let extract = CategorizedKeyExtract::from_tree(&tree);
    let tree_keys: BTreeSet<ConditionKey> = tree.keys().into_iter().cloned().collect();
    let mut bucket_keys: BTreeSet<ConditionKey> = BTreeSet::new();
    let buckets = [
        &extract.hint_keys,
        &extract.format_constraint_keys,
        &extract.requirement_constraint_keys,
        &extract.package_keys,
        &extract.time_condition_keys,
    ];
    for bucket in buckets {
        for key in bucket {
            ensure(bucket_keys.insert(key.clone()), format!("key {key} appears in two buckets"))?;
        }
    }
    ensure(bucket_keys == tree_keys, "the buckets should cover exactly the tree's keys")?;
    ensure(extract.len() == tree_keys.len(), "len should count every bucketed key once")?;
    Ok(())
}

#[test]
fn test_empty_extract() -> TestResult {
    let extract = CategorizedKeyExtract::from_keys([]);
    ensure(extract.is_empty(), "an extract without keys should be empty")?;
    Ok(())
}
