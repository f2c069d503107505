// cond-logic/src/categories.rs
// ============================================================================
// Module: Categorized Key Extraction
// Description: Classification of the keys contained in a condition tree.
// Purpose: Answer which inputs a content evaluation of a tree would need.
// Dependencies: serde, crate::{key, tree}
// ============================================================================

//! ## Overview
//! Walks a parsed condition tree and buckets its keys into five disjoint,
//! sorted sets. Callers use the extract to pre-compute content-evaluation
//! inputs or to decide which packages still need resolving.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::key::ConditionKey;
use crate::key::ConditionKeyKind;
use crate::tree::ConditionTree;

// ============================================================================
// SECTION: Categorized Key Extract
// ============================================================================

/// The condition keys of an expression, bucketed by kind
///
/// # Invariants
/// - The five sets are pairwise disjoint (keys classify by form).
/// - Within each set, keys are deduplicated and sorted ascending by their
///   numeric part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedKeyExtract {
    /// Keys for which hint texts are needed
    pub hint_keys: Vec<ConditionKey>,
    /// Keys for which evaluated format constraints are needed
    pub format_constraint_keys: Vec<ConditionKey>,
    /// Keys for which requirement-constraint values are needed
    pub requirement_constraint_keys: Vec<ConditionKey>,
    /// Package keys that still need resolving
    pub package_keys: Vec<ConditionKey>,
    /// Time-condition keys; currently evaluated as neutral
    pub time_condition_keys: Vec<ConditionKey>,
}

impl CategorizedKeyExtract {
    /// Buckets all keys of the given tree
    #[must_use]
    pub fn from_tree(tree: &ConditionTree) -> Self {
        Self::from_keys(tree.keys().into_iter().cloned())
    }

    /// Buckets the given keys
    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = ConditionKey>) -> Self {
        let mut extract = Self::default();
        for key in keys {
            match key.kind() {
                ConditionKeyKind::Hint => extract.hint_keys.push(key),
                ConditionKeyKind::FormatConstraint => extract.format_constraint_keys.push(key),
                ConditionKeyKind::RequirementConstraint => {
                    extract.requirement_constraint_keys.push(key);
                }
                ConditionKeyKind::Package => extract.package_keys.push(key),
                ConditionKeyKind::TimeCondition => extract.time_condition_keys.push(key),
            }
        }
        extract.sanitize();
        extract
    }

    /// Removes duplicates and sorts every bucket
    pub fn sanitize(&mut self) {
        for bucket in [
            &mut self.hint_keys,
            &mut self.format_constraint_keys,
            &mut self.requirement_constraint_keys,
            &mut self.package_keys,
            &mut self.time_condition_keys,
        ] {
            bucket.sort_by_key(|key| (key.numeric(), key.as_str().to_owned()));
            bucket.dedup();
        }
    }

    /// Returns the total number of keys across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.hint_keys.len()
            + self.format_constraint_keys.len()
            + self.requirement_constraint_keys.len()
            + self.package_keys.len()
            + self.time_condition_keys.len()
    }

    /// Returns true when no bucket contains a key
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
