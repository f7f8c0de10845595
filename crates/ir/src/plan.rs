// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Reconstruction plans
//!
//! `rowcraft-emit` builds a [`ReconstructionPlan`] in lock-step with the SQL
//! text it prints: every leaf names the result-column a scalar value comes
//! back under and the [`crate::codec::Codec`] to parse it with, while
//! [`ReconstructionPlan::NestedObject`]/[`ReconstructionPlan::NestedArray`]
//! describe how `rowcraft-shape` should fold flat result rows (or, for
//! aggregated arrays, a single JSON-text column) back into the nested shape
//! the builder's projection described (spec §5, §4.6).

use serde::{Deserialize, Serialize};

/// Describes how a single projected field is reconstructed from the raw
/// driver result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReconstructionPlan {
    /// A column comes back as-is under `result_column_name` and is parsed
    /// with `codec`.
    Scalar {
        result_column_name: String,
        codec: crate::codec::Codec,
    },

    /// A set of named sub-fields, each with its own plan, assembled into one
    /// nested object per row.
    NestedObject { fields: Vec<(String, ReconstructionPlan)> },

    /// A `json_group_array(json_object(...))` aggregate: the driver returns
    /// one JSON-text column that `rowcraft-shape` parses, then re-applies
    /// `element_plan` to each decoded array element.
    NestedArray {
        result_column_name: String,
        element_plan: Box<ReconstructionPlan>,
    },

    /// Wraps a plan produced on the non-preserved side of a `LEFT JOIN`: if
    /// every column the inner plan reads from is `NULL` for a given row, the
    /// shaper yields `None` for the whole subtree rather than a
    /// partially-populated object (spec §4.6, §9 design note on left-join
    /// null propagation).
    LeftJoinShape {
        plan: Box<ReconstructionPlan>,
        /// Result-column names the shaper checks to detect an unmatched
        /// outer row; typically the primary-key column(s) of the joined
        /// table.
        null_sentinel_columns: Vec<String>,
    },
}

impl ReconstructionPlan {
    pub fn scalar(result_column_name: impl Into<String>, codec: crate::codec::Codec) -> Self {
        ReconstructionPlan::Scalar {
            result_column_name: result_column_name.into(),
            codec,
        }
    }

    pub fn nested_object(fields: Vec<(impl Into<String>, ReconstructionPlan)>) -> Self {
        ReconstructionPlan::NestedObject {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn nested_array(result_column_name: impl Into<String>, element_plan: ReconstructionPlan) -> Self {
        ReconstructionPlan::NestedArray {
            result_column_name: result_column_name.into(),
            element_plan: Box::new(element_plan),
        }
    }

    pub fn left_join(self, null_sentinel_columns: Vec<String>) -> Self {
        ReconstructionPlan::LeftJoinShape {
            plan: Box::new(self),
            null_sentinel_columns,
        }
    }

    /// All result-column names this plan reads from, depth-first. Used by
    /// `rowcraft-shape` to evaluate a [`ReconstructionPlan::LeftJoinShape`]'s
    /// null-sentinel check without re-walking the whole tree.
    pub fn result_column_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_result_column_names(&mut names);
        names
    }

    fn collect_result_column_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ReconstructionPlan::Scalar {
                result_column_name, ..
            } => out.push(result_column_name),
            ReconstructionPlan::NestedObject { fields } => {
                for (_, plan) in fields {
                    plan.collect_result_column_names(out);
                }
            }
            ReconstructionPlan::NestedArray {
                result_column_name, ..
            } => out.push(result_column_name),
            ReconstructionPlan::LeftJoinShape { plan, .. } => {
                plan.collect_result_column_names(out);
            }
        }
    }
}
