// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Operation
//!
//! The serializable record a driver executes: SQL text, a parameter map,
//! and (for queries) a [`ReconstructionPlan`] describing how to fold the
//! driver's flat rows back into nested values (spec §6).

use serde::{Deserialize, Serialize};

use rowcraft_ir::{Primitive, ReconstructionPlan};

/// What kind of statement an [`Operation`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OperationKind {
    Query,
    CreateTable,
    Insert,
    Update,
    Delete,
}

/// An ordered label → value parameter map. Insertion order equals first-use
/// order in the emitted SQL (spec §4.6, §5 "Ordering guarantees").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap {
    entries: Vec<(String, Primitive)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new entry if `label` has not been seen before. Returns
    /// whether this was a first use.
    pub fn insert_if_absent(&mut self, label: impl Into<String>, value: Primitive) -> bool {
        let label = label.into();
        if self.entries.iter().any(|(k, _)| *k == label) {
            false
        } else {
            self.entries.push((label, value));
            true
        }
    }

    pub fn get(&self, label: &str) -> Option<&Primitive> {
        self.entries.iter().find(|(k, _)| k == label).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Primitive)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The result of emitting one `rowcraft-ir` operation: SQL text ready to
/// hand to a driver, its bound parameters, and (for queries) the plan to
/// reshape returned rows with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub sql: String,
    pub params: ParamMap,
    pub plan: ReconstructionPlan,
}
