// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Flat row access
//!
//! A [`ReconstructionPlan`](rowcraft_ir::ReconstructionPlan) is folded over
//! something that can answer "what primitive is under this result-column
//! name". [`RowAccess`] is that minimal surface: a driver's native row type
//! implements it directly, and [`shape`](crate::shape) implements it again
//! over a parsed `NestedArray` element so the same folding code handles both.

use std::collections::HashMap;

use rowcraft_ir::Primitive;

/// Read-only access to one flat row by result-column name.
///
/// Implementations own or borrow whatever representation the driver uses;
/// the shaper only ever asks for primitives by name.
pub trait RowAccess {
    fn get(&self, column: &str) -> Option<Primitive>;
}

/// A row backed by an owned map, used by test drivers and by
/// [`NestedArray`](rowcraft_ir::ReconstructionPlan::NestedArray) elements
/// parsed out of a `json_group_array` column.
#[derive(Debug, Clone, Default)]
pub struct MapRow(HashMap<String, Primitive>);

impl MapRow {
    pub fn new(entries: impl IntoIterator<Item = (String, Primitive)>) -> Self {
        Self(entries.into_iter().collect())
    }
}

impl RowAccess for MapRow {
    fn get(&self, column: &str) -> Option<Primitive> {
        self.0.get(column).cloned()
    }
}

/// Converts one element of a parsed `json_group_array` (a JSON object whose
/// keys are the inner plan's field names) into a [`RowAccess`].
pub(crate) fn json_object_to_row(value: &serde_json::Value) -> MapRow {
    let mut entries = Vec::new();
    if let serde_json::Value::Object(map) = value {
        for (key, v) in map {
            entries.push((key.clone(), json_to_primitive(v)));
        }
    }
    MapRow::new(entries)
}

fn json_to_primitive(value: &serde_json::Value) -> Primitive {
    match value {
        serde_json::Value::Null => Primitive::Null,
        serde_json::Value::Bool(b) => Primitive::Boolean(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Primitive::Integer(i)
            } else {
                Primitive::Real(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Primitive::Text(s.clone()),
        other => Primitive::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_row_returns_cloned_primitives() {
        let row = MapRow::new([("id".to_string(), Primitive::Integer(1))]);
        assert_eq!(row.get("id"), Some(Primitive::Integer(1)));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn json_object_to_row_converts_nested_keys() {
        let value = serde_json::json!({"id": 1, "name": "Ada", "active": true, "tag": null});
        let row = json_object_to_row(&value);
        assert_eq!(row.get("id"), Some(Primitive::Integer(1)));
        assert_eq!(row.get("name"), Some(Primitive::Text("Ada".into())));
        assert_eq!(row.get("active"), Some(Primitive::Boolean(true)));
        assert_eq!(row.get("tag"), Some(Primitive::Null));
    }
}
