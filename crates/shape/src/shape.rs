// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Row reconstruction
//!
//! Folds a flat [`RowAccess`] row into the nested, typed shape its
//! [`ReconstructionPlan`] describes, then hands the per-row values to
//! [`cardinality::enforce`] for the caller's terminal shaper.

use rowcraft_ir::{CodecError, CodecKind, Primitive, ReconstructionPlan, Value};
use serde_json::Value as Json;

use crate::error::{ShapeError, ShapeResult};
use crate::row::{json_object_to_row, RowAccess};

/// Shapes every row against `plan`, then applies the terminal cardinality
/// rule. This is the single entry point a driver-facing caller needs.
pub fn shape_rows<R: RowAccess>(
    rows: &[R],
    plan: &ReconstructionPlan,
    cardinality: crate::cardinality::Cardinality,
) -> ShapeResult<Json> {
    let shaped = rows
        .iter()
        .map(|row| shape_row(row, plan))
        .collect::<ShapeResult<Vec<_>>>()?;
    crate::cardinality::enforce(shaped, cardinality)
}

/// Shapes a single flat row into a nested JSON value per `plan`.
pub fn shape_row(row: &dyn RowAccess, plan: &ReconstructionPlan) -> ShapeResult<Json> {
    match plan {
        ReconstructionPlan::Scalar { result_column_name, codec } => {
            let primitive = row.get(result_column_name).unwrap_or(Primitive::Null);
            let value = codec.parse(&primitive).map_err(|source| ShapeError::CodecError {
                column: result_column_name.clone(),
                source,
            })?;
            Ok(value_to_json(&value))
        }
        ReconstructionPlan::NestedObject { fields } => {
            let mut object = serde_json::Map::with_capacity(fields.len());
            for (name, field_plan) in fields {
                object.insert(name.clone(), shape_row(row, field_plan)?);
            }
            Ok(Json::Object(object))
        }
        ReconstructionPlan::NestedArray { result_column_name, element_plan } => {
            match row.get(result_column_name) {
                None | Some(Primitive::Null) => Ok(Json::Array(Vec::new())),
                Some(Primitive::Text(raw)) => {
                    let elements: Vec<Json> = serde_json::from_str(&raw).map_err(|err| ShapeError::CodecError {
                        column: result_column_name.clone(),
                        source: CodecError::Parse {
                            codec: CodecKind::Json,
                            message: err.to_string(),
                        },
                    })?;
                    let shaped = elements
                        .iter()
                        .map(|element| {
                            let pseudo_row = json_object_to_row(element);
                            shape_row(&pseudo_row, element_plan)
                        })
                        .collect::<ShapeResult<Vec<_>>>()?;
                    Ok(Json::Array(shaped))
                }
                Some(other) => Err(ShapeError::CodecError {
                    column: result_column_name.clone(),
                    source: CodecError::TypeMismatch {
                        codec: CodecKind::Json,
                        value: primitive_kind_name(&other),
                    },
                }),
            }
        }
        ReconstructionPlan::LeftJoinShape { plan, null_sentinel_columns } => {
            let all_null = !null_sentinel_columns.is_empty()
                && null_sentinel_columns
                    .iter()
                    .all(|column| matches!(row.get(column), None | Some(Primitive::Null)));
            if all_null {
                tracing::debug!(columns = ?null_sentinel_columns, "left join produced no matching row");
                Ok(Json::Null)
            } else {
                shape_row(row, plan)
            }
        }
    }
}

fn primitive_kind_name(primitive: &Primitive) -> &'static str {
    match primitive {
        Primitive::Null => "null",
        Primitive::Integer(_) => "integer",
        Primitive::Real(_) => "real",
        Primitive::Text(_) => "text",
        Primitive::Boolean(_) => "boolean",
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Text(s) => Json::String(s.clone()),
        Value::Integer(i) => Json::from(*i),
        Value::Real(f) => serde_json::Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Date(s) => Json::String(s.clone()),
        Value::Json(v) => v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardinality::Cardinality;
    use crate::row::MapRow;
    use rowcraft_ir::Codec;

    fn scalar_row(id: i64, name: &str) -> MapRow {
        MapRow::new([
            ("id".to_string(), Primitive::Integer(id)),
            ("name".to_string(), Primitive::Text(name.to_string())),
        ])
    }

    fn user_plan() -> ReconstructionPlan {
        ReconstructionPlan::nested_object(vec![
            ("id", ReconstructionPlan::scalar("id", Codec::integer())),
            ("name", ReconstructionPlan::scalar("name", Codec::text())),
        ])
    }

    #[test]
    fn scalar_plan_parses_through_its_codec() {
        let row = scalar_row(1, "Ada");
        let shaped = shape_row(&row, &user_plan()).unwrap();
        assert_eq!(shaped, serde_json::json!({"id": 1, "name": "Ada"}));
    }

    #[test]
    fn all_cardinality_returns_every_row() {
        let rows = vec![scalar_row(1, "Ada"), scalar_row(2, "Grace")];
        let shaped = shape_rows(&rows, &user_plan(), Cardinality::All).unwrap();
        assert_eq!(shaped.as_array().unwrap().len(), 2);
    }

    #[test]
    fn left_join_shape_nulls_out_when_sentinel_columns_are_all_null() {
        let row = MapRow::new([("task_id".to_string(), Primitive::Null)]);
        let plan = ReconstructionPlan::nested_object(vec![(
            "id",
            ReconstructionPlan::scalar("task_id", Codec::integer()),
        )])
        .left_join(vec!["task_id".to_string()]);
        assert_eq!(shape_row(&row, &plan).unwrap(), Json::Null);
    }

    #[test]
    fn left_join_shape_passes_through_when_a_match_exists() {
        let row = MapRow::new([("task_id".to_string(), Primitive::Integer(7))]);
        let plan = ReconstructionPlan::nested_object(vec![(
            "id",
            ReconstructionPlan::scalar("task_id", Codec::integer()),
        )])
        .left_join(vec!["task_id".to_string()]);
        assert_eq!(shape_row(&row, &plan).unwrap(), serde_json::json!({"id": 7}));
    }

    #[test]
    fn nested_array_parses_the_json_group_array_string() {
        let row = MapRow::new([(
            "tasks".to_string(),
            Primitive::Text(r#"[{"id":1},{"id":2}]"#.to_string()),
        )]);
        let plan = ReconstructionPlan::nested_array(
            "tasks",
            ReconstructionPlan::nested_object(vec![("id", ReconstructionPlan::scalar("id", Codec::integer()))]),
        );
        let shaped = shape_row(&row, &plan).unwrap();
        assert_eq!(shaped, serde_json::json!([{"id": 1}, {"id": 2}]));
    }

    #[test]
    fn nested_array_is_empty_when_the_column_is_null() {
        let row = MapRow::new([("tasks".to_string(), Primitive::Null)]);
        let plan = ReconstructionPlan::nested_array(
            "tasks",
            ReconstructionPlan::scalar("id", Codec::integer()),
        );
        assert_eq!(shape_row(&row, &plan).unwrap(), serde_json::json!([]));
    }
}
