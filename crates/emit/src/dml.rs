// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # DDL/DML emission
//!
//! `CREATE TABLE` delegates straight to `rowcraft-schema`'s DDL printer.
//! `INSERT`/`UPDATE`/`DELETE` follow the same codec-serialize-then-bind
//! discipline as query emission, but never need a [`ReconstructionPlan`] —
//! the driver reports only a row count, so the plan is always
//! [`ReconstructionPlan::scalar`] over an `affected_rows` pseudo-column the
//! caller's driver fills in directly (spec §2b).

use std::collections::HashMap;

use rowcraft_ir::{Codec, IdGen, Primitive, ReconstructionPlan, Value};
use rowcraft_schema::{DdlOptions, Schema};

use crate::error::{EmitError, EmitResult};
use crate::operation::{Operation, OperationKind, ParamMap};

/// Emits one `CREATE TABLE` statement per table in `schema`, in declaration
/// order, joined with blank lines.
pub fn emit_create_table(schema: &Schema, options: DdlOptions) -> Operation {
    let statements = rowcraft_schema::emit_ddl(schema, options);
    Operation {
        kind: OperationKind::CreateTable,
        sql: statements.join("\n\n"),
        params: ParamMap::new(),
        plan: ReconstructionPlan::scalar("affected_rows", Codec::integer()),
    }
}

/// A single column's bound value for an `INSERT`/`UPDATE` statement.
pub struct ColumnValue {
    pub column: String,
    pub value: Value,
}

impl ColumnValue {
    pub fn new(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// `INSERT INTO table (c1, c2) VALUES (:c1, :c2)`.
pub fn emit_insert(
    schema: &Schema,
    table: &str,
    columns: Vec<ColumnValue>,
    id_gen: &IdGen,
) -> EmitResult<Operation> {
    let spec = schema
        .table(table)
        .map_err(|_| EmitError::UnknownTable { table: table.to_string() })?;
    let codecs: HashMap<&str, Codec> = spec.columns.iter().map(|c| (c.name.as_str(), c.codec)).collect();

    let mut params = ParamMap::new();
    let mut names = Vec::with_capacity(columns.len());
    let mut slots = Vec::with_capacity(columns.len());
    for column_value in &columns {
        let codec = *codecs.get(column_value.column.as_str()).ok_or_else(|| EmitError::UnknownTable {
            table: format!("{table}.{}", column_value.column),
        })?;
        let label = id_gen.fresh_id(&column_value.column);
        let primitive = codec.serialize(&column_value.value).map_err(|source| EmitError::CodecError {
            label: label.clone(),
            source,
        })?;
        params.insert_if_absent(label.clone(), primitive);
        names.push(column_value.column.clone());
        slots.push(format!(":{label}"));
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        names.join(", "),
        slots.join(", ")
    );

    Ok(Operation {
        kind: OperationKind::Insert,
        sql,
        params,
        plan: ReconstructionPlan::scalar("affected_rows", Codec::integer()),
    })
}

/// `UPDATE table SET c1 = :c1 WHERE key_column = :key`.
pub fn emit_update(
    schema: &Schema,
    table: &str,
    columns: Vec<ColumnValue>,
    key_column: &str,
    key_value: Value,
    id_gen: &IdGen,
) -> EmitResult<Operation> {
    let spec = schema
        .table(table)
        .map_err(|_| EmitError::UnknownTable { table: table.to_string() })?;
    let codecs: HashMap<&str, Codec> = spec.columns.iter().map(|c| (c.name.as_str(), c.codec)).collect();

    let mut params = ParamMap::new();
    let mut assignments = Vec::with_capacity(columns.len());
    for column_value in &columns {
        let codec = *codecs.get(column_value.column.as_str()).ok_or_else(|| EmitError::UnknownTable {
            table: format!("{table}.{}", column_value.column),
        })?;
        let label = id_gen.fresh_id(&column_value.column);
        let primitive = codec.serialize(&column_value.value).map_err(|source| EmitError::CodecError {
            label: label.clone(),
            source,
        })?;
        params.insert_if_absent(label.clone(), primitive);
        assignments.push(format!("{} = :{label}", column_value.column));
    }

    let key_codec = *codecs.get(key_column).ok_or_else(|| EmitError::UnknownTable {
        table: format!("{table}.{key_column}"),
    })?;
    let key_label = id_gen.fresh_id(key_column);
    let key_primitive = key_codec.serialize(&key_value).map_err(|source| EmitError::CodecError {
        label: key_label.clone(),
        source,
    })?;
    params.insert_if_absent(key_label.clone(), key_primitive);

    let sql = format!(
        "UPDATE {table} SET {} WHERE {key_column} = :{key_label}",
        assignments.join(", ")
    );

    Ok(Operation {
        kind: OperationKind::Update,
        sql,
        params,
        plan: ReconstructionPlan::scalar("affected_rows", Codec::integer()),
    })
}

/// `DELETE FROM table WHERE key_column = :key`.
pub fn emit_delete(
    schema: &Schema,
    table: &str,
    key_column: &str,
    key_value: Value,
    id_gen: &IdGen,
) -> EmitResult<Operation> {
    let spec = schema
        .table(table)
        .map_err(|_| EmitError::UnknownTable { table: table.to_string() })?;
    let key_codec = spec
        .column(key_column)
        .map(|c| c.codec)
        .ok_or_else(|| EmitError::UnknownTable {
            table: format!("{table}.{key_column}"),
        })?;

    let label = id_gen.fresh_id(key_column);
    let mut params = ParamMap::new();
    let primitive = key_codec.serialize(&key_value).map_err(|source| EmitError::CodecError {
        label: label.clone(),
        source,
    })?;
    params.insert_if_absent(label.clone(), primitive);

    Ok(Operation {
        kind: OperationKind::Delete,
        sql: format!("DELETE FROM {table} WHERE {key_column} = :{label}"),
        params,
        plan: ReconstructionPlan::scalar("affected_rows", Codec::integer()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowcraft_schema::{Column, Table};

    fn schema() -> Schema {
        let users = Table::declare(
            "users",
            vec![Column::integer("id").primary(), Column::text("name")],
        )
        .unwrap();
        Schema::new().with_table(users).unwrap()
    }

    #[test]
    fn insert_binds_every_column_as_a_named_parameter() {
        let schema = schema();
        let id_gen = IdGen::deterministic();
        let op = emit_insert(
            &schema,
            "users",
            vec![
                ColumnValue::new("id", Value::Integer(1)),
                ColumnValue::new("name", Value::Text("Ada".into())),
            ],
            &id_gen,
        )
        .unwrap();
        assert!(op.sql.starts_with("INSERT INTO users (id, name) VALUES"));
        assert_eq!(op.params.len(), 2);
    }

    #[test]
    fn update_rejects_unknown_column() {
        let schema = schema();
        let id_gen = IdGen::deterministic();
        let err = emit_update(
            &schema,
            "users",
            vec![ColumnValue::new("ghost", Value::Text("x".into()))],
            "id",
            Value::Integer(1),
            &id_gen,
        );
        assert!(err.is_err());
    }

    #[test]
    fn delete_binds_the_key_column() {
        let schema = schema();
        let id_gen = IdGen::deterministic();
        let op = emit_delete(&schema, "users", "id", Value::Integer(7), &id_gen).unwrap();
        assert!(op.sql.contains("DELETE FROM users WHERE id = :"));
        assert_eq!(op.params.get(&op.sql[op.sql.rfind(':').unwrap() + 1..]), Some(&Primitive::Integer(7)));
    }

    #[test]
    fn create_table_delegates_to_schema_ddl() {
        let schema = schema();
        let op = emit_create_table(&schema, DdlOptions::default());
        assert!(op.sql.contains("CREATE TABLE users"));
        assert_eq!(op.kind, OperationKind::CreateTable);
    }
}
