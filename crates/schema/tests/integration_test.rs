// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests covering a realistic multi-table schema end to end.

use rowcraft_schema::{emit_ddl, Column, DdlOptions, Schema, SchemaError, Table};

fn build_sample_schema() -> Schema {
    let users = Table::declare(
        "users",
        vec![
            Column::integer("id").primary(),
            Column::text("email").unique(),
            Column::date("created_at"),
        ],
    )
    .unwrap();

    let tasks = Table::declare(
        "tasks",
        vec![
            Column::integer("id").primary(),
            Column::integer("user_id"),
            Column::text("title"),
            Column::boolean("done").default_sql("0"),
            Column::date("completed_at").nullable(),
        ],
    )
    .unwrap();

    Schema::new().with_table(users).unwrap().with_table(tasks).unwrap()
}

#[test]
fn sample_schema_round_trips_table_lookup() {
    let schema = build_sample_schema();
    let users = schema.table("users").unwrap();
    assert_eq!(users.primary_columns().len(), 1);
    assert!(users.column("email").unwrap().unique);
}

#[test]
fn unknown_table_surfaces_schema_error() {
    let schema = build_sample_schema();
    assert_eq!(
        schema.table("nonexistent").unwrap_err(),
        SchemaError::UnknownTable {
            table: "nonexistent".to_string()
        }
    );
}

#[test]
fn ddl_emission_covers_every_table_in_declaration_order() {
    let schema = build_sample_schema();
    let ddl = emit_ddl(&schema, DdlOptions::default());
    assert_eq!(ddl.len(), 2);
    assert!(ddl[0].starts_with("CREATE TABLE users"));
    assert!(ddl[1].starts_with("CREATE TABLE tasks"));
    assert!(ddl[1].contains("done INTEGER NOT NULL DEFAULT 0"));
    assert!(ddl[1].contains("completed_at TEXT"));
    assert!(!ddl[1].contains("completed_at TEXT NOT NULL"));
}
