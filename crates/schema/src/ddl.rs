// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # DDL emission
//!
//! Prints one `CREATE TABLE` statement per table of a [`Schema`], in
//! declaration order. This is a pure function over already-validated
//! [`TableSpec`]s — no side effects, no connection to a live database.

use rowcraft_ir::CodecKind;

use crate::schema::{ColumnSpec, Schema, TableSpec};

/// Options controlling how [`emit_ddl`] renders each `CREATE TABLE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DdlOptions {
    pub if_not_exists: bool,
    /// Emits SQLite's `STRICT` table option.
    pub strict: bool,
}

/// Emits one `CREATE TABLE` statement per table in `schema`, in declaration
/// order.
pub fn emit_ddl(schema: &Schema, options: DdlOptions) -> Vec<String> {
    schema
        .tables_in_order()
        .map(|table| emit_create_table(table, options))
        .collect()
}

fn emit_create_table(table: &TableSpec, options: DdlOptions) -> String {
    let mut sql = String::from("CREATE TABLE ");
    if options.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&table.name);
    sql.push_str(" (\n");

    let primaries = table.primary_columns();
    let inline_primary = primaries.len() == 1;

    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| emit_column(column, inline_primary))
        .collect();

    if !inline_primary && primaries.len() > 1 {
        let names: Vec<&str> = primaries.iter().map(|c| c.name.as_str()).collect();
        lines.push(format!("  PRIMARY KEY ({})", names.join(", ")));
    }

    sql.push_str(&lines.join(",\n"));
    sql.push_str("\n)");
    if options.strict {
        sql.push_str(" STRICT");
    }
    sql
}

fn emit_column(column: &ColumnSpec, inline_primary: bool) -> String {
    let mut parts = vec![format!("  {} {}", column.name, sql_type(column))];

    if column.primary && inline_primary {
        parts.push("PRIMARY KEY".to_string());
    }
    if column.unique {
        parts.push("UNIQUE".to_string());
    }
    if !column.codec.is_nullable() {
        parts.push("NOT NULL".to_string());
    }
    if let Some(default_sql) = &column.default_sql {
        parts.push(format!("DEFAULT {default_sql}"));
    }

    parts.join(" ")
}

fn sql_type(column: &ColumnSpec) -> &'static str {
    match column.codec.kind() {
        CodecKind::Text => "TEXT",
        CodecKind::Integer => "INTEGER",
        CodecKind::Real => "REAL",
        CodecKind::Boolean => "INTEGER",
        CodecKind::Date => "TEXT",
        CodecKind::Json => "TEXT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Table};

    fn users_schema() -> Schema {
        let users = Table::declare(
            "users",
            vec![
                Column::integer("id").primary(),
                Column::text("name"),
                Column::boolean("active").nullable(),
            ],
        )
        .unwrap();
        Schema::new().with_table(users).unwrap()
    }

    #[test]
    fn emits_one_statement_per_table_in_order() {
        let tasks = Table::declare("tasks", vec![Column::integer("id").primary()]).unwrap();
        let schema = users_schema().with_table(tasks).unwrap();
        let ddl = emit_ddl(&schema, DdlOptions::default());
        assert_eq!(ddl.len(), 2);
        assert!(ddl[0].starts_with("CREATE TABLE users"));
        assert!(ddl[1].starts_with("CREATE TABLE tasks"));
    }

    #[test]
    fn if_not_exists_option_is_respected() {
        let ddl = emit_ddl(
            &users_schema(),
            DdlOptions {
                if_not_exists: true,
                strict: false,
            },
        );
        assert!(ddl[0].starts_with("CREATE TABLE IF NOT EXISTS users"));
    }

    #[test]
    fn strict_option_appends_strict_keyword() {
        let ddl = emit_ddl(
            &users_schema(),
            DdlOptions {
                if_not_exists: false,
                strict: true,
            },
        );
        assert!(ddl[0].trim_end().ends_with("STRICT"));
    }

    #[test]
    fn single_primary_column_is_inlined() {
        let ddl = emit_ddl(&users_schema(), DdlOptions::default());
        assert!(ddl[0].contains("id INTEGER PRIMARY KEY"));
        assert!(!ddl[0].contains("PRIMARY KEY (id)"));
    }

    #[test]
    fn composite_primary_key_is_a_trailing_clause() {
        let user_roles = Table::declare(
            "user_roles",
            vec![
                Column::integer("user_id").primary(),
                Column::integer("role_id").primary(),
            ],
        )
        .unwrap();
        let schema = Schema::new().with_table(user_roles).unwrap();
        let ddl = emit_ddl(&schema, DdlOptions::default());
        assert!(ddl[0].contains("PRIMARY KEY (user_id, role_id)"));
    }

    #[test]
    fn nullable_columns_skip_not_null() {
        let ddl = emit_ddl(&users_schema(), DdlOptions::default());
        assert!(ddl[0].contains("active INTEGER"));
        assert!(!ddl[0].contains("active INTEGER NOT NULL"));
    }

    #[test]
    fn non_nullable_columns_get_not_null() {
        let ddl = emit_ddl(&users_schema(), DdlOptions::default());
        assert!(ddl[0].contains("name TEXT NOT NULL"));
    }
}
