// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Column and table specifications
//!
//! A builder surface for declaring a typed table shape: [`Column`] factory
//! functions return a codec-carrying [`ColumnSpec`]; chained `.primary()`,
//! `.unique()`, `.nullable()`, `.default_sql()` refine it. [`Table::declare`]
//! validates the whole column list and produces a [`TableSpec`]; several
//! `TableSpec`s assemble into a [`Schema`] that `rowcraft-api` builds queries
//! against and `rowcraft-emit`'s DDL pass prints `CREATE TABLE` statements
//! from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rowcraft_ir::Codec;

use crate::error::{SchemaError, SchemaResult};

/// A single column's type, codec, and constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub codec: Codec,
    pub primary: bool,
    pub unique: bool,
    pub default_sql: Option<String>,
}

impl ColumnSpec {
    fn new(name: impl Into<String>, codec: Codec) -> Self {
        Self {
            name: name.into(),
            codec,
            primary: false,
            unique: false,
            default_sql: None,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.codec = self.codec.nullable();
        self
    }

    pub fn default_sql(mut self, sql: impl Into<String>) -> Self {
        self.default_sql = Some(sql.into());
        self
    }
}

/// Factory functions for each codec family, mirroring
/// [`rowcraft_ir::Codec`]'s constructors.
pub struct Column;

impl Column {
    pub fn text(name: impl Into<String>) -> ColumnSpec {
        ColumnSpec::new(name, Codec::text())
    }

    pub fn integer(name: impl Into<String>) -> ColumnSpec {
        ColumnSpec::new(name, Codec::integer())
    }

    pub fn real(name: impl Into<String>) -> ColumnSpec {
        ColumnSpec::new(name, Codec::real())
    }

    pub fn boolean(name: impl Into<String>) -> ColumnSpec {
        ColumnSpec::new(name, Codec::boolean())
    }

    pub fn date(name: impl Into<String>) -> ColumnSpec {
        ColumnSpec::new(name, Codec::date())
    }

    pub fn json(name: impl Into<String>) -> ColumnSpec {
        ColumnSpec::new(name, Codec::json())
    }
}

/// A validated table shape: an ordered column list plus the derived primary
/// key set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.primary).collect()
    }
}

pub struct Table;

impl Table {
    /// Validates and declares a single table: column names unique, at least
    /// one primary column, no primary column marked nullable.
    pub fn declare(name: impl Into<String>, columns: Vec<ColumnSpec>) -> SchemaResult<TableSpec> {
        let name = name.into();
        let mut seen = std::collections::HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.clone()) {
                return Err(SchemaError::DuplicateColumn {
                    table: name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        if !columns.iter().any(|c| c.primary) {
            return Err(SchemaError::NoPrimaryKey { table: name });
        }

        for column in &columns {
            if column.primary && column.codec.is_nullable() {
                return Err(SchemaError::NullablePrimaryKey {
                    table: name,
                    column: column.name.clone(),
                });
            }
        }

        Ok(TableSpec { name, columns })
    }

    /// Declares several tables at once from a name-to-columns map, in
    /// iteration order of the input.
    pub fn declare_many(
        tables: Vec<(impl Into<String>, Vec<ColumnSpec>)>,
    ) -> SchemaResult<Vec<TableSpec>> {
        tables
            .into_iter()
            .map(|(name, columns)| Table::declare(name, columns))
            .collect()
    }
}

/// An ordered mapping of table name to [`TableSpec`]. Table names are unique
/// within a schema; declaration order is preserved for DDL emission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    order: Vec<String>,
    tables: BTreeMap<String, TableSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: TableSpec) -> SchemaResult<Self> {
        if self.tables.contains_key(&table.name) {
            return Err(SchemaError::DuplicateTable { table: table.name });
        }
        self.order.push(table.name.clone());
        self.tables.insert(table.name.clone(), table);
        Ok(self)
    }

    pub fn table(&self, name: &str) -> SchemaResult<&TableSpec> {
        self.tables.get(name).ok_or_else(|| SchemaError::UnknownTable {
            table: name.to_string(),
        })
    }

    /// Tables in declaration order, as used by DDL emission.
    pub fn tables_in_order(&self) -> impl Iterator<Item = &TableSpec> {
        self.order.iter().map(move |name| &self.tables[name])
    }
}
