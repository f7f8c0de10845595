// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Rowcraft schema
//!
//! Typed table/column declarations that the query builder validates column
//! references against, plus DDL emission for those same declarations.
//!
//! ## Layout
//!
//! - [`schema`] — [`Column`]/[`Table`] builder surface, [`ColumnSpec`],
//!   [`TableSpec`], [`Schema`].
//! - [`ddl`] — pure `CREATE TABLE` emission over a [`Schema`].
//! - [`error`] — [`SchemaError`].

pub mod ddl;
pub mod error;
pub mod schema;

pub use ddl::{emit_ddl, DdlOptions};
pub use error::{SchemaError, SchemaResult};
pub use schema::{Column, ColumnSpec, Schema, Table, TableSpec};
