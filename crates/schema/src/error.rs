// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for schema construction and DDL emission

use serde::Serialize;
use thiserror::Error;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while declaring a table or assembling a [`crate::Schema`].
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
pub enum SchemaError {
    /// Two columns in the same table share a name.
    #[error("table '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    /// A table was declared with no primary column.
    #[error("table '{table}' has no primary key column")]
    NoPrimaryKey { table: String },

    /// A primary column was also marked nullable.
    #[error("table '{table}' column '{column}' is both primary and nullable")]
    NullablePrimaryKey { table: String, column: String },

    /// Two tables in the same schema share a name.
    #[error("schema already declares a table named '{table}'")]
    DuplicateTable { table: String },

    /// A reference was made to a table the schema does not declare.
    #[error("unknown table '{table}'")]
    UnknownTable { table: String },
}
