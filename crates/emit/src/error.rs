// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for SQL emission.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for emission operations.
pub type EmitResult<T> = Result<T, EmitError>;

/// Errors raised while lowering a [`rowcraft_ir::Query`] into SQL text,
/// parameters, and a reconstruction plan.
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
pub enum EmitError {
    /// A `Source::BaseTable` named a table the schema does not declare.
    #[error("query references unknown table '{table}'")]
    UnknownTable { table: String },

    /// An aggregate expression appeared outside a permitted clause (a
    /// selection/having/order-by of a grouped query).
    #[error("aggregate expression used outside SELECT/HAVING/ORDER BY of a grouped query: {node}")]
    IllegalAggregate { node: String },

    /// A value failed to serialize through its codec while being bound as a
    /// parameter.
    #[error("failed to bind parameter '{label}': {source}")]
    CodecError {
        label: String,
        #[source]
        source: rowcraft_ir::CodecError,
    },

    /// A `Star` selection was requested over a source that is not a single
    /// base table (e.g. a derived query), which has no schema to expand.
    #[error("SELECT * is only supported over a base table, found {source_kind}")]
    StarOverNonBaseTable { source_kind: String },
}
