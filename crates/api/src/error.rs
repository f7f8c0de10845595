// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query-builder errors

use rowcraft_emit::EmitError;
use rowcraft_ir::ExprError;
use serde::Serialize;
use thiserror::Error;

pub type BuilderResult<T> = Result<T, BuilderError>;

/// Errors raised while constructing or emitting a query through the public
/// builder surface. Construction-time mistakes (an unknown column, an
/// aggregate in a disallowed position) are raised at the call that
/// introduced them, not deferred to emission.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum BuilderError {
    #[error("unknown column reference: {column}")]
    UnknownColumn { column: String },

    #[error("aggregate expression not permitted here: {node}")]
    IllegalAggregate { node: String },

    #[error("having is only permitted on a grouped query (call group_by first)")]
    HavingWithoutGroupBy,

    #[error("unknown table: {table}")]
    UnknownTable { table: String },

    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("driver error: {0}")]
    Driver(String),
}
