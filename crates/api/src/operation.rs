// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Prepared queries
//!
//! `rowcraft-emit::Operation` carries everything a driver needs to run a
//! statement, but not how many rows the caller's terminal shaper expects
//! back — that lives only on the builder side, so it travels separately in
//! [`PreparedQuery`] rather than growing `Operation` with a field the
//! `CREATE TABLE`/`INSERT`/`UPDATE`/`DELETE` variants never use.

use rowcraft_emit::Operation;
use rowcraft_shape::Cardinality;

/// An emitted `Query` paired with the cardinality rule its terminal shaper
/// (`.all()`, `.one()`, …) asked for.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    pub operation: Operation,
    pub cardinality: Cardinality,
}
