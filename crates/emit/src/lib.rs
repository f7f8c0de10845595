// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Rowcraft emit
//!
//! Lowers a [`rowcraft_ir::Query`] (and `rowcraft-schema` DDL/DML intents)
//! into an [`Operation`]: SQL text, a bound parameter map, and — for
//! queries — a [`rowcraft_ir::ReconstructionPlan`] describing how to fold
//! flat rows back into the nested shape the builder asked for (spec §4.6,
//! §5, §6).
//!
//! ## Layout
//!
//! - [`collect`] — step 1: finds shared derived queries by identity and
//!   decides which ones get hoisted to a `WITH` CTE.
//! - [`printer`] — steps 2-7: prints CTEs in topological order, then the
//!   root `SELECT`, building the reconstruction plan in lock-step.
//! - [`dml`] — `CREATE TABLE`/`INSERT`/`UPDATE`/`DELETE` emission.
//! - [`format`] — canonical whitespace normalization (spec §6).
//! - [`operation`] — the [`Operation`]/[`OperationKind`]/[`ParamMap`]
//!   output types.
//! - [`error`] — [`EmitError`].

pub mod collect;
pub mod dml;
pub mod error;
pub mod format;
pub mod operation;
pub mod printer;

pub use collect::CollectedQueries;
pub use dml::{emit_create_table, emit_delete, emit_insert, emit_update, ColumnValue};
pub use error::{EmitError, EmitResult};
pub use format::format_sql;
pub use operation::{Operation, OperationKind, ParamMap};
pub use printer::emit_query;
