// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Rowcraft API
//!
//! The public surface: a strongly-typed [`QueryBuilder`] over a
//! [`rowcraft_schema::Schema`] that validates column references as the
//! query is built, lowers to SQL via `rowcraft-emit`, and exposes the
//! driver/row traits a host implements to actually run the statement and
//! feed rows back through `rowcraft-shape` (spec §4.8, §5, §6).

pub mod bag;
pub mod builder;
pub mod driver;
pub mod error;
pub mod operation;

pub use bag::ColumnBag;
pub use builder::{JoinSource, QueryBuilder, SharedQuery};
pub use driver::{Driver, DriverError, RunResult, Statement};
pub use error::{BuilderError, BuilderResult};
pub use operation::PreparedQuery;
pub use rowcraft_shape::Cardinality;
