// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Driver interface (spec §6)
//!
//! A minimal 3-call surface the core consumes but never implements: prepare
//! a statement, run it for its row count (`INSERT`/`UPDATE`/`DELETE`/`CREATE
//! TABLE`), or iterate its rows (`SELECT`). The core does not assume any
//! particular transport or even that the driver is backed by SQLite —
//! `rowcraft-test-utils::MockDriver` and a real `rusqlite`-backed driver
//! both satisfy this trait without the core depending on either.

use rowcraft_emit::ParamMap;
use rowcraft_shape::RowAccess;

use crate::error::BuilderError;

/// Anything a driver implementation can fail with, wrapped so it composes
/// with [`BuilderError`] at the call site.
#[derive(Debug, thiserror::Error)]
#[error("driver error: {0}")]
pub struct DriverError(pub String);

impl From<DriverError> for BuilderError {
    fn from(err: DriverError) -> Self {
        BuilderError::Driver(err.0)
    }
}

/// The outcome of running an `INSERT`/`UPDATE`/`DELETE`/`CREATE TABLE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    pub changes: u64,
    pub last_insert_row_id: Option<i64>,
}

/// A prepared statement bound to its parameter values, ready to run or be
/// iterated for rows.
pub trait Statement {
    type Row: RowAccess;

    fn run(&mut self, params: &ParamMap) -> Result<RunResult, DriverError>;
    fn all(&mut self, params: &ParamMap) -> Result<Vec<Self::Row>, DriverError>;
    fn get(&mut self, params: &ParamMap) -> Result<Option<Self::Row>, DriverError>;
}

/// The collaborator the core hands an [`rowcraft_emit::Operation`]'s SQL
/// text and parameters to, and gets rows or a row count back from.
pub trait Driver {
    type Statement: Statement;

    fn prepare(&self, sql: &str) -> Result<Self::Statement, DriverError>;
}
