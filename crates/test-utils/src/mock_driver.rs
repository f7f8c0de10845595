// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Mock driver
//!
//! An in-memory, SQL-text-keyed [`rowcraft_api::Driver`] for exercising the
//! builder and shaper without a real database. It is not a SQL engine: it
//! matches a prepared statement's canonically-formatted text against a
//! registry of pre-recorded responses and replays them in FIFO order.
//! Registering a query's rows or row count is the caller's job — the mock
//! never evaluates a `WHERE` clause or executes a join itself.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use rowcraft_emit::{format_sql, ParamMap};
use rowcraft_shape::MapRow;

use rowcraft_api::{Driver, DriverError, RunResult, Statement};

/// One recorded reply to a prepared statement's `run`/`all`/`get` call.
enum MockResponse {
    Rows(Vec<MapRow>),
    Run(RunResult),
    Error(String),
}

type Registry = Rc<RefCell<HashMap<String, VecDeque<MockResponse>>>>;

/// A registry of canned responses, keyed by canonically-formatted SQL text.
#[derive(Clone, Default)]
pub struct MockDriver {
    registry: Registry,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the rows a matching `.all()`/`.get()` call against `sql`
    /// should return, in FIFO order across repeated calls.
    pub fn on(&self, sql: &str, rows: Vec<MapRow>) -> &Self {
        self.push(sql, MockResponse::Rows(rows));
        self
    }

    /// Queues the [`RunResult`] a matching `.run()` call against `sql`
    /// should return.
    pub fn on_run(&self, sql: &str, result: RunResult) -> &Self {
        self.push(sql, MockResponse::Run(result));
        self
    }

    /// Queues a driver-level failure for the next call against `sql`.
    pub fn on_error(&self, sql: &str, message: impl Into<String>) -> &Self {
        self.push(sql, MockResponse::Error(message.into()));
        self
    }

    fn push(&self, sql: &str, response: MockResponse) {
        self.registry
            .borrow_mut()
            .entry(format_sql(sql))
            .or_default()
            .push_back(response);
    }
}

impl Driver for MockDriver {
    type Statement = MockStatement;

    fn prepare(&self, sql: &str) -> Result<MockStatement, DriverError> {
        Ok(MockStatement {
            registry: Rc::clone(&self.registry),
            key: format_sql(sql),
        })
    }
}

/// A prepared statement bound to one key in the driver's registry.
pub struct MockStatement {
    registry: Registry,
    key: String,
}

impl MockStatement {
    fn pop(&mut self) -> Result<MockResponse, DriverError> {
        self.registry
            .borrow_mut()
            .get_mut(&self.key)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| DriverError(format!("no mock response registered for: {}", self.key)))
    }
}

impl Statement for MockStatement {
    type Row = MapRow;

    fn run(&mut self, _params: &ParamMap) -> Result<RunResult, DriverError> {
        match self.pop()? {
            MockResponse::Run(result) => Ok(result),
            MockResponse::Rows(_) => Err(DriverError(format!("{} was registered with rows, not a run result", self.key))),
            MockResponse::Error(message) => Err(DriverError(message)),
        }
    }

    fn all(&mut self, _params: &ParamMap) -> Result<Vec<MapRow>, DriverError> {
        match self.pop()? {
            MockResponse::Rows(rows) => Ok(rows),
            MockResponse::Run(_) => Err(DriverError(format!("{} was registered with a run result, not rows", self.key))),
            MockResponse::Error(message) => Err(DriverError(message)),
        }
    }

    fn get(&mut self, params: &ParamMap) -> Result<Option<MapRow>, DriverError> {
        Ok(self.all(params)?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowcraft_ir::Primitive;

    fn row(id: i64, name: &str) -> MapRow {
        MapRow::new([
            ("id".to_string(), Primitive::Integer(id)),
            ("name".to_string(), Primitive::Text(name.to_string())),
        ])
    }

    #[test]
    fn replays_queued_rows_for_matching_sql() {
        let driver = MockDriver::new();
        driver.on("SELECT id, name FROM users", vec![row(1, "John")]);

        let mut statement = driver.prepare("SELECT id, name FROM users").unwrap();
        let rows = statement.all(&ParamMap::new()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn unregistered_sql_is_a_driver_error() {
        let driver = MockDriver::new();
        let mut statement = driver.prepare("SELECT 1").unwrap();
        assert!(statement.all(&ParamMap::new()).is_err());
    }

    #[test]
    fn responses_drain_in_fifo_order() {
        let driver = MockDriver::new();
        driver.on("SELECT id FROM users", vec![row(1, "John")]);
        driver.on("SELECT id FROM users", vec![row(2, "Jane")]);

        let mut statement = driver.prepare("SELECT id FROM users").unwrap();
        let first = statement.all(&ParamMap::new()).unwrap();
        let second = statement.all(&ParamMap::new()).unwrap();
        assert_eq!(first[0].get("id"), Some(Primitive::Integer(1)));
        assert_eq!(second[0].get("id"), Some(Primitive::Integer(2)));
    }
}
