// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Rowcraft test utilities
//!
//! Sample schema and data fixtures, a canonical-SQL assertion helper, and an
//! in-memory mock driver shared by the scenario tests under the repository
//! root `tests/` directory and by the crates' own unit tests.

pub mod assertions;
pub mod fixtures;
pub mod mock_driver;

pub use assertions::assert_sql_eq;
pub use fixtures::{sample_join_rows, sample_schema, sample_tasks, sample_users};
pub use mock_driver::{MockDriver, MockStatement};
