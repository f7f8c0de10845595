// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Rowcraft shape
//!
//! Folds the flat rows a driver returns back into the nested, typed shape a
//! query's projection described, following the
//! [`rowcraft_ir::ReconstructionPlan`] that `rowcraft-emit` built alongside
//! the SQL text, and enforces the terminal shaper's cardinality contract
//! (spec §4.7, §4.5).

pub mod cardinality;
pub mod error;
pub mod row;
pub mod shape;

pub use cardinality::{enforce as enforce_cardinality, Cardinality};
pub use error::{ShapeError, ShapeResult};
pub use row::{MapRow, RowAccess};
pub use shape::{shape_row, shape_rows};
