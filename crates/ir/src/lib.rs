// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Rowcraft IR
//!
//! The intermediate representation shared by the rest of the rowcraft
//! crates: expressions, queries, value codecs, identifier generation, and
//! the reconstruction plans that tell `rowcraft-shape` how to fold a flat
//! result set back into nested values.
//!
//! This crate has no knowledge of SQL text, a schema, or a live driver — it
//! is the algebra the other crates are built on top of.

pub mod codec;
pub mod error;
pub mod expr;
pub mod id;
pub mod plan;
pub mod query;

pub use codec::{Codec, CodecKind, Primitive, Value};
pub use error::{CodecError, CodecResult, ExprError, ExprResult};
pub use expr::{AggregateArg, AggregateFn, BinOp, ColumnRef, Expr, External, Literal, UnaryOp};
pub use id::IdGen;
pub use plan::ReconstructionPlan;
pub use query::{Join, JoinKind, OrderDirection, OrderTerm, Projection, Query, Selection, Source};
