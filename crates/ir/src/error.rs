// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for the IR layer: value codecs and expression construction.

use serde::Serialize;
use thiserror::Error;

use crate::codec::CodecKind;

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while serializing or parsing a [`crate::codec::Value`]
/// through a [`crate::codec::Codec`].
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
pub enum CodecError {
    /// A non-nullable codec was asked to serialize or parse `NULL`.
    #[error("codec '{codec}' does not accept NULL")]
    UnexpectedNull { codec: CodecKind },

    /// The value's runtime shape does not match what the codec expects.
    #[error("codec '{codec}' cannot accept a {value} value")]
    TypeMismatch {
        codec: CodecKind,
        value: &'static str,
    },

    /// The primitive text could not be parsed into the codec's domain.
    #[error("codec '{codec}' failed to parse value: {message}")]
    Parse { codec: CodecKind, message: String },
}

/// Result type alias for expression construction.
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors raised by [`crate::expr::Expr`] constructors that validate their
/// arguments locally (spec §4.4).
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum ExprError {
    /// `InList` requires a non-empty list of alternatives.
    #[error("IN list must not be empty")]
    EmptyInList,

    /// `JsonObject` requires at least one key/value pair.
    #[error("JSON object literal must have at least one field")]
    EmptyJsonObject,

    /// `Case` requires at least one WHEN/THEN arm.
    #[error("CASE expression must have at least one WHEN arm")]
    EmptyCase,
}
