// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Result-shaping errors

use rowcraft_ir::CodecError;
use serde::Serialize;
use thiserror::Error;

pub type ShapeResult<T> = Result<T, ShapeError>;

/// Errors raised while folding flat driver rows into a nested result, or
/// while enforcing a terminal shaper's cardinality contract.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum ShapeError {
    #[error("expected at least one row, got none")]
    EmptyResult,

    #[error("expected at most one row, got more than one")]
    TooManyResults,

    #[error("failed to parse result column {column}: {source}")]
    CodecError {
        column: String,
        #[source]
        source: CodecError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_a_stable_message() {
        assert_eq!(ShapeError::EmptyResult.to_string(), "expected at least one row, got none");
    }

    #[test]
    fn too_many_results_has_a_stable_message() {
        assert_eq!(
            ShapeError::TooManyResults.to_string(),
            "expected at most one row, got more than one"
        );
    }
}
