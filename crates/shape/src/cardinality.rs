// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Terminal cardinality shapers

use serde_json::Value as Json;

use crate::error::{ShapeError, ShapeResult};

/// Mirrors the five terminal shapers a query builder exposes
/// (`.all()`, `.one()`, `.maybeOne()`, `.first()`, `.maybeFirst()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    All,
    One,
    MaybeOne,
    First,
    MaybeFirst,
}

/// Applies a terminal shaper's cardinality rule to already-shaped rows.
pub fn enforce(rows: Vec<Json>, cardinality: Cardinality) -> ShapeResult<Json> {
    match cardinality {
        Cardinality::All => Ok(Json::Array(rows)),
        Cardinality::First => rows.into_iter().next().ok_or(ShapeError::EmptyResult),
        Cardinality::MaybeFirst => Ok(rows.into_iter().next().unwrap_or(Json::Null)),
        Cardinality::One => {
            let mut iter = rows.into_iter();
            let first = iter.next().ok_or(ShapeError::EmptyResult)?;
            if iter.next().is_some() {
                return Err(ShapeError::TooManyResults);
            }
            Ok(first)
        }
        Cardinality::MaybeOne => {
            let mut iter = rows.into_iter();
            match iter.next() {
                None => Ok(Json::Null),
                Some(first) => {
                    if iter.next().is_some() {
                        Err(ShapeError::TooManyResults)
                    } else {
                        Ok(first)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Json> {
        (0..n).map(|i| Json::from(i as i64)).collect()
    }

    #[test]
    fn all_wraps_every_row_in_an_array_regardless_of_count() {
        assert_eq!(enforce(rows(0), Cardinality::All).unwrap(), Json::Array(vec![]));
        assert_eq!(enforce(rows(3), Cardinality::All).unwrap(), Json::Array(rows(3)));
    }

    #[test]
    fn one_rejects_zero_and_many() {
        assert_eq!(enforce(rows(0), Cardinality::One), Err(ShapeError::EmptyResult));
        assert_eq!(enforce(rows(2), Cardinality::One), Err(ShapeError::TooManyResults));
        assert_eq!(enforce(rows(1), Cardinality::One), Ok(Json::from(0)));
    }

    #[test]
    fn maybe_one_nulls_on_zero_rejects_many() {
        assert_eq!(enforce(rows(0), Cardinality::MaybeOne), Ok(Json::Null));
        assert_eq!(enforce(rows(2), Cardinality::MaybeOne), Err(ShapeError::TooManyResults));
    }

    #[test]
    fn first_rejects_zero_ignores_extra() {
        assert_eq!(enforce(rows(0), Cardinality::First), Err(ShapeError::EmptyResult));
        assert_eq!(enforce(rows(2), Cardinality::First), Ok(Json::from(0)));
    }

    #[test]
    fn maybe_first_never_raises() {
        assert_eq!(enforce(rows(0), Cardinality::MaybeFirst), Ok(Json::Null));
        assert_eq!(enforce(rows(2), Cardinality::MaybeFirst), Ok(Json::from(0)));
    }
}
