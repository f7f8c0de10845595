// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Value codecs
//!
//! A codec describes how an application-level [`Value`] maps to a single SQL
//! cell — a [`Primitive`] that the driver can bind as a parameter or hand
//! back as a result column. Every [`crate::expr::Expr`] that can appear in a
//! projection, and every [`crate::expr::Expr::External`], carries a [`Codec`]
//! so the emitter knows how to bind it and the result shaper knows how to
//! parse it back.
//!
//! ## Standard codecs
//!
//! - `text`, `integer`, `real` map directly onto the matching [`Primitive`].
//! - `boolean` serializes `false -> 0`, `true -> 1` and only parses `0`/`1`.
//! - `date` serializes to ISO-8601 UTC text and parses by strict ISO-8601.
//! - `json` serializes to canonical JSON text and parses with a tolerant
//!   JSON parser (anything `json_object`/`json_group_array` can produce).
//!
//! Every codec has a `nullable` flag; a nullable codec accepts and produces
//! [`Value::Null`] in addition to its normal domain.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CodecError;

/// The family of SQL cell a codec maps to or from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecKind {
    Text,
    Integer,
    Real,
    Boolean,
    Date,
    Json,
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecKind::Text => "text",
            CodecKind::Integer => "integer",
            CodecKind::Real => "real",
            CodecKind::Boolean => "boolean",
            CodecKind::Date => "date",
            CodecKind::Json => "json",
        };
        f.write_str(name)
    }
}

/// A `(name, serialize, parse, nullable)` description of how a value maps to
/// a SQL cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Codec {
    kind: CodecKind,
    nullable: bool,
}

impl Codec {
    pub const fn text() -> Self {
        Self {
            kind: CodecKind::Text,
            nullable: false,
        }
    }

    pub const fn integer() -> Self {
        Self {
            kind: CodecKind::Integer,
            nullable: false,
        }
    }

    pub const fn real() -> Self {
        Self {
            kind: CodecKind::Real,
            nullable: false,
        }
    }

    pub const fn boolean() -> Self {
        Self {
            kind: CodecKind::Boolean,
            nullable: false,
        }
    }

    pub const fn date() -> Self {
        Self {
            kind: CodecKind::Date,
            nullable: false,
        }
    }

    pub const fn json() -> Self {
        Self {
            kind: CodecKind::Json,
            nullable: false,
        }
    }

    /// Returns a nullable variant of this codec, accepting and producing
    /// [`Value::Null`] alongside its normal domain.
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn kind(&self) -> CodecKind {
        self.kind
    }

    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// `T -> primitive`, per spec §4.2.
    pub fn serialize(&self, value: &Value) -> Result<Primitive, CodecError> {
        if matches!(value, Value::Null) {
            return if self.nullable {
                Ok(Primitive::Null)
            } else {
                Err(CodecError::UnexpectedNull { codec: self.kind })
            };
        }

        match (self.kind, value) {
            (CodecKind::Text, Value::Text(s)) => Ok(Primitive::Text(s.clone())),
            (CodecKind::Integer, Value::Integer(n)) => Ok(Primitive::Integer(*n)),
            (CodecKind::Real, Value::Real(n)) => Ok(Primitive::Real(*n)),
            (CodecKind::Boolean, Value::Boolean(b)) => {
                Ok(Primitive::Integer(if *b { 1 } else { 0 }))
            }
            (CodecKind::Date, Value::Date(s)) => {
                validate_iso8601(s)?;
                Ok(Primitive::Text(s.clone()))
            }
            (CodecKind::Json, Value::Json(v)) => {
                let text = serde_json::to_string(v).map_err(|e| CodecError::Parse {
                    codec: self.kind,
                    message: e.to_string(),
                })?;
                Ok(Primitive::Text(text))
            }
            (kind, other) => Err(CodecError::TypeMismatch {
                codec: kind,
                value: other.kind_name(),
            }),
        }
    }

    /// `primitive -> T`, per spec §4.2. Fails with [`CodecError`] on
    /// unparseable input.
    pub fn parse(&self, primitive: &Primitive) -> Result<Value, CodecError> {
        if matches!(primitive, Primitive::Null) {
            return if self.nullable {
                Ok(Value::Null)
            } else {
                Err(CodecError::UnexpectedNull { codec: self.kind })
            };
        }

        match (self.kind, primitive) {
            (CodecKind::Text, Primitive::Text(s)) => Ok(Value::Text(s.clone())),
            (CodecKind::Integer, Primitive::Integer(n)) => Ok(Value::Integer(*n)),
            (CodecKind::Real, Primitive::Real(n)) => Ok(Value::Real(*n)),
            (CodecKind::Real, Primitive::Integer(n)) => Ok(Value::Real(*n as f64)),
            (CodecKind::Boolean, Primitive::Integer(0)) => Ok(Value::Boolean(false)),
            (CodecKind::Boolean, Primitive::Integer(1)) => Ok(Value::Boolean(true)),
            (CodecKind::Boolean, Primitive::Boolean(b)) => Ok(Value::Boolean(*b)),
            (CodecKind::Date, Primitive::Text(s)) => {
                validate_iso8601(s)?;
                Ok(Value::Date(s.clone()))
            }
            (CodecKind::Json, Primitive::Text(s)) => {
                let value: serde_json::Value =
                    serde_json::from_str(s).map_err(|e| CodecError::Parse {
                        codec: self.kind,
                        message: e.to_string(),
                    })?;
                Ok(Value::Json(value))
            }
            (kind, other) => Err(CodecError::TypeMismatch {
                codec: kind,
                value: other.kind_name(),
            }),
        }
    }
}

fn validate_iso8601(s: &str) -> Result<(), CodecError> {
    // Strict-enough ISO-8601 check: `YYYY-MM-DDTHH:MM:SS` with an optional
    // fractional part and `Z`/offset suffix. We do not pull in a date/time
    // crate for this — the core never performs date arithmetic, it only
    // round-trips the text the host application already produced.
    let bytes = s.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let valid = s.len() >= 19
        && (0..4).all(digit_at)
        && bytes[4] == b'-'
        && (5..7).all(digit_at)
        && bytes[7] == b'-'
        && (8..10).all(digit_at)
        && (bytes[10] == b'T' || bytes[10] == b' ')
        && (11..13).all(digit_at)
        && bytes[13] == b':'
        && (14..16).all(digit_at)
        && bytes[16] == b':'
        && (17..19).all(digit_at);
    if valid {
        Ok(())
    } else {
        Err(CodecError::Parse {
            codec: CodecKind::Date,
            message: format!("'{s}' is not a valid ISO-8601 timestamp"),
        })
    }
}

/// The SQL cell value a [`Codec`] serializes to and parses from, and the
/// shape rows take on the wire between core and driver (spec §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
}

impl Primitive {
    fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Integer(_) => "integer",
            Primitive::Real(_) => "real",
            Primitive::Text(_) => "text",
            Primitive::Boolean(_) => "boolean",
        }
    }
}

/// An application-level value produced or consumed through a [`Codec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    /// ISO-8601 text, already formatted by the host application.
    Date(String),
    Json(serde_json::Value),
}

impl Value {
    fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
            Value::Json(_) => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_serializes_to_zero_or_one() {
        let c = Codec::boolean();
        assert_eq!(
            c.serialize(&Value::Boolean(true)).unwrap(),
            Primitive::Integer(1)
        );
        assert_eq!(
            c.serialize(&Value::Boolean(false)).unwrap(),
            Primitive::Integer(0)
        );
    }

    #[test]
    fn boolean_parses_only_zero_or_one() {
        let c = Codec::boolean();
        assert_eq!(
            c.parse(&Primitive::Integer(1)).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            c.parse(&Primitive::Integer(0)).unwrap(),
            Value::Boolean(false)
        );
        assert!(c.parse(&Primitive::Integer(2)).is_err());
    }

    #[test]
    fn nullable_codec_round_trips_null() {
        let c = Codec::text().nullable();
        let p = c.serialize(&Value::Null).unwrap();
        assert_eq!(p, Primitive::Null);
        assert_eq!(c.parse(&p).unwrap(), Value::Null);
    }

    #[test]
    fn non_nullable_codec_rejects_null() {
        let c = Codec::text();
        assert!(c.serialize(&Value::Null).is_err());
        assert!(c.parse(&Primitive::Null).is_err());
    }

    #[test]
    fn json_round_trips_through_canonical_text() {
        let c = Codec::json();
        let value = Value::Json(serde_json::json!({"a": 1, "b": [1, 2, 3]}));
        let primitive = c.serialize(&value).unwrap();
        assert_eq!(c.parse(&primitive).unwrap(), value);
    }

    #[test]
    fn date_requires_strict_iso8601() {
        let c = Codec::date();
        assert!(c.serialize(&Value::Date("2024-01-01T00:00:00Z".into())).is_ok());
        assert!(c.serialize(&Value::Date("not-a-date".into())).is_err());
    }

    #[test]
    fn codec_rejects_mismatched_value_kind() {
        let c = Codec::integer();
        assert!(matches!(
            c.serialize(&Value::Text("x".into())),
            Err(CodecError::TypeMismatch { .. })
        ));
    }
}
