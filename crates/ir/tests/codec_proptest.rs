// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Property-based tests for value codec round-trips.

use proptest::prelude::*;
use rowcraft_ir::{Codec, Value};

proptest! {
    #[test]
    fn integer_round_trips(n: i64) {
        let codec = Codec::integer();
        let primitive = codec.serialize(&Value::Integer(n)).unwrap();
        prop_assert_eq!(codec.parse(&primitive).unwrap(), Value::Integer(n));
    }

    #[test]
    fn text_round_trips(s in ".*") {
        let codec = Codec::text();
        let primitive = codec.serialize(&Value::Text(s.clone())).unwrap();
        prop_assert_eq!(codec.parse(&primitive).unwrap(), Value::Text(s));
    }

    #[test]
    fn boolean_round_trips(b: bool) {
        let codec = Codec::boolean();
        let primitive = codec.serialize(&Value::Boolean(b)).unwrap();
        prop_assert_eq!(codec.parse(&primitive).unwrap(), Value::Boolean(b));
    }

    #[test]
    fn nullable_text_round_trips_null_and_value(s in proptest::option::of(".*")) {
        let codec = Codec::text().nullable();
        let value = match s {
            Some(s) => Value::Text(s),
            None => Value::Null,
        };
        let primitive = codec.serialize(&value).unwrap();
        prop_assert_eq!(codec.parse(&primitive).unwrap(), value);
    }
}
