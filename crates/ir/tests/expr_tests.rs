// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the expression algebra.

use rowcraft_ir::{Codec, ColumnRef, Expr, ExprError, Value};

#[test]
fn column_constructors_round_trip_qualification() {
    let bare = Expr::column("id");
    assert_eq!(bare, Expr::Column(ColumnRef::new("id")));

    let qualified = Expr::qualified_column("users", "id");
    assert_eq!(
        qualified,
        Expr::Column(ColumnRef::new("id").with_table("users"))
    );
}

#[test]
fn literal_constructors_carry_the_right_codec() {
    match Expr::integer(42) {
        Expr::Literal(lit) => {
            assert_eq!(lit.codec, Codec::integer());
            assert_eq!(lit.value, Value::Integer(42));
        }
        other => panic!("expected literal, got {other:?}"),
    }
}

#[test]
fn null_uses_a_nullable_codec() {
    match Expr::null(Codec::date()) {
        Expr::Literal(lit) => {
            assert!(lit.codec.is_nullable());
            assert_eq!(lit.value, Value::Null);
        }
        other => panic!("expected literal, got {other:?}"),
    }
}

#[test]
fn equality_against_null_literal_becomes_is_null() {
    let expr = Expr::eq(Expr::column("deleted_at"), Expr::null(Codec::date()));
    assert_eq!(expr, Expr::is_null(Expr::column("deleted_at")));
}

#[test]
fn equality_between_two_columns_stays_binary_eq() {
    let expr = Expr::eq(Expr::column("a"), Expr::column("b"));
    assert_eq!(
        expr,
        Expr::BinOp {
            op: rowcraft_ir::BinOp::Eq,
            lhs: Box::new(Expr::column("a")),
            rhs: Box::new(Expr::column("b")),
        }
    );
}

#[test]
fn in_list_with_two_items_stays_in_list() {
    let expr = Expr::in_list(
        Expr::column("status"),
        vec![Expr::text("open"), Expr::text("closed")],
    )
    .unwrap();
    assert!(matches!(expr, Expr::InList { .. }));
}

#[test]
fn in_list_with_one_item_lowers_to_eq() {
    let expr = Expr::in_list(Expr::column("status"), vec![Expr::text("open")]).unwrap();
    assert_eq!(expr, Expr::eq(Expr::column("status"), Expr::text("open")));
}

#[test]
fn in_list_rejects_empty_alternatives() {
    let err = Expr::in_list(Expr::column("status"), vec![]).unwrap_err();
    assert_eq!(err, ExprError::EmptyInList);
}

#[test]
fn json_object_requires_at_least_one_field() {
    let pairs: Vec<(&str, Expr)> = vec![];
    assert_eq!(Expr::json_object(pairs).unwrap_err(), ExprError::EmptyJsonObject);

    let built = Expr::json_object(vec![("id", Expr::column("id"))]).unwrap();
    assert!(matches!(built, Expr::JsonObject { .. }));
}

#[test]
fn case_requires_at_least_one_when_arm() {
    assert_eq!(
        Expr::case(vec![], Some(Expr::text("fallback"))).unwrap_err(),
        ExprError::EmptyCase
    );

    let built = Expr::case(
        vec![(Expr::eq(Expr::column("x"), Expr::integer(1)), Expr::text("one"))],
        Some(Expr::text("other")),
    )
    .unwrap();
    assert!(matches!(built, Expr::Case { .. }));
}

#[test]
fn aggregate_and_json_group_array_are_recognized_as_aggregates() {
    assert!(Expr::count_star().is_aggregate());
    assert!(Expr::aggregate(rowcraft_ir::AggregateFn::Sum, Expr::column("amount"), false)
        .is_aggregate());
    assert!(Expr::json_group_array(Expr::column("id")).is_aggregate());
    assert!(!Expr::column("id").is_aggregate());
}

#[test]
fn raw_expr_is_opaque_and_not_an_aggregate() {
    let raw = Expr::raw("strftime('%Y', created_at)");
    assert!(!raw.is_aggregate());
}
