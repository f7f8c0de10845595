// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! This module represents the expression algebra used in `WHERE`, `SELECT`,
//! `HAVING`, `ON`, `ORDER BY`, and `LIMIT` positions.
//!
//! ## Design
//!
//! [`Expr`] is a tagged sum; complex expressions contain sub-expressions,
//! forming a tree the emitter walks with an explicit writer (see
//! `rowcraft-emit`). Every leaf that produces a SQL value — [`Literal`],
//! [`Expr::External`], and every column reference — carries the
//! [`crate::codec::Codec`] of the value it produces, so the emitter knows
//! how to bind externals and the result shaper knows how to parse results.
//!
//! ## Constructors validate only locally
//!
//! Factory functions are pure and fallible only for shape mistakes the
//! caller controls directly: [`Expr::in_list`] rejects an empty alternative
//! list, [`Expr::json_object`] rejects an empty field list, [`Expr::case`]
//! rejects zero WHEN arms. They do not (and cannot, without a schema)
//! validate that a [`ColumnRef`] actually exists — that is
//! `rowcraft-api`'s job.
//!
//! ## Algebraic identities
//!
//! A handful of identities are applied eagerly at construction, per spec
//! §4.4 ("documented, not aggressively applied"):
//! - [`Expr::in_list`] with exactly one alternative lowers to [`Expr::eq`].
//! - [`Expr::eq`]/[`Expr::not_eq`] against a literal `NULL` operand lower to
//!   `IS NULL`/`IS NOT NULL` rather than `== NULL`/`!= NULL`. Comparing two
//!   operands that are merely *nullable-typed* (not literal `NULL`) still
//!   emits `==`/`!=`, which differs from strict three-valued SQL null
//!   semantics — intentional, for parity with SQLite's inline equality
//!   (spec §9, open question b).

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::codec::{Codec, Value};
use crate::error::{ExprError, ExprResult};
use crate::query::Query;

/// A SQL expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Expr {
    /// Column reference (e.g. `users.id` or the bare `id`).
    Column(ColumnRef),

    /// A literal value, inlined directly into the SQL text.
    Literal(Literal),

    /// A named or positional parameter, bound at statement execution.
    External(External),

    /// Binary operation (`a + b`, `x == 5`, `a AND b`, …).
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Unary operation (`-x`, `NOT a`, `a IS NULL`, …).
    UnaryOp { op: UnaryOp, expr: Box<Expr> },

    /// `arg IN (list...)`.
    InList { arg: Box<Expr>, list: Vec<Expr> },

    /// `arg IN (subquery)`. Holds the subquery by [`Rc`] so that the same
    /// logical subquery reused elsewhere (e.g. as a join source) is
    /// recognized by identity for CTE hoisting (spec §9).
    InSubquery { arg: Box<Expr>, subquery: Rc<Query> },

    /// `arg NOT IN (subquery)`.
    NotInSubquery { arg: Box<Expr>, subquery: Rc<Query> },

    /// An aggregate function call.
    Aggregate {
        func: AggregateFn,
        arg: AggregateArg,
        distinct: bool,
    },

    /// `json_object(k1, v1, k2, v2, …)`.
    JsonObject { pairs: Vec<(String, Expr)> },

    /// `json_group_array(arg)` — an aggregate.
    JsonGroupArray { arg: Box<Expr> },

    /// `CASE WHEN … THEN … [ELSE …] END`.
    Case {
        whens: Vec<(Expr, Expr)>,
        else_branch: Option<Box<Expr>>,
    },

    /// An opaque escape hatch: inlined verbatim, invisible to any rewrite.
    Raw { sql: String },
}

impl Expr {
    pub fn column(column: impl Into<String>) -> Self {
        Expr::Column(ColumnRef::new(column))
    }

    pub fn qualified_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Expr::Column(ColumnRef::new(column).with_table(table))
    }

    pub fn literal(codec: Codec, value: Value) -> Self {
        Expr::Literal(Literal { codec, value })
    }

    pub fn text(value: impl Into<String>) -> Self {
        Expr::literal(Codec::text(), Value::Text(value.into()))
    }

    pub fn integer(value: i64) -> Self {
        Expr::literal(Codec::integer(), Value::Integer(value))
    }

    pub fn real(value: f64) -> Self {
        Expr::literal(Codec::real(), Value::Real(value))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::literal(Codec::boolean(), Value::Boolean(value))
    }

    pub fn date(value: impl Into<String>) -> Self {
        Expr::literal(Codec::date(), Value::Date(value.into()))
    }

    pub fn json(value: serde_json::Value) -> Self {
        Expr::literal(Codec::json(), Value::Json(value))
    }

    pub fn null(codec: Codec) -> Self {
        Expr::literal(codec.nullable(), Value::Null)
    }

    /// A named external (`:label`), or an anonymous one that the emitter
    /// assigns a fresh `:_<id>` slot to if `label` is `None`. The value is
    /// bound immediately; only the parameter *name* is resolved at emit
    /// time (spec §4.4).
    pub fn external(codec: Codec, value: Value, label: Option<impl Into<String>>) -> Self {
        Expr::External(External {
            codec,
            value,
            label: label.map(Into::into),
        })
    }

    fn is_null_literal(&self) -> bool {
        matches!(self, Expr::Literal(Literal { value: Value::Null, .. }))
    }

    /// Polymorphic equality: `IS` against a literal `NULL` operand, `==`
    /// otherwise (spec §4.4).
    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        if rhs.is_null_literal() {
            Expr::UnaryOp {
                op: UnaryOp::IsNull,
                expr: Box::new(lhs),
            }
        } else if lhs.is_null_literal() {
            Expr::UnaryOp {
                op: UnaryOp::IsNull,
                expr: Box::new(rhs),
            }
        } else {
            Expr::BinOp {
                op: BinOp::Eq,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            }
        }
    }

    pub fn not_eq(lhs: Expr, rhs: Expr) -> Self {
        if rhs.is_null_literal() {
            Expr::UnaryOp {
                op: UnaryOp::IsNotNull,
                expr: Box::new(lhs),
            }
        } else if lhs.is_null_literal() {
            Expr::UnaryOp {
                op: UnaryOp::IsNotNull,
                expr: Box::new(rhs),
            }
        } else {
            Expr::BinOp {
                op: BinOp::NotEq,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            }
        }
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Self::bin(BinOp::And, lhs, rhs)
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Self::bin(BinOp::Or, lhs, rhs)
    }

    pub fn concat(lhs: Expr, rhs: Expr) -> Self {
        Self::bin(BinOp::Concat, lhs, rhs)
    }

    fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn not(arg: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOp::Not,
            expr: Box::new(arg),
        }
    }

    pub fn neg(arg: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOp::Neg,
            expr: Box::new(arg),
        }
    }

    pub fn is_null(arg: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOp::IsNull,
            expr: Box::new(arg),
        }
    }

    pub fn is_not_null(arg: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOp::IsNotNull,
            expr: Box::new(arg),
        }
    }

    /// `arg IN (list...)`; a singleton list lowers to [`Expr::eq`] (spec §4.4).
    pub fn in_list(arg: Expr, list: Vec<Expr>) -> ExprResult<Self> {
        if list.is_empty() {
            return Err(ExprError::EmptyInList);
        }
        if list.len() == 1 {
            return Ok(Expr::eq(arg, list.into_iter().next().unwrap()));
        }
        Ok(Expr::InList {
            arg: Box::new(arg),
            list,
        })
    }

    /// Takes the subquery by [`Rc`] so callers who want it hoisted to a
    /// shared CTE can clone the same `Rc` into a join source elsewhere.
    pub fn in_subquery(arg: Expr, subquery: Rc<Query>) -> Self {
        Expr::InSubquery {
            arg: Box::new(arg),
            subquery,
        }
    }

    pub fn not_in_subquery(arg: Expr, subquery: Rc<Query>) -> Self {
        Expr::NotInSubquery {
            arg: Box::new(arg),
            subquery,
        }
    }

    pub fn count_star() -> Self {
        Expr::Aggregate {
            func: AggregateFn::Count,
            arg: AggregateArg::Star,
            distinct: false,
        }
    }

    pub fn aggregate(func: AggregateFn, arg: Expr, distinct: bool) -> Self {
        Expr::Aggregate {
            func,
            arg: AggregateArg::Expr(Box::new(arg)),
            distinct,
        }
    }

    pub fn json_object(pairs: Vec<(impl Into<String>, Expr)>) -> ExprResult<Self> {
        if pairs.is_empty() {
            return Err(ExprError::EmptyJsonObject);
        }
        Ok(Expr::JsonObject {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    pub fn json_group_array(arg: Expr) -> Self {
        Expr::JsonGroupArray { arg: Box::new(arg) }
    }

    pub fn case(whens: Vec<(Expr, Expr)>, else_branch: Option<Expr>) -> ExprResult<Self> {
        if whens.is_empty() {
            return Err(ExprError::EmptyCase);
        }
        Ok(Expr::Case {
            whens,
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw { sql: sql.into() }
    }

    /// `true` if this node is an [`Expr::Aggregate`] or [`Expr::JsonGroupArray`]
    /// (invariant 3: aggregates may only appear in selection/having/order-by
    /// of a grouped query — enforced by `rowcraft-api`, this is the leaf test
    /// it walks the tree with).
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Expr::Aggregate { .. } | Expr::JsonGroupArray { .. })
    }
}

/// Column reference with optional table/alias qualification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub column: String,
}

impl ColumnRef {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn qualified(&self) -> String {
        match &self.table {
            Some(table) => format!("{table}.{}", self.column),
            None => self.column.clone(),
        }
    }
}

/// A literal value, carrying the codec of the value it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub codec: Codec,
    pub value: Value,
}

/// A named or anonymous external parameter. The value is bound at
/// construction time; the emitter only resolves the parameter name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct External {
    pub codec: Codec,
    pub value: Value,
    pub label: Option<String>,
}

/// Binary operators (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BinOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Concat,
}

/// Unary operators (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum UnaryOp {
    Not,
    IsNull,
    IsNotNull,
    Neg,
}

/// Aggregate functions (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AggregateFn {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    GroupConcat,
}

/// The argument to an aggregate: either an expression or the `*` sentinel
/// (`COUNT(*)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregateArg {
    Star,
    Expr(Box<Expr>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_ref_qualifies() {
        let col = ColumnRef::new("id");
        assert_eq!(col.qualified(), "id");
        let qualified = col.with_table("users");
        assert_eq!(qualified.qualified(), "users.id");
    }

    #[test]
    fn eq_against_null_literal_lowers_to_is_null() {
        let expr = Expr::eq(Expr::column("deleted_at"), Expr::null(Codec::date()));
        assert!(matches!(
            expr,
            Expr::UnaryOp {
                op: UnaryOp::IsNull,
                ..
            }
        ));
    }

    #[test]
    fn eq_between_two_nullable_columns_stays_double_equals() {
        let expr = Expr::eq(Expr::column("a"), Expr::column("b"));
        assert!(matches!(expr, Expr::BinOp { op: BinOp::Eq, .. }));
    }

    #[test]
    fn not_eq_against_null_lowers_to_is_not_null() {
        let expr = Expr::not_eq(Expr::column("x"), Expr::null(Codec::integer()));
        assert!(matches!(
            expr,
            Expr::UnaryOp {
                op: UnaryOp::IsNotNull,
                ..
            }
        ));
    }

    #[test]
    fn in_list_rejects_empty() {
        assert_eq!(
            Expr::in_list(Expr::column("id"), vec![]).unwrap_err(),
            ExprError::EmptyInList
        );
    }

    #[test]
    fn in_list_singleton_lowers_to_eq() {
        let expr = Expr::in_list(Expr::column("id"), vec![Expr::integer(1)]).unwrap();
        assert!(matches!(expr, Expr::BinOp { op: BinOp::Eq, .. }));
    }

    #[test]
    fn in_list_multiple_stays_in_list() {
        let expr =
            Expr::in_list(Expr::column("id"), vec![Expr::integer(1), Expr::integer(2)]).unwrap();
        assert!(matches!(expr, Expr::InList { .. }));
    }

    #[test]
    fn count_star_is_aggregate() {
        assert!(Expr::count_star().is_aggregate());
        assert!(!Expr::column("id").is_aggregate());
    }

    #[test]
    fn json_object_rejects_empty_pairs() {
        let pairs: Vec<(&str, Expr)> = vec![];
        assert_eq!(
            Expr::json_object(pairs).unwrap_err(),
            ExprError::EmptyJsonObject
        );
    }

    #[test]
    fn case_rejects_zero_arms() {
        assert_eq!(Expr::case(vec![], None).unwrap_err(), ExprError::EmptyCase);
    }
}
