// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query representation
//!
//! [`Query`] is the composable unit of the builder: every chain method on
//! `rowcraft-api`'s `QueryBuilder` returns a fresh, immutable `Query` wrapping
//! the previous one's source, so queries nest as SQLite subqueries/CTEs
//! naturally would (spec §4.1).
//!
//! ## Identity-based sharing
//!
//! Each `Query` carries an [`Query::identity`] token, assigned once at
//! construction by the [`crate::id::IdGen`] the builder session owns. Two
//! `Query` values built independently — even if structurally identical — get
//! distinct identities; a `Query` that is `.clone()`d keeps the same one.
//! `rowcraft-emit`'s collect pass uses this token, not structural equality, to
//! decide whether two appearances of "the same" subquery in a tree should
//! share one hoisted CTE. Per spec §9 (open question), this release does
//! *not* dedupe structurally-identical-but-independently-built subqueries —
//! only genuinely shared (`Rc`/clone-derived) ones collapse.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::expr::{ColumnRef, Expr};

/// A fully-formed SELECT query: a source, its filters/grouping/ordering, and
/// a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Stable identity for CTE-sharing detection (spec §9). Not SQL; never
    /// emitted directly.
    pub identity: u64,
    pub source: Source,
    pub joins: Vec<Join>,
    pub selection: Selection,
    pub filter: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub order_by: Vec<OrderTerm>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

impl Query {
    pub fn new(identity: u64, source: Source) -> Self {
        Self {
            identity,
            source,
            joins: Vec::new(),
            selection: Selection::Star,
            filter: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_filter(mut self, filter: Expr) -> Self {
        self.filter = Some(match self.filter {
            Some(existing) => Expr::and(existing, filter),
            None => filter,
        });
        self
    }

    pub fn with_join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn with_group_by(mut self, columns: Vec<Expr>) -> Self {
        self.group_by = columns;
        self
    }

    pub fn with_having(mut self, having: Expr) -> Self {
        self.having = Some(having);
        self
    }

    pub fn with_order_by(mut self, terms: Vec<OrderTerm>) -> Self {
        self.order_by = terms;
        self
    }

    pub fn with_limit(mut self, limit: Expr) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: Expr) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_grouped(&self) -> bool {
        !self.group_by.is_empty()
    }
}

/// Where a query's rows come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Source {
    /// A named base table or view, as declared in `rowcraft-schema`.
    BaseTable(String),

    /// A nested query, sharing the identity-token scheme described on
    /// [`Query`]. `alias` is the qualifier the builder assigned when
    /// constructing the column bag for this occurrence. `promoted` records
    /// whether the caller explicitly requested CTE hoisting (`queryFrom`);
    /// the emitter's collect pass ORs this with its own ref-count and
    /// in-subquery-usage rules (spec §4.6) rather than mutating it — Queries
    /// stay immutable end to end.
    DerivedQuery {
        query: Rc<Query>,
        alias: String,
        promoted: bool,
    },
}

/// A join clause against an additional source.
///
/// `alias` is the qualifier the builder assigned this occurrence when it
/// constructed the column bag passed to the join's `onFn`/subsequent
/// clauses — every `Expr::Column` referencing this side of the join already
/// carries `alias` as its `table`. The emitter does not invent a new one; it
/// prints this source `AS alias` verbatim (spec §4.1, §4.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub source: Source,
    pub alias: String,
    pub on: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
}

/// What a query projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    /// `SELECT *`.
    Star,
    /// An explicit, named projection list.
    Explicit(Vec<Projection>),
}

/// A single named output column of a query, with the [`crate::codec::Codec`]
/// the shaper should parse it back with once `rowcraft-emit` assigns it a
/// result-column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub expr: Expr,
    pub alias: String,
}

impl Projection {
    pub fn new(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: alias.into(),
        }
    }
}

/// A single `ORDER BY` term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTerm {
    pub expr: Expr,
    pub direction: OrderDirection,
}

impl OrderTerm {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Asc,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Convenience for building an `ON` clause from a pair of (possibly
/// qualified) column references.
pub fn on_eq(left: ColumnRef, right: ColumnRef) -> Expr {
    Expr::eq(Expr::Column(left), Expr::Column(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;

    #[test]
    fn new_query_defaults_to_star_selection() {
        let q = Query::new(0, Source::BaseTable("users".into()));
        assert_eq!(q.selection, Selection::Star);
        assert!(!q.is_grouped());
    }

    #[test]
    fn with_filter_accumulates_via_and() {
        let q = Query::new(0, Source::BaseTable("users".into()))
            .with_filter(Expr::eq(Expr::column("id"), Expr::integer(1)))
            .with_filter(Expr::eq(Expr::column("active"), Expr::boolean(true)));
        assert!(matches!(
            q.filter,
            Some(Expr::BinOp {
                op: crate::expr::BinOp::And,
                ..
            })
        ));
    }

    #[test]
    fn group_by_marks_query_grouped() {
        let q = Query::new(0, Source::BaseTable("tasks".into()))
            .with_group_by(vec![Expr::column("user_id")]);
        assert!(q.is_grouped());
    }

    #[test]
    fn derived_query_shares_identity_through_clone() {
        let inner = Rc::new(Query::new(5, Source::BaseTable("tasks".into())));
        let source = Source::DerivedQuery {
            query: Rc::clone(&inner),
            alias: "t".into(),
            promoted: false,
        };
        let outer = Query::new(6, source.clone());
        if let Source::DerivedQuery { query, .. } = &outer.source {
            assert_eq!(query.identity, 5);
        } else {
            panic!("expected derived query source");
        }
        let _ = Codec::text();
    }
}
