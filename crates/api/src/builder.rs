// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query builder
//!
//! [`QueryBuilder`] is the thin, schema-validated surface spec §4.8
//! describes: every chain method takes ownership of `self` and returns a
//! fresh value (queries are immutable), column references are checked
//! against a [`ColumnBag`] before they ever reach the IR, and aggregate
//! placement is checked before emission rather than left for SQLite to
//! reject at prepare time.

use std::rc::Rc;

use rowcraft_emit::emit_query;
use rowcraft_ir::{Codec, Expr, IdGen, Join, JoinKind, OrderTerm, Projection, Query, Selection, Source, Value};
use rowcraft_schema::Schema;
use rowcraft_shape::Cardinality;

use crate::bag::ColumnBag;
use crate::error::{BuilderError, BuilderResult};
use crate::operation::PreparedQuery;

/// A query already built and shared by identity, ready to be joined or used
/// as an `IN (subquery)` argument without losing CTE-sharing detection.
pub struct SharedQuery {
    pub query: Rc<Query>,
    pub columns: Vec<(String, Codec)>,
}

/// Where a join's rows come from.
pub enum JoinSource {
    Table(String),
    Query(SharedQuery),
}

/// A chainable, schema-validated query under construction.
pub struct QueryBuilder<'s> {
    schema: &'s Schema,
    ids: Rc<IdGen>,
    query: Query,
    bag: ColumnBag,
}

impl<'s> QueryBuilder<'s> {
    /// Starts a new query scanning `table`, exposing its declared columns
    /// under `table`'s own name as the root alias.
    pub fn scan(schema: &'s Schema, ids: Rc<IdGen>, table: &str) -> BuilderResult<Self> {
        let spec = schema.table(table).map_err(|_| BuilderError::UnknownTable {
            table: table.to_string(),
        })?;
        let columns = spec.columns.iter().map(|c| (c.name.clone(), c.codec));
        let bag = ColumnBag::new(table, columns);
        let identity = ids.fresh_identity();
        let query = Query::new(identity, Source::BaseTable(table.to_string()));
        Ok(Self { schema, ids, query, bag })
    }

    /// Consumes the builder, sharing its query by identity so it can be
    /// joined or used as a subquery predicate's argument more than once
    /// without losing CTE-sharing detection.
    pub fn share(self) -> SharedQuery {
        let columns = exposed_columns(&self.query, self.schema);
        SharedQuery {
            query: Rc::new(self.query),
            columns,
        }
    }

    /// Explicitly promotes this query to a `WITH` CTE even if it ends up
    /// referenced only once, then shares it the same way `.share()` does.
    pub fn share_promoted(self, alias: &str) -> (Source, Vec<(String, Codec)>) {
        let shared = self.share();
        let source = Source::DerivedQuery {
            query: shared.query,
            alias: alias.to_string(),
            promoted: true,
        };
        (source, shared.columns)
    }

    pub fn where_(mut self, f: impl FnOnce(&ColumnBag) -> BuilderResult<Expr>) -> BuilderResult<Self> {
        let expr = f(&self.bag)?;
        reject_aggregate(&expr, "where")?;
        self.query = self.query.with_filter(expr);
        Ok(self)
    }

    /// `AND`s together `column == value` for every pair, binding each value
    /// as an external typed with that column's codec.
    pub fn and_filter_equal(mut self, pairs: Vec<(&str, Value)>) -> BuilderResult<Self> {
        let mut combined: Option<Expr> = None;
        for (name, value) in pairs {
            let col = self.bag.col(name)?;
            let codec = self.bag.codec_of(name)?;
            let eq = Expr::eq(Expr::Column(col), Expr::external(codec, value, None::<String>));
            combined = Some(match combined {
                Some(existing) => Expr::and(existing, eq),
                None => eq,
            });
        }
        if let Some(expr) = combined {
            self.query = self.query.with_filter(expr);
        }
        Ok(self)
    }

    /// Replaces the selection. `f` returns field-name/expression pairs;
    /// aggregates are permitted here, but only once the query is grouped.
    pub fn select(mut self, f: impl FnOnce(&ColumnBag) -> BuilderResult<Vec<(String, Expr)>>) -> BuilderResult<Self> {
        let fields = f(&self.bag)?;
        if !self.query.is_grouped() {
            for (_, expr) in &fields {
                reject_aggregate(expr, "selection of an ungrouped query")?;
            }
        }
        let projections = fields
            .into_iter()
            .map(|(alias, expr)| Projection::new(expr, alias))
            .collect();
        self.query = self.query.with_selection(Selection::Explicit(projections));
        Ok(self)
    }

    pub fn group_by(mut self, f: impl FnOnce(&ColumnBag) -> BuilderResult<Vec<Expr>>) -> BuilderResult<Self> {
        let exprs = f(&self.bag)?;
        for expr in &exprs {
            reject_aggregate(expr, "group by")?;
        }
        self.query = self.query.with_group_by(exprs);
        Ok(self)
    }

    /// Aggregates are permitted here (e.g. `HAVING count(*) > 1`), but only
    /// once the query is grouped — `HAVING` without a `GROUP BY` is rejected.
    pub fn having(mut self, f: impl FnOnce(&ColumnBag) -> BuilderResult<Expr>) -> BuilderResult<Self> {
        if !self.query.is_grouped() {
            return Err(BuilderError::HavingWithoutGroupBy);
        }
        let expr = f(&self.bag)?;
        self.query = self.query.with_having(expr);
        Ok(self)
    }

    /// Aggregates are permitted here (e.g. `ORDER BY count(*) DESC`), but
    /// only once the query is grouped.
    pub fn order_by(mut self, f: impl FnOnce(&ColumnBag) -> BuilderResult<Vec<OrderTerm>>) -> BuilderResult<Self> {
        let terms = f(&self.bag)?;
        if !self.query.is_grouped() {
            for term in &terms {
                reject_aggregate(&term.expr, "order by of an ungrouped query")?;
            }
        }
        self.query = self.query.with_order_by(terms);
        Ok(self)
    }

    pub fn limit(mut self, limit: Expr, offset: Option<Expr>) -> Self {
        self.query = self.query.with_limit(limit);
        if let Some(offset) = offset {
            self.query = self.query.with_offset(offset);
        }
        self
    }

    pub fn inner_join(
        self,
        source: JoinSource,
        alias: &str,
        on: impl FnOnce(&ColumnBag) -> BuilderResult<Expr>,
    ) -> BuilderResult<Self> {
        self.join(JoinKind::Inner, source, alias, on)
    }

    pub fn left_join(
        self,
        source: JoinSource,
        alias: &str,
        on: impl FnOnce(&ColumnBag) -> BuilderResult<Expr>,
    ) -> BuilderResult<Self> {
        self.join(JoinKind::Left, source, alias, on)
    }

    fn join(
        mut self,
        kind: JoinKind,
        source: JoinSource,
        alias: &str,
        on: impl FnOnce(&ColumnBag) -> BuilderResult<Expr>,
    ) -> BuilderResult<Self> {
        let (ir_source, columns) = match source {
            JoinSource::Table(table) => {
                let spec = self.schema.table(&table).map_err(|_| BuilderError::UnknownTable {
                    table: table.clone(),
                })?;
                let columns: Vec<_> = spec.columns.iter().map(|c| (c.name.clone(), c.codec)).collect();
                (Source::BaseTable(table), columns)
            }
            JoinSource::Query(shared) => (
                Source::DerivedQuery {
                    query: shared.query,
                    alias: alias.to_string(),
                    promoted: false,
                },
                shared.columns,
            ),
        };

        let merged_bag = self.bag.clone().with_alias(alias, columns);
        let on_expr = on(&merged_bag)?;
        reject_aggregate(&on_expr, "join condition")?;
        self.bag = merged_bag;
        self.query = self.query.with_join(Join {
            kind,
            source: ir_source,
            alias: alias.to_string(),
            on: on_expr,
        });
        Ok(self)
    }

    /// Lowers the built query to SQL and pairs it with the terminal
    /// shaper's cardinality rule. Returns every matching row.
    pub fn all(self) -> BuilderResult<PreparedQuery> {
        self.finish(Cardinality::All)
    }

    /// Fails unless the query returns exactly one row.
    pub fn one(self) -> BuilderResult<PreparedQuery> {
        self.finish(Cardinality::One)
    }

    /// `null` on zero rows, fails on more than one.
    pub fn maybe_one(self) -> BuilderResult<PreparedQuery> {
        self.finish(Cardinality::MaybeOne)
    }

    /// Fails on zero rows, otherwise the first row.
    pub fn first(self) -> BuilderResult<PreparedQuery> {
        self.finish(Cardinality::First)
    }

    /// `null` on zero rows, otherwise the first row.
    pub fn maybe_first(self) -> BuilderResult<PreparedQuery> {
        self.finish(Cardinality::MaybeFirst)
    }

    fn finish(self, cardinality: Cardinality) -> BuilderResult<PreparedQuery> {
        let operation = emit_query(&self.query, self.schema, &self.ids)?;
        Ok(PreparedQuery { operation, cardinality })
    }

    pub fn bag(&self) -> &ColumnBag {
        &self.bag
    }
}

fn reject_aggregate(expr: &Expr, clause: &str) -> BuilderResult<()> {
    if contains_aggregate(expr) {
        return Err(BuilderError::IllegalAggregate {
            node: format!("aggregate expression not permitted in {clause}"),
        });
    }
    Ok(())
}

fn contains_aggregate(expr: &Expr) -> bool {
    if expr.is_aggregate() {
        return true;
    }
    match expr {
        Expr::Column(_) | Expr::Literal(_) | Expr::External(_) | Expr::Raw { .. } => false,
        Expr::BinOp { lhs, rhs, .. } => contains_aggregate(lhs) || contains_aggregate(rhs),
        Expr::UnaryOp { expr, .. } => contains_aggregate(expr),
        Expr::InList { arg, list } => contains_aggregate(arg) || list.iter().any(contains_aggregate),
        Expr::InSubquery { arg, .. } | Expr::NotInSubquery { arg, .. } => contains_aggregate(arg),
        Expr::Aggregate { arg, .. } => matches!(arg, rowcraft_ir::AggregateArg::Expr(inner) if contains_aggregate(inner)),
        Expr::JsonObject { pairs } => pairs.iter().any(|(_, v)| contains_aggregate(v)),
        Expr::JsonGroupArray { arg } => contains_aggregate(arg),
        Expr::Case { whens, else_branch } => {
            whens.iter().any(|(cond, result)| contains_aggregate(cond) || contains_aggregate(result))
                || else_branch.as_deref().is_some_and(contains_aggregate)
        }
    }
}

/// The column names (and, for base tables, their codecs) a query's
/// projection exposes to the outside — used to populate a [`ColumnBag`]
/// when this query is joined as a derived source.
fn exposed_columns(query: &Query, schema: &Schema) -> Vec<(String, Codec)> {
    match &query.selection {
        Selection::Star => match &query.source {
            Source::BaseTable(name) => schema
                .table(name)
                .map(|spec| spec.columns.iter().map(|c| (c.name.clone(), c.codec)).collect())
                .unwrap_or_default(),
            Source::DerivedQuery { .. } => Vec::new(),
        },
        Selection::Explicit(projections) => projections
            .iter()
            .map(|p| (p.alias.clone(), Codec::text()))
            .collect(),
    }
}
