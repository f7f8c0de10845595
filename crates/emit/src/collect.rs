// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Collect pass
//!
//! Step 1 of emission (spec §4.6): walk the query tree, find every distinct
//! derived `Query` value by identity, and count how many places reference
//! it. A derived query is promoted to a `WITH` CTE when it is referenced at
//! least twice, the caller explicitly promoted it (`Source::DerivedQuery`'s
//! `promoted` flag), or it appears as an `IN (subquery)` / `NOT IN
//! (subquery)` predicate's argument.
//!
//! Visits are recorded in dependency-first (post-order) sequence: a derived
//! query's own subtree is walked before the query itself is appended, so
//! [`CollectedQueries::cte_order`] is already a valid topological order for
//! `WITH` clause emission.

use std::collections::HashMap;
use std::rc::Rc;

use rowcraft_ir::{AggregateArg, Expr, Query, Selection, Source};

#[derive(Debug)]
struct DerivedQueryInfo {
    query: Rc<Query>,
    ref_count: usize,
    forced: bool,
}

/// The result of walking a root [`Query`]'s tree for distinct derived
/// queries.
#[derive(Debug, Default)]
pub struct CollectedQueries {
    info: HashMap<u64, DerivedQueryInfo>,
    post_order: Vec<u64>,
}

impl CollectedQueries {
    pub fn collect(root: &Query) -> Self {
        let mut collected = CollectedQueries::default();
        collected.walk_query(root);
        collected
    }

    /// Whether the derived query with this identity should be hoisted into
    /// a `WITH` CTE rather than inlined.
    pub fn is_cte(&self, identity: u64) -> bool {
        self.info
            .get(&identity)
            .is_some_and(|info| info.forced || info.ref_count >= 2)
    }

    /// CTE-promoted identities, dependency-first.
    pub fn cte_order(&self) -> Vec<u64> {
        self.post_order
            .iter()
            .copied()
            .filter(|id| self.is_cte(*id))
            .collect()
    }

    pub fn query_of(&self, identity: u64) -> Option<&Rc<Query>> {
        self.info.get(&identity).map(|info| &info.query)
    }

    fn visit_derived(&mut self, query: Rc<Query>, forced: bool) {
        let identity = query.identity;
        let already_present = self.info.contains_key(&identity);
        if !already_present {
            self.walk_query(&query);
        }
        let entry = self.info.entry(identity).or_insert_with(|| DerivedQueryInfo {
            query: Rc::clone(&query),
            ref_count: 0,
            forced: false,
        });
        entry.ref_count += 1;
        entry.forced |= forced;
        if !already_present {
            self.post_order.push(identity);
        }
    }

    fn walk_query(&mut self, query: &Query) {
        if let Source::DerivedQuery { query: inner, promoted, .. } = &query.source {
            self.visit_derived(Rc::clone(inner), *promoted);
        }
        for join in &query.joins {
            if let Source::DerivedQuery { query: inner, promoted, .. } = &join.source {
                self.visit_derived(Rc::clone(inner), *promoted);
            }
            self.walk_expr(&join.on);
        }
        if let Some(filter) = &query.filter {
            self.walk_expr(filter);
        }
        for expr in &query.group_by {
            self.walk_expr(expr);
        }
        if let Some(having) = &query.having {
            self.walk_expr(having);
        }
        for term in &query.order_by {
            self.walk_expr(&term.expr);
        }
        if let Some(limit) = &query.limit {
            self.walk_expr(limit);
        }
        if let Some(offset) = &query.offset {
            self.walk_expr(offset);
        }
        if let Selection::Explicit(projections) = &query.selection {
            for projection in projections {
                self.walk_expr(&projection.expr);
            }
        }
    }

    fn walk_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Column(_) | Expr::Literal(_) | Expr::External(_) | Expr::Raw { .. } => {}
            Expr::BinOp { lhs, rhs, .. } => {
                self.walk_expr(lhs);
                self.walk_expr(rhs);
            }
            Expr::UnaryOp { expr, .. } => self.walk_expr(expr),
            Expr::InList { arg, list } => {
                self.walk_expr(arg);
                for item in list {
                    self.walk_expr(item);
                }
            }
            Expr::InSubquery { arg, subquery } | Expr::NotInSubquery { arg, subquery } => {
                self.walk_expr(arg);
                self.visit_derived(Rc::clone(subquery), true);
            }
            Expr::Aggregate { arg, .. } => {
                if let AggregateArg::Expr(inner) = arg {
                    self.walk_expr(inner);
                }
            }
            Expr::JsonObject { pairs } => {
                for (_, value) in pairs {
                    self.walk_expr(value);
                }
            }
            Expr::JsonGroupArray { arg } => self.walk_expr(arg),
            Expr::Case { whens, else_branch } => {
                for (cond, result) in whens {
                    self.walk_expr(cond);
                    self.walk_expr(result);
                }
                if let Some(else_branch) = else_branch {
                    self.walk_expr(else_branch);
                }
            }
        }
    }
}
