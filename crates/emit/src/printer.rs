// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL printer
//!
//! Steps 2-7 of emission (spec §4.6): decide CTE vs inline for every
//! derived query the collect pass found, print CTE bodies in topological
//! order, then print the root `SELECT`, threading a single parameter map
//! and building the [`ReconstructionPlan`] in lock-step with the
//! projection.
//!
//! One clause per line, two-space indentation for nested blocks — this is
//! already the canonical form the formatted-SQL contract (spec §6) expects,
//! so [`crate::format::format_sql`] only needs to normalize incidental
//! whitespace, not restructure anything.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use rowcraft_ir::{
    AggregateArg, AggregateFn, BinOp, Codec, CodecKind, Expr, IdGen, JoinKind, OrderDirection,
    Primitive, Query, ReconstructionPlan, Selection, Source, UnaryOp, Value,
};
use rowcraft_schema::Schema;

use crate::collect::CollectedQueries;
use crate::error::{EmitError, EmitResult};
use crate::operation::{Operation, OperationKind, ParamMap};

type ColumnTypeMap = HashMap<String, Codec>;

struct EmitCtx<'a> {
    schema: &'a Schema,
    id_gen: &'a IdGen,
    collected: &'a CollectedQueries,
    cte_names: HashMap<u64, String>,
    cte_bodies: Vec<(String, String)>,
    cte_column_types: HashMap<String, ColumnTypeMap>,
    params: ParamMap,
}

/// Column-bag information in scope while printing one query's projection:
/// every in-scope alias's column codecs, which aliases came from a `LEFT
/// JOIN`, and (for base tables) their primary-key columns, used as the
/// null-sentinel for [`ReconstructionPlan::LeftJoinShape`].
struct SourceEnv {
    column_types: HashMap<String, ColumnTypeMap>,
    left_joined_aliases: HashSet<String>,
    primary_columns: HashMap<String, Vec<String>>,
    root_alias: String,
}

/// Emits a complete query [`Operation`]: collects derived-query sharing,
/// decides CTE vs inline, and prints the `WITH` prefix plus the root
/// `SELECT`.
pub fn emit_query(query: &Query, schema: &Schema, id_gen: &IdGen) -> EmitResult<Operation> {
    let collected = CollectedQueries::collect(query);
    let mut ctx = EmitCtx {
        schema,
        id_gen,
        collected: &collected,
        cte_names: HashMap::new(),
        cte_bodies: Vec::new(),
        cte_column_types: HashMap::new(),
        params: ParamMap::new(),
    };

    let cte_order = collected.cte_order();
    for identity in &cte_order {
        let name = ctx.id_gen.fresh_id("cte");
        ctx.cte_names.insert(*identity, name);
    }

    for identity in &cte_order {
        let inner = Rc::clone(collected.query_of(*identity).expect("collected identity"));
        let (sql, types, _plan) = print_select(&mut ctx, &inner)?;
        let name = ctx.cte_names[identity].clone();
        tracing::debug!(cte = %name, "promoted derived query to CTE");
        ctx.cte_column_types.insert(name.clone(), types);
        ctx.cte_bodies.push((name, sql));
    }

    let (root_sql, _root_types, plan) = print_select(&mut ctx, query)?;

    let mut sql = String::new();
    if !ctx.cte_bodies.is_empty() {
        sql.push_str("WITH ");
        let parts: Vec<String> = ctx
            .cte_bodies
            .iter()
            .map(|(name, body)| format!("{name} AS (\n{}\n)", indent(body, 2)))
            .collect();
        sql.push_str(&parts.join(",\n"));
        sql.push('\n');
    }
    sql.push_str(&root_sql);

    Ok(Operation {
        kind: OperationKind::Query,
        sql,
        params: ctx.params.clone(),
        plan,
    })
}

fn print_select(
    ctx: &mut EmitCtx,
    query: &Query,
) -> EmitResult<(String, ColumnTypeMap, ReconstructionPlan)> {
    let root_alias = match &query.source {
        Source::BaseTable(name) => name.clone(),
        Source::DerivedQuery { alias, .. } => alias.clone(),
    };
    let (from_frag, root_types, root_primaries) = print_source(ctx, &query.source, &root_alias)?;

    let mut env = SourceEnv {
        column_types: HashMap::new(),
        left_joined_aliases: HashSet::new(),
        primary_columns: HashMap::new(),
        root_alias: root_alias.clone(),
    };
    env.column_types.insert(root_alias.clone(), root_types);
    env.primary_columns.insert(root_alias, root_primaries);

    let mut join_frags = Vec::new();
    for join in &query.joins {
        let (frag, types, primaries) = print_source(ctx, &join.source, &join.alias)?;
        env.column_types.insert(join.alias.clone(), types);
        env.primary_columns.insert(join.alias.clone(), primaries);
        if join.kind == JoinKind::Left {
            env.left_joined_aliases.insert(join.alias.clone());
        }
        let on_sql = print_expr(ctx, &join.on)?;
        let keyword = match join.kind {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
        };
        join_frags.push(format!("{keyword} {frag} ON {on_sql}"));
    }

    let (select_sql, result_types, plan) = match &query.selection {
        Selection::Star => match &query.source {
            Source::BaseTable(name) if query.joins.is_empty() => {
                let table = ctx
                    .schema
                    .table(name)
                    .expect("table existence already validated by print_source");
                let proj = format!("{root_alias}.*");
                let mut fields = Vec::new();
                let mut types = HashMap::new();
                for column in &table.columns {
                    fields.push((
                        column.name.clone(),
                        ReconstructionPlan::scalar(column.name.clone(), column.codec),
                    ));
                    types.insert(column.name.clone(), column.codec);
                }
                (proj, types, ReconstructionPlan::nested_object(fields))
            }
            Source::BaseTable(_) => {
                return Err(EmitError::StarOverNonBaseTable {
                    source_kind: "joined query".into(),
                })
            }
            Source::DerivedQuery { .. } => {
                return Err(EmitError::StarOverNonBaseTable {
                    source_kind: "derived query".into(),
                })
            }
        },
        Selection::Explicit(projections) => {
            let mut parts = Vec::new();
            let mut fields = Vec::new();
            let mut types = HashMap::new();
            for projection in projections {
                let (expr_sql, plan) =
                    print_projection_expr(ctx, &projection.expr, &projection.alias, &env)?;
                parts.push(format!("{expr_sql} AS {}", projection.alias));
                if !matches!(
                    projection.expr,
                    Expr::JsonObject { .. } | Expr::JsonGroupArray { .. }
                ) {
                    types.insert(projection.alias.clone(), infer_codec(&projection.expr, &env));
                }
                fields.push((projection.alias.clone(), plan));
            }
            (parts.join(", "), types, ReconstructionPlan::nested_object(fields))
        }
    };

    let mut lines = vec![format!("SELECT {select_sql}"), format!("FROM {from_frag}")];
    lines.extend(join_frags);

    if let Some(filter) = &query.filter {
        lines.push(format!("WHERE {}", print_expr(ctx, filter)?));
    }
    if !query.group_by.is_empty() {
        let mut cols = Vec::new();
        for expr in &query.group_by {
            cols.push(print_expr(ctx, expr)?);
        }
        lines.push(format!("GROUP BY {}", cols.join(", ")));
    }
    if let Some(having) = &query.having {
        lines.push(format!("HAVING {}", print_expr(ctx, having)?));
    }
    if !query.order_by.is_empty() {
        let mut terms = Vec::new();
        for term in &query.order_by {
            let direction = match term.direction {
                OrderDirection::Asc => "ASC",
                OrderDirection::Desc => "DESC",
            };
            terms.push(format!("{} {direction}", print_expr(ctx, &term.expr)?));
        }
        lines.push(format!("ORDER BY {}", terms.join(", ")));
    }
    if let Some(limit) = &query.limit {
        let mut clause = format!("LIMIT {}", print_expr(ctx, limit)?);
        if let Some(offset) = &query.offset {
            clause.push_str(&format!(" OFFSET {}", print_expr(ctx, offset)?));
        }
        lines.push(clause);
    }

    Ok((lines.join("\n"), result_types, plan))
}

fn print_source(
    ctx: &mut EmitCtx,
    source: &Source,
    alias: &str,
) -> EmitResult<(String, ColumnTypeMap, Vec<String>)> {
    match source {
        Source::BaseTable(name) => {
            let table = ctx
                .schema
                .table(name)
                .map_err(|_| EmitError::UnknownTable { table: name.clone() })?;
            let types: ColumnTypeMap = table.columns.iter().map(|c| (c.name.clone(), c.codec)).collect();
            let primaries: Vec<String> =
                table.primary_columns().iter().map(|c| c.name.clone()).collect();
            let frag = if alias == name.as_str() {
                name.clone()
            } else {
                format!("{name} AS {alias}")
            };
            Ok((frag, types, primaries))
        }
        Source::DerivedQuery { query, .. } => {
            let identity = query.identity;
            if ctx.collected.is_cte(identity) {
                let cte_name = ctx
                    .cte_names
                    .get(&identity)
                    .expect("CTE name assigned before its sources are printed")
                    .clone();
                let types = ctx.cte_column_types.get(&cte_name).cloned().unwrap_or_default();
                Ok((format!("{cte_name} AS {alias}"), types, Vec::new()))
            } else {
                let (inner_sql, types, _plan) = print_select(ctx, query)?;
                Ok((
                    format!("(\n{}\n) AS {alias}", indent(&inner_sql, 2)),
                    types,
                    Vec::new(),
                ))
            }
        }
    }
}

fn print_subquery_ref(ctx: &mut EmitCtx, subquery: &Rc<Query>) -> EmitResult<String> {
    let identity = subquery.identity;
    if ctx.collected.is_cte(identity) {
        let name = ctx.cte_names[&identity].clone();
        Ok(format!("(SELECT * FROM {name})"))
    } else {
        let (sql, _types, _plan) = print_select(ctx, subquery)?;
        Ok(format!("(\n{}\n)", indent(&sql, 2)))
    }
}

fn print_projection_expr(
    ctx: &mut EmitCtx,
    expr: &Expr,
    field_name: &str,
    env: &SourceEnv,
) -> EmitResult<(String, ReconstructionPlan)> {
    match expr {
        Expr::JsonObject { pairs } => {
            let mut parts = Vec::new();
            let mut fields = Vec::new();
            for (key, value) in pairs {
                let (sql, plan) = print_projection_expr(ctx, value, key, env)?;
                parts.push(format!("'{}', {}", key.replace('\'', "''"), sql));
                fields.push((key.clone(), plan));
            }
            let sql = format!("json_object({})", parts.join(", "));
            let mut plan = ReconstructionPlan::nested_object(fields);
            if let Some(alias) = single_source_alias(pairs) {
                if env.left_joined_aliases.contains(&alias) {
                    plan = plan.left_join(sentinel_columns_for(env, &alias));
                }
            }
            Ok((sql, plan))
        }
        Expr::JsonGroupArray { arg } => {
            let (inner_sql, inner_plan) = print_projection_expr(ctx, arg, "element", env)?;
            let sql = format!("json_group_array({inner_sql})");
            Ok((sql, ReconstructionPlan::nested_array(field_name, inner_plan)))
        }
        _ => {
            let sql = print_expr(ctx, expr)?;
            let codec = infer_codec(expr, env);
            Ok((sql, ReconstructionPlan::scalar(field_name, codec)))
        }
    }
}

fn print_expr(ctx: &mut EmitCtx, expr: &Expr) -> EmitResult<String> {
    Ok(match expr {
        Expr::Column(col) => col.qualified(),
        Expr::Literal(lit) => print_literal(&lit.codec, &lit.value)?,
        Expr::External(ext) => {
            let label = match &ext.label {
                Some(label) => label.clone(),
                None => ctx.id_gen.fresh_id("_"),
            };
            let primitive = ext.codec.serialize(&ext.value).map_err(|source| EmitError::CodecError {
                label: label.clone(),
                source,
            })?;
            ctx.params.insert_if_absent(label.clone(), primitive);
            format!(":{label}")
        }
        Expr::BinOp { op, lhs, rhs } => {
            format!("({} {} {})", print_expr(ctx, lhs)?, bin_op_sql(*op), print_expr(ctx, rhs)?)
        }
        Expr::UnaryOp { op, expr } => match op {
            UnaryOp::Not => format!("NOT {}", print_expr(ctx, expr)?),
            UnaryOp::Neg => format!("-{}", print_expr(ctx, expr)?),
            UnaryOp::IsNull => format!("{} IS NULL", print_expr(ctx, expr)?),
            UnaryOp::IsNotNull => format!("{} IS NOT NULL", print_expr(ctx, expr)?),
        },
        Expr::InList { arg, list } => {
            let mut items = Vec::with_capacity(list.len());
            for item in list {
                items.push(print_expr(ctx, item)?);
            }
            format!("{} IN ({})", print_expr(ctx, arg)?, items.join(", "))
        }
        Expr::InSubquery { arg, subquery } => {
            format!("{} IN {}", print_expr(ctx, arg)?, print_subquery_ref(ctx, subquery)?)
        }
        Expr::NotInSubquery { arg, subquery } => {
            format!("{} NOT IN {}", print_expr(ctx, arg)?, print_subquery_ref(ctx, subquery)?)
        }
        Expr::Aggregate { func, arg, distinct } => {
            let inner = match arg {
                AggregateArg::Star => "*".to_string(),
                AggregateArg::Expr(e) => print_expr(ctx, e)?,
            };
            let distinct_kw = if *distinct { "DISTINCT " } else { "" };
            format!("{}({distinct_kw}{inner})", aggregate_fn_sql(*func))
        }
        Expr::JsonObject { pairs } => {
            let mut parts = Vec::with_capacity(pairs.len());
            for (key, value) in pairs {
                parts.push(format!("'{}', {}", key.replace('\'', "''"), print_expr(ctx, value)?));
            }
            format!("json_object({})", parts.join(", "))
        }
        Expr::JsonGroupArray { arg } => format!("json_group_array({})", print_expr(ctx, arg)?),
        Expr::Case { whens, else_branch } => {
            let mut s = String::from("CASE");
            for (cond, result) in whens {
                s.push_str(&format!(" WHEN {} THEN {}", print_expr(ctx, cond)?, print_expr(ctx, result)?));
            }
            if let Some(else_branch) = else_branch {
                s.push_str(&format!(" ELSE {}", print_expr(ctx, else_branch)?));
            }
            s.push_str(" END");
            s
        }
        Expr::Raw { sql } => sql.clone(),
    })
}

fn print_literal(codec: &Codec, value: &Value) -> EmitResult<String> {
    let primitive = codec.serialize(value).map_err(|source| EmitError::CodecError {
        label: "<literal>".to_string(),
        source,
    })?;
    Ok(print_primitive(&primitive))
}

fn print_primitive(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Null => "NULL".to_string(),
        Primitive::Integer(n) => n.to_string(),
        Primitive::Real(n) => n.to_string(),
        Primitive::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        Primitive::Text(s) => quote_text(s),
    }
}

fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn bin_op_sql(op: BinOp) -> &'static str {
    match op {
        BinOp::Eq => "==",
        BinOp::NotEq => "!=",
        BinOp::Lt => "<",
        BinOp::LtEq => "<=",
        BinOp::Gt => ">",
        BinOp::GtEq => ">=",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::And => "AND",
        BinOp::Or => "OR",
        BinOp::Concat => "||",
    }
}

fn aggregate_fn_sql(func: AggregateFn) -> &'static str {
    match func {
        AggregateFn::Count => "COUNT",
        AggregateFn::Sum => "SUM",
        AggregateFn::Avg => "AVG",
        AggregateFn::Min => "MIN",
        AggregateFn::Max => "MAX",
        AggregateFn::GroupConcat => "GROUP_CONCAT",
    }
}

fn infer_codec(expr: &Expr, env: &SourceEnv) -> Codec {
    match expr {
        Expr::Column(col) => {
            let alias = col.table.clone().unwrap_or_else(|| env.root_alias.clone());
            env.column_types
                .get(&alias)
                .and_then(|types| types.get(&col.column))
                .copied()
                .unwrap_or_else(Codec::text)
        }
        Expr::Literal(lit) => lit.codec,
        Expr::External(ext) => ext.codec,
        Expr::BinOp { op, lhs, rhs } => match op {
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq | BinOp::And | BinOp::Or => {
                Codec::boolean()
            }
            BinOp::Concat => Codec::text(),
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
                let left = infer_codec(lhs, env);
                let right = infer_codec(rhs, env);
                if left.kind() == CodecKind::Real || right.kind() == CodecKind::Real {
                    Codec::real()
                } else {
                    Codec::integer()
                }
            }
        },
        Expr::UnaryOp { op, expr: inner } => match op {
            UnaryOp::Not | UnaryOp::IsNull | UnaryOp::IsNotNull => Codec::boolean(),
            UnaryOp::Neg => infer_codec(inner, env),
        },
        Expr::InList { .. } | Expr::InSubquery { .. } | Expr::NotInSubquery { .. } => Codec::boolean(),
        Expr::Aggregate { func, arg, .. } => match func {
            AggregateFn::Count => Codec::integer(),
            AggregateFn::Sum | AggregateFn::Avg => Codec::real(),
            AggregateFn::GroupConcat => Codec::text(),
            AggregateFn::Min | AggregateFn::Max => match arg {
                AggregateArg::Star => Codec::integer(),
                AggregateArg::Expr(e) => infer_codec(e, env),
            },
        },
        Expr::JsonObject { .. } | Expr::JsonGroupArray { .. } => Codec::json(),
        Expr::Case { whens, else_branch } => whens
            .first()
            .map(|(_, result)| infer_codec(result, env))
            .or_else(|| else_branch.as_ref().map(|e| infer_codec(e, env)))
            .unwrap_or_else(Codec::text),
        Expr::Raw { .. } => Codec::text(),
    }
}

fn sentinel_columns_for(env: &SourceEnv, alias: &str) -> Vec<String> {
    let primaries = env.primary_columns.get(alias).cloned().unwrap_or_default();
    if !primaries.is_empty() {
        return primaries;
    }
    env.column_types
        .get(alias)
        .map(|types| types.keys().cloned().collect())
        .unwrap_or_default()
}

/// If every column reference inside `pairs` is qualified with exactly one
/// alias, returns it — used to decide whether a `JsonObject` literal should
/// be wrapped in [`ReconstructionPlan::LeftJoinShape`].
fn single_source_alias(pairs: &[(String, Expr)]) -> Option<String> {
    let mut aliases = HashSet::new();
    for (_, value) in pairs {
        collect_column_aliases(value, &mut aliases);
    }
    if aliases.len() == 1 {
        aliases.into_iter().next()
    } else {
        None
    }
}

fn collect_column_aliases(expr: &Expr, out: &mut HashSet<String>) {
    match expr {
        Expr::Column(col) => {
            if let Some(table) = &col.table {
                out.insert(table.clone());
            }
        }
        Expr::Literal(_) | Expr::External(_) | Expr::Raw { .. } => {}
        Expr::BinOp { lhs, rhs, .. } => {
            collect_column_aliases(lhs, out);
            collect_column_aliases(rhs, out);
        }
        Expr::UnaryOp { expr, .. } => collect_column_aliases(expr, out),
        Expr::InList { arg, list } => {
            collect_column_aliases(arg, out);
            for item in list {
                collect_column_aliases(item, out);
            }
        }
        Expr::InSubquery { arg, .. } | Expr::NotInSubquery { arg, .. } => collect_column_aliases(arg, out),
        Expr::Aggregate { arg, .. } => {
            if let AggregateArg::Expr(inner) = arg {
                collect_column_aliases(inner, out);
            }
        }
        Expr::JsonObject { pairs } => {
            for (_, value) in pairs {
                collect_column_aliases(value, out);
            }
        }
        Expr::JsonGroupArray { arg } => collect_column_aliases(arg, out),
        Expr::Case { whens, else_branch } => {
            for (cond, result) in whens {
                collect_column_aliases(cond, out);
                collect_column_aliases(result, out);
            }
            if let Some(else_branch) = else_branch {
                collect_column_aliases(else_branch, out);
            }
        }
    }
}

fn indent(s: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    s.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowcraft_ir::{ColumnRef, Join, Projection, Value};
    use rowcraft_schema::{Column, Table};

    fn users_tasks_schema() -> Schema {
        let users = Table::declare(
            "users",
            vec![Column::integer("id").primary(), Column::text("name")],
        )
        .unwrap();
        let tasks = Table::declare(
            "tasks",
            vec![
                Column::integer("id").primary(),
                Column::integer("user_id"),
                Column::text("title"),
            ],
        )
        .unwrap();
        Schema::new().with_table(users).unwrap().with_table(tasks).unwrap()
    }

    #[test]
    fn star_over_unjoined_base_table_expands_to_named_scalars() {
        let schema = users_tasks_schema();
        let id_gen = IdGen::deterministic();
        let query = Query::new(0, Source::BaseTable("users".into()));
        let op = emit_query(&query, &schema, &id_gen).unwrap();
        assert!(op.sql.contains("SELECT users.*"));
        assert!(op.sql.contains("FROM users"));
        assert!(matches!(op.plan, ReconstructionPlan::NestedObject { .. }));
    }

    #[test]
    fn explicit_projection_with_filter_binds_a_parameter() {
        let schema = users_tasks_schema();
        let id_gen = IdGen::deterministic();
        let query = Query::new(0, Source::BaseTable("users".into()))
            .with_selection(Selection::Explicit(vec![Projection::new(
                Expr::qualified_column("users", "name"),
                "name",
            )]))
            .with_filter(Expr::eq(
                Expr::qualified_column("users", "id"),
                Expr::external(Codec::integer(), Value::Integer(7), Some("id")),
            ));
        let op = emit_query(&query, &schema, &id_gen).unwrap();
        assert!(op.sql.contains("WHERE (users.id == :id)"));
        assert_eq!(op.params.get("id"), Some(&Primitive::Integer(7)));
    }

    #[test]
    fn join_used_twice_is_promoted_to_a_single_cte() {
        let schema = users_tasks_schema();
        let id_gen = IdGen::deterministic();
        let inner = Rc::new(
            Query::new(1, Source::BaseTable("tasks".into())).with_selection(Selection::Explicit(vec![
                Projection::new(Expr::qualified_column("tasks", "user_id"), "user_id"),
            ])),
        );
        let query = Query::new(0, Source::BaseTable("users".into()))
            .with_selection(Selection::Explicit(vec![Projection::new(
                Expr::qualified_column("users", "name"),
                "name",
            )]))
            .with_join(Join {
                kind: JoinKind::Inner,
                source: Source::DerivedQuery {
                    query: Rc::clone(&inner),
                    alias: "t".into(),
                    promoted: false,
                },
                alias: "t".into(),
                on: Expr::eq(
                    Expr::Column(ColumnRef::new("id").with_table("users")),
                    Expr::Column(ColumnRef::new("user_id").with_table("t")),
                ),
            })
            .with_filter(Expr::in_subquery(Expr::qualified_column("users", "id"), Rc::clone(&inner)));

        let op = emit_query(&query, &schema, &id_gen).unwrap();
        assert!(op.sql.starts_with("WITH cte_id0 AS ("));
        assert_eq!(op.sql.matches("cte_id0").count(), 3);
    }

    #[test]
    fn left_join_wraps_json_object_in_left_join_shape() {
        let schema = users_tasks_schema();
        let id_gen = IdGen::deterministic();
        let query = Query::new(0, Source::BaseTable("users".into()))
            .with_join(Join {
                kind: JoinKind::Left,
                source: Source::BaseTable("tasks".into()),
                alias: "t".into(),
                on: Expr::eq(
                    Expr::Column(ColumnRef::new("id").with_table("users")),
                    Expr::Column(ColumnRef::new("user_id").with_table("t")),
                ),
            })
            .with_selection(Selection::Explicit(vec![Projection::new(
                Expr::json_object(vec![("id", Expr::qualified_column("t", "id"))]).unwrap(),
                "task",
            )]));
        let op = emit_query(&query, &schema, &id_gen).unwrap();
        match &op.plan {
            ReconstructionPlan::NestedObject { fields } => {
                let (_, plan) = &fields[0];
                assert!(matches!(plan, ReconstructionPlan::LeftJoinShape { .. }));
            }
            other => panic!("expected nested object, got {other:?}"),
        }
    }
}
