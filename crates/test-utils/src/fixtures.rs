// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Sample schema and data
//!
//! The `users`/`tasks`/`join_users_tasks` fixture used across the scenario
//! tests: four users and three tasks wired together the way the terminal
//! shaper scenarios describe (user 1 has two tasks, user 2 has one, user 3
//! has one, user 4 has none).

use rowcraft_schema::{Column, Schema, Table};
use serde_json::{json, Value as Json};

/// Builds the `users`/`tasks`/`join_users_tasks` schema the scenario tests
/// run their queries against.
pub fn sample_schema() -> Schema {
    let users = Table::declare(
        "users",
        vec![Column::integer("id").primary(), Column::text("name")],
    )
    .expect("sample users table is well-formed");

    let tasks = Table::declare(
        "tasks",
        vec![
            Column::integer("id").primary(),
            Column::text("title"),
            Column::boolean("done"),
        ],
    )
    .expect("sample tasks table is well-formed");

    let join_users_tasks = Table::declare(
        "join_users_tasks",
        vec![
            Column::integer("user_id").primary(),
            Column::integer("task_id").primary(),
        ],
    )
    .expect("sample join table is well-formed");

    Schema::new()
        .with_table(users)
        .expect("users declared once")
        .with_table(tasks)
        .expect("tasks declared once")
        .with_table(join_users_tasks)
        .expect("join_users_tasks declared once")
}

/// The `users` rows: `{1: John, 2: Jane, 3: Jack, 4: Jill}`.
pub fn sample_users() -> Vec<Json> {
    vec![
        json!({"id": 1, "name": "John"}),
        json!({"id": 2, "name": "Jane"}),
        json!({"id": 3, "name": "Jack"}),
        json!({"id": 4, "name": "Jill"}),
    ]
}

/// The `tasks` rows referenced by the join rows below.
pub fn sample_tasks() -> Vec<Json> {
    vec![
        json!({"id": 1, "title": "write spec", "done": true}),
        json!({"id": 2, "title": "review PR", "done": false}),
        json!({"id": 3, "title": "ship release", "done": false}),
    ]
}

/// The `join_users_tasks` rows: user 1 owns tasks 1 and 2, user 2 owns task
/// 3, user 3 owns task 1, user 4 owns nothing.
pub fn sample_join_rows() -> Vec<(i64, i64)> {
    vec![(1, 1), (1, 2), (2, 3), (3, 1)]
}
