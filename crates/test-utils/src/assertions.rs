// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL assertion helpers
//!
//! Emitted SQL is compared after canonical whitespace normalization (spec
//! §6) so tests don't pin down incidental indentation.

use rowcraft_emit::format_sql;

/// Asserts that `actual` and `expected` are the same SQL text once both are
/// run through [`format_sql`].
pub fn assert_sql_eq(actual: &str, expected: &str) {
    let actual = format_sql(actual);
    let expected = format_sql(expected);
    assert_eq!(actual, expected, "canonical SQL text differs");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_incidental_trailing_whitespace_and_blank_lines() {
        assert_sql_eq("SELECT id FROM users  \n\n\n", "SELECT id FROM users\n");
    }

    #[test]
    #[should_panic(expected = "canonical SQL text differs")]
    fn still_catches_real_differences() {
        assert_sql_eq("SELECT id FROM users", "SELECT name FROM users");
    }
}
