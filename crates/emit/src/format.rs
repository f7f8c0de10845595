// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Canonical SQL formatting
//!
//! [`printer`](crate::printer) already prints one clause per line with
//! two-space indentation for nested blocks — the formatted-SQL contract
//! (spec §6) just needs that kept byte-exact across runs: no trailing
//! whitespace, a single blank line never appears twice in a row, and the
//! file ends with exactly one newline. [`format_sql`] normalizes incidental
//! whitespace without re-parsing or restructuring the SQL text, so it is
//! safe to run on any statement the printer or `rowcraft-schema`'s DDL
//! emitter produces.

/// Strips trailing whitespace from every line, collapses runs of blank
/// lines to one, and ensures the result ends with a single trailing
/// newline.
pub fn format_sql(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut last_was_blank = false;
    for line in sql.lines() {
        let trimmed = line.trim_end();
        let is_blank = trimmed.is_empty();
        if is_blank && last_was_blank {
            continue;
        }
        out.push_str(trimmed);
        out.push('\n');
        last_was_blank = is_blank;
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_whitespace_is_stripped() {
        assert_eq!(format_sql("SELECT 1   \nFROM t  \n"), "SELECT 1\nFROM t\n");
    }

    #[test]
    fn repeated_blank_lines_collapse_to_one() {
        let input = "SELECT 1\n\n\n\nFROM t\n";
        assert_eq!(format_sql(input), "SELECT 1\n\nFROM t\n");
    }

    #[test]
    fn result_always_ends_with_one_newline() {
        let formatted = format_sql("SELECT 1\nFROM t");
        assert!(formatted.ends_with('\n') && !formatted.ends_with("\n\n"));
    }
}
