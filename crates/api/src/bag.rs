// Copyright (c) 2025 Rowcraft Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Column bags
//!
//! Every builder closure (`.where_`, `.select`, the `on` function of a join)
//! receives a [`ColumnBag`] instead of bare strings: it is the single place
//! that checks a column reference against what is actually visible at that
//! point in the chain, so a typo fails at the call that introduced it
//! (`BuilderError::UnknownColumn`) rather than showing up as a SQLite error
//! from the driver. The bag also carries each column's codec, so
//! `.and_filter_equal` can bind a literal value through the right codec
//! without the caller naming it twice.

use std::collections::HashMap;

use rowcraft_ir::{Codec, ColumnRef};

use crate::error::{BuilderError, BuilderResult};

/// The set of columns (and their codecs) visible to a builder closure: the
/// query's own alias plus, once joins are appended, every joined alias.
#[derive(Debug, Clone, Default)]
pub struct ColumnBag {
    root_alias: String,
    columns: HashMap<String, HashMap<String, Codec>>,
}

impl ColumnBag {
    pub fn new(root_alias: impl Into<String>, root_columns: impl IntoIterator<Item = (String, Codec)>) -> Self {
        let root_alias = root_alias.into();
        let mut columns = HashMap::new();
        columns.insert(root_alias.clone(), root_columns.into_iter().collect());
        Self { root_alias, columns }
    }

    /// Adds a joined alias's exposed columns to the bag. Used by
    /// `.inner_join`/`.left_join` once the joined source's own columns are
    /// known. A derived-query join's columns may not carry a precise codec
    /// (the underlying projection's codec is only inferred at emit time), so
    /// callers of a derived source use `Codec::text()` as a harmless
    /// placeholder — it is never used to bind anything, only to satisfy the
    /// bag's existence check.
    pub fn with_alias(mut self, alias: impl Into<String>, columns: impl IntoIterator<Item = (String, Codec)>) -> Self {
        self.columns.insert(alias.into(), columns.into_iter().collect());
        self
    }

    /// Resolves a bare column name against the root alias.
    pub fn col(&self, name: &str) -> BuilderResult<ColumnRef> {
        let root_alias = self.root_alias.clone();
        self.qualified(&root_alias, name)
    }

    /// Resolves `alias.name` against a specific joined alias.
    pub fn qualified(&self, alias: &str, name: &str) -> BuilderResult<ColumnRef> {
        match self.columns.get(alias).and_then(|known| known.get(name)) {
            Some(_) => Ok(ColumnRef::new(name).with_table(alias)),
            None => {
                tracing::warn!(alias, column = name, "unknown column reference");
                Err(BuilderError::UnknownColumn {
                    column: format!("{alias}.{name}"),
                })
            }
        }
    }

    /// The codec of a bare column name against the root alias, for binding
    /// literal/external values typed to match.
    pub fn codec_of(&self, name: &str) -> BuilderResult<Codec> {
        let root_alias = self.root_alias.clone();
        self.qualified_codec(&root_alias, name)
    }

    pub fn qualified_codec(&self, alias: &str, name: &str) -> BuilderResult<Codec> {
        self.columns
            .get(alias)
            .and_then(|known| known.get(name))
            .copied()
            .ok_or_else(|| BuilderError::UnknownColumn {
                column: format!("{alias}.{name}"),
            })
    }

    pub fn root_alias(&self) -> &str {
        &self.root_alias
    }

    pub fn known_columns(&self, alias: &str) -> Vec<String> {
        self.columns
            .get(alias)
            .map(|known| known.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_column_resolves_against_the_root_alias() {
        let bag = ColumnBag::new("users", [("id".to_string(), Codec::integer()), ("name".to_string(), Codec::text())]);
        let col = bag.col("name").unwrap();
        assert_eq!(col.table.as_deref(), Some("users"));
        assert_eq!(col.column, "name");
        assert_eq!(bag.codec_of("name").unwrap(), Codec::text());
    }

    #[test]
    fn unknown_column_is_rejected() {
        let bag = ColumnBag::new("users", [("id".to_string(), Codec::integer())]);
        assert!(matches!(bag.col("ghost"), Err(BuilderError::UnknownColumn { .. })));
    }

    #[test]
    fn joined_alias_columns_are_resolvable_once_added() {
        let bag = ColumnBag::new("users", [("id".to_string(), Codec::integer())])
            .with_alias("tasks", [("id".to_string(), Codec::integer()), ("user_id".to_string(), Codec::integer())]);
        let col = bag.qualified("tasks", "user_id").unwrap();
        assert_eq!(col.table.as_deref(), Some("tasks"));
    }
}
