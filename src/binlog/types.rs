use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of row change a block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeMode {
    Insert,
    Update,
    Delete,
}

impl ChangeMode {
    pub const ALL: [ChangeMode; 3] = [ChangeMode::Insert, ChangeMode::Update, ChangeMode::Delete];

    /// The keyword mysqlbinlog prints in front of the table name.
    pub fn keyword(&self) -> &'static str {
        match self {
            ChangeMode::Insert => "INSERT INTO",
            ChangeMode::Update => "UPDATE",
            ChangeMode::Delete => "DELETE FROM",
        }
    }
}

impl fmt::Display for ChangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeMode::Insert => "INSERT",
            ChangeMode::Update => "UPDATE",
            ChangeMode::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Sparse ordinal -> raw literal mapping for one block.
///
/// Ordinals are 1-based. A later value for the same ordinal replaces the
/// earlier one. The highest ordinal is read off the map, so it can never
/// disagree with the stored keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnValues {
    values: BTreeMap<u32, String>,
}

impl ColumnValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, ordinal: u32, value: String) {
        debug_assert!(ordinal > 0, "ordinals are 1-based");
        self.values.insert(ordinal, value);
    }

    pub fn get(&self, ordinal: u32) -> Option<&str> {
        self.values.get(&ordinal).map(String::as_str)
    }

    /// Highest ordinal captured so far, 0 when nothing was captured.
    pub fn max_ordinal(&self) -> u32 {
        self.values.keys().next_back().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Values for ordinals `1..=max_ordinal`, `None` for gaps.
    pub fn dense(&self) -> impl Iterator<Item = (u32, Option<&str>)> + '_ {
        (1..=self.max_ordinal()).map(move |ordinal| (ordinal, self.get(ordinal)))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// One row-change event for the tracked table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBlock {
    pub table: String,
    pub mode: ChangeMode,
    pub values: ColumnValues,
}

impl ChangeBlock {
    pub fn new(table: impl Into<String>, mode: ChangeMode) -> Self {
        Self {
            table: table.into(),
            mode,
            values: ColumnValues::new(),
        }
    }

    pub fn max_ordinal(&self) -> u32 {
        self.values.max_ordinal()
    }
}
