use tracing::debug;

use crate::binlog::{ChangeBlock, ChangeMode};
use crate::config::{ColumnSchema, InsertStyle, ParserConfig};

/// Literal used for ordinals that never received a value.
pub const NULL_LITERAL: &str = "NULL";

/// Turns closed blocks into best-effort SQL.
///
/// Only inserts are reconstructed. Values are spliced in exactly as they
/// appeared in the log; nothing is quoted or escaped here.
#[derive(Debug, Clone)]
pub struct StatementReconstructor {
    table: String,
    schema: ColumnSchema,
    style: InsertStyle,
}

impl StatementReconstructor {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            table: config.table.clone(),
            schema: config.schema.clone(),
            style: config.insert_style,
        }
    }

    /// Column name for a 1-based ordinal.
    ///
    /// A fixed schema shorter than the block falls back to placeholders for
    /// the ordinals it does not cover.
    pub fn column_name(&self, ordinal: u32) -> String {
        match &self.schema {
            ColumnSchema::Fixed(names) => (ordinal as usize)
                .checked_sub(1)
                .and_then(|index| names.get(index))
                .cloned()
                .unwrap_or_else(|| placeholder(ordinal)),
            ColumnSchema::Placeholder => placeholder(ordinal),
        }
    }

    pub fn reconstruct(&self, block: &ChangeBlock) -> Option<String> {
        let max_ordinal = block.max_ordinal();
        if max_ordinal == 0 {
            debug!(table = %self.table, mode = %block.mode, "Empty block, nothing to emit");
            return None;
        }

        match block.mode {
            ChangeMode::Insert => Some(self.insert(block)),
            ChangeMode::Update | ChangeMode::Delete => {
                debug!(
                    table = %self.table,
                    mode = %block.mode,
                    max_ordinal,
                    "No reconstruction for this change mode"
                );
                None
            }
        }
    }

    fn insert(&self, block: &ChangeBlock) -> String {
        let mut sql = format!("INSERT INTO {} ", self.table);

        if self.style == InsertStyle::WithColumns {
            sql.push('(');
            for ordinal in 1..=block.max_ordinal() {
                if ordinal > 1 {
                    sql.push_str(", ");
                }
                sql.push_str(&self.column_name(ordinal));
            }
            sql.push_str(") ");
        }

        sql.push_str("VALUES (");
        for (ordinal, value) in block.values.dense() {
            if ordinal > 1 {
                sql.push_str(", ");
            }
            sql.push_str(value.unwrap_or(NULL_LITERAL));
        }
        sql.push_str(");");

        sql
    }
}

fn placeholder(ordinal: u32) -> String {
    format!("c{}", ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(mode: ChangeMode, values: &[(u32, &str)]) -> ChangeBlock {
        let mut block = ChangeBlock::new("t", mode);
        for (ordinal, value) in values {
            block.values.set(*ordinal, value.to_string());
        }
        block
    }

    #[test]
    fn test_insert_with_placeholder_columns() {
        let reconstructor = StatementReconstructor::new(&ParserConfig::generic("t"));
        let block = block(ChangeMode::Insert, &[(1, "1"), (2, "'Alice'"), (3, "30")]);

        assert_eq!(
            reconstructor.reconstruct(&block).as_deref(),
            Some("INSERT INTO t (c1, c2, c3) VALUES (1, 'Alice', 30);")
        );
    }

    #[test]
    fn test_insert_values_only() {
        let config = ParserConfig::generic("t").with_insert_style(InsertStyle::ValuesOnly);
        let reconstructor = StatementReconstructor::new(&config);
        let block = block(ChangeMode::Insert, &[(1, "1"), (2, "'Alice'")]);

        assert_eq!(
            reconstructor.reconstruct(&block).as_deref(),
            Some("INSERT INTO t VALUES (1, 'Alice');")
        );
    }

    #[test]
    fn test_gaps_become_null() {
        let reconstructor = StatementReconstructor::new(&ParserConfig::generic("t"));
        let block = block(ChangeMode::Insert, &[(1, "7"), (3, "'x'")]);

        assert_eq!(
            reconstructor.reconstruct(&block).as_deref(),
            Some("INSERT INTO t (c1, c2, c3) VALUES (7, NULL, 'x');")
        );
    }

    #[test]
    fn test_fixed_schema_truncated_to_max_ordinal() {
        let reconstructor = StatementReconstructor::new(&ParserConfig::vehicles());
        let block = block(ChangeMode::Insert, &[(1, "1"), (2, "5"), (4, "'FXLR Softail'")]);

        assert_eq!(
            reconstructor.reconstruct(&block).as_deref(),
            Some(
                "INSERT INTO vehicles (id, owner_id, vehicle_type_id, name) \
                 VALUES (1, 5, NULL, 'FXLR Softail');"
            )
        );
    }

    #[test]
    fn test_fixed_schema_shorter_than_block() {
        let mut config = ParserConfig::generic("pairs");
        config.schema = ColumnSchema::Fixed(vec!["a".to_string(), "b".to_string()]);
        let reconstructor = StatementReconstructor::new(&config);

        let mut block = ChangeBlock::new("pairs", ChangeMode::Insert);
        block.values.set(1, "1".to_string());
        block.values.set(3, "3".to_string());

        assert_eq!(
            reconstructor.reconstruct(&block).as_deref(),
            Some("INSERT INTO pairs (a, b, c3) VALUES (1, NULL, 3);")
        );
    }

    #[test]
    fn test_empty_block_emits_nothing() {
        let reconstructor = StatementReconstructor::new(&ParserConfig::generic("t"));
        assert_eq!(reconstructor.reconstruct(&block(ChangeMode::Insert, &[])), None);
    }

    #[test]
    fn test_update_and_delete_emit_nothing() {
        let reconstructor = StatementReconstructor::new(&ParserConfig::generic("t"));
        let values = [(1, "1"), (2, "'Alice'")];

        assert_eq!(reconstructor.reconstruct(&block(ChangeMode::Update, &values)), None);
        assert_eq!(reconstructor.reconstruct(&block(ChangeMode::Delete, &values)), None);
    }
}
