use serde::{Deserialize, Serialize};

use super::reconstructor::StatementReconstructor;
use crate::binlog::{ChangeBlock, ChangeMode};
use crate::Result;

/// Structured form of a closed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub table: String,
    pub op: ChangeMode,
    pub max_ordinal: u32,
    pub columns: Vec<ColumnValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub ordinal: u32,
    pub name: String,
    /// Raw literal from the log, `None` for a gap.
    pub value: Option<String>,
}

impl ChangeRecord {
    /// Builds a record for a block, `None` if it captured no values.
    pub fn from_block(block: &ChangeBlock, names: &StatementReconstructor) -> Option<Self> {
        if block.values.is_empty() {
            return None;
        }

        let columns = block
            .values
            .dense()
            .map(|(ordinal, value)| ColumnValue {
                ordinal,
                name: names.column_name(ordinal),
                value: value.map(str::to_string),
            })
            .collect();

        Some(Self {
            table: block.table.clone(),
            op: block.mode,
            max_ordinal: block.max_ordinal(),
            columns,
        })
    }
}

pub struct JsonSerializer;

impl JsonSerializer {
    pub fn serialize(record: &ChangeRecord) -> Result<String> {
        serde_json::to_string(record).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use serde_json::{json, Value};

    #[test]
    fn test_record_json_shape() {
        let names = StatementReconstructor::new(&ParserConfig::generic("users"));
        let mut block = ChangeBlock::new("users", ChangeMode::Delete);
        block.values.set(1, "42".to_string());
        block.values.set(3, "'bob@example.com'".to_string());

        let record = ChangeRecord::from_block(&block, &names).unwrap();
        let encoded = JsonSerializer::serialize(&record).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(
            value,
            json!({
                "table": "users",
                "op": "DELETE",
                "max_ordinal": 3,
                "columns": [
                    {"ordinal": 1, "name": "c1", "value": "42"},
                    {"ordinal": 2, "name": "c2", "value": null},
                    {"ordinal": 3, "name": "c3", "value": "'bob@example.com'"}
                ]
            })
        );
    }

    #[test]
    fn test_record_uses_fixed_names() {
        let names = StatementReconstructor::new(&ParserConfig::vehicles());
        let mut block = ChangeBlock::new("vehicles", ChangeMode::Insert);
        block.values.set(2, "5".to_string());

        let record = ChangeRecord::from_block(&block, &names).unwrap();
        assert_eq!(record.columns[0].name, "id");
        assert_eq!(record.columns[0].value, None);
        assert_eq!(record.columns[1].name, "owner_id");
        assert_eq!(record.columns[1].value.as_deref(), Some("5"));
    }

    #[test]
    fn test_empty_block_has_no_record() {
        let names = StatementReconstructor::new(&ParserConfig::generic("users"));
        let block = ChangeBlock::new("users", ChangeMode::Insert);
        assert!(ChangeRecord::from_block(&block, &names).is_none());
    }
}
