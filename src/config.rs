use clap::ValueEnum;

use crate::binlog::ChangeMode;
use crate::{Error, Result};

/// Column order of the `vehicles` table, aligned to ordinals 1..=27.
pub const VEHICLE_COLUMNS: [&str; 27] = [
    "id",
    "owner_id",
    "vehicle_type_id",
    "name",
    "make",
    "model",
    "year",
    "vin",
    "registration_number",
    "engine_number",
    "v5_document_number",
    "purchase_cost",
    "purchase_date",
    "current_mileage",
    "last_service_date",
    "mot_expiry_date",
    "road_tax_expiry_date",
    "insurance_expiry_date",
    "security_features",
    "vehicle_color",
    "service_interval_months",
    "service_interval_miles",
    "depreciation_method",
    "depreciation_years",
    "depreciation_rate",
    "created_at",
    "updated_at",
];

pub const DEFAULT_DATABASE: &str = "vehicle_management";

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub table: String,
    pub database: Option<String>,
    pub tracked: Vec<ChangeMode>,
    pub schema: ColumnSchema,
    pub insert_style: InsertStyle,
    pub fragment_policy: FragmentPolicy,
    pub section_labels: Vec<String>,
    pub output: OutputFormat,
}

/// Where column names in reconstructed statements come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSchema {
    /// `c1`, `c2`, ... up to the highest ordinal.
    Placeholder,
    /// Fixed names aligned to ordinals 1..=N.
    Fixed(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertStyle {
    #[default]
    WithColumns,
    ValuesOnly,
}

/// How an open block treats lines that carry `@` and `=` but do not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FragmentPolicy {
    /// Fragment-shaped lines never close a block, parseable or not.
    #[default]
    Lenient,
    /// Only lines that parse count as fragments; the rest may close a block.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Reconstructed SQL statements
    #[default]
    Sql,
    /// One JSON change record per line
    Json,
}

impl ParserConfig {
    /// Profile for an arbitrary table with unknown columns.
    pub fn generic(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            database: Some(DEFAULT_DATABASE.to_string()),
            tracked: ChangeMode::ALL.to_vec(),
            schema: ColumnSchema::Placeholder,
            insert_style: InsertStyle::WithColumns,
            fragment_policy: FragmentPolicy::Lenient,
            section_labels: default_section_labels(),
            output: OutputFormat::Sql,
        }
    }

    /// Profile for the `vehicles` table with its compiled-in column list.
    pub fn vehicles() -> Self {
        Self {
            table: "vehicles".to_string(),
            database: Some(DEFAULT_DATABASE.to_string()),
            tracked: vec![ChangeMode::Insert],
            schema: ColumnSchema::Fixed(VEHICLE_COLUMNS.iter().map(|c| c.to_string()).collect()),
            insert_style: InsertStyle::WithColumns,
            fragment_policy: FragmentPolicy::Strict,
            section_labels: default_section_labels(),
            output: OutputFormat::Sql,
        }
    }

    pub fn with_database(mut self, database: Option<String>) -> Self {
        self.database = database;
        self
    }

    pub fn with_insert_style(mut self, style: InsertStyle) -> Self {
        self.insert_style = style;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_identifier("table", &self.table)?;
        if let Some(db) = &self.database {
            validate_identifier("database", db)?;
        }
        if self.tracked.is_empty() {
            return Err(Error::Config("no change modes are tracked".to_string()));
        }
        if let ColumnSchema::Fixed(columns) = &self.schema {
            if columns.is_empty() {
                return Err(Error::Config("fixed column schema is empty".to_string()));
            }
        }
        Ok(())
    }
}

/// Checks a name that gets spliced between backticks in a start marker.
pub fn validate_identifier(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Config(format!("{} name is empty", kind)));
    }
    if name.contains('`') {
        return Err(Error::Config(format!("{} name must not contain '`': {}", kind, name)));
    }
    Ok(())
}

fn default_section_labels() -> Vec<String> {
    vec!["SET".to_string(), "WHERE".to_string()]
}
