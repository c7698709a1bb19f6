use binlog_sql::config::{validate_identifier, InsertStyle, DEFAULT_DATABASE};
use binlog_sql::logging::init_logging;
use binlog_sql::{Converter, OutputFormat, ParserConfig, Result};
use clap::Parser;
use std::io::{self, BufWriter};
use tracing::{error, info};

/// Reads `mysqlbinlog --verbose` output on stdin and prints an INSERT
/// statement for every row inserted into TABLE.
#[derive(Parser, Debug)]
#[command(name = "parse-binlog-table")]
#[command(about = "Reconstruct INSERT statements for one table from mysqlbinlog output", long_about = None)]
struct Args {
    /// Table whose row events are converted
    #[arg(value_parser = parse_table_name)]
    table: String,

    /// Schema qualifying the table in start markers
    #[arg(
        short,
        long,
        default_value = DEFAULT_DATABASE,
        value_parser = parse_database_name,
        conflicts_with = "no_database"
    )]
    database: String,

    /// Only match bare `table` markers
    #[arg(long)]
    no_database: bool,

    /// Emit `INSERT INTO t VALUES (...)` without a column list
    #[arg(long)]
    values_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Sql)]
    format: OutputFormat,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,
}

fn parse_table_name(value: &str) -> std::result::Result<String, String> {
    validate_identifier("table", value)
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}

fn parse_database_name(value: &str) -> std::result::Result<String, String> {
    validate_identifier("database", value)
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    let database = (!args.no_database).then_some(args.database);
    let insert_style = if args.values_only {
        InsertStyle::ValuesOnly
    } else {
        InsertStyle::WithColumns
    };

    let config = ParserConfig::generic(args.table)
        .with_database(database)
        .with_insert_style(insert_style)
        .with_output(args.format);

    info!(
        table = %config.table,
        database = ?config.database,
        format = ?config.output,
        "Reading binlog from stdin"
    );

    let mut converter = match Converter::new(config) {
        Ok(converter) => converter,
        Err(e) => {
            error!("Invalid parser configuration: {}", e);
            return Err(e);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    converter.run(stdin.lock(), BufWriter::new(stdout.lock()))?;

    Ok(())
}
