use binlog_sql::logging::init_logging;
use binlog_sql::{Converter, OutputFormat, ParserConfig, Result};
use clap::Parser;
use std::io::{self, BufWriter};
use tracing::info;

/// Reads `mysqlbinlog --verbose` output on stdin and prints an INSERT
/// statement, with real column names, for every row inserted into
/// `vehicle_management`.`vehicles`.
#[derive(Parser, Debug)]
#[command(name = "parse-binlog-vehicles")]
#[command(about = "Reconstruct vehicles INSERT statements from mysqlbinlog output", long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Sql)]
    format: OutputFormat,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    let config = ParserConfig::vehicles().with_output(args.format);
    info!(table = %config.table, "Reading binlog from stdin");

    let mut converter = Converter::new(config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    converter.run(stdin.lock(), BufWriter::new(stdout.lock()))?;

    Ok(())
}
