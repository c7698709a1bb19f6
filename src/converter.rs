use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::binlog::{BlockDetector, ChangeBlock, Transition};
use crate::config::{OutputFormat, ParserConfig};
use crate::sql::{ChangeRecord, JsonSerializer, StatementReconstructor};
use crate::Result;

/// Counters for one pass over an input stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub lines: u64,
    pub blocks_opened: u64,
    pub blocks_abandoned: u64,
    pub blocks_closed: u64,
    pub blocks_dropped_at_eof: u64,
    pub records_written: u64,
}

/// Streams mysqlbinlog output through the block detector and writes one
/// line per reconstructed statement (or JSON record).
pub struct Converter {
    output: OutputFormat,
    detector: BlockDetector,
    reconstructor: StatementReconstructor,
    stats: ConversionStats,
}

impl Converter {
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            output: config.output,
            detector: BlockDetector::new(&config),
            reconstructor: StatementReconstructor::new(&config),
            stats: ConversionStats::default(),
        })
    }

    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    /// Feeds one input line (without its terminator). Returns the output
    /// line produced by it, if any.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
        self.stats.lines += 1;

        match self.detector.feed(line) {
            Transition::Opened { abandoned, .. } => {
                self.stats.blocks_opened += 1;
                if abandoned {
                    self.stats.blocks_abandoned += 1;
                }
                Ok(None)
            }
            Transition::Closed(block) => {
                self.stats.blocks_closed += 1;
                let rendered = self.render(&block)?;
                if rendered.is_some() {
                    self.stats.records_written += 1;
                }
                Ok(rendered)
            }
            Transition::Ignored | Transition::Absorbed { .. } | Transition::Section => Ok(None),
        }
    }

    /// Marks the end of input. Any open block is dropped.
    pub fn finish(&mut self) {
        if self.detector.finish() {
            self.stats.blocks_dropped_at_eof += 1;
        }
    }

    /// Converts the whole of `input`, writing to `output`.
    ///
    /// Input that is not valid UTF-8 is decoded lossily.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<ConversionStats> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            if let Some(rendered) = self.process_line(&line)? {
                writeln!(output, "{}", rendered)?;
            }
        }

        self.finish();
        output.flush()?;

        info!(
            lines = self.stats.lines,
            blocks_opened = self.stats.blocks_opened,
            blocks_abandoned = self.stats.blocks_abandoned,
            blocks_closed = self.stats.blocks_closed,
            blocks_dropped_at_eof = self.stats.blocks_dropped_at_eof,
            records_written = self.stats.records_written,
            "Conversion finished"
        );

        Ok(self.stats.clone())
    }

    fn render(&self, block: &ChangeBlock) -> Result<Option<String>> {
        match self.output {
            OutputFormat::Sql => Ok(self.reconstructor.reconstruct(block)),
            OutputFormat::Json => match ChangeRecord::from_block(block, &self.reconstructor) {
                Some(record) => JsonSerializer::serialize(&record).map(Some),
                None => {
                    debug!(table = %block.table, mode = %block.mode, "Empty block, no record");
                    Ok(None)
                }
            },
        }
    }
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
