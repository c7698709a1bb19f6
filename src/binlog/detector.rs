use tracing::{debug, trace};

use super::accumulator::{looks_like_fragment, ColumnAccumulator, FragmentOutcome};
use super::markers::TableMarkers;
use super::types::{ChangeBlock, ChangeMode};
use crate::config::{FragmentPolicy, ParserConfig};

/// mysqlbinlog prefixes every non-SQL line with this.
pub const COMMENT_PREFIX: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Idle,
    Open(ChangeMode),
}

/// What a single line did to the detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing of interest; state unchanged.
    Ignored,
    /// A start marker opened a block. `abandoned` is set when a block was
    /// already open; its values are thrown away without being emitted.
    Opened { mode: ChangeMode, abandoned: bool },
    /// A fragment-shaped line inside an open block.
    Absorbed { stored: bool },
    /// A section label such as `### SET` inside an open block.
    Section,
    /// A plain comment line closed the open block.
    Closed(ChangeBlock),
}

/// Recognizes row-change blocks for one table in mysqlbinlog `-v` output.
///
/// mysqlbinlog has no end-of-block sentinel: the first comment line that is
/// neither a fragment nor a section label ends the block.
pub struct BlockDetector {
    table: String,
    markers: TableMarkers,
    fragment_policy: FragmentPolicy,
    section_labels: Vec<String>,
    state: DetectorState,
    accumulator: ColumnAccumulator,
}

impl BlockDetector {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            table: config.table.clone(),
            markers: TableMarkers::new(config.database.as_deref(), &config.table, &config.tracked),
            fragment_policy: config.fragment_policy,
            section_labels: config.section_labels.clone(),
            state: DetectorState::Idle,
            accumulator: ColumnAccumulator::new(),
        }
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn feed(&mut self, line: &str) -> Transition {
        if let Some(mode) = self.markers.classify(line) {
            return self.open(mode);
        }

        let mode = match self.state {
            DetectorState::Idle => return Transition::Ignored,
            DetectorState::Open(mode) => mode,
        };

        if self.is_fragment_candidate(line) {
            match self.accumulator.accept(line) {
                FragmentOutcome::Stored => return Transition::Absorbed { stored: true },
                FragmentOutcome::OutOfRange => return Transition::Absorbed { stored: false },
                FragmentOutcome::NotFragment if self.fragment_policy == FragmentPolicy::Lenient => {
                    return Transition::Absorbed { stored: false }
                }
                FragmentOutcome::NotFragment => {}
            }
        }

        if !line.starts_with(COMMENT_PREFIX) {
            return Transition::Ignored;
        }

        if self.is_section_label(line) {
            trace!(line, "section label");
            return Transition::Section;
        }

        Transition::Closed(self.close(mode))
    }

    /// Ends the stream. An open block is dropped without emission; returns
    /// whether one was.
    pub fn finish(&mut self) -> bool {
        match self.state {
            DetectorState::Idle => false,
            DetectorState::Open(mode) => {
                debug!(
                    table = %self.table,
                    %mode,
                    max_ordinal = self.accumulator.max_ordinal(),
                    "Input ended inside an open block, dropping it"
                );
                self.accumulator.reset();
                self.state = DetectorState::Idle;
                true
            }
        }
    }

    fn open(&mut self, mode: ChangeMode) -> Transition {
        let abandoned = matches!(self.state, DetectorState::Open(_));
        if abandoned {
            debug!(
                table = %self.table,
                max_ordinal = self.accumulator.max_ordinal(),
                "Start marker inside an open block, abandoning it"
            );
        }

        self.accumulator.reset();
        self.state = DetectorState::Open(mode);
        debug!(table = %self.table, %mode, "Block opened");

        Transition::Opened { mode, abandoned }
    }

    fn close(&mut self, mode: ChangeMode) -> ChangeBlock {
        let values = self.accumulator.take();
        self.state = DetectorState::Idle;
        debug!(table = %self.table, %mode, columns = values.len(), "Block closed");

        ChangeBlock {
            table: self.table.clone(),
            mode,
            values,
        }
    }

    /// Strict mode also skips lines with `=@`, as in `@4='x=@y'`; those
    /// go on to the terminator check.
    fn is_fragment_candidate(&self, line: &str) -> bool {
        looks_like_fragment(line)
            && !(self.fragment_policy == FragmentPolicy::Strict && line.contains("=@"))
    }

    fn is_section_label(&self, line: &str) -> bool {
        let label = line.trim_start_matches(COMMENT_PREFIX).trim();
        self.section_labels.iter().any(|l| l == label)
    }
}
