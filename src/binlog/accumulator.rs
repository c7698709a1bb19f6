use tracing::{trace, warn};

use super::types::ColumnValues;
use crate::{Error, Result};

/// A single `@<ordinal>=<value>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub ordinal: u32,
    /// Literal text after the first `=`, exactly as logged.
    pub value: String,
}

/// True when the line carries both an `@` and an `=`.
pub fn looks_like_fragment(line: &str) -> bool {
    line.contains('@') && line.contains('=')
}

/// Highest ordinal that is stored. MySQL caps a table at 4096 columns.
pub const MAX_ORDINAL: u32 = 4096;

/// Parses `<anything>@<ordinal>=<value>`.
///
/// The ordinal is what sits between the first `@` and the first `=` after
/// it, surrounding whitespace allowed. The value is never unescaped,
/// unquoted or trimmed.
///
/// A left side that is not an integer gives [`Error::InvalidFragment`]. An
/// integer outside `1..=MAX_ORDINAL` gives [`Error::OrdinalOutOfRange`].
pub fn parse_fragment(line: &str) -> Result<Fragment> {
    let at = line.find('@').ok_or_else(|| Error::InvalidFragment {
        message: "missing '@'".to_string(),
    })?;

    let (ordinal, value) = line[at + 1..]
        .split_once('=')
        .ok_or_else(|| Error::InvalidFragment {
            message: "missing '=' after '@'".to_string(),
        })?;

    let ordinal = ordinal.trim();
    if !is_integer(ordinal) {
        return Err(Error::InvalidFragment {
            message: format!("ordinal is not an integer: {:?}", ordinal),
        });
    }

    let ordinal = match ordinal.parse::<u32>() {
        Ok(n) if (1..=MAX_ORDINAL).contains(&n) => n,
        _ => {
            return Err(Error::OrdinalOutOfRange {
                ordinal: ordinal.to_string(),
            })
        }
    };

    Ok(Fragment {
        ordinal,
        value: value.to_string(),
    })
}

/// Optional sign followed by one or more ASCII digits.
fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// What [`ColumnAccumulator::accept`] did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOutcome {
    Stored,
    /// Integer ordinal that cannot be stored; still a fragment.
    OutOfRange,
    NotFragment,
}

/// Collects fragments for the currently open block.
#[derive(Debug, Default)]
pub struct ColumnAccumulator {
    values: ColumnValues,
}

impl ColumnAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, line: &str) -> FragmentOutcome {
        match parse_fragment(line) {
            Ok(fragment) => {
                trace!(ordinal = fragment.ordinal, value = %fragment.value, "fragment");
                self.values.set(fragment.ordinal, fragment.value);
                FragmentOutcome::Stored
            }
            Err(e @ Error::OrdinalOutOfRange { .. }) => {
                warn!(error = %e, line, "Skipping fragment");
                FragmentOutcome::OutOfRange
            }
            Err(e) => {
                trace!(error = %e, line, "not a fragment");
                FragmentOutcome::NotFragment
            }
        }
    }

    pub fn max_ordinal(&self) -> u32 {
        self.values.max_ordinal()
    }

    /// Hands over the collected values and resets to empty.
    pub fn take(&mut self) -> ColumnValues {
        std::mem::take(&mut self.values)
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}
