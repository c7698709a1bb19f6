pub mod accumulator;
pub mod detector;
pub mod markers;
pub mod types;


pub use accumulator::{parse_fragment, ColumnAccumulator, Fragment, FragmentOutcome, MAX_ORDINAL};
pub use detector::{BlockDetector, DetectorState, Transition};
pub use markers::TableMarkers;
pub use types::*;
