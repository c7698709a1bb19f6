pub mod reconstructor;
pub mod serializer;

pub use reconstructor::{StatementReconstructor, NULL_LITERAL};
pub use serializer::{ChangeRecord, ColumnValue, JsonSerializer};
