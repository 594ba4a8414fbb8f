pub mod cleaned;
pub mod formatted;
pub mod raw;
pub mod schema;

pub use cleaned::{CleanedRecord, CleanedTable, DecodedRecord, UnitSystem};
pub use formatted::{FormattedRecord, FormattedTable};
pub use raw::RawRecord;
pub use schema::{ColumnKind, ColumnSpec, HEATWATCH_COLUMN_COUNT, HEATWATCH_SCHEMA};
