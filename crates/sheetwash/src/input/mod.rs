//! Ingestion: raw tables, parsing and type coercion.

mod coerce;
mod parser;
mod source;

pub use coerce::{
    AGE_COLUMN, ColumnCoercion, SALARY_COLUMN, default_coercions, parse_number,
};
pub use parser::{Parser, ParserConfig};
pub use source::{RawTable, SourceMetadata};
