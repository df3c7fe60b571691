//! Input parsing and data source handling.

mod dates;
mod parser;
mod source;

pub use dates::{looks_like_date, parse_date};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata, infer_kind};
