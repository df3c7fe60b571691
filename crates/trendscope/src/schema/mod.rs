//! Input types: columns, cells and datasets.
//!
//! Raw, dynamically typed cells are mapped onto [`CellValue`] once at the
//! boundary; the analysis modules only ever see coerced numbers.

mod column;
mod dataset;
mod types;

pub use column::Column;
pub use dataset::{DatasetInput, validate_columns};
pub use types::{CellValue, ColumnKind, is_null_token};
