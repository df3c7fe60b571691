//! CLI command implementations.

pub mod analyze;
pub mod domain;
pub mod trend;

use std::path::Path;

use trendscope::{DatasetInput, Parser, SourceMetadata};

/// Parse a data file, failing early with a readable message if it is missing.
pub(crate) fn load(file: &Path) -> Result<(DatasetInput, SourceMetadata), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(Parser::new().parse_file(file)?)
}
