//! Record sources
//!
//! The library itself only consumes [`Record`] maps; where they come
//! from is the caller's business. This module is the thin collaborator
//! the CLI uses to load them from a headered CSV file.

use std::path::Path;

use tracing::debug;

use crate::plot::Record;
use crate::Result;

/// Read one record per row from a delimited file with a header row.
///
/// Every field is kept as a string; missing trailing fields simply stay
/// absent from the record, which the aggregator later reports as a
/// missing facet if the field was configured.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        );
    }
    debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}
