//! Output writers for bubble plot artifacts
//!
//! Two writers per plot, run in order: [`CsvWriter`] persists the
//! aggregated data as a delimited table and [`LatexWriter`] fills the
//! pgfplots template with the values computed along the way. The
//! [`TableSummary`] returned by the first carries the x range to the
//! second, so nothing is read back from disk.

mod latex;
mod table;

pub use latex::{LatexWriter, SUPPLIED_PLACEHOLDERS};
pub use table::{CsvWriter, TableSummary};
