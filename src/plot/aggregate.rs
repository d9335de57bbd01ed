//! Record-by-record aggregation into a bubble plot

use std::collections::BTreeSet;

use tracing::debug;

use crate::plot::{BubblePlot, Facets, Record};
use crate::{BubbletexError, Result};

/// Aggregate a sequence of records into a populated [`BubblePlot`] plus
/// the set of distinct years seen along the way.
///
/// Records are visited once, in input order. The year is read from
/// `year_field`; a record without it fails with
/// [`BubbletexError::MissingYearField`], and facet lookup failures from
/// [`BubblePlot::update`] propagate unchanged. The first offending record
/// wins.
pub fn compute_occurrences_from(
    records: &[Record],
    plan: &Facets,
    year_field: &str,
) -> Result<(BubblePlot, BTreeSet<String>)> {
    let mut years = BTreeSet::new();
    let mut plot = BubblePlot::new(plan);
    for record in records {
        let year = record
            .get(year_field)
            .ok_or_else(|| BubbletexError::MissingYearField {
                field: year_field.to_string(),
            })?;
        plot.update(record, year)?;
        years.insert(year.clone());
    }
    debug!(
        plot = %plot,
        records = records.len(),
        years = years.len(),
        "aggregated bubble occurrences"
    );
    Ok((plot, years))
}
