//! Bubble plot data model and aggregation
//!
//! This module holds the aggregation state of one plot: the facet plan,
//! the bubbles collected on each half of the split x axis, and the
//! per-bubble occurrence counters.

mod aggregate;
mod types;

pub use aggregate::compute_occurrences_from;
pub use types::{Bubble, BubblePlot, Facets, Occurrence, Record, Side, SplitXAxis, XAxis};
