//! Bubble plot data model
//!
//! A plot is an aggregate over string-keyed records: each record
//! contributes one bubble to the left half of the x axis and one to the
//! right half, both sharing the record's y label. Bubbles are value-equal
//! keys; the occurrence stored against a bubble is mutated in place as
//! more records match it.

use std::collections::HashMap;
use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Axis, BubbletexError, Result};

/// One input record: a mapping from field name to string value.
///
/// Records are owned by the caller and read-only to this crate.
pub type Record = HashMap<String, String>;

/// Names of the three facets of a bubble plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    /// Facet plotted on the y axis.
    pub y: String,
    /// Facet plotted on the left half of the x axis.
    pub x_left: String,
    /// Facet plotted on the right half of the x axis.
    pub x_right: String,
}

impl Facets {
    /// Canonical plot identifier used to name the output files.
    pub fn identifier(&self) -> String {
        format!("{}_{}_{}", self.x_left, self.y, self.x_right)
    }
}

/// One point on the plot, identified by its x and y tick labels.
///
/// The tick labels end up as keys in the generated pgfplots source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bubble {
    /// Label displayed as an x tick label.
    pub label_x: String,
    /// Label displayed as a y tick label.
    pub label_y: String,
}

/// Aggregate state for one bubble: how many records produced it and the
/// earliest year among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Number of records that mapped to the bubble.
    pub count: u32,
    /// Earliest year among the contributing records.
    ///
    /// Years are compared as strings, which is correct for the
    /// fixed-width numeric form they are expected to be in.
    pub earliest_year: String,
}

impl Occurrence {
    /// Start counting from the first record that produced the bubble.
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            count: 1,
            earliest_year: year.into(),
        }
    }

    /// Count one more record and keep the earliest year.
    pub fn update(&mut self, year: &str) {
        self.count += 1;
        if year < self.earliest_year.as_str() {
            self.earliest_year = year.to_string();
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Occurrence: {}, Year: {}", self.count, self.earliest_year)
    }
}

/// Which half of the split x axis a bubble belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One half of the split x axis: its facet name and the bubbles seen on
/// that side, in encounter order.
#[derive(Debug, Clone)]
pub struct SplitXAxis {
    /// Name of the facet.
    pub facet: String,
    /// Bubbles related to the facet, keyed by their tick labels.
    pub bubbles: IndexMap<Bubble, Occurrence>,
}

impl SplitXAxis {
    fn new(facet: impl Into<String>) -> Self {
        Self {
            facet: facet.into(),
            bubbles: IndexMap::new(),
        }
    }

    /// Record one (x-label, y-label) sighting on this side.
    fn record(&mut self, label_x: &str, label_y: &str, year: &str) {
        let bubble = Bubble {
            label_x: label_x.to_string(),
            label_y: label_y.to_string(),
        };
        match self.bubbles.entry(bubble) {
            Entry::Occupied(mut entry) => entry.get_mut().update(year),
            Entry::Vacant(entry) => {
                entry.insert(Occurrence::new(year));
            }
        }
    }
}

/// Both halves of the split x axis.
#[derive(Debug, Clone)]
pub struct XAxis {
    pub left: SplitXAxis,
    pub right: SplitXAxis,
}

/// A bubble plot with three facets, one on the y axis and two on the
/// split x axis.
///
/// Constructed empty from a [`Facets`] plan, updated once per record
/// during aggregation, then read-only for indexing and serialization.
#[derive(Debug, Clone)]
pub struct BubblePlot {
    /// Facet on the y axis.
    pub y_axis: String,
    /// Facets on the x axis.
    pub x_axis: XAxis,
}

impl BubblePlot {
    /// Create an empty plot for the given facet plan.
    pub fn new(facets: &Facets) -> Self {
        Self {
            y_axis: facets.y.clone(),
            x_axis: XAxis {
                left: SplitXAxis::new(&facets.x_left),
                right: SplitXAxis::new(&facets.x_right),
            },
        }
    }

    /// Update the bubble occurrences of the plot from one record.
    ///
    /// All three facet lookups are resolved before either side is
    /// mutated, so a record missing any configured facet leaves the plot
    /// untouched.
    pub fn update(&mut self, record: &Record, year: &str) -> Result<()> {
        let label_y = Self::lookup(record, &self.y_axis, Axis::Y)?;
        let label_left = Self::lookup(record, &self.x_axis.left.facet, Axis::X)?;
        let label_right = Self::lookup(record, &self.x_axis.right.facet, Axis::X)?;

        self.x_axis.left.record(label_left, label_y, year);
        self.x_axis.right.record(label_right, label_y, year);
        Ok(())
    }

    fn lookup<'r>(record: &'r Record, facet: &str, axis: Axis) -> Result<&'r str> {
        record
            .get(facet)
            .map(String::as_str)
            .ok_or_else(|| BubbletexError::MissingFacet {
                facet: facet.to_string(),
                axis,
            })
    }
}

impl fmt::Display for BubblePlot {
    /// The canonical plot identifier: left facet, y facet, right facet.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.x_axis.left.facet, self.y_axis, self.x_axis.right.facet
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn plan() -> Facets {
        Facets {
            y: "Y".into(),
            x_left: "XL".into(),
            x_right: "XR".into(),
        }
    }

    #[test]
    fn test_occurrence_starts_at_one() {
        let occ = Occurrence::new("2020");
        assert_eq!(occ.count, 1);
        assert_eq!(occ.earliest_year, "2020");
    }

    #[test]
    fn test_occurrence_keeps_earliest_year() {
        let mut occ = Occurrence::new("2020");

        occ.update("2019");
        assert_eq!(occ.count, 2);
        assert_eq!(occ.earliest_year, "2019");

        occ.update("2021");
        assert_eq!(occ.count, 3);
        assert_eq!(occ.earliest_year, "2019");
    }

    #[test]
    fn test_identifier_joins_facet_names() {
        assert_eq!(plan().identifier(), "XL_Y_XR");
        assert_eq!(BubblePlot::new(&plan()).to_string(), "XL_Y_XR");
    }

    #[test]
    fn test_update_fills_both_sides() {
        let mut plot = BubblePlot::new(&plan());
        plot.update(&record(&[("Y", "a"), ("XL", "l"), ("XR", "r")]), "2020")
            .unwrap();

        let left = Bubble {
            label_x: "l".into(),
            label_y: "a".into(),
        };
        let right = Bubble {
            label_x: "r".into(),
            label_y: "a".into(),
        };
        assert!(plot.x_axis.left.bubbles.contains_key(&left));
        assert!(plot.x_axis.right.bubbles.contains_key(&right));
    }

    #[test]
    fn test_update_deduplicates_bubbles_per_side() {
        let mut plot = BubblePlot::new(&plan());
        let rec = record(&[("Y", "a"), ("XL", "l"), ("XR", "r")]);
        plot.update(&rec, "2020").unwrap();
        plot.update(&rec, "2018").unwrap();

        assert_eq!(plot.x_axis.left.bubbles.len(), 1);
        let occ = &plot.x_axis.left.bubbles[&Bubble {
            label_x: "l".into(),
            label_y: "a".into(),
        }];
        assert_eq!(occ.count, 2);
        assert_eq!(occ.earliest_year, "2018");
    }

    #[test]
    fn test_update_missing_y_facet_names_axis() {
        let mut plot = BubblePlot::new(&plan());
        let err = plot
            .update(&record(&[("XL", "l"), ("XR", "r")]), "2020")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown facet named \"Y\" on the y axis"
        );
    }

    #[test]
    fn test_update_missing_x_facet_names_axis() {
        let mut plot = BubblePlot::new(&plan());
        let err = plot
            .update(&record(&[("Y", "a"), ("XL", "l")]), "2020")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown facet named \"XR\" on the x axis"
        );
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        // A record missing the right facet must not have touched the
        // left side either.
        let mut plot = BubblePlot::new(&plan());
        plot.update(&record(&[("Y", "a"), ("XL", "l")]), "2020")
            .unwrap_err();
        assert!(plot.x_axis.left.bubbles.is_empty());
        assert!(plot.x_axis.right.bubbles.is_empty());
    }
}
