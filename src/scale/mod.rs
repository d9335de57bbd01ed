//! Axis position and colormap score assignment
//!
//! Labels get integer tick positions: left x labels count backward from
//! the plot center, right x labels count forward, y labels run from
//! zero upward. Years get evenly spaced scores over the pgfplots
//! colormap span. All orderings are ascending string order over the
//! deduplicated labels, so the assignment is total and deterministic.

pub mod color;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::plot::{BubblePlot, Side};
use crate::{BubbletexError, Result};

/// Upper bound of the colormap score interval.
///
/// See "Colormap Input Format Reference" in Section 4.7.6 of the
/// pgfplots manual.
pub const SCORE_SPAN: i32 = 1000;

/// Map each distinct year to a colormap score in `[0, 1000]`, spread
/// evenly in chronological order.
///
/// Fails with [`BubbletexError::InsufficientYears`] when fewer than two
/// distinct years were seen, since a single year spans no interval.
pub fn year_score_mapping(years: &BTreeSet<String>) -> Result<BTreeMap<String, i32>> {
    if years.len() < 2 {
        return Err(BubbletexError::InsufficientYears {
            distinct: years.len(),
        });
    }
    let incr = SCORE_SPAN / (years.len() as i32 - 1);
    Ok(years
        .iter()
        .enumerate()
        .map(|(i, year)| (year.clone(), i as i32 * incr))
        .collect())
}

/// How the two halves of the x axis are indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Keep independent left and right label mappings.
    #[default]
    Split,
    /// Merge both halves into a single x mapping; a label seen on both
    /// sides keeps its right-side position.
    Single,
}

/// Integer tick positions for every label of a plot.
///
/// Computed once from a populated [`BubblePlot`]; lookups expect labels
/// drawn from that same plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisIndex {
    Split {
        x_left: BTreeMap<String, i32>,
        x_right: BTreeMap<String, i32>,
        y: BTreeMap<String, i32>,
    },
    Single {
        x: BTreeMap<String, i32>,
        y: BTreeMap<String, i32>,
    },
}

impl AxisIndex {
    /// Assign tick positions to every distinct label of the plot.
    ///
    /// Left x labels, sorted ascending, run from `-(n + left_offset)` up
    /// to `-(1 + left_offset)` so the greatest label sits closest to the
    /// center. Right x labels run from `right_offset` upward. Y labels,
    /// the union of both sides, run from zero upward.
    pub fn compute(
        plot: &BubblePlot,
        mode: AxisMode,
        x_left_offset: i32,
        x_right_offset: i32,
    ) -> Self {
        let labels_left: BTreeSet<&str> = plot
            .x_axis
            .left
            .bubbles
            .keys()
            .map(|b| b.label_x.as_str())
            .collect();
        let labels_right: BTreeSet<&str> = plot
            .x_axis
            .right
            .bubbles
            .keys()
            .map(|b| b.label_x.as_str())
            .collect();
        let labels_y: BTreeSet<&str> = plot
            .x_axis
            .left
            .bubbles
            .keys()
            .chain(plot.x_axis.right.bubbles.keys())
            .map(|b| b.label_y.as_str())
            .collect();

        let left_len = labels_left.len() as i32;
        let x_left: BTreeMap<String, i32> = labels_left
            .iter()
            .enumerate()
            .map(|(i, label)| (label.to_string(), -(left_len - i as i32 + x_left_offset)))
            .collect();
        let x_right: BTreeMap<String, i32> = labels_right
            .iter()
            .enumerate()
            .map(|(i, label)| (label.to_string(), i as i32 + x_right_offset))
            .collect();
        let y: BTreeMap<String, i32> = labels_y
            .iter()
            .enumerate()
            .map(|(i, label)| (label.to_string(), i as i32))
            .collect();

        match mode {
            AxisMode::Split => AxisIndex::Split { x_left, x_right, y },
            AxisMode::Single => {
                let mut x = x_left;
                x.extend(x_right);
                AxisIndex::Single { x, y }
            }
        }
    }

    /// Tick position of an x label on the given side.
    ///
    /// Panics if the label does not come from the plot this index was
    /// computed for.
    pub fn x_index(&self, side: Side, label: &str) -> i32 {
        match self {
            AxisIndex::Split { x_left, x_right, .. } => match side {
                Side::Left => x_left[label],
                Side::Right => x_right[label],
            },
            AxisIndex::Single { x, .. } => x[label],
        }
    }

    /// Tick position of a y label.
    ///
    /// Panics if the label does not come from the plot this index was
    /// computed for.
    pub fn y_index(&self, label: &str) -> i32 {
        match self {
            AxisIndex::Split { y, .. } | AxisIndex::Single { y, .. } => y[label],
        }
    }

    /// All x labels: left then right in split mode, the merged mapping
    /// in single mode, each in ascending order.
    pub fn x_labels(&self) -> Vec<&str> {
        match self {
            AxisIndex::Split { x_left, x_right, .. } => x_left
                .keys()
                .chain(x_right.keys())
                .map(String::as_str)
                .collect(),
            AxisIndex::Single { x, .. } => x.keys().map(String::as_str).collect(),
        }
    }

    /// All y labels in ascending order.
    pub fn y_labels(&self) -> Vec<&str> {
        match self {
            AxisIndex::Split { y, .. } | AxisIndex::Single { y, .. } => {
                y.keys().map(String::as_str).collect()
            }
        }
    }
}
