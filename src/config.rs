//! Plot generation settings
//!
//! One [`Config`] covers every plot of a run: axis offsets, the year
//! field, output column names, the template location, the output
//! directory, and an optional year palette. Configs deserialize from
//! JSON for the CLI but can be built directly in code.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scale::color::Rgb;
use crate::scale::AxisMode;
use crate::{BubbletexError, Result};

/// Number of columns in the generated CSV table.
pub const FIELD_COUNT: usize = 6;

/// Custom settings for bubble plot generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Offset of the first x tick to the left of the y axis.
    pub x_left_offset: i32,
    /// Offset of the first x tick to the right of the y axis.
    pub x_right_offset: i32,
    /// Record field holding the publication year.
    pub year_field: String,
    /// Column names of the output table, in order: y index, x index,
    /// occurrence count, year score, y label, x label.
    pub field_names: Vec<String>,
    /// Path to the LaTeX template.
    pub latex_template: PathBuf,
    /// Directory where the generated CSV and TeX files are saved.
    pub output_dir: PathBuf,
    /// Year palette as CSS color strings, used when it has at least as
    /// many entries as there are distinct years.
    #[serde(default)]
    pub color_map: Vec<String>,
    /// How the two halves of the x axis are indexed.
    #[serde(default)]
    pub axis_mode: AxisMode,
}

impl Config {
    /// Load a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check structural validity: exactly [`FIELD_COUNT`] column names
    /// and a parseable palette.
    pub fn validate(&self) -> Result<()> {
        if self.field_names.len() != FIELD_COUNT {
            return Err(BubbletexError::Config(format!(
                "expected {FIELD_COUNT} field names, got {}",
                self.field_names.len()
            )));
        }
        self.palette()?;
        Ok(())
    }

    /// Parse the configured palette into RGB triples.
    pub fn palette(&self) -> Result<Vec<Rgb>> {
        self.color_map
            .iter()
            .map(|spec| {
                let color = csscolorparser::parse(spec)?;
                let [r, g, b, _] = color.to_array();
                Ok((r, g, b))
            })
            .collect()
    }

    /// Column name holding the y tick index.
    pub fn y_index_field(&self) -> &str {
        &self.field_names[0]
    }

    /// Column name holding the x tick index.
    pub fn x_index_field(&self) -> &str {
        &self.field_names[1]
    }

    /// Column name holding the occurrence count.
    pub fn count_field(&self) -> &str {
        &self.field_names[2]
    }

    /// Column name holding the year score.
    pub fn year_field_name(&self) -> &str {
        &self.field_names[3]
    }

    /// Column name holding the y tick labels.
    pub fn y_label_field(&self) -> &str {
        &self.field_names[4]
    }

    /// Column name holding the x tick labels.
    pub fn x_label_field(&self) -> &str {
        &self.field_names[5]
    }
}
