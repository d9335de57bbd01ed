//! bubbletex - generate the LaTeX source files for bubble plots.
//!
//! A bubble plot has three facets: one on the y axis and two sharing a
//! split x axis, one to the left of center and one to the right. Each
//! distinct (x-label, y-label) pair seen in the input records becomes one
//! bubble, sized by how many records produced it and colored by the
//! earliest year among them.
//!
//! # Pipeline
//!
//! 1. [`plot::compute_occurrences_from`] aggregates records into a
//!    [`BubblePlot`] and the set of distinct years.
//! 2. [`scale::AxisIndex`] assigns integer axis positions to labels and
//!    [`scale::year_score_mapping`] assigns colormap scores to years.
//! 3. [`writer::CsvWriter`] emits the plot data as a CSV table.
//! 4. [`writer::LatexWriter`] fills a pgfplots template with the computed
//!    values and writes it next to the table.
//!
//! Both output files are named from the canonical plot identifier, the
//! underscore-joined left, y, and right facet names.

use std::fmt;

use thiserror::Error;

pub mod config;
pub mod plot;
pub mod reader;
pub mod scale;
pub mod template;
pub mod writer;

pub use config::Config;
pub use plot::{compute_occurrences_from, Bubble, BubblePlot, Facets, Occurrence, Record};
pub use scale::{year_score_mapping, AxisIndex, AxisMode};
pub use writer::{CsvWriter, LatexWriter, TableSummary};

/// Crate version, exposed for the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Which plot axis a facet lookup was performed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Errors produced while building bubble plot outputs.
#[derive(Debug, Error)]
pub enum BubbletexError {
    /// A record lacks one of the configured facet fields.
    #[error("unknown facet named {facet:?} on the {axis} axis")]
    MissingFacet { facet: String, axis: Axis },

    /// A record lacks the configured year field.
    #[error("record is missing the year field {field:?}")]
    MissingYearField { field: String },

    /// Colormap scores spread years over a fixed span and need at least
    /// two distinct years to do so.
    #[error("need at least two distinct years to compute colormap scores, got {distinct}")]
    InsufficientYears { distinct: usize },

    /// The template references a placeholder no value was supplied for.
    #[error("template references ${{{name}}} but no such value was supplied")]
    UndefinedPlaceholder { name: String },

    /// The configuration is structurally invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A configured palette color could not be parsed.
    #[error("invalid palette color: {0}")]
    InvalidColor(#[from] csscolorparser::ParseColorError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BubbletexError>;

/// Build and save every plot plan against the same record set.
///
/// For each plan this aggregates the records, computes the axis and
/// colormap mappings, writes the CSV data file, and fills the LaTeX
/// template. A failure aborts the plot being processed; plots already
/// written stay on disk.
pub fn build_and_save_plots(records: &[Record], plans: &[Facets], conf: &Config) -> Result<()> {
    conf.validate()?;
    for plan in plans {
        let (plot, years) = compute_occurrences_from(records, plan, &conf.year_field)?;
        let index = AxisIndex::compute(&plot, conf.axis_mode, conf.x_left_offset, conf.x_right_offset);
        let year_scores = year_score_mapping(&years)?;
        let summary = CsvWriter::new(&plot, &index, &year_scores, conf).save()?;
        LatexWriter::new(&plot, &years, conf, &summary).save()?;
        tracing::info!(plot = %plot, "saved bubble plot data and template");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_config(output_dir: PathBuf) -> Config {
        Config {
            x_left_offset: 1,
            x_right_offset: 2,
            year_field: "year".into(),
            field_names: vec![
                "y_index".into(),
                "x_index".into(),
                "occurrence".into(),
                "year".into(),
                "y_label".into(),
                "x_label".into(),
            ],
            latex_template: output_dir.join("template.tex"),
            output_dir,
            color_map: Vec::new(),
            axis_mode: AxisMode::Split,
        }
    }

    const TEMPLATE: &str = "\
${defineColorsYear}
xmin=${xMin}, xmax=${xMax}
ylabel=${yLabel}
table: ${CSVDataFile} (${yIndexField}, ${xIndexField}, ${meta}, ${yearField}, ${yField}, ${xField})
${xLeftLabel} | ${xRightLabel}
years: ${colorsYear}
${setColorsYear}
";

    #[test]
    fn test_build_and_save_plots_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let conf = sample_config(dir.path().to_path_buf());
        std::fs::write(&conf.latex_template, TEMPLATE).unwrap();

        let records = vec![
            record(&[("kind", "a"), ("tool", "t1"), ("lang", "rs"), ("year", "2018")]),
            record(&[("kind", "a"), ("tool", "t1"), ("lang", "py"), ("year", "2020")]),
            record(&[("kind", "b"), ("tool", "t2"), ("lang", "rs"), ("year", "2019")]),
        ];
        let plans = vec![Facets {
            y: "kind".into(),
            x_left: "tool".into(),
            x_right: "lang".into(),
        }];

        build_and_save_plots(&records, &plans, &conf).unwrap();

        let csv = std::fs::read_to_string(dir.path().join("tool_kind_lang.csv")).unwrap();
        assert!(csv.starts_with("y_index,x_index,occurrence,year,y_label,x_label\r\n"));
        // Two left bubbles, three right bubbles.
        assert_eq!(csv.trim_end().lines().count(), 1 + 5);

        let tex = std::fs::read_to_string(dir.path().join("tool_kind_lang.tex")).unwrap();
        assert!(tex.contains("ylabel=kind"));
        assert!(tex.contains("table: tool_kind_lang.csv"));
        assert!(tex.contains("tool | lang"));
        assert!(tex.contains("years: 2018, 2019, 2020"));
        assert!(tex.contains("\\definecolor{2018}{rgb}{"));
        assert!(!tex.contains("${"));
    }

    #[test]
    fn test_single_distinct_year_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let conf = sample_config(dir.path().to_path_buf());
        std::fs::write(&conf.latex_template, TEMPLATE).unwrap();

        let records = vec![record(&[
            ("kind", "a"),
            ("tool", "t1"),
            ("lang", "rs"),
            ("year", "2018"),
        ])];
        let plans = vec![Facets {
            y: "kind".into(),
            x_left: "tool".into(),
            x_right: "lang".into(),
        }];

        let err = build_and_save_plots(&records, &plans, &conf).unwrap_err();
        assert!(matches!(err, BubbletexError::InsufficientYears { distinct: 1 }));
        assert!(!dir.path().join("tool_kind_lang.csv").exists());
    }
}
