//! CSV table writer
//!
//! Serializes a populated plot into the delimited table consumed by the
//! pgfplots template: one row per bubble plus the tick label lists as
//! trailing columns, padded with empty cells where the lists outrun the
//! bubble rows.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use csv::{Terminator, WriterBuilder};
use tracing::debug;

use crate::config::Config;
use crate::plot::{BubblePlot, Side};
use crate::scale::AxisIndex;
use crate::Result;

/// Facts about a written table, handed to the LaTeX writer so it never
/// has to read the file back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    /// Where the table was written.
    pub path: PathBuf,
    /// Smallest x tick index among the rows.
    pub x_min: i32,
    /// Largest x tick index among the rows.
    pub x_max: i32,
}

/// Saves one bubble plot as a CSV file.
pub struct CsvWriter<'a> {
    plot: &'a BubblePlot,
    index: &'a AxisIndex,
    year_scores: &'a BTreeMap<String, i32>,
    conf: &'a Config,
}

impl<'a> CsvWriter<'a> {
    pub fn new(
        plot: &'a BubblePlot,
        index: &'a AxisIndex,
        year_scores: &'a BTreeMap<String, i32>,
        conf: &'a Config,
    ) -> Self {
        Self {
            plot,
            index,
            year_scores,
            conf,
        }
    }

    /// One row per bubble, left side then right, sorted by x index.
    ///
    /// The sort is stable, so bubbles sharing an x index keep their
    /// encounter order. Columns are y index, x index, occurrence count,
    /// year score.
    fn prepared_rows(&self) -> Vec<(i32, i32, u32, i32)> {
        let sides = [
            (Side::Left, &self.plot.x_axis.left),
            (Side::Right, &self.plot.x_axis.right),
        ];
        let mut rows = Vec::new();
        for (side, axis) in sides {
            for (bubble, occurrence) in &axis.bubbles {
                rows.push((
                    self.index.y_index(&bubble.label_y),
                    self.index.x_index(side, &bubble.label_x),
                    occurrence.count,
                    self.year_scores[&occurrence.earliest_year],
                ));
            }
        }
        rows.sort_by_key(|&(_, x_index, _, _)| x_index);
        rows
    }

    /// Write the table to `{output_dir}/{identifier}.csv`.
    ///
    /// Rows use CRLF terminators and standard quoting. The file is
    /// written to a temporary sibling and renamed into place so a failed
    /// run leaves no partial table behind.
    pub fn save(&self) -> Result<TableSummary> {
        let rows = self.prepared_rows();
        let labels_y = self.index.y_labels();
        let labels_x = self.index.x_labels();

        let path = self.conf.output_dir.join(format!("{}.csv", self.plot));
        let tmp = path.with_extension("csv.tmp");
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_path(&tmp)?;
        writer.write_record(&self.conf.field_names)?;

        let height = rows.len().max(labels_y.len()).max(labels_x.len());
        for i in 0..height {
            let (y_index, x_index, count, score) = match rows.get(i) {
                Some(&(y, x, c, s)) => {
                    (y.to_string(), x.to_string(), c.to_string(), s.to_string())
                }
                None => Default::default(),
            };
            writer.write_record([
                y_index.as_str(),
                x_index.as_str(),
                count.as_str(),
                score.as_str(),
                labels_y.get(i).copied().unwrap_or_default(),
                labels_x.get(i).copied().unwrap_or_default(),
            ])?;
        }
        writer.flush()?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), rows = height, "wrote bubble plot table");

        // Rows are sorted by x index, so the range is at the ends.
        Ok(TableSummary {
            path,
            x_min: rows.first().map(|&(_, x, _, _)| x).unwrap_or_default(),
            x_max: rows.last().map(|&(_, x, _, _)| x).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{compute_occurrences_from, Facets, Record};
    use crate::scale::{year_score_mapping, AxisMode};

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_records() -> Vec<Record> {
        vec![
            record(&[("Y", "0"), ("XL", "1"), ("XR", "2"), ("year", "2018")]),
            record(&[("Y", "3"), ("XL", "4"), ("XR", "4"), ("year", "2020")]),
            record(&[("Y", "6"), ("XL", "7"), ("XR", "7"), ("year", "2019")]),
        ]
    }

    fn sample_config(output_dir: std::path::PathBuf) -> Config {
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

    #[test]
    fn test_save_writes_padded_table() {
        let dir = tempfile::tempdir().unwrap();
        let conf = sample_config(dir.path().to_path_buf());
        let plan = Facets {
            y: "Y".into(),
            x_left: "XL".into(),
            x_right: "XR".into(),
        };
        let (plot, years) = compute_occurrences_from(&sample_records(), &plan, "year").unwrap();
        let index = AxisIndex::compute(&plot, conf.axis_mode, 1, 2);
        let scores = year_score_mapping(&years).unwrap();

        let summary = CsvWriter::new(&plot, &index, &scores, &conf).save().unwrap();
        assert_eq!(summary.x_min, -4);
        assert_eq!(summary.x_max, 4);
        assert_eq!(summary.path, dir.path().join("XL_Y_XR.csv"));

        let content = std::fs::read_to_string(&summary.path).unwrap();
        let expected = "y_index,x_index,occurrence,year,y_label,x_label\r\n\
                        0,-4,1,0,0,1\r\n\
                        1,-3,1,1000,3,4\r\n\
                        2,-2,1,500,6,7\r\n\
                        0,2,1,0,,2\r\n\
                        1,3,1,1000,,4\r\n\
                        2,4,1,500,,7\r\n";
        assert_eq!(content, expected);
    }

    #[test]
    fn test_save_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let conf = sample_config(dir.path().to_path_buf());
        let plan = Facets {
            y: "Y".into(),
            x_left: "XL".into(),
            x_right: "XR".into(),
        };
        let (plot, years) = compute_occurrences_from(&sample_records(), &plan, "year").unwrap();
        let index = AxisIndex::compute(&plot, conf.axis_mode, 1, 2);
        let scores = year_score_mapping(&years).unwrap();
        CsvWriter::new(&plot, &index, &scores, &conf).save().unwrap();

        assert!(!dir.path().join("XL_Y_XR.csv.tmp").exists());
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        // Two bubbles share the right-side x label "4" and thus one x
        // index; the first-seen record must come first.
        let records = vec![
            record(&[("Y", "b"), ("XL", "1"), ("XR", "4"), ("year", "2019")]),
            record(&[("Y", "a"), ("XL", "1"), ("XR", "4"), ("year", "2018")]),
        ];
        let dir = tempfile::tempdir().unwrap();
        let conf = sample_config(dir.path().to_path_buf());
        let plan = Facets {
            y: "Y".into(),
            x_left: "XL".into(),
            x_right: "XR".into(),
        };
        let (plot, years) = compute_occurrences_from(&records, &plan, "year").unwrap();
        let index = AxisIndex::compute(&plot, conf.axis_mode, 0, 0);
        let scores = year_score_mapping(&years).unwrap();

        let rows = CsvWriter::new(&plot, &index, &scores, &conf).prepared_rows();
        // Right-side rows: (y="b", x=0) seen before (y="a", x=0).
        assert_eq!(rows[2], (1, 0, 1, 1000));
        assert_eq!(rows[3], (0, 0, 1, 0));
    }
}
