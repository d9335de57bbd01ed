//! LaTeX template writer
//!
//! Binds the computed plot values (year colors, x range, axis labels,
//! column names) into the pgfplots template and writes the result next
//! to the CSV table.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use tracing::debug;

use crate::config::Config;
use crate::plot::BubblePlot;
use crate::scale::color::{ColorSource, HueWheel, PaletteColors, Rgb};
use crate::template;
use crate::writer::TableSummary;
use crate::Result;

/// Placeholder names the writer supplies to the template.
pub const SUPPLIED_PLACEHOLDERS: &[&str] = &[
    "defineColorsYear",
    "setColorsYear",
    "xMin",
    "xMax",
    "yLabel",
    "meta",
    "xField",
    "xIndexField",
    "yField",
    "yIndexField",
    "yearField",
    "xLeftLabel",
    "xRightLabel",
    "CSVDataFile",
    "colorsYear",
];

/// Fills the LaTeX template for one bubble plot.
pub struct LatexWriter<'a> {
    plot: &'a BubblePlot,
    /// Distinct years, ascending.
    years: Vec<&'a str>,
    conf: &'a Config,
    summary: &'a TableSummary,
}

impl<'a> LatexWriter<'a> {
    pub fn new(
        plot: &'a BubblePlot,
        years: &'a BTreeSet<String>,
        conf: &'a Config,
        summary: &'a TableSummary,
    ) -> Self {
        Self {
            plot,
            years: years.iter().map(String::as_str).collect(),
            conf,
            summary,
        }
    }

    /// Pick the color source: the configured palette when it covers
    /// every year, otherwise evenly spaced hues.
    fn color_source(&self) -> Result<Box<dyn ColorSource>> {
        let palette = self.conf.palette()?;
        if self.years.len() <= palette.len() {
            Ok(Box::new(PaletteColors::new(palette)))
        } else {
            Ok(Box::new(HueWheel))
        }
    }

    /// Values filled into the template.
    fn prepare_values(&self, colors: &BTreeMap<String, Rgb>) -> BTreeMap<String, String> {
        let define_colors = self
            .years
            .iter()
            .map(|year| {
                let (r, g, b) = colors[*year];
                format!("\\definecolor{{{year}}}{{rgb}}{{{r}, {g}, {b}}}")
            })
            .collect::<Vec<_>>()
            .join("\n");
        let set_colors = self
            .years
            .iter()
            .map(|year| format!("color=({year}),"))
            .collect::<Vec<_>>()
            .join("\n    ");

        let mut values = BTreeMap::new();
        let mut set = |name: &str, value: String| {
            values.insert(name.to_string(), value);
        };
        set("defineColorsYear", define_colors);
        set("setColorsYear", set_colors);
        set("xMin", self.summary.x_min.to_string());
        set("xMax", self.summary.x_max.to_string());
        set("yLabel", self.plot.y_axis.clone());
        set("meta", self.conf.count_field().to_string());
        set("xField", self.conf.x_label_field().to_string());
        set("xIndexField", self.conf.x_index_field().to_string());
        set("yField", self.conf.y_label_field().to_string());
        set("yIndexField", self.conf.y_index_field().to_string());
        set("yearField", self.conf.year_field_name().to_string());
        set("xLeftLabel", self.plot.x_axis.left.facet.clone());
        set("xRightLabel", self.plot.x_axis.right.facet.clone());
        set("CSVDataFile", format!("{}.csv", self.plot));
        set("colorsYear", self.years.join(", "));
        values
    }

    /// Fill the template and write `{output_dir}/{identifier}.tex`.
    ///
    /// Like the table writer, the file goes through a temporary sibling
    /// renamed into place on success.
    pub fn save(&self) -> Result<()> {
        let colors = self.color_source()?.assign(&self.years);
        let values = self.prepare_values(&colors);
        let text = fs::read_to_string(&self.conf.latex_template)?;
        let content = template::substitute(&text, &values)?;

        let path = self.conf.output_dir.join(format!("{}.tex", self.plot));
        let tmp = path.with_extension("tex.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "wrote bubble plot template");
        Ok(())
    }
}
