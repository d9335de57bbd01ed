/*!
bubbletex command line interface

Aggregates labeled records into bubble plot datasets and emits, per plot
plan, a CSV data file plus a filled pgfplots template.
*/

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use bubbletex::writer::SUPPLIED_PLACEHOLDERS;
use bubbletex::{build_and_save_plots, reader, template, Config, Facets, VERSION};

#[derive(Parser)]
#[command(name = "bubbletex")]
#[command(about = "Generate pgfplots bubble plot data and LaTeX sources")]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate records and write the CSV and TeX files for each plot plan
    Build {
        /// Path to the JSON build spec (settings plus plot plans)
        #[arg(long)]
        config: PathBuf,

        /// Delimited records file with a header row
        #[arg(long)]
        records: PathBuf,

        /// Override the configured output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Check a build spec and its template without writing any output
    Validate {
        /// Path to the JSON build spec
        #[arg(long)]
        config: PathBuf,
    },
}

/// A config plus the plot plans to build with it.
#[derive(Deserialize)]
struct BuildSpec {
    #[serde(flatten)]
    config: Config,
    plots: Vec<Facets>,
}

impl BuildSpec {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            config,
            records,
            output_dir,
        } => {
            let mut spec = BuildSpec::from_path(&config)?;
            if let Some(dir) = output_dir {
                spec.config.output_dir = dir;
            }
            let records = reader::read_records(&records)?;
            build_and_save_plots(&records, &spec.plots, &spec.config)?;
            println!(
                "Wrote {} plot(s) to {}",
                spec.plots.len(),
                spec.config.output_dir.display()
            );
        }
        Commands::Validate { config } => {
            let spec = BuildSpec::from_path(&config)?;
            spec.config.validate()?;

            let text = fs::read_to_string(&spec.config.latex_template)?;
            let supplied: BTreeSet<&str> = SUPPLIED_PLACEHOLDERS.iter().copied().collect();
            for name in template::placeholders(&text) {
                if !supplied.contains(name.as_str()) {
                    anyhow::bail!("template references unknown placeholder ${{{name}}}");
                }
            }
            println!(
                "OK: {} plot plan(s), all template placeholders resolvable",
                spec.plots.len()
            );
        }
    }
    Ok(())
}
