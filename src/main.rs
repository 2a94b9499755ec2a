//! Iteration sampler CLI.
//!
//! Usage: `iteration-sampler <evolver> <population_size> [options]`

use anyhow::{bail, Context, Result};
use clap::Parser;
use iteration_sampler::{parse_delimiter, ConfigBuilder, SampleReport, Sampler, SamplerConfig};
use std::path::PathBuf;

/// Keep every tenth iteration (and the last) of simulation output tables
#[derive(Parser, Debug)]
#[command(name = "iteration-sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Substring a filename must contain to be processed
    evolver: String,

    /// Rows written per simulation iteration
    population_size: usize,

    /// Directory to scan [default: ./output_new_terrains/, or $SAMPLER_ROOT_DIR]
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Keep groups whose index is a multiple of this value [default: 10]
    #[arg(short, long)]
    stride: Option<usize>,

    /// Field delimiter, a single character or `\t` [default: ;]
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Second substring a filename must contain
    #[arg(long, default_value = iteration_sampler::DEFAULT_FILE_MARKER)]
    marker: String,

    /// Overwrite this column with each kept row's iteration group
    #[arg(long, value_name = "COLUMN")]
    stamp_column: Option<String>,

    /// Log failing files and continue with the rest
    #[arg(short, long)]
    keep_going: bool,

    /// Report what would change without rewriting any file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Defaults, then environment, then command line flags
    fn to_config(&self) -> Result<SamplerConfig> {
        self.to_config_with(|key| std::env::var(key).ok())
    }

    fn to_config_with<F>(&self, lookup: F) -> Result<SamplerConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ConfigBuilder::new()
            .evolver(self.evolver.as_str())
            .population_size(self.population_size)
            .file_marker(self.marker.as_str())
            .stamp_column(self.stamp_column.clone())
            .continue_on_error(self.keep_going)
            .dry_run(self.dry_run)
            .with_overrides_from(lookup);

        if let Some(root) = &self.root {
            builder = builder.root_dir(root.clone());
        }
        if let Some(stride) = self.stride {
            builder = builder.stride(stride);
        }
        if let Some(delimiter) = &self.delimiter {
            builder = builder.delimiter(parse_delimiter(delimiter)?);
        }

        Ok(builder.build()?)
    }
}

fn print_report(report: &SampleReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.summary());
        for failed in &report.failed {
            eprintln!("failed: {}: {}", failed.path.display(), failed.error);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    iteration_sampler::init();
    let cli = Cli::parse();

    let config = cli.to_config().context("invalid configuration")?;
    let sampler = Sampler::new(config)?;
    let report = sampler
        .run()
        .with_context(|| format!("sampling {} failed", sampler.config().root_dir.display()))?;

    print_report(&report, cli.json)?;

    if !report.is_success() {
        bail!("{} file(s) could not be sampled", report.failed.len());
    }
    Ok(())
}
