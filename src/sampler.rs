//! Directory-level sampling run.
//!
//! [`Sampler::run`] scans the configured root, selects files through a
//! [`FileFilter`], and rewrites each selected table in place with only the
//! rows its [`SamplingPlan`] keeps. Files are processed one at a time; the
//! rewrite is destructive and keeps no backup.

use crate::config::SamplerConfig;
use crate::core::error::{Result, SamplerError};
use crate::sampling::SamplingPlan;
use crate::table::CsvTableIo;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename selection: both substrings must occur in the name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    marker: String,
    evolver: String,
}

impl FileFilter {
    /// Create a filter requiring `marker` and `evolver`
    pub fn new<M: Into<String>, E: Into<String>>(marker: M, evolver: E) -> Self {
        FileFilter {
            marker: marker.into(),
            evolver: evolver.into(),
        }
    }

    /// Filter described by a sampler configuration
    pub fn from_config(config: &SamplerConfig) -> Self {
        Self::new(config.file_marker.clone(), config.evolver.clone())
    }

    /// Whether `file_name` is selected
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.contains(self.marker.as_str()) && file_name.contains(self.evolver.as_str())
    }
}

/// Outcome for one rewritten (or, in a dry run, inspected) file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File that was sampled
    pub path: PathBuf,
    /// Data rows before sampling
    pub rows_before: usize,
    /// Data rows after sampling
    pub rows_after: usize,
    /// Iteration groups found before sampling
    pub groups: usize,
    /// Whether the group index was written into a column
    pub stamped: bool,
    /// Whether the file was left untouched
    pub dry_run: bool,
}

/// A selected file that could not be sampled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    /// Offending file
    pub path: PathBuf,
    /// Error category
    pub category: String,
    /// Rendered error
    pub error: String,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleReport {
    /// Sampled files, in processing order
    pub files: Vec<FileReport>,
    /// Directory entries not selected by the filter
    pub skipped: usize,
    /// Selected files that failed, only populated with `continue_on_error`
    pub failed: Vec<FailedFile>,
}

impl SampleReport {
    /// Data rows across sampled files before sampling
    pub fn rows_before(&self) -> usize {
        self.files.iter().map(|f| f.rows_before).sum()
    }

    /// Data rows across sampled files after sampling
    pub fn rows_after(&self) -> usize {
        self.files.iter().map(|f| f.rows_after).sum()
    }

    /// Whether every selected file was sampled
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "sampled {} file(s), {} -> {} rows, {} skipped, {} failed",
            self.files.len(),
            self.rows_before(),
            self.rows_after(),
            self.skipped,
            self.failed.len()
        )
    }
}

/// Rewrites every selected table under the configured root
#[derive(Debug, Clone)]
pub struct Sampler {
    config: SamplerConfig,
    plan: SamplingPlan,
    filter: FileFilter,
    io: CsvTableIo,
}

impl Sampler {
    /// Create a sampler; fails when the configuration is invalid
    pub fn new(config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        let plan = SamplingPlan::from_config(&config)?;
        let filter = FileFilter::from_config(&config);
        let io = CsvTableIo::new().with_delimiter(config.delimiter);
        Ok(Sampler {
            config,
            plan,
            filter,
            io,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Get the sampling plan
    pub fn plan(&self) -> &SamplingPlan {
        &self.plan
    }

    /// Sample every selected file under the root directory
    pub fn run(&self) -> Result<SampleReport> {
        let root = self.config.root_dir.as_path();
        log::info!(
            "Sampling '{}' files in {} (population size {}, stride {})",
            self.config.evolver,
            root.display(),
            self.plan.population_size(),
            self.plan.stride()
        );

        let (selected, skipped) = self.select_files(root)?;
        let mut report = SampleReport {
            skipped,
            ..SampleReport::default()
        };

        for path in selected {
            match self.sample_file(&path) {
                Ok(file_report) => report.files.push(file_report),
                Err(e) if self.config.continue_on_error && e.is_per_file() => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    report.failed.push(FailedFile {
                        path,
                        category: e.category().to_string(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        log::info!("{}", report.summary());
        Ok(report)
    }

    /// Selected regular files under `root` in name order, plus the number of
    /// entries left alone
    fn select_files(&self, root: &Path) -> Result<(Vec<PathBuf>, usize)> {
        if !root.is_dir() {
            return Err(SamplerError::directory_not_found(root));
        }

        let mut entries = fs::read_dir(root)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        let mut selected = Vec::new();
        let mut skipped = 0;
        for path in entries {
            let name_matches = path
                .file_name()
                .map_or(false, |name| self.filter.matches(&name.to_string_lossy()));
            if name_matches && path.is_file() {
                selected.push(path);
            } else {
                log::debug!("Leaving {} untouched", path.display());
                skipped += 1;
            }
        }

        log::debug!("Selected {} file(s), skipped {}", selected.len(), skipped);
        Ok((selected, skipped))
    }

    /// Sample one file in place
    pub fn sample_file(&self, path: &Path) -> Result<FileReport> {
        let table = self.io.read(path)?;

        let stamp_index = match self.config.stamp_column.as_deref() {
            Some(column) => {
                let index = table.column_index(column);
                if index.is_none() {
                    log::warn!(
                        "Column '{}' not found in {}, writing without group stamps",
                        column,
                        path.display()
                    );
                }
                index
            }
            None => None,
        };

        let sampled = self.plan.apply(table, stamp_index);
        let report = FileReport {
            path: path.to_path_buf(),
            rows_before: sampled.rows_before,
            rows_after: sampled.rows_after(),
            groups: sampled.num_groups,
            stamped: stamp_index.is_some(),
            dry_run: self.config.dry_run,
        };

        if self.config.dry_run {
            log::info!(
                "Would sample {}: {} -> {} rows",
                path.display(),
                report.rows_before,
                report.rows_after
            );
        } else {
            self.io.write(path, &sampled.table)?;
            log::info!(
                "Sampled {}: {} -> {} rows across {} groups",
                path.display(),
                report.rows_before,
                report.rows_after,
                report.groups
            );
        }

        Ok(report)
    }
}
