//! Sampler configuration structure, validation and builder.

use crate::core::constants::*;
use crate::core::error::{Result, SamplerError};
use std::path::PathBuf;

/// Parameters for one sampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Directory whose files are scanned
    pub root_dir: PathBuf,
    /// Substring identifying the experiment variant's files
    pub evolver: String,
    /// Rows produced per simulation iteration
    pub population_size: usize,
    /// Keep groups whose index is a multiple of this value
    pub stride: usize,
    /// Field delimiter for reading and writing
    pub delimiter: u8,
    /// Substring every processed filename must contain besides the evolver
    pub file_marker: String,
    /// Column overwritten with the iteration group of each kept row
    pub stamp_column: Option<String>,
    /// Log and skip files that fail instead of aborting the run
    pub continue_on_error: bool,
    /// Compute the report without rewriting any file
    pub dry_run: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            evolver: String::new(),
            population_size: 1,
            stride: DEFAULT_STRIDE,
            delimiter: DEFAULT_DELIMITER,
            file_marker: DEFAULT_FILE_MARKER.to_string(),
            stamp_column: None,
            continue_on_error: false,
            dry_run: false,
        }
    }
}

impl SamplerConfig {
    /// Create a configuration for the given evolver and population size,
    /// all other fields at their defaults.
    pub fn new<S: Into<String>>(evolver: S, population_size: usize) -> Self {
        SamplerConfig {
            evolver: evolver.into(),
            population_size,
            ..Self::default()
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SamplerError::invalid_parameter(
                "population_size",
                self.population_size.to_string(),
                "must be a positive integer",
            ));
        }

        if self.stride == 0 {
            return Err(SamplerError::invalid_parameter(
                "stride",
                self.stride.to_string(),
                "must be a positive integer",
            ));
        }

        // An empty evolver would match every marked file in the directory
        if self.evolver.is_empty() {
            return Err(SamplerError::invalid_parameter(
                "evolver",
                "\"\"",
                "must not be empty",
            ));
        }

        // An empty marker would drop the second filename condition
        if self.file_marker.is_empty() {
            return Err(SamplerError::invalid_parameter(
                "file_marker",
                "\"\"",
                "must not be empty",
            ));
        }

        if !self.delimiter.is_ascii() || matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(SamplerError::invalid_parameter(
                "delimiter",
                (self.delimiter as char).escape_default().to_string(),
                "must be a single ASCII character other than a quote or line break",
            ));
        }

        if let Some(column) = &self.stamp_column {
            if column.is_empty() {
                return Err(SamplerError::invalid_parameter(
                    "stamp_column",
                    "\"\"",
                    "must name a column",
                ));
            }
        }

        Ok(())
    }

    /// Apply overrides looked up by variable name.
    ///
    /// Recognises [`ENV_ROOT_DIR`], [`ENV_STRIDE`] and [`ENV_DELIMITER`].
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_ROOT_DIR) {
            self.root_dir = PathBuf::from(val);
        }

        if let Some(val) = lookup(ENV_STRIDE) {
            self.stride = val
                .trim()
                .parse()
                .map_err(|_| SamplerError::config(format!("Invalid {}: {}", ENV_STRIDE, val)))?;
        }

        if let Some(val) = lookup(ENV_DELIMITER) {
            self.delimiter = parse_delimiter(&val)
                .map_err(|_| SamplerError::config(format!("Invalid {}: {}", ENV_DELIMITER, val)))?;
        }

        Ok(())
    }
}

/// Parse a delimiter given as a single ASCII character or as `\t`.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(SamplerError::invalid_parameter(
                    "delimiter",
                    value,
                    "must be a single ASCII character",
                )),
            }
        }
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: SamplerConfig,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: SamplerConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the scan root
    pub fn root_dir<P: Into<PathBuf>>(mut self, root_dir: P) -> Self {
        self.config.root_dir = root_dir.into();
        self
    }

    /// Set the evolver substring
    pub fn evolver<S: Into<String>>(mut self, evolver: S) -> Self {
        self.config.evolver = evolver.into();
        self
    }

    /// Set the population size
    pub fn population_size(mut self, population_size: usize) -> Self {
        if population_size == 0 {
            self.validation_errors
                .push("population_size must be a positive integer".to_string());
        }
        self.config.population_size = population_size;
        self
    }

    /// Set the group stride
    pub fn stride(mut self, stride: usize) -> Self {
        if stride == 0 {
            self.validation_errors
                .push("stride must be a positive integer".to_string());
        }
        self.config.stride = stride;
        self
    }

    /// Set the field delimiter
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set the filename marker
    pub fn file_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.config.file_marker = marker.into();
        self
    }

    /// Overwrite `column` with the group index of each kept row
    pub fn stamp_column<S: Into<String>>(mut self, column: Option<S>) -> Self {
        self.config.stamp_column = column.map(Into::into);
        self
    }

    /// Isolate per-file failures
    pub fn continue_on_error(mut self, enabled: bool) -> Self {
        self.config.continue_on_error = enabled;
        self
    }

    /// Leave files untouched
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.config.dry_run = enabled;
        self
    }

    /// Apply environment variable overrides on top of the current values
    pub fn with_environment(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name on top of the current values
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Err(e) = self.config.apply_overrides_from(lookup) {
            self.validation_errors.push(e.to_string());
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SamplerConfig> {
        if !self.validation_errors.is_empty() {
            return Err(SamplerError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
