//! # Iteration Sampler
//!
//! Down-samples simulation output tables in place. Each table holds one row
//! per individual and `population_size` rows per iteration; the sampler keeps
//! every tenth iteration plus the final one and rewrites the file with only
//! those rows.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iteration_sampler::{ConfigBuilder, Sampler};
//!
//! # fn main() -> iteration_sampler::Result<()> {
//! iteration_sampler::init();
//!
//! let config = ConfigBuilder::new()
//!     .root_dir("./output_new_terrains/")
//!     .evolver("cma")
//!     .population_size(100)
//!     .build()?;
//!
//! let report = Sampler::new(config)?.run()?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: error types, defaults and logging bootstrap
//! - [`config`]: run configuration, builder and environment overrides
//! - [`table`]: reading and writing `;`-delimited tables
//! - [`sampling`]: iteration groups and the keep rule
//! - [`sampler`]: directory scan and in-place rewrite
//!
//! Sampling is destructive and not idempotent: a second pass over an already
//! sampled file recomputes row positions and drops more rows.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

pub mod config;
pub mod core;
pub mod sampler;
pub mod sampling;
pub mod table;

pub use crate::config::{parse_delimiter, ConfigBuilder, SamplerConfig};
pub use crate::core::{
    constants::*,
    error::{Result, SamplerError},
};
pub use crate::sampler::{FailedFile, FileFilter, FileReport, SampleReport, Sampler};
pub use crate::sampling::{iteration_group, SampledTable, SamplingPlan};
pub use crate::table::{CsvConfig, CsvTableIo, Table};

/// Initialize logging for the library and its binary.
///
/// Defaults the log level to `info` when `RUST_LOG` is unset.
pub fn init() {
    crate::core::initialize_logging();
}
