//! Configuration for a sampling run.
//!
//! A [`SamplerConfig`] is assembled through [`ConfigBuilder`], optionally
//! layered over environment variables, and validated before the sampler
//! touches any file. There is no configuration file.

pub mod core;

pub use self::core::{parse_delimiter, ConfigBuilder, SamplerConfig};
