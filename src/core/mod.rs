//! Core infrastructure: error types, defaults and logging bootstrap.
//!
//! - [`constants`]: default scan root, file marker, stride and delimiter
//! - [`error`]: [`SamplerError`] and the crate-wide [`Result`] alias

pub mod constants;
pub mod error;

pub use constants::*;
pub use error::{Result, SamplerError};

/// Initialize the logging subsystem.
///
/// Defaults `RUST_LOG` to `info` when unset. Calling this more than once is
/// harmless.
pub fn initialize_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    // Ignore the error raised when a logger is already installed
    let _ = env_logger::try_init();
}
