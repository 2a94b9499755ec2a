//! Default values shared by the configuration layer, the CLI and the sampler.

/// Directory scanned when no root is given.
pub const DEFAULT_ROOT_DIR: &str = "./output_new_terrains/";

/// Substring every processed filename must contain besides the evolver name.
pub const DEFAULT_FILE_MARKER: &str = "all";

/// Keep every n-th iteration group.
pub const DEFAULT_STRIDE: usize = 10;

/// Field delimiter of simulation output tables.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Column holding the iteration counter in simulation output tables.
pub const ITERATIONS_COLUMN: &str = "event→iterations";

/// `ITERATIONS_COLUMN` after its UTF-8 bytes were decoded as Windows-1252
/// and re-encoded. Some output files carry this header.
pub const MANGLED_ITERATIONS_COLUMN: &str = "event\u{e2}\u{2020}\u{2019}iterations";

/// Environment variable overriding the scan root.
pub const ENV_ROOT_DIR: &str = "SAMPLER_ROOT_DIR";

/// Environment variable overriding the group stride.
pub const ENV_STRIDE: &str = "SAMPLER_STRIDE";

/// Environment variable overriding the field delimiter.
pub const ENV_DELIMITER: &str = "SAMPLER_DELIMITER";
