//! patternbench - LTL property-pattern translation and monitor benchmarking
//!
//! This library turns the informal property-pattern corpus of the ltl3tools
//! test suite into normalized formula records, and drives an external monitor
//! construction tool over those records one formula at a time while the tool
//! collects per-formula statistics.
//!
//! ## Module Organization
//!
//! - [`translator`] - Corpus classification, operator rewriting, the parser state machine
//! - [`driver`] - Sequential batch execution, statistics file, progress, tool runners
//! - [`models`] - Records, batch items, statistics rows
//! - [`config`] - Configuration structures and the file loader
//! - [`pipeline`] - File-level entry points wiring the pieces together
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use patternbench::{init, pipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = init(None)?;
//! pipeline::translate_file(Path::new("rv_properties.txt"), Path::new("specs.ltl"), &config.translator)?;
//! pipeline::run_file(Path::new("specs.ltl"), Path::new("statistics.csv"), &config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution Model
//!
//! Everything is single-threaded and blocking. The statistics prefix of an
//! item is appended before the tool runs for it, and the tool has exited
//! before the next item starts, so an interrupted run leaves a statistics
//! file that can be resumed.

#[macro_use]
extern crate tracing;

pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod translator;

use std::path::Path;

// Re-exports for core functionality
pub use config::{Config, ConfigLoader};
pub use driver::{BatchDriver, BatchInput, RunSummary, ToolRunner, ToolStatus};
pub use error::{Error, FormatError, Result};
pub use models::{BatchItem, InputMode, Record};
pub use translator::{PatternTranslator, RecordSink};

/// The current version of patternbench from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Load the configuration for a run
///
/// An explicit `config_path` must exist and be valid. Without one, the file
/// named by `PATTERNBENCH_CONFIG` is used, and failing that the regular
/// search paths; a broken or missing file there falls back to defaults.
///
/// # Errors
///
/// Returns an error when an explicitly named configuration file is missing,
/// unreadable, or fails validation.
pub fn init(config_path: Option<&Path>) -> Result<Config> {
    info!("Initializing {} v{}", NAME, VERSION);

    let mut loader = ConfigLoader::new();

    if let Some(path) = config_path {
        let config = loader.load_from_path(path)?;
        info!("Configuration loaded from {}", path.display());
        return Ok(config);
    }

    if let Ok(env_path) = std::env::var(config::loader::CONFIG_ENV_VAR) {
        let path = Path::new(&env_path);
        let config = loader.load_from_path(path)?;
        info!("Configuration loaded from {} (environment)", path.display());
        return Ok(config);
    }

    match loader.load_config(&config::loader::LoadOptions::default()) {
        Ok(config) => {
            match loader.current_path() {
                Some(path) => info!("Configuration loaded from {}", path.display()),
                None => debug!("No configuration file found, using defaults"),
            }
            Ok(config)
        }
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Ok(Config::default())
        }
    }
}
