//! Configuration management for patternbench
//!
//! Configuration covers the external tool command line, the translator
//! policies, and the batch driver behaviour. Every section has defaults that
//! reproduce the classic experiment setup, so running without a config file
//! is the normal case.

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::InputMode;
use crate::translator::{CorpusFormat, HeaderBinding, DEFAULT_TT_PLACEHOLDER};

/// Main configuration structure for patternbench
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool configuration
    pub tool: ToolConfig,

    /// Corpus translation configuration
    pub translator: TranslatorConfig,

    /// Batch driver configuration
    pub driver: DriverConfig,
}

impl Config {
    /// Check invariants the rest of the crate relies on
    pub fn validate(&self) -> Result<()> {
        if self.tool.program.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "tool.program".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let placeholder = &self.translator.tt_placeholder;
        if placeholder.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "translator.tt_placeholder".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if placeholder.contains("tt") {
            return Err(Error::ConfigValidationFailed {
                field: "translator.tt_placeholder".to_string(),
                reason: format!("'{}' would reintroduce the 'tt' token", placeholder),
            });
        }

        if self.driver.progress_interval == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "driver.progress_interval".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Which monitor constructions the external tool performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Rltl,
    Ltl,
    /// Both constructions, one statistics column each
    #[default]
    Both,
}

impl AnalysisMode {
    /// Token passed on the tool command line
    pub fn as_arg(self) -> &'static str {
        match self {
            AnalysisMode::Rltl => "rltl",
            AnalysisMode::Ltl => "ltl",
            AnalysisMode::Both => "both",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rltl" => Ok(AnalysisMode::Rltl),
            "ltl" => Ok(AnalysisMode::Ltl),
            "both" => Ok(AnalysisMode::Both),
            other => Err(format!("unknown analysis mode '{}'", other)),
        }
    }
}

/// What the driver does when the tool exits non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Treat the item as done and continue
    #[default]
    Ignore,
    /// Stop the run with an error
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(FailurePolicy::Ignore),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!("unknown failure policy '{}'", other)),
        }
    }
}

/// How an already existing statistics file is treated before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExistingStatsPolicy {
    /// Keep the content and add new rows after it
    #[default]
    Append,
    /// Truncate the file
    Clear,
    /// Refuse to run
    Fail,
}

impl FromStr for ExistingStatsPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" | "a" => Ok(ExistingStatsPolicy::Append),
            "clear" | "c" => Ok(ExistingStatsPolicy::Clear),
            "fail" | "quit" | "q" => Ok(ExistingStatsPolicy::Fail),
            other => Err(format!("unknown policy for existing statistics '{}'", other)),
        }
    }
}

/// External tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable to run
    pub program: String,

    /// Fixed arguments placed before the per-formula ones
    pub args: Vec<String>,

    /// Analysis mode token
    pub mode: AnalysisMode,

    /// Directory the tool runs in, the current one when unset
    pub working_directory: Option<PathBuf>,

    /// Reaction to a non-zero exit status
    pub on_failure: FailurePolicy,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            args: vec![
                "-ea".to_string(),
                "-cp".to_string(),
                "rltlmonitor.jar:lib/*".to_string(),
                "de.mpi_sws.rltlmonitor.CommandLineInterface".to_string(),
            ],
            mode: AnalysisMode::Both,
            working_directory: None,
            on_failure: FailurePolicy::Ignore,
        }
    }
}

/// Corpus translation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Corpus revision the input follows
    pub format: CorpusFormat,

    /// How far a pattern header reaches
    pub header_binding: HeaderBinding,

    /// Replacement for the raw `tt` constant
    pub tt_placeholder: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            format: CorpusFormat::default(),
            header_binding: HeaderBinding::default(),
            tt_placeholder: DEFAULT_TT_PLACEHOLDER.to_string(),
        }
    }
}

/// Batch driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Print a progress line every this many items
    pub progress_interval: usize,

    /// How input lines are interpreted
    pub input_mode: InputMode,

    /// Treatment of a pre-existing statistics file
    pub existing_stats: ExistingStatsPolicy,

    /// Skip items whose statistics row is already complete
    pub resume: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            progress_interval: 1,
            input_mode: InputMode::Records,
            existing_stats: ExistingStatsPolicy::Append,
            resume: false,
        }
    }
}
