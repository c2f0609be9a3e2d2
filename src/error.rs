//! Error types and Result aliases for patternbench

use std::fmt;
use std::path::PathBuf;

/// Result type alias for patternbench operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a corpus line or a driver input line was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("property on line {line} has no active pattern header")]
    PropertyWithoutPattern { line: u64 },

    #[error("line {line}: expected 3 comma-separated fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: field '{field}' is empty")]
    EmptyField { line: u64, field: &'static str },

    #[error("line {line}: '{value}' is not a valid source line number")]
    InvalidLineNumber { line: u64, value: String },

    #[error("line {line}: formula is empty")]
    EmptyFormula { line: u64 },
}

/// Main error type for patternbench
#[derive(Debug)]
pub enum Error {
    // === Input format errors ===
    /// Corpus or record input does not have the expected shape
    Format(FormatError),

    // === External tool errors ===
    /// The external tool could not be started
    ToolSpawnFailed {
        program: String,
        reason: String,
    },

    /// The external tool exited non-zero and the failure policy is `abort`
    ToolFailed {
        formula: String,
        code: Option<i32>,
    },

    // === Statistics file errors ===
    /// Statistics file exists and the policy forbids touching it
    StatsFileExists {
        path: PathBuf,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound {
        path: PathBuf,
    },

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),
}

impl Error {
    /// Whether this error stems from malformed input rather than the environment
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(reason) => {
                write!(f, "Invalid input format: {}", reason)
            }

            // External tool errors
            Error::ToolSpawnFailed { program, reason } => {
                write!(f, "Failed to start external tool '{}': {}", program, reason)
            }
            Error::ToolFailed { formula, code } => match code {
                Some(code) => write!(
                    f,
                    "External tool exited with code {} for formula '{}'",
                    code, formula
                ),
                None => write!(
                    f,
                    "External tool was terminated by a signal for formula '{}'",
                    formula
                ),
            },

            // Statistics file errors
            Error::StatsFileExists { path } => {
                write!(f, "Statistics file '{}' already exists", path.display())
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound { path } => {
                write!(f, "Configuration file '{}' not found", path.display())
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Format(reason) => Some(reason),
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Toml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Error::Format(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}
