//! Batch Item Model
//!
//! What the batch driver consumes per input line: a full record, or in the
//! legacy raw mode a bare formula without pattern or line metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;
use crate::models::record::{Record, FIELD_SEPARATOR};

/// How the lines of a driver input file are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    /// `pattern, line, formula` records produced by the translator
    #[default]
    Records,
    /// One bare formula per line
    Raw,
}

impl InputMode {
    /// Number of leading fields that identify an item in a statistics row
    pub fn key_fields(self) -> usize {
        match self {
            InputMode::Records => crate::models::record::RECORD_FIELDS,
            InputMode::Raw => 1,
        }
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "records" | "record" => Ok(InputMode::Records),
            "raw" => Ok(InputMode::Raw),
            other => Err(format!("unknown input mode '{}'", other)),
        }
    }
}

/// One unit of work for the batch driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchItem {
    Record(Record),
    RawFormula(String),
}

impl BatchItem {
    /// Parse one driver input line according to `mode`
    pub fn parse(line: &str, line_no: u64, mode: InputMode) -> Result<Self, FormatError> {
        match mode {
            InputMode::Records => Record::parse_line(line, line_no).map(BatchItem::Record),
            InputMode::Raw => {
                let formula = line.trim();
                if formula.is_empty() {
                    return Err(FormatError::EmptyFormula { line: line_no });
                }
                Ok(BatchItem::RawFormula(formula.to_string()))
            }
        }
    }

    /// The formula handed to the external tool
    pub fn formula(&self) -> &str {
        match self {
            BatchItem::Record(record) => &record.formula,
            BatchItem::RawFormula(formula) => formula,
        }
    }

    /// Leading part of the statistics row, without the trailing separator
    pub fn stats_key(&self) -> String {
        match self {
            BatchItem::Record(record) => record.to_csv_line(),
            BatchItem::RawFormula(formula) => formula.clone(),
        }
    }

    /// Text appended to the statistics file before the tool runs
    pub fn stats_prefix(&self) -> String {
        format!("{}{}", self.stats_key(), FIELD_SEPARATOR)
    }
}

impl fmt::Display for BatchItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stats_key())
    }
}
