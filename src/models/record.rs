//! Normalized Record Model
//!
//! A record is the unit handed from the translator to the batch driver:
//! the pattern a property belongs to, the corpus line it was found on, and
//! the normalized formula. On disk a record is one comma-separated line,
//! `pattern, line, formula`, with no header row and no quoting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FormatError;

/// Separator placed between record fields when serializing
pub const FIELD_SEPARATOR: &str = ", ";

/// Number of fields in a serialized record line
pub const RECORD_FIELDS: usize = 3;

/// One normalized property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Pattern name, never empty
    pub pattern: String,

    /// 1-based line number of the property in the raw corpus
    pub source_line: u64,

    /// Normalized temporal-logic formula
    pub formula: String,
}

impl Record {
    /// Create a new record
    pub fn new(pattern: impl Into<String>, source_line: u64, formula: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            source_line,
            formula: formula.into(),
        }
    }

    /// Serialize as a record-file line, without the trailing newline
    pub fn to_csv_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.pattern,
            self.source_line,
            self.formula,
            sep = FIELD_SEPARATOR
        )
    }

    /// Parse and validate one record-file line
    ///
    /// `line_no` is the 1-based position of the line in the record file and
    /// is only used for diagnostics. Fields are trimmed; the line must hold
    /// exactly three of them.
    pub fn parse_line(line: &str, line_no: u64) -> Result<Self, FormatError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != RECORD_FIELDS {
            return Err(FormatError::FieldCount {
                line: line_no,
                found: fields.len(),
            });
        }

        let (pattern, number, formula) = (fields[0], fields[1], fields[2]);
        if pattern.is_empty() {
            return Err(FormatError::EmptyField {
                line: line_no,
                field: "pattern",
            });
        }
        if formula.is_empty() {
            return Err(FormatError::EmptyField {
                line: line_no,
                field: "formula",
            });
        }

        let source_line = number
            .parse::<u64>()
            .map_err(|_| FormatError::InvalidLineNumber {
                line: line_no,
                value: number.to_string(),
            })?;

        Ok(Self::new(pattern, source_line, formula))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_csv_line())
    }
}
