//! Translator state machine
//!
//! The translator keeps no hidden mutable fields. Each corpus line moves an
//! explicit [`ParserState`] value to its successor through [`step`], which
//! makes every transition testable on its own.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::TranslatorConfig;
use crate::error::FormatError;
use crate::models::Record;
use crate::translator::format::RawLine;
use crate::translator::rewrite::{normalize_property, Correction};

/// How many property lines a single pattern header applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderBinding {
    /// A header is consumed by the first property line after it
    #[default]
    OneToOne,
    /// A header applies to every property line until the next header or break
    OneToMany,
}

impl FromStr for HeaderBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one-to-one" | "one_to_one" => Ok(HeaderBinding::OneToOne),
            "one-to-many" | "one_to_many" => Ok(HeaderBinding::OneToMany),
            other => Err(format!("unknown header binding '{}'", other)),
        }
    }
}

/// Translator state between two corpus lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserState {
    /// Active pattern name, empty when none
    pub current_pattern: String,
    /// True while a property line would have no header to belong to
    pub expecting_header: bool,
}

impl Default for ParserState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl ParserState {
    /// State at the start of a run and after every section break
    pub fn fresh() -> Self {
        Self {
            current_pattern: String::new(),
            expecting_header: true,
        }
    }

    /// State right after a pattern header
    pub fn with_pattern(name: impl Into<String>) -> Self {
        Self {
            current_pattern: name.into(),
            expecting_header: false,
        }
    }

    /// Whether a property line may be translated in this state
    pub fn can_translate(&self) -> bool {
        !self.current_pattern.is_empty() && !self.expecting_header
    }
}

/// Result of feeding one line to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ParserState,
    pub record: Option<Record>,
    pub correction: Option<Correction>,
}

impl Transition {
    fn to(state: ParserState) -> Self {
        Self {
            state,
            record: None,
            correction: None,
        }
    }
}

/// Advance the translator by one classified line
///
/// `line_no` is the 1-based position of the line in the corpus.
pub fn step(
    state: ParserState,
    line_no: u64,
    line: RawLine<'_>,
    config: &TranslatorConfig,
) -> Result<Transition, FormatError> {
    match line {
        RawLine::PatternHeader(name) => Ok(Transition::to(ParserState::with_pattern(name))),
        RawLine::SectionBreak => Ok(Transition::to(ParserState::fresh())),
        RawLine::Other => Ok(Transition::to(state)),
        RawLine::PropertyLine(body) => {
            let (formula, correction) = normalize_property(body, &config.tt_placeholder);

            if !state.can_translate() {
                return Err(FormatError::PropertyWithoutPattern { line: line_no });
            }

            let record = Record::new(state.current_pattern.clone(), line_no, formula);
            let next = match config.header_binding {
                HeaderBinding::OneToOne => ParserState::fresh(),
                HeaderBinding::OneToMany => state,
            };

            Ok(Transition {
                state: next,
                record: Some(record),
                correction,
            })
        }
    }
}
