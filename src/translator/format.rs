//! Corpus line classification
//!
//! The raw corpus is a plain text file whose structure is carried entirely
//! by line prefixes. Each supported corpus revision is a [`CorpusFormat`]
//! variant that knows its own markers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Marker introducing a pattern header in the ltl3tools suite
const LTL3TOOLS_HEADER: &str = "PATTERN:";
/// Markers introducing a property line in the ltl3tools suite
const LTL3TOOLS_PROPERTY: [&str; 2] = ["- ", "@ "];
/// Marker for an explicit section break in the ltl3tools suite
const LTL3TOOLS_BREAK: &str = "???";

/// Known revisions of the raw property corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CorpusFormat {
    /// `rv_properties.txt` from the ltl3tools test suite
    #[default]
    Ltl3Tools,
}

/// A classified corpus line, borrowing from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawLine<'a> {
    /// Pattern name, already trimmed
    PatternHeader(&'a str),
    /// Property text with its two-character marker stripped
    PropertyLine(&'a str),
    SectionBreak,
    Other,
}

impl CorpusFormat {
    /// Classify one corpus line by its prefix
    pub fn classify<'a>(self, line: &'a str) -> RawLine<'a> {
        match self {
            CorpusFormat::Ltl3Tools => {
                if let Some(name) = line.strip_prefix(LTL3TOOLS_HEADER) {
                    return RawLine::PatternHeader(name.trim());
                }
                if let Some(body) = LTL3TOOLS_PROPERTY
                    .iter()
                    .find_map(|marker| line.strip_prefix(marker))
                {
                    return RawLine::PropertyLine(body);
                }
                if line.starts_with(LTL3TOOLS_BREAK) {
                    return RawLine::SectionBreak;
                }
                RawLine::Other
            }
        }
    }
}

impl FromStr for CorpusFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ltl3tools" | "ltl3-tools" => Ok(CorpusFormat::Ltl3Tools),
            other => Err(format!("unknown corpus format '{}'", other)),
        }
    }
}
