//! Pattern corpus translation
//!
//! Turns the raw property-pattern corpus into normalized [`Record`]s. The
//! translator does no I/O of its own: callers hand it an iterator of lines
//! and a [`RecordSink`], and records reach the sink as soon as they are
//! produced. A format error stops the scan; records already delivered to
//! the sink stay there.

pub mod format;
pub mod rewrite;
pub mod state;

use std::io::Write;

use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::models::Record;

pub use format::{CorpusFormat, RawLine};
pub use rewrite::{normalize_property, rewrite_operators, Correction, DEFAULT_TT_PLACEHOLDER};
pub use state::{step, HeaderBinding, ParserState, Transition};

/// Destination for translated records
pub trait RecordSink {
    /// Accept the next record, in corpus order
    fn accept(&mut self, record: Record) -> Result<()>;
}

impl RecordSink for Vec<Record> {
    fn accept(&mut self, record: Record) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Writes each record as one line of the normalized record file
pub struct CsvRecordWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> CsvRecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for CsvRecordWriter<W> {
    fn accept(&mut self, record: Record) -> Result<()> {
        writeln!(self.writer, "{}", record.to_csv_line())?;
        self.written += 1;
        Ok(())
    }
}

/// Counters describing one translation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationSummary {
    pub lines_scanned: u64,
    pub records_emitted: usize,
    pub corrections_applied: usize,
}

/// Translator from raw corpus lines to records
#[derive(Debug, Clone, Default)]
pub struct PatternTranslator {
    config: TranslatorConfig,
}

impl PatternTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate `lines` into `sink`
    pub fn translate<I, S>(&self, lines: I, sink: &mut S) -> Result<TranslationSummary>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        S: RecordSink + ?Sized,
    {
        let mut state = ParserState::fresh();
        let mut summary = TranslationSummary::default();

        for (index, line) in lines.into_iter().enumerate() {
            let line_no = index as u64 + 1;
            summary.lines_scanned = line_no;

            let raw = self.config.format.classify(line.as_ref());
            let transition = step(state, line_no, raw, &self.config)?;
            state = transition.state;

            if let Some(correction) = transition.correction {
                info!("Corrected known malformed formula on line {} ({:?})", line_no, correction);
                summary.corrections_applied += 1;
            }
            if let Some(record) = transition.record {
                debug!("Line {}: {} -> {}", line_no, record.pattern, record.formula);
                sink.accept(record)?;
                summary.records_emitted += 1;
            }
        }

        Ok(summary)
    }

    /// Translate a whole corpus held in memory
    pub fn translate_str(&self, corpus: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        self.translate(corpus.lines(), &mut records)?;
        Ok(records)
    }
}
