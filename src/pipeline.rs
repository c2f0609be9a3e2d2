//! File-level entry points
//!
//! The translator and the driver work on in-memory lines and injected
//! capabilities. The functions here own the file access around them and
//! wire in the real process runner.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::{Config, TranslatorConfig};
use crate::driver::{BatchDriver, BatchInput, ProcessToolRunner, RunSummary, StatsFile, ToolRunner};
use crate::error::Result;
use crate::translator::{CsvRecordWriter, PatternTranslator, TranslationSummary};

/// Translate the corpus at `corpus` into the record file at `output`
///
/// The output file is truncated first. Records are written as they are
/// produced, so a format error leaves the records before it in place.
pub fn translate_file(
    corpus: &Path,
    output: &Path,
    config: &TranslatorConfig,
) -> Result<TranslationSummary> {
    let content = std::fs::read_to_string(corpus)?;
    info!("Translating {} into {}", corpus.display(), output.display());

    let mut writer = CsvRecordWriter::new(BufWriter::new(File::create(output)?));
    let translator = PatternTranslator::new(config.clone());
    let result = translator.translate(content.lines(), &mut writer);

    // Keep whatever was produced, also on failure
    writer.into_inner()?;
    let summary = result?;

    info!(
        "Wrote {} records from {} lines ({} corrected)",
        summary.records_emitted, summary.lines_scanned, summary.corrections_applied
    );
    Ok(summary)
}

/// Run the batch driver over `input` with a caller-supplied runner
pub fn run_with<R, W>(
    runner: R,
    input: &Path,
    stats: &Path,
    config: &Config,
    progress: W,
) -> Result<RunSummary>
where
    R: ToolRunner,
    W: Write,
{
    let input = BatchInput::from_path(input, config.driver.input_mode)?;
    let mut driver = BatchDriver::new(runner, StatsFile::new(stats), config.driver.clone())
        .with_failure_policy(config.tool.on_failure);
    driver.run(&input, progress)
}

/// Run the configured external tool over every item of `input`
pub fn run_file(input: &Path, stats: &Path, config: &Config) -> Result<RunSummary> {
    let runner = ProcessToolRunner::from_config(&config.tool);
    run_with(runner, input, stats, config, io::stdout().lock())
}
