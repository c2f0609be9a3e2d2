//! Batch execution of the external tool
//!
//! The driver walks its input strictly in order. For every item it validates
//! the line, appends the statistics prefix, reports progress, and then runs
//! the tool and waits for it. Nothing overlaps: the prefix of item `i` is on
//! disk before invocation `i` starts, and invocation `i` has exited before
//! item `i + 1` is looked at.
//!
//! A malformed input line aborts the run on the spot. A tool that exits
//! non-zero does not, unless [`FailurePolicy::Abort`] is configured.

pub mod progress;
pub mod runner;
pub mod stats;

use chrono::{DateTime, Local, TimeDelta};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::{DriverConfig, FailurePolicy};
use crate::error::{Error, Result};
use crate::models::{BatchItem, InputMode};

pub use progress::ProgressReporter;
pub use runner::{ProcessToolRunner, ToolCommand, ToolRunner, ToolStatus};
pub use stats::StatsFile;

/// Driver input, fully read up front so the item count is known
#[derive(Debug, Clone)]
pub struct BatchInput {
    lines: Vec<String>,
    mode: InputMode,
}

impl BatchInput {
    pub fn new(lines: Vec<String>, mode: InputMode) -> Self {
        Self { lines, mode }
    }

    /// Split `content` into input lines
    pub fn parse(content: &str, mode: InputMode) -> Self {
        Self::new(content.lines().map(str::to_string).collect(), mode)
    }

    pub fn from_path(path: &Path, mode: InputMode) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content, mode))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Number of items, as used for progress reporting
    pub fn total(&self) -> usize {
        self.lines.len()
    }
}

/// Outcome of a finished batch run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub invoked: usize,
    /// Items skipped because a previous run completed them
    pub skipped: usize,
    /// Invocations that exited non-zero or were killed
    pub nonzero_exits: usize,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl RunSummary {
    fn start(total: usize) -> Self {
        let now = Local::now();
        Self {
            total,
            invoked: 0,
            skipped: 0,
            nonzero_exits: 0,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }
}

/// Sequential driver over a [`ToolRunner`]
pub struct BatchDriver<R: ToolRunner> {
    runner: R,
    stats: StatsFile,
    config: DriverConfig,
    failure_policy: FailurePolicy,
}

impl<R: ToolRunner> BatchDriver<R> {
    pub fn new(runner: R, stats: StatsFile, config: DriverConfig) -> Self {
        Self {
            runner,
            stats,
            config,
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn stats(&self) -> &StatsFile {
        &self.stats
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Process every item of `input`, writing progress lines to `progress`
    pub fn run<W: Write>(&mut self, input: &BatchInput, progress: W) -> Result<RunSummary> {
        self.stats.prepare(self.config.existing_stats)?;

        let mut completed = if self.config.resume {
            let keys = self.stats.completed_keys(input.mode())?;
            info!(
                "Resuming: {} items already have statistics",
                keys.values().sum::<usize>()
            );
            keys
        } else {
            HashMap::new()
        };

        let mut summary = RunSummary::start(input.total());
        let mut reporter = ProgressReporter::new(progress, self.config.progress_interval, input.total());
        info!(
            "Running {} items, statistics go to {}",
            input.total(),
            self.stats.path().display()
        );

        for (index, line) in input.lines().iter().enumerate() {
            let item = BatchItem::parse(line, index as u64 + 1, input.mode())?;

            // Each finished row covers one occurrence of its key
            if let Some(remaining) = completed.get_mut(&item.stats_key()).filter(|n| **n > 0) {
                *remaining -= 1;
                debug!("Skipping completed item: {}", item);
                summary.skipped += 1;
                continue;
            }

            self.stats.append_prefix(&item)?;
            reporter.before_item(index)?;

            let status = self.runner.invoke(item.formula(), self.stats.path())?;
            summary.invoked += 1;

            if !status.is_success() {
                summary.nonzero_exits += 1;
                match self.failure_policy {
                    FailurePolicy::Ignore => {
                        debug!("Tool exited with {:?} for '{}', continuing", status.code(), item.formula());
                    }
                    FailurePolicy::Abort => {
                        return Err(Error::ToolFailed {
                            formula: item.formula().to_string(),
                            code: status.code(),
                        });
                    }
                }
            }
        }

        summary.finished_at = Local::now();
        info!(
            "Batch finished: {} invoked, {} skipped, {} non-zero exits",
            summary.invoked, summary.skipped, summary.nonzero_exits
        );
        Ok(summary)
    }
}
