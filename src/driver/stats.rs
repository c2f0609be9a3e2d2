//! Statistics file handling
//!
//! The statistics file is append-only. The driver writes the key of an item
//! followed by a separator before the tool runs; the tool completes the line.
//! The file is opened and closed for every append, so no handle is held while
//! the tool itself writes to it.
//!
//! A tool that dies before finishing its row leaves the line open. The next
//! prefix then starts on a fresh line, so the unfinished row stays visible
//! as incomplete instead of swallowing the following item.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::ExistingStatsPolicy;
use crate::error::{Error, Result};
use crate::models::{BatchItem, InputMode, StatsRow};

/// Append-only statistics file
#[derive(Debug, Clone)]
pub struct StatsFile {
    path: PathBuf,
}

impl StatsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `policy` to a file left over from an earlier run
    pub fn prepare(&self, policy: ExistingStatsPolicy) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        match policy {
            ExistingStatsPolicy::Append => {
                info!("Appending to existing statistics file {}", self.path.display());
                Ok(())
            }
            ExistingStatsPolicy::Clear => {
                info!("Clearing statistics file {}", self.path.display());
                File::create(&self.path)?;
                Ok(())
            }
            ExistingStatsPolicy::Fail => Err(Error::StatsFileExists {
                path: self.path.clone(),
            }),
        }
    }

    /// Append the prefix of `item`'s row; the file is closed again on return
    pub fn append_prefix(&self, item: &BatchItem) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        if ends_mid_row(&mut file)? {
            debug!("Previous row in {} was never finished", self.path.display());
            file.write_all(b"\n")?;
        }
        file.write_all(item.stats_prefix().as_bytes())?;
        Ok(())
    }

    /// Completed rows per item key
    ///
    /// The same key can be completed more than once when an input holds the
    /// same item twice, so each key maps to the number of finished rows.
    pub fn completed_keys(&self, mode: InputMode) -> Result<HashMap<String, usize>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut keys = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(row) = StatsRow::parse(&line, mode) {
                if row.is_complete() {
                    *keys.entry(row.key).or_insert(0) += 1;
                }
            }
        }
        Ok(keys)
    }

    /// Whole file content, mostly useful to inspect a finished run
    pub fn read_to_string(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Whether the last byte of a non-empty file is something other than a newline
fn ends_mid_row(file: &mut File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
