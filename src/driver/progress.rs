//! Progress reporting for batch runs

use std::io::Write;

use crate::error::Result;

/// Prints `Progress: i/total.` lines at a fixed item interval
pub struct ProgressReporter<W: Write> {
    out: W,
    interval: usize,
    total: usize,
}

impl<W: Write> ProgressReporter<W> {
    /// `interval` of 0 is treated as 1
    pub fn new(out: W, interval: usize, total: usize) -> Self {
        Self {
            out,
            interval: interval.max(1),
            total,
        }
    }

    /// Called before item `index` (0-based) starts; reports the items already done
    pub fn before_item(&mut self, index: usize) -> Result<()> {
        if index > 0 && index % self.interval == 0 {
            writeln!(self.out, "Progress: {}/{}.", index, self.total)?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
