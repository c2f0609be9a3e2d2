//! Core data models for patternbench
//!
//! This module contains the data structures shared by the translator and
//! the batch driver: normalized records, driver input items and the rows of
//! the statistics file.

pub mod batch_item;
pub mod record;
pub mod stats_row;

// Re-exports for convenience
pub use batch_item::{BatchItem, InputMode};
pub use record::Record;
pub use stats_row::StatsRow;
