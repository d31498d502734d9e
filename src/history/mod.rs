use crate::evaluator::format_result;
use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod logfile;

pub use logfile::{CalculationLog, DEFAULT_LOG_FILE};

pub const DEFAULT_RECENT_CAPACITY: usize = 5;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

impl HistoryError {
    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        HistoryError::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        HistoryError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A successful calculation, rendered as `<expression> = <result>`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub expression: String,
    pub value: f64,
}

impl HistoryRecord {
    pub fn new(expression: impl Into<String>, value: f64) -> Self {
        Self {
            expression: expression.into(),
            value,
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, format_result(self.value))
    }
}

/// The last few calculations in memory, mirrored to a durable log.
#[derive(Debug)]
pub struct History {
    recent: VecDeque<String>,
    capacity: usize,
    log: CalculationLog,
}

impl History {
    pub fn new(log: CalculationLog, capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
            log,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn log(&self) -> &CalculationLog {
        &self.log
    }

    /// Keeps `entry` in memory (evicting the oldest entry when full), then
    /// appends it to the log. A failed append leaves the in-memory entry in
    /// place.
    pub fn record(&mut self, entry: impl Into<String>) -> Result<(), HistoryError> {
        let entry = entry.into();
        if self.capacity > 0 {
            while self.recent.len() >= self.capacity {
                self.recent.pop_front();
            }
            self.recent.push_back(entry.clone());
        }
        self.log.append(&entry)
    }

    /// Oldest first.
    pub fn recent(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Empties the in-memory view. The log is left untouched.
    pub fn clear(&mut self) {
        self.recent.clear();
    }

    pub fn load(&self) -> Result<Option<Vec<String>>, HistoryError> {
        self.log.load()
    }
}
