use crate::history::HistoryError;
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILE: &str = "calculations.txt";

/// Append-only text file holding one calculation record per line.
#[derive(Debug, Clone)]
pub struct CalculationLog {
    path: PathBuf,
}

impl CalculationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &str) -> Result<(), HistoryError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| HistoryError::write(&self.path, source))?;
        writeln!(file, "{}", record).map_err(|source| HistoryError::write(&self.path, source))?;
        debug!("Appended to {}: {}", self.path.display(), record);
        Ok(())
    }

    /// Reads every record back in file order. `Ok(None)` means the file
    /// has never been written.
    pub fn load(&self) -> Result<Option<Vec<String>>, HistoryError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(HistoryError::read(&self.path, source)),
        };
        let records = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| HistoryError::read(&self.path, source))?;
        Ok(Some(records))
    }
}

impl Default for CalculationLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let log = CalculationLog::new(dir.path().join("calculations.txt"));
        assert_eq!(log.load().unwrap(), None);
    }

    #[test]
    fn test_records_round_trip_in_append_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = CalculationLog::new(dir.path().join("calculations.txt"));
        log.append("2+3*4 = 14.0").unwrap();
        log.append("sqrt(16) = 4.0").unwrap();
        log.append("1/0 = Infinity").unwrap();

        assert_eq!(
            log.load().unwrap(),
            Some(vec![
                "2+3*4 = 14.0".to_string(),
                "sqrt(16) = 4.0".to_string(),
                "1/0 = Infinity".to_string(),
            ])
        );
    }

    #[test]
    fn test_append_keeps_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calculations.txt");
        std::fs::write(&path, "1+1 = 2.0\n").unwrap();

        let log = CalculationLog::new(&path);
        log.append("2+2 = 4.0").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "1+1 = 2.0\n2+2 = 4.0\n"
        );
    }

    #[test]
    fn test_append_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let log = CalculationLog::new(dir.path().join("missing").join("calculations.txt"));
        let err = log.append("1 = 1.0").unwrap_err();
        assert!(matches!(err, HistoryError::Write { .. }));
    }
}
