//! # Orientation Trace Logger
//!
//! Writes orientation snapshots as JSON Lines, one record per line, to a
//! directory of rotating trace files. A new file starts after a configured
//! number of records, and only the most recent files are retained. Useful
//! for tuning the gyro scale and pitch window against a recorded session.

use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;

/// File name prefix for trace files.
const TRACE_FILE_PREFIX: &str = "trace_";

/// File name extension for trace files.
const TRACE_FILE_SUFFIX: &str = ".jsonl";

/// One orientation snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    /// Wall-clock time of the snapshot, RFC 3339.
    pub timestamp: String,
    /// Published yaw in signed degrees.
    pub yaw: f32,
    /// Published pitch in signed degrees.
    pub pitch: f32,
    /// Active axis scheme label.
    pub scheme: &'static str,
}

impl TraceRecord {
    /// Creates a record stamped with the current wall-clock time.
    #[must_use]
    pub fn now(yaw: f32, pitch: f32, scheme: &'static str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            yaw,
            pitch,
            scheme,
        }
    }
}

/// Rotating JSONL writer for [`TraceRecord`]s.
///
/// # Examples
///
/// ```no_run
/// use gyro_look::telemetry::logger::{TraceLogger, TraceRecord};
///
/// let mut logger = TraceLogger::new("./logs", 10000, 10)?;
/// logger.log(&TraceRecord::now(12.5, -3.0, "usb"))?;
/// # Ok::<(), gyro_look::error::GyroLookError>(())
/// ```
pub struct TraceLogger {
    dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    file: Option<File>,
    records_in_file: usize,
    file_seq: u64,
}

impl TraceLogger {
    /// Creates a logger writing into `dir`, creating the directory if
    /// needed. The first file is opened lazily on the first record.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory receiving trace files
    /// * `max_records_per_file` - Records written before rotating
    /// * `max_files_to_keep` - Trace files retained after pruning
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(
        dir: P,
        max_records_per_file: usize,
        max_files_to_keep: usize,
    ) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            max_records_per_file,
            max_files_to_keep,
            file: None,
            records_in_file: 0,
            file_seq: 0,
        })
    }

    /// Appends one record, rotating the file first when full.
    ///
    /// # Errors
    ///
    /// Returns `Trace` on serialization failure or `Io` on write failure.
    pub fn log(&mut self, record: &TraceRecord) -> Result<()> {
        if self.file.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }

        let line = serde_json::to_string(record)?;
        // rotate() above guarantees an open file here.
        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{}", line)?;
            self.records_in_file += 1;
        }
        Ok(())
    }

    /// Opens the next trace file and prunes old ones.
    fn rotate(&mut self) -> Result<()> {
        self.file_seq += 1;
        let name = format!(
            "{}{}_{:04}{}",
            TRACE_FILE_PREFIX,
            Utc::now().format("%Y%m%d%H%M%S"),
            self.file_seq,
            TRACE_FILE_SUFFIX
        );
        let path = self.dir.join(&name);
        debug!("rotating trace output to {}", path.display());

        self.file = Some(File::create(&path)?);
        self.records_in_file = 0;
        self.prune()
    }

    /// Removes the oldest trace files beyond the retention limit.
    fn prune(&self) -> Result<()> {
        let mut traces: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| {
                        name.starts_with(TRACE_FILE_PREFIX) && name.ends_with(TRACE_FILE_SUFFIX)
                    })
            })
            .collect();

        // Names sort chronologically: timestamp first, sequence second.
        traces.sort();

        let excess = traces.len().saturating_sub(self.max_files_to_keep);
        for stale in &traces[..excess] {
            debug!("pruning old trace file {}", stale.display());
            fs::remove_file(stale)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn trace_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_record_serializes_expected_fields() {
        let record = TraceRecord {
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            yaw: 12.5,
            pitch: -3.0,
            scheme: "usb",
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();

        assert_eq!(json["timestamp"], "2026-01-01T00:00:00+00:00");
        assert_eq!(json["yaw"], 12.5);
        assert_eq!(json["pitch"], -3.0);
        assert_eq!(json["scheme"], "usb");
    }

    #[test]
    fn test_record_now_stamps_time() {
        let record = TraceRecord::now(0.0, 0.0, "bluetooth");
        assert!(!record.timestamp.is_empty());
        assert_eq!(record.scheme, "bluetooth");
    }

    #[test]
    fn test_creates_log_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b");

        let _ = TraceLogger::new(&nested, 10, 2).unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn test_no_file_until_first_record() {
        let dir = tempdir().unwrap();
        let _logger = TraceLogger::new(dir.path(), 10, 2).unwrap();

        assert!(trace_files(dir.path()).is_empty());
    }

    #[test]
    fn test_records_land_in_one_file() {
        let dir = tempdir().unwrap();
        let mut logger = TraceLogger::new(dir.path(), 10, 2).unwrap();

        for i in 0..3 {
            logger.log(&TraceRecord::now(i as f32, 0.0, "usb")).unwrap();
        }

        let files = trace_files(dir.path());
        assert_eq!(files.len(), 1);

        let contents = fs::read_to_string(&files[0]).unwrap();
        assert_eq!(contents.lines().count(), 3);

        // Every line is standalone JSON.
        for line in contents.lines() {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(json["scheme"], "usb");
        }
    }

    #[test]
    fn test_rotation_after_max_records() {
        let dir = tempdir().unwrap();
        let mut logger = TraceLogger::new(dir.path(), 2, 10).unwrap();

        for i in 0..5 {
            logger.log(&TraceRecord::now(i as f32, 0.0, "usb")).unwrap();
        }

        // 5 records at 2 per file is three files (2 + 2 + 1).
        let files = trace_files(dir.path());
        assert_eq!(files.len(), 3);

        let last = fs::read_to_string(files.last().unwrap()).unwrap();
        assert_eq!(last.lines().count(), 1);
    }

    #[test]
    fn test_prunes_to_retention_limit() {
        let dir = tempdir().unwrap();
        let mut logger = TraceLogger::new(dir.path(), 1, 2).unwrap();

        for i in 0..6 {
            logger.log(&TraceRecord::now(i as f32, 0.0, "usb")).unwrap();
        }

        assert_eq!(trace_files(dir.path()).len(), 2);
    }

    #[test]
    fn test_unrelated_files_survive_pruning() {
        let dir = tempdir().unwrap();
        let keeper = dir.path().join("notes.txt");
        fs::write(&keeper, "keep me").unwrap();

        let mut logger = TraceLogger::new(dir.path(), 1, 1).unwrap();
        for i in 0..4 {
            logger.log(&TraceRecord::now(i as f32, 0.0, "usb")).unwrap();
        }

        assert!(keeper.exists());
    }
}
