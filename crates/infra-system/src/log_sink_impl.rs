// Log sink implementations (console, console + file)
// reason: one process-wide mutex so lines from concurrent workers never interleave
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use clinic_core::error::{AppError, Result};
use clinic_core::port::LogSink;

/// Writes event lines to stdout
#[derive(Default)]
pub struct ConsoleLogSink {
    guard: Mutex<()>,
}

impl ConsoleLogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for ConsoleLogSink {
    fn emit(&self, line: &str) -> Result<()> {
        let _guard = lock(&self.guard);
        write_console(line)
    }
}

/// Writes event lines to a file, and to stdout unless built `file_only`.
///
/// The file is opened for append on first emission and kept open. If it
/// cannot be opened the emission fails with `AppError::LogSink`, which the
/// caller treats as fatal.
pub struct FileLogSink {
    path: PathBuf,
    echo_console: bool,
    file: Mutex<Option<File>>,
}

impl FileLogSink {
    /// Console + file sink
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            echo_console: true,
            file: Mutex::new(None),
        }
    }

    /// File-only sink
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            echo_console: false,
            ..Self::new(path)
        }
    }

    /// Empty the target so it only holds this run's lines
    pub fn truncate(&self) -> Result<()> {
        *lock(&self.file) = None;
        File::create(&self.path).map_err(|source| self.sink_error(source))?;
        debug!(path = %self.path.display(), "Log file truncated");
        Ok(())
    }

    fn sink_error(&self, source: io::Error) -> AppError {
        AppError::LogSink {
            path: self.path.clone(),
            source,
        }
    }
}

impl LogSink for FileLogSink {
    fn emit(&self, line: &str) -> Result<()> {
        let mut slot = lock(&self.file);
        if self.echo_console {
            write_console(line)?;
        }
        if slot.is_none() {
            let opened = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|source| self.sink_error(source))?;
            *slot = Some(opened);
        }
        if let Some(file) = slot.as_mut() {
            file.write_all(line.as_bytes())
                .map_err(|source| self.sink_error(source))?;
        }
        Ok(())
    }
}

fn write_console(line: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(line.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_appends_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.log");
        let sink = FileLogSink::file_only(&path);

        sink.emit("first\n").unwrap();
        sink.emit("second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_truncate_clears_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.log");
        std::fs::write(&path, "old run\n").unwrap();

        let sink = FileLogSink::file_only(&path);
        sink.truncate().unwrap();
        sink.emit("new run\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new run\n");
    }

    #[test]
    fn test_unopenable_path_is_log_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("clinic.log");
        let sink = FileLogSink::file_only(&path);

        let err = sink.emit("line\n").unwrap_err();
        assert!(matches!(err, AppError::LogSink { .. }));
        assert!(err.to_string().starts_with("Can't find file with name"));
        assert!(sink.truncate().is_err());
    }

    #[test]
    fn test_concurrent_lines_stay_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.log");
        let sink = Arc::new(FileLogSink::file_only(&path));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for i in 0..50 {
                        sink.emit(&format!("thread {} line {}\n", t, i)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 200);
        assert!(lines.iter().all(|l| l.starts_with("thread ") && l.contains(" line ")));
    }
}
