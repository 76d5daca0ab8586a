// Log Sink Port (Interface)
// Human-readable event lines; implemented by infra adapters (console, file)

use crate::error::Result;

/// Process-wide append target for clinic event lines.
///
/// Implementations must append each line atomically: lines emitted
/// concurrently from different queues may interleave with each other but
/// never within a line. A target that cannot be opened is fatal and must be
/// reported as `AppError::LogSink`.
pub trait LogSink: Send + Sync {
    /// Append `line` (already newline-terminated)
    fn emit(&self, line: &str) -> Result<()>;
}

/// Mock implementations for testing
pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Keeps every emitted line in memory
    #[derive(Default)]
    pub struct MemoryLogSink {
        lines: Mutex<Vec<String>>,
    }

    impl MemoryLogSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Snapshot of emitted lines, in emission order
        pub fn lines(&self) -> Vec<String> {
            self.lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }

        /// Lines containing `needle`
        pub fn matching(&self, needle: &str) -> Vec<String> {
            self.lines()
                .into_iter()
                .filter(|line| line.contains(needle))
                .collect()
        }
    }

    impl LogSink for MemoryLogSink {
        fn emit(&self, line: &str) -> Result<()> {
            self.lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(line.to_string());
            Ok(())
        }
    }

    /// Accepts the first `allowed` emissions, then fails every one as an
    /// unopenable log file would
    pub struct FailingLogSink {
        path: PathBuf,
        allowed: usize,
        attempts: AtomicUsize,
    }

    impl FailingLogSink {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self::after(0, path)
        }

        pub fn after(allowed: usize, path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                allowed,
                attempts: AtomicUsize::new(0),
            }
        }

        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl LogSink for FailingLogSink {
        fn emit(&self, _line: &str) -> Result<()> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.allowed {
                return Ok(());
            }
            Err(AppError::LogSink {
                path: self.path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "log file cannot be opened",
                ),
            })
        }
    }
}
