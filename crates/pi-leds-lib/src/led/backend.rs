//! Sysfs access: the backend trait, the real backend and an in-memory mock.

use std::io;
use std::path::Path;
use std::sync::Arc;

/// Access to LED `brightness` files.
///
/// Implementations must be shareable across the HTTP worker threads.
pub trait LedBackend: Send + Sync {
    /// Whether the path exists (probe during resolution).
    fn exists(&self, path: &Path) -> bool;
    /// Read the current level. Any non-zero brightness counts as on.
    fn read(&self, path: &Path) -> io::Result<bool>;
    /// Write `"1"` or `"0"`.
    fn write(&self, path: &Path, on: bool) -> io::Result<()>;
}

impl<T: LedBackend + ?Sized> LedBackend for Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &Path) -> io::Result<bool> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, on: bool) -> io::Result<()> {
        (**self).write(path, on)
    }
}

/// The real thing: plain file I/O against `/sys/class/leds/*/brightness`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysfsBackend;

impl LedBackend for SysfsBackend {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<bool> {
        parse_brightness(&std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, on: bool) -> io::Result<()> {
        std::fs::write(path, if on { "1" } else { "0" })
    }
}

/// Parse a sysfs brightness value (`"0"`..`"255"`, trailing newline allowed).
pub(crate) fn parse_brightness(raw: &str) -> io::Result<bool> {
    let value = raw.trim();
    value.parse::<u32>().map(|level| level != 0).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unexpected brightness value {value:?}: {e}"),
        )
    })
}

// ── Mock backend for testing ──

/// In-memory mock backend for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fake sysfs tree. Files hold their raw contents; writes are recorded
    /// in order. Individual paths can be made to fail reads or writes with
    /// `PermissionDenied`.
    #[derive(Default)]
    pub struct MockBackend {
        files: Mutex<HashMap<PathBuf, String>>,
        writes: Mutex<Vec<(PathBuf, bool)>>,
        deny_read: Mutex<HashSet<PathBuf>>,
        deny_write: Mutex<HashSet<PathBuf>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Builder: add a file with the given contents.
        pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
            lock(&self.files).insert(path.into(), contents.to_string());
            self
        }

        pub fn deny_read(&self, path: impl Into<PathBuf>) {
            lock(&self.deny_read).insert(path.into());
        }

        pub fn deny_write(&self, path: impl Into<PathBuf>) {
            lock(&self.deny_write).insert(path.into());
        }

        pub fn allow_write(&self, path: &Path) {
            lock(&self.deny_write).remove(path);
        }

        /// Current raw contents of a file, if present.
        pub fn contents(&self, path: &Path) -> Option<String> {
            lock(&self.files).get(path).cloned()
        }

        /// Successful writes, oldest first.
        pub fn writes(&self) -> Vec<(PathBuf, bool)> {
            lock(&self.writes).clone()
        }

        pub fn clear_writes(&self) {
            lock(&self.writes).clear();
        }
    }

    impl LedBackend for MockBackend {
        fn exists(&self, path: &Path) -> bool {
            lock(&self.files).contains_key(path)
        }

        fn read(&self, path: &Path) -> io::Result<bool> {
            if lock(&self.deny_read).contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "mock: read denied",
                ));
            }
            match lock(&self.files).get(path) {
                Some(raw) => parse_brightness(raw),
                None => Err(io::Error::new(io::ErrorKind::NotFound, "mock: no such file")),
            }
        }

        fn write(&self, path: &Path, on: bool) -> io::Result<()> {
            if lock(&self.deny_write).contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "mock: write denied",
                ));
            }
            let mut files = lock(&self.files);
            let Some(contents) = files.get_mut(path) else {
                return Err(io::Error::new(io::ErrorKind::NotFound, "mock: no such file"));
            };
            *contents = if on { "1" } else { "0" }.to_string();
            lock(&self.writes).push((path.to_path_buf(), on));
            Ok(())
        }
    }
}
