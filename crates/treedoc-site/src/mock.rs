//! In-memory writer for testing.
//!
//! Provides [`MemoryWriter`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::writer::SiteWriter;

/// Records created directories and written files in memory.
///
/// Mirrors filesystem behavior where it matters for generation: writing a
/// file fails unless its parent directory was created first.
///
/// # Example
///
/// ```ignore
/// use treedoc_site::{MemoryWriter, SiteGenerator};
///
/// let writer = MemoryWriter::new();
/// SiteGenerator::new(&writer, RenderConfig::default()).generate(&tree)?;
/// assert!(writer.file("index.html").is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryWriter {
    dirs: RwLock<BTreeSet<PathBuf>>,
    files: RwLock<BTreeMap<PathBuf, String>>,
    fail_on: Option<PathBuf>,
}

impl MemoryWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `PermissionDenied` when `path` is created or written.
    #[must_use]
    pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_on = Some(path.into());
        self
    }

    /// Contents of a written file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    /// All written files in path order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.read().unwrap().clone()
    }

    /// All created directories in path order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn dirs(&self) -> BTreeSet<PathBuf> {
        self.dirs.read().unwrap().clone()
    }

    fn check_failure(&self, path: &Path) -> io::Result<()> {
        if self.fail_on.as_deref() == Some(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("refusing to write {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl SiteWriter for MemoryWriter {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        self.check_failure(path)?;
        let mut dirs = self.dirs.write().unwrap();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.check_failure(path)?;
        let parent = path.parent().unwrap_or(Path::new(""));
        if !self.dirs.read().unwrap().contains(parent) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent.display()),
            ));
        }
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_owned());
        Ok(())
    }
}
