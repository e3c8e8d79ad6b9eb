//! Output destinations for generated sites.
//!
//! All paths handed to a [`SiteWriter`] are relative to the documentation
//! root: `""` is the root itself, `"Core"` a container directory,
//! `"Core/index.html"` a page.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Destination for generated directories and files.
pub trait SiteWriter {
    /// Ensure a directory exists. Must succeed if it already exists.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory cannot be created.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Write a complete file, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes the site below a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct FsWriter {
    root: PathBuf,
}

impl FsWriter {
    /// Create a writer rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SiteWriter for FsWriter {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(self.root.join(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(self.root.join(path), contents)
    }
}
