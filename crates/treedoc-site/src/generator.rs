//! Recursive site generation.
//!
//! Walks the element tree depth-first. Every container becomes a directory
//! with an `index` page; every leaf element becomes a single page inside its
//! container's directory. Non-exportable nodes and their subtrees produce
//! nothing.

use std::io;
use std::path::{Path, PathBuf};

use treedoc_renderer::{RenderConfig, STYLESHEET, STYLESHEET_NAME, render_page};
use treedoc_tree::{ElementTree, NodeId};

use crate::writer::SiteWriter;

/// Error returned when the site cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A directory or file could not be written.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path relative to the documentation root.
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Counts of what a run produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// HTML pages written (index pages included).
    pub pages: usize,
    /// Container directories visited, the root included.
    pub directories: usize,
}

/// Generates a static documentation site from an [`ElementTree`].
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use treedoc_renderer::RenderConfig;
/// use treedoc_site::{FsWriter, SiteGenerator};
/// use treedoc_tree::ElementTree;
///
/// let tree = ElementTree::from_json(&std::fs::read_to_string("tree.json")?)?;
/// let writer = FsWriter::new("site");
/// let summary = SiteGenerator::new(&writer, RenderConfig::default()).generate(&tree)?;
/// assert!(summary.pages >= 1);
/// # Ok(())
/// # }
/// ```
pub struct SiteGenerator<'a, W: SiteWriter + ?Sized> {
    writer: &'a W,
    config: RenderConfig,
}

impl<'a, W: SiteWriter + ?Sized> SiteGenerator<'a, W> {
    /// Create a generator writing through `writer`.
    #[must_use]
    pub fn new(writer: &'a W, config: RenderConfig) -> Self {
        Self { writer, config }
    }

    /// Write the stylesheet and every page of `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] on the first failed write. Output written
    /// before the failure is left in place.
    pub fn generate(&self, tree: &ElementTree) -> Result<GenerateSummary, GenerateError> {
        tracing::info!(
            nodes = tree.len(),
            extension = %self.config.extension,
            "Generating documentation"
        );

        let root_dir = PathBuf::new();
        self.create_dir(&root_dir)?;
        self.write(Path::new(STYLESHEET_NAME), STYLESHEET)?;

        let mut summary = GenerateSummary::default();
        self.visit(tree, tree.root(), &root_dir, 0, &mut summary)?;

        tracing::info!(
            pages = summary.pages,
            directories = summary.directories,
            "Documentation generated"
        );
        Ok(summary)
    }

    /// Emit the index page of `node` and recurse into its exportable children.
    fn visit(
        &self,
        tree: &ElementTree,
        node: NodeId,
        dir: &Path,
        depth: usize,
        summary: &mut GenerateSummary,
    ) -> Result<(), GenerateError> {
        self.create_dir(dir)?;
        summary.directories += 1;

        let index = dir.join(self.config.index_file_name());
        self.write_page(tree, node, &index, depth, false, summary)?;

        for child in tree.exportable_children(node) {
            let child_node = tree.node(child);
            if child_node.is_leaf() {
                let page = dir.join(self.config.page_file_name(&child_node.name));
                self.write_page(tree, child, &page, depth, true, summary)?;
            } else {
                self.visit(tree, child, &dir.join(&child_node.name), depth + 1, summary)?;
            }
        }
        Ok(())
    }

    fn write_page(
        &self,
        tree: &ElementTree,
        node: NodeId,
        path: &Path,
        depth: usize,
        locally: bool,
        summary: &mut GenerateSummary,
    ) -> Result<(), GenerateError> {
        let html = render_page(tree, node, depth, locally, &self.config);
        self.write(path, &html)?;
        summary.pages += 1;
        tracing::debug!(path = %path.display(), "Wrote page");
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<(), GenerateError> {
        self.writer
            .create_dir(path)
            .map_err(|source| GenerateError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), GenerateError> {
        self.writer
            .write(path, contents)
            .map_err(|source| GenerateError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}
