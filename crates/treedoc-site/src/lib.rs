//! Static documentation site generation.
//!
//! Turns an [`ElementTree`](treedoc_tree::ElementTree) into a directory of
//! HTML pages plus a shared stylesheet. Output goes through the
//! [`SiteWriter`] trait so generation can be exercised without touching the
//! filesystem.
//!
//! # Layout
//!
//! ```text
//! <root>/
//! ├── style.css
//! ├── index.html            root page
//! └── Core/                 one directory per container
//!     ├── index.html
//!     ├── Run.html          one page per leaf element
//!     └── Shape/
//!         └── index.html
//! ```
//!
//! # Features
//!
//! - `mock`: exposes [`MemoryWriter`] for downstream tests

mod generator;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod writer;

pub use generator::{GenerateError, GenerateSummary, SiteGenerator};
#[cfg(any(test, feature = "mock"))]
pub use mock::MemoryWriter;
pub use treedoc_renderer::RenderConfig;
pub use writer::{FsWriter, SiteWriter};
