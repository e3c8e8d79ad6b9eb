//! HTML page rendering for annotated program trees.
//!
//! This crate turns one node of an [`ElementTree`](treedoc_tree::ElementTree)
//! into a complete HTML page. It is pure: nothing here touches the
//! filesystem.
//!
//! # Architecture
//!
//! - [`DocText`]: drains `summary`, `returns` and `param` tags from raw
//!   documentation text
//! - [`build_menu`] / [`render_menu`]: ancestor/sibling navigation relative
//!   to the rendered page
//! - [`content_block`] / [`visibility_content_block`] / [`kind_sections`]:
//!   child tables grouped by kind and visibility
//! - [`render_page`]: marker substitution into the page skeleton
//!
//! # Example
//!
//! ```
//! use treedoc_renderer::{RenderConfig, render_page};
//! use treedoc_tree::{ElementKind, ElementMetadata, ElementTree, Visibility};
//!
//! let mut tree = ElementTree::new("Project");
//! let run = tree.add_child(
//!     tree.root(),
//!     "Run",
//!     Some(
//!         ElementMetadata::new(ElementKind::Function, "Run(int times)")
//!             .with_visibility(Visibility::Public)
//!             .with_summary(r#"Runs. <param name="times">repeat count</param>"#),
//!     ),
//! );
//! let html = render_page(&tree, run, 0, true, &RenderConfig::default());
//! assert!(html.contains("int <b>times</b>"));
//! ```

mod content;
mod doc;
mod menu;
mod page;
mod signature;

pub use content::{
    VisibilityBucket, content_block, kind_sections, partition_by_visibility,
    visibility_content_block,
};
pub use doc::{DocParam, DocText, ParamDrain, quick_summary};
pub use menu::{MenuEntry, MenuStyle, build_menu, local_link, render_menu};
pub use page::{RenderConfig, STYLESHEET, STYLESHEET_NAME, render_content, render_page};
pub use signature::{param_type, strip_param_names};
