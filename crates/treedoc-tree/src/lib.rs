//! Annotated program structure tree for treedoc.
//!
//! This crate provides:
//! - [`ElementTree`]: read-only arena of [`ElementNode`]s with parent links
//! - [`ElementMetadata`]: kind, visibility, modifiers and raw documentation
//! - JSON loading of trees produced by a source front-end
//!
//! # Example
//!
//! ```
//! use treedoc_tree::{ElementKind, ElementMetadata, ElementTree, Visibility};
//!
//! let mut tree = ElementTree::new("Project");
//! let ns = tree.add_child(
//!     tree.root(),
//!     "Geometry",
//!     Some(ElementMetadata::new(ElementKind::Namespace, "Geometry")),
//! );
//! tree.add_child(
//!     ns,
//!     "Area",
//!     Some(
//!         ElementMetadata::new(ElementKind::Function, "Area(double w, double h)")
//!             .with_visibility(Visibility::Public),
//!     ),
//! );
//! assert_eq!(tree.depth(ns), 1);
//! ```

mod element;
mod load;
mod tree;

pub use element::{ElementKind, ElementMetadata, Visibility};
pub use load::TreeError;
pub use tree::{ElementNode, ElementTree, NodeId};
