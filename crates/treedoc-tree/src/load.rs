//! JSON input boundary.
//!
//! The front-end hands over the annotated tree as nested JSON:
//!
//! ```json
//! {
//!   "name": "MyProject",
//!   "children": [
//!     {
//!       "name": "Sum",
//!       "info": { "kind": "function", "visibility": "public", "name": "Sum(int x)" }
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::io::Read;

use serde::Deserialize;

use crate::element::ElementMetadata;
use crate::tree::{ElementTree, NodeId};

/// Error returned when an input tree cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Malformed JSON or unexpected field types.
    #[error("Invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Two siblings share a name and would map to the same output file.
    #[error("Duplicate element name '{name}' under '{parent}'")]
    DuplicateName {
        /// Name of the parent node.
        parent: String,
        /// The repeated child name.
        name: String,
    },
    /// A child name that is not a single path component.
    #[error("Invalid element name '{name}' under '{parent}': must be a single path component")]
    InvalidName {
        /// Name of the parent node.
        parent: String,
        /// The rejected child name.
        name: String,
    },
}

/// Whether `name` can be used as one file or directory name.
fn is_path_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[derive(Deserialize)]
struct RawNode {
    name: String,
    #[serde(default)]
    info: Option<ElementMetadata>,
    #[serde(default)]
    children: Vec<RawNode>,
}

impl ElementTree {
    /// Load a tree from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Json`] on malformed input and
    /// [`TreeError::DuplicateName`] when siblings share a name.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let raw: RawNode = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Load a tree from a JSON reader.
    ///
    /// # Errors
    ///
    /// Same as [`ElementTree::from_json`].
    pub fn from_reader(reader: impl Read) -> Result<Self, TreeError> {
        let raw: RawNode = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawNode) -> Result<Self, TreeError> {
        let mut tree = Self::new(raw.name);
        let root = tree.root();
        if let Some(info) = raw.info {
            tree.set_root_info(info);
        }
        let mut pending: Vec<(NodeId, Vec<RawNode>)> = vec![(root, raw.children)];
        while let Some((parent, children)) = pending.pop() {
            let mut seen = HashSet::new();
            for child in children {
                if !is_path_component(&child.name) {
                    return Err(TreeError::InvalidName {
                        parent: tree.node(parent).name.clone(),
                        name: child.name,
                    });
                }
                if !seen.insert(child.name.clone()) {
                    return Err(TreeError::DuplicateName {
                        parent: tree.node(parent).name.clone(),
                        name: child.name,
                    });
                }
                let info = child.info.map(|mut info| {
                    if info.name.is_empty() {
                        info.name.clone_from(&child.name);
                    }
                    info
                });
                let id = tree.add_child(parent, child.name, info);
                pending.push((id, child.children));
            }
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::element::{ElementKind, Visibility};

    #[test]
    fn test_from_json_builds_nested_tree() {
        let json = r#"{
            "name": "Project",
            "children": [
                {
                    "name": "Geometry",
                    "info": { "kind": "namespace" },
                    "children": [
                        {
                            "name": "Area",
                            "info": {
                                "kind": "function",
                                "visibility": "public",
                                "name": "Area(double w, double h)",
                                "type": "double",
                                "modifiers": "static",
                                "summary": "Computes area."
                            }
                        }
                    ]
                }
            ]
        }"#;

        let tree = ElementTree::from_json(json).unwrap();

        let ns = tree.child_by_name(tree.root(), "Geometry").unwrap();
        let area = tree.child_by_name(ns, "Area").unwrap();
        let info = tree.node(area).info.as_ref().unwrap();
        assert_eq!(info.kind, ElementKind::Function);
        assert_eq!(info.visibility, Visibility::Public);
        assert_eq!(info.name, "Area(double w, double h)");
        assert_eq!(info.type_name, "double");
        assert!(info.is_static());
        assert!(info.exportable);
        assert_eq!(tree.depth(area), 2);
    }

    #[test]
    fn test_from_json_defaults_display_name_to_node_name() {
        let json = r#"{"name": "root", "children": [{"name": "Shape", "info": {"kind": "class"}}]}"#;

        let tree = ElementTree::from_json(json).unwrap();

        let shape = tree.child_by_name(tree.root(), "Shape").unwrap();
        assert_eq!(tree.node(shape).info.as_ref().unwrap().name, "Shape");
    }

    #[test]
    fn test_from_json_keeps_sibling_order() {
        let json = r#"{"name": "root", "children": [{"name": "b"}, {"name": "a"}, {"name": "c"}]}"#;

        let tree = ElementTree::from_json(json).unwrap();

        let names: Vec<_> = tree
            .children(tree.root())
            .iter()
            .map(|&id| tree.node(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_from_json_rejects_duplicate_siblings() {
        let json = r#"{"name": "root", "children": [{"name": "a"}, {"name": "a"}]}"#;

        let err = ElementTree::from_json(json).unwrap_err();

        assert!(matches!(err, TreeError::DuplicateName { ref name, .. } if name == "a"));
        assert_eq!(err.to_string(), "Duplicate element name 'a' under 'root'");
    }

    #[test]
    fn test_from_json_rejects_names_escaping_output_dir() {
        for name in ["../escaped", "..", ".", "", "a/b"] {
            let json = format!(
                r#"{{"name": "root", "children": [{{"name": "{name}", "info": {{"kind": "function"}}}}]}}"#
            );

            let err = ElementTree::from_json(&json).unwrap_err();

            assert!(
                matches!(err, TreeError::InvalidName { name: ref rejected, .. } if rejected == name),
                "{name:?}: {err}"
            );
        }
    }

    #[test]
    fn test_from_json_rejects_nested_invalid_name() {
        let json = r#"{"name": "root", "children": [{"name": "Core", "children": [{"name": "../up"}]}]}"#;

        let err = ElementTree::from_json(json).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid element name '../up' under 'Core': must be a single path component"
        );
    }

    #[test]
    fn test_is_path_component() {
        assert!(is_path_component("Shape"));
        assert!(is_path_component("operator=="));
        assert!(is_path_component("..hidden"));
        assert!(!is_path_component(".."));
        assert!(!is_path_component("a\\b"));
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let json = r#"{"name": "root", "children": [{"name": "a", "info": {"kind": "macro"}}]}"#;

        let err = ElementTree::from_json(json).unwrap_err();

        assert!(matches!(err, TreeError::Json(_)));
    }

    #[test]
    fn test_from_reader() {
        let json = br#"{"name": "root", "children": [{"name": "a", "info": {"exportable": false}}]}"#;

        let tree = ElementTree::from_reader(&json[..]).unwrap();

        let a = tree.child_by_name(tree.root(), "a").unwrap();
        assert!(!tree.node(a).is_exportable());
    }
}
