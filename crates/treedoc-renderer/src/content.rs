//! Content tables grouped by element kind and visibility.

use std::collections::BTreeMap;
use std::fmt::Write;

use treedoc_tree::{ElementKind, ElementTree, NodeId, Visibility};

use crate::doc::quick_summary;
use crate::menu::local_link;

/// Stylesheet class of shaded table rows.
pub(crate) const EVEN_ROW_CLASS: &str = "sr";
/// Stylesheet class of the first column in the first table row.
pub(crate) const FIRST_COLUMN_CLASS: &str = "t2";

/// Appends two-column table rows with alternating shading.
///
/// The row counters live only as long as one table.
pub(crate) struct RowWriter<'a> {
    out: &'a mut String,
    first_entry: bool,
    even_row: bool,
}

impl<'a> RowWriter<'a> {
    pub(crate) fn new(out: &'a mut String) -> Self {
        Self {
            out,
            first_entry: true,
            even_row: false,
        }
    }

    /// Append one row.
    pub(crate) fn row(&mut self, entry: &str, description: &str) {
        let row_class = if self.even_row {
            format!(" class=\"{EVEN_ROW_CLASS}\"")
        } else {
            String::new()
        };
        let column_class = if self.first_entry {
            format!(" class=\"{FIRST_COLUMN_CLASS}\"")
        } else {
            String::new()
        };
        let _ = write!(
            self.out,
            "\n    <tr{row_class}>\n        <td{column_class}>{entry}</td>\n        <td>{description}</td>\n    </tr>"
        );
        self.first_entry = false;
        self.even_row = !self.even_row;
    }
}

/// Join a type prefix and a name with a space, skipping an empty prefix.
pub(crate) fn prefixed(prefix: &str, text: &str) -> String {
    if prefix.is_empty() {
        text.to_owned()
    } else {
        format!("{prefix} {text}")
    }
}

/// Render a titled table with one linked row per node.
///
/// Nodes are sorted by name (ordinal, case-sensitive), so any permutation of
/// the same nodes renders identically. Returns an empty string for no nodes.
pub fn content_block(tree: &ElementTree, nodes: &[NodeId], title: &str, extension: &str) -> String {
    if nodes.is_empty() {
        return String::new();
    }
    let mut sorted = nodes.to_vec();
    sorted.sort_by(|&a, &b| tree.node(a).name.cmp(&tree.node(b).name));

    let mut block = format!("<h1>{title}</h1>\n<table>");
    let mut rows = RowWriter::new(&mut block);
    for id in sorted {
        let node = tree.node(id);
        let (type_name, summary) = node
            .info
            .as_ref()
            .map_or(("", ""), |info| (info.type_name.as_str(), info.summary.as_str()));
        let link = format!(
            "<a href=\"{}\">{}</a>",
            local_link(tree, id, extension),
            node.display_name()
        );
        rows.row(&prefixed(type_name, &link), &quick_summary(summary));
    }
    block.push_str("\n</table>");
    block
}

/// Key of a visibility bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisibilityBucket {
    pub visibility: Visibility,
    pub is_static: bool,
}

/// Partition nodes by visibility and static-ness.
///
/// Nodes with `Default` visibility (or no metadata) are left out.
pub fn partition_by_visibility(
    tree: &ElementTree,
    nodes: &[NodeId],
) -> BTreeMap<VisibilityBucket, Vec<NodeId>> {
    let mut buckets: BTreeMap<VisibilityBucket, Vec<NodeId>> = BTreeMap::new();
    for &id in nodes {
        let Some(info) = &tree.node(id).info else {
            continue;
        };
        if info.visibility == Visibility::Default {
            continue;
        }
        let key = VisibilityBucket {
            visibility: info.visibility,
            is_static: info.is_static(),
        };
        buckets.entry(key).or_default().push(id);
    }
    buckets
}

/// Render content tables grouped by visibility.
///
/// From most to least visible, the instance table comes before the static
/// one: "Public functions", "Public static functions", "Protected …".
pub fn visibility_content_block(
    tree: &ElementTree,
    nodes: &[NodeId],
    title_postfix: &str,
    extension: &str,
) -> String {
    let buckets = partition_by_visibility(tree, nodes);
    let mut out = String::new();
    for visibility in Visibility::LISTED {
        for is_static in [false, true] {
            let key = VisibilityBucket {
                visibility,
                is_static,
            };
            let Some(bucket) = buckets.get(&key) else {
                continue;
            };
            let title = if is_static {
                format!("{visibility} static {title_postfix}")
            } else {
                format!("{visibility} {title_postfix}")
            };
            out.push_str(&content_block(tree, bucket, &title, extension));
        }
    }
    out
}

/// Render the content tables for all exportable children of `node`.
///
/// Kinds are emitted in ascending order. Namespaces get a single table since
/// visibility does not apply to them.
pub fn kind_sections(tree: &ElementTree, node: NodeId, extension: &str) -> String {
    let mut by_kind: BTreeMap<ElementKind, Vec<NodeId>> = BTreeMap::new();
    for child in tree.exportable_children(node) {
        if let Some(info) = &tree.node(child).info {
            by_kind.entry(info.kind).or_default().push(child);
        }
    }

    let mut out = String::new();
    for kind in ElementKind::ALL {
        let Some(nodes) = by_kind.get(&kind) else {
            continue;
        };
        let section = match kind {
            ElementKind::Namespace => content_block(tree, nodes, "Namespaces", extension),
            _ => visibility_content_block(tree, nodes, kind.plural(), extension),
        };
        out.push_str(&section);
    }
    out
}
