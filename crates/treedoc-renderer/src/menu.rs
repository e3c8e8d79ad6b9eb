//! Side navigation relative to the page being rendered.
//!
//! The menu lists the exportable children of the rendered node, then climbs
//! one level at a time to the root, listing each ancestor's exportable
//! children. Each ancestor level is split at the child the climb came from:
//! siblings up to that child go in front of the deeper levels, the rest after
//! them. The open node therefore keeps its place among its siblings, with
//! everything below it nested right under it.

use std::fmt::Write;

use treedoc_tree::{ElementTree, NodeId};

use crate::signature::strip_param_names;

/// Row template of a menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuStyle {
    /// Ancestor-level entry that has children of its own (`<h2>`).
    Ancestor,
    /// Entry at the level of the open page, or a childless entry (`<h3>`).
    Sibling,
}

/// One line of the navigation menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    /// Depth of the listed level in the tree (root = 0).
    pub depth: usize,
    /// Link relative to the rendered page.
    pub link: String,
    /// Display text (declared name without parameter names).
    pub text: String,
    /// Row template.
    pub style: MenuStyle,
}

/// Entries of one level plus the position after the child the climb came from.
struct MenuLevel {
    entries: Vec<MenuEntry>,
    split: usize,
}

/// Link to a node from its parent's directory.
///
/// Leaf elements are `Name.<ext>`; containers are `Name/index.<ext>`.
pub fn local_link(tree: &ElementTree, id: NodeId, extension: &str) -> String {
    let node = tree.node(id);
    if node.is_leaf() {
        format!("{}.{extension}", node.name)
    } else {
        format!("{}/index.{extension}", node.name)
    }
}

/// Build the navigation entries for the page documenting `from`.
///
/// `locally` is true when the page file sits in the same directory as its
/// container's index, which saves one `../` on the first climb.
pub fn build_menu(
    tree: &ElementTree,
    from: NodeId,
    locally: bool,
    extension: &str,
) -> Vec<MenuEntry> {
    let mut levels = Vec::new();
    let mut node = from;
    let mut came_from: Option<NodeId> = None;
    let mut prefix = String::new();
    let mut depth = tree.depth(from);
    let mut first_climb = true;

    loop {
        let mut entries = Vec::new();
        let mut split = None;
        for child in tree.exportable_children(node) {
            let child_node = tree.node(child);
            let style = if !prefix.is_empty() && !child_node.children().is_empty() {
                MenuStyle::Ancestor
            } else {
                MenuStyle::Sibling
            };
            entries.push(MenuEntry {
                depth,
                link: format!("{prefix}{}", local_link(tree, child, extension)),
                text: strip_param_names(child_node.display_name()),
                style,
            });
            if came_from == Some(child) {
                split = Some(entries.len());
            }
        }
        let split = split.unwrap_or(entries.len());
        levels.push(MenuLevel { entries, split });

        let Some(parent) = tree.parent(node) else {
            break;
        };
        if !(first_climb && locally) {
            prefix.insert_str(0, "../");
        }
        first_climb = false;
        came_from = Some(node);
        node = parent;
        depth = depth.saturating_sub(1);
    }

    let mut menu = Vec::new();
    for MenuLevel { mut entries, split } in levels {
        let back = entries.split_off(split);
        entries.append(&mut menu);
        entries.extend(back);
        menu = entries;
    }
    menu
}

/// Indentation for a menu entry: `&nbsp;` plus `depth - 1` spaces.
fn indent(depth: usize) -> String {
    if depth == 0 {
        String::new()
    } else {
        format!("&nbsp;{}", " ".repeat(depth - 1))
    }
}

/// Render menu entries to HTML, one heading per entry.
pub fn render_menu(entries: &[MenuEntry]) -> String {
    let mut html = String::new();
    for entry in entries {
        let tag = match entry.style {
            MenuStyle::Ancestor => "h2",
            MenuStyle::Sibling => "h3",
        };
        let _ = write!(
            html,
            "\n<{tag}>{}<a href=\"{}\">{}</a></{tag}>",
            indent(entry.depth),
            entry.link,
            entry.text
        );
    }
    html
}
