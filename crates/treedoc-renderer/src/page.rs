//! Page assembly.
//!
//! Pages are produced by substituting markers in a fixed skeleton. The
//! markers are plain HTML comments, so documentation text that contains one
//! of them literally will corrupt the page.

use treedoc_tree::{ElementTree, NodeId, Visibility};

use crate::content::{RowWriter, kind_sections, prefixed};
use crate::doc::DocText;
use crate::menu::{build_menu, render_menu};
use crate::signature::param_type;

const TITLE_MARKER: &str = "<!--title-->";
const CSS_MARKER: &str = "<!--css-->";
const MENU_MARKER: &str = "<!--menu-->";
const CONTENT_MARKER: &str = "<!--content-->";

/// File name of the stylesheet at the documentation root.
pub const STYLESHEET_NAME: &str = "style.css";

/// Page skeleton: menu in the left column, content in the right.
const PAGE_TEMPLATE: &str = r#"<html>
    <head>
        <title><!--title--></title>
        <link rel="stylesheet" href="<!--css-->" type="text/css">
    </head>
    <body>
        <table class="mt">
            <tr>
                <td class="t1">
                    <!--menu-->
                </td>
                <td>
                    <!--content-->
                </td>
            </tr>
        </table>
    </body>
</html>"#;

/// Stylesheet shared by all pages.
pub const STYLESHEET: &str = r".mt { height: 100%; }
.sr { background-color: #EEEEEE; }
.t1 { width: 250px; }
.t2 { width: 350px; }
a:link { color: red; text-decoration: none; }
a:visited { color: red; text-decoration: none; }
a:active { color: red; text-decoration: underline; }
a:hover { color: red; text-decoration: underline; }
h1 {
  font-size: 24px;
  margin: 0;
  margin-bottom: 6px;
}
h2 {
  font-size: 16px;
  margin: 0;
}
h3 {
  font-size: 14px;
  margin: 0;
}
html, body {
  font-family: Verdana;
  height: 100%;
  margin: 0;
}
table {
  border: none;
  padding-bottom: 8px;
  width: 100%;
}
table tr td {
  text-align: left;
  vertical-align: top;
}
";

/// Rendering options for one documentation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Show attribute annotations in metadata tables.
    pub export_attributes: bool,
    /// Output file extension without the leading dot.
    pub extension: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            export_attributes: false,
            extension: "html".to_owned(),
        }
    }
}

impl RenderConfig {
    /// File name of a container's index page.
    #[must_use]
    pub fn index_file_name(&self) -> String {
        format!("index.{}", self.extension)
    }

    /// File name of a leaf element's page.
    #[must_use]
    pub fn page_file_name(&self, name: &str) -> String {
        format!("{name}.{}", self.extension)
    }
}

/// Column of `marker` within its line in `template`.
fn marker_column(template: &str, marker: &str) -> usize {
    let Some(pos) = template.find(marker) else {
        return 0;
    };
    let line_start = template[..pos].rfind('\n').map_or(0, |i| i + 1);
    pos - line_start
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Indent every line after the first by `width` spaces.
fn indent_continuation(text: &str, width: usize) -> String {
    text.lines()
        .collect::<Vec<_>>()
        .join(&format!("\n{}", " ".repeat(width)))
}

/// Render the full HTML page for `node`.
///
/// `depth` is the number of directories between the page and the
/// documentation root. `locally` is true for leaf pages that sit next to
/// their container's index.
pub fn render_page(
    tree: &ElementTree,
    node: NodeId,
    depth: usize,
    locally: bool,
    config: &RenderConfig,
) -> String {
    let menu = render_menu(&build_menu(tree, node, locally, &config.extension));
    let menu = indent_continuation(menu.trim(), marker_column(PAGE_TEMPLATE, MENU_MARKER));
    let css = format!("{}{STYLESHEET_NAME}", "../".repeat(depth));

    PAGE_TEMPLATE
        .replace(TITLE_MARKER, &escape(&tree.node(node).name))
        .replace(MENU_MARKER, &menu)
        .replace(CSS_MARKER, &css)
        .replace(CONTENT_MARKER, &render_content(tree, node, config))
}

/// Render the content column for `node`.
///
/// Elements with metadata get their summary, a metadata table, and a
/// parameter table when documented parameters remain. Every page ends with
/// the content tables of its exportable children.
pub fn render_content(tree: &ElementTree, node: NodeId, config: &RenderConfig) -> String {
    let element = tree.node(node);
    let mut out = String::from("<h1>");
    match &element.info {
        Some(info) => out.push_str(&prefixed(&info.type_name, element.display_name())),
        None => out.push_str(&element.name),
    }
    out.push_str("</h1>\n");

    if let Some(info) = &element.info {
        let mut doc = DocText::new(info.summary.as_str());
        out.push_str(&doc.summary());
        out.push_str("\n<table>");
        let mut rows = RowWriter::new(&mut out);
        if config.export_attributes && !info.attributes.is_empty() {
            rows.row("Attributes", &info.attributes);
        }
        if info.visibility != Visibility::Default {
            rows.row("Visibility", &info.visibility.to_string());
        }
        if !info.modifiers.is_empty() {
            rows.row("Modifiers", &info.modifiers);
        }
        if !info.extends.is_empty() {
            rows.row("Extends", &info.extends);
        }
        if !info.default_value.is_empty() {
            rows.row("Default value", &info.default_value);
        }
        let returns = doc.take_tag("returns");
        if !returns.is_empty() {
            rows.row("Returns", &returns);
        }
        out.push_str("\n</table>\n");

        if doc.has_params() {
            out.push_str("<h1>Parameters</h1>\n<table>");
            let mut rows = RowWriter::new(&mut out);
            for param in doc.params() {
                let declared = param_type(&info.name, &param.name);
                if declared.is_empty() {
                    tracing::debug!(
                        element = %info.name,
                        parameter = %param.name,
                        "No declared type for documented parameter"
                    );
                }
                rows.row(
                    &prefixed(&declared, &format!("<b>{}</b>", param.name)),
                    &param.description,
                );
            }
            out.push_str("\n</table>\n");
        }
    }

    out.push_str(&kind_sections(tree, node, &config.extension));
    out
}
