//! Extraction of tagged fields from raw documentation text.
//!
//! Documentation strings carry inline markers such as
//! `<summary>…</summary>`, `<returns>…</returns>` and
//! `<param name="x">…</param>`. [`DocText`] owns one such string and removes
//! tags from it as they are extracted, leaving the plain remainder.
//!
//! # Example
//!
//! ```
//! use treedoc_renderer::DocText;
//!
//! let mut doc = DocText::new(r#"<param name="x">count</param>Adds.<returns>sum</returns>"#);
//! assert_eq!(doc.take_tag("returns"), "sum");
//! let params: Vec<_> = doc.params().map(|p| p.name).collect();
//! assert_eq!(params, ["x"]);
//! assert_eq!(doc.summary(), "Adds.");
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&tag_pattern("summary")).unwrap());

static RETURNS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&tag_pattern("returns")).unwrap());

static PARAM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&tag_pattern("param")).unwrap());

/// `name="…"` or `name='…'` inside an opening tag's attribute list.
static NAME_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)name\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Self-closing reference such as `<see cref="Other"/>` or `<paramref name="x"/>`.
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<[A-Za-z][\w.:-]*\s[^>]*?\b(?:name|cref|langword|href)\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*?/>"#,
    )
    .unwrap()
});

/// Any remaining opening, closing or self-closing tag marker.
static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][\w.:-]*(?:\s[^>]*)?/?>").unwrap());

/// Pattern for the first complete `<name …>…</name>` or self-closing `<name …/>`.
///
/// Group 1 holds the attribute list, group 2 the inner text. `\b` after the
/// name skips longer tag names (`<paramref` for `param`).
fn tag_pattern(name: &str) -> String {
    let name = regex::escape(name);
    format!(r"(?s)<{name}\b([^>]*?)(?:/>|>(.*?)</{name}>)")
}

fn find_tag<'t>(text: &'t str, name: &str) -> Option<Captures<'t>> {
    match name {
        "summary" => SUMMARY_RE.captures(text),
        "returns" => RETURNS_RE.captures(text),
        "param" => PARAM_RE.captures(text),
        _ => Regex::new(&tag_pattern(name)).ok()?.captures(text),
    }
}

/// Value of the first capture group that participated in the match.
fn either<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str())
}

/// Plain text of `text`: structured blocks removed, references replaced by
/// their target, other markup unwrapped to its inner text.
fn plain_text(text: &str) -> String {
    let mut rest = text.to_owned();
    for re in [&*SUMMARY_RE, &*PARAM_RE, &*RETURNS_RE] {
        rest = re.replace_all(&rest, "").into_owned();
    }
    let rest = REFERENCE_RE.replace_all(&rest, |caps: &Captures<'_>| either(caps).to_owned());
    MARKUP_RE.replace_all(&rest, "").trim().to_owned()
}

/// A documented parameter extracted from a `<param>` tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocParam {
    /// Value of the `name` attribute.
    pub name: String,
    /// Trimmed tag contents.
    pub description: String,
}

/// Mutable documentation buffer drained by tag extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocText {
    text: String,
}

impl DocText {
    /// Wrap raw documentation text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Current buffer contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Remove the first `<name>…</name>` and return its trimmed contents.
    ///
    /// Returns an empty string when the tag is absent or unterminated; the
    /// buffer is left untouched in that case.
    pub fn take_tag(&mut self, name: &str) -> String {
        let Some(caps) = find_tag(&self.text, name) else {
            return String::new();
        };
        let span = caps.get(0).map_or(0..0, |m| m.range());
        let inner = caps.get(2).map_or("", |m| m.as_str()).trim().to_owned();
        self.text.replace_range(span, "");
        inner
    }

    /// Remove the first `<param name="…">…</param>`.
    ///
    /// Returns `None` once no complete parameter tag remains.
    pub fn take_param(&mut self) -> Option<DocParam> {
        let caps = PARAM_RE.captures(&self.text)?;
        let span = caps.get(0)?.range();
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let name = NAME_ATTR_RE
            .captures(attrs)
            .map_or("", |attr| either(&attr))
            .to_owned();
        let description = caps.get(2).map_or("", |m| m.as_str()).trim().to_owned();
        self.text.replace_range(span, "");
        Some(DocParam { name, description })
    }

    /// Drain all parameter tags in source order.
    pub fn params(&mut self) -> ParamDrain<'_> {
        ParamDrain { doc: self }
    }

    /// Whether a closing parameter marker remains in the buffer.
    #[must_use]
    pub fn has_params(&self) -> bool {
        self.text.contains("</param>")
    }

    /// Main description of the element.
    ///
    /// Takes the `<summary>` tag when present. Otherwise uses the remainder of
    /// the buffer without the `summary`, `param` and `returns` blocks, which
    /// are not consumed. Inline markup such as `<c>null</c>` or
    /// `<paramref name="x"/>` is reduced to its text.
    pub fn summary(&mut self) -> String {
        let tagged = self.take_tag("summary");
        if tagged.is_empty() {
            plain_text(&self.text)
        } else {
            plain_text(&tagged)
        }
    }
}

/// Lazy, finite sequence of parameters drained from a [`DocText`].
///
/// Each step removes the yielded tag from the underlying buffer, so the
/// sequence cannot be restarted.
pub struct ParamDrain<'a> {
    doc: &'a mut DocText,
}

impl Iterator for ParamDrain<'_> {
    type Item = DocParam;

    fn next(&mut self) -> Option<Self::Item> {
        self.doc.take_param()
    }
}

/// First line of an element's description, used in content tables.
#[must_use]
pub fn quick_summary(raw: &str) -> String {
    DocText::new(raw)
        .summary()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_owned()
}
