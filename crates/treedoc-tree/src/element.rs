//! Element metadata attached to tree nodes.

use std::fmt;

use serde::Deserialize;

/// Element category.
///
/// Variants are declared in rendering order: containers first, leaves last.
/// Kinds from [`ElementKind::Function`] onward are rendered as a single page,
/// kinds before it get their own directory with an index page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Namespace,
    Class,
    Interface,
    Struct,
    Enum,
    Function,
    Property,
    Variable,
}

impl ElementKind {
    /// All kinds in rendering order.
    pub const ALL: [Self; 8] = [
        Self::Namespace,
        Self::Class,
        Self::Interface,
        Self::Struct,
        Self::Enum,
        Self::Function,
        Self::Property,
        Self::Variable,
    ];

    /// Whether elements of this kind are rendered as a single page.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Function | Self::Property | Self::Variable)
    }

    /// Lowercase plural used in content table titles (e.g. "functions").
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Namespace => "namespaces",
            Self::Class => "classes",
            Self::Interface => "interfaces",
            Self::Struct => "structs",
            Self::Enum => "enums",
            Self::Function => "functions",
            Self::Property => "properties",
            Self::Variable => "variables",
        }
    }
}

/// Access level of an element.
///
/// Ordered from least to most visible; `Default` means unspecified.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Default,
    Private,
    Protected,
    Public,
}

impl Visibility {
    /// Visibility levels that get content tables, most visible first.
    pub const LISTED: [Self; 3] = [Self::Public, Self::Protected, Self::Private];
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "Default",
            Self::Private => "Private",
            Self::Protected => "Protected",
            Self::Public => "Public",
        };
        f.write_str(name)
    }
}

/// Documentation-relevant facts about an element.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementMetadata {
    /// Element category.
    pub kind: ElementKind,
    /// Declared access level.
    pub visibility: Visibility,
    /// Declared name; for functions this includes the parameter list,
    /// e.g. `Sum(int x, int y)`.
    pub name: String,
    /// Space-separated keyword modifiers (e.g. "static readonly").
    pub modifiers: String,
    /// Base type text.
    pub extends: String,
    /// Initializer text for variables.
    pub default_value: String,
    /// Raw attribute annotation text.
    pub attributes: String,
    /// Declared type or signature prefix shown before the name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Raw documentation text, still containing tag markers.
    pub summary: String,
    /// Whether this element gets a page and a menu entry.
    pub exportable: bool,
}

impl Default for ElementMetadata {
    fn default() -> Self {
        Self {
            kind: ElementKind::Namespace,
            visibility: Visibility::Default,
            name: String::new(),
            modifiers: String::new(),
            extends: String::new(),
            default_value: String::new(),
            attributes: String::new(),
            type_name: String::new(),
            summary: String::new(),
            exportable: true,
        }
    }
}

impl ElementMetadata {
    /// Create metadata of the given kind with default values.
    #[must_use]
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set the modifier list.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl Into<String>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    /// Set the declared type.
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Set the raw documentation text.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the base type.
    #[must_use]
    pub fn with_extends(mut self, extends: impl Into<String>) -> Self {
        self.extends = extends.into();
        self
    }

    /// Set the initializer text.
    #[must_use]
    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Set the attribute annotation text.
    #[must_use]
    pub fn with_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    /// Mark the element as hidden from the generated site.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.exportable = false;
        self
    }

    /// Whether the modifier set contains `static`.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.split_whitespace().any(|m| m == "static")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order_puts_containers_first() {
        let leaves: Vec<_> = ElementKind::ALL.iter().filter(|k| k.is_leaf()).collect();
        assert_eq!(
            leaves,
            vec![
                &ElementKind::Function,
                &ElementKind::Property,
                &ElementKind::Variable
            ]
        );
        assert!(ElementKind::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(ElementKind::Enum < ElementKind::Function);
    }

    #[test]
    fn test_visibility_order() {
        assert!(Visibility::Default < Visibility::Private);
        assert!(Visibility::Private < Visibility::Protected);
        assert!(Visibility::Protected < Visibility::Public);
        assert!(!Visibility::LISTED.contains(&Visibility::Default));
    }

    #[test]
    fn test_is_static_matches_whole_word() {
        let meta = ElementMetadata::new(ElementKind::Function, "f()").with_modifiers("static");
        assert!(meta.is_static());

        let meta = ElementMetadata::new(ElementKind::Function, "f()")
            .with_modifiers("readonly static");
        assert!(meta.is_static());

        let meta = ElementMetadata::new(ElementKind::Function, "f()").with_modifiers("nonstatic");
        assert!(!meta.is_static());

        let meta = ElementMetadata::new(ElementKind::Function, "f()");
        assert!(!meta.is_static());
    }

    #[test]
    fn test_default_metadata_is_exportable() {
        let meta = ElementMetadata::default();
        assert!(meta.exportable);
        assert!(!meta.hidden().exportable);
    }

    #[test]
    fn test_visibility_display() {
        assert_eq!(Visibility::Public.to_string(), "Public");
        assert_eq!(Visibility::Protected.to_string(), "Protected");
        assert_eq!(Visibility::Private.to_string(), "Private");
    }
}
