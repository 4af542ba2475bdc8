//! Content carried by field declarations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Passthrough HTML attributes, kept in declaration order.
pub type Attributes = IndexMap<String, String>;

/// Text or pre-rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Content {
    /// Plain text; escaped by the component generator.
    Text(String),
    /// Trusted HTML; emitted as is.
    Html(String),
}

impl Content {
    /// Plain text content.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// HTML content.
    #[must_use]
    pub fn html(html: impl Into<String>) -> Self {
        Self::Html(html.into())
    }

    /// The raw string, regardless of kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Html(s) => s,
        }
    }
}

/// A field label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label content; falls back to display metadata when absent.
    pub content: Option<Content>,
    /// Render the label as the page heading.
    pub is_page_heading: bool,
    /// Extra attributes.
    pub attributes: Attributes,
}

impl Label {
    /// A label with `content`.
    #[must_use]
    pub fn new(content: Content) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    /// Render as the page heading.
    #[must_use]
    pub const fn as_page_heading(mut self) -> Self {
        self.is_page_heading = true;
        self
    }
}

/// Hint text shown under the label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Hint content; falls back to the display description when absent.
    pub content: Option<Content>,
    /// Extra attributes.
    pub attributes: Attributes,
}

impl Hint {
    /// A hint with `content`.
    #[must_use]
    pub fn new(content: Content) -> Self {
        Self {
            content: Some(content),
            attributes: Attributes::new(),
        }
    }
}

/// An error message shown above the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Message content; falls back to validation state when absent.
    pub content: Option<Content>,
    /// Prefix read by screen readers, e.g. `Error`.
    pub visually_hidden_text: Option<String>,
    /// Extra attributes.
    pub attributes: Attributes,
}

impl ErrorMessage {
    /// An error message with `content`.
    #[must_use]
    pub fn new(content: Content) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }
}

/// The legend of a fieldset group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    /// Legend content; falls back to display metadata when absent.
    pub content: Option<Content>,
    /// Render the legend as the page heading.
    pub is_page_heading: bool,
    /// Extra attributes.
    pub attributes: Attributes,
}

impl Legend {
    /// A legend with `content`.
    #[must_use]
    pub fn new(content: Content) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }
}

/// A closed fieldset group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fieldset {
    /// The legend declared inside the group.
    pub legend: Option<Legend>,
    /// Extra attributes.
    pub attributes: Attributes,
}
