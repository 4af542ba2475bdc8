//! Field kinds and the identities of the declarations that configure them.
//!
//! Configuration errors name the offending and the already-present
//! declarations, e.g. `<govuk-date-input-hint>`, so a template author can find
//! them in their markup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of composite field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Day/month/year date input.
    DateInput,
    /// Multi-select checkboxes.
    Checkboxes,
    /// Single-select radios.
    Radios,
    /// Drop-down select.
    Select,
    /// Multi-line text area.
    TextArea,
}

impl FieldKind {
    /// Prefix shared by every declaration of this kind.
    #[must_use]
    pub const fn tag_prefix(self) -> &'static str {
        match self {
            Self::DateInput => "govuk-date-input",
            Self::Checkboxes => "govuk-checkboxes",
            Self::Radios => "govuk-radios",
            Self::Select => "govuk-select",
            Self::TextArea => "govuk-textarea",
        }
    }

    /// Whether this kind can be wrapped in a fieldset group.
    #[must_use]
    pub const fn supports_group(self) -> bool {
        matches!(self, Self::DateInput | Self::Checkboxes | Self::Radios)
    }

    /// Identity of `element` within this kind.
    #[must_use]
    pub const fn element(self, element: ElementKind) -> ElementId {
        ElementId {
            field: self,
            element,
        }
    }
}

/// The role a declaration plays within a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The field label.
    Label,
    /// The hint text.
    Hint,
    /// The error message.
    ErrorMessage,
    /// The fieldset wrapper.
    Group,
    /// The fieldset legend.
    Legend,
    /// A sub-item, named by the kind's vocabulary (`day`, `item`, `value`, ...).
    Item(&'static str),
}

impl ElementKind {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Hint => "hint",
            Self::ErrorMessage => "error-message",
            Self::Group => "fieldset",
            Self::Legend => "fieldset-legend",
            Self::Item(name) => name,
        }
    }
}

/// Identity of one declaration: its field kind plus its element role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    /// Kind of the enclosing field.
    pub field: FieldKind,
    /// Role of the declaration.
    pub element: ElementKind,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}-{}>", self.field.tag_prefix(), self.element.suffix())
    }
}

/// A value together with the declaration that set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declared<T> {
    /// The declared value.
    pub value: T,
    /// Who declared it.
    pub declared_by: ElementId,
}

impl<T> Declared<T> {
    /// Pair `value` with its declaration.
    #[must_use]
    pub const fn new(value: T, declared_by: ElementId) -> Self {
        Self { value, declared_by }
    }
}
