//! Checkboxes and radios.
//!
//! Both kinds share a vocabulary: an ordered list of items and dividers,
//! optionally wrapped in a fieldset group. They differ only in how many items
//! a user can pick, which matters to the host, not to the builder.

use crate::content::{Attributes, Content, Fieldset, Legend};
use crate::context::{FieldContext, FormGroupContext, Group};
use crate::element::{Declared, ElementId, ElementKind, FieldKind};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The two choice-list field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    /// Any number of items may be checked.
    Checkboxes,
    /// At most one item may be checked.
    Radios,
}

impl ChoiceKind {
    /// The matching field kind.
    #[must_use]
    pub const fn field_kind(self) -> FieldKind {
        match self {
            Self::Checkboxes => FieldKind::Checkboxes,
            Self::Radios => FieldKind::Radios,
        }
    }
}

/// One selectable item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceItem {
    /// Submitted value.
    pub value: String,
    /// Item label.
    pub content: Option<Content>,
    /// Item hint.
    pub hint: Option<Content>,
    /// Explicit checked state, overriding submitted and bound values.
    pub checked: Option<bool>,
    /// Content revealed when the item is checked.
    pub conditional: Option<Content>,
    /// Whether the input is disabled.
    pub disabled: bool,
    /// Overrides the generated id.
    pub id: Option<String>,
    /// Extra attributes.
    pub attributes: Attributes,
}

impl ChoiceItem {
    /// An item submitting `value`, labelled with `content`.
    #[must_use]
    pub fn new(value: impl Into<String>, content: Content) -> Self {
        Self {
            value: value.into(),
            content: Some(content),
            ..Self::default()
        }
    }

    /// Set the explicit checked state.
    #[must_use]
    pub const fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Set the item hint.
    #[must_use]
    pub fn with_hint(mut self, hint: Content) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Set conditionally revealed content.
    #[must_use]
    pub fn with_conditional(mut self, conditional: Content) -> Self {
        self.conditional = Some(conditional);
        self
    }

    /// Disable the input.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// An entry in a choice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChoiceEntry {
    /// A selectable item.
    Item(ChoiceItem),
    /// A text divider between items, usually "or".
    Divider {
        /// Divider text.
        text: String,
    },
}

impl ChoiceEntry {
    const fn tag(&self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::Divider { .. } => "divider",
        }
    }
}

/// Builder state for one checkboxes or radios instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicesContext {
    kind: ChoiceKind,
    field: FieldContext,
    group: Group,
    entries: Vec<Declared<ChoiceEntry>>,
}

impl ChoicesContext {
    /// An empty context.
    #[must_use]
    pub const fn new(kind: ChoiceKind) -> Self {
        Self {
            kind,
            field: FieldContext::new(kind.field_kind()),
            group: Group::new(kind.field_kind()),
            entries: Vec::new(),
        }
    }

    /// Which choice kind this is.
    #[must_use]
    pub const fn kind(&self) -> ChoiceKind {
        self.kind
    }

    /// Declared entries, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &ChoiceEntry> {
        self.entries.iter().map(|entry| &entry.value)
    }

    /// The closed fieldset, if the field is grouped.
    #[must_use]
    pub const fn fieldset(&self) -> Option<&Fieldset> {
        self.group.fieldset()
    }

    /// Append an item or divider.
    ///
    /// # Errors
    ///
    /// Fails while a group is open.
    pub fn add_entry(&mut self, entry: ChoiceEntry) -> Result<()> {
        let id = self.kind.field_kind().element(ElementKind::Item(entry.tag()));
        self.group.check_outside(id)?;
        self.entries.push(Declared::new(entry, id));
        Ok(())
    }

    /// Open the fieldset group.
    ///
    /// # Errors
    ///
    /// See [`Group::open`].
    pub fn open_group(&mut self) -> Result<()> {
        let first_item = self.first_item();
        self.group.open(&self.field, first_item)
    }

    /// Declare the legend inside the open group.
    ///
    /// # Errors
    ///
    /// See [`Group::set_legend`].
    pub fn set_legend(&mut self, legend: Legend) -> Result<()> {
        self.group.set_legend(legend)
    }

    /// Close the open group.
    ///
    /// # Errors
    ///
    /// See [`Group::close`].
    pub fn close_group(&mut self, attributes: Attributes) -> Result<()> {
        self.group.close(attributes)
    }

    /// Check the context is complete.
    ///
    /// # Errors
    ///
    /// Fails if the group is still open.
    pub fn finish(&self) -> Result<()> {
        self.group.check_closed()
    }
}

impl FormGroupContext for ChoicesContext {
    fn field(&self) -> &FieldContext {
        &self.field
    }

    fn field_mut(&mut self) -> &mut FieldContext {
        &mut self.field
    }

    fn first_item(&self) -> Option<ElementId> {
        self.entries.first().map(|entry| entry.declared_by)
    }

    fn check_declaration(&self, element: ElementId) -> Result<()> {
        self.group.check_outside(element)?;
        self.group.check_label(element)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::content::{ErrorMessage, Hint, Label};
    use crate::error::ConfigurationError;

    #[test]
    fn test_items_and_dividers_keep_order() {
        let mut ctx = ChoicesContext::new(ChoiceKind::Radios);
        ctx.add_entry(ChoiceEntry::Item(ChoiceItem::new("yes", Content::text("Yes"))))
            .expect("yes");
        ctx.add_entry(ChoiceEntry::Divider {
            text: "or".to_string(),
        })
        .expect("divider");
        ctx.add_entry(ChoiceEntry::Item(ChoiceItem::new("no", Content::text("No"))))
            .expect("no");

        let tags: Vec<_> = ctx.entries().map(ChoiceEntry::tag).collect();
        assert_eq!(tags, vec!["item", "divider", "item"]);
    }

    #[test]
    fn test_error_message_after_item_names_item() {
        let mut ctx = ChoicesContext::new(ChoiceKind::Checkboxes);
        ctx.add_entry(ChoiceEntry::Item(ChoiceItem::new("a", Content::text("A"))))
            .expect("item");
        assert_eq!(
            ctx.set_error_message(ErrorMessage::default()),
            Err(ConfigurationError::MustBeDeclaredBefore {
                element: FieldKind::Checkboxes.element(ElementKind::ErrorMessage),
                existing: FieldKind::Checkboxes.element(ElementKind::Item("item")),
            })
        );
    }

    #[test]
    fn test_grouped_checkboxes() {
        let mut ctx = ChoicesContext::new(ChoiceKind::Checkboxes);
        ctx.open_group().expect("open");
        ctx.set_legend(Legend::new(Content::text("Which?"))).expect("legend");
        assert!(matches!(
            ctx.add_entry(ChoiceEntry::Item(ChoiceItem::default())),
            Err(ConfigurationError::InsideGroup { .. })
        ));
        ctx.close_group(Attributes::new()).expect("close");
        ctx.set_hint(Hint::default()).expect("hint");
        ctx.add_entry(ChoiceEntry::Item(ChoiceItem::default()))
            .expect("item");
        assert!(ctx.finish().is_ok());
        assert!(matches!(
            ctx.set_label(Label::default()),
            Err(ConfigurationError::MutuallyExclusive { .. })
        ));
    }
}
