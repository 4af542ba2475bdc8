//! Shared ordering and cardinality rules for composite fields.
//!
//! Every field kind accepts at most one label, hint and error message, in that
//! order, followed by its own sub-items. [`FieldContext`] stores the three
//! shared elements; [`FormGroupContext`] is implemented by each field kind and
//! supplies the default methods that enforce the rules, so a kind only has to
//! say which of its items was declared first and whether an open group forbids
//! a declaration.
//!
//! Setters return a [`Result`](crate::error::Result) rather than failing the
//! whole traversal, so a caller can keep going and report every problem.

use crate::content::{Attributes, ErrorMessage, Fieldset, Hint, Label, Legend};
use crate::element::{Declared, ElementId, ElementKind, FieldKind};
use crate::error::{ConfigurationError, Result};

/// Label, hint and error message of one field instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    kind: FieldKind,
    label: Option<Declared<Label>>,
    hint: Option<Declared<Hint>>,
    error_message: Option<Declared<ErrorMessage>>,
}

impl FieldContext {
    /// An empty context for a field of `kind`.
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: None,
            hint: None,
            error_message: None,
        }
    }

    /// Kind of the field.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Identity of `element` in this field.
    #[must_use]
    pub const fn element(&self, element: ElementKind) -> ElementId {
        self.kind.element(element)
    }

    /// The declared label.
    #[must_use]
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref().map(|l| &l.value)
    }

    /// The declared hint.
    #[must_use]
    pub fn hint(&self) -> Option<&Hint> {
        self.hint.as_ref().map(|h| &h.value)
    }

    /// The declared error message.
    #[must_use]
    pub fn error_message(&self) -> Option<&ErrorMessage> {
        self.error_message.as_ref().map(|e| &e.value)
    }

    /// Identity of the declared label, if any.
    #[must_use]
    pub fn label_id(&self) -> Option<ElementId> {
        self.label.as_ref().map(|l| l.declared_by)
    }

    /// Identity of the declared hint, if any.
    #[must_use]
    pub fn hint_id(&self) -> Option<ElementId> {
        self.hint.as_ref().map(|h| h.declared_by)
    }

    /// Identity of the declared error message, if any.
    #[must_use]
    pub fn error_message_id(&self) -> Option<ElementId> {
        self.error_message.as_ref().map(|e| e.declared_by)
    }

    /// Set the label. `first_item` is the earliest item declared so far.
    ///
    /// # Errors
    ///
    /// Fails if a label exists, or a hint, error message or item was declared.
    pub fn set_label(&mut self, label: Label, first_item: Option<ElementId>) -> Result<()> {
        let id = self.element(ElementKind::Label);
        if let Some(existing) = self.label_id() {
            return Err(ConfigurationError::DuplicateElement {
                element: id,
                existing,
            });
        }
        if let Some(existing) = self.hint_id().or(self.error_message_id()).or(first_item) {
            return Err(ConfigurationError::MustBeDeclaredBefore {
                element: id,
                existing,
            });
        }
        self.label = Some(Declared::new(label, id));
        Ok(())
    }

    /// Set the hint. `first_item` is the earliest item declared so far.
    ///
    /// # Errors
    ///
    /// Fails if a hint exists, or an error message or item was declared.
    pub fn set_hint(&mut self, hint: Hint, first_item: Option<ElementId>) -> Result<()> {
        let id = self.element(ElementKind::Hint);
        if let Some(existing) = self.hint_id() {
            return Err(ConfigurationError::DuplicateElement {
                element: id,
                existing,
            });
        }
        if let Some(existing) = self.error_message_id().or(first_item) {
            return Err(ConfigurationError::MustBeDeclaredBefore {
                element: id,
                existing,
            });
        }
        self.hint = Some(Declared::new(hint, id));
        Ok(())
    }

    /// Set the error message. `first_item` is the earliest item declared so far.
    ///
    /// # Errors
    ///
    /// Fails if an error message exists or an item was declared.
    pub fn set_error_message(
        &mut self,
        error_message: ErrorMessage,
        first_item: Option<ElementId>,
    ) -> Result<()> {
        let id = self.element(ElementKind::ErrorMessage);
        if let Some(existing) = self.error_message_id() {
            return Err(ConfigurationError::DuplicateElement {
                element: id,
                existing,
            });
        }
        if let Some(existing) = first_item {
            return Err(ConfigurationError::MustBeDeclaredBefore {
                element: id,
                existing,
            });
        }
        self.error_message = Some(Declared::new(error_message, id));
        Ok(())
    }

    /// The first of hint, error message or `first_item` that is present.
    ///
    /// Anything returned here must not precede a newly declared group.
    #[must_use]
    pub fn first_declared_after_label(&self, first_item: Option<ElementId>) -> Option<ElementId> {
        self.hint_id().or(self.error_message_id()).or(first_item)
    }
}

/// The operations shared by every field kind.
///
/// Implementors provide access to their [`FieldContext`], the identity of the
/// first item declared so far, and an optional gate that rejects declarations
/// (e.g. while a group is open). The default methods apply the ordering rules.
pub trait FormGroupContext {
    /// The shared label/hint/error-message state.
    fn field(&self) -> &FieldContext;

    /// Mutable access to the shared state.
    fn field_mut(&mut self) -> &mut FieldContext;

    /// Identity of the earliest declared sub-item, if any.
    fn first_item(&self) -> Option<ElementId>;

    /// Reject `element` before it is applied. Defaults to accepting everything.
    ///
    /// # Errors
    ///
    /// Returns the reason `element` cannot be declared now.
    fn check_declaration(&self, element: ElementId) -> Result<()> {
        let _ = element;
        Ok(())
    }

    /// Declare the label.
    ///
    /// # Errors
    ///
    /// See [`FieldContext::set_label`] and [`Self::check_declaration`].
    fn set_label(&mut self, label: Label) -> Result<()> {
        self.check_declaration(self.field().element(ElementKind::Label))?;
        let first_item = self.first_item();
        self.field_mut().set_label(label, first_item)
    }

    /// Declare the hint.
    ///
    /// # Errors
    ///
    /// See [`FieldContext::set_hint`] and [`Self::check_declaration`].
    fn set_hint(&mut self, hint: Hint) -> Result<()> {
        self.check_declaration(self.field().element(ElementKind::Hint))?;
        let first_item = self.first_item();
        self.field_mut().set_hint(hint, first_item)
    }

    /// Declare the error message.
    ///
    /// # Errors
    ///
    /// See [`FieldContext::set_error_message`] and [`Self::check_declaration`].
    fn set_error_message(&mut self, error_message: ErrorMessage) -> Result<()> {
        self.check_declaration(self.field().element(ElementKind::ErrorMessage))?;
        let first_item = self.first_item();
        self.field_mut().set_error_message(error_message, first_item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum GroupState {
    #[default]
    Undeclared,
    Open {
        legend: Option<Declared<Legend>>,
    },
    Closed(Fieldset),
}

/// The fieldset wrapper shared by field kinds that support grouping.
///
/// A group must be opened before the hint, error message and items, cannot
/// coexist with a label, and only accepts a legend while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    kind: FieldKind,
    state: GroupState,
}

impl Group {
    /// An undeclared group for a field of `kind`.
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            state: GroupState::Undeclared,
        }
    }

    /// Identity of the group declaration.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.kind.element(ElementKind::Group)
    }

    /// Whether the group is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, GroupState::Open { .. })
    }

    /// Whether the group was opened at any point.
    #[must_use]
    pub const fn is_declared(&self) -> bool {
        !matches!(self.state, GroupState::Undeclared)
    }

    /// The closed fieldset, if any.
    #[must_use]
    pub const fn fieldset(&self) -> Option<&Fieldset> {
        match &self.state {
            GroupState::Closed(fieldset) => Some(fieldset),
            _ => None,
        }
    }

    /// Open the group.
    ///
    /// # Errors
    ///
    /// Fails if the group was already opened, a label exists, or a hint, error
    /// message or item has been declared.
    pub fn open(&mut self, field: &FieldContext, first_item: Option<ElementId>) -> Result<()> {
        let id = self.id();
        if self.is_declared() {
            return Err(ConfigurationError::DuplicateElement {
                element: id,
                existing: id,
            });
        }
        if let Some(existing) = field.label_id() {
            return Err(ConfigurationError::MutuallyExclusive {
                element: id,
                existing,
            });
        }
        if let Some(existing) = field.first_declared_after_label(first_item) {
            return Err(ConfigurationError::MustBeDeclaredBefore {
                element: id,
                existing,
            });
        }
        self.state = GroupState::Open { legend: None };
        Ok(())
    }

    /// Declare the legend of the open group.
    ///
    /// # Errors
    ///
    /// Fails if the group is not open or already has a legend.
    pub fn set_legend(&mut self, legend: Legend) -> Result<()> {
        let id = self.kind.element(ElementKind::Legend);
        let group = self.id();
        match &mut self.state {
            GroupState::Open { legend: Some(existing) } => {
                Err(ConfigurationError::DuplicateElement {
                    element: id,
                    existing: existing.declared_by,
                })
            }
            GroupState::Open { legend: slot } => {
                *slot = Some(Declared::new(legend, id));
                Ok(())
            }
            GroupState::Undeclared | GroupState::Closed(_) => {
                Err(ConfigurationError::OutsideGroup { element: id, group })
            }
        }
    }

    /// Close the open group, recording its fieldset.
    ///
    /// # Errors
    ///
    /// Fails if the group is not open.
    pub fn close(&mut self, attributes: Attributes) -> Result<()> {
        let GroupState::Open { legend } = &mut self.state else {
            return Err(ConfigurationError::GroupNotOpen { group: self.id() });
        };
        let legend = legend.take().map(|l| l.value);
        self.state = GroupState::Closed(Fieldset { legend, attributes });
        Ok(())
    }

    /// Reject anything but the legend while the group is open.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InsideGroup`] while open.
    pub fn check_outside(&self, element: ElementId) -> Result<()> {
        if self.is_open() {
            return Err(ConfigurationError::InsideGroup {
                element,
                group: self.id(),
            });
        }
        Ok(())
    }

    /// Reject a label once the group has been declared.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MutuallyExclusive`] for a label.
    pub fn check_label(&self, element: ElementId) -> Result<()> {
        if element.element == ElementKind::Label && self.is_declared() {
            return Err(ConfigurationError::MutuallyExclusive {
                element,
                existing: self.id(),
            });
        }
        Ok(())
    }

    /// Fail if the group is still open at the end of a traversal.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::GroupNotClosed`].
    pub fn check_closed(&self) -> Result<()> {
        if self.is_open() {
            return Err(ConfigurationError::GroupNotClosed { group: self.id() });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::content::Content;

    fn date_input() -> FieldContext {
        FieldContext::new(FieldKind::DateInput)
    }

    fn id(element: ElementKind) -> ElementId {
        FieldKind::DateInput.element(element)
    }

    #[test]
    fn test_label_hint_error_in_order() {
        let mut field = date_input();
        field.set_label(Label::new(Content::text("Date")), None).expect("label");
        field.set_hint(Hint::new(Content::text("For example")), None).expect("hint");
        field
            .set_error_message(ErrorMessage::new(Content::text("Wrong")), None)
            .expect("error");
        assert!(field.label().is_some());
        assert!(field.hint().is_some());
        assert!(field.error_message().is_some());
    }

    #[test]
    fn test_duplicate_label() {
        let mut field = date_input();
        field.set_label(Label::default(), None).expect("label");
        let err = field.set_label(Label::default(), None).expect_err("duplicate");
        assert_eq!(
            err,
            ConfigurationError::DuplicateElement {
                element: id(ElementKind::Label),
                existing: id(ElementKind::Label),
            }
        );
    }

    #[test]
    fn test_hint_after_error_message() {
        let mut field = date_input();
        field
            .set_error_message(ErrorMessage::default(), None)
            .expect("error");
        let err = field.set_hint(Hint::default(), None).expect_err("out of order");
        assert_eq!(
            err,
            ConfigurationError::MustBeDeclaredBefore {
                element: id(ElementKind::Hint),
                existing: id(ElementKind::ErrorMessage),
            }
        );
    }

    #[test]
    fn test_label_after_item_names_item() {
        let mut field = date_input();
        let day = id(ElementKind::Item("day"));
        let err = field
            .set_label(Label::default(), Some(day))
            .expect_err("out of order");
        assert_eq!(
            err,
            ConfigurationError::MustBeDeclaredBefore {
                element: id(ElementKind::Label),
                existing: day,
            }
        );
    }

    #[test]
    fn test_group_lifecycle() {
        let field = date_input();
        let mut group = Group::new(FieldKind::DateInput);
        group.open(&field, None).expect("open");
        assert!(group.is_open());
        group
            .set_legend(Legend::new(Content::text("When?")))
            .expect("legend");
        assert!(group.set_legend(Legend::default()).is_err());
        group.close(Attributes::new()).expect("close");
        assert!(!group.is_open());
        let fieldset = group.fieldset().expect("closed");
        assert_eq!(
            fieldset.legend.as_ref().and_then(|l| l.content.clone()),
            Some(Content::text("When?"))
        );
    }

    #[test]
    fn test_group_rejects_double_open_and_unmatched_close() {
        let field = date_input();
        let mut group = Group::new(FieldKind::DateInput);
        assert_eq!(
            group.close(Attributes::new()),
            Err(ConfigurationError::GroupNotOpen { group: group.id() })
        );
        group.open(&field, None).expect("open");
        assert!(matches!(
            group.open(&field, None),
            Err(ConfigurationError::DuplicateElement { .. })
        ));
    }

    #[test]
    fn test_group_after_hint_fails() {
        let mut field = date_input();
        field.set_hint(Hint::default(), None).expect("hint");
        let mut group = Group::new(FieldKind::DateInput);
        assert_eq!(
            group.open(&field, None),
            Err(ConfigurationError::MustBeDeclaredBefore {
                element: id(ElementKind::Group),
                existing: id(ElementKind::Hint),
            })
        );
    }

    #[test]
    fn test_group_and_label_are_exclusive() {
        let mut field = date_input();
        field.set_label(Label::default(), None).expect("label");
        let mut group = Group::new(FieldKind::DateInput);
        assert!(matches!(
            group.open(&field, None),
            Err(ConfigurationError::MutuallyExclusive { .. })
        ));
    }

    #[test]
    fn test_legend_outside_group() {
        let mut group = Group::new(FieldKind::Checkboxes);
        assert!(matches!(
            group.set_legend(Legend::default()),
            Err(ConfigurationError::OutsideGroup { .. })
        ));
    }
}
