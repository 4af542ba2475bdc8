//! Applying a traversal of declarations to a field context.
//!
//! Template engines hand the builder a flat sequence of declarations in the
//! order they appear in markup. [`CompositeContext::build`] applies them to a
//! context of the right kind and keeps going past failures, so every
//! structural problem is reported at once.

use crate::choices::{ChoiceEntry, ChoiceKind, ChoicesContext};
use crate::content::{Attributes, ErrorMessage, Fieldset, Hint, Label, Legend};
use crate::context::{FieldContext, FormGroupContext};
use crate::date_input::{DateInputContext, DateInputItemConfig};
use crate::element::{ElementId, FieldKind};
use crate::error::{ConfigurationError, ConfigurationErrors, Result};
use crate::items::{DateInputItems, DatePart};
use crate::select::{SelectContext, SelectOption};
use crate::text_area::TextAreaContext;
use tracing::debug;

/// One declaration in a field's markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// The field label.
    Label(Label),
    /// The field hint.
    Hint(Hint),
    /// The error message, optionally naming the errored date items.
    ErrorMessage {
        /// Message content.
        message: ErrorMessage,
        /// Date items in error. Date inputs only.
        error_items: Option<DateInputItems>,
    },
    /// Open the fieldset group.
    OpenGroup,
    /// The fieldset legend.
    Legend(Legend),
    /// Close the fieldset group.
    CloseGroup(Attributes),
    /// A date input item.
    DateItem(DatePart, DateInputItemConfig),
    /// A checkboxes or radios item or divider.
    Choice(ChoiceEntry),
    /// A select option.
    SelectOption(SelectOption),
    /// A text area's explicit value.
    Value(String),
    /// Marks that the enclosing date input has an explicit domain value.
    ExplicitValue,
}

impl Declaration {
    /// Short name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Label(_) => "label",
            Self::Hint(_) => "hint",
            Self::ErrorMessage { .. } => "error-message",
            Self::OpenGroup => "fieldset",
            Self::Legend(_) => "fieldset-legend",
            Self::CloseGroup(_) => "fieldset end",
            Self::DateItem(..) => "date item",
            Self::Choice(_) => "choice item",
            Self::SelectOption(_) => "option",
            Self::Value(_) => "value",
            Self::ExplicitValue => "explicit value",
        }
    }
}

/// A field context of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositeContext {
    /// Day, month and year inputs.
    DateInput(DateInputContext),
    /// Checkboxes or radios.
    Choices(ChoicesContext),
    /// A select.
    Select(SelectContext),
    /// A text area.
    TextArea(TextAreaContext),
}

impl CompositeContext {
    /// An empty context for `kind`.
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        match kind {
            FieldKind::DateInput => Self::DateInput(DateInputContext::default()),
            FieldKind::Checkboxes => Self::Choices(ChoicesContext::new(ChoiceKind::Checkboxes)),
            FieldKind::Radios => Self::Choices(ChoicesContext::new(ChoiceKind::Radios)),
            FieldKind::Select => Self::Select(SelectContext::new()),
            FieldKind::TextArea => Self::TextArea(TextAreaContext::new()),
        }
    }

    /// Apply `declarations` to a fresh context for `kind`.
    ///
    /// # Errors
    ///
    /// Returns every configuration error found, in traversal order, followed
    /// by an unclosed group if there is one.
    pub fn build(
        kind: FieldKind,
        declarations: impl IntoIterator<Item = Declaration>,
    ) -> std::result::Result<Self, ConfigurationErrors> {
        let mut context = Self::new(kind);
        let mut errors = Vec::new();

        for declaration in declarations {
            if let Err(error) = context.apply(declaration) {
                debug!(kind = ?kind, error = %error, "Declaration rejected");
                errors.push(error);
            }
        }
        if let Err(error) = context.finish() {
            errors.push(error);
        }

        if errors.is_empty() {
            Ok(context)
        } else {
            Err(ConfigurationErrors::new(errors))
        }
    }

    /// The field kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::DateInput(_) => FieldKind::DateInput,
            Self::Choices(ctx) => ctx.kind().field_kind(),
            Self::Select(_) => FieldKind::Select,
            Self::TextArea(_) => FieldKind::TextArea,
        }
    }

    /// Apply one declaration.
    ///
    /// # Errors
    ///
    /// Returns the ordering, cardinality or grouping rule the declaration
    /// breaks, or [`ConfigurationError::UnsupportedDeclaration`] when the
    /// declaration is not part of this kind's vocabulary.
    pub fn apply(&mut self, declaration: Declaration) -> Result<()> {
        let kind = self.kind();
        let unsupported = ConfigurationError::UnsupportedDeclaration {
            kind,
            declaration: declaration.name(),
        };

        match (self, declaration) {
            (ctx, Declaration::Label(label)) => ctx.set_label(label),
            (ctx, Declaration::Hint(hint)) => ctx.set_hint(hint),
            (Self::DateInput(ctx), Declaration::ErrorMessage { message, error_items }) => {
                ctx.set_error_message_with_items(message, error_items)
            }
            (_, Declaration::ErrorMessage { error_items: Some(_), .. }) => Err(unsupported),
            (ctx, Declaration::ErrorMessage { message, .. }) => ctx.set_error_message(message),

            (Self::DateInput(ctx), Declaration::OpenGroup) => ctx.open_group(),
            (Self::Choices(ctx), Declaration::OpenGroup) => ctx.open_group(),
            (Self::DateInput(ctx), Declaration::Legend(legend)) => ctx.set_legend(legend),
            (Self::Choices(ctx), Declaration::Legend(legend)) => ctx.set_legend(legend),
            (Self::DateInput(ctx), Declaration::CloseGroup(attributes)) => {
                ctx.close_group(attributes)
            }
            (Self::Choices(ctx), Declaration::CloseGroup(attributes)) => {
                ctx.close_group(attributes)
            }

            (Self::DateInput(ctx), Declaration::DateItem(part, config)) => {
                ctx.set_item(part, config)
            }
            (Self::DateInput(ctx), Declaration::ExplicitValue) => ctx.set_explicit_value(),
            (Self::Choices(ctx), Declaration::Choice(entry)) => ctx.add_entry(entry),
            (Self::Select(ctx), Declaration::SelectOption(option)) => {
                ctx.add_option(option);
                Ok(())
            }
            (Self::TextArea(ctx), Declaration::Value(value)) => ctx.set_value(value),

            _ => Err(unsupported),
        }
    }

    /// Check the context is complete.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::GroupNotClosed`] for an open group.
    pub fn finish(&self) -> Result<()> {
        match self {
            Self::DateInput(ctx) => ctx.finish(),
            Self::Choices(ctx) => ctx.finish(),
            Self::Select(_) | Self::TextArea(_) => Ok(()),
        }
    }

    /// The closed fieldset, if the field is grouped.
    #[must_use]
    pub const fn fieldset(&self) -> Option<&Fieldset> {
        match self {
            Self::DateInput(ctx) => ctx.fieldset(),
            Self::Choices(ctx) => ctx.fieldset(),
            Self::Select(_) | Self::TextArea(_) => None,
        }
    }

    /// The date input context, if this is one.
    #[must_use]
    pub const fn as_date_input(&self) -> Option<&DateInputContext> {
        match self {
            Self::DateInput(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// The choices context, if this is one.
    #[must_use]
    pub const fn as_choices(&self) -> Option<&ChoicesContext> {
        match self {
            Self::Choices(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// The select context, if this is one.
    #[must_use]
    pub const fn as_select(&self) -> Option<&SelectContext> {
        match self {
            Self::Select(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// The text area context, if this is one.
    #[must_use]
    pub const fn as_text_area(&self) -> Option<&TextAreaContext> {
        match self {
            Self::TextArea(ctx) => Some(ctx),
            _ => None,
        }
    }
}

impl FormGroupContext for CompositeContext {
    fn field(&self) -> &FieldContext {
        match self {
            Self::DateInput(ctx) => ctx.field(),
            Self::Choices(ctx) => ctx.field(),
            Self::Select(ctx) => ctx.field(),
            Self::TextArea(ctx) => ctx.field(),
        }
    }

    fn field_mut(&mut self) -> &mut FieldContext {
        match self {
            Self::DateInput(ctx) => ctx.field_mut(),
            Self::Choices(ctx) => ctx.field_mut(),
            Self::Select(ctx) => ctx.field_mut(),
            Self::TextArea(ctx) => ctx.field_mut(),
        }
    }

    fn first_item(&self) -> Option<ElementId> {
        match self {
            Self::DateInput(ctx) => ctx.first_item(),
            Self::Choices(ctx) => ctx.first_item(),
            Self::Select(ctx) => ctx.first_item(),
            Self::TextArea(ctx) => ctx.first_item(),
        }
    }

    fn check_declaration(&self, element: ElementId) -> Result<()> {
        match self {
            Self::DateInput(ctx) => ctx.check_declaration(element),
            Self::Choices(ctx) => ctx.check_declaration(element),
            Self::Select(ctx) => ctx.check_declaration(element),
            Self::TextArea(ctx) => ctx.check_declaration(element),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::element::ElementKind;

    #[test]
    fn test_build_date_input() {
        let context = CompositeContext::build(
            FieldKind::DateInput,
            [
                Declaration::OpenGroup,
                Declaration::Legend(Legend::new(Content::text("Date of birth"))),
                Declaration::CloseGroup(Attributes::new()),
                Declaration::Hint(Hint::new(Content::text("For example, 27 3 2007"))),
                Declaration::DateItem(DatePart::Day, DateInputItemConfig::new()),
                Declaration::DateItem(DatePart::Month, DateInputItemConfig::new()),
                Declaration::DateItem(DatePart::Year, DateInputItemConfig::new()),
            ],
        )
        .expect("valid declarations");

        let date_input = context.as_date_input().expect("date input");
        assert_eq!(date_input.declared_items(), DateInputItems::all());
        assert!(context.fieldset().is_some());
        assert!(context.field().hint().is_some());
    }

    #[test]
    fn test_build_reports_every_error() {
        let errors = CompositeContext::build(
            FieldKind::DateInput,
            [
                Declaration::ErrorMessage {
                    message: ErrorMessage::default(),
                    error_items: None,
                },
                Declaration::Hint(Hint::default()),
                Declaration::DateItem(DatePart::Year, DateInputItemConfig::new()),
                Declaration::DateItem(DatePart::Day, DateInputItemConfig::new()),
                Declaration::OpenGroup,
            ],
        )
        .expect_err("invalid declarations");

        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.errors()[0],
            ConfigurationError::MustBeDeclaredBefore {
                element: FieldKind::DateInput.element(ElementKind::Hint),
                existing: FieldKind::DateInput.element(ElementKind::ErrorMessage),
            }
        );
        assert!(matches!(
            errors.errors()[1],
            ConfigurationError::MustBeDeclaredBefore { .. }
        ));
        assert!(matches!(
            errors.errors()[2],
            ConfigurationError::MustBeDeclaredBefore { .. }
        ));
    }

    #[test]
    fn test_build_reports_unclosed_group() {
        let errors = CompositeContext::build(FieldKind::Radios, [Declaration::OpenGroup])
            .expect_err("unclosed");
        assert!(matches!(
            errors.errors(),
            [ConfigurationError::GroupNotClosed { .. }]
        ));
    }

    #[test]
    fn test_vocabulary_mismatch_is_unsupported() {
        let mut context = CompositeContext::new(FieldKind::Select);
        assert_eq!(
            context.apply(Declaration::OpenGroup),
            Err(ConfigurationError::UnsupportedDeclaration {
                kind: FieldKind::Select,
                declaration: "fieldset",
            })
        );
        assert!(matches!(
            context.apply(Declaration::ErrorMessage {
                message: ErrorMessage::default(),
                error_items: Some(DateInputItems::DAY),
            }),
            Err(ConfigurationError::UnsupportedDeclaration { .. })
        ));
        assert!(matches!(
            context.apply(Declaration::DateItem(DatePart::Day, DateInputItemConfig::new())),
            Err(ConfigurationError::UnsupportedDeclaration { .. })
        ));
    }

    #[test]
    fn test_explicit_value_conflict_in_either_order() {
        let value_first = CompositeContext::build(
            FieldKind::DateInput,
            [
                Declaration::ExplicitValue,
                Declaration::DateItem(DatePart::Day, DateInputItemConfig::new().with_value(Some(1))),
            ],
        )
        .expect_err("conflict");
        assert_eq!(
            value_first.errors(),
            [ConfigurationError::ValueConflict { part: DatePart::Day }]
        );

        let item_first = CompositeContext::build(
            FieldKind::DateInput,
            [
                Declaration::DateItem(DatePart::Day, DateInputItemConfig::new().with_value(Some(1))),
                Declaration::ExplicitValue,
            ],
        )
        .expect_err("conflict");
        assert_eq!(
            item_first.errors(),
            [ConfigurationError::ValueConflict { part: DatePart::Day }]
        );
    }
}
