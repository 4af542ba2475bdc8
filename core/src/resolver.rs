//! Turning a finished field context into a rendered option bundle.
//!
//! [`ValueResolver`] combines a context with the request's collaborators
//! (submitted values, validation state, display metadata) and the
//! process-wide [`ConverterRegistry`]. The output types serialize to the JSON
//! the component generator consumes.
//!
//! # Date input values
//!
//! Each item's rendered text comes from the first of these that applies:
//!
//! 1. the item's own explicit value
//! 2. the field's explicit domain value, converted
//! 3. the raw text previously submitted under the item's name
//! 4. the bound domain value, converted
//! 5. an empty string
//!
//! Submitted text outranks the bound value so invalid input is redisplayed
//! verbatim rather than replaced by a stale valid value.
//!
//! # Date input errors
//!
//! Items in error come from the first of: the items given with the declared
//! error message; the recorded
//! [`ConversionError`](crate::conversion_error::ConversionError) when the field is bound;
//! every item when any other validation error exists. The error summary links
//! to the first errored item in day, month, year order.

use crate::choices::{ChoiceEntry, ChoiceKind, ChoicesContext};
use crate::config::{FormsConfig, item_name};
use crate::content::{Attributes, Content, ErrorMessage, Fieldset, Hint, Label, Legend};
use crate::context::{FieldContext, FormGroupContext};
use crate::converter::DateInputConverter;
use crate::date_input::DateInputContext;
use crate::error::{ConfigurationError, Result};
use crate::item_value::{Explicit, ItemValue};
use crate::items::{DateInputItems, DatePart};
use crate::model_state::ErrorSummaryEntry;
use crate::registry::ConverterRegistry;
use crate::select::SelectContext;
use crate::sources::{
    DisplayMetadata, NoErrors, NoMetadata, NoSubmission, SubmittedValues, ValidationState,
};
use crate::text_area::TextAreaContext;
use serde::Serialize;
use tracing::trace;

const DATE_INPUT_ITEM_CLASS: &str = "govuk-date-input__input";
const DEFAULT_INPUT_MODE: &str = "numeric";

// ═══════════════════════════════════════════════════════════
// Field descriptions
// ═══════════════════════════════════════════════════════════

/// The binding and values of one date input, outside its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInputField<T> {
    name: String,
    id: Option<String>,
    is_bound: bool,
    bound_value: Option<T>,
    explicit_value: Explicit<T>,
}

impl<T> DateInputField<T> {
    /// A field bound to a model property; its wire name is `name`.
    #[must_use]
    pub fn for_binding(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            is_bound: true,
            bound_value: None,
            explicit_value: Explicit::Unspecified,
        }
    }

    /// A field that is not bound to any model property.
    #[must_use]
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            is_bound: false,
            ..Self::for_binding(name)
        }
    }

    /// Override the generated id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the bound model value.
    #[must_use]
    pub fn with_bound_value(mut self, value: T) -> Self {
        self.bound_value = Some(value);
        self
    }

    /// Set an explicit value. `None` explicitly renders empty items.
    #[must_use]
    pub fn with_value(mut self, value: Option<T>) -> Self {
        self.explicit_value = Explicit::Specified(value);
        self
    }

    /// The wire name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the field is bound to a model property.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.is_bound
    }

    /// Whether an explicit value was given.
    #[must_use]
    pub const fn has_explicit_value(&self) -> bool {
        self.explicit_value.is_specified()
    }
}

/// The binding of a checkboxes, radios, select or text area field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueField {
    name: String,
    id: Option<String>,
    bound_values: Vec<String>,
}

impl ValueField {
    /// A field named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Override the generated id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the bound model values.
    #[must_use]
    pub fn with_bound_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bound_values = values.into_iter().map(Into::into).collect();
        self
    }
}

// ═══════════════════════════════════════════════════════════
// Resolved bundles
// ═══════════════════════════════════════════════════════════

/// A resolved hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedHint {
    /// Element id, referenced by `aria-describedby`.
    pub id: String,
    /// Hint content.
    pub content: Content,
    /// Extra attributes.
    pub attributes: Attributes,
}

/// A resolved error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedErrorMessage {
    /// Element id, referenced by `aria-describedby`.
    pub id: String,
    /// Message content.
    pub content: Content,
    /// Screen-reader prefix.
    pub visually_hidden_text: String,
    /// Extra attributes.
    pub attributes: Attributes,
}

/// One rendered date input item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedItem {
    /// Position.
    pub part: DatePart,
    /// Element id.
    pub id: String,
    /// Wire name.
    pub name: String,
    /// Item label.
    pub label: Content,
    /// Rendered text.
    pub value: String,
    /// CSS classes.
    pub classes: Vec<String>,
    /// Whether the item is marked as errored.
    pub has_error: bool,
    /// `autocomplete` attribute.
    pub autocomplete: Option<String>,
    /// `inputmode` attribute.
    pub input_mode: Option<String>,
    /// `pattern` attribute.
    pub pattern: Option<String>,
    /// Extra attributes.
    pub attributes: Attributes,
}

/// A fully resolved date input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDateInput {
    /// Field id.
    pub id: String,
    /// Wire name.
    pub name: String,
    /// Label, when the field is not grouped.
    pub label: Option<Label>,
    /// Fieldset, when the field is grouped.
    pub fieldset: Option<Fieldset>,
    /// Hint.
    pub hint: Option<ResolvedHint>,
    /// Error message.
    pub error_message: Option<ResolvedErrorMessage>,
    /// Ids of the hint and error message.
    pub described_by: Vec<String>,
    /// Rendered items, in day, month, year order.
    pub items: Vec<ResolvedItem>,
    /// Items marked as errored.
    pub error_items: DateInputItems,
    /// Error summary entry linking to the first errored item.
    pub error_summary: Option<ErrorSummaryEntry>,
}

impl ResolvedDateInput {
    /// The rendered item at `part`.
    #[must_use]
    pub fn item(&self, part: DatePart) -> Option<&ResolvedItem> {
        self.items.iter().find(|item| item.part == part)
    }
}

/// One rendered checkboxes or radios entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedChoice {
    /// A selectable item.
    Item {
        /// Element id.
        id: String,
        /// Wire name.
        name: String,
        /// Submitted value.
        value: String,
        /// Item label.
        content: Option<Content>,
        /// Item hint.
        hint: Option<Content>,
        /// Whether the item is checked.
        checked: bool,
        /// Conditionally revealed content.
        conditional: Option<Content>,
        /// Whether the input is disabled.
        disabled: bool,
        /// Extra attributes.
        attributes: Attributes,
    },
    /// A divider.
    Divider {
        /// Divider text.
        text: String,
    },
}

/// Fully resolved checkboxes or radios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedChoices {
    /// Which kind of choice list.
    pub kind: ChoiceKind,
    /// Id prefix for items.
    pub id_prefix: String,
    /// Wire name.
    pub name: String,
    /// Label, when the field is not grouped.
    pub label: Option<Label>,
    /// Fieldset, when the field is grouped.
    pub fieldset: Option<Fieldset>,
    /// Hint.
    pub hint: Option<ResolvedHint>,
    /// Error message.
    pub error_message: Option<ResolvedErrorMessage>,
    /// Ids of the hint and error message.
    pub described_by: Vec<String>,
    /// Items and dividers.
    pub items: Vec<ResolvedChoice>,
    /// Error summary entry linking to the first item.
    pub error_summary: Option<ErrorSummaryEntry>,
}

/// One rendered select option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOption {
    /// Submitted value.
    pub value: String,
    /// Option text.
    pub content: Option<Content>,
    /// Whether the option is selected.
    pub selected: bool,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// Extra attributes.
    pub attributes: Attributes,
}

/// A fully resolved select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSelect {
    /// Field id.
    pub id: String,
    /// Wire name.
    pub name: String,
    /// Label.
    pub label: Label,
    /// Hint.
    pub hint: Option<ResolvedHint>,
    /// Error message.
    pub error_message: Option<ResolvedErrorMessage>,
    /// Ids of the hint and error message.
    pub described_by: Vec<String>,
    /// Options.
    pub options: Vec<ResolvedOption>,
    /// Error summary entry.
    pub error_summary: Option<ErrorSummaryEntry>,
}

/// A fully resolved text area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTextArea {
    /// Field id.
    pub id: String,
    /// Wire name.
    pub name: String,
    /// Label.
    pub label: Label,
    /// Hint.
    pub hint: Option<ResolvedHint>,
    /// Error message.
    pub error_message: Option<ResolvedErrorMessage>,
    /// Ids of the hint and error message.
    pub described_by: Vec<String>,
    /// Rendered text.
    pub value: String,
    /// Error summary entry.
    pub error_summary: Option<ErrorSummaryEntry>,
}

/// Label, hint and error message shared by every kind.
struct Common {
    label: Option<Label>,
    fieldset: Option<Fieldset>,
    hint: Option<ResolvedHint>,
    error_message: Option<ResolvedErrorMessage>,
    described_by: Vec<String>,
}

impl Common {
    fn summary(&self, target: &str) -> Option<ErrorSummaryEntry> {
        self.error_message.as_ref().map(|error| ErrorSummaryEntry {
            href: format!("#{target}"),
            message: error.content.as_str().to_string(),
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Resolver
// ═══════════════════════════════════════════════════════════

/// Resolves field contexts against one request.
///
/// Defaults to no submission, no validation errors and no metadata; attach the
/// request's sources with the `with_*` methods.
#[derive(Clone, Copy)]
pub struct ValueResolver<'a> {
    registry: &'a ConverterRegistry,
    config: &'a FormsConfig,
    submitted: &'a dyn SubmittedValues,
    validation: &'a dyn ValidationState,
    metadata: &'a dyn DisplayMetadata,
}

impl<'a> ValueResolver<'a> {
    /// A resolver with no request data.
    #[must_use]
    pub fn new(registry: &'a ConverterRegistry, config: &'a FormsConfig) -> Self {
        Self {
            registry,
            config,
            submitted: &NoSubmission,
            validation: &NoErrors,
            metadata: &NoMetadata,
        }
    }

    /// Use `submitted` for previously posted values.
    #[must_use]
    pub fn with_submitted(mut self, submitted: &'a dyn SubmittedValues) -> Self {
        self.submitted = submitted;
        self
    }

    /// Use `validation` for recorded errors.
    #[must_use]
    pub fn with_validation(mut self, validation: &'a dyn ValidationState) -> Self {
        self.validation = validation;
        self
    }

    /// Use `metadata` for display names and descriptions.
    #[must_use]
    pub fn with_metadata(mut self, metadata: &'a dyn DisplayMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Resolve a date input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ValueConflict`] if both the field and an
    /// item carry explicit values, and [`ConfigurationError::NoConverter`] if
    /// a value must be converted and no converter handles `T`.
    pub fn resolve_date_input<T: Send + Sync + 'static>(
        &self,
        context: &DateInputContext,
        field: &DateInputField<T>,
    ) -> Result<ResolvedDateInput> {
        if field.has_explicit_value() {
            if let Some(part) = context.first_item_with_value() {
                return Err(ConfigurationError::ValueConflict { part });
            }
        }

        let converter = self.registry.find::<T>();
        let convert = |value: &T| -> Result<ItemValue> {
            converter
                .map(|converter| converter.from_model(value))
                .ok_or(ConfigurationError::NoConverter {
                    type_name: std::any::type_name::<T>(),
                })
        };

        let explicit = match field.explicit_value.as_specified() {
            None => None,
            Some(None) => Some(ItemValue::default()),
            Some(Some(value)) => Some(convert(value)?),
        };
        let bound = field.bound_value.as_ref().map(convert).transpose()?;

        let rendered = Self::rendered_items(context, converter);
        let id = field_id(&field.name, field.id.as_deref());
        let common = self.resolve_common(context.field(), context.fieldset(), &field.name, &id);

        // A flagged field with no message of its own still marks its items
        let in_error =
            common.error_message.is_some() || self.validation.has_errors(&field.name);
        let errored = if in_error {
            match self.attribute_errors(context, field) & rendered {
                none if none.is_empty() => rendered,
                items => items,
            }
        } else {
            DateInputItems::empty()
        };

        let mut items = Vec::new();
        for part in rendered.parts() {
            let config = context.item(part);
            let name = config
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| item_name(&field.name, part));

            let value = self.item_text(part, config.map(|c| &c.value), explicit, &name, bound);

            let has_error = errored.contains(part.flag());
            let mut classes = vec![
                DATE_INPUT_ITEM_CLASS.to_string(),
                part.width_class().to_string(),
            ];
            if has_error {
                classes.push(self.config.error_class.clone());
            }

            items.push(ResolvedItem {
                part,
                id: config
                    .and_then(|c| c.id.clone())
                    .unwrap_or_else(|| self.config.item_id(&id, part)),
                name,
                label: config
                    .and_then(|c| c.label.clone())
                    .unwrap_or_else(|| Content::text(self.config.item_label(part))),
                value,
                classes,
                has_error,
                autocomplete: config.and_then(|c| c.autocomplete.clone()),
                input_mode: config
                    .and_then(|c| c.input_mode.clone())
                    .or_else(|| Some(DEFAULT_INPUT_MODE.to_string())),
                pattern: config.and_then(|c| c.pattern.clone()),
                attributes: config.map(|c| c.attributes.clone()).unwrap_or_default(),
            });
        }

        let link_target = errored.first_part().unwrap_or(DatePart::Day);
        let error_summary = items
            .iter()
            .find(|item| item.part == link_target)
            .or_else(|| items.first())
            .and_then(|item| common.summary(&item.id));

        Ok(ResolvedDateInput {
            id,
            name: field.name.clone(),
            label: common.label,
            fieldset: common.fieldset,
            hint: common.hint,
            error_message: common.error_message,
            described_by: common.described_by,
            items,
            error_items: errored,
            error_summary,
        })
    }

    /// Resolve checkboxes or radios.
    #[must_use]
    pub fn resolve_choices(&self, context: &ChoicesContext, field: &ValueField) -> ResolvedChoices {
        let id_prefix = field_id(&field.name, field.id.as_deref());
        let common =
            self.resolve_common(context.field(), context.fieldset(), &field.name, &id_prefix);
        let submitted = self.submitted.values(&field.name);

        let mut items = Vec::new();
        let mut index = 0;
        for entry in context.entries() {
            match entry {
                ChoiceEntry::Divider { text } => {
                    items.push(ResolvedChoice::Divider { text: text.clone() });
                }
                ChoiceEntry::Item(item) => {
                    index += 1;
                    let id = item.id.clone().unwrap_or_else(|| {
                        if index == 1 {
                            id_prefix.clone()
                        } else {
                            format!("{id_prefix}-{index}")
                        }
                    });
                    let checked = item.checked.unwrap_or_else(|| {
                        Self::is_chosen(&item.value, &submitted, &field.bound_values)
                    });
                    items.push(ResolvedChoice::Item {
                        id,
                        name: field.name.clone(),
                        value: item.value.clone(),
                        content: item.content.clone(),
                        hint: item.hint.clone(),
                        checked,
                        conditional: item.conditional.clone(),
                        disabled: item.disabled,
                        attributes: item.attributes.clone(),
                    });
                }
            }
        }

        let error_summary = common.summary(&id_prefix);
        ResolvedChoices {
            kind: context.kind(),
            id_prefix,
            name: field.name.clone(),
            label: common.label,
            fieldset: common.fieldset,
            hint: common.hint,
            error_message: common.error_message,
            described_by: common.described_by,
            items,
            error_summary,
        }
    }

    /// Resolve a select.
    #[must_use]
    pub fn resolve_select(&self, context: &SelectContext, field: &ValueField) -> ResolvedSelect {
        let id = field_id(&field.name, field.id.as_deref());
        let common = self.resolve_common(context.field(), None, &field.name, &id);
        let submitted: Vec<&str> = self.submitted.value(&field.name).into_iter().collect();

        let options = context
            .options()
            .map(|option| ResolvedOption {
                value: option.value.clone(),
                content: option.content.clone(),
                selected: option.selected.unwrap_or_else(|| {
                    Self::is_chosen(&option.value, &submitted, &field.bound_values)
                }),
                disabled: option.disabled,
                attributes: option.attributes.clone(),
            })
            .collect();

        let error_summary = common.summary(&id);
        ResolvedSelect {
            id,
            name: field.name.clone(),
            label: common.label.unwrap_or_default(),
            hint: common.hint,
            error_message: common.error_message,
            described_by: common.described_by,
            options,
            error_summary,
        }
    }

    /// Resolve a text area.
    #[must_use]
    pub fn resolve_text_area(
        &self,
        context: &TextAreaContext,
        field: &ValueField,
    ) -> ResolvedTextArea {
        let id = field_id(&field.name, field.id.as_deref());
        let common = self.resolve_common(context.field(), None, &field.name, &id);

        let value = context
            .value()
            .or_else(|| self.submitted.value(&field.name))
            .or_else(|| field.bound_values.first().map(String::as_str))
            .unwrap_or_default()
            .to_string();

        let error_summary = common.summary(&id);
        ResolvedTextArea {
            id,
            name: field.name.clone(),
            label: common.label.unwrap_or_default(),
            hint: common.hint,
            error_message: common.error_message,
            described_by: common.described_by,
            value,
            error_summary,
        }
    }

    /// Declared items, else the converter's defaults, else all three.
    fn rendered_items<T: Send + Sync + 'static>(
        context: &DateInputContext,
        converter: Option<&dyn DateInputConverter<Model = T>>,
    ) -> DateInputItems {
        let declared = context.declared_items();
        if !declared.is_empty() {
            return declared;
        }
        converter.map_or_else(DateInputItems::all, |converter| converter.default_items())
    }

    fn item_text(
        &self,
        part: DatePart,
        item_value: Option<&Explicit<i32>>,
        explicit: Option<ItemValue>,
        name: &str,
        bound: Option<ItemValue>,
    ) -> String {
        if let Some(value) = item_value.and_then(Explicit::as_specified) {
            return value.map(ToString::to_string).unwrap_or_default();
        }
        if let Some(explicit) = explicit {
            return explicit.display(part);
        }
        if let Some(submitted) = self.submitted.value(name) {
            return submitted.to_string();
        }
        bound.map(|bound| bound.display(part)).unwrap_or_default()
    }

    fn attribute_errors<T>(
        &self,
        context: &DateInputContext,
        field: &DateInputField<T>,
    ) -> DateInputItems {
        if let Some(items) = context.error_items() {
            trace!(name = %field.name, rule = "declared", "Attributing date input errors");
            return items;
        }
        if field.is_bound {
            if let Some(error) = self.validation.conversion_error(&field.name) {
                trace!(name = %field.name, rule = "conversion", "Attributing date input errors");
                return error.fields();
            }
        }
        trace!(name = %field.name, rule = "all", "Attributing date input errors");
        DateInputItems::all()
    }

    fn resolve_common(
        &self,
        field: &FieldContext,
        fieldset: Option<&Fieldset>,
        name: &str,
        id: &str,
    ) -> Common {
        let display_name = || {
            self.metadata
                .display_name(name)
                .map_or_else(|| Content::text(name), Content::text)
        };

        let (label, fieldset) = match fieldset {
            Some(fieldset) => {
                let legend = fieldset.legend.clone().unwrap_or_default();
                let legend = Legend {
                    content: legend.content.or_else(|| Some(display_name())),
                    ..legend
                };
                let fieldset = Fieldset {
                    legend: Some(legend),
                    attributes: fieldset.attributes.clone(),
                };
                (None, Some(fieldset))
            }
            None => {
                let label = field.label().cloned().unwrap_or_default();
                let label = Label {
                    content: label.content.or_else(|| Some(display_name())),
                    ..label
                };
                (Some(label), None)
            }
        };

        let hint = self.resolve_hint(field.hint(), name, id);
        let error_message = self.resolve_error_message(field.error_message(), name, id);

        let described_by = hint
            .iter()
            .map(|hint| hint.id.clone())
            .chain(error_message.iter().map(|error| error.id.clone()))
            .collect();

        Common {
            label,
            fieldset,
            hint,
            error_message,
            described_by,
        }
    }

    fn resolve_hint(&self, declared: Option<&Hint>, name: &str, id: &str) -> Option<ResolvedHint> {
        let content = declared
            .and_then(|hint| hint.content.clone())
            .or_else(|| self.metadata.description(name).map(Content::text))?;
        Some(ResolvedHint {
            id: format!("{id}-hint"),
            content,
            attributes: declared.map(|hint| hint.attributes.clone()).unwrap_or_default(),
        })
    }

    fn resolve_error_message(
        &self,
        declared: Option<&ErrorMessage>,
        name: &str,
        id: &str,
    ) -> Option<ResolvedErrorMessage> {
        let content = declared
            .and_then(|error| error.content.clone())
            .or_else(|| {
                self.validation
                    .first_error_message(name)
                    .map(Content::text)
            })?;
        Some(ResolvedErrorMessage {
            id: format!("{id}-error"),
            content,
            visually_hidden_text: declared
                .and_then(|error| error.visually_hidden_text.clone())
                .unwrap_or_else(|| self.config.error_visually_hidden_text.clone()),
            attributes: declared
                .map(|error| error.attributes.clone())
                .unwrap_or_default(),
        })
    }

    fn is_chosen(value: &str, submitted: &[&str], bound: &[String]) -> bool {
        if submitted.is_empty() {
            bound.iter().any(|bound| bound == value)
        } else {
            submitted.contains(&value)
        }
    }
}

/// The default id for a field named `name`: `.`, `[` and `]` become `_`.
#[must_use]
pub fn field_id(name: &str, id: Option<&str>) -> String {
    id.map_or_else(|| name.replace(['.', '[', ']'], "_"), ToString::to_string)
}
