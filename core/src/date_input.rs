//! Date input context: the richest composite field.
//!
//! On top of the shared label/hint/error-message rules a date input has:
//! - up to three items, declared in Day → Month → Year order, each at most once
//! - an optional fieldset group, mutually exclusive with a label
//! - explicit value conflict detection between the field and its items
//! - an optional explicit set of errored items given with the error message

use crate::content::{Attributes, Content, ErrorMessage, Fieldset, Legend};
use crate::context::{FieldContext, FormGroupContext, Group};
use crate::element::{Declared, ElementId, ElementKind, FieldKind};
use crate::error::{ConfigurationError, Result};
use crate::item_value::Explicit;
use crate::items::{DateInputItems, DatePart};
use std::collections::BTreeMap;

/// Per-item overrides for one date input sub-field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInputItemConfig {
    /// Overrides the generated id.
    pub id: Option<String>,
    /// Overrides the generated wire name.
    pub name: Option<String>,
    /// Overrides the default `Day`/`Month`/`Year` label.
    pub label: Option<Content>,
    /// Explicit value, taking precedence over every other source.
    pub value: Explicit<i32>,
    /// `autocomplete` attribute.
    pub autocomplete: Option<String>,
    /// `inputmode` attribute; defaults to `numeric`.
    pub input_mode: Option<String>,
    /// `pattern` attribute.
    pub pattern: Option<String>,
    /// Extra attributes.
    pub attributes: Attributes,
}

impl DateInputItemConfig {
    /// An item with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit value.
    #[must_use]
    pub const fn with_value(mut self, value: Option<i32>) -> Self {
        self.value = Explicit::Specified(value);
        self
    }

    /// Override the label.
    #[must_use]
    pub fn with_label(mut self, label: Content) -> Self {
        self.label = Some(label);
        self
    }

    /// Override the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Override the wire name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the `autocomplete` attribute.
    #[must_use]
    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = Some(autocomplete.into());
        self
    }
}

/// Builder state for one date input instance.
///
/// Created per field per request and discarded once the field is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInputContext {
    field: FieldContext,
    group: Group,
    items: BTreeMap<DatePart, Declared<DateInputItemConfig>>,
    has_explicit_value: bool,
    error_items: Option<DateInputItems>,
}

impl Default for DateInputContext {
    fn default() -> Self {
        Self::new(false)
    }
}

impl DateInputContext {
    /// A new context. `has_explicit_value` records whether the enclosing field
    /// was given an explicit domain value.
    #[must_use]
    pub const fn new(has_explicit_value: bool) -> Self {
        Self {
            field: FieldContext::new(FieldKind::DateInput),
            group: Group::new(FieldKind::DateInput),
            items: BTreeMap::new(),
            has_explicit_value,
            error_items: None,
        }
    }

    fn item_id(part: DatePart) -> ElementId {
        FieldKind::DateInput.element(ElementKind::Item(part.tag()))
    }

    /// Declared items in canonical order.
    pub fn items(&self) -> impl Iterator<Item = (DatePart, &DateInputItemConfig)> {
        self.items.iter().map(|(part, item)| (*part, &item.value))
    }

    /// The item declared at `part`.
    #[must_use]
    pub fn item(&self, part: DatePart) -> Option<&DateInputItemConfig> {
        self.items.get(&part).map(|item| &item.value)
    }

    /// The set of declared item positions.
    #[must_use]
    pub fn declared_items(&self) -> DateInputItems {
        self.items
            .keys()
            .fold(DateInputItems::empty(), |acc, part| acc | part.flag())
    }

    /// Whether the enclosing field has an explicit value.
    #[must_use]
    pub const fn has_explicit_value(&self) -> bool {
        self.has_explicit_value
    }

    /// Explicit error items given with the error message.
    #[must_use]
    pub const fn error_items(&self) -> Option<DateInputItems> {
        self.error_items
    }

    /// The closed fieldset, if the field is grouped.
    #[must_use]
    pub const fn fieldset(&self) -> Option<&Fieldset> {
        self.group.fieldset()
    }

    /// Record that the enclosing field has an explicit value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ValueConflict`] if an item already carries
    /// an explicit value.
    pub fn set_explicit_value(&mut self) -> Result<()> {
        if let Some(part) = self.first_item_with_value() {
            return Err(ConfigurationError::ValueConflict { part });
        }
        self.has_explicit_value = true;
        Ok(())
    }

    /// The first item, in canonical order, that has an explicit value.
    #[must_use]
    pub fn first_item_with_value(&self) -> Option<DatePart> {
        self.items
            .iter()
            .find(|(_, item)| item.value.value.is_specified())
            .map(|(part, _)| *part)
    }

    /// Declare the error message, optionally naming the errored items.
    ///
    /// # Errors
    ///
    /// Fails on the shared ordering rules, or if `error_items` is an empty set.
    pub fn set_error_message_with_items(
        &mut self,
        error_message: ErrorMessage,
        error_items: Option<DateInputItems>,
    ) -> Result<()> {
        if error_items.is_some_and(|items| items.is_empty()) {
            return Err(ConfigurationError::EmptyErrorItems);
        }
        self.set_error_message(error_message)?;
        self.error_items = error_items;
        Ok(())
    }

    /// Declare the item at `part`.
    ///
    /// # Errors
    ///
    /// Fails if a group is open, the position is already declared, a later
    /// position was already declared, or both the field and the item carry an
    /// explicit value.
    pub fn set_item(&mut self, part: DatePart, config: DateInputItemConfig) -> Result<()> {
        let id = Self::item_id(part);
        self.group.check_outside(id)?;

        if let Some(existing) = self.items.get(&part) {
            return Err(ConfigurationError::DuplicateElement {
                element: id,
                existing: existing.declared_by,
            });
        }
        if let Some((_, later)) = self.items.range(part..).next() {
            return Err(ConfigurationError::MustBeDeclaredBefore {
                element: id,
                existing: later.declared_by,
            });
        }
        if self.has_explicit_value && config.value.is_specified() {
            return Err(ConfigurationError::ValueConflict { part });
        }

        self.items.insert(part, Declared::new(config, id));
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
    /// Returns [`ConfigurationError::GroupNotClosed`] if the group is open.
    pub fn finish(&self) -> Result<()> {
        self.group.check_closed()
    }
}

impl FormGroupContext for DateInputContext {
    fn field(&self) -> &FieldContext {
        &self.field
    }

    fn field_mut(&mut self) -> &mut FieldContext {
        &mut self.field
    }

    fn first_item(&self) -> Option<ElementId> {
        self.items.values().next().map(|item| item.declared_by)
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
    use crate::content::{Hint, Label};

    #[test]
    fn test_items_in_order() {
        let mut ctx = DateInputContext::default();
        ctx.set_item(DatePart::Day, DateInputItemConfig::new()).expect("day");
        ctx.set_item(DatePart::Year, DateInputItemConfig::new()).expect("year");
        assert_eq!(ctx.declared_items(), DateInputItems::DAY | DateInputItems::YEAR);
    }

    #[test]
    fn test_item_out_of_order() {
        let mut ctx = DateInputContext::default();
        ctx.set_item(DatePart::Month, DateInputItemConfig::new()).expect("month");
        let err = ctx
            .set_item(DatePart::Day, DateInputItemConfig::new())
            .expect_err("day after month");
        assert_eq!(
            err,
            ConfigurationError::MustBeDeclaredBefore {
                element: DateInputContext::item_id(DatePart::Day),
                existing: DateInputContext::item_id(DatePart::Month),
            }
        );
    }

    #[test]
    fn test_duplicate_item() {
        let mut ctx = DateInputContext::default();
        ctx.set_item(DatePart::Day, DateInputItemConfig::new()).expect("day");
        assert!(matches!(
            ctx.set_item(DatePart::Day, DateInputItemConfig::new()),
            Err(ConfigurationError::DuplicateElement { .. })
        ));
    }

    #[test]
    fn test_hint_after_item() {
        let mut ctx = DateInputContext::default();
        ctx.set_item(DatePart::Day, DateInputItemConfig::new()).expect("day");
        let err = ctx.set_hint(Hint::default()).expect_err("hint after item");
        assert_eq!(
            err,
            ConfigurationError::MustBeDeclaredBefore {
                element: FieldKind::DateInput.element(ElementKind::Hint),
                existing: DateInputContext::item_id(DatePart::Day),
            }
        );
    }

    #[test]
    fn test_item_value_conflicts_with_field_value() {
        let mut ctx = DateInputContext::new(true);
        let err = ctx
            .set_item(DatePart::Month, DateInputItemConfig::new().with_value(Some(4)))
            .expect_err("conflict");
        assert_eq!(err, ConfigurationError::ValueConflict { part: DatePart::Month });

        // An item without an explicit value is fine
        ctx.set_item(DatePart::Year, DateInputItemConfig::new()).expect("year");
    }

    #[test]
    fn test_field_value_conflicts_with_item_value() {
        let mut ctx = DateInputContext::default();
        ctx.set_item(DatePart::Year, DateInputItemConfig::new().with_value(None))
            .expect("year");
        assert_eq!(
            ctx.set_explicit_value(),
            Err(ConfigurationError::ValueConflict { part: DatePart::Year })
        );
    }

    #[test]
    fn test_items_rejected_inside_open_group() {
        let mut ctx = DateInputContext::default();
        ctx.open_group().expect("open");
        assert!(matches!(
            ctx.set_item(DatePart::Day, DateInputItemConfig::new()),
            Err(ConfigurationError::InsideGroup { .. })
        ));
        assert!(matches!(
            ctx.set_hint(Hint::default()),
            Err(ConfigurationError::InsideGroup { .. })
        ));
        ctx.close_group(Attributes::new()).expect("close");
        ctx.set_hint(Hint::default()).expect("hint after group");
        ctx.set_item(DatePart::Day, DateInputItemConfig::new()).expect("day");
        assert!(ctx.fieldset().is_some());
    }

    #[test]
    fn test_group_after_item_fails() {
        let mut ctx = DateInputContext::default();
        ctx.set_item(DatePart::Day, DateInputItemConfig::new()).expect("day");
        assert!(matches!(
            ctx.open_group(),
            Err(ConfigurationError::MustBeDeclaredBefore { .. })
        ));
    }

    #[test]
    fn test_label_after_group_fails() {
        let mut ctx = DateInputContext::default();
        ctx.open_group().expect("open");
        ctx.close_group(Attributes::new()).expect("close");
        assert!(matches!(
            ctx.set_label(Label::default()),
            Err(ConfigurationError::MutuallyExclusive { .. })
        ));
    }

    #[test]
    fn test_error_items() {
        let mut ctx = DateInputContext::default();
        assert_eq!(
            ctx.set_error_message_with_items(ErrorMessage::default(), Some(DateInputItems::empty())),
            Err(ConfigurationError::EmptyErrorItems)
        );
        ctx.set_error_message_with_items(ErrorMessage::default(), Some(DateInputItems::YEAR))
            .expect("error message");
        assert_eq!(ctx.error_items(), Some(DateInputItems::YEAR));
    }

    #[test]
    fn test_finish_requires_closed_group() {
        let mut ctx = DateInputContext::default();
        ctx.open_group().expect("open");
        assert!(matches!(
            ctx.finish(),
            Err(ConfigurationError::GroupNotClosed { .. })
        ));
    }
}
