//! Select (drop-down) fields.

use crate::content::{Attributes, Content};
use crate::context::{FieldContext, FormGroupContext};
use crate::element::{Declared, ElementId, ElementKind, FieldKind};
use serde::{Deserialize, Serialize};

/// One `<option>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Option text.
    pub content: Option<Content>,
    /// Explicit selected state, overriding submitted and bound values.
    pub selected: Option<bool>,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// Extra attributes.
    pub attributes: Attributes,
}

impl SelectOption {
    /// An option submitting `value`, shown as `content`.
    #[must_use]
    pub fn new(value: impl Into<String>, content: Content) -> Self {
        Self {
            value: value.into(),
            content: Some(content),
            ..Self::default()
        }
    }

    /// Set the explicit selected state.
    #[must_use]
    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }
}

/// Builder state for one select instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectContext {
    field: FieldContext,
    options: Vec<Declared<SelectOption>>,
}

impl Default for SelectContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectContext {
    const OPTION: ElementId = FieldKind::Select.element(ElementKind::Item("item"));

    /// An empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            field: FieldContext::new(FieldKind::Select),
            options: Vec::new(),
        }
    }

    /// Declared options, in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.iter().map(|option| &option.value)
    }

    /// Append an option.
    pub fn add_option(&mut self, option: SelectOption) {
        self.options.push(Declared::new(option, Self::OPTION));
    }
}

impl FormGroupContext for SelectContext {
    fn field(&self) -> &FieldContext {
        &self.field
    }

    fn field_mut(&mut self) -> &mut FieldContext {
        &mut self.field
    }

    fn first_item(&self) -> Option<ElementId> {
        self.options.first().map(|option| option.declared_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Hint;
    use crate::error::ConfigurationError;

    #[test]
    fn test_hint_after_option_fails() {
        let mut ctx = SelectContext::new();
        ctx.add_option(SelectOption::new("gb", Content::text("United Kingdom")));
        assert!(matches!(
            ctx.set_hint(Hint::default()),
            Err(ConfigurationError::MustBeDeclaredBefore { .. })
        ));
        assert_eq!(ctx.options().count(), 1);
    }
}
