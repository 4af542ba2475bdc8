//! Text area fields: a single `value` child after the shared elements.

use crate::context::{FieldContext, FormGroupContext};
use crate::element::{Declared, ElementId, ElementKind, FieldKind};
use crate::error::{ConfigurationError, Result};

/// Builder state for one text area instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaContext {
    field: FieldContext,
    value: Option<Declared<String>>,
}

impl Default for TextAreaContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAreaContext {
    const VALUE: ElementId = FieldKind::TextArea.element(ElementKind::Item("value"));

    /// An empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            field: FieldContext::new(FieldKind::TextArea),
            value: None,
        }
    }

    /// The explicit value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_ref().map(|value| value.value.as_str())
    }

    /// Declare the explicit value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateElement`] if already declared.
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
        if let Some(existing) = &self.value {
            return Err(ConfigurationError::DuplicateElement {
                element: Self::VALUE,
                existing: existing.declared_by,
            });
        }
        self.value = Some(Declared::new(value.into(), Self::VALUE));
        Ok(())
    }
}

impl FormGroupContext for TextAreaContext {
    fn field(&self) -> &FieldContext {
        &self.field
    }

    fn field_mut(&mut self) -> &mut FieldContext {
        &mut self.field
    }

    fn first_item(&self) -> Option<ElementId> {
        self.value.as_ref().map(|value| value.declared_by)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::content::Label;

    #[test]
    fn test_value_once() {
        let mut ctx = TextAreaContext::new();
        ctx.set_value("Some text").expect("value");
        assert_eq!(ctx.value(), Some("Some text"));
        assert!(matches!(
            ctx.set_value("More"),
            Err(ConfigurationError::DuplicateElement { .. })
        ));
    }

    #[test]
    fn test_label_after_value_fails() {
        let mut ctx = TextAreaContext::new();
        ctx.set_value("").expect("value");
        assert_eq!(
            ctx.set_label(Label::default()),
            Err(ConfigurationError::MustBeDeclaredBefore {
                element: FieldKind::TextArea.element(ElementKind::Label),
                existing: TextAreaContext::VALUE,
            })
        );
    }
}
