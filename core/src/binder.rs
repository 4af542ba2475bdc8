//! Binding submitted date input text to a domain value.
//!
//! The binder is the write side of the round trip: it reads `{name}.Day`,
//! `{name}.Month` and `{name}.Year`, converts them with the registered
//! converter and, on failure, records the [`ConversionError`] in
//! [`ModelState`] so the next render can mark exactly the failing items.
//!
//! Given the field's [`DateInputContext`], the binder reads the declared items
//! under their declared wire names, matching what the resolver rendered.

use crate::config::{FormsConfig, item_name};
use crate::conversion_error::ConversionError;
use crate::date_input::DateInputContext;
use crate::error::Result;
use crate::item_value::ItemValue;
use crate::items::DatePart;
use crate::model_state::ModelState;
use crate::registry::ConverterRegistry;
use crate::sources::SubmittedValues;
use tracing::{debug, trace};

/// Result of binding one date input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome<T> {
    /// None of the expected items were submitted.
    NotSubmitted,
    /// Every submitted item was blank.
    Empty,
    /// The items converted to a value.
    Bound(T),
    /// Conversion failed; the error has been recorded.
    Failed(ConversionError),
}

impl<T> BindOutcome<T> {
    /// The bound value, if any.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Bound(value) => Some(value),
            _ => None,
        }
    }

    /// Whether conversion failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Binds date inputs using a converter registry.
#[derive(Debug, Clone, Copy)]
pub struct DateInputBinder<'a> {
    registry: &'a ConverterRegistry,
    config: &'a FormsConfig,
    context: Option<&'a DateInputContext>,
}

impl<'a> DateInputBinder<'a> {
    /// Create a binder.
    #[must_use]
    pub const fn new(registry: &'a ConverterRegistry, config: &'a FormsConfig) -> Self {
        Self {
            registry,
            config,
            context: None,
        }
    }

    /// Read the items declared by `context`, under their declared names.
    #[must_use]
    pub const fn with_context(mut self, context: &'a DateInputContext) -> Self {
        self.context = Some(context);
        self
    }

    fn wire_name(&self, name: &str, part: DatePart) -> String {
        self.context
            .and_then(|context| context.item(part))
            .and_then(|item| item.name.clone())
            .unwrap_or_else(|| item_name(name, part))
    }

    /// Bind the date input named `name`, labelled `label` in error messages.
    ///
    /// Reads the items declared by the attached context, or else the
    /// converter's default items.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoConverter`](crate::error::ConfigurationError::NoConverter)
    /// if no converter handles `T`. Conversion failures are not errors; they are
    /// returned as [`BindOutcome::Failed`] and recorded in `state`.
    pub fn bind<T: Send + Sync + 'static>(
        &self,
        name: &str,
        label: &str,
        submitted: &dyn SubmittedValues,
        state: &mut ModelState,
    ) -> Result<BindOutcome<T>> {
        let converter = self.registry.require::<T>()?;
        let expected = match self.context.map(DateInputContext::declared_items) {
            Some(declared) if !declared.is_empty() => declared,
            _ => converter.default_items(),
        };

        let raw: Vec<(DatePart, Option<&str>)> = DatePart::ALL
            .into_iter()
            .map(|part| {
                let text = expected
                    .contains(part.flag())
                    .then(|| submitted.value(&self.wire_name(name, part)))
                    .flatten();
                (part, text)
            })
            .collect();

        if raw.iter().all(|(_, text)| text.is_none()) {
            trace!(name = %name, "Date input not submitted");
            return Ok(BindOutcome::NotSubmitted);
        }
        if raw.iter().flat_map(|(_, text)| text).all(|text| text.trim().is_empty()) {
            trace!(name = %name, "Date input submitted empty");
            return Ok(BindOutcome::Empty);
        }

        let value = ItemValue::parse(raw[0].1, raw[1].1, raw[2].1);
        match converter.to_model(&value) {
            Ok(model) => Ok(BindOutcome::Bound(model)),
            Err(error) => {
                let error = match &self.config.conversion_error_template {
                    Some(template) => error.with_template(template.clone()),
                    None => error,
                };
                debug!(
                    name = %name,
                    failed = ?error.fields(),
                    "Date input conversion failed"
                );
                state.add_conversion_error(name, error.clone(), label);
                Ok(BindOutcome::Failed(error))
            }
        }
    }
}
