//! # GOV.UK Forms Core
//!
//! Composition and value conversion for GOV.UK Design System form fields.
//!
//! This crate builds the options a component generator needs to render
//! composite form fields (date inputs, checkboxes, radios, selects and text
//! areas). It does no I/O and renders no markup.
//!
//! ## Core Concepts
//!
//! - **Field context**: accumulates a field's label, hint, error message and
//!   sub-items from a sequence of declarations, rejecting out-of-order or
//!   duplicate declarations
//! - **Converter**: maps one domain type to and from day/month/year sub-fields
//! - **Converter registry**: the process-wide, read-only set of converters
//! - **Value resolver**: computes each sub-field's rendered text and which
//!   sub-fields are in error
//! - **Binder**: converts submitted sub-fields and records failures in
//!   [`ModelState`]
//!
//! ## Architecture Principles
//!
//! - Setters return `Result` so a traversal can report every problem
//! - Collaborators (submitted values, validation state, display metadata) are
//!   traits passed in explicitly
//! - The registry is populated once and shared read-only
//!
//! ## Example
//!
//! ```
//! use govuk_forms_core::{
//!     ConverterRegistry, DateInputBinder, DateInputContext, DateInputField, FormsConfig,
//!     ModelState, ValueResolver,
//! };
//! use chrono::NaiveDate;
//! use std::collections::HashMap;
//!
//! let registry = ConverterRegistry::with_defaults();
//! let config = FormsConfig::default();
//!
//! let submitted: HashMap<String, String> = [
//!     ("DateOfBirth.Day", "1"),
//!     ("DateOfBirth.Month", "x"),
//!     ("DateOfBirth.Year", "2020"),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let mut state = ModelState::new();
//! let outcome = DateInputBinder::new(&registry, &config)
//!     .bind::<NaiveDate>("DateOfBirth", "Date of birth", &submitted, &mut state)
//!     .unwrap();
//! assert!(outcome.is_failed());
//!
//! let resolved = ValueResolver::new(&registry, &config)
//!     .with_submitted(&submitted)
//!     .with_validation(&state)
//!     .resolve_date_input(
//!         &DateInputContext::default(),
//!         &DateInputField::<NaiveDate>::for_binding("DateOfBirth"),
//!     )
//!     .unwrap();
//!
//! assert_eq!(resolved.items[1].value, "x");
//! assert!(resolved.items[1].has_error);
//! assert_eq!(resolved.error_summary.unwrap().href, "#DateOfBirth.Month");
//! ```

pub mod binder;
pub mod choices;
pub mod config;
pub mod content;
pub mod context;
pub mod conversion_error;
pub mod converter;
pub mod date_input;
pub mod declaration;
pub mod element;
pub mod error;
pub mod item_value;
pub mod items;
pub mod model_state;
pub mod registry;
pub mod resolver;
pub mod select;
pub mod sources;
pub mod text_area;

pub use binder::{BindOutcome, DateInputBinder};
pub use choices::{ChoiceEntry, ChoiceItem, ChoiceKind, ChoicesContext};
pub use config::{ConfigError, FormsConfig};
pub use content::{Attributes, Content, ErrorMessage, Fieldset, Hint, Label, Legend};
pub use context::{FieldContext, FormGroupContext};
pub use conversion_error::ConversionError;
pub use converter::{
    DateConverter, DateInputConverter, DateTimeConverter, MonthAndYear, MonthYearConverter,
};
pub use date_input::{DateInputContext, DateInputItemConfig};
pub use declaration::{CompositeContext, Declaration};
pub use element::{ElementId, ElementKind, FieldKind};
pub use error::{ConfigurationError, ConfigurationErrors};
pub use item_value::{Explicit, ItemValue};
pub use items::{DateInputItems, DatePart};
pub use model_state::{ErrorSummaryEntry, ModelError, ModelState};
pub use registry::ConverterRegistry;
pub use resolver::{
    DateInputField, ResolvedChoice, ResolvedChoices, ResolvedDateInput, ResolvedItem,
    ResolvedOption, ResolvedSelect, ResolvedTextArea, ValueField, ValueResolver,
};
pub use select::{SelectContext, SelectOption};
pub use sources::{DisplayMetadata, SubmittedValues, ValidationState};
pub use text_area::TextAreaContext;
