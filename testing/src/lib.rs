//! # GOV.UK Forms Testing
//!
//! Testing utilities for the GOV.UK forms engine.
//!
//! This crate provides:
//! - Mock implementations of the collaborator traits (submitted values,
//!   display metadata)
//! - Test helpers and builders
//! - Property-based testing strategies for the built-in domain types
//! - Tracing initialisation for tests
//!
//! ## Example
//!
//! ```
//! use govuk_forms_testing::{FormSubmission, StaticMetadata};
//! use govuk_forms_core::{DisplayMetadata, SubmittedValues};
//!
//! let submission = FormSubmission::new().date("DateOfBirth", "1", "x", "2020");
//! assert_eq!(submission.value("DateOfBirth.Month"), Some("x"));
//!
//! let metadata = StaticMetadata::new().field("DateOfBirth", "Date of birth");
//! assert_eq!(metadata.display_name("DateOfBirth").as_deref(), Some("Date of birth"));
//! ```

use std::sync::Once;

/// Mock implementations of the collaborator traits.
pub mod mocks {
    use govuk_forms_core::{DisplayMetadata, SubmittedValues};
    use indexmap::IndexMap;

    /// A submitted form, as ordered name/value pairs.
    ///
    /// Repeated names are kept, as a urlencoded body would carry them.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct FormSubmission {
        pairs: Vec<(String, String)>,
    }

    impl FormSubmission {
        /// An empty submission.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Add one value.
        #[must_use]
        pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
            self.pairs.push((name.into(), value.into()));
            self
        }

        /// Add the three items of the date input `name`.
        #[must_use]
        pub fn date(self, name: &str, day: &str, month: &str, year: &str) -> Self {
            self.field(format!("{name}.Day"), day)
                .field(format!("{name}.Month"), month)
                .field(format!("{name}.Year"), year)
        }

        /// The submitted pairs.
        #[must_use]
        pub fn pairs(&self) -> &[(String, String)] {
            &self.pairs
        }

        /// The submission as an `application/x-www-form-urlencoded` body.
        ///
        /// # Panics
        ///
        /// Panics if the pairs cannot be encoded.
        #[must_use]
        #[allow(clippy::expect_used)]
        pub fn to_urlencoded(&self) -> String {
            serde_urlencoded::to_string(&self.pairs).expect("string pairs should encode")
        }
    }

    impl SubmittedValues for FormSubmission {
        fn values(&self, name: &str) -> Vec<&str> {
            self.pairs.values(name)
        }
    }

    /// Display metadata from a fixed table.
    #[derive(Debug, Clone, Default)]
    pub struct StaticMetadata {
        fields: IndexMap<String, (String, Option<String>)>,
    }

    impl StaticMetadata {
        /// An empty table.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a display name for `name`.
        #[must_use]
        pub fn field(mut self, name: impl Into<String>, display_name: impl Into<String>) -> Self {
            self.fields
                .insert(name.into(), (display_name.into(), None));
            self
        }

        /// Add a display name and description for `name`.
        #[must_use]
        pub fn described_field(
            mut self,
            name: impl Into<String>,
            display_name: impl Into<String>,
            description: impl Into<String>,
        ) -> Self {
            self.fields.insert(
                name.into(),
                (display_name.into(), Some(description.into())),
            );
            self
        }
    }

    impl DisplayMetadata for StaticMetadata {
        fn display_name(&self, name: &str) -> Option<String> {
            self.fields.get(name).map(|(display, _)| display.clone())
        }

        fn description(&self, name: &str) -> Option<String> {
            self.fields
                .get(name)
                .and_then(|(_, description)| description.clone())
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use chrono::NaiveDate;
    use govuk_forms_core::{
        CompositeContext, DateInputContext, Declaration, FieldKind, ResolvedDateInput,
    };

    /// Build a date.
    ///
    /// # Panics
    ///
    /// Panics if the date does not exist.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("test dates should exist")
    }

    /// Build a date input context from declarations.
    ///
    /// # Panics
    ///
    /// Panics with every configuration error if the declarations are invalid.
    #[must_use]
    #[allow(clippy::panic)]
    pub fn date_input(declarations: impl IntoIterator<Item = Declaration>) -> DateInputContext {
        match CompositeContext::build(FieldKind::DateInput, declarations) {
            Ok(CompositeContext::DateInput(context)) => context,
            Ok(other) => panic!("expected a date input context, got {:?}", other.kind()),
            Err(errors) => panic!("invalid declarations: {errors}"),
        }
    }

    /// The rendered values of a resolved date input, in item order.
    #[must_use]
    pub fn rendered_values(resolved: &ResolvedDateInput) -> Vec<&str> {
        resolved.items.iter().map(|item| item.value.as_str()).collect()
    }
}

/// Property-based testing strategies.
pub mod properties {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use govuk_forms_core::MonthAndYear;
    use govuk_forms_core::converter::{MAX_YEAR, MIN_YEAR};
    use proptest::prelude::*;

    /// Any date the built-in converters accept.
    pub fn naive_date() -> impl Strategy<Value = NaiveDate> {
        (MIN_YEAR..=MAX_YEAR, 1u32..=12, 1u32..=31).prop_filter_map(
            "day must exist in month",
            |(year, month, day)| NaiveDate::from_ymd_opt(year, month, day),
        )
    }

    /// Any midnight timestamp the built-in converters accept.
    pub fn midnight_datetime() -> impl Strategy<Value = NaiveDateTime> {
        naive_date().prop_map(|date| date.and_time(NaiveTime::MIN))
    }

    /// Any month and year the built-in converters accept.
    pub fn month_year() -> impl Strategy<Value = MonthAndYear> {
        (1u32..=12, MIN_YEAR..=MAX_YEAR)
    }

    /// Raw text a user might type into one date item.
    pub fn item_text() -> impl Strategy<Value = String> {
        prop_oneof![
            (0i32..=40).prop_map(|n| n.to_string()),
            Just(String::new()),
            Just(" ".to_string()),
            "[a-z]{1,3}",
        ]
    }
}

static TRACING: Once = Once::new();

/// Install a `tracing` subscriber for tests, once per process.
///
/// Honours `RUST_LOG`; defaults to `govuk_forms_core=debug`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("govuk_forms_core=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

// Re-export commonly used items
pub use helpers::{date, date_input, rendered_values};
pub use mocks::{FormSubmission, StaticMetadata};
