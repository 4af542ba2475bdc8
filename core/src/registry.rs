//! Converter registry.
//!
//! The registry provides:
//! - Registration of one converter per domain type
//! - Typed lookup for conversion
//! - Untyped lookup of a converter's default items
//! - Listing for diagnostics
//!
//! It is built once at application start-up and then shared read-only
//! (typically behind an `Arc`). Registration takes `&mut self`, so once the
//! registry is shared it can no longer change and concurrent reads need no
//! locking.

use crate::converter::{DateConverter, DateInputConverter, DateTimeConverter, MonthYearConverter};
use crate::error::ConfigurationError;
use crate::items::DateInputItems;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

/// One registered converter, type-erased.
struct Registration {
    model_type: TypeId,
    type_name: &'static str,
    default_items: DateInputItems,
    /// Holds an `Arc<dyn DateInputConverter<Model = T>>` for `model_type`.
    converter: Box<dyn Any + Send + Sync>,
}

impl Registration {
    fn new<C: DateInputConverter>(converter: C) -> Self {
        let default_items = converter.default_items();
        let converter: Arc<dyn DateInputConverter<Model = C::Model>> = Arc::new(converter);
        Self {
            model_type: TypeId::of::<C::Model>(),
            type_name: type_name::<C::Model>(),
            default_items,
            converter: Box::new(converter),
        }
    }

    fn typed<T: Send + Sync + 'static>(&self) -> Option<&dyn DateInputConverter<Model = T>> {
        self.converter
            .downcast_ref::<Arc<dyn DateInputConverter<Model = T>>>()
            .map(|converter| &**converter)
    }
}

/// What the registry knows about a domain type without knowing the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterInfo {
    /// Name of the domain type.
    pub type_name: &'static str,
    /// Items rendered by default for this type.
    pub default_items: DateInputItems,
}

/// Ordered collection of converters, at most one per domain type.
///
/// ## Example
///
/// ```
/// use govuk_forms_core::ConverterRegistry;
/// use chrono::NaiveDate;
///
/// let registry = ConverterRegistry::with_defaults();
/// assert!(registry.find::<NaiveDate>().is_some());
/// assert!(registry.find::<u64>().is_none());
/// ```
#[derive(Default)]
pub struct ConverterRegistry {
    registrations: Vec<Registration>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Create a registry holding the built-in converters.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(DateConverter);
        registry.register(DateTimeConverter);
        registry.register(MonthYearConverter);
        registry
    }

    /// Register a converter for its domain type.
    ///
    /// If the type already has a converter it is replaced in place, keeping its
    /// position, and this method returns `true`. Otherwise the converter is
    /// appended and this returns `false`.
    pub fn register<C: DateInputConverter>(&mut self, converter: C) -> bool {
        let registration = Registration::new(converter);
        let type_name = registration.type_name;

        if let Some(existing) = self
            .registrations
            .iter_mut()
            .find(|r| r.model_type == registration.model_type)
        {
            *existing = registration;
            tracing::debug!(model_type = type_name, "Replaced date input converter");
            return true;
        }

        self.registrations.push(registration);
        tracing::debug!(model_type = type_name, "Registered date input converter");
        false
    }

    /// Register a converter ahead of every existing one, removing any
    /// previous converter for the same type.
    pub fn register_first<C: DateInputConverter>(&mut self, converter: C) {
        let registration = Registration::new(converter);
        self.registrations
            .retain(|r| r.model_type != registration.model_type);
        tracing::debug!(
            model_type = registration.type_name,
            "Registered date input converter with precedence"
        );
        self.registrations.insert(0, registration);
    }

    /// The first converter for `T`, if any.
    #[must_use]
    pub fn find<T: Send + Sync + 'static>(&self) -> Option<&dyn DateInputConverter<Model = T>> {
        self.registrations.iter().find_map(Registration::typed::<T>)
    }

    /// The converter for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoConverter`] if `T` has no converter.
    pub fn require<T: Send + Sync + 'static>(
        &self,
    ) -> Result<&dyn DateInputConverter<Model = T>, ConfigurationError> {
        self.find::<T>().ok_or_else(|| {
            tracing::warn!(model_type = type_name::<T>(), "No date input converter registered");
            ConfigurationError::NoConverter {
                type_name: type_name::<T>(),
            }
        })
    }

    /// Untyped information about the converter for `model_type`.
    #[must_use]
    pub fn info(&self, model_type: TypeId) -> Option<ConverterInfo> {
        self.registrations
            .iter()
            .find(|r| r.model_type == model_type)
            .map(|r| ConverterInfo {
                type_name: r.type_name,
                default_items: r.default_items,
            })
    }

    /// Names of the registered domain types, in lookup order.
    #[must_use]
    pub fn model_types(&self) -> Vec<&'static str> {
        self.registrations.iter().map(|r| r.type_name).collect()
    }

    /// Number of registered converters.
    #[must_use]
    pub fn count(&self) -> usize {
        self.registrations.len()
    }

    /// Whether no converters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("model_types", &self.model_types())
            .finish()
    }
}
