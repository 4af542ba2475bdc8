//! Axum integration for the GOV.UK forms engine.
//!
//! The engine itself is synchronous and does no I/O; this crate is the shell
//! around it:
//!
//! 1. **HTTP Request** arrives with an urlencoded form body
//! 2. **Extract** the body as ordered name/value pairs ([`SubmittedForm`])
//! 3. **Bind** the posted items through the shared converter registry
//! 4. **Resolve** the field for re-rendering against the submission and the
//!    recorded errors
//! 5. **Map** the outcome to a status and a JSON body
//!
//! Configuration errors become 500 responses through [`AppError`]; users never
//! see their text.
//!
//! # Example
//!
//! ```no_run
//! use govuk_forms_web::{FieldCatalog, FormsState, router};
//! use govuk_forms_core::{ConverterRegistry, FormsConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let state = FormsState::new(
//!     ConverterRegistry::with_defaults(),
//!     FormsConfig::default(),
//!     FieldCatalog::new().with_field("DateOfBirth", "Date of birth"),
//! );
//! let app = router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

use axum::{Router, routing::post};

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::SubmittedForm;
pub use handlers::{DateSubmission, submit_date};
pub use state::{FieldCatalog, FieldInfo, FormsState};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;

/// Routes for the form endpoints.
#[must_use]
pub fn router(state: FormsState) -> Router {
    Router::new()
        .route("/forms/dates/:name", post(submit_date))
        .with_state(state)
}
