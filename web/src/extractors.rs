//! Custom Axum extractors.
//!
//! - `SubmittedForm`: the urlencoded body of a form post, as ordered
//!   name/value pairs
//!
//! # Examples
//!
//! ```ignore
//! use govuk_forms_web::extractors::SubmittedForm;
//!
//! async fn handler(SubmittedForm(pairs): SubmittedForm) -> String {
//!     format!("{} values submitted", pairs.len())
//! }
//! ```

use crate::error::AppError;
use axum::{
    Form, async_trait,
    extract::{FromRequest, Request},
};
use govuk_forms_core::SubmittedValues;

/// A posted `application/x-www-form-urlencoded` body.
///
/// Pairs keep their submission order and repeated names are kept, so a
/// checkbox group posting several values under one name binds them all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedForm(pub Vec<(String, String)>);

#[async_trait]
impl<S> FromRequest<S> for SubmittedForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(reason = %rejection.body_text(), "Rejected form body");
                AppError::bad_request("The form body could not be read")
            })?;

        Ok(Self(pairs))
    }
}

impl SubmittedValues for SubmittedForm {
    fn values(&self, name: &str) -> Vec<&str> {
        self.0.values(name)
    }
}
