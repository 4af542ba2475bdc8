//! Date input submission endpoint.
//!
//! ```text
//! POST /forms/dates/{name}
//! Content-Type: application/x-www-form-urlencoded
//!
//! DateOfBirth.Day=15&DateOfBirth.Month=Smarch&DateOfBirth.Year=1990
//! ```
//!
//! A real date answers 200 with the ISO date. Anything else answers 422. Both
//! carry the resolved date input so the caller can re-render the field with
//! exactly what was typed and the failing items marked.

use crate::WebResult;
use crate::extractors::SubmittedForm;
use crate::state::FormsState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use govuk_forms_core::{
    BindOutcome, DateInputBinder, DateInputContext, DateInputField, DisplayMetadata, ModelState,
    ResolvedDateInput, ValueResolver,
};
use serde::Serialize;

/// Response body for a date submission.
#[derive(Debug, Clone, Serialize)]
pub struct DateSubmission {
    /// The bound date, when the submission was a real date.
    pub date: Option<NaiveDate>,
    /// The field as it should be re-rendered.
    pub field: ResolvedDateInput,
}

/// Bind the date input `name` from the posted form.
///
/// # Errors
///
/// Returns a 400 for an unreadable body and a 500 if the registry has no
/// converter for dates.
pub async fn submit_date(
    State(state): State<FormsState>,
    Path(name): Path<String>,
    form: SubmittedForm,
) -> WebResult<(StatusCode, Json<DateSubmission>)> {
    let label = state
        .catalog
        .display_name(&name)
        .unwrap_or_else(|| name.clone());

    let mut model_state = ModelState::new();
    let outcome = DateInputBinder::new(&state.registry, &state.config).bind::<NaiveDate>(
        &name,
        &label,
        &form,
        &mut model_state,
    )?;

    if matches!(outcome, BindOutcome::NotSubmitted | BindOutcome::Empty) {
        model_state.add_error(&name, format!("Enter {}", label.to_lowercase()));
    }
    let date = outcome.value();

    let field = match date {
        Some(date) => DateInputField::for_binding(&name).with_bound_value(date),
        None => DateInputField::for_binding(&name),
    };
    let resolved = ValueResolver::new(&state.registry, &state.config)
        .with_submitted(&form)
        .with_validation(&model_state)
        .with_metadata(&*state.catalog)
        .resolve_date_input(&DateInputContext::default(), &field)?;

    let status = if model_state.is_valid() {
        StatusCode::OK
    } else {
        tracing::debug!(
            name = %name,
            errors = model_state.error_count(),
            "Date submission rejected"
        );
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok((
        status,
        Json(DateSubmission {
            date,
            field: resolved,
        }),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use crate::{FieldCatalog, FormsState, router};
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use govuk_forms_core::{ConverterRegistry, FormsConfig};
    use govuk_forms_testing::FormSubmission;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(FormsState::new(
            ConverterRegistry::with_defaults(),
            FormsConfig::default(),
            FieldCatalog::new().with_field("DateOfBirth", "Date of birth"),
        ))
    }

    async fn post(app: Router, name: &str, submission: &FormSubmission) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/forms/dates/{name}"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(submission.to_urlencoded()))
            .expect("Valid request");

        let response = app.oneshot(request).await.expect("Response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Body");
        (status, serde_json::from_slice(&bytes).expect("JSON body"))
    }

    #[tokio::test]
    async fn test_real_date_is_accepted() {
        let submission = FormSubmission::new().date("DateOfBirth", "1", "4", "2020");
        let (status, body) = post(app(), "DateOfBirth", &submission).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2020-04-01");
        assert_eq!(body["field"]["items"][1]["value"], "4");
        assert!(body["field"]["error_message"].is_null());
    }

    #[tokio::test]
    async fn test_invalid_month_is_marked() {
        let submission = FormSubmission::new().date("DateOfBirth", "15", "Smarch", "1990");
        let (status, body) = post(app(), "DateOfBirth", &submission).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["date"].is_null());

        let items = body["field"]["items"].as_array().unwrap();
        let marked: Vec<_> = items
            .iter()
            .filter(|item| item["has_error"] == true)
            .map(|item| item["part"].as_str().unwrap())
            .collect();
        assert_eq!(marked, vec!["Month"]);
        assert_eq!(items[1]["value"], "Smarch");
        assert_eq!(
            body["field"]["error_message"]["content"]["value"],
            "Date of birth must be a real date"
        );
        assert_eq!(body["field"]["error_summary"]["href"], "#DateOfBirth.Month");
    }

    #[tokio::test]
    async fn test_empty_submission_asks_for_date() {
        let submission = FormSubmission::new().date("DateOfBirth", "", " ", "");
        let (status, body) = post(app(), "DateOfBirth", &submission).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["field"]["error_message"]["content"]["value"],
            "Enter date of birth"
        );
        assert_eq!(body["field"]["error_summary"]["href"], "#DateOfBirth.Day");
    }

    #[tokio::test]
    async fn test_missing_converter_is_internal_error() {
        let app = router(FormsState::new(
            ConverterRegistry::new(),
            FormsConfig::default(),
            FieldCatalog::new(),
        ));
        let submission = FormSubmission::new().date("When", "1", "1", "2000");
        let (status, body) = post(app, "When", &submission).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("NaiveDate"));
    }
}
