use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::AssessmentError;
use super::service::{AssessmentService, AssessmentServiceError, SubmissionRequest};
use crate::workflows::delivery::SubmissionSink;
use crate::workflows::eligibility::{EligibilityError, RespondentProfile};

/// Router builder exposing the questionnaire, eligibility, and submission endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: SubmissionSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessment/questionnaire",
            get(questionnaire_handler::<S>),
        )
        .route("/api/v1/eligibility", post(eligibility_handler::<S>))
        .route("/api/v1/assessment/submissions", post(submit_handler::<S>))
        // Path the single-page client posts to.
        .route("/api/submit", post(submit_handler::<S>))
        .with_state(service)
}

pub(crate) async fn questionnaire_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    (StatusCode::OK, Json(service.questionnaire())).into_response()
}

pub(crate) async fn eligibility_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    body: Result<Json<RespondentProfile>, JsonRejection>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    let Json(profile) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    match service.check_eligibility(&profile) {
        Ok(enriched) => (StatusCode::OK, Json(enriched)).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    body: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    // Delivery blocks on the spreadsheet round trip.
    let outcome = tokio::task::spawn_blocking(move || service.submit(request)).await;

    match outcome {
        Ok(Ok(record)) => {
            let payload = json!({
                "message": "Success",
                "submission": record.payload(),
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Ok(Err(err)) => error_response(&err),
        Err(join_error) => {
            error!(error = %join_error, "submission task failed");
            let payload = json!({
                "error": "Internal Server Error",
                "kind": "internal",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Bodies that never reach the service, such as an answer outside `u8` or a non-JSON
/// payload, keep the same `{error, kind}` shape as domain errors.
pub(crate) fn rejection_response(rejection: &JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
        "kind": "invalid_request",
    });
    (rejection.status(), Json(payload)).into_response()
}

pub(crate) fn error_response(err: &AssessmentServiceError) -> Response {
    let message = err.to_string();
    let (status, payload) = match err {
        AssessmentServiceError::Eligibility(EligibilityError::Format { .. }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": message, "kind": "format" }),
        ),
        AssessmentServiceError::Eligibility(EligibilityError::NotFound { .. }) => (
            StatusCode::FORBIDDEN,
            json!({ "error": message, "kind": "not_found" }),
        ),
        AssessmentServiceError::Assessment(AssessmentError::Completion { section, missing }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": message,
                "kind": "incomplete",
                "section": section,
                "missing": missing,
            }),
        ),
        AssessmentServiceError::Assessment(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": message, "kind": "invalid_answer" }),
        ),
        AssessmentServiceError::Delivery(_) => (
            StatusCode::BAD_GATEWAY,
            json!({
                "error": "Connection error. Please try again.",
                "kind": "delivery",
            }),
        ),
    };

    (status, Json(payload)).into_response()
}
