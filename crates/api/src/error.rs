use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use motorlist_core::error::CoreError;
use motorlist_db::StoreError;
use motorlist_wizard::WizardError;

use crate::routes::listing_wizard::step_path;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`WizardError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `motorlist_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A listing wizard workflow error.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// A document store error outside the wizard workflow.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, code, message and extra body fields of an error response.
struct ErrorParts {
    status: StatusCode,
    code: &'static str,
    message: String,
    extra: Option<(&'static str, Value)>,
    location: Option<String>,
}

impl ErrorParts {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            extra: None,
            location: None,
        }
    }

    fn with(mut self, key: &'static str, value: Value) -> Self {
        self.extra = Some((key, value));
        self
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }

    fn unavailable() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Storage is temporarily unavailable, please retry",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let parts = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => ErrorParts::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    ErrorParts::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => {
                    ErrorParts::new(StatusCode::CONFLICT, "CONFLICT", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    ErrorParts::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => {
                    ErrorParts::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    ErrorParts::internal()
                }
            },

            // --- Wizard workflow errors ---
            AppError::Wizard(err) => classify_wizard_error(err),

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Document store error");
                ErrorParts::unavailable()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                ErrorParts::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorParts::internal()
            }
        };

        let mut body = json!({
            "error": parts.message,
            "code": parts.code,
        });
        if let (Some((key, value)), Some(map)) = (parts.extra, body.as_object_mut()) {
            map.insert(key.to_string(), value);
        }

        let mut response = (parts.status, axum::Json(body)).into_response();
        if let Some(location) = parts.location.and_then(|l| HeaderValue::from_str(&l).ok()) {
            response.headers_mut().insert(header::LOCATION, location);
        }
        response
    }
}

/// Map a wizard error to its HTTP shape.
///
/// - Validation and incomplete drafts are 422 with the offending fields/steps.
/// - A missing draft on a gated step is a 303 to the basic-info step.
/// - Edits to non-drafts and illegal status changes are 409.
/// - Store and media failures are 503 with a sanitized message.
fn classify_wizard_error(err: &WizardError) -> ErrorParts {
    match err {
        WizardError::Validation(fields) => ErrorParts::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            "Validation failed",
        )
        .with("fields", json!(fields)),
        WizardError::NotFound { id } => ErrorParts::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Listing with id {id} not found"),
        ),
        WizardError::IncompleteDraft { missing } => ErrorParts::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "INCOMPLETE_DRAFT",
            err.to_string(),
        )
        .with("missing_steps", json!(missing)),
        WizardError::Redirect(redirect) => {
            let target = step_path(redirect.to);
            let mut parts =
                ErrorParts::new(StatusCode::SEE_OTHER, "REDIRECT", redirect.notice.clone())
                    .with("redirect_to", json!(target));
            parts.location = Some(target);
            parts
        }
        WizardError::NotEditable { .. } | WizardError::InvalidTransition(_) => {
            ErrorParts::new(StatusCode::CONFLICT, "CONFLICT", err.to_string())
        }
        WizardError::Store(e) => {
            tracing::error!(error = %e, "Document store error");
            ErrorParts::unavailable()
        }
        WizardError::Media(e) => {
            tracing::error!(error = %e, "Media store error");
            ErrorParts::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Photo upload failed, please retry",
            )
        }
    }
}
