//! HTTP route handlers for Axum.

use askama::Template;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api::types::{ErrorDto, PredictForm, PredictionDto, MAX_API_CHARS, MAX_FORM_CHARS},
    error::SpamError,
    ui::{IndexPage, ResultPage},
};

use super::AppState;

/// Error rendered as `{"error": ...}` with the given status.
#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl From<SpamError> for ApiError {
    fn from(err: SpamError) -> Self {
        match err {
            SpamError::Validation(message) => Self(StatusCode::BAD_REQUEST, message),
            other => {
                warn!(error = %other, "prediction failed");
                Self(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorDto { error: self.1 })).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Check a JSON prediction body and return its text.
pub fn validate_api_text(body: &Value) -> Result<&str, SpamError> {
    let text = match body.get("text") {
        Some(Value::String(text)) if !text.trim().is_empty() => text.as_str(),
        _ => {
            return Err(SpamError::validation(
                "Field 'text' is required and must be a non-empty string.",
            ))
        }
    };
    if text.chars().count() > MAX_API_CHARS {
        return Err(SpamError::validation(
            "Text too long. Maximum length is 10,000 characters.",
        ));
    }
    Ok(text)
}

/// Check a submitted form message.
pub fn validate_form_message(message: &str) -> Result<&str, SpamError> {
    if message.trim().is_empty() {
        return Err(SpamError::validation("Please provide a valid message."));
    }
    if message.chars().count() > MAX_FORM_CHARS {
        return Err(SpamError::validation(
            "Message too long. Maximum length is 5,000 characters.",
        ));
    }
    Ok(message)
}

pub async fn api_predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<PredictionDto> {
    let body = match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!(%rejection, "unreadable JSON body");
            Value::Null
        }
    };
    let text = validate_api_text(&body)?;
    let service = state.model.get()?;
    Ok(Json(service.predict_proba(text).into()))
}

pub async fn index() -> Response {
    render_page(
        StatusCode::OK,
        IndexPage {
            error: None,
            message: "",
            max_chars: MAX_FORM_CHARS,
        },
    )
}

pub async fn form_predict(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Response {
    let message = match validate_form_message(&form.message) {
        Ok(message) => message,
        Err(err) => {
            let error = err.to_string();
            return render_page(
                StatusCode::BAD_REQUEST,
                IndexPage {
                    error: Some(&error),
                    message: &form.message,
                    max_chars: MAX_FORM_CHARS,
                },
            );
        }
    };
    match state.model.get() {
        Ok(service) => {
            let label = service.predict(message);
            render_page(
                StatusCode::OK,
                ResultPage {
                    prediction: label.display_name(),
                },
            )
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

fn render_page<T: Template>(status: StatusCode, page: T) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            warn!(error = %err, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
