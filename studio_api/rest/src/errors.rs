use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use studio_models::action::{ActionError, ActionErrorCode};

pub const UNEXPECTED_ERROR_MESSAGE: &str = "Wystąpił nieoczekiwany błąd.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    action_error(ActionErrorCode::InternalServerError, UNEXPECTED_ERROR_MESSAGE)
}

pub fn action_error(code: ActionErrorCode, message: &str) -> Response {
    let status = match code {
        ActionErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ActionErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let error = ActionError {
        code,
        message: message.into(),
    };

    (status, Json(error)).into_response()
}
