use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use studio_core_contact_contracts::{
    ContactService, ContactSubmitError, SUBMIT_OK_MESSAGE, VALIDATION_ERROR_MESSAGE,
};
use studio_models::{
    action::{ActionErrorCode, ActionResult},
    contact::{
        schema::{ContactSchema, CONTACT_SCHEMA},
        ContactInput,
    },
};
use tracing::warn;

use crate::errors::action_error;

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .route("/contact/schema", routing::get(schema))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactService>>,
    input: Result<Json<ContactInput>, JsonRejection>,
) -> Response {
    let Json(input) = match input {
        Ok(input) => input,
        Err(rejection) => {
            warn!("Malformed contact form request: {rejection}");
            return action_error(ActionErrorCode::BadRequest, VALIDATION_ERROR_MESSAGE);
        }
    };

    match service.submit(input).await {
        Ok(_) => Json(ActionResult {
            success: true,
            message: SUBMIT_OK_MESSAGE.into(),
        })
        .into_response(),
        Err(err @ ContactSubmitError::Validation(_)) => {
            action_error(ActionErrorCode::BadRequest, err.public_message())
        }
        Err(err) => action_error(ActionErrorCode::InternalServerError, err.public_message()),
    }
}

async fn schema() -> Json<&'static ContactSchema> {
    Json(&*CONTACT_SCHEMA)
}
