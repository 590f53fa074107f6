use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::request_id::REQUEST_ID_HEADER;

pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origins: Arc<[HeaderValue]>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    move |router| {
        let allow_origin = if allowed_origins.iter().any(|x| x == "*") {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(allowed_origins.iter().cloned())
        };

        router.layer(
            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE])
                .expose_headers([REQUEST_ID_HEADER]),
        )
    }
}
