use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::post,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::errors::AppError;
use crate::handlers::recognize;
use crate::state::AppState;

/// Create the API router
///
/// `max_upload_bytes` caps the request body; larger uploads are answered with
/// 413 before the handler stores anything. A panic inside the handler is
/// answered with the regular 500 JSON body.
pub fn create_api_router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/recognize", post(recognize::recognize_speech))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let err = AppError::from_panic(payload);
    error!("Recognition request failed: {}", err);
    err.into_response()
}
