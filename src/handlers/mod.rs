pub mod health;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::auth::{handle_oauth_callback, start_oauth_flow};
use crate::AppState;

pub use health::health_check;
pub use upload::{handle_upload, upload_form};

/// Monta o router com todas as rotas da aplicação
pub fn router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.settings.upload.max_body_bytes;

    Router::new()
        .route("/", get(start_oauth_flow))
        .route("/callback", get(handle_oauth_callback))
        .route("/upload", get(upload_form).post(handle_upload))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
