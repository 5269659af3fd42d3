use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tokio::time::Instant;

use crate::utils::logging::*;
use crate::utils::AppError;
use crate::views;
use crate::AppState;

const NO_FILE_NOTICE: &str = "Nenhum arquivo selecionado. Escolha um arquivo e envie novamente.";

/// GET /upload
pub async fn upload_form(State(state): State<Arc<AppState>>) -> Response {
    log_request_received("/upload", "GET");

    if !state.auth.is_authenticated().await {
        return Redirect::to("/").into_response();
    }

    views::render_upload_form(None).into_response()
}

/// POST /upload
///
/// Sem arquivo: formulário de novo com aviso (200). Corpo acima do limite:
/// 413. Token revogado: volta para `/` para autorizar de novo. Falha no Box:
/// página de erro 502.
pub async fn handle_upload(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let start_time = Instant::now();
    log_request_received("/upload", "POST");

    if !state.auth.is_authenticated().await {
        return Redirect::to("/").into_response();
    }

    let staged = match state.uploads.stage(multipart).await {
        Ok(staged) => staged,
        Err(AppError::NoFileSupplied) => {
            log_warning("⚠️ [Upload] Formulário enviado sem arquivo");
            return views::render_upload_form(Some(NO_FILE_NOTICE)).into_response();
        }
        Err(e) => {
            log_error(&format!("❌ [Upload] Falha ao receber arquivo: {}", e));
            return e.into_response();
        }
    };

    let access_token = match state.auth.access_token().await {
        Ok(token) => token,
        Err(e) => {
            staged.discard().await;
            return match e {
                AppError::TokenRevoked(_) => Redirect::to("/").into_response(),
                e => e.into_response(),
            };
        }
    };

    let response = match state
        .uploads
        .process(&access_token, state.auth.folder_id(), staged)
        .await
    {
        Ok(outcome) => views::render_result_page(&outcome).into_response(),
        Err(e) => {
            log_error(&format!("❌ [Upload] Falha no upload: {}", e));
            e.into_response()
        }
    };

    log_request_processed(
        "/upload",
        response.status().as_u16(),
        start_time.elapsed().as_millis() as u64,
    );

    response
}
