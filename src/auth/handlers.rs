//! OAuth2 HTTP Handlers
//!
//! Endpoints HTTP para iniciar e completar o fluxo OAuth2. Quando já existem
//! tokens, ambos apenas redirecionam para `/upload`.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::utils::logging::*;
use crate::utils::AppResult;
use crate::AppState;

/// Parâmetros do callback OAuth2
#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallbackParams {
    /// Authorization code retornado pelo Box
    pub code: Option<String>,
    /// Token CSRF emitido em `/`
    pub state: Option<String>,
    /// Erro retornado pelo Box (ex.: `access_denied`)
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET /
///
/// Redireciona o usuário para a página de consentimento do Box
pub async fn start_oauth_flow(State(state): State<Arc<AppState>>) -> Redirect {
    log_request_received("/", "GET");

    if state.auth.is_authenticated().await {
        return Redirect::to("/upload");
    }

    log_info("🚀 [OAuth2] Iniciando fluxo de autorização...");
    let auth_url = state.auth.authorization_url().await;
    log_info(&format!("↗️  [OAuth2] Redirecionando para: {}", auth_url));

    Redirect::to(auth_url.as_str())
}

/// GET /callback?code=XXX&state=YYY
///
/// Troca o code por tokens, persiste no arquivo de credenciais e segue para
/// `/upload`. Falhas viram página de erro (400 sem code, 403 se recusado).
pub async fn handle_oauth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OAuthCallbackParams>,
) -> AppResult<Redirect> {
    log_info("📥 [OAuth2] Callback recebido");

    if state.auth.is_authenticated().await {
        return Ok(Redirect::to("/upload"));
    }

    let error = params.error.as_deref().map(|e| match params.error_description.as_deref() {
        Some(desc) => format!("{}: {}", e, desc),
        None => e.to_string(),
    });

    state
        .auth
        .complete_authorization(params.code.as_deref(), params.state.as_deref(), error.as_deref())
        .await?;

    Ok(Redirect::to("/upload"))
}
