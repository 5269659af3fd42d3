/// Box Upload Server
///
/// Fluxo:
/// - `/` leva o usuário ao consentimento OAuth2 do Box (só na primeira vez)
/// - `/callback` troca o code por tokens e grava no arquivo de credenciais
/// - `/upload` recebe o arquivo, cria uma subpasta aleatória no Box, envia o
///   arquivo e devolve o link compartilhado

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use boxdrop::auth::{AuthManager, AuthState, CredentialStore};
use boxdrop::config::Settings;
use boxdrop::utils::logging::*;
use boxdrop::{handlers, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 🔧 Carregar variáveis de ambiente do arquivo .env (se existir)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if dotenv_loaded {
        tracing::info!("✅ Arquivo .env carregado com sucesso");
    } else {
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    let settings = Settings::new().context("Failed to load settings")?;
    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Sem arquivo de credenciais o processo não sobe
    let store = CredentialStore::load(&settings.credentials.path)
        .with_context(|| format!("Failed to load credentials from {}", settings.credentials.path))?;

    let auth = AuthManager::new(store, &settings.oauth).context("Failed to build OAuth2 client")?;

    match auth
        .refresh_at_startup()
        .await
        .context("Failed to refresh access token at startup")?
    {
        AuthState::Authenticated => log_info("✅ [Auth] Tokens renovados; /upload disponível"),
        AuthState::Unauthenticated => log_info(&format!(
            "🔐 [Auth] Sem autorização; abra http://{}:{}/ para conectar ao Box",
            settings.server.host, settings.server.port
        )),
    }

    tokio::fs::create_dir_all(&settings.upload.staging_dir)
        .await
        .with_context(|| format!("Failed to create staging dir {}", settings.upload.staging_dir))?;

    let box_client = box_api::BoxClient::with_base_urls(
        settings.box_api.api_base_url.clone(),
        settings.box_api.upload_base_url.clone(),
        settings.box_api.timeout_seconds,
    )?;

    let host = settings.server.host.clone();
    let port = settings.server.port;

    let app_state = Arc::new(AppState::new(settings, auth, box_client));
    let app = handlers::router(app_state);

    log_server_startup(&host, port);
    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    log_server_ready(&host, port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
