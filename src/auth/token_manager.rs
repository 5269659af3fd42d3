//! Authorization Manager
//!
//! Máquina de dois estados sobre o arquivo de credenciais:
//!
//! - **Unauthenticated**: sem tokens; `/` e `/callback` conduzem o fluxo
//!   authorization-code.
//! - **Authenticated**: tokens presentes (talvez vencidos). Na
//!   inicialização é feito um refresh síncrono; depois disso o access token
//!   é renovado sob demanda quando estiver perto de vencer.
//!
//! Toda mudança de token é persistida imediatamente no `CredentialStore`. O
//! mutex interno serializa refreshes e escritas no arquivo.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use url::Url;

use crate::auth::client::{OAuth2Client, TokenPair};
use crate::auth::credentials::CredentialStore;
use crate::auth::OAuth2Config;
use crate::config::settings::OAuthSettings;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Margem antes do vencimento em que o token já é renovado
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

struct AuthInner {
    store: CredentialStore,
    expires_at: Option<DateTime<Utc>>,
    /// Último `state` CSRF emitido
    pending_state: Option<String>,
}

impl AuthInner {
    fn state(&self) -> AuthState {
        if self.store.record().has_tokens() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    fn apply(&mut self, pair: TokenPair) -> AppResult<()> {
        // O Box rotaciona o refresh token; se não vier um novo, mantém o atual
        let refresh_token = match pair.refresh_token.or_else(|| self.store.record().refresh_token.clone()) {
            Some(token) => token,
            None => {
                return Err(AppError::AuthorizationDenied(
                    "token response did not include a refresh token".to_string(),
                ))
            }
        };

        self.store.persist_tokens(&pair.access_token, &refresh_token)?;
        self.expires_at = pair.expires_at;
        Ok(())
    }

    /// Refresh token revogado: limpa os tokens e volta a Unauthenticated
    fn demote(&mut self, reason: &str) -> AppResult<()> {
        log_warning(&format!(
            "⚠️ [Auth] Refresh token rejeitado ({}). Tokens removidos; acesse / para autorizar novamente.",
            reason
        ));
        self.expires_at = None;
        self.store.clear_tokens()
    }
}

/// Gerenciador de autorização OAuth2
pub struct AuthManager {
    oauth_client: OAuth2Client,
    folder_id: String,
    inner: Mutex<AuthInner>,
}

impl AuthManager {
    pub fn new(store: CredentialStore, settings: &OAuthSettings) -> AppResult<Self> {
        let config = OAuth2Config::new(store.record(), settings);
        let oauth_client = OAuth2Client::new(&config)?;
        let folder_id = store.record().folder_id.clone();

        Ok(Self {
            oauth_client,
            folder_id,
            inner: Mutex::new(AuthInner {
                store,
                expires_at: None,
                pending_state: None,
            }),
        })
    }

    pub async fn state(&self) -> AuthState {
        self.inner.lock().await.state()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state().await == AuthState::Authenticated
    }

    /// Pasta do Box onde as subpastas são criadas
    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    /// URL de consentimento do Box (passo 1 do fluxo)
    pub async fn authorization_url(&self) -> Url {
        let (url, csrf) = self.oauth_client.authorization_url();
        self.inner.lock().await.pending_state = Some(csrf.secret().clone());
        url
    }

    /// Processa o callback do Box (passos 2 e 3 do fluxo)
    ///
    /// Nada é gravado no arquivo de credenciais em caso de erro.
    ///
    /// # Erros
    /// - `AuthorizationDenied`: `error` presente no callback ou code recusado
    /// - `CallbackMalformed`: callback sem `code`
    pub async fn complete_authorization(
        &self,
        code: Option<&str>,
        state: Option<&str>,
        error: Option<&str>,
    ) -> AppResult<()> {
        if let Some(error) = error {
            log_error(&format!("❌ [Auth] Box recusou a autorização: {}", error));
            return Err(AppError::AuthorizationDenied(error.to_string()));
        }

        let code = code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::CallbackMalformed("missing code parameter".to_string()))?;

        let mut inner = self.inner.lock().await;

        // A validação do CSRF fica com o cliente OAuth; aqui só registramos
        if let (Some(expected), Some(received)) = (inner.pending_state.as_deref(), state) {
            if expected != received {
                log_warning("⚠️ [Auth] state do callback difere do último emitido");
            }
        }

        let pair = self.oauth_client.exchange_code(code).await?;
        inner.apply(pair)?;
        inner.pending_state = None;

        log_info("✅ [Auth] Autorização concluída; tokens persistidos");
        Ok(())
    }

    /// Refresh síncrono feito na inicialização quando já existem tokens
    ///
    /// Refresh token rejeitado: tokens são removidos e o estado volta a
    /// Unauthenticated (retorna `Ok(AuthState::Unauthenticated)`). Falha de
    /// rede é propagada.
    pub async fn refresh_at_startup(&self) -> AppResult<AuthState> {
        let mut inner = self.inner.lock().await;

        let refresh_token = match inner.store.record().refresh_token.clone() {
            Some(token) if inner.state() == AuthState::Authenticated => token,
            _ => {
                log_info("🆕 [Auth] Nenhum token armazenado; aguardando autorização em /");
                return Ok(AuthState::Unauthenticated);
            }
        };

        match self.oauth_client.refresh(&refresh_token).await {
            Ok(pair) => {
                inner.apply(pair)?;
                Ok(AuthState::Authenticated)
            }
            Err(AppError::TokenRevoked(reason)) => {
                inner.demote(&reason)?;
                Ok(AuthState::Unauthenticated)
            }
            Err(e) => Err(e),
        }
    }

    /// Access token válido para chamar a API do Box
    ///
    /// Renova antes se o vencimento conhecido estiver a menos de 60s.
    ///
    /// # Erros
    /// - `TokenRevoked`: sem tokens, ou refresh rejeitado (estado volta a Unauthenticated)
    pub async fn access_token(&self) -> AppResult<String> {
        let mut inner = self.inner.lock().await;

        let record = inner.store.record().clone();
        let (access_token, refresh_token) = match (record.access_token, record.refresh_token) {
            (Some(a), Some(r)) => (a, r),
            _ => return Err(AppError::TokenRevoked("not authorized".to_string())),
        };

        let needs_refresh = inner
            .expires_at
            .map(|at| at <= Utc::now() + Duration::seconds(REFRESH_MARGIN_SECS))
            .unwrap_or(false);

        if !needs_refresh {
            return Ok(access_token);
        }

        log_info("🔄 [Auth] Access token perto de vencer; renovando");

        match self.oauth_client.refresh(&refresh_token).await {
            Ok(pair) => {
                inner.apply(pair)?;
                inner
                    .store
                    .record()
                    .access_token
                    .clone()
                    .ok_or_else(|| AppError::Internal("access token missing after refresh".to_string()))
            }
            Err(AppError::TokenRevoked(reason)) => {
                inner.demote(&reason)?;
                Err(AppError::TokenRevoked(reason))
            }
            Err(e) => Err(e),
        }
    }

    #[cfg(test)]
    pub(crate) async fn set_expires_at(&self, at: Option<DateTime<Utc>>) {
        self.inner.lock().await.expires_at = at;
    }
}
