//! OAuth2 HTTP Client
//!
//! Fina camada sobre o crate `oauth2` para os três passos que usamos:
//! URL de consentimento, troca de authorization code e refresh.

use chrono::{DateTime, Duration, Utc};
use oauth2::basic::{BasicClient, BasicErrorResponse, BasicTokenResponse};
use oauth2::reqwest::async_http_client;
use oauth2::{AuthorizationCode, CsrfToken, RefreshToken, RequestTokenError, TokenResponse};
use url::Url;

use crate::utils::logging::*;
use crate::utils::{truncate_safe, AppError, AppResult};
use super::OAuth2Config;

type TokenError = RequestTokenError<oauth2::reqwest::Error<reqwest::Error>, BasicErrorResponse>;

/// Par de tokens devolvido pelo endpoint de token
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenPair {
    fn from_response(response: &BasicTokenResponse) -> Self {
        let expires_at = response
            .expires_in()
            .and_then(|d| Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);

        Self {
            access_token: response.access_token().secret().clone(),
            refresh_token: response.refresh_token().map(|t| t.secret().clone()),
            expires_at,
        }
    }
}

/// Cliente OAuth2 para o Box
pub struct OAuth2Client {
    client: BasicClient,
}

impl OAuth2Client {
    pub fn new(config: &OAuth2Config) -> AppResult<Self> {
        Ok(Self {
            client: config.build_client()?,
        })
    }

    /// Gera a URL de consentimento com um token CSRF novo
    pub fn authorization_url(&self) -> (Url, CsrfToken) {
        self.client.authorize_url(CsrfToken::new_random).url()
    }

    /// Trocar authorization code por access/refresh token
    ///
    /// # Retorno
    /// - `Ok(TokenPair)`: Tokens obtidos
    /// - `Err(AuthorizationDenied)`: O Box recusou o code
    /// - `Err(RemoteApi)`: Falha de rede ou resposta ilegível
    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenPair> {
        log_info(&format!("🔐 [OAuth2] Trocando authorization code por tokens (code: {}...)", truncate_safe(code, 6)));

        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| match e {
                RequestTokenError::ServerResponse(resp) => {
                    log_error(&format!("❌ [OAuth2] Troca de code recusada: {}", resp));
                    AppError::AuthorizationDenied(resp.to_string())
                }
                other => {
                    log_error(&format!("❌ [OAuth2] Falha na troca de code: {}", describe(&other)));
                    AppError::RemoteApi(format!("token exchange failed: {}", describe(&other)))
                }
            })?;

        let pair = TokenPair::from_response(&response);
        log_info(&format!("✅ [OAuth2] Access token obtido: {}...", truncate_safe(&pair.access_token, 8)));

        Ok(pair)
    }

    /// Renova o access token usando o refresh token
    ///
    /// # Retorno
    /// - `Err(TokenRevoked)`: O Box rejeitou o refresh token
    /// - `Err(RemoteApi)`: Falha de rede ou resposta ilegível
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        log_info("🔄 [OAuth2] Renovando access token...");

        let response = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| match e {
                RequestTokenError::ServerResponse(resp) => {
                    log_error(&format!("❌ [OAuth2] Refresh token rejeitado: {}", resp));
                    AppError::TokenRevoked(resp.to_string())
                }
                other => {
                    log_error(&format!("❌ [OAuth2] Falha no refresh: {}", describe(&other)));
                    AppError::RemoteApi(format!("token refresh failed: {}", describe(&other)))
                }
            })?;

        let pair = TokenPair::from_response(&response);
        log_info("✅ [OAuth2] Access token renovado");

        Ok(pair)
    }
}

fn describe(err: &TokenError) -> String {
    match err {
        RequestTokenError::ServerResponse(resp) => resp.to_string(),
        RequestTokenError::Request(e) => e.to_string(),
        RequestTokenError::Parse(e, body) => {
            format!("{} (body: {})", e, String::from_utf8_lossy(body))
        }
        RequestTokenError::Other(msg) => msg.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config_for(server: &MockServer) -> OAuth2Config {
        OAuth2Config {
            client_id: "abc".to_string(),
            client_secret: "xyz".to_string(),
            redirect_uri: "http://localhost:5000/callback".to_string(),
            authorize_url: server.url("/api/oauth2/authorize"),
            token_url: server.url("/oauth2/token"),
        }
    }

    #[test]
    fn test_authorization_url_contains_client_and_redirect() {
        let server = MockServer::start();
        let client = OAuth2Client::new(&config_for(&server)).unwrap();

        let (url, csrf) = client.authorization_url();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(query.contains(&("response_type".to_string(), "code".to_string())));
        assert!(query.contains(&("client_id".to_string(), "abc".to_string())));
        assert!(query.contains(&("redirect_uri".to_string(), "http://localhost:5000/callback".to_string())));
        assert!(query.contains(&("state".to_string(), csrf.secret().clone())));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth2/token")
                    .body_contains("grant_type=authorization_code")
                    .body_contains("code=CODE123")
                    .body_contains("client_id=abc")
                    .body_contains("client_secret=xyz");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "access_token": "AT-1",
                        "refresh_token": "RT-1",
                        "expires_in": 3600,
                        "token_type": "bearer"
                    }));
            })
            .await;

        let client = OAuth2Client::new(&config_for(&server)).unwrap();
        let pair = client.exchange_code("CODE123").await.unwrap();

        mock.assert_async().await;
        assert_eq!(pair.access_token, "AT-1");
        assert_eq!(pair.refresh_token.as_deref(), Some("RT-1"));
        assert!(pair.expires_at.unwrap() > Utc::now());
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(400)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "error": "invalid_grant",
                        "error_description": "Auth code doesn't exist or is invalid for the client"
                    }));
            })
            .await;

        let client = OAuth2Client::new(&config_for(&server)).unwrap();
        let err = client.exchange_code("BAD").await.unwrap_err();

        assert!(matches!(err, AppError::AuthorizationDenied(_)));
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth2/token")
                    .body_contains("grant_type=refresh_token")
                    .body_contains("refresh_token=RT-1");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "access_token": "AT-2",
                        "refresh_token": "RT-2",
                        "expires_in": 3600,
                        "token_type": "bearer"
                    }));
            })
            .await;

        let client = OAuth2Client::new(&config_for(&server)).unwrap();
        let pair = client.refresh("RT-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(pair.access_token, "AT-2");
        assert_eq!(pair.refresh_token.as_deref(), Some("RT-2"));
    }

    #[tokio::test]
    async fn test_refresh_revoked() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(400)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "error": "invalid_grant",
                        "error_description": "Refresh token has expired"
                    }));
            })
            .await;

        let client = OAuth2Client::new(&config_for(&server)).unwrap();
        let err = client.refresh("RT-old").await.unwrap_err();

        assert!(matches!(err, AppError::TokenRevoked(_)));
    }
}
