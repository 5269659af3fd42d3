//! OAuth2 Configuration
//!
//! Junta as credenciais do app (vindas do arquivo INI) com os endpoints do
//! Box (vindos das settings).

use oauth2::basic::BasicClient;
use oauth2::{AuthType, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use crate::auth::credentials::CredentialRecord;
use crate::config::settings::OAuthSettings;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct OAuth2Config {
    /// Client ID do app Box
    pub client_id: String,

    /// Client Secret do app Box
    pub client_secret: String,

    /// URL de callback registrada no app Box
    pub redirect_uri: String,

    pub authorize_url: String,

    pub token_url: String,
}

impl OAuth2Config {
    pub fn new(record: &CredentialRecord, settings: &OAuthSettings) -> Self {
        Self {
            client_id: record.client_id.clone(),
            client_secret: record.client_secret.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            authorize_url: settings.authorize_url.clone(),
            token_url: settings.token_url.clone(),
        }
    }

    /// Monta o cliente OAuth2
    ///
    /// O Box espera `client_id`/`client_secret` no corpo do formulário, não
    /// em Basic auth.
    pub fn build_client(&self) -> AppResult<BasicClient> {
        let auth_url = AuthUrl::new(self.authorize_url.clone())
            .map_err(|e| AppError::Configuration(format!("invalid authorize URL: {}", e)))?;
        let token_url = TokenUrl::new(self.token_url.clone())
            .map_err(|e| AppError::Configuration(format!("invalid token URL: {}", e)))?;
        let redirect_url = RedirectUrl::new(self.redirect_uri.clone())
            .map_err(|e| AppError::Configuration(format!("invalid redirect URI: {}", e)))?;

        Ok(BasicClient::new(
            ClientId::new(self.client_id.clone()),
            Some(ClientSecret::new(self.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody)
        .set_redirect_uri(redirect_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuth2Config {
        OAuth2Config {
            client_id: "abc".to_string(),
            client_secret: "xyz".to_string(),
            redirect_uri: "http://localhost:5000/callback".to_string(),
            authorize_url: "https://account.box.com/api/oauth2/authorize".to_string(),
            token_url: "https://api.box.com/oauth2/token".to_string(),
        }
    }

    #[test]
    fn test_build_client() {
        assert!(config().build_client().is_ok());
    }

    #[test]
    fn test_build_client_invalid_urls() {
        let mut cfg = config();
        cfg.token_url = "not-a-url".to_string();

        match cfg.build_client() {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("token URL")),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
