//! Cliente HTTP para a API do Box

use crate::error::{BoxApiError, Result};
use reqwest::{Client as HttpClient, Response};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.box.com/2.0";
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://upload.box.com/api/2.0";

/// Cliente para interagir com a API do Box
///
/// O Box separa os endpoints de metadados (`api.box.com`) do endpoint de
/// upload (`upload.box.com`), por isso guardamos duas URLs base.
#[derive(Clone)]
pub struct BoxClient {
    pub(crate) http_client: HttpClient,
    api_base_url: String,
    upload_base_url: String,
}

impl BoxClient {
    /// Cria um cliente com URLs base e timeout customizados
    ///
    /// Em produção as URLs são [`DEFAULT_API_BASE_URL`] e
    /// [`DEFAULT_UPLOAD_BASE_URL`]. Connect timeout fixo em 10s.
    pub fn with_base_urls(
        api_base_url: impl Into<String>,
        upload_base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| BoxApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            upload_base_url: upload_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url, endpoint)
    }

    pub(crate) fn upload_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.upload_base_url, endpoint)
    }

    /// Processa a resposta HTTP e trata erros
    pub(crate) async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!("Box API error ({}): {}", status_code, error_body);

        let message = extract_error_message(&error_body);

        if status_code == 401 {
            return Err(BoxApiError::Unauthorized(message));
        }

        Err(BoxApiError::Api {
            status: status_code,
            message,
        })
    }
}

/// Extrai a mensagem de erro do corpo JSON do Box (`message`, depois `code`)
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json
            .get("message")
            .or_else(|| json.get("code"))
            .or_else(|| json.get("error_description"))
            .and_then(|v| v.as_str())
        {
            return message.to_string();
        }
    }

    if body.trim().is_empty() {
        "empty response body".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_urls() {
        let client = BoxClient::with_base_urls(DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_BASE_URL, 60).unwrap();
        assert_eq!(client.api_url("/folders"), "https://api.box.com/2.0/folders");
        assert_eq!(client.upload_url("/files/content"), "https://upload.box.com/api/2.0/files/content");
    }

    #[test]
    fn test_base_urls_trailing_slash_trimmed() {
        let client = BoxClient::with_base_urls("http://localhost:1234/", "http://localhost:1235//", 5).unwrap();
        assert_eq!(client.api_url("/folders"), "http://localhost:1234/folders");
        assert_eq!(client.upload_url("/files/content"), "http://localhost:1235/files/content");
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"type":"error","status":409,"code":"item_name_in_use","message":"Item with the same name already exists"}"#;
        assert_eq!(extract_error_message(body), "Item with the same name already exists");

        let only_code = r#"{"code":"access_denied_insufficient_permissions"}"#;
        assert_eq!(extract_error_message(only_code), "access_denied_insufficient_permissions");

        assert_eq!(extract_error_message("plain failure"), "plain failure");
        assert_eq!(extract_error_message(""), "empty response body");
    }
}
