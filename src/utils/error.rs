use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    /// Arquivo de credenciais ausente (fatal na inicialização)
    #[error("Configuration file not found: {0}")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provedor recusou a autorização ou a troca do código
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Callback sem o parâmetro `code`
    #[error("Malformed OAuth callback: {0}")]
    CallbackMalformed(String),

    /// Refresh token rejeitado; é preciso autorizar de novo
    #[error("Refresh token revoked: {0}")]
    TokenRevoked(String),

    #[error("No file supplied")]
    NoFileSupplied,

    /// Corpo do upload maior que `upload.max_body_bytes`
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    /// Multipart ilegível
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Box API error: {0}")]
    RemoteApi(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<box_api::BoxApiError> for AppError {
    fn from(err: box_api::BoxApiError) -> Self {
        AppError::RemoteApi(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::InvalidUpload(err.body_text())
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConfigurationMissing(_) | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            AppError::CallbackMalformed(_) => StatusCode::BAD_REQUEST,
            AppError::TokenRevoked(_) => StatusCode::UNAUTHORIZED,
            AppError::NoFileSupplied | AppError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::RemoteApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Io(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, views::render_error_page(status, &self.to_string())).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        assert_eq!(AppError::NoFileSupplied.to_string(), "No file supplied");
        assert_eq!(
            AppError::ConfigurationMissing("env.ini".to_string()).to_string(),
            "Configuration file not found: env.ini"
        );
        assert_eq!(
            AppError::CallbackMalformed("missing code".to_string()).to_string(),
            "Malformed OAuth callback: missing code"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::RemoteApi("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::AuthorizationDenied("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::CallbackMalformed("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::TokenRevoked("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::PayloadTooLarge("x".into()).status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(AppError::InvalidUpload("x".into()).status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_box_api_error_becomes_remote_api() {
        let err: AppError = box_api::BoxApiError::Api {
            status: 403,
            message: "access_denied_insufficient_permissions".to_string(),
        }
        .into();

        assert!(matches!(err, AppError::RemoteApi(_)));
        assert!(err.to_string().contains("status 403"));
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = AppError::RemoteApi("quota".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
