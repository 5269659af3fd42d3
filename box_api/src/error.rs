//! Tipos de erro para o crate box_api

use thiserror::Error;

/// Erros do cliente Box
#[derive(Debug, Error)]
pub enum BoxApiError {
    /// Erro de requisição HTTP (rede, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Resposta não-2xx da API do Box
    #[error("Box API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Token rejeitado (401)
    #[error("Box rejected the access token: {0}")]
    Unauthorized(String),

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Erro lendo o arquivo local a ser enviado
    #[error("Failed to read local file: {0}")]
    Io(#[from] std::io::Error),

    /// Resposta 2xx mas sem o conteúdo esperado
    #[error("Unexpected Box API response: {0}")]
    UnexpectedResponse(String),

    /// Erro de configuração do cliente
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BoxApiError {
    /// Status HTTP devolvido pelo Box, quando houver
    pub fn status(&self) -> Option<u16> {
        match self {
            BoxApiError::Api { status, .. } => Some(*status),
            BoxApiError::Unauthorized(_) => Some(401),
            BoxApiError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, BoxApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = BoxApiError::Api {
            status: 409,
            message: "Item with the same name already exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Box API error (status 409): Item with the same name already exists"
        );
        assert_eq!(err.status(), Some(409));

        let unauthorized = BoxApiError::Unauthorized("expired".to_string());
        assert_eq!(unauthorized.status(), Some(401));
        assert!(unauthorized.to_string().contains("expired"));
    }

    #[test]
    fn test_io_error_from() {
        use std::io::{Error, ErrorKind};
        let err = BoxApiError::from(Error::new(ErrorKind::NotFound, "missing"));
        assert!(err.to_string().contains("Failed to read local file"));
        assert_eq!(err.status(), None);
    }
}
