//! Modelos das respostas da API do Box usados pelo cliente

use serde::{Deserialize, Serialize};

/// Pasta do Box (apenas os campos que usamos)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

/// Arquivo do Box (apenas os campos que usamos)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
}

/// Resposta de `POST /files/content`
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub entries: Vec<FileEntry>,
}

/// Nível de acesso de um link compartilhado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharedLinkAccess {
    /// Qualquer pessoa com o link
    Open,
}

impl SharedLinkAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharedLinkAccess::Open => "open",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SharedLink {
    pub url: String,
}

/// Resposta de `PUT /files/{id}?fields=shared_link`
#[derive(Debug, Deserialize)]
pub(crate) struct SharedLinkResponse {
    pub shared_link: Option<SharedLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_link_access_serialization() {
        assert_eq!(serde_json::to_string(&SharedLinkAccess::Open).unwrap(), "\"open\"");
        assert_eq!(SharedLinkAccess::Open.as_str(), "open");
    }

    #[test]
    fn test_upload_response_parsing() {
        let body = r#"{"total_count":1,"entries":[{"type":"file","id":"12345","name":"report.pdf","size":5}]}"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].id, "12345");
        assert_eq!(parsed.entries[0].name, "report.pdf");
    }
}
