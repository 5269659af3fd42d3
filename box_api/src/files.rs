//! Operações de arquivo: upload e link compartilhado

use crate::client::BoxClient;
use crate::error::{BoxApiError, Result};
use crate::types::{FileEntry, SharedLinkAccess, SharedLinkResponse, UploadResponse};
use reqwest::multipart::{Form, Part};
use serde_json::json;
use std::path::Path;

impl BoxClient {
    /// Envia o arquivo local `path` para a pasta `folder_id`
    ///
    /// O nome do arquivo no Box é o nome do arquivo local. A parte
    /// `attributes` precisa vir antes da parte `file` no multipart.
    pub async fn upload_file(
        &self,
        access_token: &str,
        folder_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<FileEntry> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BoxApiError::ConfigError(format!("Invalid upload path: {}", path.display())))?
            .to_string();

        // Envia direto do disco; o arquivo não é carregado inteiro na memória
        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();

        let attributes = json!({
            "name": file_name,
            "parent": { "id": folder_id }
        });

        let form = Form::new()
            .text("attributes", attributes.to_string())
            .part("file", Part::stream_with_length(file, size).file_name(file_name.clone()));

        let url = self.upload_url("/files/content");
        tracing::debug!("POST {} ({} bytes, folder: {})", url, size, folder_id);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token)
            .multipart(form)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        let upload: UploadResponse = response.json().await?;

        upload
            .entries
            .into_iter()
            .next()
            .ok_or_else(|| BoxApiError::UnexpectedResponse("upload response has no entries".to_string()))
    }

    /// Cria (ou substitui) o link compartilhado de um arquivo
    ///
    /// Retorna a URL do link. `password` só é aceito pelo Box com acesso
    /// `open` ou `company`.
    pub async fn create_shared_link(
        &self,
        access_token: &str,
        file_id: &str,
        access: SharedLinkAccess,
        password: Option<&str>,
    ) -> Result<String> {
        let mut shared_link = json!({ "access": access.as_str() });
        if let Some(password) = password {
            shared_link["password"] = json!(password);
        }
        let body = json!({ "shared_link": shared_link });

        let url = self.api_url(&format!("/files/{}", file_id));
        tracing::debug!("PUT {}?fields=shared_link (access: {})", url, access.as_str());

        let response = self
            .http_client
            .put(&url)
            .query(&[("fields", "shared_link")])
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        let parsed: SharedLinkResponse = response.json().await?;

        parsed
            .shared_link
            .map(|link| link.url)
            .ok_or_else(|| BoxApiError::UnexpectedResponse(format!("file {} has no shared_link", file_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> BoxClient {
        BoxClient::with_base_urls(server.base_url(), server.base_url(), 5).unwrap()
    }

    #[tokio::test]
    async fn test_upload_file_sends_attributes_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"hello").unwrap();

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/files/content")
                    .header("authorization", "Bearer token-abc")
                    .body_contains("name=\"attributes\"")
                    .body_contains("\"parent\":{\"id\":\"555\"}")
                    .body_contains("filename=\"report.pdf\"")
                    .body_contains("hello");
                then.status(201)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "total_count": 1,
                        "entries": [{"type": "file", "id": "9001", "name": "report.pdf"}]
                    }));
            })
            .await;

        let file = client_for(&server)
            .upload_file("token-abc", "555", &path)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(file.id, "9001");
        assert_eq!(file.name, "report.pdf");
    }

    #[tokio::test]
    async fn test_upload_file_missing_local_file() {
        let server = MockServer::start_async().await;
        let err = client_for(&server)
            .upload_file("token", "555", "/definitely/not/here.bin")
            .await
            .unwrap_err();

        assert!(matches!(err, BoxApiError::Io(_)));
    }

    #[tokio::test]
    async fn test_upload_file_empty_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"x").unwrap();

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/files/content");
                then.status(201)
                    .header("content-type", "application/json")
                    .json_body(json!({"total_count": 0, "entries": []}));
            })
            .await;

        let err = client_for(&server).upload_file("token", "1", &path).await.unwrap_err();
        assert!(matches!(err, BoxApiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_create_shared_link_with_password() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/files/9001")
                    .query_param("fields", "shared_link")
                    .json_body(json!({"shared_link": {"access": "open", "password": "Xy7kP2mQ"}}));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "type": "file",
                        "id": "9001",
                        "shared_link": {"url": "https://app.box.com/s/abc123", "access": "open"}
                    }));
            })
            .await;

        let url = client_for(&server)
            .create_shared_link("token", "9001", SharedLinkAccess::Open, Some("Xy7kP2mQ"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(url, "https://app.box.com/s/abc123");
    }

    #[tokio::test]
    async fn test_create_shared_link_without_password() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/files/42")
                    .json_body(json!({"shared_link": {"access": "open"}}));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"id": "42", "shared_link": {"url": "https://app.box.com/s/open42"}}));
            })
            .await;

        let url = client_for(&server)
            .create_shared_link("token", "42", SharedLinkAccess::Open, None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(url, "https://app.box.com/s/open42");
    }

    #[tokio::test]
    async fn test_create_shared_link_missing_link() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/files/42");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"id": "42", "shared_link": null}));
            })
            .await;

        let err = client_for(&server)
            .create_shared_link("token", "42", SharedLinkAccess::Open, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BoxApiError::UnexpectedResponse(_)));
    }
}
