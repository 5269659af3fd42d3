//! Operações de pasta

use crate::client::BoxClient;
use crate::error::Result;
use crate::types::Folder;
use serde_json::json;

impl BoxClient {
    /// Cria uma subpasta `name` dentro da pasta `parent_id`
    ///
    /// O Box responde 409 (`item_name_in_use`) quando já existe um item com o
    /// mesmo nome; o erro é devolvido como está, sem nova tentativa.
    pub async fn create_folder(&self, access_token: &str, parent_id: &str, name: &str) -> Result<Folder> {
        let url = self.api_url("/folders");
        let body = json!({
            "name": name,
            "parent": { "id": parent_id }
        });

        tracing::debug!("POST {} (parent: {}, name: {})", url, parent_id, name);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        let folder: Folder = response.json().await?;

        Ok(folder)
    }
}
