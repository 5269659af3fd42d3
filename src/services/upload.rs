//! Upload Workflow
//!
//! Recebe o arquivo do formulário, grava em staging, cria uma subpasta com
//! nome aleatório no Box, envia o arquivo para ela e gera o link
//! compartilhado. O diretório de staging da requisição é sempre removido
//! depois da tentativa de upload.
//!
//! Sem compensação: se o upload ou o link falharem depois da pasta criada, a
//! pasta fica no Box.

use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use box_api::{BoxClient, SharedLinkAccess};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::settings::UploadSettings;
use crate::services::password;
use crate::utils::logging::*;
use crate::utils::{sanitize_filename, AppError, AppResult};

/// Nome do campo de arquivo no formulário
pub const FILE_FIELD: &str = "file";

/// Arquivo já gravado em `{staging_dir}/{uuid}/{nome}`
#[derive(Debug)]
pub struct StagedFile {
    dir: PathBuf,
    path: PathBuf,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove o diretório da requisição
    pub async fn discard(self) {
        if let Err(e) = tokio::fs::remove_dir_all(&self.dir).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                log_warning(&format!(
                    "⚠️ [Upload] Falha ao remover staging {}: {}",
                    self.dir.display(),
                    e
                ));
            }
        }
    }
}

/// Resultado de um upload bem-sucedido
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub shared_link: String,
    pub folder_name: String,
    pub folder_id: String,
    pub file_id: String,
    pub file_name: String,
    pub password_protected: bool,
}

/// Serviço de upload para o Box
pub struct UploadService {
    box_client: BoxClient,
    settings: UploadSettings,
}

impl UploadService {
    pub fn new(box_client: BoxClient, settings: UploadSettings) -> Self {
        Self { box_client, settings }
    }

    pub fn staging_root(&self) -> &Path {
        Path::new(&self.settings.staging_dir)
    }

    /// Grava o primeiro campo `file` do multipart em staging, chunk a chunk
    ///
    /// Campo ausente ou sem nome de arquivo (o navegador envia `filename=""`
    /// quando nada foi escolhido) vira `NoFileSupplied`, sem nada gravado em
    /// disco. Corpo acima do limite vira `PayloadTooLarge`.
    pub async fn stage(&self, mut multipart: Multipart) -> AppResult<StagedFile> {
        while let Some(mut field) = multipart.next_field().await? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let file_name = match field.file_name() {
                Some(name) if !name.trim().is_empty() => sanitize_filename(name),
                _ => return Err(AppError::NoFileSupplied),
            };

            let dir = self.staging_root().join(Uuid::new_v4().to_string());
            let staged = StagedFile {
                path: dir.join(&file_name),
                dir,
            };

            if let Err(e) = write_field(&mut field, &staged).await {
                staged.discard().await;
                return Err(e);
            }

            return Ok(staged);
        }

        Err(AppError::NoFileSupplied)
    }

    /// Executa o fluxo remoto dentro da pasta `parent_folder_id`
    ///
    /// O staging é descartado ao final, com sucesso ou falha.
    pub async fn process(
        &self,
        access_token: &str,
        parent_folder_id: &str,
        staged: StagedFile,
    ) -> AppResult<UploadOutcome> {
        let result = self.send(access_token, parent_folder_id, staged.path()).await;
        staged.discard().await;
        result
    }

    async fn send(&self, access_token: &str, parent_folder_id: &str, staged: &Path) -> AppResult<UploadOutcome> {
        let folder_name = password::generate(self.settings.folder_name_length);

        let folder = self
            .box_client
            .create_folder(access_token, parent_folder_id, &folder_name)
            .await
            .map_err(|e| {
                log_box_api_error("create_folder", e.status(), &e.to_string());
                AppError::from(e)
            })?;
        log_folder_created(&folder.name, &folder.id);

        let entry = self
            .box_client
            .upload_file(access_token, &folder.id, staged)
            .await
            .map_err(|e| {
                log_box_api_error("upload_file", e.status(), &e.to_string());
                AppError::from(e)
            })?;
        log_file_uploaded(&entry.name, &entry.id);

        let password_protected = self.settings.password_protect_link;
        let link_password = password_protected.then_some(folder_name.as_str());

        let shared_link = self
            .box_client
            .create_shared_link(access_token, &entry.id, SharedLinkAccess::Open, link_password)
            .await
            .map_err(|e| {
                log_box_api_error("create_shared_link", e.status(), &e.to_string());
                AppError::from(e)
            })?;
        log_shared_link_created(&shared_link, password_protected);

        Ok(UploadOutcome {
            shared_link,
            folder_name,
            folder_id: folder.id,
            file_id: entry.id,
            file_name: entry.name,
            password_protected,
        })
    }
}

async fn write_field(field: &mut Field<'_>, staged: &StagedFile) -> AppResult<()> {
    tokio::fs::create_dir_all(&staged.dir).await?;
    let mut file = tokio::fs::File::create(&staged.path).await?;

    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(())
}
