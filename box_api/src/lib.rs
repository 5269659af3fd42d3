//! Cliente mínimo da API do Box
//!
//! Cobre apenas as três operações usadas pelo fluxo de upload:
//!
//! - Criar subpasta dentro de uma pasta existente (`POST /folders`)
//! - Enviar um arquivo para uma pasta (`POST /files/content`, API de upload)
//! - Criar link compartilhado para um arquivo (`PUT /files/{id}`)
//!
//! O token de acesso é passado em cada chamada: quem renova e persiste tokens
//! é o gerenciador de autorização da aplicação, não este crate.
//!
//! # Exemplo
//!
//! ```rust,ignore
//! use box_api::client::{DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_BASE_URL};
//! use box_api::{BoxClient, SharedLinkAccess};
//!
//! let client = BoxClient::with_base_urls(DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_BASE_URL, 60)?;
//! let folder = client.create_folder(&token, "0", "Xy7kP2mQ").await?;
//! let file = client.upload_file(&token, &folder.id, "tmp/report.pdf").await?;
//! let url = client
//!     .create_shared_link(&token, &file.id, SharedLinkAccess::Open, Some("Xy7kP2mQ"))
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod files;
pub mod folders;
pub mod types;

pub use client::BoxClient;
pub use error::{BoxApiError, Result};
pub use types::{FileEntry, Folder, SharedLinkAccess};
