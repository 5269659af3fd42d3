// Biblioteca do servidor de upload para o Box
// Expõe módulos para uso em testes e no binário

pub mod auth;
pub mod config;
pub mod handlers;
pub mod services;
pub mod utils;
pub mod views;

use auth::AuthManager;
use services::UploadService;

// AppState é construído uma vez em main e compartilhado via Arc
pub struct AppState {
    pub settings: config::Settings,
    pub auth: AuthManager,
    pub uploads: UploadService,
}

impl AppState {
    pub fn new(settings: config::Settings, auth: AuthManager, box_client: box_api::BoxClient) -> Self {
        let uploads = UploadService::new(box_client, settings.upload.clone());
        Self {
            settings,
            auth,
            uploads,
        }
    }
}
