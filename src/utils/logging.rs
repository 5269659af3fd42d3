use tracing::{debug, error, info, warn};

use super::truncate_safe;

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!("Request processed: {} - Status: {} - Duration: {}ms",
          endpoint, status, duration_ms);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(host: &str, port: u16) {
    info!("🚀 Box upload server starting on {}:{}", host, port);
}

pub fn log_server_ready(host: &str, port: u16) {
    info!("✅ Server ready and listening on http://{}:{}", host, port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_tokens_persisted(path: &str, access_token: &str) {
    info!("💾 Tokens persisted to {} (access: {}...)", path, truncate_safe(access_token, 8));
}

pub fn log_folder_created(name: &str, folder_id: &str) {
    info!("📁 Folder \"{}\" created with folder ID {}", name, folder_id);
}

pub fn log_file_uploaded(name: &str, file_id: &str) {
    info!("📤 File \"{}\" uploaded to Box with file ID {}", name, file_id);
}

pub fn log_shared_link_created(link: &str, password_protected: bool) {
    if password_protected {
        info!("🔗 Shared link for the file with password protection: {}", link);
    } else {
        info!("🔗 Shared link for the file: {}", link);
    }
}

pub fn log_box_api_error(operation: &str, status: Option<u16>, error: &str) {
    error!("Box API error: {} - Status: {:?} - Error: {}", operation, status, error);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
