use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub credentials: CredentialsSettings,
    pub oauth: OAuthSettings,
    #[serde(rename = "box")]
    pub box_api: BoxSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CredentialsSettings {
    /// Arquivo INI com a seção [box] (client_id, client_secret, folder_id, tokens)
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OAuthSettings {
    /// Precisa bater exatamente com a URL registrada no app do Box
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BoxSettings {
    pub api_base_url: String,
    pub upload_base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadSettings {
    pub staging_dir: String,
    pub folder_name_length: usize,
    /// Protege o link compartilhado com o nome gerado da pasta
    pub password_protect_link: bool,
    pub max_body_bytes: usize,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Self::with_defaults(Config::builder())?
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("BOXDROP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        // Porta padrão de plataformas de container
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("credentials.path", "env.ini")?
            .set_default("oauth.redirect_uri", "http://localhost:5000/callback")?
            .set_default("oauth.authorize_url", "https://account.box.com/api/oauth2/authorize")?
            .set_default("oauth.token_url", "https://api.box.com/oauth2/token")?
            .set_default("box.api_base_url", box_api::client::DEFAULT_API_BASE_URL)?
            .set_default("box.upload_base_url", box_api::client::DEFAULT_UPLOAD_BASE_URL)?
            .set_default("box.timeout_seconds", 60)?
            .set_default("upload.staging_dir", "tmp")?
            .set_default("upload.folder_name_length", 8)?
            .set_default("upload.password_protect_link", true)?
            .set_default("upload.max_body_bytes", 256 * 1024 * 1024)
    }

    /// Apenas os valores padrão, sem arquivos nem variáveis de ambiente
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?.build()?.try_deserialize()
    }
}
