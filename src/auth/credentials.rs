//! Credential Store
//!
//! Lê e regrava o arquivo INI com as credenciais do app Box (seção `[box]`):
//! `client_id`, `client_secret`, `folder_id` e, depois da primeira
//! autorização, `access_token` e `refresh_token`.
//!
//! O arquivo é ao mesmo tempo configuração de entrada e destino da
//! persistência de tokens: é lido uma vez na inicialização e regravado por
//! inteiro a cada mudança de token. Não há lock de arquivo; quem serializa as
//! escritas dentro do processo é o `AuthManager`.

use std::fs;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, LineSeparator, ParseOption, WriteOption};

use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

pub const BOX_SECTION: &str = "box";

const KEY_CLIENT_ID: &str = "client_id";
const KEY_CLIENT_SECRET: &str = "client_secret";
const KEY_FOLDER_ID: &str = "folder_id";
const KEY_ACCESS_TOKEN: &str = "access_token";
const KEY_REFRESH_TOKEN: &str = "refresh_token";

/// Conteúdo persistido da seção `[box]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub client_id: String,
    pub client_secret: String,
    /// Pasta do Box onde as subpastas aleatórias são criadas
    pub folder_id: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl CredentialRecord {
    /// Ambos os tokens presentes
    pub fn has_tokens(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }
}

/// Arquivo de credenciais carregado em memória
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    ini: Ini,
    record: CredentialRecord,
}

impl CredentialStore {
    /// Carrega o arquivo de credenciais
    ///
    /// # Erros
    /// - `ConfigurationMissing`: o arquivo não existe
    /// - `Configuration`: arquivo ilegível ou seção `[box]` incompleta
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(AppError::ConfigurationMissing(path.display().to_string()));
        }

        let ini = read_ini(&path)?;
        let record = record_from_ini(&ini)?;

        Ok(Self { path, ini, record })
    }

    pub fn record(&self) -> &CredentialRecord {
        &self.record
    }

    /// Grava um novo par de tokens e regrava o arquivo inteiro
    pub fn persist_tokens(&mut self, access_token: &str, refresh_token: &str) -> AppResult<()> {
        self.ini
            .with_section(Some(BOX_SECTION))
            .set(KEY_ACCESS_TOKEN, access_token)
            .set(KEY_REFRESH_TOKEN, refresh_token);

        self.record.access_token = Some(access_token.to_string());
        self.record.refresh_token = Some(refresh_token.to_string());

        write_ini(&self.path, &self.ini)?;
        log_tokens_persisted(&self.path.display().to_string(), access_token);

        Ok(())
    }

    /// Remove os dois tokens e regrava o arquivo (refresh token revogado)
    pub fn clear_tokens(&mut self) -> AppResult<()> {
        if let Some(section) = self.ini.section_mut(Some(BOX_SECTION)) {
            section.remove(KEY_ACCESS_TOKEN);
            section.remove(KEY_REFRESH_TOKEN);
        }

        self.record.access_token = None;
        self.record.refresh_token = None;

        write_ini(&self.path, &self.ini)?;
        log_warning(&format!("🗑️ [Credentials] Tokens removidos de {}", self.path.display()));

        Ok(())
    }
}

/// Valores são lidos crus: sem escapes (`\t`, `\;`) nem aspas, então
/// segredos com `\`, `;` ou `#` voltam ao arquivo exatamente como estavam
fn read_ini(path: &Path) -> AppResult<Ini> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
    };

    Ini::load_from_file_opt(path, options)
        .map_err(|e| AppError::Configuration(format!("failed to read {}: {}", path.display(), e)))
}

fn record_from_ini(ini: &Ini) -> AppResult<CredentialRecord> {
    let section = ini
        .section(Some(BOX_SECTION))
        .ok_or_else(|| AppError::Configuration(format!("section [{}] not found", BOX_SECTION)))?;

    let required = |key: &str| -> AppResult<String> {
        section
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Configuration(format!("[{}] {} is required", BOX_SECTION, key)))
    };

    let optional = |key: &str| -> Option<String> {
        section
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mut access_token = optional(KEY_ACCESS_TOKEN);
    let mut refresh_token = optional(KEY_REFRESH_TOKEN);

    // Os dois tokens existem juntos ou nenhum existe
    if access_token.is_some() != refresh_token.is_some() {
        log_warning("⚠️ [Credentials] Apenas um dos tokens está presente; ambos serão ignorados");
        access_token = None;
        refresh_token = None;
    }

    Ok(CredentialRecord {
        client_id: required(KEY_CLIENT_ID)?,
        client_secret: required(KEY_CLIENT_SECRET)?,
        folder_id: required(KEY_FOLDER_ID)?,
        access_token,
        refresh_token,
    })
}

/// Regrava todas as seções via arquivo temporário + rename
///
/// O temporário recebe as permissões do arquivo original antes do rename
/// (o arquivo guarda client_secret e refresh token).
fn write_ini(path: &Path, ini: &Ini) -> AppResult<()> {
    let options = WriteOption {
        escape_policy: EscapePolicy::Nothing,
        line_separator: LineSeparator::CR,
        kv_separator: " = ",
    };

    let mut contents = Vec::new();
    ini.write_to_opt(&mut contents, options)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, contents)?;
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(&tmp_path, metadata.permissions())?;
    }
    fs::rename(&tmp_path, path)?;

    Ok(())
}
