//! # Box OAuth2 Authentication Module
//!
//! Fluxo authorization-code do Box e ciclo de vida dos tokens.
//!
//! ## Estrutura:
//! - `credentials.rs`: Arquivo INI com client_id/secret, pasta alvo e tokens
//! - `config.rs`: Configurações OAuth2
//! - `client.rs`: Cliente HTTP OAuth2
//! - `token_manager.rs`: Estado de autorização e renovação de tokens
//! - `handlers.rs`: Handlers HTTP (`/`, `/callback`)

pub mod config;
pub mod client;
pub mod credentials;
pub mod token_manager;
pub mod handlers;

pub use config::OAuth2Config;
pub use client::{OAuth2Client, TokenPair};
pub use credentials::{CredentialRecord, CredentialStore};
pub use token_manager::{AuthManager, AuthState};
pub use handlers::{handle_oauth_callback, start_oauth_flow, OAuthCallbackParams};
