//! Read a `[chat]` + optional `[user]` TOML document into a [`Session`].

use crate::schema::{ChatConfig, ChatUser, Session};
use crate::validation;
use pylon_common::ConfigError;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// On-disk shape. Every chat setting except `app_id` is optional and falls
/// back to the builder defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionFile {
    pub chat: ChatSection,
    #[serde(default)]
    pub user: Option<ChatUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSection {
    pub app_id: String,
    pub enable_logging: Option<bool>,
    pub enable_csp: Option<bool>,
    pub primary_color: Option<String>,
    pub debug_mode: Option<bool>,
    pub widget_base_url: Option<String>,
    pub widget_script_url: Option<String>,
}

impl SessionFile {
    /// Apply builder defaults and validate.
    pub fn into_session(self) -> Result<Session, ConfigError> {
        let chat = self.chat;
        let mut builder = ChatConfig::builder(chat.app_id);
        if let Some(v) = chat.enable_logging {
            builder = builder.enable_logging(v);
        }
        if let Some(v) = chat.enable_csp {
            builder = builder.enable_csp(v);
        }
        if let Some(v) = chat.primary_color {
            builder = builder.primary_color(v);
        }
        if let Some(v) = chat.debug_mode {
            builder = builder.debug_mode(v);
        }
        if let Some(v) = chat.widget_base_url {
            builder = builder.widget_base_url(v);
        }
        if let Some(v) = chat.widget_script_url {
            builder = builder.widget_script_url(v);
        }
        let config = builder.build();

        validation::validate(&config)?;
        if let Some(user) = &self.user {
            validation::validate_user(user)?;
        }
        Ok(Session::new(config, self.user))
    }
}

/// Parse and validate a session from TOML text.
pub fn parse_session(content: &str) -> Result<Session, ConfigError> {
    let file: SessionFile = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
    file.into_session()
}

/// Load a session from a TOML file.
pub fn load_from_path(path: &Path) -> Result<Session, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let session = parse_session(&content)?;
    info!(app_id = %session.config().app_id, "loaded session from {}", path.display());
    Ok(session)
}
