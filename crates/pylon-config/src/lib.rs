//! Pylon chat widget configuration.
//!
//! Provides the immutable [`ChatConfig`] / [`ChatUser`] / [`Session`]
//! values, TOML loading for hosts that keep their settings on disk, and
//! validation of everything that ends up interpolated into the widget's
//! HTML shell.
//!
//! # Quick Start
//!
//! ```rust
//! use pylon_config::{ChatConfig, ChatUser, Session};
//!
//! let config = ChatConfig::builder("my-app-id").primary_color("#5f3dc4").build();
//! let session = Session::new(config, Some(ChatUser::new("ada@example.com", "Ada")));
//! assert!(pylon_config::validate(session.config()).is_ok());
//! ```

pub mod colors;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    default_script_url, ChatConfig, ChatConfigBuilder, ChatSettings, ChatUser, Session,
    DEFAULT_WIDGET_BASE_URL,
};
pub use toml_loader::{load_from_path, parse_session};
pub use validation::{validate, validate_user};

/// Serialize a session's chat settings to pretty JSON for diagnostics.
pub fn settings_to_json(session: &Session) -> String {
    serde_json::to_string_pretty(&session.chat_settings())
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize settings: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_to_json_contains_app_id() {
        let session = Session::new(ChatConfig::new("abc"), None);
        let json = settings_to_json(&session);
        assert!(json.contains("\"app_id\": \"abc\""));
        assert!(!json.contains("email"));
    }
}
