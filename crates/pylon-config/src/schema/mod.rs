//! Configuration and identity types.

mod chat;
mod session;
mod user;

pub use chat::{default_script_url, ChatConfig, ChatConfigBuilder, DEFAULT_WIDGET_BASE_URL};
pub use session::{ChatSettings, Session};
pub use user::ChatUser;

#[cfg(test)]
mod tests {
    use super::*;
    use pylon_common::WidgetError;

    #[test]
    fn builder_defaults() {
        let config = ChatConfig::new("abc");
        assert_eq!(config.app_id, "abc");
        assert!(config.enable_logging);
        assert!(!config.enable_csp);
        assert!(!config.debug_mode);
        assert_eq!(config.primary_color, None);
        assert_eq!(config.widget_base_url, "https://widget.usepylon.com");
        assert_eq!(
            config.widget_script_url,
            "https://widget.usepylon.com/widget/abc"
        );
    }

    #[test]
    fn blank_urls_fall_back_to_defaults() {
        let config = ChatConfig::builder("abc")
            .widget_base_url("  ")
            .widget_script_url("")
            .build();
        assert_eq!(config.widget_base_url, DEFAULT_WIDGET_BASE_URL);
        assert_eq!(config.widget_script_url, default_script_url("abc"));
    }

    #[test]
    fn builder_overrides() {
        let config = ChatConfig::builder("abc")
            .primary_color("#5f3dc4")
            .debug_mode(true)
            .enable_csp(true)
            .enable_logging(false)
            .widget_script_url("https://cdn.example.com/pylon.js")
            .build();
        assert_eq!(config.primary_color.as_deref(), Some("#5f3dc4"));
        assert!(config.debug_mode);
        assert!(config.enable_csp);
        assert!(!config.enable_logging);
        assert_eq!(config.widget_script_url, "https://cdn.example.com/pylon.js");
    }

    #[test]
    fn rebuild_keeps_untouched_fields() {
        let original = ChatConfig::builder("abc").primary_color("#000").build();
        let updated = original.rebuild(|b| b.debug_mode = true);
        assert!(updated.debug_mode);
        assert_eq!(updated.primary_color.as_deref(), Some("#000"));
        assert_eq!(updated.app_id, "abc");
        assert!(!original.debug_mode);
    }

    #[test]
    fn session_email_hash_requires_user() {
        let session = Session::new(ChatConfig::new("abc"), None);
        let err = session.with_email_hash(Some("h".into())).unwrap_err();
        assert!(matches!(err, WidgetError::MissingUser));
    }

    #[test]
    fn session_email_hash_replaces_user_value() {
        let user = ChatUser::new("a@b.co", "Ada").with_account_id("acct");
        let session = Session::new(ChatConfig::new("abc"), Some(user));
        let updated = session.with_email_hash(Some("deadbeef".into())).unwrap();

        let u = updated.user().unwrap();
        assert_eq!(u.email_hash.as_deref(), Some("deadbeef"));
        assert_eq!(u.account_id.as_deref(), Some("acct"));
        assert_eq!(session.user().unwrap().email_hash, None);

        let cleared = updated.with_email_hash(None).unwrap();
        assert_eq!(cleared.user().unwrap().email_hash, None);
    }

    #[test]
    fn chat_settings_omit_absent_fields() {
        let session = Session::new(ChatConfig::new("abc"), None);
        let json = serde_json::to_value(session.chat_settings()).unwrap();
        assert_eq!(json, serde_json::json!({ "app_id": "abc" }));
    }

    #[test]
    fn chat_settings_include_user_fields() {
        let config = ChatConfig::builder("abc").primary_color("red").build();
        let user = ChatUser::new("a@b.co", "O'Brien")
            .with_avatar_url("https://img/a.png")
            .with_email_hash("h")
            .with_account_id("1")
            .with_account_external_id("ext-1");
        let session = Session::new(config, Some(user));
        let json = serde_json::to_value(session.chat_settings()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "app_id": "abc",
                "primary_color": "red",
                "email": "a@b.co",
                "name": "O'Brien",
                "avatar_url": "https://img/a.png",
                "email_hash": "h",
                "account_id": "1",
                "account_external_id": "ext-1",
            })
        );
    }
}
