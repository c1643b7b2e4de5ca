use pylon_config::{ChatConfig, ChatUser, Session};
use serde::Deserialize;

/// Props of the native RN view, as set from JS.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeViewProps {
    pub app_id: Option<String>,
    pub widget_base_url: Option<String>,
    pub widget_script_url: Option<String>,
    pub enable_logging: bool,
    pub debug_mode: bool,
    pub primary_color: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub user_avatar_url: Option<String>,
    pub user_email_hash: Option<String>,
    pub user_account_id: Option<String>,
    pub user_account_external_id: Option<String>,
}

impl Default for NativeViewProps {
    fn default() -> Self {
        Self {
            app_id: None,
            widget_base_url: None,
            widget_script_url: None,
            enable_logging: true,
            debug_mode: false,
            primary_color: None,
            user_email: None,
            user_name: None,
            user_avatar_url: None,
            user_email_hash: None,
            user_account_id: None,
            user_account_external_id: None,
        }
    }
}

impl NativeViewProps {
    pub fn config(&self) -> Option<ChatConfig> {
        let app_id = self.app_id.as_deref()?;
        let mut builder = ChatConfig::builder(app_id)
            .enable_logging(self.enable_logging)
            .debug_mode(self.debug_mode);
        if let Some(color) = &self.primary_color {
            builder = builder.primary_color(color.clone());
        }
        if let Some(url) = &self.widget_base_url {
            builder = builder.widget_base_url(url.clone());
        }
        if let Some(url) = &self.widget_script_url {
            builder = builder.widget_script_url(url.clone());
        }
        Some(builder.build())
    }

    /// A user exists once both email and name are set.
    pub fn user(&self) -> Option<ChatUser> {
        let mut user = ChatUser::new(self.user_email.clone()?, self.user_name.clone()?);
        user.avatar_url = self.user_avatar_url.clone();
        user.email_hash = self.user_email_hash.clone();
        user.account_id = self.user_account_id.clone();
        user.account_external_id = self.user_account_external_id.clone();
        Some(user)
    }

    /// The session to build a widget from; `None` until an app id is set.
    pub fn session(&self) -> Option<Session> {
        Some(Session::new(self.config()?, self.user()))
    }
}
