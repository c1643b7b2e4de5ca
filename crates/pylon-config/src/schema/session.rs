//! Config plus identity, replaced as a whole.

use pylon_common::WidgetError;
use serde::Serialize;

use super::{ChatConfig, ChatUser};

/// Everything the embedded page needs to know about who is chatting and
/// how the widget is set up.
///
/// A `Session` is never mutated in place; every change produces a new
/// value so that a reader always sees a config/user pair that belonged
/// together.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    config: ChatConfig,
    user: Option<ChatUser>,
}

impl Session {
    pub fn new(config: ChatConfig, user: Option<ChatUser>) -> Self {
        Self { config, user }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn user(&self) -> Option<&ChatUser> {
        self.user.as_ref()
    }

    pub fn with_config(&self, config: ChatConfig) -> Self {
        Self {
            config,
            user: self.user.clone(),
        }
    }

    pub fn with_user(&self, user: Option<ChatUser>) -> Self {
        Self {
            config: self.config.clone(),
            user,
        }
    }

    /// Replace the identity hash of the current user.
    pub fn with_email_hash(&self, email_hash: Option<String>) -> Result<Self, WidgetError> {
        let user = self.user.as_ref().ok_or(WidgetError::MissingUser)?;
        Ok(self.with_user(Some(ChatUser {
            email_hash,
            ..user.clone()
        })))
    }

    /// The `window.pylon.chat_settings` object, with absent fields omitted.
    pub fn chat_settings(&self) -> ChatSettings<'_> {
        let user = self.user.as_ref();
        ChatSettings {
            app_id: &self.config.app_id,
            primary_color: self.config.primary_color.as_deref(),
            email: user.map(|u| u.email.as_str()),
            name: user.map(|u| u.name.as_str()),
            avatar_url: user.and_then(|u| u.avatar_url.as_deref()),
            email_hash: user.and_then(|u| u.email_hash.as_deref()),
            account_id: user.and_then(|u| u.account_id.as_deref()),
            account_external_id: user.and_then(|u| u.account_external_id.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSettings<'a> {
    pub app_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_external_id: Option<&'a str>,
}
