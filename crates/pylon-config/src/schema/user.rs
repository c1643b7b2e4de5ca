//! Visitor identity passed through to the hosted widget.

use serde::{Deserialize, Serialize};

/// The signed-in visitor. `email_hash` is an opaque identity-verification
/// value; it is forwarded verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_external_id: Option<String>,
}

impl ChatUser {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            avatar_url: None,
            email_hash: None,
            account_id: None,
            account_external_id: None,
        }
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn with_email_hash(mut self, hash: impl Into<String>) -> Self {
        self.email_hash = Some(hash.into());
        self
    }

    pub fn with_account_id(mut self, id: impl Into<String>) -> Self {
        self.account_id = Some(id.into());
        self
    }

    pub fn with_account_external_id(mut self, id: impl Into<String>) -> Self {
        self.account_external_id = Some(id.into());
        self
    }
}
