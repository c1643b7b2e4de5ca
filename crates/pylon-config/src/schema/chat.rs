//! Chat widget configuration.

use serde::{Deserialize, Serialize};

/// Host the widget script is served from unless overridden.
pub const DEFAULT_WIDGET_BASE_URL: &str = "https://widget.usepylon.com";

/// Script URL derived from the app id when none is configured.
pub fn default_script_url(app_id: &str) -> String {
    format!("{DEFAULT_WIDGET_BASE_URL}/widget/{app_id}")
}

/// Immutable configuration for one chat widget.
///
/// Build it with [`ChatConfig::builder`]; change it with
/// [`ChatConfig::rebuild`], which produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    pub app_id: String,
    pub enable_logging: bool,
    pub enable_csp: bool,
    pub primary_color: Option<String>,
    pub debug_mode: bool,
    pub widget_base_url: String,
    pub widget_script_url: String,
}

impl ChatConfig {
    pub fn builder(app_id: impl Into<String>) -> ChatConfigBuilder {
        ChatConfigBuilder::new(app_id)
    }

    /// Config with every optional setting at its default.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self::builder(app_id).build()
    }

    /// Copy this config into a builder, apply `f`, and build a new config.
    pub fn rebuild(&self, f: impl FnOnce(&mut ChatConfigBuilder)) -> Self {
        let mut builder = ChatConfigBuilder {
            app_id: self.app_id.clone(),
            enable_logging: self.enable_logging,
            enable_csp: self.enable_csp,
            primary_color: self.primary_color.clone(),
            debug_mode: self.debug_mode,
            widget_base_url: self.widget_base_url.clone(),
            widget_script_url: self.widget_script_url.clone(),
        };
        f(&mut builder);
        builder.build()
    }
}

#[derive(Debug, Clone)]
pub struct ChatConfigBuilder {
    app_id: String,
    pub enable_logging: bool,
    pub enable_csp: bool,
    pub primary_color: Option<String>,
    pub debug_mode: bool,
    pub widget_base_url: String,
    pub widget_script_url: String,
}

impl ChatConfigBuilder {
    fn new(app_id: impl Into<String>) -> Self {
        let app_id = app_id.into();
        let widget_script_url = default_script_url(&app_id);
        Self {
            app_id,
            enable_logging: true,
            enable_csp: false,
            primary_color: None,
            debug_mode: false,
            widget_base_url: DEFAULT_WIDGET_BASE_URL.to_string(),
            widget_script_url,
        }
    }

    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    pub fn enable_csp(mut self, enabled: bool) -> Self {
        self.enable_csp = enabled;
        self
    }

    pub fn primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = Some(color.into());
        self
    }

    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    pub fn widget_base_url(mut self, url: impl Into<String>) -> Self {
        self.widget_base_url = url.into();
        self
    }

    pub fn widget_script_url(mut self, url: impl Into<String>) -> Self {
        self.widget_script_url = url.into();
        self
    }

    /// Blank URLs fall back to the defaults.
    pub fn build(self) -> ChatConfig {
        let widget_base_url = if self.widget_base_url.trim().is_empty() {
            DEFAULT_WIDGET_BASE_URL.to_string()
        } else {
            self.widget_base_url
        };
        let widget_script_url = if self.widget_script_url.trim().is_empty() {
            default_script_url(&self.app_id)
        } else {
            self.widget_script_url
        };
        ChatConfig {
            app_id: self.app_id,
            enable_logging: self.enable_logging,
            enable_csp: self.enable_csp,
            primary_color: self.primary_color,
            debug_mode: self.debug_mode,
            widget_base_url,
            widget_script_url,
        }
    }
}
