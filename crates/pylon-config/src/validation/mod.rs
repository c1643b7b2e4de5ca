//! Configuration validation.
//!
//! Collects every problem into a single `ConfigError::ValidationError`
//! so a host sees all mistakes at once.

mod urls;

#[cfg(test)]
mod tests;

use crate::colors::is_css_color;
use crate::schema::{ChatConfig, ChatUser};
use pylon_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_app_id(&mut errors, &config.app_id);
    urls::validate_url(&mut errors, "widget_base_url", &config.widget_base_url);
    urls::validate_url(&mut errors, "widget_script_url", &config.widget_script_url);

    if let Some(color) = &config.primary_color {
        if !is_css_color(color) {
            errors.push(format!("primary_color = {color:?} is not a CSS color"));
        }
    }

    finish(errors)
}

/// Validate a visitor identity.
pub fn validate_user(user: &ChatUser) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if user.email.trim().is_empty() {
        errors.push("user.email must not be empty".to_string());
    } else if !user.email.contains('@') {
        errors.push(format!("user.email = {:?} is not an email address", user.email));
    }
    if user.name.trim().is_empty() {
        errors.push("user.name must not be empty".to_string());
    }
    if let Some(avatar) = &user.avatar_url {
        urls::validate_url(&mut errors, "user.avatar_url", avatar);
    }

    finish(errors)
}

fn validate_app_id(errors: &mut Vec<String>, app_id: &str) {
    if app_id.is_empty() {
        errors.push("app_id must not be empty".to_string());
        return;
    }
    let valid = app_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        errors.push(format!(
            "app_id = {app_id:?} may only contain letters, digits, '-' and '_'"
        ));
    }
}

fn finish(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
