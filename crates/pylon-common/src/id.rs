use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one chat widget instance in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let bytes = uuid.as_bytes();
        Self(format!(
            "chat-{:02x}{:02x}{:02x}{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_id_has_prefix_and_hex_suffix() {
        let id = WidgetId::new();
        let suffix = id.as_str().strip_prefix("chat-").unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn widget_id_is_unique() {
        assert_ne!(WidgetId::new(), WidgetId::new());
    }

    #[test]
    fn widget_id_display() {
        let id = WidgetId::default();
        assert_eq!(id.to_string(), id.as_str());
    }
}
