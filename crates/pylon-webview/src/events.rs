//! Events the widget reports to its host.

use pylon_common::PixelRect;
use serde::Serialize;

use crate::bounds::InteractiveElement;

/// A host-facing widget event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ChatEvent {
    /// The shell finished loading and the init script was injected.
    Loaded,
    Initialized,
    /// `window.Pylon` exists; commands are delivered from now on.
    Ready,
    ChatOpened,
    /// `was_open` is the window state before the close was reported.
    ChatClosed { was_open: bool },
    UnreadCountChanged { count: u32 },
    /// Part of the host event surface; the hosted widget does not
    /// currently report messages.
    MessageReceived { message: String },
    Error { message: String },
    /// Bounds in physical pixels.
    InteractiveBoundsChanged {
        element: InteractiveElement,
        rect: PixelRect,
    },
    FileChooserLaunched { request_code: i32 },
    /// The page asked to open `url` in a new window; the host decides how.
    ExternalLinkRequested { url: String },
}

impl ChatEvent {
    /// Short name, used in logs and the replay output.
    pub fn name(&self) -> &'static str {
        match self {
            ChatEvent::Loaded => "loaded",
            ChatEvent::Initialized => "initialized",
            ChatEvent::Ready => "ready",
            ChatEvent::ChatOpened => "chatOpened",
            ChatEvent::ChatClosed { .. } => "chatClosed",
            ChatEvent::UnreadCountChanged { .. } => "unreadCountChanged",
            ChatEvent::MessageReceived { .. } => "messageReceived",
            ChatEvent::Error { .. } => "error",
            ChatEvent::InteractiveBoundsChanged { .. } => "interactiveBoundsChanged",
            ChatEvent::FileChooserLaunched { .. } => "fileChooserLaunched",
            ChatEvent::ExternalLinkRequested { .. } => "externalLinkRequested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_event_tag() {
        let json = serde_json::to_value(ChatEvent::ChatClosed { was_open: true }).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "chatClosed", "was_open": true }));
    }

    #[test]
    fn name_matches_tag() {
        let event = ChatEvent::UnreadCountChanged { count: 2 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.name());
    }
}
