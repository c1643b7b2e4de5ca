use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::events::ChatEvent;

/// Interactive bounds in density-independent pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpBounds {
    pub selector: String,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DpBounds {
    pub fn is_hidden(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }
}

/// An event as the RN component receives it.
#[derive(Debug, Clone, PartialEq)]
pub enum RnEvent {
    Loaded,
    Initialized,
    Ready,
    ChatOpened,
    ChatClosed { was_open: bool },
    UnreadCountChanged { count: u32 },
    MessageReceived { message: String },
    Error { error: String },
    InteractiveBoundsChanged(DpBounds),
}

impl RnEvent {
    /// Translate a widget event. `density` is physical pixels per dp (a
    /// non-positive density leaves bounds unscaled);
    /// events RN has no prop for yield `None`.
    pub fn from_chat_event(event: &ChatEvent, density: f64) -> Option<Self> {
        Some(match event {
            ChatEvent::Loaded => RnEvent::Loaded,
            ChatEvent::Initialized => RnEvent::Initialized,
            ChatEvent::Ready => RnEvent::Ready,
            ChatEvent::ChatOpened => RnEvent::ChatOpened,
            ChatEvent::ChatClosed { was_open } => RnEvent::ChatClosed {
                was_open: *was_open,
            },
            ChatEvent::UnreadCountChanged { count } => RnEvent::UnreadCountChanged { count: *count },
            ChatEvent::MessageReceived { message } => RnEvent::MessageReceived {
                message: message.clone(),
            },
            ChatEvent::Error { message } => RnEvent::Error {
                error: message.clone(),
            },
            ChatEvent::InteractiveBoundsChanged { element, rect } => {
                let dp = rect.scaled_down(density);
                RnEvent::InteractiveBoundsChanged(DpBounds {
                    selector: element.selector().to_string(),
                    left: dp.left,
                    top: dp.top,
                    right: dp.right,
                    bottom: dp.bottom,
                })
            }
            ChatEvent::FileChooserLaunched { .. } | ChatEvent::ExternalLinkRequested { .. } => {
                return None
            }
        })
    }

    /// Registration name of the RN direct event.
    pub fn name(&self) -> &'static str {
        match self {
            RnEvent::Loaded => "onPylonLoaded",
            RnEvent::Initialized => "onPylonInitialized",
            RnEvent::Ready => "onPylonReady",
            RnEvent::ChatOpened => "onChatOpened",
            RnEvent::ChatClosed { .. } => "onChatClosed",
            RnEvent::UnreadCountChanged { .. } => "onUnreadCountChanged",
            RnEvent::MessageReceived { .. } => "onMessageReceived",
            RnEvent::Error { .. } => "onPylonError",
            RnEvent::InteractiveBoundsChanged(_) => "onInteractiveBoundsChanged",
        }
    }

    /// The `nativeEvent` object.
    pub fn payload(&self) -> Value {
        match self {
            RnEvent::Loaded | RnEvent::Initialized | RnEvent::Ready | RnEvent::ChatOpened => {
                json!({})
            }
            RnEvent::ChatClosed { was_open } => json!({ "wasOpen": was_open }),
            RnEvent::UnreadCountChanged { count } => json!({ "count": count }),
            RnEvent::MessageReceived { message } => json!({ "message": message }),
            RnEvent::Error { error } => json!({ "error": error }),
            RnEvent::InteractiveBoundsChanged(bounds) => json!(bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::InteractiveElement;
    use pylon_common::PixelRect;

    #[test]
    fn bounds_are_converted_to_dp() {
        let event = ChatEvent::InteractiveBoundsChanged {
            element: InteractiveElement::Bubble,
            rect: PixelRect::new(30.0, 60.0, 150.0, 180.0),
        };
        let rn = RnEvent::from_chat_event(&event, 3.0).unwrap();
        assert_eq!(rn.name(), "onInteractiveBoundsChanged");
        assert_eq!(
            rn.payload(),
            json!({ "selector": "pylon-chat-bubble", "left": 10.0, "top": 20.0, "right": 50.0, "bottom": 60.0 })
        );
    }

    #[test]
    fn non_positive_density_is_treated_as_one() {
        let event = ChatEvent::InteractiveBoundsChanged {
            element: InteractiveElement::SurveyPopup,
            rect: PixelRect::new(1.0, 2.0, 3.0, 4.0),
        };
        let Some(RnEvent::InteractiveBoundsChanged(b)) = RnEvent::from_chat_event(&event, 0.0) else {
            panic!("expected bounds event");
        };
        assert_eq!((b.left, b.bottom), (1.0, 4.0));
    }

    #[test]
    fn chat_closed_carries_was_open() {
        let rn = RnEvent::from_chat_event(&ChatEvent::ChatClosed { was_open: false }, 2.0).unwrap();
        assert_eq!(rn.name(), "onChatClosed");
        assert_eq!(rn.payload(), json!({ "wasOpen": false }));
    }

    #[test]
    fn error_uses_error_key() {
        let rn = RnEvent::from_chat_event(&ChatEvent::Error { message: "boom".into() }, 1.0).unwrap();
        assert_eq!(rn.name(), "onPylonError");
        assert_eq!(rn.payload(), json!({ "error": "boom" }));
    }

    #[test]
    fn host_only_events_are_not_forwarded() {
        assert_eq!(
            RnEvent::from_chat_event(&ChatEvent::FileChooserLaunched { request_code: 1 }, 1.0),
            None
        );
        assert_eq!(
            RnEvent::from_chat_event(
                &ChatEvent::ExternalLinkRequested { url: "https://x".into() },
                1.0
            ),
            None
        );
    }
}
