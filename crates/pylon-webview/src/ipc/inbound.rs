//! Decoding of messages posted by the embedded page.

use pylon_common::{BridgeError, PixelRect};
use serde::Deserialize;

use crate::bounds::InteractiveElement;

// =============================================================================
// MESSAGE ALLOWLIST
// =============================================================================

/// Message types the page may post. Anything else is rejected.
pub const ALLOWED_MESSAGE_TYPES: &[&str] = &[
    "onInitialized",
    "onReady",
    "onChatWindowOpened",
    "onChatWindowClosed",
    "onInteractiveElementUpdate",
    "updateInteractiveBounds",
    "onUnreadCountChanged",
    "log",
];

/// Check whether a message type is in the allowlist (case-sensitive).
pub fn is_message_type_allowed(kind: &str) -> bool {
    ALLOWED_MESSAGE_TYPES.contains(&kind)
}

// =============================================================================
// EVENTS
// =============================================================================

/// A decoded page event. Each one drives exactly one state change in the
/// widget.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// The initialization script ran and registered its hooks.
    Initialized,
    /// The page's `window.Pylon` entry point exists.
    Ready,
    /// The hosted chat window became visible.
    WindowOpened,
    /// The hosted chat window was dismissed.
    WindowClosed,
    /// An interactive element may have moved, appeared or disappeared;
    /// its rectangle must be measured again.
    VisibilityChanged(InteractiveElement),
    /// Result of a measurement, in physical pixels.
    BoundsUpdated {
        element: InteractiveElement,
        rect: PixelRect,
    },
    UnreadCountChanged(u32),
    /// Free-text diagnostics from the page.
    Log(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum WireMessage {
    #[serde(rename = "onInitialized")]
    Initialized,
    #[serde(rename = "onReady")]
    Ready,
    #[serde(rename = "onChatWindowOpened")]
    WindowOpened,
    #[serde(rename = "onChatWindowClosed")]
    WindowClosed,
    #[serde(rename = "onInteractiveElementUpdate")]
    ElementUpdate { selector: String },
    #[serde(rename = "updateInteractiveBounds")]
    Bounds {
        selector: String,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    },
    #[serde(rename = "onUnreadCountChanged")]
    UnreadCount { count: f64 },
    #[serde(rename = "log")]
    Log { message: String },
}

// =============================================================================
// DECODE
// =============================================================================

/// Parse a raw JSON message from the page.
pub fn decode(raw: &str) -> Result<InboundEvent, BridgeError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| BridgeError::InvalidJson(e.to_string()))?;

    let kind = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| BridgeError::MalformedPayload {
            kind: "<none>".to_string(),
            reason: "missing string field `type`".to_string(),
        })?
        .to_string();

    if !is_message_type_allowed(&kind) {
        return Err(BridgeError::UnknownType(kind));
    }

    let malformed = |reason: String| BridgeError::MalformedPayload {
        kind: kind.clone(),
        reason,
    };

    let wire: WireMessage = serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;

    let element = |selector: &str| {
        InteractiveElement::from_selector(selector)
            .ok_or_else(|| malformed(format!("unknown selector {selector:?}")))
    };

    Ok(match wire {
        WireMessage::Initialized => InboundEvent::Initialized,
        WireMessage::Ready => InboundEvent::Ready,
        WireMessage::WindowOpened => InboundEvent::WindowOpened,
        WireMessage::WindowClosed => InboundEvent::WindowClosed,
        WireMessage::ElementUpdate { selector } => {
            InboundEvent::VisibilityChanged(element(&selector)?)
        }
        WireMessage::Bounds {
            selector,
            left,
            top,
            right,
            bottom,
        } => InboundEvent::BoundsUpdated {
            element: element(&selector)?,
            rect: PixelRect::new(left, top, right, bottom),
        },
        WireMessage::UnreadCount { count } => InboundEvent::UnreadCountChanged(clamp_count(count)),
        WireMessage::Log { message } => InboundEvent::Log(message),
    })
}

/// The page reports counts as JS numbers.
fn clamp_count(count: f64) -> u32 {
    if count.is_nan() || count <= 0.0 {
        0
    } else if count >= u32::MAX as f64 {
        u32::MAX
    } else {
        count.round() as u32
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_lifecycle_messages() {
        assert_eq!(decode(r#"{"type":"onInitialized"}"#).unwrap(), InboundEvent::Initialized);
        assert_eq!(decode(r#"{"type":"onReady"}"#).unwrap(), InboundEvent::Ready);
        assert_eq!(
            decode(r#"{"type":"onChatWindowOpened"}"#).unwrap(),
            InboundEvent::WindowOpened
        );
        assert_eq!(
            decode(r#"{"type":"onChatWindowClosed"}"#).unwrap(),
            InboundEvent::WindowClosed
        );
    }

    #[test]
    fn decodes_visibility_change() {
        let event = decode(r#"{"type":"onInteractiveElementUpdate","selector":"pylon-chat-popup-survey"}"#)
            .unwrap();
        assert_eq!(
            event,
            InboundEvent::VisibilityChanged(InteractiveElement::SurveyPopup)
        );
    }

    #[test]
    fn decodes_bounds_update() {
        let event = decode(
            r#"{"type":"updateInteractiveBounds","selector":"pylon-chat-bubble","left":10,"top":20.5,"right":110,"bottom":120.5}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            InboundEvent::BoundsUpdated {
                element: InteractiveElement::Bubble,
                rect: PixelRect::new(10.0, 20.5, 110.0, 120.5),
            }
        );
    }

    #[test]
    fn decodes_unread_count_from_js_number() {
        assert_eq!(
            decode(r#"{"type":"onUnreadCountChanged","count":3}"#).unwrap(),
            InboundEvent::UnreadCountChanged(3)
        );
        assert_eq!(
            decode(r#"{"type":"onUnreadCountChanged","count":2.0}"#).unwrap(),
            InboundEvent::UnreadCountChanged(2)
        );
        assert_eq!(
            decode(r#"{"type":"onUnreadCountChanged","count":-1}"#).unwrap(),
            InboundEvent::UnreadCountChanged(0)
        );
    }

    #[test]
    fn decodes_log() {
        assert_eq!(
            decode(r#"{"type":"log","message":"hello"}"#).unwrap(),
            InboundEvent::Log("hello".into())
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        assert_eq!(
            decode(r#"{"type":"onReady","ts":12345}"#).unwrap(),
            InboundEvent::Ready
        );
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(decode("not json"), Err(BridgeError::InvalidJson(_))));
    }

    #[test]
    fn rejects_missing_type() {
        assert!(matches!(
            decode(r#"{"selector":"pylon-chat-bubble"}"#),
            Err(BridgeError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn rejects_unknown_type() {
        let err = decode(r#"{"type":"eval","code":"1"}"#).unwrap_err();
        assert!(matches!(err, BridgeError::UnknownType(ref k) if k == "eval"));
        assert!(!is_message_type_allowed("ONREADY"));
        assert!(!is_message_type_allowed("onReady\0"));
    }

    #[test]
    fn rejects_unknown_selector() {
        let err = decode(r#"{"type":"onInteractiveElementUpdate","selector":"body"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown selector"));
    }

    #[test]
    fn rejects_missing_bounds_field() {
        let err = decode(
            r#"{"type":"updateInteractiveBounds","selector":"pylon-chat-bubble","left":1,"top":2,"right":3}"#,
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::MalformedPayload { ref kind, .. } if kind == "updateInteractiveBounds"));
    }
}
