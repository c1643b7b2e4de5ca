//! Where the widget's interactive DOM elements currently are.
//!
//! The page reports rectangles in physical device pixels. A zero-area
//! rectangle means the element is not rendered right now; entries are
//! never removed, only marked absent that way.

use std::fmt;

use pylon_common::PixelRect;
use serde::{Deserialize, Serialize};

// =============================================================================
// INTERACTIVE ELEMENTS
// =============================================================================

/// The DOM regions of the hosted widget that accept touches while the
/// chat window is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractiveElement {
    /// The floating chat bubble.
    Bubble,
    /// The satisfaction-survey popup.
    SurveyPopup,
    /// The new-message preview popup.
    MessagePopup,
}

impl InteractiveElement {
    pub const ALL: [InteractiveElement; 3] = [
        InteractiveElement::Bubble,
        InteractiveElement::SurveyPopup,
        InteractiveElement::MessagePopup,
    ];

    /// The DOM id the hosted widget gives this element.
    pub fn selector(self) -> &'static str {
        match self {
            InteractiveElement::Bubble => "pylon-chat-bubble",
            InteractiveElement::SurveyPopup => "pylon-chat-popup-survey",
            InteractiveElement::MessagePopup => "pylon-chat-popup-message",
        }
    }

    pub fn from_selector(selector: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.selector() == selector)
    }

    fn index(self) -> usize {
        match self {
            InteractiveElement::Bubble => 0,
            InteractiveElement::SurveyPopup => 1,
            InteractiveElement::MessagePopup => 2,
        }
    }
}

impl fmt::Display for InteractiveElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

// =============================================================================
// BOUNDS STORE
// =============================================================================

/// Last-known rectangle for every interactive element that has been
/// observed at least once.
///
/// The store is a small `Copy` value, so a reader that wants to hold on
/// to a snapshot across an update simply copies it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundsStore {
    slots: [Option<PixelRect>; 3],
}

impl BoundsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rectangle for `element`. A zero-area rectangle marks the
    /// element hidden.
    pub fn update(&mut self, element: InteractiveElement, rect: PixelRect) {
        self.slots[element.index()] = Some(rect);
    }

    /// The most recently reported rectangle, hidden or not. `None` if the
    /// element has never been observed.
    pub fn get(&self, element: InteractiveElement) -> Option<PixelRect> {
        self.slots[element.index()]
    }

    /// Whether `element` currently has a non-empty rectangle.
    pub fn is_visible(&self, element: InteractiveElement) -> bool {
        self.get(element).is_some_and(|r| !r.is_empty())
    }

    /// Every observed element with its last rectangle, hidden ones included.
    pub fn all(&self) -> impl Iterator<Item = (InteractiveElement, PixelRect)> + '_ {
        InteractiveElement::ALL
            .into_iter()
            .filter_map(|e| self.get(e).map(|r| (e, r)))
    }

    /// Only the elements that are currently rendered.
    pub fn visible(&self) -> impl Iterator<Item = (InteractiveElement, PixelRect)> + '_ {
        self.all().filter(|(_, r)| !r.is_empty())
    }
}

// =============================================================================
// TESTS
// =============================================================================
