//! Pressable stand-ins for the widget's interactive elements.
//!
//! While the chat window is closed the web surface ignores all touches and
//! the layer renders one transparent region per visible element instead.
//! Pressing a region asks native to click the element by id, which is only
//! right when the region holds a single clickable target.

use serde::Serialize;

use super::commands::RnCommand;
use super::events::{DpBounds, RnEvent};
use super::pointer::PointerEventsMode;

/// One pressable region, in the layer's dp coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyRegion {
    pub selector: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ProxyRegion {
    fn from_bounds(bounds: &DpBounds) -> Self {
        Self {
            selector: bounds.selector.clone(),
            left: bounds.left,
            top: bounds.top,
            width: bounds.right - bounds.left,
            height: bounds.bottom - bounds.top,
        }
    }

    /// Half-open, like the native hit test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// JS-side state of the proxy layer. Only events from native change it.
#[derive(Debug, Clone, Default)]
pub struct ProxyLayer {
    chat_open: bool,
    regions: Vec<ProxyRegion>,
}

impl ProxyLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn handle_event(&mut self, event: &RnEvent) {
        match event {
            RnEvent::ChatOpened => self.chat_open = true,
            RnEvent::ChatClosed { .. } => self.chat_open = false,
            RnEvent::InteractiveBoundsChanged(bounds) => self.update_region(bounds),
            _ => {}
        }
    }

    fn update_region(&mut self, bounds: &DpBounds) {
        let existing = self.regions.iter().position(|r| r.selector == bounds.selector);
        match (existing, bounds.is_hidden()) {
            (Some(i), true) => {
                self.regions.remove(i);
            }
            (Some(i), false) => self.regions[i] = ProxyRegion::from_bounds(bounds),
            (None, false) => self.regions.push(ProxyRegion::from_bounds(bounds)),
            (None, true) => {}
        }
    }

    /// `pointerEvents` for the view wrapping the web surface.
    pub fn pointer_events(&self) -> PointerEventsMode {
        if self.chat_open {
            PointerEventsMode::Auto
        } else {
            PointerEventsMode::None
        }
    }

    /// Regions to render; none while the chat window is open.
    pub fn regions(&self) -> &[ProxyRegion] {
        if self.chat_open {
            &[]
        } else {
            self.regions.as_slice()
        }
    }

    pub fn region_at(&self, x: f64, y: f64) -> Option<&ProxyRegion> {
        self.regions().iter().find(|r| r.contains(x, y))
    }

    /// The command a press at (`x`, `y`) dispatches, if it lands on a region.
    pub fn press(&self, x: f64, y: f64) -> Option<RnCommand> {
        self.region_at(x, y)
            .map(|r| RnCommand::ClickElementAtSelector(r.selector.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(selector: &str, l: f64, t: f64, r: f64, b: f64) -> RnEvent {
        RnEvent::InteractiveBoundsChanged(DpBounds {
            selector: selector.into(),
            left: l,
            top: t,
            right: r,
            bottom: b,
        })
    }

    #[test]
    fn closed_layer_renders_regions_and_ignores_web_touches() {
        let mut layer = ProxyLayer::new();
        layer.handle_event(&bounds("pylon-chat-bubble", 300.0, 600.0, 356.0, 656.0));

        assert_eq!(layer.pointer_events(), PointerEventsMode::None);
        assert_eq!(
            layer.regions(),
            &[ProxyRegion {
                selector: "pylon-chat-bubble".into(),
                left: 300.0,
                top: 600.0,
                width: 56.0,
                height: 56.0,
            }]
        );
    }

    #[test]
    fn press_clicks_element_by_selector() {
        let mut layer = ProxyLayer::new();
        layer.handle_event(&bounds("pylon-chat-bubble", 10.0, 10.0, 50.0, 50.0));
        assert_eq!(
            layer.press(20.0, 20.0),
            Some(RnCommand::ClickElementAtSelector("pylon-chat-bubble".into()))
        );
        assert_eq!(layer.press(60.0, 60.0), None);
    }

    #[test]
    fn open_chat_hides_regions() {
        let mut layer = ProxyLayer::new();
        layer.handle_event(&bounds("pylon-chat-bubble", 10.0, 10.0, 50.0, 50.0));
        layer.handle_event(&RnEvent::ChatOpened);

        assert_eq!(layer.pointer_events(), PointerEventsMode::Auto);
        assert!(layer.regions().is_empty());
        assert_eq!(layer.press(20.0, 20.0), None);

        layer.handle_event(&RnEvent::ChatClosed { was_open: true });
        assert_eq!(layer.regions().len(), 1);
    }

    #[test]
    fn zero_bounds_remove_region() {
        let mut layer = ProxyLayer::new();
        layer.handle_event(&bounds("pylon-chat-popup-survey", 0.0, 0.0, 0.0, 0.0));
        assert!(layer.regions().is_empty());

        layer.handle_event(&bounds("pylon-chat-popup-survey", 5.0, 5.0, 100.0, 40.0));
        layer.handle_event(&bounds("pylon-chat-bubble", 10.0, 100.0, 50.0, 140.0));
        layer.handle_event(&bounds("pylon-chat-popup-survey", 0.0, 0.0, 0.0, 0.0));
        assert_eq!(layer.regions().len(), 1);
        assert_eq!(layer.regions()[0].selector, "pylon-chat-bubble");
    }

    #[test]
    fn updates_replace_in_place() {
        let mut layer = ProxyLayer::new();
        layer.handle_event(&bounds("pylon-chat-bubble", 10.0, 10.0, 50.0, 50.0));
        layer.handle_event(&bounds("pylon-chat-bubble", 20.0, 20.0, 70.0, 70.0));
        assert_eq!(layer.regions().len(), 1);
        assert_eq!(layer.regions()[0].width, 50.0);
    }
}
