//! Debug overlay model: what a host draws over the web surface when
//! `debug_mode` is on.

use pylon_common::PixelRect;
use serde::Serialize;

use crate::bounds::{BoundsStore, InteractiveElement};

/// Alpha of the translucent fill drawn inside each region.
pub const FILL_ALPHA: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One highlighted region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayRegion {
    pub selector: &'static str,
    pub rect: PixelRect,
    /// Stroke and label color; the fill uses the same color at
    /// [`FILL_ALPHA`].
    pub color: Rgb,
}

/// A region for every visible element.
pub fn regions(bounds: &BoundsStore) -> Vec<OverlayRegion> {
    bounds
        .visible()
        .map(|(element, rect)| OverlayRegion {
            selector: element.selector(),
            rect,
            color: color_for(element),
        })
        .collect()
}

/// Stable, vivid color derived from the selector text.
pub fn color_for(element: InteractiveElement) -> Rgb {
    let hash = string_hash(element.selector());
    let hue = ((hash & 0xFFFF) % 360) as f64;
    let saturation = 0.7 + ((hash >> 16) & 0xFF) as f64 / 255.0 * 0.3;
    let value = 0.8 + ((hash >> 24) & 0xFF) as f64 / 255.0 * 0.2;
    hsv_to_rgb(hue, saturation, value)
}

/// 31-multiplier polynomial hash over UTF-16 code units.
fn string_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as u32))
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let c = value * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}
