//! CSS color checks for `primary_color`.
//!
//! The value is handed to the page as a CSS custom property, so only the
//! formats that are safe to interpolate into a stylesheet are accepted.

use regex::Regex;
use std::sync::LazyLock;

/// Hex color: #RGB, #RRGGBB, or #RRGGBBAA.
static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// rgb() or rgba() with integer channels and an optional float alpha.
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .unwrap()
});

/// Bare named color such as `rebeccapurple`.
static NAMED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]{3,20}$").unwrap());

/// Whether `s` is a CSS color the widget shell will accept.
pub fn is_css_color(s: &str) -> bool {
    if HEX_RE.is_match(s) || NAMED_RE.is_match(s) {
        return true;
    }
    match RGB_RE.captures(s) {
        Some(caps) => {
            let channels_ok = (1..=3).all(|i| caps[i].parse::<u16>().is_ok_and(|v| v <= 255));
            let alpha_ok = caps
                .get(5)
                .map(|a| a.as_str().parse::<f64>().is_ok_and(|v| (0.0..=1.0).contains(&v)))
                .unwrap_or(true);
            channels_ok && alpha_ok
        }
        None => false,
    }
}
