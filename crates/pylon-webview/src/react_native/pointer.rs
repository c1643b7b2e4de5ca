use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// RN `pointerEvents` values as the native container applies them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerEventsMode {
    #[default]
    Auto,
    None,
    BoxNone,
    BoxOnly,
}

impl PointerEventsMode {
    /// Decide whether the container consumes a touch.
    ///
    /// `children` dispatches to the wrapped views and `own` offers the touch
    /// to the container itself; each returns whether it was handled. Neither
    /// is called when the mode rules it out.
    pub fn dispatch(self, children: impl FnOnce() -> bool, own: impl FnOnce() -> bool) -> bool {
        match self {
            PointerEventsMode::None => false,
            PointerEventsMode::BoxNone => children(),
            PointerEventsMode::BoxOnly => own(),
            PointerEventsMode::Auto => children() || own(),
        }
    }

    /// Whether the container itself is clickable and focusable.
    pub fn is_clickable(self) -> bool {
        matches!(self, PointerEventsMode::Auto | PointerEventsMode::BoxOnly)
    }
}

impl FromStr for PointerEventsMode {
    type Err = std::convert::Infallible;

    /// Unknown values behave like `auto`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => PointerEventsMode::None,
            "box-none" => PointerEventsMode::BoxNone,
            "box-only" => PointerEventsMode::BoxOnly,
            _ => PointerEventsMode::Auto,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rn_values() {
        assert_eq!("none".parse(), Ok(PointerEventsMode::None));
        assert_eq!("box-none".parse(), Ok(PointerEventsMode::BoxNone));
        assert_eq!("box-only".parse(), Ok(PointerEventsMode::BoxOnly));
        assert_eq!("auto".parse(), Ok(PointerEventsMode::Auto));
        assert_eq!("bogus".parse(), Ok(PointerEventsMode::Auto));
    }

    #[test]
    fn none_passes_everything_through() {
        let handled = PointerEventsMode::None.dispatch(|| panic!("children"), || panic!("own"));
        assert!(!handled);
        assert!(!PointerEventsMode::None.is_clickable());
    }

    #[test]
    fn box_none_only_asks_children() {
        assert!(PointerEventsMode::BoxNone.dispatch(|| true, || panic!("own")));
        assert!(!PointerEventsMode::BoxNone.dispatch(|| false, || true));
    }

    #[test]
    fn box_only_skips_children() {
        assert!(PointerEventsMode::BoxOnly.dispatch(|| panic!("children"), || true));
        assert!(PointerEventsMode::BoxOnly.is_clickable());
    }

    #[test]
    fn auto_falls_back_to_own() {
        assert!(PointerEventsMode::Auto.dispatch(|| false, || true));
        assert!(PointerEventsMode::Auto.dispatch(|| true, || panic!("own")));
        assert!(!PointerEventsMode::Auto.dispatch(|| false, || false));
    }

    #[test]
    fn serde_uses_rn_spelling() {
        let mode: PointerEventsMode = serde_json::from_str("\"box-none\"").unwrap();
        assert_eq!(mode, PointerEventsMode::BoxNone);
    }
}
