//! React Native integration.
//!
//! [`RnChatView`] is the native view: it rebuilds its
//! [`ChatWidget`](crate::ChatWidget) whenever the props describe a new
//! session, applies the `pointerEvents` mode to touches, turns host events
//! into RN events (bounds converted to dp), and executes the commands RN
//! dispatches to it. On Android the JS side cannot rely on
//! native hit testing through the RN view tree, so [`ProxyLayer`] renders
//! pressable stand-ins for the interactive elements and forwards presses
//! back as `clickElementAtSelector`.

mod commands;
mod events;
mod pointer;
mod props;
mod proxy;
mod view;

pub use commands::RnCommand;
pub use events::{DpBounds, RnEvent};
pub use pointer::PointerEventsMode;
pub use props::NativeViewProps;
pub use proxy::{ProxyLayer, ProxyRegion};
pub use view::{RnChatView, SurfaceFactory};
