//! Native core of the Pylon chat widget.
//!
//! Hosts the Pylon web widget inside a platform web view that sits on top
//! of the app's own UI, and makes that overlay behave:
//! - [`BoundsStore`] tracks where the widget's interactive elements are
//! - [`hit_test`] decides which touches the overlay claims
//! - [`ipc`] carries commands into the page and events out of it
//! - [`LifecycleController`] sequences loads and script injection
//! - [`ChatWidget`] ties them together over a [`WebSurface`]
//! - [`react_native`] bridges the widget into a React Native view tree
//!
//! Enable the `wry` feature for a desktop surface.

pub mod bounds;
pub mod context;
pub mod events;
pub mod file_chooser;
pub mod ipc;
pub mod lifecycle;
pub mod overlay;
pub mod react_native;
pub mod shell;
pub mod surface;
pub mod widget;
#[cfg(feature = "wry")]
pub mod wry_surface;

pub use bounds::{BoundsStore, InteractiveElement};
pub use context::PylonContext;
pub use events::ChatEvent;
pub use file_chooser::{ActivityResult, FileSelectionSlot, FILE_CHOOSER_REQUEST_CODE};
pub use hit_test::{ChatWindowState, TouchDisposition};
pub use ipc::{InboundEvent, NativeChannel, WidgetCommand};
pub use lifecycle::{LifecycleController, LoadGeneration, LoadState};
pub use shell::render_shell;
pub use surface::{HeadlessSurface, SurfaceEvent, WebSurface};
pub use widget::{ChatWidget, Dispatch};
#[cfg(feature = "wry")]
pub use wry_surface::WrySurface;
