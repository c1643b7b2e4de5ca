pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{BridgeError, ConfigError, PylonError, WidgetError};
pub use events::EventBus;
pub use id::WidgetId;
pub use types::{PixelRect, Point};

pub type Result<T> = std::result::Result<T, PylonError>;
