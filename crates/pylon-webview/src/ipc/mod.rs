//! Bridge protocol between the native host and the embedded page.
//!
//! Messages flow in both directions:
//! - **Page -> native**: the page calls `window.__pylonPost({type, ...})`,
//!   which forwards a JSON string over the host's native channel (see
//!   [`NativeChannel`]). [`decode`] turns it into an [`InboundEvent`].
//! - **Native -> page**: the host evaluates scripts built from a closed set
//!   of [`WidgetCommand`]s, plus the initialization, measurement and click
//!   scripts in [`scripts`].

mod channel;
mod commands;
mod inbound;
pub mod scripts;

pub use channel::{NativeChannel, HANDLER_NAME};
pub use commands::{invoke_script, js_literal, FieldMap, ScriptArg, WidgetCommand};
pub use inbound::{decode, is_message_type_allowed, InboundEvent, ALLOWED_MESSAGE_TYPES};
