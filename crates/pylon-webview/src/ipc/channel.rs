//! How the page reaches native code on each host.

use serde::{Deserialize, Serialize};

/// Name under which every host exposes its message handler to the page.
pub const HANDLER_NAME: &str = "PylonNative";

/// The native message channel available inside the web surface.
///
/// Every flavor delivers the same JSON string to
/// [`decode`](super::decode); only the JS entry point differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativeChannel {
    /// Android `addJavascriptInterface(obj, "PylonNative")` with a
    /// `postMessage(String)` method.
    AndroidInterface,
    /// iOS `WKUserContentController` script message handler.
    WebKitHandler,
    /// Desktop `wry` IPC handler (`window.ipc.postMessage`).
    WryIpc,
}

impl NativeChannel {
    fn post_body(self) -> &'static str {
        match self {
            NativeChannel::AndroidInterface => {
                "if (window.PylonNative) { window.PylonNative.postMessage(JSON.stringify(msg)); }"
            }
            NativeChannel::WebKitHandler => {
                "if (window.webkit && window.webkit.messageHandlers && window.webkit.messageHandlers.PylonNative) { window.webkit.messageHandlers.PylonNative.postMessage(JSON.stringify(msg)); }"
            }
            NativeChannel::WryIpc => {
                "if (window.ipc) { window.ipc.postMessage(JSON.stringify(msg)); }"
            }
        }
    }

    /// Defines `window.__pylonPost(msg)` for this host.
    pub fn bootstrap_script(self) -> String {
        format!(
            "window.__pylonPost = function(msg) {{ {} }};",
            self.post_body()
        )
    }
}
