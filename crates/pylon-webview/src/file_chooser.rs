//! Single-slot registry for an outstanding file-picker callback.
//!
//! The page can only have one picker open at a time. Starting a new one
//! fails the previous callback with "no selection"; the host later hands
//! the picker's activity result back through
//! [`PylonContext::handle_activity_result`](crate::PylonContext::handle_activity_result).

use std::fmt;

use tracing::{debug, warn};

/// Legacy request code reported with `fileChooserLaunched` ("PC").
pub const FILE_CHOOSER_REQUEST_CODE: i32 = 0x5043;

/// Receives the chosen URIs, or `None` when nothing was selected.
pub type FileSelectionCallback = Box<dyn FnOnce(Option<Vec<String>>) + Send>;

/// What the page asked the picker for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileChooserRequest {
    pub accept_types: Vec<String>,
    pub allow_multiple: bool,
}

impl FileChooserRequest {
    /// MIME filter for the picker. Anything other than exactly one
    /// non-empty accept type opens the picker unfiltered.
    pub fn mime_type(&self) -> &str {
        match self.accept_types.as_slice() {
            [only] if !only.is_empty() => only,
            _ => "*/*",
        }
    }
}

/// How the surface launched the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserLaunch {
    /// Launched for result; the result comes back through the host's
    /// activity-result path.
    ForResult,
    /// Launched from a context that cannot receive results directly. The
    /// host is told via `fileChooserLaunched` and must forward the result.
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Canceled,
}

/// Result payload from the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentData {
    pub data_string: Option<String>,
    pub clip_items: Option<Vec<String>>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityResult {
    pub code: ResultCode,
    pub data: Option<IntentData>,
}

impl ActivityResult {
    pub fn ok(data: IntentData) -> Self {
        Self {
            code: ResultCode::Ok,
            data: Some(data),
        }
    }

    pub fn canceled() -> Self {
        Self {
            code: ResultCode::Canceled,
            data: None,
        }
    }

    /// URIs to deliver: the data string, else the clip items, else the
    /// data URI. `None` for anything but a successful result.
    pub fn selection(&self) -> Option<Vec<String>> {
        if self.code != ResultCode::Ok {
            return None;
        }
        let data = self.data.as_ref()?;
        if let Some(uri) = &data.data_string {
            Some(vec![uri.clone()])
        } else if let Some(items) = &data.clip_items {
            Some(items.clone())
        } else {
            data.data.as_ref().map(|uri| vec![uri.clone()])
        }
    }
}

// =============================================================================
// SLOT
// =============================================================================

#[derive(Default)]
pub struct FileSelectionSlot {
    pending: Option<FileSelectionCallback>,
}

impl FileSelectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Register `callback`, failing any callback it supersedes.
    pub fn begin(&mut self, callback: FileSelectionCallback) {
        if let Some(previous) = self.pending.replace(callback) {
            debug!("Superseding pending file selection");
            previous(None);
        }
    }

    /// Fail the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some(callback) = self.pending.take() {
            callback(None);
        }
    }

    /// Deliver `result` to the pending callback. Returns `false` when no
    /// callback was waiting.
    pub fn complete(&mut self, result: &ActivityResult) -> bool {
        match self.pending.take() {
            Some(callback) => {
                callback(result.selection());
                true
            }
            None => {
                warn!("No active file chooser callback");
                false
            }
        }
    }
}

impl fmt::Debug for FileSelectionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSelectionSlot")
            .field("pending", &self.is_pending())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
