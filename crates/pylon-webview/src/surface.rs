//! The platform web view, seen from the widget.
//!
//! Platform adapters implement [`WebSurface`]: they load HTML, evaluate
//! scripts, and queue whatever the web view reports as [`SurfaceEvent`]s
//! for the widget to drain on the UI thread.

use std::fmt;

use pylon_common::WidgetError;

use crate::file_chooser::{ChooserLaunch, FileChooserRequest, FileSelectionCallback};
use crate::ipc::NativeChannel;
use crate::lifecycle::LoadGeneration;

/// Something the web view reported.
pub enum SurfaceEvent {
    /// The document loaded for `generation` finished.
    PageFinished { generation: LoadGeneration },
    /// The document loaded for `generation` failed.
    LoadFailed {
        generation: LoadGeneration,
        message: String,
    },
    /// A raw JSON message posted by the page that `generation` loaded.
    Message {
        generation: LoadGeneration,
        raw: String,
    },
    /// The page tried to open a new window.
    OpenWindow { url: String },
    /// The page wants a file picker; `callback` receives the selection.
    FileChooserRequested {
        request: FileChooserRequest,
        callback: FileSelectionCallback,
    },
}

impl fmt::Debug for SurfaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceEvent::PageFinished { generation } => f
                .debug_struct("PageFinished")
                .field("generation", generation)
                .finish(),
            SurfaceEvent::LoadFailed {
                generation,
                message,
            } => f
                .debug_struct("LoadFailed")
                .field("generation", generation)
                .field("message", message)
                .finish(),
            SurfaceEvent::Message { generation, raw } => f
                .debug_struct("Message")
                .field("generation", generation)
                .field("raw", raw)
                .finish(),
            SurfaceEvent::OpenWindow { url } => {
                f.debug_struct("OpenWindow").field("url", url).finish()
            }
            SurfaceEvent::FileChooserRequested { request, .. } => f
                .debug_struct("FileChooserRequested")
                .field("request", request)
                .finish_non_exhaustive(),
        }
    }
}

/// A web view the widget can drive.
pub trait WebSurface {
    /// How the page reaches native code on this surface.
    fn channel(&self) -> NativeChannel;

    /// Load `html` with `base_url` as its origin. Finished and failed
    /// signals for this load, and messages posted by the page it produces,
    /// must carry `generation`.
    fn load_html(
        &mut self,
        html: &str,
        base_url: &str,
        generation: LoadGeneration,
    ) -> Result<(), WidgetError>;

    /// Evaluate `script` in the current page, fire-and-forget.
    fn evaluate_script(&mut self, script: &str) -> Result<(), WidgetError>;

    /// Take every event queued since the last call.
    fn drain_events(&mut self) -> Vec<SurfaceEvent>;

    /// Show a native file picker.
    fn launch_file_chooser(
        &mut self,
        request: &FileChooserRequest,
    ) -> Result<ChooserLaunch, WidgetError> {
        let _ = request;
        Err(WidgetError::Surface(
            "file chooser not supported by this surface".to_string(),
        ))
    }

    /// Release the underlying web view.
    fn destroy(&mut self) {}
}

// =============================================================================
// HEADLESS SURFACE
// =============================================================================

/// A page load recorded by [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLoad {
    pub html: String,
    pub base_url: String,
    pub generation: LoadGeneration,
}

/// In-memory surface: records what the widget asks of it and replays
/// events fed in by the caller. Used by the replay tool and by tests.
#[derive(Debug)]
pub struct HeadlessSurface {
    channel: NativeChannel,
    loads: Vec<RecordedLoad>,
    scripts: Vec<String>,
    queue: Vec<SurfaceEvent>,
    chooser: Option<ChooserLaunch>,
    destroyed: bool,
}

impl HeadlessSurface {
    pub fn new(channel: NativeChannel) -> Self {
        Self {
            channel,
            loads: Vec::new(),
            scripts: Vec::new(),
            queue: Vec::new(),
            chooser: None,
            destroyed: false,
        }
    }

    /// Make `launch_file_chooser` succeed with `launch`.
    pub fn with_file_chooser(mut self, launch: ChooserLaunch) -> Self {
        self.chooser = Some(launch);
        self
    }

    pub fn loads(&self) -> &[RecordedLoad] {
        &self.loads
    }

    pub fn last_load(&self) -> Option<&RecordedLoad> {
        self.loads.last()
    }

    /// Every script evaluated so far, in order.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn take_scripts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.scripts)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn push(&mut self, event: SurfaceEvent) {
        self.queue.push(event);
    }

    /// Queue a raw message from the page of the most recent load.
    pub fn post(&mut self, raw: impl Into<String>) {
        self.push(SurfaceEvent::Message {
            generation: self.current_generation(),
            raw: raw.into(),
        });
    }

    /// Generation of the most recent load, `LoadGeneration(0)` before any.
    pub fn current_generation(&self) -> LoadGeneration {
        self.loads
            .last()
            .map_or(LoadGeneration(0), |l| l.generation)
    }

    /// Queue a finished signal for the most recent load.
    pub fn finish_load(&mut self) {
        if let Some(generation) = self.loads.last().map(|l| l.generation) {
            self.push(SurfaceEvent::PageFinished { generation });
        }
    }
}

impl WebSurface for HeadlessSurface {
    fn channel(&self) -> NativeChannel {
        self.channel
    }

    fn load_html(
        &mut self,
        html: &str,
        base_url: &str,
        generation: LoadGeneration,
    ) -> Result<(), WidgetError> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        self.loads.push(RecordedLoad {
            html: html.to_string(),
            base_url: base_url.to_string(),
            generation,
        });
        Ok(())
    }

    fn evaluate_script(&mut self, script: &str) -> Result<(), WidgetError> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        self.scripts.push(script.to_string());
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.queue)
    }

    fn launch_file_chooser(
        &mut self,
        _request: &FileChooserRequest,
    ) -> Result<ChooserLaunch, WidgetError> {
        self.chooser
            .ok_or_else(|| WidgetError::Surface("no file chooser available".to_string()))
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.queue.clear();
    }
}
