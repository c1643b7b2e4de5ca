use tracing::{debug, error, info, warn};

use crate::events::ChatEvent;
use crate::file_chooser::{ChooserLaunch, FileChooserRequest, FileSelectionCallback, FILE_CHOOSER_REQUEST_CODE};
use crate::hit_test::ChatWindowState;
use crate::ipc::{decode, scripts, InboundEvent};
use crate::lifecycle::LoadGeneration;
use crate::surface::{SurfaceEvent, WebSurface};

use super::ChatWidget;

impl<S: WebSurface> ChatWidget<S> {
    /// Process everything the surface queued. Returns how many surface
    /// events were handled.
    pub fn pump(&mut self) -> usize {
        if self.destroyed {
            return 0;
        }
        let events = self.surface.drain_events();
        let count = events.len();
        for event in events {
            self.handle_surface_event(event);
        }
        count
    }

    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::PageFinished { generation } => self.on_page_finished(generation),
            SurfaceEvent::LoadFailed {
                generation,
                message,
            } => self.on_load_failed(generation, message),
            SurfaceEvent::Message { generation, raw } => {
                if self.lifecycle.is_current(generation) {
                    self.handle_message(&raw);
                } else {
                    debug!(widget = %self.id, %generation, "Ignoring message from a discarded page");
                }
            }
            SurfaceEvent::OpenWindow { url } => {
                info!(widget = %self.id, url = %url, "Page requested external link");
                self.emit(ChatEvent::ExternalLinkRequested { url });
            }
            SurfaceEvent::FileChooserRequested { request, callback } => {
                self.on_file_chooser_requested(request, callback)
            }
        }
    }

    /// Decode and apply one raw message from the current page. Rejected
    /// messages are logged and otherwise ignored.
    pub fn handle_message(&mut self, raw: &str) {
        match decode(raw) {
            Ok(event) => self.apply_inbound(event),
            Err(e) => warn!(widget = %self.id, error = %e, "Rejected bridge message"),
        }
    }

    fn on_page_finished(&mut self, generation: LoadGeneration) {
        if !self.lifecycle.on_page_finished(generation) {
            debug!(widget = %self.id, %generation, "Ignoring stale or duplicate page-finished");
            return;
        }
        info!(widget = %self.id, %generation, "Chat shell loaded");
        self.inject_init_script();
        self.emit(ChatEvent::Loaded);
    }

    fn on_load_failed(&mut self, generation: LoadGeneration, message: String) {
        if !self.lifecycle.is_current(generation) {
            debug!(widget = %self.id, %generation, "Ignoring failure of a discarded load");
            return;
        }
        error!(widget = %self.id, %generation, error = %message, "Chat shell failed to load");
        self.emit(ChatEvent::Error { message });
    }

    fn apply_inbound(&mut self, event: InboundEvent) {
        debug!(widget = %self.id, ?event, "Bridge message");
        match event {
            InboundEvent::Initialized => {
                self.lifecycle.mark_initialized();
                self.emit(ChatEvent::Initialized);
            }
            InboundEvent::Ready => {
                self.ready = true;
                self.emit(ChatEvent::Ready);
            }
            InboundEvent::WindowOpened => {
                self.chat_state = ChatWindowState::Open;
                self.emit(ChatEvent::ChatOpened);
            }
            InboundEvent::WindowClosed => {
                let was_open = self.chat_state.is_open();
                self.chat_state = ChatWindowState::Closed;
                self.emit(ChatEvent::ChatClosed { was_open });
            }
            InboundEvent::VisibilityChanged(element) => {
                debug!(widget = %self.id, selector = element.selector(), "Measuring element");
                if let Err(e) = self.surface.evaluate_script(&scripts::measure_script(element)) {
                    warn!(widget = %self.id, error = %e, "Failed to inject measurement script");
                }
            }
            InboundEvent::BoundsUpdated { element, rect } => {
                debug!(widget = %self.id, selector = element.selector(), %rect, "Bounds updated");
                self.bounds.update(element, rect);
                self.emit(ChatEvent::InteractiveBoundsChanged { element, rect });
            }
            InboundEvent::UnreadCountChanged(count) => {
                self.emit(ChatEvent::UnreadCountChanged { count });
            }
            InboundEvent::Log(message) => {
                if self.session.config().enable_logging {
                    debug!(target: "pylon::page", widget = %self.id, "{message}");
                }
            }
        }
    }

    fn on_file_chooser_requested(
        &mut self,
        request: FileChooserRequest,
        callback: FileSelectionCallback,
    ) {
        match self.files.lock() {
            Ok(mut slot) => slot.begin(callback),
            Err(_) => {
                error!(widget = %self.id, "File selection slot poisoned");
                callback(None);
                return;
            }
        }

        match self.surface.launch_file_chooser(&request) {
            Ok(ChooserLaunch::ForResult) => {
                debug!(widget = %self.id, mime = request.mime_type(), "File chooser launched");
            }
            Ok(ChooserLaunch::Detached) => {
                warn!(
                    widget = %self.id,
                    "File chooser launched without a result-capable context; forward the activity result to PylonContext::handle_activity_result"
                );
                self.emit(ChatEvent::FileChooserLaunched {
                    request_code: FILE_CHOOSER_REQUEST_CODE,
                });
            }
            Err(e) => {
                error!(widget = %self.id, error = %e, "Cannot open file chooser");
                if let Ok(mut slot) = self.files.lock() {
                    slot.cancel();
                }
            }
        }
    }
}
