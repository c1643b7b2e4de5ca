//! The chat widget controller.
//!
//! `ChatWidget` owns one web surface and everything the native side knows
//! about the page inside it: load sequencing, readiness, chat window state,
//! and the bounds of the interactive elements. All of it lives on the UI
//! thread; the host calls [`ChatWidget::pump`] to process whatever the
//! surface queued and then reads events with [`ChatWidget::drain_events`]
//! or an async [`subscribe`](ChatWidget::subscribe) receiver.

use std::sync::{Arc, Mutex};

use pylon_common::{EventBus, Point, WidgetError, WidgetId};
use pylon_config::Session;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use crate::bounds::BoundsStore;
use crate::events::ChatEvent;
use crate::file_chooser::FileSelectionSlot;
use crate::hit_test::{self, ChatWindowState, TouchDisposition};
use crate::ipc::scripts;
use crate::lifecycle::LifecycleController;
use crate::overlay::{self, OverlayRegion};
use crate::shell::render_shell;
use crate::surface::WebSurface;

mod commands;
mod handlers;


/// Buffered events per async subscriber before it starts lagging.
const EVENT_BUS_CAPACITY: usize = 64;

/// What happened to a host command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The script was handed to the surface.
    Sent,
    /// The page is not ready; the command was discarded.
    Dropped,
}

pub struct ChatWidget<S: WebSurface> {
    id: WidgetId,
    session: Session,
    surface: S,
    bounds: BoundsStore,
    chat_state: ChatWindowState,
    lifecycle: LifecycleController,
    ready: bool,
    destroyed: bool,
    events: Vec<ChatEvent>,
    bus: EventBus<ChatEvent>,
    files: Arc<Mutex<FileSelectionSlot>>,
}

impl<S: WebSurface> ChatWidget<S> {
    /// A widget with its own file-selection slot. Widgets created through
    /// [`PylonContext::create_chat`](crate::PylonContext::create_chat) share
    /// the context's slot instead.
    pub fn new(session: Session, surface: S) -> Self {
        Self::with_file_slot(session, surface, Arc::new(Mutex::new(FileSelectionSlot::new())))
    }

    pub(crate) fn with_file_slot(
        session: Session,
        surface: S,
        files: Arc<Mutex<FileSelectionSlot>>,
    ) -> Self {
        let id = WidgetId::new();
        debug!(widget = %id, app_id = %session.config().app_id, "Chat widget created");
        Self {
            id,
            session,
            surface,
            bounds: BoundsStore::new(),
            chat_state: ChatWindowState::Closed,
            lifecycle: LifecycleController::new(),
            ready: false,
            destroyed: false,
            events: Vec::new(),
            bus: EventBus::new(EVENT_BUS_CAPACITY),
            files,
        }
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// A copy of the current bounds.
    pub fn bounds(&self) -> BoundsStore {
        self.bounds
    }

    pub fn chat_state(&self) -> ChatWindowState {
        self.chat_state
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    /// Whether the page has reported `ready` since the current load began.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Load the shell unless a load is already in flight or done. With
    /// `force_reload` the current page is discarded and loaded again.
    ///
    /// Returns whether a load was started.
    pub fn ensure_loaded(&mut self, force_reload: bool) -> Result<bool, WidgetError> {
        self.check_alive()?;
        let Some(generation) = self.lifecycle.ensure_loaded(force_reload) else {
            return Ok(false);
        };
        self.ready = false;

        let html = render_shell(&self.session, self.surface.channel(), None);
        let base_url = self.session.config().widget_base_url.clone();
        info!(widget = %self.id, %generation, force_reload, "Loading chat shell");

        if let Err(e) = self.surface.load_html(&html, &base_url, generation) {
            error!(widget = %self.id, %generation, error = %e, "Failed to load chat shell");
            self.emit(ChatEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }
        Ok(true)
    }

    fn inject_init_script(&mut self) {
        let script = scripts::init_script(&self.session, self.surface.channel());
        if let Err(e) = self.surface.evaluate_script(&script) {
            error!(widget = %self.id, error = %e, "Failed to inject init script");
        }
    }

    // -------------------------------------------------------------------------
    // Touches
    // -------------------------------------------------------------------------

    pub fn hit_test(&self, point: Point) -> TouchDisposition {
        hit_test::decide(self.chat_state, &self.bounds, point)
    }

    /// Whether the native container should consume a touch at (`x`, `y`)
    /// physical pixels.
    pub fn should_handle_touch_at(&self, x: f64, y: f64) -> bool {
        self.hit_test(Point::new(x, y)).is_claimed()
    }

    /// Regions to highlight when `debug_mode` is on; empty otherwise.
    pub fn debug_overlay(&self) -> Vec<OverlayRegion> {
        if self.session.config().debug_mode {
            overlay::regions(&self.bounds)
        } else {
            Vec::new()
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Take every host event produced since the last call.
    pub fn drain_events(&mut self) -> Vec<ChatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Async receiver for host events. Events are also kept for
    /// [`drain_events`](Self::drain_events).
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.bus.subscribe()
    }

    fn emit(&mut self, event: ChatEvent) {
        debug!(widget = %self.id, event = event.name(), "Host event");
        self.bus.publish(event.clone());
        self.events.push(event);
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Fail any pending file selection and release the surface. Every later
    /// call returns [`WidgetError::Destroyed`].
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if let Ok(mut slot) = self.files.lock() {
            slot.cancel();
        }
        self.surface.destroy();
        self.destroyed = true;
        self.ready = false;
        info!(widget = %self.id, "Chat widget destroyed");
    }

    fn check_alive(&self) -> Result<(), WidgetError> {
        if self.destroyed {
            Err(WidgetError::Destroyed)
        } else {
            Ok(())
        }
    }
}
