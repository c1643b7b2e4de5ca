//! The native RN view: props in, widget rebuilt, events and commands out.

use pylon_common::PylonError;
use pylon_config::Session;
use serde_json::Value;
use tracing::{debug, info};

use crate::events::ChatEvent;
use crate::surface::WebSurface;
use crate::widget::ChatWidget;

use super::commands::RnCommand;
use super::events::RnEvent;
use super::pointer::PointerEventsMode;
use super::props::NativeViewProps;

/// Builds the web surface for each new widget.
pub type SurfaceFactory<S> = Box<dyn FnMut() -> S>;

/// Native side of the RN chat view.
///
/// Every props update that yields a different [`Session`] discards the
/// current widget and builds a new one on a fresh surface. Until the props
/// carry an app id there is no widget: touches pass through and commands
/// are ignored.
pub struct RnChatView<S: WebSurface> {
    props: NativeViewProps,
    pointer_mode: PointerEventsMode,
    widget: Option<ChatWidget<S>>,
    new_surface: SurfaceFactory<S>,
    /// Events the previous widget produced before it was replaced.
    pending: Vec<ChatEvent>,
}

impl<S: WebSurface> RnChatView<S> {
    pub fn new(new_surface: impl FnMut() -> S + 'static) -> Self {
        Self {
            props: NativeViewProps::default(),
            pointer_mode: PointerEventsMode::default(),
            widget: None,
            new_surface: Box::new(new_surface),
            pending: Vec::new(),
        }
    }

    pub fn props(&self) -> &NativeViewProps {
        &self.props
    }

    pub fn widget(&self) -> Option<&ChatWidget<S>> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut ChatWidget<S>> {
        self.widget.as_mut()
    }

    /// Apply new props. Returns whether a new widget was created.
    ///
    /// Invalid config or user props are rejected and the current widget is
    /// kept.
    pub fn set_props(&mut self, props: NativeViewProps) -> Result<bool, PylonError> {
        let session = props.session();
        if let Some(session) = &session {
            pylon_config::validate(session.config())?;
            if let Some(user) = session.user() {
                pylon_config::validate_user(user)?;
            }
        }
        self.props = props;

        let Some(session) = session else {
            debug!("RN chat view has no app id yet");
            return Ok(false);
        };
        if self.widget.as_ref().map(ChatWidget::session) == Some(&session) {
            return Ok(false);
        }
        self.rebuild(session)?;
        Ok(true)
    }

    fn rebuild(&mut self, session: Session) -> Result<(), PylonError> {
        if let Some(mut old) = self.widget.take() {
            old.pump();
            self.pending.extend(old.drain_events());
            old.destroy();
        }
        let mut widget = ChatWidget::new(session, (self.new_surface)());
        info!(widget = %widget.id(), "Recreating RN chat widget");
        widget.ensure_loaded(false)?;
        self.widget = Some(widget);
        Ok(())
    }

    pub fn pointer_events(&self) -> PointerEventsMode {
        self.pointer_mode
    }

    /// Set the `pointerEvents` prop; unknown values behave like `auto`.
    pub fn set_pointer_events(&mut self, mode: &str) {
        self.pointer_mode = mode.parse().unwrap_or_default();
    }

    /// Whether the view consumes a touch at (`x`, `y`) physical pixels.
    ///
    /// The wrapped widget is the only child; the view has no touch handling
    /// of its own.
    pub fn dispatch_touch(&self, x: f64, y: f64) -> bool {
        let widget = self.widget.as_ref();
        self.pointer_mode.dispatch(
            || widget.is_some_and(|w| w.should_handle_touch_at(x, y)),
            || false,
        )
    }

    /// Process queued surface events of the current widget.
    pub fn pump(&mut self) -> usize {
        self.widget.as_mut().map_or(0, ChatWidget::pump)
    }

    /// Host events as RN events, bounds converted to dp with `density`.
    pub fn drain_rn_events(&mut self, density: f64) -> Vec<RnEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if let Some(widget) = self.widget.as_mut() {
            events.extend(widget.drain_events());
        }
        events
            .iter()
            .filter_map(|event| RnEvent::from_chat_event(event, density))
            .collect()
    }

    /// Run a view-manager command. Ignored while there is no widget.
    pub fn command(&mut self, name: &str, args: &[Value]) -> Result<(), PylonError> {
        let command = RnCommand::parse(name, args)?;
        match self.widget.as_mut() {
            Some(widget) => Ok(command.apply(widget)?),
            None => {
                debug!(command = name, "No chat widget; ignoring RN command");
                Ok(())
            }
        }
    }

    pub fn destroy(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.destroy();
        }
    }
}
