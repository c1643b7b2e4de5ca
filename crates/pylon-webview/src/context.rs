//! Process-level SDK state, passed explicitly to whatever creates widgets.

use std::sync::{Arc, Mutex};

use pylon_common::{PylonError, WidgetError};
use pylon_config::{ChatConfig, ChatConfigBuilder, ChatUser, Session};
use tracing::{error, info};

use crate::file_chooser::{ActivityResult, FileSelectionSlot};
use crate::surface::WebSurface;
use crate::widget::ChatWidget;

/// Holds the current [`Session`] and the file-selection slot shared by all
/// widgets it creates.
///
/// Construct one at startup and hand it to the code that creates chat
/// widgets. Every operation except [`initialize`](Self::initialize),
/// [`is_initialized`](Self::is_initialized) and
/// [`handle_activity_result`](Self::handle_activity_result) requires a prior
/// `initialize`.
#[derive(Debug, Default)]
pub struct PylonContext {
    session: Option<Session>,
    files: Arc<Mutex<FileSelectionSlot>>,
}

impl PylonContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and install `config`, keeping the current user if any.
    pub fn initialize(&mut self, config: ChatConfig) -> Result<(), PylonError> {
        pylon_config::validate(&config)?;
        info!(app_id = %config.app_id, "Pylon initialized");
        let user = self.session.as_ref().and_then(|s| s.user().cloned());
        self.session = Some(Session::new(config, user));
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Result<&Session, WidgetError> {
        self.session.as_ref().ok_or(WidgetError::NotInitialized)
    }

    /// Rebuild the config through `f`, keeping the user.
    pub fn update_configuration(
        &mut self,
        f: impl FnOnce(&mut ChatConfigBuilder),
    ) -> Result<(), PylonError> {
        let current = self.session()?;
        let config = current.config().rebuild(f);
        pylon_config::validate(&config)?;
        let session = current.with_config(config);
        self.session = Some(session);
        Ok(())
    }

    pub fn set_user(&mut self, user: ChatUser) -> Result<(), PylonError> {
        pylon_config::validate_user(&user)?;
        let session = self.session()?.with_user(Some(user));
        self.session = Some(session);
        Ok(())
    }

    pub fn clear_user(&mut self) -> Result<(), WidgetError> {
        let session = self.session()?.with_user(None);
        self.session = Some(session);
        Ok(())
    }

    /// Attach an identity-verification hash to the current user.
    pub fn set_email_hash(&mut self, email_hash: Option<String>) -> Result<(), WidgetError> {
        let session = self.session()?.with_email_hash(email_hash)?;
        self.session = Some(session);
        Ok(())
    }

    /// A widget bound to the current session, already loading.
    pub fn create_chat<S: WebSurface>(&self, surface: S) -> Result<ChatWidget<S>, WidgetError> {
        let session = self.session()?.clone();
        let mut widget = ChatWidget::with_file_slot(session, surface, Arc::clone(&self.files));
        widget.ensure_loaded(false)?;
        Ok(widget)
    }

    /// Hand a picker result to the pending file selection. Returns whether
    /// a selection was waiting for it.
    pub fn handle_activity_result(&self, result: &ActivityResult) -> bool {
        match self.files.lock() {
            Ok(mut slot) => slot.complete(result),
            Err(_) => {
                error!("File selection slot poisoned");
                false
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
