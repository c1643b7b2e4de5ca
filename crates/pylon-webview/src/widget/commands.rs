use pylon_common::{PylonError, WidgetError};
use pylon_config::{ChatConfig, ChatUser};
use tracing::{debug, info};

use crate::ipc::{invoke_script, scripts, FieldMap, ScriptArg, WidgetCommand};
use crate::surface::WebSurface;

use super::{ChatWidget, Dispatch};

impl<S: WebSurface> ChatWidget<S> {
    // -------------------------------------------------------------------------
    // Widget commands
    // -------------------------------------------------------------------------

    /// Ask the widget to open the chat window. The window state only
    /// changes when the page reports it.
    pub fn open_chat(&mut self) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::Show)
    }

    pub fn close_chat(&mut self) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::Hide)
    }

    pub fn show_chat_bubble(&mut self) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::ShowChatBubble)
    }

    pub fn hide_chat_bubble(&mut self) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::HideChatBubble)
    }

    pub fn show_new_message(
        &mut self,
        message: impl Into<String>,
        is_html: bool,
    ) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::ShowNewMessage {
            message: message.into(),
            is_html,
        })
    }

    pub fn set_new_issue_custom_fields(&mut self, fields: FieldMap) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::SetNewIssueCustomFields(fields))
    }

    pub fn set_ticket_form_fields(&mut self, fields: FieldMap) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::SetTicketFormFields(fields))
    }

    pub fn show_ticket_form(&mut self, slug: impl Into<String>) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::ShowTicketForm(slug.into()))
    }

    pub fn show_knowledge_base_article(
        &mut self,
        article_id: impl Into<String>,
    ) -> Result<Dispatch, WidgetError> {
        self.send(WidgetCommand::ShowKnowledgeBaseArticle(article_id.into()))
    }

    pub fn send(&mut self, command: WidgetCommand) -> Result<Dispatch, WidgetError> {
        self.invoke(command.name(), &command.args())
    }

    /// `window.Pylon(name, ...args)`, dropped while the page is not ready.
    pub fn invoke(&mut self, name: &str, args: &[ScriptArg]) -> Result<Dispatch, WidgetError> {
        self.check_alive()?;
        if !self.ready {
            debug!(widget = %self.id, command = name, "Dropping command, widget not ready");
            return Ok(Dispatch::Dropped);
        }
        debug!(widget = %self.id, command = name, "Sending command");
        self.surface.evaluate_script(&invoke_script(name, args))?;
        Ok(Dispatch::Sent)
    }

    /// Click the DOM element with id `selector`. Not gated on readiness;
    /// a missing element is a no-op in the page.
    pub fn click_element_by_selector(&mut self, selector: &str) -> Result<(), WidgetError> {
        self.check_alive()?;
        debug!(widget = %self.id, selector, "Clicking element");
        self.surface
            .evaluate_script(&scripts::click_element_script(selector))
    }

    // -------------------------------------------------------------------------
    // Session updates
    // -------------------------------------------------------------------------

    /// Replace the user and, if the page is loaded, re-inject settings.
    /// A user without an email or name is rejected and nothing changes.
    pub fn update_user(&mut self, user: Option<ChatUser>) -> Result<(), PylonError> {
        self.check_alive()?;
        if let Some(user) = &user {
            pylon_config::validate_user(user)?;
        }
        self.session = self.session.with_user(user);
        self.refresh_settings();
        Ok(())
    }

    /// Replace the current user's identity hash. Fails with
    /// [`WidgetError::MissingUser`] when no user is set.
    pub fn update_email_hash(&mut self, email_hash: Option<String>) -> Result<(), WidgetError> {
        self.check_alive()?;
        self.session = self.session.with_email_hash(email_hash)?;
        self.refresh_settings();
        Ok(())
    }

    /// Replace the config. Settings are re-injected in place; a changed
    /// script URL only takes effect on the next forced reload.
    pub fn update_config(&mut self, config: ChatConfig) -> Result<(), PylonError> {
        self.check_alive()?;
        pylon_config::validate(&config)?;
        self.session = self.session.with_config(config);
        self.refresh_settings();
        Ok(())
    }

    fn refresh_settings(&mut self) {
        if self.lifecycle.is_loaded() {
            info!(widget = %self.id, "Re-injecting chat settings");
            self.inject_init_script();
        }
    }
}
