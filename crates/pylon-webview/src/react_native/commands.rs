use pylon_common::{BridgeError, WidgetError};
use serde_json::Value;

use crate::ipc::FieldMap;
use crate::surface::WebSurface;
use crate::widget::ChatWidget;

/// A command dispatched from JS to the native view
/// (`UIManager.dispatchViewManagerCommand`).
#[derive(Debug, Clone, PartialEq)]
pub enum RnCommand {
    OpenChat,
    CloseChat,
    ShowChatBubble,
    HideChatBubble,
    ShowNewMessage { message: String, is_html: bool },
    SetNewIssueCustomFields(FieldMap),
    SetTicketFormFields(FieldMap),
    UpdateEmailHash(Option<String>),
    ShowTicketForm(String),
    ShowKnowledgeBaseArticle(String),
    ClickElementAtSelector(String),
}

impl RnCommand {
    /// Parse a command name and its argument array.
    pub fn parse(name: &str, args: &[Value]) -> Result<Self, BridgeError> {
        let malformed = |reason: &str| BridgeError::MalformedPayload {
            kind: name.to_string(),
            reason: reason.to_string(),
        };
        let string_arg = |i: usize| {
            args.get(i)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| malformed(&format!("argument {i} must be a string")))
        };
        let map_arg = |i: usize| {
            args.get(i)
                .and_then(Value::as_object)
                .cloned()
                .ok_or_else(|| malformed(&format!("argument {i} must be an object")))
        };

        Ok(match name {
            "openChat" => RnCommand::OpenChat,
            "closeChat" => RnCommand::CloseChat,
            "showChatBubble" => RnCommand::ShowChatBubble,
            "hideChatBubble" => RnCommand::HideChatBubble,
            "showNewMessage" => RnCommand::ShowNewMessage {
                message: string_arg(0)?,
                is_html: args.get(1).and_then(Value::as_bool).unwrap_or(false),
            },
            "setNewIssueCustomFields" => RnCommand::SetNewIssueCustomFields(map_arg(0)?),
            "setTicketFormFields" => RnCommand::SetTicketFormFields(map_arg(0)?),
            "updateEmailHash" => {
                RnCommand::UpdateEmailHash(args.first().and_then(Value::as_str).map(str::to_string))
            }
            "showTicketForm" => RnCommand::ShowTicketForm(string_arg(0)?),
            "showKnowledgeBaseArticle" => RnCommand::ShowKnowledgeBaseArticle(string_arg(0)?),
            "clickElementAtSelector" => RnCommand::ClickElementAtSelector(string_arg(0)?),
            other => return Err(BridgeError::UnknownType(other.to_string())),
        })
    }

    /// Run the command against `widget`.
    pub fn apply<S: WebSurface>(self, widget: &mut ChatWidget<S>) -> Result<(), WidgetError> {
        match self {
            RnCommand::OpenChat => widget.open_chat().map(drop),
            RnCommand::CloseChat => widget.close_chat().map(drop),
            RnCommand::ShowChatBubble => widget.show_chat_bubble().map(drop),
            RnCommand::HideChatBubble => widget.hide_chat_bubble().map(drop),
            RnCommand::ShowNewMessage { message, is_html } => {
                widget.show_new_message(message, is_html).map(drop)
            }
            RnCommand::SetNewIssueCustomFields(fields) => {
                widget.set_new_issue_custom_fields(fields).map(drop)
            }
            RnCommand::SetTicketFormFields(fields) => widget.set_ticket_form_fields(fields).map(drop),
            RnCommand::UpdateEmailHash(hash) => widget.update_email_hash(hash),
            RnCommand::ShowTicketForm(slug) => widget.show_ticket_form(slug).map(drop),
            RnCommand::ShowKnowledgeBaseArticle(id) => {
                widget.show_knowledge_base_article(id).map(drop)
            }
            RnCommand::ClickElementAtSelector(selector) => {
                widget.click_element_by_selector(&selector)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_no_arg_commands() {
        assert_eq!(RnCommand::parse("openChat", &[]).unwrap(), RnCommand::OpenChat);
        assert_eq!(
            RnCommand::parse("hideChatBubble", &[]).unwrap(),
            RnCommand::HideChatBubble
        );
    }

    #[test]
    fn show_new_message_defaults_is_html() {
        assert_eq!(
            RnCommand::parse("showNewMessage", &[json!("hi")]).unwrap(),
            RnCommand::ShowNewMessage {
                message: "hi".into(),
                is_html: false
            }
        );
        assert_eq!(
            RnCommand::parse("showNewMessage", &[json!("<b>hi</b>"), json!(true)]).unwrap(),
            RnCommand::ShowNewMessage {
                message: "<b>hi</b>".into(),
                is_html: true
            }
        );
    }

    #[test]
    fn update_email_hash_accepts_null() {
        assert_eq!(
            RnCommand::parse("updateEmailHash", &[Value::Null]).unwrap(),
            RnCommand::UpdateEmailHash(None)
        );
        assert_eq!(
            RnCommand::parse("updateEmailHash", &[json!("h")]).unwrap(),
            RnCommand::UpdateEmailHash(Some("h".into()))
        );
    }

    #[test]
    fn field_commands_need_an_object() {
        let cmd = RnCommand::parse("setTicketFormFields", &[json!({ "a": null })]).unwrap();
        let RnCommand::SetTicketFormFields(fields) = cmd else {
            panic!("wrong command");
        };
        assert_eq!(fields.get("a"), Some(&Value::Null));

        assert!(matches!(
            RnCommand::parse("setNewIssueCustomFields", &[json!([1, 2])]),
            Err(BridgeError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn missing_string_argument_is_rejected() {
        assert!(matches!(
            RnCommand::parse("clickElementAtSelector", &[]),
            Err(BridgeError::MalformedPayload { ref kind, .. }) if kind == "clickElementAtSelector"
        ));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(matches!(
            RnCommand::parse("eval", &[json!("x")]),
            Err(BridgeError::UnknownType(_))
        ));
    }
}
