//! Native -> page commands.
//!
//! Every argument reaches the page as a JSON literal, so no host-supplied
//! string is ever spliced into script text unescaped.

use serde_json::Value;

/// Field map for the custom-field and ticket-form commands. `Value::Null`
/// entries are sent as JS `null`.
pub type FieldMap = serde_json::Map<String, Value>;

/// One argument to `window.Pylon(name, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptArg {
    /// A string, encoded as a JSON string literal.
    Literal(String),
    /// Arbitrary JSON data.
    Data(Value),
}

impl ScriptArg {
    fn to_js(&self) -> String {
        match self {
            ScriptArg::Literal(s) => js_literal(&Value::String(s.clone())),
            ScriptArg::Data(v) => js_literal(v),
        }
    }
}

/// Encode a JSON value as a JS expression.
///
/// JSON is a JS subset except for the raw line and paragraph separators,
/// which are escaped here. Serialization of a `Value` cannot fail.
pub fn js_literal(value: &Value) -> String {
    value
        .to_string()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// `if(window.Pylon){ window.Pylon("name", a, b); }`
pub fn invoke_script(name: &str, args: &[ScriptArg]) -> String {
    let mut call = js_literal(&Value::String(name.to_string()));
    for arg in args {
        call.push_str(", ");
        call.push_str(&arg.to_js());
    }
    format!("if(window.Pylon){{ window.Pylon({call}); }}")
}

// =============================================================================
// COMMANDS
// =============================================================================

/// The closed set of commands the host can send to the hosted widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    Show,
    Hide,
    ShowChatBubble,
    HideChatBubble,
    ShowNewMessage { message: String, is_html: bool },
    SetNewIssueCustomFields(FieldMap),
    SetTicketFormFields(FieldMap),
    ShowTicketForm(String),
    ShowKnowledgeBaseArticle(String),
}

impl WidgetCommand {
    /// Command name understood by `window.Pylon`.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetCommand::Show => "show",
            WidgetCommand::Hide => "hide",
            WidgetCommand::ShowChatBubble => "showChatBubble",
            WidgetCommand::HideChatBubble => "hideChatBubble",
            WidgetCommand::ShowNewMessage { .. } => "showNewMessage",
            WidgetCommand::SetNewIssueCustomFields(_) => "setNewIssueCustomFields",
            WidgetCommand::SetTicketFormFields(_) => "setTicketFormFields",
            WidgetCommand::ShowTicketForm(_) => "showTicketForm",
            WidgetCommand::ShowKnowledgeBaseArticle(_) => "showKnowledgeBaseArticle",
        }
    }

    pub fn args(&self) -> Vec<ScriptArg> {
        match self {
            WidgetCommand::Show
            | WidgetCommand::Hide
            | WidgetCommand::ShowChatBubble
            | WidgetCommand::HideChatBubble => Vec::new(),
            WidgetCommand::ShowNewMessage { message, is_html } => {
                let mut args = vec![ScriptArg::Literal(message.clone())];
                if *is_html {
                    args.push(ScriptArg::Data(serde_json::json!({ "isHtml": true })));
                }
                args
            }
            WidgetCommand::SetNewIssueCustomFields(fields)
            | WidgetCommand::SetTicketFormFields(fields) => {
                vec![ScriptArg::Data(Value::Object(fields.clone()))]
            }
            WidgetCommand::ShowTicketForm(slug) => vec![ScriptArg::Literal(slug.clone())],
            WidgetCommand::ShowKnowledgeBaseArticle(id) => vec![ScriptArg::Literal(id.clone())],
        }
    }

    pub fn to_script(&self) -> String {
        invoke_script(self.name(), &self.args())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_arg_commands() {
        assert_eq!(
            WidgetCommand::Show.to_script(),
            r#"if(window.Pylon){ window.Pylon("show"); }"#
        );
        assert_eq!(
            WidgetCommand::HideChatBubble.to_script(),
            r#"if(window.Pylon){ window.Pylon("hideChatBubble"); }"#
        );
    }

    #[test]
    fn show_new_message_plain_and_html() {
        let plain = WidgetCommand::ShowNewMessage {
            message: "Hi".into(),
            is_html: false,
        };
        assert_eq!(
            plain.to_script(),
            r#"if(window.Pylon){ window.Pylon("showNewMessage", "Hi"); }"#
        );

        let html = WidgetCommand::ShowNewMessage {
            message: "<b>Hi</b>".into(),
            is_html: true,
        };
        assert_eq!(
            html.to_script(),
            r#"if(window.Pylon){ window.Pylon("showNewMessage", "<b>Hi</b>", {"isHtml":true}); }"#
        );
    }

    #[test]
    fn quotes_cannot_break_out() {
        let script = WidgetCommand::ShowTicketForm(r#"x"); alert(1); ("#.into()).to_script();
        assert_eq!(
            script,
            r#"if(window.Pylon){ window.Pylon("showTicketForm", "x\"); alert(1); ("); }"#
        );
    }

    #[test]
    fn line_separators_are_escaped() {
        let script = WidgetCommand::ShowKnowledgeBaseArticle("a\u{2028}b\u{2029}c".into()).to_script();
        assert!(script.contains(r#""a\u2028b\u2029c""#));
        assert!(!script.contains('\u{2028}'));
    }

    #[test]
    fn field_map_keeps_nulls() {
        let mut fields = FieldMap::new();
        fields.insert("plan".into(), json!("pro"));
        fields.insert("seats".into(), json!(5));
        fields.insert("trial".into(), Value::Null);

        let script = WidgetCommand::SetNewIssueCustomFields(fields).to_script();
        assert!(script.starts_with(r#"if(window.Pylon){ window.Pylon("setNewIssueCustomFields", {"#));
        assert!(script.contains(r#""trial":null"#));
        assert!(script.contains(r#""seats":5"#));
        assert!(script.contains(r#""plan":"pro""#));
    }

    #[test]
    fn empty_field_map_is_an_empty_object() {
        assert_eq!(
            WidgetCommand::SetTicketFormFields(FieldMap::new()).to_script(),
            r#"if(window.Pylon){ window.Pylon("setTicketFormFields", {}); }"#
        );
    }

    #[test]
    fn js_literal_encodes_scalars() {
        assert_eq!(js_literal(&Value::Null), "null");
        assert_eq!(js_literal(&json!(true)), "true");
        assert_eq!(js_literal(&json!("a\nb")), r#""a\nb""#);
    }
}
