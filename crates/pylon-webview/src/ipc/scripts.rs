//! Scripts evaluated in the embedded page by the widget itself.

use pylon_config::Session;
use serde_json::Value;

use super::channel::NativeChannel;
use super::commands::js_literal;
use crate::bounds::InteractiveElement;

/// Publishes settings, registers the widget hooks, and reports
/// `onInitialized`.
///
/// Safe to run more than once per page: settings are always refreshed,
/// but hooks are registered only on the first run so a re-injection after
/// a user change does not duplicate every event.
pub fn init_script(session: &Session, channel: NativeChannel) -> String {
    let settings = serde_json::to_value(session.chat_settings())
        .map(|v| js_literal(&v))
        .unwrap_or_else(|_| "{}".to_string());
    let debug = session.config().debug_mode;

    let bubble = quoted(InteractiveElement::Bubble.selector());
    let survey = quoted(InteractiveElement::SurveyPopup.selector());
    let message = quoted(InteractiveElement::MessagePopup.selector());

    format!(
        r#"(function() {{
    {bootstrap}
    if (!window.pylon) {{ window.pylon = {{}}; }}
    window.pylon.debug = {debug};
    window.pylon.chat_settings = {settings};
    if (window.Pylon && !window.__pylonHooksRegistered) {{
        window.__pylonHooksRegistered = true;
        window.Pylon('onShow', function() {{
            window.__pylonPost({{ type: 'onChatWindowOpened' }});
        }});
        window.Pylon('onHide', function() {{
            window.__pylonPost({{ type: 'onChatWindowClosed' }});
        }});
        window.Pylon('onShowChatBubble', function() {{
            window.__pylonPost({{ type: 'onInteractiveElementUpdate', selector: {bubble} }});
            window.__pylonPost({{ type: 'onInteractiveElementUpdate', selector: {message} }});
        }});
        window.Pylon('onHideChatBubble', function() {{
            window.__pylonPost({{ type: 'onInteractiveElementUpdate', selector: {bubble} }});
            window.__pylonPost({{ type: 'onInteractiveElementUpdate', selector: {message} }});
        }});
        window.Pylon('onPopupSurveyVisibilityChange', function(isShowing) {{
            window.__pylonPost({{ type: 'onInteractiveElementUpdate', selector: {survey} }});
        }});
        window.Pylon('onPopupMessageVisibilityChange', function(isShowing) {{
            window.__pylonPost({{ type: 'onInteractiveElementUpdate', selector: {message} }});
        }});
        window.Pylon('onChangeUnreadMessagesCount', function(unreadCount) {{
            window.__pylonPost({{ type: 'onUnreadCountChanged', count: Number(unreadCount) || 0 }});
        }});
    }}
    window.__pylonPost({{ type: 'onInitialized' }});
}})();"#,
        bootstrap = channel.bootstrap_script(),
    )
}

/// Measures `element` and posts `updateInteractiveBounds` in physical
/// pixels. An absent or zero-width element reports an all-zero rectangle.
pub fn measure_script(element: InteractiveElement) -> String {
    let selector = quoted(element.selector());
    format!(
        r#"(function() {{
    var el = document.getElementById({selector});
    var dpr = window.devicePixelRatio || 1;
    var rect = el ? el.getBoundingClientRect() : null;
    if (rect !== null && rect.width > 0) {{
        window.__pylonPost({{ type: 'updateInteractiveBounds', selector: {selector},
            left: rect.left * dpr, top: rect.top * dpr, right: rect.right * dpr, bottom: rect.bottom * dpr }});
    }} else {{
        window.__pylonPost({{ type: 'updateInteractiveBounds', selector: {selector},
            left: 0, top: 0, right: 0, bottom: 0 }});
    }}
}})();"#
    )
}

/// Clicks the element with DOM id `selector`, if it exists.
pub fn click_element_script(selector: &str) -> String {
    let selector = quoted(selector);
    format!(
        r#"(function() {{
    var el = document.getElementById({selector});
    if (el && el.click) {{ el.click(); }}
}})();"#
    )
}

fn quoted(s: &str) -> String {
    js_literal(&Value::String(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pylon_config::{ChatConfig, ChatUser};

    fn session() -> Session {
        let config = ChatConfig::builder("app-1").debug_mode(true).build();
        Session::new(config, Some(ChatUser::new("ada@example.com", "Ada")))
    }

    #[test]
    fn init_script_publishes_settings() {
        let script = init_script(&session(), NativeChannel::WryIpc);
        assert!(script.contains("window.pylon.debug = true;"));
        assert!(script.contains(r#""app_id":"app-1""#));
        assert!(script.contains(r#""email":"ada@example.com""#));
        assert!(script.contains("window.ipc.postMessage"));
    }

    #[test]
    fn init_script_registers_hooks_once() {
        let script = init_script(&session(), NativeChannel::AndroidInterface);
        assert!(script.contains("!window.__pylonHooksRegistered"));
        for hook in [
            "onShow",
            "onHide",
            "onShowChatBubble",
            "onHideChatBubble",
            "onPopupSurveyVisibilityChange",
            "onPopupMessageVisibilityChange",
            "onChangeUnreadMessagesCount",
        ] {
            assert!(script.contains(&format!("window.Pylon('{hook}'")), "{hook}");
        }
        assert!(script.trim_end().ends_with("window.__pylonPost({ type: 'onInitialized' });\n})();"));
    }

    #[test]
    fn init_script_without_user_omits_identity() {
        let session = Session::new(ChatConfig::new("app-1"), None);
        let script = init_script(&session, NativeChannel::WebKitHandler);
        assert!(script.contains("window.pylon.debug = false;"));
        assert!(!script.contains("email"));
    }

    #[test]
    fn init_script_escapes_user_strings() {
        let user = ChatUser::new("a@b.c", "</script><script>alert(1)</script>\u{2028}");
        let session = Session::new(ChatConfig::new("app-1"), Some(user));
        let script = init_script(&session, NativeChannel::WryIpc);
        assert!(script.contains(r#"\u2028"#));
        assert!(!script.contains('\u{2028}'));
    }

    #[test]
    fn measure_script_targets_selector() {
        let script = measure_script(InteractiveElement::SurveyPopup);
        assert!(script.contains(r#"document.getElementById("pylon-chat-popup-survey")"#));
        assert!(script.contains("window.devicePixelRatio"));
        assert!(script.contains("left: 0, top: 0, right: 0, bottom: 0"));
    }

    #[test]
    fn click_script_quotes_selector() {
        let script = click_element_script("x'); alert(1); ('");
        assert!(script.contains(r#"document.getElementById("x'); alert(1); ('")"#));
        assert!(script.contains("el.click()"));
    }
}
