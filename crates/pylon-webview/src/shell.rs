//! The HTML document loaded into the web surface.
//!
//! The shell is transparent and ignores pointer events except on the
//! widget's own elements, publishes the chat settings, installs the async
//! loader stub for `window.Pylon`, and reports `onReady` once the stub
//! exists. With CSP enabled every inline `<style>`/`<script>` carries a
//! per-render nonce.

use pylon_config::colors::is_css_color;
use pylon_config::Session;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;

use crate::ipc::{js_literal, NativeChannel};

const NONCE_LEN: usize = 16;

/// A fresh 16-character alphanumeric CSP nonce.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// The `Content-Security-Policy` directive list for a given nonce.
pub fn csp_policy(nonce: &str) -> String {
    [
        "connect-src 'self' https://*.usepylon.com wss://*.pusher.com".to_string(),
        format!("script-src 'self' https://widget.usepylon.com 'nonce-{nonce}'"),
        "font-src 'self' https://*.usepylon.com".to_string(),
        format!("style-src 'self' https://*.usepylon.com 'nonce-{nonce}' 'unsafe-inline'"),
        "img-src 'self' https://*.usepylon.com https://pylon-avatars.s3.us-west-1.amazonaws.com https://d3vl36l12sfx26.cloudfront.net".to_string(),
        "frame-src *".to_string(),
        "child-src *".to_string(),
        "object-src 'none'".to_string(),
        "base-uri 'self'".to_string(),
    ]
    .join("; ")
}

/// Render the shell for `session`.
///
/// `nonce` is only used when the session has CSP enabled; pass `None` to
/// have one generated.
pub fn render_shell(session: &Session, channel: NativeChannel, nonce: Option<&str>) -> String {
    let config = session.config();

    let nonce = config
        .enable_csp
        .then(|| nonce.map(str::to_string).unwrap_or_else(generate_nonce));
    let csp_meta = nonce
        .as_deref()
        .map(|n| {
            format!(
                r#"<meta http-equiv="Content-Security-Policy" content="{}">"#,
                csp_policy(n)
            )
        })
        .unwrap_or_default();
    let nonce_attr = nonce
        .as_deref()
        .map(|n| format!(r#" nonce="{n}""#))
        .unwrap_or_default();

    let primary_color_style = match config.primary_color.as_deref() {
        Some(color) if is_css_color(color) => {
            format!(":root {{ --pylon-primary-color: {color}; }}")
        }
        Some(color) => {
            tracing::warn!(color, "Ignoring invalid primary color");
            String::new()
        }
        None => String::new(),
    };

    let settings = serde_json::to_value(session.chat_settings())
        .map(|v| script_safe(&v))
        .unwrap_or_else(|_| "{}".to_string());
    let script_url = script_safe(&Value::String(config.widget_script_url.clone()));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">
{csp_meta}
<style{nonce_attr}>
body {{
    margin: 0;
    padding: 0;
    padding-top: env(safe-area-inset-top);
    padding-bottom: env(safe-area-inset-bottom);
    padding-right: env(safe-area-inset-right);
    padding-left: env(safe-area-inset-left);
    background-color: transparent;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    pointer-events: none;
}}
.pylon-widget, [id*="pylon"], [class*="pylon"] {{
    pointer-events: auto !important;
}}
{primary_color_style}
</style>
</head>
<body>
<script{nonce_attr}>
{bootstrap}
if (!window.pylon) {{ window.pylon = {{}}; }}
window.pylon.debug = {debug};
window.pylon.chat_settings = {settings};
</script>
<script{nonce_attr}>
(function(){{
    var e=window;
    var t=document;
    var n=function(){{n.e(arguments)}};
    n.q=[];
    n.e=function(e){{n.q.push(e)}};
    e.Pylon=n;
    var r=function(){{
        var e=t.createElement("script");
        e.setAttribute("type","text/javascript");
        e.setAttribute("async","true");
        e.setAttribute("src",{script_url});
        var n=t.getElementsByTagName("script")[0];
        n.parentNode.insertBefore(e,n)
    }};
    if(t.readyState==="complete"){{r()}}
    else if(e.addEventListener){{e.addEventListener("load",r,false)}}
}})();
</script>
<script{nonce_attr}>
window.pylonReady = function() {{
    window.__pylonPost({{ type: 'onReady' }});
}};
if (window.Pylon) {{
    window.pylonReady();
}}
</script>
</body>
</html>
"#,
        bootstrap = channel.bootstrap_script(),
        debug = config.debug_mode,
    )
}

/// A JS literal that cannot close the surrounding `<script>` element.
fn script_safe(value: &Value) -> String {
    js_literal(value).replace("</", "<\\/")
}

// =============================================================================
// TESTS
// =============================================================================
