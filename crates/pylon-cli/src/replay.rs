//! Drive a headless widget from a recorded trace of page messages.

use std::fmt::Write as _;

use pylon_common::{Point, PylonError};
use pylon_config::Session;
use pylon_webview::react_native::RnEvent;
use pylon_webview::{ChatEvent, ChatWidget, HeadlessSurface, NativeChannel, PylonContext};
use tracing::debug;

pub struct ReplayOptions {
    pub probes: Vec<(f64, f64)>,
    pub rn_density: Option<f64>,
}

/// Replay `trace` against a freshly loaded widget and return the report.
pub fn replay(session: Session, trace: &str, options: &ReplayOptions) -> Result<String, PylonError> {
    let mut ctx = PylonContext::new();
    ctx.initialize(session.config().clone())?;
    if let Some(user) = session.user() {
        ctx.set_user(user.clone())?;
    }

    let mut widget = ctx.create_chat(HeadlessSurface::new(NativeChannel::WryIpc))?;
    widget.surface_mut().finish_load();
    widget.pump();

    let mut out = String::new();
    report_events(&mut out, &mut widget, options.rn_density);

    for (lineno, line) in trace.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        debug!(line = lineno + 1, "Replaying message");
        widget.surface_mut().post(line);
        widget.pump();
        report_events(&mut out, &mut widget, options.rn_density);
    }

    let _ = writeln!(out, "chat window: {:?}", widget.chat_state());
    for (element, rect) in widget.bounds().all() {
        let shown = if rect.is_empty() { " (hidden)" } else { "" };
        let _ = writeln!(out, "bounds {element}: {rect}{shown}");
    }
    for &(x, y) in &options.probes {
        let disposition = widget.hit_test(Point::new(x, y));
        let _ = writeln!(out, "probe ({x}, {y}): {disposition:?}");
    }
    Ok(out)
}

fn report_events(out: &mut String, widget: &mut ChatWidget<HeadlessSurface>, density: Option<f64>) {
    for event in widget.drain_events() {
        let _ = writeln!(out, "event {}", event_json(&event));
        if let Some(rn) = density.and_then(|d| RnEvent::from_chat_event(&event, d)) {
            let _ = writeln!(out, "rn {} {}", rn.name(), rn.payload());
        }
    }
}

fn event_json(event: &ChatEvent) -> String {
    serde_json::to_string(event).unwrap_or_else(|_| event.name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pylon_config::ChatConfig;

    const TRACE: &str = r#"
# page comes up
{"type":"onReady"}
{"type":"onInitialized"}
{"type":"updateInteractiveBounds","selector":"pylon-chat-bubble","left":10,"top":10,"right":50,"bottom":50}
not json
{"type":"onUnreadCountChanged","count":2}
"#;

    fn options(probes: Vec<(f64, f64)>) -> ReplayOptions {
        ReplayOptions {
            probes,
            rn_density: None,
        }
    }

    #[test]
    fn replay_reports_events_bounds_and_probes() {
        let session = Session::new(ChatConfig::new("app-1"), None);
        let report = replay(session, TRACE, &options(vec![(20.0, 20.0), (60.0, 60.0)])).unwrap();

        assert!(report.contains(r#"event {"event":"loaded"}"#));
        assert!(report.contains(r#"event {"event":"ready"}"#));
        assert!(report.contains(r#"event {"event":"unreadCountChanged","count":2}"#));
        assert!(report.contains("bounds pylon-chat-bubble: (10, 10) - (50, 50)"));
        assert!(report.contains("probe (20, 20): Claim"));
        assert!(report.contains("probe (60, 60): PassThrough"));
        assert!(report.contains("chat window: Closed"));
    }

    #[test]
    fn replay_prints_rn_events_when_asked() {
        let session = Session::new(ChatConfig::new("app-1"), None);
        let report = replay(
            session,
            r#"{"type":"updateInteractiveBounds","selector":"pylon-chat-bubble","left":20,"top":20,"right":40,"bottom":40}"#,
            &ReplayOptions {
                probes: Vec::new(),
                rn_density: Some(2.0),
            },
        )
        .unwrap();
        assert!(report.contains("rn onInteractiveBoundsChanged"));
        assert!(report.contains(r#""left":10.0"#));
    }

    #[test]
    fn replay_rejects_invalid_config() {
        let session = Session::new(ChatConfig::new("bad id!"), None);
        assert!(matches!(
            replay(session, "", &options(Vec::new())),
            Err(PylonError::Config(_))
        ));
    }
}
