//! Desktop web surface backed by `wry`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use pylon_common::WidgetError;
use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::file_chooser::{ChooserLaunch, FileChooserRequest};
use crate::ipc::NativeChannel;
use crate::lifecycle::LoadGeneration;
use crate::surface::{SurfaceEvent, WebSurface};

/// A transparent child `wry::WebView` hosting the chat shell.
///
/// `wry` loads HTML without a base URL and has no load-error callback, so
/// the shell runs with an opaque origin and `LoadFailed` is never reported.
///
/// Generations are tracked per navigation: `load_html` records the
/// requested generation, and it becomes the page's generation only when
/// wry reports `PageLoadEvent::Started` for the new document. Finished
/// signals and IPC messages are stamped with the page's generation, so a
/// late signal or message from the previous document keeps its old
/// generation and the widget discards it.
pub struct WrySurface {
    webview: WebView,
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
    generations: Arc<NavigationGenerations>,
}

/// Requested and committed load generations, shared with the handlers.
#[derive(Debug, Default)]
struct NavigationGenerations {
    requested: AtomicU64,
    page: AtomicU64,
}

impl NavigationGenerations {
    fn request(&self, generation: LoadGeneration) {
        self.requested.store(generation.0, Ordering::SeqCst);
    }

    /// A navigation started; the document it produces belongs to the most
    /// recently requested load.
    fn commit(&self) -> LoadGeneration {
        let generation = self.requested.load(Ordering::SeqCst);
        self.page.store(generation, Ordering::SeqCst);
        LoadGeneration(generation)
    }

    fn page(&self) -> LoadGeneration {
        LoadGeneration(self.page.load(Ordering::SeqCst))
    }
}

impl WrySurface {
    /// Create the web view as a child of `window`, covering `bounds`.
    pub fn new<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
    ) -> Result<Self, wry::Error> {
        let events: Arc<Mutex<Vec<SurfaceEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let generations = Arc::new(NavigationGenerations::default());

        let builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(true)
            .with_focused(false)
            .with_initialization_script(&NativeChannel::WryIpc.bootstrap_script());
        let builder = attach_ipc_handler(builder, Arc::clone(&events), Arc::clone(&generations));
        let builder =
            attach_page_load_handler(builder, Arc::clone(&events), Arc::clone(&generations));
        let builder = attach_new_window_handler(builder, Arc::clone(&events));

        let webview = builder.build_as_child(window)?;
        debug!("Chat web view created");

        Ok(Self {
            webview,
            events,
            generations,
        })
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), wry::Error> {
        self.webview.set_visible(visible)
    }
}

impl WebSurface for WrySurface {
    fn channel(&self) -> NativeChannel {
        NativeChannel::WryIpc
    }

    fn load_html(
        &mut self,
        html: &str,
        base_url: &str,
        generation: LoadGeneration,
    ) -> Result<(), WidgetError> {
        debug!(%generation, base_url, "Loading shell without base URL");
        self.generations.request(generation);
        self.webview
            .load_html(html)
            .map_err(|e| WidgetError::Surface(e.to_string()))
    }

    fn evaluate_script(&mut self, script: &str) -> Result<(), WidgetError> {
        self.webview
            .evaluate_script(script)
            .map_err(|e| WidgetError::Surface(e.to_string()))
    }

    fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    fn launch_file_chooser(
        &mut self,
        _request: &FileChooserRequest,
    ) -> Result<ChooserLaunch, WidgetError> {
        Err(WidgetError::Surface(
            "the desktop web view shows its own file picker".to_string(),
        ))
    }

    fn destroy(&mut self) {
        if let Err(e) = self.webview.set_visible(false) {
            warn!(error = %e, "Failed to hide web view");
        }
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
    generations: Arc<NavigationGenerations>,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let raw = request.body().to_string();
        let generation = generations.page();
        debug!(%generation, body_len = raw.len(), "IPC message from page");
        if let Ok(mut evts) = events.lock() {
            evts.push(SurfaceEvent::Message { generation, raw });
        }
    })
}

fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
    generations: Arc<NavigationGenerations>,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| match event {
        PageLoadEvent::Started => {
            let generation = generations.commit();
            debug!(%generation, url = %url, "Page started");
        }
        PageLoadEvent::Finished => {
            let generation = generations.page();
            debug!(%generation, url = %url, "Page finished");
            if let Ok(mut evts) = events.lock() {
                evts.push(SurfaceEvent::PageFinished { generation });
            }
        }
    })
}

fn attach_new_window_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
) -> WebViewBuilder<'a> {
    builder.with_new_window_req_handler(move |url| {
        if let Ok(mut evts) = events.lock() {
            evts.push(SurfaceEvent::OpenWindow { url });
        }
        false
    })
}
