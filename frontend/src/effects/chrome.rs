//! Page fade-in and the glass header.

use crate::config::SiteConfig;
use crate::effects::transition::{LOADED_CLASS, PAGE_TRANSITION, TRANSITIONING_CLASS};
use crate::utils::dom::{self, ListenOptions};
use crate::utils::error::SiteError;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, PageTransitionEvent, Window};

pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// Transparent until the page scrolls past the threshold.
    Home,
    /// Always glass.
    Inner,
    /// Neither marker class on the body; header left alone.
    Static,
}

impl HeaderMode {
    pub fn from_body(is_home: bool, is_inner: bool) -> Self {
        match (is_home, is_inner) {
            (true, _) => HeaderMode::Home,
            (false, true) => HeaderMode::Inner,
            _ => HeaderMode::Static,
        }
    }

    /// Desired state of the `scrolled` class, `None` to leave it untouched.
    pub fn scrolled(self, scroll_y: f64, threshold: f64) -> Option<bool> {
        match self {
            HeaderMode::Home => Some(scroll_y > threshold),
            HeaderMode::Inner => Some(true),
            HeaderMode::Static => None,
        }
    }
}

fn mark_loaded(body: &HtmlElement) {
    dom::set_class(body, LOADED_CLASS, true);
    dom::set_class(body, TRANSITIONING_CLASS, false);
}

fn sync_header(window: &Window, body: &HtmlElement, mode: HeaderMode, threshold: f64) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    if let Some(on) = mode.scrolled(scroll_y, threshold) {
        dom::set_class(body, SCROLLED_CLASS, on);
    }
}

pub fn install(window: &Window, doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let body = doc.body().ok_or(SiteError::MissingElement("body"))?;

    {
        let body = body.clone();
        dom::on_window_load(move || mark_loaded(&body))?;
    }

    // Back/forward cache restores skip `load`, so undo the fade-out here.
    {
        let body = body.clone();
        dom::listen(window, "pageshow", ListenOptions::default(), move |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|e| e.persisted());
            if persisted {
                PAGE_TRANSITION.release();
                mark_loaded(&body);
            }
        })?;
    }

    let mode = HeaderMode::from_body(dom::has_class(&body, "home"), dom::has_class(&body, "inner"));
    let threshold = config.header_scroll_threshold;
    sync_header(window, &body, mode, threshold);
    if mode == HeaderMode::Home {
        let w = window.clone();
        dom::listen(window, "scroll", ListenOptions::PASSIVE, move |_| {
            sync_header(&w, &body, mode, threshold)
        })?;
    }
    Ok(())
}
