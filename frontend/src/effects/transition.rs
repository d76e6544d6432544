//! Fade-out transition for internal links. The page gets
//! `is-transitioning`, then navigates after a short delay; clicks that
//! arrive while a navigation is queued are swallowed.

use crate::config::SiteConfig;
use crate::nav;
use crate::utils::dom::{self, ListenOptions};
use crate::utils::error::SiteError;
use gloo_timers::callback::Timeout;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

pub const TRANSITIONING_CLASS: &str = "is-transitioning";
pub const LOADED_CLASS: &str = "page-loaded";

/// Single in-flight flag for page navigations.
pub struct NavigationGuard {
    in_flight: AtomicBool,
}

impl NavigationGuard {
    pub const fn new() -> Self {
        Self { in_flight: AtomicBool::new(false) }
    }

    /// `true` if the caller now owns the navigation.
    pub fn try_begin(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn release(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

pub static PAGE_TRANSITION: NavigationGuard = NavigationGuard::new();

/// The parts of an anchor that decide whether it fades out.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkInfo<'a> {
    pub href: Option<&'a str>,
    pub target: Option<&'a str>,
    pub no_transition: bool,
    pub download: bool,
}

const SKIPPED_SCHEMES: [&str; 4] = ["mailto:", "tel:", "whatsapp:", "javascript:"];

pub fn wants_transition(link: &LinkInfo) -> bool {
    let Some(href) = link.href.filter(|h| !h.is_empty()) else {
        return false;
    };
    if link.no_transition || link.download {
        return false;
    }
    if link.target.is_some_and(|t| !t.is_empty() && t != "_self") {
        return false;
    }
    if href.starts_with('#') {
        return false;
    }
    let lower = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return false;
    }
    !(lower.starts_with("http://") || lower.starts_with("https://"))
}

fn is_plain_click(event: &MouseEvent) -> bool {
    event.button() == 0 && !(event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key())
}

fn bind(link: &Element, href: String, delay_ms: u32) -> Result<(), SiteError> {
    dom::listen(link, "click", ListenOptions::default(), move |event| {
        if event.dyn_ref::<MouseEvent>().is_some_and(|m| !is_plain_click(m)) {
            return;
        }
        event.prevent_default();
        if !PAGE_TRANSITION.try_begin() {
            log::debug!(
                "navigation already queued (in flight: {}), ignoring click",
                PAGE_TRANSITION.in_flight()
            );
            return;
        }
        nav::dom::close_menu();
        if let Some(body) = dom::body() {
            dom::set_class(&body, TRANSITIONING_CLASS, true);
            dom::set_class(&body, LOADED_CLASS, false);
        }
        let href = href.clone();
        Timeout::new(delay_ms, move || {
            let navigated = web_sys::window().map(|w| w.location().set_href(&href));
            if !matches!(navigated, Some(Ok(()))) {
                log::warn!("Navigation to {} failed", href);
                PAGE_TRANSITION.release();
            }
        })
        .forget();
    })
}

pub fn install(doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let mut bound = 0;
    for link in dom::query_all(doc, "a[href]") {
        let href = link.get_attribute("href");
        let target = link.get_attribute("target");
        let info = LinkInfo {
            href: href.as_deref(),
            target: target.as_deref(),
            no_transition: link.has_attribute("data-no-transition"),
            download: link.has_attribute("download"),
        };
        if !wants_transition(&info) {
            continue;
        }
        if let Some(href) = href {
            bind(&link, href, config.transition_delay_ms)?;
            bound += 1;
        }
    }
    log::debug!("page transitions bound to {} links", bound);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str) -> LinkInfo<'_> {
        LinkInfo { href: Some(href), ..LinkInfo::default() }
    }

    #[test]
    fn internal_pages_transition() {
        assert!(wants_transition(&link("productos.html")));
        assert!(wants_transition(&link("/catalogo.html#inicio")));
        assert!(wants_transition(&LinkInfo { target: Some("_self"), ..link("index.html") }));
        assert!(wants_transition(&LinkInfo { target: Some(""), ..link("index.html") }));
    }

    #[test]
    fn special_links_are_skipped() {
        assert!(!wants_transition(&LinkInfo::default()));
        assert!(!wants_transition(&link("")));
        assert!(!wants_transition(&link("#contacto")));
        assert!(!wants_transition(&link("mailto:proinkqro@gmail.com")));
        assert!(!wants_transition(&link("tel:+524420000000")));
        assert!(!wants_transition(&link("whatsapp://send?phone=52")));
        assert!(!wants_transition(&link("javascript:void(0)")));
        assert!(!wants_transition(&link("https://wa.me/52")));
        assert!(!wants_transition(&link("HTTP://example.com")));
    }

    #[test]
    fn attributes_opt_out() {
        assert!(!wants_transition(&LinkInfo { no_transition: true, ..link("a.html") }));
        assert!(!wants_transition(&LinkInfo { download: true, ..link("catalogo.pdf") }));
        assert!(!wants_transition(&LinkInfo { target: Some("_blank"), ..link("a.html") }));
    }

    #[test]
    fn second_navigation_in_window_is_ignored() {
        let guard = NavigationGuard::new();
        let mut navigations = 0;
        for _ in 0..2 {
            if guard.try_begin() {
                navigations += 1;
            }
        }
        assert_eq!(navigations, 1);
        assert!(guard.in_flight());

        guard.release();
        assert!(guard.try_begin());
    }
}
