use crate::config::SiteConfig;
use crate::utils::dom;
use crate::utils::error::SiteError;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

pub const REVEAL_SELECTOR: &str = "[data-reveal]";
pub const VISIBLE_CLASS: &str = "is-visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPlan {
    Nothing,
    /// No IntersectionObserver: show everything now.
    ShowAll,
    Observe,
}

pub fn plan(targets: usize, observer_supported: bool) -> RevealPlan {
    match (targets, observer_supported) {
        (0, _) => RevealPlan::Nothing,
        (_, false) => RevealPlan::ShowAll,
        (_, true) => RevealPlan::Observe,
    }
}

fn observer_supported(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

pub fn install(window: &Window, doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let targets = dom::query_all(doc, REVEAL_SELECTOR);
    match plan(targets.len(), observer_supported(window)) {
        RevealPlan::Nothing => return Ok(()),
        RevealPlan::ShowAll => {
            for el in &targets {
                dom::set_class(el, VISIBLE_CLASS, true);
            }
            return Ok(());
        }
        RevealPlan::Observe => {}
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    dom::set_class(&target, VISIBLE_CLASS, true);
                    observer.unobserve(&target);
                }
            }
        },
    );
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    init.set_root_margin(&config.reveal_root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for el in &targets {
        observer.observe(el);
    }
    log::debug!("observing {} reveal targets", targets.len());
    Ok(())
}
