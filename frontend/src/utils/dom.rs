//! Small helpers over `web_sys` shared by every effect. Lookups swallow
//! selector errors and return `None`, since a missing node is a normal
//! condition on pages without the corresponding markup.

use crate::utils::error::SiteError;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Node};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

pub fn body() -> Option<HtmlElement> {
    document().and_then(|d| d.body())
}

pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

pub fn query_within(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// First element matching any selector, tried in order.
pub fn first_of(doc: &Document, selectors: &[&str]) -> Option<Element> {
    selectors.iter().find_map(|sel| query(doc, sel))
}

pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

/// The element an event was dispatched to. Text-node targets resolve to
/// their parent element.
pub fn event_element(event: &Event) -> Option<Element> {
    let target = event.target()?;
    match target.dyn_into::<Element>() {
        Ok(el) => Some(el),
        Err(other) => other.dyn_into::<Node>().ok()?.parent_element(),
    }
}

pub fn contains(ancestor: &Element, el: &Element) -> bool {
    ancestor.contains(Some(el.unchecked_ref::<Node>()))
}

pub fn same_node(a: &Element, b: &Element) -> bool {
    a.is_same_node(Some(b.unchecked_ref::<Node>()))
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Sets an inline style property, or removes it when `value` is empty.
pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let style = el.style();
    if value.is_empty() {
        let _ = style.remove_property(property);
    } else {
        let _ = style.set_property(property, value);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ListenOptions {
    pub capture: bool,
    pub passive: bool,
    pub once: bool,
}

impl ListenOptions {
    pub const CAPTURE: ListenOptions = ListenOptions { capture: true, passive: false, once: false };
    pub const PASSIVE: ListenOptions = ListenOptions { capture: false, passive: true, once: false };
    pub const ONCE: ListenOptions = ListenOptions { capture: false, passive: true, once: true };
}

/// Attaches `handler` for the rest of the page's life.
pub fn listen(
    target: &EventTarget,
    event: &str,
    options: ListenOptions,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), SiteError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    let opts = AddEventListenerOptions::new();
    opts.set_capture(options.capture);
    opts.set_passive(options.passive);
    opts.set_once(options.once);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &opts,
    )?;
    callback.forget();
    Ok(())
}

/// Runs `f` once the DOM is parsed, immediately if that already happened.
pub fn on_dom_ready(f: impl FnOnce() + 'static) -> Result<(), SiteError> {
    let doc = document().ok_or(SiteError::MissingElement("document"))?;
    if doc.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let mut f = Some(f);
    listen(&doc, "DOMContentLoaded", ListenOptions::ONCE, move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })
}

/// Runs `f` after the window `load` event, immediately if it already fired.
pub fn on_window_load(f: impl FnOnce() + 'static) -> Result<(), SiteError> {
    let window = web_sys::window().ok_or(SiteError::MissingElement("window"))?;
    let loaded = window
        .document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(false);
    if loaded {
        f();
        return Ok(());
    }
    let mut f = Some(f);
    listen(&window, "load", ListenOptions::ONCE, move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })
}
