use crate::nav::controller::{NavController, NavSurface};
use crate::nav::dispatch::{EventKind, Hit};
use crate::nav::state::{MenuState, MenuView, OPEN_CLASS, SCROLL_LOCK_CLASS};
use crate::utils::dom::{self, ListenOptions};
use crate::utils::error::{describe_js, SiteError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

const TOGGLE: &str = "#navToggle, .nav-toggle";
const TOGGLE_LOOKUP: [&str; 2] = ["#navToggle", ".nav-toggle"];
const PANEL: [&str; 2] = ["#mobileNav", ".mobile-nav"];
const CLOSE: &str = "#mobileNavClose, .mobile-nav__close";
const BACKDROP: &str = ".mobile-nav__overlay";
const BACKDROP_FALLBACK: &str = "[data-close=\"mobile\"]";
const CONTENT: &str = ".mobile-nav__panel";
const LINK: &str = ".mobile-nav__link";

/// Menu elements as they are in the document right now. Never cached:
/// other scripts may replace the panel subtree at any time.
pub struct DomNav {
    toggle: Option<Element>,
    panel: Option<Element>,
    backdrop: Option<Element>,
    content: Option<Element>,
    body: Option<HtmlElement>,
}

impl DomNav {
    pub fn lookup(doc: &Document) -> Self {
        let toggle = dom::first_of(doc, &TOGGLE_LOOKUP);
        let panel = dom::first_of(doc, &PANEL);
        let backdrop = panel
            .as_ref()
            .and_then(|p| dom::query_within(p, BACKDROP))
            .or_else(|| dom::first_of(doc, &[BACKDROP, BACKDROP_FALLBACK]));
        let content = panel.as_ref().and_then(|p| dom::query_within(p, CONTENT));
        Self { toggle, panel, backdrop, content, body: doc.body() }
    }

    pub fn hit(&self, target: Option<&Element>) -> Hit {
        let Some(target) = target else {
            return Hit::default();
        };
        Hit {
            on_toggle: dom::closest(target, TOGGLE).is_some(),
            on_close: dom::closest(target, CLOSE).is_some(),
            on_backdrop: self
                .backdrop
                .as_ref()
                .is_some_and(|backdrop| dom::same_node(backdrop, target)),
            on_link: dom::closest(target, LINK).is_some(),
            inside_panel: self
                .content
                .as_ref()
                .is_some_and(|content| dom::contains(content, target)),
        }
    }
}

impl NavSurface for DomNav {
    fn menu_state(&self) -> Option<MenuState> {
        self.toggle.as_ref()?;
        let panel = self.panel.as_ref()?;
        Some(MenuState::from_open(dom::has_class(panel, OPEN_CLASS)))
    }

    fn project(&self, view: &MenuView) {
        let (Some(toggle), Some(panel)) = (&self.toggle, &self.panel) else {
            return;
        };
        dom::set_class(panel, OPEN_CLASS, view.open);
        if let Some(panel) = panel.dyn_ref::<HtmlElement>() {
            dom::set_style(panel, "display", view.panel_display);
        }
        for (el, name, value) in [
            (toggle, "aria-expanded", view.aria_expanded),
            (panel, "aria-hidden", view.aria_hidden),
        ] {
            if let Err(e) = el.set_attribute(name, value) {
                log::debug!("could not set {}: {}", name, describe_js(&e));
            }
        }
        if let Some(body) = &self.body {
            dom::set_class(body, SCROLL_LOCK_CLASS, view.open);
            dom::set_style(body, "overflow", view.body_overflow);
        }
    }
}

/// Controller over whatever menu markup the current document has.
pub fn controller() -> Option<NavController<DomNav>> {
    dom::document().map(|doc| NavController::new(DomNav::lookup(&doc)))
}

/// Closes the menu if the page has one. Used before page transitions.
pub fn close_menu() {
    if let Some(nav) = controller() {
        nav.close();
    }
}

fn dispatch(doc: &Document, kind: EventKind, event: &Event) {
    let nav = DomNav::lookup(doc);
    let target = dom::event_element(event);
    let hit = nav.hit(target.as_ref());
    let key = event.dyn_ref::<KeyboardEvent>().map(|e| e.key());
    let controller = NavController::new(nav);
    if let Some(route) = controller.handle(kind, &hit, key.as_deref()) {
        if route.suppress {
            event.prevent_default();
            event.stop_propagation();
        }
        log::debug!("menu {:?} -> {:?}", kind, route.command);
    }
}

/// Capture phase for every event type, so a handler that stops
/// propagation cannot swallow Escape or a backdrop click.
pub const LISTENERS: [(&str, EventKind, ListenOptions); 3] = [
    ("click", EventKind::Click, ListenOptions::CAPTURE),
    ("touchstart", EventKind::TouchStart, ListenOptions::CAPTURE),
    ("keydown", EventKind::Key, ListenOptions::CAPTURE),
];

/// Binds the three document-level listeners. Safe to call on pages
/// without a menu; every event then routes to a no-op.
pub fn install(doc: &Document) -> Result<(), SiteError> {
    for (name, kind, options) in LISTENERS {
        let d = doc.clone();
        dom::listen(doc, name, options, move |event| dispatch(&d, kind, &event))?;
    }
    log::debug!("mobile navigation listeners installed");
    Ok(())
}
