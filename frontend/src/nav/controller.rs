use crate::nav::dispatch::{route, EventKind, Hit, Route};
use crate::nav::state::{Command, MenuState, MenuView, Transition};

/// The page the controller reads its state from and projects views onto.
pub trait NavSurface {
    /// `None` when the page has no toggle control or no panel.
    fn menu_state(&self) -> Option<MenuState>;
    fn project(&self, view: &MenuView);
}

/// Stateless controller: every call re-derives the menu state from the
/// surface, computes the next state, and writes a view only if it changed.
pub struct NavController<S> {
    surface: S,
}

impl<S: NavSurface> NavController<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn state(&self) -> Option<MenuState> {
        self.surface.menu_state()
    }

    pub fn apply(&self, command: Command) -> Option<Transition> {
        let from = self.surface.menu_state()?;
        let transition = Transition { from, to: from.next(command) };
        if transition.changed() {
            self.surface.project(&transition.to.view());
        }
        Some(transition)
    }

    pub fn toggle(&self) -> Option<Transition> {
        self.apply(Command::Toggle)
    }

    pub fn open(&self) -> Option<Transition> {
        self.apply(Command::Open)
    }

    pub fn close(&self) -> Option<Transition> {
        self.apply(Command::Close)
    }

    /// Routes one event and runs its command. The returned route tells the
    /// caller whether to suppress the event, even when the menu is absent.
    pub fn handle(&self, kind: EventKind, hit: &Hit, key: Option<&str>) -> Option<Route> {
        let open = self.state().is_some_and(MenuState::is_open);
        let route = route(kind, hit, key, open)?;
        self.apply(route.command);
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::state::OPEN_CLASS;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory page with class-list semantics matching `DOMTokenList`.
    #[derive(Default)]
    struct FakePage {
        has_menu: bool,
        panel_classes: RefCell<Vec<String>>,
        attrs: RefCell<HashMap<&'static str, String>>,
        body_locked: RefCell<bool>,
        writes: RefCell<usize>,
    }

    impl FakePage {
        fn with_menu() -> Self {
            Self { has_menu: true, ..Self::default() }
        }

        fn open_class_count(&self) -> usize {
            self.panel_classes.borrow().iter().filter(|c| *c == OPEN_CLASS).count()
        }

        fn attr(&self, name: &str) -> Option<String> {
            self.attrs.borrow().get(name).cloned()
        }
    }

    impl NavSurface for &FakePage {
        fn menu_state(&self) -> Option<MenuState> {
            if !self.has_menu {
                return None;
            }
            let open = self.panel_classes.borrow().iter().any(|c| c == OPEN_CLASS);
            Some(MenuState::from_open(open))
        }

        fn project(&self, view: &MenuView) {
            *self.writes.borrow_mut() += 1;
            let mut classes = self.panel_classes.borrow_mut();
            classes.retain(|c| c != OPEN_CLASS);
            if view.open {
                classes.push(OPEN_CLASS.to_string());
            }
            let mut attrs = self.attrs.borrow_mut();
            attrs.insert("aria-expanded", view.aria_expanded.to_string());
            attrs.insert("aria-hidden", view.aria_hidden.to_string());
            attrs.insert("display", view.panel_display.to_string());
            *self.body_locked.borrow_mut() = view.open;
        }
    }

    #[test]
    fn open_class_never_duplicates() {
        let page = FakePage::with_menu();
        let nav = NavController::new(&page);
        let script = [
            Command::Toggle,
            Command::Open,
            Command::Open,
            Command::Toggle,
            Command::Toggle,
            Command::Toggle,
            Command::Close,
            Command::Toggle,
        ];
        for command in script {
            nav.apply(command);
            assert!(page.open_class_count() <= 1);
        }
        assert_eq!(page.open_class_count(), 1);
    }

    #[test]
    fn open_and_close_set_aria_attributes() {
        let page = FakePage::with_menu();
        let nav = NavController::new(&page);

        nav.open();
        assert_eq!(page.attr("aria-expanded").as_deref(), Some("true"));
        assert_eq!(page.attr("aria-hidden").as_deref(), Some("false"));
        assert_eq!(page.attr("display").as_deref(), Some("block"));
        assert!(*page.body_locked.borrow());

        nav.close();
        assert_eq!(page.attr("aria-expanded").as_deref(), Some("false"));
        assert_eq!(page.attr("aria-hidden").as_deref(), Some("true"));
        assert!(!*page.body_locked.borrow());
    }

    #[test]
    fn repeated_open_writes_once() {
        let page = FakePage::with_menu();
        let nav = NavController::new(&page);
        nav.open();
        nav.open();
        let t = nav.open().unwrap();
        assert!(!t.changed());
        assert_eq!(*page.writes.borrow(), 1);
    }

    #[test]
    fn escape_on_closed_menu_touches_nothing() {
        let page = FakePage::with_menu();
        let nav = NavController::new(&page);
        let r = nav.handle(EventKind::Key, &Hit::default(), Some("Escape"));
        assert!(r.is_some());
        assert_eq!(*page.writes.borrow(), 0);
        assert!(page.attrs.borrow().is_empty());
    }

    #[test]
    fn backdrop_click_closes_and_content_click_keeps_open() {
        let page = FakePage::with_menu();
        let nav = NavController::new(&page);
        nav.open();

        nav.handle(EventKind::Click, &Hit { inside_panel: true, ..Hit::default() }, None);
        assert_eq!(nav.state(), Some(MenuState::Open));

        nav.handle(EventKind::Click, &Hit { on_backdrop: true, ..Hit::default() }, None);
        assert_eq!(nav.state(), Some(MenuState::Closed));
    }

    #[test]
    fn toggle_click_opens_then_closes() {
        let page = FakePage::with_menu();
        let nav = NavController::new(&page);
        let on_toggle = Hit { on_toggle: true, ..Hit::default() };

        let r = nav.handle(EventKind::Click, &on_toggle, None).unwrap();
        assert!(r.suppress);
        assert_eq!(nav.state(), Some(MenuState::Open));

        nav.handle(EventKind::TouchStart, &on_toggle, None);
        assert_eq!(nav.state(), Some(MenuState::Closed));
    }

    #[test]
    fn page_without_menu_is_a_no_op() {
        let page = FakePage::default();
        let nav = NavController::new(&page);
        assert_eq!(nav.toggle(), None);
        assert_eq!(nav.open(), None);
        assert_eq!(nav.close(), None);
        assert_eq!(nav.state(), None);

        let r = nav.handle(EventKind::Click, &Hit { on_toggle: true, ..Hit::default() }, None);
        assert!(r.is_some_and(|r| r.suppress));
        nav.handle(EventKind::Key, &Hit::default(), Some("Escape"));
        assert_eq!(*page.writes.borrow(), 0);
    }
}
