//! Priority-ordered routing of document-level events to menu commands.
//! Listeners sit on `document` in the capture phase, so the menu keeps
//! working when its markup is re-rendered after start-up.

use crate::nav::state::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    TouchStart,
    Key,
}

/// Where an event landed relative to the menu's regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hit {
    pub on_toggle: bool,
    pub on_close: bool,
    pub on_backdrop: bool,
    pub on_link: bool,
    pub inside_panel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub command: Command,
    /// Prevent default action and stop propagation.
    pub suppress: bool,
}

impl Route {
    fn suppressed(command: Command) -> Self {
        Route { command, suppress: true }
    }

    fn passive(command: Command) -> Self {
        Route { command, suppress: false }
    }
}

pub const ESCAPE_KEY: &str = "Escape";

/// First matching rule wins. `key` is only consulted for `EventKind::Key`.
pub fn route(kind: EventKind, hit: &Hit, key: Option<&str>, menu_open: bool) -> Option<Route> {
    match kind {
        EventKind::Key => (key == Some(ESCAPE_KEY)).then(|| Route::passive(Command::Close)),
        EventKind::Click | EventKind::TouchStart => {
            if hit.on_toggle {
                return Some(Route::suppressed(Command::Toggle));
            }
            if hit.on_close || hit.on_backdrop {
                return Some(Route::suppressed(Command::Close));
            }
            if kind == EventKind::TouchStart || !menu_open {
                return None;
            }
            if hit.on_link || !hit.inside_panel {
                return Some(Route::passive(Command::Close));
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit() -> Hit {
        Hit::default()
    }

    #[test]
    fn toggle_wins_over_outside_panel() {
        let h = Hit { on_toggle: true, ..hit() };
        let r = route(EventKind::Click, &h, None, true).unwrap();
        assert_eq!(r.command, Command::Toggle);
        assert!(r.suppress);
    }

    #[test]
    fn toggle_and_close_respond_to_touch() {
        let r = route(EventKind::TouchStart, &Hit { on_toggle: true, ..hit() }, None, false);
        assert_eq!(r.map(|r| r.command), Some(Command::Toggle));
        let r = route(EventKind::TouchStart, &Hit { on_close: true, ..hit() }, None, true);
        assert_eq!(r.map(|r| r.command), Some(Command::Close));
        let r = route(EventKind::TouchStart, &Hit { on_backdrop: true, ..hit() }, None, true);
        assert_eq!(r, Some(Route { command: Command::Close, suppress: true }));
    }

    #[test]
    fn backdrop_closes_but_panel_content_does_not() {
        let backdrop = Hit { on_backdrop: true, ..hit() };
        assert_eq!(
            route(EventKind::Click, &backdrop, None, true).map(|r| r.command),
            Some(Command::Close)
        );

        let content = Hit { inside_panel: true, ..hit() };
        assert_eq!(route(EventKind::Click, &content, None, true), None);
    }

    #[test]
    fn links_close_an_open_menu_without_cancelling_navigation() {
        let link = Hit { on_link: true, inside_panel: true, ..hit() };
        assert_eq!(
            route(EventKind::Click, &link, None, true),
            Some(Route { command: Command::Close, suppress: false })
        );
        assert_eq!(route(EventKind::Click, &link, None, false), None);
    }

    #[test]
    fn outside_click_only_matters_while_open() {
        assert_eq!(
            route(EventKind::Click, &hit(), None, true).map(|r| r.command),
            Some(Command::Close)
        );
        assert_eq!(route(EventKind::Click, &hit(), None, false), None);
    }

    #[test]
    fn touch_outside_is_ignored() {
        assert_eq!(route(EventKind::TouchStart, &hit(), None, true), None);
        let link = Hit { on_link: true, ..hit() };
        assert_eq!(route(EventKind::TouchStart, &link, None, true), None);
    }

    #[test]
    fn only_escape_closes_from_the_keyboard() {
        assert_eq!(
            route(EventKind::Key, &hit(), Some("Escape"), false),
            Some(Route { command: Command::Close, suppress: false })
        );
        assert_eq!(route(EventKind::Key, &hit(), Some("Enter"), true), None);
        assert_eq!(route(EventKind::Key, &hit(), None, true), None);
    }
}
