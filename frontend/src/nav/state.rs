//! Open/closed model of the mobile navigation overlay and the presentation
//! each state projects onto the page.

pub const OPEN_CLASS: &str = "is-open";
pub const SCROLL_LOCK_CLASS: &str = "menu-open";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Open,
    Close,
}

impl MenuState {
    pub fn from_open(is_open: bool) -> Self {
        if is_open {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    pub fn next(self, command: Command) -> Self {
        match command {
            Command::Open => MenuState::Open,
            Command::Close => MenuState::Closed,
            Command::Toggle => match self {
                MenuState::Open => MenuState::Closed,
                MenuState::Closed => MenuState::Open,
            },
        }
    }

    pub fn view(self) -> MenuView {
        let open = self.is_open();
        MenuView {
            open,
            panel_display: if open { "block" } else { "" },
            aria_expanded: if open { "true" } else { "false" },
            aria_hidden: if open { "false" } else { "true" },
            body_overflow: if open { "hidden" } else { "" },
        }
    }
}

/// Attribute and style values written after a transition. An empty style
/// value means the inline property is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub open: bool,
    pub panel_display: &'static str,
    pub aria_expanded: &'static str,
    pub aria_hidden: &'static str,
    pub body_overflow: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: MenuState,
    pub to: MenuState,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_open_close_are_absolute() {
        assert_eq!(MenuState::Closed.next(Command::Toggle), MenuState::Open);
        assert_eq!(MenuState::Open.next(Command::Toggle), MenuState::Closed);
        assert_eq!(MenuState::Open.next(Command::Open), MenuState::Open);
        assert_eq!(MenuState::Closed.next(Command::Close), MenuState::Closed);
    }

    #[test]
    fn views_keep_aria_in_step_with_state() {
        let open = MenuState::Open.view();
        assert_eq!((open.aria_expanded, open.aria_hidden), ("true", "false"));
        assert_eq!((open.panel_display, open.body_overflow), ("block", "hidden"));

        let closed = MenuState::Closed.view();
        assert_eq!((closed.aria_expanded, closed.aria_hidden), ("false", "true"));
        assert_eq!((closed.panel_display, closed.body_overflow), ("", ""));
    }

    #[test]
    fn initial_state_is_closed() {
        assert_eq!(MenuState::default(), MenuState::Closed);
    }
}
