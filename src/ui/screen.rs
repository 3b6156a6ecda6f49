use ratatui::{buffer::Buffer, layout::Rect};

use crate::{App, AppState};

/// One full-screen view of the app
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct AuthScreen;

impl Screen for AuthScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::auth::render_auth(app, area, buf);
    }
}

pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::menu::render_menu(app, area, buf);
    }
}

pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::render_typing(app, area, buf);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::render_results(app, area, buf);
    }
}

pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Auth => Box::new(AuthScreen),
        AppState::Menu => Box::new(MenuScreen),
        AppState::Typing => Box::new(TypingScreen),
        AppState::Results => Box::new(ResultsScreen),
    }
}
