use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_timeseries_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') => {
            let window = app.timeseries.current_window.next();
            app.change_window(window);
        }
        KeyCode::Left | KeyCode::Char('h') => {
            let window = app.timeseries.current_window.previous();
            app.change_window(window);
        }
        KeyCode::Char('r') | KeyCode::Char('R') => app.refresh_active(),
        _ => super::handle_shared_key(key, app),
    }
}
