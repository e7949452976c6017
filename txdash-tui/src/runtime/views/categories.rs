use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_categories_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.categories.focus_next(&mut app.fx),
        KeyCode::Up | KeyCode::Char('k') => app.categories.focus_previous(&mut app.fx),
        KeyCode::Enter => app.select_focused_category(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.refresh_active(),
        _ => super::handle_shared_key(key, app),
    }
}
