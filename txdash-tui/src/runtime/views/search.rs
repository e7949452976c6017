use crate::app::{App, QueryEdit};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(super) fn handle_search_key(key: KeyEvent, app: &mut App) {
    let edit = match key.code {
        KeyCode::Enter => {
            app.submit_search();
            return;
        }
        KeyCode::Esc => QueryEdit::Clear,
        KeyCode::Backspace => QueryEdit::Backspace,
        KeyCode::Left => QueryEdit::Left,
        KeyCode::Right => QueryEdit::Right,
        KeyCode::Home => QueryEdit::Home,
        KeyCode::End => QueryEdit::End,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            QueryEdit::Insert(c)
        }
        _ => return,
    };
    app.search.edit(&mut app.fx, edit);
}
