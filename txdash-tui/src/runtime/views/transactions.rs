use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_transactions_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.transactions.focus_next(&mut app.fx),
        KeyCode::Up | KeyCode::Char('k') => app.transactions.focus_previous(&mut app.fx),
        KeyCode::Enter => app.open_transaction_detail(),
        KeyCode::Esc => app.close_transaction_detail(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.refresh_active(),
        _ => super::handle_shared_key(key, app),
    }
}
