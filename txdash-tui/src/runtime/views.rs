use crate::app::App;
use crate::types::{Screen, Tab};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod categories;
mod search;
mod startup;
mod timeseries;
mod transactions;

pub(super) fn handle_key(key: KeyEvent, app: &mut App) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Startup => startup::handle_startup_key(key, app),
        Screen::Banking => handle_banking_key(key, app),
    }
}

fn handle_banking_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Tab => return app.cycle_tab(true),
        KeyCode::BackTab => return app.cycle_tab(false),
        _ => {}
    }

    // Locked tabs only show their placeholder.
    if !app.is_active_tab_unlocked() {
        handle_shared_key(key, app);
        return;
    }

    match app.active_tab {
        Tab::Transactions => transactions::handle_transactions_key(key, app),
        Tab::Categories => categories::handle_categories_key(key, app),
        Tab::TimeSeries => timeseries::handle_timeseries_key(key, app),
        Tab::Search => search::handle_search_key(key, app),
    }
}

/// Keys every non-text tab understands: quit and jump to tab 1-4.
fn handle_shared_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            app.switch_tab(Tab::ALL[idx]);
        }
        _ => {}
    }
}
