use crate::app::App;
use crate::types::{format_amount, Screen, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

mod startup;
mod tabs;
mod toast;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Startup => startup::render_startup(frame, app),
        Screen::Banking => tabs::render_banking(frame, app),
    }

    // Drawn last so it sits on top of whichever screen is showing.
    toast::render_toast(frame, app);
}

fn controls_bar(keys: &[(&str, &str)]) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}", action)));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        )
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, Terminal};

    use crate::app::{request_channel, App, RequestRx};
    use crate::config::TxdashConfig;

    pub fn app() -> (App, RequestRx) {
        let (tx, rx) = request_channel();
        let mut app = App::new(&TxdashConfig::default(), tx);
        app.initialize();
        (app, rx)
    }

    pub fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).expect("test terminal");
        terminal
            .draw(|f| super::render(f, app))
            .expect("draw frame");

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
