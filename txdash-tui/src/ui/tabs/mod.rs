use super::*;
use ratatui::widgets::Tabs;

mod categories;
mod search;
mod timeseries;
mod transactions;

pub fn render_banking(frame: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_tab_bar(frame, app, outer[0]);

    let body = outer[1];
    if !app.is_active_tab_unlocked() {
        render_locked(frame, app.active_tab, body);
    } else {
        match app.active_tab {
            Tab::Transactions => transactions::render_transactions(frame, app, body),
            Tab::Categories => categories::render_categories(frame, app, body),
            Tab::TimeSeries => timeseries::render_timeseries(frame, app, body),
            Tab::Search => search::render_search(frame, app, body),
        }
    }

    frame.render_widget(controls_bar(&tab_controls(app)), outer[2]);
}

fn render_tab_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let label = format!("{} {}", i + 1, tab.label());
            if app.status.is_unlocked(*tab) {
                Line::from(label)
            } else {
                Line::from(Span::styled(
                    format!("{} (locked)", label),
                    Style::default().fg(Color::DarkGray),
                ))
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            " Transactions Dashboard ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.active_tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
    frame.render_widget(tabs, area);

    if app.is_loading() {
        let spinner_area = Rect {
            x: inner.x + inner.width.saturating_sub(12),
            y: inner.y,
            width: 12.min(inner.width),
            height: 1,
        };
        let throbber = throbber_widgets_tui::Throbber::default()
            .label("Loading")
            .style(Style::default().fg(Color::Yellow))
            .throbber_style(Style::default().fg(Color::Yellow))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(throbber_widgets_tui::WhichUse::Spin);
        frame.render_stateful_widget(throbber, spinner_area, &mut app.throbber_state);
    }
}

fn render_locked(frame: &mut Frame, tab: Tab, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", tab.label()),
            Style::default().fg(Color::DarkGray),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(
            "Locked",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            tab.locked_hint(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        utils::centered_rect(inner.width, 3, inner),
    );
}

fn tab_controls(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut keys = vec![("Tab", "Next tab")];
    if !app.is_active_tab_unlocked() {
        keys.extend([("1-4", "Jump"), ("Q", "Quit")]);
        return keys;
    }

    match app.active_tab {
        Tab::Transactions => keys.extend([
            ("j/k", "Move"),
            ("Enter", "Details"),
            ("Esc", "Close"),
            ("R", "Refresh"),
            ("Q", "Quit"),
        ]),
        Tab::Categories => keys.extend([
            ("j/k", "Move"),
            ("Enter", "Top merchants"),
            ("R", "Refresh"),
            ("Q", "Quit"),
        ]),
        Tab::TimeSeries => keys.extend([("h/l", "Window"), ("R", "Refresh"), ("Q", "Quit")]),
        Tab::Search => keys.extend([("Enter", "Search"), ("Esc", "Clear"), ("Ctrl+C", "Quit")]),
    }
    keys
}
