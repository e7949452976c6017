use super::*;
use crate::time_utils::format_timestamp;

pub fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    render_input(frame, app, rows[0]);
    render_results(frame, app, rows[1]);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let (before, after) = app.search.input.split_at_cursor();
    let line = if app.search.input.text().is_empty() {
        Line::from(vec![
            Span::styled("█", Style::default().fg(Color::White)),
            Span::styled(
                " e.g. coffee shops in Austin",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled("█", Style::default().fg(Color::White)),
            Span::raw(after.to_string()),
        ])
    };

    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    " Semantic Search ",
                    Style::default().fg(Color::Yellow),
                ))
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(" Results ", Style::default().fg(Color::White)))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(query) = &app.search.query else {
        utils::render_empty(frame, inner, "Your results will appear here");
        return;
    };
    if !app.search.applied {
        if !app.is_loading() {
            utils::render_empty(frame, inner, "Searching...");
        }
        return;
    }
    if app.search.results.is_empty() {
        utils::render_empty(
            frame,
            inner,
            &format!("No transactions found for \"{}\"", query),
        );
        return;
    }

    let items: Vec<ListItem> = app
        .search
        .results
        .iter()
        .map(|result| {
            let tx = &result.transaction;
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:<22}", tx.merchant),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:>12}", format_amount(tx.amount)),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        format!("   {}% match", result.relevance_percent()),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                Line::from(Span::styled(
                    format!(
                        "  {} · {} · {}",
                        tx.category,
                        tx.location,
                        format_timestamp(tx.timestamp_ms)
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

#[cfg(test)]
mod tests {
    use crate::types::{SearchResult, Tab, Transaction, UnlockStatus};
    use crate::ui::test_support::{app, draw};

    #[test]
    fn empty_states_follow_the_query() {
        let (mut app, _rx) = app();
        app.apply_status(Ok(UnlockStatus {
            search_unlocked: true,
            ..UnlockStatus::default()
        }));
        app.navigate_to_banking();
        app.switch_tab(Tab::Search);
        assert!(draw(&mut app).contains("Your results will appear here"));

        app.search.query = Some("zebra".into());
        let screen = draw(&mut app);
        assert!(screen.contains("Searching..."));
        assert!(!screen.contains("No transactions found"));

        app.search.applied = true;
        assert!(draw(&mut app).contains("No transactions found for \"zebra\""));

        app.search.results = vec![SearchResult {
            transaction: Transaction {
                id: "TXN-7".into(),
                customer_id: "cust_001".into(),
                merchant: "Blue Bottle".into(),
                category: "dining".into(),
                amount: 6.25,
                timestamp_ms: 1_700_000_000_000,
                location: "Brooklyn, NY".into(),
                card_last4: None,
                notes: None,
            },
            score: 0.12,
        }];
        let screen = draw(&mut app);
        assert!(screen.contains("Blue Bottle"));
        assert!(screen.contains("88% match"));
    }
}
