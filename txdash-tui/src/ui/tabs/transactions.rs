use super::*;
use crate::time_utils::format_timestamp;
use crate::types::Transaction;

pub fn render_transactions(frame: &mut Frame, app: &App, area: Rect) {
    let (list_area, detail_area) = match app.selected_transaction {
        Some(_) => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
                .split(area);
            (cols[0], Some(cols[1]))
        }
        None => (area, None),
    };

    render_list(frame, app, list_area);
    if let (Some(area), Some(tx)) = (detail_area, app.selected_transaction.as_ref()) {
        render_detail(frame, tx, area);
    }
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            " Recent Transactions ",
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let transactions = &app.transactions.transactions;
    if transactions.is_empty() {
        utils::render_empty(frame, inner, "Press r to load transactions");
        return;
    }

    let items: Vec<ListItem> = transactions
        .iter()
        .map(|tx| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<17}", format_timestamp(tx.timestamp_ms)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<22}", tx.merchant),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<14}", tx.category),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:>12}", format_amount(tx.amount)),
                    Style::default().fg(Color::Green),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.transactions.focused));
    frame.render_stateful_widget(list, inner, &mut state);
}

fn detail_lines(tx: &Transaction) -> Vec<Line<'static>> {
    let label = |name: &str| Span::styled(format!("{:<12}", name), Style::default().fg(Color::DarkGray));

    let mut lines = vec![
        Line::from(vec![label("ID"), Span::raw(tx.id.clone())]),
        Line::from(vec![label("Customer"), Span::raw(tx.customer_id.clone())]),
        Line::from(vec![
            label("Amount"),
            Span::styled(format_amount(tx.amount), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![label("Merchant"), Span::raw(tx.merchant.clone())]),
        Line::from(vec![label("Category"), Span::raw(tx.category.clone())]),
        Line::from(vec![label("Date"), Span::raw(format_timestamp(tx.timestamp_ms))]),
        Line::from(vec![label("Location"), Span::raw(tx.location.clone())]),
    ];
    if let Some(card) = &tx.card_last4 {
        lines.push(Line::from(vec![label("Card"), Span::raw(format!("**** {}", card))]));
    }
    if let Some(notes) = &tx.notes {
        lines.push(Line::from(vec![label("Notes"), Span::raw(notes.clone())]));
    }
    lines
}

fn render_detail(frame: &mut Frame, tx: &Transaction, area: Rect) {
    let detail = Paragraph::new(detail_lines(tx))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    " Transaction Details ",
                    Style::default().fg(Color::Yellow),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(detail, area);
}
