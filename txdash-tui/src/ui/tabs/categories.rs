use super::*;

pub fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_category_list(frame, app, cols[0]);
    render_merchants(frame, app, cols[1]);
}

fn render_category_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            " Top Spending Categories ",
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let categories = &app.categories.categories;
    if categories.is_empty() {
        utils::render_empty(frame, inner, "No categories found.");
        return;
    }

    let selected = app.categories.selected.as_deref();
    let items: Vec<ListItem> = categories
        .iter()
        .map(|c| {
            let name_style = if selected == Some(c.category.as_str()) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", c.category), name_style),
                Span::styled(
                    format!("{:>12}", format_amount(c.total_spent)),
                    Style::default().fg(Color::Green),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.categories.focused));
    frame.render_stateful_widget(list, inner, &mut state);
}

fn render_merchants(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.categories.selected {
        Some(category) => format!(" Top Merchants: {} ", category),
        None => " Top Merchants ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(title, Style::default().fg(Color::White)))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.categories.selected.is_none() {
        utils::render_empty(frame, inner, "Select a category to view top merchants");
        return;
    }
    if app.categories.merchants.is_empty() {
        let text = if app.is_loading_merchants() {
            "Loading merchants..."
        } else {
            "No merchants found for this category."
        };
        utils::render_empty(frame, inner, text);
        return;
    }

    let items: Vec<ListItem> = app
        .categories
        .merchants
        .iter()
        .map(|m| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", m.merchant), Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:>12}", format_amount(m.amount)),
                    Style::default().fg(Color::Green),
                ),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

#[cfg(test)]
mod tests {
    use crate::types::{CategorySummary, MerchantSummary, Tab, UnlockStatus};
    use crate::ui::test_support::{app, draw};

    #[test]
    fn drill_down_panel_states() {
        let (mut app, _rx) = app();
        app.apply_status(Ok(UnlockStatus {
            categories_unlocked: true,
            ..UnlockStatus::default()
        }));
        app.navigate_to_banking();
        app.switch_tab(Tab::Categories);

        let screen = draw(&mut app);
        assert!(screen.contains("No categories found."));
        assert!(screen.contains("Select a category to view top merchants"));

        app.categories.categories = vec![CategorySummary {
            category: "Groceries".into(),
            total_spent: 310.0,
        }];
        app.categories.selected = Some("Groceries".into());
        assert!(draw(&mut app).contains("No merchants found for this category."));

        app.categories.merchants = vec![MerchantSummary {
            merchant: "Acme".into(),
            amount: 42.10,
        }];
        let screen = draw(&mut app);
        assert!(screen.contains("Top Merchants: Groceries"));
        assert!(screen.contains("$42.10"));
        assert!(screen.contains("$310.00"));
    }
}
