use super::*;

const WELCOME: &str = "Welcome to the Transactions Workshop";
const HINT: &str = "Begin adding data to see application components";

pub fn render_startup(frame: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(12),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Insight link, top right
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("View the data via ", Style::default().fg(Color::DarkGray)),
            Span::styled("Insight ", Style::default().fg(Color::Red)),
            Span::styled(
                format!("({}) ", app.insight_url()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .alignment(Alignment::Right),
        outer[0],
    );

    let center = utils::centered_rect(60, 11, outer[1]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(center);

    frame.render_widget(
        Paragraph::new(Span::styled(
            WELCOME,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        rows[0],
    );

    let pulse = app.startup.pulse();
    let pulse_box = utils::centered_rect(44, 5, rows[1]);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} - ${}", pulse.merchant, pulse.amount),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(Span::styled(" Live ", Style::default().fg(Color::Blue))),
        ),
        pulse_box,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(HINT, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center),
        rows[3],
    );

    if let Some(message) = &app.status_message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.clone(),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
            rows[4],
        );
    }

    frame.render_widget(
        controls_bar(&[("Enter", "Get Started"), ("I", "Open Insight"), ("Q", "Quit")]),
        outer[2],
    );
}

#[cfg(test)]
mod tests {
    use crate::api::{StreamLatest, StreamTransaction};
    use crate::app::{Completion, FetchOutcome, FetchRequest};
    use crate::ui::test_support::{app, draw};

    #[test]
    fn startup_shows_waiting_pulse() {
        let (mut app, _rx) = app();
        let screen = draw(&mut app);
        assert!(screen.contains("Welcome to the Transactions Workshop"));
        assert!(screen.contains("Waiting for transactions... - $0.00"));
    }

    #[test]
    fn startup_shows_latest_stream_entry() {
        let (mut app, _rx) = app();
        app.apply_completion(Completion {
            request: FetchRequest::StreamLatest { after: "0".into() },
            outcome: FetchOutcome::StreamLatest(Ok(StreamLatest {
                stream_id: "1-1".into(),
                transaction: Some(StreamTransaction {
                    merchant: Some("Blue Bottle".into()),
                    amount: Some(4.5),
                }),
            })),
        });
        assert!(draw(&mut app).contains("Blue Bottle - $4.50"));
    }
}
