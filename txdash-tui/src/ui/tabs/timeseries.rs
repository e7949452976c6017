use super::*;
use crate::types::TimeWindow;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType};

pub fn render_timeseries(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    render_window_picker(frame, app.timeseries.current_window, rows[0]);
    render_chart(frame, app, rows[1]);
    render_summary(frame, app, rows[2]);
}

fn render_window_picker(frame: &mut Frame, current: TimeWindow, area: Rect) {
    let mut spans = vec![Span::styled(" Window: ", Style::default().fg(Color::DarkGray))];
    for window in TimeWindow::ALL {
        let style = if window == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", window.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" Spending: last {} ", app.timeseries.current_window.label()),
            Style::default().fg(Color::White),
        ));

    let Some(chart) = &app.timeseries.chart else {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        utils::render_empty(frame, inner, "No data available.");
        return;
    };

    let dataset = Dataset::default()
        .name("Amount ($)")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::LightBlue))
        .data(&chart.points);

    let y_top = chart.y_bounds[1];
    let y_labels = vec![
        Span::styled("0", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:.0}", y_top / 2.0), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:.0}", y_top), Style::default().fg(Color::DarkGray)),
    ];
    let x_labels: Vec<Span> = chart
        .x_labels
        .iter()
        .map(|label| Span::styled(label.clone(), Style::default().fg(Color::DarkGray)))
        .collect();

    let widget = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(chart.x_bounds)
                .labels(x_labels)
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds(chart.y_bounds)
                .labels(y_labels)
                .style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(widget, area);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Summary ", Style::default().fg(Color::DarkGray)));

    let Some(summary) = app.timeseries.summary else {
        frame.render_widget(block, area);
        return;
    };

    let value = |text: String| Span::styled(text, Style::default().fg(Color::Green));
    let mut spans = vec![
        Span::raw("Total spent: "),
        value(format_amount(summary.total_spent)),
        Span::raw("   Transactions: "),
        value(summary.count.to_string()),
    ];
    if let Some(average) = summary.average() {
        spans.push(Span::raw("   Average: "));
        spans.push(value(format_amount(average)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use crate::api::{SpendingRange, Timed};
    use crate::app::{Completion, FetchOutcome, FetchRequest};
    use crate::types::{SpendingSummary, Tab, TimeSeriesPoint, UnlockStatus};
    use crate::ui::test_support::{app, draw};

    #[test]
    fn summary_omits_average_without_transactions() {
        let (mut app, _rx) = app();
        app.apply_status(Ok(UnlockStatus {
            timeseries_unlocked: true,
            ..UnlockStatus::default()
        }));
        app.navigate_to_banking();
        app.switch_tab(Tab::TimeSeries);

        assert!(draw(&mut app).contains("No data available."));

        app.timeseries.summary = Some(SpendingSummary {
            total_spent: 0.0,
            count: 0,
        });
        assert!(!draw(&mut app).contains("Average"));

        app.apply_completion(Completion {
            request: FetchRequest::SpendingRange { days: 7 },
            outcome: FetchOutcome::SpendingRange(Ok(Timed {
                body: SpendingRange {
                    points: vec![
                        TimeSeriesPoint {
                            timestamp_ms: 1_700_000_000_000,
                            amount: 30.0,
                        },
                        TimeSeriesPoint {
                            timestamp_ms: 1_700_090_000_000,
                            amount: 60.0,
                        },
                    ],
                    summary: SpendingSummary {
                        total_spent: 90.0,
                        count: 3,
                    },
                    redis_ms: 0.4,
                },
                roundtrip_ms: 5,
            })),
        });
        let screen = draw(&mut app);
        assert!(screen.contains("Transactions: 3"));
        assert!(screen.contains("Average: $30.00"));
        assert!(screen.contains("Loaded 2 data points"));
        assert!(screen.contains("7 Days"));
        assert!(!screen.contains("No data available."));
    }
}
