use super::*;
use crate::app::ToastPhase;
use std::time::Instant;

pub fn render_toast(frame: &mut Frame, app: &App) {
    let Some(toast) = app.fx.toaster.current() else {
        return;
    };
    let Some(phase) = app.fx.toaster.phase_at(Instant::now()) else {
        return;
    };

    let text = toast.text();
    let rect = toast_area(frame.area(), text.chars().count() as u16);

    let color = match phase {
        ToastPhase::Visible => Color::Green,
        ToastPhase::Fading => Color::DarkGray,
    };

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(color))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        ),
        rect,
    );
}

/// Right-aligned over the bottom three rows, where both screens keep their
/// controls bar, so no loaded data is hidden behind the toast.
fn toast_area(area: Rect, text_width: u16) -> Rect {
    let width = (text_width + 4).min(area.width);
    let height = 3.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y + area.height.saturating_sub(height),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{Toast, ToastPhase};
    use crate::ui::test_support::{app, draw};

    #[test]
    fn toast_overlays_the_screen() {
        let (mut app, _rx) = app();
        app.fx
            .toaster
            .show(Toast::new("Loaded 3 categories", vec![], 12));

        assert_eq!(
            app.fx.toaster.phase_at(std::time::Instant::now()),
            Some(ToastPhase::Visible)
        );
        assert!(draw(&mut app).contains("Loaded 3 categories | Roundtrip: 12ms"));
    }

    #[test]
    fn toast_sits_on_the_controls_row() {
        let area = ratatui::layout::Rect::new(0, 0, 120, 36);
        let rect = super::toast_area(area, 40);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (76, 33, 44, 3));

        let tiny = super::toast_area(ratatui::layout::Rect::new(0, 0, 20, 2), 40);
        assert_eq!((tiny.x, tiny.y, tiny.width, tiny.height), (0, 0, 20, 2));
    }
}
