use crate::api::ApiClient;
use crate::app::{App, Redraw, RequestRx};
use crate::config::PollingConfig;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::fetch::{completion_channel, spawn_fetch};
use super::poller::{tick_channel, PollTick, Pollers};
use super::views::handle_key;

/// Drives the dashboard until the user quits. Every state change happens
/// here, one message at a time: key events, poller ticks and completed
/// fetches.
pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
    mut requests: RequestRx,
    polling: PollingConfig,
) -> Result<()> {
    let (tick_tx, mut tick_rx) = tick_channel();
    let (done_tx, mut done_rx) = completion_channel();
    let mut pollers = Pollers::new(polling, tick_tx);

    app.initialize();

    while app.running {
        pollers.reconcile(app.screen);

        if app.tick(Instant::now()) {
            if let Some(redraw) = app.fx.renders.take() {
                prepare_frame(terminal, &redraw)?;
            }
            terminal.draw(|f| ui::render(f, app))?;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app),
                Event::Resize(..) => app.fx.renders.invalidate(),
                _ => {}
            }
        }

        while let Ok(tick) = tick_rx.try_recv() {
            match tick {
                PollTick::Status => app.check_status(),
                PollTick::Stream => app.poll_stream(),
            }
        }

        while let Ok(request) = requests.try_recv() {
            tracing::debug!(?request, "fetching");
            spawn_fetch(client, request, &done_tx);
        }

        while let Ok(completion) = done_rx.try_recv() {
            app.apply_completion(completion);
        }
    }

    pollers.stop_all();
    Ok(())
}

/// A full redraw repaints every cell; region updates go through ratatui's
/// buffer diff so only the changed cells reach the terminal.
fn prepare_frame<B: Backend>(terminal: &mut Terminal<B>, redraw: &Redraw) -> Result<(), B::Error> {
    match redraw {
        Redraw::Full => terminal.clear(),
        Redraw::Regions(regions) => {
            tracing::trace!(?regions, "partial redraw");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Region;
    use ratatui::{backend::TestBackend, widgets::Paragraph};
    use std::collections::BTreeSet;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn only_full_redraws_wipe_the_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(20, 2)).unwrap();
        terminal
            .draw(|f| f.render_widget(Paragraph::new("pulse"), f.area()))
            .unwrap();

        let toast_only = Redraw::Regions(BTreeSet::from([Region::Toast]));
        prepare_frame(&mut terminal, &toast_only).unwrap();
        assert!(screen(&terminal).contains("pulse"));

        prepare_frame(&mut terminal, &Redraw::Full).unwrap();
        assert!(!screen(&terminal).contains("pulse"));
    }
}
