use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::PollingConfig;
use crate::types::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PollTick {
    Status,
    Stream,
}

pub(super) type TickTx = UnboundedSender<PollTick>;
pub(super) type TickRx = UnboundedReceiver<PollTick>;

pub(super) fn tick_channel() -> (TickTx, TickRx) {
    mpsc::unbounded_channel()
}

/// A periodic tick source. Aborted on `stop` or drop.
#[derive(Debug)]
pub(super) struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn(tick: PollTick, period: Duration, immediate: bool, tx: TickTx) -> Self {
        let handle = tokio::spawn(async move {
            let start = if immediate {
                Instant::now()
            } else {
                Instant::now() + period
            };
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if tx.send(tick).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Keeps the status poller alive for the whole session and the stream
/// poller alive only while the startup screen is showing.
#[derive(Debug)]
pub(super) struct Pollers {
    config: PollingConfig,
    tx: TickTx,
    status: Option<Poller>,
    stream: Option<Poller>,
}

impl Pollers {
    pub fn new(config: PollingConfig, tx: TickTx) -> Self {
        Self {
            config,
            tx,
            status: None,
            stream: None,
        }
    }

    pub fn reconcile(&mut self, screen: Screen) {
        if self.status.is_none() {
            self.status = Some(Poller::spawn(
                PollTick::Status,
                self.config.status_interval(),
                false,
                self.tx.clone(),
            ));
        }

        match (screen, self.stream.is_some()) {
            (Screen::Startup, false) => {
                tracing::debug!("starting stream poller");
                self.stream = Some(Poller::spawn(
                    PollTick::Stream,
                    self.config.stream_interval(),
                    true,
                    self.tx.clone(),
                ));
            }
            (Screen::Banking, true) => {
                if let Some(poller) = self.stream.take() {
                    tracing::debug!("stopping stream poller");
                    poller.stop();
                }
            }
            _ => {}
        }
    }

    pub fn stop_all(&mut self) {
        if let Some(poller) = self.stream.take() {
            poller.stop();
        }
        if let Some(poller) = self.status.take() {
            poller.stop();
        }
    }
}
