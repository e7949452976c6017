mod categories;
mod search;
mod timeseries;
mod transactions;

pub use categories::CategoriesTab;
pub use search::{QueryEdit, SearchTab};
pub use timeseries::TimeSeriesTab;
pub use transactions::TransactionsTab;

use crate::api::LoadError;
use crate::config::{LimitsConfig, TxdashConfig};

use super::dispatch::{Dispatcher, RequestTx, Ticket};
use super::render::{Region, RenderTracker};
use super::toast::Toaster;

/// Side-effect sinks shared by the tab controllers.
#[derive(Debug)]
pub struct Effects {
    pub dispatcher: Dispatcher,
    pub renders: RenderTracker,
    pub toaster: Toaster,
    pub limits: LimitsConfig,
}

impl Effects {
    pub fn new(config: &TxdashConfig, requests: RequestTx) -> Self {
        Self {
            dispatcher: Dispatcher::new(requests),
            renders: RenderTracker::default(),
            toaster: Toaster::new(&config.toast),
            limits: config.limits,
        }
    }
}

pub trait TabController {
    /// The region this tab draws into.
    fn region(&self) -> Region;

    /// Called once per activation, only while the tab is unlocked.
    fn mount(&mut self, fx: &mut Effects, ticket: Ticket);

    fn clear_selection(&mut self);
}

pub(super) fn log_load_failure(what: &str, err: &LoadError) {
    if err.is_soft() {
        tracing::info!(roundtrip_ms = ?err.roundtrip_ms(), "{} returned no data: {}", what, err);
    } else {
        tracing::warn!("{} failed: {:#}", what, err);
    }
}
