use std::time::Instant;

use throbber_widgets_tui::ThrobberState;

use crate::api::{Loaded, TransactionDetail};
use crate::config::TxdashConfig;
use crate::types::{Screen, Tab, TimeWindow, Transaction, UnlockStatus};

mod dispatch;
mod render;
mod startup;
mod tabs;
mod toast;

pub use dispatch::{request_channel, Completion, FetchOutcome, FetchRequest, RequestRx};
pub use render::{Redraw, Region};
pub use tabs::QueryEdit;
pub use toast::{Toast, ToastPhase};

use dispatch::{RequestTx, Ticket};
use startup::StartupFeed;
use tabs::{CategoriesTab, Effects, SearchTab, TabController, TimeSeriesTab, TransactionsTab};
use toast::Timing;

pub struct App {
    pub running: bool,
    pub screen: Screen,
    pub active_tab: Tab,
    pub status: UnlockStatus,
    pub selected_transaction: Option<Transaction>,
    pub status_message: Option<String>,

    pub startup: StartupFeed,
    pub transactions: TransactionsTab,
    pub categories: CategoriesTab,
    pub timeseries: TimeSeriesTab,
    pub search: SearchTab,

    pub fx: Effects,
    pub throbber_state: ThrobberState,

    insight_url: String,
    activation: u64,
    mounted: Option<Ticket>,
}

impl App {
    pub fn new(config: &TxdashConfig, requests: RequestTx) -> Self {
        Self {
            running: true,
            screen: Screen::Startup,
            active_tab: Tab::Transactions,
            status: UnlockStatus::default(),
            selected_transaction: None,
            status_message: None,
            startup: StartupFeed::default(),
            transactions: TransactionsTab::default(),
            categories: CategoriesTab::default(),
            timeseries: TimeSeriesTab::default(),
            search: SearchTab::default(),
            fx: Effects::new(config, requests),
            throbber_state: ThrobberState::default(),
            insight_url: config.insight_url.clone(),
            activation: 0,
            mounted: None,
        }
    }

    pub fn initialize(&mut self) {
        self.screen = Screen::Startup;
        self.render();
    }

    pub fn insight_url(&self) -> &str {
        &self.insight_url
    }

    pub fn current_ticket(&self) -> Ticket {
        Ticket {
            tab: self.active_tab,
            activation: self.activation,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.screen == Screen::Banking && ticket == self.current_ticket()
    }

    pub fn is_active_tab_unlocked(&self) -> bool {
        self.status.is_unlocked(self.active_tab)
    }

    /// Whether the active tab is waiting on a fetch.
    pub fn is_loading(&self) -> bool {
        self.fx.dispatcher.is_loading(self.active_tab)
    }

    pub fn is_loading_merchants(&self) -> bool {
        self.categories.selected.as_ref().is_some_and(|category| {
            self.fx.dispatcher.is_in_flight(&FetchRequest::TopMerchants {
                category: category.clone(),
                limit: self.fx.limits.top_merchants,
            })
        })
    }

    /// Redraw everything and mount the active tab if this activation has
    /// not been mounted yet. Locked tabs only get their placeholder.
    pub fn render(&mut self) {
        self.fx.renders.full();
        tracing::trace!(count = self.fx.renders.full_renders(), "full render");
        if self.screen != Screen::Banking {
            return;
        }

        let ticket = self.current_ticket();
        if !self.is_active_tab_unlocked() {
            if self.mounted == Some(ticket) {
                self.mounted = None;
            }
            return;
        }
        if self.mounted != Some(ticket) {
            self.mount_active(ticket);
        }
    }

    fn mount_active(&mut self, ticket: Ticket) {
        self.mounted = Some(ticket);
        tracing::debug!(tab = ?ticket.tab, activation = ticket.activation, "mounting tab");
        match ticket.tab {
            Tab::Transactions => self.transactions.mount(&mut self.fx, ticket),
            Tab::Categories => self.categories.mount(&mut self.fx, ticket),
            Tab::TimeSeries => self.timeseries.mount(&mut self.fx, ticket),
            Tab::Search => self.search.mount(&mut self.fx, ticket),
        }
    }

    fn active_region(&self) -> Region {
        match self.active_tab {
            Tab::Transactions => self.transactions.region(),
            Tab::Categories => self.categories.region(),
            Tab::TimeSeries => self.timeseries.region(),
            Tab::Search => self.search.region(),
        }
    }

    pub fn check_status(&mut self) {
        self.fx.dispatcher.poll(FetchRequest::Status);
    }

    /// Returns true if the status changed and the screen was re-rendered.
    pub fn apply_status(&mut self, result: anyhow::Result<UnlockStatus>) -> bool {
        let status = match result {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("Status check failed: {:#}", e);
                return false;
            }
        };

        if status == self.status {
            return false;
        }
        tracing::info!(changed = ?self.status.changed_tabs(&status), "unlock status changed");
        self.status = status;
        self.render();
        true
    }

    pub fn poll_stream(&mut self) {
        if self.screen == Screen::Startup {
            self.fx.dispatcher.poll(self.startup.request());
        }
    }

    pub fn navigate_to_banking(&mut self) {
        if self.screen == Screen::Banking {
            return;
        }
        tracing::info!("entering banking dashboard");
        self.screen = Screen::Banking;
        self.render();
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.selected_transaction = None;
        self.transactions.clear_selection();
        self.categories.clear_selection();
        self.timeseries.clear_selection();
        self.search.clear_selection();
        self.activation += 1;
        self.render();
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        let tab = if forward {
            self.active_tab.next()
        } else {
            self.active_tab.previous()
        };
        self.switch_tab(tab);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Re-issue the active tab's primary load.
    pub fn refresh_active(&mut self) {
        if self.screen != Screen::Banking || !self.is_active_tab_unlocked() {
            return;
        }
        let ticket = self.current_ticket();
        match self.active_tab {
            Tab::Transactions => self.transactions.load(&mut self.fx, ticket),
            Tab::Categories => self.categories.load(&mut self.fx, ticket),
            Tab::TimeSeries => self.timeseries.load(&mut self.fx, ticket),
            Tab::Search => {}
        }
    }

    pub fn change_window(&mut self, window: TimeWindow) {
        if self.active_tab != Tab::TimeSeries || !self.is_active_tab_unlocked() {
            return;
        }
        if self.timeseries.set_window(window) {
            self.activation += 1;
            let ticket = self.current_ticket();
            self.mount_active(ticket);
        }
    }

    pub fn open_transaction_detail(&mut self) {
        let Some(id) = self.transactions.focused_transaction().map(|t| t.id.clone()) else {
            return;
        };
        let ticket = self.current_ticket();
        self.fx
            .dispatcher
            .issue(FetchRequest::Transaction { id }, ticket);
        self.fx.renders.mark(Region::TransactionDetail);
    }

    pub fn close_transaction_detail(&mut self) {
        if self.selected_transaction.take().is_some() {
            self.fx.renders.mark(Region::TransactionDetail);
        }
    }

    pub fn select_focused_category(&mut self) {
        let ticket = self.current_ticket();
        self.categories.select_focused(&mut self.fx, ticket);
    }

    pub fn submit_search(&mut self) -> bool {
        let ticket = self.current_ticket();
        self.search.submit(&mut self.fx, ticket)
    }

    pub fn perform_search(&mut self, query: &str) -> bool {
        let ticket = self.current_ticket();
        self.search.perform_search(query, &mut self.fx, ticket)
    }

    pub fn apply_completion(&mut self, completion: Completion) {
        let Completion { request, outcome } = completion;
        let waiters = self.fx.dispatcher.complete(&request);

        match (request, outcome) {
            (_, FetchOutcome::Status(result)) => {
                self.apply_status(result);
            }
            (FetchRequest::StreamLatest { after }, FetchOutcome::StreamLatest(result)) => {
                if self.screen != Screen::Startup {
                    tracing::debug!("dropping stream entry after leaving startup");
                    return;
                }
                if self.startup.apply(&after, result) {
                    self.fx.renders.mark(Region::StartupPulse);
                }
            }
            (request, outcome) => {
                if !waiters.iter().any(|ticket| self.is_current(*ticket)) {
                    tracing::debug!(?request, "discarding response for a superseded activation");
                    return;
                }
                self.apply_tab_outcome(request, outcome);
            }
        }
    }

    fn apply_tab_outcome(&mut self, request: FetchRequest, outcome: FetchOutcome) {
        match (request, outcome) {
            (_, FetchOutcome::RecentTransactions(result)) => {
                self.transactions.apply(result, &mut self.fx)
            }
            (_, FetchOutcome::Transaction(result)) => self.apply_transaction_detail(result),
            (_, FetchOutcome::TopCategories(result)) => {
                self.categories.apply_categories(result, &mut self.fx)
            }
            (FetchRequest::TopMerchants { category, .. }, FetchOutcome::TopMerchants(result)) => {
                self.categories
                    .apply_merchants(&category, result, &mut self.fx)
            }
            (_, FetchOutcome::SpendingRange(result)) => self.timeseries.apply(result, &mut self.fx),
            (FetchRequest::Search { query, .. }, FetchOutcome::Search(result)) => {
                self.search.apply(&query, result, &mut self.fx)
            }
            (request, _) => {
                tracing::warn!(?request, "outcome does not match its request");
            }
        }
    }

    fn apply_transaction_detail(&mut self, result: Loaded<TransactionDetail>) {
        self.fx.renders.mark(Region::TransactionDetail);
        match result {
            Ok(loaded) => {
                let detail = loaded.body;
                self.fx.toaster.show(Toast::new(
                    format!("Retrieved {}", detail.transaction.id),
                    vec![Timing::new("JSON.GET", detail.redis_ms)],
                    loaded.roundtrip_ms,
                ));
                self.selected_transaction = Some(detail.transaction);
            }
            Err(e) => {
                tracing::warn!("Transaction lookup failed: {:#}", e);
                self.selected_transaction = None;
            }
        }
    }

    /// Advance animations. Returns true if anything needs drawing.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.fx.toaster.expire(now) {
            self.fx.renders.mark(Region::Toast);
        }
        if self.fx.toaster.phase_at(now) == Some(ToastPhase::Fading) {
            self.fx.renders.mark(Region::Toast);
        }
        if self.is_loading() {
            self.throbber_state.calc_next();
            let region = self.active_region();
            self.fx.renders.mark(region);
        }
        self.fx.renders.needs_draw()
    }
}
