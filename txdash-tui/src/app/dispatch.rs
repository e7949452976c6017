//! Fetch requests issued by the controllers and the single-flight table that
//! routes their outcomes back to the activation that asked for them.

use std::collections::HashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{
    LoadError, Loaded, RecentTransactions, SearchHits, SpendingRange, StreamLatest,
    TopCategories, TopMerchants, TransactionDetail,
};
use crate::types::{Tab, UnlockStatus};

/// One logical backend call. Doubles as the single-flight key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchRequest {
    Status,
    StreamLatest { after: String },
    RecentTransactions { limit: u32 },
    Transaction { id: String },
    TopCategories { limit: u32 },
    TopMerchants { category: String, limit: u32 },
    SpendingRange { days: u32 },
    Search { query: String, limit: u32 },
}

impl FetchRequest {
    /// The tab whose data this request loads, if any.
    pub fn tab(&self) -> Option<Tab> {
        match self {
            FetchRequest::Status | FetchRequest::StreamLatest { .. } => None,
            FetchRequest::RecentTransactions { .. } | FetchRequest::Transaction { .. } => {
                Some(Tab::Transactions)
            }
            FetchRequest::TopCategories { .. } | FetchRequest::TopMerchants { .. } => {
                Some(Tab::Categories)
            }
            FetchRequest::SpendingRange { .. } => Some(Tab::TimeSeries),
            FetchRequest::Search { .. } => Some(Tab::Search),
        }
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Status(anyhow::Result<UnlockStatus>),
    StreamLatest(Result<StreamLatest, LoadError>),
    RecentTransactions(Loaded<RecentTransactions>),
    Transaction(Loaded<TransactionDetail>),
    TopCategories(Loaded<TopCategories>),
    TopMerchants(Loaded<TopMerchants>),
    SpendingRange(Loaded<SpendingRange>),
    Search(Loaded<SearchHits>),
}

#[derive(Debug)]
pub struct Completion {
    pub request: FetchRequest,
    pub outcome: FetchOutcome,
}

/// Identifies one activation of a tab. A response is only applied while the
/// ticket it was issued under is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub tab: Tab,
    pub activation: u64,
}

pub type RequestTx = UnboundedSender<FetchRequest>;
pub type RequestRx = UnboundedReceiver<FetchRequest>;

pub fn request_channel() -> (RequestTx, RequestRx) {
    mpsc::unbounded_channel()
}

#[derive(Debug)]
pub struct Dispatcher {
    outbox: RequestTx,
    in_flight: HashMap<FetchRequest, Vec<Ticket>>,
}

impl Dispatcher {
    pub fn new(outbox: RequestTx) -> Self {
        Self {
            outbox,
            in_flight: HashMap::new(),
        }
    }

    /// Join or start the fetch for `request` on behalf of `ticket`.
    /// Returns true only when a new fetch was sent.
    pub fn issue(&mut self, request: FetchRequest, ticket: Ticket) -> bool {
        if let Some(waiters) = self.in_flight.get_mut(&request) {
            if !waiters.contains(&ticket) {
                waiters.push(ticket);
            }
            tracing::debug!(?request, "joined in-flight request");
            return false;
        }

        if self.outbox.send(request.clone()).is_err() {
            tracing::warn!(?request, "fetch executor is gone, dropping request");
            return false;
        }
        self.in_flight.insert(request, vec![ticket]);
        true
    }

    /// Fire-and-forget polls. Not coalesced and not tied to an activation.
    pub fn poll(&mut self, request: FetchRequest) {
        if self.outbox.send(request.clone()).is_err() {
            tracing::warn!(?request, "fetch executor is gone, dropping poll");
        }
    }

    /// Remove `request` from the in-flight table, returning its waiters.
    pub fn complete(&mut self, request: &FetchRequest) -> Vec<Ticket> {
        self.in_flight.remove(request).unwrap_or_default()
    }

    pub fn is_in_flight(&self, request: &FetchRequest) -> bool {
        self.in_flight.contains_key(request)
    }

    /// Whether any request loading data for `tab` is outstanding.
    pub fn is_loading(&self, tab: Tab) -> bool {
        self.in_flight.keys().any(|request| request.tab() == Some(tab))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(activation: u64) -> Ticket {
        Ticket {
            tab: Tab::Categories,
            activation,
        }
    }

    #[test]
    fn identical_requests_share_one_fetch() {
        let (tx, mut rx) = request_channel();
        let mut dispatcher = Dispatcher::new(tx);
        let request = FetchRequest::TopCategories { limit: 10 };

        assert!(dispatcher.issue(request.clone(), ticket(1)));
        assert!(!dispatcher.issue(request.clone(), ticket(2)));

        assert_eq!(rx.try_recv().ok(), Some(request.clone()));
        assert!(rx.try_recv().is_err());
        assert!(dispatcher.is_loading(Tab::Categories));

        assert_eq!(dispatcher.complete(&request), vec![ticket(1), ticket(2)]);
        assert!(!dispatcher.is_in_flight(&request));
        assert!(!dispatcher.is_loading(Tab::Categories));
    }

    #[test]
    fn completed_request_can_be_issued_again() {
        let (tx, mut rx) = request_channel();
        let mut dispatcher = Dispatcher::new(tx);
        let request = FetchRequest::SpendingRange { days: 7 };

        assert!(dispatcher.issue(request.clone(), ticket(1)));
        dispatcher.complete(&request);
        assert!(dispatcher.issue(request.clone(), ticket(1)));

        assert_eq!(rx.try_recv().ok(), Some(request.clone()));
        assert_eq!(rx.try_recv().ok(), Some(request));
    }

    #[test]
    fn polls_are_never_coalesced() {
        let (tx, mut rx) = request_channel();
        let mut dispatcher = Dispatcher::new(tx);

        dispatcher.poll(FetchRequest::Status);
        dispatcher.poll(FetchRequest::Status);

        assert_eq!(rx.try_recv().ok(), Some(FetchRequest::Status));
        assert_eq!(rx.try_recv().ok(), Some(FetchRequest::Status));
        assert!(dispatcher.complete(&FetchRequest::Status).is_empty());
    }

    #[test]
    fn closed_executor_does_not_leave_requests_in_flight() {
        let (tx, rx) = request_channel();
        drop(rx);
        let mut dispatcher = Dispatcher::new(tx);
        let request = FetchRequest::RecentTransactions { limit: 20 };

        assert!(!dispatcher.issue(request.clone(), ticket(1)));
        assert!(!dispatcher.is_in_flight(&request));
    }
}
