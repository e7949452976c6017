mod client;
mod dev_backend;
mod dto;

pub use client::ApiClient;

use crate::types::{
    CategorySummary, MerchantSummary, SearchResult, SpendingSummary, TimeSeriesPoint,
    Transaction,
};

/// A response body paired with the client-measured round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub body: T,
    pub roundtrip_ms: u64,
}

/// Why a tab load produced no data.
///
/// Only `Transport` is a real failure; the other variants are the backend
/// answering without usable data, which the views render as an empty state.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    #[error("backend reported: {message}")]
    Backend { message: String, roundtrip_ms: u64 },

    #[error("response is missing `{field}`")]
    Missing {
        field: &'static str,
        roundtrip_ms: u64,
    },
}

impl LoadError {
    /// Round trip of the exchange, when one completed.
    pub fn roundtrip_ms(&self) -> Option<u64> {
        match self {
            LoadError::Transport(_) => None,
            LoadError::Backend { roundtrip_ms, .. } | LoadError::Missing { roundtrip_ms, .. } => {
                Some(*roundtrip_ms)
            }
        }
    }

    pub fn is_soft(&self) -> bool {
        !matches!(self, LoadError::Transport(_))
    }
}

pub type Loaded<T> = Result<Timed<T>, LoadError>;

#[derive(Debug, Clone, PartialEq)]
pub struct RecentTransactions {
    pub transactions: Vec<Transaction>,
    pub lrange_ms: f64,
    pub mget_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetail {
    pub transaction: Transaction,
    pub redis_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopCategories {
    pub categories: Vec<CategorySummary>,
    pub redis_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopMerchants {
    pub category: String,
    pub merchants: Vec<MerchantSummary>,
    pub redis_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendingRange {
    pub points: Vec<TimeSeriesPoint>,
    pub summary: SpendingSummary,
    pub redis_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHits {
    pub results: Vec<SearchResult>,
    pub count: u64,
    pub search_ms: f64,
}

/// The fields of a stream entry the startup screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamTransaction {
    pub merchant: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamLatest {
    pub stream_id: String,
    pub transaction: Option<StreamTransaction>,
}
