use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;

use super::dto::{
    RecentTransactionsResponse, SearchResponse, SpendingRangeResponse, StreamLatestResponse,
    TopCategoriesResponse, TopMerchantsResponse, TransactionDetailResponse,
};
use crate::types::{
    CategorySummary, MerchantSummary, SearchResult, TimeSeriesPoint, Transaction, UnlockStatus,
};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const SEED_COUNT: usize = 120;
const STREAM_EVERY: Duration = Duration::from_secs(3);

// Each tab unlocks this long after the dev backend starts.
const UNLOCK_AFTER: [Duration; 4] = [
    Duration::from_secs(4),
    Duration::from_secs(8),
    Duration::from_secs(12),
    Duration::from_secs(16),
];

const CATALOG: [(&str, &[&str]); 5] = [
    ("dining", &["Starbucks", "Chipotle", "Shake Shack", "Blue Bottle"]),
    ("groceries", &["Whole Foods", "Trader Joe's", "Costco", "Kroger"]),
    ("shopping", &["Amazon", "Target", "IKEA", "REI"]),
    ("travel", &["Delta", "Marriott", "Airbnb", "Uber"]),
    ("bills", &["Verizon", "Comcast", "Netflix", "Con Edison"]),
];

const LOCATIONS: [&str; 5] = [
    "Miami, FL",
    "Austin, TX",
    "Seattle, WA",
    "Orlando, FL",
    "Brooklyn, NY",
];

/// In-memory stand-in for the transactions API, used by `txdash-tui dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    started: Instant,
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    rng: u64,
    now_ms: i64,
    /// Newest last.
    transactions: Vec<Transaction>,
    stream_seq: u64,
}

impl DevStore {
    fn next_u64(&mut self) -> u64 {
        // xorshift64
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng = x;
        x
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn make_transaction(&mut self, timestamp_ms: i64) -> Transaction {
        let (category, merchants) = CATALOG[(self.next_u64() % CATALOG.len() as u64) as usize];
        let merchant = self.pick(merchants);
        let location = self.pick(&LOCATIONS);
        let cents = 150 + self.next_u64() % 25_000;
        let seq = self.transactions.len() + 1;
        Transaction {
            id: format!("TXN-{:06}", seq),
            customer_id: format!("cust_{:03}", 1 + self.next_u64() % 100),
            merchant: merchant.to_string(),
            category: category.to_string(),
            amount: cents as f64 / 100.0,
            timestamp_ms,
            location: location.to_string(),
            card_last4: Some(format!("{:04}", self.next_u64() % 10_000)),
            notes: (seq % 7 == 0).then(|| "Recurring".to_string()),
        }
    }
}

impl DevBackend {
    pub fn new() -> Self {
        let now_ms = time::OffsetDateTime::now_utc().unix_timestamp() * 1000;
        let mut store = DevStore {
            rng: 0x9E37_79B9_7F4A_7C15,
            now_ms,
            transactions: Vec::with_capacity(SEED_COUNT),
            stream_seq: 0,
        };

        let spacing = 30 * DAY_MS / SEED_COUNT as i64;
        for i in 0..SEED_COUNT {
            let ts = now_ms - 30 * DAY_MS + spacing * i as i64;
            let tx = store.make_transaction(ts);
            store.transactions.push(tx);
        }

        Self {
            started: Instant::now(),
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn unlocked(&self, idx: usize) -> bool {
        self.started.elapsed() >= UNLOCK_AFTER[idx]
    }

    pub fn status(&self) -> UnlockStatus {
        UnlockStatus {
            transactions_unlocked: self.unlocked(0),
            categories_unlocked: self.unlocked(1),
            timeseries_unlocked: self.unlocked(2),
            search_unlocked: self.unlocked(3),
        }
    }

    /// Appends one synthetic transaction per `STREAM_EVERY` elapsed and
    /// returns the first entry newer than `after`.
    pub fn stream_latest(&self, after: &str) -> StreamLatestResponse {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        let due = (self.started.elapsed().as_secs() / STREAM_EVERY.as_secs()) + 1;
        while store.stream_seq < due {
            store.stream_seq += 1;
            let ts = store.now_ms + self.started.elapsed().as_millis() as i64;
            let tx = store.make_transaction(ts);
            store.transactions.push(tx);
        }

        let after_seq = parse_stream_seq(after);
        if after_seq >= store.stream_seq {
            return StreamLatestResponse {
                stream_id: Some(after.to_string()),
                transaction: None,
                error: None,
            };
        }

        let next_seq = after_seq + 1;
        let idx = store.transactions.len() - (store.stream_seq - next_seq) as usize - 1;
        let tx = &store.transactions[idx];
        StreamLatestResponse {
            stream_id: Some(format!("{}-{}", store.now_ms, next_seq)),
            transaction: Some(json!({
                "transactionId": tx.id,
                "merchant": tx.merchant,
                "amount": format!("{:.2}", tx.amount),
                "category": tx.category,
            })),
            error: None,
        }
    }

    pub fn recent_transactions(&self, limit: u32) -> RecentTransactionsResponse {
        let store = self.store.lock().expect("dev store lock poisoned");
        let transactions = store
            .transactions
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect();
        RecentTransactionsResponse {
            transactions: Some(transactions),
            lrange_ms: Some(0.12),
            mget_ms: Some(0.31),
            error: None,
        }
    }

    pub fn transaction(&self, id: &str) -> Option<TransactionDetailResponse> {
        let store = self.store.lock().expect("dev store lock poisoned");
        store
            .transactions
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
            .map(|transaction| TransactionDetailResponse {
                transaction,
                redis_ms: Some(0.08),
            })
    }

    pub fn top_categories(&self, limit: u32) -> TopCategoriesResponse {
        let store = self.store.lock().expect("dev store lock poisoned");
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for tx in &store.transactions {
            *totals.entry(tx.category.as_str()).or_default() += tx.amount;
        }
        let mut categories: Vec<CategorySummary> = totals
            .into_iter()
            .map(|(category, total_spent)| CategorySummary {
                category: category.to_string(),
                total_spent,
            })
            .collect();
        categories.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
        categories.truncate(limit as usize);
        TopCategoriesResponse {
            categories: Some(categories),
            redis_ms: Some(0.15),
            error: None,
        }
    }

    pub fn top_merchants(&self, category: &str, limit: u32) -> TopMerchantsResponse {
        let store = self.store.lock().expect("dev store lock poisoned");
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for tx in store.transactions.iter().filter(|tx| tx.category == category) {
            *totals.entry(tx.merchant.as_str()).or_default() += tx.amount;
        }
        let mut merchants: Vec<MerchantSummary> = totals
            .into_iter()
            .map(|(merchant, amount)| MerchantSummary {
                merchant: merchant.to_string(),
                amount,
            })
            .collect();
        merchants.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        merchants.truncate(limit as usize);
        TopMerchantsResponse {
            merchants: Some(merchants),
            category: Some(category.to_string()),
            redis_ms: Some(0.11),
            error: None,
        }
    }

    pub fn spending_range(&self, days: u32) -> SpendingRangeResponse {
        let store = self.store.lock().expect("dev store lock poisoned");
        let Some(end) = store.transactions.last().map(|tx| tx.timestamp_ms) else {
            return SpendingRangeResponse {
                data: Some(vec![]),
                count: Some(0),
                total_spent: Some(0.0),
                redis_ms: Some(0.0),
                error: None,
            };
        };
        let start = end - days as i64 * DAY_MS;
        let data: Vec<TimeSeriesPoint> = store
            .transactions
            .iter()
            .filter(|tx| tx.timestamp_ms >= start && tx.timestamp_ms <= end)
            .map(|tx| TimeSeriesPoint {
                timestamp_ms: tx.timestamp_ms,
                amount: tx.amount,
            })
            .collect();
        SpendingRangeResponse {
            count: Some(data.len() as u64),
            total_spent: Some(data.iter().map(|p| p.amount).sum()),
            data: Some(data),
            redis_ms: Some(0.22),
            error: None,
        }
    }

    /// Word-overlap scoring; good enough to exercise the search view.
    pub fn search(&self, query: &str, limit: u32) -> SearchResponse {
        if !self.unlocked(3) {
            return SearchResponse {
                results: Some(vec![]),
                count: Some(0),
                search_ms: None,
                error: Some(
                    "Search index not ready. Complete the Vector Search module first.".to_string(),
                ),
            };
        }

        let words: Vec<String> = query
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();
        let store = self.store.lock().expect("dev store lock poisoned");
        let mut results: Vec<SearchResult> = store
            .transactions
            .iter()
            .filter_map(|tx| {
                let haystack =
                    format!("{} {} {}", tx.merchant, tx.category, tx.location).to_lowercase();
                let hits = words.iter().filter(|w| haystack.contains(w.as_str())).count();
                (hits > 0).then(|| SearchResult {
                    transaction: tx.clone(),
                    score: 1.0 - hits as f64 / words.len() as f64 * 0.9,
                })
            })
            .collect();
        results.sort_by(|a, b| a.score.total_cmp(&b.score));
        results.truncate(limit as usize);
        SearchResponse {
            count: Some(results.len() as u64),
            results: Some(results),
            search_ms: Some(1.4),
            error: None,
        }
    }
}

fn parse_stream_seq(stream_id: &str) -> u64 {
    stream_id
        .rsplit('-')
        .next()
        .and_then(|seq| seq.parse().ok())
        .filter(|_| stream_id.contains('-'))
        .unwrap_or(0)
}
