use serde::Deserialize;
use serde_json::Value;

use super::{
    LoadError, RecentTransactions, SearchHits, SpendingRange, StreamLatest, StreamTransaction,
    Timed, TopCategories, TopMerchants, TransactionDetail,
};
use crate::types::{
    CategorySummary, MerchantSummary, SearchResult, SpendingSummary, TimeSeriesPoint,
    Transaction,
};

#[derive(Debug, Default, Deserialize)]
pub struct RecentTransactionsResponse {
    pub transactions: Option<Vec<Transaction>>,
    pub lrange_ms: Option<f64>,
    pub mget_ms: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionDetailResponse {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub redis_ms: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopCategoriesResponse {
    pub categories: Option<Vec<CategorySummary>>,
    pub redis_ms: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopMerchantsResponse {
    pub merchants: Option<Vec<MerchantSummary>>,
    pub category: Option<String>,
    pub redis_ms: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpendingRangeResponse {
    pub data: Option<Vec<TimeSeriesPoint>>,
    pub count: Option<u64>,
    pub total_spent: Option<f64>,
    pub redis_ms: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    pub results: Option<Vec<SearchResult>>,
    pub count: Option<u64>,
    pub search_ms: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamLatestResponse {
    pub stream_id: Option<String>,
    pub transaction: Option<Value>,
    pub error: Option<String>,
}

fn backend_error(error: Option<String>, roundtrip_ms: u64) -> Result<(), LoadError> {
    match error {
        Some(message) => Err(LoadError::Backend {
            message,
            roundtrip_ms,
        }),
        None => Ok(()),
    }
}

fn required<T>(value: Option<T>, field: &'static str, roundtrip_ms: u64) -> Result<T, LoadError> {
    value.ok_or(LoadError::Missing {
        field,
        roundtrip_ms,
    })
}

fn timed<T>(body: T, roundtrip_ms: u64) -> Timed<T> {
    Timed { body, roundtrip_ms }
}

impl Timed<RecentTransactionsResponse> {
    pub fn into_loaded(self) -> Result<Timed<RecentTransactions>, LoadError> {
        let rt = self.roundtrip_ms;
        backend_error(self.body.error, rt)?;
        let transactions = required(self.body.transactions, "transactions", rt)?;
        Ok(timed(
            RecentTransactions {
                transactions,
                lrange_ms: self.body.lrange_ms.unwrap_or_default(),
                mget_ms: self.body.mget_ms.unwrap_or_default(),
            },
            rt,
        ))
    }
}

impl Timed<TransactionDetailResponse> {
    pub fn into_loaded(self) -> Timed<TransactionDetail> {
        timed(
            TransactionDetail {
                transaction: self.body.transaction,
                redis_ms: self.body.redis_ms.unwrap_or_default(),
            },
            self.roundtrip_ms,
        )
    }
}

impl Timed<TopCategoriesResponse> {
    pub fn into_loaded(self) -> Result<Timed<TopCategories>, LoadError> {
        let rt = self.roundtrip_ms;
        backend_error(self.body.error, rt)?;
        let categories = required(self.body.categories, "categories", rt)?;
        Ok(timed(
            TopCategories {
                categories,
                redis_ms: self.body.redis_ms.unwrap_or_default(),
            },
            rt,
        ))
    }
}

impl Timed<TopMerchantsResponse> {
    pub fn into_loaded(self, requested: &str) -> Result<Timed<TopMerchants>, LoadError> {
        let rt = self.roundtrip_ms;
        backend_error(self.body.error, rt)?;
        let merchants = required(self.body.merchants, "merchants", rt)?;
        Ok(timed(
            TopMerchants {
                category: self.body.category.unwrap_or_else(|| requested.to_string()),
                merchants,
                redis_ms: self.body.redis_ms.unwrap_or_default(),
            },
            rt,
        ))
    }
}

impl Timed<SpendingRangeResponse> {
    pub fn into_loaded(self) -> Result<Timed<SpendingRange>, LoadError> {
        let rt = self.roundtrip_ms;
        backend_error(self.body.error, rt)?;
        let points = required(self.body.data, "data", rt)?;
        let summary = SpendingSummary {
            count: self.body.count.unwrap_or(points.len() as u64),
            total_spent: self
                .body
                .total_spent
                .unwrap_or_else(|| points.iter().map(|p| p.amount).sum()),
        };
        Ok(timed(
            SpendingRange {
                points,
                summary,
                redis_ms: self.body.redis_ms.unwrap_or_default(),
            },
            rt,
        ))
    }
}

impl Timed<SearchResponse> {
    pub fn into_loaded(self) -> Result<Timed<SearchHits>, LoadError> {
        let rt = self.roundtrip_ms;
        backend_error(self.body.error, rt)?;
        let results = required(self.body.results, "results", rt)?;
        Ok(timed(
            SearchHits {
                count: self.body.count.unwrap_or(results.len() as u64),
                results,
                search_ms: self.body.search_ms.unwrap_or_default(),
            },
            rt,
        ))
    }
}

impl StreamLatestResponse {
    /// `after` is the cursor the request was made with; the backend echoes it
    /// back when nothing new has arrived.
    pub fn into_loaded(self, after: &str) -> Result<StreamLatest, LoadError> {
        backend_error(self.error, 0)?;
        let transaction = self
            .transaction
            .filter(|value| value.is_object())
            .map(|value| StreamTransaction {
                merchant: value
                    .get("merchant")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                amount: value.get("amount").and_then(number_like),
            });
        Ok(StreamLatest {
            stream_id: self.stream_id.unwrap_or_else(|| after.to_string()),
            transaction,
        })
    }
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(value: Value) -> Timed<T> {
        Timed {
            body: serde_json::from_value(value).unwrap(),
            roundtrip_ms: 12,
        }
    }

    #[test]
    fn error_field_is_a_soft_failure() {
        let response: Timed<TopCategoriesResponse> =
            parse(json!({"categories": [], "count": 0, "error": "WRONGTYPE"}));

        match response.into_loaded() {
            Err(LoadError::Backend {
                message,
                roundtrip_ms,
            }) => {
                assert_eq!(message, "WRONGTYPE");
                assert_eq!(roundtrip_ms, 12);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_list_is_a_soft_failure() {
        let response: Timed<RecentTransactionsResponse> = parse(json!({"count": 0}));
        let err = response.into_loaded().unwrap_err();

        assert!(err.is_soft());
        assert_eq!(err.to_string(), "response is missing `transactions`");
    }

    #[test]
    fn recent_transactions_keep_both_timings() {
        let response: Timed<RecentTransactionsResponse> = parse(json!({
            "transactions": [{
                "transactionId": "tx_1",
                "customerId": "cust_007",
                "merchant": "Target",
                "category": "shopping",
                "amount": 19.99,
                "timestamp": 1700000000000i64,
                "location": "Austin, TX"
            }],
            "count": 1,
            "redis_ms": 0.9,
            "lrange_ms": 0.3,
            "mget_ms": 0.6
        }));

        let loaded = response.into_loaded().unwrap();
        assert_eq!(loaded.body.transactions.len(), 1);
        assert_eq!(loaded.body.lrange_ms, 0.3);
        assert_eq!(loaded.body.mget_ms, 0.6);
        assert_eq!(loaded.roundtrip_ms, 12);
    }

    #[test]
    fn spending_range_derives_missing_totals() {
        let response: Timed<SpendingRangeResponse> = parse(json!({
            "data": [
                {"timestamp": 1, "amount": 10.0},
                {"timestamp": 2, "amount": 5.5}
            ],
            "redis_ms": 1.2
        }));

        let loaded = response.into_loaded().unwrap();
        assert_eq!(loaded.body.summary.count, 2);
        assert_eq!(loaded.body.summary.total_spent, 15.5);
    }

    #[test]
    fn merchants_fall_back_to_requested_category() {
        let response: Timed<TopMerchantsResponse> =
            parse(json!({"merchants": [{"merchant": "Acme", "amount": 42.10}]}));

        let loaded = response.into_loaded("Groceries").unwrap();
        assert_eq!(loaded.body.category, "Groceries");
        assert_eq!(loaded.body.merchants[0].amount, 42.10);
    }

    #[test]
    fn stream_entry_reads_string_fields() {
        let response: StreamLatestResponse = serde_json::from_value(json!({
            "stream_id": "1700000000000-0",
            "transaction": {"merchant": "Costco", "amount": "88.4", "category": "groceries"}
        }))
        .unwrap();

        let latest = response.into_loaded("0").unwrap();
        assert_eq!(latest.stream_id, "1700000000000-0");
        let tx = latest.transaction.unwrap();
        assert_eq!(tx.merchant.as_deref(), Some("Costco"));
        assert_eq!(tx.amount, Some(88.4));
    }

    #[test]
    fn empty_stream_echoes_cursor() {
        let response: StreamLatestResponse =
            serde_json::from_value(json!({"stream_id": "5-0", "transaction": null})).unwrap();

        let latest = response.into_loaded("5-0").unwrap();
        assert_eq!(latest.stream_id, "5-0");
        assert!(latest.transaction.is_none());
    }
}
