use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use super::dev_backend::DevBackend;
use super::dto::{
    RecentTransactionsResponse, SearchResponse, SpendingRangeResponse, StreamLatestResponse,
    TopCategoriesResponse, TopMerchantsResponse, TransactionDetailResponse,
};
use super::{
    LoadError, Loaded, RecentTransactions, SearchHits, SpendingRange, StreamLatest, Timed,
    TopCategories, TopMerchants, TransactionDetail,
};
use crate::types::UnlockStatus;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cheap to clone; every fetch task owns its own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid API URL: {}", base_url))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            dev_backend: None,
        })
    }

    pub fn dev() -> Result<Self> {
        let base_url = Url::parse("http://localhost")?;
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            dev_backend: Some(DevBackend::new()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for path {}", path))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<Timed<T>> {
        let started = Instant::now();
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to call {}", call_name))?;

        let response = response
            .error_for_status()
            .with_context(|| format!("{} returned error", call_name))?;

        let body = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", call_name))?;

        Ok(Timed {
            body,
            roundtrip_ms: started.elapsed().as_millis() as u64,
        })
    }

    fn dev_timed<T>(started: Instant, body: T) -> Timed<T> {
        Timed {
            body,
            roundtrip_ms: started.elapsed().as_millis() as u64,
        }
    }

    pub async fn get_status(&self) -> Result<UnlockStatus> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.status());
        }

        let status: Timed<UnlockStatus> = self
            .get_json(self.client.get(self.endpoint("/api/status")?), "GET /api/status")
            .await?;
        Ok(status.body)
    }

    pub async fn stream_latest(&self, after: &str) -> Result<StreamLatest, LoadError> {
        let response = if let Some(dev) = &self.dev_backend {
            dev.stream_latest(after)
        } else {
            let timed: Timed<StreamLatestResponse> = self
                .get_json(
                    self.client
                        .get(self.endpoint("/api/stream/latest")?)
                        .query(&[("after", after)]),
                    "GET /api/stream/latest",
                )
                .await?;
            timed.body
        };
        response.into_loaded(after)
    }

    pub async fn recent_transactions(&self, limit: u32) -> Loaded<RecentTransactions> {
        let started = Instant::now();
        let timed: Timed<RecentTransactionsResponse> = if let Some(dev) = &self.dev_backend {
            Self::dev_timed(started, dev.recent_transactions(limit))
        } else {
            self.get_json(
                self.client
                    .get(self.endpoint("/api/transactions/recent")?)
                    .query(&[("limit", limit)]),
                "GET /api/transactions/recent",
            )
            .await?
        };
        timed.into_loaded()
    }

    pub async fn transaction(&self, id: &str) -> Loaded<TransactionDetail> {
        let started = Instant::now();
        let timed: Timed<TransactionDetailResponse> = if let Some(dev) = &self.dev_backend {
            let body = dev
                .transaction(id)
                .with_context(|| format!("Transaction {} not found", id))?;
            Self::dev_timed(started, body)
        } else {
            self.get_json(
                self.client.get(self.endpoint(&format!(
                    "/api/transactions/{}",
                    urlencoding::encode(id)
                ))?),
                "GET /api/transactions/:id",
            )
            .await?
        };
        Ok(timed.into_loaded())
    }

    pub async fn top_categories(&self, limit: u32) -> Loaded<TopCategories> {
        let started = Instant::now();
        let timed: Timed<TopCategoriesResponse> = if let Some(dev) = &self.dev_backend {
            Self::dev_timed(started, dev.top_categories(limit))
        } else {
            self.get_json(
                self.client
                    .get(self.endpoint("/api/categories/top")?)
                    .query(&[("limit", limit)]),
                "GET /api/categories/top",
            )
            .await?
        };
        timed.into_loaded()
    }

    pub async fn top_merchants(&self, category: &str, limit: u32) -> Loaded<TopMerchants> {
        let started = Instant::now();
        let timed: Timed<TopMerchantsResponse> = if let Some(dev) = &self.dev_backend {
            Self::dev_timed(started, dev.top_merchants(category, limit))
        } else {
            self.get_json(
                self.client
                    .get(self.endpoint(&format!(
                        "/api/categories/{}/top",
                        urlencoding::encode(category)
                    ))?)
                    .query(&[("limit", limit)]),
                "GET /api/categories/:name/top",
            )
            .await?
        };
        timed.into_loaded(category)
    }

    pub async fn spending_range(&self, days: u32) -> Loaded<SpendingRange> {
        let started = Instant::now();
        let timed: Timed<SpendingRangeResponse> = if let Some(dev) = &self.dev_backend {
            Self::dev_timed(started, dev.spending_range(days))
        } else {
            self.get_json(
                self.client
                    .get(self.endpoint("/api/spending/range")?)
                    .query(&[("days", days)]),
                "GET /api/spending/range",
            )
            .await?
        };
        timed.into_loaded()
    }

    pub async fn search(&self, query: &str, limit: u32) -> Loaded<SearchHits> {
        let started = Instant::now();
        let timed: Timed<SearchResponse> = if let Some(dev) = &self.dev_backend {
            Self::dev_timed(started, dev.search(query, limit))
        } else {
            self.get_json(
                self.client
                    .get(self.endpoint("/api/search")?)
                    .query(&[("q", query)])
                    .query(&[("limit", limit)]),
                "GET /api/search",
            )
            .await?
        };
        timed.into_loaded()
    }
}
