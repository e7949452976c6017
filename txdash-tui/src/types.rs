use serde::{Deserialize, Deserializer, Serialize};

/// Unlock flags reported by `GET /api/status`. Each one gates a tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnlockStatus {
    #[serde(default)]
    pub transactions_unlocked: bool,
    #[serde(default)]
    pub categories_unlocked: bool,
    #[serde(default)]
    pub timeseries_unlocked: bool,
    #[serde(default)]
    pub search_unlocked: bool,
}

impl UnlockStatus {
    pub fn is_unlocked(&self, tab: Tab) -> bool {
        match tab {
            Tab::Transactions => self.transactions_unlocked,
            Tab::Categories => self.categories_unlocked,
            Tab::TimeSeries => self.timeseries_unlocked,
            Tab::Search => self.search_unlocked,
        }
    }

    /// Tabs whose flag differs between `self` and `other`.
    pub fn changed_tabs(&self, other: &UnlockStatus) -> Vec<Tab> {
        Tab::ALL
            .into_iter()
            .filter(|tab| self.is_unlocked(*tab) != other.is_unlocked(*tab))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Startup,
    Banking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tab {
    Transactions,
    Categories,
    TimeSeries,
    Search,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Transactions,
        Tab::Categories,
        Tab::TimeSeries,
        Tab::Search,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Transactions => "Transactions",
            Tab::Categories => "Spending Categories",
            Tab::TimeSeries => "Track Spending Over Time",
            Tab::Search => "Search",
        }
    }

    /// What the backend still needs before this tab unlocks.
    pub fn locked_hint(self) -> &'static str {
        match self {
            Tab::Transactions => "Complete ordered_transactions.py and store_transaction.py",
            Tab::Categories => "Complete spending_categories.py",
            Tab::TimeSeries => "Complete spending_over_time.py",
            Tab::Search => "Complete vector_search.py",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Transactions => 0,
            Tab::Categories => 1,
            Tab::TimeSeries => 2,
            Tab::Search => 3,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// A banking transaction as stored by the processor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "transactionId")]
    pub id: String,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub category: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(rename = "timestamp", deserialize_with = "lenient_i64")]
    pub timestamp_ms: i64,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategorySummary {
    pub category: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MerchantSummary {
    pub merchant: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TimeSeriesPoint {
    #[serde(rename = "timestamp", deserialize_with = "lenient_i64")]
    pub timestamp_ms: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
}

/// Totals shown under the spending chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpendingSummary {
    pub total_spent: f64,
    pub count: u64,
}

impl SpendingSummary {
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total_spent / self.count as f64)
        }
    }
}

/// A transaction returned by vector search. `score` is a distance: lower is closer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(deserialize_with = "lenient_f64")]
    pub score: f64,
}

impl SearchResult {
    /// Relevance as a whole percentage, 100 meaning an exact match.
    pub fn relevance_percent(&self) -> u8 {
        ((1.0 - self.score) * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    OneDay,
    ThreeDays,
    #[default]
    SevenDays,
    ThirtyDays,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::OneDay,
        TimeWindow::ThreeDays,
        TimeWindow::SevenDays,
        TimeWindow::ThirtyDays,
    ];

    pub fn days(self) -> u32 {
        match self {
            TimeWindow::OneDay => 1,
            TimeWindow::ThreeDays => 3,
            TimeWindow::SevenDays => 7,
            TimeWindow::ThirtyDays => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::OneDay => "1 Day",
            TimeWindow::ThreeDays => "3 Days",
            TimeWindow::SevenDays => "7 Days",
            TimeWindow::ThirtyDays => "30 Days",
        }
    }

    pub fn next(self) -> TimeWindow {
        let idx = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> TimeWindow {
        let idx = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Format an amount the way every view shows money: `$12.30`.
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

// Stream entries are decoded from Redis hashes, so numbers arrive as strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Float(v) => Ok(v),
        NumberOrString::Int(v) => Ok(v as f64),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(v) => Ok(v),
        NumberOrString::Float(v) => Ok(v as i64),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
