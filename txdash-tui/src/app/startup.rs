use crate::api::{LoadError, StreamLatest};

use super::dispatch::FetchRequest;

pub const WAITING_MERCHANT: &str = "Waiting for transactions...";

/// Latest transaction shown on the startup screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pulse {
    pub merchant: String,
    pub amount: String,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            merchant: WAITING_MERCHANT.to_string(),
            amount: "0.00".to_string(),
        }
    }
}

/// Follows the live transaction stream with a cursor that only moves
/// forward: an entry is only ever applied on top of the cursor it was
/// requested after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupFeed {
    cursor: String,
    pulse: Pulse,
}

impl Default for StartupFeed {
    fn default() -> Self {
        Self {
            cursor: "0".to_string(),
            pulse: Pulse::default(),
        }
    }
}

impl StartupFeed {
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    pub fn pulse(&self) -> &Pulse {
        &self.pulse
    }

    pub fn request(&self) -> FetchRequest {
        FetchRequest::StreamLatest {
            after: self.cursor.clone(),
        }
    }

    /// Returns true if the pulse changed.
    pub fn apply(&mut self, after: &str, result: Result<StreamLatest, LoadError>) -> bool {
        let latest = match result {
            Ok(latest) => latest,
            Err(e) => {
                tracing::debug!("stream poll failed: {:#}", e);
                return false;
            }
        };

        if after != self.cursor {
            tracing::debug!(after, cursor = %self.cursor, "dropping stale stream entry");
            return false;
        }
        let Some(transaction) = latest.transaction else {
            return false;
        };

        self.cursor = latest.stream_id;
        self.pulse = Pulse {
            merchant: transaction
                .merchant
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            amount: format!("{:.2}", transaction.amount.unwrap_or(0.0)),
        };
        true
    }
}
