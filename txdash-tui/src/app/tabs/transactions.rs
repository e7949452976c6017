use crate::api::{Loaded, RecentTransactions};
use crate::app::dispatch::{FetchRequest, Ticket};
use crate::app::render::Region;
use crate::app::toast::{Timing, Toast};
use crate::types::Transaction;

use super::{log_load_failure, Effects, TabController};

#[derive(Debug, Default)]
pub struct TransactionsTab {
    pub transactions: Vec<Transaction>,
    pub focused: usize,
}

impl TransactionsTab {
    pub fn load(&mut self, fx: &mut Effects, ticket: Ticket) {
        let request = FetchRequest::RecentTransactions {
            limit: fx.limits.recent_transactions,
        };
        fx.dispatcher.issue(request, ticket);
        fx.renders.mark(Region::TransactionsList);
    }

    pub fn focus_next(&mut self, fx: &mut Effects) {
        if self.focused + 1 < self.transactions.len() {
            self.focused += 1;
            fx.renders.mark(Region::TransactionsList);
        }
    }

    pub fn focus_previous(&mut self, fx: &mut Effects) {
        if self.focused > 0 {
            self.focused -= 1;
            fx.renders.mark(Region::TransactionsList);
        }
    }

    pub fn focused_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.focused)
    }

    pub fn apply(&mut self, result: Loaded<RecentTransactions>, fx: &mut Effects) {
        fx.renders.mark(Region::TransactionsList);
        match result {
            Ok(loaded) => {
                let recent = loaded.body;
                fx.toaster.show(Toast::new(
                    format!("Loaded {} transactions", recent.transactions.len()),
                    vec![
                        Timing::new("LRANGE", recent.lrange_ms),
                        Timing::new("JSON.MGET", recent.mget_ms),
                    ],
                    loaded.roundtrip_ms,
                ));
                self.transactions = recent.transactions;
                self.focused = self.focused.min(self.transactions.len().saturating_sub(1));
            }
            Err(e) => {
                log_load_failure("recent transactions", &e);
                self.transactions.clear();
                self.focused = 0;
            }
        }
    }
}

impl TabController for TransactionsTab {
    fn region(&self) -> Region {
        Region::TransactionsList
    }

    fn mount(&mut self, fx: &mut Effects, ticket: Ticket) {
        self.load(fx, ticket);
    }

    fn clear_selection(&mut self) {
        self.focused = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LoadError, Timed};
    use crate::app::dispatch::request_channel;
    use crate::config::TxdashConfig;
    use crate::types::Tab;

    fn tx(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            customer_id: "cust_001".into(),
            merchant: "Target".into(),
            category: "shopping".into(),
            amount: 10.0,
            timestamp_ms: 0,
            location: "Austin, TX".into(),
            card_last4: None,
            notes: None,
        }
    }

    #[test]
    fn load_toast_lists_both_timings() {
        let (req_tx, mut req_rx) = request_channel();
        let mut fx = Effects::new(&TxdashConfig::default(), req_tx);
        let mut tab = TransactionsTab::default();
        let ticket = Ticket {
            tab: Tab::Transactions,
            activation: 1,
        };

        tab.mount(&mut fx, ticket);
        assert_eq!(
            req_rx.try_recv().ok(),
            Some(FetchRequest::RecentTransactions { limit: 20 })
        );

        tab.apply(
            Ok(Timed {
                body: RecentTransactions {
                    transactions: vec![tx("a"), tx("b")],
                    lrange_ms: 0.1,
                    mget_ms: 0.2,
                },
                roundtrip_ms: 4,
            }),
            &mut fx,
        );

        assert_eq!(tab.transactions.len(), 2);
        assert_eq!(
            fx.toaster.current().map(|t| t.text()),
            Some("Loaded 2 transactions | LRANGE: 0.1ms | JSON.MGET: 0.2ms | Roundtrip: 4ms".into())
        );
        assert_eq!(fx.renders.full_renders(), 0);
    }

    #[test]
    fn failed_load_clears_list() {
        let (req_tx, _req_rx) = request_channel();
        let mut fx = Effects::new(&TxdashConfig::default(), req_tx);
        let mut tab = TransactionsTab {
            transactions: vec![tx("a"), tx("b")],
            focused: 1,
        };

        tab.apply(Err(LoadError::Transport(anyhow::anyhow!("timeout"))), &mut fx);

        assert!(tab.transactions.is_empty());
        assert_eq!(tab.focused, 0);
        assert!(fx.toaster.current().is_none());
    }

    #[test]
    fn focus_stays_in_bounds() {
        let (req_tx, _req_rx) = request_channel();
        let mut fx = Effects::new(&TxdashConfig::default(), req_tx);
        let mut tab = TransactionsTab {
            transactions: vec![tx("a"), tx("b")],
            focused: 0,
        };

        tab.focus_previous(&mut fx);
        tab.focus_next(&mut fx);
        tab.focus_next(&mut fx);
        assert_eq!(tab.focused_transaction().map(|t| t.id.as_str()), Some("b"));
    }
}
