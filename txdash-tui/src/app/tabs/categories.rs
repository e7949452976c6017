use crate::api::{Loaded, TopCategories, TopMerchants};
use crate::app::dispatch::{FetchRequest, Ticket};
use crate::app::render::Region;
use crate::app::toast::{Timing, Toast};
use crate::types::{CategorySummary, MerchantSummary};

use super::{log_load_failure, Effects, TabController};

/// Top categories with a drill-down into the selected category's merchants.
#[derive(Debug, Default)]
pub struct CategoriesTab {
    pub categories: Vec<CategorySummary>,
    pub focused: usize,
    pub selected: Option<String>,
    pub merchants: Vec<MerchantSummary>,
}

impl CategoriesTab {
    pub fn load(&mut self, fx: &mut Effects, ticket: Ticket) {
        let request = FetchRequest::TopCategories {
            limit: fx.limits.top_categories,
        };
        fx.dispatcher.issue(request, ticket);
        fx.renders.mark(Region::CategoriesList);
    }

    pub fn focus_next(&mut self, fx: &mut Effects) {
        if self.focused + 1 < self.categories.len() {
            self.focused += 1;
            fx.renders.mark(Region::CategoriesList);
        }
    }

    pub fn focus_previous(&mut self, fx: &mut Effects) {
        if self.focused > 0 {
            self.focused -= 1;
            fx.renders.mark(Region::CategoriesList);
        }
    }

    pub fn select_focused(&mut self, fx: &mut Effects, ticket: Ticket) {
        if let Some(category) = self.categories.get(self.focused).map(|c| c.category.clone()) {
            self.select_category(category, fx, ticket);
        }
    }

    /// Select `category` and fetch its top merchants. Results for any
    /// previously selected category are ignored from here on.
    pub fn select_category(&mut self, category: String, fx: &mut Effects, ticket: Ticket) {
        let request = FetchRequest::TopMerchants {
            category: category.clone(),
            limit: fx.limits.top_merchants,
        };
        self.selected = Some(category);
        self.merchants.clear();
        fx.dispatcher.issue(request, ticket);
        fx.renders.mark(Region::CategoriesList);
        fx.renders.mark(Region::MerchantsPanel);
    }

    pub fn apply_categories(&mut self, result: Loaded<TopCategories>, fx: &mut Effects) {
        fx.renders.mark(Region::CategoriesList);
        match result {
            Ok(loaded) => {
                let top = loaded.body;
                fx.toaster.show(Toast::new(
                    format!("Loaded {} categories", top.categories.len()),
                    vec![Timing::new("ZREVRANGE", top.redis_ms)],
                    loaded.roundtrip_ms,
                ));
                self.categories = top.categories;
                self.focused = self.focused.min(self.categories.len().saturating_sub(1));
            }
            Err(e) => {
                log_load_failure("top categories", &e);
                self.categories.clear();
                self.focused = 0;
            }
        }
    }

    pub fn apply_merchants(
        &mut self,
        requested: &str,
        result: Loaded<TopMerchants>,
        fx: &mut Effects,
    ) {
        if self.selected.as_deref() != Some(requested) {
            tracing::debug!(requested, "dropping merchants for a deselected category");
            return;
        }

        fx.renders.mark(Region::MerchantsPanel);
        match result {
            Ok(loaded) => {
                let top = loaded.body;
                fx.toaster.show(Toast::new(
                    format!("Loaded {} merchants for {}", top.merchants.len(), top.category),
                    vec![Timing::new("ZREVRANGE", top.redis_ms)],
                    loaded.roundtrip_ms,
                ));
                self.merchants = top.merchants;
            }
            Err(e) => {
                log_load_failure("top merchants", &e);
                self.merchants.clear();
            }
        }
    }
}

impl TabController for CategoriesTab {
    fn region(&self) -> Region {
        Region::CategoriesList
    }

    fn mount(&mut self, fx: &mut Effects, ticket: Ticket) {
        self.load(fx, ticket);
    }

    fn clear_selection(&mut self) {
        self.focused = 0;
        self.selected = None;
        self.merchants.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LoadError, Timed};
    use crate::app::dispatch::request_channel;
    use crate::app::render::Redraw;
    use crate::config::TxdashConfig;
    use crate::types::{format_amount, Tab};

    fn ticket() -> Ticket {
        Ticket {
            tab: Tab::Categories,
            activation: 1,
        }
    }

    fn merchants(category: &str, rows: &[(&str, f64)]) -> Loaded<TopMerchants> {
        Ok(Timed {
            body: TopMerchants {
                category: category.to_string(),
                merchants: rows
                    .iter()
                    .map(|(merchant, amount)| MerchantSummary {
                        merchant: merchant.to_string(),
                        amount: *amount,
                    })
                    .collect(),
                redis_ms: 0.3,
            },
            roundtrip_ms: 6,
        })
    }

    #[test]
    fn selecting_category_fetches_its_merchants() {
        let (req_tx, mut req_rx) = request_channel();
        let mut fx = Effects::new(&TxdashConfig::default(), req_tx);
        let mut tab = CategoriesTab::default();

        tab.select_category("Groceries".into(), &mut fx, ticket());
        assert_eq!(
            req_rx.try_recv().ok(),
            Some(FetchRequest::TopMerchants {
                category: "Groceries".into(),
                limit: 10
            })
        );

        tab.apply_merchants("Groceries", merchants("Groceries", &[("Acme", 42.10)]), &mut fx);

        assert_eq!(tab.merchants.len(), 1);
        assert_eq!(tab.merchants[0].merchant, "Acme");
        assert_eq!(format_amount(tab.merchants[0].amount), "$42.10");
        assert!(matches!(
            fx.renders.take(),
            Some(Redraw::Regions(regions)) if regions.contains(&Region::MerchantsPanel)
        ));
        assert_eq!(fx.renders.full_renders(), 0);
    }

    #[test]
    fn merchants_for_superseded_category_are_dropped() {
        let (req_tx, _req_rx) = request_channel();
        let mut fx = Effects::new(&TxdashConfig::default(), req_tx);
        let mut tab = CategoriesTab::default();

        tab.select_category("dining".into(), &mut fx, ticket());
        tab.select_category("travel".into(), &mut fx, ticket());
        tab.apply_merchants("dining", merchants("dining", &[("Chipotle", 12.0)]), &mut fx);

        assert!(tab.merchants.is_empty());
        assert_eq!(tab.selected.as_deref(), Some("travel"));
    }

    #[test]
    fn categories_load_and_failure() {
        let (req_tx, _req_rx) = request_channel();
        let mut fx = Effects::new(&TxdashConfig::default(), req_tx);
        let mut tab = CategoriesTab::default();

        tab.apply_categories(
            Ok(Timed {
                body: TopCategories {
                    categories: vec![CategorySummary {
                        category: "dining".into(),
                        total_spent: 120.5,
                    }],
                    redis_ms: 0.2,
                },
                roundtrip_ms: 3,
            }),
            &mut fx,
        );
        assert_eq!(tab.categories.len(), 1);
        assert_eq!(
            fx.toaster.current().map(|t| t.text()),
            Some("Loaded 1 categories | ZREVRANGE: 0.2ms | Roundtrip: 3ms".into())
        );

        tab.apply_categories(
            Err(LoadError::Backend {
                message: "index missing".into(),
                roundtrip_ms: 2,
            }),
            &mut fx,
        );
        assert!(tab.categories.is_empty());
    }

    #[test]
    fn clear_selection_resets_drill_down() {
        let (req_tx, _req_rx) = request_channel();
        let mut fx = Effects::new(&TxdashConfig::default(), req_tx);
        let mut tab = CategoriesTab::default();

        tab.select_category("bills".into(), &mut fx, ticket());
        tab.clear_selection();

        assert_eq!(tab.selected, None);
        assert!(tab.merchants.is_empty());
    }
}
