use crate::api::{Loaded, SpendingRange};
use crate::app::dispatch::{FetchRequest, Ticket};
use crate::app::render::Region;
use crate::app::toast::{Timing, Toast};
use crate::time_utils::format_date;
use crate::types::{SpendingSummary, TimeSeriesPoint, TimeWindow};

use super::{log_load_failure, Effects, TabController};

/// Plot-ready copy of a spending range. Rebuilt whole on every load.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
}

impl ChartData {
    pub fn build(points: &[TimeSeriesPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut sorted: Vec<&TimeSeriesPoint> = points.iter().collect();
        sorted.sort_by_key(|p| p.timestamp_ms);

        let first = sorted[0].timestamp_ms;
        let last = sorted[sorted.len() - 1].timestamp_ms;
        // A single point still needs a non-empty x range.
        let x_max = if last > first { last } else { first + 1 };
        let y_max = sorted.iter().map(|p| p.amount).fold(0.0_f64, f64::max);
        let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

        Some(Self {
            points: sorted
                .iter()
                .map(|p| (p.timestamp_ms as f64, p.amount))
                .collect(),
            x_bounds: [first as f64, x_max as f64],
            y_bounds: [0.0, y_top],
            x_labels: vec![
                format_date(first),
                format_date(first + (last - first) / 2),
                format_date(last),
            ],
        })
    }
}

#[derive(Debug, Default)]
pub struct TimeSeriesTab {
    pub current_window: TimeWindow,
    pub summary: Option<SpendingSummary>,
    pub chart: Option<ChartData>,
}

impl TimeSeriesTab {
    pub fn load(&mut self, fx: &mut Effects, ticket: Ticket) {
        let request = FetchRequest::SpendingRange {
            days: self.current_window.days(),
        };
        fx.dispatcher.issue(request, ticket);
        fx.renders.mark(Region::SpendingChart);
    }

    /// Returns true if the window actually changed. The previous window's
    /// chart and summary are dropped.
    pub fn set_window(&mut self, window: TimeWindow) -> bool {
        if window == self.current_window {
            return false;
        }
        self.current_window = window;
        self.chart = None;
        self.summary = None;
        true
    }

    pub fn apply(&mut self, result: Loaded<SpendingRange>, fx: &mut Effects) {
        fx.renders.mark(Region::SpendingChart);
        self.chart = None;
        match result {
            Ok(loaded) => {
                let range = loaded.body;
                fx.toaster.show(Toast::new(
                    format!("Loaded {} data points", range.points.len()),
                    vec![Timing::new("TS.RANGE", range.redis_ms)],
                    loaded.roundtrip_ms,
                ));
                self.chart = ChartData::build(&range.points);
                self.summary = Some(range.summary);
            }
            Err(e) => {
                log_load_failure("spending range", &e);
                self.summary = None;
            }
        }
    }
}

impl TabController for TimeSeriesTab {
    fn region(&self) -> Region {
        Region::SpendingChart
    }

    fn mount(&mut self, fx: &mut Effects, ticket: Ticket) {
        self.load(fx, ticket);
    }

    // The window is a view setting, not a selection.
    fn clear_selection(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LoadError, Timed};
    use crate::app::dispatch::request_channel;
    use crate::config::TxdashConfig;
    use crate::types::Tab;

    fn point(timestamp_ms: i64, amount: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            timestamp_ms,
            amount,
        }
    }

    #[test]
    fn chart_is_sorted_and_bounded() {
        let chart = ChartData::build(&[point(3_000, 5.0), point(1_000, 20.0), point(2_000, 0.0)])
            .expect("chart");

        assert_eq!(chart.points, vec![(1000.0, 20.0), (2000.0, 0.0), (3000.0, 5.0)]);
        assert_eq!(chart.x_bounds, [1000.0, 3000.0]);
        assert!((chart.y_bounds[1] - 22.0).abs() < 1e-9);
        assert_eq!(chart.x_labels.len(), 3);
        assert_eq!(ChartData::build(&[]), None);
    }

    #[test]
    fn single_point_gets_a_usable_range() {
        let chart = ChartData::build(&[point(5_000, 0.0)]).expect("chart");
        assert_eq!(chart.x_bounds, [5000.0, 5001.0]);
        assert_eq!(chart.y_bounds, [0.0, 1.0]);
    }

    #[test]
    fn load_uses_current_window_and_rebuilds_chart() {
        let (req_tx, mut req_rx) = request_channel();
        let mut fx = Effects::new(&TxdashConfig::default(), req_tx);
        let mut tab = TimeSeriesTab::default();
        let ticket = Ticket {
            tab: Tab::TimeSeries,
            activation: 3,
        };

        assert!(tab.set_window(TimeWindow::ThirtyDays));
        assert!(!tab.set_window(TimeWindow::ThirtyDays));
        tab.mount(&mut fx, ticket);
        assert_eq!(
            req_rx.try_recv().ok(),
            Some(FetchRequest::SpendingRange { days: 30 })
        );

        tab.apply(
            Ok(Timed {
                body: SpendingRange {
                    points: vec![point(1_000, 10.0), point(2_000, 30.0)],
                    summary: SpendingSummary {
                        total_spent: 40.0,
                        count: 2,
                    },
                    redis_ms: 0.5,
                },
                roundtrip_ms: 8,
            }),
            &mut fx,
        );
        assert_eq!(tab.chart.as_ref().map(|c| c.points.len()), Some(2));
        assert_eq!(
            fx.toaster.current().map(|t| t.text()),
            Some("Loaded 2 data points | TS.RANGE: 0.5ms | Roundtrip: 8ms".into())
        );

        tab.apply(
            Err(LoadError::Missing {
                field: "data",
                roundtrip_ms: 1,
            }),
            &mut fx,
        );
        assert_eq!(tab.chart, None);
        assert_eq!(tab.summary, None);
    }
}
