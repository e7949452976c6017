use std::time::{Duration, Instant};

use crate::config::ToastConfig;

/// A named backend timing, e.g. `ZREVRANGE: 0.42ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub label: &'static str,
    pub ms: f64,
}

impl Timing {
    pub fn new(label: &'static str, ms: f64) -> Self {
        Self { label, ms }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub timings: Vec<Timing>,
    pub roundtrip_ms: u64,
    shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, timings: Vec<Timing>, roundtrip_ms: u64) -> Self {
        Self {
            message: message.into(),
            timings,
            roundtrip_ms,
            shown_at: Instant::now(),
        }
    }

    /// `Loaded 5 categories | ZREVRANGE: 0.4ms | Roundtrip: 3ms`
    pub fn text(&self) -> String {
        let mut parts = vec![self.message.clone()];
        parts.extend(self.timings.iter().map(|t| format!("{}: {}ms", t.label, t.ms)));
        parts.push(format!("Roundtrip: {}ms", self.roundtrip_ms));
        parts.join(" | ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
}

/// Holds at most one toast. Showing a new one replaces the old immediately.
#[derive(Debug)]
pub struct Toaster {
    current: Option<Toast>,
    visible_for: Duration,
    removed_after: Duration,
}

impl Toaster {
    pub fn new(config: &ToastConfig) -> Self {
        Self {
            current: None,
            visible_for: config.visible_for(),
            removed_after: config.removed_after(),
        }
    }

    pub fn show(&mut self, toast: Toast) {
        tracing::debug!(toast = %toast.text(), "toast");
        self.current = Some(toast);
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn phase_at(&self, now: Instant) -> Option<ToastPhase> {
        let toast = self.current.as_ref()?;
        let age = now.saturating_duration_since(toast.shown_at);
        if age < self.visible_for {
            Some(ToastPhase::Visible)
        } else if age < self.removed_after {
            Some(ToastPhase::Fading)
        } else {
            None
        }
    }

    /// Drop an expired toast. Returns true if the screen changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.is_some() && self.phase_at(now).is_none() {
            self.current = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toaster() -> Toaster {
        Toaster::new(&ToastConfig::default())
    }

    #[test]
    fn second_toast_replaces_first() {
        let mut toaster = toaster();
        toaster.show(Toast::new("Loaded 20 transactions", vec![], 5));
        toaster.show(Toast::new(
            "Loaded 4 categories",
            vec![Timing::new("ZREVRANGE", 0.4)],
            3,
        ));

        let toast = toaster.current().expect("one toast");
        assert_eq!(toast.message, "Loaded 4 categories");
        assert_eq!(toast.text(), "Loaded 4 categories | ZREVRANGE: 0.4ms | Roundtrip: 3ms");
    }

    #[test]
    fn toast_fades_then_disappears() {
        let mut toaster = toaster();
        toaster.show(Toast::new("Found 3 results", vec![Timing::new("FT.SEARCH", 1.5)], 9));
        let shown = toaster.current().unwrap().shown_at;

        assert_eq!(toaster.phase_at(shown), Some(ToastPhase::Visible));
        assert_eq!(
            toaster.phase_at(shown + Duration::from_millis(4100)),
            Some(ToastPhase::Fading)
        );

        assert!(!toaster.expire(shown + Duration::from_millis(4499)));
        assert!(toaster.expire(shown + Duration::from_millis(4500)));
        assert!(toaster.current().is_none());
    }

    #[test]
    fn two_timings_are_listed_in_order() {
        let toast = Toast::new(
            "Loaded 20 transactions",
            vec![Timing::new("LRANGE", 0.12), Timing::new("JSON.MGET", 0.31)],
            7,
        );
        assert_eq!(
            toast.text(),
            "Loaded 20 transactions | LRANGE: 0.12ms | JSON.MGET: 0.31ms | Roundtrip: 7ms"
        );
    }
}
