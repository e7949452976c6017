use std::collections::BTreeSet;

/// Independently redrawn parts of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    StartupPulse,
    TransactionsList,
    TransactionDetail,
    CategoriesList,
    MerchantsPanel,
    SpendingChart,
    SearchInput,
    SearchResults,
    Toast,
}

/// What the next frame has to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redraw {
    Full,
    Regions(BTreeSet<Region>),
}

/// Records full renders (navigation, tab and lock changes) separately from
/// region updates made by tab controllers.
#[derive(Debug, Default)]
pub struct RenderTracker {
    full_renders: u64,
    full_pending: bool,
    dirty: BTreeSet<Region>,
}

impl RenderTracker {
    pub fn full(&mut self) {
        self.full_renders += 1;
        self.full_pending = true;
    }

    /// Redraw everything without counting a render, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.full_pending = true;
    }

    pub fn mark(&mut self, region: Region) {
        self.dirty.insert(region);
    }

    pub fn full_renders(&self) -> u64 {
        self.full_renders
    }

    pub fn needs_draw(&self) -> bool {
        self.full_pending || !self.dirty.is_empty()
    }

    pub fn take(&mut self) -> Option<Redraw> {
        let regions = std::mem::take(&mut self.dirty);
        if std::mem::take(&mut self.full_pending) {
            Some(Redraw::Full)
        } else if regions.is_empty() {
            None
        } else {
            Some(Redraw::Regions(regions))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_marks_do_not_count_as_full_renders() {
        let mut renders = RenderTracker::default();
        renders.mark(Region::CategoriesList);
        renders.mark(Region::CategoriesList);

        assert_eq!(renders.full_renders(), 0);
        assert_eq!(
            renders.take(),
            Some(Redraw::Regions(BTreeSet::from([Region::CategoriesList])))
        );
        assert_eq!(renders.take(), None);
    }

    #[test]
    fn full_render_subsumes_regions() {
        let mut renders = RenderTracker::default();
        renders.mark(Region::SearchResults);
        renders.full();

        assert_eq!(renders.take(), Some(Redraw::Full));
        assert!(!renders.needs_draw());
        assert_eq!(renders.full_renders(), 1);
    }
}
