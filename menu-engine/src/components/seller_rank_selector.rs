use crate::config::DEFAULT_SUMMARY_SIZE;
use crate::selector::Selector;
use crate::types::PerformanceRecord;

/// Selects the K best sellers by units sold.
pub struct TopSellersSelector {
    pub k: usize,
}

impl Default for TopSellersSelector {
    fn default() -> Self {
        Self {
            k: DEFAULT_SUMMARY_SIZE,
        }
    }
}

impl Selector<PerformanceRecord> for TopSellersSelector {
    fn score(&self, candidate: &PerformanceRecord) -> f64 {
        candidate.number_sold as f64
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}

/// Selects the K weakest sellers by units sold, lowest first.
pub struct BottomSellersSelector {
    pub k: usize,
}

impl Default for BottomSellersSelector {
    fn default() -> Self {
        Self {
            k: DEFAULT_SUMMARY_SIZE,
        }
    }
}

impl Selector<PerformanceRecord> for BottomSellersSelector {
    // negated so the descending sort puts the fewest units first
    fn score(&self, candidate: &PerformanceRecord) -> f64 {
        -(candidate.number_sold as f64)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}
