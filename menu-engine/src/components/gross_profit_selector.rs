use crate::config::DEFAULT_SUMMARY_SIZE;
use crate::selector::Selector;
use crate::types::PerformanceRecord;

/// Selects the K dishes with the highest gross profit percentage.
pub struct GrossProfitSelector {
    pub k: usize,
}

impl Default for GrossProfitSelector {
    fn default() -> Self {
        Self {
            k: DEFAULT_SUMMARY_SIZE,
        }
    }
}

impl Selector<PerformanceRecord> for GrossProfitSelector {
    fn score(&self, candidate: &PerformanceRecord) -> f64 {
        candidate.gross_profit_percentage
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}
