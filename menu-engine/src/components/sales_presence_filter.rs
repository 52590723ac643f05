use crate::filter::Filter;
use crate::types::PerformanceRecord;

/// Keeps dishes that sold at least one unit in the range.
///
/// Dishes with zero sales have no sales rank: they are removed here and
/// reported separately as no-sales items.
pub struct SalesPresenceFilter;

impl Filter<PerformanceRecord> for SalesPresenceFilter {
    fn keep(&self, candidate: &PerformanceRecord) -> bool {
        candidate.has_sales()
    }
}
