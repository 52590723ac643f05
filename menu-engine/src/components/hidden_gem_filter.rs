use crate::filter::Filter;
use crate::types::{MenuItemClass, PerformanceRecord, PopularityCategory, ProfitCategory};

/// Keeps promotion candidates: high-profit, low-popularity dishes.
///
/// Checks both categories as well as the final class so a record whose
/// class disagrees with its categories is never promoted.
pub struct HiddenGemFilter;

impl Filter<PerformanceRecord> for HiddenGemFilter {
    fn keep(&self, candidate: &PerformanceRecord) -> bool {
        candidate.profit_category == ProfitCategory::High
            && candidate.popularity_category == PopularityCategory::Low
            && candidate.menu_item_class == MenuItemClass::HiddenGem
    }
}
