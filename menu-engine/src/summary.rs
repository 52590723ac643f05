//! Ranked summary of a classified menu.
//!
//! Sellers (dishes with at least one unit sold) feed the top/bottom lists and
//! the hidden-gem promotion list. Quadrant counts cover every dish, sold or
//! not, since quadrant membership is not gated on sales.

use crate::components::gross_profit_selector::GrossProfitSelector;
use crate::components::hidden_gem_filter::HiddenGemFilter;
use crate::components::sales_presence_filter::SalesPresenceFilter;
use crate::components::seller_rank_selector::{BottomSellersSelector, TopSellersSelector};
use crate::filter::{Filter, FilterResult};
use crate::selector::Selector;
use crate::types::{CategoryCounts, MenuSummary, PerformanceRecord};

/// Build the summary, with `size` entries at most in each ranked list.
pub fn summarize(records: &[PerformanceRecord], size: usize) -> MenuSummary {
    let sales_filter = SalesPresenceFilter;
    let FilterResult {
        kept: sellers,
        removed: unsold,
    } = sales_filter.filter(records.to_vec());
    log::debug!(
        "{}: {} sellers, {} without sales",
        sales_filter.name(),
        sellers.len(),
        unsold.len()
    );

    let top_sellers = TopSellersSelector { k: size }.select(sellers.clone());
    let bottom_sellers = BottomSellersSelector { k: size }.select(sellers.clone());

    let gem_filter = HiddenGemFilter;
    let gems = gem_filter.filter(sellers).kept;
    log::debug!("{}: {} candidates", gem_filter.name(), gems.len());
    let hidden_gems = GrossProfitSelector { k: size }.select(gems);

    MenuSummary {
        top_sellers,
        bottom_sellers,
        hidden_gems,
        category_counts: CategoryCounts::from_records(records),
        no_sales: unsold.into_iter().map(|r| r.name).collect(),
    }
}
