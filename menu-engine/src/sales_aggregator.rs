//! Sales aggregation over a dish's daily time series.
//!
//! Units sold are additive and get summed over the window. Popularity is a
//! rate, so the window reports the mean of the daily percentages.

use crate::types::{AggregatedDish, DateRange, DishRecord, SalesAggregate, SalesEntry};

/// Aggregate one dish's sales entries for a resolved range.
///
/// A dish without a sales list aggregates to `{0, 0}` whatever the range.
pub fn aggregate_sales(entries: Option<&[SalesEntry]>, range: &DateRange) -> SalesAggregate {
    let Some(entries) = entries else {
        return SalesAggregate::default();
    };

    match range {
        DateRange::LatestSnapshot => latest_entry(entries)
            .map(|entry| SalesAggregate {
                number_sold: entry.number_sold,
                popularity_percentage: entry.popularity_percentage,
            })
            .unwrap_or_default(),
        DateRange::Window { .. } => {
            let in_range: Vec<&SalesEntry> =
                entries.iter().filter(|e| range.contains(e.date)).collect();

            let number_sold = in_range.iter().map(|e| e.number_sold).sum();
            let total_popularity: f64 = in_range.iter().map(|e| e.popularity_percentage).sum();

            SalesAggregate {
                number_sold,
                popularity_percentage: total_popularity / in_range.len().max(1) as f64,
            }
        }
    }
}

/// Attach a sales aggregate to every dish, preserving input order.
pub fn aggregate_menu(dishes: Vec<DishRecord>, range: &DateRange) -> Vec<AggregatedDish> {
    dishes
        .into_iter()
        .map(|dish| {
            let sales = aggregate_sales(dish.sales_entries.as_deref(), range);
            AggregatedDish { dish, sales }
        })
        .collect()
}

/// Most recent entry by date. On a date tie the first-listed entry wins.
fn latest_entry(entries: &[SalesEntry]) -> Option<&SalesEntry> {
    entries
        .iter()
        .reduce(|best, entry| if entry.date > best.date { entry } else { best })
}
