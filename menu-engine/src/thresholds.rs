//! Dynamic classification thresholds.
//!
//! Cutoffs are derived from the menu's own averages on every run, so a dish
//! is judged against its neighbours rather than against a fixed constant.
//!
//! - Profit: a dish is high-profit when its margin is at or above the average
//!   margin of every (deduplicated) dish. Missing margins count as 0.
//! - Popularity: a dish is popular when it reaches at least
//!   `popularity_threshold_factor` (0.8) of the average popularity of the
//!   dishes that actually sold something in the range.

use serde::Serialize;

use crate::classifier::{sanitize_costs, sanitize_popularity};
use crate::config::EngineConfig;
use crate::types::{AggregatedDish, ClassificationThresholds};

/// Average margin reported for a menu with no dishes.
pub const DEFAULT_FALLBACK_PROFIT_MARGIN: f64 = 70.0;

/// Average popularity reported when no dish has sales in range.
pub const DEFAULT_FALLBACK_POPULARITY: f64 = 8.3;

/// Popularity threshold as a share of the average popularity among sellers.
pub const DEFAULT_POPULARITY_THRESHOLD_FACTOR: f64 = 0.8;

/// Menu-wide averages plus the thresholds derived from them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuStatistics {
    pub average_profit_margin: f64,
    pub average_popularity: f64,
    pub dishes_with_sales: usize,
    pub thresholds: ClassificationThresholds,
}

/// Mean of the given margins, with `None` counted as 0.
/// Returns `fallback` when there are no margins at all.
pub fn average_profit_margin<I>(margins: I, fallback: f64) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (total, count) = margins
        .into_iter()
        .fold((0.0, 0usize), |(total, count), m| (total + m.unwrap_or(0.0), count + 1));
    if count == 0 {
        fallback
    } else {
        total / count as f64
    }
}

/// Mean popularity over the popularities of dishes with sales.
/// Returns `fallback` when nothing sold.
pub fn average_popularity<I>(popularities: I, fallback: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (total, count) = popularities
        .into_iter()
        .fold((0.0, 0usize), |(total, count), p| (total + p, count + 1));
    if count == 0 {
        fallback
    } else {
        total / count as f64
    }
}

pub fn derive_thresholds(
    average_profit_margin: f64,
    average_popularity: f64,
    popularity_factor: f64,
) -> ClassificationThresholds {
    ClassificationThresholds {
        profit_threshold: average_profit_margin,
        popularity_threshold: average_popularity * popularity_factor,
    }
}

/// Compute averages and thresholds for a deduplicated, aggregated menu.
///
/// Margins and popularities are read after the same clamping the classifier
/// applies, so every dish is compared against averages of the values it is
/// judged on.
pub fn compute_menu_statistics(dishes: &[AggregatedDish], config: &EngineConfig) -> MenuStatistics {
    let average_profit_margin = average_profit_margin(
        dishes
            .iter()
            .map(|d| sanitize_costs(&d.dish, config).profit_margin),
        config.fallback_profit_margin,
    );

    let sellers: Vec<&AggregatedDish> = dishes.iter().filter(|d| d.has_sales()).collect();
    let average_popularity = average_popularity(
        sellers
            .iter()
            .map(|d| sanitize_popularity(d.sales.popularity_percentage).0),
        config.fallback_popularity,
    );

    let thresholds = derive_thresholds(
        average_profit_margin,
        average_popularity,
        config.popularity_threshold_factor,
    );

    log::debug!(
        "thresholds: avg margin {:.2}% -> profit >= {:.2}%, avg popularity {:.2}% over {} sellers -> popularity >= {:.2}%",
        average_profit_margin,
        thresholds.profit_threshold,
        average_popularity,
        sellers.len(),
        thresholds.popularity_threshold
    );

    MenuStatistics {
        average_profit_margin,
        average_popularity,
        dishes_with_sales: sellers.len(),
        thresholds,
    }
}
