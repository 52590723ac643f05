//! Menu-engineering classification.
//!
//! Places each dish in one of four quadrants by comparing its margin and
//! popularity against the menu's dynamic thresholds:
//!
//! | Profit | Popularity | Class          |
//! |--------|------------|----------------|
//! | High   | High       | Chef's Kiss    |
//! | High   | Low        | Hidden Gem     |
//! | Low    | High       | Bargain Bucket |
//! | Low    | Low        | Burnt Toast    |
//!
//! Both comparisons are inclusive, so a dish sitting exactly on a threshold
//! is High. Financials are derived from the selling price (ex GST) and
//! margin:
//! - Food cost: price x (1 - margin / 100)
//! - Contribution margin: price - food cost
//! - Gross profit: the contribution margin, already exclusive of GST
//!
//! Malformed cost data is clamped, never rejected, and the record carries a
//! [`DataIntegrityWarning`] for each adjustment.

use crate::config::EngineConfig;
use crate::error::DataIntegrityWarning;
use crate::types::{
    AggregatedDish, ClassificationThresholds, DishRecord, MenuItemClass, PerformanceRecord,
    PopularityCategory, ProfitCategory,
};

/// Popularity is a percentage share of sales.
const MIN_POPULARITY: f64 = 0.0;
const MAX_POPULARITY: f64 = 100.0;

/// Cost fields after clamping, with the warnings clamping produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SanitizedCosts {
    pub selling_price: f64,
    pub profit_margin: Option<f64>,
    pub warnings: Vec<DataIntegrityWarning>,
}

/// Per-unit cost-of-goods breakdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostBreakdown {
    pub food_cost: f64,
    pub contribution_margin: f64,
    pub gross_profit: f64,
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub fn profit_category(profit_margin: Option<f64>, threshold: f64) -> ProfitCategory {
    if profit_margin.unwrap_or(0.0) >= threshold {
        ProfitCategory::High
    } else {
        ProfitCategory::Low
    }
}

pub fn popularity_category(popularity_percentage: f64, threshold: f64) -> PopularityCategory {
    if popularity_percentage >= threshold {
        PopularityCategory::High
    } else {
        PopularityCategory::Low
    }
}

pub fn cost_breakdown(selling_price: f64, profit_margin: Option<f64>) -> CostBreakdown {
    let margin = profit_margin.unwrap_or(0.0);
    let food_cost = selling_price * (1.0 - margin / 100.0);
    let contribution_margin = selling_price - food_cost;
    CostBreakdown {
        food_cost,
        contribution_margin,
        gross_profit: contribution_margin,
    }
}

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

/// Clamp a dish's price and margin into their valid ranges.
pub fn sanitize_costs(dish: &DishRecord, config: &EngineConfig) -> SanitizedCosts {
    let mut warnings = Vec::new();

    let selling_price = if !dish.selling_price.is_finite() {
        warnings.push(DataIntegrityWarning::NonFiniteSellingPrice);
        0.0
    } else if dish.selling_price < 0.0 {
        warnings.push(DataIntegrityWarning::NegativeSellingPrice {
            original: dish.selling_price,
        });
        0.0
    } else {
        dish.selling_price
    };

    let profit_margin = match dish.profit_margin {
        None => None,
        Some(m) if !m.is_finite() => {
            warnings.push(DataIntegrityWarning::NonFiniteProfitMargin);
            None
        }
        Some(m) => {
            let clamped = m.clamp(config.min_profit_margin, config.max_profit_margin);
            if clamped != m {
                warnings.push(DataIntegrityWarning::ProfitMarginOutOfRange {
                    original: m,
                    clamped,
                });
            }
            Some(clamped)
        }
    };

    SanitizedCosts {
        selling_price,
        profit_margin,
        warnings,
    }
}

/// Clamp an aggregate popularity into 0–100. Non-finite values become 0.
pub fn sanitize_popularity(popularity: f64) -> (f64, Option<DataIntegrityWarning>) {
    if !popularity.is_finite() {
        return (
            MIN_POPULARITY,
            Some(DataIntegrityWarning::PopularityOutOfRange {
                original: popularity,
                clamped: MIN_POPULARITY,
            }),
        );
    }
    let clamped = popularity.clamp(MIN_POPULARITY, MAX_POPULARITY);
    if clamped != popularity {
        (
            clamped,
            Some(DataIntegrityWarning::PopularityOutOfRange {
                original: popularity,
                clamped,
            }),
        )
    } else {
        (popularity, None)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify one dish against the menu thresholds.
///
/// Dishes with no sales are classified like any other: they are signal, not
/// noise.
pub fn classify_dish(
    item: &AggregatedDish,
    thresholds: &ClassificationThresholds,
    config: &EngineConfig,
) -> PerformanceRecord {
    let dish = &item.dish;
    let SanitizedCosts {
        selling_price,
        profit_margin,
        mut warnings,
    } = sanitize_costs(dish, config);

    let (popularity_percentage, popularity_warning) =
        sanitize_popularity(item.sales.popularity_percentage);
    warnings.extend(popularity_warning);

    for warning in &warnings {
        log::warn!("dish '{}' ({}): {}", dish.name, dish.id, warning);
    }

    let profit_category = profit_category(profit_margin, thresholds.profit_threshold);
    let popularity_category =
        popularity_category(popularity_percentage, thresholds.popularity_threshold);
    let costs = cost_breakdown(selling_price, profit_margin);

    PerformanceRecord {
        id: dish.id.clone(),
        name: dish.name.clone(),
        selling_price,
        profit_margin,
        updated_at: dish.updated_at,
        number_sold: item.sales.number_sold,
        popularity_percentage,
        profit_category,
        popularity_category,
        menu_item_class: MenuItemClass::from_categories(profit_category, popularity_category),
        gross_profit_percentage: profit_margin.unwrap_or(0.0),
        food_cost: costs.food_cost,
        contribution_margin: costs.contribution_margin,
        gross_profit: costs.gross_profit,
        warnings,
    }
}

/// Classify every dish, preserving input order.
pub fn classify_menu(
    items: &[AggregatedDish],
    thresholds: &ClassificationThresholds,
    config: &EngineConfig,
) -> Vec<PerformanceRecord> {
    items
        .iter()
        .map(|item| classify_dish(item, thresholds, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SalesAggregate;

    fn thresholds(profit: f64, popularity: f64) -> ClassificationThresholds {
        ClassificationThresholds {
            profit_threshold: profit,
            popularity_threshold: popularity,
        }
    }

    fn make_item(
        id: &str,
        price: f64,
        margin: Option<f64>,
        sold: u64,
        popularity: f64,
    ) -> AggregatedDish {
        AggregatedDish {
            dish: DishRecord {
                selling_price: price,
                profit_margin: margin,
                ..DishRecord::new(id, id)
            },
            sales: SalesAggregate {
                number_sold: sold,
                popularity_percentage: popularity,
            },
        }
    }

    #[test]
    fn high_margin_high_popularity_is_chefs_kiss() {
        let item = make_item("A", 20.0, Some(80.0), 50, 40.0);
        let record = classify_dish(&item, &thresholds(60.0, 18.0), &EngineConfig::default());
        assert_eq!(record.profit_category, ProfitCategory::High);
        assert_eq!(record.popularity_category, PopularityCategory::High);
        assert_eq!(record.menu_item_class, MenuItemClass::ChefsKiss);
    }

    #[test]
    fn low_margin_low_popularity_is_burnt_toast() {
        let item = make_item("B", 12.0, Some(40.0), 5, 5.0);
        let record = classify_dish(&item, &thresholds(60.0, 18.0), &EngineConfig::default());
        assert_eq!(record.menu_item_class, MenuItemClass::BurntToast);
    }

    #[test]
    fn off_diagonal_quadrants() {
        let config = EngineConfig::default();
        let t = thresholds(60.0, 18.0);

        let gem = classify_dish(&make_item("G", 30.0, Some(75.0), 2, 3.0), &t, &config);
        assert_eq!(gem.menu_item_class, MenuItemClass::HiddenGem);

        let bargain = classify_dish(&make_item("K", 8.0, Some(35.0), 90, 30.0), &t, &config);
        assert_eq!(bargain.menu_item_class, MenuItemClass::BargainBucket);
    }

    #[test]
    fn ties_favour_high() {
        let item = make_item("T", 10.0, Some(60.0), 3, 18.0);
        let record = classify_dish(&item, &thresholds(60.0, 18.0), &EngineConfig::default());
        assert_eq!(record.profit_category, ProfitCategory::High);
        assert_eq!(record.popularity_category, PopularityCategory::High);
    }

    #[test]
    fn null_margin_classifies_as_zero() {
        let item = make_item("N", 10.0, None, 3, 18.0);
        let record = classify_dish(&item, &thresholds(0.0, 18.0), &EngineConfig::default());
        // 0 >= 0 is High
        assert_eq!(record.profit_category, ProfitCategory::High);
        assert_eq!(record.profit_margin, None);
        assert_eq!(record.gross_profit_percentage, 0.0);
        assert!(record.warnings.is_empty());

        let record = classify_dish(&item, &thresholds(10.0, 18.0), &EngineConfig::default());
        assert_eq!(record.profit_category, ProfitCategory::Low);
    }

    #[test]
    fn financials_use_cost_of_goods_arithmetic() {
        // $20 at 70% margin: food cost $6, contribution $14
        let item = make_item("F", 20.0, Some(70.0), 1, 1.0);
        let record = classify_dish(&item, &thresholds(50.0, 1.0), &EngineConfig::default());
        assert!((record.food_cost - 6.0).abs() < 1e-9);
        assert!((record.contribution_margin - 14.0).abs() < 1e-9);
        assert!((record.gross_profit - 14.0).abs() < 1e-9);
        assert!((record.gross_profit_percentage - 70.0).abs() < 1e-9);
    }

    #[test]
    fn missing_margin_means_whole_price_is_food_cost() {
        let costs = cost_breakdown(15.0, None);
        assert!((costs.food_cost - 15.0).abs() < 1e-9);
        assert_eq!(costs.contribution_margin, 0.0);
    }

    #[test]
    fn zero_sales_dish_is_still_classified() {
        let item = make_item("Z", 18.0, Some(90.0), 0, 0.0);
        let record = classify_dish(&item, &thresholds(60.0, 18.0), &EngineConfig::default());
        assert_eq!(record.number_sold, 0);
        assert_eq!(record.menu_item_class, MenuItemClass::HiddenGem);
    }

    #[test]
    fn negative_price_is_clamped_with_warning() {
        let item = make_item("P", -4.0, Some(50.0), 1, 10.0);
        let record = classify_dish(&item, &thresholds(50.0, 5.0), &EngineConfig::default());
        assert_eq!(record.selling_price, 0.0);
        assert_eq!(record.food_cost, 0.0);
        assert_eq!(
            record.warnings,
            vec![DataIntegrityWarning::NegativeSellingPrice { original: -4.0 }]
        );
    }

    #[test]
    fn out_of_range_margin_is_clamped_with_warning() {
        let item = make_item("M", 10.0, Some(250.0), 1, 10.0);
        let record = classify_dish(&item, &thresholds(50.0, 5.0), &EngineConfig::default());
        assert_eq!(record.profit_margin, Some(100.0));
        assert_eq!(record.food_cost, 0.0);
        assert_eq!(
            record.warnings,
            vec![DataIntegrityWarning::ProfitMarginOutOfRange {
                original: 250.0,
                clamped: 100.0,
            }]
        );

        let item = make_item("L", 10.0, Some(-180.0), 1, 10.0);
        let record = classify_dish(&item, &thresholds(50.0, 5.0), &EngineConfig::default());
        assert_eq!(record.profit_margin, Some(-100.0));
        assert_eq!(record.profit_category, ProfitCategory::Low);
    }

    #[test]
    fn nan_margin_is_treated_as_missing() {
        let item = make_item("X", 10.0, Some(f64::NAN), 1, 10.0);
        let record = classify_dish(&item, &thresholds(50.0, 5.0), &EngineConfig::default());
        assert_eq!(record.profit_margin, None);
        assert_eq!(record.warnings, vec![DataIntegrityWarning::NonFiniteProfitMargin]);
    }

    #[test]
    fn popularity_above_hundred_is_clamped() {
        let (value, warning) = sanitize_popularity(130.0);
        assert_eq!(value, 100.0);
        assert!(warning.is_some());
        assert_eq!(sanitize_popularity(42.0), (42.0, None));
    }

    #[test]
    fn classify_menu_preserves_order_and_count() {
        let items = vec![
            make_item("1", 10.0, Some(10.0), 1, 1.0),
            make_item("2", 10.0, Some(90.0), 0, 0.0),
            make_item("3", 10.0, None, 9, 50.0),
        ];
        let records = classify_menu(&items, &thresholds(50.0, 5.0), &EngineConfig::default());
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
