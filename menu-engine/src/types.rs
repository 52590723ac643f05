use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataIntegrityWarning;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// One day of sales for a dish. Entries are never mutated, only aggregated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesEntry {
    pub date: NaiveDate,
    pub number_sold: u64,
    /// Share of the day's menu sales, 0–100.
    pub popularity_percentage: f64,
}

/// A menu dish as supplied by the persistence layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    pub id: String,
    pub name: String,
    /// Selling price excluding GST.
    #[serde(default)]
    pub selling_price: f64,
    /// Gross profit margin as a percentage. `None` means unknown.
    #[serde(default)]
    pub profit_margin: Option<f64>,
    /// Recency signal used to pick a survivor among duplicate dishes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_entries: Option<Vec<SalesEntry>>,
}

impl DishRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            selling_price: 0.0,
            profit_margin: None,
            updated_at: None,
            sales_entries: None,
        }
    }
}

/// Anything that carries a source dish, so stages can operate on the dish
/// before or after sales have been attached.
pub trait HasDish {
    fn dish(&self) -> &DishRecord;
}

impl HasDish for DishRecord {
    fn dish(&self) -> &DishRecord {
        self
    }
}

// ---------------------------------------------------------------------------
// Derived, per-request types
// ---------------------------------------------------------------------------

/// Resolved sales window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateRange {
    /// No bounds were requested: use each dish's most recent entry only.
    LatestSnapshot,
    /// Aggregate every entry inside the inclusive window. A missing bound is
    /// unbounded on that side; at least one bound is set.
    Window {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateRange {
    /// Whether `date` falls inside the window (always true for a snapshot).
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            DateRange::LatestSnapshot => true,
            DateRange::Window { start, end } => {
                start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
            }
        }
    }
}

/// Units sold and representative popularity for one dish over one range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesAggregate {
    pub number_sold: u64,
    pub popularity_percentage: f64,
}

/// A dish with its sales aggregate attached.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedDish {
    pub dish: DishRecord,
    pub sales: SalesAggregate,
}

impl AggregatedDish {
    pub fn has_sales(&self) -> bool {
        self.sales.number_sold > 0
    }
}

impl HasDish for AggregatedDish {
    fn dish(&self) -> &DishRecord {
        &self.dish
    }
}

/// Menu-scoped cutoffs derived from the menu's own averages.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationThresholds {
    pub profit_threshold: f64,
    pub popularity_threshold: f64,
}

// ---------------------------------------------------------------------------
// Classification types
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ProfitCategory {
    High,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PopularityCategory {
    High,
    Low,
}

/// The four menu-engineering quadrants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MenuItemClass {
    #[serde(rename = "Chef's Kiss")]
    ChefsKiss,
    #[serde(rename = "Hidden Gem")]
    HiddenGem,
    #[serde(rename = "Bargain Bucket")]
    BargainBucket,
    #[serde(rename = "Burnt Toast")]
    BurntToast,
}

impl MenuItemClass {
    pub const ALL: [MenuItemClass; 4] = [
        MenuItemClass::ChefsKiss,
        MenuItemClass::HiddenGem,
        MenuItemClass::BargainBucket,
        MenuItemClass::BurntToast,
    ];

    pub fn from_categories(profit: ProfitCategory, popularity: PopularityCategory) -> Self {
        match (profit, popularity) {
            (ProfitCategory::High, PopularityCategory::High) => MenuItemClass::ChefsKiss,
            (ProfitCategory::High, PopularityCategory::Low) => MenuItemClass::HiddenGem,
            (ProfitCategory::Low, PopularityCategory::High) => MenuItemClass::BargainBucket,
            (ProfitCategory::Low, PopularityCategory::Low) => MenuItemClass::BurntToast,
        }
    }
}

impl fmt::Display for MenuItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItemClass::ChefsKiss => write!(f, "Chef's Kiss"),
            MenuItemClass::HiddenGem => write!(f, "Hidden Gem"),
            MenuItemClass::BargainBucket => write!(f, "Bargain Bucket"),
            MenuItemClass::BurntToast => write!(f, "Burnt Toast"),
        }
    }
}

/// The engine's terminal output for one dish.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub id: String,
    pub name: String,
    /// Selling price after clamping.
    pub selling_price: f64,
    /// Profit margin after clamping; `None` when the dish had none.
    pub profit_margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    pub number_sold: u64,
    pub popularity_percentage: f64,

    pub profit_category: ProfitCategory,
    pub popularity_category: PopularityCategory,
    pub menu_item_class: MenuItemClass,

    pub gross_profit_percentage: f64,
    pub food_cost: f64,
    pub contribution_margin: f64,
    pub gross_profit: f64,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataIntegrityWarning>,
}

impl PerformanceRecord {
    pub fn has_sales(&self) -> bool {
        self.number_sold > 0
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Number of dishes per quadrant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub chefs_kiss: usize,
    pub hidden_gem: usize,
    pub bargain_bucket: usize,
    pub burnt_toast: usize,
}

impl CategoryCounts {
    pub fn from_records(records: &[PerformanceRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.increment(record.menu_item_class);
        }
        counts
    }

    pub fn increment(&mut self, class: MenuItemClass) {
        match class {
            MenuItemClass::ChefsKiss => self.chefs_kiss += 1,
            MenuItemClass::HiddenGem => self.hidden_gem += 1,
            MenuItemClass::BargainBucket => self.bargain_bucket += 1,
            MenuItemClass::BurntToast => self.burnt_toast += 1,
        }
    }

    pub fn get(&self, class: MenuItemClass) -> usize {
        match class {
            MenuItemClass::ChefsKiss => self.chefs_kiss,
            MenuItemClass::HiddenGem => self.hidden_gem,
            MenuItemClass::BargainBucket => self.bargain_bucket,
            MenuItemClass::BurntToast => self.burnt_toast,
        }
    }

    pub fn total(&self) -> usize {
        self.chefs_kiss + self.hidden_gem + self.bargain_bucket + self.burnt_toast
    }
}

/// Ranked view over the classified menu.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSummary {
    pub top_sellers: Vec<PerformanceRecord>,
    pub bottom_sellers: Vec<PerformanceRecord>,
    pub hidden_gems: Vec<PerformanceRecord>,
    pub category_counts: CategoryCounts,
    /// Names of dishes that sold nothing in the range, in input order.
    pub no_sales: Vec<String>,
}

/// Diagnostic context explaining how dishes were classified.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub methodology: String,
    pub average_profit_margin: f64,
    pub average_popularity: f64,
    pub profit_threshold: f64,
    pub popularity_threshold: f64,
    pub total_dishes: usize,
    pub unique_dishes: usize,
    pub dishes_with_sales: usize,
}

/// Full result of one pipeline run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuAnalysis {
    pub performance_records: Vec<PerformanceRecord>,
    pub summary: MenuSummary,
    pub metadata: AnalysisMetadata,
}
