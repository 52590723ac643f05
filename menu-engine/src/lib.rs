//! Menu-engineering classification engine.
//!
//! Given dishes with sales history and cost data, classifies every dish into
//! a profitability x popularity quadrant using thresholds derived from the
//! menu's own averages, then summarizes the result.
//!
//! Every stage is a pure function over in-memory data; [`pipeline`] composes
//! them and [`loader`] is the only module that reads files.

pub mod classifier;
pub mod components;
pub mod config;
pub mod date_range;
pub mod dedup;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod sales_aggregator;
pub mod selector;
pub mod summary;
pub mod thresholds;
pub mod types;
pub mod util;

pub use config::EngineConfig;
pub use error::{DataIntegrityWarning, EngineError, EngineResult};
pub use pipeline::{analyze_menu, AnalysisRequest, MenuEngineeringPipeline};
pub use thresholds::MenuStatistics;
pub use types::{
    AnalysisMetadata, CategoryCounts, ClassificationThresholds, DateRange, DishRecord,
    MenuAnalysis, MenuItemClass, MenuSummary, PerformanceRecord, PopularityCategory,
    ProfitCategory, SalesAggregate, SalesEntry,
};
