use crate::classifier::classify_menu;
use crate::config::EngineConfig;
use crate::date_range::resolve_date_range;
use crate::dedup::deduplicate;
use crate::error::EngineResult;
use crate::sales_aggregator::aggregate_menu;
use crate::summary::summarize;
use crate::thresholds::{compute_menu_statistics, MenuStatistics};
use crate::types::{AnalysisMetadata, DishRecord, MenuAnalysis};

/// One analysis request: the menu snapshot plus raw date parameters.
#[derive(Clone, Debug, Default)]
pub struct AnalysisRequest {
    pub dishes: Vec<DishRecord>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AnalysisRequest {
    pub fn new(dishes: Vec<DishRecord>) -> Self {
        Self {
            dishes,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, start_date: Option<&str>, end_date: Option<&str>) -> Self {
        self.start_date = start_date.map(String::from);
        self.end_date = end_date.map(String::from);
        self
    }
}

/// The menu-engineering pipeline.
///
/// Pipeline flow:
/// 1. Resolve the date parameters (invalid dates abort the run)
/// 2. Aggregate each dish's sales over the range
/// 3. Collapse duplicate dishes by name
/// 4. Derive menu averages and dynamic thresholds
/// 5. Classify every dish, sales or not
/// 6. Summarize into ranked lists and quadrant counts
///
/// The pipeline holds only configuration, so one instance can serve any
/// number of concurrent requests.
#[derive(Clone, Debug, Default)]
pub struct MenuEngineeringPipeline {
    config: EngineConfig,
}

impl MenuEngineeringPipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn execute(&self, request: AnalysisRequest) -> EngineResult<MenuAnalysis> {
        let range =
            resolve_date_range(request.start_date.as_deref(), request.end_date.as_deref())?;
        log::debug!("resolved date range: {:?}", range);

        let total_dishes = request.dishes.len();
        let aggregated = aggregate_menu(request.dishes, &range);

        let unique = deduplicate(aggregated);
        log::debug!(
            "deduplicated {} dishes into {} unique",
            total_dishes,
            unique.len()
        );

        let stats = compute_menu_statistics(&unique, &self.config);
        let performance_records = classify_menu(&unique, &stats.thresholds, &self.config);
        let summary = summarize(&performance_records, self.config.summary_size);

        log::info!(
            "classified {} unique dishes ({} with sales): profit >= {:.2}%, popularity >= {:.2}%",
            performance_records.len(),
            stats.dishes_with_sales,
            stats.thresholds.profit_threshold,
            stats.thresholds.popularity_threshold
        );

        let metadata = build_metadata(&stats, &self.config, total_dishes, unique.len());

        Ok(MenuAnalysis {
            performance_records,
            summary,
            metadata,
        })
    }
}

/// Run the pipeline with default configuration.
pub fn analyze_menu(
    dishes: Vec<DishRecord>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> EngineResult<MenuAnalysis> {
    MenuEngineeringPipeline::default()
        .execute(AnalysisRequest::new(dishes).with_range(start_date, end_date))
}

fn build_metadata(
    stats: &MenuStatistics,
    config: &EngineConfig,
    total_dishes: usize,
    unique_dishes: usize,
) -> AnalysisMetadata {
    AnalysisMetadata {
        methodology: methodology(stats, config),
        average_profit_margin: stats.average_profit_margin,
        average_popularity: stats.average_popularity,
        profit_threshold: stats.thresholds.profit_threshold,
        popularity_threshold: stats.thresholds.popularity_threshold,
        total_dishes,
        unique_dishes,
        dishes_with_sales: stats.dishes_with_sales,
    }
}

fn methodology(stats: &MenuStatistics, config: &EngineConfig) -> String {
    format!(
        "Dynamic thresholds: a dish is high-profit when its margin is at or above the menu \
         average ({:.2}%), and popular when its popularity reaches {:.0}% of the average \
         popularity among dishes with sales ({:.2}% of {:.2}%).",
        stats.thresholds.profit_threshold,
        config.popularity_threshold_factor * 100.0,
        stats.thresholds.popularity_threshold,
        stats.average_popularity
    )
}
