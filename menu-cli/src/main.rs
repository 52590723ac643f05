use std::path::PathBuf;
use std::process;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;

use menu_engine::loader::load_dishes_file;
use menu_engine::{
    AnalysisRequest, EngineConfig, EngineError, MenuAnalysis, MenuEngineeringPipeline,
    MenuItemClass, PerformanceRecord,
};

const EXIT_FAILURE: i32 = 1;
const EXIT_VALIDATION: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "menu-cli")]
#[command(about = "Menu-engineering report: classify every dish by profit and popularity", long_about = None)]
#[command(version)]
struct Cli {
    /// Dish data (.json array of dishes, or .csv with one row per sales entry)
    file: PathBuf,

    /// First day of the sales window (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// Last day of the sales window (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportJson<'a> {
    generated_at: String,
    source: String,
    pipeline_ms: u128,
    #[serde(flatten)]
    analysis: &'a MenuAnalysis,
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a price with two decimals and comma thousands separators.
fn format_dollars(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

fn format_margin(margin: Option<f64>) -> String {
    match margin {
        Some(m) => format!("{:.1}%", m),
        None => "n/a".to_string(),
    }
}

fn class_icon(class: MenuItemClass) -> &'static str {
    match class {
        MenuItemClass::ChefsKiss => "**",
        MenuItemClass::HiddenGem => "+ ",
        MenuItemClass::BargainBucket => "$ ",
        MenuItemClass::BurntToast => "x ",
    }
}

fn print_ranked(title: &str, records: &[PerformanceRecord], metric: impl Fn(&PerformanceRecord) -> String) {
    println!("  {}", title);
    if records.is_empty() {
        println!("       (none)");
    }
    for (i, r) in records.iter().enumerate() {
        println!("     {}. {:28} {}", i + 1, r.name, metric(r));
    }
    println!();
}

fn print_human(analysis: &MenuAnalysis, source: &str, load_ms: u128, pipeline_ms: u128) {
    let meta = &analysis.metadata;
    let summary = &analysis.summary;

    println!();
    println!("  \u{2554}{:\u{2550}<64}\u{2557}", "");
    println!("  \u{2551}{:^64}\u{2551}", "MENU ENGINEERING REPORT");
    println!("  \u{255a}{:\u{2550}<64}\u{255d}", "");
    println!();
    println!(
        "  {}  \u{00b7}  {} dishes loaded  \u{00b7}  {} unique  \u{00b7}  {} with sales",
        source, meta.total_dishes, meta.unique_dishes, meta.dishes_with_sales
    );
    println!(
        "  Profit threshold {:.2}%  \u{00b7}  Popularity threshold {:.2}% (avg {:.2}%)",
        meta.profit_threshold, meta.popularity_threshold, meta.average_popularity
    );
    println!();

    let counts = &summary.category_counts;
    println!("  {:\u{2500}<64}", "");
    for class in MenuItemClass::ALL {
        println!("  {} {:16} {:>4}", class_icon(class), class.to_string(), counts.get(class));
    }
    println!("  {:\u{2500}<64}", "");
    println!();

    print_ranked("Top sellers", &summary.top_sellers, |r| {
        format!("{:>6} sold", r.number_sold)
    });
    print_ranked("Bottom sellers", &summary.bottom_sellers, |r| {
        format!("{:>6} sold", r.number_sold)
    });
    print_ranked("Hidden gems to promote", &summary.hidden_gems, |r| {
        format!("{:>6.1}% gross profit", r.gross_profit_percentage)
    });

    if !summary.no_sales.is_empty() {
        println!("  No sales in range: {}", summary.no_sales.join(", "));
        println!();
    }

    if analysis.performance_records.is_empty() {
        println!("  No dishes to classify.");
    } else {
        println!("  {:\u{2500}<64}", "");
        for r in &analysis.performance_records {
            println!(
                "  {} {:24} {:>10} {:>7} {:>6} sold {:>6.1}%  {}",
                class_icon(r.menu_item_class),
                r.name,
                format_dollars(r.selling_price),
                format_margin(r.profit_margin),
                r.number_sold,
                r.popularity_percentage,
                r.menu_item_class,
            );
            for warning in &r.warnings {
                println!("       warning: {}", warning);
            }
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    println!("  {}", meta.methodology);
    println!();
    println!(
        "  \u{23f1}  Data loaded in {}ms \u{00b7} Pipeline ran in {}ms \u{00b7} Total {}ms",
        load_ms,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn exit_with(err: &EngineError) -> ! {
    eprintln!("Error: {}", err);
    if err.is_validation() {
        let params = err.offending_params();
        if !params.is_empty() {
            eprintln!("  Parameter: {}", params.join(", "));
        }
        process::exit(EXIT_VALIDATION);
    }
    process::exit(EXIT_FAILURE);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).unwrap_or_else(|e| exit_with(&e)),
        None => EngineConfig::default(),
    };

    let load_start = Instant::now();
    let dishes = load_dishes_file(&cli.file).unwrap_or_else(|e| exit_with(&e));
    let load_ms = load_start.elapsed().as_millis();
    log::info!("loaded {} dishes from {}", dishes.len(), cli.file.display());

    let pipeline_start = Instant::now();
    let request = AnalysisRequest::new(dishes).with_range(cli.start.as_deref(), cli.end.as_deref());
    let analysis = MenuEngineeringPipeline::new(config)
        .execute(request)
        .unwrap_or_else(|e| exit_with(&e));
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    let source = cli.file.display().to_string();
    if cli.json {
        let report = ReportJson {
            generated_at: Utc::now().to_rfc3339(),
            source,
            pipeline_ms,
            analysis: &analysis,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with(&EngineError::from(e)),
        }
    } else {
        print_human(&analysis, &source, load_ms, pipeline_ms);
    }
}
