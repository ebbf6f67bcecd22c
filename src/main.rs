use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use stockta::ingest::AnalysisDocument;
use stockta::models::{GapEvent, PriceLevel};
use stockta::synthetic::{MarketScenario, SyntheticBarGenerator};
use stockta::validation::BarValidator;
use stockta::{analyze, AnalysisConfig, AnalysisReport, StockDataFile};

#[derive(Parser)]
#[command(author, version, about = "Technical analysis for daily stock bars")]
struct Cli {
    /// Path to an analysis config file (toml/json/yaml); STOCKTA__* env vars override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a stock data file
    Analyze {
        /// JSON file with stock_code, fetch_time, real_time and historical bars
        #[arg(long)]
        data_file: PathBuf,

        /// Write the analysis document as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Price to analyze against (defaults to the real-time quote, then the latest close)
        #[arg(long)]
        current_price: Option<f64>,

        /// Reject bars with non-positive prices or inconsistent OHLC
        #[arg(long)]
        strict: bool,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Analyze a seeded synthetic series
    Demo {
        #[arg(long, value_enum, default_value = "uptrend")]
        scenario: ScenarioArg,

        /// Number of daily bars to generate
        #[arg(long, default_value = "120")]
        bars: usize,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Uptrend,
    Downtrend,
    Sideways,
    Volatile,
    Gapped,
}

impl From<ScenarioArg> for MarketScenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Uptrend => MarketScenario::Uptrend,
            ScenarioArg::Downtrend => MarketScenario::Downtrend,
            ScenarioArg::Sideways => MarketScenario::Sideways,
            ScenarioArg::Volatile => MarketScenario::Volatile,
            ScenarioArg::Gapped => MarketScenario::Gapped,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();
    let config = AnalysisConfig::load(cli.config.as_deref()).context("failed to load analysis config")?;

    match cli.command {
        Commands::Analyze {
            data_file,
            output,
            current_price,
            strict,
            json,
        } => run_analyze(&config, data_file, output, current_price, strict, json),
        Commands::Demo {
            scenario,
            bars,
            seed,
            json,
        } => run_demo(&config, scenario.into(), bars, seed, json),
    }
}

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stockta=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(
    config: &AnalysisConfig,
    data_file: PathBuf,
    output: Option<PathBuf>,
    current_price: Option<f64>,
    strict: bool,
    json: bool,
) -> Result<()> {
    let data = StockDataFile::from_path(&data_file)
        .with_context(|| format!("failed to read {}", data_file.display()))?;

    if strict {
        BarValidator::new()
            .validate_all(&data.bars())
            .with_context(|| format!("{} failed strict validation", data_file.display()))?;
    }

    let document = data
        .analyze(current_price, config)
        .with_context(|| format!("analysis of {} failed", data.stock_code))?;

    if json {
        println!("{}", document.to_json_pretty()?);
    } else {
        print_document(&document);
    }

    if let Some(path) = output {
        document
            .write_json(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}

fn run_demo(
    config: &AnalysisConfig,
    scenario: MarketScenario,
    num_bars: usize,
    seed: u64,
    json: bool,
) -> Result<()> {
    let bars = SyntheticBarGenerator::new(seed).generate(scenario, num_bars);
    tracing::info!(?scenario, bars = bars.len(), seed, "generated synthetic series");

    let report = analyze(&bars, None, config).context("analysis of synthetic series failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n=== Synthetic {:?} ({} bars, seed {}) ===", scenario, num_bars, seed);
        print_report(&report);
    }

    Ok(())
}

// ============================================================================
// Text report
// ============================================================================

fn print_document(document: &AnalysisDocument) {
    println!(
        "\n=== {} {} ===",
        document.stock_code, document.stock_name
    );
    if !document.analysis_time.is_empty() {
        println!("Data fetched: {}", document.analysis_time);
    }
    if let Some(change) = &document.price_change {
        println!(
            "Price: {:.2} ({:+.2}, {:+.2}%) vs previous close {:.2}",
            change.current, change.change, change.change_percent, change.pre_close
        );
    }
    print_report(&document.report);
}

fn print_report(report: &AnalysisReport) {
    let ind = &report.indicators;

    println!("Current price: {:.2} ({} bars)", report.current_price, report.bar_count);

    println!("\n-- Moving averages --");
    println!(
        "  MA5 {}  MA10 {}  MA20 {}  MA60 {}",
        fmt_opt(ind.ma5, 2),
        fmt_opt(ind.ma10, 2),
        fmt_opt(ind.ma20, 2),
        fmt_opt(ind.ma60, 2)
    );
    match report.trend.strength {
        Some(strength) => println!(
            "  Trend: {} ({}) - {}",
            report.trend.trend.label(),
            strength.label(),
            report.trend.description
        ),
        None => println!("  Trend: {} - {}", report.trend.trend.label(), report.trend.description),
    }

    println!("\n-- MACD --");
    println!(
        "  DIF {}  DEA {}  Histogram {}",
        fmt_opt(ind.dif, 4),
        fmt_opt(ind.dea, 4),
        fmt_opt(ind.macd_histogram, 4)
    );
    let signals: Vec<&str> = report.macd_signals.iter().map(|s| s.label()).collect();
    println!("  Signals: {}", signals.join(", "));

    println!("\n-- RSI --");
    println!("  {} [{}]", report.rsi.description, report.rsi.zone.label());

    println!("\n-- Volume --");
    println!(
        "  Ratio {}: {}",
        fmt_opt(report.volume.ratio, 2),
        report.volume.level.description()
    );

    println!("\n-- Support / Resistance --");
    println!("  Support:    {}", fmt_levels(&report.support_resistance.support));
    println!("  Resistance: {}", fmt_levels(&report.support_resistance.resistance));

    println!("\n-- Gaps --");
    if !report.gaps.has_gaps {
        println!("  none");
    }
    for gap in report.gaps.up_gaps.iter().chain(&report.gaps.down_gaps) {
        println!("  {}", fmt_gap(gap));
    }
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "n/a".to_string(),
    }
}

fn fmt_levels(levels: &[PriceLevel]) -> String {
    if levels.is_empty() {
        return "none".to_string();
    }
    levels
        .iter()
        .map(|level| format!("{:.2} ({})", level.price, level.date))
        .collect::<Vec<_>>()
        .join(", ")
}

fn fmt_gap(gap: &GapEvent) -> String {
    format!(
        "{} gap on {}: {:.2}-{:.2} (size {:.2}, {:.2}%), acts as {}",
        gap.kind.label(),
        gap.date,
        gap.price_range[0],
        gap.price_range[1],
        gap.size,
        gap.pct,
        gap.role.label()
    )
}
