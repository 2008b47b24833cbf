use anyhow::Context;
use api_client::{MarketDataClient, ReturnSource};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use configuration::{Config, load_config};
use core_types::Period;
use inference::{DEFAULT_BIN_COUNT, HistogramBin, InferenceEngine, InferenceReport, build_histogram};
use rand::SeedableRng;
use rand::rngs::StdRng;
use simulation::GeneratorConfig;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Driftlab application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config().context("failed to load configuration")?;

    match cli.command {
        Commands::Simulate(args) => handle_simulate(args, &config),
        Commands::Analyze(args) => handle_analyze(args, &config).await,
        Commands::Health => handle_health(&config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A statistical laboratory: does an asset's return series show real drift,
/// or is it indistinguishable from noise?
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the t-test on a Monte Carlo simulated return series.
    Simulate(SimulateArgs),
    /// Fetch a real return series from the data provider and run the t-test.
    Analyze(AnalyzeArgs),
    /// Check that the data provider is reachable.
    Health,
}

#[derive(Parser)]
struct SimulateArgs {
    /// The lookback window ("6M" or "1Y").
    #[arg(long)]
    period: Option<Period>,

    /// The confidence level for the interval, strictly between 0 and 1.
    #[arg(long)]
    confidence: Option<f64>,

    /// Seed for the random generator; a fixed seed reproduces the run.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the per-run random drift with a fixed value.
    #[arg(long)]
    drift: Option<f64>,

    /// Override the default volatility (0.015).
    #[arg(long)]
    volatility: Option<f64>,

    /// Also print the histogram / fitted-density bin table.
    #[arg(long)]
    histogram: bool,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The ticker symbol to analyze (e.g., "AAPL").
    #[arg(long)]
    ticker: Option<String>,

    /// The lookback window ("6M" or "1Y").
    #[arg(long)]
    period: Option<Period>,

    /// The confidence level for the interval, strictly between 0 and 1.
    #[arg(long)]
    confidence: Option<f64>,

    /// Also print the histogram / fitted-density bin table.
    #[arg(long)]
    histogram: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Handles the Monte Carlo path: fabricate a series, then analyze it.
fn handle_simulate(args: SimulateArgs, config: &Config) -> anyhow::Result<()> {
    let period = args.period.unwrap_or(config.analysis.period);
    let confidence = args.confidence.unwrap_or(config.analysis.confidence_level);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut generator = GeneratorConfig::for_period(period, &mut rng);
    if let Some(drift) = args.drift {
        generator.drift = drift;
    }
    if let Some(volatility) = args.volatility {
        generator.volatility = volatility;
    }

    let returns = simulation::generate(&generator, &mut rng)?;
    tracing::info!(days = returns.len(), drift = generator.drift, "simulation run complete");
    println!(
        "Simulated {} returns over {} (drift {:.6}, volatility {:.4})",
        returns.len(),
        period,
        generator.drift,
        generator.volatility
    );

    render_analysis(&returns, confidence, args.histogram)
}

/// Handles the real-data path: fetch the series, then analyze it.
async fn handle_analyze(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let ticker = args
        .ticker
        .unwrap_or_else(|| config.analysis.ticker.clone())
        .to_uppercase();
    let period = args.period.unwrap_or(config.analysis.period);
    let confidence = args.confidence.unwrap_or(config.analysis.confidence_level);

    let client = MarketDataClient::new(&config.data_source);
    let returns = client
        .fetch_returns(&ticker, period)
        .await
        .with_context(|| format!("could not fetch returns for {}", ticker))?;
    tracing::info!(%ticker, observations = returns.len(), "return series fetched");

    println!("Fetched {} returns for {} over {}", returns.len(), ticker, period);

    render_analysis(&returns, confidence, args.histogram)
}

/// Pings the provider so connection problems surface before an analysis.
async fn handle_health(config: &Config) -> anyhow::Result<()> {
    let client = MarketDataClient::new(&config.data_source);
    let health = client
        .health_check()
        .await
        .with_context(|| format!("data provider at {} is unreachable", config.data_source.base_url))?;
    println!("Data provider status: {}", health.status);
    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

/// Runs the inference engine and prints the verdict, the report table and,
/// optionally, the histogram bins.
fn render_analysis(returns: &[f64], confidence: f64, show_histogram: bool) -> anyhow::Result<()> {
    let engine = InferenceEngine::new();
    let report = engine.calculate(returns, confidence)?;

    print_verdict(&report, confidence);
    println!("{}", report_table(&report));

    if show_histogram {
        let bins = build_histogram(returns, report.mean, report.std, DEFAULT_BIN_COUNT)?;
        println!("{}", histogram_table(&bins));
    }

    Ok(())
}

fn print_verdict(report: &InferenceReport, confidence: f64) {
    let headline = if report.reject_null {
        "H1 accepted: there is evidence of real drift"
    } else {
        "H0 not rejected: the returns are attributable to chance"
    };
    println!("\n{headline}");
    println!(
        "{} (p-value: {}) at {:.0}% confidence\n",
        report.evidence.description(),
        format_p_value(report.p_value),
        confidence * 100.0
    );
}

fn report_table(report: &InferenceReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Formula", "Value"]);

    table.add_row(vec![
        Cell::new("Sample size"),
        Cell::new("n"),
        Cell::new(report.n),
    ]);
    table.add_row(vec![
        Cell::new("Sample mean"),
        Cell::new("x̄ = Σx / n"),
        Cell::new(format_pct(report.mean)),
    ]);
    table.add_row(vec![
        Cell::new("Std deviation"),
        Cell::new("s"),
        Cell::new(format_pct(report.std)),
    ]);
    table.add_row(vec![
        Cell::new("Standard error"),
        Cell::new("SE = s / √n"),
        Cell::new(format_pct(report.standard_error)),
    ]);
    table.add_row(vec![
        Cell::new("t-statistic"),
        Cell::new("t = x̄ / SE"),
        Cell::new(format!("{:.4}", report.t_statistic)),
    ]);
    table.add_row(vec![
        Cell::new("Degrees of freedom"),
        Cell::new("df = n - 1"),
        Cell::new(report.degrees_of_freedom),
    ]);
    table.add_row(vec![
        Cell::new("p-value"),
        Cell::new("P(|T| > |t|)"),
        Cell::new(format_p_value(report.p_value)),
    ]);
    table.add_row(vec![
        Cell::new("Critical t"),
        Cell::new("t_crit at 1 - α/2"),
        Cell::new(format!("{:.4}", report.critical_t)),
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.0}% confidence interval", (1.0 - report.alpha) * 100.0)),
        Cell::new("CI = x̄ ± t_crit · SE"),
        Cell::new(format!(
            "[ {} ; {} ]",
            format_pct(report.ci_low),
            format_pct(report.ci_high)
        )),
    ]);

    table
}

fn histogram_table(bins: &[HistogramBin]) -> Table {
    let max_density = bins
        .iter()
        .map(|b| b.empirical_density)
        .fold(0.0_f64, f64::max);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Return", "Empirical density", "Fitted normal", ""]);

    for bin in bins {
        let width = if max_density > 0.0 {
            ((bin.empirical_density / max_density) * 30.0).round() as usize
        } else {
            0
        };
        table.add_row(vec![
            Cell::new(format!("{:+.2}%", bin.bin_center * 100.0)),
            Cell::new(format!("{:.2}", bin.empirical_density)),
            Cell::new(format!("{:.2}", bin.fitted_density)),
            Cell::new("█".repeat(width)),
        ]);
    }

    table
}

fn format_pct(value: f64) -> String {
    format!("{:.4}%", value * 100.0)
}

/// Very small p-values display as a bound, matching how the report is read.
fn format_p_value(p_value: f64) -> String {
    if p_value < 0.0001 {
        "< 0.0001".to_string()
    } else {
        format!("{:.4}", p_value)
    }
}
