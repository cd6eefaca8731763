//! Rank Evaluation CLI
//!
//! Scores the ranked results stored in a suite file against its relevance judgments.
//!
//! ## Quick Start
//!
//! ```bash
//! # Precision@10 with the default threshold
//! ./rank-eval run --suite ./suite.json
//!
//! # Precision@5, grades >= 2 count as relevant
//! ./rank-eval run --suite ./suite.json --size 5 --threshold 2
//!
//! # Metric parameters from a TOML file, rejecting unknown fields
//! ./rank-eval run --suite ./suite.json --config ./metric.toml --strict
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use rank_eval::{EvalSuite, ParseMode, PrecisionAtN, PrecisionAtNConfig, QualityReport};

#[derive(Parser)]
#[command(name = "rank-eval")]
#[command(about = "Precision@N evaluation of ranked search results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every query in a suite file
    ///
    /// Metric parameters resolve as: flags, then --config, then the suite's
    /// own `metric` section, then defaults.
    Run {
        /// Path to the suite JSON file
        #[arg(short, long)]
        suite: PathBuf,

        /// Path to metric config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of top results to score (N)
        #[arg(long)]
        size: Option<usize>,

        /// Minimum grade counted as relevant
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Reject unknown fields and require every field, in --config or in
        /// the suite's own `metric` section
        #[arg(long)]
        strict: bool,

        /// Output file for results (JSON)
        #[arg(short, long, default_value = "results/rank_eval_results.json")]
        output: PathBuf,
    },

    /// Validate a suite file
    Validate {
        /// Path to the suite JSON file
        #[arg(short, long)]
        suite: PathBuf,
    },

    /// Print the metric config as JSON
    ShowConfig {
        /// Number of top results to score (N)
        #[arg(long)]
        size: Option<usize>,

        /// Minimum grade counted as relevant
        #[arg(short, long)]
        threshold: Option<u32>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            suite,
            config,
            size,
            threshold,
            strict,
            output,
        } => {
            let mode = if strict { ParseMode::Strict } else { ParseMode::Lenient };
            run_suite(&suite, config.as_deref(), size, threshold, mode, &output)?;
        }

        Commands::Validate { suite } => {
            validate_suite(&suite)?;
        }

        Commands::ShowConfig { size, threshold } => {
            let config = resolve_config(None, size, threshold)?;
            println!("{}", config.to_json()?);
        }
    }

    Ok(())
}

/// Apply CLI overrides on top of a base config
fn resolve_config(
    base: Option<PrecisionAtNConfig>,
    size: Option<usize>,
    threshold: Option<u32>,
) -> Result<PrecisionAtNConfig> {
    let base = base.unwrap_or_default();
    let config = PrecisionAtNConfig::builder()
        .size(size.unwrap_or(base.size()))
        .relevance_threshold(threshold.unwrap_or(base.relevance_threshold()))
        .build()?;
    Ok(config)
}

fn run_suite(
    suite_path: &Path,
    config_path: Option<&Path>,
    size: Option<usize>,
    threshold: Option<u32>,
    mode: ParseMode,
    output: &Path,
) -> Result<()> {
    let suite = EvalSuite::load(suite_path)?;

    let base = match config_path {
        Some(path) => Some(PrecisionAtNConfig::load(path, mode)?),
        None => suite.metric_config(mode)?,
    };
    let config = resolve_config(base, size, threshold)?;
    let metric = PrecisionAtN::new(config);

    tracing::info!(
        suite = %suite.metadata.name,
        queries = suite.queries.len(),
        size = config.size(),
        threshold = config.relevance_threshold(),
        "Running evaluation"
    );

    let unjudged = suite.unjudged_queries();
    if !unjudged.is_empty() {
        tracing::warn!(
            "{} queries have no judgments in their scope: {}",
            unjudged.len(),
            unjudged.join(", ")
        );
    }

    let report = suite.run(&metric)?;
    print_report(&report);

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[derive(serde::Serialize)]
    struct EvalOutput<'a> {
        timestamp: String,
        suite: &'a str,
        suite_file: String,
        report: &'a QualityReport,
    }

    let output_data = EvalOutput {
        timestamp: chrono::Utc::now().to_rfc3339(),
        suite: &suite.metadata.name,
        suite_file: suite_path.to_string_lossy().to_string(),
        report: &report,
    };

    let json = serde_json::to_string_pretty(&output_data)?;
    std::fs::write(output, &json)?;
    println!("\nResults saved to {:?}", output);

    Ok(())
}

fn print_report(report: &QualityReport) {
    println!(
        "\n┌─ PRECISION@{} ───────────────────────────────────────────────────┐",
        report.config.size()
    );
    println!("{:40} {:>10} {:>10} {:>10}", "Query", "Score", "Relevant", "Retrieved");
    println!("{}", "─".repeat(73));
    for result in &report.query_results {
        println!(
            "{:40} {:>10.3} {:>10} {:>10}",
            result.query_id.chars().take(40).collect::<String>(),
            result.score,
            result.breakdown.relevant_retrieved,
            result.breakdown.retrieved,
        );
    }
    println!("{}", "─".repeat(73));
    println!("{}", report.format_summary());
}

fn validate_suite(path: &Path) -> Result<()> {
    println!("Validating {:?}...", path);

    let suite = EvalSuite::load(path)?;

    println!("✓ Valid suite file");
    println!("  Name: {}", suite.metadata.name);
    println!("  Description: {}", suite.metadata.description);
    println!("  Queries: {}", suite.queries.len());
    println!("  Judgments: {}", suite.judgment_count());
    match suite.metric_config(ParseMode::Lenient)? {
        Some(config) => println!(
            "  Metric: size={} relevant_rating_threshold={}",
            config.size(),
            config.relevance_threshold()
        ),
        None => println!("  Metric: defaults"),
    }

    let unjudged = suite.unjudged_queries();
    if !unjudged.is_empty() {
        println!("  ⚠ {} queries without in-scope judgments:", unjudged.len());
        for query_id in unjudged {
            println!("    {}", query_id);
        }
    }

    Ok(())
}
