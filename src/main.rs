use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bce_loss::{CrossEntropyEvaluator, LossReport, PredictionBatch};

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the result.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = cli.loss_config()?;
    let evaluator = CrossEntropyEvaluator::try_new(config)?;

    let report = match &cli.command {
        Commands::Eval { labels, predictions } => evaluator
            .report(labels, predictions)
            .context("evaluation failed")?,
        Commands::File { path } => {
            let batch = PredictionBatch::load_json(&path.to_string_lossy())
                .with_context(|| format!("failed to read batch file {}", path.display()))?;
            evaluator
                .evaluate_batch(&batch)
                .with_context(|| format!("evaluation of {} failed", path.display()))?
        }
    };

    tracing::info!("{report}");
    print_report(&report, cli.json)
}

fn print_report(report: &LossReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.loss);
    }
    Ok(())
}
