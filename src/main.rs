//! Fraud Detection Problem - Command Line Entry Point
//!
//! Cross-validates the baseline classifier on the training data, or fits it
//! on all training rows and writes a submission for the test data.

use anyhow::Result;
use clap::{Parser, Subcommand};
use fraud_ramp::{
    config::{AppConfig, LogFormat, LoggingConfig},
    Classifier, DataRoot, Evaluator, PriorClassifier, Problem,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fraud-ramp", version, about = "Fraud detection benchmark problem")]
struct Cli {
    /// Configuration file (default: config/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding data/ and kaggle_data/
    #[arg(long, global = true)]
    base_path: Option<PathBuf>,

    /// Directory receiving submission files
    #[arg(long, global = true)]
    output_path: Option<PathBuf>,

    /// Read the small sample dataset under data/
    #[arg(long, global = true, conflicts_with = "full")]
    sample: bool,

    /// Read the full dataset under kaggle_data/
    #[arg(long, global = true)]
    full: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cross-validate the baseline classifier and print the score summary
    Evaluate,
    /// Fit on the training data and write submission_<suffix>.csv for the test data
    Submit {
        #[arg(long, default_value = "test")]
        suffix: String,
    },
}

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("fraud_ramp={}", config.level)))?;

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(base_path) = cli.base_path {
        config.data.base_path = base_path;
    }
    if let Some(output_path) = cli.output_path {
        config.submission.output_path = output_path;
    }
    if cli.sample {
        config.data.root = Some(DataRoot::Sample);
    } else if cli.full {
        config.data.root = Some(DataRoot::Full);
    }

    init_logging(&config.logging)?;

    let problem = Problem::from_config(&config);
    info!(
        title = problem.title(),
        root = ?problem.root(),
        base_path = %config.data.base_path.display(),
        "Problem configured"
    );

    let train = problem.get_train_data()?;
    let mut classifier = PriorClassifier::new();

    match cli.command {
        Command::Evaluate => {
            let report = Evaluator::new(&problem).run(&mut classifier, &train)?;
            report.print_summary();
        }
        Command::Submit { suffix } => {
            classifier.fit(&train.features, &train.labels)?;
            let test = problem.get_test_data()?;
            let y_pred = classifier.predict_proba(&test.features)?;
            match problem.save_submission(&y_pred, &suffix)? {
                Some(path) => info!(path = %path.display(), "Submission saved"),
                None => info!(suffix = %suffix, "Suffix is not a test suffix, nothing written"),
            }
        }
    }

    Ok(())
}
