//! Sample Data Generator
//!
//! Writes a small synthetic `data/` directory (train.csv, test.csv,
//! sample_submission.csv) shaped like the competition data, so the problem
//! can be exercised without the full dataset.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "make-sample-data")]
struct Args {
    /// Directory that will receive data/
    #[arg(long, default_value = ".")]
    base_path: PathBuf,

    /// Number of training rows
    #[arg(long, default_value_t = 1000)]
    train_rows: usize,

    /// Number of test rows
    #[arg(long, default_value_t = 200)]
    test_rows: usize,

    /// Fraction of fraudulent training rows
    #[arg(long, default_value_t = 0.035)]
    fraud_rate: f64,

    #[arg(long, default_value_t = 57)]
    seed: u64,
}

/// One synthetic transaction
#[derive(Debug, Clone, Serialize)]
struct Transaction {
    #[serde(rename = "TransactionID")]
    transaction_id: u64,
    #[serde(rename = "TransactionDT")]
    transaction_dt: u64,
    #[serde(rename = "TransactionAmt")]
    transaction_amt: f64,
    #[serde(rename = "ProductCD")]
    product_cd: &'static str,
    card4: &'static str,
    #[serde(rename = "P_emaildomain")]
    p_emaildomain: Option<&'static str>,
    dist1: Option<f64>,
}

/// Training row: the transaction plus its label column
#[derive(Debug, Serialize)]
struct LabelledTransaction {
    #[serde(rename = "TransactionID")]
    transaction_id: u64,
    #[serde(rename = "TransactionDT")]
    transaction_dt: u64,
    #[serde(rename = "TransactionAmt")]
    transaction_amt: f64,
    #[serde(rename = "ProductCD")]
    product_cd: &'static str,
    card4: &'static str,
    #[serde(rename = "P_emaildomain")]
    p_emaildomain: Option<&'static str>,
    dist1: Option<f64>,
    #[serde(rename = "isFraud")]
    is_fraud: u8,
}

impl LabelledTransaction {
    fn new(tx: Transaction, fraud: bool) -> Self {
        Self {
            transaction_id: tx.transaction_id,
            transaction_dt: tx.transaction_dt,
            transaction_amt: tx.transaction_amt,
            product_cd: tx.product_cd,
            card4: tx.card4,
            p_emaildomain: tx.p_emaildomain,
            dist1: tx.dist1,
            is_fraud: u8::from(fraud),
        }
    }
}

#[derive(Debug, Serialize)]
struct SampleSubmissionRow {
    id: u64,
    #[serde(rename = "isFraud")]
    is_fraud: f64,
}

struct TransactionGenerator {
    rng: StdRng,
    next_id: u64,
    clock: u64,
}

impl TransactionGenerator {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_id: 2_987_000,
            clock: 86_400,
        }
    }

    fn generate(&mut self, fraud: bool) -> Transaction {
        self.next_id += 1;
        self.clock += self.rng.gen_range(1..120);

        let (amount, product, email) = if fraud {
            (
                self.rng.gen_range(150.0..2500.0),
                self.random_choice(&["C", "C", "W", "H"]),
                self.random_choice(&["protonmail.com", "anonymous.com", "gmail.com"]),
            )
        } else {
            (
                self.rng.gen_range(5.0..400.0),
                self.random_choice(&["W", "W", "W", "H", "R", "S"]),
                self.random_choice(&["gmail.com", "yahoo.com", "hotmail.com", "aol.com"]),
            )
        };

        Transaction {
            transaction_id: self.next_id,
            transaction_dt: self.clock,
            transaction_amt: (amount * 100.0_f64).round() / 100.0,
            product_cd: product,
            card4: self.random_choice(&["visa", "mastercard", "american express", "discover"]),
            // emails and distances are sparse in the real data
            p_emaildomain: self.rng.gen_bool(0.85).then_some(email),
            dist1: self
                .rng
                .gen_bool(0.4)
                .then(|| self.rng.gen_range(0.0..500.0_f64).round()),
        }
    }

    fn random_choice(&mut self, choices: &[&'static str]) -> &'static str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "Wrote file");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("make_sample_data=info".parse()?),
        )
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.fraud_rate),
        "fraud rate must be within [0, 1], got {}",
        args.fraud_rate
    );
    let dir = args.base_path.join(fraud_ramp::DataRoot::Sample.dir_name());
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    info!(
        dir = %dir.display(),
        train_rows = args.train_rows,
        test_rows = args.test_rows,
        fraud_rate = args.fraud_rate,
        seed = args.seed,
        "Generating sample data"
    );

    let mut generator = TransactionGenerator::new(args.seed);
    let mut label_rng = StdRng::seed_from_u64(args.seed.wrapping_add(1));

    let mut train = Vec::with_capacity(args.train_rows);
    for i in 0..args.train_rows {
        // guarantee at least two of each class so the set can be split
        let fraud = match i {
            0 | 1 => true,
            2 | 3 => false,
            _ => label_rng.gen_bool(args.fraud_rate),
        };
        train.push(LabelledTransaction::new(generator.generate(fraud), fraud));
    }

    let test: Vec<Transaction> = (0..args.test_rows)
        .map(|_| {
            let fraud = label_rng.gen_bool(args.fraud_rate);
            generator.generate(fraud)
        })
        .collect();

    let sample: Vec<SampleSubmissionRow> = test
        .iter()
        .map(|tx| SampleSubmissionRow {
            id: tx.transaction_id,
            is_fraud: 0.5,
        })
        .collect();

    write_rows(&dir.join(fraud_ramp::problem::TRAIN_FILE), &train)?;
    write_rows(&dir.join(fraud_ramp::problem::TEST_FILE), &test)?;
    write_rows(
        &dir.join(fraud_ramp::submission::SAMPLE_SUBMISSION_FILE),
        &sample,
    )?;

    let frauds = train.iter().filter(|t| t.is_fraud == 1).count();
    info!(
        frauds = frauds,
        legitimate = train.len() - frauds,
        "Sample data complete"
    );
    Ok(())
}
