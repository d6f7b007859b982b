//! Command-line interface
//!
//! Four independent operations: train, evaluate, predict, analyze. With no
//! subcommand all four run in order.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::analysis::run_analysis;
use crate::config::PipelineConfig;
use crate::evaluate::evaluate_model;
use crate::predict::predict_batch;
use crate::train::train_model;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn kv(key: &str, val: &str) {
    println!("  {:<20} {}", muted(key), val.white());
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sentimenty")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline tweet sentiment pipeline")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding input CSV files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for persisted model artifacts
    #[arg(long, global = true)]
    pub models_dir: Option<PathBuf>,

    /// Directory for prediction and analysis outputs
    #[arg(long, global = true)]
    pub reports_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the sentiment model and persist the artifacts
    Train,
    /// Evaluate the persisted model on the reproduced holdout
    Evaluate,
    /// Predict labels for the unlabeled corpus
    Predict,
    /// Analyze time distributions of negative tweets
    Analyze,
}

impl Cli {
    /// Resolve the pipeline config with any directory overrides applied
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .override_data_dir(self.data_dir.as_deref())
            .override_models_dir(self.models_dir.as_deref())
            .override_reports_dir(self.reports_dir.as_deref())
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_train(config: &PipelineConfig) -> anyhow::Result<()> {
    section("Train");

    let start = Instant::now();
    let summary = train_model(config)?;

    kv(
        "CV accuracy",
        &format!(
            "{:.4} ± {:.4} ({} folds)",
            summary.cv.mean_score, summary.cv.std_score, summary.cv.n_folds
        ),
    );
    kv("Holdout accuracy", &format!("{:.4}", summary.holdout_accuracy));
    kv(
        "Split",
        &format!("{} train / {} test", summary.n_train, summary.n_test),
    );
    kv("Vocabulary", &format!("{} terms", summary.vocabulary_size));
    step_ok(&format!(
        "artifacts saved to {} ({:.2?})",
        config.models_dir.display(),
        start.elapsed()
    ));
    println!();

    Ok(())
}

pub fn cmd_evaluate(config: &PipelineConfig) -> anyhow::Result<()> {
    section("Evaluate");

    let summary = evaluate_model(config)?;

    println!("{}", summary.report.render());

    println!("  {}", accent("confusion matrix (rows: true, cols: predicted)"));
    print!("  {:>12}", "");
    for label in &summary.confusion.labels {
        print!(" {:>10}", muted(label));
    }
    println!();
    for (label, row) in summary
        .confusion
        .labels
        .iter()
        .zip(summary.confusion.counts.iter())
    {
        print!("  {:>12}", muted(label));
        for count in row {
            print!(" {:>10}", count);
        }
        println!();
    }

    step_ok(&format!(
        "evaluated on {} holdout rows",
        summary.n_test
    ));
    println!();

    Ok(())
}

pub fn cmd_predict(config: &PipelineConfig) -> anyhow::Result<()> {
    section("Predict");

    let start = Instant::now();
    let predictions = predict_batch(config)?;

    kv("Rows", &predictions.height().to_string());
    step_ok(&format!(
        "saved predictions to {} ({:.2?})",
        config.predictions_path().display(),
        start.elapsed()
    ));
    println!();

    Ok(())
}

pub fn cmd_analyze(config: &PipelineConfig) -> anyhow::Result<()> {
    section("Analyze");

    let tables = run_analysis(config)?;

    for table in &tables {
        println!("  {}", accent(&format!("negative tweets by {}", table.column)));
        println!(
            "  {:>14} {:>8} {:>8}",
            muted("value"),
            muted("count"),
            muted("ratio")
        );
        for row in &table.rows {
            println!("  {:>14} {:>8} {:>7.1}%", row.value, row.count, row.ratio);
        }
        println!("  {}", dim(&"─".repeat(45)));
    }

    step_ok(&format!(
        "frequency tables saved to {}",
        config.reports_dir.display()
    ));
    println!();

    Ok(())
}
