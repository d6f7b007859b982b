//! Integration test: schema validation, label normalization, analysis

use polars::prelude::*;
use sentimenty::analysis::{add_time_features, run_analysis};
use sentimenty::config::PipelineConfig;
use sentimenty::dataset::prepare_training_data;
use sentimenty::io::write_csv;
use sentimenty::SentimentyError;
use std::path::Path;

fn temp_config(root: &Path) -> PipelineConfig {
    PipelineConfig::new(
        root.join("data"),
        root.join("models"),
        root.join("reports"),
    )
}

#[test]
fn test_mixed_turkish_and_english_labels() {
    let df = df!(
        "tweet" => &["çok iyi", "çok kötü", "fena değil", "great", "awful", "fine"],
        "label" => &["Pozitif", "Negatif", "Nötr", "positive", "NEGATIVE", "neutral"],
    )
    .unwrap();

    let prepared = prepare_training_data(&df).unwrap();
    assert_eq!(prepared.label_ids, vec![2, 0, 1, 2, 0, 1]);
}

#[test]
fn test_missing_text_column_fails_before_any_model_work() {
    let df = df!(
        "content" => &["no tweet column here"],
        "label" => &[1i64],
    )
    .unwrap();

    match prepare_training_data(&df) {
        Err(SentimentyError::SchemaError(msg)) => assert!(msg.contains("tweet")),
        other => panic!("expected SchemaError, got {other:?}"),
    }
}

#[test]
fn test_label_domain_error_names_the_invalid_set() {
    let df = df!(
        "tweet" => &["bir", "iki"],
        "label" => &["pozitif", "çok karışık"],
    )
    .unwrap();

    match prepare_training_data(&df) {
        Err(SentimentyError::LabelDomain(msg)) => {
            assert!(msg.contains("negative/neutral/positive"));
        }
        other => panic!("expected LabelDomain, got {other:?}"),
    }
}

#[test]
fn test_analysis_counts_negative_tweets_by_time_features() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_config(dir.path());

    // Two negative tweets in summer afternoons, one positive
    let mut df = df!(
        "tweet" => &["kötü", "berbat", "harika"],
        "label" => &[-1i64, -1, 1],
        "date" => &[
            "2021-07-05 12:00:00",
            "2021-07-06 12:30:00",
            "2021-01-01 09:00:00",
        ],
    )
    .unwrap();
    write_csv(&mut df, &config.labeled_data_path()).unwrap();

    let tables = run_analysis(&config).unwrap();
    assert_eq!(tables.len(), 3);

    let seasons = tables.iter().find(|t| t.column == "seasons").unwrap();
    let yaz = seasons.rows.iter().find(|r| r.value == "Yaz").unwrap();
    assert_eq!(yaz.count, 2);
    let kis = seasons.rows.iter().find(|r| r.value == "Kış").unwrap();
    assert_eq!(kis.count, 0);

    // Frequency CSVs land in the reports directory
    assert!(config.report_path("neg_by_time_interval.csv").exists());
    assert!(config.report_path("neg_by_day.csv").exists());
    assert!(config.report_path("neg_by_season.csv").exists());
}

#[test]
fn test_analysis_with_no_negatives_is_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_config(dir.path());

    let mut df = df!(
        "tweet" => &["harika", "fena değil"],
        "label" => &[1i64, 0],
        "date" => &["2021-07-05 12:00:00", "2021-07-06 12:30:00"],
    )
    .unwrap();
    write_csv(&mut df, &config.labeled_data_path()).unwrap();

    match run_analysis(&config) {
        Err(SentimentyError::EmptyResult(msg)) => assert!(msg.contains("negative")),
        other => panic!("expected EmptyResult, got {other:?}"),
    }
}

#[test]
fn test_time_features_survive_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dated.csv");

    let mut df = df!(
        "tweet" => &["a"],
        "date" => &["2021-03-15 08:00:00"],
    )
    .unwrap();
    write_csv(&mut df, &path).unwrap();

    let loaded = sentimenty::io::read_csv(&path).unwrap();
    let out = add_time_features(&loaded, "date").unwrap();

    let months = out.column("month").unwrap().str().unwrap();
    assert_eq!(months.get(0).unwrap(), "Mart");
    let seasons = out.column("seasons").unwrap().str().unwrap();
    assert_eq!(seasons.get(0).unwrap(), "İlkbahar");
}
