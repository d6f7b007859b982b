//! Time-based analysis of negative posts
//!
//! Derives Istanbul-local calendar features from the `date` column and
//! reports how negative tweets distribute over time-of-day intervals,
//! weekdays, and seasons. Output naming stays in Turkish to match the
//! original reporting.

use crate::config::PipelineConfig;
use crate::error::{Result, SentimentyError};
use crate::io;
use crate::labels::RawLabelColumn;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Date column expected in the labeled corpus
pub const DATE_COLUMN: &str = "date";

/// Display order for the coarse time-of-day intervals
pub const TIME_INTERVAL_ORDER: [&str; 6] =
    ["22-02", "02-06", "06-10", "10-14", "14-18", "18-22"];

/// Display order for weekdays (Turkish)
pub const DAY_ORDER: [&str; 7] = [
    "Pazartesi",
    "Salı",
    "Çarşamba",
    "Perşembe",
    "Cuma",
    "Cumartesi",
    "Pazar",
];

/// Display order for seasons (Turkish)
pub const SEASON_ORDER: [&str; 4] = ["Kış", "İlkbahar", "Yaz", "Sonbahar"];

fn turkish_month(month: u32) -> &'static str {
    match month {
        1 => "Ocak",
        2 => "Şubat",
        3 => "Mart",
        4 => "Nisan",
        5 => "Mayıs",
        6 => "Haziran",
        7 => "Temmuz",
        8 => "Ağustos",
        9 => "Eylül",
        10 => "Ekim",
        11 => "Kasım",
        _ => "Aralık",
    }
}

fn season_of(month: u32) -> &'static str {
    match month {
        12 | 1 | 2 => "Kış",
        3..=5 => "İlkbahar",
        6..=8 => "Yaz",
        _ => "Sonbahar",
    }
}

fn turkish_day(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Pazartesi",
        chrono::Weekday::Tue => "Salı",
        chrono::Weekday::Wed => "Çarşamba",
        chrono::Weekday::Thu => "Perşembe",
        chrono::Weekday::Fri => "Cuma",
        chrono::Weekday::Sat => "Cumartesi",
        chrono::Weekday::Sun => "Pazar",
    }
}

fn time_interval(hour: u32) -> &'static str {
    match hour {
        22..=23 | 0..=1 => "22-02",
        2..=5 => "02-06",
        6..=9 => "06-10",
        10..=13 => "10-14",
        14..=17 => "14-18",
        _ => "18-22",
    }
}

/// Parse a timestamp string and shift it to Istanbul local time.
///
/// Naive timestamps are treated as UTC, matching the original corpus.
/// Turkey has used a fixed UTC+3 offset with no DST since 2016.
fn istanbul_local(raw: &str) -> Option<NaiveDateTime> {
    let istanbul = FixedOffset::east_opt(3 * 3600)?;
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&istanbul).naive_local());
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    let utc = naive.and_utc();
    Some(utc.with_timezone(&istanbul).naive_local())
}

/// Add Istanbul-local `month`, `seasons`, `days`, and `time_interval`
/// columns derived from the date column.
pub fn add_time_features(df: &DataFrame, date_col: &str) -> Result<DataFrame> {
    let column = df.column(date_col).map_err(|_| {
        SentimentyError::SchemaError(format!("missing date column: {date_col}"))
    })?;
    let as_str = column.cast(&DataType::String)?;
    let ca = as_str.str()?;

    let locals: Vec<Option<NaiveDateTime>> =
        ca.into_iter().map(|v| v.and_then(istanbul_local)).collect();

    let months: Vec<Option<&str>> = locals
        .iter()
        .map(|dt| dt.map(|d| turkish_month(d.month())))
        .collect();
    let seasons: Vec<Option<&str>> = locals
        .iter()
        .map(|dt| dt.map(|d| season_of(d.month())))
        .collect();
    let days: Vec<Option<&str>> = locals
        .iter()
        .map(|dt| dt.map(|d| turkish_day(d.weekday())))
        .collect();
    let intervals: Vec<Option<&str>> = locals
        .iter()
        .map(|dt| dt.map(|d| time_interval(d.hour())))
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new("month".into(), months))?;
    out.with_column(Series::new("seasons".into(), seasons))?;
    out.with_column(Series::new("days".into(), days))?;
    out.with_column(Series::new("time_interval".into(), intervals))?;

    Ok(out)
}

/// Keep only negative rows, accepting legacy or normalized label shapes
pub fn negative_rows(df: &DataFrame) -> Result<DataFrame> {
    let label_name = if df.column(crate::dataset::LEGACY_LABEL_COLUMN).is_ok() {
        crate::dataset::LEGACY_LABEL_COLUMN
    } else if df.column(crate::dataset::LABEL_COLUMN).is_ok() {
        crate::dataset::LABEL_COLUMN
    } else {
        return Err(SentimentyError::SchemaError(
            "no sentiment label column found (expected 'Durum' or 'label')".to_string(),
        ));
    };

    let mask: Vec<bool> = match RawLabelColumn::classify(df.column(label_name)?)? {
        RawLabelColumn::Numeric(values) => {
            values.into_iter().map(|v| v == Some(-1)).collect()
        }
        RawLabelColumn::Textual(values) => values
            .into_iter()
            .map(|v| {
                v.map(|s| {
                    let lowered = s.trim().to_lowercase();
                    matches!(lowered.as_str(), "negative" | "negatif" | "-1")
                })
                .unwrap_or(false)
            })
            .collect(),
    };

    let mask = BooleanChunked::new("negative_mask".into(), mask);
    Ok(df.filter(&mask)?)
}

/// One row of a frequency table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub value: String,
    pub count: u32,
    pub ratio: f64,
}

/// Counts and percentage ratios for one categorical column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub column: String,
    pub rows: Vec<FrequencyRow>,
}

/// Count values of a categorical column, reporting in the fixed display
/// order with zero fills for absent values.
pub fn frequency_table(df: &DataFrame, column: &str, order: &[&str]) -> Result<FrequencyTable> {
    let ca = df.column(column)?.cast(&DataType::String)?;
    let ca = ca.str()?;

    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut total = 0u32;
    for value in ca.into_iter().flatten() {
        *counts.entry(value.to_string()).or_insert(0) += 1;
        total += 1;
    }

    let rows = order
        .iter()
        .map(|&value| {
            let count = counts.get(value).copied().unwrap_or(0);
            let ratio = if total > 0 {
                100.0 * count as f64 / total as f64
            } else {
                0.0
            };
            FrequencyRow {
                value: value.to_string(),
                count,
                ratio,
            }
        })
        .collect();

    Ok(FrequencyTable {
        column: column.to_string(),
        rows,
    })
}

fn write_frequency_csv(table: &FrequencyTable, path: &std::path::Path) -> Result<()> {
    let values: Vec<String> = table.rows.iter().map(|r| r.value.clone()).collect();
    let counts: Vec<u32> = table.rows.iter().map(|r| r.count).collect();
    let mut df = DataFrame::new(vec![
        Series::new(table.column.clone().into(), values).into(),
        Series::new("count".into(), counts).into(),
    ])?;
    io::write_csv(&mut df, path)
}

/// Compute negative-tweet distributions over time features and write the
/// per-column counts to the reports directory.
pub fn run_analysis(config: &PipelineConfig) -> Result<Vec<FrequencyTable>> {
    let df = io::read_csv(&config.labeled_data_path())?;
    let df = add_time_features(&df, DATE_COLUMN)?;
    let negative = negative_rows(&df)?;

    if negative.height() == 0 {
        return Err(SentimentyError::EmptyResult(
            "no negative tweets found for analysis".to_string(),
        ));
    }
    info!(rows = negative.height(), "negative tweets selected");

    let specs: [(&str, &[&str], &str); 3] = [
        ("time_interval", &TIME_INTERVAL_ORDER, "neg_by_time_interval.csv"),
        ("days", &DAY_ORDER, "neg_by_day.csv"),
        ("seasons", &SEASON_ORDER, "neg_by_season.csv"),
    ];

    let mut tables = Vec::with_capacity(specs.len());
    for (column, order, file_name) in specs {
        let table = frequency_table(&negative, column, order)?;
        write_frequency_csv(&table, &config.report_path(file_name))?;
        tables.push(table);
    }

    Ok(tables)
}
