//! Small IO helpers shared by every operation

use crate::error::{Result, SentimentyError};
use polars::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Create a directory tree if it doesn't already exist
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Read a CSV into a DataFrame with a clear error when the file is missing
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(SentimentyError::DataError(format!(
            "CSV not found: {}",
            path.display()
        )));
    }

    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(1000))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}

/// Write a DataFrame as CSV, creating the parent directory first
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}

/// Write a value as pretty-printed UTF-8 JSON
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a JSON value with a clear error when the file is missing
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(SentimentyError::DataError(format!(
            "JSON not found: {}",
            path.display()
        )));
    }
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
