//! Text normalization
//!
//! One routine, shared by training and prediction. Any divergence between
//! the two call sites is a correctness bug, so both paths go through
//! [`normalize_text`].

use crate::error::Result;
use polars::prelude::*;

/// Lowercase and trim a single text value. Idempotent.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalize every value of a string column, keeping nulls as nulls.
pub fn normalize_text_column(column: &Column) -> Result<Vec<Option<String>>> {
    let as_str = column.cast(&DataType::String)?;
    let ca = as_str.str()?;
    Ok(ca
        .into_iter()
        .map(|v| v.map(normalize_text))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize_text("  Hello World  "), "hello world");
        assert_eq!(normalize_text("ZATEN güzel"), "zaten güzel");
    }

    #[test]
    fn test_idempotent() {
        let inputs = ["  MiXeD Case  ", "already normal", "", "  ", "Çok İYİ"];
        for s in inputs {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_column_keeps_nulls() {
        let column: Column = Series::new(
            "tweet".into(),
            &[Some("  Hi "), None, Some("OK")],
        )
        .into();
        let normalized = normalize_text_column(&column).unwrap();
        assert_eq!(
            normalized,
            vec![Some("hi".to_string()), None, Some("ok".to_string())]
        );
    }
}
