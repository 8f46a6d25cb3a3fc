//! Cell parsing for text-typed export columns.

use polars::prelude::{DataFrame, DataType, PolarsResult};

/// Blank cells and the `NaN`/`NA` markers written for missing values.
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed.eq_ignore_ascii_case("na")
}

/// Parses a number, `None` for missing markers and garbage.
pub fn parse_f64(value: &str) -> Option<f64> {
    if is_missing(value) {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Parses a year such as `2030` or `2030.0`.
pub fn parse_year(value: &str) -> Option<i32> {
    let number = parse_f64(value)?;
    if number.fract() != 0.0 || number < f64::from(i32::MIN) || number > f64::from(i32::MAX) {
        return None;
    }
    Some(number as i32)
}

/// Trimmed text of every cell of a column; nulls become empty strings.
pub fn string_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .iter()
        .map(|cell| cell.map(str::trim).unwrap_or_default().to_string())
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn string_column_trims_and_blanks_nulls() {
        let df = df! {
            "tech" => [Some(" 01 "), None, Some("EWND")],
        }
        .unwrap();

        assert_eq!(string_column(&df, "tech").unwrap(), vec!["01", "", "EWND"]);
        assert!(string_column(&df, "fuel").is_err());
    }

    #[test]
    fn year_accepts_float_text() {
        assert_eq!(parse_year("2030"), Some(2030));
        assert_eq!(parse_year(" 2030.0 "), Some(2030));
        assert_eq!(parse_year("2030.5"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn na_markers_are_missing() {
        assert!(is_missing(" "));
        assert!(is_missing("NaN"));
        assert!(is_missing("NA"));
        assert!(!is_missing("abc"));
        assert_eq!(parse_f64("NA"), None);
        assert_eq!(parse_f64("abc"), None);
        assert_eq!(parse_f64("-1.25"), Some(-1.25));
    }
}
