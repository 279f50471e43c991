//! Parser for newline-separated, comma-delimited rows whose last field is the label.

use crate::common_types::{Dataset, FeatureVector, Label};
use crate::error::{AnalysisError, Result};
use tracing::{debug, trace};

pub const FIELD_DELIMITER: char = ',';

/// Parses raw dataset text.
///
/// Fields are trimmed of whitespace and byte-order marks. A row survives only
/// if it has at least two fields and none of them is empty; anything else is
/// skipped without error. Every field but the last is read as `f64` from its
/// longest leading number (`"12cm"` reads as 12), and a field with no leading
/// number becomes `NaN`. The last field is the label, kept verbatim (after
/// trimming).
///
/// # Errors
/// [`AnalysisError::EmptyDataset`] if no row survives.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let mut features: Vec<FeatureVector> = Vec::new();
    let mut labels: Vec<Label> = Vec::new();
    let mut dropped = 0usize;

    for (line_no, line) in text.split('\n').enumerate() {
        match parse_row(line) {
            Some((row, label)) => {
                features.push(row);
                labels.push(label);
            }
            None => {
                trace!(line = line_no + 1, "dropping malformed row");
                dropped += 1;
            }
        }
    }

    if labels.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    debug!(rows = labels.len(), dropped, "parsed dataset");
    Ok(Dataset::new(features, labels))
}

fn parse_row(line: &str) -> Option<(FeatureVector, Label)> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(trim_field).collect();
    if fields.len() < 2 || fields.iter().any(|field| field.is_empty()) {
        return None;
    }

    let (label, values) = fields.split_last()?;
    let row = values.iter().map(|value| parse_number(value)).collect();
    Some((row, (*label).to_string()))
}

fn trim_field(field: &str) -> &str {
    field.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads the longest prefix of `field` that forms a decimal number: optional
/// sign, digits with at most one `.`, then an exponent only if it has digits.
/// `Infinity` (with optional sign) is accepted; `inf` and `nan` are not.
fn parse_number(field: &str) -> f64 {
    let bytes = field.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if field[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let fraction_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digit_count += end - fraction_start;
    }
    if digit_count == 0 {
        return f64::NAN; // no mantissa digits, e.g. "abc" or "."
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }

    field[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_rows() {
        let data = parse_dataset("5.1,3.5,setosa\n6.2, 2.9 ,versicolor\n").unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.features[0], vec![5.1, 3.5]);
        assert_eq!(data.features[1], vec![6.2, 2.9]);
        assert_eq!(data.labels, vec!["setosa", "versicolor"]);
    }

    #[test]
    fn test_parse_drops_short_and_incomplete_rows() {
        let text = "1,2,A\nlonely\n\n3,,B\n4,5,\r\n6,7,C";
        let data = parse_dataset(text).unwrap();
        assert_eq!(data.labels, vec!["A", "C"]);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let data = parse_dataset("1,2,A\r\n3,4,B\r\n").unwrap();
        assert_eq!(data.labels, vec!["A", "B"]);
    }

    #[test]
    fn test_non_numeric_feature_becomes_nan() {
        let data = parse_dataset("abc,2,A").unwrap();
        assert!(data.features[0][0].is_nan());
        assert_eq!(data.features[0][1], 2.0);
    }

    #[test]
    fn test_leading_byte_order_mark_is_stripped() {
        let data = parse_dataset("\u{feff}5.1,3.5,A\n4.9,3.0,B\n").unwrap();
        assert_eq!(data.features[0], vec![5.1, 3.5]);
        assert_eq!(data.labels, vec!["A", "B"]);

        let data = parse_dataset("1,2,B\u{feff}\n").unwrap();
        assert_eq!(data.labels, vec!["B"]);
    }

    #[test]
    fn test_numeric_prefix_is_kept() {
        let data = parse_dataset("12cm,3,A").unwrap();
        assert_eq!(data.features[0], vec![12.0, 3.0]);
    }

    #[test]
    fn test_parse_number_prefixes() {
        assert_eq!(parse_number("-4.5kg"), -4.5);
        assert_eq!(parse_number("1e3x"), 1000.0);
        assert_eq!(parse_number("2e"), 2.0);
        assert_eq!(parse_number("7e+"), 7.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("5."), 5.0);
        assert_eq!(parse_number("1.2.3"), 1.2);
        assert_eq!(parse_number("+3"), 3.0);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_number("Infinityish"), f64::INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number(".").is_nan());
        assert!(parse_number("-").is_nan());
        assert!(parse_number("x12").is_nan());
    }

    #[test]
    fn test_infinities_survive_round_trip() {
        let original = parse_dataset("Infinity,-Infinity,A\n").unwrap();
        assert_eq!(original.features[0], vec![f64::INFINITY, f64::NEG_INFINITY]);
        assert_eq!(parse_dataset(&original.to_delimited_text()).unwrap(), original);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert_eq!(parse_dataset(""), Err(AnalysisError::EmptyDataset));
        assert_eq!(parse_dataset("only\n,\n  \n"), Err(AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let original = parse_dataset("0.1,2.5e3,-7,A\n3.14159,0,1e-9,B\n").unwrap();
        let reparsed = parse_dataset(&original.to_delimited_text()).unwrap();
        assert_eq!(original.labels, reparsed.labels);
        for (a, b) in original.features.iter().zip(reparsed.features.iter()) {
            for (x, y) in a.iter().zip(b.iter()) {
                assert!((x - y).abs() < 1e-12, "{} != {}", x, y);
            }
        }
    }
}
