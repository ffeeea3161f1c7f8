//! Line-oriented conversion.
//!
//! # Data Flow
//! ```text
//! textarea / stdin / JSON `data`
//!     → split into trimmed, non-empty lines
//!     → 2 tokens: encode (target route)
//!     → 1 token:  decode_stream (hex blob)
//!     → other:    format error row
//!     → Vec<ConversionRow> in input order
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::{self, DecodedRecord};
use crate::observability::metrics;

/// One line of output on the page, in the API and on the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionRow {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<DecodedRecord> for ConversionRow {
    fn from(record: DecodedRecord) -> Self {
        Self {
            target: Some(record.target),
            route: Some(record.route),
            hex: Some(record.hex),
            error: None,
        }
    }
}

/// How a single input line is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `target route`
    Pair(&'a str, &'a str),
    /// A hex blob with one or more records.
    Stream(&'a str),
    Invalid,
}

/// Classify a trimmed line by its whitespace-separated token count.
pub fn classify(line: &str) -> LineKind<'_> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(blob), None, None) => LineKind::Stream(blob),
        (Some(target), Some(route), None) => LineKind::Pair(target, route),
        _ => LineKind::Invalid,
    }
}

/// Convert every non-empty line of `input`.
pub fn convert(input: &str) -> Vec<ConversionRow> {
    let mut rows = Vec::new();
    for line in input.trim().lines().map(str::trim).filter(|l| !l.is_empty()) {
        convert_line(line, &mut rows);
    }
    rows
}

fn convert_line(line: &str, rows: &mut Vec<ConversionRow>) {
    match classify(line) {
        LineKind::Pair(target, route) => rows.push(encode_row(target, route)),
        LineKind::Stream(blob) => rows.extend(decode_rows(blob)),
        LineKind::Invalid => {
            metrics::record_conversion("line", "invalid_format");
            rows.push(ConversionRow {
                error: Some(format!("line format invalid: {line}")),
                ..Default::default()
            });
        }
    }
}

/// Encode one `target route` pair into a row carrying either `hex` or `error`.
pub fn encode_row(target: &str, route: &str) -> ConversionRow {
    let mut row = ConversionRow {
        target: Some(target.to_string()),
        route: Some(route.to_string()),
        ..Default::default()
    };
    match codec::encode(target, route) {
        Ok(hex) => {
            tracing::debug!(cidr = %target, route = %route, hex = %hex, "Encoded route");
            metrics::record_conversion("encode", "ok");
            row.hex = Some(hex);
        }
        Err(e) => {
            tracing::debug!(cidr = %target, route = %route, error = %e, "Encode failed");
            metrics::record_conversion("encode", e.kind());
            row.error = Some(e.to_string());
        }
    }
    row
}

/// Decode one blob into a row per record.
///
/// On failure the records decoded so far come first, then one error row
/// carrying the blob.
pub fn decode_rows(blob: &str) -> Vec<ConversionRow> {
    match codec::decode_stream(blob) {
        Ok(records) => {
            tracing::debug!(hex = %blob, records = records.len(), "Decoded stream");
            metrics::record_conversion("decode", "ok");
            metrics::record_decoded(records.len());
            records.into_iter().map(ConversionRow::from).collect()
        }
        Err(partial) => {
            let (records, error) = partial.into_parts();
            tracing::debug!(hex = %blob, records = records.len(), error = %error, "Decode failed");
            metrics::record_conversion("decode", error.kind());
            metrics::record_decoded(records.len());
            let mut rows: Vec<ConversionRow> = records.into_iter().map(ConversionRow::from).collect();
            rows.push(ConversionRow {
                hex: Some(blob.to_string()),
                error: Some(error.to_string()),
                ..Default::default()
            });
            rows
        }
    }
}
