//! HTML view models.

use askama::Template;

use crate::convert::ConversionRow;

/// Table row as displayed; missing cells render empty.
#[derive(Debug, Clone, Default)]
pub struct RowView {
    pub target: String,
    pub route: String,
    pub hex: String,
    pub error: String,
}

impl From<ConversionRow> for RowView {
    fn from(row: ConversionRow) -> Self {
        Self {
            target: row.target.unwrap_or_default(),
            route: row.route.unwrap_or_default(),
            hex: row.hex.unwrap_or_default(),
            error: row.error.unwrap_or_default(),
        }
    }
}

/// The converter page: input form plus an optional results table.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageView {
    /// Echoed back into the textarea.
    pub input: String,
    pub rows: Vec<RowView>,
}

impl PageView {
    pub fn empty() -> Self {
        Self {
            input: String::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_results(input: impl Into<String>, rows: Vec<ConversionRow>) -> Self {
        Self {
            input: input.into(),
            rows: rows.into_iter().map(RowView::from).collect(),
        }
    }
}
