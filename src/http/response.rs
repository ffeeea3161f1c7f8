//! Response construction.
//!
//! # Responsibilities
//! - Render HTML templates, falling back to a plain 500 on failure
//! - Map codec errors to `422 Unprocessable Entity` JSON bodies
//!
//! # Design Decisions
//! - Decode failures still carry the records decoded before the failure

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::codec::{CodecError, DecodedRecord, PartialDecode};

/// Render a template, logging and returning 500 if rendering fails.
pub fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering error").into_response()
        }
    }
}

/// JSON error body returned by the API.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<DecodedRecord>>,
}

/// A codec failure surfaced through the API.
#[derive(Debug)]
pub struct ApiError {
    error: CodecError,
    records: Option<Vec<DecodedRecord>>,
}

impl From<CodecError> for ApiError {
    fn from(error: CodecError) -> Self {
        Self {
            error,
            records: None,
        }
    }
}

impl From<PartialDecode> for ApiError {
    fn from(partial: PartialDecode) -> Self {
        let (records, error) = partial.into_parts();
        Self {
            error,
            records: Some(records),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            kind: self.error.kind(),
            error: self.error.to_string(),
            records: self.records,
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_stream;

    #[test]
    fn test_api_error_status() {
        let err = ApiError::from(CodecError::TruncatedStream { offset: 0 });
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_partial_decode_keeps_records() {
        let partial = decode_stream("0x000a00000108").unwrap_err();
        let err = ApiError::from(partial);
        assert_eq!(err.records.as_ref().map(Vec::len), Some(1));
        assert_eq!(err.error.kind(), "truncated_record");
    }
}
