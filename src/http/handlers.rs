//! Request handlers for the converter page and JSON API.

use axum::{response::Response, Form, Json};
use serde::{Deserialize, Serialize};

use crate::codec::{self, DecodedRecord};
use crate::convert::{convert, ConversionRow};
use crate::http::response::{render_template, ApiError};
use crate::observability::metrics;
use crate::views::PageView;

/// Textarea contents posted by the page, also the JSON `/api/convert` body.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub rows: Vec<ConversionRow>,
}

#[derive(Debug, Deserialize)]
pub struct EncodeRequest {
    pub target: String,
    pub route: String,
}

#[derive(Debug, Serialize)]
pub struct EncodeResponse {
    pub target: String,
    pub route: String,
    pub hex: String,
}

#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    pub hex: String,
}

#[derive(Debug, Serialize)]
pub struct DecodeResponse {
    pub records: Vec<DecodedRecord>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET / — empty form.
pub async fn index() -> Response {
    render_template(PageView::empty())
}

/// POST / — convert the textarea and show the table.
pub async fn convert_form(Form(form): Form<ConvertRequest>) -> Response {
    let rows = convert(&form.data);
    tracing::debug!(rows = rows.len(), "Converted form input");
    render_template(PageView::with_results(form.data, rows))
}

/// POST /api/convert
pub async fn api_convert(Json(request): Json<ConvertRequest>) -> Json<ConvertResponse> {
    Json(ConvertResponse {
        rows: convert(&request.data),
    })
}

/// POST /api/encode
pub async fn api_encode(Json(request): Json<EncodeRequest>) -> Result<Json<EncodeResponse>, ApiError> {
    let hex = codec::encode(&request.target, &request.route).inspect_err(|e| {
        metrics::record_conversion("encode", e.kind());
    })?;
    metrics::record_conversion("encode", "ok");
    Ok(Json(EncodeResponse {
        target: request.target,
        route: request.route,
        hex,
    }))
}

/// POST /api/decode
pub async fn api_decode(Json(request): Json<DecodeRequest>) -> Result<Json<DecodeResponse>, ApiError> {
    let records = codec::decode_stream(&request.hex).inspect_err(|partial| {
        metrics::record_conversion("decode", partial.error.kind());
        metrics::record_decoded(partial.decoded.len());
    })?;
    metrics::record_conversion("decode", "ok");
    metrics::record_decoded(records.len());
    Ok(Json(DecodeResponse { records }))
}

/// GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
