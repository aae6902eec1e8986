//! Request validation and dispatch into the filter engine.

use std::borrow::Cow;

use tinter_core::{FilterTable, PixelBuffer, apply_filter};

use crate::error::WorkerError;
use crate::messages::{FilterRequest, FilterResponse};

/// Run one request to completion.
///
/// A request needs a valid buffer and a non-empty filter name, otherwise the
/// response is [`WorkerError::MalformedRequest`]. An unknown filter name
/// returns the original buffer. Never panics; every failure becomes an
/// error response.
pub fn handle_request(request: FilterRequest, table: &FilterTable) -> FilterResponse {
    match process(request, table) {
        Ok(buffer) => FilterResponse::image(buffer),
        Err(err) => {
            tracing::warn!("filter request failed: {err}");
            FilterResponse::error(&err)
        }
    }
}

/// Same as [`handle_request`] over a JSON envelope.
///
/// A body that does not parse is answered like any other malformed request.
pub fn handle_json(json: &str, table: &FilterTable) -> Result<String, WorkerError> {
    let response = match decode_request(json) {
        Ok(request) => handle_request(request, table),
        Err(response) => response,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Parse a JSON request, or produce the malformed-request response for it.
pub(crate) fn decode_request(json: &str) -> Result<FilterRequest, FilterResponse> {
    serde_json::from_str(json).map_err(|err| {
        tracing::warn!("unparseable filter request: {err}");
        FilterResponse::error(&WorkerError::MalformedRequest)
    })
}

fn process(request: FilterRequest, table: &FilterTable) -> Result<PixelBuffer, WorkerError> {
    let FilterRequest {
        img_data: Some(wire),
        filter_name: Some(name),
    } = request
    else {
        return Err(WorkerError::MalformedRequest);
    };
    if name.is_empty() {
        return Err(WorkerError::MalformedRequest);
    }

    let buffer = PixelBuffer::from(wire);
    if !buffer.is_valid() {
        return Err(WorkerError::MalformedRequest);
    }

    let filtered = match apply_filter(&buffer, &name, table)? {
        Cow::Owned(out) => Some(out),
        Cow::Borrowed(_) => None,
    };
    Ok(filtered.unwrap_or(buffer))
}
