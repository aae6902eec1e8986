//! Message contracts between a host and a filter worker.
//!
//! Requests and responses serialize to JSON with camelCase keys. Pixel bytes
//! travel base64-encoded so a 4 MP image is one string rather than sixteen
//! million array elements.

use serde::{Deserialize, Serialize};
use tinter_core::PixelBuffer;

use crate::error::WorkerError;

/// A pixel buffer as carried over the wire.
///
/// No validation happens on decode; the boundary checks the length against
/// the dimensions before anything runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Interleaved RGBA bytes, base64 (standard alphabet) in JSON.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl From<PixelBuffer> for WireBuffer {
    fn from(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            data: buffer.data,
        }
    }
}

impl From<WireBuffer> for PixelBuffer {
    fn from(wire: WireBuffer) -> Self {
        PixelBuffer {
            width: wire.width,
            height: wire.height,
            data: wire.data,
        }
    }
}

/// A request to filter one image. Both fields must be present for the
/// request to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_data: Option<WireBuffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,
}

impl FilterRequest {
    pub fn new(buffer: PixelBuffer, filter_name: impl Into<String>) -> Self {
        Self {
            img_data: Some(buffer.into()),
            filter_name: Some(filter_name.into()),
        }
    }
}

/// Either the filtered image or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FilterOutcome {
    /// The filtered image, or the original when the filter name is unknown.
    Image(WireBuffer),
    /// The request could not be carried out.
    Error {
        /// Error description.
        message: String,
    },
}

/// The reply to a [`FilterRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResponse {
    pub result: FilterOutcome,
}

impl FilterResponse {
    pub fn image(buffer: PixelBuffer) -> Self {
        Self {
            result: FilterOutcome::Image(buffer.into()),
        }
    }

    pub fn error(err: &WorkerError) -> Self {
        Self {
            result: FilterOutcome::Error {
                message: err.to_string(),
            },
        }
    }

    /// The image, or the error message as [`WorkerError::Rejected`].
    pub fn into_image(self) -> Result<PixelBuffer, WorkerError> {
        match self.result {
            FilterOutcome::Image(wire) => Ok(wire.into()),
            FilterOutcome::Error { message } => Err(WorkerError::Rejected(message)),
        }
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_keys() {
        let request = FilterRequest::new(PixelBuffer::new(1, 1, vec![1, 2, 3, 4]).unwrap(), "dawn");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "imgData": { "width": 1, "height": 1, "data": "AQIDBA==" },
                "filterName": "dawn"
            })
        );
    }

    #[test]
    fn test_request_fields_are_optional() {
        let request: FilterRequest = serde_json::from_str(r#"{ "filterName": "bright" }"#).unwrap();
        assert!(request.img_data.is_none());
        assert_eq!(request.filter_name.as_deref(), Some("bright"));

        let request: FilterRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, FilterRequest::default());
    }

    #[test]
    fn test_bad_base64_fails_to_decode() {
        let result: Result<FilterRequest, _> = serde_json::from_str(
            r#"{ "imgData": { "width": 1, "height": 1, "data": "@@not base64@@" }, "filterName": "x" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_response_tagging() {
        let response = FilterResponse::error(&WorkerError::MalformedRequest);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "result": {
                    "type": "Error",
                    "data": { "message": "You must provide both imgData and filterName" }
                }
            })
        );

        let response = FilterResponse::image(PixelBuffer::blank(1, 1));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["result"]["type"], "Image");
        assert_eq!(json["result"]["data"]["data"], "AAAAAA==");
    }

    #[test]
    fn test_into_image_surfaces_error_message() {
        let err = FilterResponse::error(&WorkerError::MalformedRequest)
            .into_image()
            .unwrap_err();
        assert!(matches!(err, WorkerError::Rejected(msg) if msg.contains("imgData")));
    }
}
