//! JSON encoding of documents and decoding of registration responses.

use crate::Result;
use crate::error::SubmitError;
use crate::types::{Document, SubmissionResult};

/// Serialize a document into the request body.
pub fn encode_document(document: &Document) -> Result<String> {
    serde_json::to_string(document).map_err(SubmitError::Encoding)
}

/// Parse a successful response body.
///
/// Expects `{"value": "<doc id>"}`; other fields are ignored.
pub fn decode_response(body: &str) -> Result<SubmissionResult> {
    serde_json::from_str(body).map_err(|source| SubmitError::Decoding {
        source,
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_wire_field_names() {
        let document = Document::new(
            "MANUAL",
            "<base64 payload>",
            "milk",
            "sig==",
            "LP_INTRODUCE_GOODS",
        );
        let encoded = encode_document(&document).unwrap();
        let json: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "document_format": "MANUAL",
                "product_document": "<base64 payload>",
                "product_group": "milk",
                "signature": "sig==",
                "type": "LP_INTRODUCE_GOODS"
            })
        );
    }

    #[test]
    fn test_encode_default_document() {
        let encoded = encode_document(&Document::default()).unwrap();
        assert!(encoded.contains("\"type\":\"\""));
        assert!(encoded.contains("\"document_format\":\"\""));
    }

    #[test]
    fn test_decode_value() {
        let result = decode_response(r#"{"value": "abc123"}"#).unwrap();
        assert_eq!(result.doc_id, "abc123");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let result = decode_response(r#"{"value": "d-1", "status": "accepted"}"#).unwrap();
        assert_eq!(result.doc_id, "d-1");
    }

    #[test]
    fn test_decode_errors() {
        for body in ["", "not json", "{}", r#"{"value": 42}"#] {
            match decode_response(body) {
                Err(SubmitError::Decoding { body: raw, .. }) => assert_eq!(raw, body),
                other => panic!("expected decoding error for {body:?}, got {other:?}"),
            }
        }
    }
}
