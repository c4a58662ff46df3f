//! Request and response payloads of the document registration endpoint.

use serde::{Deserialize, Serialize};

/// A document submitted for registration.
///
/// The content is opaque to the client; fields are sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Format tag of the embedded product document
    pub document_format: String,
    /// Embedded product document content
    pub product_document: String,
    /// Product group
    pub product_group: String,
    /// Detached signature of the product document
    pub signature: String,
    /// Document type
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl Document {
    /// Create a document with every field set.
    pub fn new(
        document_format: impl Into<String>,
        product_document: impl Into<String>,
        product_group: impl Into<String>,
        signature: impl Into<String>,
        doc_type: impl Into<String>,
    ) -> Self {
        Self {
            document_format: document_format.into(),
            product_document: product_document.into(),
            product_group: product_group.into(),
            signature: signature.into(),
            doc_type: doc_type.into(),
        }
    }

    /// Set the document format.
    pub fn with_document_format(mut self, document_format: impl Into<String>) -> Self {
        self.document_format = document_format.into();
        self
    }

    /// Set the product document content.
    pub fn with_product_document(mut self, product_document: impl Into<String>) -> Self {
        self.product_document = product_document.into();
        self
    }

    /// Set the product group.
    pub fn with_product_group(mut self, product_group: impl Into<String>) -> Self {
        self.product_group = product_group.into();
        self
    }

    /// Set the signature.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Set the document type.
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = doc_type.into();
        self
    }
}

/// Successful registration result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Identifier assigned by the remote service
    #[serde(rename = "value")]
    pub doc_id: String,
}
