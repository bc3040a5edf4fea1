//! JSON codec for form documents.
//!
//! The emitted artifact is the builder's export format: pretty-printed,
//! camelCase keys, one `type` tag per node selecting its kind fields.
//! Parsing trusts the input verbatim; factory defaults are never layered
//! onto imported nodes.

use thiserror::Error;

use crate::document::FormDocument;

/// Errors reported at the schema text boundary.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input is not a well-formed form schema.
    #[error("invalid form schema: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialize a document as the pretty-printed JSON export artifact.
/// Field order follows the model's declaration order.
#[must_use]
pub fn emit_document(doc: &FormDocument) -> String {
    // Serializing our own model cannot fail: every map key is a string.
    serde_json::to_string_pretty(doc).expect("document serialization is infallible")
}

/// Parse a document from JSON text.
pub fn parse_document(text: &str) -> Result<FormDocument, SchemaError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{self, NodeOverrides};
    use crate::model::ComponentType;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn emit_is_pretty_printed_camel_case() {
        let mut doc = FormDocument::default();
        doc.components.push(Arc::new(factory::create(
            ComponentType::PhoneNumber,
            NodeOverrides {
                key: Some("phone".to_string()),
                ..Default::default()
            },
        )));

        let text = emit_document(&doc);
        assert!(text.starts_with("{\n  \"title\""), "got: {}", &text[..40]);
        assert!(text.contains("\"type\": \"phoneNumber\""));
        assert!(text.contains("\"validateOn\": \"change\""));
        assert!(text.contains("\"submitButton\""));
    }

    #[test]
    fn emitted_document_parses_back_equal() {
        let mut doc = FormDocument::default();
        for ty in [
            ComponentType::Textfield,
            ComponentType::Datetime,
            ComponentType::Address,
            ComponentType::Tabs,
        ] {
            doc.components
                .push(Arc::new(factory::create(ty, NodeOverrides::default())));
        }

        let back = parse_document(&emit_document(&doc)).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = parse_document("{ not a schema").unwrap_err();
        assert!(err.to_string().starts_with("invalid form schema:"));
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let text = r#"{"components": [{"id": "x", "key": "x", "type": "signature"}]}"#;
        assert!(matches!(
            parse_document(text),
            Err(SchemaError::Parse(_))
        ));
    }

    #[test]
    fn missing_root_fields_fill_with_document_defaults() {
        let doc = parse_document(r#"{"components": []}"#).unwrap();
        assert_eq!(doc, FormDocument::default());
    }
}
