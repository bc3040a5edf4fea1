//! Integration tests: parse → emit → parse round-trips (formcraft-core).
//!
//! The exported artifact must reload into the exact same document, ids
//! and all, and parsing must never invent content a hand-edited schema
//! left out.

use formcraft_core::codec::{SchemaError, emit_document, parse_document};
use formcraft_core::tree;
use formcraft_core::{ComponentId, ComponentType, FieldKind, FormDocument, ValidationRules};
use pretty_assertions::assert_eq;

const CONTACT_FORM: &str = include_str!("fixtures/contact_form.json");
const HAND_EDITED: &str = include_str!("fixtures/hand_edited.json");

fn parse_fixture(text: &str) -> FormDocument {
    parse_document(text).expect("fixture parses")
}

fn assert_roundtrip_preserves(text: &str) -> FormDocument {
    let first = parse_fixture(text);
    let emitted = emit_document(&first);
    let second = parse_document(&emitted).expect("emitted schema parses");
    assert_eq!(second, first, "document changed across emit/parse");
    second
}

fn all_ids(doc: &FormDocument) -> Vec<String> {
    let mut ids = Vec::new();
    tree::walk(&doc.components, &mut |node| ids.push(node.id.to_string()));
    ids
}

// ─── Full artifact round-trip ────────────────────────────────────────────

#[test]
fn contact_form_roundtrips() {
    let doc = assert_roundtrip_preserves(CONTACT_FORM);

    assert_eq!(doc.title, "Contact Us");
    assert_eq!(doc.components.len(), 10);
    assert_eq!(doc.settings.submit_button.text, "Send");

    let message = tree::find(&doc.components, &ComponentId::from("field-message"))
        .expect("nested textarea is reachable");
    assert_eq!(message.component_type(), ComponentType::Textarea);
    assert!(message.required);
}

#[test]
fn every_id_survives_roundtrip() {
    let first = parse_fixture(CONTACT_FORM);
    let second = parse_document(&emit_document(&first)).unwrap();

    let ids = all_ids(&first);
    assert_eq!(ids.len(), 17, "fixture node count drifted");
    assert_eq!(all_ids(&second), ids);
}

#[test]
fn editor_metadata_survives_roundtrip() {
    let doc = assert_roundtrip_preserves(CONTACT_FORM);

    let other = tree::find(&doc.components, &ComponentId::from("field-other")).unwrap();
    let cond = other.conditional.as_ref().expect("conditional is kept");
    assert_eq!(cond.when, "contactChannel");
    assert_eq!(cond.operator, "eq");
    assert_eq!(cond.value, "other");

    let name = tree::find(&doc.components, &ComponentId::from("field-name")).unwrap();
    let display = name.display.as_ref().expect("display options are kept");
    assert_eq!(display.tooltip, "Legal name");

    let subscribe = tree::find(&doc.components, &ComponentId::from("field-subscribe")).unwrap();
    assert_eq!(subscribe.clear_on_hide, Some(true));
}

// ─── Hand-edited input ───────────────────────────────────────────────────

#[test]
fn partial_schema_loads_without_invented_content() {
    let doc = assert_roundtrip_preserves(HAND_EDITED);

    match &doc.components[0].kind {
        FieldKind::Radio { values, .. } => {
            assert!(values.is_empty(), "parse must not add placeholder options");
        }
        other => panic!("expected radio, got {other:?}"),
    }
    match &doc.components[1].kind {
        FieldKind::Textfield {
            input_type,
            validate,
            ..
        } => {
            assert_eq!(input_type, "text");
            assert_eq!(validate, &ValidationRules::default());
        }
        other => panic!("expected textfield, got {other:?}"),
    }
}

#[test]
fn absent_optionals_stay_off_the_wire() {
    let doc = parse_fixture(HAND_EDITED);
    let emitted: serde_json::Value = serde_json::from_str(&emit_document(&doc)).unwrap();

    let q1 = &emitted["components"][0];
    assert_eq!(q1["values"], serde_json::json!([]));
    assert!(q1.get("conditional").is_none());
    assert!(q1.get("clearOnHide").is_none());
    // Structural fields still emit their zero values.
    assert_eq!(q1["defaultValue"], "");
}

#[test]
fn missing_root_fields_fill_with_blank_document_values() {
    let doc = parse_fixture(HAND_EDITED);
    assert_eq!(doc.title, "Quick Survey");
    assert_eq!(doc.description, "");
    assert_eq!(doc.display, "form");
    assert_eq!(doc.settings.submit_button.text, "Submit");
}

// ─── Rejected input ──────────────────────────────────────────────────────

#[test]
fn malformed_text_is_a_parse_error() {
    let err = parse_document("{ \"title\": ").unwrap_err();
    assert!(matches!(err, SchemaError::Parse(_)));
    assert!(err.to_string().starts_with("invalid form schema:"));
}

#[test]
fn unknown_component_type_is_rejected() {
    let text = r#"{"components": [{"id": "s1", "key": "sig", "type": "signature"}]}"#;
    assert!(parse_document(text).is_err());
}

// ─── Emitted shape ───────────────────────────────────────────────────────

#[test]
fn emit_shape_is_the_export_artifact() {
    let emitted = emit_document(&parse_fixture(CONTACT_FORM));
    assert!(emitted.starts_with("{\n  \"title\": \"Contact Us\""));
    assert!(emitted.contains("\"type\": \"radio\""));
    assert!(emitted.contains("\"submitButton\""));
}
