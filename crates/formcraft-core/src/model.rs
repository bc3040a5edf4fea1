//! Form schema data model.
//!
//! A form is a tree of `SchemaNode` values. Child lists hold
//! `Arc<SchemaNode>`, so an edit rebuilds only the path from the root to
//! the touched node and shares every other subtree with the previous
//! version of the tree. That makes document snapshots cheap enough to keep
//! one per history entry.
//!
//! Serialization follows the builder's JSON artifact: camelCase keys and a
//! `type` tag selecting which per-kind fields are present on a node.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::id::ComponentId;

// ─── Component types ─────────────────────────────────────────────────────

/// The closed set of component type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    Textfield,
    Textarea,
    Number,
    Checkbox,
    Selectboxes,
    Select,
    Radio,
    Email,
    PhoneNumber,
    Datetime,
    Address,
    Content,
    Button,
    Panel,
    Columns,
    Tabs,
}

impl ComponentType {
    /// Every type, in palette order (fields first, then layout containers).
    pub const ALL: [ComponentType; 16] = [
        ComponentType::Textfield,
        ComponentType::Textarea,
        ComponentType::Number,
        ComponentType::Checkbox,
        ComponentType::Selectboxes,
        ComponentType::Select,
        ComponentType::Radio,
        ComponentType::Email,
        ComponentType::PhoneNumber,
        ComponentType::Datetime,
        ComponentType::Address,
        ComponentType::Content,
        ComponentType::Button,
        ComponentType::Panel,
        ComponentType::Columns,
        ComponentType::Tabs,
    ];

    /// The wire tag for this type (the `type` field value).
    pub fn as_tag(self) -> &'static str {
        match self {
            ComponentType::Textfield => "textfield",
            ComponentType::Textarea => "textarea",
            ComponentType::Number => "number",
            ComponentType::Checkbox => "checkbox",
            ComponentType::Selectboxes => "selectboxes",
            ComponentType::Select => "select",
            ComponentType::Radio => "radio",
            ComponentType::Email => "email",
            ComponentType::PhoneNumber => "phoneNumber",
            ComponentType::Datetime => "datetime",
            ComponentType::Address => "address",
            ComponentType::Content => "content",
            ComponentType::Button => "button",
            ComponentType::Panel => "panel",
            ComponentType::Columns => "columns",
            ComponentType::Tabs => "tabs",
        }
    }

    /// Resolve a wire tag. None for tags outside the closed set; callers at
    /// the string boundary (palette drops, tests) decide how to surface it.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_tag() == tag)
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ─── Validation metadata ─────────────────────────────────────────────────

/// Validation constraints stored on a field. Stored and round-tripped,
/// never executed here. `None` fields stay off the wire so each field type
/// keeps its own `validate` shape (text fields carry minLength/maxLength,
/// number and datetime carry min/max).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationRules {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

// ─── Option lists & select data ──────────────────────────────────────────

/// One selectable option for radio / selectboxes / select fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionItem {
    pub label: String,
    pub value: String,
}

impl OptionItem {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Data source block of a `select` field. `url`/`resource`/`custom` are
/// set by the API property panel when `dataSrc` is not "values".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectData {
    pub values: SmallVec<[OptionItem; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

// ─── Container parts ─────────────────────────────────────────────────────

/// A labeled pane inside a `tabs` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabPane {
    pub label: String,
    pub components: Vec<Arc<SchemaNode>>,
}

impl TabPane {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            components: Vec::new(),
        }
    }
}

/// One column inside a `columns` container. Widths address the 12-part
/// grid the renderer lays columns out on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub components: Vec<Arc<SchemaNode>>,
    pub width: u32,
    pub offset: u32,
    pub push: u32,
    pub pull: u32,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            width: 6,
            offset: 0,
            push: 0,
            pull: 0,
        }
    }
}

/// One address sub-field definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubField {
    pub label: String,
    pub key: String,
    pub placeholder: String,
    pub required: bool,
}

impl SubField {
    pub fn new(label: &str, key: &str, placeholder: &str) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            placeholder: placeholder.to_string(),
            required: false,
        }
    }
}

/// The six fixed sub-fields of an `address` component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressFields {
    pub address1: SubField,
    pub address2: SubField,
    pub city: SubField,
    pub state: SubField,
    pub zip: SubField,
    pub country: SubField,
}

// ─── Editor-added metadata ───────────────────────────────────────────────

/// Conditional-visibility metadata from the conditional property panel.
/// Stored for the renderer; the engine never evaluates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Conditional {
    pub show: bool,
    /// Key of the component whose value drives the condition.
    pub when: String,
    pub operator: String,
    pub value: String,
    /// Custom JSON logic, used instead of when/operator/value if set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub json: String,
}

impl Default for Conditional {
    fn default() -> Self {
        Self {
            show: true,
            when: String::new(),
            operator: "eq".to_string(),
            value: String::new(),
            json: String::new(),
        }
    }
}

/// Per-field display tuning from the display property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOptions {
    pub label_position: String,
    pub label_width: u32,
    pub label_margin: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tooltip: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            label_position: "top".to_string(),
            label_width: 30,
            label_margin: 3,
            tooltip: String::new(),
            class_name: String::new(),
        }
    }
}

// ─── Field kinds ─────────────────────────────────────────────────────────

/// Per-kind payload of a schema node, selected by the `type` tag.
/// Container kinds (`panel`, `tabs`, `columns`) own their child lists here.
///
/// Scalar knobs whose zero value would invert the renderer's documented
/// default (`enableDate`, `disableOnInvalid`, `rows`, ...) parse through a
/// default function instead of the type's zero, so a hand-edited schema
/// that omits them keeps its meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum FieldKind {
    Textfield {
        #[serde(default = "default_input_type")]
        input_type: String,
        #[serde(default = "default_validate_on")]
        validate_on: String,
        #[serde(default)]
        validate: ValidationRules,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Textarea {
        #[serde(default)]
        auto_expand: bool,
        #[serde(default = "default_rows")]
        rows: u32,
        #[serde(default)]
        validate: ValidationRules,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Number {
        #[serde(default)]
        validate: ValidationRules,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Checkbox {
        #[serde(default)]
        value: bool,
        #[serde(default)]
        default_value: bool,
    },
    Selectboxes {
        #[serde(default)]
        values: SmallVec<[OptionItem; 3]>,
        /// Checked state keyed by option value.
        #[serde(default)]
        default_value: BTreeMap<String, bool>,
        #[serde(default)]
        inline: bool,
    },
    Select {
        #[serde(default)]
        data: SelectData,
        #[serde(default = "default_data_src")]
        data_src: String,
        #[serde(default)]
        default_value: String,
        #[serde(default)]
        multiple: bool,
    },
    Radio {
        #[serde(default)]
        values: SmallVec<[OptionItem; 3]>,
        #[serde(default)]
        default_value: String,
        #[serde(default)]
        inline: bool,
    },
    Email {
        #[serde(default = "default_validate_on")]
        validate_on: String,
        #[serde(default)]
        validate: ValidationRules,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    PhoneNumber {
        #[serde(default = "default_validate_on")]
        validate_on: String,
        #[serde(default)]
        validate: ValidationRules,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Datetime {
        #[serde(default = "default_date_format")]
        format: String,
        #[serde(default)]
        enable_time: bool,
        #[serde(default = "default_true")]
        enable_date: bool,
        #[serde(default)]
        default_value: String,
        #[serde(default = "default_datepicker_mode")]
        datepicker_mode: String,
        #[serde(default)]
        validate: ValidationRules,
    },
    Address {
        #[serde(default = "default_address_provider")]
        provider: String,
        #[serde(default)]
        manual_mode: bool,
        #[serde(default)]
        components: AddressFields,
    },
    Content {
        #[serde(default)]
        html: String,
    },
    Button {
        #[serde(default = "default_button_action")]
        action: String,
        #[serde(default = "default_button_theme")]
        theme: String,
        #[serde(default = "default_button_size")]
        size: String,
        #[serde(default)]
        block: bool,
        #[serde(default = "default_true")]
        disable_on_invalid: bool,
    },
    Panel {
        #[serde(default)]
        title: String,
        #[serde(default)]
        collapsible: bool,
        #[serde(default)]
        collapsed: bool,
        #[serde(default)]
        components: Vec<Arc<SchemaNode>>,
    },
    Columns {
        #[serde(default)]
        columns: SmallVec<[Column; 2]>,
    },
    Tabs {
        #[serde(default)]
        tabs: SmallVec<[TabPane; 2]>,
    },
}

impl FieldKind {
    /// The type tag this payload belongs to.
    pub fn component_type(&self) -> ComponentType {
        match self {
            FieldKind::Textfield { .. } => ComponentType::Textfield,
            FieldKind::Textarea { .. } => ComponentType::Textarea,
            FieldKind::Number { .. } => ComponentType::Number,
            FieldKind::Checkbox { .. } => ComponentType::Checkbox,
            FieldKind::Selectboxes { .. } => ComponentType::Selectboxes,
            FieldKind::Select { .. } => ComponentType::Select,
            FieldKind::Radio { .. } => ComponentType::Radio,
            FieldKind::Email { .. } => ComponentType::Email,
            FieldKind::PhoneNumber { .. } => ComponentType::PhoneNumber,
            FieldKind::Datetime { .. } => ComponentType::Datetime,
            FieldKind::Address { .. } => ComponentType::Address,
            FieldKind::Content { .. } => ComponentType::Content,
            FieldKind::Button { .. } => ComponentType::Button,
            FieldKind::Panel { .. } => ComponentType::Panel,
            FieldKind::Columns { .. } => ComponentType::Columns,
            FieldKind::Tabs { .. } => ComponentType::Tabs,
        }
    }

    /// True for kinds that own nested component lists.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            FieldKind::Panel { .. } | FieldKind::Tabs { .. } | FieldKind::Columns { .. }
        )
    }
}

fn default_true() -> bool {
    true
}

fn default_input_type() -> String {
    "text".to_string()
}

fn default_validate_on() -> String {
    "change".to_string()
}

fn default_rows() -> u32 {
    3
}

fn default_data_src() -> String {
    "values".to_string()
}

fn default_date_format() -> String {
    "yyyy-MM-dd".to_string()
}

fn default_datepicker_mode() -> String {
    "day".to_string()
}

fn default_address_provider() -> String {
    "google".to_string()
}

fn default_button_action() -> String {
    "submit".to_string()
}

fn default_button_theme() -> String {
    "primary".to_string()
}

fn default_button_size() -> String {
    "md".to_string()
}

// ─── Schema nodes ────────────────────────────────────────────────────────

/// One element of the form tree.
///
/// The common fields are always present on the wire. The `Option` fields
/// appear only after a property-panel edit sets them and are skipped while
/// `None`, so importing a schema that never had them re-exports without
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(default)]
    pub id: ComponentId,
    /// Machine name used as the API property in submissions. Not
    /// validated or deduplicated on write; `lint_document` reports
    /// violations.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_on_hide: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    /// Calculated-value expression; stored, never evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculate_value: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl SchemaNode {
    /// Bare node with empty display strings. The factory layers the
    /// per-type defaults on top of this.
    pub fn new(id: ComponentId, key: String, label: String, kind: FieldKind) -> Self {
        Self {
            id,
            key,
            label,
            placeholder: String::new(),
            description: String::new(),
            required: false,
            conditional: None,
            display: None,
            clear_on_hide: None,
            persistent: None,
            protected: None,
            calculate_value: None,
            kind,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }
}

// ─── Key handling ────────────────────────────────────────────────────────

/// True when `key` is a valid machine name: letters, digits, and
/// underscore only, non-empty.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Collapse a raw label or user-typed key into a machine name: whitespace
/// runs become a single `_`, every other invalid character is dropped.
pub fn sanitize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            in_space = false;
            if c.is_ascii_alphanumeric() || c == '_' {
                out.push(c);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tag_roundtrip_covers_every_type() {
        for ty in ComponentType::ALL {
            assert_eq!(ComponentType::from_tag(ty.as_tag()), Some(ty));
        }
        assert_eq!(ComponentType::from_tag("signature"), None);
    }

    #[test]
    fn phone_number_tag_is_camel_case() {
        assert_eq!(ComponentType::PhoneNumber.as_tag(), "phoneNumber");
        assert_eq!(ComponentType::PhoneNumber.to_string(), "phoneNumber");
    }

    #[test]
    fn node_serializes_with_flattened_type_tag() {
        let node = SchemaNode::new(
            ComponentId::from("n1"),
            "email1".to_string(),
            "Email".to_string(),
            FieldKind::Email {
                validate_on: "change".to_string(),
                validate: ValidationRules::default(),
                default_value: None,
            },
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "email");
        assert_eq!(json["validateOn"], "change");
        assert_eq!(json["key"], "email1");
        // Unset editor metadata stays off the wire.
        assert!(json.get("conditional").is_none());
        assert!(json.get("clearOnHide").is_none());
    }

    #[test]
    fn partial_node_parses_without_factory_content() {
        // A hand-edited radio with no option list stays empty: parsing
        // never invents placeholder options.
        let node: SchemaNode =
            serde_json::from_str(r#"{"id":"r1","type":"radio","key":"choice"}"#).unwrap();
        match &node.kind {
            FieldKind::Radio { values, .. } => assert!(values.is_empty()),
            other => panic!("expected radio, got {other:?}"),
        }
        assert_eq!(node.label, "");
    }

    #[test]
    fn partial_datetime_keeps_documented_defaults() {
        let node: SchemaNode =
            serde_json::from_str(r#"{"id":"d1","type":"datetime","key":"when"}"#).unwrap();
        match &node.kind {
            FieldKind::Datetime {
                enable_date,
                enable_time,
                format,
                ..
            } => {
                assert!(enable_date, "date stays enabled when omitted");
                assert!(!enable_time);
                assert_eq!(format, "yyyy-MM-dd");
            }
            other => panic!("expected datetime, got {other:?}"),
        }
    }

    #[test]
    fn is_valid_key_rules() {
        assert!(is_valid_key("firstName"));
        assert!(is_valid_key("field_9"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("first name"));
        assert!(!is_valid_key("e-mail"));
    }

    #[test]
    fn sanitize_key_mirrors_panel_behavior() {
        assert_eq!(sanitize_key("First Name"), "First_Name");
        assert_eq!(sanitize_key(" a  b "), "_a_b_");
        assert_eq!(sanitize_key("e-mail!"), "email");
        assert_eq!(sanitize_key("already_valid9"), "already_valid9");
    }

    #[test]
    fn container_detection() {
        let panel = FieldKind::Panel {
            title: "Panel".to_string(),
            collapsible: false,
            collapsed: false,
            components: Vec::new(),
        };
        assert!(panel.is_container());
        assert!(
            !FieldKind::Content {
                html: String::new()
            }
            .is_container()
        );
    }
}
