//! Shallow-merge patches for nodes and document metadata.
//!
//! A patch is an all-`Option` mirror of the editable fields: only `Some`
//! fields overwrite, everything else keeps its current value. Kind-specific
//! fields apply only where the node's kind actually carries them; a patch
//! aimed at the wrong kind (stale property-panel state) merges its common
//! fields and silently drops the rest.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::document::{FormDocument, FormSettings};
use crate::model::{
    Column, Conditional, DisplayOptions, FieldKind, OptionItem, SchemaNode, SelectData, TabPane,
    ValidationRules,
};

// ─── Default values ──────────────────────────────────────────────────────

/// A default value as supplied by the API property panel. Its JSON shape
/// depends on the field kind, so the patch carries an untagged union and
/// `apply` matches it against the node's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Checked(bool),
    Text(String),
    Boxes(BTreeMap<String, bool>),
}

// ─── Node patches ────────────────────────────────────────────────────────

/// Editable-field inventory of the property panels, as a shallow patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodePatch {
    // Common fields
    pub key: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub conditional: Option<Conditional>,
    pub display: Option<DisplayOptions>,
    pub clear_on_hide: Option<bool>,
    pub persistent: Option<bool>,
    pub protected: Option<bool>,
    pub calculate_value: Option<String>,

    // Kind-specific fields
    pub validate: Option<ValidationRules>,
    pub validate_on: Option<String>,
    pub values: Option<SmallVec<[OptionItem; 3]>>,
    pub data: Option<SelectData>,
    pub data_src: Option<String>,
    pub default_value: Option<DefaultValue>,
    pub inline: Option<bool>,
    pub multiple: Option<bool>,
    pub auto_expand: Option<bool>,
    pub rows: Option<u32>,
    pub html: Option<String>,
    pub title: Option<String>,
    pub collapsible: Option<bool>,
    pub collapsed: Option<bool>,
    pub action: Option<String>,
    pub theme: Option<String>,
    pub size: Option<String>,
    pub block: Option<bool>,
    pub disable_on_invalid: Option<bool>,
    pub columns: Option<SmallVec<[Column; 2]>>,
    pub tabs: Option<SmallVec<[TabPane; 2]>>,
}

impl NodePatch {
    /// Shallow-merge this patch onto `node`.
    pub fn apply(&self, node: &mut SchemaNode) {
        self.apply_common(node);
        self.apply_kind(node);
    }

    fn apply_common(&self, node: &mut SchemaNode) {
        if let Some(v) = &self.key {
            node.key = v.clone();
        }
        if let Some(v) = &self.label {
            node.label = v.clone();
        }
        if let Some(v) = &self.placeholder {
            node.placeholder = v.clone();
        }
        if let Some(v) = &self.description {
            node.description = v.clone();
        }
        if let Some(v) = self.required {
            node.required = v;
        }
        if let Some(v) = &self.conditional {
            node.conditional = Some(v.clone());
        }
        if let Some(v) = &self.display {
            node.display = Some(v.clone());
        }
        if let Some(v) = self.clear_on_hide {
            node.clear_on_hide = Some(v);
        }
        if let Some(v) = self.persistent {
            node.persistent = Some(v);
        }
        if let Some(v) = self.protected {
            node.protected = Some(v);
        }
        if let Some(v) = &self.calculate_value {
            node.calculate_value = Some(v.clone());
        }
    }

    fn apply_kind(&self, node: &mut SchemaNode) {
        if let Some(v) = &self.validate {
            match &mut node.kind {
                FieldKind::Textfield { validate, .. }
                | FieldKind::Textarea { validate, .. }
                | FieldKind::Number { validate, .. }
                | FieldKind::Email { validate, .. }
                | FieldKind::PhoneNumber { validate, .. }
                | FieldKind::Datetime { validate, .. } => *validate = v.clone(),
                _ => {}
            }
        }
        if let Some(v) = &self.validate_on {
            match &mut node.kind {
                FieldKind::Textfield { validate_on, .. }
                | FieldKind::Email { validate_on, .. }
                | FieldKind::PhoneNumber { validate_on, .. } => *validate_on = v.clone(),
                _ => {}
            }
        }
        if let Some(v) = &self.values {
            match &mut node.kind {
                FieldKind::Selectboxes { values, .. } | FieldKind::Radio { values, .. } => {
                    *values = v.clone();
                }
                _ => {}
            }
        }
        if let Some(v) = &self.data
            && let FieldKind::Select { data, .. } = &mut node.kind
        {
            *data = v.clone();
        }
        if let Some(v) = &self.data_src
            && let FieldKind::Select { data_src, .. } = &mut node.kind
        {
            *data_src = v.clone();
        }
        if let Some(v) = &self.default_value {
            self.apply_default_value(v, node);
        }
        if let Some(v) = self.inline {
            match &mut node.kind {
                FieldKind::Selectboxes { inline, .. } | FieldKind::Radio { inline, .. } => {
                    *inline = v;
                }
                _ => {}
            }
        }
        if let Some(v) = self.multiple
            && let FieldKind::Select { multiple, .. } = &mut node.kind
        {
            *multiple = v;
        }
        if let Some(v) = self.auto_expand
            && let FieldKind::Textarea { auto_expand, .. } = &mut node.kind
        {
            *auto_expand = v;
        }
        if let Some(v) = self.rows
            && let FieldKind::Textarea { rows, .. } = &mut node.kind
        {
            *rows = v;
        }
        if let Some(v) = &self.html
            && let FieldKind::Content { html } = &mut node.kind
        {
            *html = v.clone();
        }
        if let Some(v) = &self.title
            && let FieldKind::Panel { title, .. } = &mut node.kind
        {
            *title = v.clone();
        }
        if let Some(v) = self.collapsible
            && let FieldKind::Panel { collapsible, .. } = &mut node.kind
        {
            *collapsible = v;
        }
        if let Some(v) = self.collapsed
            && let FieldKind::Panel { collapsed, .. } = &mut node.kind
        {
            *collapsed = v;
        }
        if let Some(v) = &self.action
            && let FieldKind::Button { action, .. } = &mut node.kind
        {
            *action = v.clone();
        }
        if let Some(v) = &self.theme
            && let FieldKind::Button { theme, .. } = &mut node.kind
        {
            *theme = v.clone();
        }
        if let Some(v) = &self.size
            && let FieldKind::Button { size, .. } = &mut node.kind
        {
            *size = v.clone();
        }
        if let Some(v) = self.block
            && let FieldKind::Button { block, .. } = &mut node.kind
        {
            *block = v;
        }
        if let Some(v) = self.disable_on_invalid
            && let FieldKind::Button {
                disable_on_invalid, ..
            } = &mut node.kind
        {
            *disable_on_invalid = v;
        }
        if let Some(v) = &self.columns
            && let FieldKind::Columns { columns } = &mut node.kind
        {
            *columns = v.clone();
        }
        if let Some(v) = &self.tabs
            && let FieldKind::Tabs { tabs } = &mut node.kind
        {
            *tabs = v.clone();
        }
    }

    fn apply_default_value(&self, value: &DefaultValue, node: &mut SchemaNode) {
        match (value, &mut node.kind) {
            (DefaultValue::Checked(b), FieldKind::Checkbox { default_value, .. }) => {
                *default_value = *b;
            }
            (DefaultValue::Boxes(m), FieldKind::Selectboxes { default_value, .. }) => {
                *default_value = m.clone();
            }
            (
                DefaultValue::Text(s),
                FieldKind::Select { default_value, .. }
                | FieldKind::Radio { default_value, .. }
                | FieldKind::Datetime { default_value, .. },
            ) => {
                *default_value = s.clone();
            }
            (
                DefaultValue::Text(s),
                FieldKind::Textfield { default_value, .. }
                | FieldKind::Textarea { default_value, .. }
                | FieldKind::Number { default_value, .. }
                | FieldKind::Email { default_value, .. }
                | FieldKind::PhoneNumber { default_value, .. },
            ) => {
                *default_value = Some(s.clone());
            }
            // Shape mismatch for the node's kind: drop it.
            _ => {}
        }
    }
}

// ─── Document metadata patches ───────────────────────────────────────────

/// Shallow patch over the document's root metadata. Never touches the
/// component list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub display: Option<String>,
    pub settings: Option<FormSettings>,
}

impl MetadataPatch {
    /// Shallow-merge this patch onto `doc`.
    pub fn apply(&self, doc: &mut FormDocument) {
        if let Some(v) = &self.title {
            doc.title = v.clone();
        }
        if let Some(v) = &self.description {
            doc.description = v.clone();
        }
        if let Some(v) = &self.display {
            doc.display = v.clone();
        }
        if let Some(v) = &self.settings {
            doc.settings = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{self, NodeOverrides};
    use crate::model::ComponentType;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_some_fields_overwrite() {
        let mut node = factory::create(ComponentType::Textfield, NodeOverrides::default());
        let original_key = node.key.clone();

        let patch = NodePatch {
            label: Some("Full Name".to_string()),
            ..Default::default()
        };
        patch.apply(&mut node);

        assert_eq!(node.label, "Full Name");
        assert_eq!(node.key, original_key);
        assert!(!node.required);
    }

    #[test]
    fn validate_patch_replaces_wholesale() {
        let mut node = factory::create(ComponentType::Textfield, NodeOverrides::default());
        let patch = NodePatch {
            validate: Some(ValidationRules {
                required: true,
                min_length: Some("2".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        patch.apply(&mut node);

        match &node.kind {
            FieldKind::Textfield { validate, .. } => {
                assert!(validate.required);
                assert_eq!(validate.min_length.as_deref(), Some("2"));
                // Wholesale replacement: the factory's empty pattern is gone.
                assert_eq!(validate.pattern, None);
            }
            other => panic!("expected textfield, got {other:?}"),
        }
    }

    #[test]
    fn kind_mismatch_is_dropped() {
        let mut node = factory::create(ComponentType::Textfield, NodeOverrides::default());
        let before = node.kind.clone();

        let patch = NodePatch {
            html: Some("<p>ignored</p>".to_string()),
            rows: Some(10),
            ..Default::default()
        };
        patch.apply(&mut node);

        assert_eq!(node.kind, before);
    }

    #[test]
    fn default_value_matches_kind_shape() {
        let mut checkbox = factory::create(ComponentType::Checkbox, NodeOverrides::default());
        NodePatch {
            default_value: Some(DefaultValue::Checked(true)),
            ..Default::default()
        }
        .apply(&mut checkbox);
        match &checkbox.kind {
            FieldKind::Checkbox { default_value, .. } => assert!(*default_value),
            other => panic!("expected checkbox, got {other:?}"),
        }

        let mut select = factory::create(ComponentType::Select, NodeOverrides::default());
        NodePatch {
            default_value: Some(DefaultValue::Text("option2".to_string())),
            ..Default::default()
        }
        .apply(&mut select);
        match &select.kind {
            FieldKind::Select { default_value, .. } => assert_eq!(default_value, "option2"),
            other => panic!("expected select, got {other:?}"),
        }

        let mut textfield = factory::create(ComponentType::Textfield, NodeOverrides::default());
        NodePatch {
            default_value: Some(DefaultValue::Text("hello".to_string())),
            ..Default::default()
        }
        .apply(&mut textfield);
        match &textfield.kind {
            FieldKind::Textfield { default_value, .. } => {
                assert_eq!(default_value.as_deref(), Some("hello"));
            }
            other => panic!("expected textfield, got {other:?}"),
        }

        // Boxes shape on a checkbox does not apply.
        let mut checkbox2 = factory::create(ComponentType::Checkbox, NodeOverrides::default());
        let before = checkbox2.kind.clone();
        NodePatch {
            default_value: Some(DefaultValue::Boxes(BTreeMap::new())),
            ..Default::default()
        }
        .apply(&mut checkbox2);
        assert_eq!(checkbox2.kind, before);
    }

    #[test]
    fn metadata_patch_merges_root_fields() {
        let mut doc = FormDocument::default();
        MetadataPatch {
            title: Some("Survey".to_string()),
            ..Default::default()
        }
        .apply(&mut doc);

        assert_eq!(doc.title, "Survey");
        assert_eq!(doc.display, "form");
        assert_eq!(doc.settings.submit_button.text, "Submit");
    }
}
