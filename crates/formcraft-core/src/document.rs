//! The form document: root metadata plus the component tree.
//!
//! Documents are edited persistently. Every mutator takes `&self` and
//! returns a new document that shares unchanged subtrees with the old
//! one, so a history of whole-document snapshots stays cheap.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::model::SchemaNode;
use crate::patch::MetadataPatch;

// ─── Settings ────────────────────────────────────────────────────────────

/// Submit-button block under the document settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitButton {
    pub text: String,
    pub action: String,
    pub theme: String,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            text: "Submit".to_string(),
            action: "submit".to_string(),
            theme: "primary".to_string(),
        }
    }
}

/// Document-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSettings {
    pub submit_button: SubmitButton,
}

// ─── Documents ───────────────────────────────────────────────────────────

/// A complete form schema. `Default` is the blank document a new editing
/// session starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormDocument {
    pub title: String,
    pub description: String,
    pub components: Vec<Arc<SchemaNode>>,
    /// Presentation mode, "form" or "wizard". Stored for the renderer.
    pub display: String,
    pub settings: FormSettings,
}

impl Default for FormDocument {
    fn default() -> Self {
        Self {
            title: "Untitled Form".to_string(),
            description: String::new(),
            components: Vec::new(),
            display: "form".to_string(),
            settings: FormSettings::default(),
        }
    }
}

impl FormDocument {
    /// Copy of this document with `patch` merged over the root metadata.
    /// The component tree is carried over untouched.
    #[must_use]
    pub fn update_metadata(&self, patch: &MetadataPatch) -> FormDocument {
        let mut doc = self.clone();
        patch.apply(&mut doc);
        doc
    }

    /// Copy of this document with the top-level component at `from` moved
    /// to `to`. The node is taken out first, so `to` addresses the list
    /// after removal; a `to` past the end clamps to the end. Equal
    /// indices or an out-of-range `from` return an unchanged copy.
    #[must_use]
    pub fn reorder(&self, from: usize, to: usize) -> FormDocument {
        let mut doc = self.clone();
        if from == to || from >= doc.components.len() {
            return doc;
        }
        let node = doc.components.remove(from);
        let to = to.min(doc.components.len());
        doc.components.insert(to, node);
        doc
    }
}
