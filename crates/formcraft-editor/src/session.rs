//! The editing session: command surface over a form document.
//!
//! `EditorSession` owns the document history and the selection. Every
//! command derives the next document from the current snapshot and
//! commits it as one history entry; there is never an observable
//! intermediate state. Edits that resolve to nothing still commit, so a
//! drop that missed its target stays an undoable step. Movement commands
//! with nothing to move return without committing.

use std::sync::Arc;

use log::debug;

use formcraft_core::codec::{self, SchemaError};
use formcraft_core::factory::{self, NodeOverrides};
use formcraft_core::{
    ComponentId, ComponentType, ContainerSlot, FormDocument, LintDiagnostic, MetadataPatch,
    NodePatch, SchemaNode, lint_document, tree,
};

use crate::history::History;

pub struct EditorSession {
    history: History,
    selected: Option<ComponentId>,
}

impl EditorSession {
    /// Session over a fresh untitled document.
    pub fn new() -> Self {
        Self::with_document(FormDocument::default())
    }

    /// Session over a loaded document, which seeds the history.
    pub fn with_document(doc: FormDocument) -> Self {
        Self {
            history: History::new(doc),
            selected: None,
        }
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Create a component of `ty` and insert it at the top level. `None`
    /// or an index past the end appends. Returns the new component's id.
    pub fn add_component(
        &mut self,
        ty: ComponentType,
        index: Option<usize>,
        overrides: NodeOverrides,
    ) -> ComponentId {
        let node = factory::create(ty, overrides);
        let id = node.id.clone();
        let mut doc = self.history.current().clone();
        let at = index.unwrap_or(doc.components.len()).min(doc.components.len());
        doc.components.insert(at, Arc::new(node));
        debug!("add {ty} at {at} ({id})");
        self.history.commit(doc);
        id
    }

    /// Create a component of `ty` and append it into the addressed slot
    /// of a container. When the container or slot does not resolve, the
    /// drop lands nowhere: a no-change entry is committed and `None`
    /// comes back.
    pub fn add_to_container(
        &mut self,
        container_id: &ComponentId,
        slot: ContainerSlot,
        ty: ComponentType,
        overrides: NodeOverrides,
    ) -> Option<ComponentId> {
        let node = factory::create(ty, overrides);
        let id = node.id.clone();
        let current = self.history.current();
        let components = tree::insert_into(&current.components, container_id, slot, node, None);
        let inserted = tree::find(&components, &id).is_some();
        let mut doc = current.clone();
        doc.components = components;
        debug!("add {ty} into {container_id} {slot:?} (resolved: {inserted})");
        self.history.commit(doc);
        inserted.then_some(id)
    }

    /// Shallow-merge `patch` onto the component carrying `id`, wherever
    /// it sits in the tree.
    pub fn update_component(&mut self, id: &ComponentId, patch: &NodePatch) {
        let current = self.history.current();
        let components = tree::find_and_update(&current.components, id, patch);
        let mut doc = current.clone();
        doc.components = components;
        debug!("update {id}");
        self.history.commit(doc);
    }

    /// Remove the component carrying `id` and its whole subtree, wherever
    /// it sits in the tree. A selection pointing at it is cleared.
    pub fn remove_component(&mut self, id: &ComponentId) {
        let current = self.history.current();
        let components = tree::find_and_remove(&current.components, id);
        let mut doc = current.clone();
        doc.components = components;
        debug!("remove {id}");
        self.history.commit(doc);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
    }

    /// Move the top-level component at `from` to `to`. Nothing commits
    /// when the indices are equal or `from` is out of range.
    pub fn reorder_components(&mut self, from: usize, to: usize) {
        if from == to || from >= self.history.current().components.len() {
            return;
        }
        let doc = self.history.current().reorder(from, to);
        debug!("reorder {from} -> {to}");
        self.history.commit(doc);
    }

    /// Merge `patch` over the document's root metadata.
    pub fn update_metadata(&mut self, patch: &MetadataPatch) {
        let doc = self.history.current().update_metadata(patch);
        debug!("update metadata");
        self.history.commit(doc);
    }

    /// Parse `text` and replace the document wholesale, as one committed
    /// transaction on top of the existing history. On a parse error the
    /// session is left exactly as it was.
    pub fn import_schema(&mut self, text: &str) -> Result<(), SchemaError> {
        let doc = codec::parse_document(text)?;
        debug!(
            "import `{}` ({} top-level components)",
            doc.title,
            doc.components.len()
        );
        self.history.commit(doc);
        Ok(())
    }

    /// The current document as the pretty-printed export artifact.
    pub fn export_schema(&self) -> String {
        codec::emit_document(self.history.current())
    }

    /// Step back one committed snapshot. False at the floor.
    pub fn undo(&mut self) -> bool {
        self.history.undo().is_some()
    }

    /// Step forward one undone snapshot. False at the ceiling.
    pub fn redo(&mut self) -> bool {
        self.history.redo().is_some()
    }

    /// Fresh blank document and history; selection cleared.
    pub fn reset(&mut self) {
        debug!("reset");
        self.history = History::new(FormDocument::default());
        self.selected = None;
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select(&mut self, id: ComponentId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&ComponentId> {
        self.selected.as_ref()
    }

    /// The selected node resolved against the current document. A
    /// selection the current snapshot does not contain (removed, undone
    /// away, imported over) reads as `None`.
    pub fn selected_component(&self) -> Option<&Arc<SchemaNode>> {
        let id = self.selected.as_ref()?;
        tree::find(&self.history.current().components, id)
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    pub fn document(&self) -> &FormDocument {
        self.history.current()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Lint the current document.
    pub fn lint(&self) -> Vec<LintDiagnostic> {
        lint_document(self.history.current())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
