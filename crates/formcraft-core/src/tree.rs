//! Locator and mutators over the component tree.
//!
//! Every function walks depth-first in pre-order; the first node with a
//! matching id wins. Mutators never touch their input: they return a new
//! child list that rebuilds only the path from the root to the edit and
//! holds pointer-identical `Arc`s for every untouched subtree. A miss
//! returns a list equal to, and sharing all nodes with, the input.

use std::sync::Arc;

use crate::id::ComponentId;
use crate::model::{FieldKind, SchemaNode};
use crate::patch::NodePatch;

/// Addresses one child list of a container node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSlot {
    /// The single child list of a `panel`.
    Panel,
    /// The pane at this index of a `tabs` container.
    Tab(usize),
    /// The column at this index of a `columns` container.
    Column(usize),
}

// ─── Reads ───────────────────────────────────────────────────────────────

/// Find a node by id anywhere in the tree.
#[must_use]
pub fn find<'a>(list: &'a [Arc<SchemaNode>], id: &ComponentId) -> Option<&'a Arc<SchemaNode>> {
    for node in list {
        if node.id == *id {
            return Some(node);
        }
        let nested = match &node.kind {
            FieldKind::Panel { components, .. } => find(components, id),
            FieldKind::Tabs { tabs } => tabs.iter().find_map(|pane| find(&pane.components, id)),
            FieldKind::Columns { columns } => {
                columns.iter().find_map(|col| find(&col.components, id))
            }
            _ => None,
        };
        if nested.is_some() {
            return nested;
        }
    }
    None
}

/// Visit every node in the tree, depth-first in pre-order.
pub fn walk<'a, F>(list: &'a [Arc<SchemaNode>], visit: &mut F)
where
    F: FnMut(&'a SchemaNode),
{
    for node in list {
        visit(node);
        match &node.kind {
            FieldKind::Panel { components, .. } => walk(components, visit),
            FieldKind::Tabs { tabs } => {
                for pane in tabs {
                    walk(&pane.components, visit);
                }
            }
            FieldKind::Columns { columns } => {
                for col in columns {
                    walk(&col.components, visit);
                }
            }
            _ => {}
        }
    }
}

// ─── Mutators ────────────────────────────────────────────────────────────

/// New child list with `patch` merged onto the node carrying `id`.
#[must_use]
pub fn find_and_update(
    list: &[Arc<SchemaNode>],
    id: &ComponentId,
    patch: &NodePatch,
) -> Vec<Arc<SchemaNode>> {
    update_in(list, id, patch).unwrap_or_else(|| list.to_vec())
}

/// New child list with the node carrying `id` removed, subtree and all.
#[must_use]
pub fn find_and_remove(list: &[Arc<SchemaNode>], id: &ComponentId) -> Vec<Arc<SchemaNode>> {
    remove_in(list, id).unwrap_or_else(|| list.to_vec())
}

/// New child list with `node` inserted into the addressed slot of the
/// container carrying `container_id`. `at` positions the node within the
/// slot; `None` or a position past the end appends.
#[must_use]
pub fn insert_into(
    list: &[Arc<SchemaNode>],
    container_id: &ComponentId,
    slot: ContainerSlot,
    node: SchemaNode,
    at: Option<usize>,
) -> Vec<Arc<SchemaNode>> {
    let node = Arc::new(node);
    insert_in(list, container_id, slot, &node, at).unwrap_or_else(|| list.to_vec())
}

// ─── Rebuilding walkers ──────────────────────────────────────────────────

// The internal walkers return None on a miss so the public entry points
// can fall back to sharing the input list wholesale.

fn update_in(
    list: &[Arc<SchemaNode>],
    id: &ComponentId,
    patch: &NodePatch,
) -> Option<Vec<Arc<SchemaNode>>> {
    for (i, node) in list.iter().enumerate() {
        if node.id == *id {
            let mut updated = (**node).clone();
            patch.apply(&mut updated);
            return Some(replaced(list, i, Arc::new(updated)));
        }
        if let Some(rebuilt) =
            rebuild_children(node, &mut |children| update_in(children, id, patch))
        {
            return Some(replaced(list, i, Arc::new(rebuilt)));
        }
    }
    None
}

fn remove_in(list: &[Arc<SchemaNode>], id: &ComponentId) -> Option<Vec<Arc<SchemaNode>>> {
    for (i, node) in list.iter().enumerate() {
        if node.id == *id {
            let mut out = list.to_vec();
            out.remove(i);
            return Some(out);
        }
        if let Some(rebuilt) = rebuild_children(node, &mut |children| remove_in(children, id)) {
            return Some(replaced(list, i, Arc::new(rebuilt)));
        }
    }
    None
}

fn insert_in(
    list: &[Arc<SchemaNode>],
    container_id: &ComponentId,
    slot: ContainerSlot,
    node: &Arc<SchemaNode>,
    at: Option<usize>,
) -> Option<Vec<Arc<SchemaNode>>> {
    for (i, candidate) in list.iter().enumerate() {
        if candidate.id == *container_id {
            let rebuilt = placed_in_slot(candidate, slot, node, at)?;
            return Some(replaced(list, i, Arc::new(rebuilt)));
        }
        if let Some(rebuilt) = rebuild_children(candidate, &mut |children| {
            insert_in(children, container_id, slot, node, at)
        }) {
            return Some(replaced(list, i, Arc::new(rebuilt)));
        }
    }
    None
}

/// Clone of `container` with `node` inserted into the addressed slot.
/// None when this node's kind has no such slot, including a tab or
/// column index past the end.
fn placed_in_slot(
    container: &SchemaNode,
    slot: ContainerSlot,
    node: &Arc<SchemaNode>,
    at: Option<usize>,
) -> Option<SchemaNode> {
    let mut rebuilt = container.clone();
    match (slot, &mut rebuilt.kind) {
        (ContainerSlot::Panel, FieldKind::Panel { components, .. }) => {
            insert_clamped(components, node, at);
        }
        (ContainerSlot::Tab(i), FieldKind::Tabs { tabs }) => {
            insert_clamped(&mut tabs.get_mut(i)?.components, node, at);
        }
        (ContainerSlot::Column(i), FieldKind::Columns { columns }) => {
            insert_clamped(&mut columns.get_mut(i)?.components, node, at);
        }
        _ => return None,
    }
    Some(rebuilt)
}

fn insert_clamped(children: &mut Vec<Arc<SchemaNode>>, node: &Arc<SchemaNode>, at: Option<usize>) {
    let index = at.unwrap_or(children.len()).min(children.len());
    children.insert(index, Arc::clone(node));
}

/// Rebuild `node` when `rebuild` produces a new version of one of its
/// child lists. Child lists are tried in pre-order position: the panel
/// list, then each tab pane, then each column.
fn rebuild_children<F>(node: &SchemaNode, rebuild: &mut F) -> Option<SchemaNode>
where
    F: FnMut(&[Arc<SchemaNode>]) -> Option<Vec<Arc<SchemaNode>>>,
{
    match &node.kind {
        FieldKind::Panel { components, .. } => {
            let new_children = rebuild(components)?;
            let mut clone = node.clone();
            if let FieldKind::Panel { components, .. } = &mut clone.kind {
                *components = new_children;
            }
            Some(clone)
        }
        FieldKind::Tabs { tabs } => {
            let (i, new_children) = tabs
                .iter()
                .enumerate()
                .find_map(|(i, pane)| Some((i, rebuild(&pane.components)?)))?;
            let mut clone = node.clone();
            if let FieldKind::Tabs { tabs } = &mut clone.kind {
                tabs[i].components = new_children;
            }
            Some(clone)
        }
        FieldKind::Columns { columns } => {
            let (i, new_children) = columns
                .iter()
                .enumerate()
                .find_map(|(i, col)| Some((i, rebuild(&col.components)?)))?;
            let mut clone = node.clone();
            if let FieldKind::Columns { columns } = &mut clone.kind {
                columns[i].components = new_children;
            }
            Some(clone)
        }
        _ => None,
    }
}

fn replaced(list: &[Arc<SchemaNode>], index: usize, node: Arc<SchemaNode>) -> Vec<Arc<SchemaNode>> {
    let mut out = list.to_vec();
    out[index] = node;
    out
}
