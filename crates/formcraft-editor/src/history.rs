//! Linear undo/redo history of document snapshots.
//!
//! One whole-document snapshot per committed command. Snapshots share
//! unchanged subtrees through `Arc`, so the log stays cheap across a long
//! session. Committing while stepped back discards the redo branch.

use formcraft_core::FormDocument;

/// Snapshot log plus a cursor into it. The entry under the cursor is the
/// current document; the cursor never leaves the log, so there is always
/// a current document.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<FormDocument>,
    cursor: usize,
}

impl History {
    /// A log seeded with the initial document.
    pub fn new(initial: FormDocument) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Append a snapshot after the cursor and move onto it. Entries past
    /// the cursor are dropped: redo never survives a new commit.
    pub fn commit(&mut self, doc: FormDocument) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(doc);
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one snapshot. `None`, with nothing changed, at the
    /// first entry.
    pub fn undo(&mut self) -> Option<&FormDocument> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one snapshot. `None`, with nothing changed, at the
    /// last entry.
    pub fn redo(&mut self) -> Option<&FormDocument> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &FormDocument {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
