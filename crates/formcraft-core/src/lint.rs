//! Lint diagnostics for form documents.
//!
//! Reports schema issues without modifying the document. The engine stays
//! permissive on writes (any key, any duplicate goes through); these rules
//! are the review pass a builder UI surfaces next to the canvas.

use std::collections::{HashMap, HashSet};

use crate::document::FormDocument;
use crate::id::ComponentId;
use crate::model::{SchemaNode, is_valid_key};
use crate::tree;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Should be fixed; likely a mistake.
    Warning,
    /// Informational.
    Info,
}

/// A single lint diagnostic for a schema component.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The component this diagnostic refers to.
    pub component: ComponentId,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "duplicate-key", "invalid-key").
    pub rule: &'static str,
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Run all lint rules over the document. Diagnostics come back grouped by
/// rule, in tree order within each rule.
#[must_use]
pub fn lint_document(doc: &FormDocument) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_keys(doc, &mut diags);
    lint_invalid_keys(doc, &mut diags);
    lint_unresolved_conditionals(doc, &mut diags);
    diags
}

// ─── Rules ───────────────────────────────────────────────────────────────

/// Warn when two components anywhere in the tree share a key. Submission
/// values land under one API property per key, so duplicates overwrite
/// each other.
fn lint_duplicate_keys(doc: &FormDocument, diags: &mut Vec<LintDiagnostic>) {
    let mut first_seen: HashMap<&str, &SchemaNode> = HashMap::new();
    tree::walk(&doc.components, &mut |node| {
        if let Some(first) = first_seen.get(node.key.as_str()) {
            diags.push(LintDiagnostic {
                component: node.id.clone(),
                message: format!("Key `{}` is already used by `{}`.", node.key, first.label),
                severity: LintSeverity::Warning,
                rule: "duplicate-key",
            });
        } else {
            first_seen.insert(node.key.as_str(), node);
        }
    });
}

/// Warn when a key is not a machine name (letters, digits, and `_` only,
/// non-empty).
fn lint_invalid_keys(doc: &FormDocument, diags: &mut Vec<LintDiagnostic>) {
    tree::walk(&doc.components, &mut |node| {
        if !is_valid_key(&node.key) {
            diags.push(LintDiagnostic {
                component: node.id.clone(),
                message: format!(
                    "Key `{}` is not a valid machine name (letters, digits, and `_` only).",
                    node.key
                ),
                severity: LintSeverity::Warning,
                rule: "invalid-key",
            });
        }
    });
}

/// Info when `conditional.when` names a key no component in the document
/// has. Conditionals carrying custom JSON logic are skipped; the json
/// block replaces the when/operator/value triple.
fn lint_unresolved_conditionals(doc: &FormDocument, diags: &mut Vec<LintDiagnostic>) {
    let mut keys: HashSet<&str> = HashSet::new();
    tree::walk(&doc.components, &mut |node| {
        keys.insert(node.key.as_str());
    });

    tree::walk(&doc.components, &mut |node| {
        let Some(cond) = &node.conditional else {
            return;
        };
        if cond.when.is_empty() || !cond.json.is_empty() {
            return;
        }
        if !keys.contains(cond.when.as_str()) {
            diags.push(LintDiagnostic {
                component: node.id.clone(),
                message: format!(
                    "Conditional on `{}` watches key `{}`, which no component has.",
                    node.key, cond.when
                ),
                severity: LintSeverity::Info,
                rule: "unresolved-conditional",
            });
        }
    });
}
