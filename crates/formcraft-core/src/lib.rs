pub mod codec;
pub mod document;
pub mod factory;
pub mod id;
pub mod lint;
pub mod model;
pub mod patch;
pub mod tree;

pub use codec::SchemaError;
pub use document::{FormDocument, FormSettings, SubmitButton};
pub use id::ComponentId;
pub use lint::{LintDiagnostic, LintSeverity, lint_document};
pub use model::*;
pub use patch::{DefaultValue, MetadataPatch, NodePatch};
pub use tree::ContainerSlot;
