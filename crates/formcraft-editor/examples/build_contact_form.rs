//! Build a small contact form through the command surface and print the
//! exported schema. Run with RUST_LOG=debug to watch the commands commit.

use formcraft_core::factory::NodeOverrides;
use formcraft_core::tree::ContainerSlot;
use formcraft_core::{ComponentType, MetadataPatch, NodePatch, ValidationRules};
use formcraft_editor::EditorSession;

fn labeled(label: &str, key: &str) -> NodeOverrides {
    NodeOverrides {
        label: Some(label.to_string()),
        key: Some(key.to_string()),
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let mut session = EditorSession::new();
    session.update_metadata(&MetadataPatch {
        title: Some("Contact Us".to_string()),
        description: Some("Get in touch with the team.".to_string()),
        ..Default::default()
    });

    let name = session.add_component(
        ComponentType::Textfield,
        None,
        labeled("Full Name", "fullName"),
    );
    session.add_component(ComponentType::Email, None, labeled("Email", "email"));

    // A panel holding the message body.
    let panel = session.add_component(
        ComponentType::Panel,
        None,
        NodeOverrides {
            label: Some("Your Message".to_string()),
            ..Default::default()
        },
    );
    session
        .add_to_container(
            &panel,
            ContainerSlot::Panel,
            ComponentType::Textarea,
            labeled("Message", "message"),
        )
        .expect("panel slot resolves");

    session.add_component(ComponentType::Button, None, labeled("Send", "submit"));

    // Make the name required with a minimum length.
    session.update_component(
        &name,
        &NodePatch {
            required: Some(true),
            validate: Some(ValidationRules {
                required: true,
                min_length: Some("2".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        },
    );

    // Second thoughts about the panel placement, then not.
    session.reorder_components(2, 0);
    session.undo();

    for diag in session.lint() {
        eprintln!("lint [{}] {}", diag.rule, diag.message);
    }

    println!("{}", session.export_schema());
    eprintln!(
        "components: {}, can_undo: {}",
        session.document().components.len(),
        session.can_undo()
    );
}
