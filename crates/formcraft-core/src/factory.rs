//! Component factory: fully-populated schema nodes from a type tag.
//!
//! `create` is total over `ComponentType`; the match below is the single
//! source of the per-type default table. Caller-supplied overrides win
//! over every generated default.

use rand::Rng;
use smallvec::{SmallVec, smallvec};

use crate::id::ComponentId;
use crate::model::{
    AddressFields, Column, ComponentType, FieldKind, OptionItem, SchemaNode, SelectData, SubField,
    TabPane, ValidationRules,
};

/// Caller-supplied values merged over the factory defaults.
///
/// `label` and `key` typically arrive from the palette drag payload;
/// `tabs` and `columns` let a caller shape a container at creation time.
#[derive(Debug, Clone, Default)]
pub struct NodeOverrides {
    pub label: Option<String>,
    pub key: Option<String>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub tabs: Option<SmallVec<[TabPane; 2]>>,
    pub columns: Option<SmallVec<[Column; 2]>>,
}

/// Create a schema node of the given type with a fresh id, a randomized
/// default key (`{tag}{0..=999}`), and the per-type default fields.
pub fn create(ty: ComponentType, overrides: NodeOverrides) -> SchemaNode {
    let NodeOverrides {
        label,
        key,
        placeholder,
        description,
        required,
        tabs,
        columns,
    } = overrides;

    let kind = match ty {
        ComponentType::Textfield => FieldKind::Textfield {
            input_type: "text".to_string(),
            validate_on: "change".to_string(),
            validate: text_rules(),
            default_value: None,
        },
        ComponentType::Textarea => FieldKind::Textarea {
            auto_expand: false,
            rows: 3,
            validate: length_rules(),
            default_value: None,
        },
        ComponentType::Number => FieldKind::Number {
            validate: range_rules(),
            default_value: None,
        },
        ComponentType::Checkbox => FieldKind::Checkbox {
            value: false,
            default_value: false,
        },
        ComponentType::Selectboxes => FieldKind::Selectboxes {
            values: placeholder_options(),
            default_value: Default::default(),
            inline: false,
        },
        ComponentType::Select => FieldKind::Select {
            data: SelectData {
                values: placeholder_options(),
                ..Default::default()
            },
            data_src: "values".to_string(),
            default_value: String::new(),
            multiple: false,
        },
        ComponentType::Radio => FieldKind::Radio {
            values: placeholder_options(),
            default_value: String::new(),
            inline: false,
        },
        ComponentType::Email => FieldKind::Email {
            validate_on: "change".to_string(),
            validate: pattern_rules("^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\\.[a-zA-Z]{2,}$"),
            default_value: None,
        },
        ComponentType::PhoneNumber => FieldKind::PhoneNumber {
            validate_on: "change".to_string(),
            validate: pattern_rules("^[0-9]{10}$"),
            default_value: None,
        },
        ComponentType::Datetime => FieldKind::Datetime {
            format: "yyyy-MM-dd".to_string(),
            enable_time: false,
            enable_date: true,
            default_value: String::new(),
            datepicker_mode: "day".to_string(),
            validate: range_rules(),
        },
        ComponentType::Address => FieldKind::Address {
            provider: "google".to_string(),
            manual_mode: false,
            components: standard_address(),
        },
        ComponentType::Content => FieldKind::Content {
            html: "<p>Content goes here</p>".to_string(),
        },
        ComponentType::Button => FieldKind::Button {
            action: "submit".to_string(),
            theme: "primary".to_string(),
            size: "md".to_string(),
            block: false,
            disable_on_invalid: true,
        },
        ComponentType::Panel => FieldKind::Panel {
            title: "Panel".to_string(),
            collapsible: false,
            collapsed: false,
            components: Vec::new(),
        },
        ComponentType::Columns => FieldKind::Columns {
            columns: columns.unwrap_or_else(default_columns),
        },
        ComponentType::Tabs => FieldKind::Tabs {
            tabs: tabs.unwrap_or_else(default_tabs),
        },
    };

    let mut node = SchemaNode::new(
        ComponentId::generate(),
        key.unwrap_or_else(|| random_key(ty)),
        label.unwrap_or_else(|| default_label(ty).to_string()),
        kind,
    );
    if let Some(placeholder) = placeholder {
        node.placeholder = placeholder;
    }
    if let Some(description) = description {
        node.description = description;
    }
    if let Some(required) = required {
        node.required = required;
    }
    node
}

/// The static type-to-label table.
pub fn default_label(ty: ComponentType) -> &'static str {
    match ty {
        ComponentType::Textfield => "Text Field",
        ComponentType::Textarea => "Text Area",
        ComponentType::Number => "Number",
        ComponentType::Checkbox => "Checkbox",
        ComponentType::Selectboxes => "Select Boxes",
        ComponentType::Select => "Select",
        ComponentType::Radio => "Radio",
        ComponentType::Email => "Email",
        ComponentType::PhoneNumber => "Phone Number",
        ComponentType::Datetime => "Date / Time",
        ComponentType::Address => "Address",
        ComponentType::Content => "Content",
        ComponentType::Button => "Button",
        ComponentType::Panel => "Panel",
        ComponentType::Columns => "Columns",
        ComponentType::Tabs => "Tabs",
    }
}

/// Default machine name: the type tag plus a random suffix. Not unique;
/// collisions surface through `lint_document`, not the factory.
fn random_key(ty: ComponentType) -> String {
    let n = rand::rng().random_range(0..1000);
    format!("{}{}", ty.as_tag(), n)
}

// ─── Per-type default shapes ─────────────────────────────────────────────

fn text_rules() -> ValidationRules {
    ValidationRules {
        min_length: Some(String::new()),
        max_length: Some(String::new()),
        pattern: Some(String::new()),
        custom: Some(String::new()),
        ..Default::default()
    }
}

fn length_rules() -> ValidationRules {
    ValidationRules {
        min_length: Some(String::new()),
        max_length: Some(String::new()),
        ..Default::default()
    }
}

fn range_rules() -> ValidationRules {
    ValidationRules {
        min: Some(String::new()),
        max: Some(String::new()),
        ..Default::default()
    }
}

fn pattern_rules(pattern: &str) -> ValidationRules {
    ValidationRules {
        pattern: Some(pattern.to_string()),
        ..Default::default()
    }
}

fn placeholder_options() -> SmallVec<[OptionItem; 3]> {
    smallvec![
        OptionItem::new("Option 1", "option1"),
        OptionItem::new("Option 2", "option2"),
        OptionItem::new("Option 3", "option3"),
    ]
}

fn default_tabs() -> SmallVec<[TabPane; 2]> {
    smallvec![TabPane::new("Tab 1"), TabPane::new("Tab 2")]
}

fn default_columns() -> SmallVec<[Column; 2]> {
    smallvec![Column::default(), Column::default()]
}

fn standard_address() -> AddressFields {
    AddressFields {
        address1: SubField::new("Address 1", "address1", "Enter your address"),
        address2: SubField::new("Address 2", "address2", "Apartment, suite, etc."),
        city: SubField::new("City", "city", "Enter your city"),
        state: SubField::new("State/Province", "state", "Enter your state/province"),
        zip: SubField::new("Postal Code", "zip", "Enter your postal code"),
        country: SubField::new("Country", "country", "Enter your country"),
    }
}
