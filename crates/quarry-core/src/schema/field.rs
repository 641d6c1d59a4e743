use crate::stmt::Record;

use serde::{Deserialize, Serialize};

/// How many values a dynamic field holds per entity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    #[default]
    Single,
    Limited(u32),
    Unlimited,
}

/// Type-level shape of a dynamic field, shared by every bundle that uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBase {
    pub field_name: String,

    /// Storage type, e.g. `taxonomy_term_reference` or `text_long`.
    pub ty: String,

    pub cardinality: Cardinality,

    /// Driver-specific settings, passed through untouched.
    pub settings: Record,
}

impl FieldBase {
    pub fn new(field_name: impl Into<String>, ty: impl Into<String>) -> FieldBase {
        FieldBase {
            field_name: field_name.into(),
            ty: ty.into(),
            cardinality: Cardinality::Single,
            settings: Record::new(),
        }
    }

    pub fn cardinality(mut self, cardinality: Cardinality) -> FieldBase {
        self.cardinality = cardinality;
        self
    }

    pub fn settings(mut self, settings: Record) -> FieldBase {
        self.settings = settings;
        self
    }
}

/// Per-bundle configuration of a dynamic field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInstance {
    pub field_name: String,
    pub entity_type: String,
    pub bundle: String,
    pub label: String,
    pub required: bool,
    pub settings: Record,
}

impl FieldInstance {
    pub fn new(
        field_name: impl Into<String>,
        entity_type: impl Into<String>,
        bundle: impl Into<String>,
    ) -> FieldInstance {
        let field_name = field_name.into();

        FieldInstance {
            label: field_name.clone(),
            field_name,
            entity_type: entity_type.into(),
            bundle: bundle.into(),
            required: false,
            settings: Record::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> FieldInstance {
        self.label = label.into();
        self
    }

    pub fn required(mut self, required: bool) -> FieldInstance {
        self.required = required;
        self
    }

    /// Whether this instance is attached to the given entity type and bundle.
    pub fn is_attached_to(&self, entity_type: &str, bundle: &str) -> bool {
        self.entity_type == entity_type && self.bundle == bundle
    }
}
