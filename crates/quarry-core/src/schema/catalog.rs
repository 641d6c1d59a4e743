use super::{FieldBase, FieldInstance};

/// A set of field bases and instances, queryable by field name.
///
/// Models use it to declare the fields they install; `Db` builds one per model
/// from the driver's definitions to tell dynamic fields from plain attributes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    bases: Vec<FieldBase>,
    instances: Vec<FieldInstance>,
}

/// A field known to both the base and the instance definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor<'a> {
    pub base: &'a FieldBase,
    pub instance: &'a FieldInstance,
}

impl FieldCatalog {
    pub fn new(bases: Vec<FieldBase>, instances: Vec<FieldInstance>) -> FieldCatalog {
        FieldCatalog { bases, instances }
    }

    /// Keep only the bases that have an instance among `instances`.
    pub fn resolve(bases: Vec<FieldBase>, instances: Vec<FieldInstance>) -> FieldCatalog {
        let bases = bases
            .into_iter()
            .filter(|base| {
                instances
                    .iter()
                    .any(|instance| instance.field_name == base.field_name)
            })
            .collect();

        FieldCatalog { bases, instances }
    }

    pub fn bases(&self) -> &[FieldBase] {
        &self.bases
    }

    pub fn instances(&self) -> &[FieldInstance] {
        &self.instances
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<FieldDescriptor<'_>> {
        let base = self.bases.iter().find(|base| base.field_name == name)?;
        let instance = self
            .instances
            .iter()
            .find(|instance| instance.field_name == name)?;

        Some(FieldDescriptor { base, instance })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().map(|base| base.field_name.as_str())
    }
}
