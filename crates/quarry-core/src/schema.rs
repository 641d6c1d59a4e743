//! Dynamic-field schema: the definitions a driver exposes and the per-model
//! catalog derived from them.

mod catalog;
pub use catalog::{FieldCatalog, FieldDescriptor};

mod field;
pub use field::{Cardinality, FieldBase, FieldInstance};
