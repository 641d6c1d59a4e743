use super::Filter;
use crate::Query;

/// Scope a query to one bundle of the already scoped entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOf {
    pub bundle: String,
}

impl BundleOf {
    pub fn new(bundle: impl Into<String>) -> BundleOf {
        BundleOf {
            bundle: bundle.into(),
        }
    }
}

impl Filter for BundleOf {
    fn apply(&self, query: &mut Query) {
        query.connection().scope_bundle(&self.bundle);
    }
}
