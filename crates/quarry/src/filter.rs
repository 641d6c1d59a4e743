mod bundle_of;
pub use bundle_of::BundleOf;

mod field_is;
pub use field_is::FieldIs;

mod primary_key;
pub use primary_key::{PrimaryKeyIn, PrimaryKeyIs};

mod property_is;
pub use property_is::{PropertyIs, StatusIs, TitleIs};

mod timestamp;
pub use timestamp::{CreatedAt, UpdatedAt};

mod type_of;
pub use type_of::TypeOf;

use crate::Query;

use std::fmt::Debug;

/// A single condition applied to a [`Query`].
///
/// Filters are plain values: applying one only adds a condition to the
/// query's connection. Implementations outside this crate may call any
/// primitive reachable through [`Query::connection`].
pub trait Filter: Debug {
    fn apply(&self, query: &mut Query);
}

impl<F: Filter + ?Sized> Filter for &F {
    fn apply(&self, query: &mut Query) {
        (**self).apply(query)
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn apply(&self, query: &mut Query) {
        (**self).apply(query)
    }
}
