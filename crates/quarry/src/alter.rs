mod limit;
pub use limit::Limit;

mod order_by;
pub use order_by::OrderBy;

use crate::Query;

use std::fmt::Debug;

/// A shaping directive applied to a [`Query`]: windowing, ordering.
pub trait Alteration: Debug {
    fn apply(&self, query: &mut Query);
}

impl<A: Alteration + ?Sized> Alteration for &A {
    fn apply(&self, query: &mut Query) {
        (**self).apply(query)
    }
}

impl<A: Alteration + ?Sized> Alteration for Box<A> {
    fn apply(&self, query: &mut Query) {
        (**self).apply(query)
    }
}
