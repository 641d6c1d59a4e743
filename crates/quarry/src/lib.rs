pub mod alter;
pub use alter::{Alteration, Limit, OrderBy};

pub mod collection;
pub use collection::{Collection, Truthy};

pub mod db;
pub use db::Db;

pub mod driver;

mod entity;
pub use entity::Entity;

pub mod filter;
pub use filter::Filter;

mod model;
pub use model::Model;

pub mod models;

mod query;
pub use query::Query;

mod relation;

mod schema;

pub use quarry_core::{
    bail, err,
    schema::{Cardinality, FieldBase, FieldCatalog, FieldDescriptor, FieldInstance},
    stmt::{self, Direction, Id, Op, Record, Value},
    Error, Result,
};
