pub use quarry_core::driver::{
    Connection, Driver, QueryResult, Response, LANGUAGE_NONE,
};
