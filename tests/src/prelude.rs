//! Common imports for test files
//!
//! This module provides a convenient way to import frequently used items
//! in test files with `use tests::prelude::*;`

// Re-export core test infrastructure
pub use crate::{fixtures, DbTest, DriverOp, ExecLog, Setup};

// Re-export macros
pub use crate::{assert_empty, assert_err, assert_none, assert_ok, models, tests};

pub use quarry::{
    filter::*,
    models::{Article, Node, Tag, Term, User, Vocabulary},
    stmt::{Direction, Id, Op, Record, Value},
    Collection, Db, Entity, Limit, Model, OrderBy,
};
