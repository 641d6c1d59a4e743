mod id;
pub use id::Id;

mod op;
pub use op::{Direction, Op};

mod record;
pub use record::Record;

mod value;
pub use value::Value;
