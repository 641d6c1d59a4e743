use super::Value;
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary-key value of a stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub u64);

impl Id {
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parse an id out of a stored value.
    ///
    /// Stores are loose about key types: integers and decimal strings are both
    /// accepted.
    pub fn from_value(value: &Value) -> Result<Id> {
        value
            .as_id()
            .ok_or_else(|| Error::invalid_result(format!("value is not an id; value={value:?}")))
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id(value)
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id(value.into())
    }
}

/// Ids past `i64::MAX` are kept as decimal strings, which
/// [`Value::as_id`] reads back.
impl From<Id> for Value {
    fn from(value: Id) -> Self {
        i64::try_from(value.0)
            .map(Value::I64)
            .unwrap_or_else(|_| Value::String(value.0.to_string()))
    }
}

impl std::str::FromStr for Id {
    type Err = Error;

    fn from_str(s: &str) -> Result<Id> {
        Ok(Id(s.trim().parse()?))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
