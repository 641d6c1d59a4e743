use super::{Id, Record};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single attribute value as handed over by a driver.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// String value
    String(String),

    /// An ordered list of values
    List(Vec<Value>),

    /// A nested attribute bag (field storage, field items)
    Record(Record),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            Self::String(v) => v.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Read the value as a primary key.
    pub fn as_id(&self) -> Option<Id> {
        match self {
            Self::I64(v) => u64::try_from(*v).ok().map(Id),
            Self::String(v) => v.trim().parse().ok().map(Id),
            _ => None,
        }
    }

    /// "Empty" in the loose sense stores use: null, `false`, `0`, `""`,
    /// `"0"` and empty lists or records.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(v) => !v,
            Self::I64(v) => *v == 0,
            Self::String(v) => v.is_empty() || v == "0",
            Self::List(items) => items.is_empty(),
            Self::Record(record) => record.is_empty(),
        }
    }

    /// Loose equality: keys stored as `"12"` match keys stored as `12`.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if self == other {
            return true;
        }

        match (self.as_id(), other.as_id()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    /// Ordering used by drivers when evaluating comparison conditions.
    ///
    /// Integers (and strings holding integers) compare numerically, strings
    /// lexically, booleans as `false < true`. Mixed kinds are unordered.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(lhs), Self::Bool(rhs)) => Some(lhs.cmp(rhs)),
            (Self::String(lhs), Self::String(rhs)) => match (self.as_i64(), other.as_i64()) {
                (Some(lhs), Some(rhs)) => Some(lhs.cmp(&rhs)),
                _ => Some(lhs.cmp(rhs)),
            },
            _ => match (self.as_i64(), other.as_i64()) {
                (Some(lhs), Some(rhs)) => Some(lhs.cmp(&rhs)),
                _ => None,
            },
        }
    }

    /// Match against a `LIKE` pattern where `%` is a wildcard.
    pub fn like(&self, pattern: &str) -> bool {
        let Some(subject) = self.as_str() else {
            return false;
        };

        let parts: Vec<&str> = pattern.split('%').collect();
        if parts.len() == 1 {
            return subject == pattern;
        }

        let mut rest = subject;
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }

            if i == 0 {
                match rest.strip_prefix(part) {
                    Some(tail) => rest = tail,
                    None => return false,
                }
            } else if i == parts.len() - 1 {
                return rest.ends_with(part);
            } else {
                match rest.find(part) {
                    Some(pos) => rest = &rest[pos + part.len()..],
                    None => return false,
                }
            }
        }

        true
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::I64(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Self::Null,
            Json::Bool(v) => Self::Bool(v),
            Json::Number(n) => match n.as_i64() {
                Some(v) => Self::I64(v),
                None => Self::String(n.to_string()),
            },
            Json::String(v) => Self::String(v),
            Json::Array(items) => Self::List(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => Self::Record(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
