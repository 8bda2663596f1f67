//! Defines the [`Value`] enum, representing any raw interpolation value.

mod from;
#[cfg(feature = "serde")]
mod ser;

pub use std::collections::btree_map;
pub use std::collections::BTreeMap as Map;
use std::mem;
pub use std::vec::Vec as List;

#[cfg(feature = "serde")]
pub use crate::value::ser::to_value;
use crate::{Deferred, Error, Result, Session};

/// A raw interpolation value assigned to a slot.
///
/// Besides plain data a value can carry the result of rendering another
/// template, or a value that is not available yet.
#[derive(Debug, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(List<Value>),
    Map(Map<String, Value>),

    /// A nested render session whose output belongs at this position.
    Template(Session),

    /// A value that will only be available later.
    Deferred(Deferred),
}

impl Value {
    /// Format a scalar value as text.
    ///
    /// Values are formatted as follows:
    /// - [`Value::None`]: empty string
    /// - [`Value::Bool`]: `true` or `false`
    /// - [`Value::Integer`]: the integer formatted using [`Display`][std::fmt::Display]
    /// - [`Value::Float`]: the float formatted using [`Display`][std::fmt::Display]
    /// - [`Value::String`]: the string, unescaped
    ///
    /// Errors for every other variant.
    pub fn to_text(&self) -> Result<String> {
        match self {
            Value::None => Ok(String::new()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Integer(n) => Ok(n.to_string()),
            Value::Float(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            value => Err(Error::unsupported(value.human())),
        }
    }

    pub(crate) fn human(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Template(_) => "template",
            Value::Deferred(_) => "deferred",
        }
    }
}

impl PartialEq for Value {
    /// Data values compare structurally. Sessions and deferred values are
    /// never equal to anything, including themselves.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(s), Self::Bool(o)) => s == o,
            (Self::Integer(s), Self::Integer(o)) => s == o,
            (Self::Float(s), Self::Float(o)) => s == o,
            (Self::String(s), Self::String(o)) => s == o,
            (Self::List(s), Self::List(o)) => s == o,
            (Self::Map(s), Self::Map(o)) => s == o,
            (Self::Template(_), _) | (Self::Deferred(_), _) => false,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}
