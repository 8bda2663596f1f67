//! Conversions from Rust values into interpolation values.

use crate::value::Map;
use crate::{Deferred, Session, Value};

/// Implements `From<$ty> for Value` for each `$ty => |binding| expr` arm.
macro_rules! into_value {
    ($($ty:ty => |$v:ident| $expr:expr),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from($v: $ty) -> Self {
                    $expr
                }
            }
        )+
    };
}

into_value! {
    bool => |b| Value::Bool(b),
    i8 => |n| Value::Integer(n.into()),
    i16 => |n| Value::Integer(n.into()),
    i32 => |n| Value::Integer(n.into()),
    i64 => |n| Value::Integer(n),
    u8 => |n| Value::Integer(n.into()),
    u16 => |n| Value::Integer(n.into()),
    u32 => |n| Value::Integer(n.into()),
    f32 => |n| Value::Float(n.into()),
    f64 => |n| Value::Float(n),
    char => |c| Value::String(c.into()),
    String => |s| Value::String(s),
    Map<String, Value> => |map| Value::Map(map),
    Session => |session| Value::Template(session),
    Deferred => |deferred| Value::Deferred(deferred),
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

/// `None` renders as nothing when stringified.
impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Value {
    fn from(values: [V; N]) -> Self {
        values.into_iter().collect()
    }
}

/// Collects into a [`Value::List`], which is read as a collection.
impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}
