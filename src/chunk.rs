//! Defines the units of rendered output.
//!
//! - [`Chunk`] is what a session's cursor emits: a literal segment or the
//!   resolution of a slot.
//! - [`Item`] is one element of a flattened output: a run of text or an
//!   opaque item the caller must resolve further.
//! - [`Output`] is the result of fully reading a session.

use crate::{Deferred, Session, Value};

/// A classified unit of output.
#[derive(Debug)]
pub enum Chunk {
    /// Literal text.
    Text(String),

    /// The output of another template.
    Nested(Session),

    /// An ordered sequence of raw values, each of which is classified again
    /// when flattened.
    Collection(Vec<Value>),

    /// A value that is not available yet.
    Deferred(Deferred),

    /// Any other raw value.
    Unclassified(Value),
}

/// An element of a flattened output.
#[derive(Debug)]
pub enum Item {
    /// A run of literal text, possibly empty.
    Text(String),

    /// A nested session that was not inlined.
    Nested(Session),

    /// A value that is not available yet.
    Deferred(Deferred),
}

/// The result of fully reading a session.
#[derive(Debug)]
pub enum Output {
    /// The entire output is text.
    Text(String),

    /// Alternating runs of text and opaque items, in output order.
    ///
    /// This always has more than one element and always ends with a text
    /// item, which may be empty.
    Items(Vec<Item>),
}

impl Chunk {
    /// Returns `true` if the chunk is the output of another template.
    #[inline]
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

impl From<Value> for Chunk {
    /// Classify a raw value.
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Template(session) => Self::Nested(session),
            Value::List(list) => Self::Collection(list),
            Value::Deferred(deferred) => Self::Deferred(deferred),
            value => Self::Unclassified(value),
        }
    }
}

impl From<String> for Chunk {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Chunk {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

impl From<Item> for Chunk {
    fn from(item: Item) -> Self {
        match item {
            Item::Text(s) => Self::Text(s),
            Item::Nested(session) => Self::Nested(session),
            Item::Deferred(deferred) => Self::Deferred(deferred),
        }
    }
}

impl Item {
    /// Returns `true` if the item is a nested session.
    #[inline]
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// Returns the text if this is a text item.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Output {
    /// Returns the text if the entire output is text.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Items(_) => None,
        }
    }

    /// Consume the output returning its items.
    ///
    /// A text output becomes a single text item.
    pub fn into_items(self) -> Vec<Item> {
        match self {
            Self::Text(s) => vec![Item::Text(s)],
            Self::Items(items) => items,
        }
    }
}
