//! A pull-based streaming renderer for precompiled templates.
//!
//! # Features
//!
//! - Walk a compiled template's text and slots one [`Chunk`] at a time
//! - Inline nested templates arbitrarily deep, or hand them back unread
//! - Surface values that are not available yet as opaque [`Deferred`] items
//!   in their correct position, without ever blocking
//! - Recycle session storage with a [`SessionPool`]
//! - Build interpolation values from any [`serde`] serializable data
//!
//! # Getting started
//!
//! A [`Template`] is an alternating sequence of literal text and [`Slot`]s.
//! Templates are normally produced by a compiler but they can also be built
//! by hand.
//!
//! ```
//! use std::sync::Arc;
//! use tessera::{slot::ValueSlot, Template};
//!
//! let template = Template::builder()
//!     .text("<a>")
//!     .slot(ValueSlot)
//!     .text("</a>")
//!     .build()?;
//! let template = Arc::new(template);
//! # Ok::<(), tessera::Error>(())
//! ```
//!
//! Rendering pairs the template with its interpolation values in a
//! [`Session`]. Sessions are single-use and are cheapest to obtain from a
//! [`SessionPool`].
//!
//! ```
//! # use std::sync::Arc;
//! # use tessera::{slot::ValueSlot, Template};
//! # let template = Arc::new(Template::builder().text("<a>").slot(ValueSlot).text("</a>").build()?);
//! use tessera::{SessionPool, Value};
//!
//! let pool = SessionPool::new();
//! let session = pool.acquire(template, [Value::from("x")])?;
//! let output = session.read(true)?;
//! assert_eq!(output.as_text(), Some("<a>x</a>"));
//! # Ok::<(), tessera::Error>(())
//! ```
//!
//! # Output
//!
//! Reading a session produces an [`Output`]. When everything was available
//! synchronously this is just the text. Otherwise it is a list of text runs
//! interleaved with opaque [`Item`]s that the caller resolves:
//!
//! - [`Item::Nested`] a nested session that was not inlined because the
//!   session was read shallowly. Read it later with [`read`].
//! - [`Item::Deferred`] a value that is not available yet. Await it and
//!   splice the resolved value back in at the same position.
//!
//! ```
//! # use std::sync::Arc;
//! # use tessera::{slot::ValueSlot, Template};
//! # let template = Arc::new(Template::builder().text("<a>").slot(ValueSlot).text("</a>").build()?);
//! use tessera::{Deferred, Item, Output, Session, Value};
//!
//! let later = Deferred::new(async { Ok(Value::from("x")) });
//! let session = Session::new(template, [Value::from(later)])?;
//!
//! let Output::Items(items) = session.read(false)? else {
//!     unreachable!()
//! };
//! assert_eq!(items[0].as_text(), Some("<a>"));
//! assert!(matches!(items[1], Item::Deferred(_)));
//! assert_eq!(items[2].as_text(), Some("</a>"));
//! # Ok::<(), tessera::Error>(())
//! ```
//!
//! [`resolve`] does all of this for you if the whole output is needed at
//! once.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod chunk;
mod deferred;
mod error;
mod pool;
mod render;
mod session;
pub mod slot;
mod types;
pub mod value;

pub use crate::chunk::{Chunk, Item, Output};
pub use crate::deferred::Deferred;
pub use crate::error::{Error, ErrorKind};
pub use crate::pool::SessionPool;
pub use crate::render::{read, read_with, resolve, ReadOptions, Unclassified};
pub use crate::session::Session;
pub use crate::slot::Slot;
pub use crate::types::template::{Template, TemplateBuilder};
#[cfg(feature = "serde")]
pub use crate::value::to_value;
pub use crate::value::Value;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns `true` if the chunk is the output of another template.
///
/// Equivalent to [`Chunk::is_nested`].
#[inline]
pub fn is_nested(chunk: &Chunk) -> bool {
    chunk.is_nested()
}
