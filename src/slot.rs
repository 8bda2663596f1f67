//! The slot capability and two generic slot implementations.
//!
//! A slot is the dynamic part of a compiled template. When a session's cursor
//! reaches a slot it hands the slot exactly [`width`][Slot::width] consecutive
//! interpolation values and emits the [`Chunk`] the slot resolves them to.
//!
//! Most slots have a width of one. Slots that merge several adjacent
//! interpolations into a single textual result (for example an attribute
//! value built from multiple parts) have a larger width and embed the literal
//! text between those interpolations in their own resolution logic.

use std::fmt;
use std::mem;

use crate::{Chunk, Error, Result, Value};

/// Turns one or more interpolation values into a [`Chunk`].
///
/// # Examples
///
/// A slot that joins two values with a separator.
///
/// ```
/// use tessera::{Chunk, Result, Slot, Value};
///
/// struct Join(&'static str);
///
/// impl Slot for Join {
///     fn width(&self) -> usize {
///         2
///     }
///
///     fn resolve(&self, values: &mut [Value]) -> Result<Chunk> {
///         let parts: Vec<_> = values.iter().map(|v| v.to_text()).collect::<Result<_>>()?;
///         Ok(Chunk::Text(parts.join(self.0)))
///     }
/// }
/// ```
pub trait Slot: Send + Sync {
    /// The number of consecutive interpolation values this slot consumes.
    ///
    /// Must be at least one.
    fn width(&self) -> usize {
        1
    }

    /// Resolve the assigned values to a chunk.
    ///
    /// `values` always has exactly [`width`][Slot::width] elements. They are
    /// owned by the session and dropped after this call, so implementations
    /// are free to [`take`][std::mem::take] them.
    fn resolve(&self, values: &mut [Value]) -> Result<Chunk>;
}

/// A slot of width one that classifies its value.
///
/// Strings become text, nested sessions become nested results, lists become
/// collections and deferred values stay deferred.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSlot;

impl Slot for ValueSlot {
    fn resolve(&self, values: &mut [Value]) -> Result<Chunk> {
        match values {
            [value] => Ok(Chunk::from(mem::take(value))),
            values => Err(Error::value_count(1, values.len())),
        }
    }
}

/// A slot backed by a function or closure.
///
/// This struct is created by [`from_fn`].
pub struct FnSlot<F> {
    width: usize,
    f: F,
}

/// Create a slot of the given width from a function or closure.
///
/// The function may return either a [`Chunk`] or a [`Result<Chunk>`].
///
/// # Examples
///
/// ```
/// use tessera::{slot, Chunk, Value};
///
/// let upper = slot::from_fn(1, |values: &mut [Value]| {
///     values[0].to_text().map(|s| Chunk::Text(s.to_uppercase()))
/// });
/// ```
pub fn from_fn<F, R>(width: usize, f: F) -> FnSlot<F>
where
    F: Fn(&mut [Value]) -> R + Send + Sync,
    R: SlotReturn,
{
    FnSlot { width, f }
}

impl<F, R> Slot for FnSlot<F>
where
    F: Fn(&mut [Value]) -> R + Send + Sync,
    R: SlotReturn,
{
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn resolve(&self, values: &mut [Value]) -> Result<Chunk> {
        (self.f)(values).into_chunk()
    }
}

impl<F> fmt::Debug for FnSlot<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSlot")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// The return type of a slot function.
pub trait SlotReturn {
    #[doc(hidden)]
    fn into_chunk(self) -> Result<Chunk>;
}

impl SlotReturn for Chunk {
    #[inline]
    fn into_chunk(self) -> Result<Chunk> {
        Ok(self)
    }
}

impl SlotReturn for Result<Chunk> {
    #[inline]
    fn into_chunk(self) -> Result<Chunk> {
        self
    }
}
