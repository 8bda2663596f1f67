mod drive;
mod flatten;

pub use crate::render::drive::resolve;

use crate::chunk::{Chunk, Item, Output};
use crate::render::flatten::flatten;
use crate::{Result, Session};

/// Configures how a session is read.
///
/// # Examples
///
/// ```
/// use tessera::{ReadOptions, Unclassified};
///
/// let options = ReadOptions::new()
///     .deep(true)
///     .unclassified(Unclassified::Stringify);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    deep: bool,
    deep_collections: bool,
    unclassified: Unclassified,
}

/// What to do with a slot value that is not text, a nested session, a
/// collection or a deferred value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unclassified {
    /// Fail with an [`UnsupportedChunkType`][crate::ErrorKind::UnsupportedChunkType]
    /// error.
    #[default]
    Reject,

    /// Format scalars using [`Value::to_text`][crate::Value::to_text]. Maps
    /// are still rejected.
    Stringify,
}

impl ReadOptions {
    /// Construct the default options: shallow, and rejecting unclassified
    /// values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether nested sessions are inlined.
    ///
    /// When deep, nested sessions are read recursively and their output is
    /// merged into the parent's, so only deferred values remain opaque. When
    /// shallow, nested sessions are emitted as opaque items for the caller to
    /// read later.
    #[inline]
    pub fn deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    /// Set whether elements of collections are flattened deeply.
    ///
    /// Defaults to `false`: nested sessions inside a collection are emitted
    /// as opaque items even when reading deeply. When `true` the
    /// [`deep`][ReadOptions::deep] setting also applies to collection
    /// elements.
    #[inline]
    pub fn deep_collections(mut self, deep_collections: bool) -> Self {
        self.deep_collections = deep_collections;
        self
    }

    /// Set how unclassified values are handled.
    #[inline]
    pub fn unclassified(mut self, unclassified: Unclassified) -> Self {
        self.unclassified = unclassified;
        self
    }

    /// Returns `true` if nested sessions are inlined.
    #[inline]
    pub fn is_deep(&self) -> bool {
        self.deep
    }
}

/// Fully read a session.
///
/// This is equivalent to [`read_with`] using [`ReadOptions::new()`] with
/// the given `deep` setting.
#[inline]
pub fn read(session: Session, deep: bool) -> Result<Output> {
    read_with(session, ReadOptions::new().deep(deep))
}

/// Fully read a session using the given options.
///
/// Text is accumulated into a single buffer. If the session produced nothing
/// else the buffer is returned as [`Output::Text`]. Otherwise the output is a
/// list of text runs interleaved with the opaque items, in output order, and
/// always ending with a (possibly empty) text run.
pub fn read_with(mut session: Session, options: ReadOptions) -> Result<Output> {
    let mut buf = String::new();
    let mut out: Option<Vec<Item>> = None;

    while let Some(chunk) = session.next_chunk()? {
        match chunk {
            Chunk::Text(s) => buf.push_str(&s),
            chunk => {
                let out = out.get_or_insert_with(Vec::new);
                flatten(&mut buf, out, chunk, options.deep, &options)?;
            }
        }
    }

    let Some(mut items) = out else {
        return Ok(Output::Text(buf));
    };
    items.push(Item::Text(buf));
    if items.len() > 1 {
        return Ok(Output::Items(items));
    }
    match items.pop() {
        Some(Item::Text(s)) => Ok(Output::Text(s)),
        Some(item) => Ok(Output::Items(vec![item])),
        None => Ok(Output::Text(String::new())),
    }
}

impl Session {
    /// Fully read this session.
    ///
    /// See [`read`].
    #[inline]
    pub fn read(self, deep: bool) -> Result<Output> {
        read(self, deep)
    }

    /// Fully read this session using the given options.
    ///
    /// See [`read_with`].
    #[inline]
    pub fn read_with(self, options: ReadOptions) -> Result<Output> {
        read_with(self, options)
    }

    /// Render this session to a string, reading nested sessions and awaiting
    /// deferred values in output order.
    ///
    /// See [`resolve`].
    pub async fn render(self, options: ReadOptions) -> Result<String> {
        let options = options.deep(true);
        let output = read_with(self, options)?;
        resolve(output, options).await
    }
}
