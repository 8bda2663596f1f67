//! Defines a render [`Session`], a single-use pull cursor over the output of
//! one template instantiation.

use std::fmt;
use std::sync::Arc;

use crate::{Chunk, Error, Result, SessionPool, Template, Value};

/// A pairing of a compiled template with one set of interpolation values.
///
/// A session is consumed by pulling chunks from it with
/// [`next_chunk`][Session::next_chunk] until it returns `None`, or all at once
/// using [`read`][Session::read]. Once exhausted the session releases its
/// template and values, and if it was acquired from a [`SessionPool`] its
/// storage is returned to that pool. Pulling from an exhausted session is an
/// error.
pub struct Session {
    state: Option<Box<State>>,
    pool: Option<SessionPool>,
}

/// The recyclable part of a session.
pub(crate) struct State {
    pub(crate) template: Option<Arc<Template>>,
    pub(crate) values: Vec<Value>,
    pub(crate) cursor: Cursor,
    /// Index of the first value not yet consumed by a slot.
    pub(crate) offset: usize,
}

/// What the next pull will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cursor {
    Text(usize),
    Slot(usize),
}

/// The most value slots a reset state keeps allocated.
pub(crate) const RETAINED_VALUES: usize = 64;

enum Step {
    Chunk(Chunk),
    Exhausted,
}

impl Session {
    /// Construct a session that is not backed by a pool.
    ///
    /// Fails if the number of values does not equal the template's
    /// [`width`][Template::width].
    pub fn new<I>(template: Arc<Template>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let state = Box::new(State::empty());
        match State::init(state, template, values) {
            Ok(state) => Ok(Self::from_state(state, None)),
            Err((_, err)) => Err(err),
        }
    }

    pub(crate) fn from_state(state: Box<State>, pool: Option<SessionPool>) -> Self {
        Self {
            state: Some(state),
            pool,
        }
    }

    /// Returns `true` if the session has been pulled to the end.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.state.is_none()
    }

    /// Pull the next chunk.
    ///
    /// Text segments and slot resolutions alternate, starting and ending with
    /// text. Returns `Ok(None)` once every slot has been resolved and the
    /// final segment emitted, at which point the session is retired.
    ///
    /// # Errors
    ///
    /// - If the session was already exhausted.
    /// - If a slot fails to resolve its values.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        let state = match self.state.as_deref_mut() {
            Some(state) => state,
            None => {
                tracing::debug!("pull from exhausted render session");
                return Err(Error::use_after_exhaustion());
            }
        };
        match state.step()? {
            Step::Chunk(chunk) => Ok(Some(chunk)),
            Step::Exhausted => {
                self.retire();
                Ok(None)
            }
        }
    }

    fn retire(&mut self) {
        if let Some(mut state) = self.state.take() {
            state.reset();
            if let Some(pool) = self.pool.take() {
                pool.retire(state);
            }
        }
    }
}

impl State {
    pub(crate) fn empty() -> Self {
        Self {
            template: None,
            values: Vec::new(),
            cursor: Cursor::Text(0),
            offset: 0,
        }
    }

    /// Occupy a reset state with a template and its values.
    ///
    /// On failure the state is reset and handed back so that it can be
    /// recycled.
    pub(crate) fn init<I>(
        mut state: Box<Self>,
        template: Arc<Template>,
        values: I,
    ) -> std::result::Result<Box<Self>, (Box<Self>, Error)>
    where
        I: IntoIterator<Item = Value>,
    {
        debug_assert!(state.template.is_none() && state.values.is_empty());
        state.values.extend(values);
        if state.values.len() != template.width() {
            let err = Error::value_count(template.width(), state.values.len());
            state.reset();
            return Err((state, err));
        }
        state.template = Some(template);
        Ok(state)
    }

    /// Drop the template and values, and rewind the cursor.
    ///
    /// The value storage is kept for the next occupant, shrunk to at most
    /// [`RETAINED_VALUES`] slots.
    pub(crate) fn reset(&mut self) {
        self.values.clear();
        self.values.shrink_to(RETAINED_VALUES);
        self.template = None;
        self.cursor = Cursor::Text(0);
        self.offset = 0;
    }

    fn step(&mut self) -> Result<Step> {
        let Self {
            template,
            values,
            cursor,
            offset,
        } = self;
        let template = match template.as_deref() {
            Some(template) => template,
            None => return Err(Error::use_after_exhaustion()),
        };
        match *cursor {
            Cursor::Text(i) => {
                *cursor = Cursor::Slot(i);
                Ok(Step::Chunk(Chunk::Text(template.segment(i).to_owned())))
            }
            // There is always one more segment than slot so running out of
            // slots means the final segment has been emitted.
            Cursor::Slot(i) => match template.slot(i) {
                None => Ok(Step::Exhausted),
                Some(slot) => {
                    let len = values.len();
                    let end = *offset + slot.width();
                    let Some(assigned) = values.get_mut(*offset..end) else {
                        let err = Error::value_count(end, len);
                        return Err(template.enrich(err, i));
                    };
                    *offset = end;
                    *cursor = Cursor::Text(i + 1);
                    let chunk = slot.resolve(assigned);
                    // Consumed values are released straight away.
                    assigned.fill_with(Value::default);
                    match chunk {
                        Ok(chunk) => Ok(Step::Chunk(chunk)),
                        Err(err) => Err(template.enrich(err, i)),
                    }
                }
            },
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Session");
        match &self.state {
            Some(state) => d
                .field("template", &state.template)
                .field("values", &state.values.len())
                .field("cursor", &state.cursor),
            None => d.field("exhausted", &true),
        };
        d.field("pooled", &self.pool.is_some()).finish()
    }
}
