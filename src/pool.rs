//! Defines a [`SessionPool`], a free-list of retired session storage.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::session::State;
use crate::{Result, Session, Template, Value};

/// A shared store of retired sessions.
///
/// Rendering typically creates one short-lived session per template
/// instantiation. Acquiring sessions from a pool reuses the storage of
/// sessions that have been pulled to exhaustion instead of allocating.
///
/// The pool is a cheap handle, cloning it shares the same free-list. Access
/// is serialized with a mutex so one pool may serve concurrent renderers;
/// give each worker its own pool to avoid contention. The pool is unbounded
/// and never evicts. Retired sessions keep room for up to 64 values so a
/// single very wide template does not pin its storage in the pool.
#[derive(Clone)]
pub struct SessionPool {
    free: Option<Arc<Mutex<Vec<Box<State>>>>>,
}

impl Default for SessionPool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SessionPool {
    /// Construct a new, empty pool.
    #[inline]
    pub fn new() -> Self {
        Self {
            free: Some(Arc::default()),
        }
    }

    /// Construct a pool that never retains retired sessions.
    ///
    /// Every acquire allocates a fresh session.
    #[inline]
    pub fn disabled() -> Self {
        Self { free: None }
    }

    /// Acquire a session for the given template and values.
    ///
    /// Reuses the most recently retired session if there is one, otherwise a
    /// new session is allocated. The session is returned to this pool once it
    /// has been pulled to exhaustion. Sessions that are dropped before that
    /// are simply deallocated.
    ///
    /// # Errors
    ///
    /// If the number of values does not equal the template's
    /// [`width`][Template::width].
    pub fn acquire<I>(&self, template: Arc<Template>, values: I) -> Result<Session>
    where
        I: IntoIterator<Item = Value>,
    {
        let recycled = self.lock().and_then(|mut free| free.pop());
        let state = match recycled {
            Some(state) => {
                tracing::trace!(idle = self.idle(), "recycled render session");
                state
            }
            None => {
                tracing::trace!("allocated render session");
                Box::new(State::empty())
            }
        };
        match State::init(state, template, values) {
            Ok(state) => {
                let pool = self.free.as_ref().map(|_| self.clone());
                Ok(Session::from_state(state, pool))
            }
            Err((state, err)) => {
                self.retire(state);
                Err(err)
            }
        }
    }

    /// Returns the number of retired sessions available for reuse.
    pub fn idle(&self) -> usize {
        self.lock().map(|free| free.len()).unwrap_or(0)
    }

    /// Push reset session storage onto the free-list.
    pub(crate) fn retire(&self, state: Box<State>) {
        if let Some(mut free) = self.lock() {
            free.push(state);
            tracing::trace!(idle = free.len(), "retired render session");
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, Vec<Box<State>>>> {
        // The free-list holds only reset state so a panic while the lock was
        // held cannot leave it inconsistent.
        self.free
            .as_ref()
            .map(|free| free.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl fmt::Debug for SessionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionPool")
            .field("enabled", &self.free.is_some())
            .field("idle", &self.idle())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RETAINED_VALUES;
    use crate::slot::{self, ValueSlot};
    use crate::{Chunk, ErrorKind};

    fn template(open: &'static str, close: &'static str) -> Arc<Template> {
        let t = Template::builder()
            .text(open)
            .slot(ValueSlot)
            .text(close)
            .build()
            .unwrap();
        Arc::new(t)
    }

    fn acquire(pool: &SessionPool, open: &'static str, close: &'static str) -> Session {
        let values = [Value::from("x")];
        pool.acquire(template(open, close), values).unwrap()
    }

    fn drain(mut session: Session) -> String {
        let mut s = String::new();
        while let Some(chunk) = session.next_chunk().unwrap() {
            match chunk {
                Chunk::Text(t) => s.push_str(&t),
                chunk => panic!("unexpected chunk {chunk:?}"),
            }
        }
        s
    }

    #[test]
    fn pool_recycles_exhausted_sessions() {
        let pool = SessionPool::new();
        assert_eq!(pool.idle(), 0);

        let session = acquire(&pool, "<a>", "</a>");
        assert_eq!(pool.idle(), 0);
        assert_eq!(drain(session), "<a>x</a>");
        assert_eq!(pool.idle(), 1);

        let session = acquire(&pool, "<b>", "</b>");
        assert_eq!(pool.idle(), 0);
        assert_eq!(drain(session), "<b>x</b>");
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn pool_recycled_state_is_reset() {
        let pool = SessionPool::new();
        let session = acquire(&pool, "<a>", "</a>");
        drain(session);

        let free = pool.lock().unwrap();
        let state = &free[0];
        assert!(state.template.is_none());
        assert!(state.values.is_empty());
        assert_eq!(state.cursor, crate::session::Cursor::Text(0));
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn pool_recycled_state_drops_excess_capacity() {
        let pool = SessionPool::new();
        let wide = slot::from_fn(10_000, |_: &mut [Value]| Chunk::from(""));
        let t = Template::builder().text("a").slot(wide).text("b").build();
        let values = std::iter::repeat_with(Value::default).take(10_000);
        let session = pool.acquire(Arc::new(t.unwrap()), values).unwrap();
        assert_eq!(drain(session), "ab");

        let free = pool.lock().unwrap();
        assert!(free[0].values.capacity() <= RETAINED_VALUES);
    }

    #[test]
    fn pool_abandoned_session_is_not_recycled() {
        let pool = SessionPool::new();
        let mut session = acquire(&pool, "<a>", "</a>");
        session.next_chunk().unwrap();
        drop(session);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn pool_acquire_err_value_count_keeps_storage() {
        let pool = SessionPool::new();
        let err = pool.acquire(template("<a>", "</a>"), []).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueCount);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn pool_disabled_never_retains() {
        let pool = SessionPool::disabled();
        let session = acquire(&pool, "<a>", "</a>");
        assert_eq!(drain(session), "<a>x</a>");
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn pool_clones_share_free_list() {
        let pool = SessionPool::new();
        let other = pool.clone();
        let session = acquire(&other, "<a>", "</a>");
        drain(session);
        assert_eq!(pool.idle(), 1);
    }
}
