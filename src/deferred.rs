//! Defines [`Deferred`], a value that is not available at render time.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::{Result, Value};

type BoxFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send + 'static>>;

/// A value that will only become available later.
///
/// The renderer never waits on a deferred value. Instead it surfaces it to
/// the caller at its position in the output, and the caller awaits it and
/// splices the resolved value back in.
///
/// # Examples
///
/// ```
/// use tessera::{Deferred, Value};
///
/// let deferred = Deferred::new(async { Ok(Value::from("later")) });
/// ```
pub struct Deferred {
    fut: BoxFuture,
}

impl Deferred {
    /// Wrap a future that resolves to a value.
    pub fn new<F>(fut: F) -> Self
    where
        F: Future<Output = Result<Value>> + Send + 'static,
    {
        Self { fut: Box::pin(fut) }
    }

    /// A deferred value that is already resolved.
    pub fn ready(value: impl Into<Value>) -> Self {
        Self::new(std::future::ready(Ok(value.into())))
    }
}

impl Future for Deferred {
    type Output = Result<Value>;

    #[inline]
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.fut.as_mut().poll(cx)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(<pending>)")
    }
}
