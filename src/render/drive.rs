use crate::chunk::{Chunk, Item, Output};
use crate::render::flatten::flatten;
use crate::render::{read_with, ReadOptions};
use crate::Result;

/// Drive a read output to its final text.
///
/// Text items are written as is, nested sessions are read deeply and deferred
/// values are awaited one at a time, strictly in output order. A deferred
/// value may itself resolve to a nested session, a collection or another
/// deferred value; these are flattened and resolved in turn.
///
/// The renderer never does this on its own, a caller that streams output
/// would typically write text as soon as it is available instead.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use tessera::{slot::ValueSlot, Deferred, ReadOptions, Session, Template, Value};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let template = Template::builder()
///     .text("Hello ")
///     .slot(ValueSlot)
///     .text("!")
///     .build()?;
/// let values = [Value::from(Deferred::ready("World"))];
/// let session = Session::new(Arc::new(template), values)?;
///
/// let output = session.read(true)?;
/// let result = tessera::resolve(output, ReadOptions::new()).await?;
/// assert_eq!(result, "Hello World!");
/// # tessera::Result::Ok(())
/// # }).unwrap();
/// ```
pub async fn resolve(output: Output, options: ReadOptions) -> Result<String> {
    let options = options.deep(true);
    let mut s = String::new();

    // Pending items in reverse so that the next one is always at the end.
    let mut pending = output.into_items();
    pending.reverse();

    while let Some(item) = pending.pop() {
        match item {
            Item::Text(text) => s.push_str(&text),
            Item::Nested(session) => {
                let output = read_with(session, options)?;
                pending.extend(output.into_items().into_iter().rev());
            }
            Item::Deferred(deferred) => {
                tracing::trace!(offset = s.len(), "awaiting deferred value");
                let value = deferred.await?;
                let mut buf = String::new();
                let mut out = Vec::new();
                flatten(&mut buf, &mut out, Chunk::from(value), true, &options)?;
                out.push(Item::Text(buf));
                pending.extend(out.into_iter().rev());
            }
        }
    }

    Ok(s)
}
