#![allow(dead_code)]

use std::sync::Arc;

use tessera::slot::{self, ValueSlot};
use tessera::{Chunk, Result, Session, SessionPool, Slot, Template, Value};

/// Builds a template with a value slot between each pair of segments.
pub fn template(segments: &[&'static str]) -> Arc<Template> {
    let mut b = Template::builder();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            b.slot(ValueSlot);
        }
        b.text(*segment);
    }
    Arc::new(b.build().unwrap())
}

/// A session rendering `values` into `segments`.
pub fn session<I>(segments: &[&'static str], values: I) -> Session
where
    I: IntoIterator<Item = Value>,
{
    Session::new(template(segments), values).unwrap()
}

/// A pooled session rendering `values` into `segments`.
pub fn pooled<I>(pool: &SessionPool, segments: &[&'static str], values: I) -> Session
where
    I: IntoIterator<Item = Value>,
{
    pool.acquire(template(segments), values).unwrap()
}

/// A slot that formats its scalar values, joined by `sep`.
pub fn join(width: usize, sep: &'static str) -> impl Slot {
    slot::from_fn(width, move |values: &mut [Value]| -> Result<Chunk> {
        let parts = values
            .iter()
            .map(Value::to_text)
            .collect::<Result<Vec<_>>>()?;
        Ok(Chunk::Text(parts.join(sep)))
    })
}

/// Installs a test subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
