use std::mem;

use crate::chunk::{Chunk, Item, Output};
use crate::render::{read_with, ReadOptions, Unclassified};
use crate::{Error, Result};

/// Merge a chunk into the running text buffer.
///
/// Text is appended to `buf`. Opaque items are appended to `out` preceded by
/// the text accumulated so far, which leaves `buf` empty. With `deep` set,
/// nested sessions are read in place and their output merged recursively.
pub(crate) fn flatten(
    buf: &mut String,
    out: &mut Vec<Item>,
    chunk: Chunk,
    deep: bool,
    options: &ReadOptions,
) -> Result<()> {
    match chunk {
        Chunk::Text(s) => buf.push_str(&s),

        Chunk::Nested(session) if deep => match read_with(session, options.deep(true))? {
            Output::Text(s) => buf.push_str(&s),
            Output::Items(items) => {
                for item in items {
                    flatten(buf, out, Chunk::from(item), deep, options)?;
                }
            }
        },

        Chunk::Nested(session) => emit(buf, out, Item::Nested(session)),

        Chunk::Collection(values) => {
            let deep = deep && options.deep_collections;
            for value in values {
                flatten(buf, out, Chunk::from(value), deep, options)?;
            }
        }

        Chunk::Deferred(deferred) => emit(buf, out, Item::Deferred(deferred)),

        Chunk::Unclassified(value) => match options.unclassified {
            Unclassified::Reject => return Err(Error::unsupported(value.human())),
            Unclassified::Stringify => buf.push_str(&value.to_text()?),
        },
    }
    Ok(())
}

fn emit(buf: &mut String, out: &mut Vec<Item>, item: Item) {
    out.push(Item::Text(mem::take(buf)));
    out.push(item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deferred, ErrorKind, Value};

    fn run(chunk: impl Into<Chunk>, options: ReadOptions) -> Result<(String, Vec<Item>)> {
        let (mut buf, mut out) = (String::new(), Vec::new());
        let deep = options.is_deep();
        flatten(&mut buf, &mut out, chunk.into(), deep, &options)?;
        Ok((buf, out))
    }

    fn texts(out: &[Item]) -> Vec<Option<&str>> {
        out.iter().map(Item::as_text).collect()
    }

    #[test]
    fn flatten_text_appends() {
        let (buf, out) = run("b", ReadOptions::new()).unwrap();
        assert_eq!(buf, "b");
        assert!(out.is_empty());
    }

    #[test]
    fn flatten_deferred_flushes_buffer() {
        let chunk = Chunk::Collection(vec![Value::from("a"), Value::from(Deferred::ready("x"))]);
        let (buf, out) = run(chunk, ReadOptions::new().deep(true)).unwrap();
        assert_eq!(buf, "");
        assert_eq!(texts(&out), [Some("a"), None]);
    }

    #[test]
    fn flatten_collection_in_order() {
        let chunk = Chunk::Collection(vec![
            Value::from("a"),
            Value::from(vec!["b", "c"]),
            Value::from(Deferred::ready("x")),
            Value::from("d"),
        ]);
        let (buf, out) = run(chunk, ReadOptions::new()).unwrap();
        assert_eq!(buf, "d");
        assert_eq!(texts(&out), [Some("abc"), None]);
    }

    #[test]
    fn flatten_unclassified_reject() {
        let err = run(Value::Integer(7), ReadOptions::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedChunkType);
        assert_eq!(err.to_string(), "unsupported chunk type integer");
    }

    #[test]
    fn flatten_unclassified_stringify() {
        let options = ReadOptions::new().unclassified(Unclassified::Stringify);
        let chunk = Chunk::Collection(vec![
            Value::Integer(7),
            Value::None,
            Value::Bool(true),
            Value::Float(1.5),
        ]);
        let (buf, _) = run(chunk, options).unwrap();
        assert_eq!(buf, "7true1.5");

        let err = run(Value::Map(Default::default()), options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedChunkType);
    }
}
