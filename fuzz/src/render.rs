#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera::slot::ValueSlot;
use tessera::{Item, Output, ReadOptions, Session, SessionPool, Template, Unclassified, Value};

#[derive(Debug, Arbitrary)]
enum Node {
    Text(String),
    Integer(i64),
    List(Vec<Node>),
    Nested(Vec<String>, Vec<Node>),
}

/// Builds the value for a node and the text it is expected to render to.
fn build(pool: &SessionPool, node: Node, depth: usize) -> Option<(Value, String)> {
    match node {
        Node::Text(s) => Some((Value::from(s.clone()), s)),
        Node::Integer(n) => Some((Value::Integer(n), n.to_string())),
        Node::List(nodes) => {
            let mut values = Vec::new();
            let mut expected = String::new();
            for node in nodes {
                let (value, text) = build(pool, node, depth + 1)?;
                values.push(value);
                expected.push_str(&text);
            }
            Some((Value::List(values), expected))
        }
        Node::Nested(segments, nodes) => {
            if depth > 32 {
                return None;
            }
            let (session, expected) = session(pool, segments, nodes, depth + 1)?;
            Some((Value::from(session), expected))
        }
    }
}

fn session(
    pool: &SessionPool,
    segments: Vec<String>,
    nodes: Vec<Node>,
    depth: usize,
) -> Option<(Session, String)> {
    let mut b = Template::builder();
    let mut values = Vec::new();
    let mut expected = String::new();
    let mut nodes = nodes.into_iter();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            let (value, text) = build(pool, nodes.next()?, depth)?;
            b.slot(ValueSlot);
            values.push(value);
            expected.push_str(&text);
        }
        expected.push_str(&segment);
        b.text(segment);
    }
    let template = b.build().ok()?;
    let session = pool.acquire(Arc::new(template), values).ok()?;
    Some((session, expected))
}

fn resolve(output: Output, options: ReadOptions) -> String {
    match output {
        Output::Text(s) => s,
        Output::Items(items) => {
            let mut s = String::new();
            for item in items {
                match item {
                    Item::Text(t) => s.push_str(&t),
                    Item::Nested(session) => {
                        let output = session.read_with(options).unwrap();
                        s.push_str(&resolve(output, options));
                    }
                    Item::Deferred(_) => unreachable!(),
                }
            }
            s
        }
    }
}

fuzz_target!(|data: (Vec<String>, Vec<Node>, bool)| {
    let (segments, nodes, deep) = data;
    let pool = SessionPool::new();
    let Some((session, expected)) = session(&pool, segments, nodes, 0) else {
        return;
    };
    let options = ReadOptions::new()
        .deep(deep)
        .unclassified(Unclassified::Stringify);
    let output = session.read_with(options).unwrap();
    assert_eq!(resolve(output, options), expected);
});
