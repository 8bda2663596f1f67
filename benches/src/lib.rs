pub mod context;

use std::sync::Arc;

use tessera::slot::{self, ValueSlot};
use tessera::{Chunk, Result, Session, SessionPool, Template, Value};

use crate::context::{Page, Row};

/// The compiled templates used to render a [`Page`].
pub struct Templates {
    pub page: Arc<Template>,
    pub row: Arc<Template>,
}

impl Templates {
    pub fn new() -> Self {
        let page = Template::builder()
            .text("<html><head><title>")
            .slot(ValueSlot)
            .text("</title></head><body><table>")
            .slot(ValueSlot)
            .text("</table></body></html>")
            .build()
            .unwrap();

        let row = Template::builder()
            .text("<tr class=\"")
            .slot(slot::from_fn(2, class))
            .text("\"><td>")
            .slot(ValueSlot)
            .text("</td><td>")
            .slot(slot::from_fn(1, scalar))
            .text("</td></tr>")
            .build()
            .unwrap();

        Self {
            page: Arc::new(page),
            row: Arc::new(row),
        }
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

/// Merges a class name and a disabled flag into one attribute value.
fn class(values: &mut [Value]) -> Result<Chunk> {
    let [name, disabled] = values else {
        return Err(tessera::Error::custom("expected two values"));
    };
    let mut class = name.to_text()?;
    if let Value::Bool(true) = disabled {
        class.push_str(" disabled");
    }
    Ok(Chunk::Text(class))
}

fn scalar(values: &mut [Value]) -> Result<Chunk> {
    let text = values.iter().map(Value::to_text).collect::<Result<_>>()?;
    Ok(Chunk::Text(text))
}

/// Builds the session tree for a page, one nested session per row.
pub fn page(pool: &SessionPool, templates: &Templates, page: &Page) -> Session {
    let rows = page.rows.iter().map(|r| row(pool, templates, r));
    let values = [Value::from(page.title.as_str()), rows.collect()];
    pool.acquire(templates.page.clone(), values).unwrap()
}

fn row(pool: &SessionPool, templates: &Templates, row: &Row) -> Value {
    let values = [
        Value::from(row.class),
        Value::from(row.disabled),
        Value::from(row.name.as_str()),
        Value::from(row.age),
    ];
    let session = pool.acquire(templates.row.clone(), values).unwrap();
    Value::from(session)
}
