//! Random data rendered by the benchmarks.

use rand::distributions::{Alphanumeric, DistString};
use rand::Rng;

/// A table of users rendered into a single page.
pub struct Page {
    pub title: String,
    pub rows: Vec<Row>,
}

/// One table row. Its class attribute is built from two interpolations.
pub struct Row {
    pub class: &'static str,
    pub disabled: bool,
    pub name: String,
    pub age: u32,
}

impl Page {
    /// Generates a page with `n` rows.
    pub fn random(n: usize) -> Self {
        let mut rng = rand::thread_rng();
        let rows = (0..n)
            .map(|i| Row {
                class: if i % 2 == 0 { "even" } else { "odd" },
                disabled: rng.gen_bool(0.25),
                name: Alphanumeric.sample_string(&mut rng, 16),
                age: rng.gen_range(18..90),
            })
            .collect();
        Self {
            title: Alphanumeric.sample_string(&mut rng, 24),
            rows,
        }
    }
}
