//! Reusable cell registration and the reuse pool.

use crate::cell::ListItem;
use std::collections::HashMap;

/// Builds a fresh row for a reuse identifier.
pub type CellFactory = Box<dyn Fn() -> Box<dyn ListItem> + Send>;

/// Factories keyed by reuse identifier, plus recycled rows waiting to be reused.
#[derive(Default)]
pub(crate) struct CellRegistry {
    factories: HashMap<String, CellFactory>,
    pool: HashMap<String, Vec<Box<dyn ListItem>>>,
}

impl CellRegistry {
    /// Registers `factory` under `identifier`, replacing any earlier registration.
    ///
    /// Rows pooled under a replaced identifier are discarded.
    pub(crate) fn register(&mut self, identifier: &str, factory: CellFactory) {
        self.pool.remove(identifier);
        self.factories.insert(identifier.to_string(), factory);
    }

    pub(crate) fn is_registered(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Hands out a recycled row, or builds one. `None` for unknown identifiers.
    pub(crate) fn dequeue(&mut self, identifier: &str) -> Option<Box<dyn ListItem>> {
        if let Some(mut recycled) = self.pool.get_mut(identifier).and_then(Vec::pop) {
            recycled.prepare_for_reuse();
            return Some(recycled);
        }
        self.factories.get(identifier).map(|factory| factory())
    }

    /// Returns a row to the pool for later reuse.
    pub(crate) fn recycle(&mut self, identifier: String, item: Box<dyn ListItem>) {
        if self.factories.contains_key(&identifier) {
            self.pool.entry(identifier).or_default().push(item);
        }
    }

    #[cfg(test)]
    pub(crate) fn pooled(&self, identifier: &str) -> usize {
        self.pool.get(identifier).map_or(0, Vec::len)
    }
}
