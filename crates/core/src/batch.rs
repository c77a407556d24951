//! Grouping texts into size-bounded provider requests.

use crate::types::{TranslationOptions, DEFAULT_ITEM_OVERHEAD, DEFAULT_MAX_CHARS};

/// Greedy planner that packs consecutive texts into batches.
///
/// A batch with more than one item never costs more than `max_chars`, where
/// each item costs its length in characters plus `item_overhead`. An item
/// that alone exceeds the budget still gets a batch of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlanner {
    max_chars: usize,
    item_overhead: usize,
}

impl Default for BatchPlanner {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            item_overhead: DEFAULT_ITEM_OVERHEAD,
        }
    }
}

impl BatchPlanner {
    /// Create a planner with the given budget and per-item overhead.
    pub fn new(max_chars: usize, item_overhead: usize) -> Self {
        Self {
            max_chars,
            item_overhead,
        }
    }

    /// Create a planner from translation options.
    pub fn from_options(options: &TranslationOptions) -> Self {
        Self::new(options.max_chars, options.item_overhead)
    }

    /// Cost of one item within a batch.
    pub fn item_cost(&self, text: &str) -> usize {
        text.chars().count() + self.item_overhead
    }

    /// Split `items` into contiguous, order-preserving batches.
    ///
    /// Empty input yields no batches.
    pub fn plan<'a, S: AsRef<str>>(&self, items: &'a [S]) -> Vec<&'a [S]> {
        let mut batches = Vec::new();
        let mut batch_start = 0;
        let mut batch_cost = 0;

        for (idx, item) in items.iter().enumerate() {
            let cost = self.item_cost(item.as_ref());
            if batch_cost + cost > self.max_chars && idx > batch_start {
                batches.push(&items[batch_start..idx]);
                batch_start = idx;
                batch_cost = cost;
            } else {
                batch_cost += cost;
            }
        }

        if batch_start < items.len() {
            batches.push(&items[batch_start..]);
        }

        batches
    }
}
