//! Result aggregator for ordering parallel board results
//!
//! Buffers and orders results for streaming output using two min-heaps:
//! - One for expected input positions (what we're waiting for)
//! - One for received results (buffered until their turn)

use crate::executor::BoardResult;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Wrapper for min-heap ordering of BoardResult by input position
struct OrderedResult(BoardResult);

impl Ord for OrderedResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse ordering for min-heap (smallest first)
        other.0.index.cmp(&self.0.index)
    }
}

impl PartialOrd for OrderedResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for OrderedResult {}

impl PartialEq for OrderedResult {
    fn eq(&self, other: &Self) -> bool {
        self.0.index == other.0.index
    }
}

/// Aggregator that buffers results and emits them in input order
pub struct ResultAggregator {
    /// Min-heap of expected positions (next to output is at top)
    expected: BinaryHeap<Reverse<usize>>,
    /// Min-heap of received results waiting to be output
    pending: BinaryHeap<OrderedResult>,
}

impl ResultAggregator {
    /// Create aggregator from the positions that will arrive
    pub fn new(expected: impl IntoIterator<Item = usize>) -> Self {
        Self {
            expected: expected.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: BoardResult) -> Vec<BoardResult> {
        self.pending.push(OrderedResult(result));

        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(top_pending)) =
            (self.expected.peek(), self.pending.peek())
        {
            if top_pending.0.index != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(OrderedResult(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<BoardResult> {
        let mut results: Vec<_> = self.pending.drain().map(|o| o.0).collect();
        results.sort_by_key(|r| r.index);
        results
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
