use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    priority: f64,
    order: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap yields the lowest priority, oldest first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// A min-priority queue over floating point priorities.
///
/// Items of equal priority pop in insertion order, which keeps searches that
/// use it deterministic.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    counter: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            counter: 0,
        }
    }

    pub fn push(&mut self, priority: f64, item: T) {
        let order = self.counter;
        self.counter += 1;
        self.heap.push(Entry { priority, order, item });
    }

    pub fn pop_min(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.priority)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
