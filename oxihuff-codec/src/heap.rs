//! Bounded array-based min-heap used to order tree nodes by weight.
//!
//! Ordering is by weight only. Items of equal weight come out in whatever
//! order the sift operations leave them; insertion order is not preserved.

use oxihuff_core::error::{OxiHuffError, Result};

/// Maximum number of items the heap can hold (one per byte value).
pub const HEAP_CAPACITY: usize = 256;

/// Something with a weight the heap can order by.
pub trait Weighted {
    /// The ordering key; smaller comes out first.
    fn weight(&self) -> u64;
}

/// A min-heap with a fixed capacity of [`HEAP_CAPACITY`] items.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T: Weighted> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            elements: Vec::with_capacity(HEAP_CAPACITY),
        }
    }

    /// Number of items in the heap.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Maximum number of items.
    pub fn capacity(&self) -> usize {
        HEAP_CAPACITY
    }

    /// Peek at the minimum item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Insert an item and sift it up.
    ///
    /// Fails with [`OxiHuffError::CapacityExceeded`] when the heap is full;
    /// the heap is left untouched in that case.
    pub fn insert(&mut self, item: T) -> Result<()> {
        if self.elements.len() >= HEAP_CAPACITY {
            return Err(OxiHuffError::capacity_exceeded(HEAP_CAPACITY));
        }

        self.elements.push(item);
        let mut i = self.elements.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.elements[i].weight() < self.elements[parent].weight() {
                self.elements.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Remove and return the minimum item.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }

        // Moves the last element into the root slot.
        let min = self.elements.swap_remove(0);
        let size = self.elements.len();
        let mut i = 0;

        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            if left >= size {
                break;
            }

            let smaller = if right == size {
                left
            } else if self.elements[left].weight() < self.elements[right].weight() {
                left
            } else {
                right
            };

            if self.elements[i].weight() > self.elements[smaller].weight() {
                self.elements.swap(i, smaller);
                i = smaller;
            } else {
                break;
            }
        }

        Some(min)
    }

    /// Check the heap property (every parent no heavier than its children).
    pub fn is_valid(&self) -> bool {
        (1..self.elements.len())
            .all(|i| self.elements[(i - 1) / 2].weight() <= self.elements[i].weight())
    }
}

impl<T: Weighted> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
