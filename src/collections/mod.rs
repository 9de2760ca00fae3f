//! Addressable priority queues.
//!
//! Both heaps are max-heaps over dense integer ids whose keys can be changed
//! after insertion. They share the [`AddressableHeap`] contract so the sparse
//! DSatur selector can be instantiated with either discipline:
//! - `binary_heap`: array-backed binary heap with a position table
//! - `fibonacci_heap`: arena-backed Fibonacci heap with parallel bulk build

pub mod binary_heap;
pub mod fibonacci_heap;

pub use binary_heap::IndexedBinaryHeap;
pub use fibonacci_heap::FibonacciHeap;

/// Sentinel for "no slot" / "no link".
pub(crate) const NIL: usize = usize::MAX;

/// A max-priority queue whose entries are addressed by id.
///
/// Each id appears at most once. The entry with the greatest key is on top.
pub trait AddressableHeap<K: Ord> {
    /// Creates an empty heap sized for ids `0..ids`.
    fn with_ids(ids: usize) -> Self
    where
        Self: Sized;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the heap holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` is currently in the heap.
    fn contains(&self, id: usize) -> bool;

    /// Current key of `id`, if present.
    fn key(&self, id: usize) -> Option<&K>;

    /// Inserts `id` with `key`.
    ///
    /// # Panics
    /// Panics if `id` is already present.
    fn push(&mut self, id: usize, key: K);

    /// Returns the top entry without removing it.
    fn peek(&self) -> Option<(usize, &K)>;

    /// Removes and returns the top entry.
    fn pop(&mut self) -> Option<(usize, K)>;

    /// Raises the key of `id`.
    ///
    /// # Panics
    /// Panics if `id` is absent or `key` is lower than the current key.
    fn increase_key(&mut self, id: usize, key: K);

    /// Replaces the key of `id`, moving it in whichever direction is needed.
    ///
    /// # Panics
    /// Panics if `id` is absent.
    fn change_key(&mut self, id: usize, key: K);

    /// Removes `id` and returns its key, or `None` if it was absent.
    fn remove(&mut self, id: usize) -> Option<K>;
}
