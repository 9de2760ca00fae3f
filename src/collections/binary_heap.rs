//! `IndexedBinaryHeap`: an addressable max-heap over dense ids.
//!
//! The heap array stores `(id, key)` entries; a side table maps every id to
//! its current slot so keys can be changed in \(O(\log n)\).

use super::{AddressableHeap, NIL};
use core::fmt;

struct Entry<K> {
    id: usize,
    key: K,
}

/// A binary max-heap whose elements are addressed by id.
///
/// The top element is always the entry with the greatest key.
pub struct IndexedBinaryHeap<K> {
    data: Vec<Entry<K>>,
    pos: Vec<usize>,
}

impl<K: Ord> IndexedBinaryHeap<K> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            pos: Vec::new(),
        }
    }

    /// Creates an empty heap with room for ids `0..ids`.
    pub fn with_capacity(ids: usize) -> Self {
        Self {
            data: Vec::with_capacity(ids),
            pos: vec![NIL; ids],
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.pos[self.data[a].id] = a;
        self.pos[self.data[b].id] = b;
    }

    fn sift_up(&mut self, mut node: usize) -> usize {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.less(parent, node) {
                self.swap(parent, node);
                node = parent;
            } else {
                break;
            }
        }
        node
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut greater = left;
            if right < len && self.less(left, right) {
                greater = right;
            }

            if self.less(node, greater) {
                self.swap(node, greater);
                node = greater;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.data[a].key < self.data[b].key
    }

    fn slot(&self, id: usize) -> usize {
        match self.pos.get(id) {
            Some(&slot) if slot != NIL => slot,
            _ => panic!("id {id} is not in the heap"),
        }
    }
}

impl<K: Ord> AddressableHeap<K> for IndexedBinaryHeap<K> {
    fn with_ids(ids: usize) -> Self {
        Self::with_capacity(ids)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, id: usize) -> bool {
        self.pos.get(id).is_some_and(|&slot| slot != NIL)
    }

    fn key(&self, id: usize) -> Option<&K> {
        self.contains(id).then(|| &self.data[self.pos[id]].key)
    }

    fn push(&mut self, id: usize, key: K) {
        assert!(!self.contains(id), "id {id} is already in the heap");
        if id >= self.pos.len() {
            self.pos.resize(id + 1, NIL);
        }
        self.data.push(Entry { id, key });
        let last = self.data.len() - 1;
        self.pos[id] = last;
        self.sift_up(last);
    }

    fn peek(&self) -> Option<(usize, &K)> {
        self.data.first().map(|e| (e.id, &e.key))
    }

    fn pop(&mut self) -> Option<(usize, K)> {
        if self.data.is_empty() {
            return None;
        }
        let last_idx = self.data.len() - 1;
        self.swap(0, last_idx);
        let entry = self.data.pop()?;
        self.pos[entry.id] = NIL;
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some((entry.id, entry.key))
    }

    fn increase_key(&mut self, id: usize, key: K) {
        let slot = self.slot(id);
        assert!(key >= self.data[slot].key, "increase_key would lower the key of {id}");
        self.data[slot].key = key;
        self.sift_up(slot);
    }

    fn change_key(&mut self, id: usize, key: K) {
        let slot = self.slot(id);
        if key >= self.data[slot].key {
            self.data[slot].key = key;
            self.sift_up(slot);
        } else {
            self.data[slot].key = key;
            self.sift_down(slot);
        }
    }

    fn remove(&mut self, id: usize) -> Option<K> {
        if !self.contains(id) {
            return None;
        }
        let slot = self.pos[id];
        let last_idx = self.data.len() - 1;
        self.swap(slot, last_idx);
        let entry = self.data.pop()?;
        self.pos[id] = NIL;
        if slot < self.data.len() && self.sift_up(slot) == slot {
            self.sift_down(slot);
        }
        Some(entry.key)
    }
}

impl<K: Ord> Default for IndexedBinaryHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug + Ord> fmt::Debug for IndexedBinaryHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedBinaryHeap")
            .field("len", &self.len())
            .field("top", &self.peek())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_heap_basic() {
        let mut heap = IndexedBinaryHeap::new();
        heap.push(0, 1);
        heap.push(1, 5);
        heap.push(2, 2);
        heap.push(3, 10);

        assert_eq!(heap.peek(), Some((3, &10)));
        assert_eq!(heap.pop(), Some((3, 10)));
        assert_eq!(heap.peek(), Some((1, &5)));
        assert_eq!(heap.pop(), Some((1, 5)));
        assert_eq!(heap.pop(), Some((2, 2)));
        assert_eq!(heap.pop(), Some((0, 1)));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_binary_heap_order() {
        let data = vec![1, 10, 5, 2, 8, 3, 7];
        let mut heap = IndexedBinaryHeap::with_capacity(data.len());
        for (id, &x) in data.iter().enumerate() {
            heap.push(id, x);
        }

        let mut result = Vec::new();
        while let Some((_, x)) = heap.pop() {
            result.push(x);
        }

        let mut expected = data;
        expected.sort();
        expected.reverse();

        assert_eq!(result, expected);
    }

    #[test]
    fn test_change_key_both_directions() {
        let mut heap = IndexedBinaryHeap::with_capacity(4);
        for id in 0..4 {
            heap.push(id, id * 10);
        }
        heap.increase_key(0, 100);
        assert_eq!(heap.peek(), Some((0, &100)));
        heap.change_key(0, 5);
        assert_eq!(heap.peek(), Some((3, &30)));
        assert_eq!(heap.key(0), Some(&5));

        assert_eq!(heap.remove(3), Some(30));
        assert!(!heap.contains(3));
        assert_eq!(heap.remove(3), None);
        let order: Vec<_> = core::iter::from_fn(|| heap.pop()).map(|(id, _)| id).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "already in the heap")]
    fn test_double_push_panics() {
        let mut heap = IndexedBinaryHeap::new();
        heap.push(1, 1);
        heap.push(1, 2);
    }
}
