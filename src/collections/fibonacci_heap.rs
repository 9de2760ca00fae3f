//! `FibonacciHeap`: an addressable max-heap with \(O(1)\) amortized
//! `increase_key`.
//!
//! Nodes live in an arena indexed by id; sibling rings and parent/child
//! links are arena indices, so the structure owns no per-node allocation.
//! Because the root list is just a ring of indices, disjoint id ranges can be
//! linked by independent workers and spliced together afterwards
//! ([`FibonacciHeap::par_from_fn`]).

use super::{AddressableHeap, NIL};
use core::fmt;
use rayon::prelude::*;

#[derive(Clone, Copy)]
struct Links {
    parent: usize,
    child: usize,
    left: usize,
    right: usize,
    degree: usize,
    marked: bool,
}

impl Links {
    const fn single(id: usize) -> Self {
        Self {
            parent: NIL,
            child: NIL,
            left: id,
            right: id,
            degree: 0,
            marked: false,
        }
    }
}

/// A Fibonacci max-heap whose elements are addressed by id.
pub struct FibonacciHeap<K> {
    keys: Vec<Option<K>>,
    links: Vec<Links>,
    max: usize,
    len: usize,
}

impl<K: Ord> FibonacciHeap<K> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            links: Vec::new(),
            max: NIL,
            len: 0,
        }
    }

    /// Creates an empty heap with room for ids `0..ids`.
    pub fn with_capacity(ids: usize) -> Self {
        let mut heap = Self::new();
        heap.grow(ids);
        heap
    }

    fn grow(&mut self, ids: usize) {
        if ids > self.keys.len() {
            let from = self.links.len();
            self.keys.resize_with(ids, || None);
            self.links.extend((from..ids).map(Links::single));
        }
    }

    #[inline]
    fn key_of(&self, id: usize) -> &K {
        match &self.keys[id] {
            Some(k) => k,
            None => unreachable!("slot {id} is not in the heap"),
        }
    }

    /// Inserts the single node `b` into the ring right after `a`.
    fn splice(&mut self, a: usize, b: usize) {
        let r = self.links[a].right;
        self.links[b].left = a;
        self.links[b].right = r;
        self.links[a].right = b;
        self.links[r].left = b;
    }

    /// Detaches `x` from its ring, leaving it as a ring of one.
    fn unlink(&mut self, x: usize) {
        let Links { left, right, .. } = self.links[x];
        self.links[left].right = right;
        self.links[right].left = left;
        self.links[x].left = x;
        self.links[x].right = x;
    }

    fn add_root(&mut self, id: usize) {
        self.links[id].parent = NIL;
        self.links[id].marked = false;
        if self.max == NIL {
            self.links[id].left = id;
            self.links[id].right = id;
            self.max = id;
        } else {
            self.splice(self.max, id);
            if self.key_of(id) > self.key_of(self.max) {
                self.max = id;
            }
        }
    }

    /// Collects the ids of the ring that contains `start`.
    fn ring(&self, start: usize) -> Vec<usize> {
        let mut out = Vec::new();
        if start == NIL {
            return out;
        }
        let mut cur = start;
        loop {
            out.push(cur);
            cur = self.links[cur].right;
            if cur == start {
                break;
            }
        }
        out
    }

    /// Makes root `y` a child of root `x`.
    fn link(&mut self, y: usize, x: usize) {
        self.links[y].parent = x;
        self.links[y].marked = false;
        let child = self.links[x].child;
        if child == NIL {
            self.links[y].left = y;
            self.links[y].right = y;
            self.links[x].child = y;
        } else {
            self.splice(child, y);
        }
        self.links[x].degree += 1;
    }

    fn consolidate(&mut self) {
        let roots = self.ring(self.max);
        let mut table: Vec<usize> = Vec::new();

        for w in roots {
            let mut x = w;
            let mut d = self.links[x].degree;
            loop {
                if d >= table.len() {
                    table.resize(d + 1, NIL);
                }
                let y = table[d];
                if y == NIL {
                    break;
                }
                let (hi, lo) = if self.key_of(y) > self.key_of(x) { (y, x) } else { (x, y) };
                self.link(lo, hi);
                x = hi;
                table[d] = NIL;
                d += 1;
            }
            table[d] = x;
        }

        self.max = NIL;
        for x in table.into_iter().filter(|&x| x != NIL) {
            self.links[x].left = x;
            self.links[x].right = x;
            self.add_root(x);
        }
    }

    /// Moves `x` from the child list of `parent` to the root list.
    fn cut(&mut self, x: usize, parent: usize) {
        if self.links[x].right == x {
            self.links[parent].child = NIL;
        } else {
            if self.links[parent].child == x {
                self.links[parent].child = self.links[x].right;
            }
            self.unlink(x);
        }
        self.links[parent].degree -= 1;
        self.add_root(x);
    }

    fn cascading_cut(&mut self, mut y: usize) {
        loop {
            let z = self.links[y].parent;
            if z == NIL {
                break;
            }
            if !self.links[y].marked {
                self.links[y].marked = true;
                break;
            }
            self.cut(y, z);
            y = z;
        }
    }

    fn assert_live(&self, id: usize) {
        assert!(self.contains(id), "id {id} is not in the heap");
    }

    /// Moves every entry of `other` into `self` by concatenating root rings.
    ///
    /// # Panics
    /// Panics if an id is present in both heaps.
    pub fn meld(&mut self, mut other: Self) {
        if other.max == NIL {
            return;
        }
        self.grow(other.keys.len());
        for (id, slot) in other.keys.iter_mut().enumerate() {
            if let Some(key) = slot.take() {
                assert!(self.keys[id].is_none(), "id {id} is in both heaps");
                self.keys[id] = Some(key);
                self.links[id] = other.links[id];
            }
        }
        self.len += other.len;

        if self.max == NIL {
            self.max = other.max;
            return;
        }
        let (a, b) = (self.max, other.max);
        let a_right = self.links[a].right;
        let b_left = self.links[b].left;
        self.links[a].right = b;
        self.links[b].left = a;
        self.links[b_left].right = a_right;
        self.links[a_right].left = b_left;
        if self.key_of(b) > self.key_of(a) {
            self.max = b;
        }
    }
}

impl<K: Ord + Send + Sync> FibonacciHeap<K> {
    /// Builds a heap holding every id in `0..n`, computing keys in parallel.
    ///
    /// Each worker links one chunk of ids into a private root ring and
    /// reports that ring's maximum; the rings are spliced together
    /// sequentially afterwards, so construction takes no locks.
    ///
    /// # Panics
    /// Panics if `chunk == 0`.
    pub fn par_from_fn<F>(n: usize, chunk: usize, key: F) -> Self
    where
        F: Fn(usize) -> K + Sync,
    {
        assert!(chunk != 0, "chunk must be > 0");
        let keys: Vec<Option<K>> = (0..n).into_par_iter().map(|id| Some(key(id))).collect();
        let mut links = vec![Links::single(NIL); n];

        let partial: Vec<(usize, usize, usize)> = links
            .par_chunks_mut(chunk)
            .enumerate()
            .map(|(ci, slice)| {
                let base = ci * chunk;
                let len = slice.len();
                let mut best = base;
                for (j, l) in slice.iter_mut().enumerate() {
                    *l = Links::single(base + j);
                    l.left = base + (j + len - 1) % len;
                    l.right = base + (j + 1) % len;
                    if keys[base + j] > keys[best] {
                        best = base + j;
                    }
                }
                (base, base + len - 1, best)
            })
            .collect();

        let mut heap = Self {
            keys,
            links,
            max: NIL,
            len: n,
        };

        let mut ring: Option<(usize, usize)> = None;
        for (first, last, best) in partial {
            match ring {
                None => ring = Some((first, last)),
                Some((head, tail)) => {
                    heap.links[tail].right = first;
                    heap.links[first].left = tail;
                    heap.links[last].right = head;
                    heap.links[head].left = last;
                    ring = Some((head, last));
                }
            }
            if heap.max == NIL || heap.key_of(best) > heap.key_of(heap.max) {
                heap.max = best;
            }
        }
        heap
    }
}

impl<K: Ord> AddressableHeap<K> for FibonacciHeap<K> {
    fn with_ids(ids: usize) -> Self {
        Self::with_capacity(ids)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn contains(&self, id: usize) -> bool {
        self.keys.get(id).is_some_and(Option::is_some)
    }

    fn key(&self, id: usize) -> Option<&K> {
        self.keys.get(id).and_then(Option::as_ref)
    }

    fn push(&mut self, id: usize, key: K) {
        assert!(!self.contains(id), "id {id} is already in the heap");
        self.grow(id + 1);
        self.keys[id] = Some(key);
        self.links[id] = Links::single(id);
        self.add_root(id);
        self.len += 1;
    }

    fn peek(&self) -> Option<(usize, &K)> {
        (self.max != NIL).then(|| (self.max, self.key_of(self.max)))
    }

    fn pop(&mut self) -> Option<(usize, K)> {
        let z = self.max;
        if z == NIL {
            return None;
        }

        for c in self.ring(self.links[z].child) {
            self.links[c].parent = NIL;
            self.links[c].marked = false;
            self.splice(z, c);
        }
        self.links[z].child = NIL;
        self.links[z].degree = 0;

        if self.links[z].right == z {
            self.max = NIL;
        } else {
            self.max = self.links[z].right;
            self.unlink(z);
            self.consolidate();
        }

        self.len -= 1;
        let key = self.keys[z].take()?;
        Some((z, key))
    }

    fn increase_key(&mut self, id: usize, key: K) {
        self.assert_live(id);
        assert!(&key >= self.key_of(id), "increase_key would lower the key of {id}");
        self.keys[id] = Some(key);

        let parent = self.links[id].parent;
        if parent != NIL && self.key_of(id) > self.key_of(parent) {
            self.cut(id, parent);
            self.cascading_cut(parent);
        }
        if self.key_of(id) > self.key_of(self.max) {
            self.max = id;
        }
    }

    fn change_key(&mut self, id: usize, key: K) {
        self.assert_live(id);
        if &key >= self.key_of(id) {
            self.increase_key(id, key);
        } else {
            self.remove(id);
            self.push(id, key);
        }
    }

    fn remove(&mut self, id: usize) -> Option<K> {
        if !self.contains(id) {
            return None;
        }
        let parent = self.links[id].parent;
        if parent != NIL {
            self.cut(id, parent);
            self.cascading_cut(parent);
        }
        // Force `id` to the top; `pop` recomputes the real maximum while consolidating.
        self.max = id;
        self.pop().map(|(_, key)| key)
    }
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug + Ord> fmt::Debug for FibonacciHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("top", &self.peek())
            .finish()
    }
}
