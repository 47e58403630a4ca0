//! An addressable binary min-heap.

use rustc_hash::FxHashMap;

use crate::automaton::StateId;

/// A binary min-heap of states, each with a key, whose keys can be changed
/// in place.
///
/// `positions` maps each state to its slot in `heap`, so `update` and
/// `remove` are `O(log n)`.
#[derive(Debug, Clone)]
pub struct IndexedHeap<K> {
    heap: Vec<(K, StateId)>,
    positions: FxHashMap<StateId, usize>,
}

impl<K: Ord> IndexedHeap<K> {
    /// An empty heap.
    pub fn new() -> Self {
        IndexedHeap {
            heap: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    /// Number of states in the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `s` is in the heap.
    pub fn contains(&self, s: StateId) -> bool {
        self.positions.contains_key(&s)
    }

    /// The state with the least key.
    pub fn peek(&self) -> Option<(&K, StateId)> {
        self.heap.first().map(|(k, s)| (k, *s))
    }

    /// Insert `s` with `key`, or change its key if already present.
    pub fn update(&mut self, s: StateId, key: K) {
        match self.positions.get(&s).copied() {
            Some(i) => {
                self.heap[i].0 = key;
                let i = self.sift_up(i);
                self.sift_down(i);
            }
            None => {
                self.heap.push((key, s));
                let i = self.heap.len() - 1;
                self.positions.insert(s, i);
                self.sift_up(i);
            }
        }
    }

    /// Remove and return the state with the least key.
    pub fn pop(&mut self) -> Option<(K, StateId)> {
        if self.heap.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Remove `s`, if present, and return its key.
    pub fn remove(&mut self, s: StateId) -> Option<K> {
        let i = self.positions.get(&s).copied()?;
        Some(self.remove_at(i).0)
    }

    fn remove_at(&mut self, i: usize) -> (K, StateId) {
        let last = self.heap.len() - 1;
        self.swap(i, last);
        let (key, s) = self.heap.swap_remove(last);
        self.positions.remove(&s);
        if i < self.heap.len() {
            let i = self.sift_up(i);
            self.sift_down(i);
        }
        (key, s)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions.insert(self.heap[i].1, i);
        self.positions.insert(self.heap[j].1, j);
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].0 >= self.heap[parent].0 {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let (l, r) = (2 * i + 1, 2 * i + 2);
            let mut least = i;
            if l < n && self.heap[l].0 < self.heap[least].0 {
                least = l;
            }
            if r < n && self.heap[r].0 < self.heap[least].0 {
                least = r;
            }
            if least == i {
                break;
            }
            self.swap(i, least);
            i = least;
        }
    }
}

impl<K: Ord> Default for IndexedHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}
