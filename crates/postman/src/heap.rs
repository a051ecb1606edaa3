//! Indexed binary min-heap over `(f64 key, usize satellite)` pairs.
//!
//! Purpose
//! - Decrease-key support for Dijkstra and the degree-ordered greedy warm
//!   start of the matching. Satellites are dense ids (vertex or edge indices),
//!   so positions are tracked in a plain `Vec` instead of a map.
//!
//! Conventions
//! - The heap array is 1-based (`heap[0]` is an unused slot), so the parent
//!   of `i` is `i / 2` and its children are `2i`, `2i + 1`.
//! - Keys are compared with the shared tolerance (`cfg::greater`); keys within
//!   `EPS` of each other do not swap, which keeps sift loops finite under
//!   rounding noise.
//! - Storage grows on demand when a satellite beyond the current capacity is
//!   inserted.

use crate::cfg::greater;
use crate::error::{Error, Result};

/// Binary min-heap addressed by satellite id.
///
/// Invariants:
/// - each satellite appears at most once;
/// - `pos[s] == Some(i)` iff `heap[i] == s`;
/// - `heap.len() == size + 1`.
#[derive(Clone, Debug)]
pub struct IndexedMinHeap {
    key: Vec<f64>,
    pos: Vec<Option<usize>>,
    heap: Vec<usize>,
    size: usize,
}

impl Default for IndexedMinHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexedMinHeap {
    pub fn new() -> Self {
        Self {
            key: Vec::new(),
            pos: Vec::new(),
            heap: vec![0],
            size: 0,
        }
    }

    /// Heap with storage reserved for satellites `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut heap = Vec::with_capacity(capacity + 1);
        heap.push(0);
        Self {
            key: vec![0.0; capacity],
            pos: vec![None; capacity],
            heap,
            size: 0,
        }
    }

    /// Inserts satellite `s` with key `k`. Fails if `s` is already present.
    pub fn insert(&mut self, k: f64, s: usize) -> Result<()> {
        if s >= self.pos.len() {
            self.pos.resize(s + 1, None);
            self.key.resize(s + 1, 0.0);
        } else if self.pos[s].is_some() {
            return Err(Error::InvalidHeapOperation("satellite already in heap"));
        }
        self.size += 1;
        self.heap.push(s);
        let mut i = self.size;
        while i / 2 > 0 && greater(self.key[self.heap[i / 2]], k) {
            self.heap[i] = self.heap[i / 2];
            self.pos[self.heap[i]] = Some(i);
            i /= 2;
        }
        self.heap[i] = s;
        self.pos[s] = Some(i);
        self.key[s] = k;
        Ok(())
    }

    /// Removes and returns the satellite with minimum key.
    pub fn delete_min(&mut self) -> Result<usize> {
        if self.size == 0 {
            return Err(Error::InvalidHeapOperation("empty heap"));
        }
        let min = self.heap[1];
        let last = self.heap.pop().unwrap_or(min);
        self.size -= 1;
        self.pos[min] = None;
        if self.size == 0 {
            return Ok(min);
        }

        let mut i = 1;
        let mut child = 2;
        while child <= self.size {
            if child < self.size
                && greater(self.key[self.heap[child]], self.key[self.heap[child + 1]])
            {
                child += 1;
            }
            if !greater(self.key[last], self.key[self.heap[child]]) {
                break;
            }
            self.heap[i] = self.heap[child];
            self.pos[self.heap[i]] = Some(i);
            i = child;
            child *= 2;
        }
        self.heap[i] = last;
        self.pos[last] = Some(i);
        Ok(min)
    }

    /// Sets the key of `s` (remove + insert). Fails if `s` is absent.
    pub fn change_key(&mut self, k: f64, s: usize) -> Result<()> {
        self.remove(s)?;
        self.insert(k, s)
    }

    /// Removes satellite `s`. Fails if `s` is absent.
    pub fn remove(&mut self, s: usize) -> Result<()> {
        let mut i = self
            .pos
            .get(s)
            .copied()
            .flatten()
            .ok_or(Error::InvalidHeapOperation("satellite not in heap"))?;
        // Float `s` to the root regardless of keys, then pop it.
        while i / 2 > 0 {
            self.heap[i] = self.heap[i / 2];
            self.pos[self.heap[i]] = Some(i);
            i /= 2;
        }
        self.heap[1] = s;
        self.pos[s] = Some(1);
        self.delete_min().map(|_| ())
    }

    /// Number of satellites in the heap.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn contains(&self, s: usize) -> bool {
        matches!(self.pos.get(s), Some(Some(_)))
    }

    /// Current key of `s`, if present.
    #[inline]
    pub fn key(&self, s: usize) -> Option<f64> {
        self.contains(s).then(|| self.key[s])
    }

    /// Empties the heap and releases satellite storage.
    pub fn clear(&mut self) {
        self.key.clear();
        self.pos.clear();
        self.heap.clear();
        self.heap.push(0);
        self.size = 0;
    }
}
