#![forbid(unsafe_code)]

//! Keyed one-shot deadlines.
//!
//! [`DeadlineQueue`] replaces "run this closure after N seconds" dispatch with
//! plain data: each key carries at most one pending deadline, and the owner
//! asks for whatever has fallen due at a given `now`. Because the queue is an
//! ordinary field, dropping its owner drops every pending timer with it; there
//! is nothing left to fire against a destroyed instance.
//!
//! # Invariants
//!
//! 1. A key has at most one live deadline; scheduling a pending key is a
//!    no-op, so a pending deadline is never pushed back.
//! 2. Expired keys come out in deadline order; equal deadlines come out in
//!    scheduling order.
//! 3. Every heap entry is live: keys leave the heap and the live set together.
//!
//! # Complexity
//!
//! `schedule` / `pop_expired` are O(log n); `contains` is O(1).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use ahash::AHashSet;
use web_time::Instant;

#[derive(Debug)]
struct Entry<K> {
    at: Instant,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<K> Eq for Entry<K> {}

impl<K> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Entry<K> {
    // Reversed so the max-heap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A set of keys, each with one pending deadline.
#[derive(Debug)]
pub struct DeadlineQueue<K> {
    heap: BinaryHeap<Entry<K>>,
    live: AHashSet<K>,
    next_seq: u64,
}

impl<K> Default for DeadlineQueue<K> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: AHashSet::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> DeadlineQueue<K> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to expire at `at`.
    ///
    /// Returns `false` (and leaves the existing deadline untouched) if the key
    /// is already pending.
    pub fn schedule(&mut self, key: K, at: Instant) -> bool {
        if !self.live.insert(key) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { at, seq, key });
        true
    }

    /// Whether `key` has a pending deadline.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.live.contains(key)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|e| e.at)
    }

    /// Remove and return the earliest key whose deadline is `<= now`.
    pub fn pop_expired(&mut self, now: Instant) -> Option<K> {
        if self.heap.peek().is_some_and(|e| e.at <= now) {
            let entry = self.heap.pop()?;
            self.live.remove(&entry.key);
            return Some(entry.key);
        }
        None
    }

    /// Number of pending keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Pending keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.live.iter()
    }
}
