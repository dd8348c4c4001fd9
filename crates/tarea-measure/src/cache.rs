#![forbid(unsafe_code)]

//! Per-element cache of sizing-style snapshots.
//!
//! Reading an element's computed style forces layout, and the autosize
//! calculator would otherwise do it on every keystroke. [`StyleCache`] keeps
//! one [`NodeStyling`] per [`ElementId`].
//!
//! # Invalidation
//!
//! - **Reflow**: each entry remembers the element width it was computed at;
//!   a lookup with a different width is a miss and replaces the entry.
//! - **Detach**: the calculator evicts entries for disconnected elements
//!   via [`StyleCache::invalidate_element`].
//! - **Theme change**: [`StyleCache::invalidate_all`] bumps the generation,
//!   making every entry stale in O(1).
//!
//! # Eviction
//!
//! LFU: when at capacity, the entry with the lowest access count goes.

use std::collections::HashMap;

use tarea_core::element::ElementId;

use crate::styling::NodeStyling;

#[derive(Clone, Debug)]
struct CacheEntry {
    styling: NodeStyling,
    /// Element width (as raw bits, so `-0.0`/NaN compare exactly).
    width_bits: u64,
    generation: u64,
    access_count: u32,
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of entries currently in the cache.
    pub entries: usize,
    /// Total cache hits since creation or last reset.
    pub hits: u64,
    /// Total cache misses since creation or last reset.
    pub misses: u64,
    /// Hit rate as a fraction (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Bounded cache of [`NodeStyling`] keyed by element identity.
#[derive(Debug)]
pub struct StyleCache {
    entries: HashMap<ElementId, CacheEntry>,
    generation: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl StyleCache {
    /// Create a cache holding at most `max_entries` elements.
    ///
    /// ```
    /// use tarea_measure::StyleCache;
    /// let cache = StyleCache::new(16);
    /// assert_eq!(cache.capacity(), 16);
    /// ```
    #[inline]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(max_entries),
            generation: 0,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached styling for `id` at `width`, or compute and store it.
    pub fn get_or_compute<F>(&mut self, id: ElementId, width: f64, compute: F) -> NodeStyling
    where
        F: FnOnce() -> NodeStyling,
    {
        let width_bits = width.to_bits();
        if let Some(entry) = self.entries.get_mut(&id)
            && entry.generation == self.generation
            && entry.width_bits == width_bits
        {
            self.hits += 1;
            entry.access_count = entry.access_count.saturating_add(1);
            return entry.styling.clone();
        }

        self.misses += 1;
        let styling = compute();

        if self.max_entries == 0 {
            return styling;
        }
        if !self.entries.contains_key(&id) && self.entries.len() >= self.max_entries {
            self.evict_lfu();
        }
        self.entries.insert(
            id,
            CacheEntry {
                styling: styling.clone(),
                width_bits,
                generation: self.generation,
                access_count: 1,
            },
        );
        styling
    }

    /// Invalidate all entries by bumping the generation.
    #[inline]
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Drop the entry for one element. Returns whether one existed.
    pub fn invalidate_element(&mut self, id: ElementId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// Reset statistics counters to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Remove every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    fn evict_lfu(&mut self) {
        if let Some(id) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.access_count)
            .map(|(k, _)| *k)
        {
            self.entries.remove(&id);
        }
    }
}

impl Default for StyleCache {
    /// Creates a cache with capacity for 64 elements.
    fn default() -> Self {
        Self::new(64)
    }
}
