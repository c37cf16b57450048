// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Everything derived from the viewport size, with a small memo cache.
//!
//! A [`Layout`] bundles the pure calculations (geometry, paddings, sizes and
//! dot placement) for one viewport size. Windows tend to bounce between a
//! handful of sizes (maximize, restore, rotate), so [`LayoutCache`] keeps the
//! most recently used layouts and hands them out as shared [`Rc`]s.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::num::NonZeroUsize;

use kurbo::Size;
use lru::LruCache;

use crate::config::TimelineConfig;
use crate::dots::{Dot, calculate_dots};
use crate::geometry::{Geometry, Paddings, calculate_geometry, calculate_paddings};
use crate::style::Sizes;

/// Layout for one viewport size and dot count.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Viewport size.
    pub size: Size,
    /// Ring placement.
    pub geometry: Geometry,
    /// Horizontal margins.
    pub paddings: Paddings,
    /// Stroke widths and radii.
    pub sizes: Sizes,
    /// Dots before rotation.
    pub dots: Vec<Dot>,
}

impl Layout {
    /// Runs every layout calculation for `size`.
    #[must_use]
    pub fn compute(size: Size, dots_count: u32, config: &TimelineConfig) -> Self {
        let geometry = calculate_geometry(size.width, size.height);
        Self {
            size,
            geometry,
            paddings: calculate_paddings(size.width),
            sizes: Sizes::resolve(&config.sizing, geometry.min_size),
            dots: calculate_dots(
                geometry.center,
                geometry.circle_radius,
                dots_count as usize,
                &config.dots,
            ),
        }
    }

    /// Has the container been measured with a non-zero area?
    #[must_use]
    pub fn is_measured(&self) -> bool {
        is_measured(self.size)
    }
}

/// Does `size` describe a measured container?
#[must_use]
pub fn is_measured(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0
}

/// Exact cache key: the size's bit patterns and the dot count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    width: u64,
    height: u64,
    dots_count: u32,
}

impl LayoutKey {
    /// Key for a size and dot count.
    #[must_use]
    pub fn new(size: Size, dots_count: u32) -> Self {
        // Adding zero folds -0.0 into +0.0.
        Self {
            width: (size.width + 0.0).to_bits(),
            height: (size.height + 0.0).to_bits(),
            dots_count,
        }
    }
}

/// Default number of layouts a [`LayoutCache`] keeps.
pub const DEFAULT_CACHE_CAPACITY: usize = 4;

/// Least-recently-used cache of [`Layout`]s.
pub struct LayoutCache {
    entries: LruCache<LayoutKey, Rc<Layout>>,
    hits: u64,
    misses: u64,
}

impl fmt::Debug for LayoutCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl LayoutCache {
    /// Creates a cache holding at most `capacity` layouts (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the layout for `size`, computing it on a miss.
    ///
    /// The flag is `true` on a cache hit.
    pub fn get_or_compute(
        &mut self,
        size: Size,
        dots_count: u32,
        config: &TimelineConfig,
    ) -> (Rc<Layout>, bool) {
        let key = LayoutKey::new(size, dots_count);
        if let Some(layout) = self.entries.get(&key) {
            self.hits += 1;
            return (Rc::clone(layout), true);
        }

        self.misses += 1;
        let layout = Rc::new(Layout::compute(size, dots_count, config));
        self.entries.put(key, Rc::clone(&layout));
        (layout, false)
    }

    /// Number of cached layouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the cache empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most layouts the cache keeps.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to compute a layout.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops every cached layout.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TimelineConfig {
        TimelineConfig::standard()
    }

    #[test]
    fn compute_bundles_every_calculation() {
        let layout = Layout::compute(Size::new(1200.0, 800.0), 6, &config());
        assert!(layout.is_measured());
        assert_eq!(layout.geometry.circle_radius, 200.0);
        assert_eq!(layout.paddings.left, 240.0);
        assert_eq!(layout.dots.len(), 6);
        assert!((layout.sizes.selected_dot_radius - 24.0).abs() < 1e-9);
    }

    #[test]
    fn zero_size_is_unmeasured() {
        let layout = Layout::compute(Size::ZERO, 6, &config());
        assert!(!layout.is_measured());
        assert!(!is_measured(Size::new(100.0, 0.0)));
    }

    #[test]
    fn repeated_sizes_hit() {
        let mut cache = LayoutCache::default();
        let (a, hit) = cache.get_or_compute(Size::new(800.0, 600.0), 6, &config());
        assert!(!hit);
        let (b, hit) = cache.get_or_compute(Size::new(800.0, 600.0), 6, &config());
        assert!(hit);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));

        let (_, hit) = cache.get_or_compute(Size::new(800.0, 600.0), 5, &config());
        assert!(!hit, "dot count is part of the key");
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let mut cache = LayoutCache::new(2);
        let small = Size::new(400.0, 300.0);
        let medium = Size::new(800.0, 600.0);
        let large = Size::new(1600.0, 1200.0);

        cache.get_or_compute(small, 6, &config());
        cache.get_or_compute(medium, 6, &config());
        // Touch `small` so `medium` becomes the oldest.
        assert!(cache.get_or_compute(small, 6, &config()).1);
        cache.get_or_compute(large, 6, &config());

        assert_eq!(cache.len(), 2);
        assert!(cache.get_or_compute(small, 6, &config()).1);
        assert!(!cache.get_or_compute(medium, 6, &config()).1);
    }

    #[test]
    fn capacity_is_at_least_one() {
        let mut cache = LayoutCache::new(0);
        assert_eq!(cache.capacity(), 1);

        cache.get_or_compute(Size::new(400.0, 300.0), 6, &config());
        cache.get_or_compute(Size::new(800.0, 600.0), 6, &config());
        assert_eq!(cache.len(), 1);
        assert!(cache.get_or_compute(Size::new(800.0, 600.0), 6, &config()).1);
        assert!(!cache.get_or_compute(Size::new(400.0, 300.0), 6, &config()).1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!((cache.hits(), cache.misses()), (1, 3));
    }

    #[test]
    fn negative_zero_shares_a_key() {
        assert_eq!(
            LayoutKey::new(Size::new(-0.0, 0.0), 3),
            LayoutKey::new(Size::new(0.0, 0.0), 3)
        );
    }
}
