//! PositionCache - absolute start offsets for a lane's working order.
//!
//! `positions[i] = start + Σ_{j<i} (extent(order[j]) + gap)`
//!
//! The recurrence is evaluated left to right both when computing from
//! scratch and when patching after a swap, so a patched cache is
//! bit-identical to a fresh one.
//!
//! # Complexity
//!
//! - `compute`: O(n)
//! - `patch_from(i)`: O(n - i)
//! - `get`: O(1)

use crate::model::ItemId;

/// Cached start offsets parallel to a lane's working order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionCache {
    start: f32,
    gap: f32,
    positions: Vec<f32>,
}

/// Extent of every item in an order, or `None` if any is degenerate.
fn checked_extent(extent: Option<f32>) -> Option<f32> {
    extent.filter(|e| e.is_finite() && *e > 0.0)
}

impl PositionCache {
    /// Compute offsets for `order` from scratch.
    ///
    /// Returns `None` when any extent is missing, non-finite or not
    /// positive; callers skip the pass and retry on the next update.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lanedrag::model::ItemId;
    /// # use lanedrag::state::position_cache::PositionCache;
    /// let order: Vec<ItemId> = ["a", "b", "c"]
    ///     .iter()
    ///     .map(|s| ItemId::new(*s).unwrap())
    ///     .collect();
    /// let cache = PositionCache::compute(&order, 10.0, 4.0, |_| Some(20.0)).unwrap();
    /// assert_eq!(cache.as_slice(), &[10.0, 34.0, 58.0]);
    /// ```
    pub fn compute(
        order: &[ItemId],
        start: f32,
        gap: f32,
        extent_of: impl Fn(&ItemId) -> Option<f32>,
    ) -> Option<Self> {
        let mut cache = Self {
            start,
            gap,
            positions: Vec::with_capacity(order.len()),
        };
        cache.fill_from(0, order, &extent_of)?;
        Some(cache)
    }

    /// Recompute offsets from `index` onward after `order[index..]` changed.
    ///
    /// Entries before `index` are reused. On a degenerate extent the cache
    /// is left untouched and `false` is returned.
    pub fn patch_from(
        &mut self,
        index: usize,
        order: &[ItemId],
        extent_of: impl Fn(&ItemId) -> Option<f32>,
    ) -> bool {
        let mut patched = self.clone();
        match patched.fill_from(index, order, &extent_of) {
            Some(()) => {
                *self = patched;
                true
            }
            None => false,
        }
    }

    fn fill_from(
        &mut self,
        index: usize,
        order: &[ItemId],
        extent_of: &impl Fn(&ItemId) -> Option<f32>,
    ) -> Option<()> {
        let index = index.min(self.positions.len()).min(order.len());
        self.positions.truncate(index);
        let mut cursor = match index {
            0 => self.start,
            i => {
                let prev = self.positions[i - 1];
                prev + checked_extent(extent_of(&order[i - 1]))? + self.gap
            }
        };
        for (i, item) in order.iter().enumerate().skip(index) {
            self.positions.push(cursor);
            if i + 1 < order.len() {
                cursor = cursor + checked_extent(extent_of(item))? + self.gap;
            }
        }
        Some(())
    }

    /// Offset of the slot at `index`.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.positions.get(index).copied()
    }

    /// All offsets in order.
    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }

    /// Number of cached slots.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the cache has no slots.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
