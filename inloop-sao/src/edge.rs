//! Edge classification and per-category statistics.

use inloop_core::PlaneView;

use crate::{EDGE_OFFSETS, NUM_EDGE_CATEGORIES};

/// Mapping of sign-sum indices to canonical edge categories.
const IDX_TO_CATEGORY: [usize; 5] = [1, 2, 0, 3, 4];

/// Classify a center sample against its two directional neighbors.
///
/// The sign sum `sign(c - a) + sign(c - b)` shifted into `[0, 4]` indexes a
/// fixed table so that local minima, maxima and the two edge shapes map to
/// categories 1-4 and flat pixels to category 0.
#[inline]
pub fn edge_category(a: u8, b: u8, c: u8) -> usize {
    let idx = 2 + (i32::from(c) - i32::from(a)).signum() + (i32::from(c) - i32::from(b)).signum();
    IDX_TO_CATEGORY[idx as usize]
}

/// Per-category sums of `original - reconstructed` and pixel counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeStats {
    /// Accumulated `original - reconstructed` per category.
    pub sum: [i32; NUM_EDGE_CATEGORIES],
    /// Classified pixel count per category.
    pub count: [i32; NUM_EDGE_CATEGORIES],
}

impl EdgeStats {
    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &EdgeStats) {
        for cat in 0..NUM_EDGE_CATEGORIES {
            self.sum[cat] += other.sum[cat];
            self.count[cat] += other.count[cat];
        }
    }
}

/// Accumulate edge statistics over the interior of a block.
///
/// The 1-pixel border is excluded because it lacks full neighbor context;
/// offsets derived from these statistics are correspondingly never applied
/// to border pixels.
pub fn collect_edge_statistics(
    org: &PlaneView,
    rec: &PlaneView,
    width: usize,
    height: usize,
    eo_class: u8,
) -> EdgeStats {
    let [(ax, ay), (bx, by)] = EDGE_OFFSETS[eo_class as usize];
    let mut stats = EdgeStats::default();

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let (xi, yi) = (x as isize, y as isize);
            let c = rec.get(xi, yi);
            let a = rec.get(xi + ax, yi + ay);
            let b = rec.get(xi + bx, yi + by);

            let cat = edge_category(a, b, c);
            stats.sum[cat] += i32::from(org.get(xi, yi)) - i32::from(c);
            stats.count[cat] += 1;
        }
    }
    stats
}
