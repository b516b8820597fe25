//! Per-class covariance accumulator.

/// Number of covariance classes for a classified luma block.
pub const MAX_NUM_CLASSES: usize = 25;

/// Number of filter taps for the luma diamond (chroma uses the first 7).
pub const MAX_NUM_LUMA_COEFF: usize = 13;

/// Number of clipping thresholds ("bins") per channel type.
pub const NUM_CLIPPING_VALUES: usize = 4;

/// Accumulated second-order statistics for one filter class.
///
/// `ee` holds cross-products of clipped tap vectors, `y` the correlation of
/// tap vectors with the original-minus-reconstructed error, and `pix_acc`
/// the accumulated squared error. Only the `k <= l` triangle of `ee` is
/// written during accumulation; [`AlfCovariance::complete_symmetry`] derives
/// the rest once per block.
#[derive(Clone)]
pub struct AlfCovariance {
    /// Cross-products, indexed `[bin0][bin1][tap_k][tap_l]`.
    pub ee: [[[[f64; MAX_NUM_LUMA_COEFF]; MAX_NUM_LUMA_COEFF]; NUM_CLIPPING_VALUES];
        NUM_CLIPPING_VALUES],
    /// Error cross-correlation, indexed `[bin][tap]`.
    pub y: [[i32; MAX_NUM_LUMA_COEFF]; NUM_CLIPPING_VALUES],
    /// Accumulated squared pixel error.
    pub pix_acc: f64,
}

impl AlfCovariance {
    /// Zeroed accumulator.
    pub fn new() -> Self {
        Self {
            ee: [[[[0.0; MAX_NUM_LUMA_COEFF]; MAX_NUM_LUMA_COEFF]; NUM_CLIPPING_VALUES];
                NUM_CLIPPING_VALUES],
            y: [[0; MAX_NUM_LUMA_COEFF]; NUM_CLIPPING_VALUES],
            pix_acc: 0.0,
        }
    }

    /// Zeroed set of accumulators, one per class.
    pub fn new_per_class() -> Vec<AlfCovariance> {
        vec![AlfCovariance::new(); MAX_NUM_CLASSES]
    }

    /// Clear all accumulated statistics for reuse.
    pub fn reset(&mut self) {
        *self = AlfCovariance::new();
    }

    /// Fold another accumulator into this one, field by field.
    ///
    /// This is the reduction step for per-thread accumulation over disjoint
    /// pixel sets. Merging is valid both before and after symmetry
    /// completion, as long as both sides are in the same state.
    pub fn merge(&mut self, other: &AlfCovariance) {
        for b0 in 0..NUM_CLIPPING_VALUES {
            for b1 in 0..NUM_CLIPPING_VALUES {
                for k in 0..MAX_NUM_LUMA_COEFF {
                    for l in 0..MAX_NUM_LUMA_COEFF {
                        self.ee[b0][b1][k][l] += other.ee[b0][b1][k][l];
                    }
                }
            }
        }
        for b in 0..NUM_CLIPPING_VALUES {
            for k in 0..MAX_NUM_LUMA_COEFF {
                self.y[b][k] += other.y[b][k];
            }
        }
        self.pix_acc += other.pix_acc;
    }

    /// Mirror the accumulated `k <= l` triangle into the full symmetric
    /// matrix: `ee[b0][b1][k][l] = ee[b1][b0][l][k]` for `l < k`.
    pub fn complete_symmetry(&mut self, num_coeff: usize) {
        for k in 1..num_coeff {
            for l in 0..k {
                for b0 in 0..NUM_CLIPPING_VALUES {
                    for b1 in 0..NUM_CLIPPING_VALUES {
                        self.ee[b0][b1][k][l] = self.ee[b1][b0][l][k];
                    }
                }
            }
        }
    }
}

impl Default for AlfCovariance {
    fn default() -> Self {
        Self::new()
    }
}
