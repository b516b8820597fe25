//! Block statistics collection.
//!
//! Scalar reference implementation of the ALF covariance gathering pass.

use inloop_core::{ChannelType, PlaneView};

use crate::classifier::ClassifierGrid;
use crate::covariance::{AlfCovariance, MAX_NUM_CLASSES, MAX_NUM_LUMA_COEFF, NUM_CLIPPING_VALUES};

/// 5x5 diamond: 13 positions folding onto 7 taps.
const PATTERN_5: [usize; 13] = [
    0, //
    1, 2, 3, //
    4, 5, 6, 5, 4, //
    3, 2, 1, //
    0,
];

/// 7x7 diamond: 25 positions folding onto 13 taps.
const PATTERN_7: [usize; 25] = [
    0, //
    1, 2, 3, //
    4, 5, 6, 7, 8, //
    9, 10, 11, 12, 11, 10, 9, //
    8, 7, 6, 5, 4, //
    3, 2, 1, //
    0,
];

/// Geometry and boundary parameters for one block statistics pass.
#[derive(Debug, Clone, Copy)]
pub struct BlockParams {
    /// Horizontal frame position of the block (classifier coordinates).
    pub x_dst: usize,
    /// Vertical frame position of the block.
    pub y_dst: usize,
    /// Block width in samples.
    pub width: usize,
    /// Block height in samples.
    pub height: usize,
    /// Channel of the sampled planes.
    pub channel: ChannelType,
    /// Vertical period of the virtual boundary pattern (CTU height).
    pub vb_ctu_height: usize,
    /// Row of the virtual boundary within each CTU.
    pub vb_pos: usize,
}

impl BlockParams {
    /// Filter length for the channel: 13 taps for luma, 7 for chroma.
    #[inline]
    pub fn num_coeff(&self) -> usize {
        match self.channel {
            ChannelType::Luma => 13,
            ChannelType::Chroma => 7,
        }
    }
}

/// Derive the clipping thresholds for a channel at a bit depth.
///
/// Luma: `round(2^(B * (4 - i) / 4))`, chroma: `round(2^(B - 8 + 8 * (3 - i) / 3))`
/// for bin `i`, giving `{256, 64, 16, 4}` and `{256, 40, 6, 1}` at 8 bits.
pub fn clip_values(channel: ChannelType, bit_depth: u8) -> [i16; NUM_CLIPPING_VALUES] {
    let b = f64::from(bit_depth);
    let mut clips = [0i16; NUM_CLIPPING_VALUES];
    for (i, clip) in clips.iter_mut().enumerate() {
        let exp = match channel {
            ChannelType::Luma => b * (4 - i) as f64 / 4.0,
            ChannelType::Chroma => b - 8.0 + 8.0 * (3 - i) as f64 / 3.0,
        };
        *clip = exp.exp2().round() as i16;
    }
    clips
}

/// Sum of the two symmetric neighbor differences, each clipped to the bin
/// threshold.
#[inline]
fn clip_alf(clip: i16, reference: i16, val0: i16, val1: i16) -> i16 {
    (val0 - reference).clamp(-clip, clip) + (val1 - reference).clamp(-clip, clip)
}

#[inline]
fn add_pair(
    e_local: &mut [[i16; NUM_CLIPPING_VALUES]; MAX_NUM_LUMA_COEFF],
    tap: usize,
    clip: &[i16; NUM_CLIPPING_VALUES],
    curr: i16,
    val0: i16,
    val1: i16,
) {
    for b in 0..NUM_CLIPPING_VALUES {
        e_local[tap][b] += clip_alf(clip[b], curr, val0, val1);
    }
}

/// Fill the per-pixel clipped tap vector for the pixel at `(x, y)`.
///
/// Walks the diamond pattern in the iteration order of `transpose_idx`,
/// reading symmetric neighbor pairs with vertical offsets clamped to the
/// virtual-boundary row range, and finally adds the unclipped center sample
/// to the last tap for every bin.
#[allow(clippy::too_many_arguments)]
pub fn accumulate_tap_vector(
    e_local: &mut [[i16; NUM_CLIPPING_VALUES]; MAX_NUM_LUMA_COEFF],
    rec: &PlaneView,
    x: isize,
    y: isize,
    channel: ChannelType,
    transpose_idx: u8,
    vb_distance: i32,
    clip: &[i16; NUM_CLIPPING_VALUES],
) {
    let mut clip_top_row: isize = -4;
    let mut clip_bot_row: isize = 4;
    if (-3..0).contains(&vb_distance) {
        clip_bot_row = (-vb_distance - 1) as isize;
        clip_top_row = -clip_bot_row;
    } else if (0..3).contains(&vb_distance) {
        clip_top_row = -(vb_distance as isize);
        clip_bot_row = -clip_top_row;
    }

    let is_luma = channel == ChannelType::Luma;
    let pattern: &[usize] = if is_luma { &PATTERN_7 } else { &PATTERN_5 };
    let half: isize = if is_luma { 3 } else { 2 };

    let curr = rec.get(x, y) as i16;
    let at = |dx: isize, dy: isize| rec.get(x + dx, y + dy) as i16;

    let mut k = 0usize;
    match transpose_idx {
        0 => {
            for i in -half..0 {
                let y0 = i.max(clip_top_row);
                let y1 = -(i.max(-clip_bot_row));
                for j in (-half - i)..=(half + i) {
                    add_pair(e_local, pattern[k], clip, curr, at(j, y0), at(-j, y1));
                    k += 1;
                }
            }
            for j in -half..0 {
                add_pair(e_local, pattern[k], clip, curr, at(j, 0), at(-j, 0));
                k += 1;
            }
        }
        1 => {
            for j in -half..0 {
                for i in (-half - j)..=(half + j) {
                    let y0 = i.max(clip_top_row);
                    let y1 = -(i.max(-clip_bot_row));
                    add_pair(e_local, pattern[k], clip, curr, at(j, y0), at(-j, y1));
                    k += 1;
                }
            }
            for i in -half..0 {
                let y0 = i.max(clip_top_row);
                let y1 = -(i.max(-clip_bot_row));
                add_pair(e_local, pattern[k], clip, curr, at(0, y0), at(0, y1));
                k += 1;
            }
        }
        2 => {
            for i in -half..0 {
                let y0 = i.max(clip_top_row);
                let y1 = -(i.max(-clip_bot_row));
                for j in ((-half - i)..=(half + i)).rev() {
                    add_pair(e_local, pattern[k], clip, curr, at(j, y0), at(-j, y1));
                    k += 1;
                }
            }
            for j in -half..0 {
                add_pair(e_local, pattern[k], clip, curr, at(j, 0), at(-j, 0));
                k += 1;
            }
        }
        _ => {
            for j in -half..0 {
                for i in ((-half - j)..=(half + j)).rev() {
                    let y0 = i.max(clip_top_row);
                    let y1 = -(i.max(-clip_bot_row));
                    add_pair(e_local, pattern[k], clip, curr, at(j, y0), at(-j, y1));
                    k += 1;
                }
            }
            for i in -half..0 {
                let y0 = i.max(clip_top_row);
                let y1 = -(i.max(-clip_bot_row));
                add_pair(e_local, pattern[k], clip, curr, at(0, y0), at(0, y1));
                k += 1;
            }
        }
    }

    // Center tap takes the raw sample value in every bin.
    for b in 0..NUM_CLIPPING_VALUES {
        e_local[pattern[k]][b] += curr;
    }
}

/// Accumulate covariance statistics over one block.
///
/// `org` and `rec` are views with their origin at the block's top-left
/// sample. With a classifier grid each pixel folds into the class and
/// orientation of its tag, sentinel-tagged pixels are skipped, and all
/// `MAX_NUM_CLASSES` accumulators get their symmetry completed; without a
/// classifier every pixel folds into class 0 with orientation 0.
pub fn collect_block_statistics(
    covariances: &mut [AlfCovariance],
    classifier: Option<&ClassifierGrid>,
    org: &PlaneView,
    rec: &PlaneView,
    params: &BlockParams,
    clip: &[i16; NUM_CLIPPING_VALUES],
) {
    let num_coeff = params.num_coeff();

    for i in 0..params.height {
        let vb_distance = ((params.y_dst + i) % params.vb_ctu_height) as i32 - params.vb_pos as i32;
        for j in 0..params.width {
            let (class_idx, transpose_idx) = match classifier {
                Some(grid) => {
                    let entry = grid.get(params.x_dst + j, params.y_dst + i);
                    if entry.is_unused() {
                        continue;
                    }
                    (entry.class_idx as usize, entry.transpose_idx)
                }
                None => (0, 0),
            };

            let mut e_local = [[0i16; NUM_CLIPPING_VALUES]; MAX_NUM_LUMA_COEFF];
            let (jx, iy) = (j as isize, i as isize);
            let y_local = i32::from(org.get(jx, iy)) - i32::from(rec.get(jx, iy));
            accumulate_tap_vector(
                &mut e_local,
                rec,
                jx,
                iy,
                params.channel,
                transpose_idx,
                vb_distance,
                clip,
            );

            let cov = &mut covariances[class_idx];
            for k in 0..num_coeff {
                for l in k..num_coeff {
                    for b0 in 0..NUM_CLIPPING_VALUES {
                        let v0 = f64::from(e_local[k][b0]);
                        for b1 in 0..NUM_CLIPPING_VALUES {
                            cov.ee[b0][b1][k][l] += v0 * f64::from(e_local[l][b1]);
                        }
                    }
                }
                for b in 0..NUM_CLIPPING_VALUES {
                    cov.y[b][k] += i32::from(e_local[k][b]) * y_local;
                }
            }
            cov.pix_acc += f64::from(y_local * y_local);
        }
    }

    let num_classes = if classifier.is_some() {
        MAX_NUM_CLASSES
    } else {
        1
    };
    for cov in covariances.iter_mut().take(num_classes) {
        cov.complete_symmetry(num_coeff);
    }
}
