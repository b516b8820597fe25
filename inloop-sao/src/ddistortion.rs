//! Distortion-delta estimation for candidate SAO offsets.
//!
//! Both estimators return `sum((diff - offset)^2 - diff^2)` over the pixels
//! an offset would touch, letting the external search compare candidate
//! offset sets without materializing a filtered block.

use inloop_core::PlaneView;

use crate::edge::edge_category;
use crate::{EDGE_OFFSETS, NUM_EDGE_CATEGORIES};

/// Granularity the fast band path processes rows at.
const FAST_PATH_WIDTH: usize = 32;

fn offsets_fit_i8(offsets: &[i32; 4]) -> bool {
    offsets
        .iter()
        .all(|&o| (i32::from(i8::MIN)..=i32::from(i8::MAX)).contains(&o))
}

/// Reference per-pixel loop, valid for any width, offsets and bit depth.
fn band_ddistortion_generic(
    org: &PlaneView,
    rec: &PlaneView,
    width: usize,
    height: usize,
    band_pos: i32,
    offsets: &[i32; 4],
    bit_depth: u8,
) -> i32 {
    let shift = bit_depth - 5;
    let mut sum = 0i32;

    for y in 0..height {
        for x in 0..width {
            let rec_v = i32::from(rec.get(x as isize, y as isize));
            let band = (rec_v >> shift) - band_pos;
            if !(0..4).contains(&band) {
                continue;
            }
            let offset = offsets[band as usize];
            if offset != 0 {
                let diff = i32::from(org.get(x as isize, y as isize)) - rec_v;
                let delta = diff - offset;
                sum += delta * delta - diff * diff;
            }
        }
    }
    sum
}

/// Band-lookup path over 32-sample row chunks.
fn band_ddistortion_fast(
    org: &PlaneView,
    rec: &PlaneView,
    width: usize,
    height: usize,
    band_pos: i32,
    offsets: &[i32; 4],
) -> i32 {
    // This path is only dispatched for 8-bit planes.
    let shift = 8 - 5;

    // The shifted sample is always in [0, 31], so any band_pos outside
    // [-4, 32] behaves like the nearest limit.
    let band_pos = band_pos.clamp(-4, 32);

    let mut offset_by_band = [0i32; 32];
    for (band, entry) in offset_by_band.iter_mut().enumerate() {
        let bucket = band as i32 - band_pos;
        if (0..4).contains(&bucket) {
            *entry = offsets[bucket as usize];
        }
    }

    let mut sum = 0i32;
    for y in 0..height {
        for x0 in (0..width).step_by(FAST_PATH_WIDTH) {
            for x in x0..x0 + FAST_PATH_WIDTH {
                let rec_v = i32::from(rec.get(x as isize, y as isize));
                let offset = offset_by_band[(rec_v >> shift) as usize];
                if offset != 0 {
                    let diff = i32::from(org.get(x as isize, y as isize)) - rec_v;
                    let delta = diff - offset;
                    sum += delta * delta - diff * diff;
                }
            }
        }
    }
    sum
}

/// Distortion delta for four candidate band offsets at `band_pos`.
///
/// Takes the band-lookup path when every offset fits in a signed byte, the
/// width is a multiple of 32 and the plane is 8-bit; otherwise falls back to
/// the reference loop. Both paths return the identical integer.
pub fn band_ddistortion(
    org: &PlaneView,
    rec: &PlaneView,
    width: usize,
    height: usize,
    band_pos: i32,
    offsets: &[i32; 4],
    bit_depth: u8,
) -> i32 {
    if bit_depth == 8 && offsets_fit_i8(offsets) && width % FAST_PATH_WIDTH == 0 {
        band_ddistortion_fast(org, rec, width, height, band_pos, offsets)
    } else {
        band_ddistortion_generic(org, rec, width, height, band_pos, offsets, bit_depth)
    }
}

/// Distortion delta for a candidate edge offset set, over interior pixels
/// classified with `eo_class` exactly as the statistics pass does.
pub fn edge_ddistortion(
    org: &PlaneView,
    rec: &PlaneView,
    width: usize,
    height: usize,
    eo_class: u8,
    offsets: &[i32; NUM_EDGE_CATEGORIES],
) -> i32 {
    let [(ax, ay), (bx, by)] = EDGE_OFFSETS[eo_class as usize];
    let mut sum = 0i32;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let (xi, yi) = (x as isize, y as isize);
            let c = rec.get(xi, yi);
            let a = rec.get(xi + ax, yi + ay);
            let b = rec.get(xi + bx, yi + by);

            let offset = offsets[edge_category(a, b, c)];
            let diff = i32::from(org.get(xi, yi)) - i32::from(c);
            let delta = diff - offset;
            sum += delta * delta - diff * diff;
        }
    }
    sum
}
