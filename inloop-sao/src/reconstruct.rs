//! Applying derived SAO parameters to produce the filtered output block.

use inloop_core::{sample_max, PlaneView, PlaneViewMut};

use crate::edge::edge_category;
use crate::{SaoColor, SaoInfo, SaoType, EDGE_OFFSETS};

/// Per-band offset lookup: 32 intensity bands, non-bucket bands get zero.
fn band_offset_table(sao: &SaoInfo, color: SaoColor) -> [i32; 32] {
    let bank = color.band_bank();
    let band_position = i32::from(sao.band_position[bank]);

    let mut table = [0i32; 32];
    for (band, entry) in table.iter_mut().enumerate() {
        let bucket = band as i32 - band_position;
        if (0..4).contains(&bucket) {
            *entry = sao.offsets[bank * 5 + 1 + bucket as usize];
        }
    }
    table
}

fn reconstruct_band(
    rec: &PlaneView,
    dst: &mut PlaneViewMut,
    width: usize,
    height: usize,
    sao: &SaoInfo,
    color: SaoColor,
    bit_depth: u8,
) {
    let table = band_offset_table(sao, color);
    let shift = bit_depth - 5;
    let max = sample_max(bit_depth);

    for y in 0..height {
        for x in 0..width {
            let val = rec.get(x as isize, y as isize);
            let band = usize::from(val >> shift);
            let out = (i32::from(val) + table[band]).clamp(0, max);
            dst.set(x, y, out as u8);
        }
    }
}

fn reconstruct_edge(
    rec: &PlaneView,
    dst: &mut PlaneViewMut,
    width: usize,
    height: usize,
    sao: &SaoInfo,
    color: SaoColor,
    bit_depth: u8,
) {
    let base = color.edge_offset_base();
    let [(ax, ay), (bx, by)] = EDGE_OFFSETS[sao.eo_class as usize];
    let max = sample_max(bit_depth);

    for y in 0..height {
        for x in 0..width {
            let (xi, yi) = (x as isize, y as isize);
            let c = rec.get(xi, yi);

            // Border pixels lack full neighbor context and were excluded
            // from offset derivation; they pass through unchanged.
            let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            if on_border {
                dst.set(x, y, c);
                continue;
            }

            let a = rec.get(xi + ax, yi + ay);
            let b = rec.get(xi + bx, yi + by);
            let cat = edge_category(a, b, c);
            let out = (i32::from(c) + sao.offsets[base + cat]).clamp(0, max);
            dst.set(x, y, out as u8);
        }
    }
}

fn copy_block(rec: &PlaneView, dst: &mut PlaneViewMut, width: usize, height: usize) {
    for y in 0..height {
        for x in 0..width {
            dst.set(x, y, rec.get(x as isize, y as isize));
        }
    }
}

/// Apply SAO parameters to a reconstructed block, writing the filtered
/// samples to an independent destination block.
///
/// The source is never written; destination stride is independent of the
/// source stride.
pub fn reconstruct(
    rec: &PlaneView,
    dst: &mut PlaneViewMut,
    width: usize,
    height: usize,
    sao: &SaoInfo,
    color: SaoColor,
    bit_depth: u8,
) {
    match sao.sao_type {
        SaoType::Off => copy_block(rec, dst, width, height),
        SaoType::Band => reconstruct_band(rec, dst, width, height, sao, color, bit_depth),
        SaoType::Edge => reconstruct_edge(rec, dst, width, height, sao, color, bit_depth),
    }
}
