//! Integration tests for ALF covariance statistics collection.

use pretty_assertions::assert_eq;

use inloop_alf::{
    clip_values, collect_block_statistics, AlfCovariance, BlockParams, ClassifierEntry,
    ClassifierGrid, MAX_NUM_CLASSES, NUM_CLIPPING_VALUES,
};
use inloop_core::{ChannelType, PlaneView};

const PAD: usize = 4;

/// Deterministic pseudo-random bytes.
fn fill_lcg(data: &mut [u8], mut seed: u32) {
    for v in data.iter_mut() {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        *v = (seed >> 24) as u8;
    }
}

fn padded_plane(width: usize, height: usize, seed: u32) -> (Vec<u8>, usize, usize) {
    let stride = width + 2 * PAD;
    let mut data = vec![0u8; stride * (height + 2 * PAD)];
    fill_lcg(&mut data, seed);
    (data, stride, PAD * stride + PAD)
}

fn varied_grid(width: usize, height: usize) -> ClassifierGrid {
    let mut entries = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            entries.push(ClassifierEntry {
                class_idx: ((x / 4 + y / 4) % MAX_NUM_CLASSES) as u8,
                transpose_idx: ((x + y) % 4) as u8,
            });
        }
    }
    ClassifierGrid::new(entries, width)
}

fn luma_params(width: usize, height: usize) -> BlockParams {
    BlockParams {
        x_dst: 0,
        y_dst: 0,
        width,
        height,
        channel: ChannelType::Luma,
        vb_ctu_height: 64,
        vb_pos: 60,
    }
}

// ============================================================================
// Covariance symmetry
// ============================================================================

#[test]
fn completed_covariance_is_symmetric() {
    let (org_data, stride, origin) = padded_plane(32, 32, 1);
    let (rec_data, _, _) = padded_plane(32, 32, 2);
    let org = PlaneView::new(&org_data, stride, origin);
    let rec = PlaneView::new(&rec_data, stride, origin);

    let grid = varied_grid(32, 32);
    let params = luma_params(32, 32);
    let clip = clip_values(ChannelType::Luma, 8);

    let mut covs = AlfCovariance::new_per_class();
    collect_block_statistics(&mut covs, Some(&grid), &org, &rec, &params, &clip);

    for (class, cov) in covs.iter().enumerate() {
        for k in 0..13 {
            for l in 0..13 {
                for b0 in 0..NUM_CLIPPING_VALUES {
                    for b1 in 0..NUM_CLIPPING_VALUES {
                        assert_eq!(
                            cov.ee[b0][b1][k][l], cov.ee[b1][b0][l][k],
                            "class {} k {} l {} b0 {} b1 {}",
                            class, k, l, b0, b1
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn chroma_covariance_is_symmetric() {
    let (org_data, stride, origin) = padded_plane(16, 16, 3);
    let (rec_data, _, _) = padded_plane(16, 16, 4);
    let org = PlaneView::new(&org_data, stride, origin);
    let rec = PlaneView::new(&rec_data, stride, origin);

    let params = BlockParams {
        channel: ChannelType::Chroma,
        vb_ctu_height: 32,
        vb_pos: 30,
        ..luma_params(16, 16)
    };
    let clip = clip_values(ChannelType::Chroma, 8);

    let mut covs = vec![AlfCovariance::new()];
    collect_block_statistics(&mut covs, None, &org, &rec, &params, &clip);

    let cov = &covs[0];
    for k in 0..7 {
        for l in 0..7 {
            for b0 in 0..NUM_CLIPPING_VALUES {
                for b1 in 0..NUM_CLIPPING_VALUES {
                    assert_eq!(cov.ee[b0][b1][k][l], cov.ee[b1][b0][l][k]);
                }
            }
        }
    }
}

// ============================================================================
// Classifier handling
// ============================================================================

#[test]
fn tagged_pixel_contributes_exactly_once() {
    let (org_data, stride, origin) = padded_plane(8, 8, 5);
    let (rec_data, _, _) = padded_plane(8, 8, 6);
    let org = PlaneView::new(&org_data, stride, origin);
    let rec = PlaneView::new(&rec_data, stride, origin);

    // Exactly one non-sentinel pixel
    let mut grid = ClassifierGrid::filled(ClassifierEntry::UNUSED, 8, 8);
    grid.set(
        3,
        5,
        ClassifierEntry {
            class_idx: 9,
            transpose_idx: 2,
        },
    );
    let params = luma_params(8, 8);
    let clip = clip_values(ChannelType::Luma, 8);

    let mut covs = AlfCovariance::new_per_class();
    collect_block_statistics(&mut covs, Some(&grid), &org, &rec, &params, &clip);

    let y_local = i64::from(org.get(3, 5)) - i64::from(rec.get(3, 5));
    assert_eq!(covs[9].pix_acc, (y_local * y_local) as f64);
    for (class, cov) in covs.iter().enumerate() {
        if class != 9 {
            assert_eq!(cov.pix_acc, 0.0, "class {}", class);
        }
    }
}

#[test]
fn no_classifier_accumulates_into_class_zero() {
    let (org_data, stride, origin) = padded_plane(8, 8, 7);
    let (rec_data, _, _) = padded_plane(8, 8, 8);
    let org = PlaneView::new(&org_data, stride, origin);
    let rec = PlaneView::new(&rec_data, stride, origin);

    let params = luma_params(8, 8);
    let clip = clip_values(ChannelType::Luma, 8);

    let mut covs = AlfCovariance::new_per_class();
    collect_block_statistics(&mut covs, None, &org, &rec, &params, &clip);

    assert!(covs[0].pix_acc > 0.0);
    for cov in &covs[1..] {
        assert_eq!(cov.pix_acc, 0.0);
    }
}

// ============================================================================
// Split accumulation
// ============================================================================

#[test]
fn merged_row_bands_match_single_pass() {
    // All accumulated values are integer-valued, so the f64 sums are exact
    // and splitting the block cannot change them.
    let (org_data, stride, origin) = padded_plane(16, 16, 9);
    let (rec_data, _, _) = padded_plane(16, 16, 10);
    let org = PlaneView::new(&org_data, stride, origin);
    let rec = PlaneView::new(&rec_data, stride, origin);

    let grid = varied_grid(16, 16);
    let clip = clip_values(ChannelType::Luma, 8);

    let mut whole = AlfCovariance::new_per_class();
    collect_block_statistics(&mut whole, Some(&grid), &org, &rec, &luma_params(16, 16), &clip);

    let mut top = AlfCovariance::new_per_class();
    collect_block_statistics(&mut top, Some(&grid), &org, &rec, &luma_params(16, 8), &clip);

    let mut bottom = AlfCovariance::new_per_class();
    let lower_params = BlockParams {
        y_dst: 8,
        ..luma_params(16, 8)
    };
    collect_block_statistics(
        &mut bottom,
        Some(&grid),
        &org.with_row_offset(8),
        &rec.with_row_offset(8),
        &lower_params,
        &clip,
    );

    for (t, b) in top.iter_mut().zip(bottom.iter()) {
        t.merge(b);
    }

    for class in 0..MAX_NUM_CLASSES {
        assert_eq!(whole[class].pix_acc, top[class].pix_acc, "class {}", class);
        assert_eq!(whole[class].y, top[class].y, "class {}", class);
        for b0 in 0..NUM_CLIPPING_VALUES {
            for b1 in 0..NUM_CLIPPING_VALUES {
                assert_eq!(
                    whole[class].ee[b0][b1], top[class].ee[b0][b1],
                    "class {} b0 {} b1 {}",
                    class, b0, b1
                );
            }
        }
    }
}
