//! Registry binding and end-to-end kernel dispatch tests.

use pretty_assertions::assert_eq;

use inloop::{
    clip_values, collect_block_statistics, collect_block_statistics_par, AlfCovariance,
    BlockParams, Candidate, ChannelType, ClassifierEntry, ClassifierGrid, CpuCapabilities,
    EdgeStats, KernelRegistry, PlaneView, Requirement, MAX_NUM_CLASSES,
};

const PAD: usize = 4;

fn lcg_fill(data: &mut [u8], mut seed: u32) {
    for v in data.iter_mut() {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        *v = (seed >> 24) as u8;
    }
}

fn padded_plane(width: usize, height: usize, seed: u32) -> (Vec<u8>, usize, usize) {
    let stride = width + 2 * PAD;
    let mut data = vec![0u8; stride * (height + 2 * PAD)];
    lcg_fill(&mut data, seed);
    let origin = PAD * stride + PAD;
    (data, stride, origin)
}

fn varied_grid(width: usize, height: usize) -> ClassifierGrid {
    let mut grid = ClassifierGrid::filled(ClassifierEntry::UNUSED, width, height);
    for y in 0..height {
        for x in 0..width {
            grid.set(
                x,
                y,
                ClassifierEntry {
                    class_idx: ((x + 2 * y) % MAX_NUM_CLASSES) as u8,
                    transpose_idx: ((x ^ y) % 4) as u8,
                },
            );
        }
    }
    grid
}

// ============================================================================
// Registry binding
// ============================================================================

#[test]
fn test_default_binding_selects_reference_kernels() {
    let registry = KernelRegistry::new();
    let kernels = registry.bind(&CpuCapabilities::none(), 8).unwrap();

    let names: Vec<_> = kernels.bound_names().to_vec();
    assert_eq!(
        names,
        vec![
            ("alf_block_stats", "generic"),
            ("sao_edge_stats", "generic"),
            ("sao_reconstruct", "generic"),
            ("sao_band_ddistortion", "generic"),
            ("sao_edge_ddistortion", "generic"),
        ]
    );
}

#[test]
fn test_binding_rejects_high_bit_depths() {
    let registry = KernelRegistry::new();
    for bit_depth in [10u8, 12] {
        let err = registry.bind(&CpuCapabilities::none(), bit_depth).unwrap_err();
        assert!(err.is_binding_failure(), "bit depth {}", bit_depth);
    }
}

#[test]
fn test_unmet_requirement_falls_back_to_reference() {
    fn stub(_: &PlaneView, _: &PlaneView, _: usize, _: usize, _: u8) -> EdgeStats {
        EdgeStats::default()
    }

    let mut registry = KernelRegistry::new();
    registry.register_sao_edge_stats(Candidate {
        name: "neon",
        priority: 30,
        requires: Requirement::Neon,
        entry: stub,
    });

    let kernels = registry.bind(&CpuCapabilities::none(), 8).unwrap();
    assert_eq!(kernels.bound_names()[1], ("sao_edge_stats", "generic"));

    let caps = CpuCapabilities {
        neon: true,
        ..CpuCapabilities::none()
    };
    let kernels = registry.bind(&caps, 8).unwrap();
    assert_eq!(kernels.bound_names()[1], ("sao_edge_stats", "neon"));
}

// ============================================================================
// Dispatch through bound function pointers
// ============================================================================

#[test]
fn test_bound_band_estimator_is_callable() {
    let registry = KernelRegistry::new();
    let kernels = registry.bind(&CpuCapabilities::none(), 8).unwrap();

    // Flat zero block: every sample falls into band 0, an offset of 1 there
    // costs one unit of distortion per sample.
    let data = vec![0u8; 32 * 32];
    let org = PlaneView::new(&data, 32, 0);
    let rec = PlaneView::new(&data, 32, 0);

    let delta = (kernels.sao_band_ddistortion)(&org, &rec, 32, 32, 0, &[1, 0, 0, 0], 8);
    assert_eq!(delta, 1024);
}

#[test]
fn test_bound_edge_stats_match_direct_call() {
    let registry = KernelRegistry::new();
    let kernels = registry.bind(&CpuCapabilities::none(), 8).unwrap();

    let (org_data, stride, origin) = padded_plane(16, 16, 7);
    let (rec_data, _, _) = padded_plane(16, 16, 11);
    let org = PlaneView::new(&org_data, stride, origin);
    let rec = PlaneView::new(&rec_data, stride, origin);

    for eo_class in 0..4u8 {
        let bound = (kernels.sao_edge_stats)(&org, &rec, 16, 16, eo_class);
        let direct = inloop::collect_edge_statistics(&org, &rec, 16, 16, eo_class);
        assert_eq!(bound.sum, direct.sum);
        assert_eq!(bound.count, direct.count);
    }
}

// ============================================================================
// Parallel statistics collection
// ============================================================================

#[test]
fn test_parallel_statistics_match_serial() {
    let (org_data, stride, origin) = padded_plane(32, 32, 21);
    let (rec_data, _, _) = padded_plane(32, 32, 42);
    let org = PlaneView::new(&org_data, stride, origin);
    let rec = PlaneView::new(&rec_data, stride, origin);

    let grid = varied_grid(32, 32);
    let params = BlockParams {
        x_dst: 0,
        y_dst: 0,
        width: 32,
        height: 32,
        channel: ChannelType::Luma,
        vb_ctu_height: 64,
        vb_pos: 60,
    };
    let clip = clip_values(ChannelType::Luma, 8);

    let mut serial = AlfCovariance::new_per_class();
    collect_block_statistics(&mut serial, Some(&grid), &org, &rec, &params, &clip);

    // An uneven band size exercises the short final band.
    let mut parallel = AlfCovariance::new_per_class();
    collect_block_statistics_par(&mut parallel, Some(&grid), &org, &rec, &params, &clip, 5);

    for (s, p) in serial.iter().zip(parallel.iter()) {
        assert_eq!(s.pix_acc, p.pix_acc);
        assert_eq!(s.y, p.y);
        assert!(s.ee == p.ee);
    }
}

#[test]
fn test_parallel_single_band_matches_serial() {
    let (org_data, stride, origin) = padded_plane(16, 16, 3);
    let (rec_data, _, _) = padded_plane(16, 16, 5);
    let org = PlaneView::new(&org_data, stride, origin);
    let rec = PlaneView::new(&rec_data, stride, origin);

    let params = BlockParams {
        x_dst: 0,
        y_dst: 0,
        width: 16,
        height: 16,
        channel: ChannelType::Chroma,
        vb_ctu_height: 32,
        vb_pos: 30,
    };
    let clip = clip_values(ChannelType::Chroma, 8);

    let mut serial = vec![AlfCovariance::new()];
    collect_block_statistics(&mut serial, None, &org, &rec, &params, &clip);

    let mut parallel = vec![AlfCovariance::new()];
    collect_block_statistics_par(&mut parallel, None, &org, &rec, &params, &clip, 16);

    assert_eq!(serial[0].pix_acc, parallel[0].pix_acc);
    assert_eq!(serial[0].y, parallel[0].y);
    assert!(serial[0].ee == parallel[0].ee);
}
