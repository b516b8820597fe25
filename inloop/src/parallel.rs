//! Parallel driver for ALF statistics collection.
//!
//! Splits a block into horizontal bands, collects statistics per band on the
//! rayon pool and merges the partial accumulators. All accumulated values are
//! integer-valued and far below 2^53, so the merged result equals the
//! single-pass result exactly even for the `f64` fields.

use rayon::prelude::*;

use inloop_alf::{collect_block_statistics, AlfCovariance, BlockParams, ClassifierGrid};
use inloop_alf::NUM_CLIPPING_VALUES;
use inloop_core::PlaneView;

/// Collect ALF block statistics with the block split into horizontal bands
/// of `rows_per_band` rows.
///
/// Produces the same accumulators as [`collect_block_statistics`] over the
/// whole block.
#[allow(clippy::too_many_arguments)]
pub fn collect_block_statistics_par(
    covariances: &mut [AlfCovariance],
    classifier: Option<&ClassifierGrid>,
    org: &PlaneView,
    rec: &PlaneView,
    params: &BlockParams,
    clip: &[i16; NUM_CLIPPING_VALUES],
    rows_per_band: usize,
) {
    let rows_per_band = rows_per_band.max(1);
    let n_bands = params.height.div_ceil(rows_per_band);

    let partials: Vec<Vec<AlfCovariance>> = (0..n_bands)
        .into_par_iter()
        .map(|band| {
            let y0 = band * rows_per_band;
            let band_height = rows_per_band.min(params.height - y0);
            let band_params = BlockParams {
                y_dst: params.y_dst + y0,
                height: band_height,
                ..*params
            };

            let mut acc = vec![AlfCovariance::new(); covariances.len()];
            collect_block_statistics(
                &mut acc,
                classifier,
                &org.with_row_offset(y0),
                &rec.with_row_offset(y0),
                &band_params,
                clip,
            );
            acc
        })
        .collect();

    for partial in &partials {
        for (cov, band_cov) in covariances.iter_mut().zip(partial.iter()) {
            cov.merge(band_cov);
        }
    }
}
