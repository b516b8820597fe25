//! # Inloop ALF
//!
//! Adaptive loop filter (ALF) covariance statistics collection.
//!
//! The ALF stage of the encoder derives per-class Wiener filter coefficients
//! from statistics gathered over the reconstructed picture. This crate
//! implements the gathering: for every pixel, a vector of clipped neighbor
//! differences is sampled over a diamond tap pattern and folded into a
//! symmetric per-class covariance structure that the external coefficient
//! search consumes.
//!
//! Neighbor sampling respects horizontal virtual boundaries (vertical tap
//! offsets are clamped so no read crosses the boundary row) and an external
//! per-pixel classifier that selects the accumulation class and one of four
//! tap-pattern orientations.

pub mod classifier;
pub mod covariance;
pub mod stats;

pub use classifier::{ClassifierEntry, ClassifierGrid, UNUSED_CLASS_IDX, UNUSED_TRANSPOSE_IDX};
pub use covariance::{AlfCovariance, MAX_NUM_CLASSES, MAX_NUM_LUMA_COEFF, NUM_CLIPPING_VALUES};
pub use stats::{accumulate_tap_vector, clip_values, collect_block_statistics, BlockParams};
