//! Convenience re-exports of the commonly used types.
//!
//! ```
//! use inloop::prelude::*;
//! ```

pub use crate::parallel::collect_block_statistics_par;
pub use crate::registry::{BoundKernels, Candidate, KernelRegistry, Requirement};

pub use inloop_core::{
    detect_cpu, sample_max, ChannelType, CpuCapabilities, Error, PlaneView, PlaneViewMut, Result,
};

pub use inloop_alf::{
    clip_values, collect_block_statistics, AlfCovariance, BlockParams, ClassifierEntry,
    ClassifierGrid, MAX_NUM_CLASSES, NUM_CLIPPING_VALUES,
};

pub use inloop_sao::{
    band_ddistortion, collect_edge_statistics, edge_ddistortion, reconstruct, EdgeStats, SaoColor,
    SaoInfo, SaoType,
};
