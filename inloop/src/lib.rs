//! # Inloop
//!
//! In-loop post-processing filter kernels for a block-based video encoder:
//! ALF covariance statistics collection and SAO classification,
//! reconstruction and distortion estimation.
//!
//! ## Quick Start
//!
//! ```
//! use inloop::{detect_cpu, KernelRegistry};
//!
//! fn main() -> inloop::Result<()> {
//!     let registry = KernelRegistry::new();
//!     let kernels = registry.bind(&detect_cpu(), 8)?;
//!
//!     for (operation, implementation) in kernels.bound_names() {
//!         println!("{operation}: {implementation}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several crates:
//! - `inloop-core`: plane views, errors, CPU capability detection
//! - `inloop-alf`: ALF covariance accumulation
//! - `inloop-sao`: SAO edge/band kernels
//!
//! This crate re-exports the commonly used types and hosts the kernel
//! registry that binds one implementation per operation at startup, plus a
//! parallel driver for statistics collection.

pub mod parallel;
pub mod prelude;
pub mod registry;

pub use parallel::collect_block_statistics_par;
pub use registry::{BoundKernels, Candidate, KernelRegistry, Requirement};

// Re-export core types
pub use inloop_core::{
    detect_cpu, sample_max, ChannelType, CpuCapabilities, Error, PlaneView, PlaneViewMut, Result,
};

// Re-export ALF types
pub use inloop_alf::{
    clip_values, collect_block_statistics, AlfCovariance, BlockParams, ClassifierEntry,
    ClassifierGrid, MAX_NUM_CLASSES, MAX_NUM_LUMA_COEFF, NUM_CLIPPING_VALUES,
};

// Re-export SAO types
pub use inloop_sao::{
    band_ddistortion, collect_edge_statistics, edge_category, edge_ddistortion, reconstruct,
    EdgeStats, SaoColor, SaoInfo, SaoType, EDGE_OFFSETS, NUM_EDGE_CATEGORIES,
};
