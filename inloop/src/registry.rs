//! Kernel registry and startup binding.
//!
//! Every operation has one or more candidate implementations registered as
//! `(name, priority, capability requirement, entry point)`. At startup the
//! caller binds the registry once against the detected CPU capabilities and
//! target bit depth, obtaining a [`BoundKernels`] set of plain function
//! pointers; all candidates of one operation are drop-in substitutable.
//!
//! The registry is an explicit value owned by the caller's configuration,
//! not a process-wide table.

use tracing::debug;

use inloop_alf::{AlfCovariance, BlockParams, ClassifierGrid, NUM_CLIPPING_VALUES};
use inloop_core::{CpuCapabilities, Error, PlaneView, PlaneViewMut, Result};
use inloop_sao::{EdgeStats, SaoColor, SaoInfo, NUM_EDGE_CATEGORIES};

/// Entry point for ALF block statistics collection.
pub type AlfBlockStatsFn = fn(
    &mut [AlfCovariance],
    Option<&ClassifierGrid>,
    &PlaneView,
    &PlaneView,
    &BlockParams,
    &[i16; NUM_CLIPPING_VALUES],
);

/// Entry point for SAO edge statistics collection.
pub type SaoEdgeStatsFn = fn(&PlaneView, &PlaneView, usize, usize, u8) -> EdgeStats;

/// Entry point for SAO reconstruction.
pub type SaoReconstructFn =
    fn(&PlaneView, &mut PlaneViewMut, usize, usize, &SaoInfo, SaoColor, u8);

/// Entry point for SAO band distortion estimation.
pub type SaoBandDdistortionFn = fn(&PlaneView, &PlaneView, usize, usize, i32, &[i32; 4], u8) -> i32;

/// Entry point for SAO edge distortion estimation.
pub type SaoEdgeDdistortionFn =
    fn(&PlaneView, &PlaneView, usize, usize, u8, &[i32; NUM_EDGE_CATEGORIES]) -> i32;

/// CPU capability a candidate needs to be viable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Viable on any CPU.
    None,
    /// Requires AVX2.
    Avx2,
    /// Requires NEON.
    Neon,
}

impl Requirement {
    fn satisfied_by(&self, caps: &CpuCapabilities) -> bool {
        match self {
            Requirement::None => true,
            Requirement::Avx2 => caps.avx2,
            Requirement::Neon => caps.neon,
        }
    }
}

/// One registered implementation of an operation.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<F> {
    /// Implementation name, reported after binding.
    pub name: &'static str,
    /// Higher priority wins among viable candidates.
    pub priority: u32,
    /// Capability the candidate needs.
    pub requires: Requirement,
    /// The kernel itself.
    pub entry: F,
}

struct Table<F: Copy> {
    operation: &'static str,
    candidates: Vec<Candidate<F>>,
}

impl<F: Copy> Table<F> {
    fn new(operation: &'static str, reference: Candidate<F>) -> Self {
        Self {
            operation,
            candidates: vec![reference],
        }
    }

    fn register(&mut self, candidate: Candidate<F>) {
        self.candidates.push(candidate);
    }

    fn bind(&self, caps: &CpuCapabilities) -> Result<(&'static str, F)> {
        self.candidates
            .iter()
            .filter(|c| c.requires.satisfied_by(caps))
            .max_by_key(|c| c.priority)
            .map(|c| (c.name, c.entry))
            .ok_or(Error::NoImplementation {
                operation: self.operation,
            })
    }
}

fn reference<F>(entry: F) -> Candidate<F> {
    Candidate {
        name: "generic",
        priority: 0,
        requires: Requirement::None,
        entry,
    }
}

/// Candidate tables for every operation, pre-populated with the scalar
/// reference kernels.
pub struct KernelRegistry {
    alf_block_stats: Table<AlfBlockStatsFn>,
    sao_edge_stats: Table<SaoEdgeStatsFn>,
    sao_reconstruct: Table<SaoReconstructFn>,
    sao_band_ddistortion: Table<SaoBandDdistortionFn>,
    sao_edge_ddistortion: Table<SaoEdgeDdistortionFn>,
}

impl KernelRegistry {
    /// Registry holding only the scalar reference kernels.
    pub fn new() -> Self {
        Self {
            alf_block_stats: Table::new(
                "alf_block_stats",
                reference(inloop_alf::collect_block_statistics as AlfBlockStatsFn),
            ),
            sao_edge_stats: Table::new(
                "sao_edge_stats",
                reference(inloop_sao::collect_edge_statistics as SaoEdgeStatsFn),
            ),
            sao_reconstruct: Table::new(
                "sao_reconstruct",
                reference(inloop_sao::reconstruct as SaoReconstructFn),
            ),
            sao_band_ddistortion: Table::new(
                "sao_band_ddistortion",
                reference(inloop_sao::band_ddistortion as SaoBandDdistortionFn),
            ),
            sao_edge_ddistortion: Table::new(
                "sao_edge_ddistortion",
                reference(inloop_sao::edge_ddistortion as SaoEdgeDdistortionFn),
            ),
        }
    }

    /// Register an additional ALF block statistics implementation.
    pub fn register_alf_block_stats(&mut self, candidate: Candidate<AlfBlockStatsFn>) {
        self.alf_block_stats.register(candidate);
    }

    /// Register an additional SAO edge statistics implementation.
    pub fn register_sao_edge_stats(&mut self, candidate: Candidate<SaoEdgeStatsFn>) {
        self.sao_edge_stats.register(candidate);
    }

    /// Register an additional SAO reconstruction implementation.
    pub fn register_sao_reconstruct(&mut self, candidate: Candidate<SaoReconstructFn>) {
        self.sao_reconstruct.register(candidate);
    }

    /// Register an additional SAO band distortion implementation.
    pub fn register_sao_band_ddistortion(&mut self, candidate: Candidate<SaoBandDdistortionFn>) {
        self.sao_band_ddistortion.register(candidate);
    }

    /// Register an additional SAO edge distortion implementation.
    pub fn register_sao_edge_ddistortion(&mut self, candidate: Candidate<SaoEdgeDdistortionFn>) {
        self.sao_edge_ddistortion.register(candidate);
    }

    /// Bind one implementation per operation for the given capabilities and
    /// bit depth.
    ///
    /// Only 8-bit planes are supported; any other depth fails, and the
    /// caller treats that as fatal at startup.
    pub fn bind(&self, caps: &CpuCapabilities, bit_depth: u8) -> Result<BoundKernels> {
        if bit_depth != 8 {
            return Err(Error::UnsupportedBitDepth { bit_depth });
        }

        let (alf_name, alf_block_stats) = self.alf_block_stats.bind(caps)?;
        let (edge_name, sao_edge_stats) = self.sao_edge_stats.bind(caps)?;
        let (rec_name, sao_reconstruct) = self.sao_reconstruct.bind(caps)?;
        let (band_dd_name, sao_band_ddistortion) = self.sao_band_ddistortion.bind(caps)?;
        let (edge_dd_name, sao_edge_ddistortion) = self.sao_edge_ddistortion.bind(caps)?;

        let names = vec![
            ("alf_block_stats", alf_name),
            ("sao_edge_stats", edge_name),
            ("sao_reconstruct", rec_name),
            ("sao_band_ddistortion", band_dd_name),
            ("sao_edge_ddistortion", edge_dd_name),
        ];
        for (operation, implementation) in &names {
            debug!(operation, implementation, "Kernel bound");
        }

        Ok(BoundKernels {
            alf_block_stats,
            sao_edge_stats,
            sao_reconstruct,
            sao_band_ddistortion,
            sao_edge_ddistortion,
            names,
        })
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One bound implementation per operation.
#[derive(Debug)]
pub struct BoundKernels {
    /// ALF block statistics collection.
    pub alf_block_stats: AlfBlockStatsFn,
    /// SAO edge statistics collection.
    pub sao_edge_stats: SaoEdgeStatsFn,
    /// SAO reconstruction.
    pub sao_reconstruct: SaoReconstructFn,
    /// SAO band distortion estimation.
    pub sao_band_ddistortion: SaoBandDdistortionFn,
    /// SAO edge distortion estimation.
    pub sao_edge_ddistortion: SaoEdgeDdistortionFn,
    names: Vec<(&'static str, &'static str)>,
}

impl BoundKernels {
    /// `(operation, implementation)` pairs chosen by the binding.
    pub fn bound_names(&self) -> &[(&'static str, &'static str)] {
        &self.names
    }
}
