//! # Inloop SAO
//!
//! Sample adaptive offset (SAO) kernels: edge classification and statistics,
//! band and edge reconstruction, and distortion estimation for the offset
//! search.
//!
//! SAO corrects each reconstructed sample with a small signed offset chosen
//! either by its intensity band or by the local edge shape formed with two
//! directional neighbors. The statistics and distortion kernels here feed an
//! external rate-distortion search; the reconstruction kernel applies the
//! parameters that search settles on.

pub mod ddistortion;
pub mod edge;
pub mod reconstruct;

pub use ddistortion::{band_ddistortion, edge_ddistortion};
pub use edge::{collect_edge_statistics, edge_category, EdgeStats};
pub use reconstruct::reconstruct;

/// Number of canonical edge categories (including the neutral category 0).
pub const NUM_EDGE_CATEGORIES: usize = 5;

/// Neighbor direction pairs `(a, b)` for each edge class, as `(x, y)`
/// offsets: horizontal, vertical, and the two diagonals.
pub const EDGE_OFFSETS: [[(isize, isize); 2]; 4] = [
    [(-1, 0), (1, 0)],
    [(0, -1), (0, 1)],
    [(-1, -1), (1, 1)],
    [(1, -1), (-1, 1)],
];

/// SAO filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaoType {
    /// Filtering disabled; samples pass through.
    Off,
    /// Offset selected by intensity band.
    Band,
    /// Offset selected by local edge category.
    Edge,
}

/// Color component a SAO parameter set applies to.
///
/// The second chroma component addresses the upper bank of the offset array
/// and the second band position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaoColor {
    /// Luma.
    Y,
    /// First chroma component.
    U,
    /// Second chroma component.
    V,
}

impl SaoColor {
    /// Index into [`SaoInfo::band_position`] and the band offset banks.
    #[inline]
    pub fn band_bank(self) -> usize {
        match self {
            SaoColor::V => 1,
            _ => 0,
        }
    }

    /// Base index into [`SaoInfo::offsets`] for edge-mode categories.
    #[inline]
    pub fn edge_offset_base(self) -> usize {
        match self {
            SaoColor::V => 5,
            _ => 0,
        }
    }
}

/// SAO parameters for one CTU, produced by the external offset search.
///
/// `offsets` holds two 5-entry banks; the second bank is used by
/// [`SaoColor::V`]. In edge mode entry `bank + category` applies (category 0
/// is always zero). In band mode the four bucket offsets live at
/// `bank + 1 ..= bank + 4`.
#[derive(Debug, Clone)]
pub struct SaoInfo {
    /// Filter mode.
    pub sao_type: SaoType,
    /// Edge class selecting the neighbor direction pair, `0..=3`.
    pub eo_class: u8,
    /// Starting band per bank.
    pub band_position: [u8; 2],
    /// Offset banks, see type docs.
    pub offsets: [i32; 10],
}

impl SaoInfo {
    /// Parameter set that leaves every sample unchanged.
    pub fn off() -> Self {
        Self {
            sao_type: SaoType::Off,
            eo_class: 0,
            band_position: [0; 2],
            offsets: [0; 10],
        }
    }
}
