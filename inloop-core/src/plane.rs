//! Strided sample-plane views.
//!
//! Filter kernels address pixels relative to a block origin inside a larger
//! caller-allocated buffer. Neighbor taps reach outside the block, so views
//! take signed in-block coordinates; the caller guarantees padding at least
//! as wide as the largest tap radius on every side accessed.

/// Channel type of a sample plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelType {
    /// Luma plane.
    Luma,
    /// Chroma plane (either component).
    Chroma,
}

/// Largest representable sample value for a bit depth.
#[inline]
pub fn sample_max(bit_depth: u8) -> i32 {
    (1i32 << bit_depth) - 1
}

/// Read-only view of a block inside a strided sample plane.
#[derive(Debug, Clone, Copy)]
pub struct PlaneView<'a> {
    data: &'a [u8],
    stride: usize,
    origin: usize,
}

impl<'a> PlaneView<'a> {
    /// Create a view with the block origin at `origin` samples into `data`.
    pub fn new(data: &'a [u8], stride: usize, origin: usize) -> Self {
        debug_assert!(origin <= data.len());
        Self {
            data,
            stride,
            origin,
        }
    }

    /// Row stride in samples.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Read the sample at signed in-block coordinates.
    ///
    /// Negative coordinates address the caller-provided padding. Reads
    /// outside the padded buffer violate the padding contract and panic.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> u8 {
        let idx = self.origin as isize + y * self.stride as isize + x;
        self.data[idx as usize]
    }

    /// View of the same plane with the origin moved down by `rows`.
    #[inline]
    pub fn with_row_offset(&self, rows: usize) -> PlaneView<'a> {
        PlaneView {
            data: self.data,
            stride: self.stride,
            origin: self.origin + rows * self.stride,
        }
    }
}

/// Writable view of a block inside a strided sample plane.
///
/// Output planes are distinct from their source; kernels never filter in
/// place.
#[derive(Debug)]
pub struct PlaneViewMut<'a> {
    data: &'a mut [u8],
    stride: usize,
    origin: usize,
}

impl<'a> PlaneViewMut<'a> {
    /// Create a writable view with the block origin at `origin`.
    pub fn new(data: &'a mut [u8], stride: usize, origin: usize) -> Self {
        debug_assert!(origin <= data.len());
        Self {
            data,
            stride,
            origin,
        }
    }

    /// Row stride in samples.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Write the sample at in-block coordinates.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        let idx = self.origin + y * self.stride + x;
        self.data[idx] = value;
    }

    /// Read back the sample at in-block coordinates.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.origin + y * self.stride + x]
    }
}
