//! Per-pixel classifier grid consumed by the statistics collector.
//!
//! Classification itself happens upstream; this crate only reads the
//! resulting `(class, transpose)` tags.

/// Class index marking a pixel excluded from statistics.
pub const UNUSED_CLASS_IDX: u8 = 255;

/// Transpose index marking a pixel excluded from statistics.
pub const UNUSED_TRANSPOSE_IDX: u8 = 255;

/// One classifier tag: accumulation class and tap-pattern orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierEntry {
    /// Covariance class index, `< MAX_NUM_CLASSES` unless unused.
    pub class_idx: u8,
    /// Tap-pattern orientation, `0..=3` unless unused.
    pub transpose_idx: u8,
}

impl ClassifierEntry {
    /// Entry excluding its pixel from statistics.
    pub const UNUSED: ClassifierEntry = ClassifierEntry {
        class_idx: UNUSED_CLASS_IDX,
        transpose_idx: UNUSED_TRANSPOSE_IDX,
    };

    /// A pixel is skipped only when BOTH fields carry their sentinel value.
    #[inline]
    pub fn is_unused(&self) -> bool {
        self.class_idx == UNUSED_CLASS_IDX && self.transpose_idx == UNUSED_TRANSPOSE_IDX
    }
}

/// Dense per-pixel classifier grid in frame coordinates.
#[derive(Debug, Clone)]
pub struct ClassifierGrid {
    entries: Vec<ClassifierEntry>,
    stride: usize,
}

impl ClassifierGrid {
    /// Create a grid from row-major entries with the given row stride.
    pub fn new(entries: Vec<ClassifierEntry>, stride: usize) -> Self {
        debug_assert!(stride > 0 && entries.len() % stride == 0);
        Self { entries, stride }
    }

    /// Grid filled with a single entry, mainly useful for tests and for
    /// blocks classified as one class.
    pub fn filled(entry: ClassifierEntry, width: usize, height: usize) -> Self {
        Self {
            entries: vec![entry; width * height],
            stride: width,
        }
    }

    /// Entry at frame coordinates.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> ClassifierEntry {
        self.entries[y * self.stride + x]
    }

    /// Overwrite the entry at frame coordinates.
    pub fn set(&mut self, x: usize, y: usize, entry: ClassifierEntry) {
        self.entries[y * self.stride + x] = entry;
    }
}
