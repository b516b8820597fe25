//! Runtime CPU feature detection.
//!
//! Kernel binding consults the detected capabilities to pick the best viable
//! implementation of each operation. The scalar reference kernels require no
//! capabilities at all.

/// Detected CPU capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuCapabilities {
    // x86_64 features
    /// SSE4.2 support (baseline for modern x86_64).
    pub sse42: bool,
    /// AVX2 support (256-bit integer SIMD).
    pub avx2: bool,
    /// AVX-512 support.
    pub avx512: bool,

    // ARM features
    /// NEON support (baseline for AArch64).
    pub neon: bool,
}

impl CpuCapabilities {
    /// Capabilities with every feature disabled. Always a valid binding
    /// target because scalar kernels have no requirements.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if any SIMD acceleration is available.
    pub fn has_simd(&self) -> bool {
        self.sse42 || self.avx2 || self.avx512 || self.neon
    }

    /// Get the best available instruction level as a string.
    pub fn best_level(&self) -> &'static str {
        if self.avx512 {
            "AVX-512"
        } else if self.avx2 {
            "AVX2"
        } else if self.sse42 {
            "SSE4.2"
        } else if self.neon {
            "NEON"
        } else {
            "Scalar"
        }
    }
}

/// Detect CPU capabilities at runtime.
#[cfg(target_arch = "x86_64")]
pub fn detect_cpu() -> CpuCapabilities {
    let mut caps = CpuCapabilities::default();

    if is_x86_feature_detected!("sse4.2") {
        caps.sse42 = true;
    }
    if is_x86_feature_detected!("avx2") {
        caps.avx2 = true;
    }
    if is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw") {
        caps.avx512 = true;
    }

    caps
}

/// Detect CPU capabilities at runtime (ARM).
#[cfg(target_arch = "aarch64")]
pub fn detect_cpu() -> CpuCapabilities {
    // NEON is always available on AArch64
    CpuCapabilities {
        neon: true,
        ..Default::default()
    }
}

/// Fallback for other architectures.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub fn detect_cpu() -> CpuCapabilities {
    CpuCapabilities::default()
}
