//! Denso: dense column-major matrix kernel with SIMD-tiled inner loops
//!
//! **Denso** (Spanish: "dense") is the numeric substrate for small neural-network
//! toolkits: a column-major `f32` [`Matrix`], the [`Vector`] it multiplies, and
//! the in-place helpers a training loop needs to avoid allocating per step.
//!
//! # Design Principles
//!
//! - **One tiling pattern everywhere**: every arithmetic kernel runs a SIMD
//!   body over `floor(len / W) * W` elements and a scalar remainder over the rest
//! - **Runtime dispatch**: the lane width `W` comes from the best backend the CPU
//!   supports (SSE2/AVX2 on x86_64, NEON on aarch64, SIMD128 on wasm32)
//! - **Zero unsafe in public API**: `unsafe` is isolated in `backends`
//! - **Reproducible accumulation**: products accumulate column-major, k-outer,
//!   row-inner, on every backend
//!
//! # Storage
//!
//! Matrices are indexed `(column, row)`. `m[(x, y)]` is column `x`, row `y`, and
//! each column is one contiguous buffer of `height` floats.
//!
//! # Quick Start
//!
//! ```rust
//! use denso::Matrix;
//!
//! // Columns [1, 2] and [3, 4]
//! let a = Matrix::from_columns(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let identity = Matrix::from_columns(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
//!
//! let c = a.multiply(&identity).unwrap();
//! assert_eq!(c, a);
//! assert_eq!(c[(1, 0)], 3.0);
//! ```

pub mod backends;
pub mod error;
pub mod matrix;
pub mod tiling;
pub mod vector;

pub use error::{DensoError, Result};
pub use matrix::Matrix;
pub use tiling::Tiling;
pub use vector::Vector;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

use backends::scalar::ScalarBackend;
use backends::VectorBackend;

/// Backend execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Scalar fallback (no SIMD)
    Scalar,
    /// SSE2 (x86_64 baseline)
    SSE2,
    /// AVX (256-bit, no FMA; runs the SSE2 kernels)
    AVX,
    /// AVX2 (256-bit with FMA)
    AVX2,
    /// AVX-512 (runs the AVX2 kernels)
    AVX512,
    /// ARM NEON
    NEON,
    /// WebAssembly SIMD128
    WasmSIMD,
    /// Auto-select best available
    Auto,
}

impl Backend {
    /// Select the best available backend for the current platform
    ///
    /// This is a convenience wrapper around `select_best_available_backend()`
    pub fn select_best() -> Self {
        select_best_available_backend()
    }

    /// Resolves `Auto` to the detected backend; every other variant is returned as is
    pub fn resolve(self) -> Self {
        match self {
            Backend::Auto => select_best_available_backend(),
            other => other,
        }
    }

    /// Checks that this backend can run on the current CPU
    ///
    /// # Errors
    ///
    /// Returns [`DensoError::UnsupportedBackend`] when the instruction set is missing.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Backend;
    ///
    /// assert!(Backend::Scalar.ensure_available().is_ok());
    /// assert!(Backend::Auto.ensure_available().is_ok());
    /// ```
    pub fn ensure_available(self) -> Result<Self> {
        let resolved = self.resolve();
        if resolved.is_available() {
            Ok(resolved)
        } else {
            Err(DensoError::UnsupportedBackend(self))
        }
    }

    fn is_available(self) -> bool {
        match self {
            Backend::Scalar | Backend::Auto => true,
            #[cfg(target_arch = "x86_64")]
            Backend::SSE2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX => is_x86_feature_detected!("avx"),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX2 => is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma"),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX512 => {
                is_x86_feature_detected!("avx512f")
                    && is_x86_feature_detected!("avx2")
                    && is_x86_feature_detected!("fma")
            }
            #[cfg(target_arch = "aarch64")]
            Backend::NEON => std::arch::is_aarch64_feature_detected!("neon"),
            #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
            Backend::WasmSIMD => true,
            _ => false,
        }
    }

    /// Number of f32 lanes the kernels for this backend process per step
    ///
    /// This is the `W` of the vector-body / scalar-remainder split. Backends
    /// that share kernels report the same width (`AVX` runs SSE2 code,
    /// `AVX512` runs AVX2 code).
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Backend;
    ///
    /// assert_eq!(Backend::Scalar.lane_width(), 1);
    /// assert!(Backend::Auto.lane_width() >= 1);
    /// ```
    pub fn lane_width(self) -> usize {
        match self.resolve() {
            Backend::Scalar => ScalarBackend::LANES,
            #[cfg(target_arch = "x86_64")]
            Backend::SSE2 | Backend::AVX => backends::sse2::Sse2Backend::LANES,
            #[cfg(target_arch = "x86_64")]
            Backend::AVX2 | Backend::AVX512 => backends::avx2::Avx2Backend::LANES,
            #[cfg(target_arch = "aarch64")]
            Backend::NEON => backends::neon::NeonBackend::LANES,
            #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
            Backend::WasmSIMD => backends::wasm::WasmBackend::LANES,
            _ => ScalarBackend::LANES,
        }
    }
}

/// Detect best SIMD backend for x86_64 platforms
#[cfg(target_arch = "x86_64")]
fn detect_x86_backend() -> Backend {
    if is_x86_feature_detected!("avx512f")
        && is_x86_feature_detected!("avx2")
        && is_x86_feature_detected!("fma")
    {
        return Backend::AVX512;
    }
    if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
        return Backend::AVX2;
    }
    if is_x86_feature_detected!("avx") {
        return Backend::AVX;
    }
    if is_x86_feature_detected!("sse2") {
        return Backend::SSE2;
    }
    Backend::Scalar
}

/// Detect best SIMD backend for ARM platforms
#[cfg(target_arch = "aarch64")]
fn detect_arm_backend() -> Backend {
    if std::arch::is_aarch64_feature_detected!("neon") {
        Backend::NEON
    } else {
        Backend::Scalar
    }
}

/// Detect best SIMD backend for WebAssembly
#[cfg(target_arch = "wasm32")]
fn detect_wasm_backend() -> Backend {
    #[cfg(target_feature = "simd128")]
    {
        Backend::WasmSIMD
    }
    #[cfg(not(target_feature = "simd128"))]
    {
        Backend::Scalar
    }
}

/// Select the best available backend for the current platform
///
/// This function performs runtime CPU feature detection and selects the most
/// optimized backend available. The selection follows this priority:
///
/// **x86_64**:
/// 1. AVX-512 (if `avx512f` plus `avx2`/`fma` detected)
/// 2. AVX2 (if `avx2` and `fma` features detected)
/// 3. AVX (if `avx` feature detected)
/// 4. SSE2 (baseline for x86_64)
/// 5. Scalar (fallback)
///
/// **aarch64**: NEON if available, else Scalar
///
/// **WASM**: SIMD128 (if compiled with it), else Scalar
///
/// **Other platforms**: Scalar
///
/// # Examples
///
/// ```
/// use denso::select_best_available_backend;
///
/// let backend = select_best_available_backend();
/// println!("Using backend: {:?} ({} lanes)", backend, backend.lane_width());
/// ```
pub fn select_best_available_backend() -> Backend {
    #[cfg(target_arch = "x86_64")]
    {
        detect_x86_backend()
    }

    #[cfg(target_arch = "aarch64")]
    {
        detect_arm_backend()
    }

    #[cfg(target_arch = "wasm32")]
    {
        detect_wasm_backend()
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "wasm32"
    )))]
    {
        Backend::Scalar
    }
}
