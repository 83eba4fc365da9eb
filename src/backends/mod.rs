//! Backend implementations for different SIMD instruction sets
//!
//! This module contains the actual SIMD kernels for each backend. All backends
//! implement [`VectorBackend`], and every SIMD kernel follows the same
//! two-phase loop from [`crate::tiling`]: a vector body over
//! `floor(len / LANES) * LANES` elements, then a scalar remainder.
//!
//! # Safety
//!
//! All `unsafe` code is isolated within backend implementations. The public API
//! remains 100% safe: [`crate::Matrix`] and [`crate::Vector`] only hold a backend
//! that passed [`crate::Backend::ensure_available`], and they always hand the
//! kernels slices of matching length.
//!
//! # Backends
//!
//! - `scalar`: Portable baseline implementation (no SIMD)
//! - `sse2`: x86_64 baseline SIMD (128-bit)
//! - `avx2`: x86_64 advanced SIMD (256-bit with FMA)
//! - `neon`: aarch64 SIMD (128-bit with FMA)
//! - `wasm`: WebAssembly SIMD128

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

#[cfg(target_arch = "x86_64")]
pub mod avx2;

#[cfg(target_arch = "aarch64")]
pub mod neon;

#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
pub mod wasm;

/// Backend trait defining the kernels the matrix operators are built from
///
/// # Safety
///
/// Implementations may use unsafe SIMD intrinsics. Callers must ensure:
/// - The CPU supports the instruction set
/// - All slice arguments of one call have the same length
pub trait VectorBackend {
    /// f32 lanes processed per vector step
    const LANES: usize;

    /// Element-wise addition: result[i] = a[i] + b[i]
    ///
    /// # Safety
    ///
    /// - `a`, `b` and `result` must have the same length
    unsafe fn add(a: &[f32], b: &[f32], result: &mut [f32]);

    /// Element-wise subtraction: result[i] = a[i] - b[i]
    ///
    /// # Safety
    ///
    /// - `a`, `b` and `result` must have the same length
    unsafe fn sub(a: &[f32], b: &[f32], result: &mut [f32]);

    /// Element-wise multiplication: result[i] = a[i] * b[i]
    ///
    /// # Safety
    ///
    /// - `a`, `b` and `result` must have the same length
    unsafe fn mul(a: &[f32], b: &[f32], result: &mut [f32]);

    /// Scalar multiplication: result[i] = a[i] * scalar
    ///
    /// # Safety
    ///
    /// - `a` and `result` must have the same length
    unsafe fn scale(a: &[f32], scalar: f32, result: &mut [f32]);

    /// Multiply-accumulate: acc[i] = a[i] * scalar + acc[i]
    ///
    /// FMA-capable backends fuse the vector body; the scalar tail rounds the
    /// product before adding.
    ///
    /// # Safety
    ///
    /// - `a` and `acc` must have the same length
    unsafe fn axpy(a: &[f32], scalar: f32, acc: &mut [f32]);

    /// Scaled subtraction: acc[i] = acc[i] - a[i] * scalar
    ///
    /// The product is rounded before the subtraction on every backend.
    ///
    /// # Safety
    ///
    /// - `a` and `acc` must have the same length
    unsafe fn scaled_sub(a: &[f32], scalar: f32, acc: &mut [f32]);

    /// Dot product: sum(a[i] * b[i])
    ///
    /// # Safety
    ///
    /// - `a` and `b` must have the same length
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32;
}

/// Runs one [`VectorBackend`] kernel on the implementation selected by a [`crate::Backend`]
///
/// `AVX` shares the SSE2 kernels and `AVX512` shares the AVX2 kernels. Backends
/// not compiled for this target fall back to scalar. `Auto` never reaches here
/// because matrices and vectors resolve it at construction.
macro_rules! dispatch {
    ($backend:expr, $op:ident($($arg:expr),* $(,)?)) => {{
        // SAFETY: the owning Matrix/Vector validated the backend with
        // `Backend::ensure_available`, and callers pass equal-length slices.
        unsafe {
            match $backend {
                #[cfg(target_arch = "x86_64")]
                $crate::Backend::SSE2 | $crate::Backend::AVX => {
                    <$crate::backends::sse2::Sse2Backend as $crate::backends::VectorBackend>::$op($($arg),*)
                }
                #[cfg(target_arch = "x86_64")]
                $crate::Backend::AVX2 | $crate::Backend::AVX512 => {
                    <$crate::backends::avx2::Avx2Backend as $crate::backends::VectorBackend>::$op($($arg),*)
                }
                #[cfg(target_arch = "aarch64")]
                $crate::Backend::NEON => {
                    <$crate::backends::neon::NeonBackend as $crate::backends::VectorBackend>::$op($($arg),*)
                }
                #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
                $crate::Backend::WasmSIMD => {
                    <$crate::backends::wasm::WasmBackend as $crate::backends::VectorBackend>::$op($($arg),*)
                }
                _ => {
                    <$crate::backends::scalar::ScalarBackend as $crate::backends::VectorBackend>::$op($($arg),*)
                }
            }
        }
    }};
}

pub(crate) use dispatch;
