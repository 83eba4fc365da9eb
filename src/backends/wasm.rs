//! WebAssembly SIMD128 backend implementation
//!
//! This backend uses WebAssembly SIMD128 intrinsics for 128-bit SIMD operations.
//! SIMD128 is supported in modern browsers and wasm runtimes. It is compiled only
//! when the crate is built with `-C target-feature=+simd128`.
//!
//! # Performance
//!
//! Expected speedup: 4x for operations on f32 vectors (4 elements per register).
//! SIMD128 has no FMA, so `axpy` multiplies then adds.
//!
//! # Safety
//!
//! All WASM SIMD intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

use std::arch::wasm32::*;

use super::VectorBackend;
use crate::tiling::Tiling;

/// WebAssembly SIMD128 backend (128-bit SIMD)
pub struct WasmBackend;

impl VectorBackend for WasmBackend {
    const LANES: usize = 4;

    #[target_feature(enable = "simd128")]
    unsafe fn add(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Process 4 elements at a time using SIMD128 (128-bit = 4 x f32)
        for i in tiling.chunk_starts() {
            let va = v128_load(a.as_ptr().add(i) as *const v128);
            let vb = v128_load(b.as_ptr().add(i) as *const v128);
            v128_store(result.as_mut_ptr().add(i) as *mut v128, f32x4_add(va, vb));
        }

        // Handle remaining elements with scalar code
        for j in tiling.remainder_range() {
            result[j] = a[j] + b[j];
        }
    }

    #[target_feature(enable = "simd128")]
    unsafe fn sub(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = v128_load(a.as_ptr().add(i) as *const v128);
            let vb = v128_load(b.as_ptr().add(i) as *const v128);
            v128_store(result.as_mut_ptr().add(i) as *mut v128, f32x4_sub(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] - b[j];
        }
    }

    #[target_feature(enable = "simd128")]
    unsafe fn mul(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = v128_load(a.as_ptr().add(i) as *const v128);
            let vb = v128_load(b.as_ptr().add(i) as *const v128);
            v128_store(result.as_mut_ptr().add(i) as *mut v128, f32x4_mul(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] * b[j];
        }
    }

    #[target_feature(enable = "simd128")]
    unsafe fn scale(a: &[f32], scalar: f32, result: &mut [f32]) {
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);
        let scalar_vec = f32x4_splat(scalar);

        for i in tiling.chunk_starts() {
            let va = v128_load(a.as_ptr().add(i) as *const v128);
            v128_store(
                result.as_mut_ptr().add(i) as *mut v128,
                f32x4_mul(va, scalar_vec),
            );
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] * scalar;
        }
    }

    #[target_feature(enable = "simd128")]
    unsafe fn axpy(a: &[f32], scalar: f32, acc: &mut [f32]) {
        debug_assert_eq!(a.len(), acc.len());
        let tiling = Tiling::new(a.len(), Self::LANES);
        let scalar_vec = f32x4_splat(scalar);

        for i in tiling.chunk_starts() {
            let va = v128_load(a.as_ptr().add(i) as *const v128);
            let vacc = v128_load(acc.as_ptr().add(i) as *const v128);
            let vresult = f32x4_add(f32x4_mul(va, scalar_vec), vacc);
            v128_store(acc.as_mut_ptr().add(i) as *mut v128, vresult);
        }

        for j in tiling.remainder_range() {
            acc[j] += a[j] * scalar;
        }
    }

    #[target_feature(enable = "simd128")]
    unsafe fn scaled_sub(a: &[f32], scalar: f32, acc: &mut [f32]) {
        debug_assert_eq!(a.len(), acc.len());
        let tiling = Tiling::new(a.len(), Self::LANES);
        let scalar_vec = f32x4_splat(scalar);

        for i in tiling.chunk_starts() {
            let va = v128_load(a.as_ptr().add(i) as *const v128);
            let vacc = v128_load(acc.as_ptr().add(i) as *const v128);
            let vresult = f32x4_sub(vacc, f32x4_mul(va, scalar_vec));
            v128_store(acc.as_mut_ptr().add(i) as *mut v128, vresult);
        }

        for j in tiling.remainder_range() {
            acc[j] -= a[j] * scalar;
        }
    }

    #[target_feature(enable = "simd128")]
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Accumulator for 4-way parallel accumulation
        let mut acc = f32x4_splat(0.0);

        for i in tiling.chunk_starts() {
            let va = v128_load(a.as_ptr().add(i) as *const v128);
            let vb = v128_load(b.as_ptr().add(i) as *const v128);
            acc = f32x4_add(acc, f32x4_mul(va, vb));
        }

        // Horizontal sum: extract all 4 lanes and sum them
        let mut result = f32x4_extract_lane::<0>(acc)
            + f32x4_extract_lane::<1>(acc)
            + f32x4_extract_lane::<2>(acc)
            + f32x4_extract_lane::<3>(acc);

        for j in tiling.remainder_range() {
            result += a[j] * b[j];
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_mul() {
        let a = vec![2.0, 3.0, 4.0, 5.0, 6.0];
        let b = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut result = vec![0.0; 5];

        unsafe {
            WasmBackend::mul(&a, &b, &mut result);
        }

        assert_eq!(result, vec![2.0, 6.0, 12.0, 20.0, 30.0]);
    }

    #[test]
    fn test_wasm_axpy() {
        let a: Vec<f32> = (0..9).map(|i| i as f32).collect();
        let mut acc = vec![0.5; 9];

        unsafe {
            WasmBackend::axpy(&a, 2.0, &mut acc);
        }

        let expected: Vec<f32> = (0..9).map(|i| i as f32 * 2.0 + 0.5).collect();
        assert_eq!(acc, expected);
    }
}
