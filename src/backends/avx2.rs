//! AVX2 backend implementation (x86_64 advanced SIMD)
//!
//! This backend uses AVX2 intrinsics for 256-bit SIMD operations with FMA.
//! AVX2 is available on Intel Haswell (2013+) and AMD Excavator (2015+) CPUs.
//!
//! # Performance
//!
//! Expected speedup: 8x for operations on f32 vectors (8 elements per register).
//! The `axpy` body is a single `vfmadd` per 8 lanes, which is the inner loop of
//! every matrix product.
//!
//! # Safety
//!
//! All AVX2 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::VectorBackend;
use crate::tiling::Tiling;

/// AVX2 backend (256-bit SIMD for x86_64)
pub struct Avx2Backend;

impl VectorBackend for Avx2Backend {
    const LANES: usize = 8;

    #[target_feature(enable = "avx2")]
    unsafe fn add(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Process 8 elements at a time using AVX2 (256-bit = 8 x f32)
        for i in tiling.chunk_starts() {
            let va = _mm256_loadu_ps(a.as_ptr().add(i));
            let vb = _mm256_loadu_ps(b.as_ptr().add(i));
            _mm256_storeu_ps(result.as_mut_ptr().add(i), _mm256_add_ps(va, vb));
        }

        // Handle remaining elements with scalar code
        for j in tiling.remainder_range() {
            result[j] = a[j] + b[j];
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn sub(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = _mm256_loadu_ps(a.as_ptr().add(i));
            let vb = _mm256_loadu_ps(b.as_ptr().add(i));
            _mm256_storeu_ps(result.as_mut_ptr().add(i), _mm256_sub_ps(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] - b[j];
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn mul(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = _mm256_loadu_ps(a.as_ptr().add(i));
            let vb = _mm256_loadu_ps(b.as_ptr().add(i));
            _mm256_storeu_ps(result.as_mut_ptr().add(i), _mm256_mul_ps(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] * b[j];
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn scale(a: &[f32], scalar: f32, result: &mut [f32]) {
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Broadcast scalar to all 8 lanes
        let scalar_vec = _mm256_set1_ps(scalar);

        for i in tiling.chunk_starts() {
            let va = _mm256_loadu_ps(a.as_ptr().add(i));
            _mm256_storeu_ps(result.as_mut_ptr().add(i), _mm256_mul_ps(va, scalar_vec));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] * scalar;
        }
    }

    #[target_feature(enable = "avx2", enable = "fma")]
    unsafe fn axpy(a: &[f32], scalar: f32, acc: &mut [f32]) {
        debug_assert_eq!(a.len(), acc.len());
        let tiling = Tiling::new(a.len(), Self::LANES);
        let scalar_vec = _mm256_set1_ps(scalar);

        for i in tiling.chunk_starts() {
            let va = _mm256_loadu_ps(a.as_ptr().add(i));
            let vacc = _mm256_loadu_ps(acc.as_ptr().add(i));

            // acc = a * scalar + acc
            let vresult = _mm256_fmadd_ps(va, scalar_vec, vacc);
            _mm256_storeu_ps(acc.as_mut_ptr().add(i), vresult);
        }

        for j in tiling.remainder_range() {
            acc[j] += a[j] * scalar;
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn scaled_sub(a: &[f32], scalar: f32, acc: &mut [f32]) {
        debug_assert_eq!(a.len(), acc.len());
        let tiling = Tiling::new(a.len(), Self::LANES);
        let scalar_vec = _mm256_set1_ps(scalar);

        for i in tiling.chunk_starts() {
            let va = _mm256_loadu_ps(a.as_ptr().add(i));
            let vacc = _mm256_loadu_ps(acc.as_ptr().add(i));

            // Not fused: the product is rounded before the subtract
            let vresult = _mm256_sub_ps(vacc, _mm256_mul_ps(va, scalar_vec));
            _mm256_storeu_ps(acc.as_mut_ptr().add(i), vresult);
        }

        for j in tiling.remainder_range() {
            acc[j] -= a[j] * scalar;
        }
    }

    #[target_feature(enable = "avx2", enable = "fma")]
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Accumulator for 8-way parallel accumulation
        let mut acc = _mm256_setzero_ps();

        for i in tiling.chunk_starts() {
            let va = _mm256_loadu_ps(a.as_ptr().add(i));
            let vb = _mm256_loadu_ps(b.as_ptr().add(i));

            // Fused multiply-add: acc = acc + (va * vb)
            acc = _mm256_fmadd_ps(va, vb, acc);
        }

        // Horizontal sum: reduce 8 lanes to single value
        let low = _mm256_castps256_ps128(acc);
        let high = _mm256_extractf128_ps(acc, 1);
        let sum4 = _mm_add_ps(low, high);
        let sum2 = _mm_hadd_ps(sum4, sum4);
        let sum1 = _mm_hadd_ps(sum2, sum2);
        let mut result = _mm_cvtss_f32(sum1);

        // Handle remaining elements with scalar code
        for j in tiling.remainder_range() {
            result += a[j] * b[j];
        }

        result
    }
}
