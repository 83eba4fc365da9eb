//! SSE2 backend implementation (x86_64 baseline SIMD)
//!
//! This backend uses SSE2 intrinsics for 128-bit SIMD operations.
//! SSE2 is available on all x86_64 CPUs as a baseline requirement.
//!
//! # Performance
//!
//! Expected speedup: 4x for operations on f32 vectors (4 elements per register).
//! SSE2 has no FMA, so `axpy` multiplies then adds.
//!
//! # Safety
//!
//! All SSE2 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::VectorBackend;
use crate::tiling::Tiling;

/// SSE2 backend (128-bit SIMD for x86_64)
pub struct Sse2Backend;

impl VectorBackend for Sse2Backend {
    const LANES: usize = 4;

    #[target_feature(enable = "sse2")]
    unsafe fn add(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = _mm_loadu_ps(a.as_ptr().add(i));
            let vb = _mm_loadu_ps(b.as_ptr().add(i));
            _mm_storeu_ps(result.as_mut_ptr().add(i), _mm_add_ps(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] + b[j];
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn sub(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = _mm_loadu_ps(a.as_ptr().add(i));
            let vb = _mm_loadu_ps(b.as_ptr().add(i));
            _mm_storeu_ps(result.as_mut_ptr().add(i), _mm_sub_ps(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] - b[j];
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn mul(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = _mm_loadu_ps(a.as_ptr().add(i));
            let vb = _mm_loadu_ps(b.as_ptr().add(i));
            _mm_storeu_ps(result.as_mut_ptr().add(i), _mm_mul_ps(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] * b[j];
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn scale(a: &[f32], scalar: f32, result: &mut [f32]) {
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Broadcast scalar to all 4 lanes
        let scalar_vec = _mm_set1_ps(scalar);

        for i in tiling.chunk_starts() {
            let va = _mm_loadu_ps(a.as_ptr().add(i));
            _mm_storeu_ps(result.as_mut_ptr().add(i), _mm_mul_ps(va, scalar_vec));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] * scalar;
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn axpy(a: &[f32], scalar: f32, acc: &mut [f32]) {
        debug_assert_eq!(a.len(), acc.len());
        let tiling = Tiling::new(a.len(), Self::LANES);
        let scalar_vec = _mm_set1_ps(scalar);

        for i in tiling.chunk_starts() {
            let va = _mm_loadu_ps(a.as_ptr().add(i));
            let vacc = _mm_loadu_ps(acc.as_ptr().add(i));
            let vresult = _mm_add_ps(_mm_mul_ps(va, scalar_vec), vacc);
            _mm_storeu_ps(acc.as_mut_ptr().add(i), vresult);
        }

        for j in tiling.remainder_range() {
            acc[j] += a[j] * scalar;
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn scaled_sub(a: &[f32], scalar: f32, acc: &mut [f32]) {
        debug_assert_eq!(a.len(), acc.len());
        let tiling = Tiling::new(a.len(), Self::LANES);
        let scalar_vec = _mm_set1_ps(scalar);

        for i in tiling.chunk_starts() {
            let va = _mm_loadu_ps(a.as_ptr().add(i));
            let vacc = _mm_loadu_ps(acc.as_ptr().add(i));
            let vresult = _mm_sub_ps(vacc, _mm_mul_ps(va, scalar_vec));
            _mm_storeu_ps(acc.as_mut_ptr().add(i), vresult);
        }

        for j in tiling.remainder_range() {
            acc[j] -= a[j] * scalar;
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Accumulator for SIMD portion
        let mut sum_vec = _mm_setzero_ps();

        for i in tiling.chunk_starts() {
            let va = _mm_loadu_ps(a.as_ptr().add(i));
            let vb = _mm_loadu_ps(b.as_ptr().add(i));
            sum_vec = _mm_add_ps(sum_vec, _mm_mul_ps(va, vb));
        }

        // Horizontal sum of the SIMD accumulator
        let mut sum_array = [0.0f32; 4];
        _mm_storeu_ps(sum_array.as_mut_ptr(), sum_vec);
        let mut sum = sum_array[0] + sum_array[1] + sum_array[2] + sum_array[3];

        for j in tiling.remainder_range() {
            sum += a[j] * b[j];
        }

        sum
    }
}
