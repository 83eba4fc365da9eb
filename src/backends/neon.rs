//! ARM NEON backend implementation (aarch64 128-bit SIMD)
//!
//! This backend uses NEON intrinsics for 128-bit SIMD operations.
//! NEON is mandatory on AArch64, and AArch64 NEON always has fused multiply-add.
//!
//! # Performance
//!
//! Expected speedup: 4x for operations on f32 vectors (4 elements per register).
//! Similar performance characteristics to SSE2 on x86_64.
//!
//! # Safety
//!
//! All NEON intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::VectorBackend;
use crate::tiling::Tiling;

/// ARM NEON backend (128-bit SIMD)
pub struct NeonBackend;

impl VectorBackend for NeonBackend {
    const LANES: usize = 4;

    #[target_feature(enable = "neon")]
    unsafe fn add(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Process 4 elements at a time using NEON (128-bit = 4 x f32)
        for i in tiling.chunk_starts() {
            let va = vld1q_f32(a.as_ptr().add(i));
            let vb = vld1q_f32(b.as_ptr().add(i));
            vst1q_f32(result.as_mut_ptr().add(i), vaddq_f32(va, vb));
        }

        // Handle remaining elements with scalar code
        for j in tiling.remainder_range() {
            result[j] = a[j] + b[j];
        }
    }

    #[target_feature(enable = "neon")]
    unsafe fn sub(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = vld1q_f32(a.as_ptr().add(i));
            let vb = vld1q_f32(b.as_ptr().add(i));
            vst1q_f32(result.as_mut_ptr().add(i), vsubq_f32(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] - b[j];
        }
    }

    #[target_feature(enable = "neon")]
    unsafe fn mul(a: &[f32], b: &[f32], result: &mut [f32]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = vld1q_f32(a.as_ptr().add(i));
            let vb = vld1q_f32(b.as_ptr().add(i));
            vst1q_f32(result.as_mut_ptr().add(i), vmulq_f32(va, vb));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] * b[j];
        }
    }

    #[target_feature(enable = "neon")]
    unsafe fn scale(a: &[f32], scalar: f32, result: &mut [f32]) {
        debug_assert_eq!(a.len(), result.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = vld1q_f32(a.as_ptr().add(i));
            vst1q_f32(result.as_mut_ptr().add(i), vmulq_n_f32(va, scalar));
        }

        for j in tiling.remainder_range() {
            result[j] = a[j] * scalar;
        }
    }

    #[target_feature(enable = "neon")]
    unsafe fn axpy(a: &[f32], scalar: f32, acc: &mut [f32]) {
        debug_assert_eq!(a.len(), acc.len());
        let tiling = Tiling::new(a.len(), Self::LANES);
        let scalar_vec = vdupq_n_f32(scalar);

        for i in tiling.chunk_starts() {
            let va = vld1q_f32(a.as_ptr().add(i));
            let vacc = vld1q_f32(acc.as_ptr().add(i));

            // acc = acc + a * scalar (fused)
            vst1q_f32(acc.as_mut_ptr().add(i), vfmaq_f32(vacc, va, scalar_vec));
        }

        for j in tiling.remainder_range() {
            acc[j] += a[j] * scalar;
        }
    }

    #[target_feature(enable = "neon")]
    unsafe fn scaled_sub(a: &[f32], scalar: f32, acc: &mut [f32]) {
        debug_assert_eq!(a.len(), acc.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        for i in tiling.chunk_starts() {
            let va = vld1q_f32(a.as_ptr().add(i));
            let vacc = vld1q_f32(acc.as_ptr().add(i));
            let vresult = vsubq_f32(vacc, vmulq_n_f32(va, scalar));
            vst1q_f32(acc.as_mut_ptr().add(i), vresult);
        }

        for j in tiling.remainder_range() {
            acc[j] -= a[j] * scalar;
        }
    }

    #[target_feature(enable = "neon")]
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        let tiling = Tiling::new(a.len(), Self::LANES);

        // Accumulator for 4-way parallel accumulation
        let mut acc = vdupq_n_f32(0.0);

        for i in tiling.chunk_starts() {
            let va = vld1q_f32(a.as_ptr().add(i));
            let vb = vld1q_f32(b.as_ptr().add(i));
            acc = vfmaq_f32(acc, va, vb);
        }

        // Horizontal sum across all 4 lanes
        let mut result = vaddvq_f32(acc);

        for j in tiling.remainder_range() {
            result += a[j] * b[j];
        }

        result
    }
}
