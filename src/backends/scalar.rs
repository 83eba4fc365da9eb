//! Scalar (non-SIMD) backend implementation
//!
//! This is the portable baseline implementation that works on all platforms.
//! It uses simple loops without any SIMD instructions, which makes it the
//! "remainder path only" case of the tiling pattern (one lane, no body).
//!
//! # Performance
//!
//! This backend provides the correctness reference but no SIMD acceleration.

use super::VectorBackend;

/// Scalar backend (portable, no SIMD)
pub struct ScalarBackend;

impl VectorBackend for ScalarBackend {
    const LANES: usize = 1;

    // SAFETY: This function is safe because:
    // 1. All slice accesses are bounds-checked by Rust indexing
    // 2. No raw pointer arithmetic is performed
    // 3. Marked unsafe only to match VectorBackend trait interface
    unsafe fn add(a: &[f32], b: &[f32], result: &mut [f32]) {
        for i in 0..a.len() {
            result[i] = a[i] + b[i];
        }
    }

    // SAFETY: bounds-checked indexing only; unsafe to match the trait
    unsafe fn sub(a: &[f32], b: &[f32], result: &mut [f32]) {
        for i in 0..a.len() {
            result[i] = a[i] - b[i];
        }
    }

    // SAFETY: bounds-checked indexing only; unsafe to match the trait
    unsafe fn mul(a: &[f32], b: &[f32], result: &mut [f32]) {
        for i in 0..a.len() {
            result[i] = a[i] * b[i];
        }
    }

    // SAFETY: bounds-checked indexing only; unsafe to match the trait
    unsafe fn scale(a: &[f32], scalar: f32, result: &mut [f32]) {
        for i in 0..a.len() {
            result[i] = a[i] * scalar;
        }
    }

    // SAFETY: bounds-checked indexing only; unsafe to match the trait
    unsafe fn axpy(a: &[f32], scalar: f32, acc: &mut [f32]) {
        for i in 0..a.len() {
            acc[i] += a[i] * scalar;
        }
    }

    // SAFETY: bounds-checked indexing only; unsafe to match the trait
    unsafe fn scaled_sub(a: &[f32], scalar: f32, acc: &mut [f32]) {
        for i in 0..a.len() {
            acc[i] -= a[i] * scalar;
        }
    }

    // SAFETY: bounds-checked indexing only; unsafe to match the trait
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        let mut sum = 0.0;
        for i in 0..a.len() {
            sum += a[i] * b[i];
        }
        sum
    }
}
