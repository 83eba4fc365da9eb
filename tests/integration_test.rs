//! Integration Test Suite
//!
//! Exercises the public API end to end: the matrix operators, the vector
//! collaborator they share kernels with, and the error surface.
//!
//! Coverage:
//! - All matrix operators, allocating and write-into
//! - Vector add, hadamard, dot and scale
//! - Error handling and edge cases
//! - Mathematical properties and invariants

use denso::{DensoError, Matrix, Vector};
use proptest::prelude::*;

// ============================================================================
// PROPERTY TEST CONFIGURATION
// ============================================================================

const PROPTEST_CASES: u32 = 50;

/// Integer-valued data keeps every kernel result exact
fn int_data(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec((-20i32..20).prop_map(|x| x as f32), len)
}

fn col_vec(data: &[f32]) -> Matrix<f32> {
    Matrix::try_from(&Vector::from_slice(data)).unwrap()
}

// ============================================================================
// LAYER FORWARD / BACKWARD
// ============================================================================

/// One dense layer trained a single step: forward with `madd_into`, error
/// propagated with `transposed_multiply_into`, gradient with `outer_into`,
/// update with `scaled_sub_assign`.
#[test]
fn integration_dense_layer_step() {
    // 3 inputs, 2 outputs: weights are 3 columns of height 2
    let mut weights = Matrix::from_columns(vec![
        vec![0.5, -1.0],
        vec![1.0, 0.0],
        vec![-0.5, 2.0],
    ])
    .unwrap();
    let input = Vector::from_slice(&[1.0, 2.0, 4.0]);
    let bias = Vector::from_slice(&[0.25, -0.25]);

    let mut output = Vector::zeros(2);
    Matrix::madd_into(&weights, &input, &bias, &mut output).unwrap();
    // [0.5 + 2 - 2 + 0.25, -1 + 0 + 8 - 0.25]
    assert_eq!(output.as_slice(), &[0.75, 6.75]);

    // Error signal and activation derivative
    let error = Vector::from_slice(&[1.0, -1.0]);
    let derivative = Vector::from_slice(&[1.0, 0.5]);

    let mut back = Vector::zeros(3);
    Matrix::transposed_multiply_into(&weights, &error, &derivative, &mut back).unwrap();
    // delta = [1, -0.5]; column i of the weights dotted with delta
    assert_eq!(back.as_slice(), &[1.0, 1.0, -1.5]);

    let delta = error.hadamard(&derivative).unwrap();
    let mut gradient = Matrix::new(3, 2).unwrap();
    Matrix::outer_into(&delta, &input, &mut gradient).unwrap();
    assert_eq!(gradient.column(2), Some(&[4.0, -2.0][..]));

    Matrix::scaled_sub_assign(&gradient, 0.5, &mut weights).unwrap();
    assert_eq!(
        weights.as_slice(),
        &[0.0, -0.75, 0.0, 0.5, -2.5, 3.0]
    );
}

#[test]
fn integration_write_into_matches_allocating() {
    let a = Matrix::from_vec(4, 9, (0..36).map(|i| (i % 7) as f32 - 3.0).collect()).unwrap();
    let b = Matrix::from_vec(5, 4, (0..20).map(|i| (i % 5) as f32).collect()).unwrap();

    let mut out = Matrix::new(1, 1).unwrap();
    Matrix::multiply_into(&a, &b, &mut out).unwrap();
    assert_eq!(out, a.multiply(&b).unwrap());

    // Second call reuses the buffer and must not accumulate into it
    Matrix::multiply_into(&a, &b, &mut out).unwrap();
    assert_eq!(out, a.multiply(&b).unwrap());
}

#[test]
fn integration_error_messages() {
    let err = Matrix::new(2, 3)
        .unwrap()
        .multiply(&Matrix::new(4, 5).unwrap())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Dimension mismatch in multiply: expected 2, got 5"
    );

    let err = Matrix::new(0, 3).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid matrix dimensions: 0x3 (both must be non-zero)"
    );

    let err = Matrix::new(2, 3).unwrap().get(2, 0).unwrap_err();
    assert!(matches!(err, DensoError::OutOfBounds { x: 2, y: 0, .. }));
}

#[test]
fn integration_single_column_roundtrip_through_vector() {
    let v = Vector::from_slice(&[2.0, 3.0]);
    let m = Matrix::try_from(&v).unwrap();
    let scaled = &m * 4.0;
    assert_eq!(scaled.column(0), Some(v.scale(4.0).as_slice()));
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    /// A × I = A for any shape
    #[test]
    fn integration_multiply_identity(
        width in 1usize..12,
        height in 1usize..40,
        seed in int_data(12 * 40)
    ) {
        let a = Matrix::from_vec(width, height, seed[..width * height].to_vec()).unwrap();
        let mut identity = Matrix::new(width, width).unwrap();
        for i in 0..width {
            identity[(i, i)] = 1.0;
        }
        prop_assert_eq!(a.multiply(&identity).unwrap(), a);
    }

    /// (A × B)ᵀ = Bᵀ × Aᵀ
    #[test]
    fn integration_transpose_of_product(a in int_data(3 * 10), b in int_data(6 * 3)) {
        let a = Matrix::from_vec(3, 10, a).unwrap();
        let b = Matrix::from_vec(6, 3, b).unwrap();

        let lhs = a.multiply(&b).unwrap().transpose();
        let rhs = b.transpose().multiply(&a.transpose()).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    /// matvec agrees with multiplying by a single-column matrix
    #[test]
    fn integration_matvec_is_single_column_multiply(a in int_data(5 * 19), v in int_data(5)) {
        let a = Matrix::from_vec(5, 19, a).unwrap();
        let product = a.matvec(&Vector::from_slice(&v)).unwrap();
        let expected = a.multiply(&col_vec(&v)).unwrap();
        prop_assert_eq!(product.as_slice(), expected.as_slice());
    }

    /// Matrix hadamard agrees with Vector hadamard
    #[test]
    fn integration_hadamard_matches_vector(a in int_data(33), b in int_data(33)) {
        let m = Matrix::hadamard(&col_vec(&a), &col_vec(&b)).unwrap();
        let v = Vector::from_slice(&a).hadamard(&Vector::from_slice(&b)).unwrap();
        prop_assert_eq!(m.as_slice(), v.as_slice());
    }

    /// b := b − a·r leaves a zero matrix when b = a·r
    #[test]
    fn integration_scaled_sub_to_zero(a in int_data(4 * 11), rate in -4i32..4) {
        let a = Matrix::from_vec(4, 11, a).unwrap();
        let rate = rate as f32;
        let mut b = a.scale(rate);
        Matrix::scaled_sub_assign(&a, rate, &mut b).unwrap();
        prop_assert!(b.as_slice().iter().all(|&x| x == 0.0));
    }
}
