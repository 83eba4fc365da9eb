//! Backend Story Tests
//!
//! Every operator must give the same answer on every backend the host can run.
//! With integer-valued data all kernels are exact, so SIMD and scalar results
//! are compared bit for bit. Real-valued data is compared within a tolerance
//! because FMA backends round the multiply-accumulate once.

use denso::{Backend, DensoError, Matrix, Vector};

const ALL_BACKENDS: [Backend; 7] = [
    Backend::Scalar,
    Backend::SSE2,
    Backend::AVX,
    Backend::AVX2,
    Backend::AVX512,
    Backend::NEON,
    Backend::WasmSIMD,
];

fn available_backends() -> Vec<Backend> {
    ALL_BACKENDS
        .into_iter()
        .filter(|b| b.ensure_available().is_ok())
        .collect()
}

/// Matrix pinned to `backend` with `value(x, y)` at every element
fn matrix_on(
    backend: Backend,
    width: usize,
    height: usize,
    value: impl Fn(usize, usize) -> f32,
) -> Matrix<f32> {
    let mut m = Matrix::with_backend(width, height, backend).expect("available backend");
    for x in 0..width {
        for y in 0..height {
            m[(x, y)] = value(x, y);
        }
    }
    m
}

fn vector_on(backend: Backend, len: usize, value: impl Fn(usize) -> f32) -> Vector<f32> {
    let data: Vec<f32> = (0..len).map(value).collect();
    Vector::from_slice_with_backend(&data, backend).expect("available backend")
}

fn int_value(x: usize, y: usize) -> f32 {
    ((x * 5 + y * 3) % 13) as f32 - 6.0
}

/// All operators, integer data, several heights around the lane widths
fn run_all_ops(backend: Backend, height: usize) -> Vec<Vec<f32>> {
    let a = matrix_on(backend, 6, height, int_value);
    let b = matrix_on(backend, 4, 6, |x, y| int_value(y, x));
    let v = vector_on(backend, 6, |i| i as f32 - 2.0);
    let bias = vector_on(backend, height, |i| (i % 3) as f32);
    let col = matrix_on(backend, 1, height, |_, y| y as f32);

    let mut results = vec![
        a.multiply(&b).unwrap().as_slice().to_vec(),
        a.matvec(&v).unwrap().as_slice().to_vec(),
        a.subtract(&a.scale(2.0)).unwrap().as_slice().to_vec(),
        a.transpose().as_slice().to_vec(),
        Matrix::hadamard(&col, &col).unwrap().as_slice().to_vec(),
    ];

    let mut out = Vector::zeros(height);
    Matrix::madd_into(&a, &v, &bias, &mut out).unwrap();
    results.push(out.as_slice().to_vec());

    let mut res = Vector::zeros(6);
    Matrix::transposed_multiply_into(&a, &bias, &bias, &mut res).unwrap();
    results.push(res.as_slice().to_vec());

    let mut outer = Matrix::with_backend(6, height, backend).unwrap();
    Matrix::outer_into(&bias, &v, &mut outer).unwrap();
    results.push(outer.as_slice().to_vec());

    let mut weights = a.clone();
    Matrix::scaled_sub_assign(&a, 0.5, &mut weights).unwrap();
    results.push(weights.as_slice().to_vec());

    results
}

#[test]
fn test_matrix_ops_all_backends_match_scalar() {
    for height in [1, 3, 4, 5, 7, 8, 9, 15, 16, 17, 24, 33] {
        let expected = run_all_ops(Backend::Scalar, height);
        for backend in available_backends() {
            assert_eq!(
                run_all_ops(backend, height),
                expected,
                "{backend:?} diverged from scalar at height {height}"
            );
        }
    }
}

#[test]
fn test_real_valued_multiply_close_to_scalar() {
    let value = |x: usize, y: usize| ((x * 31 + y * 17) % 97) as f32 / 9.7 - 5.0;
    let scalar_a = matrix_on(Backend::Scalar, 40, 37, value);
    let b = matrix_on(Backend::Scalar, 11, 40, |x, y| value(y, x) * 0.3);
    let expected = scalar_a.multiply(&b).unwrap();

    for backend in available_backends() {
        let a = matrix_on(backend, 40, 37, value);
        let c = a.multiply(&b).unwrap();
        for (got, want) in c.as_slice().iter().zip(expected.as_slice()) {
            assert!(
                (got - want).abs() <= 1e-3,
                "{backend:?}: {got} vs {want}"
            );
        }
    }
}

/// Results run on the backend of the left operand
#[test]
fn test_results_inherit_left_backend() {
    for backend in available_backends() {
        let resolved = backend.ensure_available().unwrap();
        let a = matrix_on(backend, 3, 3, int_value);
        let b = matrix_on(Backend::Scalar, 3, 3, int_value);

        assert_eq!(a.backend(), resolved);
        assert_eq!(a.multiply(&b).unwrap().backend(), resolved);
        assert_eq!(a.transpose().backend(), resolved);
        assert_eq!(a.scale(2.0).backend(), resolved);
        assert_eq!(
            a.matvec(&Vector::from_slice(&[1.0, 2.0, 3.0]))
                .unwrap()
                .backend(),
            resolved
        );
    }
}

/// Test that Vector operations work on all backends
#[test]
fn test_vector_ops_all_backends() {
    for backend in available_backends() {
        let a = vector_on(backend, 9, |i| i as f32 + 1.0);
        let b = vector_on(backend, 9, |i| 9.0 - i as f32);

        let sum = a.add(&b).expect("add should work");
        assert_eq!(sum.as_slice(), &[10.0; 9]);

        let prod = a.hadamard(&b).expect("hadamard should work");
        assert_eq!(
            prod.as_slice(),
            &[9.0, 16.0, 21.0, 24.0, 25.0, 24.0, 21.0, 16.0, 9.0]
        );

        assert_eq!(a.dot(&b).expect("dot should work"), 165.0);
        assert_eq!(a.scale(0.5)[8], 4.5);
    }
}

/// Test that backend selection returns a runnable backend
#[test]
fn test_backend_selection_always_valid() {
    let backend = Backend::select_best();

    assert!(
        ALL_BACKENDS.contains(&backend),
        "Backend::select_best() returned invalid backend: {:?}",
        backend
    );
    assert_eq!(backend.ensure_available(), Ok(backend));
    assert_eq!(Backend::Auto.resolve(), backend);
}

#[test]
fn test_unavailable_backend_rejected() {
    for backend in ALL_BACKENDS {
        if backend.ensure_available().is_err() {
            assert_eq!(
                Matrix::with_backend(2, 2, backend),
                Err(DensoError::UnsupportedBackend(backend))
            );
            assert!(Vector::from_slice_with_backend(&[1.0f32], backend).is_err());
        }
    }
}

#[cfg(test)]
mod backend_completeness {
    //! Compile-time verification that the backend enum stays exhaustive.

    use denso::Backend;

    /// Verify Backend enum has required variants
    #[test]
    fn test_backend_variants_exist() {
        // These pattern matches ensure the variants exist at compile time
        fn lanes(b: Backend) -> usize {
            match b {
                Backend::Scalar => 1,
                Backend::SSE2 | Backend::AVX | Backend::NEON | Backend::WasmSIMD => 4,
                Backend::AVX2 | Backend::AVX512 => 8,
                Backend::Auto => Backend::select_best().lane_width(),
            }
        }

        assert_eq!(lanes(Backend::Scalar), Backend::Scalar.lane_width());
        assert_eq!(lanes(Backend::Auto), Backend::Auto.lane_width());
    }
}
