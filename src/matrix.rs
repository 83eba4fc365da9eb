//! Matrix operations for Denso
//!
//! Provides a dense, column-major `f32` matrix whose arithmetic runs every inner
//! loop through the SIMD kernels in [`crate::backends`].
//!
//! Operators come in two families:
//!
//! - **Allocating** (`&self` methods): [`Matrix::multiply`], [`Matrix::matvec`],
//!   [`Matrix::subtract`], [`Matrix::scale`], [`Matrix::hadamard`],
//!   [`Matrix::transpose`]. They return fresh storage and never alias an operand.
//! - **Write-into** (associated functions taking `&mut` output):
//!   [`Matrix::multiply_into`], [`Matrix::madd_into`],
//!   [`Matrix::scaled_sub_assign`], [`Matrix::transposed_multiply_into`],
//!   [`Matrix::outer_into`]. They overwrite caller-owned storage, reusing its
//!   buffer whenever the shape already fits.
//!
//! # Example
//!
//! ```
//! use denso::Matrix;
//!
//! // 2 columns, 3 rows
//! let m = Matrix::new(2, 3).unwrap();
//! assert_eq!(m.width(), 2);
//! assert_eq!(m.height(), 3);
//! assert_eq!(m[(1, 2)], 0.0);
//! ```

use std::ops::{Index, IndexMut, Mul};

use crate::backends::dispatch;
use crate::{Backend, DensoError, Result, Vector};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Minimum number of output columns before `multiply` fans out over rayon
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 64;

/// A 2D matrix with column-major storage
///
/// Elements are addressed `(column, row)`: `m[(x, y)]` is column `x`, row `y`.
/// Each column is a contiguous buffer of `height` elements, and the columns are
/// laid out back to back.
///
/// # Storage Layout
///
/// For a matrix with columns `[a, b, c]` and `[d, e, f]` (width 2, height 3):
/// ```text
/// [[a, d],
///  [b, e],
///  [c, f]]
/// ```
/// Data is stored as: [a, b, c, d, e, f]
///
/// Width and height are fixed at construction; there is no resize.
///
/// # Example
///
/// ```
/// use denso::Matrix;
///
/// let m = Matrix::from_columns(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(m[(0, 0)], 1.0);
/// assert_eq!(m[(0, 1)], 2.0);
/// assert_eq!(m[(1, 0)], 3.0);
/// assert_eq!(m[(1, 1)], 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
    backend: Backend,
}

/// Validates a shape and returns its element count
fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(len) if len > 0 => Ok(len),
        _ => Err(DensoError::InvalidDimension { width, height }),
    }
}

fn check_extent(op: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(DensoError::DimensionMismatch {
            op,
            expected,
            actual,
        });
    }
    Ok(())
}

impl Matrix<f32> {
    /// Creates a zero-filled matrix of `width` columns and `height` rows
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either dimension is zero or
    /// `width * height` overflows `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Matrix;
    ///
    /// let m = Matrix::new(3, 4).unwrap();
    /// assert_eq!(m.shape(), (3, 4));
    /// assert!(Matrix::new(0, 4).is_err());
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_backend(width, height, Backend::Auto)
    }

    /// Creates a zero-filled matrix that runs its kernels on `backend`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either dimension is zero or the element
    /// count overflows, and `UnsupportedBackend` if the CPU cannot run `backend`.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::{Backend, Matrix};
    ///
    /// let m = Matrix::with_backend(2, 2, Backend::Scalar).unwrap();
    /// assert_eq!(m.backend(), Backend::Scalar);
    /// ```
    pub fn with_backend(width: usize, height: usize, backend: Backend) -> Result<Self> {
        check_dimensions(width, height)?;
        let backend = backend.ensure_available()?;
        Ok(Self::zeros_with_backend(width, height, backend))
    }

    /// Creates a matrix from column-major data
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` for a zero dimension and `DimensionMismatch`
    /// if `data.len() != width * height`.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.column(1), Some(&[3.0, 4.0][..]));
    /// ```
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        check_extent("from_vec", len, data.len())?;
        Ok(Self::from_raw_parts(
            width,
            height,
            data,
            Backend::select_best(),
        ))
    }

    /// Creates a matrix from its column buffers
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if there are no columns or the columns are
    /// empty, and `DimensionMismatch` if the columns differ in length.
    pub fn from_columns(columns: Vec<Vec<f32>>) -> Result<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        let len = check_dimensions(width, height)?;

        let mut data = Vec::with_capacity(len);
        for column in columns {
            check_extent("from_columns", height, column.len())?;
            data.extend(column);
        }

        Ok(Self::from_raw_parts(
            width,
            height,
            data,
            Backend::select_best(),
        ))
    }

    /// Zero-filled matrix reusing an already validated backend
    ///
    /// `width * height` must already be known not to overflow.
    fn zeros_with_backend(width: usize, height: usize, backend: Backend) -> Self {
        Self::from_raw_parts(width, height, vec![0.0; width * height], backend)
    }

    /// Wraps computed storage without validation (internal use only)
    ///
    /// Callers guarantee non-zero dimensions, `data.len() == width * height`
    /// and an available backend.
    pub(crate) fn from_raw_parts(
        width: usize,
        height: usize,
        data: Vec<f32>,
        backend: Backend,
    ) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(data.len(), width * height);
        Matrix {
            width,
            height,
            data,
            backend,
        }
    }

    /// Returns the number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the shape as (width, height)
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the backend the kernels run on
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the column-major backing store
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns column `x`, or `None` if `x >= width`
    pub fn column(&self, x: usize) -> Option<&[f32]> {
        (x < self.width).then(|| self.col(x))
    }

    /// Returns column `x` mutably, or `None` if `x >= width`
    pub fn column_mut(&mut self, x: usize) -> Option<&mut [f32]> {
        if x >= self.width {
            return None;
        }
        let start = x * self.height;
        Some(&mut self.data[start..start + self.height])
    }

    /// Iterates over the column buffers in order
    pub fn columns(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.height)
    }

    /// Reads the element at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `x >= width` or `y >= height`.
    pub fn get(&self, x: usize, y: usize) -> Result<f32> {
        let offset = self.offset(x, y)?;
        Ok(self.data[offset])
    }

    /// Writes the element at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `x >= width` or `y >= height`.
    pub fn set(&mut self, x: usize, y: usize, value: f32) -> Result<()> {
        let offset = self.offset(x, y)?;
        self.data[offset] = value;
        Ok(())
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(DensoError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x * self.height + y)
    }

    fn col(&self, x: usize) -> &[f32] {
        let start = x * self.height;
        &self.data[start..start + self.height]
    }

    /// Matrix multiplication
    ///
    /// Computes `C = A × B`, where C has `B.width` columns and `A.height` rows.
    ///
    /// Each output column is built by outer-product accumulation: for every `k`
    /// the whole column `A[:, k]` is scaled by `B[(j, k)]` and added into
    /// `C[:, j]`. The inner loop is the tiled `axpy` kernel (FMA body, scalar
    /// remainder), and the accumulation order is k-outer, row-inner on every
    /// backend.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `A.width != B.height`, and
    /// `InvalidDimension` if the `B.width × A.height` result cannot be sized.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Matrix;
    ///
    /// let a = Matrix::from_columns(vec![vec![1.0, 3.0], vec![2.0, 4.0]]).unwrap();
    /// let b = Matrix::from_columns(vec![vec![5.0, 7.0], vec![6.0, 8.0]]).unwrap();
    /// let c = a.multiply(&b).unwrap();
    ///
    /// // [[1, 2],   [[5, 6],   [[19, 22],
    /// //  [3, 4]] ×  [7, 8]] =  [43, 50]]
    /// assert_eq!(c.column(0), Some(&[19.0, 43.0][..]));
    /// assert_eq!(c.column(1), Some(&[22.0, 50.0][..]));
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self, other), fields(dims = %format!("{}x{} * {}x{}", self.width, self.height, other.width, other.height))))]
    pub fn multiply(&self, other: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.check_multiply(other)?;
        check_dimensions(other.width, self.height)?;

        let mut result = Matrix::zeros_with_backend(other.width, self.height, self.backend);
        self.accumulate_product(other, &mut result.data);

        Ok(result)
    }

    /// Writes `a × b` into `out`, replacing its contents
    ///
    /// When `out` already has the product's shape its storage is zeroed and
    /// reused; otherwise it is replaced by a fresh matrix. `out` is left
    /// untouched on error.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `a.width != b.height`.
    pub fn multiply_into(a: &Matrix<f32>, b: &Matrix<f32>, out: &mut Matrix<f32>) -> Result<()> {
        a.check_multiply(b)?;

        if out.shape() == (b.width, a.height) {
            out.data.fill(0.0);
            out.backend = a.backend;
            a.accumulate_product(b, &mut out.data);
        } else {
            *out = a.multiply(b)?;
        }

        Ok(())
    }

    fn check_multiply(&self, other: &Matrix<f32>) -> Result<()> {
        check_extent("multiply", self.width, other.height)
    }

    /// `out[:, j] += Σ_k self[:, k] * other[(j, k)]` for every output column `j`
    ///
    /// `out` is column-major with `other.width` columns of `self.height` rows.
    fn accumulate_product(&self, other: &Matrix<f32>, out: &mut [f32]) {
        let output_column = |(j, cj): (usize, &mut [f32])| {
            for (k, &s) in other.col(j).iter().enumerate() {
                dispatch!(self.backend, axpy(self.col(k), s, cj));
            }
        };

        // Columns are independent, so splitting them keeps the per-column order
        #[cfg(feature = "parallel")]
        {
            if other.width >= PARALLEL_THRESHOLD {
                use rayon::prelude::*;

                out.par_chunks_exact_mut(self.height)
                    .enumerate()
                    .for_each(&output_column);
                return;
            }
        }

        out.chunks_exact_mut(self.height)
            .enumerate()
            .for_each(&output_column);
    }

    /// Matrix-vector multiplication: A × v
    ///
    /// Produces a vector of length `A.height` by accumulating
    /// `r += A[:, j] * v[j]` column by column with the tiled `axpy` kernel.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `v.len() != A.width`.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    ///
    /// // [[1, 2, 3],
    /// //  [4, 5, 6]]
    /// let m = Matrix::from_columns(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]).unwrap();
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let result = m.matvec(&v).unwrap();
    ///
    /// assert_eq!(result.as_slice(), &[14.0, 32.0]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self, v), fields(dims = %format!("{}x{} * {}", self.width, self.height, v.len()))))]
    pub fn matvec(&self, v: &Vector<f32>) -> Result<Vector<f32>> {
        check_extent("matvec", self.width, v.len())?;

        let mut result = vec![0.0; self.height];
        self.accumulate_matvec(v.as_slice(), &mut result);

        Ok(Vector::with_backend(result, self.backend))
    }

    fn accumulate_matvec(&self, v: &[f32], acc: &mut [f32]) {
        for (column, &s) in self.columns().zip(v) {
            dispatch!(self.backend, axpy(column, s, acc));
        }
    }

    /// Writes `(a × v1) + v2` into `out`
    ///
    /// The product is accumulated directly in `out`'s buffer (reused when it
    /// already has length `a.height`), then `v2` is added. `out` is left
    /// untouched on error.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `v1.len() != a.width` or
    /// `v2.len() != a.height`.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    ///
    /// let m = Matrix::from_columns(vec![vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap();
    /// let mut out = Vector::zeros(2);
    /// Matrix::madd_into(
    ///     &m,
    ///     &Vector::from_slice(&[3.0, 4.0]),
    ///     &Vector::from_slice(&[0.5, 0.5]),
    ///     &mut out,
    /// )
    /// .unwrap();
    /// assert_eq!(out.as_slice(), &[3.5, 8.5]);
    /// ```
    pub fn madd_into(
        a: &Matrix<f32>,
        v1: &Vector<f32>,
        v2: &Vector<f32>,
        out: &mut Vector<f32>,
    ) -> Result<()> {
        check_extent("madd", a.width, v1.len())?;
        check_extent("madd", a.height, v2.len())?;

        if out.len() == a.height {
            out.as_mut_slice().fill(0.0);
        } else {
            *out = Vector::with_backend(vec![0.0; a.height], a.backend);
        }

        let acc = out.as_mut_slice();
        a.accumulate_matvec(v1.as_slice(), acc);
        // v2 * 1.0 is exact, so this is a plain rounded add
        dispatch!(a.backend, axpy(v2.as_slice(), 1.0, acc));

        Ok(())
    }

    /// Element-wise subtraction: A − B
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the heights or the widths differ.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Matrix;
    ///
    /// let a = Matrix::from_columns(vec![vec![5.0, 7.0]]).unwrap();
    /// let b = Matrix::from_columns(vec![vec![1.0, 2.0]]).unwrap();
    /// assert_eq!(a.subtract(&b).unwrap().as_slice(), &[4.0, 5.0]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self, other), fields(dims = %format!("{}x{}", self.width, self.height))))]
    pub fn subtract(&self, other: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.check_same_shape("subtract", other)?;

        let mut result = Matrix::zeros_with_backend(self.width, self.height, self.backend);
        let columns = self.columns().zip(other.columns());
        for ((a, b), c) in columns.zip(result.data.chunks_exact_mut(self.height)) {
            dispatch!(self.backend, sub(a, b, c));
        }

        Ok(result)
    }

    fn check_same_shape(&self, op: &'static str, other: &Matrix<f32>) -> Result<()> {
        check_extent(op, self.height, other.height)?;
        check_extent(op, self.width, other.width)
    }

    /// In-place scaled subtraction: `b := b − (a * rate)`
    ///
    /// The gradient-descent update step. Each product is rounded before it is
    /// subtracted, so the result is bit-identical to
    /// `b.subtract(&a.scale(rate))` without the two temporaries.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the shapes differ; `b` is untouched then.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Matrix;
    ///
    /// let gradient = Matrix::from_columns(vec![vec![2.0, 4.0]]).unwrap();
    /// let mut weights = Matrix::from_columns(vec![vec![1.0, 1.0]]).unwrap();
    /// Matrix::scaled_sub_assign(&gradient, 0.25, &mut weights).unwrap();
    /// assert_eq!(weights.as_slice(), &[0.5, 0.0]);
    /// ```
    pub fn scaled_sub_assign(a: &Matrix<f32>, rate: f32, b: &mut Matrix<f32>) -> Result<()> {
        b.check_same_shape("scaled subtract", a)?;

        let backend = b.backend;
        let height = b.height;
        for (ac, bc) in a.columns().zip(b.data.chunks_exact_mut(height)) {
            dispatch!(backend, scaled_sub(ac, rate, bc));
        }

        Ok(())
    }

    /// Scalar multiplication: A * s
    ///
    /// Also available as `&a * s`.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Matrix;
    ///
    /// let a = Matrix::from_columns(vec![vec![2.0, 3.0]]).unwrap();
    /// assert_eq!(a.scale(4.0).as_slice(), &[8.0, 12.0]);
    /// assert_eq!((&a * 4.0).as_slice(), &[8.0, 12.0]);
    /// ```
    pub fn scale(&self, scalar: f32) -> Matrix<f32> {
        let mut result = Matrix::zeros_with_backend(self.width, self.height, self.backend);
        for (a, c) in self.columns().zip(result.data.chunks_exact_mut(self.height)) {
            dispatch!(self.backend, scale(a, scalar, c));
        }
        result
    }

    /// Element-wise product of two single-column matrices
    ///
    /// One-column matrices double as column vectors, so this is the Hadamard
    /// product of two such vectors.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless both operands have width 1 and the
    /// same height.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Matrix;
    ///
    /// let a = Matrix::from_columns(vec![vec![1.0, 2.0, 3.0]]).unwrap();
    /// let b = Matrix::from_columns(vec![vec![4.0, 5.0, 6.0]]).unwrap();
    /// let c = Matrix::hadamard(&a, &b).unwrap();
    /// assert_eq!(c.as_slice(), &[4.0, 10.0, 18.0]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(a, b), fields(height = a.height)))]
    pub fn hadamard(a: &Matrix<f32>, b: &Matrix<f32>) -> Result<Matrix<f32>> {
        check_extent("hadamard", 1, a.width)?;
        check_extent("hadamard", 1, b.width)?;
        check_extent("hadamard", a.height, b.height)?;

        let mut result = Matrix::zeros_with_backend(1, a.height, a.backend);
        dispatch!(a.backend, mul(&a.data, &b.data, &mut result.data));

        Ok(result)
    }

    /// Transposes the matrix
    ///
    /// Returns a `(height, width)` matrix with `m[(j, i)] == self[(i, j)]`.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::Matrix;
    ///
    /// // [[1, 2, 3],     [[1, 4],
    /// //  [4, 5, 6]]  →   [2, 5],
    /// //                  [3, 6]]
    /// let m = Matrix::from_columns(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]).unwrap();
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), (2, 3));
    /// assert_eq!(t.column(0), Some(&[1.0, 2.0, 3.0][..]));
    /// assert_eq!(t.column(1), Some(&[4.0, 5.0, 6.0][..]));
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(dims = %format!("{}x{}", self.width, self.height))))]
    pub fn transpose(&self) -> Matrix<f32> {
        let mut result = Matrix::zeros_with_backend(self.height, self.width, self.backend);

        // Block size of 64 fits well in L1 cache (64*64*4 = 16KB for f32)
        const BLOCK_SIZE: usize = 64;

        for i_block in (0..self.width).step_by(BLOCK_SIZE) {
            for j_block in (0..self.height).step_by(BLOCK_SIZE) {
                let i_end = (i_block + BLOCK_SIZE).min(self.width);
                let j_end = (j_block + BLOCK_SIZE).min(self.height);

                for i in i_block..i_end {
                    let src = self.col(i);
                    for j in j_block..j_end {
                        // result[(j, i)] = self[(i, j)]
                        result.data[j * result.height + i] = src[j];
                    }
                }
            }
        }

        result
    }

    /// Writes `res[i] = dot(column_i(a), hadamard(b, c))` for every `i`
    ///
    /// This is `aᵀ · (b ∘ c)`: storage column `i` of `a` plays the role of row
    /// `i` of the transpose. The Hadamard product is formed once. Only the
    /// first `res.len()` columns are read, so a shorter `res` computes a prefix.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `b.len() != a.height`,
    /// `c.len() != b.len()` or `res.len() > a.width`. `res` is untouched then.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    ///
    /// let a = Matrix::from_columns(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    /// let b = Vector::from_slice(&[1.0, 1.0]);
    /// let c = Vector::from_slice(&[2.0, 0.5]);
    /// let mut res = Vector::zeros(3);
    /// Matrix::transposed_multiply_into(&a, &b, &c, &mut res).unwrap();
    /// assert_eq!(res.as_slice(), &[3.0, 8.0, 13.0]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(a, b, c, res), fields(dims = %format!("{}x{}", a.width, a.height))))]
    pub fn transposed_multiply_into(
        a: &Matrix<f32>,
        b: &Vector<f32>,
        c: &Vector<f32>,
        res: &mut Vector<f32>,
    ) -> Result<()> {
        check_extent("transposed multiply", a.height, b.len())?;
        check_extent("transposed multiply", b.len(), c.len())?;
        if res.len() > a.width {
            return Err(DensoError::DimensionMismatch {
                op: "transposed multiply",
                expected: a.width,
                actual: res.len(),
            });
        }

        let scaled = b.hadamard(c)?;
        for (i, r) in res.as_mut_slice().iter_mut().enumerate() {
            *r = dispatch!(a.backend, dot(a.col(i), scaled.as_slice()));
        }

        Ok(())
    }

    /// Writes the outer product `a ⊗ b` into `r`, column by column
    ///
    /// Column `i` of `r` is overwritten with `a * b[i]`; nothing is accumulated.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `r.width != b.len()` or
    /// `r.height != a.len()`. `r` is untouched then.
    ///
    /// # Example
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    ///
    /// let a = Vector::from_slice(&[1.0, 2.0]);
    /// let b = Vector::from_slice(&[3.0, 4.0, 5.0]);
    /// let mut r = Matrix::new(3, 2).unwrap();
    /// Matrix::outer_into(&a, &b, &mut r).unwrap();
    /// assert_eq!(r.as_slice(), &[3.0, 6.0, 4.0, 8.0, 5.0, 10.0]);
    /// ```
    pub fn outer_into(a: &Vector<f32>, b: &Vector<f32>, r: &mut Matrix<f32>) -> Result<()> {
        check_extent("outer product", r.width, b.len())?;
        check_extent("outer product", r.height, a.len())?;

        let backend = r.backend;
        let height = r.height;
        for (column, &s) in r.data.chunks_exact_mut(height).zip(b.as_slice()) {
            dispatch!(backend, scale(a.as_slice(), s, column));
        }

        Ok(())
    }
}

impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// Element at `(column, row)`
    ///
    /// # Panics
    ///
    /// Panics if the column or row is out of range; use [`Matrix::get`] for a
    /// checked read.
    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(
            x < self.width && y < self.height,
            "index ({x}, {y}) out of bounds for {}x{} matrix",
            self.width,
            self.height
        );
        &self.data[x * self.height + y]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    /// Mutable element at `(column, row)`
    ///
    /// # Panics
    ///
    /// Panics if the column or row is out of range; use [`Matrix::set`] for a
    /// checked write.
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(
            x < self.width && y < self.height,
            "index ({x}, {y}) out of bounds for {}x{} matrix",
            self.width,
            self.height
        );
        &mut self.data[x * self.height + y]
    }
}

impl Mul<f32> for &Matrix<f32> {
    type Output = Matrix<f32>;

    fn mul(self, scalar: f32) -> Matrix<f32> {
        self.scale(scalar)
    }
}

impl Mul<f32> for Matrix<f32> {
    type Output = Matrix<f32>;

    fn mul(self, scalar: f32) -> Matrix<f32> {
        self.scale(scalar)
    }
}

/// Wraps a vector as a single-column matrix: `m[(0, i)] == v[i]`
///
/// # Errors
///
/// Returns `InvalidDimension` for an empty vector.
///
/// # Example
///
/// ```
/// use denso::{Matrix, Vector};
///
/// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// let m = Matrix::try_from(&v).unwrap();
/// assert_eq!(m.shape(), (1, 3));
/// assert_eq!(m[(0, 2)], 3.0);
/// ```
impl TryFrom<&Vector<f32>> for Matrix<f32> {
    type Error = DensoError;

    fn try_from(v: &Vector<f32>) -> Result<Self> {
        check_dimensions(1, v.len())?;
        Ok(Matrix::from_raw_parts(
            1,
            v.len(),
            v.as_slice().to_vec(),
            v.backend(),
        ))
    }
}
