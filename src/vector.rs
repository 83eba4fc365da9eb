//! Vector type with multi-backend support
//!
//! [`Vector`] is the one-dimensional collaborator of [`crate::Matrix`]: the
//! operand and result of matrix-vector products, and the factors of the outer
//! product. It carries just what the matrix operators consume: length, indexed
//! access, dot product, Hadamard product, addition and scaling.

use std::ops::{Index, IndexMut};

use crate::backends::dispatch;
use crate::{Backend, DensoError, Result};

/// High-performance vector with multi-backend support
///
/// # Examples
///
/// ```
/// use denso::Vector;
///
/// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
/// let result = a.add(&b).unwrap();
///
/// assert_eq!(result.as_slice(), &[5.0, 7.0, 9.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Vector<T> {
    data: Vec<T>,
    backend: Backend,
}

impl<T> Vector<T>
where
    T: Clone,
{
    /// Create vector from slice using auto-selected optimal backend
    ///
    /// # Examples
    ///
    /// ```
    /// use denso::Vector;
    ///
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(v.len(), 4);
    /// ```
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Create vector that takes ownership of `data`
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data,
            backend: crate::select_best_available_backend(),
        }
    }

    /// Create vector with specific backend (for benchmarking or testing)
    ///
    /// `Backend::Auto` resolves to the detected best backend.
    ///
    /// # Errors
    ///
    /// Returns [`DensoError::UnsupportedBackend`] if the CPU cannot run `backend`.
    ///
    /// # Examples
    ///
    /// ```
    /// use denso::{Backend, Vector};
    ///
    /// let v = Vector::from_slice_with_backend(&[1.0, 2.0], Backend::Scalar).unwrap();
    /// assert_eq!(v.backend(), Backend::Scalar);
    /// ```
    pub fn from_slice_with_backend(data: &[T], backend: Backend) -> Result<Self> {
        Ok(Self {
            data: data.to_vec(),
            backend: backend.ensure_available()?,
        })
    }

    /// Get underlying data as slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get underlying data as mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get vector length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if vector is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use denso::Vector;
    ///
    /// let v1: Vector<f32> = Vector::from_slice(&[]);
    /// assert!(v1.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the backend being used
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Element at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Consumes the vector, returning its storage
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub(crate) fn with_backend(data: Vec<T>, backend: Backend) -> Self {
        Self { data, backend }
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl Vector<f32> {
    /// Create a zero-filled vector of `len` elements
    ///
    /// # Examples
    ///
    /// ```
    /// use denso::Vector;
    ///
    /// let v = Vector::zeros(3);
    /// assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0]);
    /// ```
    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![0.0; len])
    }

    fn check_len(&self, op: &'static str, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(DensoError::DimensionMismatch {
                op,
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }

    /// Element-wise addition
    ///
    /// # Errors
    ///
    /// Returns [`DensoError::DimensionMismatch`] if vectors have different lengths.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_len("vector add", other)?;

        let mut result = vec![0.0; self.len()];
        dispatch!(self.backend, add(&self.data, &other.data, &mut result));

        Ok(Self::with_backend(result, self.backend))
    }

    /// Element-wise (Hadamard) product
    ///
    /// # Examples
    ///
    /// ```
    /// use denso::Vector;
    ///
    /// let a = Vector::from_slice(&[2.0, 3.0, 4.0]);
    /// let b = Vector::from_slice(&[5.0, 6.0, 7.0]);
    /// let result = a.hadamard(&b).unwrap();
    ///
    /// assert_eq!(result.as_slice(), &[10.0, 18.0, 28.0]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DensoError::DimensionMismatch`] if vectors have different lengths.
    pub fn hadamard(&self, other: &Self) -> Result<Self> {
        self.check_len("vector hadamard", other)?;

        let mut result = vec![0.0; self.len()];
        dispatch!(self.backend, mul(&self.data, &other.data, &mut result));

        Ok(Self::with_backend(result, self.backend))
    }

    /// Dot product
    ///
    /// # Examples
    ///
    /// ```
    /// use denso::Vector;
    ///
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// let result = a.dot(&b).unwrap();
    ///
    /// assert_eq!(result, 32.0); // 1*4 + 2*5 + 3*6 = 4 + 10 + 18 = 32
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DensoError::DimensionMismatch`] if vectors have different lengths.
    pub fn dot(&self, other: &Self) -> Result<f32> {
        self.check_len("vector dot", other)?;
        Ok(dispatch!(self.backend, dot(&self.data, &other.data)))
    }

    /// Multiply every element by `scalar`
    ///
    /// # Examples
    ///
    /// ```
    /// use denso::Vector;
    ///
    /// let v = Vector::from_slice(&[1.0, -2.0]);
    /// assert_eq!(v.scale(3.0).as_slice(), &[3.0, -6.0]);
    /// ```
    pub fn scale(&self, scalar: f32) -> Self {
        let mut result = vec![0.0; self.len()];
        dispatch!(self.backend, scale(&self.data, scalar, &mut result));
        Self::with_backend(result, self.backend)
    }
}
