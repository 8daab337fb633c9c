//! Numeric buffer shared with the solver

use std::ops::{Deref, DerefMut};

/// Growable `f64` buffer with in-place element access.
///
/// Solvers read inputs from and write results into these buffers, so callers
/// keep them alive between solves and mutate single elements in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector(Vec<f64>);

impl Vector {
    /// Create a vector of `len` copies of `value`
    pub fn filled(len: usize, value: f64) -> Self {
        Self(vec![value; len])
    }

    /// Create a vector of `len` zeros
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, 0.0)
    }

    /// Resize in place; new elements are zero
    pub fn resize(&mut self, len: usize) {
        self.0.resize(len, 0.0);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for Vector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl DerefMut for Vector {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}
