//! The base space over which scalar expressions are defined
//!
//! Its dimension is either known at compile time (`nalgebra::Const<N>`, which
//! takes no room at all) or only at runtime (`nalgebra::Dyn`, which carries
//! the actual value). Expressions of both kinds go through the same code: only
//! dynamic ones ever need to check points against their dimension, as for
//! static ones the type system already did.

use crate::error::FieldError;
use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, Dyn, OVector};

/// Step used by default in finite difference approximations
pub const DEFAULT_STEP: f64 = 1e-3;

/// What every expression node knows about the space it is defined on: its
/// dimension, and the step to use when differentiating it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSpace<D> {
    dim: D,
    step: f64,
}

impl<D: Dim> BaseSpace<D> {
    pub fn new(dim: D) -> Self {
        Self {
            dim,
            step: DEFAULT_STEP,
        }
    }

    /// The dimension, as a value usable to allocate vectors and matrices
    pub fn dim(&self) -> D {
        self.dim
    }

    /// The dimension, as a plain integer
    pub fn inner_size(&self) -> usize {
        self.dim.value()
    }

    /// Whether the dimension is only known at runtime
    pub fn is_dynamic(&self) -> bool {
        D::try_to_usize().is_none()
    }

    /// Changes the dimension. A no-op for static dimensions, which only have
    /// one value
    pub fn set_dim(&mut self, dim: D) {
        self.dim = dim;
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn set_step(&mut self, h: f64) {
        self.step = h;
    }

    /// Checks that both spaces have the same dimension. Always succeeds for
    /// static dimensions
    pub fn check_compatible(&self, other: &Self) -> Result<(), FieldError> {
        if self.is_dynamic() && self.inner_size() != other.inner_size() {
            return Err(FieldError::DimensionMismatch {
                expected: self.inner_size(),
                found: other.inner_size(),
            });
        }
        Ok(())
    }

    /// Checks that a point lives in this space. Always succeeds for static
    /// dimensions
    pub fn check_point(&self, p: &OVector<f64, D>) -> Result<(), FieldError>
    where
        DefaultAllocator: Allocator<D>,
    {
        if self.is_dynamic() && p.nrows() != self.inner_size() {
            return Err(FieldError::DimensionMismatch {
                expected: self.inner_size(),
                found: p.nrows(),
            });
        }
        Ok(())
    }

    /// Like [`Self::check_point`], but panics. Used by the evaluation of
    /// composite nodes, which cannot report errors
    #[inline]
    pub fn assert_point(&self, p: &OVector<f64, D>)
    where
        DefaultAllocator: Allocator<D>,
    {
        if let Err(e) = self.check_point(p) {
            panic!("{e}");
        }
    }
}

impl BaseSpace<Dyn> {
    /// Changes the dimension. Only runtime-sized spaces can be resized
    pub fn resize(&mut self, n: usize) {
        self.dim = Dyn(n);
    }
}
