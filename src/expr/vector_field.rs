use super::ScalarExpr;
use crate::{base_space::BaseSpace, error::FieldError};
use nalgebra::{allocator::Allocator, DVector, DefaultAllocator, Dim, OVector};
use tracing::debug;

/// A field from a base space to R^n, made of n scalar expressions over that
/// same base space. All the components share the same type, so components
/// built from different closures should be boxed (`Box<dyn Fn(..) -> f64>`)
#[derive(Debug, Clone)]
pub struct VectorField<D, E> {
    components: Vec<E>,
    space: BaseSpace<D>,
}

impl<D: Dim, E> VectorField<D, E>
where
    DefaultAllocator: Allocator<D>,
    E: ScalarExpr<Dim = D>,
{
    /// Fails if some component isn't defined over a base space of dimension
    /// `dim`
    pub fn new(dim: D, components: Vec<E>) -> Result<Self, FieldError> {
        let space = BaseSpace::new(dim);
        for (i, c) in components.iter().enumerate() {
            if let Err(e) = space.check_compatible(c.base_space()) {
                debug!(component = i, error = %e, "cannot build vector field");
                return Err(e);
            }
        }
        Ok(Self { components, space })
    }

    /// Dimension of the base space
    pub fn inner_size(&self) -> usize {
        self.space.inner_size()
    }

    /// Number of components
    pub fn outer_size(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, i: usize) -> Option<&E> {
        self.components.get(i)
    }

    pub fn components(&self) -> &[E] {
        &self.components
    }

    pub fn evaluate(&self, p: &OVector<f64, D>) -> DVector<f64> {
        DVector::from_iterator(
            self.outer_size(),
            self.components.iter().map(|c| c.evaluate(p)),
        )
    }

    pub fn try_evaluate(&self, p: &OVector<f64, D>) -> Result<DVector<f64>, FieldError> {
        self.space.check_point(p)?;
        Ok(self.evaluate(p))
    }

    /// Forwards `i` to every component, and reports the first failure
    pub fn forward(&self, i: usize) -> Result<(), FieldError> {
        self.components
            .iter()
            .map(|c| c.forward(i))
            .fold(Ok(()), |acc, r| acc.and(r))
    }

    /// The scalar field `p -> <self(p), v>`
    pub fn dot(self, v: DVector<f64>) -> Result<DotProduct<D, E>, FieldError> {
        if v.len() != self.outer_size() {
            debug!(components = self.outer_size(), len = v.len(), "cannot take dot product");
            return Err(FieldError::DimensionMismatch {
                expected: self.outer_size(),
                found: v.len(),
            });
        }
        let space = BaseSpace::new(self.space.dim());
        Ok(DotProduct {
            field: self,
            rhs: v,
            space,
        })
    }
}

impl<D, E> std::ops::Index<usize> for VectorField<D, E> {
    type Output = E;
    fn index(&self, i: usize) -> &E {
        &self.components[i]
    }
}

/// Inner product of a [`VectorField`] with a constant vector
#[derive(Debug, Clone)]
pub struct DotProduct<D, E> {
    field: VectorField<D, E>,
    rhs: DVector<f64>,
    space: BaseSpace<D>,
}

impl<D: Dim, E> ScalarExpr for DotProduct<D, E>
where
    DefaultAllocator: Allocator<D>,
    E: ScalarExpr<Dim = D>,
{
    type Dim = D;

    fn evaluate(&self, p: &OVector<f64, D>) -> f64 {
        self.space.assert_point(p);
        self.field
            .components
            .iter()
            .zip(self.rhs.iter())
            .map(|(c, w)| c.evaluate(p) * w)
            .sum()
    }

    fn base_space(&self) -> &BaseSpace<D> {
        &self.space
    }

    fn base_space_mut(&mut self) -> &mut BaseSpace<D> {
        &mut self.space
    }

    fn forward(&self, i: usize) -> Result<(), FieldError> {
        self.field.forward(i)
    }

    fn rebind(&mut self, dim: D) {
        self.space.set_dim(dim);
        self.field.space.set_dim(dim);
        for c in &mut self.field.components {
            c.rebind(dim);
        }
    }
}
