use super::ScalarExpr;
use crate::{base_space::BaseSpace, error::FieldError};
use nalgebra::{allocator::Allocator, DMatrix, DefaultAllocator, Dim, DimName, OVector};
use std::{cell::Cell, fmt::Debug};

/// A field that is constant over its whole base space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant<D> {
    value: f64,
    space: BaseSpace<D>,
}

impl<D: Dim> Constant<D> {
    /// The dimension is needed so the constant can be combined with dynamic
    /// expressions
    pub fn new(value: f64, dim: D) -> Self {
        Self {
            value,
            space: BaseSpace::new(dim),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl<D: Dim> ScalarExpr for Constant<D>
where
    DefaultAllocator: Allocator<D>,
{
    type Dim = D;

    #[inline]
    fn evaluate(&self, _p: &OVector<f64, D>) -> f64 {
        self.value
    }

    fn base_space(&self) -> &BaseSpace<D> {
        &self.space
    }

    fn base_space_mut(&mut self) -> &mut BaseSpace<D> {
        &mut self.space
    }
}

/// A field whose values have been computed beforehand, one per sample (for
/// instance one per quadrature node of a mesh), and stored in the first column
/// of a table. The evaluation point is ignored: the value returned is the one
/// of the last row given to [`ScalarExpr::forward`].
///
/// The table is borrowed, not owned. Evaluating before any call to `forward`
/// returns NaN.
#[derive(Debug, Clone)]
pub struct DiscretizedField<'a, D> {
    data: &'a DMatrix<f64>,
    value: Cell<f64>,
    space: BaseSpace<D>,
}

impl<'a, D: Dim> DiscretizedField<'a, D> {
    pub fn new(data: &'a DMatrix<f64>, dim: D) -> Self {
        Self {
            data,
            value: Cell::new(f64::NAN),
            space: BaseSpace::new(dim),
        }
    }

    /// Number of samples available
    pub fn num_samples(&self) -> usize {
        self.data.nrows()
    }
}

impl<D: Dim> ScalarExpr for DiscretizedField<'_, D>
where
    DefaultAllocator: Allocator<D>,
{
    type Dim = D;

    #[inline]
    fn evaluate(&self, _p: &OVector<f64, D>) -> f64 {
        self.value.get()
    }

    fn base_space(&self) -> &BaseSpace<D> {
        &self.space
    }

    fn base_space_mut(&mut self) -> &mut BaseSpace<D> {
        &mut self.space
    }

    fn forward(&self, i: usize) -> Result<(), FieldError> {
        match self.data.get((i, 0)) {
            Some(&x) => {
                self.value.set(x);
                Ok(())
            }
            None => Err(FieldError::SampleOutOfRange {
                index: i,
                rows: self.data.nrows(),
                cols: self.data.ncols(),
            }),
        }
    }
}

/// A field defined by an arbitrary closure
#[derive(Clone)]
pub struct ScalarField<D, F> {
    f: F,
    space: BaseSpace<D>,
}

impl<D: Dim, F> ScalarField<D, F>
where
    DefaultAllocator: Allocator<D>,
    F: Fn(&OVector<f64, D>) -> f64,
{
    /// A field over a statically-sized base space
    pub fn new(f: F) -> Self
    where
        D: DimName,
    {
        Self::with_dim(D::name(), f)
    }

    /// A field over a base space of dimension `dim`. Needed for dynamic
    /// fields
    pub fn with_dim(dim: D, f: F) -> Self {
        Self {
            f,
            space: BaseSpace::new(dim),
        }
    }
}

impl<D: Debug, F> Debug for ScalarField<D, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarField")
            .field("f", &"<closure>")
            .field("space", &self.space)
            .finish()
    }
}

impl<D: Dim, F> ScalarExpr for ScalarField<D, F>
where
    DefaultAllocator: Allocator<D>,
    F: Fn(&OVector<f64, D>) -> f64,
{
    type Dim = D;

    #[inline]
    fn evaluate(&self, p: &OVector<f64, D>) -> f64 {
        (self.f)(p)
    }

    fn base_space(&self) -> &BaseSpace<D> {
        &self.space
    }

    fn base_space_mut(&mut self) -> &mut BaseSpace<D> {
        &mut self.space
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Resize;
    use nalgebra::{dmatrix, DVector, Dyn, Vector2, U2};
    use rstest::*;

    #[fixture]
    fn table() -> DMatrix<f64> {
        dmatrix![1.0; 2.5; -4.0]
    }

    #[test]
    fn constant_ignores_point() {
        let c = Constant::new(3.2, U2);
        assert_eq!(c.evaluate(&Vector2::new(1.0, -7.0)), 3.2);
        assert_eq!(c.inner_size(), 2);
    }

    #[test]
    fn resize_dynamic_constant() {
        let mut c = Constant::new(1.0, Dyn(2));
        c.resize(4);
        assert_eq!(c.inner_size(), 4);
        assert_eq!(c.try_evaluate(&DVector::zeros(4)), Ok(1.0));
        assert!(c.try_evaluate(&DVector::zeros(2)).is_err());
    }

    #[rstest]
    fn discretized_follows_forward(table: DMatrix<f64>) {
        let f = DiscretizedField::new(&table, U2);
        let p = Vector2::zeros();
        assert!(f.evaluate(&p).is_nan());
        for (i, expected) in [1.0, 2.5, -4.0].into_iter().enumerate() {
            f.forward(i).unwrap();
            assert_eq!(f.evaluate(&p), expected);
        }
        assert_eq!(f.num_samples(), 3);
    }

    #[rstest]
    fn discretized_out_of_range(table: DMatrix<f64>) {
        let f = DiscretizedField::new(&table, U2);
        f.forward(1).unwrap();
        assert_eq!(
            f.forward(3),
            Err(FieldError::SampleOutOfRange {
                index: 3,
                rows: 3,
                cols: 1
            })
        );
        // The last valid sample is kept
        assert_eq!(f.evaluate(&Vector2::zeros()), 2.5);
    }

    #[rstest]
    fn discretized_evaluate_at(table: DMatrix<f64>) {
        let f = DiscretizedField::new(&table, Dyn(3));
        assert_eq!(f.evaluate_at(2, &DVector::zeros(3)), Ok(-4.0));
    }

    #[test]
    fn closure_field() {
        let f: ScalarField<U2, _> = ScalarField::new(|p: &Vector2<f64>| p.x * p.y);
        assert_eq!(f.evaluate(&Vector2::new(3.0, 4.0)), 12.0);
        let g = ScalarField::with_dim(Dyn(3), |p: &DVector<f64>| p.sum());
        assert_eq!(g.evaluate(&DVector::from_element(3, 2.0)), 6.0);
    }
}
