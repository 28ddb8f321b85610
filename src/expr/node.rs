use super::{
    composite::NegationOp,
    derivatives::{Gradient, Hessian},
};
use crate::{base_space::BaseSpace, error::FieldError};
use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, Dyn, OVector};

/// The trait every node of a scalar field expression implements, be it a leaf
/// or a composite node. A `ScalarExpr` describes a function from its base
/// space (of dimension [`Self::inner_size`]) to the reals.
///
/// Expressions are plain values: composite nodes own their children, so
/// building an expression just moves nodes around, and evaluating it walks the
/// tree without allocating anything. Everything is monomorphized, so the whole
/// tree gets inlined into a single function per expression type.
pub trait ScalarExpr
where
    DefaultAllocator: Allocator<Self::Dim>,
{
    /// Dimension of the base space. Either `nalgebra::Const<N>` or
    /// `nalgebra::Dyn`
    type Dim: Dim;

    /// Evaluates the expression at point `p`. Composite nodes over a dynamic
    /// base space panic if `p` doesn't have the right dimension. See
    /// [`Self::try_evaluate`] for a non-panicking version
    fn evaluate(&self, p: &OVector<f64, Self::Dim>) -> f64;

    fn base_space(&self) -> &BaseSpace<Self::Dim>;

    fn base_space_mut(&mut self) -> &mut BaseSpace<Self::Dim>;

    /// Sets the current sample (row) index of every discretized leaf
    /// reachable from this node. Should be called on the root of the
    /// expression, before evaluating it at the point corresponding to that
    /// sample. Does nothing on nodes without such leaves
    fn forward(&self, _i: usize) -> Result<(), FieldError> {
        Ok(())
    }

    /// Rebinds this node and every node below it to a base space of
    /// dimension `dim`. Composite nodes must override this to reach their
    /// children
    fn rebind(&mut self, dim: Self::Dim) {
        self.base_space_mut().set_dim(dim);
    }

    /// Dimension of the base space
    fn inner_size(&self) -> usize {
        self.base_space().inner_size()
    }

    /// Step used when approximating derivatives of this expression
    fn step(&self) -> f64 {
        self.base_space().step()
    }

    fn set_step(&mut self, h: f64) {
        self.base_space_mut().set_step(h);
    }

    /// Builder-style version of [`Self::set_step`]
    fn with_step(mut self, h: f64) -> Self
    where
        Self: Sized,
    {
        self.set_step(h);
        self
    }

    /// Evaluates the expression at point `p`, after checking `p` has the
    /// right dimension
    fn try_evaluate(&self, p: &OVector<f64, Self::Dim>) -> Result<f64, FieldError> {
        self.base_space().check_point(p)?;
        Ok(self.evaluate(p))
    }

    /// Forwards sample `i` then evaluates at `p`, which is expected to be the
    /// point sample `i` was taken at
    fn evaluate_at(&self, i: usize, p: &OVector<f64, Self::Dim>) -> Result<f64, FieldError> {
        self.forward(i)?;
        self.try_evaluate(p)
    }

    /// Centered finite difference approximation of the gradient, using the
    /// current step of the expression
    fn gradient(&self) -> Gradient<'_, Self>
    where
        Self: Sized,
    {
        Gradient::new(self)
    }

    /// Centered finite difference approximation of the Hessian, using the
    /// current step of the expression
    fn hessian(&self) -> Hessian<'_, Self>
    where
        Self: Sized,
        DefaultAllocator: Allocator<Self::Dim, Self::Dim>,
    {
        Hessian::new(self)
    }

    /// Pointwise negation. Same as the unary `-` operator
    fn negate(self) -> NegationOp<Self::Dim, Self>
    where
        Self: Sized,
    {
        NegationOp::new(self)
    }
}

/// Expressions over a runtime-sized base space can be rebound to another
/// dimension, along with all their subexpressions. This is not available for
/// statically-sized expressions
pub trait Resize {
    fn resize(&mut self, n: usize);
}

impl<E: ScalarExpr<Dim = Dyn>> Resize for E {
    fn resize(&mut self, n: usize) {
        self.rebind(Dyn(n));
    }
}
