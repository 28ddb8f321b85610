use super::{
    base_types::{BinaryOperation, Func, UnaryOperation},
    ScalarExpr,
};
use crate::{base_space::BaseSpace, error::FieldError};
use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, OVector};
use tracing::debug;

/// Combines the values of two expressions defined over the same base space
#[derive(Debug, Clone)]
pub struct BinOp<D, L, R, F> {
    op1: L,
    op2: R,
    f: F,
    space: BaseSpace<D>,
}

impl<D: Dim, L, R, F> BinOp<D, L, R, F>
where
    DefaultAllocator: Allocator<D>,
    L: ScalarExpr<Dim = D>,
    R: ScalarExpr<Dim = D>,
    F: BinaryOperation,
{
    /// Fails if the base spaces of the operands have different (runtime)
    /// dimensions. For static dimensions, this is checked by the type system
    pub fn try_new(op1: L, op2: R, f: F) -> Result<Self, FieldError> {
        if let Err(e) = op1.base_space().check_compatible(op2.base_space()) {
            debug!(error = %e, "cannot combine expressions");
            return Err(e);
        }
        let space = BaseSpace::new(op1.base_space().dim());
        Ok(Self {
            op1,
            op2,
            f,
            space,
        })
    }

    /// Like [`Self::try_new`], but panics when dimensions mismatch. This is
    /// what arithmetic operators use
    pub fn new(op1: L, op2: R, f: F) -> Self {
        match Self::try_new(op1, op2, f) {
            Ok(op) => op,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn operands(&self) -> (&L, &R) {
        (&self.op1, &self.op2)
    }
}

impl<D: Dim, L, R, C> BinOp<D, L, R, Func<C>>
where
    DefaultAllocator: Allocator<D>,
    L: ScalarExpr<Dim = D>,
    R: ScalarExpr<Dim = D>,
    C: Fn(f64, f64) -> f64,
{
    /// Combine two expressions with an arbitrary function
    pub fn with_fn(op1: L, op2: R, f: C) -> Self {
        Self::new(op1, op2, Func(f))
    }
}

impl<D: Dim, L, R, F> ScalarExpr for BinOp<D, L, R, F>
where
    DefaultAllocator: Allocator<D>,
    L: ScalarExpr<Dim = D>,
    R: ScalarExpr<Dim = D>,
    F: BinaryOperation,
{
    type Dim = D;

    #[inline]
    fn evaluate(&self, p: &OVector<f64, D>) -> f64 {
        self.space.assert_point(p);
        self.f.apply(self.op1.evaluate(p), self.op2.evaluate(p))
    }

    fn base_space(&self) -> &BaseSpace<D> {
        &self.space
    }

    fn base_space_mut(&mut self) -> &mut BaseSpace<D> {
        &mut self.space
    }

    /// Both operands are always forwarded, even if the first one fails
    fn forward(&self, i: usize) -> Result<(), FieldError> {
        let left = self.op1.forward(i);
        let right = self.op2.forward(i);
        left.and(right)
    }

    fn rebind(&mut self, dim: D) {
        self.space.set_dim(dim);
        self.op1.rebind(dim);
        self.op2.rebind(dim);
    }
}

/// Applies a function to the value of an expression
#[derive(Debug, Clone)]
pub struct UnOp<D, E, F> {
    op: E,
    f: F,
    space: BaseSpace<D>,
}

impl<D: Dim, E, F> UnOp<D, E, F>
where
    DefaultAllocator: Allocator<D>,
    E: ScalarExpr<Dim = D>,
    F: UnaryOperation,
{
    pub fn new(op: E, f: F) -> Self {
        let space = BaseSpace::new(op.base_space().dim());
        Self { op, f, space }
    }

    pub fn operand(&self) -> &E {
        &self.op
    }
}

impl<D: Dim, E, C> UnOp<D, E, Func<C>>
where
    DefaultAllocator: Allocator<D>,
    E: ScalarExpr<Dim = D>,
    C: Fn(f64) -> f64,
{
    /// Apply an arbitrary function to an expression
    pub fn with_fn(op: E, f: C) -> Self {
        Self::new(op, Func(f))
    }
}

impl<D: Dim, E, F> ScalarExpr for UnOp<D, E, F>
where
    DefaultAllocator: Allocator<D>,
    E: ScalarExpr<Dim = D>,
    F: UnaryOperation,
{
    type Dim = D;

    #[inline]
    fn evaluate(&self, p: &OVector<f64, D>) -> f64 {
        self.space.assert_point(p);
        self.f.apply(self.op.evaluate(p))
    }

    fn base_space(&self) -> &BaseSpace<D> {
        &self.space
    }

    fn base_space_mut(&mut self) -> &mut BaseSpace<D> {
        &mut self.space
    }

    fn forward(&self, i: usize) -> Result<(), FieldError> {
        self.op.forward(i)
    }

    fn rebind(&mut self, dim: D) {
        self.space.set_dim(dim);
        self.op.rebind(dim);
    }
}

/// Pointwise negation of an expression
#[derive(Debug, Clone)]
pub struct NegationOp<D, E> {
    op: E,
    space: BaseSpace<D>,
}

impl<D: Dim, E> NegationOp<D, E>
where
    DefaultAllocator: Allocator<D>,
    E: ScalarExpr<Dim = D>,
{
    pub fn new(op: E) -> Self {
        let space = BaseSpace::new(op.base_space().dim());
        Self { op, space }
    }

    pub fn operand(&self) -> &E {
        &self.op
    }
}

impl<D: Dim, E> ScalarExpr for NegationOp<D, E>
where
    DefaultAllocator: Allocator<D>,
    E: ScalarExpr<Dim = D>,
{
    type Dim = D;

    #[inline]
    fn evaluate(&self, p: &OVector<f64, D>) -> f64 {
        self.space.assert_point(p);
        -self.op.evaluate(p)
    }

    fn base_space(&self) -> &BaseSpace<D> {
        &self.space
    }

    fn base_space_mut(&mut self) -> &mut BaseSpace<D> {
        &mut self.space
    }

    fn forward(&self, i: usize) -> Result<(), FieldError> {
        self.op.forward(i)
    }

    fn rebind(&mut self, dim: D) {
        self.space.set_dim(dim);
        self.op.rebind(dim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{base_types::*, Constant, DiscretizedField, Resize, ScalarField};
    use nalgebra::{dmatrix, DVector, Dyn, Vector2, U2};

    #[test]
    fn binop_mismatch() {
        let r = BinOp::try_new(Constant::new(1.0, Dyn(2)), Constant::new(2.0, Dyn(3)), Plus);
        assert_eq!(
            r.err(),
            Some(FieldError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn binop_evaluate_wrong_point() {
        let op = BinOp::new(Constant::new(1.0, Dyn(2)), Constant::new(2.0, Dyn(2)), Plus);
        op.evaluate(&DVector::zeros(5));
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn unop_evaluate_wrong_point() {
        let op = UnOp::new(ScalarField::with_dim(Dyn(2), |p: &DVector<f64>| p.sum()), Sin);
        op.evaluate(&DVector::from_element(5, 0.1));
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn negation_evaluate_wrong_point() {
        let op = NegationOp::new(Constant::new(1.0, Dyn(2)));
        op.evaluate(&DVector::zeros(3));
    }

    #[test]
    fn resize_reaches_nested_nodes() {
        let mut e = BinOp::new(
            NegationOp::new(BinOp::new(Constant::new(1.0, Dyn(2)), Constant::new(2.0, Dyn(2)), Plus)),
            UnOp::new(Constant::new(0.0, Dyn(2)), Exp),
            Multiplies,
        );
        e.resize(3);
        assert_eq!(e.try_evaluate(&DVector::zeros(3)), Ok(-3.0));
        let (lhs, rhs) = e.operands();
        assert_eq!(lhs.operand().operands().1.inner_size(), 3);
        assert_eq!(rhs.operand().inner_size(), 3);
        assert!(e.try_evaluate(&DVector::zeros(2)).is_err());
    }

    #[test]
    fn custom_functions() {
        let x = ScalarField::with_dim(U2, |p: &Vector2<f64>| p.x);
        let y = ScalarField::with_dim(U2, |p: &Vector2<f64>| p.y);
        let m = BinOp::with_fn(x, y, f64::max);
        let sq = UnOp::with_fn(m, |v: f64| v * v);
        assert_eq!(sq.evaluate(&Vector2::new(-1.0, -3.0)), 1.0);
        assert_eq!(sq.operand().operands().1.evaluate(&Vector2::new(0.0, 5.0)), 5.0);
    }

    #[test]
    fn forward_reaches_every_leaf() {
        let left = dmatrix![1.0; 2.0];
        let right = dmatrix![10.0; 20.0];
        let e = NegationOp::new(UnOp::new(
            BinOp::new(
                DiscretizedField::new(&left, U2),
                DiscretizedField::new(&right, U2),
                Plus,
            ),
            Exp,
        ));
        e.forward(1).unwrap();
        assert_eq!(e.evaluate(&Vector2::zeros()), -(22.0f64.exp()));
    }

    #[test]
    fn forward_both_sides_even_on_failure() {
        let short = dmatrix![1.0];
        let long = dmatrix![1.0; 2.0; 3.0];
        let e = BinOp::new(
            DiscretizedField::new(&short, U2),
            DiscretizedField::new(&long, U2),
            Multiplies,
        );
        assert!(e.forward(2).is_err());
        assert_eq!(e.operands().1.evaluate(&Vector2::zeros()), 3.0);
    }
}
