//! Finite difference approximations of the derivatives of scalar expressions
//!
//! These are approximations: centered differences have an O(h²) truncation
//! error, and dividing by h (or h²) amplifies rounding errors, so the step
//! shouldn't be taken too small either.

use super::ScalarExpr;
use crate::error::FieldError;
use nalgebra::{allocator::Allocator, DefaultAllocator, OMatrix, OVector, U1};

macro_rules! finite_difference_ops {
    ($($(#[$meta:meta])* $name:ident -> $out:ty where [$($bound:tt)*]),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $name<'a, E> {
                expr: &'a E,
                step: f64,
            }

            impl<'a, E: ScalarExpr> $name<'a, E>
            where
                DefaultAllocator: $($bound)*,
            {
                /// Uses the step of the expression at the time of the call
                pub fn new(expr: &'a E) -> Self {
                    Self {
                        step: expr.step(),
                        expr,
                    }
                }

                pub fn with_step(self, h: f64) -> Self {
                    Self { step: h, ..self }
                }

                pub fn step(&self) -> f64 {
                    self.step
                }

                pub fn inner_size(&self) -> usize {
                    self.expr.inner_size()
                }

                pub fn forward(&self, i: usize) -> Result<(), FieldError> {
                    self.expr.forward(i)
                }

                /// Like `evaluate`, after checking `p` has the right dimension
                pub fn try_evaluate(&self, p: &OVector<f64, E::Dim>) -> Result<$out, FieldError> {
                    self.expr.base_space().check_point(p)?;
                    Ok(self.evaluate(p))
                }
            }
        )*
    };
}

finite_difference_ops! {
    /// Approximates the gradient of an expression with centered differences:
    ///
    /// `g_i(p) = (f(p + h e_i) - f(p - h e_i)) / 2h`
    Gradient -> OVector<f64, E::Dim> where [Allocator<E::Dim>],
    /// Approximates the Hessian of an expression with centered differences. The
    /// result is symmetric by construction
    Hessian -> OMatrix<f64, E::Dim, E::Dim> where [Allocator<E::Dim> + Allocator<E::Dim, E::Dim>],
}

impl<E: ScalarExpr> Gradient<'_, E>
where
    DefaultAllocator: Allocator<E::Dim>,
{
    pub fn evaluate(&self, p: &OVector<f64, E::Dim>) -> OVector<f64, E::Dim> {
        let h = self.step;
        let (dim, _) = p.shape_generic();
        let mut grad = OVector::<f64, E::Dim>::zeros_generic(dim, U1);
        let mut x = p.clone();
        for i in 0..p.nrows() {
            x[i] = p[i] + h;
            let forward = self.expr.evaluate(&x);
            x[i] = p[i] - h;
            let backward = self.expr.evaluate(&x);
            x[i] = p[i];
            grad[i] = (forward - backward) / (2.0 * h);
        }
        grad
    }
}

impl<E: ScalarExpr> Hessian<'_, E>
where
    DefaultAllocator: Allocator<E::Dim> + Allocator<E::Dim, E::Dim>,
{
    pub fn evaluate(&self, p: &OVector<f64, E::Dim>) -> OMatrix<f64, E::Dim, E::Dim> {
        let h = self.step;
        let (dim, _) = p.shape_generic();
        let mut hess = OMatrix::<f64, E::Dim, E::Dim>::zeros_generic(dim, dim);
        let mut x = p.clone();
        let center = self.expr.evaluate(p);
        for i in 0..p.nrows() {
            // diagonal: (f(p + h e_i) - 2f(p) + f(p - h e_i)) / h²
            x[i] = p[i] + h;
            let forward = self.expr.evaluate(&x);
            x[i] = p[i] - h;
            let backward = self.expr.evaluate(&x);
            x[i] = p[i];
            hess[(i, i)] = (forward - 2.0 * center + backward) / (h * h);

            // off-diagonal, for each sign combination of the two steps
            for j in 0..i {
                let mut corner = |si: f64, sj: f64| {
                    x[i] = p[i] + si * h;
                    x[j] = p[j] + sj * h;
                    let v = self.expr.evaluate(&x);
                    x[i] = p[i];
                    x[j] = p[j];
                    v
                };
                let d = (corner(1.0, 1.0) - corner(1.0, -1.0) - corner(-1.0, 1.0)
                    + corner(-1.0, -1.0))
                    / (4.0 * h * h);
                hess[(i, j)] = d;
                hess[(j, i)] = d;
            }
        }
        hess
    }
}
