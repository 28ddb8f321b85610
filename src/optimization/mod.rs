//! Unconstrained minimization of scalar expressions
//!
//! The derivative-based optimizers only see the objective through its
//! [`Gradient`](crate::expr::Gradient) (and [`Hessian`](crate::expr::Hessian)
//! for [`Newton`]), so they work on any [`ScalarExpr`], with the accuracy of
//! its finite difference step. None of them does a line search: the step in
//! [`OptimizerConfig`] is used as is.

mod bfgs;
mod gradient_descent;
mod grid;
mod newton;

pub use bfgs::Bfgs;
pub use gradient_descent::GradientDescent;
pub use grid::GridSearch;
pub use newton::Newton;

use crate::expr::ScalarExpr;
use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, OVector};
use tracing::debug;

/// Stopping criteria and step of the iterative optimizers
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Stop once the norm of the gradient gets below this
    pub tolerance: f64,
    /// Multiplies every update of the current point
    pub step: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iter: 500,
            tolerance: 1e-5,
            step: 1e-2,
        }
    }
}

/// Where an optimizer stopped
#[derive(Debug, Clone, PartialEq)]
pub struct Optimum<D: Dim>
where
    DefaultAllocator: Allocator<D>,
{
    pub point: OVector<f64, D>,
    /// Value of the objective at `point`
    pub value: f64,
    pub iterations: usize,
    /// Whether the stopping criterion was met before running out of
    /// iterations
    pub converged: bool,
}

impl<D: Dim> Optimum<D>
where
    DefaultAllocator: Allocator<D>,
{
    fn reached<E: ScalarExpr<Dim = D>>(
        method: &str,
        f: &E,
        point: OVector<f64, D>,
        iterations: usize,
        converged: bool,
    ) -> Self {
        let value = f.evaluate(&point);
        debug!(method, iterations, converged, value, "optimization done");
        Self {
            point,
            value,
            iterations,
            converged,
        }
    }
}
