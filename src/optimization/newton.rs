use super::{OptimizerConfig, Optimum};
use crate::{error::OptimizationError, expr::ScalarExpr};
use nalgebra::{allocator::Allocator, DefaultAllocator, DimMin, OVector};
use tracing::{debug, trace};

/// Newton's method: `x <- x - step * H(x)^-1 grad f(x)`, solving for the
/// update with an LU decomposition of the Hessian approximation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Newton {
    config: OptimizerConfig,
}

impl Newton {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Fails if `x0` doesn't live in the base space of `f`, or if the Hessian
    /// can't be inverted at some iterate
    pub fn minimize<E: ScalarExpr>(
        &self,
        f: &E,
        x0: OVector<f64, E::Dim>,
    ) -> Result<Optimum<E::Dim>, OptimizationError>
    where
        E::Dim: DimMin<E::Dim, Output = E::Dim>,
        DefaultAllocator: Allocator<E::Dim> + Allocator<E::Dim, E::Dim>,
    {
        f.base_space().check_point(&x0)?;
        let grad = f.gradient();
        let hess = f.hessian();
        let mut x = x0;
        for k in 0..self.config.max_iter {
            let g = grad.evaluate(&x);
            let norm = g.norm();
            trace!(iteration = k, grad_norm = norm, "newton");
            if norm <= self.config.tolerance {
                return Ok(Optimum::reached("newton", f, x, k, true));
            }
            let Some(update) = hess.evaluate(&x).lu().solve(&g) else {
                debug!(iteration = k, "singular hessian");
                return Err(OptimizationError::SingularHessian { iteration: k });
            };
            x.axpy(-self.config.step, &update, 1.0);
        }
        Ok(Optimum::reached("newton", f, x, self.config.max_iter, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ScalarField;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Vector2, U2};

    fn full_step() -> Newton {
        Newton::new(OptimizerConfig {
            step: 1.0,
            ..Default::default()
        })
    }

    #[test]
    fn one_step_on_a_quadratic() {
        let f = ScalarField::with_dim(U2, |p: &Vector2<f64>| {
            (p.x - 1.0).powi(2) + (p.y + 2.0).powi(2) + p.x * p.y
        });
        let res = full_step().minimize(&f, Vector2::zeros()).unwrap();
        assert!(res.converged);
        assert!(res.iterations <= 3);
        // 2(x - 1) + y = 0, 2(y + 2) + x = 0
        assert_abs_diff_eq!(res.point, Vector2::new(8.0 / 3.0, -10.0 / 3.0), epsilon = 1e-4);
    }

    #[test]
    fn singular_hessian() {
        let f = ScalarField::with_dim(U2, |p: &Vector2<f64>| p.x + p.y);
        assert_eq!(
            full_step().minimize(&f, Vector2::zeros()),
            Err(OptimizationError::SingularHessian { iteration: 0 })
        );
    }
}
