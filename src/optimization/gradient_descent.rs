use super::{OptimizerConfig, Optimum};
use crate::{error::OptimizationError, expr::ScalarExpr};
use nalgebra::{allocator::Allocator, DefaultAllocator, OVector};
use tracing::trace;

/// Fixed-step gradient descent: `x <- x - step * grad f(x)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradientDescent {
    config: OptimizerConfig,
}

impl GradientDescent {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Fails only if `x0` doesn't live in the base space of `f`
    pub fn minimize<E: ScalarExpr>(
        &self,
        f: &E,
        x0: OVector<f64, E::Dim>,
    ) -> Result<Optimum<E::Dim>, OptimizationError>
    where
        DefaultAllocator: Allocator<E::Dim>,
    {
        f.base_space().check_point(&x0)?;
        let grad = f.gradient();
        let mut x = x0;
        for k in 0..self.config.max_iter {
            let g = grad.evaluate(&x);
            let norm = g.norm();
            trace!(iteration = k, grad_norm = norm, "gradient descent");
            if norm <= self.config.tolerance {
                return Ok(Optimum::reached("gradient descent", f, x, k, true));
            }
            x.axpy(-self.config.step, &g, 1.0);
        }
        Ok(Optimum::reached(
            "gradient descent",
            f,
            x,
            self.config.max_iter,
            false,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ScalarField;
    use approx::assert_abs_diff_eq;
    use nalgebra::{DVector, Dyn, Vector2, U2};

    #[test]
    fn minimizes_a_quadratic() {
        let f = ScalarField::with_dim(U2, |p: &Vector2<f64>| {
            (p.x - 1.0).powi(2) + (p.y + 2.0).powi(2)
        });
        let opt = GradientDescent::new(OptimizerConfig {
            step: 0.1,
            ..Default::default()
        });
        let res = opt.minimize(&f, Vector2::zeros()).unwrap();
        assert!(res.converged);
        assert!(res.iterations < 100);
        assert_abs_diff_eq!(res.point, Vector2::new(1.0, -2.0), epsilon = 1e-4);
        assert_abs_diff_eq!(res.value, 0.0, epsilon = 1e-8);
    }

    #[test]
    fn runs_out_of_iterations() {
        let f = ScalarField::with_dim(U2, |p: &Vector2<f64>| p.norm_squared());
        let opt = GradientDescent::new(OptimizerConfig {
            max_iter: 3,
            ..Default::default()
        });
        let res = opt.minimize(&f, Vector2::new(10.0, 10.0)).unwrap();
        assert!(!res.converged);
        assert_eq!(res.iterations, 3);
    }

    #[test]
    fn starting_point_of_wrong_dimension() {
        let f = ScalarField::with_dim(Dyn(2), |p: &DVector<f64>| p.norm_squared());
        assert!(GradientDescent::default()
            .minimize(&f, DVector::zeros(3))
            .is_err());
    }
}
