use super::{OptimizerConfig, Optimum};
use crate::{error::OptimizationError, expr::ScalarExpr};
use nalgebra::{allocator::Allocator, DefaultAllocator, OMatrix, OVector};
use tracing::{debug, trace};

/// Quasi-Newton method maintaining an approximation of the inverse Hessian,
/// starting from the identity and refined after each step with the BFGS
/// rank-two update. Only the gradient of the objective is ever evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bfgs {
    config: OptimizerConfig,
}

impl Bfgs {
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
        DefaultAllocator: Allocator<E::Dim> + Allocator<E::Dim, E::Dim>,
    {
        f.base_space().check_point(&x0)?;
        let grad = f.gradient();
        let (dim, _) = x0.shape_generic();
        let mut inv_hessian = OMatrix::<f64, E::Dim, E::Dim>::identity_generic(dim, dim);
        let mut x = x0;
        let mut g = grad.evaluate(&x);
        for k in 0..self.config.max_iter {
            let norm = g.norm();
            trace!(iteration = k, grad_norm = norm, "bfgs");
            if norm <= self.config.tolerance {
                return Ok(Optimum::reached("bfgs", f, x, k, true));
            }
            let direction = -(&inv_hessian * &g);
            let x_next = &x + direction * self.config.step;
            let g_next = grad.evaluate(&x_next);
            let s = &x_next - &x;
            let y = &g_next - &g;
            if s.norm() == 0.0 {
                debug!(iteration = k, "bfgs made no progress");
                return Ok(Optimum::reached("bfgs", f, x, k, false));
            }
            // The update keeps the approximation positive definite only if
            // the curvature along the step is positive
            let sy = s.dot(&y);
            if sy > 0.0 {
                let rho = 1.0 / sy;
                let hy = &inv_hessian * &y;
                let yhy = y.dot(&hy);
                inv_hessian.ger(-rho, &s, &hy, 1.0);
                inv_hessian.ger(-rho, &hy, &s, 1.0);
                inv_hessian.ger(rho * rho * yhy + rho, &s, &s, 1.0);
            }
            x = x_next;
            g = g_next;
        }
        Ok(Optimum::reached("bfgs", f, x, self.config.max_iter, false))
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
        let opt = Bfgs::new(OptimizerConfig {
            step: 1.0,
            ..Default::default()
        });
        let res = opt.minimize(&f, Vector2::zeros()).unwrap();
        assert!(res.converged);
        assert!(res.iterations <= 5);
        assert_abs_diff_eq!(res.point, Vector2::new(1.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn dynamic_quadratic() {
        let f = ScalarField::with_dim(Dyn(3), |p: &DVector<f64>| {
            p.iter().enumerate().map(|(i, x)| (x - i as f64).powi(2)).sum::<f64>()
        });
        let opt = Bfgs::new(OptimizerConfig {
            step: 1.0,
            ..Default::default()
        });
        let res = opt.minimize(&f, DVector::zeros(3)).unwrap();
        assert!(res.converged);
        assert_abs_diff_eq!(res.point, DVector::from_vec(vec![0.0, 1.0, 2.0]), epsilon = 1e-5);
        assert!(opt.minimize(&f, DVector::zeros(2)).is_err());
    }
}
