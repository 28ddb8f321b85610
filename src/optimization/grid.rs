use super::Optimum;
use crate::{error::OptimizationError, expr::ScalarExpr};
use nalgebra::{allocator::Allocator, DefaultAllocator, OVector};
use tracing::debug;

/// Exhaustive search: evaluates the objective at every point of a grid and
/// keeps the smallest value. NaN values are never kept unless nothing else is
/// available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridSearch;

impl GridSearch {
    /// Fails if the grid is empty or if one of its points doesn't live in the
    /// base space of `f`
    pub fn minimize<E, I>(&self, f: &E, grid: I) -> Result<Optimum<E::Dim>, OptimizationError>
    where
        E: ScalarExpr,
        I: IntoIterator<Item = OVector<f64, E::Dim>>,
        DefaultAllocator: Allocator<E::Dim>,
    {
        let mut best: Option<(OVector<f64, E::Dim>, f64)> = None;
        let mut visited = 0;
        for p in grid {
            let value = f.try_evaluate(&p)?;
            visited += 1;
            let better = match &best {
                None => true,
                Some((_, v)) => value < *v || v.is_nan(),
            };
            if better {
                best = Some((p, value));
            }
        }
        let Some((point, value)) = best else {
            debug!("empty grid");
            return Err(OptimizationError::EmptyGrid);
        };
        debug!(method = "grid search", iterations = visited, value, "optimization done");
        Ok(Optimum {
            point,
            value,
            iterations: visited,
            converged: true,
        })
    }
}
