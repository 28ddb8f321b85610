//! Errors raised while building or querying fields, subspaces and optimizers

use thiserror::Error;

/// Errors related to the composition and evaluation of scalar expressions
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FieldError {
    /// Two operands (or an operand and a point) disagree on the dimension of
    /// the base space
    #[error("dimension mismatch: expected a base space of dimension {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A discretized field was forwarded a row its table doesn't have
    #[error("sample index {index} out of range for a table with {rows} rows and {cols} columns")]
    SampleOutOfRange {
        index: usize,
        rows: usize,
        cols: usize,
    },
}

/// Errors related to affine subspaces
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    /// The generating points are affinely dependent. `direction` is the index
    /// of the first direction found to be (numerically) in the span of the
    /// previous ones
    #[error("degenerate subspace: direction {direction} is linearly dependent on the previous ones")]
    DegenerateSubspace { direction: usize },
    /// A normal direction only exists for subspaces of codimension one
    #[error("a {intrinsic}-dimensional subspace of a {ambient}-dimensional space has no unique normal")]
    NotAHyperplane { intrinsic: usize, ambient: usize },
}

/// Errors raised by the optimizers
#[derive(Clone, Debug, PartialEq, Error)]
pub enum OptimizationError {
    /// The Hessian approximation couldn't be inverted
    #[error("singular Hessian at iteration {iteration}")]
    SingularHessian { iteration: usize },
    /// Nothing to search over
    #[error("cannot optimize over an empty grid")]
    EmptyGrid,
    #[error(transparent)]
    Field(#[from] FieldError),
}
