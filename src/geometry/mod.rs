//! Affine subspaces of a Euclidean space, and the metric queries they support

mod hyperplane;

pub use hyperplane::{HyperPlane, DEGENERACY_TOLERANCE};
